//! Library wrapper around the `opmodel` binary so `cargo test -p opmodel-cli --lib` typechecks
//! the CLI without building the integration tests.

#[allow(dead_code)]
#[path = "main.rs"]
mod main_bin;
