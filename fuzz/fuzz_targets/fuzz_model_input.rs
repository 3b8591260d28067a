// Run locally (from the repo root):
//   cargo +nightly fuzz run fuzz_model_input -- -runs=1000
#![no_main]

use std::sync::mpsc;
use std::sync::Mutex;
use std::sync::OnceLock;
use std::time::Duration;

use libfuzzer_sys::fuzz_target;
use opmodel::{Extractor, ModelBuilder, ModelInput};
use opmodel_resolve::{Randomness, Resolver, ResolverOptions, SelectionMode};
use opmodel_types::{TypeEnv, TypeStore};

mod utils;

const TIMEOUT: Duration = Duration::from_secs(1);

/// Keeps adversarial declarations (many unconstrained parameters) inside the time budget.
const MAX_TUPLES: usize = 4_096;

struct Runner {
    input_tx: mpsc::SyncSender<String>,
    output_rx: Mutex<mpsc::Receiver<()>>,
}

fn check(text: &str) {
    let Ok(input) = ModelInput::from_json(text) else {
        return;
    };
    let mut store = TypeStore::with_minimal_jdk();
    let Ok(delta) = input.extract(&mut store) else {
        return;
    };

    let resolver = Resolver::new(
        ResolverOptions {
            selection: SelectionMode::Random,
            max_tuples: Some(MAX_TUPLES),
        },
        Randomness::seeded(0),
    );
    let mut builder = ModelBuilder::new();
    builder.merge(delta);
    let model = builder
        .build(&store, &resolver)
        .expect("store with the minimal JDK always has java.lang.Object");

    // Oracle: every surviving class and operation is concrete, and `Object()` is present.
    let object = store.well_known().object;
    assert!(model.concrete_classes().all(|class| class.is_concrete()));
    assert!(model.operations().all(|op| op.is_concrete()));
    assert!(model
        .operations()
        .any(|op| op.is_constructor() && op.declaring.def == object && op.inputs.is_empty()));
}

fn runner() -> &'static Runner {
    static RUNNER: OnceLock<Runner> = OnceLock::new();
    RUNNER.get_or_init(|| {
        let (input_tx, input_rx) = mpsc::sync_channel::<String>(0);
        let (output_tx, output_rx) = mpsc::sync_channel::<()>(0);

        std::thread::spawn(move || {
            for input in input_rx {
                check(&input);
                let _ = output_tx.send(());
            }
        });

        Runner {
            input_tx,
            output_rx: Mutex::new(output_rx),
        }
    })
}

fuzz_target!(|data: &[u8]| {
    let Some(text) = utils::truncate_utf8(data) else {
        return;
    };

    let runner = runner();
    runner
        .input_tx
        .send(text.to_owned())
        .expect("fuzz_model_input worker thread exited");

    match runner
        .output_rx
        .lock()
        .expect("fuzz_model_input worker receiver poisoned")
        .recv_timeout(TIMEOUT)
    {
        Ok(()) => {}
        Err(mpsc::RecvTimeoutError::Timeout) => panic!("fuzz_model_input fuzz target timed out"),
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            panic!("fuzz_model_input worker thread panicked")
        }
    }
});
