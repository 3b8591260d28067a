use std::fmt;

use opmodel_types::{format_class_type, format_type, TypeEnv};
use serde::{Deserialize, Serialize};

use crate::OperationModel;

/// Serializable rendering of an [`OperationModel`] with Java-like type names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelReport {
    pub classes: Vec<String>,
    pub operations: Vec<String>,
    pub input_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exercised: Vec<String>,
    pub skipped: Vec<SkippedReport>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedReport {
    pub class: String,
    pub code: String,
    pub reason: String,
}

impl ModelReport {
    pub fn new(env: &dyn TypeEnv, model: &OperationModel) -> Self {
        Self {
            classes: model
                .concrete_classes()
                .map(|class| format_class_type(env, class))
                .collect(),
            operations: model.operations().map(|op| op.signature(env)).collect(),
            input_types: model
                .input_types()
                .iter()
                .map(|ty| format_type(env, ty))
                .collect(),
            exercised: model
                .exercised_classes()
                .iter()
                .filter_map(|class| env.class_name(*class))
                .map(str::to_string)
                .collect(),
            skipped: model
                .skipped()
                .iter()
                .map(|skipped| SkippedReport {
                    class: skipped.class.clone(),
                    code: skipped.reason.code().to_string(),
                    reason: skipped.reason.to_string(),
                })
                .collect(),
        }
    }
}

impl fmt::Display for ModelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "classes ({}):", self.classes.len())?;
        for class in &self.classes {
            writeln!(f, "  {class}")?;
        }
        writeln!(f, "operations ({}):", self.operations.len())?;
        for op in &self.operations {
            writeln!(f, "  {op}")?;
        }
        if !self.exercised.is_empty() {
            writeln!(f, "exercised ({}):", self.exercised.len())?;
            for class in &self.exercised {
                writeln!(f, "  {class}")?;
            }
        }
        if !self.skipped.is_empty() {
            writeln!(f, "skipped ({}):", self.skipped.len())?;
            for skipped in &self.skipped {
                writeln!(f, "  {} [{}]: {}", skipped.class, skipped.code, skipped.reason)?;
            }
        }
        Ok(())
    }
}
