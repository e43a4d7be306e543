//! # Script Runner
//!
//! Runs a JSON array of steps against one [`Facade`], threading results
//! between steps by name.
//!
//! ```json
//! [
//!   {"op": "CreateByteBuffer", "args": [{"integer": 4}], "bind": "buf"},
//!   {"op": "SetInteger16", "args": [{"var": "buf"}, {"integer": 1}, {"integer": 258}], "bind": "buf"},
//!   {"op": "BytesToHex", "args": [{"var": "buf"}]}
//! ]
//! ```
//!
//! A `{"var": name}` argument moves the bound value into the call, so a
//! `Set*` step consumes the buffer and hands the same buffer back for
//! re-binding.

pub mod types;

pub use types::{Bindings, IntegerJson, OperandJson, Step, StepOutcome, ValueJson};

use octet_core::{Facade, OctetError, Operand, Operation};
use thiserror::Error;

/// A step that failed, with its position in the script.
#[derive(Debug, Error)]
#[error("step {step} ({op}): {source}")]
pub struct StepFailure {
    pub step: usize,
    pub op: String,
    #[source]
    pub source: OctetError,
}

/// Executes scripts, keeping bindings across steps.
#[derive(Debug, Default)]
pub struct ScriptRunner {
    facade: Facade,
    bindings: Bindings,
}

impl ScriptRunner {
    #[must_use]
    pub fn new(facade: Facade) -> Self {
        Self {
            facade,
            bindings: Bindings::new(),
        }
    }

    /// Parse a script document.
    pub fn parse(text: &str) -> Result<Vec<Step>, OctetError> {
        serde_json::from_str(text)
            .map_err(|e| OctetError::SerializationError(format!("Invalid script: {}", e)))
    }

    /// Values currently bound.
    #[must_use]
    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Run every step in order, stopping at the first failure.
    pub fn run(&mut self, steps: Vec<Step>) -> Result<Vec<StepOutcome>, StepFailure> {
        let mut outcomes = Vec::with_capacity(steps.len());
        for (index, step) in steps.into_iter().enumerate() {
            let op = step.op.clone();
            let outcome = self.run_step(index, step).map_err(|source| StepFailure {
                step: index,
                op,
                source,
            })?;
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    fn run_step(&mut self, index: usize, step: Step) -> Result<StepOutcome, OctetError> {
        let operation: Operation = step.op.parse()?;
        let limits = self.facade.limits();
        let operands = step
            .args
            .into_iter()
            .map(|arg| arg.into_operand(limits, &mut self.bindings))
            .collect::<Result<Vec<Operand>, _>>()?;

        tracing::debug!(step = index, operation = operation.name(), "running step");
        let value = self.facade.call(operation, operands)?;
        let json = ValueJson::from(&value);

        if let Some(name) = &step.bind {
            self.bindings.insert(name.clone(), value);
        }

        Ok(StepOutcome {
            step: index,
            op: operation.name().to_string(),
            value: json,
            bind: step.bind,
        })
    }
}
