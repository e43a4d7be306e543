//! # JSON Wire Types
//!
//! This module defines the JSON form of operands, results and script steps.
//!
//! Every operand is a single-key object naming its kind:
//!
//! ```json
//! {"buffer": "AQID"}            // Base64 (legacy "1 2 3" also accepted)
//! {"text": "hello"}
//! {"list": [{"integer": 1}, {"integer": 2}]}
//! {"integer": 42}               // or {"integer": "123456789012345678901234"}
//! {"decimal": 1.5}
//! {"sign": "signed"}
//! {"endianness": "big-endian"}
//! {"symbol": "Data.Sign.Signed"}
//! {"var": "name"}               // scripts only
//! ```

use octet_core::{
    Endianness, Limits, Number, Numeric, OctetError, Operand, Sign, Value, buffer_to_persisted,
    load_buffer,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Values bound by earlier script steps.
pub type Bindings = HashMap<String, Value>;

// =============================================================================
// INTEGERS
// =============================================================================

/// A JSON integer, or a decimal string for values beyond 64 bits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntegerJson {
    Signed(i64),
    Unsigned(u64),
    Text(String),
}

impl IntegerJson {
    /// Convert to a core number, rejecting non-integer text.
    pub fn to_number(&self) -> Result<Number, OctetError> {
        match self {
            Self::Signed(v) => Ok(Number::from(*v)),
            Self::Unsigned(v) => Ok(Number::from(*v)),
            Self::Text(text) => match text.parse::<Number>()? {
                n @ Number::Integer(_) => Ok(n),
                Number::Decimal(_) => Err(OctetError::SerializationError(format!(
                    "{text:?} is not an integer"
                ))),
            },
        }
    }
}

// =============================================================================
// OPERANDS
// =============================================================================

/// JSON form of an operand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperandJson {
    Buffer(String),
    Text(String),
    List(Vec<OperandJson>),
    Integer(IntegerJson),
    Decimal(f64),
    Sign(Sign),
    Endianness(Endianness),
    Symbol(String),
    /// Moves the value bound under this name.
    Var(String),
}

impl OperandJson {
    /// Build a core operand. `{"var"}` operands are taken out of `bindings`.
    pub fn into_operand(
        self,
        limits: Limits,
        bindings: &mut Bindings,
    ) -> Result<Operand, OctetError> {
        Ok(match self {
            Self::Buffer(text) => Operand::Buffer(load_buffer(&text, limits.max_buffer_size)?),
            Self::Text(text) => Operand::Text(text),
            Self::List(items) => Operand::List(
                items
                    .into_iter()
                    .map(|item| item.into_operand(limits, bindings))
                    .collect::<Result<_, _>>()?,
            ),
            Self::Integer(integer) => Operand::Number(integer.to_number()?),
            Self::Decimal(value) => Operand::Number(Number::from(value)),
            Self::Sign(sign) => Operand::Sign(sign),
            Self::Endianness(endianness) => Operand::Endianness(endianness),
            Self::Symbol(name) => Operand::Symbol(name),
            Self::Var(name) => bindings
                .remove(&name)
                .map(Value::into_operand)
                .ok_or_else(|| {
                    OctetError::SerializationError(format!("Unbound variable '{}'", name))
                })?,
        })
    }
}

// =============================================================================
// RESULTS
// =============================================================================

/// JSON form of an operation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueJson {
    Buffer(String),
    Text(String),
    List(Vec<ValueJson>),
    Integer(IntegerJson),
    Decimal(f64),
}

impl ValueJson {
    fn from_number(number: &Number) -> Self {
        match number {
            Number::Decimal(d) => Self::Decimal(*d),
            Number::Integer(_) => Self::Integer(
                number
                    .to_i64()
                    .map(IntegerJson::Signed)
                    .unwrap_or_else(|| IntegerJson::Text(number.to_string())),
            ),
        }
    }
}

impl From<&Value> for ValueJson {
    fn from(value: &Value) -> Self {
        match value {
            Value::Buffer(buffer) => Self::Buffer(buffer_to_persisted(buffer)),
            Value::Text(text) => Self::Text(text.clone()),
            Value::List(items) => Self::List(items.iter().map(Self::from_number).collect()),
            Value::Number(number) => Self::from_number(number),
        }
    }
}

// =============================================================================
// SCRIPT STEPS
// =============================================================================

/// One step of a script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    /// Operation name, with or without the `Data.` prefix.
    pub op: String,
    #[serde(default)]
    pub args: Vec<OperandJson>,
    /// Bind the result under this name for later steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
}

/// The outcome of one executed step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub step: usize,
    pub op: String,
    pub value: ValueJson,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
}
