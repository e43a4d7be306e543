//! # Facade
//!
//! Named-operation dispatch for hosts that hold typed operands.
//!
//! A host hands over an [`Operation`] and its operands. The facade checks the
//! operands against the operation's [`Signature`], runs the codec or
//! accessor, and hands back a replacement [`Value`]. Failures name the
//! offending operand.
//!
//! ## Operand layout
//!
//! | Operation            | Required                        | Optional              |
//! |----------------------|---------------------------------|-----------------------|
//! | `CreateByteBuffer`   | number                          |                       |
//! | `*ToBytes` (text)    | string                          |                       |
//! | `BytesTo*` (text)    | buffer                          |                       |
//! | `ArrayToBytes`       | list                            | sign                  |
//! | `BytesToArray`       | buffer                          | sign                  |
//! | `GetInteger{8..64}`  | buffer, position                | sign, endianness      |
//! | `GetFloat{32,64}`    | buffer, position                | endianness            |
//! | `SetInteger{8..64}`  | buffer, position, value         | sign, endianness      |
//! | `SetFloat{32,64}`    | buffer, position, value         | endianness            |

use crate::accessor::{self, Slot};
use crate::codec::{self, base64, hex};
use crate::numeric::Numeric;
use crate::primitives::{MAX_BUFFER_SIZE, OPERATION_NAMESPACE};
use crate::{ByteBuffer, Endianness, Number, OctetError, OperandKind, Sign};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// OPERANDS AND VALUES
// =============================================================================

/// A typed operand supplied by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Buffer(ByteBuffer),
    Text(String),
    List(Vec<Operand>),
    Number(Number),
    Sign(Sign),
    Endianness(Endianness),
    /// Any other symbolic tag. In an option slot it is parsed as a tag name.
    Symbol(String),
}

impl Operand {
    #[must_use]
    pub fn kind(&self) -> OperandKind {
        match self {
            Self::Buffer(_) => OperandKind::Buffer,
            Self::Text(_) => OperandKind::Text,
            Self::List(_) => OperandKind::List,
            Self::Number(_) => OperandKind::Number,
            Self::Sign(_) => OperandKind::Sign,
            Self::Endianness(_) => OperandKind::Endianness,
            Self::Symbol(_) => OperandKind::Symbol,
        }
    }
}

impl From<ByteBuffer> for Operand {
    fn from(buffer: ByteBuffer) -> Self {
        Self::Buffer(buffer)
    }
}

impl From<&str> for Operand {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Number> for Operand {
    fn from(number: Number) -> Self {
        Self::Number(number)
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<Sign> for Operand {
    fn from(sign: Sign) -> Self {
        Self::Sign(sign)
    }
}

impl From<Endianness> for Operand {
    fn from(endianness: Endianness) -> Self {
        Self::Endianness(endianness)
    }
}

/// The replacement value produced by a successful operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Buffer(ByteBuffer),
    Text(String),
    List(Vec<Number>),
    Number(Number),
}

impl Value {
    /// Feed a result back in as an operand of a later call.
    #[must_use]
    pub fn into_operand(self) -> Operand {
        match self {
            Self::Buffer(b) => Operand::Buffer(b),
            Self::Text(t) => Operand::Text(t),
            Self::List(items) => Operand::List(items.into_iter().map(Operand::Number).collect()),
            Self::Number(n) => Operand::Number(n),
        }
    }

    #[must_use]
    pub fn as_buffer(&self) -> Option<&ByteBuffer> {
        match self {
            Self::Buffer(b) => Some(b),
            _ => None,
        }
    }
}

// =============================================================================
// OPERATION TABLE
// =============================================================================

/// Kind of a trailing optional operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionSlot {
    Sign,
    Endianness,
}

impl OptionSlot {
    const fn expected(self) -> &'static str {
        match self {
            Self::Sign => "a sign specification",
            Self::Endianness => "an endianness specification",
        }
    }
}

/// Expected operand kinds of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub required: &'static [OperandKind],
    pub optional: &'static [OptionSlot],
}

impl Signature {
    #[must_use]
    pub const fn min(&self) -> usize {
        self.required.len()
    }

    #[must_use]
    pub const fn max(&self) -> usize {
        self.required.len() + self.optional.len()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let required = self
            .required
            .iter()
            .map(|k| k.describe())
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&required)?;
        for slot in self.optional {
            write!(f, " [, {}]", slot.expected())?;
        }
        Ok(())
    }
}

const TEXT: Signature = Signature {
    required: &[OperandKind::Text],
    optional: &[],
};
const BUFFER: Signature = Signature {
    required: &[OperandKind::Buffer],
    optional: &[],
};

/// Every operation the facade understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateByteBuffer,
    StringToBytes,
    BytesToString,
    Base64ToBytes,
    BytesToBase64,
    HexToBytes,
    BytesToHex,
    ArrayToBytes,
    BytesToArray,
    Get(Slot),
    Set(Slot),
}

impl Operation {
    pub const ALL: [Self; 21] = [
        Self::CreateByteBuffer,
        Self::StringToBytes,
        Self::BytesToString,
        Self::Base64ToBytes,
        Self::BytesToBase64,
        Self::HexToBytes,
        Self::BytesToHex,
        Self::ArrayToBytes,
        Self::BytesToArray,
        Self::Get(Slot::Int8),
        Self::Get(Slot::Int16),
        Self::Get(Slot::Int32),
        Self::Get(Slot::Int64),
        Self::Get(Slot::Float32),
        Self::Get(Slot::Float64),
        Self::Set(Slot::Int8),
        Self::Set(Slot::Int16),
        Self::Set(Slot::Int32),
        Self::Set(Slot::Int64),
        Self::Set(Slot::Float32),
        Self::Set(Slot::Float64),
    ];

    /// Canonical name, e.g. `Data.GetInteger32`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CreateByteBuffer => "Data.CreateByteBuffer",
            Self::StringToBytes => "Data.StringToBytes",
            Self::BytesToString => "Data.BytesToString",
            Self::Base64ToBytes => "Data.Base64ToBytes",
            Self::BytesToBase64 => "Data.BytesToBase64",
            Self::HexToBytes => "Data.HexToBytes",
            Self::BytesToHex => "Data.BytesToHex",
            Self::ArrayToBytes => "Data.ArrayToBytes",
            Self::BytesToArray => "Data.BytesToArray",
            Self::Get(Slot::Int8) => "Data.GetInteger8",
            Self::Get(Slot::Int16) => "Data.GetInteger16",
            Self::Get(Slot::Int32) => "Data.GetInteger32",
            Self::Get(Slot::Int64) => "Data.GetInteger64",
            Self::Get(Slot::Float32) => "Data.GetFloat32",
            Self::Get(Slot::Float64) => "Data.GetFloat64",
            Self::Set(Slot::Int8) => "Data.SetInteger8",
            Self::Set(Slot::Int16) => "Data.SetInteger16",
            Self::Set(Slot::Int32) => "Data.SetInteger32",
            Self::Set(Slot::Int64) => "Data.SetInteger64",
            Self::Set(Slot::Float32) => "Data.SetFloat32",
            Self::Set(Slot::Float64) => "Data.SetFloat64",
        }
    }

    #[must_use]
    pub const fn signature(self) -> Signature {
        use crate::numeric::NumberKind;
        use OperandKind::{Buffer, List, Number};

        match self {
            Self::CreateByteBuffer => Signature {
                required: &[Number],
                optional: &[],
            },
            Self::StringToBytes | Self::Base64ToBytes | Self::HexToBytes => TEXT,
            Self::BytesToString | Self::BytesToBase64 | Self::BytesToHex => BUFFER,
            Self::ArrayToBytes => Signature {
                required: &[List],
                optional: &[OptionSlot::Sign],
            },
            Self::BytesToArray => Signature {
                required: &[Buffer],
                optional: &[OptionSlot::Sign],
            },
            Self::Get(slot) => match slot.kind() {
                NumberKind::Integer => Signature {
                    required: &[Buffer, Number],
                    optional: &[OptionSlot::Sign, OptionSlot::Endianness],
                },
                NumberKind::Decimal => Signature {
                    required: &[Buffer, Number],
                    optional: &[OptionSlot::Endianness],
                },
            },
            Self::Set(slot) => match slot.kind() {
                NumberKind::Integer => Signature {
                    required: &[Buffer, Number, Number],
                    optional: &[OptionSlot::Sign, OptionSlot::Endianness],
                },
                NumberKind::Decimal => Signature {
                    required: &[Buffer, Number, Number],
                    optional: &[OptionSlot::Endianness],
                },
            },
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = OctetError;

    /// Accepts `Data.GetInteger32` or the bare `GetInteger32`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bare = s.strip_prefix(OPERATION_NAMESPACE).unwrap_or(s);
        Self::ALL
            .into_iter()
            .find(|op| op.name().strip_prefix(OPERATION_NAMESPACE) == Some(bare))
            .ok_or_else(|| OctetError::UnknownOperation(s.to_string()))
    }
}

// =============================================================================
// FACADE
// =============================================================================

/// Resource limits applied by the facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Largest buffer any operation may produce.
    pub max_buffer_size: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_buffer_size: MAX_BUFFER_SIZE,
        }
    }
}

/// Trailing options after defaults are applied.
#[derive(Debug, Clone, Copy, Default)]
struct Options {
    sign: Sign,
    endianness: Endianness,
}

/// Dispatches named operations to the codecs and the positional accessor.
#[derive(Debug, Clone, Default)]
pub struct Facade {
    limits: Limits,
}

impl Facade {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_limits(limits: Limits) -> Self {
        Self { limits }
    }

    #[must_use]
    pub const fn limits(&self) -> Limits {
        self.limits
    }

    /// Parse `name` and run the operation.
    pub fn call_named(&self, name: &str, operands: Vec<Operand>) -> Result<Value, OctetError> {
        self.call(name.parse()?, operands)
    }

    /// Run `operation` on `operands`.
    ///
    /// Operands are consumed. For `Set*` the returned value is the very
    /// buffer passed as operand 0, updated in place.
    pub fn call(&self, operation: Operation, operands: Vec<Operand>) -> Result<Value, OctetError> {
        tracing::debug!(
            operation = operation.name(),
            operands = operands.len(),
            "dispatching"
        );

        let result = self.dispatch(operation, operands);
        if let Err(e) = &result {
            tracing::debug!(operation = operation.name(), error = %e, "operation failed");
        }
        result
    }

    fn dispatch(&self, operation: Operation, operands: Vec<Operand>) -> Result<Value, OctetError> {
        let signature = operation.signature();
        let options = check_signature(operation, &signature, &operands)?;
        let max_len = self.limits.max_buffer_size;
        let mut args = operands.into_iter();

        match operation {
            Operation::CreateByteBuffer => {
                let n = take_number(&mut args, 0)?;
                ByteBuffer::create(&n, max_len)
                    .map(Value::Buffer)
                    .map_err(|e| e.at_operand(0))
            }
            Operation::StringToBytes => {
                let text = take_text(&mut args, 0)?;
                let buffer = codec::string_to_bytes(&text);
                crate::buffer::check_len(buffer.len(), max_len).map_err(|e| e.at_operand(0))?;
                Ok(Value::Buffer(buffer))
            }
            Operation::BytesToString => {
                let buffer = take_buffer(&mut args, 0)?;
                Ok(Value::Text(codec::bytes_to_string(&buffer)))
            }
            Operation::Base64ToBytes => {
                let text = take_text(&mut args, 0)?;
                base64::decode(&text, max_len)
                    .map(Value::Buffer)
                    .map_err(|e| e.at_operand(0))
            }
            Operation::BytesToBase64 => {
                let buffer = take_buffer(&mut args, 0)?;
                Ok(Value::Text(base64::encode(&buffer)))
            }
            Operation::HexToBytes => {
                let text = take_text(&mut args, 0)?;
                hex::decode(&text, max_len)
                    .map(Value::Buffer)
                    .map_err(|e| e.at_operand(0))
            }
            Operation::BytesToHex => {
                let buffer = take_buffer(&mut args, 0)?;
                Ok(Value::Text(hex::encode(&buffer)))
            }
            Operation::ArrayToBytes => {
                let list = take_list(&mut args, 0)?;
                let numbers = list_numbers(list).map_err(|e| e.at_operand(0))?;
                codec::array_to_bytes(&numbers, options.sign, max_len)
                    .map(Value::Buffer)
                    .map_err(|e| e.at_operand(0))
            }
            Operation::BytesToArray => {
                let buffer = take_buffer(&mut args, 0)?;
                Ok(Value::List(codec::bytes_to_array(&buffer, options.sign)))
            }
            Operation::Get(slot) => {
                let buffer = take_buffer(&mut args, 0)?;
                let position = position(&take_number(&mut args, 1)?, slot, buffer.len())?;
                accessor::get::<Number>(&buffer, position, slot, options.sign, options.endianness)
                    .map(Value::Number)
                    .map_err(|e| e.at_operand(1))
            }
            Operation::Set(slot) => {
                let mut buffer = take_buffer(&mut args, 0)?;
                let position = position(&take_number(&mut args, 1)?, slot, buffer.len())?;
                let value = take_number(&mut args, 2)?;
                accessor::set(
                    &mut buffer,
                    position,
                    &value,
                    slot,
                    options.sign,
                    options.endianness,
                )
                .map_err(|e| match e {
                    OctetError::IndexOutOfRange { .. } => e.at_operand(1),
                    other => other.at_operand(2),
                })?;
                Ok(Value::Buffer(buffer))
            }
        }
    }
}

/// Validate arity, required kinds and option tags. Nothing is consumed.
fn check_signature(
    operation: Operation,
    signature: &Signature,
    operands: &[Operand],
) -> Result<Options, OctetError> {
    if operands.len() < signature.min() || operands.len() > signature.max() {
        return Err(OctetError::ArityMismatch {
            operation: operation.name(),
            min: signature.min(),
            max: signature.max(),
            found: operands.len(),
        });
    }

    for (index, (operand, &expected)) in operands.iter().zip(signature.required).enumerate() {
        if operand.kind() != expected {
            return Err(OctetError::TypeMismatch {
                operand: Some(index),
                expected,
                found: operand.kind(),
            });
        }
    }

    let mut options = Options::default();
    let trailing = operands.iter().enumerate().skip(signature.min());
    for ((index, operand), &slot) in trailing.zip(signature.optional) {
        match (slot, operand) {
            (OptionSlot::Sign, Operand::Sign(sign)) => options.sign = *sign,
            (OptionSlot::Endianness, Operand::Endianness(e)) => options.endianness = *e,
            (OptionSlot::Sign, Operand::Symbol(name)) => {
                options.sign = name.parse().map_err(|e: OctetError| e.at_operand(index))?;
            }
            (OptionSlot::Endianness, Operand::Symbol(name)) => {
                options.endianness = name.parse().map_err(|e: OctetError| e.at_operand(index))?;
            }
            _ => {
                return Err(OctetError::InvalidOption {
                    operand: Some(index),
                    expected: slot.expected(),
                });
            }
        }
    }

    Ok(options)
}

fn mismatch(index: usize, expected: OperandKind, found: Option<&Operand>) -> OctetError {
    OctetError::TypeMismatch {
        operand: Some(index),
        expected,
        found: found.map_or(OperandKind::Nothing, Operand::kind),
    }
}

fn take_buffer(
    args: &mut impl Iterator<Item = Operand>,
    index: usize,
) -> Result<ByteBuffer, OctetError> {
    match args.next() {
        Some(Operand::Buffer(b)) => Ok(b),
        other => Err(mismatch(index, OperandKind::Buffer, other.as_ref())),
    }
}

fn take_text(args: &mut impl Iterator<Item = Operand>, index: usize) -> Result<String, OctetError> {
    match args.next() {
        Some(Operand::Text(t)) => Ok(t),
        other => Err(mismatch(index, OperandKind::Text, other.as_ref())),
    }
}

fn take_list(
    args: &mut impl Iterator<Item = Operand>,
    index: usize,
) -> Result<Vec<Operand>, OctetError> {
    match args.next() {
        Some(Operand::List(items)) => Ok(items),
        other => Err(mismatch(index, OperandKind::List, other.as_ref())),
    }
}

fn take_number(
    args: &mut impl Iterator<Item = Operand>,
    index: usize,
) -> Result<Number, OctetError> {
    match args.next() {
        Some(Operand::Number(n)) => Ok(n),
        other => Err(mismatch(index, OperandKind::Number, other.as_ref())),
    }
}

/// Unwrap list elements into numbers, rejecting anything else.
fn list_numbers(items: Vec<Operand>) -> Result<Vec<Number>, OctetError> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Operand::Number(n) => Ok(n),
            other => Err(OctetError::InvalidElement {
                index,
                reason: format!("expression is {}, not an integer number", other.kind()),
            }),
        })
        .collect()
}

/// Convert a position operand to a 1-based index.
///
/// Decimals are a kind mismatch; integers that cannot index memory are
/// out of range.
fn position(number: &Number, slot: Slot, len: usize) -> Result<usize, OctetError> {
    let Some(integer) = number.as_integer() else {
        return Err(OctetError::TypeMismatch {
            operand: Some(1),
            expected: OperandKind::Integer,
            found: OperandKind::Decimal,
        });
    };
    number
        .to_i64()
        .and_then(|p| usize::try_from(p).ok())
        .ok_or_else(|| {
            OctetError::IndexOutOfRange {
                position: integer.to_string(),
                width: slot.size(),
                length: len,
            }
            .at_operand(1)
        })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn facade() -> Facade {
        Facade::new()
    }

    fn buffer(bytes: &[u8]) -> Operand {
        Operand::Buffer(ByteBuffer::from_raw_bytes(bytes))
    }

    #[test]
    fn operation_names_roundtrip() {
        for op in Operation::ALL {
            assert_eq!(op.name().parse::<Operation>().expect("parse"), op);
        }
        assert_eq!(
            "GetFloat64".parse::<Operation>().expect("parse"),
            Operation::Get(Slot::Float64)
        );
        assert!(matches!(
            "Data.Frobnicate".parse::<Operation>(),
            Err(OctetError::UnknownOperation(_))
        ));
    }

    #[test]
    fn every_slot_has_get_and_set() {
        for slot in Slot::ALL {
            assert!(Operation::ALL.contains(&Operation::Get(slot)));
            assert!(Operation::ALL.contains(&Operation::Set(slot)));
        }
    }

    #[test]
    fn signature_display() {
        assert_eq!(
            Operation::Set(Slot::Int16).signature().to_string(),
            "a byte buffer, a number, a number [, a sign specification] [, an endianness specification]"
        );
    }

    #[test]
    fn create_byte_buffer() {
        let value = facade()
            .call(Operation::CreateByteBuffer, vec![Operand::from(4)])
            .expect("create");
        assert_eq!(value, Value::Buffer(ByteBuffer::zeroed(4)));
    }

    #[test]
    fn create_byte_buffer_invalid_size() {
        let err = facade()
            .call(Operation::CreateByteBuffer, vec![Operand::from(-3)])
            .expect_err("negative");
        assert!(matches!(err.root(), OctetError::InvalidSize(_)));
        assert_eq!(err.operand(), Some(0));
    }

    #[test]
    fn wrong_first_operand_is_type_mismatch() {
        let err = facade()
            .call(Operation::BytesToHex, vec![Operand::from("ff")])
            .expect_err("text is not a buffer");
        assert!(matches!(
            err,
            OctetError::TypeMismatch {
                operand: Some(0),
                expected: OperandKind::Buffer,
                found: OperandKind::Text,
            }
        ));
    }

    #[test]
    fn arity_is_checked() {
        let err = facade()
            .call(Operation::BytesToHex, vec![])
            .expect_err("missing operand");
        assert!(matches!(err, OctetError::ArityMismatch { found: 0, .. }));

        let err = facade()
            .call(
                Operation::Get(Slot::Float32),
                vec![
                    buffer(&[0; 4]),
                    Operand::from(1),
                    Operand::Sign(Sign::Signed),
                    Operand::Endianness(Endianness::BigEndian),
                ],
            )
            .expect_err("floats take no sign");
        assert!(matches!(err, OctetError::ArityMismatch { max: 3, .. }));
    }

    #[test]
    fn options_are_validated() {
        let err = facade()
            .call(
                Operation::BytesToArray,
                vec![buffer(&[1]), Operand::Endianness(Endianness::BigEndian)],
            )
            .expect_err("endianness in sign slot");
        assert!(matches!(
            err,
            OctetError::InvalidOption {
                operand: Some(1),
                ..
            }
        ));

        let err = facade()
            .call(
                Operation::BytesToArray,
                vec![buffer(&[1]), Operand::Symbol("Data.Sign.Maybe".into())],
            )
            .expect_err("unknown tag");
        assert!(matches!(
            err,
            OctetError::InvalidOption {
                operand: Some(1),
                ..
            }
        ));
    }

    #[test]
    fn integer_set_options_are_positional() {
        let err = facade()
            .call(
                Operation::Set(Slot::Int16),
                vec![
                    buffer(&[0, 0]),
                    Operand::from(1),
                    Operand::from(7),
                    Operand::Endianness(Endianness::BigEndian),
                ],
            )
            .expect_err("endianness in sign slot");
        assert!(matches!(
            err,
            OctetError::InvalidOption {
                operand: Some(3),
                expected: "a sign specification",
            }
        ));
    }

    #[test]
    fn symbol_tags_are_parsed_in_option_slots() {
        let value = facade()
            .call(
                Operation::BytesToArray,
                vec![buffer(&[0xFF]), Operand::Symbol("Data.Sign.Signed".into())],
            )
            .expect("signed");
        assert_eq!(value, Value::List(vec![Number::from(-1i64)]));
    }

    #[test]
    fn get_integer_with_options() {
        let value = facade()
            .call(
                Operation::Get(Slot::Int32),
                vec![
                    buffer(&[1, 2, 3, 4]),
                    Operand::from(1),
                    Operand::Sign(Sign::Unsigned),
                    Operand::Endianness(Endianness::BigEndian),
                ],
            )
            .expect("get");
        assert_eq!(value, Value::Number(Number::from(0x0102_0304i64)));
    }

    #[test]
    fn get_float_endianness_is_second_option() {
        let value = facade()
            .call(
                Operation::Get(Slot::Float32),
                vec![
                    buffer(&[0x3F, 0xC0, 0, 0]),
                    Operand::from(1),
                    Operand::Endianness(Endianness::BigEndian),
                ],
            )
            .expect("get");
        assert_eq!(value, Value::Number(Number::from(1.5)));
    }

    #[test]
    fn position_errors_point_at_operand_one() {
        for pos in [0i64, -1, 5] {
            let err = facade()
                .call(
                    Operation::Get(Slot::Int8),
                    vec![buffer(&[1, 2, 3, 4]), Operand::from(pos)],
                )
                .expect_err("out of range");
            assert!(matches!(err.root(), OctetError::IndexOutOfRange { .. }));
            assert_eq!(err.operand(), Some(1));
        }

        let err = facade()
            .call(
                Operation::Get(Slot::Int8),
                vec![buffer(&[1]), Operand::Number(Number::from(1.0))],
            )
            .expect_err("decimal position");
        assert!(matches!(err, OctetError::TypeMismatch { operand: Some(1), .. }));
    }

    #[test]
    fn set_returns_updated_buffer() {
        let value = facade()
            .call(
                Operation::Set(Slot::Int16),
                vec![
                    buffer(&[0, 0, 0]),
                    Operand::from(2),
                    Operand::from(-2),
                    Operand::Sign(Sign::Signed),
                ],
            )
            .expect("set");
        assert_eq!(value.as_buffer().map(ByteBuffer::raw_bytes), Some(&[0, 0xFE, 0xFF][..]));
    }

    #[test]
    fn set_kind_mismatch_points_at_value() {
        let err = facade()
            .call(
                Operation::Set(Slot::Float64),
                vec![buffer(&[0; 8]), Operand::from(1), Operand::from(1)],
            )
            .expect_err("integer into float slot");
        assert!(matches!(err.root(), OctetError::TypeMismatch { .. }));
        assert_eq!(err.operand(), Some(2));
    }

    #[test]
    fn array_to_bytes_rejects_non_numbers() {
        let err = facade()
            .call(
                Operation::ArrayToBytes,
                vec![Operand::List(vec![Operand::from(1), Operand::from("x")])],
            )
            .expect_err("text element");
        assert!(matches!(
            err.root(),
            OctetError::InvalidElement { index: 1, .. }
        ));
        assert_eq!(err.operand(), Some(0));
    }

    #[test]
    fn limits_cap_decoded_buffers() {
        let small = Facade::with_limits(Limits { max_buffer_size: 2 });
        let err = small
            .call(Operation::HexToBytes, vec![Operand::from("aabbcc")])
            .expect_err("too large");
        assert!(matches!(err.root(), OctetError::InvalidSize(_)));
        assert!(small
            .call(Operation::HexToBytes, vec![Operand::from("aabb")])
            .is_ok());
    }

    #[test]
    fn results_feed_back_as_operands() {
        let f = facade();
        let bytes = f
            .call_named("Data.HexToBytes", vec![Operand::from("48690a")])
            .expect("hex");
        let text = f
            .call_named("Data.BytesToString", vec![bytes.into_operand()])
            .expect("text");
        assert_eq!(text, Value::Text("Hi\n".to_string()));
    }
}
