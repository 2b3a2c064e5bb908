use std::collections::BTreeMap;
use std::fmt;

/// Arbitrary-precision decimal carried by [`TaggedValue::Number`].
pub use serde_json::Number;

/// Flat attribute map keyed by wire name.
pub type AttributeMap = BTreeMap<String, TaggedValue>;

/// Declared type of a tagged value, kept even when the payload is null or unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueType {
	/// Boolean.
	Bool,
	/// 64-bit signed integer.
	Int64,
	/// 64-bit float.
	Float64,
	/// Arbitrary-precision decimal.
	Number,
	/// UTF-8 string.
	String,
	/// Homogeneous list; the element type may be unknown for a null list.
	List(Option<Box<ValueType>>),
	/// Type not declared by the producer, e.g. a bare JSON `null`.
	Dynamic,
}

impl ValueType {
	/// List type with a known element type.
	pub fn list_of(element: ValueType) -> Self {
		Self::List(Some(Box::new(element)))
	}
}

impl fmt::Display for ValueType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Bool => f.write_str("bool"),
			Self::Int64 => f.write_str("int64"),
			Self::Float64 => f.write_str("float64"),
			Self::Number => f.write_str("number"),
			Self::String => f.write_str("string"),
			Self::List(Some(element)) => write!(f, "list({element})"),
			Self::List(None) => f.write_str("list"),
			Self::Dynamic => f.write_str("dynamic"),
		}
	}
}

/// Dynamic attribute value as produced by the configuration layer.
#[derive(Debug, Clone, PartialEq)]
pub enum TaggedValue {
	/// Known-absent value of the given type.
	Null(ValueType),
	/// Value not yet known (computed later by the engine).
	Unknown(ValueType),
	/// Boolean payload.
	Bool(bool),
	/// 64-bit integer payload.
	Int64(i64),
	/// 64-bit float payload.
	Float64(f64),
	/// Decimal payload.
	Number(Number),
	/// String payload.
	String(String),
	/// Non-null list payload.
	List(ListValue),
}

/// Non-null list with its element type descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct ListValue {
	/// Declared element type.
	pub element: ValueType,
	/// Items in order.
	pub items: Vec<TaggedValue>,
}

impl TaggedValue {
	/// Shorthand for a decimal built from an integer.
	pub fn number(value: i64) -> Self {
		Self::Number(Number::from(value))
	}

	/// Shorthand for a string payload.
	pub fn string(value: impl Into<String>) -> Self {
		Self::String(value.into())
	}

	/// Shorthand for a non-null list.
	pub fn list(element: ValueType, items: Vec<TaggedValue>) -> Self {
		Self::List(ListValue { element, items })
	}

	/// Whether the payload is null or unknown.
	pub fn is_null_or_unknown(&self) -> bool {
		matches!(self, Self::Null(_) | Self::Unknown(_))
	}

	/// Declared type of this value.
	pub fn value_type(&self) -> ValueType {
		match self {
			Self::Null(ty) | Self::Unknown(ty) => ty.clone(),
			Self::Bool(_) => ValueType::Bool,
			Self::Int64(_) => ValueType::Int64,
			Self::Float64(_) => ValueType::Float64,
			Self::Number(_) => ValueType::Number,
			Self::String(_) => ValueType::String,
			Self::List(list) => ValueType::list_of(list.element.clone()),
		}
	}

	/// Short variant label used in diagnostics.
	pub fn kind_label(&self) -> &'static str {
		match self {
			Self::Null(_) => "null",
			Self::Unknown(_) => "unknown",
			Self::Bool(_) => "bool",
			Self::Int64(_) => "int64",
			Self::Float64(_) => "float64",
			Self::Number(_) => "number",
			Self::String(_) => "string",
			Self::List(_) => "list",
		}
	}
}
