use std::fmt;

use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, Diagnostics>;

/// Errors produced while filling or extracting schema structs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
	/// Attribute value kind is incompatible with the native field kind.
	#[error("cannot coerce {field} into {type_name}: value {expected}")]
	Coercion {
		/// Wire name of the offending field.
		field: String,
		/// Native Rust type of the field.
		type_name: &'static str,
		/// Expectation that was violated, e.g. `must be integer`.
		expected: &'static str,
	},
	/// Attribute key left over after a complete fill traversal.
	#[error("attribute {key} does not map to any schema field")]
	UnmappedAttribute {
		/// Unconsumed attribute key.
		key: String,
	},
	/// Field native kind has no entry in the coercion matrix.
	#[error("field {field} has unsupported type {type_name}")]
	UnsupportedType {
		/// Wire name of the offending field.
		field: String,
		/// Native Rust type of the field.
		type_name: &'static str,
	},
}

impl AdapterError {
	/// Short summary, independent of the field involved.
	pub fn summary(&self) -> &'static str {
		match self {
			Self::Coercion { .. } => "coercion failed",
			Self::UnmappedAttribute { .. } => "unmapped attribute",
			Self::UnsupportedType { .. } => "unsupported type",
		}
	}

	/// Wire name or attribute key the error refers to.
	pub fn context(&self) -> &str {
		match self {
			Self::Coercion { field, .. } | Self::UnsupportedType { field, .. } => field,
			Self::UnmappedAttribute { key } => key,
		}
	}
}

/// Borrowed `{message, context}` view of one diagnostic record.
#[derive(Debug, Clone, Copy)]
pub struct Diagnostic<'a> {
	/// Short summary.
	pub summary: &'static str,
	/// Wire name or attribute key.
	pub context: &'a str,
	/// Underlying error with the full message.
	pub error: &'a AdapterError,
}

/// Accumulator of adapter errors for one or more calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
	errors: Vec<AdapterError>,
}

impl Diagnostics {
	/// Empty accumulator.
	pub fn new() -> Self {
		Self::default()
	}

	/// Record one error.
	pub fn push(&mut self, error: AdapterError) {
		self.errors.push(error);
	}

	/// Whether any error was recorded.
	pub fn has_errors(&self) -> bool {
		!self.errors.is_empty()
	}

	/// Number of recorded errors.
	pub fn len(&self) -> usize {
		self.errors.len()
	}

	/// Whether the accumulator is empty.
	pub fn is_empty(&self) -> bool {
		self.errors.is_empty()
	}

	/// Recorded errors in report order.
	pub fn errors(&self) -> &[AdapterError] {
		&self.errors
	}

	/// Iterate `{message, context}` records.
	pub fn iter(&self) -> impl Iterator<Item = Diagnostic<'_>> {
		self.errors.iter().map(|error| Diagnostic {
			summary: error.summary(),
			context: error.context(),
			error,
		})
	}

	/// Merge the errors of another call into this accumulator.
	pub fn extend(&mut self, other: Diagnostics) {
		self.errors.extend(other.errors);
	}

	/// `Ok(value)` when empty, otherwise `Err(self)`.
	pub fn into_result<T>(self, value: T) -> Result<T> {
		if self.has_errors() { Err(self) } else { Ok(value) }
	}
}

impl From<AdapterError> for Diagnostics {
	fn from(error: AdapterError) -> Self {
		Self { errors: vec![error] }
	}
}

impl FromIterator<AdapterError> for Diagnostics {
	fn from_iter<I: IntoIterator<Item = AdapterError>>(iter: I) -> Self {
		Self {
			errors: iter.into_iter().collect(),
		}
	}
}

impl IntoIterator for Diagnostics {
	type Item = AdapterError;
	type IntoIter = std::vec::IntoIter<AdapterError>;

	fn into_iter(self) -> Self::IntoIter {
		self.errors.into_iter()
	}
}

impl fmt::Display for Diagnostics {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.errors.as_slice() {
			[] => f.write_str("no errors"),
			[only] => write!(f, "{only}"),
			many => {
				write!(f, "{} errors:", many.len())?;
				for error in many {
					write!(f, "\n  {error}")?;
				}
				Ok(())
			}
		}
	}
}

impl std::error::Error for Diagnostics {}
