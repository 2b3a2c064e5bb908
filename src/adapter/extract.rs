use crate::adapter::coerce::{Mismatch, element_type, from_native};
use crate::adapter::schema::{Message, NativeValue, Slot};
use crate::adapter::value::{AttributeMap, TaggedValue, ValueType};
use crate::adapter::{AdapterError, Result};

/// Treatment of nil pointer-owned child messages during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NilMessagePolicy {
	/// Leave the child's keys out of the result.
	#[default]
	Omit,
	/// Write every tagged leaf of the child type as a typed null.
	NullFill,
}

/// Runtime behavior switches for extracting attribute maps.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
	/// Nil child message handling.
	pub nil_messages: NilMessagePolicy,
}

impl ExtractOptions {
	/// Preset that null-fills nil child messages instead of dropping them.
	pub fn null_filled() -> Self {
		Self {
			nil_messages: NilMessagePolicy::NullFill,
		}
	}
}

/// Build a flat attribute map from every tagged field of `source`.
pub fn extract<M: Message + ?Sized>(source: &M, opt: &ExtractOptions) -> Result<AttributeMap> {
	tracing::debug!(schema = source.type_name(), "extract");

	let mut out = AttributeMap::new();
	extract_into(source, &mut out, opt)?;

	tracing::debug!(schema = source.type_name(), attributes = out.len(), "extracted");
	Ok(out)
}

/// Like [`extract`], but a nil source yields an empty map.
pub fn extract_ptr<M: Message + ?Sized>(source: Option<&M>, opt: &ExtractOptions) -> Result<AttributeMap> {
	match source {
		Some(source) => extract(source, opt),
		None => Ok(AttributeMap::new()),
	}
}

fn extract_into<M: Message + ?Sized>(source: &M, out: &mut AttributeMap, opt: &ExtractOptions) -> std::result::Result<(), AdapterError> {
	for field in source.fields() {
		let wire_name = field.wire_name();
		let type_name = field.type_name;

		match field.slot {
			Slot::Message(child) | Slot::Boxed(Some(child), _) => extract_into(child, out, opt)?,
			Slot::Boxed(None, template) => {
				if opt.nil_messages == NilMessagePolicy::NullFill {
					null_fill(template().as_ref(), out)?;
				}
			}
			leaf => {
				let Some(wire_name) = wire_name else {
					continue;
				};
				let value = extract_leaf(leaf, wire_name, type_name)?;
				insert(out, wire_name, value);
			}
		}
	}

	Ok(())
}

fn extract_leaf(slot: Slot<'_>, field: &str, type_name: &'static str) -> std::result::Result<TaggedValue, AdapterError> {
	let value = match slot {
		Slot::Scalar(kind, value) => from_native(kind, Some(&value)),
		Slot::Wrapper(kind, value) => from_native(kind, value.as_ref()),
		Slot::Enumeration(kind, ordinal) => from_native(kind, Some(&NativeValue::Int64(ordinal))),
		Slot::Repeated(_, None) => Ok(TaggedValue::Null(ValueType::List(None))),
		Slot::Repeated(kind, Some(items)) => items
			.iter()
			.map(|item| from_native(kind, Some(item)))
			.collect::<std::result::Result<Vec<_>, Mismatch>>()
			.map(|items| TaggedValue::list(element_type(kind), items)),
		Slot::Message(_) | Slot::Boxed(..) | Slot::Unsupported => {
			return Err(AdapterError::UnsupportedType {
				field: field.to_owned(),
				type_name,
			});
		}
	};

	value.map_err(|mismatch| AdapterError::Coercion {
		field: field.to_owned(),
		type_name,
		expected: mismatch.expected,
	})
}

fn null_fill(message: &dyn Message, out: &mut AttributeMap) -> std::result::Result<(), AdapterError> {
	for field in message.fields() {
		let wire_name = field.wire_name();

		let null = match field.slot {
			Slot::Message(child) | Slot::Boxed(Some(child), _) => {
				null_fill(child, out)?;
				continue;
			}
			Slot::Boxed(None, template) => {
				null_fill(template().as_ref(), out)?;
				continue;
			}
			Slot::Scalar(kind, _) | Slot::Wrapper(kind, _) | Slot::Enumeration(kind, _) => element_type(kind),
			Slot::Repeated(kind, _) => ValueType::list_of(element_type(kind)),
			Slot::Unsupported => {
				let Some(wire_name) = wire_name else {
					continue;
				};
				return Err(AdapterError::UnsupportedType {
					field: wire_name.to_owned(),
					type_name: field.type_name,
				});
			}
		};

		if let Some(wire_name) = wire_name {
			insert(out, wire_name, TaggedValue::Null(null));
		}
	}

	Ok(())
}

fn insert(out: &mut AttributeMap, wire_name: &str, value: TaggedValue) {
	if out.insert(wire_name.to_owned(), value).is_some() {
		tracing::debug!(field = wire_name, "sibling messages share a wire name; keeping the last value");
	}
}

#[cfg(test)]
mod tests;
