use crate::adapter::coerce::{Mismatch, Narrowing, to_native};
use crate::adapter::schema::{Message, NativeValue, ScalarKind, SlotMut};
use crate::adapter::value::{AttributeMap, TaggedValue};
use crate::adapter::{AdapterError, Result};

const MUST_BE_LIST: Mismatch = Mismatch { expected: "must be list" };
const NULL_ELEMENT: Mismatch = Mismatch {
	expected: "must not contain null elements",
};

/// Runtime behavior switches for filling schema structs.
#[derive(Debug, Clone, Default)]
pub struct FillOptions {
	/// Overflow policy for integer fields and integer-backed enumerations.
	pub narrowing: Narrowing,
}

impl FillOptions {
	/// Preset rejecting integers that do not fit their native width.
	pub fn strict() -> Self {
		Self {
			narrowing: Narrowing::Checked,
		}
	}
}

/// Populate `target` from `attrs`, consuming every key that maps to a field.
///
/// Coercion failures abort immediately with a single error. Keys left after
/// the whole traversal are reported together, one error per key.
pub fn fill<M: Message + ?Sized>(target: &mut M, mut attrs: AttributeMap, opt: &FillOptions) -> Result<()> {
	tracing::debug!(schema = target.type_name(), attributes = attrs.len(), "fill");

	fill_message(target, &mut attrs, opt)?;

	if attrs.is_empty() {
		return Ok(());
	}

	tracing::debug!(schema = target.type_name(), unmapped = attrs.len(), "fill left unmapped attributes");
	Err(attrs.into_keys().map(|key| AdapterError::UnmappedAttribute { key }).collect())
}

fn fill_message<M: Message + ?Sized>(target: &mut M, attrs: &mut AttributeMap, opt: &FillOptions) -> std::result::Result<(), AdapterError> {
	for field in target.fields_mut() {
		let wire_name = field.wire_name();
		let type_name = field.type_name;

		match field.slot {
			SlotMut::Message(child) => fill_message(child, attrs, opt)?,
			SlotMut::Boxed(child) => fill_message(child.get_or_insert(), attrs, opt)?,
			leaf => {
				let Some(wire_name) = wire_name else {
					continue;
				};
				let Some(value) = attrs.remove(wire_name) else {
					continue;
				};
				if value.is_null_or_unknown() {
					tracing::trace!(field = wire_name, value = value.kind_label(), "leaving field at default");
					continue;
				}

				fill_leaf(leaf, &value, wire_name, type_name, opt)?;
				tracing::trace!(field = wire_name, "filled");
			}
		}
	}

	Ok(())
}

fn fill_leaf(slot: SlotMut<'_>, value: &TaggedValue, field: &str, type_name: &'static str, opt: &FillOptions) -> std::result::Result<(), AdapterError> {
	let coercion = |mismatch: Mismatch| AdapterError::Coercion {
		field: field.to_owned(),
		type_name,
		expected: mismatch.expected,
	};

	let stored = match slot {
		SlotMut::Scalar(slot) => {
			let native = to_native(slot.kind(), value, opt.narrowing).map_err(coercion)?;
			slot.store(native)
		}
		SlotMut::Wrapper(slot) => {
			let native = to_native(slot.kind(), value, opt.narrowing).map_err(coercion)?;
			slot.store(native)
		}
		SlotMut::Enumeration(slot) => match to_native(slot.backing(), value, opt.narrowing).map_err(coercion)? {
			NativeValue::Int32(ordinal) => {
				slot.store_ordinal(i64::from(ordinal));
				true
			}
			NativeValue::Int64(ordinal) => {
				slot.store_ordinal(ordinal);
				true
			}
			_ => false,
		},
		SlotMut::Repeated(slot) => {
			let TaggedValue::List(list) = value else {
				return Err(coercion(MUST_BE_LIST));
			};
			let kind = slot.kind();
			let items = list
				.items
				.iter()
				.map(|item| element(kind, item, opt.narrowing))
				.collect::<std::result::Result<Vec<_>, _>>()
				.map_err(coercion)?;
			slot.store_all(items)
		}
		SlotMut::Message(_) | SlotMut::Boxed(_) | SlotMut::Unsupported => false,
	};

	if stored {
		Ok(())
	} else {
		Err(AdapterError::UnsupportedType {
			field: field.to_owned(),
			type_name,
		})
	}
}

fn element(kind: ScalarKind, item: &TaggedValue, narrowing: Narrowing) -> std::result::Result<NativeValue, Mismatch> {
	if item.is_null_or_unknown() {
		return Err(NULL_ELEMENT);
	}
	to_native(kind, item, narrowing)
}
