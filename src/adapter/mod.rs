mod coerce;
mod error;
mod extract;
mod fill;
mod json;
mod schema;
mod tag;
#[cfg(test)]
mod test_support;
mod value;

/// Coercion matrix between tagged and native values.
pub use coerce::{Mismatch, Narrowing, element_type, from_native, to_native};
/// Error, diagnostics, and result aliases.
pub use error::{AdapterError, Diagnostic, Diagnostics, Result};
/// Struct-to-attributes extraction entry points and options.
pub use extract::{ExtractOptions, NilMessagePolicy, extract, extract_ptr};
/// Attributes-to-struct fill entry point and options.
pub use fill::{FillOptions, fill};
/// JSON bridge for attribute documents.
pub use json::{JsonError, attributes_from_json, attributes_to_json};
/// Schema registration types and introspection helpers.
pub use schema::{
	BoxedSlot, EnumSlot, Enumeration, FieldDescriptor, FieldKind, FieldMut, FieldRef, Message, NativeValue, RepeatedSlot, Scalar, ScalarKind, ScalarSlot,
	Slot, SlotMut, WrapperSlot, describe, find_collisions,
};
/// Tag metadata resolution.
pub use tag::{NAME_KEY, lookup as lookup_tag, wire_name};
/// Tagged value model.
pub use value::{AttributeMap, ListValue, Number, TaggedValue, ValueType};
