//! Fill statically shaped schema structs from tagged attribute maps, and
//! extract attribute maps back out of them.

/// Tagged values, schema registration, coercion, fill, and extract.
pub mod adapter;
