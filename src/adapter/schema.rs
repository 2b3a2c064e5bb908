use std::any::type_name;
use std::collections::BTreeMap;
use std::fmt;

use crate::adapter::tag;

/// Native scalar kinds understood by the coercion matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
	/// `bool`.
	Bool,
	/// `i32`.
	Int32,
	/// `i64`.
	Int64,
	/// `f32`.
	Float32,
	/// `f64`.
	Float64,
	/// `String`.
	String,
}

impl fmt::Display for ScalarKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Bool => "bool",
			Self::Int32 => "int32",
			Self::Int64 => "int64",
			Self::Float32 => "float32",
			Self::Float64 => "float64",
			Self::String => "string",
		})
	}
}

/// Native scalar payload moving between the coercion matrix and a field.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeValue {
	/// `bool` payload.
	Bool(bool),
	/// `i32` payload.
	Int32(i32),
	/// `i64` payload.
	Int64(i64),
	/// `f32` payload.
	Float32(f32),
	/// `f64` payload.
	Float64(f64),
	/// `String` payload.
	String(String),
}

/// Rust type usable as a scalar leaf.
pub trait Scalar: Clone + Default + 'static {
	/// Coercion kind for this type.
	const KIND: ScalarKind;

	/// Convert into the native payload.
	fn to_native(&self) -> NativeValue;

	/// Convert from a native payload of [`Self::KIND`]; `None` on a kind mismatch.
	fn from_native(value: NativeValue) -> Option<Self>;
}

macro_rules! impl_scalar {
	($($ty:ty => $kind:ident),* $(,)?) => {
		$(
			impl Scalar for $ty {
				const KIND: ScalarKind = ScalarKind::$kind;

				fn to_native(&self) -> NativeValue {
					NativeValue::$kind(self.clone())
				}

				fn from_native(value: NativeValue) -> Option<Self> {
					match value {
						NativeValue::$kind(inner) => Some(inner),
						_ => None,
					}
				}
			}
		)*
	};
}

impl_scalar! {
	bool => Bool,
	i32 => Int32,
	i64 => Int64,
	f32 => Float32,
	f64 => Float64,
	String => String,
}

/// Integer-backed enumeration, mapped purely by ordinal.
pub trait Enumeration: Copy + Default + 'static {
	/// Backing integer kind, [`ScalarKind::Int32`] or [`ScalarKind::Int64`].
	const BACKING: ScalarKind;

	/// Underlying ordinal.
	fn ordinal(self) -> i64;

	/// Build from an ordinal already narrowed to [`Self::BACKING`].
	fn from_ordinal(ordinal: i64) -> Self;
}

/// Schema struct whose fields the adapter can fill and extract.
///
/// Implementations are normally generated by [`message!`](crate::message).
pub trait Message {
	/// Struct name used in logs.
	fn type_name(&self) -> &'static str;

	/// Read access to every field, in declaration order.
	fn fields(&self) -> Vec<FieldRef<'_>>;

	/// Write access to every field, in declaration order.
	fn fields_mut(&mut self) -> Vec<FieldMut<'_>>;
}

/// Mapping classification of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
	/// Required scalar.
	Scalar(ScalarKind),
	/// Optional scalar wrapper (`Option<S>`).
	Wrapper(ScalarKind),
	/// Integer-backed enumeration.
	Enumeration(ScalarKind),
	/// Homogeneous scalar list (`Option<Vec<S>>`).
	Repeated(ScalarKind),
	/// Embedded child message.
	Message,
	/// Pointer-owned child message (`Option<Box<M>>`).
	Boxed,
	/// Native kind with no coercion rule.
	Unsupported,
}

impl fmt::Display for FieldKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Scalar(kind) => write!(f, "{kind}"),
			Self::Wrapper(kind) => write!(f, "optional {kind}"),
			Self::Enumeration(kind) => write!(f, "enum({kind})"),
			Self::Repeated(kind) => write!(f, "list({kind})"),
			Self::Message => f.write_str("message"),
			Self::Boxed => f.write_str("optional message"),
			Self::Unsupported => f.write_str("unsupported"),
		}
	}
}

/// Read view of one field.
pub struct FieldRef<'a> {
	/// Rust field name.
	pub name: &'static str,
	/// Raw tag metadata, e.g. `name=zone`.
	pub meta: Option<&'static str>,
	/// Native Rust type name.
	pub type_name: &'static str,
	/// Current value.
	pub slot: Slot<'a>,
}

/// Current value of a field, by classification.
pub enum Slot<'a> {
	/// Required scalar value.
	Scalar(ScalarKind, NativeValue),
	/// Optional scalar; `None` when unset.
	Wrapper(ScalarKind, Option<NativeValue>),
	/// Enumeration ordinal with its backing kind.
	Enumeration(ScalarKind, i64),
	/// Scalar list; `None` when nil.
	Repeated(ScalarKind, Option<Vec<NativeValue>>),
	/// Embedded child.
	Message(&'a dyn Message),
	/// Pointer-owned child and a constructor for an empty instance of its type.
	Boxed(Option<&'a dyn Message>, fn() -> Box<dyn Message>),
	/// Unsupported native kind.
	Unsupported,
}

impl Slot<'_> {
	/// Classification of this slot.
	pub fn kind(&self) -> FieldKind {
		match self {
			Self::Scalar(kind, _) => FieldKind::Scalar(*kind),
			Self::Wrapper(kind, _) => FieldKind::Wrapper(*kind),
			Self::Enumeration(kind, _) => FieldKind::Enumeration(*kind),
			Self::Repeated(kind, _) => FieldKind::Repeated(*kind),
			Self::Message(_) => FieldKind::Message,
			Self::Boxed(..) => FieldKind::Boxed,
			Self::Unsupported => FieldKind::Unsupported,
		}
	}
}

fn boxed_template<M: Message + Default + 'static>() -> Box<dyn Message> {
	Box::new(M::default())
}

impl<'a> FieldRef<'a> {
	/// Wire name resolved from [`Self::meta`].
	pub fn wire_name(&self) -> Option<&'static str> {
		tag::wire_name(self.meta)
	}

	/// Required scalar field.
	pub fn scalar<S: Scalar>(name: &'static str, meta: Option<&'static str>, value: &'a S) -> Self {
		Self::new::<S>(name, meta, Slot::Scalar(S::KIND, value.to_native()))
	}

	/// Optional scalar wrapper field.
	pub fn wrapper<S: Scalar>(name: &'static str, meta: Option<&'static str>, value: &'a Option<S>) -> Self {
		Self::new::<Option<S>>(name, meta, Slot::Wrapper(S::KIND, value.as_ref().map(Scalar::to_native)))
	}

	/// Enumeration field.
	pub fn enumeration<E: Enumeration>(name: &'static str, meta: Option<&'static str>, value: &'a E) -> Self {
		Self::new::<E>(name, meta, Slot::Enumeration(E::BACKING, value.ordinal()))
	}

	/// Repeated scalar field.
	pub fn repeated<S: Scalar>(name: &'static str, meta: Option<&'static str>, value: &'a Option<Vec<S>>) -> Self {
		let items = value.as_ref().map(|items| items.iter().map(Scalar::to_native).collect());
		Self::new::<Option<Vec<S>>>(name, meta, Slot::Repeated(S::KIND, items))
	}

	/// Embedded child message.
	pub fn message<M: Message>(name: &'static str, meta: Option<&'static str>, value: &'a M) -> Self {
		Self::new::<M>(name, meta, Slot::Message(value))
	}

	/// Pointer-owned child message.
	pub fn boxed<M: Message + Default + 'static>(name: &'static str, meta: Option<&'static str>, value: &'a Option<Box<M>>) -> Self {
		let child = value.as_deref().map(|item| item as &dyn Message);
		Self::new::<Option<Box<M>>>(name, meta, Slot::Boxed(child, boxed_template::<M>))
	}

	/// Field of a native kind with no coercion rule.
	pub fn unsupported<T>(name: &'static str, meta: Option<&'static str>, _value: &'a T) -> Self {
		Self::new::<T>(name, meta, Slot::Unsupported)
	}

	fn new<T: ?Sized>(name: &'static str, meta: Option<&'static str>, slot: Slot<'a>) -> Self {
		Self {
			name,
			meta,
			type_name: type_name::<T>(),
			slot,
		}
	}
}

/// Write access to a required scalar.
pub trait ScalarSlot {
	/// Coercion kind.
	fn kind(&self) -> ScalarKind;
	/// Store a coerced value; `false` on a kind mismatch.
	fn store(&mut self, value: NativeValue) -> bool;
}

impl<S: Scalar> ScalarSlot for S {
	fn kind(&self) -> ScalarKind {
		S::KIND
	}

	fn store(&mut self, value: NativeValue) -> bool {
		match S::from_native(value) {
			Some(inner) => {
				*self = inner;
				true
			}
			None => false,
		}
	}
}

/// Write access to an optional scalar wrapper.
pub trait WrapperSlot {
	/// Coercion kind of the wrapped scalar.
	fn kind(&self) -> ScalarKind;
	/// Box a coerced value; `false` on a kind mismatch.
	fn store(&mut self, value: NativeValue) -> bool;
}

impl<S: Scalar> WrapperSlot for Option<S> {
	fn kind(&self) -> ScalarKind {
		S::KIND
	}

	fn store(&mut self, value: NativeValue) -> bool {
		match S::from_native(value) {
			Some(inner) => {
				*self = Some(inner);
				true
			}
			None => false,
		}
	}
}

/// Write access to an enumeration.
pub trait EnumSlot {
	/// Backing integer kind.
	fn backing(&self) -> ScalarKind;
	/// Store an ordinal already narrowed to the backing kind.
	fn store_ordinal(&mut self, ordinal: i64);
}

impl<E: Enumeration> EnumSlot for E {
	fn backing(&self) -> ScalarKind {
		E::BACKING
	}

	fn store_ordinal(&mut self, ordinal: i64) {
		*self = E::from_ordinal(ordinal);
	}
}

/// Write access to a repeated scalar.
pub trait RepeatedSlot {
	/// Element coercion kind.
	fn kind(&self) -> ScalarKind;
	/// Replace the list with coerced elements; `false` on a kind mismatch.
	fn store_all(&mut self, values: Vec<NativeValue>) -> bool;
}

impl<S: Scalar> RepeatedSlot for Option<Vec<S>> {
	fn kind(&self) -> ScalarKind {
		S::KIND
	}

	fn store_all(&mut self, values: Vec<NativeValue>) -> bool {
		let items: Option<Vec<S>> = values.into_iter().map(S::from_native).collect();
		match items {
			Some(items) => {
				*self = Some(items);
				true
			}
			None => false,
		}
	}
}

/// Write access to a pointer-owned child message.
pub trait BoxedSlot {
	/// Child message, allocating an empty one when nil.
	fn get_or_insert(&mut self) -> &mut dyn Message;
}

impl<M: Message + Default + 'static> BoxedSlot for Option<Box<M>> {
	fn get_or_insert(&mut self) -> &mut dyn Message {
		let child: &mut M = self.get_or_insert_with(Box::default);
		child
	}
}

/// Write view of one field.
pub struct FieldMut<'a> {
	/// Rust field name.
	pub name: &'static str,
	/// Raw tag metadata.
	pub meta: Option<&'static str>,
	/// Native Rust type name.
	pub type_name: &'static str,
	/// Writable slot.
	pub slot: SlotMut<'a>,
}

/// Writable field, by classification.
pub enum SlotMut<'a> {
	/// Required scalar.
	Scalar(&'a mut dyn ScalarSlot),
	/// Optional scalar wrapper.
	Wrapper(&'a mut dyn WrapperSlot),
	/// Enumeration.
	Enumeration(&'a mut dyn EnumSlot),
	/// Repeated scalar.
	Repeated(&'a mut dyn RepeatedSlot),
	/// Embedded child.
	Message(&'a mut dyn Message),
	/// Pointer-owned child.
	Boxed(&'a mut dyn BoxedSlot),
	/// Unsupported native kind.
	Unsupported,
}

impl<'a> FieldMut<'a> {
	/// Wire name resolved from [`Self::meta`].
	pub fn wire_name(&self) -> Option<&'static str> {
		tag::wire_name(self.meta)
	}

	/// Required scalar field.
	pub fn scalar<S: Scalar>(name: &'static str, meta: Option<&'static str>, value: &'a mut S) -> Self {
		Self::new::<S>(name, meta, SlotMut::Scalar(value))
	}

	/// Optional scalar wrapper field.
	pub fn wrapper<S: Scalar>(name: &'static str, meta: Option<&'static str>, value: &'a mut Option<S>) -> Self {
		Self::new::<Option<S>>(name, meta, SlotMut::Wrapper(value))
	}

	/// Enumeration field.
	pub fn enumeration<E: Enumeration>(name: &'static str, meta: Option<&'static str>, value: &'a mut E) -> Self {
		Self::new::<E>(name, meta, SlotMut::Enumeration(value))
	}

	/// Repeated scalar field.
	pub fn repeated<S: Scalar>(name: &'static str, meta: Option<&'static str>, value: &'a mut Option<Vec<S>>) -> Self {
		Self::new::<Option<Vec<S>>>(name, meta, SlotMut::Repeated(value))
	}

	/// Embedded child message.
	pub fn message<M: Message>(name: &'static str, meta: Option<&'static str>, value: &'a mut M) -> Self {
		Self::new::<M>(name, meta, SlotMut::Message(value))
	}

	/// Pointer-owned child message.
	pub fn boxed<M: Message + Default + 'static>(name: &'static str, meta: Option<&'static str>, value: &'a mut Option<Box<M>>) -> Self {
		Self::new::<Option<Box<M>>>(name, meta, SlotMut::Boxed(value))
	}

	/// Field of a native kind with no coercion rule.
	pub fn unsupported<T>(name: &'static str, meta: Option<&'static str>, _value: &'a mut T) -> Self {
		Self::new::<T>(name, meta, SlotMut::Unsupported)
	}

	fn new<T: ?Sized>(name: &'static str, meta: Option<&'static str>, slot: SlotMut<'a>) -> Self {
		Self {
			name,
			meta,
			type_name: type_name::<T>(),
			slot,
		}
	}
}

/// One flattened leaf of a schema, as listed by [`describe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
	/// Wire name.
	pub wire_name: &'static str,
	/// Dotted Rust field path from the root message.
	pub path: String,
	/// Classification.
	pub kind: FieldKind,
	/// Native Rust type name.
	pub type_name: &'static str,
}

/// List every tagged leaf of `message`, flattening children in declaration order.
///
/// Nil pointer-owned children are described from an empty instance of their type.
pub fn describe(message: &dyn Message) -> Vec<FieldDescriptor> {
	let mut out = Vec::new();
	describe_into(message, "", &mut out);
	out
}

fn describe_into(message: &dyn Message, prefix: &str, out: &mut Vec<FieldDescriptor>) {
	for field in message.fields() {
		let path = if prefix.is_empty() {
			field.name.to_owned()
		} else {
			format!("{prefix}.{}", field.name)
		};

		match field.slot {
			Slot::Message(child) | Slot::Boxed(Some(child), _) => describe_into(child, &path, out),
			Slot::Boxed(None, template) => describe_into(template().as_ref(), &path, out),
			ref leaf => {
				let Some(wire_name) = field.wire_name() else {
					continue;
				};
				out.push(FieldDescriptor {
					wire_name,
					path,
					kind: leaf.kind(),
					type_name: field.type_name,
				});
			}
		}
	}
}

/// Wire names declared by more than one flattened leaf, with the colliding paths.
pub fn find_collisions(message: &dyn Message) -> BTreeMap<&'static str, Vec<String>> {
	let mut by_name: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
	for item in describe(message) {
		by_name.entry(item.wire_name).or_default().push(item.path);
	}
	by_name.retain(|_, paths| paths.len() > 1);
	by_name
}

/// Declare a schema struct and derive its [`Message`] implementation.
///
/// Each field is prefixed by its classification (`scalar`, `wrapper`,
/// `enumeration`, `repeated`, `message`, `boxed` or `unsupported`) and a
/// parenthesized tag metadata literal. Untagged fields keep empty parentheses:
///
/// ```
/// use attrbridge::adapter::{Message, describe};
///
/// attrbridge::message! {
/// 	#[derive(Debug, Default)]
/// 	pub struct Disk {
/// 		scalar("name=disk_name") pub name: String,
/// 		wrapper("name=size_gb") pub size_gb: Option<i64>,
/// 		scalar() pub etag: String,
/// 	}
/// }
///
/// let disk = Disk::default();
/// assert_eq!(disk.type_name(), "Disk");
/// let names: Vec<_> = describe(&disk).into_iter().map(|field| field.wire_name).collect();
/// assert_eq!(names, ["disk_name", "size_gb"]);
/// ```
#[macro_export]
macro_rules! message {
	(@meta) => {
		::std::option::Option::None
	};
	(@meta $meta:literal) => {
		::std::option::Option::Some($meta)
	};
	(
		$(#[$attr:meta])*
		$vis:vis struct $name:ident {
			$(
				$(#[$field_attr:meta])*
				$kind:ident ( $($meta:literal)? ) $field_vis:vis $field:ident : $ty:ty
			),* $(,)?
		}
	) => {
		$(#[$attr])*
		$vis struct $name {
			$(
				$(#[$field_attr])*
				$field_vis $field: $ty,
			)*
		}

		impl $crate::adapter::Message for $name {
			fn type_name(&self) -> &'static str {
				::std::stringify!($name)
			}

			fn fields(&self) -> ::std::vec::Vec<$crate::adapter::FieldRef<'_>> {
				::std::vec![
					$( $crate::adapter::FieldRef::$kind(::std::stringify!($field), $crate::message!(@meta $($meta)?), &self.$field) ),*
				]
			}

			fn fields_mut(&mut self) -> ::std::vec::Vec<$crate::adapter::FieldMut<'_>> {
				::std::vec![
					$( $crate::adapter::FieldMut::$kind(::std::stringify!($field), $crate::message!(@meta $($meta)?), &mut self.$field) ),*
				]
			}
		}
	};
}

#[cfg(test)]
mod tests;
