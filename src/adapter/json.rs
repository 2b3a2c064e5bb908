use serde_json::{Map, Value};
use thiserror::Error;

use crate::adapter::value::{AttributeMap, ListValue, Number, TaggedValue, ValueType};

/// Errors converting JSON documents into attribute maps.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsonError {
	/// Top-level document was not a JSON object.
	#[error("attribute document must be a JSON object, got {got}")]
	NotAnObject {
		/// JSON kind of the document.
		got: &'static str,
	},
	/// Object nested under a key; attribute maps are flat.
	#[error("attribute {key} holds a nested object; attribute maps are flat")]
	NestedObject {
		/// Offending attribute key.
		key: String,
	},
	/// Array items of different types.
	#[error("attribute {key} mixes {first} and {other} items")]
	MixedList {
		/// Offending attribute key.
		key: String,
		/// Type of the first non-null item.
		first: String,
		/// Conflicting item type.
		other: String,
	},
}

/// Convert a JSON object into a flat attribute map.
///
/// JSON `null` becomes a [`ValueType::Dynamic`] null and every number becomes
/// a [`TaggedValue::Number`].
pub fn attributes_from_json(doc: &Value) -> Result<AttributeMap, JsonError> {
	let Value::Object(entries) = doc else {
		return Err(JsonError::NotAnObject { got: json_kind(doc) });
	};

	entries
		.iter()
		.map(|(key, value)| value_from_json(key, value).map(|value| (key.clone(), value)))
		.collect()
}

/// Render an attribute map as a JSON object; unknown values render as `null`.
pub fn attributes_to_json(attrs: &AttributeMap) -> Value {
	let entries: Map<String, Value> = attrs.iter().map(|(key, value)| (key.clone(), value_to_json(value))).collect();
	Value::Object(entries)
}

fn value_from_json(key: &str, value: &Value) -> Result<TaggedValue, JsonError> {
	Ok(match value {
		Value::Null => TaggedValue::Null(ValueType::Dynamic),
		Value::Bool(inner) => TaggedValue::Bool(*inner),
		Value::Number(inner) => TaggedValue::Number(inner.clone()),
		Value::String(inner) => TaggedValue::String(inner.clone()),
		Value::Array(items) => {
			let items = items.iter().map(|item| value_from_json(key, item)).collect::<Result<Vec<_>, _>>()?;
			TaggedValue::List(ListValue {
				element: list_element(key, &items)?,
				items,
			})
		}
		Value::Object(_) => return Err(JsonError::NestedObject { key: key.to_owned() }),
	})
}

fn list_element(key: &str, items: &[TaggedValue]) -> Result<ValueType, JsonError> {
	let mut element: Option<ValueType> = None;
	for item in items.iter().filter(|item| !item.is_null_or_unknown()) {
		let ty = item.value_type();
		match &element {
			None => element = Some(ty),
			Some(first) if *first != ty => {
				return Err(JsonError::MixedList {
					key: key.to_owned(),
					first: first.to_string(),
					other: ty.to_string(),
				});
			}
			Some(_) => {}
		}
	}
	Ok(element.unwrap_or(ValueType::Dynamic))
}

fn value_to_json(value: &TaggedValue) -> Value {
	match value {
		TaggedValue::Null(_) | TaggedValue::Unknown(_) => Value::Null,
		TaggedValue::Bool(inner) => Value::Bool(*inner),
		TaggedValue::Int64(inner) => Value::Number(Number::from(*inner)),
		TaggedValue::Float64(inner) => Number::from_f64(*inner).map_or(Value::Null, Value::Number),
		TaggedValue::Number(inner) => Value::Number(inner.clone()),
		TaggedValue::String(inner) => Value::String(inner.clone()),
		TaggedValue::List(list) => Value::Array(list.items.iter().map(value_to_json).collect()),
	}
}

fn json_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "bool",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::{JsonError, attributes_from_json, attributes_to_json};
	use crate::adapter::value::{TaggedValue, ValueType};

	#[test]
	fn flat_object_converts_to_tagged_values() {
		let attrs = attributes_from_json(&json!({
			"name": "vm-1",
			"cpus": 4,
			"preemptible": false,
			"labels": ["a", "b"],
			"zone": null,
		}))
		.expect("valid document");

		assert_eq!(attrs["name"], TaggedValue::string("vm-1"));
		assert_eq!(attrs["cpus"], TaggedValue::number(4));
		assert_eq!(attrs["preemptible"], TaggedValue::Bool(false));
		assert_eq!(attrs["labels"].value_type(), ValueType::list_of(ValueType::String));
		assert_eq!(attrs["zone"], TaggedValue::Null(ValueType::Dynamic));
	}

	#[test]
	fn nested_objects_and_mixed_lists_are_rejected() {
		let err = attributes_from_json(&json!({ "scheduling": { "preemptible": true } })).expect_err("nested rejected");
		assert_eq!(err, JsonError::NestedObject { key: "scheduling".to_owned() });

		let err = attributes_from_json(&json!({ "tags": ["a", 1] })).expect_err("mixed rejected");
		assert!(matches!(err, JsonError::MixedList { .. }));

		let err = attributes_from_json(&json!([1, 2])).expect_err("array rejected");
		assert_eq!(err, JsonError::NotAnObject { got: "array" });
	}

	#[test]
	fn unknown_renders_as_null() {
		let mut attrs = attributes_from_json(&json!({ "id": "x" })).expect("valid document");
		attrs.insert("self_link".to_owned(), TaggedValue::Unknown(ValueType::String));

		assert_eq!(attributes_to_json(&attrs), json!({ "id": "x", "self_link": null }));
	}
}
