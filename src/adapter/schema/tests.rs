use crate::adapter::test_support::{Instance, Labeled, Nested, Sample, Scheduling};
use crate::adapter::{FieldKind, Message, ScalarKind, Slot, describe, find_collisions};

crate::message! {
	#[derive(Debug, Default)]
	struct Clashing {
		message() left: Nested,
		message() right: Nested,
	}
}

#[test]
fn field_tables_follow_declaration_order() {
	let sample = Sample::default();
	let names: Vec<_> = sample.fields().iter().map(|field| field.name).collect();
	assert_eq!(names, ["string_field", "int32_field", "nested"]);
	assert_eq!(sample.type_name(), "Sample");
}

#[test]
fn untagged_fields_have_no_wire_name() {
	let sample = Sample::default();
	let fields = sample.fields();
	assert_eq!(fields[1].wire_name(), Some("int32_field"));
	assert_eq!(fields[2].wire_name(), None);
	assert!(matches!(fields[2].slot, Slot::Message(_)));
}

#[test]
fn slots_report_their_classification() {
	let instance = Instance::default();
	let kinds: Vec<_> = instance.fields().iter().map(|field| field.slot.kind()).collect();
	assert_eq!(
		kinds,
		[
			FieldKind::Scalar(ScalarKind::String),
			FieldKind::Scalar(ScalarKind::Int64),
			FieldKind::Scalar(ScalarKind::Float64),
			FieldKind::Wrapper(ScalarKind::Int32),
			FieldKind::Wrapper(ScalarKind::Float32),
			FieldKind::Wrapper(ScalarKind::String),
			FieldKind::Enumeration(ScalarKind::Int32),
			FieldKind::Repeated(ScalarKind::String),
			FieldKind::Repeated(ScalarKind::Int32),
			FieldKind::Boxed,
			FieldKind::Scalar(ScalarKind::String),
		]
	);
}

#[test]
fn describe_flattens_nil_children_from_their_type() {
	let listed = describe(&Instance::default());
	let scheduling: Vec<_> = listed.iter().filter(|item| item.path.starts_with("scheduling.")).collect();

	assert_eq!(scheduling.len(), 2);
	assert_eq!(scheduling[0].wire_name, "preemptible");
	assert_eq!(scheduling[0].path, "scheduling.preemptible");
	assert_eq!(scheduling[0].kind, FieldKind::Wrapper(ScalarKind::Bool));
	assert!(listed.iter().all(|item| item.path != "internal_id"), "untagged leaves are not listed");
}

#[test]
fn describe_lists_unsupported_tagged_fields() {
	let listed = describe(&Labeled::default());
	let labels = listed.iter().find(|item| item.wire_name == "labels").expect("labels listed");
	assert_eq!(labels.kind, FieldKind::Unsupported);
	assert!(labels.type_name.contains("BTreeMap"));
	assert_eq!(listed.len(), 2);
}

#[test]
fn sibling_collisions_are_detected() {
	let collisions = find_collisions(&Clashing::default());
	assert_eq!(collisions.len(), 1);
	assert_eq!(collisions["string_nested_field"], ["left.string_nested_field", "right.string_nested_field"]);

	assert!(find_collisions(&Instance::default()).is_empty());
	assert!(find_collisions(&Scheduling::default()).is_empty());
}
