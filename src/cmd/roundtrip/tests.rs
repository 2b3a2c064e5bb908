use attrbridge::adapter::{ExtractOptions, FillOptions, TaggedValue, ValueType};

use super::{render_value, roundtrip};

fn attrs<const N: usize>(entries: [(&str, TaggedValue); N]) -> attrbridge::adapter::AttributeMap {
	entries.into_iter().map(|(key, value)| (key.to_owned(), value)).collect()
}

#[test]
fn demo_schema_round_trips_and_drops_nil_scheduling() {
	let input = attrs([
		("name", TaggedValue::string("vm-1")),
		("machine_type", TaggedValue::string("e2-medium")),
		("status", TaggedValue::number(2)),
	]);

	let out = roundtrip(input, &FillOptions::default(), &ExtractOptions::default()).expect("roundtrip succeeds");

	assert_eq!(out["name"], TaggedValue::string("vm-1"));
	assert_eq!(out["status"], TaggedValue::number(2));
	assert_eq!(out["can_ip_forward"], TaggedValue::Null(ValueType::Bool));
	assert_eq!(out["tags"], TaggedValue::Null(ValueType::List(None)));
	assert_eq!(out["preemptible"], TaggedValue::Null(ValueType::Bool), "fill allocates scheduling, so it extracts");
	assert!(!out.contains_key("fingerprint"));
}

#[test]
fn strict_mode_rejects_overflowing_ports() {
	let ports = TaggedValue::list(ValueType::Number, vec![TaggedValue::Int64(1 << 40)]);
	let err = roundtrip(attrs([("ports", ports.clone())]), &FillOptions::strict(), &ExtractOptions::default()).expect_err("strict fails");
	assert_eq!(err.len(), 1);

	roundtrip(attrs([("ports", ports)]), &FillOptions::default(), &ExtractOptions::default()).expect("truncating succeeds");
}

#[test]
fn render_value_marks_nulls_with_their_type() {
	assert_eq!(render_value(&TaggedValue::Null(ValueType::Number)), "null(number)");
	assert_eq!(render_value(&TaggedValue::Unknown(ValueType::String)), "unknown(string)");
	assert_eq!(
		render_value(&TaggedValue::list(ValueType::String, vec![TaggedValue::string("a"), TaggedValue::string("b")])),
		"[\"a\", \"b\"]"
	);
}
