use crate::adapter::test_support::{Instance, Labeled, Nested, Sample, Scheduling, Tier};
use crate::adapter::{AdapterError, ExtractOptions, Number, TaggedValue, ValueType, extract, extract_ptr};

#[test]
fn scenario_struct_extracts_flattened_map() {
	let sample = Sample {
		string_field: String::new(),
		int32_field: 15,
		nested: Nested {
			string_nested_field: "x".to_owned(),
		},
	};

	let attrs = extract(&sample, &ExtractOptions::default()).expect("extract succeeds");

	assert_eq!(attrs.len(), 3);
	assert_eq!(attrs["string_field"], TaggedValue::string(""));
	assert_eq!(attrs["int32_field"], TaggedValue::number(15));
	assert_eq!(attrs["string_nested_field"], TaggedValue::string("x"));
}

#[test]
fn nil_source_yields_empty_map() {
	let attrs = extract_ptr::<Sample>(None, &ExtractOptions::default()).expect("extract succeeds");
	assert!(attrs.is_empty());
}

#[test]
fn unset_wrappers_extract_as_typed_nulls() {
	let attrs = extract(&Instance::default(), &ExtractOptions::default()).expect("extract succeeds");

	assert_eq!(attrs["disk_gb"], TaggedValue::Null(ValueType::Number));
	assert_eq!(attrs["scale"], TaggedValue::Null(ValueType::Number));
	assert_eq!(attrs["description"], TaggedValue::Null(ValueType::String));
	assert_eq!(attrs["cpus"], TaggedValue::number(0), "required scalars use zero values");
	assert_eq!(attrs["tier"], TaggedValue::number(0));
}

#[test]
fn nil_and_empty_lists_stay_distinct() {
	let instance = Instance {
		tags: None,
		ports: Some(Vec::new()),
		..Instance::default()
	};

	let attrs = extract(&instance, &ExtractOptions::default()).expect("extract succeeds");

	assert_eq!(attrs["tags"], TaggedValue::Null(ValueType::List(None)));
	assert_eq!(attrs["ports"], TaggedValue::list(ValueType::Number, Vec::new()));
}

#[test]
fn populated_fields_normalize_numbers() {
	let instance = Instance {
		name: "vm-1".to_owned(),
		cpus: 8,
		ratio: 0.75,
		disk_gb: Some(20),
		tier: Tier(3),
		ports: Some(vec![80, 443]),
		..Instance::default()
	};

	let attrs = extract(&instance, &ExtractOptions::default()).expect("extract succeeds");

	assert_eq!(attrs["instance_name"], TaggedValue::string("vm-1"));
	assert_eq!(attrs["cpus"], TaggedValue::number(8));
	assert_eq!(attrs["ratio"], TaggedValue::Number(Number::from_f64(0.75).expect("finite")));
	assert_eq!(attrs["disk_gb"], TaggedValue::number(20));
	assert_eq!(attrs["tier"], TaggedValue::number(3));
	assert_eq!(
		attrs["ports"],
		TaggedValue::list(ValueType::Number, vec![TaggedValue::number(80), TaggedValue::number(443)])
	);
	assert!(!attrs.contains_key("internal_id"));
}

#[test]
fn nil_boxed_child_drops_its_keys_by_default() {
	let attrs = extract(&Instance::default(), &ExtractOptions::default()).expect("extract succeeds");
	assert!(!attrs.contains_key("preemptible"));
	assert!(!attrs.contains_key("host_maintenance"));
}

#[test]
fn nil_boxed_child_is_null_filled_on_request() {
	let attrs = extract(&Instance::default(), &ExtractOptions::null_filled()).expect("extract succeeds");
	assert_eq!(attrs["preemptible"], TaggedValue::Null(ValueType::Bool));
	assert_eq!(attrs["host_maintenance"], TaggedValue::Null(ValueType::String));
}

#[test]
fn present_boxed_child_is_flattened() {
	let instance = Instance {
		scheduling: Some(Box::new(Scheduling {
			preemptible: Some(true),
			host_maintenance: "MIGRATE".to_owned(),
		})),
		..Instance::default()
	};

	let attrs = extract(&instance, &ExtractOptions::null_filled()).expect("extract succeeds");
	assert_eq!(attrs["preemptible"], TaggedValue::Bool(true));
	assert_eq!(attrs["host_maintenance"], TaggedValue::string("MIGRATE"));
}

#[test]
fn non_finite_float_is_a_coercion_error() {
	let instance = Instance {
		ratio: f64::INFINITY,
		..Instance::default()
	};

	let err = extract(&instance, &ExtractOptions::default()).expect_err("extract fails");
	assert_eq!(
		err.errors(),
		[AdapterError::Coercion {
			field: "ratio".to_owned(),
			type_name: "f64",
			expected: "must be finite",
		}]
	);
}

#[test]
fn tagged_unsupported_field_fails_extract() {
	let err = extract(&Labeled::default(), &ExtractOptions::default()).expect_err("extract fails");
	assert_eq!(err.len(), 1);
	assert_eq!(err.errors()[0].context(), "labels");
	assert_eq!(err.errors()[0].summary(), "unsupported type");
}
