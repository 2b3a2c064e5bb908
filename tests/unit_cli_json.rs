#![allow(missing_docs)]

use std::process::{Command, Output};

use attrbridge_testkit::fixture_path;
use serde_json::Value;

#[test]
fn roundtrip_json_output_is_valid_and_normalized() {
	let json = run_json(&["roundtrip", &fixture("compute_instance.json"), "--json"]);

	assert_eq!(json["ok"], true);
	let attrs = &json["attributes"];
	assert_eq!(attrs["name"], "web-1");
	assert_eq!(attrs["status"], 2);
	assert_eq!(attrs["ports"], serde_json::json!([80, 443]));
	assert_eq!(attrs["description"], Value::Null);
	assert_eq!(attrs["automatic_restart"], Value::Null);
	assert!(attrs.get("fingerprint").is_none(), "untagged fields never extract");
	assert!(json["diagnostics"].as_array().is_some_and(|items| items.is_empty()));
}

#[test]
fn roundtrip_reports_unmapped_attributes_and_fails() {
	let output = run(&["roundtrip", &fixture("compute_instance_unmapped.json"), "--json"]);
	assert!(!output.status.success(), "unmapped attributes should fail the command");

	let json: Value = serde_json::from_slice(&output.stdout).expect("stdout should be valid json");
	assert_eq!(json["ok"], false);
	let contexts: Vec<_> = json["diagnostics"]
		.as_array()
		.expect("diagnostics array")
		.iter()
		.map(|item| item["context"].as_str().expect("context string").to_owned())
		.collect();
	assert_eq!(contexts, ["fingerprint", "zone"]);

	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("error: 2 errors:"), "stderr was: {stderr}");
}

#[test]
fn schema_json_lists_flattened_fields() {
	let json = run_json(&["schema", "--json"]);

	assert_eq!(json["schema"], "ComputeInstance");
	let fields = json["fields"].as_array().expect("fields array");
	assert!(fields.iter().any(|item| item["wire_name"] == "on_host_maintenance" && item["path"] == "scheduling.on_host_maintenance"));
	assert!(fields.iter().any(|item| item["wire_name"] == "status" && item["kind"] == "enum(int32)"));
	assert!(json["collisions"].as_array().is_some_and(|items| items.is_empty()));
}

fn fixture(name: &str) -> String {
	fixture_path(name).display().to_string()
}

fn run(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_attrbridge")).args(args).output().expect("command executes")
}

fn run_json(args: &[&str]) -> Value {
	let output = run(args);
	assert!(
		output.status.success(),
		"command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}
