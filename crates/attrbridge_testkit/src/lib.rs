//! Shared schema fixtures and helpers for workspace tests.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use attrbridge::adapter::{AttributeMap, Enumeration, ScalarKind, TaggedValue, attributes_from_json};

attrbridge::message! {
	/// Child of [`Sample`], flattened into its parent's map.
	#[derive(Debug, Clone, Default, PartialEq)]
	pub struct Nested {
		scalar("name=string_nested_field") pub string_nested_field: String,
	}
}

attrbridge::message! {
	/// Minimal schema with one untagged embedded child.
	#[derive(Debug, Clone, Default, PartialEq)]
	pub struct Sample {
		scalar("name=string_field") pub string_field: String,
		scalar("name=int32_field") pub int32_field: i32,
		message() pub nested: Nested,
	}
}

/// Machine tier, carried by ordinal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tier(pub i32);

impl Tier {
	/// Unspecified tier.
	pub const UNSPECIFIED: Self = Self(0);
	/// Standard tier.
	pub const STANDARD: Self = Self(1);
	/// Premium tier.
	pub const PREMIUM: Self = Self(2);
}

impl Enumeration for Tier {
	const BACKING: ScalarKind = ScalarKind::Int32;

	fn ordinal(self) -> i64 {
		i64::from(self.0)
	}

	fn from_ordinal(ordinal: i64) -> Self {
		Self(ordinal as i32)
	}
}

attrbridge::message! {
	/// Pointer-owned child of [`Instance`].
	#[derive(Debug, Clone, Default, PartialEq)]
	pub struct Scheduling {
		wrapper("name=preemptible") pub preemptible: Option<bool>,
		scalar("name=host_maintenance") pub host_maintenance: String,
		wrapper("name=restart_delay_s") pub restart_delay_s: Option<i64>,
	}
}

attrbridge::message! {
	/// Embedded boot disk settings of [`Instance`].
	#[derive(Debug, Clone, Default, PartialEq)]
	pub struct BootDisk {
		scalar("name=boot_disk_size_gb") pub size_gb: i64,
		wrapper("name=boot_disk_type") pub disk_type: Option<String>,
	}
}

attrbridge::message! {
	/// Compute-instance-shaped schema touching every field classification.
	#[derive(Debug, Clone, Default, PartialEq)]
	pub struct Instance {
		scalar("name=instance_name") pub name: String,
		scalar("name=cpus") pub cpus: i64,
		scalar("name=memory_gb") pub memory_gb: f32,
		scalar("name=deletion_protection") pub deletion_protection: bool,
		wrapper("name=priority") pub priority: Option<i32>,
		wrapper("name=cpu_ratio") pub cpu_ratio: Option<f64>,
		wrapper("name=description") pub description: Option<String>,
		enumeration("name=tier") pub tier: Tier,
		repeated("name=tags") pub tags: Option<Vec<String>>,
		repeated("name=ports") pub ports: Option<Vec<i64>>,
		message() pub boot_disk: BootDisk,
		boxed() pub scheduling: Option<Box<Scheduling>>,
	}
}

/// Build an attribute map from literal entries.
pub fn attrs<const N: usize>(entries: [(&str, TaggedValue); N]) -> AttributeMap {
	entries.into_iter().map(|(key, value)| (key.to_owned(), value)).collect()
}

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve a fixture path under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// Load a JSON attribute document fixture.
///
/// Panics on unreadable or malformed fixtures.
pub fn load_attrs(name: &str) -> AttributeMap {
	let path = fixture_path(name);
	let text = std::fs::read_to_string(&path).unwrap_or_else(|err| panic!("read {}: {err}", path.display()));
	let doc: serde_json::Value = serde_json::from_str(&text).unwrap_or_else(|err| panic!("parse {}: {err}", path.display()));
	attributes_from_json(&doc).unwrap_or_else(|err| panic!("convert {}: {err}", path.display()))
}
