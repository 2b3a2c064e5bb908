use std::collections::BTreeMap;

use crate::adapter::{AttributeMap, Enumeration, ScalarKind, TaggedValue};

crate::message! {
	#[derive(Debug, Clone, Default, PartialEq)]
	pub(crate) struct Nested {
		scalar("name=string_nested_field") pub string_nested_field: String,
	}
}

crate::message! {
	#[derive(Debug, Clone, Default, PartialEq)]
	pub(crate) struct Sample {
		scalar("name=string_field") pub string_field: String,
		scalar("name=int32_field") pub int32_field: i32,
		message() pub nested: Nested,
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Tier(pub i32);

impl Enumeration for Tier {
	const BACKING: ScalarKind = ScalarKind::Int32;

	fn ordinal(self) -> i64 {
		i64::from(self.0)
	}

	fn from_ordinal(ordinal: i64) -> Self {
		Self(ordinal as i32)
	}
}

crate::message! {
	#[derive(Debug, Clone, Default, PartialEq)]
	pub(crate) struct Scheduling {
		wrapper("name=preemptible") pub preemptible: Option<bool>,
		scalar("name=host_maintenance") pub host_maintenance: String,
	}
}

crate::message! {
	#[derive(Debug, Clone, Default, PartialEq)]
	pub(crate) struct Instance {
		scalar("name=instance_name") pub name: String,
		scalar("name=cpus") pub cpus: i64,
		scalar("name=ratio") pub ratio: f64,
		wrapper("name=disk_gb") pub disk_gb: Option<i32>,
		wrapper("name=scale") pub scale: Option<f32>,
		wrapper("name=description") pub description: Option<String>,
		enumeration("name=tier") pub tier: Tier,
		repeated("name=tags") pub tags: Option<Vec<String>>,
		repeated("name=ports") pub ports: Option<Vec<i32>>,
		boxed() pub scheduling: Option<Box<Scheduling>>,
		scalar() pub internal_id: String,
	}
}

crate::message! {
	#[derive(Debug, Clone, Default, PartialEq)]
	pub(crate) struct Labeled {
		scalar("name=label_owner") pub owner: String,
		unsupported("name=labels") pub labels: BTreeMap<String, String>,
		unsupported() pub cache: Vec<u8>,
	}
}

crate::message! {
	#[derive(Debug, Clone, Default, PartialEq)]
	pub(crate) struct Empty {}
}

pub(crate) fn attrs<const N: usize>(entries: [(&str, TaggedValue); N]) -> AttributeMap {
	entries.into_iter().map(|(key, value)| (key.to_owned(), value)).collect()
}
