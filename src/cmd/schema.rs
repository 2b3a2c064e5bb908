use attrbridge::adapter::{FieldDescriptor, describe, find_collisions};

use crate::cmd::demo::ComputeInstance;
use crate::cmd::{Result, emit_json};

#[derive(clap::Args)]
pub struct Args {
	#[arg(long)]
	pub json: bool,
}

/// Print every flattened wire name of the demo schema.
pub fn run(args: Args) -> Result<()> {
	let schema = ComputeInstance::default();
	let fields = describe(&schema);
	let collisions = find_collisions(&schema);

	if args.json {
		let payload = SchemaJson {
			schema: "ComputeInstance",
			fields: fields.iter().map(FieldJson::from).collect(),
			collisions: collisions.keys().map(|name| (*name).to_owned()).collect(),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("schema: ComputeInstance");
	println!("fields: {}", fields.len());
	for field in &fields {
		println!("  {:<24} {:<20} {}", field.wire_name, field.kind.to_string(), field.path);
	}
	for (name, paths) in &collisions {
		println!("collision: {name} <- {}", paths.join(", "));
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct FieldJson {
	wire_name: &'static str,
	kind: String,
	path: String,
	type_name: &'static str,
}

impl From<&FieldDescriptor> for FieldJson {
	fn from(item: &FieldDescriptor) -> Self {
		Self {
			wire_name: item.wire_name,
			kind: item.kind.to_string(),
			path: item.path.clone(),
			type_name: item.type_name,
		}
	}
}

#[derive(serde::Serialize)]
struct SchemaJson {
	schema: &'static str,
	fields: Vec<FieldJson>,
	collisions: Vec<String>,
}
