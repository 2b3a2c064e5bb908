use std::fs;
use std::path::PathBuf;

use attrbridge::adapter::{
	AttributeMap, Diagnostics, ExtractOptions, FillOptions, TaggedValue, attributes_from_json, attributes_to_json, extract, fill,
};

use crate::cmd::demo::ComputeInstance;
use crate::cmd::{CliError, Result, emit_json};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Reject integers that overflow their native width.
	#[arg(long)]
	pub strict: bool,
	/// Write nil child messages as typed nulls instead of omitting them.
	#[arg(long)]
	pub null_fill: bool,
	#[arg(long)]
	pub json: bool,
}

/// Fill the demo schema from a JSON attribute document and print what extracts back.
pub fn run(args: Args) -> Result<()> {
	let Args { path, strict, null_fill, json } = args;

	let text = fs::read_to_string(&path).map_err(|source| CliError::Read { path: path.clone(), source })?;
	let doc: serde_json::Value = serde_json::from_str(&text).map_err(|source| CliError::Parse { path: path.clone(), source })?;
	let attrs = attributes_from_json(&doc)?;

	let fill_options = if strict { FillOptions::strict() } else { FillOptions::default() };
	let extract_options = if null_fill {
		ExtractOptions::null_filled()
	} else {
		ExtractOptions::default()
	};

	let outcome = roundtrip(attrs, &fill_options, &extract_options);

	if json {
		emit_json(&RoundtripJson::new(&path, &outcome));
	} else if let Ok(attrs) = &outcome {
		println!("path: {}", path.display());
		println!("attributes: {}", attrs.len());
		for (key, value) in attrs {
			println!("  {key} = {}", render_value(value));
		}
	}

	outcome.map(|_| ()).map_err(CliError::from)
}

pub(crate) fn roundtrip(attrs: AttributeMap, fill_options: &FillOptions, extract_options: &ExtractOptions) -> attrbridge::adapter::Result<AttributeMap> {
	let mut instance = ComputeInstance::default();
	fill(&mut instance, attrs, fill_options)?;
	extract(&instance, extract_options)
}

pub(crate) fn render_value(value: &TaggedValue) -> String {
	match value {
		TaggedValue::Null(ty) => format!("null({ty})"),
		TaggedValue::Unknown(ty) => format!("unknown({ty})"),
		TaggedValue::Bool(inner) => inner.to_string(),
		TaggedValue::Int64(inner) => inner.to_string(),
		TaggedValue::Float64(inner) => inner.to_string(),
		TaggedValue::Number(inner) => inner.to_string(),
		TaggedValue::String(inner) => format!("{inner:?}"),
		TaggedValue::List(list) => {
			let items: Vec<_> = list.items.iter().map(render_value).collect();
			format!("[{}]", items.join(", "))
		}
	}
}

#[derive(serde::Serialize)]
struct DiagnosticJson {
	summary: &'static str,
	context: String,
	message: String,
}

#[derive(serde::Serialize)]
struct RoundtripJson {
	path: String,
	ok: bool,
	attributes: Option<serde_json::Value>,
	diagnostics: Vec<DiagnosticJson>,
}

impl RoundtripJson {
	fn new(path: &std::path::Path, outcome: &std::result::Result<AttributeMap, Diagnostics>) -> Self {
		let (attributes, diagnostics) = match outcome {
			Ok(attrs) => (Some(attributes_to_json(attrs)), Vec::new()),
			Err(diags) => (
				None,
				diags
					.iter()
					.map(|item| DiagnosticJson {
						summary: item.summary,
						context: item.context.to_owned(),
						message: item.error.to_string(),
					})
					.collect(),
			),
		};

		Self {
			path: path.display().to_string(),
			ok: outcome.is_ok(),
			attributes,
			diagnostics,
		}
	}
}

#[cfg(test)]
mod tests;
