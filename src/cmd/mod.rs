use std::path::PathBuf;

use attrbridge::adapter::{Diagnostics, JsonError};
use thiserror::Error;

/// Bundled demo schema.
pub mod demo;
/// Fill-then-extract command.
pub mod roundtrip;
/// Schema listing command.
pub mod schema;

/// Command result type.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
	/// Attribute document could not be read.
	#[error("read {path}: {source}")]
	Read {
		/// Document path.
		path: PathBuf,
		/// Underlying IO error.
		source: std::io::Error,
	},
	/// Attribute document is not valid JSON.
	#[error("parse {path}: {source}")]
	Parse {
		/// Document path.
		path: PathBuf,
		/// Underlying JSON error.
		source: serde_json::Error,
	},
	/// JSON document does not describe a flat attribute map.
	#[error(transparent)]
	Attributes(#[from] JsonError),
	/// Fill or extract reported diagnostics.
	#[error(transparent)]
	Adapter(#[from] Diagnostics),
}

/// Print a value as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(value: &T) {
	match serde_json::to_string_pretty(value) {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: failed to render json: {err}"),
	}
}
