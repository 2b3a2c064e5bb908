#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "attrbridge", about = "Fill and extract schema structs from tagged attribute maps")]
struct Cli {
	/// Log filter, overriding `RUST_LOG` (e.g. `attrbridge=debug`).
	#[arg(long, global = true)]
	log: Option<String>,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// List the wire names of the bundled demo schema.
	Schema(cmd::schema::Args),
	/// Fill the demo schema from a JSON attribute document and extract it back.
	Roundtrip(cmd::roundtrip::Args),
}

fn main() {
	let cli = Cli::parse();
	init_logging(cli.log.as_deref());

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run(command: Commands) -> cmd::Result<()> {
	match command {
		Commands::Schema(args) => cmd::schema::run(args),
		Commands::Roundtrip(args) => cmd::roundtrip::run(args),
	}
}

fn init_logging(filter: Option<&str>) {
	let filter = match filter {
		Some(directives) => EnvFilter::new(directives),
		None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
	};
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
