//! `keepsake` command line.
//!
//! Runs the retainer table generator outside of a build script, for
//! inspection and for build systems other than cargo.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use keepsake_lut::{AssociationTable, GeneratedTable, LutConfig, Manifest, Origin};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "keepsake", version)]
#[command(about = "Generate the type to retainer lookup table")]
struct Cli {
	#[command(subcommand)]
	command: Command,

	/// Verbose logging
	#[arg(short, long, global = true)]
	verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Emit the generated Rust source.
	Generate(GenerateArgs),
	/// Print the merged association table without emitting code.
	Resolve(InputArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
	/// Hierarchy manifest (TOML)
	#[arg(short, long, value_name = "PATH")]
	manifest: PathBuf,

	/// Configuration file; options are read from its `[lut]` table
	#[arg(short, long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Derive entries for subclasses regardless of the config file
	#[arg(long)]
	vectorize_inheritance: bool,
}

#[derive(Args, Debug)]
struct GenerateArgs {
	#[command(flatten)]
	input: InputArgs,

	/// Output file; stdout when omitted
	#[arg(short, long, value_name = "PATH")]
	out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	match cli.command {
		Command::Generate(args) => {
			let generated = run(&args.input)?;
			match args.out {
				Some(path) => write_output(&path, &generated)?,
				None => std::io::stdout()
					.write_all(generated.source.as_bytes())
					.context("writing to stdout")?,
			}
		}
		Command::Resolve(args) => {
			let generated = run(&args)?;
			print!("{}", describe(&generated.table));
		}
	}
	Ok(())
}

fn run(args: &InputArgs) -> anyhow::Result<GeneratedTable> {
	let manifest = Manifest::load(&args.manifest)
		.with_context(|| format!("loading manifest {}", args.manifest.display()))?;

	let mut config = match &args.config {
		Some(path) => LutConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
		None => LutConfig::default(),
	};
	if args.vectorize_inheritance {
		config.vectorize_inheritance = true;
	}

	info!(
		manifest = %args.manifest.display(),
		types = manifest.types.len(),
		associations = manifest.associations.len(),
		vectorize_inheritance = config.vectorize_inheritance,
		"generating retainer table"
	);
	Ok(keepsake_lut::generate_from_manifest(&manifest, &config)?)
}

fn write_output(path: &Path, generated: &GeneratedTable) -> anyhow::Result<()> {
	if let Some(parent) = path.parent()
		&& !parent.as_os_str().is_empty()
		&& !parent.exists()
	{
		std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
	}
	std::fs::write(path, &generated.source).with_context(|| format!("writing {}", path.display()))?;
	info!(path = %path.display(), entries = generated.table.len(), "wrote retainer table");
	Ok(())
}

/// One line per entry: `type -> retainer`, annotated for derived entries.
fn describe(table: &AssociationTable) -> String {
	let mut out = String::new();
	for assoc in table.iter() {
		out.push_str(&format!("{} -> {}", assoc.type_name, assoc.handler));
		if let Origin::Derived { ancestor } = &assoc.origin {
			out.push_str(&format!(" (inherited from {ancestor})"));
		}
		out.push('\n');
	}
	out
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env("KEEPSAKE_LOG").unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("keepsake_lut=debug,info")
		} else {
			EnvFilter::new("warn")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}
