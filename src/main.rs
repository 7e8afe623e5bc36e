//! Cutscene extraction CLI.
//!
//! Extracts cutscene data from an ABA archive or from a directory of loose
//! CMD/POL files and converts it to JSON for use with a modern renderer.
//!
//! # Usage
//!
//! ```bash
//! # From an ABA archive:
//! extract-cutscenes DATA/DEMO_UK.ABA --output public/data
//!
//! # From a directory with separate CMD/POL files:
//! extract-cutscenes --dir DATA/ --output public/data --cutscene INTRO1
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn};

use flashback_rs::prelude::*;

#[derive(Parser)]
#[command(name = "extract-cutscenes")]
#[command(author = "flashback-rs project")]
#[command(version)]
#[command(about = "Extract cutscene data from ABA archives or CMD/POL directories", long_about = None)]
struct Cli {
	/// Path to an ABA archive file (or use --dir for directory mode)
	#[arg(value_name = "ARCHIVE", conflicts_with = "data_dir")]
	archive: Option<PathBuf>,

	/// Path to a directory containing CMD/POL files
	#[arg(short = 'd', long = "dir", value_name = "DIR")]
	data_dir: Option<PathBuf>,

	/// Output directory for JSON files
	#[arg(short, long, value_name = "DIR", default_value = "public/data")]
	output: PathBuf,

	/// Extract only the specified cutscene (e.g. INTRO1)
	#[arg(short, long, value_name = "NAME")]
	cutscene: Option<String>,

	/// List available cutscenes and exit
	#[arg(short, long)]
	list: bool,

	/// Write a single combined JSON file instead of separate files
	#[arg(short = 'C', long)]
	combined: bool,

	/// Pretty-print JSON output
	#[arg(short, long)]
	pretty: bool,
}

/// A named pair of raw CMD and POL buffers.
type CutscenePair = (String, Vec<u8>, Vec<u8>);

fn main() -> ExitCode {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();

	let pairs = match load_pairs(&cli) {
		Ok(pairs) => pairs,
		Err(err) => {
			error!("{err}");
			return ExitCode::FAILURE;
		}
	};

	info!("found {} cutscene(s)", pairs.len());

	if cli.list {
		for (name, cmd, pol) in &pairs {
			println!("{name:15}  CMD: {:6} bytes, POL: {:6} bytes", cmd.len(), pol.len());
		}
		return ExitCode::SUCCESS;
	}

	let pairs = match filter_pairs(pairs, cli.cutscene.as_deref()) {
		Ok(pairs) => pairs,
		Err(err) => {
			error!("{err}");
			return ExitCode::FAILURE;
		}
	};

	if let Err(err) = fs::create_dir_all(&cli.output) {
		error!("cannot create output directory {}: {err}", cli.output.display());
		return ExitCode::FAILURE;
	}

	let mut failed = false;
	let mut combined = Vec::new();

	for (name, cmd, pol) in &pairs {
		info!("extracting {name}...");
		let cutscene = match Cutscene::extract(name, cmd, pol) {
			Ok(cutscene) => cutscene,
			Err(err) => {
				error!("failed to extract {name}: {err}");
				failed = true;
				continue;
			}
		};

		let frame_count: usize =
			cutscene.script().subscenes().iter().map(|s| s.frames.len()).sum();
		info!(
			"  {} shapes, {} palettes, {} frames",
			cutscene.shapes().len(),
			cutscene.palettes().len(),
			frame_count
		);

		if cli.combined {
			combined.push(cutscene);
		} else if let Err(err) = write_json(&cli, &cutscene) {
			error!("failed to write {name}: {err}");
			failed = true;
		}
	}

	if cli.combined {
		let document = serde_json::json!({ "cutscenes": combined });
		let path = cli.output.join("all_cutscenes.json");
		if let Err(err) = write_value(&cli, &path, &document) {
			error!("failed to write combined file: {err}");
			failed = true;
		} else {
			info!("written combined file: {}", path.display());
		}
	}

	if failed {
		ExitCode::FAILURE
	} else {
		ExitCode::SUCCESS
	}
}

/// Loads cutscene pairs from whichever source the command line selects.
fn load_pairs(cli: &Cli) -> Result<Vec<CutscenePair>, String> {
	match (&cli.archive, &cli.data_dir) {
		(Some(archive), None) => {
			if !archive.is_file() {
				return Err(format!("archive not found: {}", archive.display()));
			}
			info!("loading archive: {}", archive.display());
			let archive = AbaArchive::open(archive).map_err(|e| e.to_string())?;
			info!("{} entries in archive", archive.len());
			Ok(archive.cutscene_pairs())
		}
		(None, Some(dir)) => {
			if !dir.is_dir() {
				return Err(format!("directory not found: {}", dir.display()));
			}
			info!("loading cutscenes from directory: {}", dir.display());
			pairs_from_directory(dir).map_err(|e| e.to_string())
		}
		_ => Err("provide an archive path or use --dir for directory mode".to_string()),
	}
}

/// Finds CMD/POL file pairs in a directory, matching stems
/// case-insensitively on the extension.
fn pairs_from_directory(dir: &Path) -> Result<Vec<CutscenePair>, FbFileError> {
	let mut pairs = Vec::new();

	for entry in fs::read_dir(dir)? {
		let cmd_path = entry?.path();
		let is_cmd = cmd_path
			.extension()
			.is_some_and(|ext| ext.eq_ignore_ascii_case("cmd"));
		if !is_cmd || !cmd_path.is_file() {
			continue;
		}

		let Some(stem) = cmd_path.file_stem().and_then(|s| s.to_str()) else {
			continue;
		};

		let pol_path = ["POL", "pol"]
			.iter()
			.map(|ext| cmd_path.with_extension(ext))
			.find(|p| p.is_file());
		let Some(pol_path) = pol_path else {
			warn!("no POL file found for {}, skipping", cmd_path.display());
			continue;
		};

		pairs.push((stem.to_uppercase(), fs::read(&cmd_path)?, fs::read(&pol_path)?));
	}

	pairs.sort_by(|a, b| a.0.cmp(&b.0));
	Ok(pairs)
}

/// Keeps only the requested cutscene, if a filter was given.
fn filter_pairs(
	pairs: Vec<CutscenePair>,
	filter: Option<&str>,
) -> Result<Vec<CutscenePair>, String> {
	let Some(filter) = filter else {
		return Ok(pairs);
	};

	let wanted = filter.to_uppercase();
	let available: Vec<String> = pairs.iter().map(|p| p.0.clone()).collect();
	let filtered: Vec<CutscenePair> = pairs.into_iter().filter(|p| p.0 == wanted).collect();

	if filtered.is_empty() {
		return Err(format!(
			"cutscene '{wanted}' not found (available: {})",
			available.join(", ")
		));
	}
	Ok(filtered)
}

fn write_json(cli: &Cli, cutscene: &Cutscene) -> Result<(), Box<dyn std::error::Error>> {
	let path = cli.output.join(format!("{}.json", cutscene.name().to_lowercase()));
	let value = serde_json::to_value(cutscene)?;
	write_value(cli, &path, &value)?;
	info!("  written to: {}", path.display());
	Ok(())
}

fn write_value(
	cli: &Cli,
	path: &Path,
	value: &serde_json::Value,
) -> Result<(), Box<dyn std::error::Error>> {
	let text = if cli.pretty {
		serde_json::to_string_pretty(value)?
	} else {
		serde_json::to_string(value)?
	};
	fs::write(path, text)?;
	Ok(())
}
