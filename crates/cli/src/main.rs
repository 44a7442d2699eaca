use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use gitown_codeowners::{reconcile, Manifest};
use gitown_ownership::{tracked_files, AliasTable, GitBlame, OwnershipCalculator};

const DEFAULT_CODEOWNERS_FILE: &str = "CODEOWNERS";
const DEFAULT_OWNERSHIP_THRESHOLD: f64 = 25.0;
const ALIAS_CONFIG_FILE: &str = ".gitownrc";

#[derive(Parser)]
#[command(name = "gitown")]
#[command(about = "Keep a CODEOWNERS file in sync with git blame line ownership", long_about = None)]
#[command(version)]
struct Cli {
    /// Files to evaluate (defaults to every tracked file)
    filenames: Vec<String>,

    /// Line-ownership percentage an owner must strictly exceed to qualify
    #[arg(long, default_value_t = DEFAULT_OWNERSHIP_THRESHOLD)]
    ownership_threshold: f64,

    /// CODEOWNERS file to read and rewrite
    #[arg(long, default_value = DEFAULT_CODEOWNERS_FILE)]
    codeowners_filename: PathBuf,

    /// Increase diagnostic output (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Fail after a normal run to exercise the failure path
    #[arg(short, long)]
    debug: bool,
}

enum Outcome {
    Unchanged,
    Changed,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match cli.verbose {
        0 => {}
        1 => {
            builder.filter_level(log::LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(log::LevelFilter::Trace);
        }
    }
    builder.target(env_logger::Target::Stderr).init();

    match run(&cli) {
        Ok(Outcome::Unchanged) => ExitCode::SUCCESS,
        Ok(Outcome::Changed) => ExitCode::from(1),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<Outcome> {
    let aliases = AliasTable::load(ALIAS_CONFIG_FILE)
        .context("A .gitownrc file mapping committer emails to owner names is required")?;

    let original = Manifest::read(&cli.codeowners_filename)
        .with_context(|| format!("Failed to read {}", cli.codeowners_filename.display()))?;
    log::trace!("original entries: {original:?}");

    let files = if cli.filenames.is_empty() {
        log::warn!("No filenames provided, evaluating every tracked file");
        tracked_files(".")?
    } else {
        cli.filenames.clone()
    };
    log::debug!("files: {files:?}");

    let mut calculator =
        OwnershipCalculator::new(GitBlame::new("."), aliases, cli.ownership_threshold);

    let mut fresh = Manifest::new();
    for file in &files {
        let owners = calculator.owners_for(file)?;
        log::trace!("{file} owners: {owners:?}");
        // Files where nobody meets the threshold stay out of the manifest.
        if !owners.is_empty() {
            fresh.set(file.as_str(), owners);
        }
    }
    log::debug!("computed ownership for {} of {} files", fresh.len(), files.len());

    let merged = reconcile(&original, &fresh);
    log::trace!("updated entries: {:?}", merged.updated);
    for entry in merged.updated.iter() {
        if merged.optimized.get(&entry.pattern) != Some(entry.owners.as_slice()) {
            log::debug!("optimized out: {} {:?}", entry.pattern, entry.owners);
        }
    }

    let outcome = if merged.changed {
        merged
            .optimized
            .write(&cli.codeowners_filename)
            .with_context(|| format!("Failed to write {}", cli.codeowners_filename.display()))?;
        for entry in merged.optimized.iter() {
            if original.get(&entry.pattern) != Some(entry.owners.as_slice()) {
                log::debug!("difference: {} {:?}", entry.pattern, entry.owners);
            }
        }
        log::info!("Rewrote {}", cli.codeowners_filename.display());
        Outcome::Changed
    } else {
        log::debug!("{} is already up to date", cli.codeowners_filename.display());
        Outcome::Unchanged
    };

    if cli.debug {
        // Operator-requested failure, distinct from real faults.
        anyhow::bail!("--debug forced a failure after a successful run");
    }

    Ok(outcome)
}
