mod error;
mod menu;
mod model;
mod progress;
mod render;
mod scan;
mod splice;
mod util;

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::HumanBytes;
use progress::{format_duration, ProgressConfig, ProgressMode, ProgressOutcome, ProgressReporter};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "channels",
    version,
    about = "Scan a media folder and regenerate the channel screens of the player menu \
             (the region between `// CHANNELS BEGIN` and `// CHANNELS END`)"
)]
struct Cli {
    /// Folder whose sub-directories become channels
    input_dir: PathBuf,

    /// Menu script updated in place between the channel markers
    output_file: PathBuf,

    /// Progress display mode: auto (TTY-aware), rich, plain, quiet.
    #[arg(long, value_enum, default_value_t = ProgressMode::Auto)]
    progress: ProgressMode,

    /// Build the menu but leave the output file untouched; print the generated block instead.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Also print the built menu as JSON on stdout.
    #[arg(long, default_value_t = false)]
    json: bool,
}

struct RunSummary {
    input_dir: PathBuf,
    output_file: PathBuf,
    classified: usize,
    ignored: usize,
    stats: menu::MenuStats,
    host_bytes: u64,
    changed: bool,
    dry_run: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !cli.input_dir.is_dir() {
        bail!(
            "input_dir must be a directory: {}",
            cli.input_dir.display()
        );
    }

    let mut progress = ProgressReporter::new("channels", ProgressConfig::new(cli.progress));

    progress.set_stage("scan");
    let scanned = scan::scan(&cli.input_dir)
        .with_context(|| format!("Error scanning files in {}", cli.input_dir.display()))?;
    progress.inc(scanned.files_seen as u64);
    for warning in &scanned.warnings {
        progress.warn(warning.as_str());
    }

    progress.set_stage("build");
    let menu = menu::build(&scanned.grouping);
    let stats = menu::stats(&scanned.grouping);
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&menu).context("Error serializing menu")?
        );
    }

    progress.set_stage("splice");
    let host = util::read_text(&cli.output_file).context("Error reading output file")?;
    let updated = splice::splice(&host, &menu)
        .with_context(|| format!("Error updating {}", cli.output_file.display()))?;
    let changed = updated != host;

    if cli.dry_run {
        print!("{}", render::render_menu(&menu));
    } else if changed {
        progress.set_stage("write");
        util::write_atomic(&cli.output_file, &updated).context("Error writing output file")?;
        progress.log(format!("Updated {} with new menu", cli.output_file.display()));
    } else {
        progress.log(format!("{} already up to date", cli.output_file.display()));
    }

    let outcome = progress.finish(if cli.dry_run {
        "dry run complete"
    } else {
        "menu complete"
    });

    print_summary(
        &RunSummary {
            input_dir: cli.input_dir,
            output_file: cli.output_file,
            classified: scanned.classified,
            ignored: scanned.ignored,
            stats,
            host_bytes: updated.len() as u64,
            changed,
            dry_run: cli.dry_run,
        },
        &outcome,
    );

    Ok(())
}

fn print_summary(summary: &RunSummary, outcome: &ProgressOutcome) {
    println!(
        "Channels summary: input={} output={} duration={} files={} classified={} ignored={} categories={} items={} skipped={} host={} changed={} dry_run={} warnings={}",
        summary.input_dir.display(),
        summary.output_file.display(),
        format_duration(outcome.elapsed),
        outcome.files,
        summary.classified,
        summary.ignored,
        summary.stats.categories,
        summary.stats.items,
        summary.stats.skipped,
        HumanBytes(summary.host_bytes),
        summary.changed,
        summary.dry_run,
        outcome.warning_count,
    );
    for warning in &outcome.warnings {
        println!("  warning: {}", warning);
    }
}
