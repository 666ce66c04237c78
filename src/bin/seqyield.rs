use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use seqyield::{N50Mode, ReportMode, ReportOpts};

/// seqyield CLI
#[derive(Parser)]
#[command(name = "seqyield")]
#[command(version)]
#[command(about = "Read N50, Gb and genome coverage from sequencing_summary files", long_about = None)]
struct Cli {
    /// Sequencing summary files (.txt or .txt.gz)
    #[arg(required = true)]
    files: Vec<PathBuf>,
    /// Sample name (default: derived from the file names)
    #[arg(short, long)]
    name: Option<String>,
    /// How multiple files are reported
    #[arg(long, value_enum, default_value_t = ReportMode::Aggregate)]
    mode: ReportMode,
    /// Report the read after the N50 read, as older reports did
    #[arg(long)]
    legacy_n50: bool,
    /// Add 200kb+ .. 1Mb+ coverage and the 1Mb+ read count
    #[arg(long)]
    extended: bool,
}

fn report_opts(cli: Cli) -> ReportOpts {
    ReportOpts {
        files: cli.files,
        name: cli.name,
        mode: cli.mode,
        n50_mode: if cli.legacy_n50 { N50Mode::Legacy } else { N50Mode::Standard },
        extended: cli.extended,
    }
}

fn main() -> anyhow::Result<()> {
    let started = Instant::now();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if std::env::args_os().len() <= 1 {
        Cli::command().print_help()?;
        return Ok(());
    }
    let opts = report_opts(Cli::parse());
    log::debug!("{} file(s), mode {}", opts.files.len(), opts.mode);

    let stdout = std::io::stdout();
    seqyield::run_report(&opts, stdout.lock()).context("failed to build yield report")?;

    eprintln!("\ntotal time for the program {:.3}", started.elapsed().as_secs_f64());
    Ok(())
}
