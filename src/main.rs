use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use sta_engine::config::AnalysisConfig;
use sta_engine::run_analysis;

/// Static timing analysis for a synthesized gate-level netlist.
#[derive(Debug, Parser)]
#[clap(name = "sta-engine", about = "Static timing analysis for synthesized gate-level netlists")]
struct RunArgs {
    /// Synthesis-tool JSON netlist
    netlist: PathBuf,

    /// Increase diagnostic verbosity (-v for debug, -vv for trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Rayon worker-pool size for this analysis run (default: 16)
    #[clap(long)]
    workers: Option<usize>,

    /// Write the human-readable report to this file instead of stdout
    #[clap(long)]
    report: Option<PathBuf>,

    /// Override the clock period, in picoseconds
    #[clap(long)]
    clock_period: Option<f64>,

    /// Override the setup time, in picoseconds
    #[clap(long)]
    setup_time: Option<f64>,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let args = RunArgs::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: RunArgs) -> anyhow::Result<()> {
    let mut config = AnalysisConfig::default();
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if let Some(clock_period) = args.clock_period {
        config.clock_period_ps = clock_period;
    }
    if let Some(setup_time) = args.setup_time {
        config.setup_time_ps = setup_time;
    }

    let json_text = fs::read_to_string(&args.netlist)
        .with_context(|| format!("reading netlist {}", args.netlist.display()))?;

    let (netlist, report) = run_analysis(&json_text, &config)?;

    let table = report.format_table(&netlist);
    match args.report {
        Some(path) => {
            let mut file = fs::File::create(&path)
                .with_context(|| format!("creating report file {}", path.display()))?;
            table.print(&mut file)?;
        }
        None => {
            table.printstd();
        }
    }

    if let Some(worst) = report.worst_slack() {
        tracing::info!(worst_slack_ps = worst, violations = report.violations().len(), "analysis complete");
    }

    Ok(())
}
