use std::{fs, path::PathBuf, sync::Arc};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use scrollgauge::{
    AnalysisOptions, ComparisonResult, ImageSequenceSource, ProgressCallback, ProgressInfo,
    RatingThresholds, Report, analyze, compare,
};

const CLI_AFTER_HELP: &str = "Examples:\n  scrollgauge analyze session_output --fps 8 --json\n  scrollgauge analyze frames/ --frame-skip 2 --out report.json --progress\n  scrollgauge compare before/ after/ --fps 8\n  scrollgauge completions zsh > _scrollgauge";

#[derive(Debug, Parser)]
#[command(
    name = "scrollgauge",
    version,
    about = "Measure scrolling smoothness from captured frame sequences",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Parser, Clone, Default)]
struct GlobalOptions {
    /// Show additional output.
    #[arg(long)]
    verbose: bool,

    /// Show a progress bar while sampling frames.
    #[arg(long)]
    progress: bool,

    /// Allow overwriting existing output files.
    #[arg(long)]
    overwrite: bool,
}

#[derive(Debug, Parser, Clone)]
struct SamplingOptions {
    /// Capture rate of the frame sequence, used to synthesize timestamps.
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Retain every Nth frame.
    #[arg(long, default_value_t = 5)]
    frame_skip: u32,

    /// Hard cap on retained samples.
    #[arg(long, default_value_t = 2000)]
    max_samples: usize,

    /// Motion-estimation block edge length in pixels.
    #[arg(long, default_value_t = 32)]
    block_size: u32,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Analyze one recording's frame directory.
    #[command(
        about = "Analyze a frame sequence",
        after_help = "Examples:\n  scrollgauge analyze session_output --fps 8\n  scrollgauge analyze frames/ --json --out report.json"
    )]
    Analyze {
        /// Directory of numbered frame images (frame_0.png, frame_1.png, ...).
        frames: PathBuf,

        #[command(flatten)]
        sampling: SamplingOptions,

        /// Print the report as machine-readable JSON.
        #[arg(long)]
        json: bool,

        /// Also write the JSON report to this file.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Analyze two recordings and declare per-metric and overall winners.
    #[command(
        about = "Compare two frame sequences",
        after_help = "Examples:\n  scrollgauge compare before/ after/ --fps 8\n  scrollgauge compare a/ b/ --json --out comparison.json"
    )]
    Compare {
        /// Frame directory of the first recording.
        first: PathBuf,
        /// Frame directory of the second recording.
        second: PathBuf,

        #[command(flatten)]
        sampling: SamplingOptions,

        /// Print the comparison as machine-readable JSON.
        #[arg(long)]
        json: bool,

        /// Also write the JSON comparison to this file.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

/// Progress bar bridge: relays the library's sample-level progress
/// notifications onto an indicatif bar.
struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    fn new(sample_cap: u64) -> Self {
        let bar = ProgressBar::new(sample_cap);
        bar.set_style(
            ProgressStyle::with_template("{spinner} {pos}/{len} samples {wide_bar} {elapsed}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Self { bar }
    }
}

impl ProgressCallback for BarProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        self.bar.set_position(info.samples);
    }
}

fn build_options(
    sampling: &SamplingOptions,
    global: &GlobalOptions,
) -> Result<AnalysisOptions, Box<dyn std::error::Error>> {
    let mut options = AnalysisOptions::new()
        .with_frame_skip(sampling.frame_skip)
        .with_max_samples(sampling.max_samples)
        .with_block_size(sampling.block_size)
        .with_thresholds(RatingThresholds::default());

    if global.progress {
        options = options
            .with_progress(Arc::new(BarProgress::new(sampling.max_samples as u64)))
            .with_batch_size(10);
    }

    options.validate()?;
    Ok(options)
}

fn write_output(
    path: &PathBuf,
    payload: &str,
    overwrite: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() && !overwrite {
        return Err(format!(
            "output file already exists: {} (use --overwrite)",
            path.display()
        )
        .into());
    }
    fs::write(path, payload)?;
    println!(
        "{} {}",
        "saved".green().bold(),
        path.display(),
    );
    Ok(())
}

fn print_report(
    report: &Report,
    json: bool,
    out: Option<&PathBuf>,
    global: &GlobalOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let payload = serde_json::to_string_pretty(report)?;

    if json {
        println!("{payload}");
    } else {
        print!("{report}");
        if report.insufficient_data {
            eprintln!(
                "{} {}",
                "warning:".yellow().bold(),
                "not enough usable samples for statistics".yellow(),
            );
        }
    }

    if let Some(path) = out {
        write_output(path, &payload, global.overwrite)?;
    }

    Ok(())
}

fn print_comparison(
    result: &ComparisonResult,
    json: bool,
    out: Option<&PathBuf>,
    global: &GlobalOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let payload = serde_json::to_string_pretty(result)?;

    if json {
        println!("{payload}");
    } else {
        print!("{result}");
        if global.verbose {
            print!("{}", result.first);
            print!("{}", result.second);
        }
    }

    if let Some(path) = out {
        write_output(path, &payload, global.overwrite)?;
    }

    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            frames,
            sampling,
            json,
            out,
        } => {
            let options = build_options(&sampling, &cli.global)?;
            let source = ImageSequenceSource::open(&frames, sampling.fps)?;

            if cli.global.verbose {
                eprintln!(
                    "{} {} ({} frames on disk)",
                    "analyzing".cyan().bold(),
                    frames.display(),
                    source.frame_count(),
                );
            }

            let report = analyze(source, &options)?;
            print_report(&report, json, out.as_ref(), &cli.global)?;
        }
        Commands::Compare {
            first,
            second,
            sampling,
            json,
            out,
        } => {
            let options = build_options(&sampling, &cli.global)?;
            let first_source = ImageSequenceSource::open(&first, sampling.fps)?;
            let second_source = ImageSequenceSource::open(&second, sampling.fps)?;

            if cli.global.verbose {
                eprintln!(
                    "{} {} vs {}",
                    "comparing".cyan().bold(),
                    first.display(),
                    second.display(),
                );
            }

            let result = compare(first_source, second_source, &options)?;
            print_comparison(&result, json, out.as_ref(), &cli.global)?;
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "scrollgauge", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
