//! ecg-rhythm command line entry point.
//!
//! ```bash
//! # Process one subject into Person-1-{Normal,Tachycardia,Bradycardia}.txt
//! ecg-rhythm process --name Person-1 --input person1.txt
//!
//! # Full two-subject run including the merged reports
//! ecg-rhythm run --first-name Person-1 --first-input person1.txt \
//!     --second-name Person-2 --second-input person2.txt --out-dir results
//! ```

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context};
use clap::{Args, Parser, Subcommand};
use log::info;

use ecg_rhythm::analysis::rhythm::RhythmCategory;
use ecg_rhythm::pipeline::{merge_category, FileOutcome, RhythmPipeline};
use ecg_rhythm::report::merged_report_name;
use ecg_rhythm::signal::SyntheticEcg;
use ecg_rhythm::DetectionConfig;

/// ECG peak detection and heart-rate rhythm reports
#[derive(Parser, Debug)]
#[command(name = "ecg-rhythm")]
#[command(author, version, about = "ECG peak detection and heart-rate rhythm reports")]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    thresholds: ThresholdArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Threshold configuration shared by all commands
#[derive(Args, Debug)]
struct ThresholdArgs {
    /// JSON file with `peak_threshold`, `slow_interval` and `fast_interval`
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Minimum peak amplitude (exclusive)
    #[arg(long, global = true)]
    peak_threshold: Option<f64>,

    /// Intervals longer than this many seconds are bradycardia
    #[arg(long, global = true)]
    slow_interval: Option<f64>,

    /// Intervals shorter than this many seconds are tachycardia
    #[arg(long, global = true)]
    fast_interval: Option<f64>,
}

impl ThresholdArgs {
    fn resolve(&self) -> anyhow::Result<DetectionConfig> {
        let mut config = match &self.config {
            Some(path) => DetectionConfig::from_json_file(path)
                .with_context(|| format!("loading configuration {}", path.display()))?,
            None => DetectionConfig::default(),
        };
        if let Some(value) = self.peak_threshold {
            config.peak_threshold = value;
        }
        if let Some(value) = self.slow_interval {
            config.slow_interval = value;
        }
        if let Some(value) = self.fast_interval {
            config.fast_interval = value;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Detect, classify and write the three reports of one subject
    Process {
        /// Subject name used in report file names
        #[arg(long)]
        name: String,
        /// Signal file of `<time> <amplitude>` pairs
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Merge two subjects' existing reports of one category
    Merge {
        /// Normal, Tachycardia or Bradycardia
        #[arg(long, value_parser = parse_category)]
        category: RhythmCategory,
        #[arg(long)]
        first: String,
        #[arg(long)]
        second: String,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Process two subjects and write all per-subject and merged reports
    Run {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        first_input: PathBuf,
        #[arg(long)]
        second_name: String,
        #[arg(long)]
        second_input: PathBuf,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Write a synthetic signal with the given beat intervals
    Synth {
        #[arg(long)]
        output: PathBuf,
        /// RR intervals in seconds
        #[arg(long, num_args = 1.., required = true)]
        rr: Vec<f64>,
        #[arg(long, default_value_t = 250.0)]
        sample_rate: f64,
        /// Maximum RR perturbation in seconds
        #[arg(long, default_value_t = 0.0)]
        jitter: f64,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn parse_category(name: &str) -> Result<RhythmCategory, String> {
    RhythmCategory::from_name(name)
        .ok_or_else(|| format!("unknown category {name:?}, expected Normal, Tachycardia or Bradycardia"))
}

fn ensure_dir(dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))
}

fn check_outcomes<'a>(outcomes: impl IntoIterator<Item = &'a FileOutcome>) -> anyhow::Result<()> {
    let failed = outcomes.into_iter().filter(|o| !o.is_ok()).count();
    if failed > 0 {
        bail!("{failed} report file operation(s) failed");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            name,
            input,
            out_dir,
        } => {
            let pipeline = RhythmPipeline::from_config(&cli.thresholds.resolve()?)?;
            ensure_dir(&out_dir)?;
            let outcome = pipeline
                .process_subject(&name, &input, &out_dir)
                .with_context(|| format!("processing {name}"))?;
            check_outcomes(&outcome.files)?;
        }
        Commands::Merge {
            category,
            first,
            second,
            out_dir,
        } => {
            let outcome = merge_category(category, &first, &second, &out_dir);
            outcome.result.with_context(|| {
                format!(
                    "writing {}",
                    merged_report_name(category, &first, &second)
                )
            })?;
        }
        Commands::Run {
            first_name,
            first_input,
            second_name,
            second_input,
            out_dir,
        } => {
            let pipeline = RhythmPipeline::from_config(&cli.thresholds.resolve()?)?;
            ensure_dir(&out_dir)?;
            let outcome = pipeline.process_pair(
                (first_name.as_str(), first_input.as_path()),
                (second_name.as_str(), second_input.as_path()),
                &out_dir,
            )?;
            if !outcome.is_ok() {
                return Err(anyhow!("processing finished with errors, see log"));
            }
            println!("Processing completed!");
        }
        Commands::Synth {
            output,
            rr,
            sample_rate,
            jitter,
            seed,
        } => {
            let generator = SyntheticEcg {
                sample_rate,
                jitter,
                seed,
                ..Default::default()
            };
            let store = generator.generate(&rr)?;
            let lines = store
                .samples()
                .iter()
                .map(|s| format!("{} {}", s.time, s.amplitude))
                .collect::<Vec<_>>();
            ecg_rhythm::report::write_report(&output, &lines)?;
            info!("wrote {} samples to {}", store.len(), output.display());
        }
    }

    Ok(())
}
