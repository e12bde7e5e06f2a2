mod frame_record;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process;

use clap::Parser;

use workplace_monitor_core::monitoring::monitor_config::MonitorConfig;
use workplace_monitor_core::monitoring::monitor_frame_use_case::MonitorFrameUseCase;
use workplace_monitor_core::tracking::infrastructure::iou_tracker::MatchStrategy;

use frame_record::FrameRecord;

/// Replays recorded person detections through the workplace monitor.
#[derive(Parser)]
#[command(name = "workplace-monitor")]
struct Cli {
    /// Detection stream, one JSON frame per line ("-" for stdin).
    input: PathBuf,

    /// JSON config file (defaults apply to anything it omits).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for the alert log.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Minimum IoU for a detection to continue a track (0.0-1.0).
    #[arg(long)]
    iou_threshold: Option<f64>,

    /// Frames a track may go unmatched before it is dropped.
    #[arg(long)]
    max_missing: Option<usize>,

    /// Use optimal (global) track assignment instead of greedy matching.
    #[arg(long)]
    optimal_matching: bool,

    /// Ignore detections below this confidence (0.0-1.0).
    #[arg(long, default_value = "0.5")]
    min_confidence: f64,

    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    print_config: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let config = build_config(&cli)?;
    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let reader = open_input(&cli)?;
    let mut use_case = MonitorFrameUseCase::from_config(&config)?;

    let mut last_frame: Option<FrameRecord> = None;
    let mut frames = 0usize;
    let mut raised = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let mut record = match FrameRecord::parse(&line) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Line {}: unreadable frame ({e}); treating as empty", index + 1);
                match &last_frame {
                    Some(previous) => previous.without_detections(),
                    None => continue,
                }
            }
        };
        record.retain_confident(cli.min_confidence);

        let report = use_case.process_frame(record.frame_size(), &record.detections, record.timestamp)?;
        frames += 1;
        raised += report.alerts.len();
        if report.enqueued < report.alerts.len() {
            log::debug!(
                "Frame {frames}: {} of {} alerts dropped",
                report.alerts.len() - report.enqueued,
                report.alerts.len()
            );
        }
        last_frame = Some(record);
    }

    let stats = use_case.shutdown()?;
    log::info!("Processed {frames} frames, {raised} alerts raised");
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

fn build_config(cli: &Cli) -> Result<MonitorConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => MonitorConfig::load(path)?,
        None => MonitorConfig::default(),
    };

    if let Some(dir) = &cli.log_dir {
        config.alerts.log_dir = dir.clone();
    }
    if let Some(threshold) = cli.iou_threshold {
        config.tracker.iou_threshold = threshold;
    }
    if let Some(max_missing) = cli.max_missing {
        config.tracker.max_missing = max_missing;
    }
    if cli.optimal_matching {
        config.tracker.strategy = MatchStrategy::Optimal;
    }
    Ok(config)
}

fn open_input(cli: &Cli) -> Result<Box<dyn BufRead>, Box<dyn std::error::Error>> {
    if cli.input.as_os_str() == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(&cli.input)
        .map_err(|e| format!("Cannot open {}: {e}", cli.input.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.input.as_os_str() != "-" && !cli.print_config && !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if let Some(threshold) = cli.iou_threshold {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(format!("IoU threshold must be between 0.0 and 1.0, got {threshold}").into());
        }
    }
    if !(0.0..=1.0).contains(&cli.min_confidence) {
        return Err(format!(
            "Minimum confidence must be between 0.0 and 1.0, got {}",
            cli.min_confidence
        )
        .into());
    }
    Ok(())
}
