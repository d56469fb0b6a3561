use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use motif_strip::logging::{FileSink, LogSink, NullSink, StderrSink, TeeSink};
use motif_strip::{LogLevel, Logger, Pipeline, RenderConfig, Result};

/// Log files are truncated once they would grow past this size.
const LOG_FILE_MAX_BYTES: u64 = 1 << 20;

#[derive(Parser, Debug)]
#[command(name = "motif-strip")]
#[command(about = "Render a motif sequence as a colour/pattern strip with a legend")]
#[command(version)]
struct Cli {
    /// Motif file, one token per line
    input: PathBuf,

    /// Output PNG (defaults to human-encoding.png)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file overriding stripeWidth, stripeHeight, margin, gap, bigGap, fontWidth, fontSize
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// TrueType font for legend labels
    #[arg(long)]
    font: Option<PathBuf>,

    /// Print the mapping and geometry as JSON instead of drawing
    #[arg(long)]
    plan: bool,

    /// Append JSON log lines to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log pipeline stages to stderr
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.report());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => RenderConfig::from_json_file(path)?,
        None => RenderConfig::default(),
    };
    if let Some(output) = cli.output.clone() {
        config.output = output;
    }
    if let Some(font) = cli.font.clone() {
        config.font_path = Some(font);
    }

    let logger = build_logger(&cli)?;
    let pipeline = Pipeline::new(config, logger)?;

    if cli.plan {
        let plan = pipeline.plan(&cli.input)?;
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    pipeline.run(&cli.input)?;
    Ok(())
}

fn build_logger(cli: &Cli) -> Result<Logger> {
    let stderr: Box<dyn LogSink> = if cli.quiet {
        Box::new(NullSink)
    } else if cli.verbose {
        Box::new(StderrSink::new(LogLevel::Debug))
    } else {
        Box::new(StderrSink::new(LogLevel::Warn))
    };

    let mut tee = TeeSink::new().with_boxed(stderr);
    if let Some(path) = &cli.log_file {
        tee = tee.with_sink(FileSink::new(path, LOG_FILE_MAX_BYTES)?);
    }
    Ok(Logger::new(tee))
}
