//! Command-line driver: forcing table in, per-frame draw instructions out.
//!
//! Emits one JSON object per frame on stdout (or a file), ready to be
//! replayed into a plotting or video-encoding back-end.

use clap::{Parser, ValueEnum};
use gwp_pulse::config::PipelineConfig;
use gwp_pulse::errors::GwpResult;
use gwp_pulse::frames::FrameMapping;
use gwp_pulse::pipeline::Pipeline;
use gwp_pulse::render::JsonLinesAdapter;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum MappingKind {
    /// Linear rescale of the frame range onto simulation time.
    Linear,
    /// One decade of simulation time per 100 frames.
    Log,
}

#[derive(Debug, Parser)]
#[command(name = "gwp-pulse", version, about)]
struct Cli {
    /// CSV forcing table: one time column plus one column per substance.
    input: PathBuf,

    /// Optional TOML configuration overriding the built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the instruction stream; stdout if omitted.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Frame-to-time mapping.
    #[arg(long, value_enum, default_value_t = MappingKind::Linear)]
    mapping: MappingKind,

    /// Override the configured number of frames.
    #[arg(long)]
    frames: Option<u32>,
}

fn run(cli: Cli) -> GwpResult<()> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_path(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(frames) = cli.frames {
        config.frame_max = frames;
    }

    let pipeline = Pipeline::from_path(&cli.input, config)?;

    let writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    };
    let mut adapter = JsonLinesAdapter::new(writer);

    match cli.mapping {
        MappingKind::Linear => {
            let mapping = pipeline.linear_mapping()?;
            log::info!("replaying {} frames (linear mapping)", mapping.frame_max());
            pipeline.play(&mapping, &mut adapter)?;
        }
        MappingKind::Log => {
            let mapping = pipeline.log_mapping()?;
            log::info!("replaying {} frames (log mapping)", mapping.frame_max());
            pipeline.play(&mapping, &mut adapter)?;
        }
    }

    adapter.into_inner().flush()?;
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(error) = run(Cli::parse()) {
        eprintln!("error: {}", error);
        std::process::exit(1);
    }
}
