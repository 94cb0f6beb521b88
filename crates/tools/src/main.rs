use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use env_logger::{Builder, Env};
use levelgen::{LevelGenerator, RoomTemplate, seeded_rng};
use levelgen_tools::config_file::{GeneratorFile, load_template};
use levelgen_tools::render::{AsciiSink, JsonSink, SummarySink};
use levelgen_tools::seed::{SeedChoice, generate_runtime_seed, resolve_seed};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Ascii,
    Json,
    Summary,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file with generator settings
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// JSON room template; defaults to a solid 7x7 room
    #[arg(short, long)]
    template: Option<PathBuf>,
    /// Run seed; 0 or absent picks one at runtime
    #[arg(short, long)]
    seed: Option<u64>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Ascii)]
    format: OutputFormat,
    /// Write here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Save the effective settings (with the resolved seed) as TOML
    #[arg(long)]
    save_config: Option<PathBuf>,
}

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut file = match &args.config {
        Some(path) => GeneratorFile::load(path)?,
        None => GeneratorFile::default(),
    };
    let template = match &args.template {
        Some(path) => load_template(path)?,
        None => RoomTemplate::default(),
    };

    let seed = resolve_seed(args.seed.or(file.seed), generate_runtime_seed());
    if let SeedChoice::Generated(value) = seed {
        log::info!("using generated seed {value}");
    }

    if let Some(path) = &args.save_config {
        file.seed = Some(seed.value());
        file.write_atomic(path)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    }

    let generator = LevelGenerator::new(file.generation, template)
        .context("Generator settings were rejected")?;
    let out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let mut rng = seeded_rng(seed.value());
    let written = match args.format {
        OutputFormat::Ascii => generator.generate_into(&mut rng, &mut AsciiSink::new(out)),
        OutputFormat::Json => generator.generate_into(&mut rng, &mut JsonSink::new(out)),
        OutputFormat::Summary => generator.generate_into(&mut rng, &mut SummarySink::new(out)),
    };
    written.context("Failed to write the generated level")?;

    log::info!("Seed: {}", seed.value());
    Ok(())
}
