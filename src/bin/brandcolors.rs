use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use brand_colors_wasm::{ALGORITHMS, Algorithm, Analysis, AnalysisOptions, analyze_bytes_with_rng};
use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// One line per color plus the theme picks
    Text,
    Json,
    /// AppStream `<branding>` snippet
    Xml,
}

/// Suggest accessible brand colors for an app icon or logo.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Extraction algorithm (vibrant, palette, dominant, mediancut, kmeans, histogram)
    #[arg(short, long, default_value = "vibrant")]
    algorithm: Algorithm,

    /// Run every algorithm instead of just one
    #[arg(long, conflicts_with = "algorithm")]
    all: bool,

    /// Maximum number of brand colors
    #[arg(short = 'n', long, default_value_t = 6)]
    count: usize,

    /// Upper bound on sampled pixels
    #[arg(short, long, default_value_t = 10_000)]
    sample_size: usize,

    /// Seed for k-means initialisation (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

fn print_text(input: &Path, analysis: &Analysis) {
    let info = analysis.algorithm.info();
    println!("{} [{}] {} sampled pixels", input.display(), info.name, analysis.sampled);
    if analysis.colors.is_empty() {
        println!("  no brand colors found");
        return;
    }
    for color in &analysis.colors {
        println!("  {color}  x{}", color.weight());
    }
    if analysis.fallback {
        println!("  (no legible pair found, ranked by saturation)");
    }
    if let Some(themes) = &analysis.themes {
        for (label, theme) in [("light", &themes.light), ("dark", &themes.dark)] {
            println!(
                "  {label:5} {} on {}  {:.2}:1 AA={}",
                theme.foreground,
                theme.background,
                theme.contrast_ratio,
                theme.rating.aa().normal
            );
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "brandcolors=warn,brand_colors_wasm=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let args = Args::parse();

    let algorithms: Vec<Algorithm> = if args.all {
        ALGORITHMS.iter().map(|info| info.id).collect()
    } else {
        vec![args.algorithm]
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut results = Vec::new();
    for input in &args.inputs {
        let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
        for &algorithm in &algorithms {
            let options = AnalysisOptions {
                algorithm,
                count: args.count,
                sample_size: args.sample_size,
            };
            let analysis = analyze_bytes_with_rng(&bytes, &options, &mut rng)
                .with_context(|| format!("analyzing {}", input.display()))?;
            tracing::info!(input = %input.display(), %algorithm, colors = analysis.colors.len(), "analyzed");

            match args.format {
                Format::Text => print_text(input, &analysis),
                Format::Xml => match &analysis.themes {
                    Some(themes) => println!("{}", themes.appstream_xml()),
                    None => eprintln!("{}: no brand colors found", input.display()),
                },
                Format::Json => results.push(serde_json::json!({
                    "input": input.display().to_string(),
                    "analysis": analysis,
                })),
            }
        }
    }

    if let Format::Json = args.format {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    Ok(())
}
