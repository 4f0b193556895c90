//! spectral-blur CLI - batch image filters and colour statistics
//!
//! Loads every image of a directory and blurs, greys, inverts or
//! summarizes them.

mod actions;
mod collection;
mod error;
mod logging;
mod metadata;
mod report;

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, ColorChoice, Parser, Subcommand};
use colored::Colorize;
use spectral_blur_core::histogram::DEFAULT_TOP_COLORS;
use spectral_blur_core::{BlurOptions, DEFAULT_RADIUS};
use tracing::info;

use crate::actions::Filter;
use crate::collection::{ImageCollection, SortKey, DEFAULT_EXTENSIONS};
use crate::error::CliError;
use crate::metadata::ImageMetadata;

/// Batch image filters: FFT Gaussian blur, greyscale, invert, colour histogram
///
/// Every command works on the images found in --dir. Use `list` to see the
/// 1-based indices accepted by --index and --skip.
#[derive(Parser, Debug)]
#[command(name = "spectral-blur")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    List the images in ./img:
        spectral-blur list

    Blur every image in photos/ with a wider kernel:
        spectral-blur --dir photos blur --radius 8

    Invert only the second image, writing into out/:
        spectral-blur --index 2 --output-dir out invert

    Most common colours as JSON:
        spectral-blur histogram --top 5 --json

EXIT CODES:
    0 - Success
    2 - Error (no images, bad index, I/O failure, etc.)")]
struct Cli {
    /// Directory to load images from
    #[arg(long, default_value = "img", value_name = "DIR", global = true)]
    dir: PathBuf,

    /// File extensions to include (comma-separated, case-insensitive)
    #[arg(
        long,
        default_value = DEFAULT_EXTENSIONS,
        value_delimiter = ',',
        global = true
    )]
    extensions: Vec<String>,

    /// Order of the collection
    #[arg(long, value_enum, default_value = "name", global = true)]
    sort: SortKey,

    /// Drop images from the collection by 1-based index (after sorting)
    #[arg(long, value_name = "INDEX", value_delimiter = ',', global = true)]
    skip: Vec<usize>,

    /// Act on a single image, by 1-based index (after --skip)
    #[arg(long, value_name = "INDEX", global = true)]
    index: Option<usize>,

    /// Where output files go (default: the input directory)
    #[arg(long, value_name = "DIR", global = true)]
    output_dir: Option<PathBuf>,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    color: ColorChoice,

    /// Continue with the remaining images when one fails
    #[arg(long, global = true)]
    keep_going: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the loaded images with their indices and sizes
    List,

    /// Show file and pixel metadata
    Info {
        /// Output JSON
        #[arg(long)]
        json: bool,

        /// Also write the metadata to <output-dir>/metadata.txt
        #[arg(long)]
        save: bool,
    },

    /// Most common exact colours over the selected images
    Histogram {
        /// Number of colours to report
        #[arg(long, default_value_t = DEFAULT_TOP_COLORS, value_name = "N")]
        top: usize,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Gaussian blur, written as <name>_blurred.<ext>
    Blur {
        /// Gaussian radius (standard deviation, in pixels)
        #[arg(long, short, default_value_t = DEFAULT_RADIUS, value_name = "RADIUS")]
        radius: f64,
    },

    /// Average-of-channels greyscale, written as <name>_grey.<ext>
    Grayscale,

    /// Colour negative, written as <name>_inverted.<ext>
    Invert,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_colors(&cli);

    if let Err(e) = logging::init_tracing(cli.verbose, cli.quiet) {
        eprintln!("{}: {}", "error".red().bold(), e);
        return ExitCode::from(2);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn setup_colors(cli: &Cli) {
    match cli.color {
        ColorChoice::Always => colored::control::set_override(true),
        ColorChoice::Never => colored::control::set_override(false),
        ColorChoice::Auto => {
            if !io::stdout().is_terminal() {
                colored::control::set_override(false);
            }
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let collection = open_collection(cli)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Command::List => report::print_list(&mut out, &collection),
        Command::Info { json, save } => {
            let entries: Vec<ImageMetadata> = collection.iter().map(ImageMetadata::of).collect();
            if *json {
                serde_json::to_writer_pretty(&mut out, &entries)?;
                writeln!(out).map_err(|e| CliError::io("failed to write output", e))?;
            } else {
                write!(out, "{}", metadata::render_all(&entries))
                    .map_err(|e| CliError::io("failed to write output", e))?;
            }
            if *save {
                let dir = output_dir(cli)?;
                let path = metadata::save(&entries, &dir)?;
                if !*json {
                    eprintln!("Metadata saved to: {}", path.display());
                }
            }
            Ok(())
        }
        Command::Histogram { top, json } => {
            let histogram = collection.histogram();
            let total = histogram.total();
            let ranked = histogram.top(*top);
            if *json {
                let doc = report::JsonHistogram::new(
                    collection.len(),
                    total,
                    histogram.distinct(),
                    &ranked,
                );
                serde_json::to_writer_pretty(&mut out, &doc)?;
                writeln!(out).map_err(|e| CliError::io("failed to write output", e))?;
                Ok(())
            } else {
                report::print_histogram(&mut out, &ranked, total)
            }
        }
        Command::Blur { radius } => {
            let options = BlurOptions::new().with_radius(*radius);
            // Fail before touching any file.
            options.validate()?;
            apply_filter(cli, &collection, &Filter::Blur(options), &mut out)
        }
        Command::Grayscale => apply_filter(cli, &collection, &Filter::Grayscale, &mut out),
        Command::Invert => apply_filter(cli, &collection, &Filter::Invert, &mut out),
    }
}

/// Load `--dir`, then apply `--sort`, `--skip` and `--index` in that order.
fn open_collection(cli: &Cli) -> Result<ImageCollection, CliError> {
    let mut collection = ImageCollection::load(&cli.dir, &cli.extensions)?;
    if collection.is_empty() {
        return Err(CliError::EmptyCollection {
            dir: cli.dir.clone(),
            extensions: cli.extensions.join(","),
        });
    }
    collection.sort(cli.sort);
    collection.remove_many(&cli.skip)?;
    if let Some(index) = cli.index {
        info!(index, name = collection.get(index)?.name(), "selecting single image");
        collection.retain_only(index)?;
    }
    info!(
        images = collection.len(),
        pixels = collection.total_pixels(),
        loaded_at = collection.loaded_at(),
        "collection ready"
    );
    Ok(collection)
}

fn output_dir(cli: &Cli) -> Result<PathBuf, CliError> {
    let dir = cli.output_dir.clone().unwrap_or_else(|| cli.dir.clone());
    fs::create_dir_all(&dir).map_err(|e| {
        CliError::io(format!("failed to create directory '{}'", dir.display()), e)
    })?;
    Ok(dir)
}

fn apply_filter(
    cli: &Cli,
    collection: &ImageCollection,
    filter: &Filter,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let dir = output_dir(cli)?;
    let mut failures = 0usize;

    for image in collection.iter() {
        match actions::process(image, filter, &dir) {
            Ok(path) => {
                writeln!(out, "{} {}", "wrote".green(), path.display())
                    .map_err(|e| CliError::io("failed to write output", e))?;
            }
            Err(e) if cli.keep_going => {
                failures += 1;
                eprintln!("{}: {}: {}", "error".red().bold(), image.name(), e);
            }
            Err(e) => return Err(e),
        }
    }

    if failures > 0 {
        return Err(CliError::Partial {
            failed: failures,
            total: collection.len(),
        });
    }
    Ok(())
}
