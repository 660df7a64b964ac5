//! # Command-Line Entry Point
//!
//! Thin wrapper around [`StegoService`] for hiding and recovering messages in image files.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin stegano -- encode -i cover.png -o secret.png -m "hello" --report
//! cargo run --bin stegano -- decode secret.png other.png
//! cargo run --bin stegano -- capacity cover.png
//! cargo run --bin stegano -- --config config/stegano.toml decode secret.png
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Builder;
use image::ImageFormat;
use log::{error, info, LevelFilter};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use stegano_lsb::common::config::{load_config, AppConfig};
use stegano_lsb::processing::{image_io, max_message_bytes};
use stegano_lsb::StegoService;

/// Command-line arguments for the stegano binary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a configuration file (TOML format)
    ///
    /// Example: config/stegano.toml
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log at debug level regardless of the configured level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hide a message in an image
    Encode {
        /// Cover image (any format the image crate can read)
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the encoded image; the extension must name a lossless format
        #[arg(short, long)]
        output: PathBuf,

        /// Message text, converted with the configured text encoding
        #[arg(
            short,
            long,
            required_unless_present = "message_file",
            conflicts_with = "message_file"
        )]
        message: Option<String>,

        /// Read the raw message bytes from a file instead
        #[arg(long)]
        message_file: Option<PathBuf>,

        /// Print the embedding report as JSON
        #[arg(long)]
        report: bool,
    },

    /// Recover the messages hidden in one or more images
    Decode {
        #[arg(required = true)]
        images: Vec<PathBuf>,

        /// Write the raw message bytes to stdout instead of text
        #[arg(long)]
        raw: bool,
    },

    /// Show how many message bytes an image can hold
    Capacity { image: PathBuf },
}

/// Initialize the logging system with timestamp, level, and message formatting.
///
/// Format: `[HH:MM:SS] [LEVEL] message`
fn init_logger(level: LevelFilter) {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(level)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    let config: AppConfig = match &args.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        config.logging.level_filter()
    };
    init_logger(level);

    let service = StegoService::new(config.codec);

    match args.command {
        Command::Encode {
            input,
            output,
            message,
            message_file,
            report,
        } => encode(&service, input, output, message, message_file, report).await,
        Command::Decode { images, raw } => decode(&service, images, raw).await,
        Command::Capacity { image } => capacity(image),
    }
}

async fn encode(
    service: &StegoService,
    input: PathBuf,
    output: PathBuf,
    message: Option<String>,
    message_file: Option<PathBuf>,
    print_report: bool,
) -> Result<()> {
    // Refuse lossy targets before doing any work
    let format = ImageFormat::from_path(&output)
        .with_context(|| format!("Cannot infer image format for {}", output.display()))?;
    image_io::ensure_lossless(format)?;

    let payload = match (message, message_file) {
        (Some(text), _) => service.config().text_encoding.to_bytes(&text)?,
        (None, Some(path)) => fs::read(&path)
            .with_context(|| format!("Failed to read message file {}", path.display()))?,
        (None, None) => bail!("No message provided"),
    };

    let cover = fs::read(&input)
        .with_context(|| format!("Failed to read cover image {}", input.display()))?;

    info!(
        "📷 Hiding {} bytes in {} ({} bytes)",
        payload.len(),
        input.display(),
        cover.len()
    );

    let encoded = service.encode_image_as(cover, payload, format).await?;

    fs::write(&output, &encoded.bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(
        "✅ Saved {}: {} bits used, {} pixels modified",
        output.display(),
        encoded.report.bits_written,
        encoded.report.pixels_touched
    );

    if print_report {
        println!("{}", serde_json::to_string_pretty(&encoded.report)?);
    }

    Ok(())
}

async fn decode(service: &StegoService, images: Vec<PathBuf>, raw: bool) -> Result<()> {
    let mut inputs = Vec::with_capacity(images.len());
    for path in &images {
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read image {}", path.display()))?;
        inputs.push((path.display().to_string(), bytes));
    }

    let show_names = inputs.len() > 1;
    let results = service.decode_many(inputs).await;

    let mut failures = 0usize;
    let mut stdout = std::io::stdout().lock();

    for (name, result) in results {
        let message = match result {
            Ok(message) => message,
            Err(e) => {
                error!("❌ {}: {:#}", name, e);
                failures += 1;
                continue;
            }
        };

        if message.is_empty() {
            info!("{}: image holds an empty message", name);
        }

        if raw {
            stdout.write_all(&message)?;
            continue;
        }

        match service.config().text_encoding.to_text(&message) {
            Ok(text) if show_names => writeln!(stdout, "{}: {}", name, text)?,
            Ok(text) => writeln!(stdout, "{}", text)?,
            Err(e) => {
                error!("❌ {}: {}", name, e);
                failures += 1;
            }
        }
    }

    stdout.flush()?;

    if failures > 0 {
        bail!("{} of {} images failed to decode", failures, images.len());
    }

    Ok(())
}

fn capacity(image: PathBuf) -> Result<()> {
    let grid = image_io::load_grid(&image)?;

    println!(
        "{}: {}x{}, {} bits available, up to {} message bytes",
        image.display(),
        grid.width(),
        grid.height(),
        grid.capacity_bits(),
        max_message_bytes(&grid)
    );

    Ok(())
}
