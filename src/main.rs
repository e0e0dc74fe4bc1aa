use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use qrlive::{logger, render, QrCode, QrCodeEcc, Session, Settings};

#[derive(Parser)]
#[command(name = "qrlive")]
#[command(author, version, about = "Encode Latin-1 text as a QR code", long_about = None)]
struct Cli {
    /// Text to encode. Without it, every line read from stdin is treated as
    /// a new edit and the symbol is re-rendered.
    text: Option<String>,

    /// Error correction level: L, M, Q or H
    #[arg(short, long)]
    level: Option<QrCodeEcc>,

    /// Error correction level by selector position (0 = L ... 3 = H), clamped
    #[arg(long, allow_negative_numbers = true, conflicts_with = "level")]
    level_index: Option<i64>,

    /// Write a PNG image to this path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write an SVG document to this path
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Output side in pixels (nearest-neighbour scaled)
    #[arg(long)]
    size: Option<u32>,

    /// Pixels per module when --size is not given
    #[arg(long)]
    scale: Option<u32>,

    /// Quiet zone width in modules
    #[arg(long)]
    border: Option<u32>,

    /// Redraw the PNG onto a square canvas of at least `share_min_side` pixels
    #[arg(long)]
    share: bool,

    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Do not print the symbol to the terminal
    #[arg(short, long)]
    quiet: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::from_file(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?,
            None => Settings::default(),
        };
        if let Some(level) = self.level {
            settings.level = level;
        }
        if let Some(index) = self.level_index {
            settings.level = QrCodeEcc::from_index_clamped(index);
        }
        if let Some(size) = self.size {
            settings.size = Some(size);
        }
        if let Some(scale) = self.scale {
            settings.scale = scale;
        }
        if let Some(border) = self.border {
            settings.border = border;
        }
        settings.validate()?;
        Ok(settings)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    let settings = cli.settings()?;
    let mut session = Session::new(&settings);

    match &cli.text {
        Some(text) => {
            session.set_text(text.as_str());
            let qr = current_symbol(&session)?;
            emit(&cli, &settings, qr)?;
        }
        None => {
            tracing::info!(level = %settings.level, "Reading edits from stdin");
            for line in io::stdin().lock().lines() {
                let line = line.context("Failed to read stdin")?;
                // A failed edit is already logged by the session
                if let Some(qr) = session.set_text(line) {
                    emit(&cli, &settings, qr)?;
                }
            }
        }
    }

    Ok(())
}

fn current_symbol(session: &Session) -> Result<&QrCode> {
    match (session.current(), session.last_error()) {
        (Some(qr), _) => Ok(qr),
        (None, Some(err)) => Err(anyhow::Error::new(err.clone())).context("Failed to generate QR code"),
        (None, None) => Err(anyhow!("No QR code generated")),
    }
}

fn emit(cli: &Cli, settings: &Settings, qr: &QrCode) -> Result<()> {
    if !cli.quiet {
        println!("{}", render::to_terminal_string(qr, settings.border));
        println!(
            "Version {} ({}x{}), level {}, mask {}",
            qr.version().value(),
            qr.size(),
            qr.size(),
            qr.error_correction_level(),
            qr.mask().value()
        );
    }

    if let Some(path) = &cli.output {
        let mut img = match settings.size {
            Some(side) => render::to_image_sized(qr, settings.border, side),
            None => render::to_image(qr, settings.border, settings.scale),
        };
        if cli.share {
            img = render::shareable_image(&img, settings.share_min_side);
        }
        img.save(path)
            .with_context(|| format!("Failed to save image to {}", path.display()))?;
        tracing::info!(path = %path.display(), width = img.width(), "Saved PNG");
    }

    if let Some(path) = &cli.svg {
        fs::write(path, render::to_svg_string(qr, settings.border))
            .with_context(|| format!("Failed to write SVG to {}", path.display()))?;
        tracing::info!(path = %path.display(), "Saved SVG");
    }

    Ok(())
}
