//! # Adcanvas CLI
//!
//! Renders an ad record JSON onto a background and writes a PNG.
//!
//! ## Usage
//!
//! ```bash
//! # Solid white 1080x1080, black text, bundled font
//! adcanvas render --ad ad.json
//!
//! # Full style config (background, colors, font, canvas size)
//! adcanvas render --ad ad.json --style style.json --output sale.png
//!
//! # Fail instead of rendering copy that cannot fit
//! adcanvas render --ad ad.json --strict
//! ```

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use adcanvas::{
    AdCanvasError, AdRecord, LayoutParams, StyleConfig, background, font,
    layout, style,
};

/// Adcanvas - ad image composition utility
#[derive(Parser, Debug)]
#[command(name = "adcanvas")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render an ad record onto a background canvas and save it as a PNG
    Render {
        /// Ad record JSON file
        #[arg(long)]
        ad: PathBuf,

        /// Style config JSON file (defaults to solid white 1080x1080, black text)
        #[arg(long)]
        style: Option<PathBuf>,

        /// Font file (TTF/OTF); overrides the style config's font path
        #[arg(long)]
        font: Option<PathBuf>,

        /// Output PNG path
        #[arg(long, short, default_value = "out.png")]
        output: PathBuf,

        /// Fail when the text cannot fit the canvas at the minimum font size
        #[arg(long)]
        strict: bool,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AdCanvasError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            ad,
            style: style_path,
            font: font_path,
            output,
            strict,
        } => {
            let ad: AdRecord = read_json(&ad)?;
            let config: StyleConfig = match style_path {
                Some(path) => read_json(&path)?,
                None => StyleConfig::default(),
            };

            let font = match font_path.or_else(|| config.font_path.clone()) {
                Some(path) => font::load_font(&path)?,
                None => font::bundled_font().clone(),
            };
            let color = style::parse_hex_color(&config.font_color)?;

            let mut canvas = background::build_background(&config)?;
            let params = LayoutParams {
                strict,
                ..Default::default()
            };
            layout::render(&ad, &mut canvas, color, &font, &params)?;

            canvas.save(&output).map_err(AdCanvasError::ImageEncode)?;
            println!("Wrote {}", output.display());
            Ok(())
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> Result<T, AdCanvasError> {
    let bytes = fs::read(path)?;
    serde_json::from_slice(&bytes)
        .map_err(|e| AdCanvasError::InvalidInput(format!("{}: {e}", path.display())))
}
