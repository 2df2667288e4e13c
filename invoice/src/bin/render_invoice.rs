//! render-invoice: write the tax invoice PDF.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use invoice::{render_invoice, InvoiceData, Theme};

#[derive(Parser)]
#[command(name = "render-invoice")]
#[command(version)]
#[command(about = "Render a tax invoice to PDF", long_about = None)]
struct Cli {
    /// Output PDF file
    #[arg(short, long, value_name = "FILE", default_value = "paramount_invoice.pdf")]
    output: PathBuf,

    /// Logo image (PNG or JPEG); a placeholder is drawn if it is missing
    #[arg(long, value_name = "FILE", default_value = "company_logo.png")]
    logo: PathBuf,

    /// Theme JSON; unspecified fields keep their defaults
    #[arg(long, value_name = "FILE")]
    theme: Option<PathBuf>,

    /// Invoice data JSON (defaults to the built-in sample invoice)
    #[arg(long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Write uncompressed content streams
    #[arg(long)]
    no_compress: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let theme = match &cli.theme {
        Some(path) => Theme::load(path)
            .with_context(|| format!("loading theme {}", path.display()))?,
        None => Theme::default(),
    };
    let data = match &cli.data {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading invoice data {}", path.display()))?;
            InvoiceData::from_json(&json)
                .with_context(|| format!("parsing invoice data {}", path.display()))?
        }
        None => InvoiceData::sample(),
    };

    let bytes = render_invoice(&data, &theme, Some(cli.logo.as_path()), !cli.no_compress)
        .context("rendering invoice")?;
    fs::write(&cli.output, &bytes)
        .with_context(|| format!("writing {}", cli.output.display()))?;

    info!("wrote {} ({} bytes)", cli.output.display(), bytes.len());
    println!("Invoice written to {}", cli.output.display());
    Ok(())
}
