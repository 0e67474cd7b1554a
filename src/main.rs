//! # Vitae CLI
//!
//! Usage:
//!   vitae resume.json
//!   vitae -c -o jane.pdf --font times --page letter resume.json

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use vitae::canvas::{PageSetup, PageSize};
use vitae::font::FontFamily;
use vitae::{ComposeOptions, LogObserver, Resume};

#[derive(Parser, Debug)]
#[command(version, about = "Render a JSON Resume file to a PDF résumé", long_about = None)]
struct Args {
    /// JSON Resume input file
    file: PathBuf,

    /// Add the credit line at the end
    #[arg(short = 'c', long = "credit", default_value_t = false)]
    credit: bool,

    /// Output PDF path
    #[arg(short, long, default_value = "cv.pdf")]
    output: PathBuf,

    /// Font family: helvetica, times or courier
    #[arg(long)]
    font: Option<FontFamily>,

    /// Page size: a4, a3, a5, letter or legal
    #[arg(long, default_value = "a4")]
    page: PageSize,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("vitae=info"))
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("✗ {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> vitae::Result<()> {
    let json = fs::read_to_string(&args.file)?;
    let resume = Resume::from_json(&json)?;
    let options = ComposeOptions {
        include_credit: args.credit,
        font_family: args.font,
    };
    if options.include_credit {
        log::info!("Adding credit (-c on)");
    }

    log::info!("Writing résumé to {}", args.output.display());
    let setup = PageSetup::default().with_size(args.page);
    let pdf = vitae::render_with(&resume, &options, setup, &mut LogObserver)?;
    fs::write(&args.output, &pdf)?;
    log::info!("Success: {} bytes", pdf.len());
    Ok(())
}
