use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use quadra::{Config, Error, Result};

#[derive(Parser)]
#[command(name = "quadra")]
#[command(about = "Convert Quadra Markdown files to PDF")]
struct Cli {
    /// Input Quadra Markdown file
    input: PathBuf,

    /// Output PDF file (defaults to input name with .pdf extension)
    output: Option<PathBuf>,

    /// TOML file overriding page geometry and typography
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => println!("Created {}", output.display()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<PathBuf> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::compiled_default(),
    };

    let markdown = fs::read_to_string(&cli.input).map_err(|source| Error::Read {
        path: cli.input.clone(),
        source,
    })?;

    let pdf_bytes = quadra::markdown_to_pdf_with_config(&markdown, &config);

    let output = output_path(&cli.input, cli.output.as_deref());
    write_pdf(&output, &pdf_bytes)?;
    Ok(output)
}

fn output_path(input: &Path, output: Option<&Path>) -> PathBuf {
    output.map_or_else(|| input.with_extension("pdf"), Path::to_path_buf)
}

fn write_pdf(path: &Path, bytes: &[u8]) -> Result<()> {
    let write_error = |source: std::io::Error| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, bytes).map_err(write_error)?;
    log::info!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
