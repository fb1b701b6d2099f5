use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use plainmark::Config;

/// Read from the working directory when `--config` is not given.
const LOCAL_CONFIG: &str = "plainmark.toml";

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum Format {
    Html,
    Typst,
    Pdf,
    Json,
}

#[derive(Parser)]
#[command(name = "plainmark")]
#[command(about = "Convert plain text and lightweight markdown into structured documents")]
struct Cli {
    /// Input text file (reads stdin when omitted or `-`)
    input: Option<PathBuf>,

    /// Output file (PDF defaults to the input name with .pdf; others print to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// TOML configuration file (defaults to ./plainmark.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Treat input as markdown and skip plain-text normalization
    #[arg(long)]
    raw: bool,
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> plainmark::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load(Path::new(LOCAL_CONFIG))?,
    };
    if cli.raw {
        config.normalize.enabled = false;
    }

    let text = read_input(cli.input.as_deref())?;

    let rendered: Vec<u8> = match cli.format {
        Format::Html => plainmark::text_to_html_with_config(&text, &config).into_bytes(),
        Format::Typst => plainmark::text_to_typst_with_config(&text, &config).into_bytes(),
        Format::Json => {
            let blocks = plainmark::convert_with_config(&text, &config);
            let mut json = serde_json::to_string_pretty(&blocks).map_err(io::Error::other)?;
            json.push('\n');
            json.into_bytes()
        }
        Format::Pdf => plainmark::text_to_pdf_with_config(&text, &config)?,
    };

    let output = match (&cli.output, cli.format, &cli.input) {
        (Some(path), _, _) => Some(path.clone()),
        (None, Format::Pdf, Some(input)) if input.as_os_str() != "-" => {
            Some(input.with_extension("pdf"))
        }
        (None, Format::Pdf, _) => Some(PathBuf::from("out.pdf")),
        _ => None,
    };

    match output {
        Some(path) => {
            fs::write(&path, rendered)?;
            log::info!("Created {}", path.display());
        }
        None => {
            use std::io::Write;
            io::stdout().write_all(&rendered)?;
        }
    }
    Ok(())
}

fn read_input(input: Option<&Path>) -> io::Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path).map_err(|e| {
            io::Error::new(e.kind(), format!("reading {}: {}", path.display(), e))
        }),
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
