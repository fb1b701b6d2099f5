use std::path::PathBuf;

use thiserror::Error;

/// Failures of the surfaces around the converter. Conversion itself never fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read config file at {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Typst compilation failed: {0}")]
    TypstCompile(String),

    #[error("PDF generation failed: {0}")]
    PdfGeneration(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
