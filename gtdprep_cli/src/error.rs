use gtdprep::error::GtdPrepError;
use polars::error::PolarsError;

#[derive(thiserror::Error, Debug)]
pub enum GtdPrepCliError {
    #[error("Anyhow error")]
    Anyhow(#[from] anyhow::Error),
    #[error("serde JSON error")]
    SerdeJSONError(#[from] serde_json::Error),
    #[error("invalid TOML in config file")]
    TomlError(#[from] toml::de::Error),
    #[error("polars error")]
    PolarsError(#[from] PolarsError),
    #[error("gtdprep error")]
    GtdPrepError(#[from] GtdPrepError),
    #[error("std IO error")]
    IOError(#[from] std::io::Error),
}

pub type GtdPrepCliResult<T> = Result<T, GtdPrepCliError>;
