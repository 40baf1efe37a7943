use thiserror::Error;

use cab_core::TaxiId;
use cab_taxi::TaxiError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{taxi}: {source}")]
    Taxi {
        taxi:   TaxiId,
        source: TaxiError,
    },
}

pub type SimResult<T> = Result<T, SimError>;
