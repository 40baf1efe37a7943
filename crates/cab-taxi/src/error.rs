//! Taxi error type.
//!
//! Configuration errors are recoverable: the caller may retry with corrected
//! input.  Navigation errors mean the taxi's knowledge and its physical state
//! disagree; the taxi cannot continue and the caller must stop driving it.

use thiserror::Error;

use cab_core::Coord;
use cab_map::MapError;

#[derive(Debug, Error)]
pub enum TaxiError {
    #[error("taxi configuration error: {0}")]
    Config(String),

    #[error("map error: {0}")]
    Map(#[from] MapError),

    #[error("fell off the edge of the world: {0} is not in this taxi's map")]
    FellOffMap(Coord),

    #[error("can't get there from here: map has no edge from {from} to {to}")]
    NoKnownEdge { from: Coord, to: Coord },
}

impl TaxiError {
    /// `true` for navigation integrity failures, which end the taxi's run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, TaxiError::FellOffMap(_) | TaxiError::NoKnownEdge { .. })
    }
}

pub type TaxiResult<T> = Result<T, TaxiError>;
