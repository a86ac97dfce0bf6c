//! Errors reported while setting up curves, vehicles and scenes.
//! Per-frame evaluation never fails; only construction and configuration do.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CityError {
    #[error("malformed curve: {0}")]
    MalformedCurve(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("curve data not ready: {0}")]
    MissingCurveData(String),

    #[error("no vehicle with id {0}")]
    UnknownVehicle(usize),

    #[error("axis index {index} out of range (expected < {limit})")]
    InvalidAxis { index: usize, limit: usize },
}

pub type Result<T> = std::result::Result<T, CityError>;
