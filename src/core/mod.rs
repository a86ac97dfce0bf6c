#[macro_use]
pub mod vlog;
pub mod common;
pub mod error;
pub mod rng;
pub mod geometry;
pub mod quaternion;
pub mod interpolation;
pub mod curve;
pub mod trajectory;
pub mod arclength;
pub mod orientation;
pub mod options;
pub mod vehicle;
pub mod progress_reporter;
