#[macro_use]
mod macros;

pub mod vector3;
pub use vector3::*;
pub mod point3;
pub use point3::*;
