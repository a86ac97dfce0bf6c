//! Type definitions and constants.

#[cfg(feature = "float_as_double")]
mod float_mod {
    pub type Float = f64;
    pub mod consts {
        pub use std::f64::consts::*;
    }
}
#[cfg(not(feature = "float_as_double"))]
mod float_mod {
    pub type Float = f32;
    pub mod consts {
        pub use std::f32::consts::*;
    }
}

pub use float_mod::Float;
pub mod consts {
    use super::float_mod::Float;
    pub use super::float_mod::consts::*;
    pub const FRAC_PI_180: Float = PI / 180.0;
    pub const FRAC_180_PI: Float = 180.0 / PI;
    /// Lengths below this are treated as zero when normalizing directions.
    pub const DEGENERATE_LENGTH: Float = 1.0e-6;
}

/// Convert an angle from degrees into radians.
pub fn radians(deg: Float) -> Float {
    consts::FRAC_PI_180 * deg
}

/// Convert an angle from radians into degrees.
pub fn degrees(rad: Float) -> Float {
    consts::FRAC_180_PI * rad
}

/// Returns the first index in `0..size` for which `predicate` is false,
/// assuming the predicate is true for a prefix of the range and false after.
/// Returns `size` when the predicate holds everywhere.
pub fn partition_point<T>(size: usize, predicate: T) -> usize
where
T: Fn(usize) -> bool
{
    let mut first = 0;
    let mut len = size;
    while len > 0 {
        let half = len >> 1;
        let middle = first + half;
        // Bisect range based on value of _pred_ at _middle_
        if predicate(middle) {
            first = middle + 1;
            len -= half + 1;
        } else {
            len = half;
        }
    }
    first
}

/// Map a frame number to a hashable key.
#[inline]
pub fn frame_key(frame: Float) -> u64 {
    frame.to_bits() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_point_finds_first_false() {
        let values = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(partition_point(values.len(), |i| values[i] < 1.5), 2);
        assert_eq!(partition_point(values.len(), |i| values[i] < -1.0), 0);
        assert_eq!(partition_point(values.len(), |i| values[i] < 10.0), 4);
        assert_eq!(partition_point(0, |_| true), 0);
    }

    #[test]
    fn angle_conversion() {
        assert!((radians(180.0) - consts::PI).abs() < 1e-6);
        assert!((degrees(consts::FRAC_PI_2) - 90.0).abs() < 1e-4);
    }
}
