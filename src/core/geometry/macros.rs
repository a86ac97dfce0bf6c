//! Utility macros used accross multiple files.

/// Reverse multiplication for a generic type
macro_rules! reverse_mul {
    ($T:ident, { $($field:ident),+ }, $U:ty) => {
        impl Mul<$T<$U>> for $U {
            type Output = $T<$U>;
            fn mul(self, rhs: $T<$U>) -> Self::Output {
                $T::new($(rhs.$field * self),+)
            }
        }
    };
}

/// Reverse multiplication for the floating point scalar types.
macro_rules! reverse_mul_scalar {
    ($T:ident, { $($field:ident),+ }) => {
        reverse_mul!($T, {$($field),+}, f32);
        reverse_mul!($T, {$($field),+}, f64);
    };
}

/// Component access by axis index, shared by the 3D types.
macro_rules! index_xyz {
    ($T:ident, $I:ty) => {
        impl<T> Index<$I> for $T<T> {
            type Output = T;
            fn index(&self, index: $I) -> &T {
                match index {
                    0 => &self.x,
                    1 => &self.y,
                    2 => &self.z,
                    _ => panic!(concat!("Index out of range for ", stringify!($T))),
                }
            }
        }

        impl<T> IndexMut<$I> for $T<T> {
            fn index_mut(&mut self, index: $I) -> &mut T {
                match index {
                    0 => &mut self.x,
                    1 => &mut self.y,
                    2 => &mut self.z,
                    _ => panic!(concat!("Index out of range for ", stringify!($T))),
                }
            }
        }
    };
}
