pub mod error;
pub mod vector2;
pub mod vector3;

pub use error::{Result, VectisError};
pub use vector2::Vector2;
pub use vector3::Vector3;

/// Component bit pattern with `-0.0` folded into `0.0`, so that vectors
/// comparing equal under IEEE-754 equality also hash equally.
pub(crate) fn canonical_bits(component: f64) -> u64 {
    if component == 0.0 {
        0.0f64.to_bits()
    } else {
        component.to_bits()
    }
}
