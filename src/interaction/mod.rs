//! Pointer interaction: drag rotation and marker hover picking

mod picking;
mod rotation;

pub use picking::{MarkerHit, MarkerPicker, MarkerTarget, Ray};
pub use rotation::RotationController;
