mod stars;

pub use stars::{StarField, FLOATS_PER_STAR};
