pub mod geo;
pub mod matrix;
pub mod vec3;

pub use geo::lat_lon_to_position;
pub use matrix::Mat4;
pub use vec3::Vec3;
