pub mod geometry;
pub mod sphere;

pub use geometry::{Mesh, Vertex};
pub use sphere::uv_sphere;
