pub mod pipeline;
pub mod shaders;
pub mod webgl;

pub use pipeline::GlobePipeline;
pub use webgl::GlContext;
