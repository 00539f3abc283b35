pub mod publish;
pub mod render;

pub use publish::*;
pub use render::*;
