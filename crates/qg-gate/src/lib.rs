pub mod config;
pub mod render;
pub mod runner;
pub mod scenario;
pub mod summarize;

pub use config::*;
pub use render::*;
pub use runner::*;
pub use summarize::*;
