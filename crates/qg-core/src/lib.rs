pub mod codes;
pub mod kinds;
pub mod markdown;
pub mod model;
pub mod recommend;
pub mod reference;
pub mod types;

pub use kinds::*;
pub use markdown::*;
pub use model::*;
pub use recommend::*;
pub use reference::*;
pub use types::*;
