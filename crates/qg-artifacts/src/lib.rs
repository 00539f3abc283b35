pub mod error;
pub mod roles;
pub mod store;

pub use error::*;
pub use roles::*;
pub use store::*;
