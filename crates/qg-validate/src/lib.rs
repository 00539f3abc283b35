pub mod doc_table;
pub mod incident_payload;
pub mod incident_snippet;
pub mod json;
pub mod quality_summary;
pub mod report;
pub mod rule;
pub mod selective;
pub mod types;
pub mod validator_contracts;

pub use doc_table::*;
pub use incident_payload::*;
pub use incident_snippet::*;
pub use quality_summary::*;
pub use report::*;
pub use rule::*;
pub use selective::*;
pub use types::*;
pub use validator_contracts::*;
