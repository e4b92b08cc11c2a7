// src/types/mod.rs
pub mod parse_result;
pub mod response;
pub mod submission;

pub use parse_result::{AtsDetail, AtsScore, ParseResult};
pub use response::ServiceErrorBody;
pub use submission::{SelectedFile, Submission};
