//! Resume upload client for a remote parsing service.
//!
//! The upload form lives in [`form`], the results panel in [`render`] and the
//! HTTP boundary in [`core::service_client`].

pub mod cli;
pub mod core;
pub mod environment;
pub mod error;
pub mod form;
pub mod render;
pub mod session;
pub mod types;
pub mod utils;

pub use crate::core::{ConfigManager, ParseService, ServiceClient};
pub use error::ServiceError;
pub use form::{ParseOutcome, ParseTask, UploadForm, ViewState};
pub use types::{ParseResult, SelectedFile, Submission};
