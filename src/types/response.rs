// src/types/response.rs
use serde::Deserialize;

/// Body of a non-success response from the parsing service
#[derive(Debug, Default, Deserialize)]
pub struct ServiceErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

impl ServiceErrorBody {
    /// The service message, if the body carried a usable one
    pub fn message(self) -> Option<String> {
        self.error.filter(|e| !e.is_empty())
    }
}
