//! Shared types for vignette-cli.

use serde::{Deserialize, Serialize};

/// Summary of one rendered image.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageRecord {
    pub source: String,
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub preview: Option<String>,
    pub width: u32,
    pub height: u32,
    pub shape: String,
}
