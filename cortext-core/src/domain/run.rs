//! Run identifier

use serde::{Deserialize, Serialize};
use std::fmt;

/// Correlation token for one orchestration request
///
/// Formatted as `YYYYMMDD_HHMMSS_mmm-xxxxxxxx`: local creation time down to
/// the millisecond followed by 8 random hex characters. Lexicographic order
/// follows creation time; the suffix keeps runs started in the same
/// millisecond apart. Never parsed back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(String);

impl RunId {
    /// Generates a fresh run identifier from the current local time
    pub fn generate() -> Self {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S_%3f");
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("{}-{}", timestamp, &suffix[..8]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RunId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
