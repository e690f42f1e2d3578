//! Job size estimate

use serde::{Deserialize, Serialize};

/// File and byte counts reported by `estimate`
///
/// `(-1, -1)` is the sentinel for a failed or unparsable estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estimate {
    pub files: i64,
    pub bytes: i64,
}

impl Estimate {
    pub const UNKNOWN: Estimate = Estimate { files: -1, bytes: -1 };

    pub fn new(files: i64, bytes: i64) -> Self {
        Self { files, bytes }
    }

    pub fn is_known(&self) -> bool {
        *self != Self::UNKNOWN
    }

    pub fn as_tuple(&self) -> (i64, i64) {
        (self.files, self.bytes)
    }
}

impl Default for Estimate {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl From<Estimate> for (i64, i64) {
    fn from(estimate: Estimate) -> Self {
        estimate.as_tuple()
    }
}
