//! Estimate response parsing

use crate::models::Estimate;
use once_cell::sync::Lazy;
use regex::Regex;

static ESTIMATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"files=([0-9][0-9,]*)\s+bytes=([0-9][0-9,]*)").expect("estimate pattern is valid")
});

/// Extract `files=<N> bytes=<M>` from an `estimate` response
///
/// Digit-group separators are stripped. Anything else, including counts
/// that overflow, yields [`Estimate::UNKNOWN`].
pub fn parse_estimate(output: &str) -> Estimate {
    let Some(captures) = ESTIMATE_PATTERN.captures(output) else {
        return Estimate::UNKNOWN;
    };

    match (parse_count(&captures[1]), parse_count(&captures[2])) {
        (Some(files), Some(bytes)) => Estimate::new(files, bytes),
        _ => Estimate::UNKNOWN,
    }
}

fn parse_count(raw: &str) -> Option<i64> {
    let digits: String = raw.chars().filter(|c| *c != ',').collect();
    digits.parse().ok()
}
