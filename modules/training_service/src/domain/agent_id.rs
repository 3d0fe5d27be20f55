//! Employee code ("agent ID") allocation
//!
//! Two numbering schemes coexist:
//! - the recycling pool used by the agent ID endpoints, which prefers codes
//!   freed by terminations and otherwise mints the first free `EMPnnn`
//! - per-prefix numbering used on user creation, which continues after the
//!   highest `ADMnnn` / `EMPnnn` and never recycles
//!
//! Both are recomputed from a fresh store snapshot on every call.

use crate::contract::{AgentIdPreview, EMPLOYEE_CODE_PREFIX};
use std::collections::HashSet;

/// Number of digits after the prefix
pub const CODE_DIGITS: usize = 3;

/// Render `prefix` + zero-padded number, e.g. `EMP007`.
///
/// Numbers wider than three digits are not truncated.
pub fn format_code(prefix: &str, number: u32) -> String {
    format!("{prefix}{number:0width$}", width = CODE_DIGITS)
}

/// Numeric suffix of `code` if it is exactly `prefix` followed by three ASCII digits
pub fn parse_suffix(code: &str, prefix: &str) -> Option<u32> {
    let digits = code.strip_prefix(prefix)?;
    if digits.len() != CODE_DIGITS || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Pick the next agent ID from the recycling pool.
///
/// `active` and `terminated` are the code lists as returned by the store
/// (ascending). Recyclable codes keep the order of `terminated`; duplicates
/// are collapsed. New codes always use the `EMP` prefix.
pub fn next_from_pool(active: &[String], terminated: &[String]) -> AgentIdPreview {
    let active_set: HashSet<&str> = active.iter().map(String::as_str).collect();

    let mut seen = HashSet::new();
    let recyclable_ids: Vec<String> = terminated
        .iter()
        .filter(|code| !active_set.contains(code.as_str()))
        .filter(|code| seen.insert(code.as_str()))
        .cloned()
        .collect();

    if let Some(first) = recyclable_ids.first() {
        return AgentIdPreview {
            agent_id: first.clone(),
            is_recycled: true,
            recyclable_ids,
        };
    }

    let used: HashSet<&str> = active
        .iter()
        .chain(terminated.iter())
        .map(String::as_str)
        .collect();

    let agent_id = (1..)
        .map(|n| format_code(EMPLOYEE_CODE_PREFIX, n))
        .find(|candidate| !used.contains(candidate.as_str()))
        .unwrap_or_default();

    AgentIdPreview {
        agent_id,
        is_recycled: false,
        recyclable_ids: Vec::new(),
    }
}
