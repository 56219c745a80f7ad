//! `number` query parameter parsing.
//!
//! Rules:
//! - Missing, empty, or non-numeric values are `InvalidInput`.
//! - Values outside `i64` are `InvalidInput` (parse overflow).
//! - Surrounding ASCII whitespace is ignored; one leading `+` or `-` is accepted.
//! - Single underscores between digits are separators (`1_000` is 1000).
//! - Negative values are `NegativeInput`.

use crate::error::{FactoError, Result};

/// Parse the raw parameter into a non-negative integer.
pub fn parse_number(raw: Option<&str>) -> Result<u64> {
    let raw = raw.ok_or_else(|| FactoError::InvalidInput("number is missing".into()))?;
    let trimmed = raw.trim_matches(|c: char| c.is_ascii_whitespace());
    if trimmed.is_empty() {
        return Err(FactoError::InvalidInput("number is empty".into()));
    }

    let n: i64 = strip_separators(trimmed)?
        .parse()
        .map_err(|e| FactoError::InvalidInput(format!("{trimmed:?}: {e}")))?;

    u64::try_from(n).map_err(|_| FactoError::NegativeInput(n))
}

/// Sign plus bare digits, with `_` separators removed.
fn strip_separators(s: &str) -> Result<String> {
    let (sign, digits) = match s.strip_prefix(['+', '-']) {
        Some(rest) => (&s[..1], rest),
        None => ("", s),
    };

    let well_formed = digits
        .split('_')
        .all(|group| !group.is_empty() && group.bytes().all(|b| b.is_ascii_digit()));
    if !well_formed {
        return Err(FactoError::InvalidInput(format!("{s:?} is not an integer")));
    }

    let mut out = String::with_capacity(s.len());
    out.push_str(sign);
    out.extend(digits.chars().filter(|&c| c != '_'));
    Ok(out)
}
