//! Filename pattern handling: macro validation, date resolution and wildcard matching.
//!
//! A pattern such as `reports/{{ YYYY }}_{{ MM }}_{{ * }}.csv` is resolved against one
//! anchor date. The coarsest date macro present decides how far back the anchor sits
//! (one year, one month or one day; `{{ today }}` keeps the current date). The
//! wildcard survives resolution and is only interpreted by [`filter_by_pattern`].

use crate::macros::{Macro, WILDCARD_TOKEN};
use chrono::{DateTime, FixedOffset};
use common::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{[^`]*?\}\}").expect("token regex is valid"));

/// Checks every `{{ ... }}` token against the registry.
///
/// Returns the pattern and the recognised tokens in order of appearance. Fails with
/// [`Error::InvalidPattern`] listing each unknown token once.
pub fn validate(pattern: &str) -> Result<(&str, Vec<Macro>)> {
    let mut found = Vec::new();
    let mut invalid: Vec<String> = Vec::new();

    for token in TOKEN_RE.find_iter(pattern).map(|m| m.as_str()) {
        match Macro::from_token(token) {
            Some(m) => found.push(m),
            None if !invalid.iter().any(|t| t == token) => invalid.push(token.to_string()),
            None => {}
        }
    }

    if !invalid.is_empty() {
        return Err(Error::InvalidPattern(invalid));
    }

    Ok((pattern, found))
}

/// The token whose granularity sets the date offset. Ties go to registry order.
fn dominant(found: &[Macro]) -> Option<Macro> {
    Macro::ALL
        .into_iter()
        .filter(|m| found.contains(m))
        .fold(None, |best, candidate| match (best, candidate.granularity()) {
            (None, _) => Some(candidate),
            (Some(current), Some(g)) if current.granularity().is_none_or(|cg| g > cg) => {
                Some(candidate)
            }
            _ => best,
        })
}

/// Substitutes every date macro in `pattern` relative to `now`.
pub fn resolve_macro(pattern: &str, now: DateTime<FixedOffset>) -> Result<String> {
    let (pattern, found) = validate(pattern)?;
    let Some(dominant) = dominant(&found) else {
        return Ok(pattern.to_string());
    };

    let anchor = match dominant.offset() {
        Some(unit) => unit.step_back(now).ok_or_else(|| {
            Error::InvalidInput(format!("Cannot step {} back by one {:?}", now, unit))
        })?,
        None => now,
    };

    let mut resolved = pattern.to_string();
    for m in Macro::ALL {
        if let Some(value) = m.format(&anchor) {
            resolved = resolved.replace(m.token(), &value);
        }
    }
    Ok(resolved)
}

/// Keeps the filenames that start with `pattern`, where `{{ * }}` matches anything.
pub fn filter_by_pattern<S: AsRef<str>>(filenames: &[S], pattern: &str) -> Result<Vec<String>> {
    let body = pattern
        .split(WILDCARD_TOKEN)
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    let re = Regex::new(&format!("^{}", body))
        .map_err(|e| Error::InvalidInput(format!("Cannot match pattern '{}': {}", pattern, e)))?;

    Ok(filenames
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| re.is_match(name))
        .map(str::to_string)
        .collect())
}

/// Directory part of the literal text ahead of the first macro, used to narrow listings.
pub fn listing_prefix(pattern: &str) -> &str {
    let head = match pattern.find("{{") {
        Some(idx) => &pattern[..idx],
        None => pattern,
    };
    match head.rfind('/') {
        Some(idx) => &head[..idx],
        None => "",
    }
}
