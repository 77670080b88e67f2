//! Positional placeholder helpers for template text
//!
//! Template text carries `{N}` tokens (N = 0,1,2,...) that the execution
//! layer fills positionally. The dictionary builders do not police
//! placeholder numbering; these helpers back the diagnostics that do.

use once_cell::sync::Lazy;
use regex::Regex;

/// Regex pattern for positional placeholders: {0}, {1}, ...
static PLACEHOLDER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{(\d+)\}").unwrap());

/// Check if a template contains any positional placeholders
pub fn has_placeholders(template: &str) -> bool {
    PLACEHOLDER_PATTERN.is_match(template)
}

/// Distinct placeholder indices used by a template, sorted ascending
pub fn indices(template: &str) -> Vec<u32> {
    let mut found: Vec<u32> = PLACEHOLDER_PATTERN
        .captures_iter(template)
        .filter_map(|cap| cap.get(1).and_then(|m| m.as_str().parse().ok()))
        .collect();
    found.sort_unstable();
    found.dedup();
    found
}

/// Number of distinct placeholders in a template
pub fn count(template: &str) -> usize {
    indices(template).len()
}

/// Indices missing below the highest used index
///
/// A template using `{0}` and `{2}` but not `{1}` reports `[1]`. The
/// execution layer binds arguments positionally, so a gap almost always
/// means a mistyped index in the document.
pub fn gaps(template: &str) -> Vec<u32> {
    let used = indices(template);
    match used.last() {
        None => Vec::new(),
        Some(&max) => (0..max).filter(|i| !used.contains(i)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_placeholders() {
        assert!(has_placeholders("INSERT INTO t (a, b) VALUES ({0}, {1})"));
        assert!(!has_placeholders("SELECT * FROM t"));
        assert!(!has_placeholders("SELECT '{name}' FROM t"));
    }

    #[test]
    fn test_indices_sorted_and_deduped() {
        let template = "UPDATE t SET a = {1}, b = {0} WHERE id = {1}";
        assert_eq!(indices(template), vec![0, 1]);
        assert_eq!(count(template), 2);
    }

    #[test]
    fn test_gaps() {
        assert_eq!(gaps("VALUES ({0}, {1}, {2})"), Vec::<u32>::new());
        assert_eq!(gaps("VALUES ({0}, {2})"), vec![1]);
        assert_eq!(gaps("VALUES ({3})"), vec![0, 1, 2]);
        assert_eq!(gaps("no placeholders"), Vec::<u32>::new());
    }
}
