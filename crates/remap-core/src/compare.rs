//! Guideline-versus-input header comparison.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Result of comparing the expected (guideline) headers with the headers
/// found in an uploaded file. All lists are sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderComparison {
    /// Expected headers absent from the input.
    pub missing: Vec<String>,
    /// Input headers that are not expected.
    pub extra: Vec<String>,
    /// Headers present in both.
    pub matched: Vec<String>,
}

impl HeaderComparison {
    /// True when the input already has exactly the expected headers.
    pub fn is_exact(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

/// Compare guideline headers against input headers.
///
/// Duplicates on either side collapse to a single name.
pub fn compare_headers<G, I>(guideline: G, input: I) -> HeaderComparison
where
    G: IntoIterator,
    G::Item: Into<String>,
    I: IntoIterator,
    I::Item: Into<String>,
{
    let guideline: BTreeSet<String> = guideline.into_iter().map(Into::into).collect();
    let input: BTreeSet<String> = input.into_iter().map(Into::into).collect();

    HeaderComparison {
        missing: guideline.difference(&input).cloned().collect(),
        extra: input.difference(&guideline).cloned().collect(),
        matched: guideline.intersection(&input).cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_missing_extra_and_matched() {
        let cmp = compare_headers(
            ["Name", "Email", "Location"],
            ["Name", "Email2", "Phone", "Name"],
        );
        assert_eq!(cmp.missing, vec!["Email", "Location"]);
        assert_eq!(cmp.extra, vec!["Email2", "Phone"]);
        assert_eq!(cmp.matched, vec!["Name"]);
        assert!(!cmp.is_exact());
    }

    #[test]
    fn identical_sets_are_exact() {
        let cmp = compare_headers(["a", "b"], ["b", "a"]);
        assert!(cmp.is_exact());
        assert_eq!(cmp.matched, vec!["a", "b"]);
    }
}
