//! Cell reference extraction from formula text.
//!
//! A reference is one or more letters followed by one or more ASCII digits
//! (`A1`, `BC23`). Which letters count is decided by [`REFERENCE_CASE_POLICY`];
//! the scanner itself does not care.

use std::collections::{BTreeMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::types::FormulaMap;

/// Letter-case rule for reference tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasePolicy {
    /// Only `A-Z` start a reference; `a1` is not a reference.
    UppercaseOnly,
    /// Any ASCII letter; matches are normalized to upper case.
    AnyCase,
}

/// Case rule applied by [`extract_references`].
pub const REFERENCE_CASE_POLICY: CasePolicy = CasePolicy::UppercaseOnly;

/// Message shown in place of the calculator form when there is nothing to fill in.
pub const NO_INPUTS_MESSAGE: &str = "No input cells identified for calculation.";

#[allow(clippy::expect_used)] // Literal patterns; covered by tests
static UPPERCASE_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z]+[0-9]+").expect("valid reference pattern"));

#[allow(clippy::expect_used)]
static ANY_CASE_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z]+[0-9]+").expect("valid reference pattern"));

fn pattern(policy: CasePolicy) -> &'static Regex {
    match policy {
        CasePolicy::UppercaseOnly => &UPPERCASE_REFERENCE,
        CasePolicy::AnyCase => &ANY_CASE_REFERENCE,
    }
}

/// Distinct references in `formula_text`, in first-seen order.
///
/// ```
/// use tabview::references::extract_references;
/// assert_eq!(extract_references("=A1+B2*A1"), vec!["A1", "B2"]);
/// ```
pub fn extract_references(formula_text: &str) -> Vec<String> {
    extract_references_with(formula_text, REFERENCE_CASE_POLICY)
}

/// [`extract_references`] with an explicit case policy.
pub fn extract_references_with(formula_text: &str, policy: CasePolicy) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    scan_into(formula_text, policy, &mut seen, &mut out);
    out
}

fn scan_into(text: &str, policy: CasePolicy, seen: &mut HashSet<String>, out: &mut Vec<String>) {
    for m in pattern(policy).find_iter(text) {
        let token = match policy {
            CasePolicy::UppercaseOnly => m.as_str().to_string(),
            CasePolicy::AnyCase => m.as_str().to_ascii_uppercase(),
        };
        if seen.insert(token.clone()) {
            out.push(token);
        }
    }
}

/// Ordered, deduplicated, bounded set of references used to build the
/// calculator input form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ReferenceSet {
    refs: Vec<String>,
}

/// Union of references across every formula in map order, deduplicated and
/// truncated to the first `limit`.
pub fn build_reference_set(formulas: &FormulaMap, limit: usize) -> ReferenceSet {
    let mut seen = HashSet::new();
    let mut refs = Vec::new();
    for entry in formulas {
        scan_into(&entry.formula_text, REFERENCE_CASE_POLICY, &mut seen, &mut refs);
    }
    refs.truncate(limit);
    ReferenceSet { refs }
}

impl ReferenceSet {
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.refs.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.refs
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.refs.iter().any(|r| r == reference)
    }

    /// Calculator form for this set; empty sets get the "no inputs" notice.
    pub fn input_form(&self) -> InputForm {
        if self.refs.is_empty() {
            return InputForm::NoInputs {
                message: NO_INPUTS_MESSAGE.to_string(),
            };
        }
        InputForm::Fields(self.refs.iter().map(|r| InputField::new(r)).collect())
    }

    /// Numeric substitutions for every reference, reading raw user text via
    /// `raw_input`. Missing or malformed inputs become `0`.
    pub fn substitutions<'a, F>(&self, mut raw_input: F) -> BTreeMap<String, f64>
    where
        F: FnMut(&str) -> Option<&'a str>,
    {
        self.refs
            .iter()
            .map(|r| {
                let value = raw_input(r).map_or(0.0, crate::lenient::parse_number);
                (r.clone(), value)
            })
            .collect()
    }
}

/// Dynamic calculator form description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum InputForm {
    Fields(Vec<InputField>),
    NoInputs { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputField {
    pub reference: String,
    /// Stable element id for the host form
    pub id: String,
    pub label: String,
    pub placeholder: String,
}

impl InputField {
    fn new(reference: &str) -> Self {
        Self {
            reference: reference.to_string(),
            id: format!("input_{reference}"),
            label: format!("{reference}:"),
            placeholder: format!("Enter value for {reference}"),
        }
    }
}
