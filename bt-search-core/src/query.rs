//! Keyword → partition predicates.
//!
//! Two query modes exist: a fuzzy substring match over the title and code
//! fields, and a strict prefix match on the code field used when the
//! keyword looks like a product code.

use regex::{Regex, RegexBuilder};

use crate::error::SearchError;
use crate::normalize::fields::{NUMBER_KEYS, SEARCH_PROJECTION, TITLE_KEYS};
use crate::types::RawRecord;

/// Which query mode produced a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    /// Case-insensitive prefix match on the code field.
    StrictCode,
    /// Case-insensitive substring match on title or code.
    Fuzzy,
}

impl QueryMode {
    /// Short label used in log events.
    pub fn label(&self) -> &'static str {
        match self {
            Self::StrictCode => "number-prefix",
            Self::Fuzzy => "fuzzy",
        }
    }
}

impl std::fmt::Display for QueryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A case-insensitive regex applied to one document field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPattern {
    pub field: &'static str,
    pub pattern: String,
}

/// A store-agnostic predicate: a record matches when any clause matches.
///
/// Patterns use regex syntax and always match case-insensitively. Clauses
/// only match string-valued fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub mode: QueryMode,
    pub any_of: Vec<FieldPattern>,
    /// Fields the normaliser needs; stores may use it to limit I/O.
    pub projection: &'static [&'static str],
}

impl Predicate {
    fn over_fields(mode: QueryMode, fields: &[&'static str], pattern: &str) -> Self {
        Self {
            mode,
            any_of: fields
                .iter()
                .map(|field| FieldPattern {
                    field: *field,
                    pattern: pattern.to_owned(),
                })
                .collect(),
            projection: SEARCH_PROJECTION,
        }
    }

    /// Compile every clause for in-process evaluation.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Query`] if a pattern is not a valid regex.
    pub fn compile(&self) -> Result<CompiledPredicate, SearchError> {
        let clauses = self
            .any_of
            .iter()
            .map(|clause| {
                RegexBuilder::new(&clause.pattern)
                    .case_insensitive(true)
                    .build()
                    .map(|regex| (clause.field, regex))
                    .map_err(|e| {
                        SearchError::Query(format!("invalid pattern on {}: {e}", clause.field))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CompiledPredicate { clauses })
    }
}

/// A [`Predicate`] with its patterns compiled.
#[derive(Debug, Clone)]
pub struct CompiledPredicate {
    clauses: Vec<(&'static str, Regex)>,
}

impl CompiledPredicate {
    /// Whether `record` satisfies any clause.
    pub fn matches(&self, record: &RawRecord) -> bool {
        self.clauses.iter().any(|(field, regex)| {
            record
                .get(field)
                .and_then(|value| value.as_str())
                .is_some_and(|text| regex.is_match(text))
        })
    }
}

fn strip_whitespace(keyword: &str) -> String {
    keyword.chars().filter(|c| !c.is_whitespace()).collect()
}

fn without_separators(stripped: &str) -> String {
    stripped.chars().filter(|c| *c != '-' && *c != '_').collect()
}

/// Fuzzy predicate: the keyword as a literal, case-insensitive substring of
/// any title or code alias.
pub fn build_fuzzy_predicate(keyword: &str) -> Predicate {
    let fields: Vec<&'static str> = TITLE_KEYS.iter().chain(NUMBER_KEYS).copied().collect();
    Predicate::over_fields(QueryMode::Fuzzy, &fields, &regex::escape(keyword))
}

/// Whether `keyword` looks like a product code or a studio label.
///
/// After removing whitespace the keyword must be non-empty ASCII, and
/// after removing `-`/`_` it must be non-empty and alphanumeric. It then
/// qualifies if it mixes letters and digits, or is 2–6 letters long.
///
/// # Examples
///
/// ```
/// use bt_search_core::query::is_strict_code_candidate;
///
/// assert!(is_strict_code_candidate("ABC-123"));
/// assert!(is_strict_code_candidate("ssis"));
/// assert!(!is_strict_code_candidate("hello world"));
/// ```
pub fn is_strict_code_candidate(keyword: &str) -> bool {
    let stripped = strip_whitespace(keyword);
    if stripped.is_empty() || !stripped.is_ascii() {
        return false;
    }
    let core = without_separators(&stripped);
    if core.is_empty() || !core.chars().all(|c| c.is_ascii_alphanumeric()) {
        return false;
    }
    let has_alpha = core.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = core.chars().any(|c| c.is_ascii_digit());
    if has_alpha && has_digit {
        return true;
    }
    !has_digit && (2..=6).contains(&core.len())
}

/// Strict predicate: case-insensitive prefix match on the code aliases.
///
/// A purely alphabetic keyword must be followed by an optional `-`/`_`
/// and an ASCII digit, so `"ABP"` matches `ABP-123` but not `ABPX-001`.
pub fn build_strict_predicate(keyword: &str) -> Predicate {
    let stripped = strip_whitespace(keyword);
    let escaped = regex::escape(&stripped);
    let core = without_separators(&stripped);
    let pattern = if !core.is_empty() && core.chars().all(|c| c.is_ascii_alphabetic()) {
        format!(r"^{escaped}[-_]?[0-9]")
    } else {
        format!("^{escaped}")
    };
    Predicate::over_fields(QueryMode::StrictCode, NUMBER_KEYS, &pattern)
}
