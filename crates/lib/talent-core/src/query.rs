//! Candidate search filter construction.
//!
//! A free-text search term becomes a [`FilterPredicate`]: an OR over
//! field-level conditions. Integer terms match the numeric fields exactly;
//! every other term is a case-insensitive substring match across the text
//! fields. The two branches never mix.

use serde_json::Value;
use talent_store::schema::{CANDIDATE_NUMERIC_FIELDS, CANDIDATE_TEXT_FIELDS};

/// A single field-level condition inside a [`FilterPredicate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Field equals the integer value.
    Equals { field: &'static str, value: i64 },
    /// Field's text form contains the pattern, ignoring case.
    Contains { field: &'static str, pattern: String },
}

impl Condition {
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Equals { field, .. } | Self::Contains { field, .. } => *field,
        }
    }
}

/// Logical OR of conditions. No conditions means every record matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPredicate {
    any_of: Vec<Condition>,
}

/// A predicate rendered into a `SurrealQL` clause plus its bound parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SurrealFilter {
    pub clause: String,
    pub bindings: Vec<(String, Value)>,
}

impl FilterPredicate {
    #[must_use]
    pub const fn match_all() -> Self {
        Self { any_of: Vec::new() }
    }

    #[must_use]
    pub fn is_match_all(&self) -> bool {
        self.any_of.is_empty()
    }

    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.any_of
    }

    /// Renders the predicate as a `WHERE` body, or `None` for match-all.
    ///
    /// Field names come from the schema constants; search text is only ever
    /// passed as a bound parameter.
    #[must_use]
    pub fn to_surql(&self) -> Option<SurrealFilter> {
        if self.is_match_all() {
            return None;
        }
        let mut terms = Vec::with_capacity(self.any_of.len());
        let mut bindings = Vec::with_capacity(self.any_of.len());
        for (index, condition) in self.any_of.iter().enumerate() {
            let param = format!("p{index}");
            match condition {
                Condition::Equals { field, value } => {
                    terms.push(format!("{field} = ${param}"));
                    bindings.push((param, Value::from(*value)));
                }
                Condition::Contains { field, pattern } => {
                    terms.push(format!(
                        "string::contains(string::lowercase(<string> {field}), ${param})"
                    ));
                    bindings.push((param, Value::from(pattern.to_lowercase())));
                }
            }
        }
        Some(SurrealFilter {
            clause: terms.join(" OR "),
            bindings,
        })
    }
}

/// Builds the candidate filter for an optional search term.
///
/// Absent and empty terms both match everything. Integers outside the `i64`
/// range are not numbers here and go through the text branch.
#[must_use]
pub fn build(search: Option<&str>) -> FilterPredicate {
    let Some(term) = search.filter(|term| !term.is_empty()) else {
        return FilterPredicate::match_all();
    };

    let any_of = match parse_integer(term) {
        Some(value) => CANDIDATE_NUMERIC_FIELDS
            .into_iter()
            .map(|field| Condition::Equals { field, value })
            .collect(),
        None => CANDIDATE_TEXT_FIELDS
            .into_iter()
            .map(|field| Condition::Contains {
                field,
                pattern: term.to_string(),
            })
            .collect(),
    };
    FilterPredicate { any_of }
}

fn parse_integer(term: &str) -> Option<i64> {
    term.trim_ascii().parse::<i64>().ok()
}
