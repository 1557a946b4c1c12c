//! Document filters.
//!
//! A [`Filter`] is a conjunction of [`Condition`]s, optionally joined with
//! OR groups for free-text search across several fields. Conditions address
//! fields by dotted path; a path segment that lands on an array matches when
//! any element matches, which is how searches reach into joined relations
//! like `associatedUsers.name`.

use regex::{Regex, RegexBuilder};
use serde_json::Value;

use crate::types::RecordId;

/// A single comparison against a dotted field path.
#[derive(Debug, Clone)]
pub struct Condition {
    path: Vec<String>,
    predicate: Predicate,
}

/// How a condition compares the addressed value.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Exact JSON equality.
    Eq(Value),

    /// Case-insensitive substring match against the string form.
    Contains(Regex),

    /// Record-id equality. `None` when the client-supplied id failed to
    /// parse; such a condition matches nothing rather than erroring.
    IdEq(Option<RecordId>),
}

impl Condition {
    /// Exact-equality condition.
    pub fn eq(path: &str, value: impl Into<Value>) -> Self {
        Self {
            path: split_path(path),
            predicate: Predicate::Eq(value.into()),
        }
    }

    /// Case-insensitive substring condition.
    pub fn contains(path: &str, text: &str) -> Self {
        Self {
            path: split_path(path),
            predicate: Predicate::Contains(substring_regex(text)),
        }
    }

    /// Id-equality condition. Invalid ids match nothing.
    pub fn id_eq(path: &str, raw: &str) -> Self {
        Self {
            path: split_path(path),
            predicate: Predicate::IdEq(RecordId::parse(raw)),
        }
    }

    /// The dotted path this condition addresses.
    pub fn path(&self) -> String {
        self.path.join(".")
    }

    /// Evaluates the condition against a document.
    pub fn matches(&self, document: &Value) -> bool {
        let mut candidates = Vec::new();
        collect(document, &self.path, &mut candidates);
        candidates.iter().any(|value| self.predicate.matches(value))
    }
}

impl Predicate {
    fn matches(&self, value: &Value) -> bool {
        match self {
            Predicate::Eq(expected) => value == expected,
            Predicate::Contains(regex) => match value {
                Value::String(s) => regex.is_match(s),
                Value::Number(n) => regex.is_match(&n.to_string()),
                _ => false,
            },
            Predicate::IdEq(Some(id)) => value.as_str() == Some(id.to_string().as_str()),
            Predicate::IdEq(None) => false,
        }
    }
}

/// A conjunction of conditions plus optional OR groups.
///
/// A document matches when every condition matches and, for each OR group,
/// at least one of the group's conditions matches.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    conditions: Vec<Condition>,
    any_of: Vec<Vec<Condition>>,
}

impl Filter {
    /// The filter matching every document.
    pub fn all() -> Self {
        Self::default()
    }

    /// Adds a required condition.
    pub fn and(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Adds an OR group; at least one of its conditions must match.
    pub fn any_of(mut self, group: Vec<Condition>) -> Self {
        if !group.is_empty() {
            self.any_of.push(group);
        }
        self
    }

    /// Returns true when the filter has no conditions at all.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.any_of.is_empty()
    }

    /// Evaluates the filter against a document.
    pub fn matches(&self, document: &Value) -> bool {
        self.conditions.iter().all(|c| c.matches(document))
            && self
                .any_of
                .iter()
                .all(|group| group.iter().any(|c| c.matches(document)))
    }
}

fn split_path(path: &str) -> Vec<String> {
    path.split('.').map(str::to_string).collect()
}

/// Compiles a case-insensitive substring matcher.
fn substring_regex(text: &str) -> Regex {
    RegexBuilder::new(&regex::escape(text))
        .case_insensitive(true)
        .build()
        .expect("escaped pattern is always a valid regex")
}

/// Collects every value reachable via `path`, descending into arrays with
/// any-element semantics.
fn collect<'a>(value: &'a Value, path: &[String], out: &mut Vec<&'a Value>) {
    match path.split_first() {
        None => out.push(value),
        Some((head, rest)) => match value {
            Value::Object(map) => {
                if let Some(next) = map.get(head) {
                    collect(next, rest, out);
                }
            }
            Value::Array(items) => {
                for item in items {
                    collect(item, path, out);
                }
            }
            _ => {}
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn contains_is_case_insensitive() {
        let condition = Condition::contains("name", "ALICE");
        assert!(condition.matches(&json!({"name": "alice smith"})));
        assert!(!condition.matches(&json!({"name": "bob"})));
    }

    #[test]
    fn contains_escapes_metacharacters() {
        let condition = Condition::contains("title", "plan (v2)");
        assert!(condition.matches(&json!({"title": "Care plan (v2) final"})));
        assert!(!condition.matches(&json!({"title": "Care plan v2"})));
    }

    #[test]
    fn dotted_path_traverses_objects() {
        let condition = Condition::contains("createdBy.email", "b.com");
        assert!(condition.matches(&json!({"createdBy": {"email": "a@b.com"}})));
        assert!(!condition.matches(&json!({"createdBy": {"email": "a@c.org"}})));
        assert!(!condition.matches(&json!({"createdBy": null})));
    }

    #[test]
    fn arrays_match_any_element() {
        let doc = json!({
            "associatedUsers": [
                {"name": "Alice"},
                {"name": "Bob"}
            ]
        });
        assert!(Condition::contains("associatedUsers.name", "bob").matches(&doc));
        assert!(!Condition::contains("associatedUsers.name", "carol").matches(&doc));
    }

    #[test]
    fn invalid_id_matches_nothing() {
        let condition = Condition::id_eq("id", "garbage");
        assert!(!condition.matches(&json!({"id": "garbage"})));
    }

    #[test]
    fn id_eq_matches_record_ids() {
        let id = RecordId::new();
        let condition = Condition::id_eq("id", &id.to_string());
        assert!(condition.matches(&json!({"id": id.to_string()})));
    }

    #[test]
    fn or_groups_require_one_branch() {
        let filter = Filter::all()
            .and(Condition::eq("role", "RESIDENT"))
            .any_of(vec![
                Condition::contains("name", "smith"),
                Condition::contains("email", "smith"),
            ]);
        assert!(filter.matches(&json!({"role": "RESIDENT", "email": "smith@x.com"})));
        assert!(!filter.matches(&json!({"role": "RESIDENT", "email": "jones@x.com"})));
        assert!(!filter.matches(&json!({"role": "CAREGIVER", "name": "smith"})));
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(Filter::all().matches(&json!({"anything": true})));
        assert!(Filter::all().is_empty());
    }
}
