//! Search-field dispatch.
//!
//! List endpoints accept `search_field` + `search_text`. Each entity exposes
//! a fixed table of accepted field names (compared case-insensitively) and
//! maps them either to a condition on the entity's own fields or to a
//! condition that only makes sense after relations have been joined. A field
//! outside the table is rejected, never silently ignored.

use crate::error::SearchError;
use crate::query::filter::Condition;
use crate::types::EntityKind;

/// Where in the pipeline a dispatched condition applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStage {
    /// Against the entity's own fields, before any join.
    Direct,
    /// Against fields produced by relation joins.
    PostJoin,
}

/// A dispatched search condition and the stage it belongs to.
#[derive(Debug, Clone)]
pub struct SearchDispatch {
    /// The stage the condition applies at.
    pub stage: SearchStage,
    /// The condition itself.
    pub condition: Condition,
}

impl SearchDispatch {
    fn direct(condition: Condition) -> Self {
        Self {
            stage: SearchStage::Direct,
            condition,
        }
    }

    fn post_join(condition: Condition) -> Self {
        Self {
            stage: SearchStage::PostJoin,
            condition,
        }
    }
}

/// Resolves a client-supplied search field for an entity.
///
/// Callers must skip dispatch entirely when the search text is empty; an
/// empty text means "no search", not "match everything containing nothing".
pub fn dispatch(
    kind: EntityKind,
    field: &str,
    text: &str,
) -> Result<SearchDispatch, SearchError> {
    let normalized = field.trim().to_ascii_lowercase();
    let dispatch = match kind {
        EntityKind::User => match normalized.as_str() {
            "email" => SearchDispatch::direct(Condition::contains("email", text)),
            "name" => SearchDispatch::direct(Condition::contains("name", text)),
            _ => return Err(unknown(kind, field)),
        },
        EntityKind::Document => match normalized.as_str() {
            "title" => SearchDispatch::direct(Condition::contains("title", text)),
            "uploadedat" => SearchDispatch::direct(Condition::contains("uploadedAt", text)),
            "documentid" => SearchDispatch::direct(Condition::id_eq("id", text)),
            "createdby.name" => {
                SearchDispatch::post_join(Condition::contains("createdBy.name", text))
            }
            "createdby.email" => {
                SearchDispatch::post_join(Condition::contains("createdBy.email", text))
            }
            "associatedusers.name" => {
                SearchDispatch::post_join(Condition::contains("associatedUsers.name", text))
            }
            "associatedusers.email" => {
                SearchDispatch::post_join(Condition::contains("associatedUsers.email", text))
            }
            _ => return Err(unknown(kind, field)),
        },
        EntityKind::Timesheet | EntityKind::Attendance => match normalized.as_str() {
            "date" => SearchDispatch::direct(Condition::contains("date", text)),
            "status" => SearchDispatch::direct(Condition::contains("status", text)),
            "user.name" => SearchDispatch::post_join(Condition::contains("user.name", text)),
            "user.email" => SearchDispatch::post_join(Condition::contains("user.email", text)),
            _ => return Err(unknown(kind, field)),
        },
        _ => return Err(unknown(kind, field)),
    };
    Ok(dispatch)
}

fn unknown(kind: EntityKind, field: &str) -> SearchError {
    SearchError::UnknownField {
        kind,
        field: field.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_names_are_case_insensitive() {
        let dispatched = dispatch(EntityKind::Document, "CreatedBy.Email", "smith").unwrap();
        assert_eq!(dispatched.stage, SearchStage::PostJoin);
        assert!(dispatched
            .condition
            .matches(&json!({"createdBy": {"email": "smith@x.com"}})));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = dispatch(EntityKind::User, "role", "ADMIN").unwrap_err();
        assert!(matches!(err, SearchError::UnknownField { .. }));
        assert!(dispatch(EntityKind::CarePlan, "name", "x").is_err());
    }

    #[test]
    fn document_id_dispatches_to_id_equality() {
        let dispatched = dispatch(EntityKind::Document, "documentId", "not-a-uuid").unwrap();
        assert_eq!(dispatched.stage, SearchStage::Direct);
        // Unparseable id means no match, not an error.
        assert!(!dispatched.condition.matches(&json!({"id": "not-a-uuid"})));
    }

    #[test]
    fn timesheet_and_attendance_share_tables() {
        for kind in [EntityKind::Timesheet, EntityKind::Attendance] {
            assert_eq!(
                dispatch(kind, "status", "PENDING").unwrap().stage,
                SearchStage::Direct
            );
            assert_eq!(
                dispatch(kind, "user.name", "alice").unwrap().stage,
                SearchStage::PostJoin
            );
        }
    }
}
