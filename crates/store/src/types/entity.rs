//! Entity metadata.
//!
//! Every collection the store manages is described by an [`EntityKind`]
//! variant carrying the metadata the query layer needs: its collection name,
//! its unique fields, and whether it declares a `documents` relation that the
//! paginator expands unconditionally.
//!
//! [`ProfileKind`] is the table that drives the role-scoped profile binder:
//! one row per profile entity, mapping it to its collection and the user role
//! it requires.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The collections managed by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    /// User accounts.
    User,
    /// Caregiver profiles.
    Caregiver,
    /// Healthcare professional profiles.
    HealthcareProfessional,
    /// Resident profiles.
    Resident,
    /// Interview candidate profiles.
    InterviewCandidate,
    /// Uploaded documents.
    Document,
    /// The company information singleton.
    CompanyInfo,
    /// Care plans.
    CarePlan,
    /// Timesheets.
    Timesheet,
    /// Attendance records.
    Attendance,
}

impl EntityKind {
    /// Returns the collection name used by storage backends.
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::User => "users",
            EntityKind::Caregiver => "caregivers",
            EntityKind::HealthcareProfessional => "healthcare_professionals",
            EntityKind::Resident => "residents",
            EntityKind::InterviewCandidate => "interview_candidates",
            EntityKind::Document => "documents",
            EntityKind::CompanyInfo => "company_info",
            EntityKind::CarePlan => "care_plans",
            EntityKind::Timesheet => "timesheets",
            EntityKind::Attendance => "attendance",
        }
    }

    /// Returns the content fields on which the backend enforces uniqueness.
    ///
    /// The unique index on `userId` for each profile collection is the
    /// authoritative guard for the one-profile-per-user invariant; the
    /// binder's application-level check only exists to produce a friendlier
    /// error message.
    pub fn unique_fields(&self) -> &'static [&'static str] {
        match self {
            EntityKind::User => &["email"],
            EntityKind::Caregiver
            | EntityKind::HealthcareProfessional
            | EntityKind::Resident
            | EntityKind::InterviewCandidate => &["userId"],
            EntityKind::CarePlan => &["name"],
            _ => &[],
        }
    }

    /// Returns true when the entity schema declares a `documents` relation.
    ///
    /// The paginator expands this relation unconditionally, in addition to
    /// any caller-supplied expansion.
    pub fn has_documents_relation(&self) -> bool {
        matches!(
            self,
            EntityKind::Caregiver | EntityKind::HealthcareProfessional | EntityKind::Resident
        )
    }

    /// All entity kinds, in declaration order.
    pub fn all() -> &'static [EntityKind] {
        &[
            EntityKind::User,
            EntityKind::Caregiver,
            EntityKind::HealthcareProfessional,
            EntityKind::Resident,
            EntityKind::InterviewCandidate,
            EntityKind::Document,
            EntityKind::CompanyInfo,
            EntityKind::CarePlan,
            EntityKind::Timesheet,
            EntityKind::Attendance,
        ]
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::User => "user",
            EntityKind::Caregiver => "caregiver",
            EntityKind::HealthcareProfessional => "healthcare professional",
            EntityKind::Resident => "resident",
            EntityKind::InterviewCandidate => "interview candidate",
            EntityKind::Document => "document",
            EntityKind::CompanyInfo => "company info",
            EntityKind::CarePlan => "care plan",
            EntityKind::Timesheet => "timesheet",
            EntityKind::Attendance => "attendance record",
        };
        f.write_str(name)
    }
}

/// User account roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// System administrator.
    Administrator,
    /// Caregiver staff member.
    Caregiver,
    /// Healthcare professional staff member.
    #[serde(rename = "HEALTHCARE_PROFESSIONAL")]
    HealthcareProfessional,
    /// Care-home resident.
    Resident,
    /// Interview candidate (the signup default).
    InterviewCandidate,
}

impl Role {
    /// The wire representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "ADMINISTRATOR",
            Role::Caregiver => "CAREGIVER",
            Role::HealthcareProfessional => "HEALTHCARE_PROFESSIONAL",
            Role::Resident => "RESIDENT",
            Role::InterviewCandidate => "INTERVIEW_CANDIDATE",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Email verification lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationState {
    /// Verification OTP issued, awaiting confirmation.
    Pending,
    /// Email verified.
    Completed,
    /// Verification abandoned.
    #[serde(rename = "NOTCOMPLETED")]
    NotCompleted,
}

/// Timesheet review states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimesheetStatus {
    /// Awaiting review.
    Pending,
    /// Approved by an administrator.
    Approved,
    /// Rejected by an administrator.
    Rejected,
}

/// Attendance states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    /// Present for the full shift.
    Present,
    /// Absent.
    Absent,
    /// Arrived late.
    Late,
    /// Left before the end of the shift.
    EarlyDeparture,
}

/// The profile entity types bound one-to-one to a [`Role`]-scoped user.
///
/// This table drives the generic profile binder: each variant names its
/// backing collection and the user role a profile of that type requires,
/// replacing per-entity near-duplicate code paths with one parameterized
/// implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    /// Caregiver profile, requires [`Role::Caregiver`].
    Caregiver,
    /// Healthcare professional profile, requires [`Role::HealthcareProfessional`].
    HealthcareProfessional,
    /// Resident profile, requires [`Role::Resident`].
    Resident,
    /// Interview candidate profile, requires [`Role::InterviewCandidate`].
    InterviewCandidate,
}

impl ProfileKind {
    /// The collection backing this profile type.
    pub fn entity(&self) -> EntityKind {
        match self {
            ProfileKind::Caregiver => EntityKind::Caregiver,
            ProfileKind::HealthcareProfessional => EntityKind::HealthcareProfessional,
            ProfileKind::Resident => EntityKind::Resident,
            ProfileKind::InterviewCandidate => EntityKind::InterviewCandidate,
        }
    }

    /// The user role a profile of this type requires at creation time.
    pub fn expected_role(&self) -> Role {
        match self {
            ProfileKind::Caregiver => Role::Caregiver,
            ProfileKind::HealthcareProfessional => Role::HealthcareProfessional,
            ProfileKind::Resident => Role::Resident,
            ProfileKind::InterviewCandidate => Role::InterviewCandidate,
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.entity().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_fields_cover_profile_invariant() {
        for kind in [
            EntityKind::Caregiver,
            EntityKind::HealthcareProfessional,
            EntityKind::Resident,
            EntityKind::InterviewCandidate,
        ] {
            assert_eq!(kind.unique_fields(), &["userId"]);
        }
    }

    #[test]
    fn documents_relation_flags() {
        assert!(EntityKind::Caregiver.has_documents_relation());
        assert!(EntityKind::Resident.has_documents_relation());
        assert!(!EntityKind::InterviewCandidate.has_documents_relation());
        assert!(!EntityKind::Document.has_documents_relation());
    }

    #[test]
    fn role_serde_round_trip() {
        let json = serde_json::to_string(&Role::HealthcareProfessional).unwrap();
        assert_eq!(json, "\"HEALTHCARE_PROFESSIONAL\"");
        let role: Role = serde_json::from_str("\"INTERVIEW_CANDIDATE\"").unwrap();
        assert_eq!(role, Role::InterviewCandidate);
    }

    #[test]
    fn profile_kind_role_mapping() {
        assert_eq!(ProfileKind::Caregiver.expected_role(), Role::Caregiver);
        assert_eq!(
            ProfileKind::InterviewCandidate.expected_role(),
            Role::InterviewCandidate
        );
        assert_eq!(ProfileKind::Resident.entity(), EntityKind::Resident);
    }

    #[test]
    fn verification_state_serde() {
        let json = serde_json::to_string(&VerificationState::NotCompleted).unwrap();
        assert_eq!(json, "\"NOTCOMPLETED\"");
    }

    #[test]
    fn attendance_status_serde() {
        let json = serde_json::to_string(&AttendanceStatus::EarlyDeparture).unwrap();
        assert_eq!(json, "\"EARLY_DEPARTURE\"");
    }
}
