//! Core data types shared across the store layer.

mod entity;
mod page;
mod record;

pub use entity::{
    AttendanceStatus, EntityKind, ProfileKind, Role, TimesheetStatus, VerificationState,
};
pub use page::{Page, PageRequest, ALL_ON_ONE_PAGE_LIMIT};
pub use record::{Record, RecordId};
