//! Foundation value objects shared across the domain.
//!
//! Identifiers, timestamps, record status, and the error taxonomy every
//! layer above builds on.

mod errors;
mod ids;
mod record_status;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{MacroprocessId, ProcessId, SubprocessId};
pub use record_status::RecordStatus;
pub use timestamp::Timestamp;
