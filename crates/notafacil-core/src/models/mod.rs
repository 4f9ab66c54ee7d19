//! Domain entities and the plain records they serialize to.

use chrono::{DateTime, SubsecRound, Utc};

mod note;
mod tag;
mod transfer;

pub use note::{Note, NoteBuilder, NoteRecord};
pub use tag::{Tag, TagRecord};
pub use transfer::{ImportMode, ImportRecord, ImportSummary, SearchNotesRequest, SearchScope};

/// Timestamps are kept at microsecond precision, the finest PostgreSQL
/// stores, so a note reads back with the instants it was written with.
pub(crate) fn stored_instant(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(6)
}
