//! Service layer for business logic.
//!
//! Each service owns a handle to the repository it needs and nothing else,
//! so the same service runs against PostgreSQL in the binary and against the
//! in-memory repositories in tests.

pub mod export_service;
pub mod import_service;
pub mod note_service;
pub mod search_service;
pub mod tag_service;

pub use export_service::ExportService;
pub use import_service::ImportService;
pub use note_service::{CreateNoteRequest, NoteService};
pub use search_service::SearchService;
pub use tag_service::{CreateTagRequest, TagService};
