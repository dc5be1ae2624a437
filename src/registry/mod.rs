//! File registry
//!
//! In-memory mapping from filename to content. Uploads overwrite
//! (last-write-wins), nothing is ever deleted, and listings are taken as a
//! snapshot under a single lock acquisition.

mod store;

pub use store::{FileEntry, FileRegistry, FileSummary};
