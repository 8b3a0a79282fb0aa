//! Write-coalescing autosave for questionnaire answers

pub mod buffer;
pub mod edit;

pub use buffer::{PendingSave, WriteBuffer};
pub use edit::PendingEdit;
