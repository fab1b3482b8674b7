pub mod dashboard;
pub mod input;
pub mod renderer;
pub mod submitter;
pub mod ui_state;

pub use crate::domain::model::{FieldValue, ParsedResult, SelectedFile, SubmissionRequest};
pub use crate::domain::ports::{FilePicker, Notifier, Submitter};
pub use crate::utils::error::Result;
