pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod view;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::toml_config::TomlConfig;
pub use core::dashboard::{Dashboard, SubmissionOutcome};
pub use core::input::{FileSource, UiEvent};
pub use core::submitter::HttpSubmitter;
pub use core::ui_state::UiState;
pub use domain::model::{ParsedResult, SelectedFile};
pub use utils::error::{DashError, Result};
pub use view::View;
