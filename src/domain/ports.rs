use crate::domain::model::{ParsedResult, SelectedFile, SubmissionRequest};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 把履歷送到解析服務
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, request: SubmissionRequest) -> Result<ParsedResult>;
}

/// Blocking user-visible notification, the counterpart of a browser `alert`.
pub trait Notifier {
    fn notify(&mut self, reason: &str);
}

/// Native file picker opened when the drop zone is clicked.
pub trait FilePicker {
    fn pick(&mut self) -> Vec<SelectedFile>;
}
