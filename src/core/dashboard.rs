use crate::core::input::{self, Action, Dispatch, FileSource, UiEvent};
use crate::core::renderer;
use crate::core::ui_state::{UiState, UiStateCoordinator};
use crate::domain::model::{ParsedResult, SelectedFile, SubmissionRequest};
use crate::domain::ports::{FilePicker, Notifier, Submitter};
use crate::utils::error::DashError;
use crate::view::View;
use tokio::sync::watch;

/// What a gesture ended up doing.
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// Empty selection, nothing was sent.
    Ignored,
    Rendered(ParsedResult),
    /// The user was notified; nothing was rendered.
    Failed(DashError),
}

impl SubmissionOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, SubmissionOutcome::Rendered(_))
    }
}

#[derive(Debug)]
pub struct EventOutcome {
    pub default_prevented: bool,
    pub submission: Option<SubmissionOutcome>,
}

/// Wires input, submission, rendering and the busy/idle state together.
///
/// Every submission takes `&mut self`, so a second one cannot start while the
/// first is still awaiting the parsing service.
pub struct Dashboard<S: Submitter, N: Notifier> {
    view: View,
    coordinator: UiStateCoordinator,
    submitter: S,
    notifier: N,
    picker: Option<Box<dyn FilePicker + Send>>,
}

impl<S: Submitter, N: Notifier> Dashboard<S, N> {
    pub fn new(view: View, submitter: S, notifier: N) -> Self {
        Self {
            view,
            coordinator: UiStateCoordinator::new(),
            submitter,
            notifier,
            picker: None,
        }
    }

    pub fn with_picker(mut self, picker: Box<dyn FilePicker + Send>) -> Self {
        self.picker = Some(picker);
        self
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn state(&self) -> UiState {
        self.coordinator.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.coordinator.subscribe()
    }

    pub fn settled_cycles(&self) -> u64 {
        self.coordinator.settled_cycles()
    }

    /// Runs one page event through the dispatch table and applies its actions.
    pub async fn handle_event(&mut self, event: UiEvent) -> EventOutcome {
        let Dispatch {
            default_prevented,
            actions,
        } = input::dispatch(event);

        let mut submission = None;
        for action in actions {
            match action {
                Action::SetDropZoneActive(active) => {
                    input::set_drop_zone_active(&mut self.view, active)
                }
                Action::OpenFilePicker => {
                    let files = match self.picker.as_mut() {
                        Some(picker) => picker.pick(),
                        None => {
                            tracing::warn!("No file picker available, click ignored");
                            Vec::new()
                        }
                    };
                    submission = Some(self.select_file(FileSource::Picker(files)).await);
                }
                Action::SelectFile(source) => {
                    submission = Some(self.select_file(source).await);
                }
            }
        }

        EventOutcome {
            default_prevented,
            submission,
        }
    }

    /// 選檔後立即送出；空清單不做任何事
    pub async fn select_file(&mut self, source: FileSource) -> SubmissionOutcome {
        match input::select_file(&mut self.view, source) {
            Some(file) => self.submit(file).await,
            None => {
                tracing::debug!("Empty file selection ignored");
                SubmissionOutcome::Ignored
            }
        }
    }

    /// One full cycle: busy, request, render or notify, idle.
    pub async fn submit(&mut self, file: SelectedFile) -> SubmissionOutcome {
        let request = SubmissionRequest {
            file,
            job_description: self.view.job_description(),
        };
        let file_name = request.file.name.clone();

        // guard 離開作用域時回到 idle，不論哪一條路徑
        let mut busy = self.coordinator.begin(&mut self.view);
        tracing::info!("🚀 Uploading '{}' for parsing", file_name);

        match self.submitter.submit(request).await {
            Ok(result) => {
                renderer::render(&mut busy, &result);
                tracing::info!(
                    "✅ Rendered results for '{}' (ATS score {}%)",
                    file_name,
                    result.match_percentage
                );
                SubmissionOutcome::Rendered(result)
            }
            Err(e) => {
                tracing::error!(
                    "❌ Parsing '{}' failed: {} (Category: {:?})",
                    file_name,
                    e,
                    e.category()
                );
                self.notifier.notify(&e.failure_reason());
                SubmissionOutcome::Failed(e)
            }
        }
    }
}
