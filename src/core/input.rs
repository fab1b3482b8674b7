use crate::domain::model::SelectedFile;
use crate::view::{ids, View};

const DRAGOVER_CLASS: &str = "dragover";

/// Where a file list came from.
#[derive(Debug, Clone)]
pub enum FileSource {
    Picker(Vec<SelectedFile>),
    Drop(Vec<SelectedFile>),
}

impl FileSource {
    pub fn files(&self) -> &[SelectedFile] {
        match self {
            FileSource::Picker(files) | FileSource::Drop(files) => files,
        }
    }

    fn into_first(self) -> Option<SelectedFile> {
        match self {
            FileSource::Picker(files) | FileSource::Drop(files) => files.into_iter().next(),
        }
    }

    fn origin(&self) -> &'static str {
        match self {
            FileSource::Picker(_) => "picker",
            FileSource::Drop(_) => "drop",
        }
    }
}

/// Page events the dashboard reacts to.
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// The file input's `change` event.
    FileInputChanged(Vec<SelectedFile>),
    DragOver,
    DragLeave,
    Drop(Vec<SelectedFile>),
    DropZoneClicked,
    FormSubmitted,
}

#[derive(Debug, Clone)]
pub enum Action {
    SetDropZoneActive(bool),
    OpenFilePicker,
    SelectFile(FileSource),
}

/// Result of dispatching one event.
#[derive(Debug, Clone)]
pub struct Dispatch {
    /// Whether the browser default (navigation / file open / submit) is suppressed.
    pub default_prevented: bool,
    pub actions: Vec<Action>,
}

/// 事件對應表：每個頁面事件對應到要執行的動作
pub fn dispatch(event: UiEvent) -> Dispatch {
    match event {
        UiEvent::FileInputChanged(files) => Dispatch {
            default_prevented: false,
            actions: vec![Action::SelectFile(FileSource::Picker(files))],
        },
        UiEvent::DragOver => Dispatch {
            default_prevented: true,
            actions: vec![Action::SetDropZoneActive(true)],
        },
        UiEvent::DragLeave => Dispatch {
            default_prevented: false,
            actions: vec![Action::SetDropZoneActive(false)],
        },
        UiEvent::Drop(files) => Dispatch {
            default_prevented: true,
            actions: vec![
                Action::SetDropZoneActive(false),
                Action::SelectFile(FileSource::Drop(files)),
            ],
        },
        UiEvent::DropZoneClicked => Dispatch {
            default_prevented: false,
            actions: vec![Action::OpenFilePicker],
        },
        // 表單只是版面容器，永遠不送出
        UiEvent::FormSubmitted => Dispatch {
            default_prevented: true,
            actions: Vec::new(),
        },
    }
}

pub fn set_drop_zone_active(view: &mut View, active: bool) {
    view.update(ids::DROP_ZONE, |el| {
        if active {
            el.add_class(DRAGOVER_CLASS);
        } else {
            el.remove_class(DRAGOVER_CLASS);
        }
    });
}

/// Takes the first file of a non-empty list and shows its name.
/// An empty list is a no-op and leaves the page untouched.
pub fn select_file(view: &mut View, source: FileSource) -> Option<SelectedFile> {
    let origin = source.origin();
    let count = source.files().len();
    let file = source.into_first()?;

    if count > 1 {
        tracing::debug!(
            "{} file(s) ignored, only '{}' is used",
            count - 1,
            file.name
        );
    }
    tracing::info!("📄 Selected '{}' via {}", file.name, origin);

    view.update(ids::FILE_NAME, |el| el.set_text(&file.name));
    view.update(ids::FILE_INPUT, |el| el.set_attribute("value", &file.name));
    Some(file)
}
