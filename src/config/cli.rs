use crate::domain::model::SelectedFile;
use crate::domain::ports::Notifier;
use crate::utils::error::Result;

/// Prints failures to stderr, the terminal counterpart of the page's alert box.
#[derive(Debug, Default)]
pub struct TerminalNotifier {
    failures: usize,
}

impl TerminalNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> usize {
        self.failures
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&mut self, reason: &str) {
        self.failures += 1;
        eprintln!("❌ Failed to parse the resume: {}", reason);
    }
}

/// 讀取命令列上的一個檔案，當作一次檔案選擇
pub async fn read_selection(path: &str) -> Result<Vec<SelectedFile>> {
    let file = SelectedFile::from_path(path).await?;
    tracing::debug!("Read '{}' ({} bytes)", file.name, file.bytes.len());
    Ok(vec![file])
}
