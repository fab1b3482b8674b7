use crate::view::{ids, View};
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiState {
    /// Loader hidden, results visible.
    #[default]
    Idle,
    /// Loader visible, results hidden.
    Busy,
}

/// Drives the loader/results visibility pair around each submission.
#[derive(Debug)]
pub struct UiStateCoordinator {
    state: watch::Sender<UiState>,
    settled: AtomicU64,
}

impl UiStateCoordinator {
    pub fn new() -> Self {
        let (state, _) = watch::channel(UiState::Idle);
        Self {
            state,
            settled: AtomicU64::new(0),
        }
    }

    pub fn state(&self) -> UiState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.state.subscribe()
    }

    /// Number of submission cycles that have returned to idle.
    pub fn settled_cycles(&self) -> u64 {
        self.settled.load(Ordering::SeqCst)
    }

    /// 進入 busy，回傳的 guard 被 drop 時一定回到 idle（成功、失敗或 panic 皆然）
    pub fn begin<'a>(&'a self, view: &'a mut View) -> BusyGuard<'a> {
        apply(view, UiState::Busy);
        self.state.send_replace(UiState::Busy);
        tracing::debug!("UI state: idle -> busy");
        BusyGuard {
            view,
            coordinator: self,
        }
    }

    fn release(&self, view: &mut View) {
        apply(view, UiState::Idle);
        self.state.send_replace(UiState::Idle);
        self.settled.fetch_add(1, Ordering::SeqCst);
        tracing::debug!("UI state: busy -> idle");
    }
}

impl Default for UiStateCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

fn apply(view: &mut View, state: UiState) {
    let (loader, results) = match state {
        UiState::Idle => ("none", "block"),
        UiState::Busy => ("block", "none"),
    };
    view.update(ids::LOADER, |el| el.set_style("display", loader));
    view.update(ids::RESULTS_CONTAINER, |el| el.set_style("display", results));
}

/// Scoped busy state. Dereferences to the view so rendering happens through it.
pub struct BusyGuard<'a> {
    view: &'a mut View,
    coordinator: &'a UiStateCoordinator,
}

impl Deref for BusyGuard<'_> {
    type Target = View;

    fn deref(&self) -> &View {
        &*self.view
    }
}

impl DerefMut for BusyGuard<'_> {
    fn deref_mut(&mut self) -> &mut View {
        &mut *self.view
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.coordinator.release(self.view);
    }
}
