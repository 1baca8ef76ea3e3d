//! Notification banner state.
//!
//! Two-action state: `show` sets a message and severity, `hide` flips
//! visibility while retaining the previous message and severity (so a
//! fade-out does not blank the banner mid-transition). Consumers watch for
//! changes over a `watch` channel.

use tokio::sync::watch;

/// Severity of a banner notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeSeverity {
    Error,
    Warning,
    Info,
    Success,
}

/// Current banner state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeState {
    pub visible: bool,
    pub message: String,
    pub severity: NoticeSeverity,
}

impl Default for NoticeState {
    fn default() -> Self {
        Self {
            visible: false,
            message: String::new(),
            severity: NoticeSeverity::Info,
        }
    }
}

/// Shared banner state with show/hide actions.
#[derive(Clone)]
pub struct NoticeBoard {
    tx: watch::Sender<NoticeState>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(NoticeState::default());
        Self { tx }
    }

    /// Show a notice. A missing severity defaults to `Info`.
    pub fn show(&self, message: impl Into<String>, severity: Option<NoticeSeverity>) {
        let _ = self.tx.send(NoticeState {
            visible: true,
            message: message.into(),
            severity: severity.unwrap_or(NoticeSeverity::Info),
        });
    }

    /// Hide the banner, retaining the previous message and severity.
    pub fn hide(&self) {
        self.tx.send_modify(|state| {
            state.visible = false;
        });
    }

    /// Subscribe to banner state changes.
    pub fn subscribe(&self) -> watch::Receiver<NoticeState> {
        self.tx.subscribe()
    }

    /// Snapshot of the current state.
    pub fn current(&self) -> NoticeState {
        self.tx.borrow().clone()
    }
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new()
    }
}
