//! Contracts between the workflow controller and the host UI.
//!
//! The controller never draws anything itself: confirmations, prompts,
//! and notifications go through [`PresentationBridge`], and view
//! refreshes go through [`SourceObserver`]. Both are implemented by the
//! host (the CLI ships an `inquire`-backed bridge; a design tool wires
//! in its own dialogs).

/// Terminal status of a modal dialog.
///
/// Every dialog returns one of these before the initiating call
/// proceeds; there is no fire-and-forget dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogStatus {
    Accept,
    Cancel,
}

/// Classification of a notification message.
///
/// Typed so callers and tests can branch on the kind instead of
/// matching display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Error,
}

/// Reply from a prompt dialog.
#[derive(Debug, Clone)]
pub struct PromptReply {
    /// How the dialog was closed.
    pub status: DialogStatus,
    /// The entered value; meaningful only on [`DialogStatus::Accept`].
    pub value: String,
}

impl PromptReply {
    /// An accepted reply carrying the given value.
    #[must_use]
    pub fn accepted(value: impl Into<String>) -> Self {
        Self {
            status: DialogStatus::Accept,
            value: value.into(),
        }
    }

    /// A cancelled reply.
    #[must_use]
    pub fn cancelled() -> Self {
        Self {
            status: DialogStatus::Cancel,
            value: String::new(),
        }
    }
}

/// Synchronous dialog surface the controller reports through.
pub trait PresentationBridge {
    /// Ask a yes/no question; blocks until answered.
    fn confirm(&self, title: &str, message: &str) -> DialogStatus;

    /// Show a blocking notification.
    fn message(&self, kind: MessageKind, text: &str);

    /// Ask for a line of input, pre-filled with `initial`.
    fn prompt(&self, title: &str, initial: &str) -> PromptReply;
}

/// Receiver for the "source changed" signal fired after an operation
/// alters repository state, so dependent views can refresh.
pub trait SourceObserver {
    fn source_changed(&self);
}

/// No-op observer for headless callers.
impl SourceObserver for () {
    fn source_changed(&self) {}
}
