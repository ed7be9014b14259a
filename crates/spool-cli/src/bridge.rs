//! Terminal implementations of the presentation bridge and the
//! source-changed observer.

use std::cell::Cell;

use inquire::{Confirm, Text};
use spool_core::{DialogStatus, MessageKind, PresentationBridge, PromptReply, SourceObserver};

use crate::output;

/// Observer that remembers whether an operation changed the source,
/// so commands can report the result afterwards.
#[derive(Debug, Default)]
pub struct RefreshFlag {
    changed: Cell<bool>,
}

impl RefreshFlag {
    /// Whether a source-changed signal was received.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.changed.get()
    }
}

impl SourceObserver for RefreshFlag {
    fn source_changed(&self) {
        self.changed.set(true);
    }
}

/// Bridge that answers controller dialog requests on the terminal.
///
/// `--yes` turns confirmations into automatic accepts, and commands
/// that already received a value as an argument preset the prompt
/// reply so no interactive question is asked.
pub struct ConsoleBridge {
    assume_yes: bool,
    preset_prompt: Option<String>,
}

impl ConsoleBridge {
    #[must_use]
    pub const fn new(assume_yes: bool) -> Self {
        Self {
            assume_yes,
            preset_prompt: None,
        }
    }

    /// Answer the next prompt with `value` instead of asking.
    #[must_use]
    pub fn with_preset_prompt(mut self, value: impl Into<String>) -> Self {
        self.preset_prompt = Some(value.into());
        self
    }
}

impl PresentationBridge for ConsoleBridge {
    fn confirm(&self, _title: &str, message: &str) -> DialogStatus {
        if self.assume_yes {
            return DialogStatus::Accept;
        }
        match Confirm::new(message).with_default(true).prompt() {
            Ok(true) => DialogStatus::Accept,
            // Declined or the prompt was interrupted
            Ok(false) | Err(_) => DialogStatus::Cancel,
        }
    }

    fn message(&self, kind: MessageKind, text: &str) {
        match kind {
            MessageKind::Info => output::info(text),
            MessageKind::Success => output::success(text),
            MessageKind::Error => output::error(text),
        }
    }

    fn prompt(&self, title: &str, initial: &str) -> PromptReply {
        if let Some(value) = &self.preset_prompt {
            return PromptReply::accepted(value.clone());
        }
        match Text::new(title).with_initial_value(initial).prompt() {
            Ok(value) => PromptReply::accepted(value),
            Err(_) => PromptReply::cancelled(),
        }
    }
}
