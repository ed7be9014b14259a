//! # spool-core
//!
//! Core library for Spool: the workflow controller that mediates between
//! a pipeline design tool and its Git backend, the commit identity model,
//! and the diff annotator that marks changed steps on the design canvas.

pub mod bridge;
pub mod config;
pub mod decor;
pub mod document;
mod error;
pub mod identity;
pub mod workflow;

pub use bridge::{DialogStatus, MessageKind, PresentationBridge, PromptReply, SourceObserver};
pub use config::Config;
pub use error::{Error, Result};
pub use identity::CommitIdentity;
pub use workflow::WorkflowController;
