//! Capabilities the embedding application provides to `RequestClient`.
//!
//! # Design
//! The client never reaches for ambient globals. Notifications, navigation,
//! dialogs, storage and the network all arrive through a `Host`, so several
//! independent clients can coexist and tests can substitute recorders.

use std::sync::Arc;

use crate::storage::Storage;
use crate::transport::Transport;

/// A transient error message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub content: String,
}

impl Notice {
    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Displays transient notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Moves the user between views.
pub trait Navigator: Send + Sync {
    /// The location the user is on, used as the post-login return target.
    fn current_location(&self) -> String;
    fn navigate(&self, target: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptReason {
    /// Business status 401.
    NotLoggedIn,
    /// Business status 402.
    SessionExpired,
}

/// A modal asking the user to (re-)authenticate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginPrompt {
    pub reason: PromptReason,
    pub content: String,
    pub ok_text: String,
}

impl LoginPrompt {
    pub fn new(reason: PromptReason) -> Self {
        let content = match reason {
            PromptReason::NotLoggedIn => "You are not logged in. Click OK to log in.",
            PromptReason::SessionExpired => "Your login has expired. Click OK to log in again.",
        };
        Self {
            reason,
            content: content.to_string(),
            ok_text: "OK".to_string(),
        }
    }
}

/// Shows modal dialogs. Confirmation is reported back through
/// `RequestClient::confirm_login_prompt`.
pub trait Dialogs: Send + Sync {
    fn show_login_prompt(&self, prompt: &LoginPrompt);
}

/// Everything the client needs from its environment.
#[derive(Clone)]
pub struct Host {
    pub transport: Arc<dyn Transport>,
    pub storage: Storage,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
    pub dialogs: Arc<dyn Dialogs>,
}
