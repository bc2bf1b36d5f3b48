//! UI/backend events and error modeling for desktop GUI controller.

use client_core::{RequestErrorKind, ViewState};

pub enum UiEvent {
    Info(String),
    ViewChanged(ViewState),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Service,
    Validation,
}

impl From<RequestErrorKind> for UiErrorCategory {
    fn from(kind: RequestErrorKind) -> Self {
        match kind {
            RequestErrorKind::Network => Self::Transport,
            RequestErrorKind::Http | RequestErrorKind::Parse => Self::Service,
            RequestErrorKind::Validation => Self::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Request,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn backend_startup(message: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Transport,
            context: UiErrorContext::BackendStartup,
            message: message.into(),
        }
    }

    /// Error currently shown by the view, if any.
    pub fn from_view(view: &ViewState) -> Option<Self> {
        let message = view.error.clone()?;
        let kind = view.error_kind?;
        Some(Self {
            category: kind.into(),
            context: UiErrorContext::Request,
            message,
        })
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// One-line hint shown under the error text.
    pub fn hint(&self) -> &'static str {
        match (self.context(), self.category()) {
            (UiErrorContext::BackendStartup, _) => "Restart the app to retry.",
            (_, UiErrorCategory::Transport) => {
                "Service unreachable; check the API URL and network, then retry."
            }
            (_, UiErrorCategory::Validation) => "Fill in the bit length and try again.",
            (_, UiErrorCategory::Service) => "The service rejected the request or answered unexpectedly.",
        }
    }
}
