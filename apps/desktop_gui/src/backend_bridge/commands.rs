//! Backend commands queued from UI to backend worker.

use client_core::CustomForm;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    RequestDefault,
    RequestCustom(CustomForm),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::RequestDefault => "request_default",
            Self::RequestCustom(_) => "request_custom",
        }
    }
}
