use std::fmt;

use crate::view_state::ViewState;

pub const LOADING_TEXT: &str = "Generating quantum randomness...";

/// Display parts derived from a [`ViewState`]. Loading and data can be shown
/// together while a newer request is in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedView {
    pub loading: Option<&'static str>,
    pub error: Option<String>,
    pub data: Option<String>,
}

pub fn render(state: &ViewState) -> RenderedView {
    RenderedView {
        loading: state.loading.then_some(LOADING_TEXT),
        error: state.error.as_ref().map(|err| format!("Error: {err}")),
        data: state.data.as_ref().map(|data| {
            serde_json::to_string_pretty(data)
                .unwrap_or_else(|err| format!("<unprintable result: {err}>"))
        }),
    }
}

impl RenderedView {
    pub fn is_empty(&self) -> bool {
        self.loading.is_none() && self.error.is_none() && self.data.is_none()
    }
}

impl fmt::Display for RenderedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(3);
        if let Some(loading) = self.loading {
            parts.push(loading.to_string());
        }
        if let Some(error) = &self.error {
            parts.push(error.clone());
        }
        if let Some(data) = &self.data {
            parts.push(data.clone());
        }
        write!(f, "{}", parts.join("\n"))
    }
}
