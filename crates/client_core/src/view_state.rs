//! Observable view state and the rules for updating it as requests start
//! and settle.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shared::domain::RandomResult;
use thiserror::Error;

use crate::error::{RequestError, RequestErrorKind};

/// Which settling response is allowed to update the view when requests
/// overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlePolicy {
    /// Only the most recently dispatched request may update the view; older
    /// responses are discarded when they arrive.
    #[default]
    LatestDispatched,
    /// Every response overwrites the view in arrival order.
    LastSettled,
}

#[derive(Debug, Error)]
#[error("unknown settle policy '{0}', expected 'latest_dispatched' or 'last_settled'")]
pub struct UnknownSettlePolicy(String);

impl FromStr for SettlePolicy {
    type Err = UnknownSettlePolicy;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "latest_dispatched" | "latest" => Ok(Self::LatestDispatched),
            "last_settled" | "last" => Ok(Self::LastSettled),
            _ => Err(UnknownSettlePolicy(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub data: Option<RandomResult>,
    pub loading: bool,
    pub error: Option<String>,
    /// Set together with `error`.
    pub error_kind: Option<RequestErrorKind>,
}

impl ViewState {
    pub fn phase(&self) -> ViewPhase {
        if self.loading {
            ViewPhase::InFlight
        } else if self.error.is_some() {
            ViewPhase::Failed
        } else if self.data.is_some() {
            ViewPhase::Succeeded
        } else {
            ViewPhase::Idle
        }
    }
}

/// Handed out when a request is dispatched; identifies it at settle time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
}

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleDisposition {
    Applied,
    /// A newer request was dispatched after this one; the view is untouched.
    Stale,
}

#[derive(Debug, Default)]
pub struct ViewStateController {
    state: ViewState,
    policy: SettlePolicy,
    last_generation: u64,
}

impl ViewStateController {
    pub fn new(policy: SettlePolicy) -> Self {
        Self {
            state: ViewState::default(),
            policy,
            last_generation: 0,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn policy(&self) -> SettlePolicy {
        self.policy
    }

    /// Marks a request as in flight. Previous data stays visible.
    pub fn on_request_start(&mut self) -> RequestTicket {
        self.last_generation += 1;
        self.state.loading = true;
        self.clear_error();
        RequestTicket {
            generation: self.last_generation,
        }
    }

    pub fn on_request_settle(
        &mut self,
        ticket: RequestTicket,
        outcome: &Result<RandomResult, RequestError>,
    ) -> SettleDisposition {
        if !self.accepts(ticket) {
            return SettleDisposition::Stale;
        }

        self.state.loading = false;
        match outcome {
            Ok(result) => {
                self.state.data = Some(result.clone());
                self.clear_error();
            }
            Err(err) => self.set_error(err),
        }
        SettleDisposition::Applied
    }

    /// The request future was dropped before it settled.
    pub fn on_request_abandoned(&mut self, ticket: RequestTicket) -> SettleDisposition {
        if !self.accepts(ticket) {
            return SettleDisposition::Stale;
        }
        self.state.loading = false;
        SettleDisposition::Applied
    }

    /// Input was rejected before any request went out.
    pub fn on_validation_failed(&mut self, err: &RequestError) {
        self.set_error(err);
    }

    fn set_error(&mut self, err: &RequestError) {
        self.state.error = Some(err.to_string());
        self.state.error_kind = Some(err.kind());
    }

    fn clear_error(&mut self) {
        self.state.error = None;
        self.state.error_kind = None;
    }

    fn accepts(&self, ticket: RequestTicket) -> bool {
        match self.policy {
            SettlePolicy::LatestDispatched => ticket.generation == self.last_generation,
            SettlePolicy::LastSettled => true,
        }
    }
}

#[cfg(test)]
#[path = "tests/view_state_tests.rs"]
mod tests;
