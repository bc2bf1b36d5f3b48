use std::sync::Arc;

use parking_lot::Mutex;
use shared::domain::RandomResult;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

pub mod config;
pub mod error;
pub mod render;
pub mod request;
pub mod transport;
pub mod view_state;

pub use config::{load_settings, ClientSettings};
pub use error::{RequestError, RequestErrorKind};
pub use render::{render, RenderedView};
pub use request::{CustomForm, RandomRequest};
pub use transport::{HttpTransport, MissingTransport, RandomTransport};
pub use view_state::{
    RequestTicket, SettleDisposition, SettlePolicy, ViewPhase, ViewState, ViewStateController,
};

const EVENT_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub enum ClientEvent {
    ViewChanged(ViewState),
}

/// Builds random requests from user input, sends them, and folds every
/// outcome into a single [`ViewState`].
///
/// Requests may overlap; the configured [`SettlePolicy`] decides which
/// response ends up in the view.
pub struct RandomClient {
    api_url: String,
    transport: Arc<dyn RandomTransport>,
    view: Mutex<ViewStateController>,
    events: broadcast::Sender<ClientEvent>,
}

impl RandomClient {
    pub fn new(settings: &ClientSettings) -> Arc<Self> {
        Self::new_with_transport(
            settings.api_url.clone(),
            settings.settle_policy,
            Arc::new(HttpTransport::new(settings.request_timeout)),
        )
    }

    pub fn new_with_transport(
        api_url: impl Into<String>,
        settle_policy: SettlePolicy,
        transport: Arc<dyn RandomTransport>,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            api_url: api_url.into(),
            transport,
            view: Mutex::new(ViewStateController::new(settle_policy)),
            events,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn view(&self) -> ViewState {
        self.view.lock().state().clone()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    /// `GET {api_url}/`: 256 random bits.
    pub async fn request_default(&self) -> Result<RandomResult, RequestError> {
        self.dispatch(RandomRequest::Default).await
    }

    /// `GET {api_url}/random?length=..` with the range attached only when
    /// both bounds are filled in. A blank length fails before dispatch.
    pub async fn request_custom(&self, form: &CustomForm) -> Result<RandomResult, RequestError> {
        let request = match RandomRequest::from_form(form) {
            Ok(request) => request,
            Err(err) => {
                warn!("custom request rejected: {err}");
                self.update_view(|view| view.on_validation_failed(&err));
                return Err(err);
            }
        };
        self.dispatch(request).await
    }

    async fn dispatch(&self, request: RandomRequest) -> Result<RandomResult, RequestError> {
        let url = request.url(&self.api_url);
        let ticket = self.update_view(|view| view.on_request_start());
        info!(
            generation = ticket.generation(),
            kind = request.label(),
            url = %url,
            "dispatching random request"
        );

        let in_flight = InFlight::new(self, ticket);
        let outcome = self.transport.fetch(&url).await;
        let disposition = in_flight.settle(&outcome);

        match (&outcome, disposition) {
            (_, SettleDisposition::Stale) => debug!(
                generation = ticket.generation(),
                "discarding response superseded by a newer request"
            ),
            (Ok(result), SettleDisposition::Applied) => {
                if !result.has_consistent_range() {
                    warn!(
                        generation = ticket.generation(),
                        "service returned only one of min/max"
                    );
                }
                info!(
                    generation = ticket.generation(),
                    bits_length = result.bits_length,
                    bounded = result.is_bounded(),
                    "random request settled"
                );
            }
            (Err(err), SettleDisposition::Applied) => warn!(
                generation = ticket.generation(),
                kind = ?err.kind(),
                "random request failed: {err}"
            ),
        }

        outcome
    }

    fn update_view<R>(&self, apply: impl FnOnce(&mut ViewStateController) -> R) -> R {
        let mut view = self.view.lock();
        let out = apply(&mut view);
        // Sent under the lock so subscribers see snapshots in mutation order.
        // No subscribers is fine.
        let _ = self
            .events
            .send(ClientEvent::ViewChanged(view.state().clone()));
        out
    }
}

/// Releases the loading flag if the request future is dropped before its
/// response is recorded.
struct InFlight<'a> {
    client: &'a RandomClient,
    ticket: RequestTicket,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn new(client: &'a RandomClient, ticket: RequestTicket) -> Self {
        Self {
            client,
            ticket,
            armed: true,
        }
    }

    fn settle(mut self, outcome: &Result<RandomResult, RequestError>) -> SettleDisposition {
        self.armed = false;
        let ticket = self.ticket;
        self.client
            .update_view(|view| view.on_request_settle(ticket, outcome))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            let ticket = self.ticket;
            debug!(generation = ticket.generation(), "random request abandoned");
            self.client
                .update_view(|view| view.on_request_abandoned(ticket));
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
