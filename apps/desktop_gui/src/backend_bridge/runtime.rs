//! Backend worker: owns the tokio runtime and the random client, runs each
//! queued command as its own task and forwards view changes to the UI.

use std::{sync::Arc, thread, time::Duration};

use client_core::{ClientEvent, ClientSettings, RandomClient, ViewState};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use tokio::sync::broadcast::{self, error::RecvError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};

const UI_RETRY_INTERVAL: Duration = Duration::from_millis(16);

pub fn launch(settings: ClientSettings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::backend_startup(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                ))));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let client = RandomClient::new(&settings);
        let _ = ui_tx.try_send(UiEvent::Info(format!(
            "Using random service at {}",
            client.api_url()
        )));
        runtime.spawn(forward_view_changes(
            client.subscribe_events(),
            ui_tx.clone(),
        ));

        for cmd in cmd_rx.iter() {
            tracing::debug!(command = cmd.name(), "backend received command");
            runtime.spawn(run_command(client.clone(), cmd));
        }
        tracing::info!("ui command queue closed; backend worker exiting");
    });
}

async fn run_command(client: Arc<RandomClient>, cmd: BackendCommand) {
    let outcome = match cmd {
        BackendCommand::RequestDefault => client.request_default().await,
        BackendCommand::RequestCustom(form) => client.request_custom(&form).await,
    };
    if let Err(err) = outcome {
        // Already folded into the view state.
        tracing::debug!("request finished with error: {err}");
    }
}

/// Forwards client snapshots to the UI. When the UI queue is full the newest
/// snapshot is held back and retried; older held snapshots are replaced.
async fn forward_view_changes(
    mut events: broadcast::Receiver<ClientEvent>,
    ui_tx: Sender<UiEvent>,
) {
    let mut pending: Option<ViewState> = None;
    loop {
        let received = if pending.is_some() {
            tokio::select! {
                received = events.recv() => Some(received),
                _ = tokio::time::sleep(UI_RETRY_INTERVAL) => None,
            }
        } else {
            Some(events.recv().await)
        };

        match received {
            Some(Ok(ClientEvent::ViewChanged(state))) => pending = Some(state),
            Some(Err(RecvError::Lagged(skipped))) => {
                tracing::warn!(skipped, "backend fell behind client view updates");
            }
            Some(Err(RecvError::Closed)) => break,
            None => {}
        }

        if let Some(state) = pending.take() {
            match ui_tx.try_send(UiEvent::ViewChanged(state)) {
                Ok(()) => {}
                Err(TrySendError::Full(UiEvent::ViewChanged(state))) => {
                    tracing::debug!("ui event queue full; holding latest view update");
                    pending = Some(state);
                }
                Err(TrySendError::Full(_)) => {}
                Err(TrySendError::Disconnected(_)) => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::{RequestError, RequestErrorKind};
    use crossbeam_channel::bounded;

    #[tokio::test]
    async fn full_ui_queue_keeps_newest_view_update() {
        let (client_tx, client_rx) = broadcast::channel(8);
        let (ui_tx, ui_rx) = bounded(1);
        ui_tx
            .try_send(UiEvent::Info("occupied".to_string()))
            .expect("fill queue");
        let forwarder = tokio::spawn(forward_view_changes(client_rx, ui_tx));

        let loading = ViewState {
            loading: true,
            ..ViewState::default()
        };
        let err = RequestError::Network("connection refused".to_string());
        let failed = ViewState {
            error: Some(err.to_string()),
            error_kind: Some(RequestErrorKind::Network),
            ..ViewState::default()
        };
        client_tx
            .send(ClientEvent::ViewChanged(loading))
            .expect("send loading");
        client_tx
            .send(ClientEvent::ViewChanged(failed.clone()))
            .expect("send failed");
        tokio::time::sleep(UI_RETRY_INTERVAL * 3).await;

        assert!(matches!(ui_rx.try_recv(), Ok(UiEvent::Info(_))));
        let delivered = tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                if let Ok(event) = ui_rx.try_recv() {
                    return event;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("view update delivered");
        match delivered {
            UiEvent::ViewChanged(state) => assert_eq!(state, failed),
            _ => panic!("expected a view update"),
        }

        drop(client_tx);
        forwarder.await.expect("forwarder exits");
    }
}
