//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{resolve_submission, HttpProcessApi};
use crossbeam_channel::{Receiver, Sender};
use tracing::{error, info, warn};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Starts the worker thread. Each submission runs as its own task, so
/// overlapping submissions resolve independently and the UI shows whichever
/// finishes last.
pub fn launch(api: HttpProcessApi, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                    "Falha ao iniciar o processo de envio: {err}"
                )));
                error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let api = Arc::new(api);
        info!(endpoint = %api.endpoint(), "backend worker ready");
        let _ = ui_tx.try_send(UiEvent::Info(format!("Pronto: {}", api.endpoint())));

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Submit { submission } => {
                        let api = Arc::clone(&api);
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let state = resolve_submission(api.as_ref(), &submission).await;
                            if ui_tx.try_send(UiEvent::SubmissionResolved(state)).is_err() {
                                warn!("ui event queue unavailable; dropped submission result");
                            }
                        });
                    }
                    BackendCommand::CheckHealth => {
                        let api = Arc::clone(&api);
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let report = api
                                .health()
                                .await
                                .map(|health| health.status)
                                .map_err(|err| format!("{err:#}"));
                            if let Err(err) = &report {
                                warn!("health check failed: {err}");
                            }
                            let _ = ui_tx.try_send(UiEvent::HealthChecked(report));
                        });
                    }
                }
            }
            info!("ui command queue closed; backend worker stopping");
        });
    });
}
