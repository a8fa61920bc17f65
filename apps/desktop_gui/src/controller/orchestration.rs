//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues `cmd`, writing a user-facing reason to `status` when it cannot be
/// queued. Returns whether the command was accepted.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "Fila de envio cheia; tente novamente".to_string();
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Processo de envio indisponível; reinicie o aplicativo".to_string();
            false
        }
    }
}
