//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "ui command queue full; dropping command");
            *status = "UI command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "backend command processor disconnected");
            *status = "Backend command processor disconnected; restart the app".to_string();
        }
    }
}

pub fn dispatch_all(
    cmd_tx: &Sender<BackendCommand>,
    commands: Vec<BackendCommand>,
    status: &mut String,
) {
    for cmd in commands {
        dispatch_backend_command(cmd_tx, cmd, status);
    }
}

#[cfg(test)]
#[path = "tests/orchestration_tests.rs"]
mod tests;
