use std::time::Duration;

use tokio::{process::Child, sync::oneshot, task::JoinHandle};

use crate::{
    command::{event::ChannelEvent, output::TerminationReason, queue::EventProducer},
    helper::tracing::MaybeInstrument,
};

/// Asks a process to terminate by sending it `SIGTERM`.
///
/// # Errors
///
/// Returns an error if:
/// - The process ID is invalid
/// - The process does not exist
/// - Permission to signal the process is denied
#[cfg(unix)]
pub fn terminate_process(pid: u32) -> Result<(), std::io::Error> {
    use nix::errno::Errno;
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    let pid = i32::try_from(pid).unwrap_or(0);
    if pid <= 0 {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Invalid PID: {}", pid),
        ));
    }

    match kill(Pid::from_raw(pid), Signal::SIGTERM) {
        Ok(_) => Ok(()),
        Err(Errno::ESRCH) => Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Process with PID {} does not exist", pid),
        )),
        Err(Errno::EPERM) => Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            format!("Permission denied to terminate PID {}", pid),
        )),
        Err(e) => Err(std::io::Error::other(format!(
            "Failed to send SIGTERM to PID {}: {}",
            pid, e
        ))),
    }
}

/// Waits for a child on its own task and reports how it ended
///
/// The watcher enqueues exactly one [`ChannelEvent::Terminated`] (or
/// [`ChannelEvent::WaitFailed`]) unless it is told to terminate the child
/// first, in which case it reaps the child without reporting.
#[derive(Debug)]
pub(crate) struct ExitWatcher {
    kill_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl ExitWatcher {
    pub(crate) fn spawn(
        mut child: Child,
        producer: EventProducer<ChannelEvent>,
        grace: Duration,
    ) -> Self {
        let (kill_tx, kill_rx) = oneshot::channel::<()>();
        let task = async move {
            tokio::select! {
                result = child.wait() => match result {
                    Ok(status) => {
                        let (code, reason) = TerminationReason::classify(status);
                        #[cfg(feature = "tracing")]
                        tracing::debug!(code, ?reason, "Child process terminated");
                        producer.enqueue(ChannelEvent::Terminated { code, reason });
                    }
                    Err(e) => {
                        #[cfg(feature = "tracing")]
                        tracing::error!(error = %e, "Child process wait failed");
                        producer.enqueue(ChannelEvent::WaitFailed(format!(
                            "Failed to wait for child process: {}",
                            e
                        )));
                    }
                },
                // Resolves on an explicit request or when the channel is dropped mid-exec.
                _ = kill_rx => Self::force_terminate(&mut child, grace).await,
            }
        };
        Self {
            kill_tx: Some(kill_tx),
            handle: tokio::spawn(task.maybe_instrument("exit_watcher")),
        }
    }

    /// Terminates the child if it is still running and waits until it is reaped.
    pub(crate) async fn terminate(mut self) {
        if let Some(tx) = self.kill_tx.take() {
            // The watcher already returned if the child exited on its own.
            let _ = tx.send(());
        }
        if let Err(_e) = self.handle.await {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_e, "Exit watcher task failed");
        }
    }

    async fn force_terminate(child: &mut Child, grace: Duration) {
        #[cfg(unix)]
        if let Some(pid) = child.id() {
            #[cfg(feature = "tracing")]
            tracing::info!(pid, "Sending SIGTERM to child process");
            match terminate_process(pid) {
                Ok(()) => {
                    if let Ok(Ok(_status)) = tokio::time::timeout(grace, child.wait()).await {
                        return;
                    }
                    #[cfg(feature = "tracing")]
                    tracing::warn!(pid, "Child ignored SIGTERM, killing");
                }
                Err(_e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(error = %_e, pid, "Failed to send SIGTERM");
                }
            }
        }
        #[cfg(not(unix))]
        let _ = grace;

        match child.kill().await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::InvalidInput => {
                #[cfg(feature = "tracing")]
                tracing::debug!("Child process already exited, nothing to kill");
            }
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_e, "Failed to kill child process");
            }
        }
    }
}
