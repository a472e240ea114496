//! User interruption (Ctrl-C / SIGTERM) as a shared flag.

use tokio::sync::watch;

#[derive(Debug, Clone)]
pub(crate) struct Interrupt {
    rx: watch::Receiver<bool>,
}

impl Interrupt {
    /// An interrupt that fires when `true` is sent on the returned sender.
    pub(crate) fn channel() -> (watch::Sender<bool>, Self) {
        let (tx, rx) = watch::channel(false);
        (tx, Self { rx })
    }

    pub(crate) fn is_set(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the interrupt fires. Never resolves if the sender is
    /// dropped without firing.
    pub(crate) async fn triggered(&self) {
        let mut rx = self.rx.clone();
        let closed = rx.wait_for(|set| *set).await.is_err();
        if closed {
            std::future::pending::<()>().await;
        }
    }
}

/// Spawns a task that fires the returned interrupt on Ctrl-C or SIGTERM.
pub(crate) fn listen_for_interrupt() -> Interrupt {
    let (tx, interrupt) = Interrupt::channel();
    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::warn!("interrupt received; stopping the batch");
        let _ = tx.send(true);
    });
    interrupt
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fires_when_sent() {
        let (tx, interrupt) = Interrupt::channel();
        assert!(!interrupt.is_set());

        tx.send(true).unwrap();

        assert!(interrupt.is_set());
        interrupt.triggered().await;
    }

    #[tokio::test]
    async fn dropped_sender_never_fires() {
        let (tx, interrupt) = Interrupt::channel();
        drop(tx);

        let waited = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            interrupt.triggered(),
        )
        .await;

        assert!(waited.is_err());
        assert!(!interrupt.is_set());
    }
}
