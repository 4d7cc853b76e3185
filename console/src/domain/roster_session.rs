//! Live roster cache kept current by the store subscription.
//!
//! [`RosterSession`] owns the one standing subscription to the Users
//! collection. Every delivered snapshot fully replaces the published roster;
//! no incremental patching happens here. Mutations never touch the cache
//! directly — delete success, like add success, is observed through the next
//! pushed snapshot.

use futures_util::stream::BoxStream;
use futures_util::StreamExt as _;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::domain::ports::{RosterSnapshot, UserDocuments, UserDocumentsError};
use crate::domain::Error;

/// Read handle onto the most recently delivered snapshot.
///
/// Cheap to clone; every clone observes the same published roster. The
/// snapshot reflects the most recently *delivered* state, not necessarily
/// the most recent remote state.
#[derive(Debug, Clone)]
pub struct RosterWatch {
    receiver: watch::Receiver<RosterSnapshot>,
}

impl RosterWatch {
    /// The most recently delivered snapshot.
    #[must_use]
    pub fn current(&self) -> RosterSnapshot {
        self.receiver.borrow().clone()
    }

    /// Wait until a new snapshot is published.
    ///
    /// Returns `false` once the session has stopped and no further snapshot
    /// can ever be delivered.
    pub async fn changed(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }
}

/// The standing subscription to the Users collection.
///
/// Created with [`RosterSession::start`]; released exactly once with
/// [`RosterSession::stop`]. Dropping the session without stopping aborts the
/// forwarding task.
#[derive(Debug)]
pub struct RosterSession {
    receiver: watch::Receiver<RosterSnapshot>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl RosterSession {
    /// Establish the subscription and start mirroring snapshots.
    pub async fn start<D>(store: &D) -> Result<Self, Error>
    where
        D: UserDocuments + ?Sized,
    {
        let stream = store.subscribe().await.map_err(map_subscribe_error)?;
        let (sender, receiver) = watch::channel(RosterSnapshot::default());
        let (shutdown, shutdown_signal) = oneshot::channel();
        let task = tokio::spawn(forward_snapshots(stream, sender, shutdown_signal));

        Ok(Self {
            receiver,
            shutdown: Some(shutdown),
            task: Some(task),
        })
    }

    /// Obtain a read handle onto the published roster.
    #[must_use]
    pub fn watch(&self) -> RosterWatch {
        RosterWatch {
            receiver: self.receiver.clone(),
        }
    }

    /// The most recently delivered snapshot.
    #[must_use]
    pub fn current(&self) -> RosterSnapshot {
        self.receiver.borrow().clone()
    }

    /// Terminate the subscription.
    ///
    /// Idempotent. Once this returns, no further snapshot will be published:
    /// the forwarding task checks the shutdown signal before every delivery
    /// and `stop` waits for it to finish.
    pub async fn stop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            // The task may already have ended (stream exhausted); a failed
            // send is fine either way.
            let _ = shutdown.send(());
        }
        if let Some(task) = self.task.take() {
            if task.await.is_err() {
                debug!("roster forwarding task ended abnormally");
            }
        }
    }
}

impl Drop for RosterSession {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn forward_snapshots(
    mut stream: BoxStream<'static, RosterSnapshot>,
    sender: watch::Sender<RosterSnapshot>,
    mut shutdown: oneshot::Receiver<()>,
) {
    loop {
        tokio::select! {
            // Shutdown wins over a pending snapshot so nothing is delivered
            // after `stop` returns.
            biased;
            _ = &mut shutdown => break,
            next = stream.next() => match next {
                Some(snapshot) => {
                    debug!(records = snapshot.len(), "roster snapshot delivered");
                    let _ = sender.send(snapshot);
                }
                None => break,
            },
        }
    }
}

fn map_subscribe_error(error: UserDocumentsError) -> Error {
    match error {
        UserDocumentsError::Connection { message } => {
            Error::unavailable(format!("roster subscription failed: {message}"))
        }
        other => Error::internal(format!("roster subscription failed: {other}")),
    }
}
