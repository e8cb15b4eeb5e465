use relay_backend::prelude::*;
use tokio::task::JoinHandle;

/// A subscription the connection is holding open: the backend registration, and
/// the task forwarding its events, if one has been started.
#[derive(Debug)]
pub(crate) struct ActiveSubscription {
    cancel: CancelHandle,
    forwarder: Option<JoinHandle<()>>,
}

impl ActiveSubscription {
    pub fn new(cancel: CancelHandle) -> Self {
        Self { cancel, forwarder: None }
    }

    pub fn with_forwarder(mut self, forwarder: JoinHandle<()>) -> Self {
        self.forwarder = Some(forwarder);
        self
    }

    pub fn release(&mut self) {
        self.cancel.cancel();
        if let Some(forwarder) = self.forwarder.take() {
            forwarder.abort();
        }
    }
}

impl Drop for ActiveSubscription {
    fn drop(&mut self) {
        self.release();
    }
}

/// Every subscription opened on behalf of one connection. All of them are
/// released together, on teardown or when the session is replaced.
#[derive(Debug, Default)]
pub(crate) struct SubscriptionSet(Vec<ActiveSubscription>);

impl SubscriptionSet {
    pub fn push(&mut self, subscription: ActiveSubscription) {
        self.0.push(subscription);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn release_all(&mut self) {
        let count = self.0.len();
        for mut subscription in self.0.drain(..) {
            subscription.release();
        }
        if count > 0 {
            tracing::debug!(count, "released subscriptions");
        }
    }
}
