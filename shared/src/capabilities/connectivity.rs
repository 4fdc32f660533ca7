use futures::StreamExt;
use serde::{Deserialize, Serialize};

use crux_core::capability::{CapabilityContext, Operation};
use crux_core::macros::Capability;

use crate::model::ConnectivitySample;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectivityOperation {
    /// Streaming request: the shell answers with the current state right away
    /// and again on every platform change.
    Subscribe,
    Unsubscribe,
}

impl Operation for ConnectivityOperation {
    type Output = ConnectivitySample;
}

/// Platform network-state notifications.
#[derive(Capability)]
pub struct Connectivity<Ev> {
    context: CapabilityContext<ConnectivityOperation, Ev>,
}

impl<Ev> Connectivity<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<ConnectivityOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn subscribe<F>(&self, make_event: F)
    where
        F: Fn(ConnectivitySample) -> Ev + Send + 'static,
    {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            let mut samples = ctx.stream_from_shell(ConnectivityOperation::Subscribe);
            while let Some(sample) = samples.next().await {
                ctx.update_app(make_event(sample));
            }
        });
    }

    pub fn unsubscribe(&self) {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            ctx.notify_shell(ConnectivityOperation::Unsubscribe).await;
        });
    }
}
