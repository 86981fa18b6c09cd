//! Messaging transport seam and the serving loop.

use std::future::Future;
use std::time::Duration;

use itmo_advisor_shared::Result;
use tracing::{debug, info, warn};

use crate::advisor::Advisor;

/// Pause after a failed poll before trying again.
const ERROR_PAUSE: Duration = Duration::from_secs(1);

/// One inbound text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbound {
    /// Conversation to reply to.
    pub chat_id: i64,
    pub text: String,
}

/// Source of inbound messages and sink for replies.
pub trait Transport {
    /// Wait for the next batch of messages (possibly empty).
    fn next_batch(&mut self) -> impl Future<Output = Result<Vec<Inbound>>> + Send;

    /// Send `text` to `chat_id`.
    fn send(&mut self, chat_id: i64, text: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Serve messages one at a time until `shutdown` resolves.
///
/// Transport failures are logged and retried after a short pause; they
/// never reach the user.
pub async fn serve<T, F>(transport: &mut T, advisor: &Advisor, shutdown: F) -> Result<()>
where
    T: Transport,
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    info!(courses = advisor.index().len(), "advisor serving");

    loop {
        let batch = tokio::select! {
            _ = &mut shutdown => {
                info!("shutdown requested, stopping");
                return Ok(());
            }
            batch = transport.next_batch() => batch,
        };

        let messages = match batch {
            Ok(messages) => messages,
            Err(e) => {
                warn!(error = %e, "failed to receive messages");
                tokio::time::sleep(ERROR_PAUSE).await;
                continue;
            }
        };

        for message in messages {
            dispatch(transport, advisor, &message).await;
        }
    }
}

async fn dispatch<T: Transport>(transport: &mut T, advisor: &Advisor, message: &Inbound) {
    let Some(reply) = advisor.handle(&message.text) else {
        return;
    };

    debug!(chat_id = message.chat_id, reply = reply.kind(), "sending reply");
    if let Err(e) = transport.send(message.chat_id, &reply.render()).await {
        warn!(chat_id = message.chat_id, error = %e, "failed to send reply");
    }
}
