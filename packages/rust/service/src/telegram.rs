//! Telegram Bot API transport (long polling).
//!
//! Only the two calls the advisor needs are implemented: `getUpdates` and
//! `sendMessage`. The bot token is part of every request path, so request
//! errors are stripped of their URL before being reported.

use std::time::Duration;

use itmo_advisor_shared::{AdvisorError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::transport::{Inbound, Transport};

/// Extra slack on top of the long-poll timeout for the HTTP client.
const CLIENT_SLACK_SECS: u64 = 10;

/// Configuration for [`TelegramTransport`].
#[derive(Debug, Clone)]
pub struct TelegramOptions {
    pub api_base_url: String,
    pub token: String,
    /// Seconds `getUpdates` may hold the connection open.
    pub poll_timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Update {
    update_id: i64,
    message: Option<Message>,
}

#[derive(Debug, Deserialize)]
struct Message {
    chat: Chat,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Chat {
    id: i64,
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
}

/// Long-polling Telegram bot client.
pub struct TelegramTransport {
    client: Client,
    endpoint: String,
    poll_timeout_secs: u64,
    /// Next `update_id` to request; everything below it is acknowledged.
    offset: i64,
}

impl TelegramTransport {
    pub fn new(opts: TelegramOptions) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(opts.poll_timeout_secs + CLIENT_SLACK_SECS))
            .build()
            .map_err(|e| AdvisorError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/bot{}",
                opts.api_base_url.trim_end_matches('/'),
                opts.token
            ),
            poll_timeout_secs: opts.poll_timeout_secs,
            offset: 0,
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{method}", self.endpoint)
    }

    async fn decode<T: DeserializeOwned>(method: &str, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body: ApiResponse<T> = response.json().await.map_err(|e| {
            AdvisorError::parse(format!("{method}: invalid response (HTTP {status}): {}", e.without_url()))
        })?;

        if !body.ok {
            let reason = body.description.unwrap_or_else(|| format!("HTTP {status}"));
            return Err(AdvisorError::Network(format!("{method}: {reason}")));
        }

        body.result
            .ok_or_else(|| AdvisorError::parse(format!("{method}: response has no result")))
    }
}

impl Transport for TelegramTransport {
    async fn next_batch(&mut self) -> Result<Vec<Inbound>> {
        let response = self
            .client
            .get(self.method_url("getUpdates"))
            .query(&[
                ("offset", self.offset.to_string()),
                ("timeout", self.poll_timeout_secs.to_string()),
            ])
            .send()
            .await
            .map_err(|e| AdvisorError::Network(format!("getUpdates: {}", e.without_url())))?;

        let updates: Vec<Update> = Self::decode("getUpdates", response).await?;

        if let Some(last) = updates.iter().map(|u| u.update_id).max() {
            self.offset = last + 1;
        }

        let messages: Vec<Inbound> = updates
            .into_iter()
            .filter_map(|update| {
                let message = update.message?;
                Some(Inbound {
                    chat_id: message.chat.id,
                    text: message.text?,
                })
            })
            .collect();

        debug!(messages = messages.len(), offset = self.offset, "updates received");
        Ok(messages)
    }

    async fn send(&mut self, chat_id: i64, text: &str) -> Result<()> {
        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&SendMessage { chat_id, text })
            .send()
            .await
            .map_err(|e| AdvisorError::Network(format!("sendMessage: {}", e.without_url())))?;

        let _: serde::de::IgnoredAny = Self::decode("sendMessage", response).await?;
        Ok(())
    }
}
