//! HTTP push transport for watering reminders.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use verdant_core::errors::{Error, Result};
use verdant_core::notifications::PushSenderTrait;

/// Sends reminders through an Expo-compatible push gateway.
pub struct HttpPushSender {
    client: reqwest::Client,
    endpoint: String,
}

/// One per-message delivery ticket, in request order.
#[derive(Deserialize)]
struct PushTicket {
    status: String,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct PushTicketResponse {
    data: Vec<PushTicket>,
}

impl HttpPushSender {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

/// Tokens whose ticket came back non-ok, matched to tickets by position.
fn rejected_tokens(tokens: &[String], tickets: &[PushTicket]) -> Vec<String> {
    tokens
        .iter()
        .zip(tickets)
        .filter(|(_, ticket)| ticket.status != "ok")
        .map(|(token, ticket)| {
            tracing::warn!(
                "push rejected for token {token}: {}",
                ticket.message.as_deref().unwrap_or("no detail")
            );
            token.clone()
        })
        .collect()
}

#[async_trait]
impl PushSenderTrait for HttpPushSender {
    async fn send(&self, tokens: &[String], title: &str, body: &str) -> Result<Vec<String>> {
        if tokens.is_empty() {
            return Ok(Vec::new());
        }
        let messages: Vec<_> = tokens
            .iter()
            .map(|token| {
                json!({
                    "to": token,
                    "title": title,
                    "body": body,
                    "sound": "default",
                })
            })
            .collect();

        let response = self
            .client
            .post(&self.endpoint)
            .json(&messages)
            .send()
            .await
            .map_err(|e| Error::PushDelivery(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::PushDelivery(format!(
                "push gateway returned {status}: {detail}"
            )));
        }

        // A gateway that answers 200 without parseable tickets gets the
        // benefit of the doubt.
        match response.json::<PushTicketResponse>().await {
            Ok(tickets) => Ok(rejected_tokens(tokens, &tickets.data)),
            Err(e) => {
                tracing::warn!("push gateway ticket response unreadable: {e}");
                Ok(Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_tokens_follow_ticket_order() {
        let tokens = vec!["t1".to_string(), "t2".to_string(), "t3".to_string()];
        let tickets = vec![
            PushTicket {
                status: "ok".to_string(),
                message: None,
            },
            PushTicket {
                status: "error".to_string(),
                message: Some("DeviceNotRegistered".to_string()),
            },
            PushTicket {
                status: "ok".to_string(),
                message: None,
            },
        ];
        assert_eq!(rejected_tokens(&tokens, &tickets), vec!["t2".to_string()]);
    }

    #[test]
    fn missing_tickets_reject_nothing_extra() {
        let tokens = vec!["t1".to_string(), "t2".to_string()];
        let tickets = vec![PushTicket {
            status: "error".to_string(),
            message: None,
        }];
        assert_eq!(rejected_tokens(&tokens, &tickets), vec!["t1".to_string()]);
    }
}

