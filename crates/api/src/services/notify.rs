//! Outbound registration notifications.
//!
//! Best-effort, non-blocking, failure-swallowed: the submit path spawns
//! these calls and never waits on or reacts to them. Delivery is
//! at-most-once with no retry.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use domain::models::Registration;

use crate::config::NotificationsConfig;

/// Receiver of successful-registration events.
#[async_trait]
pub trait RegistrationNotifier: Send + Sync {
    async fn registration_created(&self, registration: &Registration);
}

/// Posts each stored registration as JSON to the configured webhook URLs.
pub struct WebhookNotifier {
    client: Client,
    endpoints: Vec<String>,
}

impl WebhookNotifier {
    pub fn from_config(config: &NotificationsConfig) -> Self {
        let endpoints = [
            &config.registration_webhook_url,
            &config.sheet_sync_webhook_url,
        ]
        .into_iter()
        .filter(|url| !url.is_empty())
        .cloned()
        .collect();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, endpoints }
    }

    pub fn endpoint_count(&self) -> usize {
        self.endpoints.len()
    }
}

#[async_trait]
impl RegistrationNotifier for WebhookNotifier {
    async fn registration_created(&self, registration: &Registration) {
        for endpoint in &self.endpoints {
            match self.client.post(endpoint).json(registration).send().await {
                Ok(response) if response.status().is_success() => {
                    debug!(registration_id = %registration.id, endpoint = %endpoint, "Webhook delivered");
                }
                Ok(response) => {
                    warn!(
                        registration_id = %registration.id,
                        endpoint = %endpoint,
                        status = response.status().as_u16(),
                        "Webhook endpoint answered with an error status"
                    );
                }
                Err(err) => {
                    warn!(
                        registration_id = %registration.id,
                        endpoint = %endpoint,
                        error = %err,
                        "Webhook delivery failed"
                    );
                }
            }
        }
    }
}
