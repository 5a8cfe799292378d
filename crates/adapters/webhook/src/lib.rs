//! # notigate-adapter-webhook
//!
//! Outbound delivery over HTTP. Each downstream service maps to one webhook
//! URL; dispatching a notification POSTs the payload as JSON, verbatim —
//! the nested `data` object is forwarded untouched.
//!
//! One POST per send. Retry, timeout tuning, and queuing are deliberately
//! not implemented here; the dispatch layer's contract ends at awaiting a
//! single delivery attempt.

use std::collections::HashMap;

use notigate_app::ports::Dispatcher;
use notigate_domain::error::{DispatchError, NotigateError};
use notigate_domain::id::ServiceId;
use notigate_domain::notification::Notification;

/// Dispatcher forwarding payloads to per-service webhook endpoints.
pub struct WebhookDispatcher {
    client: reqwest::Client,
    endpoints: HashMap<ServiceId, String>,
}

impl WebhookDispatcher {
    /// Create a dispatcher from a service → endpoint URL table.
    #[must_use]
    pub fn new(endpoints: HashMap<ServiceId, String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoints,
        }
    }

    /// Services this dispatcher can deliver to.
    pub fn services(&self) -> impl Iterator<Item = &ServiceId> {
        self.endpoints.keys()
    }

    fn error(service: &ServiceId, reason: impl Into<String>) -> NotigateError {
        NotigateError::Dispatch(DispatchError {
            service: service.to_string(),
            reason: reason.into(),
        })
    }
}

impl Dispatcher for WebhookDispatcher {
    async fn dispatch(
        &self,
        service: &ServiceId,
        notification: &Notification,
    ) -> Result<(), NotigateError> {
        let Some(endpoint) = self.endpoints.get(service) else {
            return Err(Self::error(service, "no webhook endpoint configured"));
        };

        tracing::debug!(%service, endpoint, "forwarding notification");
        let response = self
            .client
            .post(endpoint)
            .json(notification)
            .send()
            .await
            .map_err(|err| Self::error(service, err.to_string()))?;

        response
            .error_for_status()
            .map_err(|err| Self::error(service, err.to_string()))?;
        Ok(())
    }
}
