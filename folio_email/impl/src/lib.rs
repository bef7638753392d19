use std::{sync::Arc, time::Duration};

use anyhow::{bail, Context};
use folio_email_contracts::{ContentType, Email, EmailService};
use folio_models::{Delivery, Sensitive};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::http::HttpClient;

pub mod http;
pub mod template;

/// https://resend.com/docs/api-reference/emails/send-email
const ENDPOINT: &str = "https://api.resend.com/";

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    config: EmailServiceConfig,
    http: HttpClient,
}

#[derive(Debug, Clone)]
pub struct EmailServiceConfig {
    endpoint: Arc<Url>,
    api_key: Option<Sensitive<String>>,
    timeout: Duration,
}

impl EmailServiceConfig {
    /// `endpoint_override` is the base url of the provider api and should end
    /// with a `/`.
    pub fn new(
        endpoint_override: Option<Url>,
        api_key: Option<Sensitive<String>>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let endpoint = match endpoint_override {
            Some(endpoint) => endpoint,
            None => ENDPOINT.parse().context("Failed to parse email endpoint")?,
        };

        Ok(Self {
            endpoint: endpoint.into(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            timeout,
        })
    }
}

impl EmailServiceImpl {
    pub fn new(config: EmailServiceConfig) -> anyhow::Result<Self> {
        let http = HttpClient::new(config.timeout)?;
        Ok(Self { config, http })
    }
}

impl EmailService for EmailServiceImpl {
    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn send(&self, email: Email) -> anyhow::Result<Delivery> {
        let Some(api_key) = &self.config.api_key else {
            bail!("Email api key is not configured");
        };

        let url = self
            .config
            .endpoint
            .join("emails")
            .context("Failed to build send email URL")?;

        let (html, text) = match email.content_type {
            ContentType::Html => (Some(email.body.as_str()), None),
            ContentType::Text => (None, Some(email.body.as_str())),
        };
        let request = SendEmailRequest {
            from: email.from.to_string(),
            to: email.recipients.iter().map(|x| x.as_str()).collect(),
            reply_to: email.reply_to.as_deref().map(String::as_str),
            subject: &email.subject,
            html,
            text,
        };

        let response = match self
            .http
            .post(url)
            .bearer_auth(api_key.as_str())
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "Failed to reach email provider");
                return Ok(Delivery::Failed(format!(
                    "Failed to reach email provider: {err}"
                )));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, %body, "Email provider rejected the message");
            return Ok(Delivery::Failed(format!(
                "Email provider returned {status}: {body}"
            )));
        }

        match response.json::<SendEmailResponse>().await {
            Ok(SendEmailResponse { id }) => {
                debug!(%id, "email accepted by provider");
                Ok(Delivery::Sent(id.into()))
            }
            Err(err) => {
                warn!(error = %err, "Failed to deserialize email provider response");
                Ok(Delivery::Failed(format!(
                    "Invalid email provider response: {err}"
                )))
            }
        }
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: String,
    to: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}
