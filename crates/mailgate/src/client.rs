//! HTTP clients for the provider API
//!
//! [`MailgunClient`] speaks the messages endpoint; [`ValidationClient`] is
//! a separate, independently configured client for the address validation
//! endpoint. Neither retries; callers own retry policy.

use reqwest::multipart::{Form, Part};
use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::config::MailgunConfig;
use crate::errors::MailerError;
use crate::message::{Attachment, MessagePayload};
use crate::validation::AddressValidation;

/// Client bound to the send API for one API key.
pub struct MailgunClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl MailgunClient {
    /// Build a send client from the configuration.
    ///
    /// Fails with a configuration error when `api_key` or `domain` is
    /// missing, before any request is made.
    pub(crate) fn new(config: &MailgunConfig) -> Result<Self, MailerError> {
        if config.api_key.is_empty() {
            return Err(MailerError::Configuration(
                "api_key must be set".to_string(),
            ));
        }
        if config.domain.is_empty() {
            return Err(MailerError::Configuration("domain must be set".to_string()));
        }

        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn messages_url(&self, domain: &str) -> String {
        format!("{}/{}/messages", self.base_url, urlencoding::encode(domain))
    }

    /// Submit a message and its attachments to the send endpoint for
    /// `domain`. Returns the provider's verdict without interpreting it
    /// beyond capturing status and body.
    pub async fn send_message(
        &self,
        domain: &str,
        payload: &MessagePayload,
        attachments: &[Attachment],
    ) -> Result<SendOutcome, MailerError> {
        let form = build_form(payload, attachments)?;

        debug!(domain, to = ?payload.to, "submitting message");

        let response = self
            .http
            .post(self.messages_url(domain))
            .basic_auth("api", Some(&self.api_key))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        Ok(SendOutcome { status, body })
    }
}

/// Raw outcome of a send call: the reported HTTP status plus the response
/// body, untouched.
#[derive(Debug, Clone)]
pub struct SendOutcome {
    pub status: StatusCode,
    pub body: String,
}

impl SendOutcome {
    /// The provider accepted the message: it reported exactly 200.
    pub fn accepted(&self) -> bool {
        self.status == StatusCode::OK
    }

    /// Decoded body, when the provider returned its usual JSON shape.
    pub fn response(&self) -> Option<SendResponse> {
        serde_json::from_str(&self.body).ok()
    }
}

/// Body returned by the messages endpoint on acceptance.
#[derive(Debug, Clone, Deserialize)]
pub struct SendResponse {
    /// Provider's message ID.
    pub id: Option<String>,
    /// Human-readable acknowledgement.
    pub message: Option<String>,
}

fn build_form(payload: &MessagePayload, attachments: &[Attachment]) -> Result<Form, MailerError> {
    let mut form = Form::new()
        .text("from", payload.from.clone())
        .text("subject", payload.subject.clone());

    for to in &payload.to {
        form = form.text("to", to.clone());
    }
    for cc in &payload.cc {
        form = form.text("cc", cc.clone());
    }
    for bcc in &payload.bcc {
        form = form.text("bcc", bcc.clone());
    }
    if let Some(reply_to) = &payload.reply_to {
        form = form.text("h:Reply-To", reply_to.clone());
    }
    if let Some(text) = &payload.text {
        form = form.text("text", text.clone());
    }
    if let Some(html) = &payload.html {
        form = form.text("html", html.clone());
    }
    for (name, value) in &payload.headers {
        form = form.text(format!("h:{}", name), value.clone());
    }

    for attachment in attachments {
        let part = Part::bytes(attachment.content.clone())
            .file_name(attachment.filename.clone())
            .mime_str(&attachment.content_type)
            .map_err(|e| {
                MailerError::Message(format!(
                    "invalid content type {:?} for attachment {:?}: {}",
                    attachment.content_type, attachment.filename, e
                ))
            })?;
        form = form.part("attachment", part);
    }

    Ok(form)
}

/// Client bound to the address validation endpoint.
///
/// Independent of [`MailgunClient`]: it requires only the validation key,
/// follows no redirects, and is usable with `api_key`/`domain` unset.
pub struct ValidationClient {
    http: Client,
    api_key: String,
    url: String,
}

impl ValidationClient {
    pub(crate) fn new(config: &MailgunConfig) -> Result<Self, MailerError> {
        let api_key = config
            .validation_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                MailerError::Configuration("validation_key must be set".to_string())
            })?;

        let http = Client::builder()
            .timeout(config.timeout)
            .redirect(Policy::none())
            .build()?;

        Ok(Self {
            http,
            api_key,
            url: config.validation_url.clone(),
        })
    }

    /// Fetch the provider's verdict for `address`. Network failures and
    /// timeouts surface as transport errors; the HTTP status is returned
    /// uninterpreted.
    pub async fn validate(&self, address: &str) -> Result<ValidationOutcome, MailerError> {
        debug!(address, "querying address validation endpoint");

        let response = self
            .http
            .get(&self.url)
            .query(&[("api_key", self.api_key.as_str()), ("address", address)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        Ok(ValidationOutcome { status, body })
    }
}

/// Raw outcome of a validation call.
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    pub status: StatusCode,
    pub body: String,
}

impl ValidationOutcome {
    /// Decode the body into the typed validation model.
    pub fn parse(&self) -> Result<AddressValidation, MailerError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}
