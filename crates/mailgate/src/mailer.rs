//! The Mailgun-backed mailer

use reqwest::StatusCode;
use tokio::sync::OnceCell;
use tracing::info;

use crate::client::{MailgunClient, SendOutcome, ValidationClient};
use crate::config::MailgunConfig;
use crate::errors::MailerError;
use crate::message::MailMessage;
use crate::validation::AddressValidation;

/// Sends host-application mail through the Mailgun API and answers
/// address validation queries.
///
/// Both API clients are built lazily on first use and memoized for the
/// mailer's lifetime. The validation path is independent of the send
/// path: it needs only `validation_key` and works with `api_key` and
/// `domain` unset.
///
/// ```rust,ignore
/// use mailgate::{Mailer, MailgunConfig, Message};
///
/// let mailer = Mailer::new(MailgunConfig::new("key-...", "mg.example.com"));
/// let message = Message::builder()
///     .from("noreply@example.com")
///     .to("user@example.com")
///     .subject("Welcome!")
///     .text("Hello")
///     .build()?;
///
/// let delivered = mailer.send(&message).await?;
/// ```
pub struct Mailer {
    config: MailgunConfig,
    client: OnceCell<MailgunClient>,
    validator: OnceCell<ValidationClient>,
}

impl Mailer {
    pub fn new(config: MailgunConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
            validator: OnceCell::new(),
        }
    }

    /// Build a mailer from the `MAILGUN_*` environment variables.
    pub fn from_env() -> Self {
        Self::new(MailgunConfig::from_env())
    }

    pub fn config(&self) -> &MailgunConfig {
        &self.config
    }

    /// The memoized send client, constructed on the first call.
    ///
    /// Fails with a configuration error when `api_key` or `domain` is
    /// missing; no request is made in that case. Concurrent first calls
    /// construct at most one client.
    pub async fn client(&self) -> Result<&MailgunClient, MailerError> {
        self.client
            .get_or_try_init(|| async { MailgunClient::new(&self.config) })
            .await
    }

    async fn validator(&self) -> Result<&ValidationClient, MailerError> {
        self.validator
            .get_or_try_init(|| async { ValidationClient::new(&self.config) })
            .await
    }

    /// Send a composed message through the configured domain.
    ///
    /// `Ok(true)` iff the provider reported exactly 200; every other
    /// status is `Ok(false)`, not an error, so a rejected message and an
    /// accepted one differ only in the returned flag and the logged
    /// response. Use [`send_report`](Self::send_report) when the status
    /// itself matters. Configuration and transport faults are `Err`.
    pub async fn send(&self, message: &impl MailMessage) -> Result<bool, MailerError> {
        Ok(self.send_report(message).await?.accepted())
    }

    /// Send a composed message and expose the provider's raw verdict.
    ///
    /// The full response is logged at info level on every call, success
    /// or failure.
    pub async fn send_report(
        &self,
        message: &impl MailMessage,
    ) -> Result<SendOutcome, MailerError> {
        let client = self.client().await?;
        let payload = message.payload();
        let outcome = client
            .send_message(&self.config.domain, &payload, message.attachments())
            .await?;

        info!(
            status = outcome.status.as_u16(),
            body = %outcome.body,
            "send response"
        );

        Ok(outcome)
    }

    /// Whether `address` can receive mail, per the provider's mailbox
    /// verification.
    ///
    /// A non-200 response is `Ok(false)`. On 200, a verified mailbox is
    /// `true`, a rejected one `false`, and an unverifiable one falls back
    /// to the response's `is_valid` flag. Network failures and timeouts
    /// are `Err`, never a default verdict.
    pub async fn validate_email(&self, address: &str) -> Result<bool, MailerError> {
        let outcome = self.validator().await?.validate(address).await?;

        if outcome.status != StatusCode::OK {
            return Ok(false);
        }

        Ok(outcome.parse()?.is_deliverable())
    }

    /// The full parsed validation response for callers that need more
    /// than a boolean, decoded from whatever JSON the endpoint returned
    /// regardless of status.
    pub async fn validate_email_report(
        &self,
        address: &str,
    ) -> Result<AddressValidation, MailerError> {
        let outcome = self.validator().await?.validate(address).await?;
        outcome.parse()
    }
}
