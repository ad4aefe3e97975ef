//! Outbound message model and the host-framework seam

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::MailerError;

/// A file attached to an outgoing message, already materialized in memory
/// by the caller.
#[derive(Debug, Clone)]
pub struct Attachment {
    /// File name shown to the recipient.
    pub filename: String,
    /// MIME type of the content.
    pub content_type: String,
    /// Raw file bytes.
    pub content: Vec<u8>,
}

impl Attachment {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            content,
        }
    }
}

/// Field set submitted to the provider's send endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePayload {
    /// Sender address, optionally in `Name <addr>` form.
    pub from: String,
    /// Recipient addresses.
    pub to: Vec<String>,
    /// CC recipients.
    pub cc: Vec<String>,
    /// BCC recipients.
    pub bcc: Vec<String>,
    /// Reply-to address.
    pub reply_to: Option<String>,
    /// Message subject.
    pub subject: String,
    /// Plain text body.
    pub text: Option<String>,
    /// HTML body.
    pub html: Option<String>,
    /// Custom MIME headers.
    pub headers: HashMap<String, String>,
}

/// Anything the host framework can hand to [`Mailer::send`]: a payload of
/// provider send fields plus the attachment files that travel with it.
///
/// The host's own composition layer implements this; [`Message`] is the
/// default implementation for callers without one.
///
/// [`Mailer::send`]: crate::Mailer::send
pub trait MailMessage: Send + Sync {
    /// Fields destined for the send endpoint.
    fn payload(&self) -> MessagePayload;

    /// Files to upload alongside the payload.
    fn attachments(&self) -> &[Attachment];
}

/// A fully composed outbound message.
#[derive(Debug, Clone)]
pub struct Message {
    payload: MessagePayload,
    attachments: Vec<Attachment>,
}

impl Message {
    pub fn builder() -> MessageBuilder {
        MessageBuilder::default()
    }
}

impl MailMessage for Message {
    fn payload(&self) -> MessagePayload {
        self.payload.clone()
    }

    fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }
}

#[derive(Debug, Default)]
pub struct MessageBuilder {
    from: Option<String>,
    to: Vec<String>,
    cc: Vec<String>,
    bcc: Vec<String>,
    reply_to: Option<String>,
    subject: Option<String>,
    text: Option<String>,
    html: Option<String>,
    headers: HashMap<String, String>,
    attachments: Vec<Attachment>,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from<S: Into<String>>(mut self, address: S) -> Self {
        self.from = Some(address.into());
        self
    }

    pub fn to<S: Into<String>>(mut self, address: S) -> Self {
        self.to.push(address.into());
        self
    }

    pub fn to_multiple<I, S>(mut self, addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.to.extend(addresses.into_iter().map(Into::into));
        self
    }

    pub fn cc<S: Into<String>>(mut self, address: S) -> Self {
        self.cc.push(address.into());
        self
    }

    pub fn bcc<S: Into<String>>(mut self, address: S) -> Self {
        self.bcc.push(address.into());
        self
    }

    pub fn reply_to<S: Into<String>>(mut self, address: S) -> Self {
        self.reply_to = Some(address.into());
        self
    }

    pub fn subject<S: Into<String>>(mut self, subject: S) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn text<S: Into<String>>(mut self, body: S) -> Self {
        self.text = Some(body.into());
        self
    }

    pub fn html<S: Into<String>>(mut self, body: S) -> Self {
        self.html = Some(body.into());
        self
    }

    pub fn header<K, V>(mut self, name: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub fn build(self) -> Result<Message, MailerError> {
        let from = self
            .from
            .ok_or_else(|| MailerError::Message("From address is required".to_string()))?;

        if self.to.is_empty() {
            return Err(MailerError::Message(
                "At least one recipient is required".to_string(),
            ));
        }

        let subject = self
            .subject
            .ok_or_else(|| MailerError::Message("Subject is required".to_string()))?;

        if self.text.is_none() && self.html.is_none() {
            return Err(MailerError::Message(
                "Either a text or an HTML body is required".to_string(),
            ));
        }

        Ok(Message {
            payload: MessagePayload {
                from,
                to: self.to,
                cc: self.cc,
                bcc: self.bcc,
                reply_to: self.reply_to,
                subject,
                text: self.text,
                html: self.html,
                headers: self.headers,
            },
            attachments: self.attachments,
        })
    }
}
