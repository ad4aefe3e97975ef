//! Mailgun-backed mail delivery for host applications
//!
//! This crate translates a host application's outgoing mail into Mailgun
//! API calls:
//! - Message submission through the messages endpoint, with attachments
//! - Email address validation with an explicit tri-state mailbox
//!   verification verdict
//!
//! The [`Mailer`] holds the configuration and lazily builds one API
//! client per process lifetime; the host hands it anything implementing
//! [`MailMessage`] and gets back the provider's accept/reject verdict as
//! a boolean. There is no queueing, retrying, or templating here; those
//! belong to the host framework and the provider.

pub mod client;
pub mod config;
pub mod errors;
pub mod mailer;
pub mod message;
pub mod validation;

// Re-export main types
pub use client::{MailgunClient, SendOutcome, SendResponse, ValidationClient, ValidationOutcome};
pub use config::MailgunConfig;
pub use errors::MailerError;
pub use mailer::Mailer;
pub use message::{Attachment, MailMessage, Message, MessageBuilder, MessagePayload};
pub use validation::{AddressValidation, MailboxVerification};
