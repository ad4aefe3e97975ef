//! Address validation response model

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Provider-side mailbox verification verdict.
///
/// On the wire this field is sometimes a JSON boolean, sometimes a boolean
/// spelled as a string, and sometimes the literal `"unknown"`. It is parsed
/// into an explicit tri-state here; anything unexpected lands on
/// [`Unknown`](MailboxVerification::Unknown) rather than being coerced to
/// a boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MailboxVerification {
    /// The mailbox was verified to accept mail.
    Verified,
    /// The mailbox was verified to reject mail.
    Rejected,
    /// The provider could not verify the mailbox.
    #[default]
    Unknown,
}

impl MailboxVerification {
    /// Coerce the provider's string spellings.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => MailboxVerification::Verified,
            "false" | "no" | "off" | "0" => MailboxVerification::Rejected,
            _ => MailboxVerification::Unknown,
        }
    }

    /// The verdict as a boolean, when there is one.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            MailboxVerification::Verified => Some(true),
            MailboxVerification::Rejected => Some(false),
            MailboxVerification::Unknown => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            MailboxVerification::Verified => "true",
            MailboxVerification::Rejected => "false",
            MailboxVerification::Unknown => "unknown",
        }
    }
}

impl<'de> Deserialize<'de> for MailboxVerification {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(serde_json::Value::Bool(true)) => MailboxVerification::Verified,
            Some(serde_json::Value::Bool(false)) => MailboxVerification::Rejected,
            Some(serde_json::Value::String(s)) => MailboxVerification::parse(&s),
            _ => MailboxVerification::Unknown,
        })
    }
}

impl Serialize for MailboxVerification {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Parsed response from the address validation endpoint.
///
/// Fields the provider omits are defaulted, so partial and error bodies
/// still decode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressValidation {
    /// The address the verdict applies to.
    pub address: Option<String>,
    /// Syntactic validity as reported by the provider.
    pub is_valid: Option<bool>,
    /// Mailbox verification verdict.
    pub mailbox_verification: MailboxVerification,
    /// Suggested correction for a probable typo.
    pub did_you_mean: Option<String>,
    /// The address belongs to a disposable mail service.
    pub is_disposable_address: Option<bool>,
    /// The address is a role account (`admin@`, `info@`, ...).
    pub is_role_address: Option<bool>,
    /// Provider's explanation for the verdict.
    pub reason: Option<String>,
}

impl AddressValidation {
    /// Single mapping from the verification verdict to a deliverability
    /// boolean: a verified mailbox is deliverable, a rejected one is not,
    /// and an unverifiable one falls back to the `is_valid` flag.
    pub fn is_deliverable(&self) -> bool {
        match self.mailbox_verification {
            MailboxVerification::Verified => true,
            MailboxVerification::Rejected => false,
            MailboxVerification::Unknown => self.is_valid.unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_truthy_spellings() {
        for spelling in ["true", "TRUE", "yes", "on", "1", " true "] {
            assert_eq!(
                MailboxVerification::parse(spelling),
                MailboxVerification::Verified,
                "spelling: {spelling:?}"
            );
        }
    }

    #[test]
    fn test_parse_falsy_spellings() {
        for spelling in ["false", "False", "no", "off", "0"] {
            assert_eq!(
                MailboxVerification::parse(spelling),
                MailboxVerification::Rejected,
                "spelling: {spelling:?}"
            );
        }
    }

    #[test]
    fn test_parse_unexpected_is_unknown() {
        for spelling in ["unknown", "", "maybe", "2", "null"] {
            assert_eq!(
                MailboxVerification::parse(spelling),
                MailboxVerification::Unknown,
                "spelling: {spelling:?}"
            );
        }
    }

    #[test]
    fn test_deserialize_wire_shapes() {
        let cases = [
            (r#"{"mailbox_verification": true}"#, MailboxVerification::Verified),
            (r#"{"mailbox_verification": "true"}"#, MailboxVerification::Verified),
            (r#"{"mailbox_verification": false}"#, MailboxVerification::Rejected),
            (r#"{"mailbox_verification": "false"}"#, MailboxVerification::Rejected),
            (r#"{"mailbox_verification": "unknown"}"#, MailboxVerification::Unknown),
            (r#"{"mailbox_verification": null}"#, MailboxVerification::Unknown),
            (r#"{}"#, MailboxVerification::Unknown),
        ];

        for (body, expected) in cases {
            let parsed: AddressValidation = serde_json::from_str(body).unwrap();
            assert_eq!(parsed.mailbox_verification, expected, "body: {body}");
        }
    }

    #[test]
    fn test_full_response_decodes() {
        let body = r#"{
            "address": "user@example.com",
            "is_valid": true,
            "mailbox_verification": "true",
            "did_you_mean": null,
            "is_disposable_address": false,
            "is_role_address": false,
            "reason": ""
        }"#;

        let parsed: AddressValidation = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.address.as_deref(), Some("user@example.com"));
        assert_eq!(parsed.is_valid, Some(true));
        assert_eq!(parsed.mailbox_verification, MailboxVerification::Verified);
        assert_eq!(parsed.is_disposable_address, Some(false));
    }

    #[test]
    fn test_is_deliverable_verified() {
        let validation = AddressValidation {
            mailbox_verification: MailboxVerification::Verified,
            is_valid: Some(false),
            ..Default::default()
        };
        assert!(validation.is_deliverable());
    }

    #[test]
    fn test_is_deliverable_rejected() {
        let validation = AddressValidation {
            mailbox_verification: MailboxVerification::Rejected,
            is_valid: Some(true),
            ..Default::default()
        };
        assert!(!validation.is_deliverable());
    }

    #[test]
    fn test_is_deliverable_unknown_falls_back_to_is_valid() {
        let mut validation = AddressValidation {
            mailbox_verification: MailboxVerification::Unknown,
            is_valid: Some(true),
            ..Default::default()
        };
        assert!(validation.is_deliverable());

        validation.is_valid = Some(false);
        assert!(!validation.is_deliverable());

        validation.is_valid = None;
        assert!(!validation.is_deliverable());
    }

    #[test]
    fn test_as_bool() {
        assert_eq!(MailboxVerification::Verified.as_bool(), Some(true));
        assert_eq!(MailboxVerification::Rejected.as_bool(), Some(false));
        assert_eq!(MailboxVerification::Unknown.as_bool(), None);
    }
}
