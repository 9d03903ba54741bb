//! Webhook event payloads.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use crate::payments::provider::CheckoutMetadata;

pub const CHECKOUT_COMPLETED: &str = "checkout.session.completed";
pub const ACCOUNT_UPDATED: &str = "account.updated";

#[derive(Debug, Error)]
pub enum EventParseError {
    #[error("invalid event payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("event is missing {0}")]
    MissingField(&'static str),

    #[error("metadata {key} has invalid value {value:?}")]
    InvalidMetadata { key: &'static str, value: String },
}

/// A verified webhook delivery, reduced to the events the marketplace acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentEvent {
    CheckoutCompleted(CompletedCheckout),
    AccountUpdated(AccountStatus),

    /// Any other event type, kept by name for logging.
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedCheckout {
    pub event_id: String,
    pub session_id: String,
    pub amount_total: u64,
    pub payment_intent: Option<String>,
    pub metadata: CheckoutMetadata,
}

impl CompletedCheckout {
    /// The payment intent id, falling back to the session id.
    #[must_use]
    pub fn payment_reference(&self) -> &str {
        self.payment_intent.as_deref().unwrap_or(&self.session_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountStatus {
    pub account: String,
    pub charges_enabled: bool,
    pub details_submitted: bool,
}

impl AccountStatus {
    /// Whether the account can accept charges and has finished onboarding.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.charges_enabled && self.details_submitted
    }
}

impl PaymentEvent {
    /// Parse a raw delivery body.
    ///
    /// # Errors
    ///
    /// Returns [`EventParseError`] when the body is not a well-formed event of a
    /// type it claims to be.
    pub fn from_slice(payload: &[u8]) -> Result<Self, EventParseError> {
        let envelope: Envelope = serde_json::from_slice(payload)?;

        match envelope.kind.as_str() {
            CHECKOUT_COMPLETED => {
                let session: RawSession = serde_json::from_value(envelope.data.object)?;

                Ok(Self::CheckoutCompleted(CompletedCheckout {
                    event_id: envelope.id,
                    amount_total: session
                        .amount_total
                        .ok_or(EventParseError::MissingField("amount_total"))?,
                    metadata: CheckoutMetadata::try_from(&session.metadata)?,
                    session_id: session.id,
                    payment_intent: session.payment_intent,
                }))
            }
            ACCOUNT_UPDATED => {
                let account: RawAccount = serde_json::from_value(envelope.data.object)?;

                Ok(Self::AccountUpdated(AccountStatus {
                    account: account.id,
                    charges_enabled: account.charges_enabled,
                    details_submitted: account.details_submitted,
                }))
            }
            _ => Ok(Self::Other(envelope.kind)),
        }
    }

    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::CheckoutCompleted(_) => CHECKOUT_COMPLETED,
            Self::AccountUpdated(_) => ACCOUNT_UPDATED,
            Self::Other(kind) => kind,
        }
    }
}

fn metadata_value<T: std::str::FromStr>(
    metadata: &HashMap<String, String>,
    key: &'static str,
) -> Result<T, EventParseError> {
    let raw = metadata
        .get(key)
        .ok_or(EventParseError::MissingField(key))?;

    raw.parse().map_err(|_| EventParseError::InvalidMetadata {
        key,
        value: raw.clone(),
    })
}

impl TryFrom<&HashMap<String, String>> for CheckoutMetadata {
    type Error = EventParseError;

    fn try_from(metadata: &HashMap<String, String>) -> Result<Self, Self::Error> {
        Ok(Self {
            product: metadata_value(metadata, Self::PRODUCT_KEY)?,
            buyer: metadata_value(metadata, Self::BUYER_KEY)?,
            seller: metadata_value(metadata, Self::SELLER_KEY)?,
            platform_fee: metadata_value(metadata, Self::PLATFORM_FEE_KEY)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    data: EnvelopeData,
}

#[derive(Debug, Deserialize)]
struct EnvelopeData {
    object: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct RawSession {
    id: String,
    amount_total: Option<u64>,
    payment_intent: Option<String>,
    #[serde(default)]
    metadata: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct RawAccount {
    id: String,
    #[serde(default)]
    charges_enabled: bool,
    #[serde(default)]
    details_submitted: bool,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use crate::domain::{products::records::ProductUuid, profiles::records::ProfileUuid};

    use super::*;

    fn checkout_payload(metadata: &serde_json::Value, payment_intent: Option<&str>) -> Vec<u8> {
        json!({
            "id": "evt_checkout",
            "type": "checkout.session.completed",
            "data": {
                "object": {
                    "id": "cs_test_1",
                    "amount_total": 2900,
                    "payment_intent": payment_intent,
                    "metadata": metadata,
                }
            }
        })
        .to_string()
        .into_bytes()
    }

    #[test]
    fn parses_completed_checkout() -> TestResult {
        let product = ProductUuid::new();
        let buyer = ProfileUuid::new();
        let seller = ProfileUuid::new();
        let metadata = json!({
            "product_id": product.to_string(),
            "buyer_id": buyer.to_string(),
            "seller_id": seller.to_string(),
            "platform_fee": "580",
        });

        let event = PaymentEvent::from_slice(&checkout_payload(&metadata, Some("pi_1")))?;

        let PaymentEvent::CheckoutCompleted(checkout) = event else {
            panic!("expected CheckoutCompleted, got {event:?}");
        };

        assert_eq!(checkout.amount_total, 2900);
        assert_eq!(checkout.payment_reference(), "pi_1");
        assert_eq!(
            checkout.metadata,
            CheckoutMetadata {
                product,
                buyer,
                seller,
                platform_fee: 580,
            }
        );

        Ok(())
    }

    #[test]
    fn payment_reference_falls_back_to_session() -> TestResult {
        let metadata = json!({
            "product_id": ProductUuid::new().to_string(),
            "buyer_id": ProfileUuid::new().to_string(),
            "seller_id": ProfileUuid::new().to_string(),
            "platform_fee": "0",
        });

        let event = PaymentEvent::from_slice(&checkout_payload(&metadata, None))?;

        let PaymentEvent::CheckoutCompleted(checkout) = event else {
            panic!("expected CheckoutCompleted, got {event:?}");
        };

        assert_eq!(checkout.payment_reference(), "cs_test_1");

        Ok(())
    }

    #[test]
    fn rejects_checkout_without_buyer() {
        let metadata = json!({
            "product_id": ProductUuid::new().to_string(),
            "seller_id": ProfileUuid::new().to_string(),
            "platform_fee": "580",
        });

        let result = PaymentEvent::from_slice(&checkout_payload(&metadata, Some("pi_1")));

        assert!(
            matches!(result, Err(EventParseError::MissingField("buyer_id"))),
            "expected MissingField, got {result:?}"
        );
    }

    #[test]
    fn rejects_non_numeric_fee() {
        let metadata = json!({
            "product_id": ProductUuid::new().to_string(),
            "buyer_id": ProfileUuid::new().to_string(),
            "seller_id": ProfileUuid::new().to_string(),
            "platform_fee": "five",
        });

        let result = PaymentEvent::from_slice(&checkout_payload(&metadata, Some("pi_1")));

        assert!(
            matches!(
                result,
                Err(EventParseError::InvalidMetadata {
                    key: "platform_fee",
                    ..
                })
            ),
            "expected InvalidMetadata, got {result:?}"
        );
    }

    #[test]
    fn parses_account_status() -> TestResult {
        let payload = json!({
            "id": "evt_account",
            "type": "account.updated",
            "data": {
                "object": {
                    "id": "acct_1",
                    "charges_enabled": true,
                    "details_submitted": false,
                }
            }
        })
        .to_string();

        let event = PaymentEvent::from_slice(payload.as_bytes())?;

        assert_eq!(
            event,
            PaymentEvent::AccountUpdated(AccountStatus {
                account: "acct_1".to_string(),
                charges_enabled: true,
                details_submitted: false,
            })
        );

        Ok(())
    }

    #[test]
    fn account_ready_requires_both_flags() {
        let status = |charges_enabled, details_submitted| AccountStatus {
            account: "acct".to_string(),
            charges_enabled,
            details_submitted,
        };

        assert!(status(true, true).is_ready());
        assert!(!status(true, false).is_ready());
        assert!(!status(false, true).is_ready());
    }

    #[test]
    fn unknown_types_are_kept_by_name() -> TestResult {
        let payload = br#"{"id":"evt_x","type":"invoice.paid","data":{"object":{}}}"#;

        let event = PaymentEvent::from_slice(payload)?;

        assert_eq!(event, PaymentEvent::Other("invoice.paid".to_string()));
        assert_eq!(event.kind(), "invoice.paid");

        Ok(())
    }

    #[test]
    fn garbage_is_a_json_error() {
        let result = PaymentEvent::from_slice(b"not json");

        assert!(matches!(result, Err(EventParseError::Json(_))));
    }
}
