//! Structured notification message payloads.
//!
//! A notification's `message` column always holds one of these variants,
//! serialized as JSON. Clients discriminate on the `notificationType` tag.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Result of comparing a claimant's answer against the stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationStatus {
    /// The submitted answer matched.
    #[serde(rename = "VERIFIED")]
    Verified,
    /// The submitted answer did not match.
    #[serde(rename = "UNVERIFIED")]
    Unverified,
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verified => write!(f, "VERIFIED"),
            Self::Unverified => write!(f, "UNVERIFIED"),
        }
    }
}

/// Notification message body, discriminated by `notificationType`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "notificationType")]
pub enum NotificationPayload {
    /// A plain human-readable message.
    #[serde(rename = "Plain", rename_all = "camelCase")]
    Plain {
        /// The message text.
        text: String,
    },
    /// A claim attempt addressed to an item's poster, carrying the
    /// verification comparison so the poster can decide.
    #[serde(rename = "ClaimAttempt", rename_all = "camelCase")]
    ClaimAttempt {
        /// Notification headline.
        title: String,
        /// The claimed item's title.
        item_title: String,
        /// The claimed item's ID.
        item_id: i64,
        /// The claiming user.
        claimant_id: Uuid,
        /// The poster's verification question.
        verification_question: String,
        /// The claimant's submitted answer.
        claimant_answer: String,
        /// Whether the answer matched the stored one.
        verification_status: VerificationStatus,
    },
}

impl NotificationPayload {
    /// A short human-readable rendering for plain-text surfaces.
    pub fn display_text(&self) -> String {
        match self {
            Self::Plain { text } => text.clone(),
            Self::ClaimAttempt {
                item_title,
                verification_status,
                ..
            } => format!("Claim attempt on \"{item_title}\" ({verification_status})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_attempt_wire_shape() {
        let payload = NotificationPayload::ClaimAttempt {
            title: "New Claim Attempt".to_string(),
            item_title: "Blue Backpack".to_string(),
            item_id: 42,
            claimant_id: Uuid::nil(),
            verification_question: "What brand?".to_string(),
            claimant_answer: "Honda".to_string(),
            verification_status: VerificationStatus::Verified,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["notificationType"], "ClaimAttempt");
        assert_eq!(json["itemTitle"], "Blue Backpack");
        assert_eq!(json["itemId"], 42);
        assert_eq!(json["verificationStatus"], "VERIFIED");
        assert_eq!(json["claimantAnswer"], "Honda");
    }

    #[test]
    fn test_plain_round_trip() {
        let payload = NotificationPayload::Plain {
            text: "Your claim has been approved!".to_string(),
        };
        let json = serde_json::to_string(&payload).unwrap();
        let back: NotificationPayload = serde_json::from_str(&json).unwrap();
        match back {
            NotificationPayload::Plain { text } => {
                assert_eq!(text, "Your claim has been approved!")
            }
            _ => panic!("wrong variant"),
        }
    }
}
