//! Moderation outcome types and the score → disposition decision.
//!
//! The decision is a pure function of the score: no history and no hidden
//! state. Thresholds come from configuration and must satisfy
//! `flag < block`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::domain::shared::errors::DomainError;

pub const DEFAULT_FLAG_THRESHOLD: i32 = 3;
pub const DEFAULT_BLOCK_THRESHOLD: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum Disposition {
    Accept,
    Flag,
    Block,
}

impl Disposition {
    pub fn is_flagged(self) -> bool {
        !matches!(self, Disposition::Accept)
    }

    /// Reason stored on the review; `None` for accepted reviews.
    pub fn flag_reason(self, reasons: &[String]) -> Option<String> {
        match self {
            Disposition::Accept => None,
            Disposition::Flag => Some(format!("Spam detected: {}", reasons.join(", "))),
            Disposition::Block => Some(format!("High spam score: {}", reasons.join(", "))),
        }
    }

    /// Message returned to the submitter.
    pub fn submitter_message(self) -> &'static str {
        match self {
            Disposition::Accept => "Review submitted successfully!",
            Disposition::Flag | Disposition::Block => {
                "Review flagged for possible spam and sent for admin review"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationThresholds {
    flag: i32,
    block: i32,
}

impl Default for ModerationThresholds {
    fn default() -> Self {
        Self {
            flag: DEFAULT_FLAG_THRESHOLD,
            block: DEFAULT_BLOCK_THRESHOLD,
        }
    }
}

impl ModerationThresholds {
    pub fn new(flag: i32, block: i32) -> Result<Self, DomainError> {
        if flag < 1 || block <= flag {
            return Err(DomainError::ValidationError(format!(
                "spam thresholds must satisfy 0 < flag < block (got flag={}, block={})",
                flag, block
            )));
        }
        Ok(Self { flag, block })
    }

    pub fn flag(&self) -> i32 {
        self.flag
    }

    pub fn block(&self) -> i32 {
        self.block
    }

    pub fn classify(&self, score: i32) -> Disposition {
        if score >= self.block {
            Disposition::Block
        } else if score >= self.flag {
            Disposition::Flag
        } else {
            Disposition::Accept
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryMatches {
    pub category: String,
    pub matches: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ModerationResult {
    pub sanitized_body: String,
    pub score: i32,
    pub reasons: Vec<String>,
    pub category_matches: Vec<CategoryMatches>,
    pub disposition: Disposition,
}

impl ModerationResult {
    pub fn flag_reason(&self) -> Option<String> {
        self.disposition.flag_reason(&self.reasons)
    }

    pub fn matches_for(&self, category: &str) -> Option<&[String]> {
        self.category_matches
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.matches.as_slice())
    }

    /// User-facing summary built from the first three reasons, or `None`
    /// when the text was accepted.
    pub fn spam_error_message(&self) -> Option<String> {
        if !self.disposition.is_flagged() {
            return None;
        }
        let main_reasons = self
            .reasons
            .iter()
            .take(3)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        Some(format!(
            "Review appears to be spam: {}. Please keep reviews relevant and avoid promotional content.",
            main_reasons
        ))
    }
}
