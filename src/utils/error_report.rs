//! Plain-text error reports sent back to the user as a file attachment.

use std::error::Error as StdError;
use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::utils::chunker::DISCORD_MESSAGE_LIMIT;

/// Longest error excerpt shown inline in the summary message.
const SUMMARY_EXCERPT_LEN: usize = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    question: String,
    message: String,
    causes: Vec<String>,
    timestamp: DateTime<Utc>,
}

impl ErrorReport {
    pub fn new(question: &str, error: &(dyn StdError + Send + Sync + 'static)) -> Self {
        Self::at(question, error, Utc::now())
    }

    pub fn at(
        question: &str,
        error: &(dyn StdError + Send + Sync + 'static),
        timestamp: DateTime<Utc>,
    ) -> Self {
        let mut causes = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        Self {
            question: question.to_string(),
            message: error.to_string(),
            causes,
            timestamp,
        }
    }

    /// Short message for the chat, always within one Discord message.
    pub fn summary(&self) -> String {
        let mut excerpt: String = self.message.chars().take(SUMMARY_EXCERPT_LEN).collect();
        if self.message.chars().count() > SUMMARY_EXCERPT_LEN {
            excerpt.push('…');
        }

        let summary = format!(
            "Sorry, I couldn't answer that.\n> {excerpt}\nThe full report is attached."
        );
        summary.chars().take(DISCORD_MESSAGE_LIMIT).collect()
    }

    pub fn file_name(&self) -> String {
        format!("error-{}.txt", self.timestamp.format("%Y%m%dT%H%M%SZ"))
    }

    pub fn contents(&self) -> String {
        let mut report = String::new();
        // Writing to a String cannot fail.
        let _ = writeln!(report, "Time: {}", self.timestamp.to_rfc3339());
        let _ = writeln!(report, "Question: {}", self.question);
        let _ = writeln!(report, "Error: {}", self.message);
        for (depth, cause) in self.causes.iter().enumerate() {
            let _ = writeln!(report, "  caused by [{}]: {}", depth + 1, cause);
        }
        report
    }
}
