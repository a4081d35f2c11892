//! This module aggregates various utility submodules used throughout the application.

/// Paragraph-aware splitting of long answers into message-sized chunks.
pub mod chunker;
/// Plain-text error reports sent as attachments.
pub mod error_report;
/// Client for the Gemini generative-language API.
pub mod gemini_client;
/// Ordered delivery of chunks as a primary reply plus follow-ups.
pub mod reply;
/// Outbound webhook notifications (requires the `webhook` feature).
#[cfg(feature = "webhook")]
pub mod webhook;
