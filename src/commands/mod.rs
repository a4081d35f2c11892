//! This module aggregates all the command modules for the bot.

/// General purpose commands (e.g., ask, help).
pub mod general;
