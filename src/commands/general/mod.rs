//! Commands available to every user.

/// Submodule defining the `/ask` command.
pub mod ask;
/// Submodule defining `/help` and the hidden `register` command.
pub mod help;
