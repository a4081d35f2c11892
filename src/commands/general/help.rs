use crate::{CommandResult, Context};

/// Show help for the available commands
#[poise::command(slash_command, category = "General")]
pub async fn help(
    ctx: Context<'_>,
    #[description = "Specific command to show help about"]
    #[autocomplete = "poise::builtins::autocomplete_command"]
    command: Option<String>,
) -> CommandResult {
    poise::builtins::help(
        ctx,
        command.as_deref(),
        poise::builtins::HelpConfiguration {
            extra_text_at_bottom: "Use /ask to put a question to Gemini.",
            ..Default::default()
        },
    )
    .await
    .map_err(|e| e.into())
}

/// Register or unregister application commands through buttons
#[poise::command(prefix_command, hide_in_help)]
pub async fn register(ctx: Context<'_>) -> CommandResult {
    poise::builtins::register_application_commands_buttons(ctx)
        .await
        .map_err(|e| e.into())
}
