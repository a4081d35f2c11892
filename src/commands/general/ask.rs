use tracing::{debug, error, info};

use crate::utils::chunker::chunk_message;
use crate::utils::error_report::ErrorReport;
use crate::utils::reply::{CommandSink, ReplySink, deliver};
#[cfg(feature = "webhook")]
use crate::utils::webhook::Notification;
use crate::{CommandResult, Context, Data, Error};

/// Ask Gemini a question
#[poise::command(slash_command, category = "General")]
pub async fn ask(
    ctx: Context<'_>,
    #[description = "Your question"] question: String,
) -> CommandResult {
    let author = ctx.author();
    info!("Question received from {}", author.name);

    ctx.defer().await?;

    let sink = CommandSink::new(ctx);
    handle_question(ctx.data(), &sink, &author.name, &question).await
}

/// Answers `question` for `user` through `sink`, reporting any failure back to
/// the user and to the webhook.
pub async fn handle_question<S>(data: &Data, sink: &S, user: &str, question: &str) -> CommandResult
where
    S: ReplySink + Sync + ?Sized,
{
    match answer(data, sink, question).await {
        Ok(chunks) => {
            info!("Answered {} in {} message(s)", user, chunks);
            #[cfg(feature = "webhook")]
            notify(
                data,
                Notification::Answered {
                    user: user.to_string(),
                    question: question.to_string(),
                    chunks,
                },
            )
            .await;
            Ok(())
        }
        Err(e) => {
            error!("Failed to answer {}: {}", user, e);
            #[cfg(feature = "webhook")]
            notify(
                data,
                Notification::Failed {
                    user: user.to_string(),
                    question: question.to_string(),
                    error: e.to_string(),
                },
            )
            .await;
            report_failure(sink, question, &*e).await
        }
    }
}

/// Asks Gemini and delivers the answer. Returns the number of messages sent.
pub async fn answer<S>(data: &Data, sink: &S, question: &str) -> Result<usize, Error>
where
    S: ReplySink + Sync + ?Sized,
{
    let answer = data.gemini.generate(question).await?;

    let chunks = chunk_message(&answer, data.max_message_length)?;
    debug!("Answer split into {} chunk(s)", chunks.len());

    deliver(sink, &chunks).await?;
    Ok(chunks.len().max(1))
}

/// Tells the user what went wrong, with the full report attached as a file.
pub async fn report_failure<S>(
    sink: &S,
    question: &str,
    error: &(dyn std::error::Error + Send + Sync + 'static),
) -> CommandResult
where
    S: ReplySink + Sync + ?Sized,
{
    let report = ErrorReport::new(question, error);
    sink.send_file(
        &report.summary(),
        &report.file_name(),
        report.contents().into_bytes(),
    )
    .await
}

#[cfg(feature = "webhook")]
async fn notify(data: &Data, notification: Notification) {
    let Some(notifier) = data.webhook.as_ref() else {
        return;
    };

    if let Err(e) = notifier.notify(&notification).await {
        error!("Webhook notification failed: {}", e);
    }
}
