//! Flushing buffered answers and reporting what was not saved

use std::time::Duration;

use colored::Colorize;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use serde::Serialize;

use crate::autosave::{PendingSave, WriteBuffer};
use crate::cli::OutputFormat;
use crate::client::RecordsApi;
use crate::error::{Error, Result, SaveError};
use crate::output::json::format_json;

/// Outcome of one question's edit
#[derive(Debug, Serialize)]
pub struct SaveOutcome {
    pub question: i64,
    pub saved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Default)]
pub struct SaveReport {
    pub saved: Vec<i64>,
    pub failed: Vec<(i64, SaveError)>,
    /// Edits dropped in favour of a reset queued earlier for the same question
    pub superseded: Vec<i64>,
}

impl SaveReport {
    fn outcomes(&self) -> Vec<SaveOutcome> {
        let saved = self.saved.iter().map(|&question| SaveOutcome {
            question,
            saved: true,
            error: None,
        });
        let failed = self.failed.iter().map(|(question, err)| SaveOutcome {
            question: *question,
            saved: false,
            error: Some(err.to_string()),
        });
        let superseded = self.superseded.iter().map(|&question| SaveOutcome {
            question,
            saved: false,
            error: Some(SaveError::Superseded.to_string()),
        });
        saved.chain(failed).chain(superseded).collect()
    }
}

fn spinner(count: usize) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(format!("Saving {} answer(s)...", count));
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// Flush the buffer and wait for every submitted edit's outcome.
pub async fn save_edits<C: RecordsApi + 'static>(
    buffer: &WriteBuffer<C>,
    handles: Vec<(i64, PendingSave)>,
    progress: bool,
) -> SaveReport {
    let bar = progress.then(|| spinner(handles.len()));

    if let Err(e) = buffer.flush().await {
        debug!("Final flush failed: {}", e);
    }

    let (questions, pending): (Vec<i64>, Vec<PendingSave>) = handles.into_iter().unzip();
    let outcomes = join_all(pending).await;

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    let mut report = SaveReport::default();
    for (question, outcome) in questions.into_iter().zip(outcomes) {
        match outcome {
            Ok(()) => report.saved.push(question),
            Err(SaveError::Superseded) => report.superseded.push(question),
            Err(e) => report.failed.push((question, e)),
        }
    }
    report
}

/// Print the report. A failed write turns into an error exit; an edit
/// superseded by a reset is only warned about.
pub fn print_report(report: &SaveReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", format_json(&report.outcomes())?),
        OutputFormat::Pretty | OutputFormat::Table => {
            if !report.saved.is_empty() {
                println!("{} Saved {} answer(s)", "✓".green(), report.saved.len());
            }
            for (question, err) in &report.failed {
                eprintln!("{} Question {}: {}", "✗".red(), question, err);
            }
            for question in &report.superseded {
                eprintln!(
                    "{} Question {}: {}",
                    "!".yellow(),
                    question,
                    SaveError::Superseded
                );
            }
        }
    }

    match report.failed.first() {
        Some((_, err)) => Err(Error::Save(err.clone())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::autosave::PendingEdit;
    use crate::client::MockGristClient;
    use crate::error::ApiError;
    use crate::models::Answer;

    #[tokio::test]
    async fn test_save_edits_flushes_once() {
        let mock = Arc::new(MockGristClient::new());
        let buffer = WriteBuffer::new(Arc::clone(&mock));

        let handles = vec![
            (1, buffer.submit(PendingEdit::answer(7, 1, Answer::Yes))),
            (2, buffer.submit(PendingEdit::answer(7, 2, Answer::No).with_percentage(20))),
        ];
        let report = save_edits(&buffer, handles, false).await;

        assert_eq!(report.saved, vec![1, 2]);
        assert!(report.failed.is_empty());
        assert_eq!(mock.call_counts().await.put_records, 1);
        assert!(print_report(&report, OutputFormat::Table).is_ok());
    }

    #[tokio::test]
    async fn test_rejected_write_reported_for_every_edit() {
        let mock = Arc::new(MockGristClient::new().with_error(ApiError::Forbidden).await);
        let buffer = WriteBuffer::new(Arc::clone(&mock));

        let handles = vec![
            (1, buffer.submit(PendingEdit::answer(7, 1, Answer::Yes))),
            (2, buffer.submit(PendingEdit::reset(7, 2))),
        ];
        let report = save_edits(&buffer, handles, false).await;

        assert!(report.saved.is_empty());
        assert_eq!(report.failed.len(), 2);
        assert!(matches!(
            report.failed[0].1,
            SaveError::Rejected(ApiError::Forbidden)
        ));

        let result = print_report(&report, OutputFormat::Json);
        assert!(matches!(result, Err(Error::Save(SaveError::Rejected(_)))));
    }

    #[test]
    fn test_outcomes_list_saved_then_failed() {
        let report = SaveReport {
            saved: vec![3],
            failed: vec![(4, SaveError::Cancelled)],
            superseded: vec![5],
        };
        let outcomes = report.outcomes();
        assert!(outcomes[0].saved);
        assert_eq!(outcomes[1].question, 4);
        assert!(outcomes[1].error.is_some());
        assert_eq!(outcomes[2].question, 5);
        assert!(!outcomes[2].saved);
    }

    #[tokio::test]
    async fn test_edit_after_reset_reported_as_superseded() {
        let mock = Arc::new(MockGristClient::new());
        let buffer = WriteBuffer::new(Arc::clone(&mock));

        let handles = vec![
            (5, buffer.submit(PendingEdit::reset(7, 5))),
            (
                5,
                buffer.submit(PendingEdit::answer(7, 5, Answer::Yes).with_comment("keep me")),
            ),
        ];
        let report = save_edits(&buffer, handles, false).await;

        assert_eq!(report.saved, vec![5]);
        assert_eq!(report.superseded, vec![5]);
        assert!(report.failed.is_empty());

        let bodies = mock.put_bodies().await;
        assert_eq!(bodies.len(), 1);
        assert!(!bodies[0].to_string().contains("keep me"));

        let outcomes = report.outcomes();
        assert_eq!(outcomes.len(), 2);
        assert!(!outcomes[1].saved);
        assert!(print_report(&report, OutputFormat::Json).is_ok());
    }
}
