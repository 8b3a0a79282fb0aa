//! Audit questionnaire commands

use std::collections::HashMap;
use std::path::Path;

use colored::Colorize;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::autosave::PendingEdit;
use crate::cli::args::GlobalOptions;
use crate::cli::save::{print_report, save_edits};
use crate::cli::{CommandContext, OutputFormat};
use crate::client::GristClient;
use crate::error::{Error, Result};
use crate::models::display::{AuditDisplay, QuestionDisplay};
use crate::models::{Answer, Audit, Questionnaire, Response};
use crate::output::Formattable;
use crate::output::json::format_json;
use crate::store::Store;

/// One entry of an answers file for `audit import`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImportEntry {
    pub question: i64,
    #[serde(default)]
    pub answer: Option<Answer>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub percentage: Option<u8>,
    #[serde(default)]
    pub reset: bool,
}

/// Audit header and progress, as printed by `audit get --format json`
#[derive(Debug, Serialize)]
struct AuditSummary<'a> {
    audit: &'a Audit,
    previous_audit: Option<&'a str>,
    questions: usize,
    answered: usize,
}

fn audit_not_found(hash: &str) -> Error {
    Error::Other(format!("No audit with hash '{}'", hash))
}

fn ensure_open(audit: &Audit) -> Result<()> {
    if audit.closed {
        return Err(Error::Other(format!(
            "Audit '{}' is closed; its answers can no longer be changed",
            audit.hash
        )));
    }
    Ok(())
}

async fn open_audit(store: &Store<GristClient>, hash: &str) -> Result<Audit> {
    let audit = store
        .find_audit_by_hash(hash)
        .await?
        .ok_or_else(|| audit_not_found(hash))?;
    ensure_open(&audit)?;
    Ok(audit)
}

/// Build the edit for one question, keeping the stored percentage when
/// none is given since the percentage is written with every edit.
pub fn build_answer_edit(
    audit_id: i64,
    question_id: i64,
    answer: Option<Answer>,
    comment: Option<String>,
    percentage: Option<u8>,
    stored: Option<&Response>,
) -> PendingEdit {
    let mut edit = PendingEdit::new(audit_id, question_id);
    edit.answer = answer;

    if let Some(comment) = comment {
        edit = edit.with_comment(comment);
    }

    let resulting_answer = answer.or_else(|| stored.and_then(|r| r.answer));
    match percentage {
        Some(pct) if resulting_answer != Some(Answer::No) => {
            warn!(
                "Percentage {} ignored for question {}: it only applies to \"{}\"",
                pct,
                question_id,
                Answer::No
            );
            edit = edit.with_percentage(0);
        }
        Some(pct) => edit = edit.with_percentage(pct),
        None => {
            if let Some(stored_pct) = stored.and_then(|r| r.percentage) {
                edit = edit.with_percentage(stored_pct);
            }
        }
    }

    edit
}

fn import_edit(audit_id: i64, entry: ImportEntry, stored: Option<&Response>) -> PendingEdit {
    if entry.reset {
        return PendingEdit::reset(audit_id, entry.question);
    }
    build_answer_edit(
        audit_id,
        entry.question,
        entry.answer,
        entry.comment,
        entry.percentage,
        stored,
    )
}

pub fn read_import_file(path: &Path) -> Result<Vec<ImportEntry>> {
    let contents = std::fs::read_to_string(path)?;
    let entries: Vec<ImportEntry> = serde_yaml::from_str(&contents)?;
    Ok(entries)
}

/// Keep only questions without an answer, dropping emptied categories
fn retain_unanswered(questionnaire: &mut Questionnaire) {
    for category in &mut questionnaire.categories {
        category
            .questions
            .retain(|q| q.response.as_ref().and_then(|r| r.answer).is_none());
    }
    questionnaire.categories.retain(|c| !c.questions.is_empty());
}

/// Run `audit get`
pub async fn get(opts: &GlobalOptions, hash: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let questionnaire = ctx
        .store
        .questionnaire(hash)
        .await?
        .ok_or_else(|| audit_not_found(hash))?;

    let audit = &questionnaire.audit;
    let previous = questionnaire.previous_audit.as_ref().map(|a| a.hash.as_str());

    match ctx.format {
        OutputFormat::Json => {
            let summary = AuditSummary {
                audit,
                previous_audit: previous,
                questions: questionnaire.question_count(),
                answered: questionnaire.answered_count(),
            };
            println!("{}", format_json(&summary)?);
        }
        OutputFormat::Table => vec![AuditDisplay::from(audit)].print(ctx.format)?,
        OutputFormat::Pretty => {
            let display = AuditDisplay::from(audit);
            let status = if audit.closed {
                display.status.red()
            } else {
                display.status.green()
            };

            println!("{} {}", "Audit".bold(), audit.hash.bold());
            println!();
            println!("  Product:   {} ({})", audit.product.name, audit.product.id);
            println!("  Committee: {}", display.committee_date);
            println!("  Status:    {}", status);
            println!("  Previous:  {}", previous.unwrap_or("-"));
            println!(
                "  Progress:  {}/{} answered",
                questionnaire.answered_count(),
                questionnaire.question_count()
            );
        }
    }

    Ok(())
}

/// Run `audit questions`
pub async fn questions(opts: &GlobalOptions, hash: &str, unanswered: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut questionnaire = ctx
        .store
        .questionnaire(hash)
        .await?
        .ok_or_else(|| audit_not_found(hash))?;

    if unanswered {
        retain_unanswered(&mut questionnaire);
    }

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&questionnaire.categories)?),
        OutputFormat::Table => QuestionDisplay::rows(&questionnaire).print(ctx.format)?,
        OutputFormat::Pretty => {
            if questionnaire.categories.is_empty() {
                println!("No results found.");
            }
            for category in &questionnaire.categories {
                println!("{}", category.title.bold());
                for question in &category.questions {
                    let row = QuestionDisplay::new(&category.title, question);
                    let answer = if row.answer == "-" {
                        row.answer.dimmed()
                    } else {
                        row.answer.cyan()
                    };
                    println!(
                        "  {:>5} [{}] {}  {}  {}",
                        row.id,
                        row.importance,
                        question.text,
                        answer,
                        format!("(previous: {})", row.previous).dimmed()
                    );
                }
                println!();
            }
        }
    }

    Ok(())
}

/// Run `audit answer`
pub async fn answer(
    opts: &GlobalOptions,
    hash: &str,
    question: i64,
    answer: Option<Answer>,
    comment: Option<String>,
    percentage: Option<u8>,
) -> Result<()> {
    if answer.is_none() && comment.is_none() && percentage.is_none() {
        return Err(Error::Other(
            "Nothing to change: give an answer, --comment or --percentage".to_string(),
        ));
    }

    let ctx = CommandContext::new(opts)?;
    let audit = open_audit(&ctx.store, hash).await?;
    let stored = ctx.store.find_response(audit.id, question).await?;

    let edit = build_answer_edit(audit.id, question, answer, comment, percentage, stored.as_ref());

    let buffer = ctx.write_buffer();
    let handles = vec![(question, buffer.submit(edit))];
    let report = save_edits(&buffer, handles, ctx.format != OutputFormat::Json).await;
    print_report(&report, ctx.format)
}

/// Run `audit reset`
pub async fn reset(opts: &GlobalOptions, hash: &str, questions: &[i64]) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let audit = open_audit(&ctx.store, hash).await?;

    let buffer = ctx.write_buffer();
    let handles = questions
        .iter()
        .map(|&q| (q, buffer.submit(PendingEdit::reset(audit.id, q))))
        .collect();

    let report = save_edits(&buffer, handles, ctx.format != OutputFormat::Json).await;
    print_report(&report, ctx.format)
}

/// Run `audit import`
pub async fn import(opts: &GlobalOptions, hash: &str, file: &Path) -> Result<()> {
    let entries = read_import_file(file)?;
    let ctx = CommandContext::new(opts)?;

    let questionnaire = ctx
        .store
        .questionnaire(hash)
        .await?
        .ok_or_else(|| audit_not_found(hash))?;
    ensure_open(&questionnaire.audit)?;

    let known: HashMap<i64, Option<&Response>> = questionnaire
        .categories
        .iter()
        .flat_map(|c| &c.questions)
        .map(|q| (q.id, q.response.as_ref()))
        .collect();

    let unknown: Vec<String> = entries
        .iter()
        .filter(|e| !known.contains_key(&e.question))
        .map(|e| e.question.to_string())
        .collect();
    if !unknown.is_empty() {
        return Err(Error::Other(format!(
            "Unknown question id(s) in {}: {}",
            file.display(),
            unknown.join(", ")
        )));
    }

    let audit_id = questionnaire.audit.id;
    let buffer = ctx.write_buffer();
    let mut handles = Vec::with_capacity(entries.len());
    for entry in entries {
        let question = entry.question;
        if !entry.reset
            && entry.answer.is_none()
            && entry.comment.is_none()
            && entry.percentage.is_none()
        {
            warn!("Question {} has nothing to change, skipped", question);
            continue;
        }
        let stored = known.get(&question).copied().flatten();
        handles.push((question, buffer.submit(import_edit(audit_id, entry, stored))));
    }

    debug!("Submitted {} edits for audit {}", handles.len(), hash);
    let report = save_edits(&buffer, handles, ctx.format != OutputFormat::Json).await;
    print_report(&report, ctx.format)
}
