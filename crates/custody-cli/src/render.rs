use std::io::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use colored::Colorize;
use serde_json::json;

use custody_ledger::{AuditReport, Entry, Failure, Verdict};
use custody_types::{Record, Timestamp};

use crate::cli::OutputFormat;

/// Writes ledger results as coloured text or JSON.
#[derive(Clone, Copy, Debug)]
pub struct Renderer {
    format: OutputFormat,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// An entry that was just appended or updated, with a leading headline.
    pub fn entry_event(
        &self,
        out: &mut dyn Write,
        headline: &str,
        index: Option<usize>,
        entry: &Entry,
    ) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => json_line(
                out,
                &json!({ "event": headline, "index": index, "entry": entry }),
            ),
            OutputFormat::Text => {
                writeln!(
                    out,
                    "{} {}",
                    format!("{headline}:").green().bold(),
                    record_line(&entry.record)
                )?;
                writeln!(out, "  Entry commitment: {}", entry.commitment.to_hex().yellow())?;
                writeln!(out, "  Previous:         {}", previous_label(entry))?;
                Ok(())
            }
        }
    }

    /// Just the record, as the "retrieve info" menu action shows it.
    pub fn record(&self, out: &mut dyn Write, entry: &Entry) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => json_line(out, &entry.record),
            OutputFormat::Text => {
                writeln!(out, "{}", record_line(&entry.record))?;
                Ok(())
            }
        }
    }

    /// A list of entries with their chain positions.
    pub fn entries<'a>(
        &self,
        out: &mut dyn Write,
        entries: impl IntoIterator<Item = (usize, &'a Entry)>,
    ) -> anyhow::Result<()> {
        let entries: Vec<_> = entries.into_iter().collect();
        match self.format {
            OutputFormat::Json => {
                let rows: Vec<_> = entries
                    .iter()
                    .map(|(index, entry)| json!({ "index": index, "entry": entry }))
                    .collect();
                json_line(out, &rows)
            }
            OutputFormat::Text => {
                if entries.is_empty() {
                    writeln!(out, "No entries.")?;
                }
                for (index, entry) in entries {
                    writeln!(
                        out,
                        "{} {} {}",
                        format!("#{index}").yellow().bold(),
                        entry.commitment.short_hex().dimmed(),
                        record_line(&entry.record)
                    )?;
                    writeln!(
                        out,
                        "   created {}  previous {}",
                        format_timestamp(&entry.created_at),
                        previous_label(entry)
                    )?;
                }
                Ok(())
            }
        }
    }

    pub fn not_found(&self, out: &mut dyn Write, name: &str) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => json_line(out, &json!({ "error": "not_found", "name": name })),
            OutputFormat::Text => {
                writeln!(out, "{} ({})", "Unit not found".red(), name)?;
                Ok(())
            }
        }
    }

    pub fn invalid_input(&self, out: &mut dyn Write, message: &str) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => json_line(
                out,
                &json!({ "error": "invalid_input", "message": message }),
            ),
            OutputFormat::Text => {
                writeln!(out, "{} {}", "Rejected:".red().bold(), message)?;
                Ok(())
            }
        }
    }

    pub fn verdict(&self, out: &mut dyn Write, verdict: &Verdict) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => json_line(out, &verdict_json(verdict)),
            OutputFormat::Text => {
                match verdict {
                    Verdict::Valid => writeln!(out, "{} Chain is valid", "✓".green().bold())?,
                    Verdict::Invalid { .. } => {
                        writeln!(out, "{} Chain is invalid: {}", "✗".red().bold(), verdict)?
                    }
                }
                Ok(())
            }
        }
    }

    pub fn audit(&self, out: &mut dyn Write, report: &AuditReport) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let violations: Vec<_> = report
                    .violations
                    .iter()
                    .map(|v| verdict_json(&Verdict::Invalid { index: v.index, failure: v.failure }))
                    .collect();
                json_line(
                    out,
                    &json!({
                        "entries": report.entry_count,
                        "units": report.unit_count,
                        "linkage_valid": report.linkage_valid,
                        "commitments_valid": report.commitments_valid,
                        "violations": violations,
                    }),
                )
            }
            OutputFormat::Text => {
                writeln!(
                    out,
                    "Audit: {} entries, {} units",
                    report.entry_count, report.unit_count
                )?;
                writeln!(out, "  Linkage:     {}", pass_fail(report.linkage_valid))?;
                writeln!(out, "  Commitments: {}", pass_fail(report.commitments_valid))?;
                for v in &report.violations {
                    writeln!(out, "  {} #{} {}", "violation".red(), v.index, v.failure.kind())?;
                }
                Ok(())
            }
        }
    }

    pub fn note(&self, out: &mut dyn Write, text: &str) -> anyhow::Result<()> {
        if matches!(self.format, OutputFormat::Text) {
            writeln!(out, "{}", text.cyan())?;
        }
        Ok(())
    }
}

/// RFC 3339 rendering of a ledger timestamp; the logical counter is appended
/// when non-zero.
pub fn format_timestamp(ts: &Timestamp) -> String {
    let wall = i64::try_from(ts.physical_ms)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| format!("{}ms", ts.physical_ms));
    if ts.logical == 0 {
        wall
    } else {
        format!("{wall}+{}", ts.logical)
    }
}

fn record_line(record: &Record) -> String {
    format!(
        "Unit: {}, Custodian: {}, Status: {}, Observed: {}",
        record.name,
        record.custodian,
        record.status,
        format_timestamp(&record.observed_at)
    )
}

fn previous_label(entry: &Entry) -> String {
    if entry.is_genesis() {
        "(genesis)".to_string()
    } else {
        entry.previous_commitment.short_hex()
    }
}

fn pass_fail(ok: bool) -> colored::ColoredString {
    if ok { "valid".green() } else { "invalid".red() }
}

fn verdict_json(verdict: &Verdict) -> serde_json::Value {
    match verdict {
        Verdict::Valid => json!({ "valid": true }),
        Verdict::Invalid { index, failure } => match failure {
            Failure::Linkage { expected, found } => json!({
                "valid": false,
                "index": index,
                "failure": failure.kind(),
                "expected": expected,
                "found": found,
            }),
            Failure::SelfConsistency { stored, computed } => json!({
                "valid": false,
                "index": index,
                "failure": failure.kind(),
                "stored": stored,
                "computed": computed,
            }),
        },
    }
}

fn json_line<T: serde::Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
