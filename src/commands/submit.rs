//! `healthgrid submit` - run one family's orchestrator or the locked batch

use serde_json::{json, Value};

use crate::cli::parse::parse_family;
use crate::cli::Cli;
use crate::commands::format::{cells_json, cells_line, output_by_format_result};
use crate::commands::with_document_lock;
use healthgrid_core::clock::SystemClock;
use healthgrid_core::error::{HealthError, Result};
use healthgrid_core::store::Store;
use healthgrid_core::submit::{BatchReport, FamilyStatus, SubmitOutcome};

pub fn execute(cli: &Cli, store: &mut Store, target: &str) -> Result<()> {
    let clock = SystemClock;
    if target.trim().eq_ignore_ascii_case("all") {
        let lock = store.lock();
        let report = store.engine(&clock).submit_all(&lock)?;
        print_report(cli, &report)?;
        return match report.failures() {
            0 => Ok(()),
            n => Err(HealthError::store_operation(
                "submit all families",
                format!("{} of {} failed", n, report.results.len()),
            )),
        };
    }

    let family = parse_family(target).map_err(HealthError::UsageError)?;
    let outcome = with_document_lock(cli, store, |store| store.engine(&clock).submit(family))?;
    print_outcome(cli, &outcome)
}

fn outcome_json(outcome: &SubmitOutcome) -> Value {
    match outcome {
        SubmitOutcome::Submitted { family, preview } => json!({
            "status": "submitted",
            "family": family,
            "preview": cells_json(preview),
        }),
        SubmitOutcome::Skipped { family, reason } => json!({
            "status": "skipped",
            "family": family,
            "reason": reason,
        }),
    }
}

/// Print a single orchestrator outcome
pub fn print_outcome(cli: &Cli, outcome: &SubmitOutcome) -> Result<()> {
    output_by_format_result!(cli.format,
        json => {
            println!("{}", serde_json::to_string_pretty(&outcome_json(outcome))?);
            Ok(())
        },
        human => {
            match outcome {
                SubmitOutcome::Submitted { family, preview } => {
                    if !cli.quiet {
                        println!("{}: submitted", family.label());
                        println!("  {}", cells_line(preview));
                    }
                }
                SubmitOutcome::Skipped { family, reason } => {
                    println!("{}: skipped ({})", family.label(), reason);
                }
            }
        }
    )
}

fn print_report(cli: &Cli, report: &BatchReport) -> Result<()> {
    output_by_format_result!(cli.format,
        json => {
            let results: Vec<Value> = report
                .results
                .iter()
                .map(|r| match &r.status {
                    FamilyStatus::Ok { outcome } => outcome_json(outcome),
                    FamilyStatus::Failed { message } => json!({
                        "status": "failed",
                        "family": r.family,
                        "message": message,
                    }),
                })
                .collect();
            let output = json!({
                "lock_acquired": report.lock_acquired,
                "failures": report.failures(),
                "results": results,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        },
        human => {
            if !report.lock_acquired {
                println!("warning: document lock busy, submitted without it");
            }
            for line in report.summary_lines() {
                println!("{}", line);
            }
        }
    )
}
