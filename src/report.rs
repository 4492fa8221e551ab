//! Per-job accumulation of warnings and field-coverage counts.
//!
//! Extraction never halts a batch over data quality; instead every miss is
//! tallied here and printed in the final summary so a systemic regression in
//! the extractors is visible without stopping the run.

use std::collections::{BTreeMap, BTreeSet};

use console::style;
use tracing::warn;

/// Mutable accumulator owned by one batch job.
#[derive(Debug, Default)]
pub struct JobReport {
    /// Records emitted.
    pub produced: usize,
    /// Inputs skipped (missing page, unrecognized directory).
    pub skipped: usize,
    /// Warning lines, in occurrence order.
    pub warnings: Vec<String>,
    /// Field name -> number of records where every strategy came up empty.
    pub missing_fields: BTreeMap<&'static str, usize>,
}

impl JobReport {
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{message}");
        self.warnings.push(message);
    }

    pub fn field_missing(&mut self, field: &'static str) {
        *self.missing_fields.entry(field).or_default() += 1;
    }

    /// Print the operator-facing tally for a finished job.
    pub fn print_summary(&self, entity: &str, unmatched_labels: Option<&BTreeSet<String>>) {
        println!("\n{} {} job complete:", style("✓").green(), entity);
        println!("  Records produced:  {}", style(self.produced).green());
        if self.skipped > 0 {
            println!("  Inputs skipped:    {}", style(self.skipped).yellow());
        }
        if !self.warnings.is_empty() {
            println!("  Warnings:          {}", style(self.warnings.len()).yellow());
        }
        if !self.missing_fields.is_empty() {
            println!("  Field coverage (records missing each field):");
            for (field, count) in &self.missing_fields {
                println!("    {:<18} {}", field, style(count).dim());
            }
        }
        if let Some(unmatched) = unmatched_labels {
            if !unmatched.is_empty() {
                println!(
                    "  {} unmatched category labels:",
                    style(unmatched.len()).yellow()
                );
                for label in unmatched {
                    println!("    {label}");
                }
            }
        }
    }
}
