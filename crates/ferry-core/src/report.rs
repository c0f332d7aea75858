//! Folding per-group results into the single outcome shown to the caller.

use serde::Serialize;

use crate::model::GroupResult;

/// One recorded failure keyed by its group label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureEntry {
    /// Group label.
    pub label: String,
    /// Error message recorded for the group.
    pub message: String,
}

/// Failures in plan order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FailureReport {
    entries: Vec<FailureEntry>,
}

impl FailureReport {
    /// Recorded failures, in plan order.
    #[must_use]
    pub fn entries(&self) -> &[FailureEntry] {
        &self.entries
    }

    /// Number of failed groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no group failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `label message` pairs joined with `, `.
    #[must_use]
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("{} {}", entry.label, entry.message))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Final outcome of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    /// Whether at least one group started successfully.
    pub started: bool,
    /// Human-readable failure report, absent when every group succeeded.
    pub report: Option<String>,
    /// Structured failures.
    pub failures: FailureReport,
    /// Every group's result, in plan order.
    pub results: Vec<GroupResult>,
}

impl BatchOutcome {
    /// Outcome of a batch that never dispatched anything and has nothing to report.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            started: true,
            report: None,
            failures: FailureReport {
                entries: Vec::new(),
            },
            results: Vec::new(),
        }
    }
}

/// Fold collected results into a [`BatchOutcome`].
///
/// Results are ordered by plan position first, so completion order never leaks
/// into the report.
#[must_use]
pub fn aggregate(mut results: Vec<GroupResult>) -> BatchOutcome {
    results.sort_by_key(|result| result.position);

    let failures = results
        .iter()
        .filter_map(|result| {
            result.outcome.failure_message().map(|message| FailureEntry {
                label: result.label.clone(),
                message: message.to_string(),
            })
        })
        .fold(FailureReport::default(), |mut report, entry| {
            report.entries.push(entry);
            report
        });

    let all_failed = !results.is_empty() && failures.len() == results.len();
    let report = if failures.is_empty() {
        None
    } else if all_failed {
        failures.entries.first().map(|entry| entry.message.clone())
    } else {
        Some(failures.render())
    };

    BatchOutcome {
        started: !all_failed,
        report,
        failures,
        results,
    }
}
