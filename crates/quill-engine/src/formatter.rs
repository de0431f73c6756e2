use crate::action_log::ActionLog;
use crate::runner::RunReport;

/// Text report for the end of a run: one line per check, one per capability,
/// and the overall verdict.
pub fn format_report(report: &RunReport, log: &ActionLog) -> String {
    let mut output = String::new();

    for entry in log.entries() {
        let tag = if entry.outcome { "OK" } else { "FAIL" };
        output.push_str(&format!("[{}] {}\n", tag, entry.name));
    }

    if !report.outcomes.is_empty() {
        output.push('\n');
    }
    for outcome in &report.outcomes {
        let records = if outcome.records > 0 {
            format!(" ({} records)", outcome.records)
        } else {
            String::new()
        };
        output.push_str(&format!(
            "{:<10} {}{} in {:.2?}\n",
            outcome.capability.name(),
            if outcome.passed { "passed" } else { "FAILED" },
            records,
            outcome.elapsed,
        ));
    }
    if report.authors > 0 {
        output.push_str(&format!("{} author profiles collected\n", report.authors));
    }

    output.push_str(verdict(report.passed));
    output
}

pub fn verdict(passed: bool) -> &'static str {
    if passed { "no errors" } else { "errors" }
}
