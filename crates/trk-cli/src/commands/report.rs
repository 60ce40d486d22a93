//! `trk report`: per-project time breakdowns for a reporting window.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use trk_core::ProjectTotal;
use trk_db::Tracker;

use crate::ReportPeriod;

/// JSON report structure.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    timezone: String,
    period: &'static str,
    projects: &'a [ProjectTotal],
}

const fn period_label(period: ReportPeriod) -> &'static str {
    match period {
        ReportPeriod::Today => "today",
        ReportPeriod::Week => "week",
        ReportPeriod::Total => "total",
    }
}

const fn period_heading(period: ReportPeriod) -> &'static str {
    match period {
        ReportPeriod::Today => "Today's Time:",
        ReportPeriod::Week => "This Week's Time:",
        ReportPeriod::Total => "All-Time Totals:",
    }
}

const fn empty_hint(period: ReportPeriod) -> &'static str {
    match period {
        ReportPeriod::Today => "No time tracked today",
        ReportPeriod::Week => "No time tracked this week",
        ReportPeriod::Total => "No time tracked",
    }
}

/// Formats the human-readable report, one line per project, busiest first.
fn format_report(period: ReportPeriod, breakdown: &[ProjectTotal]) -> String {
    let mut output = String::new();
    writeln!(output, "{}", period_heading(period)).unwrap();
    if breakdown.is_empty() {
        writeln!(output, "  {}", empty_hint(period)).unwrap();
        return output;
    }
    for total in breakdown {
        writeln!(output, "  {}: {}", total.name, total.formatted).unwrap();
    }
    output
}

fn format_report_json(period: ReportPeriod, breakdown: &[ProjectTotal]) -> Result<String> {
    let report = JsonReport {
        generated_at: Utc::now().to_rfc3339(),
        timezone: iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string()),
        period: period_label(period),
        projects: breakdown,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Runs the report command.
pub fn run<W: Write>(
    writer: &mut W,
    tracker: &Tracker,
    period: ReportPeriod,
    json: bool,
) -> Result<()> {
    let breakdown = match period {
        ReportPeriod::Today => tracker.daily_breakdown()?,
        ReportPeriod::Week => tracker.weekly_breakdown()?,
        ReportPeriod::Total => tracker.total_breakdown()?,
    };

    if json {
        writeln!(writer, "{}", format_report_json(period, &breakdown)?)?;
    } else {
        write!(writer, "{}", format_report(period, &breakdown))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    fn totals() -> Vec<ProjectTotal> {
        vec![
            ProjectTotal::new(1, "writing", 5400),
            ProjectTotal::new(2, "coding", 1200),
        ]
    }

    #[test]
    fn report_lists_projects_busiest_first() {
        let output = format_report(ReportPeriod::Today, &totals());
        assert_snapshot!(output, @r"
        Today's Time:
          writing: 01:30:00
          coding: 00:20:00
        ");
    }

    #[test]
    fn empty_report_hints_per_period() {
        let output = format_report(ReportPeriod::Week, &[]);
        assert_snapshot!(output, @r"
        This Week's Time:
          No time tracked this week
        ");
    }

    #[test]
    fn total_heading_differs() {
        let output = format_report(ReportPeriod::Total, &totals());
        assert!(output.starts_with("All-Time Totals:\n"));
    }

    #[test]
    fn json_report_carries_period_and_projects() {
        let output = format_report_json(ReportPeriod::Week, &totals()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["period"], "week");
        assert_eq!(value["projects"][0]["name"], "writing");
        assert_eq!(value["projects"][0]["seconds"], 5400);
        assert_eq!(value["projects"][0]["formatted"], "01:30:00");
        assert!(value["timezone"].is_string());
    }

    #[test]
    fn run_renders_breakdown_from_storage() {
        let mut tracker = Tracker::open_in_memory().unwrap();
        tracker.create_project("writing", "").unwrap();

        let mut buffer = Vec::new();
        run(&mut buffer, &tracker, ReportPeriod::Total, false).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        // no sessions yet
        assert!(output.contains("No time tracked"));
    }
}
