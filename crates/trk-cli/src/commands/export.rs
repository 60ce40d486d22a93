//! `trk export`: CSV export of all-time per-project totals.
//!
//! The row data comes from [`Tracker::export_rows`]; this module only
//! handles the CSV encoding and file writing.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use trk_db::{ExportRow, Tracker};

/// Quotes a CSV field when it contains a delimiter, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Writes the header row plus one row per project.
fn write_csv<W: Write>(writer: &mut W, rows: &[ExportRow]) -> Result<()> {
    writeln!(writer, "Project,Total Time (HH:MM:SS),Total Seconds")?;
    for row in rows {
        writeln!(
            writer,
            "{},{},{}",
            csv_field(&row.project_name),
            row.formatted_total,
            row.total_seconds
        )?;
    }
    Ok(())
}

/// Runs the export command, writing to `output`.
pub fn run<W: Write>(writer: &mut W, tracker: &Tracker, output: &Path) -> Result<()> {
    let rows = tracker.export_rows()?;

    let file = File::create(output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    let mut csv = BufWriter::new(file);
    write_csv(&mut csv, &rows)?;
    csv.flush()?;

    writeln!(writer, "Exported {} projects to {}", rows.len(), output.display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, seconds: i64) -> ExportRow {
        ExportRow {
            project_name: name.to_string(),
            formatted_total: trk_core::format_seconds(seconds),
            total_seconds: seconds,
        }
    }

    #[test]
    fn writes_header_and_one_row_per_project() {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &[row("writing", 5400), row("coding", 0)]).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(
            output,
            "Project,Total Time (HH:MM:SS),Total Seconds\n\
             writing,01:30:00,5400\n\
             coding,00:00:00,0\n"
        );
    }

    #[test]
    fn quotes_names_with_delimiters() {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &[row("client, big", 60)]).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("\"client, big\",00:01:00,60"));
    }

    #[test]
    fn doubles_embedded_quotes() {
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("plain"), "plain");
    }

    #[test]
    fn run_writes_file_and_reports_count() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("out.csv");

        let mut tracker = Tracker::open_in_memory().unwrap();
        tracker.create_project("writing", "").unwrap();

        let mut buffer = Vec::new();
        run(&mut buffer, &tracker, &path).unwrap();

        let message = String::from_utf8(buffer).unwrap();
        assert!(message.starts_with("Exported 1 projects to "));

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Project,Total Time (HH:MM:SS),Total Seconds\n"));
        assert!(content.contains("writing,00:00:00,0"));
    }
}
