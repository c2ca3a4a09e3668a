use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    /// Reports are written to stderr, so that is the stream that decides.
    pub fn default_for_stderr() -> Self {
        if std::io::stderr().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputStatus {
    Ok,
    Failed,
}

/// Outcome of converting one input.
#[derive(Debug, Serialize)]
pub struct InputReport {
    pub input: String,
    pub mode: &'static str,
    pub bytes_read: u64,
    pub bytes_written: u64,
    pub status: InputStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
struct ReportOutput<'a> {
    inputs: &'a [InputReport],
    total_read: u64,
    total_written: u64,
    failed: usize,
}

pub fn print_report(reports: &[InputReport], format: OutputFormat) {
    eprintln!("{}", render_report(reports, format));
}

pub fn render_report(reports: &[InputReport], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => {
            let out = ReportOutput {
                inputs: reports,
                total_read: reports.iter().map(|r| r.bytes_read).sum(),
                total_written: reports.iter().map(|r| r.bytes_written).sum(),
                failed: reports
                    .iter()
                    .filter(|r| r.status == InputStatus::Failed)
                    .count(),
            };
            serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["INPUT", "MODE", "READ", "WRITTEN", "STATUS"]);
            for report in reports {
                table.add_row(vec![
                    report.input.clone(),
                    report.mode.to_string(),
                    report.bytes_read.to_string(),
                    report.bytes_written.to_string(),
                    status_text(report),
                ]);
            }
            table.to_string()
        }
        OutputFormat::Pretty => reports
            .iter()
            .map(|report| {
                format!(
                    "{} mode={} read={} written={} status={}",
                    report.input,
                    report.mode,
                    report.bytes_read,
                    report.bytes_written,
                    status_text(report)
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn status_text(report: &InputReport) -> String {
    match (&report.status, &report.error) {
        (InputStatus::Failed, Some(err)) => format!("failed ({err})"),
        (InputStatus::Failed, None) => "failed".to_string(),
        (InputStatus::Ok, _) => "ok".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<InputReport> {
        vec![
            InputReport {
                input: "a.txt".to_string(),
                mode: "crlf-to-lf",
                bytes_read: 12,
                bytes_written: 10,
                status: InputStatus::Ok,
                error: None,
            },
            InputReport {
                input: "missing.txt".to_string(),
                mode: "crlf-to-lf",
                bytes_read: 0,
                bytes_written: 0,
                status: InputStatus::Failed,
                error: Some("not found".to_string()),
            },
        ]
    }

    #[test]
    fn json_report_has_totals() {
        let json = render_report(&sample(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_read"], 12);
        assert_eq!(value["total_written"], 10);
        assert_eq!(value["failed"], 1);
        assert_eq!(value["inputs"][0]["status"], "ok");
        assert!(value["inputs"][0].get("error").is_none());
        assert_eq!(value["inputs"][1]["error"], "not found");
    }

    #[test]
    fn pretty_report_has_one_line_per_input() {
        let text = render_report(&sample(), OutputFormat::Pretty);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "a.txt mode=crlf-to-lf read=12 written=10 status=ok"
        );
        assert!(lines[1].ends_with("status=failed (not found)"));
    }

    #[test]
    fn table_report_lists_inputs() {
        let text = render_report(&sample(), OutputFormat::Table);
        assert!(text.contains("INPUT"));
        assert!(text.contains("missing.txt"));
    }
}
