use crate::build::BuildReport;
use tabled::{settings::Style, Table, Tabled};

/// One line of the post-build summary
#[derive(Tabled)]
pub struct SummaryRow {
    #[tabled(rename = "Metric")]
    pub metric: &'static str,
    #[tabled(rename = "Value")]
    pub value: usize,
}

impl SummaryRow {
    pub fn from_report(report: &BuildReport) -> Vec<Self> {
        vec![
            Self { metric: "Files read", value: report.files.len() },
            Self { metric: "Parameters written", value: report.parameters },
            Self { metric: "Skipped inputs", value: report.skipped.len() },
        ]
    }
}

/// Rounded table of the counts in `report`
pub fn summary_table(report: &BuildReport) -> String {
    Table::new(SummaryRow::from_report(report))
        .with(Style::rounded())
        .to_string()
}
