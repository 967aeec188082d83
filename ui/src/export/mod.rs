//! "Download PDF": snapshot the active view, rasterize, paginate, deliver.

pub mod delivery;
pub mod pdf;
pub mod raster;
pub mod snapshot;

use api::ResultSet;
use thiserror::Error;
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use tracing::info;

use crate::data::FilterCriteria;
use crate::views::View;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExportError {
    #[error("There is no data to export yet")]
    NoData,

    #[error("Failed to render the report: {0}")]
    Render(String),

    #[error("Failed to build the PDF: {0}")]
    Pdf(String),

    #[error("Failed to save the PDF: {0}")]
    Delivery(String),
}

#[derive(Clone, Debug, PartialEq, Default)]
pub enum ExportStatus {
    #[default]
    Idle,
    Working,
    Done(String),
    Error(String),
}

impl ExportStatus {
    pub fn is_busy(&self) -> bool {
        matches!(self, ExportStatus::Working)
    }
}

pub fn report_file_name(date: Date) -> String {
    let stamp = date
        .format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string());
    format!("full-report-{stamp}.pdf")
}

pub fn generated_on(now: OffsetDateTime) -> String {
    now.format(format_description!(
        "[year]-[month]-[day] [hour]:[minute] UTC"
    ))
    .unwrap_or_else(|_| now.to_string())
}

/// Run the whole pipeline. Returns where the file went (desktop) or `None`
/// when the browser took over the download.
pub async fn export_report(
    view: View,
    set: Option<&ResultSet>,
    criteria: &FilterCriteria,
) -> Result<Option<String>, ExportError> {
    let set = set.filter(|set| !set.is_empty()).ok_or(ExportError::NoData)?;
    let now = OffsetDateTime::now_utc();

    let snapshot = snapshot::report_snapshot(view, set, criteria, &generated_on(now));
    let raster = raster::rasterize(&snapshot.svg, raster::RENDER_SCALE).await?;
    let bytes = pdf::build_pdf(&raster)?;
    let filename = report_file_name(now.date());

    info!(?view, %filename, size = bytes.len(), "report exported");
    delivery::download_bytes(&filename, "application/pdf", bytes).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn file_name_uses_iso_date() {
        assert_eq!(report_file_name(date!(2025 - 03 - 07)), "full-report-2025-03-07.pdf");
    }

    #[test]
    fn generated_on_is_minute_precision() {
        assert_eq!(
            generated_on(datetime!(2025-03-07 09:05:59 UTC)),
            "2025-03-07 09:05 UTC"
        );
    }

    #[test]
    fn empty_dataset_cannot_be_exported() {
        let criteria = FilterCriteria::default();
        let empty = Vec::new();
        let outcome = futures::executor::block_on(export_report(View::Home, Some(&empty), &criteria));
        assert_eq!(outcome, Err(ExportError::NoData));
        let outcome = futures::executor::block_on(export_report(View::Table, None, &criteria));
        assert_eq!(outcome, Err(ExportError::NoData));
    }

    #[test]
    fn busy_only_while_working() {
        assert!(ExportStatus::Working.is_busy());
        assert!(!ExportStatus::Error("x".into()).is_busy());
    }
}
