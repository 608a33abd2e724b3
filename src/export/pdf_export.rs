use crate::errors::{AppError, AppResult};
use crate::export::model::{StudentSummary, get_headers, records_to_table};
use crate::export::notify_export_success;
use crate::export::pdf::PdfManager;
use crate::ui::messages::info;
use std::path::Path;

/// One-page-first hours sheet: summary block, then the record table.
pub(crate) fn export_pdf(summary: &StudentSummary, path: &Path) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let headers = get_headers();
    let rows = records_to_table(&summary.records);

    let mut pdf = PdfManager::new();
    pdf.write_report(&summary.title(), &summary.header_lines(), &headers, &rows);

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF write error: {e}")))?;

    notify_export_success("PDF", path);
    Ok(())
}
