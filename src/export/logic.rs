use crate::core::AttendanceService;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::StudentSummary;
use crate::export::pdf_export::export_pdf;
use crate::store::Storage;
use crate::ui::messages::warning;
use crate::utils::path::{expand_tilde, is_absolute};
use chrono::NaiveDate;

pub struct ExportLogic;

impl ExportLogic {
    /// Build the hours summary for one student, optionally limited to a
    /// single local day, and write it in the requested format.
    ///
    /// Returns `Ok(false)` when there was nothing to export.
    pub fn export<S: Storage>(
        service: &AttendanceService<S>,
        student_id: &str,
        date: Option<NaiveDate>,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<bool> {
        if !is_absolute(file) {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        let summary = match Self::summary(service, student_id, date) {
            Some(s) => s,
            None => {
                warning(format!(
                    "No attendance records found for student {student_id}."
                ));
                return Ok(false);
            }
        };

        let path = expand_tilde(file);
        let path = path.as_path();

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Pdf => export_pdf(&summary, path)?,
            ExportFormat::Csv => export_csv(&summary, path)?,
            ExportFormat::Json => export_json(&summary, path)?,
        }

        if let Err(e) = service.storage().audit(
            "export",
            student_id,
            &format!(
                "{} entries as {} to {}",
                summary.entries,
                format.as_str(),
                path.display()
            ),
        ) {
            warning(format!("Failed to write internal log: {e}"));
        }

        Ok(true)
    }

    /// Records of the student, oldest first. `None` if there are none.
    pub fn summary<S: Storage>(
        service: &AttendanceService<S>,
        student_id: &str,
        date: Option<NaiveDate>,
    ) -> Option<StudentSummary> {
        let mut records: Vec<_> = service
            .records_for_student(student_id)
            .into_iter()
            .filter(|r| date.is_none_or(|d| r.check_in_date() == d))
            .collect();

        if records.is_empty() {
            return None;
        }

        records.sort_by_key(|r| r.check_in_time);

        Some(StudentSummary::build(
            student_id,
            &records,
            date,
            service.now(),
        ))
    }
}
