//! Unified application error type.
//! All modules (store, core, cli, export) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Storage-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid day of week: {0} (expected 0 = Sunday … 6 = Saturday)")]
    InvalidDay(u8),

    #[error("Invalid QR code: {0}")]
    InvalidQr(String),

    // ---------------------------
    // Attendance logic errors
    // ---------------------------
    #[error("No active check-in found for student {0}")]
    NoActiveCheckIn(String),

    #[error("{name} is already checked in since {since}")]
    AlreadyCheckedIn { name: String, since: String },

    #[error("Attendance record not found: {0}")]
    RecordNotFound(String),

    #[error("Record {0} has no check-out time to correct")]
    NoCheckOutToCorrect(String),

    // ---------------------------
    // Timetable errors
    // ---------------------------
    #[error("Time slot not found: {0}")]
    TimeSlotNotFound(String),

    // ---------------------------
    // Admin gate
    // ---------------------------
    #[error("Administrator login required (run `rattendance admin login <password>`)")]
    NotAuthenticated,

    #[error("Wrong administrator password")]
    WrongPassword,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
