pub mod attendance;
pub mod correction;
pub mod qr;
pub mod stats;
pub mod timetable;

pub use attendance::{AttendanceRecord, AttendanceStatus, TimeField};
pub use correction::TimeCorrection;
pub use qr::QrPayload;
pub use stats::AttendanceStats;
pub use timetable::{NewTimeSlot, Student, TimeSlot, TimeSlotPatch};
