pub mod attendance;
pub mod auth;
pub mod backup;
pub mod clock;
pub mod log;
pub mod timetable;

pub use attendance::AttendanceService;
pub use auth::AdminAuth;
pub use clock::{Clock, ManualClock, SystemClock};
pub use timetable::TimetableService;
