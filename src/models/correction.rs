use chrono::{DateTime, Local, Timelike, Utc};
use clap::ValueEnum;

/// Rounding presets offered when an admin corrects a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TimeCorrection {
    FullHour,
    QuarterPast,
    HalfHour,
    QuarterTo,
}

impl TimeCorrection {
    pub fn all() -> [TimeCorrection; 4] {
        [
            TimeCorrection::FullHour,
            TimeCorrection::QuarterPast,
            TimeCorrection::HalfHour,
            TimeCorrection::QuarterTo,
        ]
    }

    pub fn minutes(&self) -> u32 {
        match self {
            TimeCorrection::FullHour => 0,
            TimeCorrection::QuarterPast => 15,
            TimeCorrection::HalfHour => 30,
            TimeCorrection::QuarterTo => 45,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeCorrection::FullHour => "Full hour",
            TimeCorrection::QuarterPast => "Quarter past",
            TimeCorrection::HalfHour => "Half past",
            TimeCorrection::QuarterTo => "Quarter to",
        }
    }

    /// Keep the local hour of `ts`, set the minutes to the preset and clear
    /// seconds. `None` when the local time does not exist (DST gap).
    pub fn apply(&self, ts: DateTime<Utc>) -> Option<DateTime<Utc>> {
        ts.with_timezone(&Local)
            .with_minute(self.minutes())?
            .with_second(0)?
            .with_nanosecond(0)
            .map(|local| local.with_timezone(&Utc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn presets_keep_the_hour() {
        let ts = Local
            .with_ymd_and_hms(2025, 3, 3, 10, 52, 41)
            .single()
            .unwrap()
            .with_timezone(&Utc);

        let got: Vec<String> = TimeCorrection::all()
            .iter()
            .map(|c| {
                c.apply(ts)
                    .unwrap()
                    .with_timezone(&Local)
                    .format("%H:%M:%S")
                    .to_string()
            })
            .collect();

        assert_eq!(got, ["10:00:00", "10:15:00", "10:30:00", "10:45:00"]);
    }
}
