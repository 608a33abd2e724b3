use crate::cli::commands::open_storage;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::AttendanceService;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::colors::{CYAN, GREEN, RESET, YELLOW};
use crate::utils::date;
use crate::utils::time::format_minutes;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats { date: date_arg } = cmd {
        let day = match date_arg {
            Some(d) => date::parse_date_arg(d)?,
            None => date::today(),
        };

        let service = AttendanceService::new(open_storage(cfg)?);
        let stats = service.stats_for_date(day);

        header(format!("Attendance on {}", day.format("%d.%m.%Y")));
        println!("{CYAN}• Records:{RESET} {}", stats.total_records);
        println!("{CYAN}• Present now:{RESET} {GREEN}{}{RESET}", stats.active_check_ins);
        println!("{CYAN}• Completed:{RESET} {}", stats.completed_sessions);
        println!(
            "{CYAN}• Average duration:{RESET} {YELLOW}{}{RESET}",
            format_minutes(stats.average_duration_minutes)
        );
        println!("{CYAN}• Students overall:{RESET} {}", service.unique_students());
    }

    Ok(())
}
