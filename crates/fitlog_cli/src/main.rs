//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `fitlog_core` linkage.
//! - Print a month grid for quick calendar-layout sanity checks.
//!
//! Usage: `fitlog_cli [month_offset] [first_weekday]`

use chrono::{Datelike, Local};
use fitlog_core::{build_month_grid, is_same_month, shift_month, weekday_symbols, CalendarConfig};

fn main() {
    println!("fitlog_core ping={}", fitlog_core::ping());
    println!("fitlog_core version={}", fitlog_core::core_version());

    let mut args = std::env::args().skip(1);
    let month_offset = args.next().and_then(|raw| raw.parse::<i32>().ok()).unwrap_or(0);
    let first_weekday = args.next().and_then(|raw| raw.parse::<u8>().ok()).unwrap_or(2);

    let calendar = match CalendarConfig::new(first_weekday) {
        Ok(calendar) => calendar,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };
    let today = Local::now().date_naive();
    let Some(anchor) = shift_month(today, month_offset) else {
        eprintln!("month offset {month_offset} is out of range");
        std::process::exit(2);
    };

    println!("{}-{:02}", anchor.year(), anchor.month());
    println!(
        "{}",
        weekday_symbols(&calendar)
            .iter()
            .map(|symbol| format!("{symbol:>3}"))
            .collect::<String>()
    );
    for week in build_month_grid(anchor, &calendar).chunks(7) {
        let row = week
            .iter()
            .map(|day| {
                if is_same_month(*day, anchor) {
                    format!("{:>3}", day.day())
                } else {
                    "  .".to_string()
                }
            })
            .collect::<String>();
        println!("{row}");
    }
}
