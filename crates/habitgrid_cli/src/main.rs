//! Terminal presentation layer for HabitGrid.
//!
//! # Responsibility
//! - Render the three views (dashboard, add, manage) on top of core
//!   services; all invariants live in `habitgrid_core`.
//! - Own UI session state (the current week offset) and pass it per call.

use chrono::{Local, NaiveDate};
use habitgrid_core::db::open_db;
use habitgrid_core::{
    default_log_level, init_logging, week_window, DashboardService, HabitService, LogService,
    LogStatus, SqliteHabitRepository, SqliteLogRepository, WeekGrid, WEEK_DAYS,
};
use std::process::ExitCode;

const DEFAULT_DB_FILE: &str = "habits.db";
const LOG_SUBDIR: &str = ".habitgrid/logs";

const USAGE: &str = "usage: habitgrid [--db PATH] <command>

commands:
  dashboard [OFFSET]       weekly grid and stats (0 = current week)
  add <NAME>               add a habit
  list                     list habits with ids
  rename <ID> <NAME>       rename a habit
  delete <ID>              delete a habit and its logs
  toggle <ID> <DATE>       cycle one cell (DATE = YYYY-MM-DD)";

fn main() -> ExitCode {
    init_cli_logging();

    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let db_path = match args.first().map(String::as_str) {
        Some("--db") => {
            if args.len() < 2 {
                eprintln!("--db requires a path");
                return ExitCode::from(2);
            }
            args.remove(0);
            args.remove(0)
        }
        _ => DEFAULT_DB_FILE.to_string(),
    };

    match run(&db_path, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Usage(message)) => {
            eprintln!("{message}");
            eprintln!("{USAGE}");
            ExitCode::from(2)
        }
        Err(CliError::Core(message)) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

enum CliError {
    Usage(String),
    Core(String),
}

/// Best-effort file logging next to where the tool is run; a failure
/// degrades to a warning instead of blocking the command.
fn init_cli_logging() {
    let Ok(current_dir) = std::env::current_dir() else {
        return;
    };
    let log_dir = current_dir.join(LOG_SUBDIR);
    let Some(log_dir) = log_dir.to_str() else {
        return;
    };
    if let Err(message) = init_logging(default_log_level(), log_dir) {
        eprintln!("warning: file logging disabled: {message}");
    }
}

impl<E: std::error::Error> From<E> for CliError {
    fn from(value: E) -> Self {
        Self::Core(value.to_string())
    }
}

fn run(db_path: &str, args: &[String]) -> Result<(), CliError> {
    let conn = open_db(db_path)?;

    match args.first().map(String::as_str) {
        None | Some("dashboard") => {
            let offset = match args.get(1) {
                Some(raw) => raw
                    .parse::<i64>()
                    .map_err(|_| CliError::Usage(format!("invalid week offset `{raw}`")))?,
                None => 0,
            };
            let today = Local::now().date_naive();
            let dates = week_window(today, offset).ok_or_else(|| {
                CliError::Usage(format!("week offset `{offset}` is out of range"))
            })?;
            render_dashboard(&conn, dates)
        }
        Some("add") => {
            let name = args
                .get(1)
                .ok_or_else(|| CliError::Usage("add requires a habit name".to_string()))?;
            let service = HabitService::new(SqliteHabitRepository::try_new(&conn)?);
            let id = service.add_habit(name)?;
            println!("habit #{id} ready");
            Ok(())
        }
        Some("list") => {
            let service = HabitService::new(SqliteHabitRepository::try_new(&conn)?);
            let habits = service.list_habits()?;
            if habits.is_empty() {
                println!("no habits yet");
            }
            for habit in habits {
                println!("{:>4}  {}", habit.id, habit.name);
            }
            Ok(())
        }
        Some("rename") => {
            let (id, name) = parse_id_and_value(args, "rename requires an id and a name")?;
            let service = HabitService::new(SqliteHabitRepository::try_new(&conn)?);
            service.rename_habit(id, name)?;
            println!("habit #{id} renamed to {name}");
            Ok(())
        }
        Some("delete") => {
            let id = parse_id(
                args.get(1)
                    .ok_or_else(|| CliError::Usage("delete requires an id".to_string()))?,
            )?;
            let service = HabitService::new(SqliteHabitRepository::try_new(&conn)?);
            service.delete_habit(id)?;
            println!("habit #{id} deleted");
            Ok(())
        }
        Some("toggle") => {
            let (id, raw_date) = parse_id_and_value(args, "toggle requires an id and a date")?;
            let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
                .map_err(|_| CliError::Usage(format!("invalid date `{raw_date}`")))?;
            let service = LogService::new(SqliteLogRepository::try_new(&conn)?);
            let status = service.cycle_status(id, date)?;
            println!("{date} -> {}", status_glyph(status));
            Ok(())
        }
        Some(other) => Err(CliError::Usage(format!("unknown command `{other}`"))),
    }
}

fn parse_id(raw: &str) -> Result<i64, CliError> {
    raw.parse::<i64>()
        .map_err(|_| CliError::Usage(format!("invalid habit id `{raw}`")))
}

fn parse_id_and_value<'a>(
    args: &'a [String],
    message: &str,
) -> Result<(i64, &'a str), CliError> {
    match (args.get(1), args.get(2)) {
        (Some(raw_id), Some(value)) => Ok((parse_id(raw_id)?, value.as_str())),
        _ => Err(CliError::Usage(message.to_string())),
    }
}

fn render_dashboard(
    conn: &rusqlite::Connection,
    dates: [NaiveDate; WEEK_DAYS],
) -> Result<(), CliError> {
    let service = DashboardService::new(
        SqliteHabitRepository::try_new(conn)?,
        SqliteLogRepository::try_new(conn)?,
    );

    let grid = service.build_grid(dates)?;
    render_grid(&grid);

    println!();
    println!(
        "overall completion: {}%",
        service.overall_completion_percent()?
    );

    let weekly = service.weekly_completion_counts()?;
    if !weekly.is_empty() {
        println!("done per ISO week:");
        for (week, count) in weekly {
            println!("  W{week:02}  {count}");
        }
    }

    Ok(())
}

fn render_grid(grid: &WeekGrid) {
    print!("{:<20}", "habit");
    for day in grid.dates.iter() {
        print!(" {}", day.format("%a %d"));
    }
    println!();

    if grid.is_empty() {
        println!("add habits to start tracking");
        return;
    }

    for row in &grid.rows {
        print!("{:<20}", row.habit.name);
        for cell in row.cells.iter() {
            print!(" {:^6}", status_glyph(*cell));
        }
        println!();
    }
}

fn status_glyph(status: Option<LogStatus>) -> &'static str {
    match status {
        None => "[ ]",
        Some(LogStatus::Done) => "[x]",
        Some(LogStatus::Missed) => "[-]",
    }
}
