use chrono::{Datelike, NaiveDate, Weekday};
use habitgrid_core::db::open_db_in_memory;
use habitgrid_core::{
    week_window, DashboardService, HabitRepository, LogRepository, LogStatus,
    SqliteHabitRepository, SqliteLogRepository,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn dashboard(
    conn: &rusqlite::Connection,
) -> DashboardService<SqliteHabitRepository<'_>, SqliteLogRepository<'_>> {
    DashboardService::new(
        SqliteHabitRepository::try_new(conn).unwrap(),
        SqliteLogRepository::try_new(conn).unwrap(),
    )
}

#[test]
fn single_done_log_yields_hundred_percent() {
    let conn = open_db_in_memory().unwrap();
    let habits = SqliteHabitRepository::try_new(&conn).unwrap();
    let logs = SqliteLogRepository::try_new(&conn).unwrap();

    let read = habits.insert_habit("Read").unwrap();
    assert_eq!(
        logs.cycle_status(read, date(2024, 6, 3)).unwrap(),
        Some(LogStatus::Done)
    );

    let service = dashboard(&conn);
    assert_eq!(service.overall_completion_percent().unwrap(), 100.0);
}

#[test]
fn mixed_done_and_missed_yields_fifty_percent() {
    let conn = open_db_in_memory().unwrap();
    let habits = SqliteHabitRepository::try_new(&conn).unwrap();
    let logs = SqliteLogRepository::try_new(&conn).unwrap();

    let read = habits.insert_habit("Read").unwrap();
    let gym = habits.insert_habit("Gym").unwrap();
    let day = date(2024, 6, 3);

    // Read -> Done, Gym -> Missed (two cycles).
    logs.cycle_status(read, day).unwrap();
    logs.cycle_status(gym, day).unwrap();
    logs.cycle_status(gym, day).unwrap();

    let service = dashboard(&conn);
    assert_eq!(service.overall_completion_percent().unwrap(), 50.0);
}

#[test]
fn percent_is_zero_with_no_logs_at_all() {
    let conn = open_db_in_memory().unwrap();
    let habits = SqliteHabitRepository::try_new(&conn).unwrap();
    habits.insert_habit("Read").unwrap();

    let service = dashboard(&conn);
    assert_eq!(service.overall_completion_percent().unwrap(), 0.0);
}

#[test]
fn percent_is_rounded_to_two_decimals() {
    let conn = open_db_in_memory().unwrap();
    let habits = SqliteHabitRepository::try_new(&conn).unwrap();
    let logs = SqliteLogRepository::try_new(&conn).unwrap();

    let read = habits.insert_habit("Read").unwrap();
    // One Done, two Missed: 33.333... percent.
    logs.cycle_status(read, date(2024, 6, 3)).unwrap();
    for day in [date(2024, 6, 4), date(2024, 6, 5)] {
        logs.cycle_status(read, day).unwrap();
        logs.cycle_status(read, day).unwrap();
    }

    let service = dashboard(&conn);
    assert_eq!(service.overall_completion_percent().unwrap(), 33.33);
}

#[test]
fn week_grid_contains_one_row_per_habit_with_cell_statuses() {
    let conn = open_db_in_memory().unwrap();
    let habits = SqliteHabitRepository::try_new(&conn).unwrap();
    let logs = SqliteLogRepository::try_new(&conn).unwrap();

    let read = habits.insert_habit("Read").unwrap();
    let gym = habits.insert_habit("Gym").unwrap();

    let today = date(2024, 6, 5);
    logs.cycle_status(read, date(2024, 6, 3)).unwrap();
    logs.cycle_status(gym, date(2024, 6, 4)).unwrap();
    logs.cycle_status(gym, date(2024, 6, 4)).unwrap();

    let grid = dashboard(&conn)
        .build_grid(week_window(today, 0).unwrap())
        .unwrap();

    assert_eq!(grid.dates[0], date(2024, 6, 3));
    assert_eq!(grid.dates[0].weekday(), Weekday::Mon);
    assert_eq!(grid.rows.len(), 2);

    let read_row = &grid.rows[0];
    assert_eq!(read_row.habit.id, read);
    assert_eq!(read_row.cells[0], Some(LogStatus::Done));
    assert!(read_row.cells[1..].iter().all(|cell| cell.is_none()));

    let gym_row = &grid.rows[1];
    assert_eq!(gym_row.habit.id, gym);
    assert_eq!(gym_row.cells[1], Some(LogStatus::Missed));
}

#[test]
fn week_grid_ignores_logs_outside_the_window() {
    let conn = open_db_in_memory().unwrap();
    let habits = SqliteHabitRepository::try_new(&conn).unwrap();
    let logs = SqliteLogRepository::try_new(&conn).unwrap();

    let read = habits.insert_habit("Read").unwrap();
    let today = date(2024, 6, 5);
    logs.cycle_status(read, date(2024, 5, 27)).unwrap();

    let this_week = dashboard(&conn)
        .build_grid(week_window(today, 0).unwrap())
        .unwrap();
    assert!(this_week.rows[0].cells.iter().all(|cell| cell.is_none()));

    let last_week = dashboard(&conn)
        .build_grid(week_window(today, -1).unwrap())
        .unwrap();
    assert_eq!(last_week.dates[0], date(2024, 5, 27));
    assert_eq!(last_week.rows[0].cells[0], Some(LogStatus::Done));
}

#[test]
fn week_grid_with_no_habits_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let grid = dashboard(&conn)
        .build_grid(week_window(date(2024, 6, 5), 0).unwrap())
        .unwrap();

    assert!(grid.is_empty());
    assert_eq!(grid.dates.len(), 7);
}

#[test]
fn weekly_counts_group_done_rows_by_iso_week() {
    let conn = open_db_in_memory().unwrap();
    let habits = SqliteHabitRepository::try_new(&conn).unwrap();
    let logs = SqliteLogRepository::try_new(&conn).unwrap();

    let read = habits.insert_habit("Read").unwrap();
    let gym = habits.insert_habit("Gym").unwrap();

    // ISO week 23: two Done rows and one Missed row.
    logs.cycle_status(read, date(2024, 6, 3)).unwrap();
    logs.cycle_status(gym, date(2024, 6, 4)).unwrap();
    logs.cycle_status(read, date(2024, 6, 5)).unwrap();
    logs.cycle_status(read, date(2024, 6, 5)).unwrap();
    // ISO week 25: one Done row.
    logs.cycle_status(read, date(2024, 6, 17)).unwrap();

    let counts = dashboard(&conn).weekly_completion_counts().unwrap();

    assert_eq!(counts.get(&23), Some(&2));
    assert_eq!(counts.get(&25), Some(&1));
    // Week 24 had no Done rows and must be absent, not zero.
    assert_eq!(counts.get(&24), None);
    assert_eq!(counts.len(), 2);
}

#[test]
fn weekly_counts_are_empty_without_done_rows() {
    let conn = open_db_in_memory().unwrap();
    let habits = SqliteHabitRepository::try_new(&conn).unwrap();
    let logs = SqliteLogRepository::try_new(&conn).unwrap();

    let read = habits.insert_habit("Read").unwrap();
    // Missed only.
    logs.cycle_status(read, date(2024, 6, 3)).unwrap();
    logs.cycle_status(read, date(2024, 6, 3)).unwrap();

    assert!(dashboard(&conn).weekly_completion_counts().unwrap().is_empty());
}
