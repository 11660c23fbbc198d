//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `tripboard_core` linkage with deterministic output.
//! - Print per-column card counts for one trip when given a database.
//!
//! Usage: `tripboard_cli [<db_path> <trip_id> [all|mine|shared] [jonne|frank]]`

use std::process::ExitCode;
use tripboard_core::db::open_db;
use tripboard_core::{BoardService, SqliteEquipmentRepository, Traveler, ViewFilter};
use uuid::Uuid;

fn main() -> ExitCode {
    println!("tripboard_core ping={}", tripboard_core::ping());
    println!("tripboard_core version={}", tripboard_core::core_version());

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    if args.is_empty() {
        return ExitCode::SUCCESS;
    }

    match print_board(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_board(args: &[String]) -> Result<(), String> {
    let [db_path, trip_id, rest @ ..] = args else {
        return Err("expected <db_path> <trip_id> [filter] [user]".to_string());
    };
    let trip_id = Uuid::parse_str(trip_id).map_err(|err| format!("invalid trip id: {err}"))?;
    let filter = match rest.first() {
        Some(value) => {
            ViewFilter::parse(value).ok_or_else(|| format!("unknown filter `{value}`"))?
        }
        None => ViewFilter::All,
    };
    let user = match rest.get(1) {
        Some(value) => {
            Some(Traveler::parse(value).ok_or_else(|| format!("unknown user `{value}`"))?)
        }
        None => None,
    };

    let conn = open_db(db_path).map_err(|err| err.to_string())?;
    let board = BoardService::open(SqliteEquipmentRepository::new(&conn), trip_id)
        .map_err(|err| err.to_string())?;

    for column in board.columns(filter, user).iter() {
        println!("{} count={}", column.status, column.count());
    }
    Ok(())
}
