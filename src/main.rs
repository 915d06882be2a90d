use clap::{crate_version, App, AppSettings, Arg, ArgMatches, SubCommand};
use project_time::config::Config;
use project_time::database::Database;
use project_time::format::format_minutes;
use project_time::{logging, ElapsedDurationTracker, Error, Result};
use std::process::exit;
use tracing::info;

fn main() {
    logging::init();

    let matches = app().get_matches();
    match run(&matches) {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("Error, {}", e);
            exit(1);
        }
    }
}

fn app() -> App<'static, 'static> {
    let start = Arg::with_name("start")
        .help("start time, yyyy-MM-dd HH:mm")
        .required(true)
        .index(1);
    let end = Arg::with_name("end")
        .help("end time, yyyy-MM-dd HH:mm")
        .required(true)
        .index(2);
    let tag = Arg::with_name("tag")
        .help("tag to attach or filter by")
        .short("t")
        .long("tag")
        .takes_value(true);
    let id = Arg::with_name("id")
        .help("entry id, as shown by `pt history`")
        .required(true)
        .index(1);

    App::new("pt")
        .version(crate_version!())
        .about("Tracks time logged on projects")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("elapsed")
                .about("Prints the time between two timestamps")
                .arg(start.clone())
                .arg(end.clone())
                .arg(
                    Arg::with_name("minutes")
                        .help("print raw minutes instead of a scaled value")
                        .short("m")
                        .long("minutes"),
                )
                .arg(
                    Arg::with_name("explain")
                        .help("print why the time is unavailable")
                        .short("e")
                        .long("explain"),
                ),
        )
        .subcommand(
            SubCommand::with_name("log")
                .about("Saves the time between two timestamps")
                .arg(start)
                .arg(end)
                .arg(tag.clone()),
        )
        .subcommand(
            SubCommand::with_name("update")
                .about("Changes the start or end of a saved entry")
                .arg(id.clone())
                .arg(
                    Arg::with_name("start")
                        .help("new start time")
                        .short("s")
                        .long("start")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("end")
                        .help("new end time")
                        .short("e")
                        .long("end")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("history")
                .about("Lists saved entries and their total")
                .arg(tag),
        )
        .subcommand(
            SubCommand::with_name("remove")
                .about("Deletes a saved entry")
                .arg(id),
        )
}

fn run(matches: &ArgMatches) -> Result<i32> {
    match matches.subcommand() {
        ("elapsed", Some(m)) => Ok(elapsed(m)),
        ("log", Some(m)) => log(&open_database()?, m),
        ("update", Some(m)) => update(&open_database()?, m),
        ("history", Some(m)) => history(&open_database()?, m),
        ("remove", Some(m)) => remove(&open_database()?, m),
        // SubcommandRequiredElseHelp keeps us from getting here
        _ => Ok(2),
    }
}

fn open_database() -> Result<Database> {
    let config = Config::load()?;
    config.ensure_directories()?;
    Database::open(&config.database)
}

fn tracker_from(m: &ArgMatches) -> ElapsedDurationTracker {
    ElapsedDurationTracker::new(
        m.value_of("start").unwrap_or_default(),
        m.value_of("end").unwrap_or_default(),
    )
}

fn parse_id(m: &ArgMatches) -> Result<i64> {
    let raw = m.value_of("id").unwrap_or_default();
    raw.parse().map_err(|_| Error::InvalidId(raw.to_string()))
}

fn elapsed(m: &ArgMatches) -> i32 {
    let tracker = tracker_from(m);

    if m.is_present("minutes") {
        println!("{}", tracker.elapsed_minutes());
    } else {
        println!("{}", tracker);
    }

    if m.is_present("explain") {
        if let Err(e) = tracker.elapsed() {
            eprintln!("{}", e);
        }
    }
    0
}

fn log(db: &Database, m: &ArgMatches) -> Result<i32> {
    let tracker = tracker_from(m);

    match db.save_entry(m.value_of("tag"), &tracker) {
        Ok(id) => {
            info!(id, "logged project time");
            println!("{}\t{}", id, tracker);
            Ok(0)
        }
        Err(Error::Elapsed(e)) => {
            println!("{}", tracker);
            eprintln!("{}", e);
            Ok(1)
        }
        Err(e) => Err(e),
    }
}

fn update(db: &Database, m: &ArgMatches) -> Result<i32> {
    let id = parse_id(m)?;
    let mut tracker = db.get_entry(id)?.tracker();

    if let Some(start) = m.value_of("start") {
        tracker.set_start(start);
    }
    if let Some(end) = m.value_of("end") {
        tracker.set_end(end);
    }

    db.update_entry(id, &tracker)?;
    info!(id, "updated project time");
    println!("{}\t{}", id, tracker);
    Ok(0)
}

fn history(db: &Database, m: &ArgMatches) -> Result<i32> {
    let tag = m.value_of("tag");

    for entry in db.get_entries(tag)? {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            entry.id,
            entry.tag.as_deref().unwrap_or("-"),
            entry.start,
            entry.end,
            entry.formatted()
        );
    }
    println!("total\t{}", format_minutes(db.total_minutes(tag)?));
    Ok(0)
}

fn remove(db: &Database, m: &ArgMatches) -> Result<i32> {
    let id = parse_id(m)?;
    db.remove_entry(id)?;
    info!(id, "removed project time");
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(args: &[&str]) -> ArgMatches<'static> {
        app().get_matches_from_safe(args.iter().copied()).unwrap()
    }

    #[test]
    fn elapsed_takes_two_positionals() {
        let m = matches(&["pt", "elapsed", "2024-01-01 00:00", "2024-01-01 01:00", "-m"]);
        let (name, sub) = m.subcommand();
        let sub = sub.unwrap();
        assert_eq!(name, "elapsed");
        assert_eq!(tracker_from(sub).formatted(), "60 m");
        assert!(sub.is_present("minutes"));
        assert_eq!(elapsed(sub), 0);
    }

    #[test]
    fn elapsed_requires_both_timestamps() {
        assert!(app()
            .get_matches_from_safe(vec!["pt", "elapsed", "2024-01-01 00:00"])
            .is_err());
    }

    #[test]
    fn log_and_history_against_database() {
        let db = Database::open_in_memory().unwrap();

        let m = matches(&["pt", "log", "2024-01-01 00:00", "2024-01-01 02:00", "--tag", "a"]);
        assert_eq!(log(&db, m.subcommand_matches("log").unwrap()).unwrap(), 0);

        let m = matches(&["pt", "log", "2024-01-02 00:00", "2024-01-01 00:00"]);
        assert_eq!(log(&db, m.subcommand_matches("log").unwrap()).unwrap(), 1);

        let entries = db.get_entries(None).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].tag.as_deref(), Some("a"));

        let m = matches(&["pt", "history", "-t", "a"]);
        assert_eq!(history(&db, m.subcommand_matches("history").unwrap()).unwrap(), 0);
    }

    #[test]
    fn update_applies_setters() {
        let db = Database::open_in_memory().unwrap();
        let id = db
            .save_entry(
                None,
                &ElapsedDurationTracker::new("2024-01-01 00:00", "2024-01-01 01:00"),
            )
            .unwrap();

        let id_arg = id.to_string();
        let m = matches(&["pt", "update", id_arg.as_str(), "--end", "2024-01-06 00:00"]);
        assert_eq!(update(&db, m.subcommand_matches("update").unwrap()).unwrap(), 0);
        assert_eq!(db.get_entry(id).unwrap().formatted(), "5 d");
    }

    #[test]
    fn bad_ids_are_rejected() {
        let db = Database::open_in_memory().unwrap();
        let m = matches(&["pt", "remove", "seven"]);
        assert!(matches!(
            remove(&db, m.subcommand_matches("remove").unwrap()),
            Err(Error::InvalidId(_))
        ));

        let m = matches(&["pt", "remove", "7"]);
        assert!(matches!(
            remove(&db, m.subcommand_matches("remove").unwrap()),
            Err(Error::EntryNotFound(7))
        ));
    }
}
