//! Fixed-sequence CRUD demo entry point.
//!
//! # Responsibility
//! - Run the canonical open -> ensure schema -> insert -> list -> update ->
//!   delete workflow against a local `sample.db` file.
//! - Keep stdout output deterministic, one status line per step.
//!
//! # Invariants
//! - Any storage failure aborts the remaining steps, prints full diagnostic
//!   detail to stderr and exits with code 1.
//! - The connection is dropped on every exit path, success or failure.

use persondb_core::{
    db::open_db, default_log_level, init_logging, PersonService, RepoResult,
    SqlitePersonRepository,
};
use std::error::Error;

const DB_FILE: &str = "sample.db";

fn main() {
    // Logging is diagnostics-only here; a failure to set it up must not
    // block the demo sequence.
    match std::env::current_dir() {
        Ok(cwd) => {
            let log_dir = cwd.join("logs");
            match log_dir.to_str() {
                Some(log_dir) => {
                    if let Err(err) = init_logging(default_log_level(), log_dir) {
                        eprintln!("persondb: logging disabled: {err}");
                    }
                }
                None => eprintln!(
                    "persondb: logging disabled: log directory path `{}` is not valid UTF-8",
                    log_dir.display()
                ),
            }
        }
        Err(err) => eprintln!("persondb: logging disabled: {err}"),
    }

    if let Err(err) = run() {
        report_failure(&err);
        std::process::exit(1);
    }
}

fn run() -> RepoResult<()> {
    let conn = open_db(DB_FILE)?;
    println!("Database created or opened successfully.");

    // Schema is applied during open; the repository constructor re-verifies
    // that the persons table has the expected shape.
    let repo = SqlitePersonRepository::try_new(&conn)?;
    println!("Table created successfully.");

    let service = PersonService::new(repo);

    insert_person(&service, "John Doe", 29)?;
    insert_person(&service, "Jane Smith", 34)?;

    println!("Reading records from the database:");
    for person in service.list_persons()? {
        println!(
            "ID: {}, Name: {}, Age: {}",
            person.id, person.name, person.age
        );
    }

    service.update_age(1, 30)?;
    println!("Record updated: ID=1 now has age=30");

    service.delete_person(2)?;
    println!("Record with ID=2 deleted.");

    Ok(())
}

fn insert_person(
    service: &PersonService<SqlitePersonRepository<'_>>,
    name: &str,
    age: u32,
) -> RepoResult<()> {
    service.create_person(name, age)?;
    println!("Record inserted: ({name}, {age})");
    Ok(())
}

fn report_failure(err: &dyn Error) {
    eprintln!("persondb: storage failure: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}
