use persondb_core::db::open_db_in_memory;
use persondb_core::{
    NewPerson, PersonRepository, PersonService, RepoError, SqlitePersonRepository,
};
use rusqlite::Connection;
use std::collections::HashSet;

#[test]
fn insert_then_list_contains_exactly_that_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePersonRepository::try_new(&conn).unwrap();

    let id = repo.insert(&new_person("Ada Lovelace", 36)).unwrap();

    let all = repo.list_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, id);
    assert_eq!(all[0].name, "Ada Lovelace");
    assert_eq!(all[0].age, 36);
}

#[test]
fn inserting_many_records_yields_distinct_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePersonRepository::try_new(&conn).unwrap();

    let mut ids = HashSet::new();
    for index in 0..10_u32 {
        let id = repo
            .insert(&new_person(format!("person-{index}"), 20 + index))
            .unwrap();
        ids.insert(id);
    }

    assert_eq!(ids.len(), 10);
}

#[test]
fn ids_are_never_reused_after_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePersonRepository::try_new(&conn).unwrap();

    let first = repo.insert(&new_person("first", 30)).unwrap();
    let second = repo.insert(&new_person("second", 40)).unwrap();
    assert_eq!(repo.delete(second).unwrap(), 1);

    let third = repo.insert(&new_person("third", 50)).unwrap();
    assert!(third > second);
    assert_ne!(third, second);
    assert_ne!(third, first);
}

#[test]
fn update_age_changes_only_the_age_field() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePersonRepository::try_new(&conn).unwrap();

    let id = repo.insert(&new_person("Grace Hopper", 37)).unwrap();
    let untouched = repo.insert(&new_person("Edsger Dijkstra", 42)).unwrap();

    assert_eq!(repo.update_age(id, 38).unwrap(), 1);

    let all = repo.list_all().unwrap();
    let updated = all.iter().find(|person| person.id == id).unwrap();
    assert_eq!(updated.name, "Grace Hopper");
    assert_eq!(updated.age, 38);

    let other = all.iter().find(|person| person.id == untouched).unwrap();
    assert_eq!(other.name, "Edsger Dijkstra");
    assert_eq!(other.age, 42);
}

#[test]
fn update_age_on_missing_id_is_a_silent_noop() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePersonRepository::try_new(&conn).unwrap();

    assert_eq!(repo.update_age(9_999, 77).unwrap(), 0);
}

#[test]
fn delete_on_missing_or_already_deleted_id_is_a_silent_noop() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePersonRepository::try_new(&conn).unwrap();

    assert_eq!(repo.delete(9_999).unwrap(), 0);

    let id = repo.insert(&new_person("short lived", 1)).unwrap();
    assert_eq!(repo.delete(id).unwrap(), 1);
    assert_eq!(repo.delete(id).unwrap(), 0);
    assert!(repo.list_all().unwrap().is_empty());
}

#[test]
fn end_to_end_fixed_demo_scenario() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePersonRepository::try_new(&conn).unwrap();
    let service = PersonService::new(repo);

    let john = service.create_person("John Doe", 29).unwrap();
    let jane = service.create_person("Jane Smith", 34).unwrap();
    assert_eq!(john, 1);
    assert_eq!(jane, 2);

    let all = service.list_persons().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!((all[0].id, all[0].name.as_str(), all[0].age), (1, "John Doe", 29));
    assert_eq!(
        (all[1].id, all[1].name.as_str(), all[1].age),
        (2, "Jane Smith", 34)
    );

    assert_eq!(service.update_age(1, 30).unwrap(), 1);
    assert_eq!(service.delete_person(2).unwrap(), 1);

    let remaining = service.list_persons().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(
        (remaining[0].id, remaining[0].name.as_str(), remaining[0].age),
        (1, "John Doe", 30)
    );
}

#[test]
fn service_rejects_empty_name_before_any_sql_runs() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePersonRepository::try_new(&conn).unwrap();
    let service = PersonService::new(repo);

    let err = service.create_person("   ", 20).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(service.list_persons().unwrap().is_empty());
}

#[test]
fn backing_store_constraint_violations_map_to_constraint_error() {
    let conn = open_db_in_memory().unwrap();

    // Bypass the validated insert path to exercise the NOT NULL constraint.
    let sqlite_err = conn
        .execute("INSERT INTO persons (name, age) VALUES (NULL, 7);", [])
        .unwrap_err();

    let mapped = RepoError::from(sqlite_err);
    assert!(matches!(mapped, RepoError::Constraint(_)));
}

#[test]
fn list_rejects_invalid_persisted_age() {
    let conn = open_db_in_memory().unwrap();

    // An external writer can smuggle a negative age past the u32 model.
    conn.execute("INSERT INTO persons (name, age) VALUES ('bogus', -5);", [])
        .unwrap();

    let repo = SqlitePersonRepository::try_new(&conn).unwrap();
    let err = repo.list_all().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqlitePersonRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_persons_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!(
        "PRAGMA user_version = {};",
        persondb_core::db::migrations::latest_version()
    ))
    .unwrap();

    let result = SqlitePersonRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("persons"))
    ));
}

#[test]
fn repository_rejects_incompatible_persons_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE persons (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!(
        "PRAGMA user_version = {};",
        persondb_core::db::migrations::latest_version()
    ))
    .unwrap();

    let result = SqlitePersonRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "persons",
            column: "age"
        })
    ));
}

fn new_person(name: impl Into<String>, age: u32) -> NewPerson {
    NewPerson::new(name, age).unwrap()
}
