//! Person repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the four store operations (insert, list, update-age, delete)
//!   over the `persons` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Insert paths only accept validated `NewPerson` requests.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - Zero affected rows on update/delete is a valid outcome, not an error.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::person::{NewPerson, Person, PersonId, PersonValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PERSON_SELECT_SQL: &str = "SELECT id, name, age FROM persons";

const REQUIRED_COLUMNS: &[&str] = &["id", "name", "age"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for person persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Insert request failed model validation.
    Validation(PersonValidationError),
    /// The backing store rejected a write due to a column constraint.
    Constraint(rusqlite::Error),
    /// Any other failure executing a statement.
    Db(DbError),
    /// A persisted row violates the model contract.
    InvalidData(String),
    /// The connection has not run schema initialization.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// An expected table is absent.
    MissingRequiredTable(&'static str),
    /// A table exists under the expected name but is missing a column.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Constraint(err) => write!(f, "constraint violation: {err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted person data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; \
                 open connections via persondb_core::db"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` does not exist")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "table `{table}` is missing required column `{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Constraint(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PersonValidationError> for RepoError {
    fn from(value: PersonValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(err, _) = &value {
            if err.code == rusqlite::ErrorCode::ConstraintViolation {
                return Self::Constraint(value);
            }
        }
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the four person store operations.
pub trait PersonRepository {
    /// Inserts one person and returns the store-assigned id.
    fn insert(&self, person: &NewPerson) -> RepoResult<PersonId>;
    /// Returns all rows as a finite snapshot in ascending id order.
    fn list_all(&self) -> RepoResult<Vec<Person>>;
    /// Sets `age` for the matching row; returns the affected count (0 or 1).
    fn update_age(&self, id: PersonId, new_age: u32) -> RepoResult<usize>;
    /// Removes the matching row; returns the affected count (0 or 1).
    fn delete(&self, id: PersonId) -> RepoResult<usize>;
}

/// SQLite-backed person repository borrowing one ready connection.
pub struct SqlitePersonRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePersonRepository<'conn> {
    /// Constructs a repository from an initialized connection.
    ///
    /// Rejects connections whose schema was never applied, and connections
    /// where an incompatible table occupies the `persons` name.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl PersonRepository for SqlitePersonRepository<'_> {
    fn insert(&self, person: &NewPerson) -> RepoResult<PersonId> {
        self.conn.execute(
            "INSERT INTO persons (name, age) VALUES (?1, ?2);",
            params![person.name(), i64::from(person.age())],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn list_all(&self) -> RepoResult<Vec<Person>> {
        // Ascending id keeps the scan deterministic per call; callers must
        // not rely on any stronger ordering contract.
        let mut stmt = self
            .conn
            .prepare(&format!("{PERSON_SELECT_SQL} ORDER BY id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut persons = Vec::new();
        while let Some(row) = rows.next()? {
            persons.push(parse_person_row(row)?);
        }

        Ok(persons)
    }

    fn update_age(&self, id: PersonId, new_age: u32) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "UPDATE persons SET age = ?1 WHERE id = ?2;",
            params![i64::from(new_age), id],
        )?;

        Ok(changed)
    }

    fn delete(&self, id: PersonId) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM persons WHERE id = ?1;", [id])?;

        Ok(changed)
    }
}

fn parse_person_row(row: &Row<'_>) -> RepoResult<Person> {
    let id: PersonId = row.get("id")?;

    let age_raw: i64 = row.get("age")?;
    let age = u32::try_from(age_raw).map_err(|_| {
        RepoError::InvalidData(format!("invalid age value `{age_raw}` in persons.age"))
    })?;

    let name: String = row.get("name")?;
    if name.trim().is_empty() {
        return Err(RepoError::InvalidData(format!(
            "empty name in persons row id={id}"
        )));
    }

    Ok(Person { id, name, age })
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let expected_version = latest_version();
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "persons")? {
        return Err(RepoError::MissingRequiredTable("persons"));
    }

    for &column in REQUIRED_COLUMNS {
        if !table_has_column(conn, "persons", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "persons",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
