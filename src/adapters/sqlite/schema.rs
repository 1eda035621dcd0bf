//! SQLite schema creation.
//!
//! Table and column names match the season database produced by the original
//! import, so an existing `epl_2018_2019.db` opens without conversion.

use rusqlite::{Connection, OpenFlags};
use std::path::Path;

use crate::utils::error::Result;

/// Create all tables and indexes if they don't exist. Safe to call repeatedly.
pub fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Open or create a season database at the given path.
pub fn open_database(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    tracing::debug!("Opened season database at {}", path.display());
    Ok(conn)
}

/// Open a season database that already exists. No file is created and no DDL
/// runs, so browsing leaves the schema exactly as it was.
pub fn open_existing_database(path: &Path) -> Result<Connection> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    tracing::debug!("Opened existing season database at {}", path.display());
    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    Ok(conn)
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS Teams (
    TeamID INTEGER PRIMARY KEY AUTOINCREMENT,
    TeamName TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS Referees (
    RefereeID INTEGER PRIMARY KEY AUTOINCREMENT,
    RefereeName TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS Matches (
    MatchID INTEGER PRIMARY KEY AUTOINCREMENT,
    MatchDate TEXT NOT NULL,
    HomeTeamID INTEGER NOT NULL REFERENCES Teams(TeamID),
    AwayTeamID INTEGER NOT NULL REFERENCES Teams(TeamID),
    FTHG INTEGER NOT NULL CHECK (FTHG >= 0),
    FTAG INTEGER NOT NULL CHECK (FTAG >= 0),
    FTR TEXT NOT NULL CHECK (FTR IN ('H', 'D', 'A')),
    RefereeID INTEGER NOT NULL REFERENCES Referees(RefereeID),
    HY INTEGER,
    AY INTEGER,
    HR INTEGER,
    AR INTEGER,
    CHECK (HomeTeamID <> AwayTeamID),
    UNIQUE (MatchDate, HomeTeamID, AwayTeamID)
);

CREATE INDEX IF NOT EXISTS idx_matches_home ON Matches(HomeTeamID);
CREATE INDEX IF NOT EXISTS idx_matches_away ON Matches(AwayTeamID);
CREATE INDEX IF NOT EXISTS idx_matches_referee ON Matches(RefereeID);
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<String>, _>>()
            .unwrap()
    }

    #[test]
    fn test_schema_tables_created() {
        let conn = open_memory().unwrap();
        assert_eq!(table_names(&conn), vec!["Matches", "Referees", "Teams"]);
    }

    #[test]
    fn test_create_schema_is_idempotent() {
        let conn = open_memory().unwrap();
        create_schema(&conn).unwrap();
        create_schema(&conn).unwrap();
        assert_eq!(table_names(&conn).len(), 3);
    }

    #[test]
    fn test_open_existing_database_does_not_create_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.db");
        assert!(open_existing_database(&path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_schema_rejects_same_home_and_away() {
        let conn = open_memory().unwrap();
        conn.execute_batch(
            "INSERT INTO Teams (TeamName) VALUES ('Arsenal');
             INSERT INTO Referees (RefereeName) VALUES ('M Dean');",
        )
        .unwrap();

        let result = conn.execute(
            "INSERT INTO Matches (MatchDate, HomeTeamID, AwayTeamID, FTHG, FTAG, FTR, RefereeID)
             VALUES ('2018-08-12', 1, 1, 0, 0, 'D', 1)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_schema_rejects_negative_goals() {
        let conn = open_memory().unwrap();
        conn.execute_batch(
            "INSERT INTO Teams (TeamName) VALUES ('Arsenal'), ('Chelsea');
             INSERT INTO Referees (RefereeName) VALUES ('M Dean');",
        )
        .unwrap();

        let result = conn.execute(
            "INSERT INTO Matches (MatchDate, HomeTeamID, AwayTeamID, FTHG, FTAG, FTR, RefereeID)
             VALUES ('2018-08-12', 1, 2, -1, 0, 'A', 1)",
            [],
        );
        assert!(result.is_err());
    }
}
