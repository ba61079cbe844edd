//! Database schema and connection management

use crate::error::Result;
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::info;

/// Home teams offered at registration: (id, name, code, color, accent).
const SEED_TEAMS: [(i64, &str, &str, &str, &str); 6] = [
    (1, "Los Angeles Lakers", "LAL", "#552583", "#FDB927"),
    (2, "Golden State Warriors", "GSW", "#1D428A", "#FFC72C"),
    (3, "Boston Celtics", "BOS", "#007A33", "#BA9653"),
    (4, "Chicago Bulls", "CHI", "#CE1141", "#000000"),
    (5, "Miami Heat", "MIA", "#98002E", "#F9A01B"),
    (6, "San Antonio Spurs", "SAS", "#C4CED4", "#000000"),
];

/// Database connection for users and local teams
pub struct AppDatabase {
    pub(crate) conn: Connection,
}

impl AppDatabase {
    /// Open (or create) the database file and ensure tables exist
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let mut db = Self::from_connection(conn)?;
        db.initialize_schema()?;
        info!(path = %path.display(), "database initialized");
        Ok(db)
    }

    /// In-memory database with the schema applied, for tests and tooling
    pub fn new_in_memory() -> Result<Self> {
        let mut db = Self::from_connection(Connection::open_in_memory()?)?;
        db.initialize_schema()?;
        Ok(db)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    /// Create tables and seed the local teams
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS teams (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                code TEXT NOT NULL,
                color TEXT NOT NULL,
                accent TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                nickname TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL,
                avatar TEXT NOT NULL DEFAULT '',
                team_id INTEGER NOT NULL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL,
                FOREIGN KEY (team_id) REFERENCES teams(id)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_users_team ON users(team_id)",
            [],
        )?;

        let tx = self.conn.transaction()?;
        for (id, name, code, color, accent) in SEED_TEAMS {
            tx.execute(
                "INSERT OR IGNORE INTO teams (id, name, code, color, accent)
                 VALUES (?, ?, ?, ?, ?)",
                params![id, name, code, color, accent],
            )?;
        }
        tx.commit()?;

        Ok(())
    }
}
