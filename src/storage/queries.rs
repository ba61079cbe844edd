//! Basic database query operations

use super::{models::*, schema::AppDatabase};
use crate::cli::types::{TeamId, UserId};
use crate::error::Result;
use rusqlite::{params, OptionalExtension, Row};
use std::time::{SystemTime, UNIX_EPOCH};

const USER_WITH_TEAM_SELECT: &str = "
    SELECT u.id, u.nickname, u.password, u.avatar, u.team_id, u.created_at, u.updated_at,
           t.id, t.name, t.code, t.color, t.accent
    FROM users u
    LEFT JOIN teams t ON u.team_id = t.id";

fn now_secs() -> Result<i64> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as i64)
}

impl AppDatabase {
    /// All local teams ordered by id
    pub fn list_teams(&self) -> Result<Vec<LocalTeam>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, code, color, accent FROM teams ORDER BY id")?;

        let rows = stmt.query_map([], |row| Self::row_to_team(row, 0))?;

        let mut teams = Vec::new();
        for row in rows {
            teams.push(row?);
        }
        Ok(teams)
    }

    pub fn get_team(&self, team_id: TeamId) -> Result<Option<LocalTeam>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name, code, color, accent FROM teams WHERE id = ?",
                params![team_id.as_i64()],
                |row| Self::row_to_team(row, 0),
            )
            .optional()?)
    }

    pub fn team_exists(&self, team_id: TeamId) -> Result<bool> {
        Ok(self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM teams WHERE id = ?)",
            params![team_id.as_i64()],
            |row| row.get(0),
        )?)
    }

    pub fn nickname_exists(&self, nickname: &str) -> Result<bool> {
        Ok(self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM users WHERE nickname = ?)",
            params![nickname],
            |row| row.get(0),
        )?)
    }

    /// Insert a user and return its new id
    pub fn insert_user(&mut self, user: &NewUser) -> Result<UserId> {
        let now = now_secs()?;
        self.conn.execute(
            "INSERT INTO users (nickname, password, avatar, team_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                user.nickname,
                user.password_hash,
                user.avatar,
                user.team_id.as_i64(),
                now,
                now
            ],
        )?;
        Ok(UserId::new(self.conn.last_insert_rowid()))
    }

    pub fn find_user(&self, user_id: UserId) -> Result<Option<User>> {
        Ok(self
            .conn
            .query_row(
                &format!("{USER_WITH_TEAM_SELECT} WHERE u.id = ?"),
                params![user_id.as_i64()],
                Self::row_to_user,
            )
            .optional()?)
    }

    /// Look up a user by nickname, including the password hash for login
    pub fn find_user_by_nickname(&self, nickname: &str) -> Result<Option<User>> {
        Ok(self
            .conn
            .query_row(
                &format!("{USER_WITH_TEAM_SELECT} WHERE u.nickname = ?"),
                params![nickname],
                Self::row_to_user,
            )
            .optional()?)
    }

    /// Point the user at a new avatar; returns the previous reference, if any
    ///
    /// `Ok(None)` also covers unknown users, check [`Self::find_user`] first
    /// when that matters.
    pub fn update_avatar(&mut self, user_id: UserId, avatar: &str) -> Result<Option<String>> {
        let tx = self.conn.transaction()?;
        let previous: Option<String> = tx
            .query_row(
                "SELECT avatar FROM users WHERE id = ?",
                params![user_id.as_i64()],
                |row| row.get(0),
            )
            .optional()?;
        tx.execute(
            "UPDATE users SET avatar = ?, updated_at = ? WHERE id = ?",
            params![avatar, now_secs()?, user_id.as_i64()],
        )?;
        tx.commit()?;

        Ok(previous.filter(|p| !p.is_empty()))
    }

    /// Change the user's home team; returns false when the user does not exist
    pub fn update_team(&mut self, user_id: UserId, team_id: TeamId) -> Result<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE users SET team_id = ?, updated_at = ? WHERE id = ?",
            params![team_id.as_i64(), now_secs()?, user_id.as_i64()],
        )?;
        Ok(rows_affected > 0)
    }

    fn row_to_team(row: &Row, offset: usize) -> rusqlite::Result<LocalTeam> {
        Ok(LocalTeam {
            id: TeamId::new(row.get(offset)?),
            name: row.get(offset + 1)?,
            code: row.get(offset + 2)?,
            color: row.get(offset + 3)?,
            accent: row.get(offset + 4)?,
        })
    }

    fn row_to_user(row: &Row) -> rusqlite::Result<User> {
        // LEFT JOIN: team columns are NULL when the team row is gone.
        let team = match row.get::<_, Option<i64>>(7)? {
            Some(_) => Some(Self::row_to_team(row, 7)?),
            None => None,
        };

        Ok(User {
            id: UserId::new(row.get(0)?),
            nickname: row.get(1)?,
            password_hash: row.get(2)?,
            avatar: row.get(3)?,
            team_id: TeamId::new(row.get(4)?),
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
            team,
        })
    }
}
