//! Small durable key/value settings store.
//!
//! # Invariants
//! - The current user is stored under `current_user` as `jonne|frank`.
//! - Unknown stored values read back as "no user selected".

use crate::model::equipment::Traveler;
use crate::repo::equipment_repo::RepoResult;
use log::warn;
use rusqlite::{Connection, OptionalExtension};

const CURRENT_USER_KEY: &str = "current_user";

/// Repository interface for client identity selection.
pub trait SettingsRepository {
    fn current_user(&self) -> RepoResult<Option<Traveler>>;
    /// `None` clears the selection.
    fn set_current_user(&self, user: Option<Traveler>) -> RepoResult<()>;
}

/// SQLite-backed settings repository.
pub struct SqliteSettingsRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSettingsRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SettingsRepository for SqliteSettingsRepository<'_> {
    fn current_user(&self) -> RepoResult<Option<Traveler>> {
        let stored: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM app_settings WHERE key = ?1;",
                [CURRENT_USER_KEY],
                |row| row.get(0),
            )
            .optional()?;

        Ok(stored.and_then(|value| {
            let parsed = Traveler::parse(&value);
            if parsed.is_none() {
                warn!("event=settings_read module=repo status=ignored key={CURRENT_USER_KEY}");
            }
            parsed
        }))
    }

    fn set_current_user(&self, user: Option<Traveler>) -> RepoResult<()> {
        match user {
            Some(user) => {
                self.conn.execute(
                    "INSERT INTO app_settings (key, value) VALUES (?1, ?2)
                     ON CONFLICT(key) DO UPDATE SET
                        value = excluded.value,
                        updated_at = (strftime('%s', 'now') * 1000);",
                    [CURRENT_USER_KEY, user.as_str()],
                )?;
            }
            None => {
                self.conn.execute(
                    "DELETE FROM app_settings WHERE key = ?1;",
                    [CURRENT_USER_KEY],
                )?;
            }
        }
        Ok(())
    }
}
