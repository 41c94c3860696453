//! SQLite table of channels tracked per user.

use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use rusqlite::{params, Connection, OptionalExtension};

/// One row of the table. `auth` is stored and returned byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedChannel {
    pub user_id: i64,
    pub channel: String,
    pub auth: Option<Vec<u8>>,
}

/// Tracked channels, unique per `(user_id, channel)`. All access goes through
/// a single connection behind a mutex.
pub struct ChannelStore {
    conn: Mutex<Connection>,
}

impl ChannelStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        migrate(&conn)?;

        info!("Channel database opened at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        migrate(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| anyhow!("Channel DB lock poisoned: {}", e))?;
        f(&conn)
    }

    /// Start tracking `channel` for `user_id`. Returns `false` if the user
    /// already tracks it; the existing row is left untouched.
    pub fn add_channel(&self, user_id: i64, channel: &str, auth: Option<&[u8]>) -> Result<bool> {
        self.with_conn(|conn| {
            let inserted = conn.execute(
                "INSERT OR IGNORE INTO tracked_channels (user_id, channel, auth) VALUES (?1, ?2, ?3)",
                params![user_id, channel, auth],
            )?;
            Ok(inserted > 0)
        })
    }

    /// Replace the auth blob of an existing row. Returns `false` if there is no such row.
    pub fn set_auth(&self, user_id: i64, channel: &str, auth: Option<&[u8]>) -> Result<bool> {
        self.with_conn(|conn| {
            let updated = conn.execute(
                "UPDATE tracked_channels SET auth = ?3 WHERE user_id = ?1 AND channel = ?2",
                params![user_id, channel, auth],
            )?;
            Ok(updated > 0)
        })
    }

    pub fn remove_channel(&self, user_id: i64, channel: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let deleted = conn.execute(
                "DELETE FROM tracked_channels WHERE user_id = ?1 AND channel = ?2",
                params![user_id, channel],
            )?;
            Ok(deleted > 0)
        })
    }

    /// Channels tracked by `user_id`, ordered by name.
    pub fn channels_for(&self, user_id: i64) -> Result<Vec<TrackedChannel>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT user_id, channel, auth FROM tracked_channels WHERE user_id = ?1 ORDER BY channel",
            )?;

            let rows = stmt
                .query_map([user_id], |row| {
                    Ok(TrackedChannel {
                        user_id: row.get(0)?,
                        channel: row.get(1)?,
                        auth: row.get(2)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    pub fn auth(&self, user_id: i64, channel: &str) -> Result<Option<Vec<u8>>> {
        self.with_conn(|conn| {
            let auth: Option<Option<Vec<u8>>> = conn
                .query_row(
                    "SELECT auth FROM tracked_channels WHERE user_id = ?1 AND channel = ?2",
                    params![user_id, channel],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(auth.flatten())
        })
    }

    /// True if any user tracks `channel`.
    pub fn is_tracked(&self, channel: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let found = conn
                .query_row(
                    "SELECT 1 FROM tracked_channels WHERE channel = ?1 LIMIT 1",
                    [channel],
                    |_| Ok(()),
                )
                .optional()?;
            Ok(found.is_some())
        })
    }

    /// Every channel tracked by at least one user.
    pub fn all_channels(&self) -> Result<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT DISTINCT channel FROM tracked_channels ORDER BY channel")?;
            let rows = stmt
                .query_map([], |row| row.get(0))?
                .collect::<Result<Vec<String>, _>>()?;
            Ok(rows)
        })
    }
}

fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS tracked_channels (
            user_id     INTEGER NOT NULL,
            channel     TEXT NOT NULL,
            auth        BLOB,
            created_at  TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (user_id, channel)
        );

        CREATE INDEX IF NOT EXISTS idx_tracked_channels_channel
            ON tracked_channels(channel);
        ",
    )?;

    debug!("Channel database migrations complete");
    Ok(())
}

/// Normalizes a channel reference to a bare lowercase username:
/// `@Name`, `t.me/Name` and `https://t.me/Name` all become `name`.
pub fn normalize_channel(name: &str) -> String {
    let name = name.trim();
    let name = name
        .strip_prefix("https://")
        .or_else(|| name.strip_prefix("http://"))
        .unwrap_or(name);
    let name = name.strip_prefix("t.me/").unwrap_or(name);
    let name = name.strip_prefix('@').unwrap_or(name);
    name.trim_end_matches('/').to_lowercase()
}
