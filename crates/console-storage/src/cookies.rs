//! Cookie jar
//!
//! Named values with an expiry horizon. An expired cookie reads as absent
//! and is purged on that read, the same way a browser drops it.

use chrono::{DateTime, Duration, Utc};
use rusqlite::OptionalExtension;

use crate::database::Database;
use crate::error::StorageError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub key: String,
    pub value: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Cookie {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

pub struct CookieJar {
    db: Database,
}

impl CookieJar {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Read a cookie value, `None` when missing or expired
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get_cookie(key)?.map(|cookie| cookie.value))
    }

    pub fn get_cookie(&self, key: &str) -> Result<Option<Cookie>> {
        let cookie = self.db.with_connection(|conn| {
            let row = conn
                .query_row(
                    "SELECT key, value, expires_at, created_at FROM cookies WHERE key = ?1",
                    [key],
                    |row| {
                        Ok((
                            row.get::<_, String>(0)?,
                            row.get::<_, String>(1)?,
                            row.get::<_, String>(2)?,
                            row.get::<_, String>(3)?,
                        ))
                    },
                )
                .optional()?;
            Ok(row)
        })?;

        let Some((key, value, expires_str, created_str)) = cookie else {
            return Ok(None);
        };

        // An unparseable expiry is treated as already expired
        let expires_at = DateTime::parse_from_rfc3339(&expires_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let created_at = DateTime::parse_from_rfc3339(&created_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        let cookie = Cookie {
            key,
            value,
            expires_at,
            created_at,
        };

        if cookie.is_expired_at(Utc::now()) {
            tracing::debug!(key = %cookie.key, "Cookie expired, purging");
            self.remove(&cookie.key)?;
            return Ok(None);
        }

        Ok(Some(cookie))
    }

    /// Store a cookie that lives for `expires_in_days` days
    pub fn set(&self, key: &str, value: &str, expires_in_days: u32) -> Result<()> {
        if expires_in_days == 0 {
            return Err(StorageError::InvalidExpiry(expires_in_days));
        }
        let expires_at = Utc::now() + Duration::days(i64::from(expires_in_days));
        self.set_until(key, value, expires_at)
    }

    pub fn set_until(&self, key: &str, value: &str, expires_at: DateTime<Utc>) -> Result<()> {
        let created_at = Utc::now().to_rfc3339();
        self.db.with_connection(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO cookies (key, value, expires_at, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![key, value, expires_at.to_rfc3339(), created_at],
            )?;
            Ok(())
        })?;

        tracing::debug!(key = %key, expires_at = %expires_at, "Stored cookie");

        Ok(())
    }

    /// Remove a cookie; removing a missing cookie is a no-op
    pub fn remove(&self, key: &str) -> Result<()> {
        let removed = self.db.with_connection(|conn| {
            Ok(conn.execute("DELETE FROM cookies WHERE key = ?1", [key])?)
        })?;

        if removed > 0 {
            tracing::debug!(key = %key, "Removed cookie");
        }

        Ok(())
    }
}

impl Clone for CookieJar {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}
