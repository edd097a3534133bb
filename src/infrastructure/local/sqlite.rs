//! SQLite-backed user cache.
//!
//! One `users` table keyed by email with the name, picture and location
//! records flattened into prefixed columns. Rows keep their insertion order
//! (rowid); an upsert of an existing email updates the row in place.

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tokio::sync::watch;

use super::UserLocalDataSource;
use crate::domain::{User, UserError, UserLocation};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    email TEXT PRIMARY KEY NOT NULL,
    name_title TEXT NOT NULL,
    name_first TEXT NOT NULL,
    name_last TEXT NOT NULL,
    phone TEXT NOT NULL,
    picture_large TEXT NOT NULL,
    picture_thumbnail TEXT NOT NULL,
    nationality TEXT NOT NULL,
    location_street_number TEXT NOT NULL,
    location_street_name TEXT NOT NULL,
    location_city TEXT NOT NULL,
    location_state TEXT NOT NULL,
    location_country TEXT NOT NULL,
    location_postcode TEXT NOT NULL
)";

const SELECT_COLUMNS: &str = "email, name_title, name_first, name_last, phone, picture_large, \
     picture_thumbnail, nationality, location_street_number, location_street_name, \
     location_city, location_state, location_country, location_postcode";

const UPSERT: &str = "
INSERT INTO users (email, name_title, name_first, name_last, phone, picture_large,
    picture_thumbnail, nationality, location_street_number, location_street_name,
    location_city, location_state, location_country, location_postcode)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
ON CONFLICT(email) DO UPDATE SET
    name_title = excluded.name_title,
    name_first = excluded.name_first,
    name_last = excluded.name_last,
    phone = excluded.phone,
    picture_large = excluded.picture_large,
    picture_thumbnail = excluded.picture_thumbnail,
    nationality = excluded.nationality,
    location_street_number = excluded.location_street_number,
    location_street_name = excluded.location_street_name,
    location_city = excluded.location_city,
    location_state = excluded.location_state,
    location_country = excluded.location_country,
    location_postcode = excluded.location_postcode";

#[derive(Clone)]
pub struct SqliteUserStore {
    conn: Arc<Mutex<Connection>>,
    users: watch::Sender<Vec<User>>,
}

impl SqliteUserStore {
    /// Open (or create) the cache database at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self, UserError> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, UserError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, UserError> {
        conn.execute_batch(SCHEMA)?;
        let cached = load_all(&conn)?;
        log::info!("Opened user cache with {} users", cached.len());
        let (users, _) = watch::channel(cached);
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            users,
        })
    }

    /// Run `f` against the connection on the blocking pool
    async fn with_connection<T, F>(&self, f: F) -> Result<T, UserError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T, UserError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| UserError::Storage("connection lock poisoned".to_string()))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| UserError::Storage(format!("storage task failed: {e}")))?
    }

    /// Apply a write and publish the resulting table contents
    async fn write<F>(&self, f: F) -> Result<(), UserError>
    where
        F: FnOnce(&rusqlite::Transaction<'_>) -> Result<(), UserError> + Send + 'static,
    {
        let latest = self
            .with_connection(move |conn| {
                let tx = conn.transaction()?;
                f(&tx)?;
                tx.commit()?;
                load_all(conn)
            })
            .await?;

        self.users.send_if_modified(|cached| {
            if *cached == latest {
                false
            } else {
                *cached = latest;
                true
            }
        });
        Ok(())
    }
}

fn load_all(conn: &Connection) -> Result<Vec<User>, UserError> {
    let mut stmt = conn.prepare(&format!("SELECT {SELECT_COLUMNS} FROM users ORDER BY rowid"))?;
    let users = stmt
        .query_map([], user_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(users)
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        email: row.get(0)?,
        title: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        phone: row.get(4)?,
        large_picture_url: row.get(5)?,
        thumbnail_url: row.get(6)?,
        nationality: row.get(7)?,
        location: UserLocation {
            street_number: row.get(8)?,
            street_name: row.get(9)?,
            city: row.get(10)?,
            state: row.get(11)?,
            country: row.get(12)?,
            postcode: row.get(13)?,
        },
    })
}

fn upsert_all(tx: &rusqlite::Transaction<'_>, users: &[User]) -> Result<(), UserError> {
    let mut stmt = tx.prepare_cached(UPSERT)?;
    for user in users {
        stmt.execute(params![
            user.email,
            user.title,
            user.first_name,
            user.last_name,
            user.phone,
            user.large_picture_url,
            user.thumbnail_url,
            user.nationality,
            user.location.street_number,
            user.location.street_name,
            user.location.city,
            user.location.state,
            user.location.country,
            user.location.postcode,
        ])?;
    }
    Ok(())
}

#[async_trait]
impl UserLocalDataSource for SqliteUserStore {
    fn observe_users(&self) -> watch::Receiver<Vec<User>> {
        self.users.subscribe()
    }

    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>, UserError> {
        let id = id.to_string();
        self.with_connection(move |conn| {
            let user = conn
                .query_row(
                    &format!("SELECT {SELECT_COLUMNS} FROM users WHERE email = ?1"),
                    params![id],
                    user_from_row,
                )
                .optional()?;
            Ok(user)
        })
        .await
    }

    async fn insert_or_replace(&self, users: Vec<User>) -> Result<(), UserError> {
        self.write(move |tx| upsert_all(tx, &users)).await
    }

    async fn delete_all(&self) -> Result<(), UserError> {
        self.write(|tx| {
            tx.execute("DELETE FROM users", [])?;
            Ok(())
        })
        .await
    }

    async fn replace_all(&self, users: Vec<User>) -> Result<(), UserError> {
        self.write(move |tx| {
            tx.execute("DELETE FROM users", [])?;
            upsert_all(tx, &users)
        })
        .await
    }
}
