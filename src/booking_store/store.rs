//! SQLite-backed booking store.
//!
//! One write connection guarded by a mutex and a pool of read-only connections
//! handed out round-robin. The database runs in WAL mode so readers never wait
//! on the writer.

use super::error::{StoreError, StoreResult};
use super::models::*;
use super::schema::BOOKING_VERSIONED_SCHEMAS;
use super::trait_def::BookingStore;
use crate::sqlite_persistence::BASE_DB_VERSION;
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::functions::FunctionFlags;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

/// SQLite-backed store of venues, artists and shows.
#[derive(Clone)]
pub struct SqliteBookingStore {
    read_pool: Vec<Arc<Mutex<Connection>>>,
    write_conn: Arc<Mutex<Connection>>,
    read_index: Arc<AtomicUsize>,
}

fn migrate_if_needed(conn: &mut Connection) -> Result<()> {
    let db_version: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;

    let latest_version = BOOKING_VERSIONED_SCHEMAS.len() - 1;
    let latest_schema = &BOOKING_VERSIONED_SCHEMAS[latest_version];

    let table_count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |r| r.get(0),
    )?;

    if table_count == 0 {
        info!("Creating booking db schema at version {}", latest_version);
        latest_schema.create(conn)?;
        return Ok(());
    }

    if db_version < BASE_DB_VERSION as i64 {
        bail!(
            "Database has user_version {} and was not created by this server",
            db_version
        );
    }

    let mut current_version = (db_version - BASE_DB_VERSION as i64) as usize;
    if current_version > latest_version {
        bail!(
            "Database schema version {} is newer than the latest known version {}",
            current_version,
            latest_version
        );
    }

    if current_version < latest_version {
        let tx = conn.transaction()?;
        for schema in BOOKING_VERSIONED_SCHEMAS.iter().skip(current_version + 1) {
            if let Some(migration_fn) = schema.migration {
                info!(
                    "Migrating booking db from version {} to {}",
                    current_version, schema.version
                );
                migration_fn(&tx)?;
            }
            current_version = schema.version;
        }
        tx.pragma_update(None, "user_version", BASE_DB_VERSION + current_version)?;
        tx.commit()?;
    }

    latest_schema
        .validate(conn)
        .context("Booking database does not match the expected schema")
}

fn lock(conn: &Mutex<Connection>) -> StoreResult<MutexGuard<'_, Connection>> {
    conn.lock()
        .map_err(|_| StoreError::Unavailable("database connection lock poisoned".to_string()))
}

/// Registers `fold_case(text)`, the Unicode lowercase of its argument.
///
/// SQLite's own `LIKE` folds ASCII letters only, so name searches compare
/// `fold_case(name)` against a pattern lowered the same way.
fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "fold_case",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: String = ctx.get(0)?;
            Ok(text.to_lowercase())
        },
    )
}

/// Wraps `term` for a `LIKE ... ESCAPE '\'` substring match.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn show_time_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let secs: i64 = row.get(idx)?;
    DateTime::from_timestamp(secs, 0).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Integer,
            format!("show_time {} out of range", secs).into(),
        )
    })
}

fn count_to_usize(count: i64) -> usize {
    usize::try_from(count).unwrap_or(0)
}

impl SqliteBookingStore {
    /// Opens (or creates) the booking database at `db_path`.
    ///
    /// An existing database must carry this server's schema.
    pub fn new<P: AsRef<Path>>(db_path: P, read_pool_size: usize) -> Result<Self> {
        let db_path_ref = db_path.as_ref();

        let mut write_conn = Connection::open_with_flags(
            db_path_ref,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI
                | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open booking database {:?}", db_path_ref))?;

        write_conn.pragma_update(None, "foreign_keys", "ON")?;
        register_functions(&write_conn)?;
        migrate_if_needed(&mut write_conn)?;
        write_conn.pragma_update(None, "journal_mode", "WAL")?;

        let mut read_pool = Vec::with_capacity(read_pool_size);
        for _ in 0..read_pool_size {
            let read_conn = Connection::open_with_flags(
                db_path_ref,
                rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY
                    | rusqlite::OpenFlags::SQLITE_OPEN_URI
                    | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?;
            register_functions(&read_conn)?;
            read_pool.push(Arc::new(Mutex::new(read_conn)));
        }

        let store = SqliteBookingStore {
            write_conn: Arc::new(Mutex::new(write_conn)),
            read_pool,
            read_index: Arc::new(AtomicUsize::new(0)),
        };

        let counts = store.counts()?;
        info!(
            "Opened booking db: {} venues, {} artists, {} shows",
            counts.venues, counts.artists, counts.shows
        );

        Ok(store)
    }

    fn get_read_conn(&self) -> Arc<Mutex<Connection>> {
        let index = self.read_index.fetch_add(1, Ordering::SeqCst) % self.read_pool.len();
        self.read_pool[index].clone()
    }

    /// Runs `op` inside an IMMEDIATE transaction on the write connection.
    ///
    /// The transaction commits only when `op` succeeds; any error drops it,
    /// which rolls back.
    fn write<T>(&self, op: impl FnOnce(&Transaction<'_>) -> StoreResult<T>) -> StoreResult<T> {
        let mut conn = lock(&self.write_conn)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let value = op(&tx)?;
        tx.commit()?;
        Ok(value)
    }

    fn read_genres(conn: &Connection, table: &str, owner_column: &str, owner_id: i64) -> StoreResult<Vec<String>> {
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT genre FROM {} WHERE {} = ?1 ORDER BY position",
            table, owner_column
        ))?;
        let genres = stmt
            .query_map(params![owner_id], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(genres)
    }

    fn write_genres(
        tx: &Transaction<'_>,
        table: &str,
        owner_column: &str,
        owner_id: i64,
        genres: &[String],
    ) -> StoreResult<()> {
        tx.execute(
            &format!("DELETE FROM {} WHERE {} = ?1", table, owner_column),
            params![owner_id],
        )?;
        let mut stmt = tx.prepare_cached(&format!(
            "INSERT INTO {} ({}, position, genre) VALUES (?1, ?2, ?3)",
            table, owner_column
        ))?;
        for (position, genre) in genres.iter().enumerate() {
            stmt.execute(params![owner_id, position as i64, genre])?;
        }
        Ok(())
    }

    fn search(&self, sql: &str, term: &str, now: DateTime<Utc>) -> StoreResult<Vec<SearchMatch>> {
        let read_conn = self.get_read_conn();
        let conn = lock(&read_conn)?;
        let mut stmt = conn.prepare_cached(sql)?;
        let matches = stmt
            .query_map(params![now.timestamp(), like_pattern(&term.to_lowercase())], |row| {
                Ok(SearchMatch {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    num_upcoming_shows: count_to_usize(row.get(2)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(matches)
    }
}

impl BookingStore for SqliteBookingStore {
    // =========================================================================
    // Venues
    // =========================================================================

    fn venues_with_upcoming_counts(&self, now: DateTime<Utc>) -> StoreResult<Vec<VenueSummary>> {
        let read_conn = self.get_read_conn();
        let conn = lock(&read_conn)?;
        let mut stmt = conn.prepare_cached(
            "SELECT v.id, v.name, v.city, v.state,
                    (SELECT COUNT(*) FROM shows s WHERE s.venue_id = v.id AND s.show_time > ?1)
             FROM venues v
             ORDER BY v.city, v.state, v.id",
        )?;
        let venues = stmt
            .query_map(params![now.timestamp()], |row| {
                Ok(VenueSummary {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    city: row.get(2)?,
                    state: row.get(3)?,
                    num_upcoming_shows: count_to_usize(row.get(4)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(venues)
    }

    fn search_venues(&self, term: &str, now: DateTime<Utc>) -> StoreResult<Vec<SearchMatch>> {
        self.search(
            "SELECT v.id, v.name,
                    (SELECT COUNT(*) FROM shows s WHERE s.venue_id = v.id AND s.show_time > ?1)
             FROM venues v
             WHERE fold_case(v.name) LIKE ?2 ESCAPE '\\'
             ORDER BY v.id",
            term,
            now,
        )
    }

    fn get_venue(&self, id: i64) -> StoreResult<Option<Venue>> {
        let read_conn = self.get_read_conn();
        let conn = lock(&read_conn)?;
        let venue = conn
            .query_row(
                "SELECT id, name, city, state, address, phone, image_link, facebook_link,
                        website, seeking_talent, seeking_description
                 FROM venues WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Venue {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        genres: Vec::new(),
                        city: row.get(2)?,
                        state: row.get(3)?,
                        address: row.get(4)?,
                        phone: row.get(5)?,
                        image_link: row.get(6)?,
                        facebook_link: row.get(7)?,
                        website: row.get(8)?,
                        seeking_talent: row.get(9)?,
                        seeking_description: row.get(10)?,
                    })
                },
            )
            .optional()?;

        match venue {
            Some(mut venue) => {
                venue.genres = Self::read_genres(&conn, "venue_genres", "venue_id", id)?;
                Ok(Some(venue))
            }
            None => Ok(None),
        }
    }

    fn get_venue_shows(&self, venue_id: i64) -> StoreResult<Vec<VenueShow>> {
        let read_conn = self.get_read_conn();
        let conn = lock(&read_conn)?;
        let mut stmt = conn.prepare_cached(
            "SELECT s.id, s.artist_id, a.name, a.image_link, s.show_time
             FROM shows s
             JOIN artists a ON a.id = s.artist_id
             WHERE s.venue_id = ?1
             ORDER BY s.show_time, s.id",
        )?;
        let shows = stmt
            .query_map(params![venue_id], |row| {
                Ok(VenueShow {
                    show_id: row.get(0)?,
                    artist_id: row.get(1)?,
                    artist_name: row.get(2)?,
                    artist_image_link: row.get(3)?,
                    show_time: show_time_at(row, 4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(shows)
    }

    fn create_venue(&self, venue: &NewVenue) -> StoreResult<i64> {
        let id = self.write(|tx| {
            tx.execute(
                "INSERT INTO venues (name, city, state, address, phone, image_link,
                                     facebook_link, website, seeking_talent, seeking_description)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    venue.name,
                    venue.city,
                    venue.state,
                    venue.address,
                    venue.phone,
                    venue.image_link,
                    venue.facebook_link,
                    venue.website,
                    venue.seeking_talent,
                    venue.seeking_description,
                ],
            )?;
            let id = tx.last_insert_rowid();
            Self::write_genres(tx, "venue_genres", "venue_id", id, &venue.genres)?;
            Ok(id)
        })?;
        debug!("Created venue {} ({})", id, venue.name);
        Ok(id)
    }

    fn update_venue(&self, id: i64, venue: &NewVenue) -> StoreResult<()> {
        self.write(|tx| {
            let changed = tx.execute(
                "UPDATE venues SET name = ?2, city = ?3, state = ?4, address = ?5, phone = ?6,
                                   image_link = ?7, facebook_link = ?8, website = ?9,
                                   seeking_talent = ?10, seeking_description = ?11
                 WHERE id = ?1",
                params![
                    id,
                    venue.name,
                    venue.city,
                    venue.state,
                    venue.address,
                    venue.phone,
                    venue.image_link,
                    venue.facebook_link,
                    venue.website,
                    venue.seeking_talent,
                    venue.seeking_description,
                ],
            )?;
            if changed == 0 {
                return Err(StoreError::NotFound { entity: "Venue", id });
            }
            Self::write_genres(tx, "venue_genres", "venue_id", id, &venue.genres)
        })?;
        debug!("Updated venue {}", id);
        Ok(())
    }

    fn delete_venue(&self, id: i64) -> StoreResult<()> {
        self.write(|tx| {
            if tx.execute("DELETE FROM venues WHERE id = ?1", params![id])? == 0 {
                return Err(StoreError::NotFound { entity: "Venue", id });
            }
            Ok(())
        })?;
        debug!("Deleted venue {}", id);
        Ok(())
    }

    // =========================================================================
    // Artists
    // =========================================================================

    fn list_artists(&self) -> StoreResult<Vec<ArtistSummary>> {
        let read_conn = self.get_read_conn();
        let conn = lock(&read_conn)?;
        let mut stmt = conn.prepare_cached("SELECT id, name FROM artists ORDER BY id")?;
        let artists = stmt
            .query_map([], |row| {
                Ok(ArtistSummary {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(artists)
    }

    fn search_artists(&self, term: &str, now: DateTime<Utc>) -> StoreResult<Vec<SearchMatch>> {
        self.search(
            "SELECT a.id, a.name,
                    (SELECT COUNT(*) FROM shows s WHERE s.artist_id = a.id AND s.show_time > ?1)
             FROM artists a
             WHERE fold_case(a.name) LIKE ?2 ESCAPE '\\'
             ORDER BY a.id",
            term,
            now,
        )
    }

    fn get_artist(&self, id: i64) -> StoreResult<Option<Artist>> {
        let read_conn = self.get_read_conn();
        let conn = lock(&read_conn)?;
        let artist = conn
            .query_row(
                "SELECT id, name, city, state, phone, website, facebook_link,
                        seeking_venue, seeking_description, image_link
                 FROM artists WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Artist {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        genres: Vec::new(),
                        city: row.get(2)?,
                        state: row.get(3)?,
                        phone: row.get(4)?,
                        website: row.get(5)?,
                        facebook_link: row.get(6)?,
                        seeking_venue: row.get(7)?,
                        seeking_description: row.get(8)?,
                        image_link: row.get(9)?,
                    })
                },
            )
            .optional()?;

        match artist {
            Some(mut artist) => {
                artist.genres = Self::read_genres(&conn, "artist_genres", "artist_id", id)?;
                Ok(Some(artist))
            }
            None => Ok(None),
        }
    }

    fn get_artist_shows(&self, artist_id: i64) -> StoreResult<Vec<ArtistShow>> {
        let read_conn = self.get_read_conn();
        let conn = lock(&read_conn)?;
        let mut stmt = conn.prepare_cached(
            "SELECT s.id, s.venue_id, v.name, v.image_link, s.show_time
             FROM shows s
             JOIN venues v ON v.id = s.venue_id
             WHERE s.artist_id = ?1
             ORDER BY s.show_time, s.id",
        )?;
        let shows = stmt
            .query_map(params![artist_id], |row| {
                Ok(ArtistShow {
                    show_id: row.get(0)?,
                    venue_id: row.get(1)?,
                    venue_name: row.get(2)?,
                    venue_image_link: row.get(3)?,
                    show_time: show_time_at(row, 4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(shows)
    }

    fn create_artist(&self, artist: &NewArtist) -> StoreResult<i64> {
        let id = self.write(|tx| {
            tx.execute(
                "INSERT INTO artists (name, city, state, phone, website, facebook_link,
                                      seeking_venue, seeking_description, image_link)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    artist.name,
                    artist.city,
                    artist.state,
                    artist.phone,
                    artist.website,
                    artist.facebook_link,
                    artist.seeking_venue,
                    artist.seeking_description,
                    artist.image_link,
                ],
            )?;
            let id = tx.last_insert_rowid();
            Self::write_genres(tx, "artist_genres", "artist_id", id, &artist.genres)?;
            Ok(id)
        })?;
        debug!("Created artist {} ({})", id, artist.name);
        Ok(id)
    }

    fn update_artist(&self, id: i64, artist: &NewArtist) -> StoreResult<()> {
        self.write(|tx| {
            let changed = tx.execute(
                "UPDATE artists SET name = ?2, city = ?3, state = ?4, phone = ?5, website = ?6,
                                    facebook_link = ?7, seeking_venue = ?8,
                                    seeking_description = ?9, image_link = ?10
                 WHERE id = ?1",
                params![
                    id,
                    artist.name,
                    artist.city,
                    artist.state,
                    artist.phone,
                    artist.website,
                    artist.facebook_link,
                    artist.seeking_venue,
                    artist.seeking_description,
                    artist.image_link,
                ],
            )?;
            if changed == 0 {
                return Err(StoreError::NotFound { entity: "Artist", id });
            }
            Self::write_genres(tx, "artist_genres", "artist_id", id, &artist.genres)
        })?;
        debug!("Updated artist {}", id);
        Ok(())
    }

    fn delete_artist(&self, id: i64) -> StoreResult<()> {
        self.write(|tx| {
            if tx.execute("DELETE FROM artists WHERE id = ?1", params![id])? == 0 {
                return Err(StoreError::NotFound { entity: "Artist", id });
            }
            Ok(())
        })?;
        debug!("Deleted artist {}", id);
        Ok(())
    }

    // =========================================================================
    // Shows
    // =========================================================================

    fn list_shows(&self) -> StoreResult<Vec<ShowListing>> {
        let read_conn = self.get_read_conn();
        let conn = lock(&read_conn)?;
        let mut stmt = conn.prepare_cached(
            "SELECT s.id, s.venue_id, v.name, s.artist_id, a.name, a.image_link, s.show_time
             FROM shows s
             JOIN venues v ON v.id = s.venue_id
             JOIN artists a ON a.id = s.artist_id
             ORDER BY s.show_time, s.id",
        )?;
        let shows = stmt
            .query_map([], |row| {
                Ok(ShowListing {
                    show_id: row.get(0)?,
                    venue_id: row.get(1)?,
                    venue_name: row.get(2)?,
                    artist_id: row.get(3)?,
                    artist_name: row.get(4)?,
                    artist_image_link: row.get(5)?,
                    show_time: show_time_at(row, 6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(shows)
    }

    fn create_show(&self, show: &NewShow) -> StoreResult<i64> {
        let id = self.write(|tx| {
            tx.execute(
                "INSERT INTO shows (venue_id, artist_id, show_time) VALUES (?1, ?2, ?3)",
                params![show.venue_id, show.artist_id, show.show_time.timestamp()],
            )?;
            Ok(tx.last_insert_rowid())
        })?;
        debug!(
            "Created show {} (venue {}, artist {})",
            id, show.venue_id, show.artist_id
        );
        Ok(id)
    }

    // =========================================================================
    // Counts
    // =========================================================================

    fn counts(&self) -> StoreResult<DirectoryCounts> {
        let read_conn = self.get_read_conn();
        let conn = lock(&read_conn)?;
        let (venues, artists, shows): (i64, i64, i64) = conn.query_row(
            "SELECT (SELECT COUNT(*) FROM venues),
                    (SELECT COUNT(*) FROM artists),
                    (SELECT COUNT(*) FROM shows)",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;
        Ok(DirectoryCounts {
            venues: count_to_usize(venues),
            artists: count_to_usize(artists),
            shows: count_to_usize(shows),
        })
    }
}
