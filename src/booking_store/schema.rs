//! SQLite schema for the booking directory.
//!
//! Genres are kept in per-entity junction tables with a `position` column so
//! the submitted order survives a round trip. Shows reference their parents
//! with `ON DELETE RESTRICT`: a venue or artist that still has shows cannot be
//! deleted.

use crate::sqlite_column;
use crate::sqlite_persistence::{ForeignKey, ForeignKeyOnChange, SqlType, Table, VersionedSchema};

const VENUE_FK_RESTRICT: ForeignKey = ForeignKey {
    foreign_table: "venues",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Restrict,
};

const ARTIST_FK_RESTRICT: ForeignKey = ForeignKey {
    foreign_table: "artists",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Restrict,
};

const VENUE_FK_CASCADE: ForeignKey = ForeignKey {
    foreign_table: "venues",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Cascade,
};

const ARTIST_FK_CASCADE: ForeignKey = ForeignKey {
    foreign_table: "artists",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Cascade,
};

const VENUES_TABLE: Table = Table {
    name: "venues",
    columns: &[
        sqlite_column!("id", SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", SqlType::Text, non_null = true),
        sqlite_column!("city", SqlType::Text, non_null = true),
        sqlite_column!("state", SqlType::Text, non_null = true),
        sqlite_column!("address", SqlType::Text, non_null = true),
        sqlite_column!("phone", SqlType::Text, non_null = true, default_value = Some("''")),
        sqlite_column!("image_link", SqlType::Text, non_null = true, default_value = Some("''")),
        sqlite_column!("facebook_link", SqlType::Text, non_null = true, default_value = Some("''")),
        sqlite_column!("website", SqlType::Text, non_null = true, default_value = Some("''")),
        sqlite_column!("seeking_talent", SqlType::Integer, non_null = true, default_value = Some("0")),
        sqlite_column!("seeking_description", SqlType::Text, non_null = true, default_value = Some("''")),
    ],
    indices: &[("idx_venues_area", "city, state")],
    unique_constraints: &[],
};

const VENUE_GENRES_TABLE: Table = Table {
    name: "venue_genres",
    columns: &[
        sqlite_column!(
            "venue_id",
            SqlType::Integer,
            non_null = true,
            foreign_key = Some(&VENUE_FK_CASCADE)
        ),
        sqlite_column!("position", SqlType::Integer, non_null = true),
        sqlite_column!("genre", SqlType::Text, non_null = true),
    ],
    indices: &[],
    unique_constraints: &[&["venue_id", "position"]],
};

const ARTISTS_TABLE: Table = Table {
    name: "artists",
    columns: &[
        sqlite_column!("id", SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", SqlType::Text, non_null = true),
        sqlite_column!("city", SqlType::Text, non_null = true),
        sqlite_column!("state", SqlType::Text, non_null = true),
        sqlite_column!("phone", SqlType::Text, non_null = true, default_value = Some("''")),
        sqlite_column!("website", SqlType::Text, non_null = true, default_value = Some("''")),
        sqlite_column!("facebook_link", SqlType::Text, non_null = true, default_value = Some("''")),
        sqlite_column!("seeking_venue", SqlType::Integer, non_null = true, default_value = Some("0")),
        sqlite_column!("seeking_description", SqlType::Text, non_null = true, default_value = Some("''")),
        sqlite_column!("image_link", SqlType::Text, non_null = true, default_value = Some("''")),
    ],
    indices: &[],
    unique_constraints: &[],
};

const ARTIST_GENRES_TABLE: Table = Table {
    name: "artist_genres",
    columns: &[
        sqlite_column!(
            "artist_id",
            SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ARTIST_FK_CASCADE)
        ),
        sqlite_column!("position", SqlType::Integer, non_null = true),
        sqlite_column!("genre", SqlType::Text, non_null = true),
    ],
    indices: &[],
    unique_constraints: &[&["artist_id", "position"]],
};

/// `show_time` is unix seconds (UTC).
const SHOWS_TABLE: Table = Table {
    name: "shows",
    columns: &[
        sqlite_column!("id", SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "venue_id",
            SqlType::Integer,
            non_null = true,
            foreign_key = Some(&VENUE_FK_RESTRICT)
        ),
        sqlite_column!(
            "artist_id",
            SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ARTIST_FK_RESTRICT)
        ),
        sqlite_column!("show_time", SqlType::Integer, non_null = true),
    ],
    indices: &[
        ("idx_shows_venue", "venue_id"),
        ("idx_shows_artist", "artist_id"),
        ("idx_shows_time", "show_time"),
    ],
    unique_constraints: &[&["venue_id", "artist_id", "show_time"]],
};

pub const BOOKING_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[
        VENUES_TABLE,
        VENUE_GENRES_TABLE,
        ARTISTS_TABLE,
        ARTIST_GENRES_TABLE,
        SHOWS_TABLE,
    ],
    migration: None,
}];

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn create_schema() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        let schema = &BOOKING_VERSIONED_SCHEMAS[0];
        schema.create(&conn).unwrap();
        conn
    }

    #[test]
    fn test_schema_creates_and_validates() {
        let conn = create_schema();
        BOOKING_VERSIONED_SCHEMAS[0].validate(&conn).unwrap();
    }

    #[test]
    fn test_show_requires_existing_parents() {
        let conn = create_schema();
        let result = conn.execute(
            "INSERT INTO shows (venue_id, artist_id, show_time) VALUES (1, 1, 0)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_booking_rejected() {
        let conn = create_schema();
        conn.execute(
            "INSERT INTO venues (name, city, state, address) VALUES ('V', 'C', 'S', 'A')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO artists (name, city, state) VALUES ('A', 'C', 'S')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO shows (venue_id, artist_id, show_time) VALUES (1, 1, 1000)",
            [],
        )
        .unwrap();

        let duplicate = conn.execute(
            "INSERT INTO shows (venue_id, artist_id, show_time) VALUES (1, 1, 1000)",
            [],
        );
        assert!(duplicate.is_err());
    }

    #[test]
    fn test_genres_cascade_but_shows_restrict() {
        let conn = create_schema();
        conn.execute(
            "INSERT INTO venues (name, city, state, address) VALUES ('V', 'C', 'S', 'A')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO venue_genres (venue_id, position, genre) VALUES (1, 0, 'Jazz')",
            [],
        )
        .unwrap();
        conn.execute("DELETE FROM venues WHERE id = 1", []).unwrap();

        let genres: i64 = conn
            .query_row("SELECT COUNT(*) FROM venue_genres", [], |r| r.get(0))
            .unwrap();
        assert_eq!(genres, 0);

        conn.execute(
            "INSERT INTO venues (name, city, state, address) VALUES ('V', 'C', 'S', 'A')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO artists (name, city, state) VALUES ('A', 'C', 'S')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO shows (venue_id, artist_id, show_time) VALUES ((SELECT MAX(id) FROM venues), 1, 1000)",
            [],
        )
        .unwrap();
        assert!(conn
            .execute("DELETE FROM artists WHERE id = 1", [])
            .is_err());
    }
}
