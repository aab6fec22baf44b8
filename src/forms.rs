//! Typed form inputs.
//!
//! Forms arrive as `application/x-www-form-urlencoded` bodies (`genres` may be
//! repeated). Every field is optional at the parsing level so a form can
//! always be echoed back with its errors; `validate` turns a form into the
//! record the store accepts.

use crate::booking_store::{
    validate_artist, validate_venue, Artist, NewArtist, NewShow, NewVenue, ValidationError,
    ValidationResult, Venue,
};
use crate::views::SHOW_TIME_FORMAT;
use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize};

const TRUTHY_VALUES: &[&str] = &["True", "true", "y", "yes", "on", "1"];

pub fn is_truthy(value: &str) -> bool {
    TRUTHY_VALUES.contains(&value)
}

fn deserialize_truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(is_truthy(&value))
}

// =============================================================================
// Venue
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub website: String,
    #[serde(deserialize_with = "deserialize_truthy")]
    pub seeking_talent: bool,
    pub seeking_description: String,
}

impl VenueForm {
    pub fn from_venue(venue: &Venue) -> Self {
        VenueForm {
            name: venue.name.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            address: venue.address.clone(),
            phone: venue.phone.clone(),
            image_link: venue.image_link.clone(),
            genres: venue.genres.clone(),
            facebook_link: venue.facebook_link.clone(),
            website: venue.website.clone(),
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description.clone(),
        }
    }

    pub fn validate(&self) -> ValidationResult<NewVenue> {
        let venue = NewVenue {
            name: self.name.clone(),
            genres: self.genres.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
            image_link: self.image_link.clone(),
            facebook_link: self.facebook_link.clone(),
            website: self.website.clone(),
            seeking_talent: self.seeking_talent,
            seeking_description: self.seeking_description.clone(),
        };
        validate_venue(&venue)?;
        Ok(venue)
    }
}

// =============================================================================
// Artist
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub website: String,
    #[serde(deserialize_with = "deserialize_truthy")]
    pub seeking_venue: bool,
    pub seeking_description: String,
}

impl ArtistForm {
    pub fn from_artist(artist: &Artist) -> Self {
        ArtistForm {
            name: artist.name.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            phone: artist.phone.clone(),
            image_link: artist.image_link.clone(),
            genres: artist.genres.clone(),
            facebook_link: artist.facebook_link.clone(),
            website: artist.website.clone(),
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description.clone(),
        }
    }

    pub fn validate(&self) -> ValidationResult<NewArtist> {
        let artist = NewArtist {
            name: self.name.clone(),
            genres: self.genres.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            phone: self.phone.clone(),
            website: self.website.clone(),
            facebook_link: self.facebook_link.clone(),
            seeking_venue: self.seeking_venue,
            seeking_description: self.seeking_description.clone(),
            image_link: self.image_link.clone(),
        };
        validate_artist(&artist)?;
        Ok(artist)
    }
}

// =============================================================================
// Show
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowForm {
    pub venue_id: String,
    pub artist_id: String,
    pub start_time: String,
}

impl ShowForm {
    /// An empty form with `start_time` preset to `now`.
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        ShowForm {
            start_time: now.format(SHOW_TIME_FORMAT).to_string(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> ValidationResult<NewShow> {
        let mut errors = Vec::new();
        let venue_id = parse_id("venue_id", &self.venue_id, &mut errors);
        let artist_id = parse_id("artist_id", &self.artist_id, &mut errors);
        let show_time = if self.start_time.trim().is_empty() {
            errors.push(ValidationError::EmptyField {
                field: "start_time",
            });
            None
        } else {
            let parsed = parse_start_time(&self.start_time);
            if parsed.is_none() {
                errors.push(ValidationError::InvalidValue {
                    field: "start_time",
                    value: self.start_time.clone(),
                });
            }
            parsed
        };

        match (venue_id, artist_id, show_time) {
            (Some(venue_id), Some(artist_id), Some(show_time)) if errors.is_empty() => Ok(NewShow {
                venue_id,
                artist_id,
                show_time,
            }),
            _ => Err(errors),
        }
    }
}

fn parse_id(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        errors.push(ValidationError::EmptyField { field });
        return None;
    }
    match value.parse::<i64>() {
        Ok(id) if id > 0 => Some(id),
        _ => {
            errors.push(ValidationError::InvalidValue {
                field,
                value: value.to_string(),
            });
            None
        }
    }
}

/// Accepts RFC 3339 or a naive `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM[:SS]`
/// timestamp, the latter read as UTC.
///
/// Shows are kept to the second: any fractional part is truncated here so the
/// returned instant is exactly the one stored.
pub fn parse_start_time(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    let parsed = match DateTime::parse_from_rfc3339(value) {
        Ok(parsed) => Some(parsed.with_timezone(&Utc)),
        Err(_) => [SHOW_TIME_FORMAT, "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
            .map(|naive| naive.and_utc()),
    };
    parsed.and_then(|at| at.with_nanosecond(0))
}

// =============================================================================
// Search
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub search_term: String,
}
