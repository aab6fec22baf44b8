//! Validation for booking records.
//!
//! Checks the column constraints of the schema (required fields, length
//! limits, link shape) before a record reaches the store. All violations are
//! collected so a form can be re-rendered with every error at once.

use super::models::{NewArtist, NewVenue};
use serde::Serialize;
use std::fmt;
use url::Url;

pub const MAX_AREA_LENGTH: usize = 120;
pub const MAX_ADDRESS_LENGTH: usize = 120;
pub const MAX_PHONE_LENGTH: usize = 120;
pub const MAX_FACEBOOK_LINK_LENGTH: usize = 120;
pub const MAX_WEBSITE_LENGTH: usize = 250;
pub const MAX_IMAGE_LINK_LENGTH: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyField { field: &'static str },
    TooLong { field: &'static str, max: usize },
    InvalidUrl { field: &'static str },
    InvalidValue { field: &'static str, value: String },
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::InvalidUrl { field }
            | ValidationError::InvalidValue { field, .. } => field,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyField { field } => {
                write!(f, "Field '{}' is required but was empty", field)
            }
            ValidationError::TooLong { field, max } => {
                write!(f, "Field '{}' must be at most {} characters", field, max)
            }
            ValidationError::InvalidUrl { field } => {
                write!(f, "Field '{}' must be an http(s) URL", field)
            }
            ValidationError::InvalidValue { field, value } => {
                write!(f, "Field '{}' has an invalid value '{}'", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl Serialize for ValidationError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("ValidationError", 2)?;
        state.serialize_field("field", self.field())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

pub type ValidationResult<T> = Result<T, Vec<ValidationError>>;

#[derive(Default)]
struct Checker {
    errors: Vec<ValidationError>,
}

impl Checker {
    fn required(&mut self, field: &'static str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.push(ValidationError::EmptyField { field });
        }
        self
    }

    fn max_len(&mut self, field: &'static str, value: &str, max: usize) -> &mut Self {
        if value.chars().count() > max {
            self.errors.push(ValidationError::TooLong { field, max });
        }
        self
    }

    fn link(&mut self, field: &'static str, value: &str, max: usize) -> &mut Self {
        self.max_len(field, value, max);
        if !value.is_empty() && !is_http_url(value) {
            self.errors.push(ValidationError::InvalidUrl { field });
        }
        self
    }

    fn genres(&mut self, genres: &[String]) -> &mut Self {
        if genres.is_empty() || genres.iter().any(|g| g.trim().is_empty()) {
            self.errors.push(ValidationError::EmptyField { field: "genres" });
        }
        self
    }

    fn finish(self) -> ValidationResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

fn is_http_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host().is_some(),
        Err(_) => false,
    }
}

pub fn validate_venue(venue: &NewVenue) -> ValidationResult<()> {
    let mut checker = Checker::default();
    checker
        .required("name", &venue.name)
        .required("city", &venue.city)
        .max_len("city", &venue.city, MAX_AREA_LENGTH)
        .required("state", &venue.state)
        .max_len("state", &venue.state, MAX_AREA_LENGTH)
        .required("address", &venue.address)
        .max_len("address", &venue.address, MAX_ADDRESS_LENGTH)
        .max_len("phone", &venue.phone, MAX_PHONE_LENGTH)
        .genres(&venue.genres)
        .link("image_link", &venue.image_link, MAX_IMAGE_LINK_LENGTH)
        .link("facebook_link", &venue.facebook_link, MAX_FACEBOOK_LINK_LENGTH)
        .link("website", &venue.website, MAX_WEBSITE_LENGTH);
    checker.finish()
}

pub fn validate_artist(artist: &NewArtist) -> ValidationResult<()> {
    let mut checker = Checker::default();
    checker
        .required("name", &artist.name)
        .required("city", &artist.city)
        .max_len("city", &artist.city, MAX_AREA_LENGTH)
        .required("state", &artist.state)
        .max_len("state", &artist.state, MAX_AREA_LENGTH)
        .max_len("phone", &artist.phone, MAX_PHONE_LENGTH)
        .genres(&artist.genres)
        .link("image_link", &artist.image_link, MAX_IMAGE_LINK_LENGTH)
        .link("facebook_link", &artist.facebook_link, MAX_FACEBOOK_LINK_LENGTH)
        .link("website", &artist.website, MAX_WEBSITE_LENGTH);
    checker.finish()
}
