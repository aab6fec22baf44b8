//! Seeded directory content shared by the end-to-end tests
//!
//! Three venues in two areas, three artists and four shows placed relative to
//! the moment the server is spawned.

use booking_server::booking_store::{BookingStore, NewArtist, NewShow, NewVenue};
use chrono::{DateTime, Duration, Utc};

fn genres(tags: &[&str]) -> Vec<String> {
    tags.iter().map(|tag| tag.to_string()).collect()
}

fn venues() -> Vec<NewVenue> {
    vec![
        NewVenue {
            name: "The Musical Hop".to_string(),
            genres: genres(&["Jazz", "Reggae", "Swing", "Classical", "Folk"]),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "1015 Folsom Street".to_string(),
            phone: "123-123-1234".to_string(),
            image_link: "https://images.example.com/musical-hop.jpg".to_string(),
            facebook_link: "https://www.facebook.com/TheMusicalHop".to_string(),
            website: "https://www.themusicalhop.com".to_string(),
            seeking_talent: true,
            seeking_description: "We are on the lookout for a local artist to play every two weeks."
                .to_string(),
        },
        NewVenue {
            name: "The Dueling Pianos Bar".to_string(),
            genres: genres(&["Classical", "R&B", "Hip-Hop"]),
            city: "New York".to_string(),
            state: "NY".to_string(),
            address: "335 Delancey Street".to_string(),
            phone: "914-003-1132".to_string(),
            image_link: "https://images.example.com/dueling-pianos.jpg".to_string(),
            facebook_link: "https://www.facebook.com/theduelingpianos".to_string(),
            website: "https://www.theduelingpianos.com".to_string(),
            seeking_talent: false,
            seeking_description: String::new(),
        },
        NewVenue {
            name: "Park Square Live Music & Coffee".to_string(),
            genres: genres(&["Rock n Roll", "Jazz", "Classical", "Folk"]),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "34 Whiskey Moore Ave".to_string(),
            phone: "415-000-1234".to_string(),
            image_link: "https://images.example.com/park-square.jpg".to_string(),
            facebook_link: "https://www.facebook.com/ParkSquareLiveMusicAndCoffee".to_string(),
            website: "https://www.parksquarelivemusicandcoffee.com".to_string(),
            seeking_talent: false,
            seeking_description: String::new(),
        },
    ]
}

fn artists() -> Vec<NewArtist> {
    vec![
        NewArtist {
            name: "Guns N Petals".to_string(),
            genres: genres(&["Rock n Roll"]),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: "326-123-5000".to_string(),
            website: "https://www.gunsnpetalsband.com".to_string(),
            facebook_link: "https://www.facebook.com/GunsNPetals".to_string(),
            seeking_venue: true,
            seeking_description: "Looking for shows to perform at in the San Francisco Bay Area!"
                .to_string(),
            image_link: "https://images.example.com/guns-n-petals.jpg".to_string(),
        },
        NewArtist {
            name: "Matt Quevedo".to_string(),
            genres: genres(&["Jazz"]),
            city: "New York".to_string(),
            state: "NY".to_string(),
            phone: "300-400-5000".to_string(),
            website: String::new(),
            facebook_link: "https://www.facebook.com/mattquevedo923251523".to_string(),
            seeking_venue: false,
            seeking_description: String::new(),
            image_link: "https://images.example.com/matt-quevedo.jpg".to_string(),
        },
        NewArtist {
            name: "The Wild Sax Band".to_string(),
            genres: genres(&["Jazz", "Classical"]),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: "432-325-5432".to_string(),
            website: String::new(),
            facebook_link: String::new(),
            seeking_venue: false,
            seeking_description: String::new(),
            image_link: "https://images.example.com/wild-sax-band.jpg".to_string(),
        },
    ]
}

/// Fills an empty store with the seeded directory.
pub fn seed_directory(store: &dyn BookingStore, now: DateTime<Utc>) -> anyhow::Result<()> {
    let venue_ids = venues()
        .iter()
        .map(|venue| store.create_venue(venue))
        .collect::<Result<Vec<_>, _>>()?;
    let artist_ids = artists()
        .iter()
        .map(|artist| store.create_artist(artist))
        .collect::<Result<Vec<_>, _>>()?;

    let shows = [
        (venue_ids[0], artist_ids[0], now - Duration::days(30)),
        (venue_ids[2], artist_ids[1], now - Duration::days(10)),
        (venue_ids[2], artist_ids[2], now + Duration::days(20)),
        (venue_ids[2], artist_ids[2], now + Duration::days(30)),
    ];
    for (venue_id, artist_id, show_time) in shows {
        store.create_show(&NewShow {
            venue_id,
            artist_id,
            show_time,
        })?;
    }
    Ok(())
}

/// Formats an instant the way the show form expects it.
pub fn format_start_time(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}
