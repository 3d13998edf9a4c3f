use chrono::NaiveDateTime;
use diesel::{self, prelude::*};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use rocket::fairing;
use rocket::{Build, Rocket};
use rocket_sync_db_pools::database;
use tracing::{error, info};

use super::{Artist, Id, Show, Venue};

#[database("fyyur")]
pub struct Connection(SqliteConnection);

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub async fn initialize(rocket: Rocket<Build>) -> fairing::Result {
    let conn = match Connection::get_one(&rocket).await {
        Some(conn) => conn,
        None => {
            error!("Database connection failed.");
            return Err(rocket);
        }
    };

    let result = conn
        .run(|c| {
            c.run_pending_migrations(MIGRATIONS)
                .map(|applied| applied.len())
        })
        .await;

    match result {
        Ok(applied) => {
            info!(applied, "database migrations are up to date");
            Ok(rocket)
        }
        Err(e) => {
            error!("Failed to run database migrations: {:?}", e);
            Err(rocket)
        }
    }
}

pub mod schema {
    diesel::table! {
        venues {
            id -> Integer,
            name -> Text,
            city -> Text,
            state -> Text,
            address -> Text,
            phone -> Nullable<Text>,
            genres -> Text,
            image_link -> Nullable<Text>,
            facebook_link -> Nullable<Text>,
            website -> Nullable<Text>,
            seeking_talent -> Bool,
            seeking_description -> Nullable<Text>,
        }
    }
    diesel::table! {
        artists {
            id -> Integer,
            name -> Text,
            city -> Text,
            state -> Text,
            phone -> Nullable<Text>,
            genres -> Text,
            image_link -> Nullable<Text>,
            facebook_link -> Nullable<Text>,
            website -> Nullable<Text>,
            seeking_venue -> Bool,
            seeking_description -> Nullable<Text>,
        }
    }
    diesel::table! {
        shows {
            id -> Integer,
            venue_id -> Integer,
            artist_id -> Integer,
            start_time -> Timestamp,
        }
    }

    diesel::joinable!(shows -> venues (venue_id));
    diesel::joinable!(shows -> artists (artist_id));

    diesel::allow_tables_to_appear_in_same_query!(venues, artists, shows);
}

use schema::*;

/// Genres live in a single text column, comma separated.
fn join_genres(genres: Vec<String>) -> String {
    genres.join(",")
}

fn split_genres(genres: &str) -> Vec<String> {
    genres
        .split(',')
        .map(str::trim)
        .filter(|genre| !genre.is_empty())
        .map(String::from)
        .collect()
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = venues)]
pub struct SqlVenue {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub genres: String,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

#[derive(Insertable, AsChangeset, Debug)]
#[diesel(table_name = venues, treat_none_as_null = true)]
pub struct NewSqlVenue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub genres: String,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl From<SqlVenue> for (Id<Venue>, Venue) {
    fn from(venue: SqlVenue) -> Self {
        (
            venue.id.into(),
            Venue {
                name: venue.name,
                city: venue.city,
                state: venue.state,
                address: venue.address,
                phone: venue.phone,
                genres: split_genres(&venue.genres),
                image_link: venue.image_link,
                facebook_link: venue.facebook_link,
                website: venue.website,
                seeking_talent: venue.seeking_talent,
                seeking_description: venue.seeking_description,
            },
        )
    }
}

impl From<Venue> for NewSqlVenue {
    fn from(venue: Venue) -> NewSqlVenue {
        NewSqlVenue {
            name: venue.name,
            city: venue.city,
            state: venue.state,
            address: venue.address,
            phone: venue.phone,
            genres: join_genres(venue.genres),
            image_link: venue.image_link,
            facebook_link: venue.facebook_link,
            website: venue.website,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
        }
    }
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = artists)]
pub struct SqlArtist {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: String,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

#[derive(Insertable, AsChangeset, Debug)]
#[diesel(table_name = artists, treat_none_as_null = true)]
pub struct NewSqlArtist {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: String,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl From<SqlArtist> for (Id<Artist>, Artist) {
    fn from(artist: SqlArtist) -> Self {
        (
            artist.id.into(),
            Artist {
                name: artist.name,
                city: artist.city,
                state: artist.state,
                phone: artist.phone,
                genres: split_genres(&artist.genres),
                image_link: artist.image_link,
                facebook_link: artist.facebook_link,
                website: artist.website,
                seeking_venue: artist.seeking_venue,
                seeking_description: artist.seeking_description,
            },
        )
    }
}

impl From<Artist> for NewSqlArtist {
    fn from(artist: Artist) -> NewSqlArtist {
        NewSqlArtist {
            name: artist.name,
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            genres: join_genres(artist.genres),
            image_link: artist.image_link,
            facebook_link: artist.facebook_link,
            website: artist.website,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
        }
    }
}

#[derive(Queryable, Identifiable, Associations, Debug, Clone, PartialEq)]
#[diesel(belongs_to(SqlVenue, foreign_key = venue_id))]
#[diesel(belongs_to(SqlArtist, foreign_key = artist_id))]
#[diesel(table_name = shows)]
pub struct SqlShow {
    pub id: i32,
    pub venue_id: i32,
    pub artist_id: i32,
    pub start_time: NaiveDateTime,
}

#[derive(Insertable, AsChangeset, Debug)]
#[diesel(table_name = shows)]
pub struct NewSqlShow {
    pub venue_id: i32,
    pub artist_id: i32,
    pub start_time: NaiveDateTime,
}

impl From<SqlShow> for (Id<Show>, Show) {
    fn from(show: SqlShow) -> Self {
        (
            show.id.into(),
            Show {
                venue_id: show.venue_id.into(),
                artist_id: show.artist_id.into(),
                start_time: show.start_time,
            },
        )
    }
}

impl From<Show> for NewSqlShow {
    fn from(show: Show) -> NewSqlShow {
        NewSqlShow {
            venue_id: show.venue_id.raw(),
            artist_id: show.artist_id.raw(),
            start_time: show.start_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genres_survive_the_text_column() {
        let genres = vec!["Jazz".to_string(), "Rock n Roll".to_string()];
        let stored = join_genres(genres.clone());

        assert_eq!(stored, "Jazz,Rock n Roll");
        assert_eq!(split_genres(&stored), genres);
    }

    #[test]
    fn empty_genre_column_is_no_genres() {
        assert!(split_genres("").is_empty());
        assert_eq!(split_genres("Folk,,"), vec!["Folk".to_string()]);
    }
}
