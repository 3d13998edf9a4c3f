mod db;
#[macro_use]
pub mod action;
pub mod model;

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::num::ParseIntError;

use chrono::{Local, NaiveDateTime};
use diesel::result::QueryResult;
use diesel::{self, prelude::*};
use rocket::fairing::{self, Fairing};
use rocket::request::{FromParam, FromRequest, Outcome, Request};
use rocket::{Build, Rocket};
use tracing::info;

use db::schema::{artists, shows, venues};
use db::{NewSqlArtist, NewSqlShow, NewSqlVenue, SqlArtist, SqlShow, SqlVenue};

use crate::error::{Error, Result};

pub use action::{Actions, Listing};
pub use model::{
    Area, Artist, ArtistWithShows, Schedule, SearchHit, SearchResults, Show, ShowListing,
    ShowWithArtist, ShowWithVenue, Venue, VenueWithShows,
};

mod venue_actions {
    use super::*;

    derive_actions!(Venue, SqlVenue, NewSqlVenue, venues, "venue");
    derive_listing!(Venue, venues, venue_id);
}

mod artist_actions {
    use super::*;

    derive_actions!(Artist, SqlArtist, NewSqlArtist, artists, "artist");
    derive_listing!(Artist, artists, artist_id);
}

mod show_actions {
    use super::*;

    derive_actions!(Show, SqlShow, NewSqlShow, shows, "show");
}

/// Row id tagged with the entity it belongs to.
pub struct Id<Item> {
    id: i32,
    item: PhantomData<fn() -> Item>,
}

// Manual impls, because derive would require the bounds on `Item` as well.
impl<Item> Id<Item> {
    pub fn raw(self) -> i32 {
        self.id
    }
}

impl<Item> From<i32> for Id<Item> {
    fn from(id: i32) -> Self {
        Id {
            id,
            item: PhantomData,
        }
    }
}

impl<Item> Clone for Id<Item> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Item> Copy for Id<Item> {}

impl<Item> PartialEq for Id<Item> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<Item> Eq for Id<Item> {}

impl<Item> PartialOrd for Id<Item> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Item> Ord for Id<Item> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl<Item> Hash for Id<Item> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl<Item> fmt::Debug for Id<Item> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Id({})", self.id)
    }
}

impl<Item> fmt::Display for Id<Item> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl<'a, Item> FromParam<'a> for Id<Item> {
    type Error = ParseIntError;

    fn from_param(param: &'a str) -> std::result::Result<Self, Self::Error> {
        param.parse::<i32>().map(Id::from)
    }
}

/// The time "past" and "upcoming" are measured against. Start times are
/// stored as naive local time, so this is local as well.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn lookup<T: Actions>(id: Id<T>) -> impl FnOnce(diesel::result::Error) -> Error {
    move |err| Error::lookup(err, format!("{} {}", T::KIND, id))
}

/// Request-scoped access to the database. Each `Store` holds one pooled
/// connection that goes back to the pool when the request is done.
pub struct Store(db::Connection);

impl Store {
    pub fn fairing() -> StoreFairing {
        StoreFairing
    }

    async fn run<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        self.0.run(f).await
    }

    /// Runs `f` inside a transaction that commits on `Ok` and rolls back on
    /// any `Err`. Pooled connections come with foreign keys enforced.
    async fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        self.0.run(move |conn| conn.transaction(f)).await
    }

    pub async fn read<T: Actions>(&self, id: Id<T>) -> Result<T> {
        self.run(move |conn| T::read(conn, id).map_err(lookup(id)))
            .await
    }

    pub async fn create<T: Actions>(&self, item: T) -> Result<Id<T>> {
        let id = self
            .transaction(move |conn| T::create(conn, item).map_err(Error::from))
            .await?;
        info!(kind = T::KIND, %id, "created");
        Ok(id)
    }

    /// Overwrites the stored item and returns the previous version.
    pub async fn update<T: Actions>(&self, id: Id<T>, new_item: T) -> Result<T> {
        let previous = self
            .transaction(move |conn| T::update(conn, id, new_item).map_err(lookup(id)))
            .await?;
        info!(kind = T::KIND, %id, "updated");
        Ok(previous)
    }

    pub async fn venue_areas(&self) -> Result<Vec<Area>> {
        let now = now();
        self.run(move |conn| {
            let all = Venue::all(conn)?;
            let counts = Venue::upcoming_show_counts(conn, now)?;
            Ok(Area::group(all, &counts))
        })
        .await
    }

    pub async fn artists_by_name(&self) -> Result<Vec<(Id<Artist>, String)>> {
        self.run(|conn| {
            let rows = artists::table
                .order_by((artists::name, artists::id))
                .select((artists::id, artists::name))
                .load::<(i32, String)>(conn)?;
            Ok(rows
                .into_iter()
                .map(|(id, name)| (Id::from(id), name))
                .collect())
        })
        .await
    }

    pub async fn venues_by_name(&self) -> Result<Vec<(Id<Venue>, String)>> {
        self.run(|conn| {
            let rows = venues::table
                .order_by((venues::name, venues::id))
                .select((venues::id, venues::name))
                .load::<(i32, String)>(conn)?;
            Ok(rows
                .into_iter()
                .map(|(id, name)| (Id::from(id), name))
                .collect())
        })
        .await
    }

    /// Case-insensitive substring search on the name, ordered by id.
    pub async fn search<T: Listing>(&self, term: &str) -> Result<SearchResults<T>> {
        let term = term.to_string();
        let now = now();
        self.run(move |conn| {
            let matches = T::search(conn, &term)?;
            let counts = T::upcoming_show_counts(conn, now)?;
            let hits: Vec<SearchHit<T>> = matches
                .into_iter()
                .map(|(id, name)| SearchHit {
                    id,
                    name,
                    num_upcoming_shows: counts.get(&id.raw()).copied().unwrap_or(0),
                })
                .collect();
            Ok(SearchResults::from(hits))
        })
        .await
    }

    pub async fn venue_with_shows(&self, id: Id<Venue>) -> Result<VenueWithShows> {
        let now = now();
        self.run(move |conn| {
            let venue = Venue::read(conn, id).map_err(lookup(id))?;
            let booked = shows::table
                .inner_join(artists::table)
                .filter(shows::venue_id.eq(id.raw()))
                .order_by((shows::start_time, shows::id))
                .select((
                    shows::start_time,
                    artists::id,
                    artists::name,
                    artists::image_link,
                ))
                .load::<(NaiveDateTime, i32, String, Option<String>)>(conn)?
                .into_iter()
                .map(
                    |(start_time, artist_id, artist_name, artist_image_link)| ShowWithArtist {
                        artist_id: artist_id.into(),
                        artist_name,
                        artist_image_link,
                        start_time,
                    },
                )
                .collect();

            Ok(VenueWithShows {
                id,
                venue,
                schedule: Schedule::split(booked, now),
            })
        })
        .await
    }

    pub async fn artist_with_shows(&self, id: Id<Artist>) -> Result<ArtistWithShows> {
        let now = now();
        self.run(move |conn| {
            let artist = Artist::read(conn, id).map_err(lookup(id))?;
            let booked = shows::table
                .inner_join(venues::table)
                .filter(shows::artist_id.eq(id.raw()))
                .order_by((shows::start_time, shows::id))
                .select((
                    shows::start_time,
                    venues::id,
                    venues::name,
                    venues::image_link,
                ))
                .load::<(NaiveDateTime, i32, String, Option<String>)>(conn)?
                .into_iter()
                .map(
                    |(start_time, venue_id, venue_name, venue_image_link)| ShowWithVenue {
                        venue_id: venue_id.into(),
                        venue_name,
                        venue_image_link,
                        start_time,
                    },
                )
                .collect();

            Ok(ArtistWithShows {
                id,
                artist,
                schedule: Schedule::split(booked, now),
            })
        })
        .await
    }

    /// Lists a show, provided both its venue and its artist exist.
    pub async fn create_show(&self, show: Show) -> Result<Id<Show>> {
        let id = self
            .transaction(move |conn| {
                Venue::read(conn, show.venue_id).map_err(lookup(show.venue_id))?;
                Artist::read(conn, show.artist_id).map_err(lookup(show.artist_id))?;
                Ok(Show::create(conn, show)?)
            })
            .await?;
        info!(kind = Show::KIND, %id, "created");
        Ok(id)
    }

    pub async fn shows(&self) -> Result<Vec<ShowListing>> {
        self.run(|conn| {
            let rows = shows::table
                .inner_join(venues::table)
                .inner_join(artists::table)
                .order_by((shows::start_time, shows::id))
                .select((
                    shows::id,
                    shows::start_time,
                    venues::id,
                    venues::name,
                    artists::id,
                    artists::name,
                    artists::image_link,
                ))
                .load::<(i32, NaiveDateTime, i32, String, i32, String, Option<String>)>(conn)?;

            Ok(rows
                .into_iter()
                .map(
                    |(id, start_time, venue_id, venue_name, artist_id, artist_name, artist_image_link)| {
                        ShowListing {
                            id: id.into(),
                            venue_id: venue_id.into(),
                            venue_name,
                            artist_id: artist_id.into(),
                            artist_name,
                            artist_image_link,
                            start_time,
                        }
                    },
                )
                .collect())
        })
        .await
    }

    /// Deletes a venue together with the shows booked there.
    pub async fn delete_venue(&self, id: Id<Venue>) -> Result<Venue> {
        let venue = self
            .transaction(move |conn| {
                let venue = Venue::read(conn, id).map_err(lookup(id))?;
                let cancelled = diesel::delete(shows::table.filter(shows::venue_id.eq(id.raw())))
                    .execute(conn)?;
                diesel::delete(venues::table.find(id.raw())).execute(conn)?;
                info!(%id, cancelled, "cancelled shows of deleted venue");
                Ok(venue)
            })
            .await?;
        info!(kind = Venue::KIND, %id, "deleted");
        Ok(venue)
    }
}

pub struct StoreFairing;

#[rocket::async_trait]
impl Fairing for StoreFairing {
    fn info(&self) -> fairing::Info {
        fairing::Info {
            name: "Directory Store Fairing",
            kind: fairing::Kind::Ignite,
        }
    }

    async fn on_ignite(&self, rocket: Rocket<Build>) -> fairing::Result {
        let rocket = db::Connection::fairing().on_ignite(rocket).await?;
        db::initialize(rocket).await
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Store {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        db::Connection::from_request(request).await.map(Store)
    }
}
