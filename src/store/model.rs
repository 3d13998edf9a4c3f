use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDateTime;

use super::Id;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Venue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Show {
    pub venue_id: Id<Venue>,
    pub artist_id: Id<Artist>,
    pub start_time: NaiveDateTime,
}

/// A venue as it appears in the listing and in search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueSummary {
    pub id: Id<Venue>,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// All venues sharing a city and state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

impl Area {
    /// Partitions `venues` by `(city, state)`. Areas come out ordered by city
    /// then state, and the venues of an area by name.
    pub fn group(
        venues: Vec<(Id<Venue>, Venue)>,
        upcoming_counts: &HashMap<i32, i64>,
    ) -> Vec<Area> {
        let mut areas: BTreeMap<(String, String), Vec<VenueSummary>> = BTreeMap::new();

        for (id, venue) in venues {
            let summary = VenueSummary {
                id,
                name: venue.name,
                num_upcoming_shows: upcoming_counts.get(&id.raw()).copied().unwrap_or(0),
            };
            areas
                .entry((venue.city, venue.state))
                .or_default()
                .push(summary);
        }

        areas
            .into_iter()
            .map(|((city, state), mut venues)| {
                venues.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
                Area {
                    city,
                    state,
                    venues,
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit<T> {
    pub id: Id<T>,
    pub name: String,
    pub num_upcoming_shows: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults<T> {
    pub count: usize,
    pub data: Vec<SearchHit<T>>,
}

impl<T> SearchResults<T> {
    pub fn empty() -> Self {
        SearchResults {
            count: 0,
            data: Vec::new(),
        }
    }
}

impl<T> From<Vec<SearchHit<T>>> for SearchResults<T> {
    fn from(data: Vec<SearchHit<T>>) -> Self {
        SearchResults {
            count: data.len(),
            data,
        }
    }
}

/// A show seen from its venue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowWithArtist {
    pub artist_id: Id<Artist>,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: NaiveDateTime,
}

/// A show seen from its artist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowWithVenue {
    pub venue_id: Id<Venue>,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: NaiveDateTime,
}

pub trait Scheduled {
    fn start_time(&self) -> NaiveDateTime;
}

impl Scheduled for ShowWithArtist {
    fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }
}

impl Scheduled for ShowWithVenue {
    fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule<S> {
    pub past_shows: Vec<S>,
    pub upcoming_shows: Vec<S>,
}

impl<S: Scheduled> Schedule<S> {
    /// Shows starting before `now` are past, everything else is upcoming.
    pub fn split(shows: Vec<S>, now: NaiveDateTime) -> Self {
        let (past_shows, upcoming_shows) = shows
            .into_iter()
            .partition(|show| show.start_time() < now);

        Schedule {
            past_shows,
            upcoming_shows,
        }
    }

    pub fn past_shows_count(&self) -> usize {
        self.past_shows.len()
    }

    pub fn upcoming_shows_count(&self) -> usize {
        self.upcoming_shows.len()
    }
}

#[derive(Debug, Clone)]
pub struct VenueWithShows {
    pub id: Id<Venue>,
    pub venue: Venue,
    pub schedule: Schedule<ShowWithArtist>,
}

#[derive(Debug, Clone)]
pub struct ArtistWithShows {
    pub id: Id<Artist>,
    pub artist: Artist,
    pub schedule: Schedule<ShowWithVenue>,
}

/// One row of the shows listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowListing {
    pub id: Id<Show>,
    pub venue_id: Id<Venue>,
    pub venue_name: String,
    pub artist_id: Id<Artist>,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: NaiveDateTime,
}
