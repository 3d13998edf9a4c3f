use std::collections::HashMap;

use chrono::NaiveDateTime;
use rocket::form::{self, Context, FromForm, FromFormField, ValueField};

use crate::store::{Artist, Show, Venue};

use super::format::datetime_input;

pub const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

pub const VENUE_FIELDS: &[&str] = &[
    "name",
    "city",
    "state",
    "address",
    "phone",
    "genres",
    "image_link",
    "facebook_link",
    "website_link",
    "seeking_talent",
    "seeking_description",
];

pub const ARTIST_FIELDS: &[&str] = &[
    "name",
    "city",
    "state",
    "phone",
    "genres",
    "image_link",
    "facebook_link",
    "website_link",
    "seeking_venue",
    "seeking_description",
];

pub const SHOW_FIELDS: &[&str] = &["artist_id", "venue_id", "start_time"];

const MAX_LEN: usize = 120;

fn required<'v>(value: &str) -> form::Result<'v, ()> {
    let value = value.trim();
    if value.is_empty() {
        Err(form::Error::validation("This field is required."))?;
    }
    if value.chars().count() > MAX_LEN {
        Err(form::Error::validation(format!(
            "Must be at most {} characters.",
            MAX_LEN
        )))?;
    }
    Ok(())
}

fn known_state<'v>(state: &str) -> form::Result<'v, ()> {
    if !STATES.contains(&state) {
        Err(form::Error::validation("Pick a state from the list."))?;
    }
    Ok(())
}

fn known_genres<'v>(genres: &[String]) -> form::Result<'v, ()> {
    if genres.is_empty() {
        Err(form::Error::validation("Pick at least one genre."))?;
    }
    if let Some(unknown) = genres.iter().find(|genre| !GENRES.contains(&genre.as_str())) {
        Err(form::Error::validation(format!("Unknown genre '{}'.", unknown)))?;
    }
    Ok(())
}

fn phone_number<'v>(value: &Option<String>) -> form::Result<'v, ()> {
    let value = match value.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => return Ok(()),
    };

    let allowed = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')' | '.'));
    let digits = value.chars().filter(char::is_ascii_digit).count();
    if !allowed || digits < 7 {
        Err(form::Error::validation("Not a valid phone number."))?;
    }
    Ok(())
}

fn link<'v>(value: &Option<String>) -> form::Result<'v, ()> {
    let value = match value.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => return Ok(()),
    };

    if !is_web_url(value) {
        Err(form::Error::validation("Must be an http(s) URL."))?;
    }
    Ok(())
}

fn is_web_url(value: &str) -> bool {
    let rest = match value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))
    {
        Some(rest) => rest,
        None => return false,
    };
    let host = rest.split(['/', '?', '#']).next().unwrap_or("");

    !host.is_empty() && !value.chars().any(char::is_whitespace)
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Debug, FromForm)]
pub struct VenueForm {
    #[field(validate = required())]
    pub name: String,
    #[field(validate = required())]
    pub city: String,
    #[field(validate = known_state())]
    pub state: String,
    #[field(validate = required())]
    pub address: String,
    #[field(validate = phone_number())]
    pub phone: Option<String>,
    #[field(validate = known_genres())]
    pub genres: Vec<String>,
    #[field(validate = link())]
    pub image_link: Option<String>,
    #[field(validate = link())]
    pub facebook_link: Option<String>,
    #[field(name = "website_link")]
    #[field(validate = link())]
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl From<VenueForm> for Venue {
    fn from(form: VenueForm) -> Venue {
        Venue {
            name: form.name.trim().to_string(),
            city: form.city.trim().to_string(),
            state: form.state,
            address: form.address.trim().to_string(),
            phone: blank_to_none(form.phone),
            genres: form.genres,
            image_link: blank_to_none(form.image_link),
            facebook_link: blank_to_none(form.facebook_link),
            website: blank_to_none(form.website),
            seeking_talent: form.seeking_talent,
            seeking_description: blank_to_none(form.seeking_description),
        }
    }
}

#[derive(Debug, FromForm)]
pub struct ArtistForm {
    #[field(validate = required())]
    pub name: String,
    #[field(validate = required())]
    pub city: String,
    #[field(validate = known_state())]
    pub state: String,
    #[field(validate = phone_number())]
    pub phone: Option<String>,
    #[field(validate = known_genres())]
    pub genres: Vec<String>,
    #[field(validate = link())]
    pub image_link: Option<String>,
    #[field(validate = link())]
    pub facebook_link: Option<String>,
    #[field(name = "website_link")]
    #[field(validate = link())]
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl From<ArtistForm> for Artist {
    fn from(form: ArtistForm) -> Artist {
        Artist {
            name: form.name.trim().to_string(),
            city: form.city.trim().to_string(),
            state: form.state,
            phone: blank_to_none(form.phone),
            genres: form.genres,
            image_link: blank_to_none(form.image_link),
            facebook_link: blank_to_none(form.facebook_link),
            website: blank_to_none(form.website),
            seeking_venue: form.seeking_venue,
            seeking_description: blank_to_none(form.seeking_description),
        }
    }
}

#[derive(Debug, FromForm)]
pub struct SearchForm {
    #[field(default = String::new())]
    pub search_term: String,
}

/// Start time as sent by a `datetime-local` input, seconds optional.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartTime(pub NaiveDateTime);

const START_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

impl StartTime {
    pub fn parse(value: &str) -> Option<StartTime> {
        let value = value.trim();
        START_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
            .map(StartTime)
    }
}

impl<'v> FromFormField<'v> for StartTime {
    fn from_value(field: ValueField<'v>) -> form::Result<'v, Self> {
        StartTime::parse(field.value).ok_or_else(|| {
            form::Error::validation("Use a date and time like 2035-05-21T21:30.").into()
        })
    }
}

#[derive(Debug, FromForm)]
pub struct ShowForm {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: StartTime,
}

impl From<ShowForm> for Show {
    fn from(form: ShowForm) -> Show {
        Show {
            artist_id: form.artist_id.into(),
            venue_id: form.venue_id.into(),
            start_time: form.start_time.0,
        }
    }
}

/// What a form shows: the values to fill in and the errors per field.
#[derive(Debug, Default)]
pub struct FormState {
    values: HashMap<&'static str, Vec<String>>,
    errors: HashMap<&'static str, Vec<String>>,
}

impl FormState {
    /// Echoes a rejected submission.
    pub fn from_context(context: &Context<'_>, fields: &[&'static str]) -> FormState {
        let mut state = FormState::default();
        for &field in fields {
            let values: Vec<String> = context.field_values(field).map(String::from).collect();
            if !values.is_empty() {
                state.values.insert(field, values);
            }

            let errors: Vec<String> = context
                .field_errors(field)
                .map(|error| error.kind.to_string())
                .collect();
            if !errors.is_empty() {
                state.errors.insert(field, errors);
            }
        }
        state
    }

    pub fn value(&self, field: &str) -> Option<&str> {
        self.values
            .get(field)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn values(&self, field: &str) -> &[String] {
        self.values.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_checked(&self, field: &str) -> bool {
        match self.value(field) {
            Some(value) => !matches!(value, "off" | "no" | "false"),
            None => false,
        }
    }

    pub fn errors(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn set(&mut self, field: &'static str, value: impl Into<String>) {
        self.values.insert(field, vec![value.into()]);
    }

    fn set_optional(&mut self, field: &'static str, value: &Option<String>) {
        if let Some(value) = value {
            self.set(field, value.as_str());
        }
    }

    fn set_flag(&mut self, field: &'static str, value: bool) {
        if value {
            self.set(field, "yes");
        }
    }
}

impl From<&Venue> for FormState {
    fn from(venue: &Venue) -> FormState {
        let mut state = FormState::default();
        state.set("name", venue.name.as_str());
        state.set("city", venue.city.as_str());
        state.set("state", venue.state.as_str());
        state.set("address", venue.address.as_str());
        state.set_optional("phone", &venue.phone);
        state.values.insert("genres", venue.genres.clone());
        state.set_optional("image_link", &venue.image_link);
        state.set_optional("facebook_link", &venue.facebook_link);
        state.set_optional("website_link", &venue.website);
        state.set_flag("seeking_talent", venue.seeking_talent);
        state.set_optional("seeking_description", &venue.seeking_description);
        state
    }
}

impl From<&Artist> for FormState {
    fn from(artist: &Artist) -> FormState {
        let mut state = FormState::default();
        state.set("name", artist.name.as_str());
        state.set("city", artist.city.as_str());
        state.set("state", artist.state.as_str());
        state.set_optional("phone", &artist.phone);
        state.values.insert("genres", artist.genres.clone());
        state.set_optional("image_link", &artist.image_link);
        state.set_optional("facebook_link", &artist.facebook_link);
        state.set_optional("website_link", &artist.website);
        state.set_flag("seeking_venue", artist.seeking_venue);
        state.set_optional("seeking_description", &artist.seeking_description);
        state
    }
}

impl FormState {
    /// A new show defaults to starting now.
    pub fn new_show(now: &NaiveDateTime) -> FormState {
        let mut state = FormState::default();
        state.set("start_time", datetime_input(now));
        state
    }
}
