use maud::{html, Markup};
use rocket::form::{Contextual, Form};
use rocket::http::Status;
use rocket::request::FlashMessage;
use rocket::response::{Flash, Redirect};
use rocket::serde::json::Json;
use rocket::{delete, get, post, routes, Route};
use serde::Serialize;
use tracing::error;

use crate::error::{Error, Result};
use crate::store::{Id, SearchResults, ShowWithArtist, Store, Venue};

use super::fields::{checkbox, choices, error_summary, input, select, text};
use super::format::{format_datetime, DateFormat};
use super::forms::{FormState, SearchForm, VenueForm, GENRES, STATES, VENUE_FIELDS};
use super::{
    base_html, detail_link, genre_tags, search_notice, search_results, upcoming_label, Page,
    Submission,
};

pub fn routes() -> Vec<Route> {
    routes![
        venues,
        search_venues,
        show_venue,
        create_venue_form,
        create_venue,
        delete_venue,
        edit_venue_form,
        edit_venue
    ]
}

#[get("/venues")]
async fn venues(store: Store, flash: Option<FlashMessage<'_>>) -> Result<Markup> {
    let areas = store.venue_areas().await?;

    Ok(base_html(
        html! {
            section.areas {
                h2 { "Venues" }
                @if areas.is_empty() {
                    p { "No venues listed yet. " a href="/venues/create" { "Post the first one." } }
                }
                @for area in &areas {
                    div.area {
                        h3 { ( area.city ) ", " ( area.state ) }
                        ul.items {
                            @for venue in &area.venues {
                                li {
                                    ( detail_link("venues", venue.id, &venue.name) )
                                    " "
                                    span.upcoming { ( upcoming_label(venue.num_upcoming_shows) ) }
                                }
                            }
                        }
                    }
                }
            }
        },
        &Page::Venues,
        flash.as_ref(),
    ))
}

#[post("/venues/search", data = "<form>")]
async fn search_venues(store: Store, form: Form<SearchForm>) -> Result<Markup> {
    let term = form.into_inner().search_term.trim().to_string();
    let results = match term.as_str() {
        "" => SearchResults::empty(),
        term => store.search::<Venue>(term).await?,
    };
    let notice = search_notice(&term, results.count);

    Ok(search_results(
        "venues",
        &term,
        notice.as_deref(),
        &results,
        &Page::Venues,
    ))
}

#[get("/venues/<id>")]
async fn show_venue(store: Store, id: Id<Venue>, flash: Option<FlashMessage<'_>>) -> Result<Markup> {
    let details = store.venue_with_shows(id).await?;
    let venue = &details.venue;
    let schedule = &details.schedule;

    Ok(base_html(
        html! {
            div.venue.detail data-venue-id=( id ) {
                div.details {
                    h1 { ( venue.name ) }
                    p.subtitle { "ID: " ( id ) }
                    ( genre_tags(&venue.genres) )
                    dl {
                        dt { "Address" } dd.address { ( venue.address ) }
                        dt { "Location" } dd.location { ( venue.city ) ", " ( venue.state ) }
                        @if let Some(phone) = &venue.phone {
                            dt { "Phone" } dd.phone { ( phone ) }
                        }
                        @if let Some(website) = &venue.website {
                            dt { "Website" } dd { a.website href=( website ) { ( website ) } }
                        }
                        @if let Some(facebook) = &venue.facebook_link {
                            dt { "Facebook" } dd { a.facebook href=( facebook ) { ( facebook ) } }
                        }
                    }
                    @if venue.seeking_talent {
                        div.seeking {
                            p.seeking-status { "Currently seeking talent" }
                            @if let Some(description) = &venue.seeking_description {
                                p.seeking-description { ( description ) }
                            }
                        }
                    } @else {
                        p.not-seeking { "Not currently seeking talent" }
                    }
                    p.actions {
                        a.button href=( format!("/venues/{}/edit", id) ) { "Edit" }
                        " "
                        button.delete-venue type="button" data-venue-id=( id ) { "Delete" }
                    }
                }
                @if let Some(image) = &venue.image_link {
                    img.portrait src=( image ) alt=( venue.name );
                }
                section.shows.upcoming {
                    h2 { ( schedule.upcoming_shows_count() ) " Upcoming Shows" }
                    ( show_cards(&schedule.upcoming_shows) )
                }
                section.shows.past {
                    h2 { ( schedule.past_shows_count() ) " Past Shows" }
                    ( show_cards(&schedule.past_shows) )
                }
            }
        },
        &Page::Venues,
        flash.as_ref(),
    ))
}

fn show_cards(shows: &[ShowWithArtist]) -> Markup {
    html! {
        ol.show-cards {
            @for show in shows {
                li.show-card {
                    @if let Some(image) = &show.artist_image_link {
                        img src=( image ) alt=( show.artist_name );
                    }
                    ( detail_link("artists", show.artist_id, &show.artist_name) )
                    time datetime=( show.start_time.to_string() ) {
                        ( format_datetime(&show.start_time, DateFormat::Full) )
                    }
                }
            }
        }
    }
}

fn venue_form(title: &str, action: &str, state: &FormState) -> Markup {
    html! {
        form.entity method="post" action=( action ) {
            h2 { ( title ) }
            ( error_summary(state) )
            ( text(state, "name", "Name", true) )
            ( text(state, "city", "City", true) )
            ( select(state, "state", "State", choices(STATES), false) )
            ( text(state, "address", "Address", true) )
            ( input(state, "phone", "Phone", "tel", false) )
            ( select(state, "genres", "Genres", choices(GENRES), true) )
            ( input(state, "image_link", "Image link", "url", false) )
            ( input(state, "facebook_link", "Facebook link", "url", false) )
            ( input(state, "website_link", "Website", "url", false) )
            ( checkbox(state, "seeking_talent", "Seeking talent") )
            ( text(state, "seeking_description", "Seeking description", false) )
            button type="submit" { ( title ) }
        }
    }
}

fn venue_form_page(title: &str, action: &str, state: &FormState) -> Markup {
    base_html(venue_form(title, action, state), &Page::Venues, None)
}

#[get("/venues/create")]
fn create_venue_form() -> Markup {
    venue_form_page("List a new venue", "/venues/create", &FormState::default())
}

#[post("/venues/create", data = "<form>")]
async fn create_venue(store: Store, form: Form<Contextual<'_, VenueForm>>) -> Submission {
    let form = form.into_inner();
    let venue: Venue = match form.value {
        Some(submitted) => submitted.into(),
        None => {
            let state = FormState::from_context(&form.context, VENUE_FIELDS);
            return Submission::Rejected(venue_form_page(
                "List a new venue",
                "/venues/create",
                &state,
            ));
        }
    };

    let name = venue.name.clone();
    match store.create(venue).await {
        Ok(_) => Submission::Accepted(Flash::success(
            Redirect::to("/"),
            format!("Venue {} was successfully listed!", name),
        )),
        Err(err) => {
            error!(venue = %name, "could not list venue: {}", err);
            Submission::Accepted(Flash::error(
                Redirect::to("/"),
                format!("An error occurred. Venue {} could not be listed.", name),
            ))
        }
    }
}

#[derive(Serialize, Debug)]
struct Message {
    message: String,
}

impl Message {
    fn json(message: impl Into<String>) -> Json<Message> {
        Json(Message {
            message: message.into(),
        })
    }
}

#[delete("/venues/<id>")]
async fn delete_venue(store: Store, id: Id<Venue>) -> (Status, Json<Message>) {
    match store.delete_venue(id).await {
        Ok(_) => (Status::Ok, Message::json("Delete Successful!")),
        Err(Error::NotFound(what)) => (
            Status::BadRequest,
            Message::json(format!("{} does not exist", what)),
        ),
        Err(err) => {
            error!(%id, "could not delete venue: {}", err);
            (
                Status::InternalServerError,
                Message::json(format!("Venue {} could not be deleted.", id)),
            )
        }
    }
}

#[get("/venues/<id>/edit")]
async fn edit_venue_form(store: Store, id: Id<Venue>) -> Result<Markup> {
    let venue = store.read(id).await?;

    Ok(venue_form_page(
        &format!("Edit venue {}", venue.name),
        &format!("/venues/{}/edit", id),
        &FormState::from(&venue),
    ))
}

#[post("/venues/<id>/edit", data = "<form>")]
async fn edit_venue(
    store: Store,
    id: Id<Venue>,
    form: Form<Contextual<'_, VenueForm>>,
) -> Result<Submission> {
    let form = form.into_inner();
    let venue: Venue = match form.value {
        Some(submitted) => submitted.into(),
        None => {
            let state = FormState::from_context(&form.context, VENUE_FIELDS);
            return Ok(Submission::Rejected(venue_form_page(
                "Edit venue",
                &format!("/venues/{}/edit", id),
                &state,
            )));
        }
    };

    let name = venue.name.clone();
    let detail = format!("/venues/{}", id);
    match store.update(id, venue).await {
        Ok(_) => Ok(Submission::Accepted(Flash::success(
            Redirect::to(detail),
            format!("Venue {} has been successfully updated!", name),
        ))),
        Err(Error::NotFound(what)) => Err(Error::NotFound(what)),
        Err(err) => {
            error!(%id, "could not update venue: {}", err);
            Ok(Submission::Accepted(Flash::error(
                Redirect::to(detail),
                format!("An error occurred. Venue {} was unsuccessfully updated.", name),
            )))
        }
    }
}
