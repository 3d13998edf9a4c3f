use maud::{html, Markup};
use rocket::form::{Contextual, Form};
use rocket::request::FlashMessage;
use rocket::response::{Flash, Redirect};
use rocket::{get, post, routes, Route};
use tracing::error;

use crate::error::{Error, Result};
use crate::store::{Artist, Id, SearchResults, ShowWithVenue, Store};

use super::fields::{checkbox, choices, error_summary, input, select, text};
use super::format::{format_datetime, DateFormat};
use super::forms::{ArtistForm, FormState, SearchForm, ARTIST_FIELDS, GENRES, STATES};
use super::{base_html, detail_link, genre_tags, search_notice, search_results, Page, Submission};

pub fn routes() -> Vec<Route> {
    routes![
        artists,
        search_artists,
        show_artist,
        edit_artist_form,
        edit_artist,
        create_artist_form,
        create_artist
    ]
}

#[get("/artists")]
async fn artists(store: Store, flash: Option<FlashMessage<'_>>) -> Result<Markup> {
    let artists = store.artists_by_name().await?;

    Ok(base_html(
        html! {
            section.artists {
                h2 { "Artists" }
                @if artists.is_empty() {
                    p { "No artists listed yet. " a href="/artists/create" { "Post the first one." } }
                }
                ul.items {
                    @for (id, name) in &artists {
                        li { ( detail_link("artists", id, name) ) }
                    }
                }
            }
        },
        &Page::Artists,
        flash.as_ref(),
    ))
}

#[post("/artists/search", data = "<form>")]
async fn search_artists(store: Store, form: Form<SearchForm>) -> Result<Markup> {
    let term = form.into_inner().search_term.trim().to_string();
    let results = match term.as_str() {
        "" => SearchResults::empty(),
        term => store.search::<Artist>(term).await?,
    };
    let notice = search_notice(&term, results.count);

    Ok(search_results(
        "artists",
        &term,
        notice.as_deref(),
        &results,
        &Page::Artists,
    ))
}

#[get("/artists/<id>")]
async fn show_artist(
    store: Store,
    id: Id<Artist>,
    flash: Option<FlashMessage<'_>>,
) -> Result<Markup> {
    let details = store.artist_with_shows(id).await?;
    let artist = &details.artist;
    let schedule = &details.schedule;

    Ok(base_html(
        html! {
            div.artist.detail {
                div.details {
                    h1 { ( artist.name ) }
                    p.subtitle { "ID: " ( id ) }
                    ( genre_tags(&artist.genres) )
                    dl {
                        dt { "Location" } dd.location { ( artist.city ) ", " ( artist.state ) }
                        @if let Some(phone) = &artist.phone {
                            dt { "Phone" } dd.phone { ( phone ) }
                        }
                        @if let Some(website) = &artist.website {
                            dt { "Website" } dd { a.website href=( website ) { ( website ) } }
                        }
                        @if let Some(facebook) = &artist.facebook_link {
                            dt { "Facebook" } dd { a.facebook href=( facebook ) { ( facebook ) } }
                        }
                    }
                    @if artist.seeking_venue {
                        div.seeking {
                            p.seeking-status { "Currently seeking performance venues" }
                            @if let Some(description) = &artist.seeking_description {
                                p.seeking-description { ( description ) }
                            }
                        }
                    } @else {
                        p.not-seeking { "Not currently seeking performance venues" }
                    }
                    p.actions {
                        a.button href=( format!("/artists/{}/edit", id) ) { "Edit" }
                    }
                }
                @if let Some(image) = &artist.image_link {
                    img.portrait src=( image ) alt=( artist.name );
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
        &Page::Artists,
        flash.as_ref(),
    ))
}

fn show_cards(shows: &[ShowWithVenue]) -> Markup {
    html! {
        ol.show-cards {
            @for show in shows {
                li.show-card {
                    @if let Some(image) = &show.venue_image_link {
                        img src=( image ) alt=( show.venue_name );
                    }
                    ( detail_link("venues", show.venue_id, &show.venue_name) )
                    time datetime=( show.start_time.to_string() ) {
                        ( format_datetime(&show.start_time, DateFormat::Full) )
                    }
                }
            }
        }
    }
}

fn artist_form_page(title: &str, action: &str, state: &FormState) -> Markup {
    base_html(
        html! {
            form.entity method="post" action=( action ) {
                h2 { ( title ) }
                ( error_summary(state) )
                ( text(state, "name", "Name", true) )
                ( text(state, "city", "City", true) )
                ( select(state, "state", "State", choices(STATES), false) )
                ( input(state, "phone", "Phone", "tel", false) )
                ( select(state, "genres", "Genres", choices(GENRES), true) )
                ( input(state, "image_link", "Image link", "url", false) )
                ( input(state, "facebook_link", "Facebook link", "url", false) )
                ( input(state, "website_link", "Website", "url", false) )
                ( checkbox(state, "seeking_venue", "Seeking venues") )
                ( text(state, "seeking_description", "Seeking description", false) )
                button type="submit" { ( title ) }
            }
        },
        &Page::Artists,
        None,
    )
}

#[get("/artists/<id>/edit")]
async fn edit_artist_form(store: Store, id: Id<Artist>) -> Result<Markup> {
    let artist = store.read(id).await?;

    Ok(artist_form_page(
        &format!("Edit artist {}", artist.name),
        &format!("/artists/{}/edit", id),
        &FormState::from(&artist),
    ))
}

#[post("/artists/<id>/edit", data = "<form>")]
async fn edit_artist(
    store: Store,
    id: Id<Artist>,
    form: Form<Contextual<'_, ArtistForm>>,
) -> Result<Submission> {
    let form = form.into_inner();
    let artist: Artist = match form.value {
        Some(submitted) => submitted.into(),
        None => {
            let state = FormState::from_context(&form.context, ARTIST_FIELDS);
            return Ok(Submission::Rejected(artist_form_page(
                "Edit artist",
                &format!("/artists/{}/edit", id),
                &state,
            )));
        }
    };

    let name = artist.name.clone();
    let detail = format!("/artists/{}", id);
    match store.update(id, artist).await {
        Ok(_) => Ok(Submission::Accepted(Flash::success(
            Redirect::to(detail),
            format!("Artist {} has been successfully updated!", name),
        ))),
        Err(Error::NotFound(what)) => Err(Error::NotFound(what)),
        Err(err) => {
            error!(%id, "could not update artist: {}", err);
            Ok(Submission::Accepted(Flash::error(
                Redirect::to(detail),
                format!("An error occurred. Artist {} was unsuccessfully updated.", name),
            )))
        }
    }
}

#[get("/artists/create")]
fn create_artist_form() -> Markup {
    artist_form_page("List a new artist", "/artists/create", &FormState::default())
}

#[post("/artists/create", data = "<form>")]
async fn create_artist(store: Store, form: Form<Contextual<'_, ArtistForm>>) -> Submission {
    let form = form.into_inner();
    let artist: Artist = match form.value {
        Some(submitted) => submitted.into(),
        None => {
            let state = FormState::from_context(&form.context, ARTIST_FIELDS);
            return Submission::Rejected(artist_form_page(
                "List a new artist",
                "/artists/create",
                &state,
            ));
        }
    };

    let name = artist.name.clone();
    match store.create(artist).await {
        Ok(_) => Submission::Accepted(Flash::success(
            Redirect::to("/"),
            format!("Artist {} was successfully listed!", name),
        )),
        Err(err) => {
            error!(artist = %name, "could not list artist: {}", err);
            Submission::Accepted(Flash::error(
                Redirect::to("/"),
                format!("An error occurred. Artist {} could not be listed.", name),
            ))
        }
    }
}
