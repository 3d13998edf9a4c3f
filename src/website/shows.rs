use maud::{html, Markup};
use rocket::form::{Contextual, Form};
use rocket::request::FlashMessage;
use rocket::response::{Flash, Redirect};
use rocket::{get, post, routes, Route};
use tracing::error;

use crate::error::Result;
use crate::store::{now, Show, Store};

use super::fields::{error_summary, input, select};
use super::format::{format_datetime, DateFormat};
use super::forms::{FormState, ShowForm, SHOW_FIELDS};
use super::{base_html, detail_link, Page, Submission};

pub fn routes() -> Vec<Route> {
    routes![shows, create_show_form, create_show]
}

#[get("/shows")]
async fn shows(store: Store, flash: Option<FlashMessage<'_>>) -> Result<Markup> {
    let shows = store.shows().await?;

    Ok(base_html(
        html! {
            section.shows {
                h2 { "Shows" }
                @if shows.is_empty() {
                    p { "Nothing booked yet. " a href="/shows/create" { "Post the first show." } }
                }
                ol.show-cards {
                    @for show in &shows {
                        li.show-card {
                            @if let Some(image) = &show.artist_image_link {
                                img src=( image ) alt=( show.artist_name );
                            }
                            p.artist { ( detail_link("artists", show.artist_id, &show.artist_name) ) }
                            p.venue { "playing at " ( detail_link("venues", show.venue_id, &show.venue_name) ) }
                            time datetime=( show.start_time.to_string() ) {
                                ( format_datetime(&show.start_time, DateFormat::Medium) )
                            }
                        }
                    }
                }
            }
        },
        &Page::Shows,
        flash.as_ref(),
    ))
}

async fn show_form_page(store: &Store, state: &FormState) -> Result<Markup> {
    let artists = store.artists_by_name().await?;
    let venues = store.venues_by_name().await?;

    Ok(base_html(
        html! {
            form.entity method="post" action="/shows/create" {
                h2 { "List a new show" }
                ( error_summary(state) )
                ( select(
                    state,
                    "artist_id",
                    "Artist",
                    artists.iter().map(|(id, name)| (id.to_string(), name.as_str())),
                    false,
                ) )
                ( select(
                    state,
                    "venue_id",
                    "Venue",
                    venues.iter().map(|(id, name)| (id.to_string(), name.as_str())),
                    false,
                ) )
                ( input(state, "start_time", "Start time", "datetime-local", true) )
                button type="submit" { "List a new show" }
            }
        },
        &Page::Shows,
        None,
    ))
}

#[get("/shows/create")]
async fn create_show_form(store: Store) -> Result<Markup> {
    show_form_page(&store, &FormState::new_show(&now())).await
}

#[post("/shows/create", data = "<form>")]
async fn create_show(store: Store, form: Form<Contextual<'_, ShowForm>>) -> Result<Submission> {
    let form = form.into_inner();
    let show: Show = match form.value {
        Some(submitted) => submitted.into(),
        None => {
            let state = FormState::from_context(&form.context, SHOW_FIELDS);
            return Ok(Submission::Rejected(show_form_page(&store, &state).await?));
        }
    };

    let (artist_id, venue_id) = (show.artist_id, show.venue_id);
    Ok(match store.create_show(show).await {
        Ok(_) => Submission::Accepted(Flash::success(
            Redirect::to("/"),
            "Show was successfully listed!",
        )),
        Err(err) => {
            error!(%artist_id, %venue_id, "could not list show: {}", err);
            Submission::Accepted(Flash::error(
                Redirect::to("/"),
                "An error occurred. Show could not be listed.",
            ))
        }
    })
}
