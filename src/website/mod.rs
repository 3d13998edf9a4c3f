mod artists;
mod fields;
pub mod format;
pub mod forms;
mod shows;
mod venues;

use maud::{html, Markup, DOCTYPE};
use rocket::request::FlashMessage;
use rocket::response::{Flash, Redirect};
use rocket::{catch, catchers, get, routes, Build, Responder, Rocket};

pub fn mount(rocket: Rocket<Build>, prefix: &'static str) -> Rocket<Build> {
    rocket
        .mount(prefix, routes![home])
        .mount(prefix, venues::routes())
        .mount(prefix, artists::routes())
        .mount(prefix, shows::routes())
        .register(prefix, catchers![not_found, server_error])
}

/// Outcome of a form submission.
#[derive(Responder)]
pub enum Submission {
    Accepted(Flash<Redirect>),
    #[response(status = 422)]
    Rejected(Markup),
}

#[get("/")]
fn home(flash: Option<FlashMessage<'_>>) -> Markup {
    base_html(
        html! {
            section.home {
                h1 { "Fyyur" }
                p.lead { "Book venues and artists for your next show." }
                ul.actions {
                    li { a.button href="/venues/create" { "Post a venue" } }
                    li { a.button href="/artists/create" { "Post an artist" } }
                    li { a.button href="/shows/create" { "Post a show" } }
                }
            }
        },
        &Page::Home,
        flash.as_ref(),
    )
}

#[catch(404)]
fn not_found() -> Markup {
    error_page("404", "Sorry, that page does not exist.")
}

#[catch(500)]
fn server_error() -> Markup {
    error_page("500", "Something went wrong on our side. Please try again later.")
}

fn error_page(code: &str, message: &str) -> Markup {
    base_html(
        html! {
            section.error {
                h1 { ( code ) }
                p { ( message ) }
                a href="/" { "Back home" }
            }
        },
        &Page::Home,
        None,
    )
}

#[derive(PartialEq)]
enum Page {
    Home,
    Venues,
    Artists,
    Shows,
}

impl Page {
    fn url(&self) -> &'static str {
        use Page::*;

        match self {
            Home => "/",
            Venues => "/venues",
            Artists => "/artists",
            Shows => "/shows",
        }
    }

    fn title(&self) -> &'static str {
        use Page::*;

        match self {
            Home => "Home",
            Venues => "Venues",
            Artists => "Artists",
            Shows => "Shows",
        }
    }

    /// Where the search box in the header sends its term.
    fn search_url(&self) -> &'static str {
        match self {
            Page::Artists => "/artists/search",
            _ => "/venues/search",
        }
    }
}

fn base_html(main: Markup, current_page: &Page, flash: Option<&FlashMessage<'_>>) -> Markup {
    use Page::*;
    html! {
        ( DOCTYPE )
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Fyyur | " ( current_page.title() ) }

                link href="/static/main.css" rel="stylesheet";
                script src="/static/fyyur.js" defer {}
            }
            body {
                header {
                    div.header {
                        a.title href="/" { h1 { "Fyyur" } }
                        nav {
                            ol {
                                @for page in vec![Venues, Artists, Shows] {
                                    li { ( nav_entry(page, current_page) ) }
                                }
                            }
                        }
                        form.search method="post" action=( current_page.search_url() ) {
                            input type="search" name="search_term" placeholder="Find a venue or artist";
                        }
                    }
                }
                @if let Some(flash) = flash {
                    div class=( format!("flash {}", flash.kind()) ) { ( flash.message() ) }
                }
                main {
                    ( main )
                }
            }
        }
    }
}

fn nav_entry(page: Page, current: &Page) -> Markup {
    html! {
        a.current[current == &page] href=( page.url() ) { ( page.title() ) }
    }
}

/// Links to the detail page of a venue or an artist.
fn detail_link(prefix: &str, id: impl std::fmt::Display, name: &str) -> Markup {
    html! {
        a href=( format!("/{}/{}", prefix, id) ) { ( name ) }
    }
}

fn genre_tags(genres: &[String]) -> Markup {
    html! {
        ul.genres {
            @for genre in genres {
                li.genre { ( genre ) }
            }
        }
    }
}

fn upcoming_label(count: i64) -> String {
    match count {
        1 => "1 upcoming show".to_string(),
        n => format!("{} upcoming shows", n),
    }
}

fn search_results<T>(
    prefix: &str,
    term: &str,
    notice: Option<&str>,
    results: &crate::store::SearchResults<T>,
    current_page: &Page,
) -> Markup {
    base_html(
        html! {
            section.search-results {
                h2 { "Number of search results for \"" ( term ) "\": " ( results.count ) }
                @if let Some(notice) = notice {
                    p.notice { ( notice ) }
                }
                ul.items {
                    @for hit in &results.data {
                        li {
                            ( detail_link(prefix, hit.id, &hit.name) )
                            " "
                            span.upcoming { ( upcoming_label(hit.num_upcoming_shows) ) }
                        }
                    }
                }
            }
        },
        current_page,
        None,
    )
}

/// Message for a search that found nothing, or asked for nothing.
fn search_notice(term: &str, count: usize) -> Option<String> {
    if term.trim().is_empty() {
        Some("Please enter a valid word".to_string())
    } else if count == 0 {
        Some(format!("{} has no matching records", term))
    } else {
        None
    }
}
