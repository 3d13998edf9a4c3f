mod common;

use rocket::http::Status;

use common::site;

#[test]
fn listed_artist_has_a_detail_page() {
    let site = site();
    site.create_artist("Guns N Petals", "San Francisco", "CA");

    assert!(site
        .home()
        .contains("Artist Guns N Petals was successfully listed!"));

    let (status, body) = site.get("/artists/1");
    assert_eq!(status, Status::Ok);
    assert!(body.contains("Guns N Petals"));
    assert!(body.contains("San Francisco, CA"));
    assert!(body.contains("326-123-5000"));
    assert!(body.contains("Rock n Roll"));
    assert!(body.contains("https://www.facebook.com/GunsNPetals"));
    assert!(body.contains("Not currently seeking performance venues"));
}

#[test]
fn artists_are_listed_by_name() {
    let site = site();
    site.create_artist("The Wild Sax Band", "San Francisco", "CA");
    site.create_artist("Matt Quevedo", "New York", "NY");
    site.create_artist("Guns N Petals", "San Francisco", "CA");
    site.home();

    let (status, body) = site.get("/artists");
    assert_eq!(status, Status::Ok);

    let guns = body.find("Guns N Petals").expect("Guns N Petals");
    let matt = body.find("Matt Quevedo").expect("Matt Quevedo");
    let sax = body.find("The Wild Sax Band").expect("The Wild Sax Band");
    assert!(guns < matt);
    assert!(matt < sax);
    assert!(body.contains("href=\"/artists/2\""));
}

#[test]
fn artist_detail_splits_past_and_upcoming() {
    let site = site();
    site.create_venue("The Musical Hop", "San Francisco", "CA");
    site.create_venue("Park Square Live Music & Coffee", "San Francisco", "CA");
    site.create_artist("Guns N Petals", "San Francisco", "CA");
    site.create_show("1", "1", "2099-05-21T21:30");
    site.create_show("1", "2", "2099-06-15T20:00");
    site.create_show("1", "1", "2001-05-21T21:30");

    let (_, body) = site.get("/artists/1");
    assert!(body.contains("2 Upcoming Shows"));
    assert!(body.contains("1 Past Shows"));
    assert!(body.contains("href=\"/venues/2\""));

    let upcoming = body.find("Upcoming Shows").expect("upcoming section");
    let past = body.find("Past Shows").expect("past section");
    let early = body.find("May, 21, 2099").expect("first upcoming show");
    let late = body.find("June, 15, 2099").expect("second upcoming show");
    let old = body.find("May, 21, 2001").expect("past show");
    assert!(upcoming < early && early < late && late < past && past < old);
}

#[test]
fn edited_artist_shows_new_values() {
    let site = site();
    site.create_artist("Guns N Petals", "San Francisco", "CA");

    let (status, body) = site.get("/artists/1/edit");
    assert_eq!(status, Status::Ok);
    assert!(body.contains("value=\"Guns N Petals\""));

    let response = site.post(
        "/artists/1/edit",
        &[
            ("name", "Guns N Roses"),
            ("city", "Los Angeles"),
            ("state", "CA"),
            ("genres", "Rock n Roll"),
            ("genres", "Blues"),
            ("seeking_venue", "yes"),
            ("seeking_description", "Looking for shows in the Bay Area"),
        ],
    );
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(response.headers().get_one("Location"), Some("/artists/1"));

    let (_, body) = site.get("/artists/1");
    assert!(body.contains("Artist Guns N Roses has been successfully updated!"));
    assert!(body.contains("Los Angeles, CA"));
    assert!(body.contains("Blues"));
    assert!(body.contains("Currently seeking performance venues"));
    assert!(body.contains("Looking for shows in the Bay Area"));
    assert!(!body.contains("326-123-5000"));
}

#[test]
fn invalid_artist_is_rejected() {
    let site = site();

    let response = site.post(
        "/artists/create",
        &[
            ("name", "Guns N Petals"),
            ("city", "San Francisco"),
            ("state", "CA"),
            ("phone", "call me"),
            ("genres", "Polka"),
        ],
    );
    assert_eq!(response.status(), Status::UnprocessableEntity);

    let body = response.into_string().unwrap_or_default();
    assert!(body.contains("Not a valid phone number."));
    assert!(body.contains("Unknown genre"));
    assert!(body.contains("value=\"Guns N Petals\""));

    assert_eq!(site.get("/artists/1").0, Status::NotFound);
}
