mod common;

use rocket::http::Status;

use common::site;

#[test]
fn listed_venue_has_a_detail_page() {
    let site = site();
    site.create_venue("The Musical Hop", "San Francisco", "CA");

    assert!(site
        .home()
        .contains("Venue The Musical Hop was successfully listed!"));

    let (status, body) = site.get("/venues/1");
    assert_eq!(status, Status::Ok);
    assert!(body.contains("The Musical Hop"));
    assert!(body.contains("1015 Folsom Street"));
    assert!(body.contains("San Francisco, CA"));
    assert!(body.contains("123-123-1234"));
    assert!(body.contains("Jazz"));
    assert!(body.contains("Folk"));
    assert!(body.contains("https://www.themusicalhop.com"));
    assert!(body.contains("Currently seeking talent"));
    assert!(body.contains("We are on the lookout for a local artist"));
    assert!(body.contains("0 Upcoming Shows"));
    assert!(body.contains("0 Past Shows"));
}

#[test]
fn flash_is_shown_once() {
    let site = site();
    site.create_venue("The Musical Hop", "San Francisco", "CA");

    assert!(site.home().contains("successfully listed"));
    assert!(!site.home().contains("successfully listed"));
}

#[test]
fn missing_venue_is_not_found() {
    let site = site();

    let (status, body) = site.get("/venues/7");
    assert_eq!(status, Status::NotFound);
    assert!(body.contains("Sorry, that page does not exist."));

    let (status, _) = site.get("/venues/7/edit");
    assert_eq!(status, Status::NotFound);
}

#[test]
fn venues_are_grouped_by_area() {
    let site = site();
    site.create_venue("The Musical Hop", "San Francisco", "CA");
    site.create_venue("The Dueling Pianos Bar", "New York", "NY");
    site.create_venue("Park Square Live Music & Coffee", "San Francisco", "CA");
    site.home();

    let (status, body) = site.get("/venues");
    assert_eq!(status, Status::Ok);

    let san_francisco = body.find("San Francisco, CA").expect("San Francisco area");
    let new_york = body.find("New York, NY").expect("New York area");
    let park_square = body.find("Park Square Live Music").expect("Park Square");
    let musical_hop = body.find("The Musical Hop").expect("Musical Hop");
    let dueling_pianos = body.find("The Dueling Pianos Bar").expect("Dueling Pianos");

    assert_eq!(body.matches("San Francisco, CA").count(), 1);
    assert!(new_york < dueling_pianos);
    assert!(san_francisco < park_square);
    assert!(park_square < musical_hop);
    assert!(dueling_pianos < san_francisco);
}

#[test]
fn listing_counts_upcoming_shows_only() {
    let site = site();
    site.create_venue("The Musical Hop", "San Francisco", "CA");
    site.create_artist("Guns N Petals", "San Francisco", "CA");
    site.create_show("1", "1", "2099-05-21T21:30");
    site.create_show("1", "1", "2001-05-21T21:30");

    let (_, body) = site.get("/venues");
    assert!(body.contains("1 upcoming show"));
    assert!(!body.contains("2 upcoming shows"));

    let (_, body) = site.get("/venues/1");
    assert!(body.contains("1 Upcoming Shows"));
    assert!(body.contains("1 Past Shows"));
    assert!(body.contains("Guns N Petals"));
    assert!(body.contains("Thursday May, 21, 2099 at 9:30PM"));
}

#[test]
fn invalid_venue_is_rejected() {
    let site = site();

    let response = site.post(
        "/venues/create",
        &[
            ("name", ""),
            ("city", "San Francisco"),
            ("state", "ZZ"),
            ("address", "1015 Folsom Street"),
            ("genres", "Jazz"),
            ("website_link", "not a link"),
        ],
    );
    assert_eq!(response.status(), Status::UnprocessableEntity);

    let body = response.into_string().unwrap_or_default();
    assert!(body.contains("This field is required."));
    assert!(body.contains("Pick a state from the list."));
    assert!(body.contains("Must be an http(s) URL."));
    assert!(body.contains("San Francisco"));

    let (_, body) = site.get("/venues");
    assert!(body.contains("No venues listed yet."));
}

#[test]
fn edited_venue_shows_new_values() {
    let site = site();
    site.create_venue("The Musical Hop", "San Francisco", "CA");

    let (status, body) = site.get("/venues/1/edit");
    assert_eq!(status, Status::Ok);
    assert!(body.contains("value=\"The Musical Hop\""));

    let response = site.post(
        "/venues/1/edit",
        &[
            ("name", "The Musical Hop Annex"),
            ("city", "Oakland"),
            ("state", "CA"),
            ("address", "42 Broadway"),
            ("phone", ""),
            ("genres", "Blues"),
            ("website_link", ""),
            ("seeking_description", ""),
        ],
    );
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(response.headers().get_one("Location"), Some("/venues/1"));

    let (_, body) = site.get("/venues/1");
    assert!(body.contains("has been successfully updated!"));
    assert!(body.contains("The Musical Hop Annex"));
    assert!(body.contains("Oakland, CA"));
    assert!(body.contains("42 Broadway"));
    assert!(body.contains("Blues"));
    assert!(!body.contains("Folk"));
    assert!(!body.contains("123-123-1234"));
    assert!(body.contains("Not currently seeking talent"));
}

#[test]
fn editing_a_missing_venue_is_not_found() {
    let site = site();

    let response = site.post(
        "/venues/3/edit",
        &[
            ("name", "Nowhere"),
            ("city", "Oakland"),
            ("state", "CA"),
            ("address", "42 Broadway"),
            ("genres", "Blues"),
        ],
    );
    assert_eq!(response.status(), Status::NotFound);
}

#[test]
fn deleting_a_venue_cancels_its_shows() {
    let site = site();
    site.create_venue("The Musical Hop", "San Francisco", "CA");
    site.create_artist("Guns N Petals", "San Francisco", "CA");
    site.create_show("1", "1", "2099-05-21T21:30");

    let response = site.client.delete("/venues/1").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body: serde_json::Value =
        serde_json::from_str(&response.into_string().unwrap_or_default()).expect("json body");
    assert_eq!(body["message"], "Delete Successful!");

    assert_eq!(site.get("/venues/1").0, Status::NotFound);
    let (_, body) = site.get("/shows");
    assert!(!body.contains("Guns N Petals"));
    let (_, body) = site.get("/artists/1");
    assert!(body.contains("0 Upcoming Shows"));
}

#[test]
fn deleting_a_missing_venue_changes_nothing() {
    let site = site();
    site.create_venue("The Musical Hop", "San Francisco", "CA");

    let response = site.client.delete("/venues/9").dispatch();
    assert_eq!(response.status(), Status::BadRequest);
    let body: serde_json::Value =
        serde_json::from_str(&response.into_string().unwrap_or_default()).expect("json body");
    assert_eq!(body["message"], "venue 9 does not exist");

    assert_eq!(site.get("/venues/1").0, Status::Ok);
}
