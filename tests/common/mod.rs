#![allow(dead_code)]

use rocket::http::{ContentType, Status};
use rocket::local::blocking::{Client, LocalResponse};
use tempfile::TempDir;

/// A site backed by its own throwaway database.
pub struct TestSite {
    pub client: Client,
    _dir: TempDir,
}

pub fn site() -> TestSite {
    let dir = tempfile::tempdir().expect("temporary directory");
    let database = dir.path().join("fyyur.sqlite");

    let figment = rocket::Config::figment()
        .merge((
            "databases.fyyur.url",
            database.to_string_lossy().into_owned(),
        ))
        .merge(("assets_dir", concat!(env!("CARGO_MANIFEST_DIR"), "/static")))
        .merge(("log_level", "off"));
    let client = Client::tracked(fyyur::build(figment)).expect("valid rocket instance");

    TestSite { client, _dir: dir }
}

/// Percent-encodes `pairs` as an `application/x-www-form-urlencoded` body.
pub fn encode(pairs: &[(&str, &str)]) -> String {
    fn escape(value: &str) -> String {
        value
            .bytes()
            .map(|b| match b {
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                    (b as char).to_string()
                }
                b' ' => "+".to_string(),
                other => format!("%{:02X}", other),
            })
            .collect()
    }

    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", escape(key), escape(value)))
        .collect::<Vec<_>>()
        .join("&")
}

impl TestSite {
    pub fn get(&self, uri: &str) -> (Status, String) {
        let response = self.client.get(uri.to_string()).dispatch();
        let status = response.status();
        (status, response.into_string().unwrap_or_default())
    }

    pub fn post(&self, uri: &str, pairs: &[(&str, &str)]) -> LocalResponse<'_> {
        self.client
            .post(uri.to_string())
            .header(ContentType::Form)
            .body(encode(pairs))
            .dispatch()
    }

    /// Body of the home page, which is where listings report back.
    pub fn home(&self) -> String {
        self.get("/").1
    }

    pub fn create_venue(&self, name: &str, city: &str, state: &str) {
        let response = self.post(
            "/venues/create",
            &[
                ("name", name),
                ("city", city),
                ("state", state),
                ("address", "1015 Folsom Street"),
                ("phone", "123-123-1234"),
                ("genres", "Jazz"),
                ("genres", "Folk"),
                ("image_link", "https://images.example.com/venue.png"),
                ("facebook_link", ""),
                ("website_link", "https://www.themusicalhop.com"),
                ("seeking_talent", "yes"),
                ("seeking_description", "We are on the lookout for a local artist"),
            ],
        );
        assert_eq!(response.status(), Status::SeeOther);
    }

    pub fn create_artist(&self, name: &str, city: &str, state: &str) {
        let response = self.post(
            "/artists/create",
            &[
                ("name", name),
                ("city", city),
                ("state", state),
                ("phone", "326-123-5000"),
                ("genres", "Rock n Roll"),
                ("image_link", "https://images.example.com/artist.png"),
                ("facebook_link", "https://www.facebook.com/GunsNPetals"),
                ("website_link", ""),
                ("seeking_description", ""),
            ],
        );
        assert_eq!(response.status(), Status::SeeOther);
    }

    pub fn create_show(&self, artist_id: &str, venue_id: &str, start_time: &str) {
        let response = self.post(
            "/shows/create",
            &[
                ("artist_id", artist_id),
                ("venue_id", venue_id),
                ("start_time", start_time),
            ],
        );
        assert_eq!(response.status(), Status::SeeOther);
    }
}
