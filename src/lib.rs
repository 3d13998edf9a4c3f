pub mod config;
mod error;
pub mod store;
mod website;

use std::path::PathBuf;

use rocket::fairing::AdHoc;
use rocket::figment::Figment;
use rocket::fs::NamedFile;
use rocket::{get, routes, Build, Rocket, State};
use tracing::error;

use store::Store;

/// The directory site on Rocket's default configuration.
pub fn rocket() -> Rocket<Build> {
    build(config::figment())
}

pub fn build(figment: Figment) -> Rocket<Build> {
    let rocket = rocket::custom(figment)
        .attach(Store::fairing())
        .attach(assets_fairing())
        .mount("/", routes![static_file]);
    website::mount(rocket, "/")
}

fn assets_fairing() -> AdHoc {
    AdHoc::try_on_ignite("Assets Config", |rocket| async move {
        let assets_dir = rocket
            .figment()
            .extract_inner::<PathBuf>("assets_dir")
            .unwrap_or_else(|_| PathBuf::from("static"));
        if assets_dir.exists() {
            Ok(rocket.manage(AssetsDir(assets_dir)))
        } else {
            error!(
                "The assets directory '{}' does not exist.",
                assets_dir.display()
            );

            Err(rocket)
        }
    })
}

#[derive(Debug)]
struct AssetsDir(PathBuf);

#[get("/static/<file..>")]
async fn static_file(file: PathBuf, assets_dir: &State<AssetsDir>) -> Option<NamedFile> {
    let path = assets_dir.0.join(file);
    NamedFile::open(path).await.ok()
}
