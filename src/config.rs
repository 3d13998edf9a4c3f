use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rocket::figment::providers::Env;
use rocket::figment::{Figment, Profile};
use serde::Deserialize;
use tracing::warn;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Name of the database in Rocket's `databases` table.
pub const DATABASE: &str = "fyyur";

/// Database location assembled from `DB_USER`, `DB_USER_PASSWORD`, `DB_HOST`
/// and `DB_NAME`.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct DatabaseSettings {
    pub user: Option<String>,
    #[serde(rename = "user_password")]
    pub password: Option<String>,
    pub host: Option<String>,
    pub name: Option<String>,
}

impl DatabaseSettings {
    pub fn from_env() -> DatabaseSettings {
        Figment::from(Env::prefixed("DB_"))
            .extract()
            .unwrap_or_else(|e| {
                warn!("ignoring DB_* environment: {}", e);
                DatabaseSettings::default()
            })
    }

    /// The SQLite file these settings point at. `host` is the directory the
    /// database lives in, `name` the file. Without a name there is nothing to
    /// assemble and `Rocket.toml` decides.
    pub fn url(&self) -> Option<String> {
        let name = self.name.as_deref()?;
        let path = match self.host.as_deref() {
            Some(host) => Path::new(host).join(name),
            None => PathBuf::from(name),
        };
        Some(path.to_string_lossy().into_owned())
    }

    fn has_credentials(&self) -> bool {
        self.user.is_some() || self.password.is_some()
    }
}

/// Rocket's own configuration with the database url from the environment
/// merged on top.
pub fn figment() -> Figment {
    let figment = rocket::Config::figment();
    let settings = DatabaseSettings::from_env();

    if settings.has_credentials() {
        warn!("DB_USER and DB_USER_PASSWORD have no effect on a SQLite database");
    }

    match settings.url() {
        Some(url) => figment.merge((format!("databases.{}.url", DATABASE), url)),
        None => figment,
    }
}

/// Written in the working directory outside the debug profile.
pub const ERROR_LOG: &str = "error.log";

fn writes_error_log(profile: &Profile) -> bool {
    profile != &rocket::Config::DEBUG_PROFILE
}

fn open_error_log() -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(ERROR_LOG)
}

/// Logs to stdout. Outside the debug profile every event also goes to
/// `error.log`, with the source location it was emitted at.
pub fn init_tracing() {
    let (log_file, open_error) = if writes_error_log(rocket::Config::figment().profile()) {
        match open_error_log() {
            Ok(file) => (Some(file), None),
            Err(e) => (None, Some(e)),
        }
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fyyur=info,rocket=info".into()),
        )
        .with(fmt::layer())
        .with(log_file.map(|file| {
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
        }))
        .init();

    if let Some(e) = open_error {
        warn!("cannot write {}: {}", ERROR_LOG, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_host_and_name() {
        let settings = DatabaseSettings {
            host: Some("/var/lib/fyyur".into()),
            name: Some("directory.sqlite".into()),
            ..Default::default()
        };

        assert_eq!(
            settings.url().as_deref(),
            Some("/var/lib/fyyur/directory.sqlite")
        );
    }

    #[test]
    fn url_without_host_is_relative() {
        let settings = DatabaseSettings {
            name: Some("directory.sqlite".into()),
            ..Default::default()
        };

        assert_eq!(settings.url().as_deref(), Some("directory.sqlite"));
    }

    #[test]
    fn no_name_leaves_url_to_rocket() {
        let settings = DatabaseSettings {
            user: Some("fyyur".into()),
            host: Some("/tmp".into()),
            ..Default::default()
        };

        assert_eq!(settings.url(), None);
        assert!(settings.has_credentials());
    }

    #[test]
    fn only_release_profiles_write_the_error_log() {
        assert!(!writes_error_log(&rocket::Config::DEBUG_PROFILE));
        assert!(writes_error_log(&rocket::Config::RELEASE_PROFILE));
        assert!(writes_error_log(&Profile::new("staging")));
    }
}
