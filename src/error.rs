use std::result;

use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::Request;
use thiserror::Error;
use tracing::{error, warn};

pub type Result<T> = result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0} does not exist")]
    NotFound(String),
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
}

impl Error {
    /// Turns diesel's `NotFound` into one naming what was looked up.
    pub fn lookup(err: diesel::result::Error, what: String) -> Error {
        match err {
            diesel::result::Error::NotFound => Error::NotFound(what),
            other => Error::Database(other),
        }
    }

    pub fn status(&self) -> Status {
        match self {
            Error::NotFound(_) => Status::NotFound,
            Error::Database(_) => Status::InternalServerError,
        }
    }
}

/// Hands the request over to the matching catcher.
impl<'r> Responder<'r, 'static> for Error {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        match &self {
            Error::NotFound(what) => warn!(uri = %request.uri(), "{} does not exist", what),
            Error::Database(err) => error!(uri = %request.uri(), "database error: {}", err),
        }
        Err(self.status())
    }
}
