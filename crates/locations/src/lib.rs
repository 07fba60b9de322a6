use std::{error::Error, fmt};

pub mod client;
pub mod database;

#[derive(Debug)]
pub enum RequestError {
    NotFound,
    Unavailable,
    InvalidId(String),
    Other(Box<dyn Error + Send + Sync>),
}

impl RequestError {
    pub fn other<T: Error + Send + Sync + 'static>(why: T) -> Self {
        Self::Other(Box::new(why))
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "the requested location does not exist"),
            Self::Unavailable => write!(f, "the database is not connected"),
            Self::InvalidId(id) => write!(f, "invalid location id: {}", id),
            Self::Other(why) => write!(f, "{}", why),
        }
    }
}

impl Error for RequestError {}

impl From<database::DatabaseError> for RequestError {
    fn from(value: database::DatabaseError) -> Self {
        match value {
            database::DatabaseError::NotFound => Self::NotFound,
            database::DatabaseError::Unavailable => Self::Unavailable,
            database::DatabaseError::InvalidId(id) => Self::InvalidId(id),
            database::DatabaseError::Other(why) => Self::Other(why),
        }
    }
}

pub type RequestResult<O> = Result<O, RequestError>;
