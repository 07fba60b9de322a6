use std::{error, fmt, result};

use async_trait::async_trait;
use model::{location::Location, WithId};
use utility::id::Id;

#[derive(Debug)]
pub enum DatabaseError {
    NotFound,
    /// The store handle was never connected.
    Unavailable,
    /// An identifier the store cannot represent.
    InvalidId(String),
    Other(Box<dyn error::Error + Send + Sync>),
}

impl DatabaseError {
    pub fn other<T: error::Error + Send + Sync + 'static>(why: T) -> Self {
        Self::Other(Box::new(why))
    }
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "no matching document"),
            Self::Unavailable => write!(f, "database is not connected"),
            Self::InvalidId(id) => write!(f, "invalid object id: {}", id),
            Self::Other(why) => write!(f, "{}", why),
        }
    }
}

impl error::Error for DatabaseError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Other(why) => Some(why.as_ref()),
            _ => None,
        }
    }
}

pub type Result<T> = result::Result<T, DatabaseError>;

/// Single-document operations over the location collection.
#[async_trait]
pub trait LocationRepo: Send + Sync {
    async fn get(&self, id: &Id<Location>) -> Result<WithId<Location>>;

    async fn get_all(&self) -> Result<Vec<WithId<Location>>>;

    /// Stores the location under a freshly generated identifier.
    async fn insert(&self, location: Location) -> Result<WithId<Location>>;

    /// Replaces the descriptive fields of the matching document.
    /// Returns the number of matched documents.
    async fn update(&self, location: &WithId<Location>) -> Result<u64>;

    /// Returns the number of deleted documents.
    async fn delete(&self, id: &Id<Location>) -> Result<u64>;
}

pub trait Database: LocationRepo + Clone + Sized + 'static {}

impl<T> Database for T where T: LocationRepo + Clone + Sized + 'static {}
