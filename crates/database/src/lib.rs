use std::{fmt, sync::Arc, time::Duration};

use async_trait::async_trait;
use data_model::location::LocationDocument;
use locations::database::{DatabaseError, LocationRepo, Result};
use model::{location::Location, WithId};
use mongodb::{bson::doc, options::ClientOptions, Collection};
use queries::convert_error;
use tokio::sync::OnceCell;
use utility::{
    env::{self, ConfigError},
    id::Id,
};

pub mod data_model;
pub mod memory;
pub mod queries;

pub use memory::MemoryDatabase;

/// Upper bound for establishing the connection and the initial ping.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

const APP_NAME: &str = "lokasi";

#[derive(Clone)]
pub struct DatabaseConnectionInfo {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

impl DatabaseConnectionInfo {
    pub fn from_env() -> std::result::Result<Self, ConfigError> {
        let uri = env::required("MONGO_URI")?;
        let database = env::or_default("MONGO_DATABASE", "ujianSIG");
        let collection = env::or_default("MONGO_COLLECTION", "lokasis");
        Ok(Self {
            uri,
            database,
            collection,
        })
    }
}

// The uri usually carries credentials.
impl fmt::Debug for DatabaseConnectionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConnectionInfo")
            .field("uri", &"<redacted>")
            .field("database", &self.database)
            .field("collection", &self.collection)
            .finish()
    }
}

/// MongoDB backed location store.
///
/// The handle starts out unconnected; [`MongoDatabase::connect`] opens the
/// connection at most once for all clones. Operations on an unconnected
/// handle fail with [`DatabaseError::Unavailable`].
#[derive(Debug, Clone)]
pub struct MongoDatabase {
    info: Arc<DatabaseConnectionInfo>,
    collection: Arc<OnceCell<Collection<LocationDocument>>>,
}

impl MongoDatabase {
    pub fn new(info: DatabaseConnectionInfo) -> Self {
        Self {
            info: Arc::new(info),
            collection: Arc::new(OnceCell::new()),
        }
    }

    pub async fn connect(&self) -> Result<()> {
        self.collection
            .get_or_try_init(|| open_collection(&self.info))
            .await?;
        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        self.collection.initialized()
    }

    fn collection(&self) -> Result<&Collection<LocationDocument>> {
        self.collection.get().ok_or(DatabaseError::Unavailable)
    }
}

/// Parses the uri (resolving SRV records for `mongodb+srv://`), then pings,
/// all within [`CONNECT_TIMEOUT`].
async fn open_collection(
    info: &DatabaseConnectionInfo,
) -> Result<Collection<LocationDocument>> {
    tokio::time::timeout(CONNECT_TIMEOUT, ping_collection(info))
        .await
        .map_err(DatabaseError::other)?
}

async fn ping_collection(
    info: &DatabaseConnectionInfo,
) -> Result<Collection<LocationDocument>> {
    let mut options = ClientOptions::parse(&info.uri)
        .await
        .map_err(convert_error)?;
    options.app_name = Some(APP_NAME.to_owned());
    options.connect_timeout = Some(CONNECT_TIMEOUT);
    options.server_selection_timeout = Some(CONNECT_TIMEOUT);

    let client = mongodb::Client::with_options(options).map_err(convert_error)?;
    let database = client.database(&info.database);
    database
        .run_command(doc! { "ping": 1 }, None)
        .await
        .map_err(convert_error)?;

    log::info!(
        "connected to database {}, collection {}",
        info.database,
        info.collection
    );
    Ok(database.collection(&info.collection))
}

#[async_trait]
impl LocationRepo for MongoDatabase {
    async fn get(&self, id: &Id<Location>) -> Result<WithId<Location>> {
        queries::location::get(self.collection()?, id).await
    }

    async fn get_all(&self) -> Result<Vec<WithId<Location>>> {
        queries::location::get_all(self.collection()?).await
    }

    async fn insert(&self, location: Location) -> Result<WithId<Location>> {
        queries::location::insert(self.collection()?, location).await
    }

    async fn update(&self, location: &WithId<Location>) -> Result<u64> {
        queries::location::update(self.collection()?, location).await
    }

    async fn delete(&self, id: &Id<Location>) -> Result<u64> {
        queries::location::delete(self.collection()?, id).await
    }
}
