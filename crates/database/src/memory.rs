use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use locations::database::{DatabaseError, LocationRepo, Result};
use model::{location::Location, WithId};
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;
use utility::id::Id;

/// In-process location store keeping insertion order. Identifiers are
/// generated the same way the document store generates them.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    locations: Arc<RwLock<IndexMap<Id<Location>, Location>>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_empty(&self) -> bool {
        self.locations.read().await.is_empty()
    }
}

#[async_trait]
impl LocationRepo for MemoryDatabase {
    async fn get(&self, id: &Id<Location>) -> Result<WithId<Location>> {
        self.locations
            .read()
            .await
            .get(id)
            .map(|location| WithId::new(id.clone(), location.clone()))
            .ok_or(DatabaseError::NotFound)
    }

    async fn get_all(&self) -> Result<Vec<WithId<Location>>> {
        Ok(self
            .locations
            .read()
            .await
            .iter()
            .map(|(id, location)| WithId::new(id.clone(), location.clone()))
            .collect())
    }

    async fn insert(&self, location: Location) -> Result<WithId<Location>> {
        let id = Id::new(ObjectId::new().to_hex());
        self.locations
            .write()
            .await
            .insert(id.clone(), location.clone());
        Ok(WithId::new(id, location))
    }

    async fn update(&self, location: &WithId<Location>) -> Result<u64> {
        match self.locations.write().await.get_mut(&location.id) {
            Some(stored) => {
                *stored = location.content.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: &Id<Location>) -> Result<u64> {
        Ok(self
            .locations
            .write()
            .await
            .shift_remove(id)
            .map_or(0, |_| 1))
    }
}
