use model::{location::Location, WithId};
use utility::{id::Id, let_also::LetAlso};

use crate::{database::Database, RequestError, RequestResult};

/// Entry point for all location requests. Cheap to clone; every clone shares
/// the same store handle.
#[derive(Debug, Clone)]
pub struct Client<D>
where
    D: Database,
{
    database: D,
}

impl<D> Client<D>
where
    D: Database,
{
    pub fn new(database: D) -> Self {
        Self { database }
    }

    pub async fn get_location(
        &self,
        id: &Id<Location>,
    ) -> RequestResult<WithId<Location>> {
        log::debug!("get location {}", id);
        self.database
            .get(id)
            .await
            .inspect_err(|why| log_failure("get", why))?
            .let_owned(Ok)
    }

    /// All stored locations in store order. Empty when the collection is.
    pub async fn get_locations(&self) -> RequestResult<Vec<WithId<Location>>> {
        self.database
            .get_all()
            .await
            .inspect_err(|why| log_failure("get all", why))?
            .let_owned(Ok)
    }

    pub async fn create_location(
        &self,
        location: Location,
    ) -> RequestResult<WithId<Location>> {
        let created = self
            .database
            .insert(location.normalized())
            .await
            .inspect_err(|why| log_failure("insert", why))?;
        log::info!("created location {}", created.id);
        Ok(created)
    }

    /// Replaces every descriptive field of the location. Fails with
    /// `NotFound` when no stored location has the given id.
    pub async fn update_location(
        &self,
        id: Id<Location>,
        location: Location,
    ) -> RequestResult<WithId<Location>> {
        let updated = WithId::new(id, location.normalized());
        let matched = self
            .database
            .update(&updated)
            .await
            .inspect_err(|why| log_failure("update", why))?;
        if matched == 0 {
            return Err(RequestError::NotFound);
        }
        log::info!("updated location {}", updated.id);
        Ok(updated)
    }

    /// Fails with `NotFound` when no stored location has the given id.
    pub async fn delete_location(&self, id: &Id<Location>) -> RequestResult<()> {
        let deleted = self
            .database
            .delete(id)
            .await
            .inspect_err(|why| log_failure("delete", why))?;
        if deleted == 0 {
            return Err(RequestError::NotFound);
        }
        log::info!("deleted location {}", id);
        Ok(())
    }
}

fn log_failure(operation: &str, why: &crate::database::DatabaseError) {
    match why {
        crate::database::DatabaseError::NotFound => {}
        _ => log::error!("location {} failed: {}", operation, why),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    };

    use async_trait::async_trait;
    use model::{
        location::{Point, POINT},
        ExampleData,
    };

    use super::*;
    use crate::database::{DatabaseError, LocationRepo, Result};

    #[derive(Clone, Default)]
    struct VecDatabase {
        next_id: Arc<AtomicU64>,
        locations: Arc<Mutex<Vec<WithId<Location>>>>,
        broken: bool,
    }

    impl VecDatabase {
        fn broken() -> Self {
            Self {
                broken: true,
                ..Default::default()
            }
        }

        fn check(&self) -> Result<()> {
            if self.broken {
                return Err(DatabaseError::other(std::io::Error::other(
                    "connection reset",
                )));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl LocationRepo for VecDatabase {
        async fn get(&self, id: &Id<Location>) -> Result<WithId<Location>> {
            self.check()?;
            self.locations
                .lock()
                .unwrap()
                .iter()
                .find(|location| &location.id == id)
                .cloned()
                .ok_or(DatabaseError::NotFound)
        }

        async fn get_all(&self) -> Result<Vec<WithId<Location>>> {
            self.check()?;
            Ok(self.locations.lock().unwrap().clone())
        }

        async fn insert(&self, location: Location) -> Result<WithId<Location>> {
            self.check()?;
            let n = self.next_id.fetch_add(1, Ordering::SeqCst);
            let created = WithId::new(Id::new(format!("{:024x}", n)), location);
            self.locations.lock().unwrap().push(created.clone());
            Ok(created)
        }

        async fn update(&self, location: &WithId<Location>) -> Result<u64> {
            self.check()?;
            let mut locations = self.locations.lock().unwrap();
            match locations.iter_mut().find(|stored| stored.id == location.id) {
                Some(stored) => {
                    *stored = location.clone();
                    Ok(1)
                }
                None => Ok(0),
            }
        }

        async fn delete(&self, id: &Id<Location>) -> Result<u64> {
            self.check()?;
            let mut locations = self.locations.lock().unwrap();
            let before = locations.len();
            locations.retain(|location| &location.id != id);
            Ok((before - locations.len()) as u64)
        }
    }

    fn missing_id() -> Id<Location> {
        Location::parse_id("ffffffffffffffffffffffff").unwrap()
    }

    #[tokio::test]
    async fn create_forces_point_and_assigns_id() {
        let client = Client::new(VecDatabase::default());
        let mut location = Location::example_data();
        location.coordinate.kind = "LineString".to_owned();

        let created = client.create_location(location).await.unwrap();

        assert_eq!(created.content.coordinate.kind, POINT);
        let fetched = client.get_location(&created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn get_locations_is_empty_for_empty_collection() {
        let client = Client::new(VecDatabase::default());
        assert!(client.get_locations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_replaces_fields_and_normalizes() {
        let client = Client::new(VecDatabase::default());
        let created = client
            .create_location(Location::example_data())
            .await
            .unwrap();

        let replacement = Location {
            name: "Monas".to_owned(),
            category: "Monument".to_owned(),
            description: String::new(),
            coordinate: Point {
                kind: "Polygon".to_owned(),
                coordinates: vec![106.8272, -6.1754],
            },
        };
        let updated = client
            .update_location(created.id.clone(), replacement)
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.content.coordinate.kind, POINT);
        assert_eq!(client.get_location(&created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn update_of_missing_location_is_not_found() {
        let client = Client::new(VecDatabase::default());
        let result = client
            .update_location(missing_id(), Location::example_data())
            .await;
        assert!(matches!(result, Err(RequestError::NotFound)));
    }

    #[tokio::test]
    async fn delete_removes_location() {
        let client = Client::new(VecDatabase::default());
        let created = client
            .create_location(Location::example_data())
            .await
            .unwrap();

        client.delete_location(&created.id).await.unwrap();

        assert!(matches!(
            client.get_location(&created.id).await,
            Err(RequestError::NotFound)
        ));
        assert!(matches!(
            client.delete_location(&created.id).await,
            Err(RequestError::NotFound)
        ));
    }

    #[tokio::test]
    async fn store_failures_surface_as_other() {
        let client = Client::new(VecDatabase::broken());
        match client.get_locations().await {
            Err(RequestError::Other(why)) => {
                assert_eq!(why.to_string(), "connection reset")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
