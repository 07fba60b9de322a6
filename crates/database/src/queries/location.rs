use futures::TryStreamExt;
use locations::database::{DatabaseError, Result};
use model::{location::Location, WithId};
use mongodb::{
    bson::{self, doc, oid::ObjectId},
    Collection,
};
use utility::{id::Id, let_also::LetAlso};

use crate::data_model::location::{LocationDocument, PointDocument};

use super::{convert_error, object_id};

pub async fn get(
    collection: &Collection<LocationDocument>,
    id: &Id<Location>,
) -> Result<WithId<Location>> {
    collection
        .find_one(doc! { "_id": object_id(id)? }, None)
        .await
        .map_err(convert_error)?
        .map(LocationDocument::to_model)
        .ok_or(DatabaseError::NotFound)
}

pub async fn get_all(
    collection: &Collection<LocationDocument>,
) -> Result<Vec<WithId<Location>>> {
    collection
        .find(doc! {}, None)
        .await
        .map_err(convert_error)?
        .try_collect::<Vec<LocationDocument>>()
        .await
        .map_err(convert_error)?
        .into_iter()
        .map(LocationDocument::to_model)
        .collect::<Vec<_>>()
        .let_owned(Ok)
}

pub async fn insert(
    collection: &Collection<LocationDocument>,
    location: Location,
) -> Result<WithId<Location>> {
    let document = LocationDocument::new(ObjectId::new(), location);
    collection
        .insert_one(&document, None)
        .await
        .map_err(convert_error)?;
    Ok(document.to_model())
}

pub async fn update(
    collection: &Collection<LocationDocument>,
    location: &WithId<Location>,
) -> Result<u64> {
    let koordinat =
        bson::to_bson(&PointDocument::from(location.content.coordinate.clone()))
            .map_err(DatabaseError::other)?;
    collection
        .update_one(
            doc! { "_id": object_id(&location.id)? },
            doc! {
                "$set": {
                    "nama": location.content.name.as_str(),
                    "kategori": location.content.category.as_str(),
                    "deskripsi": location.content.description.as_str(),
                    "koordinat": koordinat,
                }
            },
            None,
        )
        .await
        .map_err(convert_error)
        .map(|result| result.matched_count)
}

pub async fn delete(
    collection: &Collection<LocationDocument>,
    id: &Id<Location>,
) -> Result<u64> {
    collection
        .delete_one(doc! { "_id": object_id(id)? }, None)
        .await
        .map_err(convert_error)
        .map(|result| result.deleted_count)
}
