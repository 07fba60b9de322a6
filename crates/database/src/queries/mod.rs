use locations::database::DatabaseError;
use model::location::Location;
use mongodb::bson::oid::ObjectId;
use utility::id::Id;

pub mod location;

pub(crate) fn convert_error(why: mongodb::error::Error) -> DatabaseError {
    DatabaseError::Other(Box::new(why))
}

pub(crate) fn object_id(id: &Id<Location>) -> Result<ObjectId, DatabaseError> {
    ObjectId::parse_str(id.raw_ref::<str>())
        .map_err(|_| DatabaseError::InvalidId(id.raw()))
}
