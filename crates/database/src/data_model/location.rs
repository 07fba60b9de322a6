use model::{
    location::{Location, Point},
    WithId,
};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utility::id::Id;

/// A location as stored in the `lokasis` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub nama: String,
    #[serde(default)]
    pub kategori: String,
    #[serde(default)]
    pub deskripsi: String,
    #[serde(default)]
    pub koordinat: PointDocument,
}

/// Embedded GeoJSON point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointDocument {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

impl LocationDocument {
    pub fn new(id: ObjectId, location: Location) -> Self {
        Self {
            id,
            nama: location.name,
            kategori: location.category,
            deskripsi: location.description,
            koordinat: location.coordinate.into(),
        }
    }

    pub fn to_model(self) -> WithId<Location> {
        WithId::new(
            Id::new(self.id.to_hex()),
            Location {
                name: self.nama,
                category: self.kategori,
                description: self.deskripsi,
                coordinate: self.koordinat.into(),
            },
        )
    }
}

impl From<Point> for PointDocument {
    fn from(value: Point) -> Self {
        Self {
            kind: value.kind,
            coordinates: value.coordinates,
        }
    }
}

impl From<PointDocument> for Point {
    fn from(value: PointDocument) -> Self {
        Self {
            kind: value.kind,
            coordinates: value.coordinates,
        }
    }
}
