use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};
use utility::id::{HasId, Id};

use crate::ExampleData;

/// The only GeoJSON geometry type stored in the collection.
pub const POINT: &str = "Point";

fn point_type() -> String {
    POINT.to_owned()
}

/// A geotagged point record ("lokasi"). Missing or `null` fields decode to
/// their defaults.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Location {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "nama", default)]
    #[schemars(with = "String")]
    pub name: String,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "kategori", default)]
    #[schemars(with = "String")]
    pub category: String,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "deskripsi", default)]
    #[schemars(with = "String")]
    pub description: String,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "koordinat", default)]
    #[schemars(with = "Point")]
    pub coordinate: Point,
}

impl Location {
    pub fn parse_id(raw: &str) -> Option<Id<Location>> {
        Id::from_object_id_hex(raw)
    }

    /// Forces the coordinate's type discriminator to `Point`.
    pub fn normalized(mut self) -> Self {
        self.coordinate.kind = point_type();
        self
    }
}

impl HasId for Location {
    type IdType = String;
}

impl ExampleData for Location {
    fn example_data() -> Self {
        Location {
            name: "Taman Suropati".to_owned(),
            category: "Park".to_owned(),
            description: "City park in Menteng".to_owned(),
            coordinate: Point::new(106.8324, -6.1995),
        }
    }
}

/// A GeoJSON point, coordinates in `[longitude, latitude]` order.
///
/// The length of `coordinates` is not checked. Missing or `null`
/// coordinates decode as an empty list.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Point {
    #[serde(rename = "type", default = "point_type")]
    pub kind: String,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    #[schemars(with = "Vec<f64>")]
    pub coordinates: Vec<f64>,
}

impl Default for Point {
    fn default() -> Self {
        Self {
            kind: point_type(),
            coordinates: vec![],
        }
    }
}

impl Point {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            kind: point_type(),
            coordinates: vec![longitude, latitude],
        }
    }

    pub fn longitude(&self) -> Option<f64> {
        self.coordinates.first().copied()
    }

    pub fn latitude(&self) -> Option<f64> {
        self.coordinates.get(1).copied()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::WithId;

    #[test]
    fn decodes_create_payload_without_type() {
        let location: Location = serde_json::from_value(json!({
            "nama": "Taman",
            "kategori": "Park",
            "deskripsi": "x",
            "koordinat": { "coordinates": [106.8, -6.2] }
        }))
        .unwrap();

        assert_eq!(location.name, "Taman");
        assert_eq!(location.coordinate.kind, POINT);
        assert_eq!(location.coordinate.longitude(), Some(106.8));
        assert_eq!(location.coordinate.latitude(), Some(-6.2));
    }

    #[test]
    fn text_fields_default_to_empty() {
        let location: Location = serde_json::from_value(json!({
            "koordinat": { "type": "Point", "coordinates": [] }
        }))
        .unwrap();

        assert_eq!(location.name, "");
        assert_eq!(location.category, "");
        assert_eq!(location.description, "");
        assert_eq!(location.coordinate.longitude(), None);
    }

    #[test]
    fn missing_or_null_coordinates_decode_as_empty_point() {
        let payloads = [
            json!({ "nama": "no coordinate" }),
            json!({ "nama": "no coordinate", "koordinat": null }),
            json!({ "koordinat": { "type": "Point" } }),
            json!({ "koordinat": { "coordinates": null } }),
        ];
        for payload in payloads {
            let location: Location = serde_json::from_value(payload.clone()).unwrap();
            assert_eq!(location.coordinate, Point::default(), "{payload}");
        }
    }

    #[test]
    fn null_text_fields_decode_as_empty() {
        let location: Location = serde_json::from_value(json!({
            "nama": null,
            "kategori": "Park",
            "deskripsi": null,
            "koordinat": { "coordinates": [1.0, 2.0] }
        }))
        .unwrap();

        assert_eq!(location.name, "");
        assert_eq!(location.category, "Park");
        assert_eq!(location.description, "");
    }

    #[test]
    fn rejects_wrongly_typed_payloads() {
        let payloads = [
            json!({ "koordinat": { "coordinates": ["106.8", "-6.2"] } }),
            json!({ "koordinat": { "coordinates": "106.8,-6.2" } }),
            json!({ "nama": 42, "koordinat": { "coordinates": [1.0, 2.0] } }),
            json!([1, 2, 3]),
        ];
        for payload in payloads {
            assert!(
                serde_json::from_value::<Location>(payload.clone()).is_err(),
                "{payload}"
            );
        }
    }

    #[test]
    fn normalized_forces_point() {
        let mut location = Location::example_data();
        location.coordinate.kind = "Polygon".to_owned();

        assert_eq!(location.normalized().coordinate.kind, POINT);
    }

    #[test]
    fn client_supplied_id_is_ignored_on_decode() {
        let location: Location = serde_json::from_value(json!({
            "_id": "65a1f0c2b3d4e5f607182930",
            "koordinat": { "coordinates": [1.0, 2.0] }
        }))
        .unwrap();

        assert_eq!(location.coordinate.coordinates, vec![1.0, 2.0]);
    }

    #[test]
    fn serializes_record_shape() {
        let location = WithId::new(
            Location::parse_id("65a1f0c2b3d4e5f607182930").unwrap(),
            Location {
                name: "Taman".to_owned(),
                category: "Park".to_owned(),
                description: "x".to_owned(),
                coordinate: Point::new(106.8, -6.2),
            },
        );

        assert_eq!(
            serde_json::to_value(&location).unwrap(),
            json!({
                "_id": "65a1f0c2b3d4e5f607182930",
                "nama": "Taman",
                "kategori": "Park",
                "deskripsi": "x",
                "koordinat": { "type": "Point", "coordinates": [106.8, -6.2] }
            })
        );
    }

    #[test]
    fn parse_id_rejects_non_hex() {
        assert!(Location::parse_id("zzzzzzzzzzzzzzzzzzzzzzzz").is_none());
        assert!(Location::parse_id("123").is_none());
    }
}
