use std::{borrow::Cow, fmt, hash, marker::PhantomData};

use schemars::{
    gen::SchemaGenerator,
    schema::{InstanceType, Schema, SchemaObject, StringValidation},
    JsonSchema,
};
use serde::{Deserialize, Serialize};

/// Number of hex digits in the textual form of a document store object id.
pub const OBJECT_ID_HEX_LEN: usize = 24;

pub trait HasId {
    type IdType;
}

pub struct Id<T: HasId>(T::IdType, PhantomData<T>);

impl<T: HasId> Id<T> {
    pub fn new(inner: T::IdType) -> Self {
        Self(inner, PhantomData)
    }
}

impl<T: HasId> Id<T>
where
    T::IdType: Clone,
{
    pub fn raw(&self) -> T::IdType {
        self.0.clone()
    }

    pub fn raw_ref<'a, R>(&'a self) -> &'a R
    where
        T::IdType: AsRef<R>,
        R: ?Sized,
    {
        self.0.as_ref()
    }
}

impl<T: HasId> Id<T>
where
    T::IdType: From<String>,
{
    /// Parses the hexadecimal form of an object id (12 bytes, 24 hex digits).
    /// Upper case digits are accepted and normalized to lower case.
    pub fn from_object_id_hex(raw: &str) -> Option<Self> {
        if raw.len() != OBJECT_ID_HEX_LEN
            || !raw.chars().all(|c| c.is_ascii_hexdigit())
        {
            return None;
        }
        Some(Self::new(raw.to_ascii_lowercase().into()))
    }
}

impl<T: HasId> fmt::Debug for Id<T>
where
    T::IdType: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Id").field(&self.0).finish()
    }
}

impl<T: HasId> fmt::Display for Id<T>
where
    T::IdType: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<T: HasId> Clone for Id<T>
where
    T::IdType: Clone,
{
    fn clone(&self) -> Self {
        Self(self.0.clone(), PhantomData)
    }
}

impl<T: HasId> hash::Hash for Id<T>
where
    T::IdType: hash::Hash,
{
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

impl<T: HasId> PartialEq for Id<T>
where
    T::IdType: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl<T: HasId> Eq for Id<T> where T::IdType: Eq {}

impl<'de, T: HasId> Deserialize<'de> for Id<T>
where
    T::IdType: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        T::IdType::deserialize(deserializer).map(|id| Id::new(id))
    }
}

impl<T: HasId> Serialize for Id<T>
where
    T::IdType: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T: HasId + JsonSchema> JsonSchema for Id<T>
where
    T::IdType: Serialize,
{
    fn schema_name() -> String {
        // Exclude the module path to make the name in generated schemas clearer.
        format!("{}Id", T::schema_name())
    }

    fn schema_id() -> Cow<'static, str> {
        Cow::Borrowed(concat!(module_path!(), "::Id"))
    }

    fn json_schema(_gen: &mut SchemaGenerator) -> Schema {
        SchemaObject {
            instance_type: Some(InstanceType::String.into()),
            string: Some(Box::new(StringValidation {
                max_length: Some(OBJECT_ID_HEX_LEN as u32),
                min_length: Some(OBJECT_ID_HEX_LEN as u32),
                pattern: Some("^[0-9a-fA-F]{24}$".to_owned()),
            })),
            ..Default::default()
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Thing;

    impl HasId for Thing {
        type IdType = String;
    }

    #[test]
    fn parses_object_id_hex() {
        let id = Id::<Thing>::from_object_id_hex("65a1f0c2b3d4e5f607182930").unwrap();
        assert_eq!(id.raw(), "65a1f0c2b3d4e5f607182930");
    }

    #[test]
    fn normalizes_upper_case_hex() {
        let id = Id::<Thing>::from_object_id_hex("65A1F0C2B3D4E5F607182930").unwrap();
        assert_eq!(id.raw_ref::<str>(), "65a1f0c2b3d4e5f607182930");
    }

    #[test]
    fn rejects_malformed_object_ids() {
        for raw in [
            "",
            "abc",
            "65a1f0c2b3d4e5f60718293",
            "65a1f0c2b3d4e5f6071829300",
            "65a1f0c2b3d4e5f60718293g",
            "not-an-object-id-at-all!",
        ] {
            assert!(Id::<Thing>::from_object_id_hex(raw).is_none(), "{raw}");
        }
    }

    #[test]
    fn serializes_transparently() {
        let id = Id::<Thing>::new("65a1f0c2b3d4e5f607182930".to_owned());
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            "\"65a1f0c2b3d4e5f607182930\""
        );
    }
}
