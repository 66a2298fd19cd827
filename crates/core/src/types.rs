use serde::Deserialize;

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (premieres, release dates) carry no time zone.
pub type Date = chrono::NaiveDate;

/// An id as it may arrive from a client: a JSON string or a JSON number.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl RawId {
    fn parse(self) -> Result<DbId, String> {
        match self {
            RawId::Number(n) => Ok(n),
            RawId::Text(s) => s
                .trim()
                .parse::<DbId>()
                .map_err(|_| format!("invalid id '{s}'")),
        }
    }
}

/// Serialize a [`DbId`] as a JSON string; accept a string or a number on input.
///
/// BIGSERIAL values exceed the 2^53 range JavaScript numbers represent exactly,
/// so ids always leave the API as strings.
///
/// ```ignore
/// #[serde(with = "footlights_core::types::id_string")]
/// pub id: DbId,
/// ```
pub mod id_string {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::{DbId, RawId};

    pub fn serialize<S: Serializer>(id: &DbId, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(id)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DbId, D::Error> {
        RawId::deserialize(deserializer)?
            .parse()
            .map_err(de::Error::custom)
    }
}

/// [`id_string`] for optional ids. Pair with `#[serde(default)]` on input types.
pub mod option_id_string {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::{DbId, RawId};

    pub fn serialize<S: Serializer>(id: &Option<DbId>, serializer: S) -> Result<S::Ok, S::Error> {
        match id {
            Some(id) => serializer.collect_str(id),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DbId>, D::Error> {
        Option::<RawId>::deserialize(deserializer)?
            .map(RawId::parse)
            .transpose()
            .map_err(de::Error::custom)
    }
}

/// [`id_string`] for id lists (reorder payloads).
pub mod id_list_string {
    use serde::ser::SerializeSeq;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::{DbId, RawId};

    pub fn serialize<S: Serializer>(ids: &[DbId], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(ids.len()))?;
        for id in ids {
            seq.serialize_element(&id.to_string())?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<DbId>, D::Error> {
        Vec::<RawId>::deserialize(deserializer)?
            .into_iter()
            .map(RawId::parse)
            .collect::<Result<Vec<_>, _>>()
            .map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Sample {
        #[serde(with = "id_string")]
        id: DbId,
        #[serde(default, with = "option_id_string")]
        parent_id: Option<DbId>,
        #[serde(default, with = "id_list_string")]
        ids: Vec<DbId>,
    }

    #[test]
    fn ids_serialize_as_strings() {
        let sample = Sample {
            id: 9_007_199_254_740_993,
            parent_id: Some(7),
            ids: vec![3, 1],
        };
        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(json["id"], "9007199254740993");
        assert_eq!(json["parent_id"], "7");
        assert_eq!(json["ids"], serde_json::json!(["3", "1"]));
    }

    #[test]
    fn ids_accept_strings_and_numbers() {
        let sample: Sample =
            serde_json::from_str(r#"{"id": "12", "parent_id": 4, "ids": ["1", 2]}"#).unwrap();
        assert_eq!(sample.id, 12);
        assert_eq!(sample.parent_id, Some(4));
        assert_eq!(sample.ids, vec![1, 2]);
    }

    #[test]
    fn missing_optional_id_is_none() {
        let sample: Sample = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(sample.parent_id, None);
        assert!(sample.ids.is_empty());

        let json = serde_json::to_value(&sample).unwrap();
        assert!(json["parent_id"].is_null());
    }

    #[test]
    fn malformed_id_is_rejected() {
        let result: Result<Sample, _> = serde_json::from_str(r#"{"id": "abc"}"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("invalid id 'abc'"), "unexpected error: {err}");
    }
}
