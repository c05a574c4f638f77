// unknown.rs — Records whose "type" tag this client cannot interpret.
//
// The server (or a caller replaying stored records) may hand us variants we
// have no mapping for. Instead of failing at decode time we keep the tag and
// the remaining fields; the translation step decides whether that is fatal.

use serde::{de, ser, Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Name of the discriminator field shared by all tagged records.
pub const TYPE_FIELD: &str = "type";

/// A tagged record with an unrecognized `"type"`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownItem {
    /// The `"type"` tag as sent on the wire (e.g. `"EdgeDiffItem"`).
    pub kind: String,

    /// Every other field of the record, untouched.
    pub fields: Map<String, Value>,
}

impl UnknownItem {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: Map::new(),
        }
    }

    /// Attach a field and return self.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

impl Serialize for UnknownItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut fields = self.fields.clone();
        fields.insert(TYPE_FIELD.to_string(), Value::String(self.kind.clone()));
        fields.serialize(serializer)
    }
}

/// Read a JSON object and split off its `"type"` tag.
pub(crate) fn read_tagged<'de, D>(deserializer: D) -> Result<(String, Map<String, Value>), D::Error>
where
    D: serde::Deserializer<'de>,
{
    let mut fields = Map::<String, Value>::deserialize(deserializer)?;
    match fields.remove(TYPE_FIELD) {
        Some(Value::String(kind)) => Ok((kind, fields)),
        Some(other) => Err(de::Error::custom(format!(
            "expected string \"type\" tag, found {}",
            other
        ))),
        None => Err(de::Error::missing_field(TYPE_FIELD)),
    }
}

/// Decode the fields of a known variant.
pub(crate) fn decode_fields<T, E>(fields: Map<String, Value>) -> Result<T, E>
where
    T: serde::de::DeserializeOwned,
    E: de::Error,
{
    serde_json::from_value(Value::Object(fields)).map_err(E::custom)
}

/// Serialize `value` as an object and add the `"type"` tag.
pub(crate) fn write_tagged<T, S>(kind: &str, value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    let mut fields = match serde_json::to_value(value).map_err(ser::Error::custom)? {
        Value::Object(fields) => fields,
        other => {
            return Err(ser::Error::custom(format!(
                "expected object, found {}",
                other
            )))
        }
    };
    fields.insert(TYPE_FIELD.to_string(), Value::String(kind.to_string()));
    fields.serialize(serializer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let item = UnknownItem::new("EdgeDiffItem").with_field("edgeId", "e-1");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "EdgeDiffItem");
        assert_eq!(json["edgeId"], "e-1");
    }
}
