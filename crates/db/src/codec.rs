//! JSON encoding of document fields.
//!
//! Scalars map to their JSON counterparts. Two tagged objects carry time
//! values:
//!
//! ```text
//! {"$timestamp": {"seconds": 1760000000, "nanos": 0}}   native store timestamp
//! {"$date": "2026-10-17T12:00:00Z"}                      date
//! ```
//!
//! Arrays and other objects have no field representation and are skipped.

use chrono::{DateTime, Utc};
use painel_core::store::{Collection, Document, FieldValue, StoreError, StoreTimestamp};
use serde_json::{Map, Value, json};
use tracing::debug;

const TIMESTAMP_TAG: &str = "$timestamp";
const DATE_TAG: &str = "$date";

/// Decodes a stored JSON object into a document.
///
/// # Errors
///
/// Returns `StoreError::Malformed` if `data` is not a JSON object.
pub fn decode_document(
    collection: Collection,
    key: &str,
    data: &Value,
) -> Result<Document, StoreError> {
    let Value::Object(object) = data else {
        return Err(StoreError::malformed(
            collection,
            key,
            "document data is not a JSON object",
        ));
    };

    let mut document = Document::new(key);
    for (name, value) in object {
        match decode_field(value) {
            Some(field) => {
                document.fields.insert(name.clone(), field);
            }
            None => debug!(%collection, key, field = %name, "Skipping unsupported field"),
        }
    }

    Ok(document)
}

/// Decodes one JSON value, or `None` if it has no field representation.
#[must_use]
pub fn decode_field(value: &Value) -> Option<FieldValue> {
    match value {
        Value::Null => Some(FieldValue::Null),
        Value::Bool(b) => Some(FieldValue::Bool(*b)),
        Value::Number(n) => n
            .as_i64()
            .map(FieldValue::Integer)
            .or_else(|| n.as_f64().map(FieldValue::Float)),
        Value::String(s) => Some(FieldValue::Text(s.clone())),
        Value::Object(object) => decode_tagged(object),
        Value::Array(_) => None,
    }
}

fn decode_tagged(object: &Map<String, Value>) -> Option<FieldValue> {
    if object.len() != 1 {
        return None;
    }

    if let Some(ts) = object.get(TIMESTAMP_TAG) {
        let seconds = ts.get("seconds")?.as_i64()?;
        let nanos = ts
            .get("nanos")
            .map_or(Some(0), Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())?;
        return Some(FieldValue::Timestamp(StoreTimestamp { seconds, nanos }));
    }

    if let Some(date) = object.get(DATE_TAG) {
        let parsed = DateTime::parse_from_rfc3339(date.as_str()?).ok()?;
        return Some(FieldValue::Date(parsed.with_timezone(&Utc)));
    }

    None
}

/// Encodes a field value as JSON.
#[must_use]
pub fn encode_field(value: &FieldValue) -> Value {
    match value {
        FieldValue::Null => Value::Null,
        FieldValue::Bool(b) => Value::Bool(*b),
        FieldValue::Integer(i) => json!(i),
        FieldValue::Float(f) => json!(f),
        FieldValue::Text(s) => Value::String(s.clone()),
        FieldValue::Timestamp(ts) => json!({
            TIMESTAMP_TAG: { "seconds": ts.seconds, "nanos": ts.nanos }
        }),
        FieldValue::Date(date) => json!({ DATE_TAG: date.to_rfc3339() }),
    }
}

/// Encodes a document's fields as a JSON object.
#[must_use]
pub fn encode_document(document: &Document) -> Value {
    Value::Object(
        document
            .fields
            .iter()
            .map(|(name, value)| (name.clone(), encode_field(value)))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_decode_scalars() {
        let data = json!({
            "nome": "Ana",
            "ativo": true,
            "idade": 31,
            "nota": 4.5,
            "apelido": null,
        });

        let doc = decode_document(Collection::Funcionarios, "e1", &data).unwrap();

        assert_eq!(doc.key, "e1");
        assert_eq!(doc.text("nome"), Some("Ana"));
        assert_eq!(doc.get("ativo"), Some(&FieldValue::Bool(true)));
        assert_eq!(doc.get("idade"), Some(&FieldValue::Integer(31)));
        assert!(matches!(doc.get("nota"), Some(FieldValue::Float(_))));
        assert_eq!(doc.fields.get("apelido"), Some(&FieldValue::Null));
    }

    #[test]
    fn test_decode_tagged_time_values() {
        let data = json!({
            "dataCriacao": { "$timestamp": { "seconds": 1_760_000_000, "nanos": 5 } },
            "dataInicio": { "$date": "2026-10-20T00:00:00-03:00" },
        });

        let doc = decode_document(Collection::Folgas, "f1", &data).unwrap();

        assert_eq!(
            doc.get("dataCriacao"),
            Some(&FieldValue::Timestamp(StoreTimestamp {
                seconds: 1_760_000_000,
                nanos: 5,
            }))
        );
        assert_eq!(
            doc.get("dataInicio"),
            Some(&FieldValue::Date(
                Utc.with_ymd_and_hms(2026, 10, 20, 3, 0, 0).unwrap()
            ))
        );
    }

    #[test]
    fn test_unsupported_fields_are_skipped() {
        let data = json!({
            "tags": ["a", "b"],
            "endereco": { "rua": "A" },
            "quando": { "$date": "not a date" },
            "nome": "Porto",
        });

        let doc = decode_document(Collection::Cidades, "c1", &data).unwrap();

        assert_eq!(doc.fields.len(), 1);
        assert_eq!(doc.text("nome"), Some("Porto"));
    }

    #[test]
    fn test_non_object_is_malformed() {
        let err = decode_document(Collection::Rotas, "r1", &json!([1, 2])).unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
    }

    #[test]
    fn test_encoded_documents_decode_back() {
        let at = Utc.with_ymd_and_hms(2026, 10, 17, 8, 0, 0).unwrap();
        let doc = Document::new("v1")
            .with("placa", "ABC1D23")
            .with("dataCriacao", StoreTimestamp::from_date(at))
            .with("dataCadastro", at)
            .with("eixos", 3_i64);

        let decoded =
            decode_document(Collection::Veiculos, "v1", &encode_document(&doc)).unwrap();

        assert_eq!(decoded, doc);
    }
}
