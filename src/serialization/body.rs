use serde::Serialize;
use serde_json::Value;

use super::{ParamValue, Style, delimited_pairs};
use crate::error::CoinApiError;
use crate::http::{HttpBody, MultipartPart};

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// A request body together with its declared media type.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Declared media type, e.g. `application/json`.
    pub media_type: String,
    /// The body value.
    pub content: BodyContent,
}

/// Body value before media-type dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyContent {
    /// A structured value marshalled as JSON, or a map for url-encoded forms.
    Json(Value),
    /// Tagged form or multipart fields.
    Fields(Vec<FormField>),
    /// Raw bytes sent unchanged.
    Bytes(Vec<u8>),
    /// Raw text sent unchanged.
    Text(String),
}

impl Body {
    /// A JSON body built from any serializable value.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, CoinApiError> {
        Ok(Self {
            media_type: "application/json".to_string(),
            content: BodyContent::Json(serde_json::to_value(value)?),
        })
    }

    /// A raw byte body.
    pub fn bytes(media_type: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            media_type: media_type.into(),
            content: BodyContent::Bytes(content.into()),
        }
    }

    /// A raw text body.
    pub fn text(media_type: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            media_type: media_type.into(),
            content: BodyContent::Text(content.into()),
        }
    }

    /// A `multipart/form-data` body.
    pub fn multipart(fields: Vec<FormField>) -> Self {
        Self {
            media_type: MULTIPART_FORM_DATA.to_string(),
            content: BodyContent::Fields(fields),
        }
    }

    /// An `application/x-www-form-urlencoded` body.
    pub fn form(fields: Vec<FormField>) -> Self {
        Self {
            media_type: FORM_URLENCODED.to_string(),
            content: BodyContent::Fields(fields),
        }
    }
}

/// A tagged field of a form or multipart body.
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    /// Wire name.
    pub name: String,
    /// How the field is encoded.
    pub part: FormPart,
}

/// Encoding of one form field.
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    /// A file upload (multipart only).
    File(FileUpload),
    /// A value encoded inline as JSON.
    Json(Value),
    /// A regular value.
    Value {
        /// The value.
        value: ParamValue,
        /// Serialization style; url-encoded forms accept only `Form`.
        style: Style,
        /// Whether lists and records are split into separate entries.
        explode: bool,
    },
}

/// File name and content of a multipart file field.
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    /// File name sent with the part.
    pub file_name: Option<String>,
    /// File content.
    pub content: Option<Vec<u8>>,
}

impl FileUpload {
    /// A complete upload.
    pub fn new(file_name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: Some(file_name.into()),
            content: Some(content.into()),
        }
    }
}

impl FormField {
    /// A file field.
    pub fn file(name: impl Into<String>, upload: FileUpload) -> Self {
        Self {
            name: name.into(),
            part: FormPart::File(upload),
        }
    }

    /// A field encoded as JSON.
    pub fn json<T: Serialize>(name: impl Into<String>, value: &T) -> Result<Self, CoinApiError> {
        Ok(Self {
            name: name.into(),
            part: FormPart::Json(serde_json::to_value(value)?),
        })
    }

    /// A regular exploded `form` field.
    pub fn value(name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        Self {
            name: name.into(),
            part: FormPart::Value {
                value: value.into(),
                style: Style::Form,
                explode: true,
            },
        }
    }

    /// Set the explode flag of a regular field.
    pub fn explode(mut self, flag: bool) -> Self {
        if let FormPart::Value { explode, .. } = &mut self.part {
            *explode = flag;
        }
        self
    }

    /// Set the style of a regular field.
    pub fn style(mut self, new_style: Style) -> Self {
        if let FormPart::Value { style, .. } = &mut self.part {
            *style = new_style;
        }
        self
    }
}

/// A body ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct SerializedBody {
    /// Media type to announce in `Content-Type`.
    pub media_type: String,
    /// Encoded body.
    pub body: HttpBody,
}

/// Encode a body according to its media type.
///
/// JSON media types (`application/...json`, `text/...json`) marshal the value,
/// `multipart/*` and url-encoded forms assemble their fields, and anything
/// else only accepts raw bytes or text.
pub fn serialize_request_body(body: &Body) -> Result<SerializedBody, CoinApiError> {
    let media_type = body.media_type.to_ascii_lowercase();

    if is_json_media_type(&media_type) {
        let encoded = match &body.content {
            BodyContent::Json(value) => serde_json::to_vec(value)?,
            BodyContent::Text(text) => serde_json::to_vec(text)?,
            _ => return Err(invalid_body(body, "expected a JSON value")),
        };
        return Ok(SerializedBody {
            media_type: body.media_type.clone(),
            body: HttpBody::Bytes(encoded),
        });
    }

    if media_type.starts_with("multipart/") {
        let BodyContent::Fields(fields) = &body.content else {
            return Err(invalid_body(body, "multipart bodies require form fields"));
        };
        return Ok(SerializedBody {
            media_type: MULTIPART_FORM_DATA.to_string(),
            body: HttpBody::Multipart(multipart_parts(fields)?),
        });
    }

    if media_type.starts_with(FORM_URLENCODED) {
        let pairs = match &body.content {
            BodyContent::Fields(fields) => form_pairs(fields)?,
            BodyContent::Json(Value::Object(map)) => map
                .iter()
                .map(|(key, value)| (key.clone(), json_to_string(value)))
                .collect(),
            _ => return Err(invalid_body(body, "expected form fields or a map")),
        };
        return Ok(SerializedBody {
            media_type: body.media_type.clone(),
            body: HttpBody::Form(pairs),
        });
    }

    let raw = match &body.content {
        BodyContent::Bytes(bytes) => bytes.clone(),
        BodyContent::Text(text) => text.clone().into_bytes(),
        _ => return Err(invalid_body(body, "expected raw bytes or text")),
    };
    Ok(SerializedBody {
        media_type: body.media_type.clone(),
        body: HttpBody::Bytes(raw),
    })
}

fn is_json_media_type(media_type: &str) -> bool {
    match media_type.split_once('/') {
        Some((top, rest)) => (top == "application" || top == "text") && rest.contains("json"),
        None => false,
    }
}

fn invalid_body(body: &Body, reason: &str) -> CoinApiError {
    CoinApiError::InvalidRequestBody {
        media_type: body.media_type.clone(),
        reason: reason.to_string(),
    }
}

fn json_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn multipart_parts(fields: &[FormField]) -> Result<Vec<MultipartPart>, CoinApiError> {
    let mut parts = Vec::new();

    for field in fields {
        match &field.part {
            FormPart::File(upload) => {
                let (Some(file_name), Some(content)) = (&upload.file_name, &upload.content) else {
                    return Err(CoinApiError::InvalidMultipartFile {
                        field: field.name.clone(),
                    });
                };
                if file_name.is_empty() || content.is_empty() {
                    return Err(CoinApiError::InvalidMultipartFile {
                        field: field.name.clone(),
                    });
                }
                parts.push(MultipartPart {
                    name: field.name.clone(),
                    file_name: Some(file_name.clone()),
                    content_type: None,
                    data: content.clone(),
                });
            }
            FormPart::Json(value) => parts.push(MultipartPart {
                name: field.name.clone(),
                file_name: None,
                content_type: Some("application/json".to_string()),
                data: serde_json::to_vec(value)?,
            }),
            FormPart::Value { value, .. } => match value {
                ParamValue::Scalar(scalar) => {
                    parts.push(MultipartPart::text(field.name.clone(), scalar.stringify()))
                }
                ParamValue::List(values) => {
                    let name = format!("{}[]", field.name);
                    parts.extend(
                        values
                            .iter()
                            .map(|v| MultipartPart::text(name.clone(), v.stringify())),
                    );
                }
                ParamValue::Record(_) => {
                    return Err(CoinApiError::UnsupportedParameter {
                        field: field.name.clone(),
                        reason: "record values cannot be sent as multipart fields".to_string(),
                    });
                }
            },
        }
    }

    Ok(parts)
}

fn form_pairs(fields: &[FormField]) -> Result<Vec<(String, String)>, CoinApiError> {
    let mut pairs = Vec::new();

    for field in fields {
        match &field.part {
            FormPart::Json(value) => pairs.push((field.name.clone(), value.to_string())),
            FormPart::Value {
                value,
                style: Style::Form,
                explode,
            } => pairs.extend(delimited_pairs(&field.name, value, ",", *explode)),
            FormPart::Value { style, .. } => {
                return Err(CoinApiError::UnsupportedStyle {
                    field: field.name.clone(),
                    style: *style,
                });
            }
            FormPart::File(_) => {
                return Err(CoinApiError::InvalidRequestBody {
                    media_type: FORM_URLENCODED.to_string(),
                    reason: format!("file field `{}` requires multipart/form-data", field.name),
                });
            }
        }
    }

    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_json_media_types() {
        assert!(is_json_media_type("application/json"));
        assert!(is_json_media_type("application/vnd.api+json"));
        assert!(is_json_media_type("text/json; charset=utf-8"));
        assert!(!is_json_media_type("application/x-msgpack"));
        assert!(!is_json_media_type("json"));
    }

    #[test]
    fn test_json_body() {
        let body = Body::json(&json!({"index_id": "IDX", "visibility_public": true})).unwrap();
        let serialized = serialize_request_body(&body).unwrap();
        assert_eq!(serialized.media_type, "application/json");
        let HttpBody::Bytes(bytes) = serialized.body else {
            panic!("expected bytes");
        };
        let decoded: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(decoded["index_id"], "IDX");
    }

    #[test]
    fn test_raw_msgpack_body_passes_through() {
        let body = Body::bytes("application/x-msgpack", vec![0x81, 0xa1, 0x61, 0x01]);
        let serialized = serialize_request_body(&body).unwrap();
        assert_eq!(serialized.body, HttpBody::Bytes(vec![0x81, 0xa1, 0x61, 0x01]));
    }

    #[test]
    fn test_unknown_media_type_rejects_structured_values() {
        let body = Body {
            media_type: "application/xml".to_string(),
            content: BodyContent::Json(json!({"a": 1})),
        };
        assert!(matches!(
            serialize_request_body(&body),
            Err(CoinApiError::InvalidRequestBody { .. })
        ));
    }

    #[test]
    fn test_form_body() {
        let body = Body::form(vec![
            FormField::value("ids", ParamValue::list(["a", "b"])).explode(false),
            FormField::value("public", true),
            FormField::json("meta", &json!({"k": "v"})).unwrap(),
        ]);
        let serialized = serialize_request_body(&body).unwrap();
        assert_eq!(
            serialized.body,
            HttpBody::Form(vec![
                ("ids".to_string(), "a,b".to_string()),
                ("public".to_string(), "true".to_string()),
                ("meta".to_string(), r#"{"k":"v"}"#.to_string()),
            ])
        );
    }

    #[test]
    fn test_form_body_from_map() {
        let body = Body {
            media_type: FORM_URLENCODED.to_string(),
            content: BodyContent::Json(json!({"name": "idx", "count": 3})),
        };
        let HttpBody::Form(mut pairs) = serialize_request_body(&body).unwrap().body else {
            panic!("expected form pairs");
        };
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("count".to_string(), "3".to_string()),
                ("name".to_string(), "idx".to_string()),
            ]
        );
    }

    #[test]
    fn test_form_body_rejects_other_styles() {
        let body = Body::form(vec![FormField::value("ids", "a").style(Style::DeepObject)]);
        assert!(matches!(
            serialize_request_body(&body),
            Err(CoinApiError::UnsupportedStyle { .. })
        ));
    }

    #[test]
    fn test_multipart_body() {
        let body = Body::multipart(vec![
            FormField::file("file", FileUpload::new("data.csv", b"a,b".to_vec())),
            FormField::json("meta", &json!({"k": 1})).unwrap(),
            FormField::value("tags", ParamValue::list(["x", "y"])),
            FormField::value("name", "idx"),
        ]);
        let serialized = serialize_request_body(&body).unwrap();
        assert_eq!(serialized.media_type, "multipart/form-data");
        let HttpBody::Multipart(parts) = serialized.body else {
            panic!("expected multipart");
        };
        let names: Vec<_> = parts.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["file", "meta", "tags[]", "tags[]", "name"]);
        assert_eq!(parts[0].file_name.as_deref(), Some("data.csv"));
        assert_eq!(parts[1].content_type.as_deref(), Some("application/json"));
        assert_eq!(parts[3].data, b"y".to_vec());
    }

    #[test]
    fn test_multipart_file_requires_name_and_content() {
        let missing_content = Body::multipart(vec![FormField::file(
            "file",
            FileUpload {
                file_name: Some("data.csv".to_string()),
                content: None,
            },
        )]);
        assert!(matches!(
            serialize_request_body(&missing_content),
            Err(CoinApiError::InvalidMultipartFile { .. })
        ));

        let empty_name =
            Body::multipart(vec![FormField::file("file", FileUpload::new("", vec![1]))]);
        assert!(matches!(
            serialize_request_body(&empty_name),
            Err(CoinApiError::InvalidMultipartFile { .. })
        ));

        let empty_content =
            Body::multipart(vec![FormField::file("file", FileUpload::new("data.csv", Vec::new()))]);
        assert!(matches!(
            serialize_request_body(&empty_content),
            Err(CoinApiError::InvalidMultipartFile { ref field }) if field == "file"
        ));
    }
}
