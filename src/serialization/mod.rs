//! Parameter serialization engine.
//!
//! Every request field is described by a [`Field`]: where the value goes
//! ([`Location`]), how it is laid out ([`Style`] plus the explode flag) and the
//! value itself as a closed [`ParamValue`] sum type. The submodules turn a
//! list of fields into URL paths, query strings, headers and request bodies.

mod body;
mod header;
mod path;
mod query;

pub use body::{
    Body, BodyContent, FileUpload, FormField, FormPart, SerializedBody, serialize_request_body,
};
pub use header::get_headers;
pub use path::generate_url;
pub use query::get_query_params;

use rust_decimal::Decimal;
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// A single, non-composite parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Plain string.
    String(String),
    /// Integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Exact decimal.
    Decimal(Decimal),
    /// Boolean, rendered lowercase.
    Bool(bool),
    /// Timestamp, rendered as RFC 3339 with a `Z` suffix for UTC.
    DateTime(OffsetDateTime),
    /// Enumeration member, rendered as its underlying value.
    Enum(String),
}

impl Scalar {
    /// Wrap an enumeration's underlying value.
    pub fn enumeration(value: impl Into<String>) -> Self {
        Self::Enum(value.into())
    }

    /// Convert to the wire string form.
    ///
    /// This single rule is applied to path, query, header and form values alike.
    pub fn stringify(&self) -> String {
        match self {
            Self::String(s) | Self::Enum(s) => s.clone(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Decimal(d) => d.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::DateTime(dt) => format_datetime(dt),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Self::String(s) | Self::Enum(s) => Value::String(s.clone()),
            Self::Int(i) => Value::from(*i),
            Self::Float(f) => Value::from(*f),
            Self::Decimal(d) => Value::String(d.to_string()),
            Self::Bool(b) => Value::Bool(*b),
            Self::DateTime(dt) => Value::String(format_datetime(dt)),
        }
    }
}

fn format_datetime(dt: &OffsetDateTime) -> String {
    // Years outside 0000-9999 have no RFC 3339 form.
    let formatted = dt.format(&Rfc3339).unwrap_or_else(|_| dt.to_string());
    formatted.replace("+00:00", "Z")
}

/// A record member: one value or several values under the same key.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    /// Single value.
    One(Scalar),
    /// Multiple values.
    Many(Vec<Scalar>),
}

impl Member {
    fn stringify(&self) -> String {
        match self {
            Self::One(value) => value.stringify(),
            Self::Many(values) => join(values, ","),
        }
    }

    fn values(&self) -> Vec<String> {
        match self {
            Self::One(value) => vec![value.stringify()],
            Self::Many(values) => values.iter().map(Scalar::stringify).collect(),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Self::One(value) => value.to_json(),
            Self::Many(values) => Value::Array(values.iter().map(Scalar::to_json).collect()),
        }
    }
}

impl From<Scalar> for Member {
    fn from(value: Scalar) -> Self {
        Self::One(value)
    }
}

impl From<Vec<Scalar>> for Member {
    fn from(values: Vec<Scalar>) -> Self {
        Self::Many(values)
    }
}

/// Runtime value of a request field.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// A single value.
    Scalar(Scalar),
    /// An ordered list of values.
    List(Vec<Scalar>),
    /// Ordered key/value pairs (a struct or a map).
    Record(Vec<(String, Member)>),
}

impl ParamValue {
    /// Build a list value.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Scalar>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a record value with single-valued members.
    pub fn record<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Scalar>,
    {
        Self::Record(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), Member::One(v.into())))
                .collect(),
        )
    }

    /// Encode the whole value as JSON.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Scalar(value) => value.to_json(),
            Self::List(values) => Value::Array(values.iter().map(Scalar::to_json).collect()),
            Self::Record(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, member)| (k.clone(), member.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<Scalar> for ParamValue {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

macro_rules! scalar_conversions {
    ($($ty:ty => |$v:ident| $body:expr),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from($v: $ty) -> Self {
                    $body
                }
            }

            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    Self::Scalar(Scalar::from(value))
                }
            }
        )*
    };
}

scalar_conversions! {
    &str => |v| Scalar::String(v.to_string()),
    String => |v| Scalar::String(v),
    bool => |v| Scalar::Bool(v),
    i32 => |v| Scalar::Int(i64::from(v)),
    i64 => |v| Scalar::Int(v),
    u32 => |v| Scalar::Int(i64::from(v)),
    f64 => |v| Scalar::Float(v),
    Decimal => |v| Scalar::Decimal(v),
    OffsetDateTime => |v| Scalar::DateTime(v),
}

/// Serialization style of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Comma-separated values; the only style for path and header fields.
    Simple,
    /// `key=value` entries, comma-joined when not exploded.
    Form,
    /// `key[subkey]=value` entries for record values.
    DeepObject,
    /// Like `Form` but joined with `|`.
    PipeDelimited,
}

/// Where a field is placed in the outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Substituted into a `{name}` placeholder of the path template.
    Path,
    /// Appended to the query string.
    Query,
    /// Sent as a request header.
    Header,
}

/// A tagged request field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Wire name of the field.
    pub name: &'static str,
    /// Placement in the request.
    pub location: Location,
    /// Serialization style.
    pub style: Style,
    /// Whether multi-valued content is split into separate entries.
    pub explode: bool,
    /// Serialize the whole value as JSON, bypassing style rules.
    pub json: bool,
    /// The value; `None` fields are skipped.
    pub value: Option<ParamValue>,
}

impl Field {
    /// A path parameter with the `simple` style.
    pub fn path(name: &'static str, value: impl Into<ParamValue>) -> Self {
        Self {
            name,
            location: Location::Path,
            style: Style::Simple,
            explode: false,
            json: false,
            value: Some(value.into()),
        }
    }

    /// An exploded `form` query parameter.
    pub fn query<V: Into<ParamValue>>(name: &'static str, value: Option<V>) -> Self {
        Self {
            name,
            location: Location::Query,
            style: Style::Form,
            explode: true,
            json: false,
            value: value.map(Into::into),
        }
    }

    /// A header parameter with the `simple` style.
    pub fn header<V: Into<ParamValue>>(name: &'static str, value: Option<V>) -> Self {
        Self {
            name,
            location: Location::Header,
            style: Style::Simple,
            explode: false,
            json: false,
            value: value.map(Into::into),
        }
    }

    /// Set the serialization style.
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the explode flag.
    pub fn explode(mut self, explode: bool) -> Self {
        self.explode = explode;
        self
    }

    /// Serialize the value as a single JSON document.
    pub fn json(mut self) -> Self {
        self.json = true;
        self
    }

    fn located(&self, location: Location) -> Option<&ParamValue> {
        if self.location == location {
            self.value.as_ref()
        } else {
            None
        }
    }
}

fn join(values: &[Scalar], delimiter: &str) -> String {
    values
        .iter()
        .map(Scalar::stringify)
        .collect::<Vec<_>>()
        .join(delimiter)
}

/// `simple` style rendering shared by path and header fields.
fn simple_string(value: &ParamValue, explode: bool) -> String {
    match value {
        ParamValue::Scalar(value) => value.stringify(),
        ParamValue::List(values) => join(values, ","),
        ParamValue::Record(entries) => entries
            .iter()
            .map(|(key, member)| {
                if explode {
                    format!("{key}={}", member.stringify())
                } else {
                    format!("{key},{}", member.stringify())
                }
            })
            .collect::<Vec<_>>()
            .join(","),
    }
}

/// `form`-like rendering shared by query strings and url-encoded bodies.
fn delimited_pairs(
    name: &str,
    value: &ParamValue,
    delimiter: &str,
    explode: bool,
) -> Vec<(String, String)> {
    match value {
        ParamValue::Scalar(value) => vec![(name.to_string(), value.stringify())],
        ParamValue::List(values) if explode => values
            .iter()
            .map(|v| (name.to_string(), v.stringify()))
            .collect(),
        ParamValue::List(values) if values.is_empty() => Vec::new(),
        ParamValue::List(values) => vec![(name.to_string(), join(values, delimiter))],
        ParamValue::Record(entries) if explode => entries
            .iter()
            .flat_map(|(key, member)| member.values().into_iter().map(move |v| (key.clone(), v)))
            .collect(),
        ParamValue::Record(entries) if entries.is_empty() => Vec::new(),
        ParamValue::Record(entries) => {
            let joined = entries
                .iter()
                .map(|(key, member)| format!("{key}{delimiter}{}", member.values().join(delimiter)))
                .collect::<Vec<_>>()
                .join(delimiter);
            vec![(name.to_string(), joined)]
        }
    }
}
