//! Types for index endpoints.

use std::collections::HashMap;

use reqwest::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use time::OffsetDateTime;

use crate::error::CoinApiError;
use crate::request::Operation;
use crate::rest::endpoints::indexes;
use crate::serialization::{Body, Field};

/// Media type of raw index definitions.
pub const MSGPACK_MEDIA_TYPE: &str = "application/x-msgpack";

/// Request for the list of indexes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListIndexesRequest;

impl Operation for ListIndexesRequest {
    type Output = Vec<Index>;

    const OPERATION_ID: &'static str = "get_/v1/indexes";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = indexes::INDEXES;
}

/// Request creating an index from a JSON definition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateIndexRequest {
    /// Index definition; no body is sent when unset.
    pub index: Option<IndexData>,
}

impl CreateIndexRequest {
    /// Create an index from `index`.
    pub fn new(index: IndexData) -> Self {
        Self { index: Some(index) }
    }
}

impl Operation for CreateIndexRequest {
    type Output = IndexDataResponse;

    const OPERATION_ID: &'static str = "post_/v1/indexes_json";
    const METHOD: Method = Method::POST;
    const PATH: &'static str = indexes::INDEXES;

    fn body(&self) -> Result<Option<Body>, CoinApiError> {
        self.index.as_ref().map(Body::json).transpose()
    }
}

/// Request fetching one index definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRequest {
    /// Index id.
    pub index_id: String,
}

impl IndexRequest {
    /// Create a request for `index_id`.
    pub fn new(index_id: impl Into<String>) -> Self {
        Self {
            index_id: index_id.into(),
        }
    }
}

impl Operation for IndexRequest {
    type Output = IndexData;

    const OPERATION_ID: &'static str = "get_/v1/indexes/{index_id}";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = indexes::INDEX;

    fn fields(&self) -> Vec<Field> {
        vec![Field::path("index_id", self.index_id.as_str())]
    }
}

/// Request replacing an index definition with a JSON document.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateIndexRequest {
    /// Index id.
    pub index_id: String,
    /// New definition; no body is sent when unset.
    pub index: Option<IndexData>,
}

impl UpdateIndexRequest {
    /// Create an update of `index_id` to `index`.
    pub fn new(index_id: impl Into<String>, index: IndexData) -> Self {
        Self {
            index_id: index_id.into(),
            index: Some(index),
        }
    }
}

impl Operation for UpdateIndexRequest {
    type Output = IndexDataResponse;

    const OPERATION_ID: &'static str = "put_/v1/indexes/{index_id}_json";
    const METHOD: Method = Method::PUT;
    const PATH: &'static str = indexes::INDEX;

    fn fields(&self) -> Vec<Field> {
        vec![Field::path("index_id", self.index_id.as_str())]
    }

    fn body(&self) -> Result<Option<Body>, CoinApiError> {
        self.index.as_ref().map(Body::json).transpose()
    }
}

/// Request replacing an index definition with a MessagePack document.
///
/// The bytes are sent unchanged as `application/x-msgpack`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateIndexRawRequest {
    /// Index id.
    pub index_id: String,
    /// Encoded definition; no body is sent when unset.
    pub body: Option<Vec<u8>>,
}

impl UpdateIndexRawRequest {
    /// Create an update of `index_id` with an encoded definition.
    pub fn new(index_id: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            index_id: index_id.into(),
            body: Some(body.into()),
        }
    }
}

impl Operation for UpdateIndexRawRequest {
    type Output = IndexDataResponse;

    const OPERATION_ID: &'static str = "put_/v1/indexes/{index_id}_raw";
    const METHOD: Method = Method::PUT;
    const PATH: &'static str = indexes::INDEX;

    fn fields(&self) -> Vec<Field> {
        vec![Field::path("index_id", self.index_id.as_str())]
    }

    fn body(&self) -> Result<Option<Body>, CoinApiError> {
        Ok(self
            .body
            .as_ref()
            .map(|bytes| Body::bytes(MSGPACK_MEDIA_TYPE, bytes.clone())))
    }
}

/// Request for historical index values and compositions.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexHistoryRequest {
    /// Index id.
    pub index_id: String,
    /// Start of the range (inclusive).
    pub time_start: Option<OffsetDateTime>,
    /// End of the range (exclusive).
    pub time_end: Option<OffsetDateTime>,
    /// Maximum number of items.
    pub limit: Option<u32>,
}

impl IndexHistoryRequest {
    /// Create a request for the history of `index_id`.
    pub fn new(index_id: impl Into<String>) -> Self {
        Self {
            index_id: index_id.into(),
            time_start: None,
            time_end: None,
            limit: Some(100),
        }
    }

    /// Set the start of the range.
    pub fn time_start(mut self, time: OffsetDateTime) -> Self {
        self.time_start = Some(time);
        self
    }

    /// Set the end of the range.
    pub fn time_end(mut self, time: OffsetDateTime) -> Self {
        self.time_end = Some(time);
        self
    }

    /// Set the maximum number of items.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    fn range_fields(&self) -> Vec<Field> {
        vec![
            Field::path("index_id", self.index_id.as_str()),
            Field::query("time_start", self.time_start),
            Field::query("time_end", self.time_end),
            Field::query("limit", self.limit),
        ]
    }
}

impl Operation for IndexHistoryRequest {
    type Output = Vec<IndexValue>;

    const OPERATION_ID: &'static str = "get_/v1/indexes/{index_id}/history";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = indexes::HISTORY;

    fn fields(&self) -> Vec<Field> {
        self.range_fields()
    }
}

/// Request for an index value timeseries.
///
/// Takes the same parameters as [`IndexHistoryRequest`].
#[derive(Debug, Clone, PartialEq)]
pub struct IndexTimeseriesRequest(pub IndexHistoryRequest);

impl IndexTimeseriesRequest {
    /// Create a request for the timeseries of `index_id`.
    pub fn new(index_id: impl Into<String>) -> Self {
        Self(IndexHistoryRequest::new(index_id))
    }

    /// Set the start of the range.
    pub fn time_start(self, time: OffsetDateTime) -> Self {
        Self(self.0.time_start(time))
    }

    /// Set the end of the range.
    pub fn time_end(self, time: OffsetDateTime) -> Self {
        Self(self.0.time_end(time))
    }

    /// Set the maximum number of items.
    pub fn limit(self, limit: u32) -> Self {
        Self(self.0.limit(limit))
    }
}

impl Operation for IndexTimeseriesRequest {
    type Output = Vec<IndexTimeseriesItem>;

    const OPERATION_ID: &'static str = "get_/v1/indexes/{index_id}/timeseries";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = indexes::TIMESERIES;

    fn fields(&self) -> Vec<Field> {
        self.0.range_fields()
    }
}

/// Request for the timeseries of one composite source of an index.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceTimeseriesRequest {
    /// Index id.
    pub index_id: String,
    /// Source identifier.
    pub source_id: String,
    /// Source type.
    pub source_type: String,
    /// Start of the range (inclusive).
    pub time_start: Option<OffsetDateTime>,
    /// End of the range (exclusive).
    pub time_end: Option<OffsetDateTime>,
    /// Maximum number of items.
    pub limit: Option<u32>,
}

impl SourceTimeseriesRequest {
    /// Create a request for one source of `index_id`.
    pub fn new(
        index_id: impl Into<String>,
        source_id: impl Into<String>,
        source_type: impl Into<String>,
    ) -> Self {
        Self {
            index_id: index_id.into(),
            source_id: source_id.into(),
            source_type: source_type.into(),
            time_start: None,
            time_end: None,
            limit: Some(100),
        }
    }

    /// Set the start of the range.
    pub fn time_start(mut self, time: OffsetDateTime) -> Self {
        self.time_start = Some(time);
        self
    }

    /// Set the end of the range.
    pub fn time_end(mut self, time: OffsetDateTime) -> Self {
        self.time_end = Some(time);
        self
    }

    /// Set the maximum number of items.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl Operation for SourceTimeseriesRequest {
    type Output = Vec<IndexTimeseriesItem>;

    const OPERATION_ID: &'static str = "get_/v1/indexes/{index_id}/timeseries/TO_BE_ANNOUNCED";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = indexes::SOURCE_TIMESERIES;

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::path("index_id", self.index_id.as_str()),
            Field::query("source_id", Some(self.source_id.as_str())),
            Field::query("source_type", Some(self.source_type.as_str())),
            Field::query("time_start", self.time_start),
            Field::query("time_end", self.time_end),
            Field::query("limit", self.limit),
        ]
    }
}

/// Index listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    #[serde(default)]
    pub index_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One component of an index definition.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDataComponent {
    #[serde(default)]
    pub component_id: Option<String>,
    #[serde(default)]
    pub evaluation_method: Option<String>,
    #[serde(default)]
    pub evaluation_method_parameters: Option<HashMap<String, String>>,
}

/// Index definition, used both to read and to write indexes.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexData {
    #[serde(default)]
    pub index_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Calculation method.
    #[serde(default)]
    pub index_method: Option<String>,
    #[serde(default)]
    pub index_method_parameters: Option<HashMap<String, String>>,
    /// Recalculation period, e.g. `1DAY`.
    #[serde(default)]
    pub period_recalculation: Option<String>,
    #[serde(default)]
    pub visibility_public: Option<bool>,
    /// Comma-separated notification addresses.
    #[serde(default)]
    pub notify_emails: Option<String>,
    #[serde(default)]
    pub components: Option<Vec<IndexDataComponent>>,
}

/// Result of creating or updating an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDataResponse {
    #[serde(default)]
    pub index_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Contribution of one component to an index value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexValueComponent {
    #[serde(default)]
    pub component_id: Option<String>,
    pub component_value: Decimal,
}

/// Historical index value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexValue {
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub value: Decimal,
    /// Components behind the value.
    #[serde(default)]
    pub composition: Option<Vec<IndexValueComponent>>,
}

/// One period of an index value timeseries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexTimeseriesItem {
    #[serde(with = "time::serde::rfc3339")]
    pub time_period_start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub time_period_end: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub time_open: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub time_close: Option<OffsetDateTime>,
    #[serde(default)]
    pub value_open: Option<Decimal>,
    #[serde(default)]
    pub value_high: Option<Decimal>,
    #[serde(default)]
    pub value_low: Option<Decimal>,
    #[serde(default)]
    pub value_close: Option<Decimal>,
    /// Number of values in the period.
    pub value_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialization::{BodyContent, generate_url, get_query_params};
    use serde_json::json;

    #[test]
    fn test_index_data_skips_unset_fields() {
        let index = IndexData {
            name: Some("Large caps".to_string()),
            visibility_public: Some(false),
            ..Default::default()
        };

        let value = serde_json::to_value(&index).unwrap();
        assert_eq!(value, json!({"name": "Large caps", "visibility_public": false}));
    }

    #[test]
    fn test_create_index_body() {
        let request = CreateIndexRequest::new(IndexData {
            index_id: Some("IDX_1".to_string()),
            ..Default::default()
        });

        let body = request.body().unwrap().unwrap();
        assert_eq!(body.media_type, "application/json");
        assert_eq!(body.content, BodyContent::Json(json!({"index_id": "IDX_1"})));
    }

    #[test]
    fn test_create_index_without_definition_sends_no_body() {
        assert!(CreateIndexRequest::default().body().unwrap().is_none());
    }

    #[test]
    fn test_raw_update_body() {
        let request = UpdateIndexRawRequest::new("IDX_1", vec![0x81, 0xa1, 0x61, 0x01]);
        let body = request.body().unwrap().unwrap();
        assert_eq!(body.media_type, MSGPACK_MEDIA_TYPE);
        assert_eq!(body.content, BodyContent::Bytes(vec![0x81, 0xa1, 0x61, 0x01]));
    }

    #[test]
    fn test_source_timeseries_fields() {
        let request = SourceTimeseriesRequest::new("IDX_1", "SRC", "EXCHANGE").limit(10);
        let fields = request.fields();

        let url = generate_url("https://rest.coinapi.io", SourceTimeseriesRequest::PATH, &fields)
            .unwrap();
        assert_eq!(url, "https://rest.coinapi.io/v1/indexes/IDX_1/timeseries/TO_BE_ANNOUNCED");

        let query = get_query_params(&fields).unwrap();
        assert_eq!(
            query,
            vec![
                ("source_id".to_string(), "SRC".to_string()),
                ("source_type".to_string(), "EXCHANGE".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_index_value_deserialize() {
        let json = r#"{
            "timestamp": "2024-01-01T00:00:00Z",
            "value": 1234.5,
            "composition": [{"component_id": "BTC", "component_value": 1000}]
        }"#;

        let value: IndexValue = serde_json::from_str(json).unwrap();
        assert_eq!(value.composition.unwrap()[0].component_value, Decimal::from(1000));
    }
}
