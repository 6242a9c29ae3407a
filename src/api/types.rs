use crate::error::{ApiError, Result};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// One outbound call, before the transport turns it into HTTP
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the API base URL, e.g. `/properties`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            body: Some(body),
            ..Self::get(path)
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw status and body as received
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Payload that may come bare or wrapped as `{ "data": ... }`.
///
/// An object with a `data` key is always treated as wrapped, so a `data`
/// payload that fails to decode is an error rather than a bare fallback.
#[derive(Debug)]
pub enum Envelope<T> {
    Wrapped(T),
    Bare(T),
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped(data) | Envelope::Bare(data) => data,
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Envelope<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut value = serde_json::Value::deserialize(deserializer)?;
        if let Some(data) = value.as_object_mut().and_then(|o| o.remove("data")) {
            return serde_json::from_value(data)
                .map(Envelope::Wrapped)
                .map_err(D::Error::custom);
        }
        serde_json::from_value(value)
            .map(Envelope::Bare)
            .map_err(D::Error::custom)
    }
}

/// Investment enquiry submitted from a listing page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentRequest {
    pub property_id: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Property, PublicData};

    #[test]
    fn envelope_accepts_both_shapes() {
        let bare: Envelope<Vec<u32>> = serde_json::from_str("[1, 2]").unwrap();
        assert_eq!(bare.into_inner(), vec![1, 2]);

        let wrapped: Envelope<Vec<u32>> = serde_json::from_str(r#"{"data": [3]}"#).unwrap();
        assert_eq!(wrapped.into_inner(), vec![3]);
    }

    #[test]
    fn wrapped_property_list_decodes() {
        let response = ApiResponse::new(
            200,
            r#"{"data": [{"id": "p1", "propertyType": "secondary", "price": "99"}], "total": 1}"#,
        );
        let list = response.json::<Envelope<Vec<Property>>>().unwrap().into_inner();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].listed_price(), Some(99.0));
    }

    #[test]
    fn broken_wrapped_snapshot_is_a_decode_error() {
        let response = ApiResponse::new(
            200,
            r#"{"data": {"properties": {"id": "ok"}, "developers": [{"id": "emaar", "name": "Emaar"}]}}"#,
        );
        let err = response.json::<Envelope<PublicData>>().unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn wrapped_snapshot_skips_only_the_unreadable_listing() {
        let response = ApiResponse::new(
            200,
            r#"{"data": {"properties": [{"id": "ok", "propertyType": "secondary", "price": 1}, {"id": "bad", "propertyType": "rental"}], "developers": [{"id": "emaar", "name": "Emaar"}]}}"#,
        );
        let data = response.json::<Envelope<PublicData>>().unwrap().into_inner();
        assert_eq!(data.properties.len(), 1);
        assert_eq!(data.properties[0].id, "ok");
        assert_eq!(data.developers.len(), 1);
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = ApiResponse::new(200, "<html>").json::<Vec<u32>>().unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn header_lookup_ignores_case() {
        let mut request = ApiRequest::get("/properties");
        request.headers.push(("x-api-key".into(), "k".into()));
        assert_eq!(request.header("X-API-KEY"), Some("k"));
        assert_eq!(request.header("authorization"), None);
    }
}
