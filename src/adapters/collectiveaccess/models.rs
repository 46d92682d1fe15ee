//! Response envelopes of the CollectiveAccess GraphQL services
//!
//! Responses are first parsed into a `serde_json::Value` (a failure there is a
//! transport problem) and then interpreted here. Structural problems in valid
//! JSON become protocol or authentication errors.

use crate::domain::record::{lenient, RawRecord};
use crate::domain::search::SearchResponse;
use crate::domain::{CafetchError, Result};
use serde::Deserialize;
use serde_json::Value;

/// Standard GraphQL response envelope
#[derive(Debug, Deserialize)]
pub struct GraphQlEnvelope<T> {
    pub data: Option<T>,
    #[serde(default, deserialize_with = "lenient")]
    pub errors: Option<Vec<Value>>,
}

impl<T> GraphQlEnvelope<T> {
    /// `errors` serialized for messages, if the server sent any
    fn errors_text(&self) -> Option<String> {
        self.errors
            .as_ref()
            .map(|errors| Value::Array(errors.clone()).to_string())
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginData {
    pub login: Option<LoginPayload>,
}

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub jwt: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct SearchData {
    pub search: Option<SearchPayload>,
}

#[derive(Debug, Deserialize)]
pub struct SearchPayload {
    #[serde(default, deserialize_with = "lenient")]
    pub table: Option<String>,
    pub count: Option<Value>,
    pub results: Option<Vec<ResultGroup>>,
}

#[derive(Debug, Deserialize)]
pub struct ResultGroup {
    pub result: Option<Vec<RawRecord>>,
}

/// Extract `data.login.jwt`
///
/// # Errors
///
/// Returns an `Authentication` error when the token is missing, not a string
/// or empty. GraphQL `errors` from the response are included in the message.
pub fn parse_login(body: Value) -> Result<String> {
    let envelope: GraphQlEnvelope<LoginData> = serde_json::from_value(body).map_err(|e| {
        CafetchError::Authentication(format!("unexpected login response shape: {e}"))
    })?;

    let jwt = envelope
        .data
        .as_ref()
        .and_then(|d| d.login.as_ref())
        .and_then(|l| l.jwt.as_ref())
        .and_then(Value::as_str)
        .filter(|jwt| !jwt.is_empty())
        .map(str::to_string);

    match jwt {
        Some(jwt) => Ok(jwt),
        None => Err(CafetchError::Authentication(format!(
            "CollectiveAccess authentication failed: no token in data.login.jwt{}",
            envelope
                .errors_text()
                .map(|e| format!(" (errors: {e})"))
                .unwrap_or_default()
        ))),
    }
}

/// Interpret a `/service/Search` response
///
/// # Errors
///
/// Returns a `Protocol` error when `data.search.count` is missing or not a
/// non-negative integer, or when the payload does not have the documented
/// shape.
pub fn parse_search(body: Value) -> Result<SearchResponse> {
    let envelope: GraphQlEnvelope<SearchData> = serde_json::from_value(body)
        .map_err(|e| CafetchError::Protocol(format!("unexpected search response shape: {e}")))?;
    let errors = envelope.errors_text();

    let payload = envelope.data.and_then(|d| d.search).ok_or_else(|| {
        CafetchError::Protocol(format!(
            "response contains no data.search: {}",
            errors.clone().unwrap_or_else(|| "[]".to_string())
        ))
    })?;

    let count = payload
        .count
        .as_ref()
        .and_then(parse_count)
        .ok_or_else(|| {
            CafetchError::Protocol(format!(
                "response contains no usable data.search.count: {}",
                errors.clone().unwrap_or_else(|| "[]".to_string())
            ))
        })?;

    let results = payload
        .results
        .and_then(|groups| groups.into_iter().next())
        .and_then(|group| group.result);

    Ok(SearchResponse {
        table: payload.table,
        count,
        results,
        errors,
    })
}

/// Counts arrive as JSON numbers or numeric strings
fn parse_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_login_success() {
        let body = json!({"data": {"login": {"jwt": "eyJ0eXAi.abc.def"}}});
        assert_eq!(parse_login(body).unwrap(), "eyJ0eXAi.abc.def");
    }

    #[test]
    fn test_parse_login_empty_token() {
        let body = json!({"data": {"login": {"jwt": ""}}});
        assert!(matches!(parse_login(body), Err(CafetchError::Authentication(_))));
    }

    #[test]
    fn test_parse_login_errors_are_reported() {
        let body = json!({
            "data": {"login": null},
            "errors": [{"message": "Invalid username or password"}]
        });
        let err = parse_login(body).unwrap_err();
        assert!(matches!(err, CafetchError::Authentication(_)));
        assert!(err.to_string().contains("Invalid username or password"));
    }

    #[test]
    fn test_parse_login_non_string_token() {
        let body = json!({"data": {"login": {"jwt": 42}}});
        assert!(matches!(parse_login(body), Err(CafetchError::Authentication(_))));
    }

    #[test]
    fn test_parse_search_full_page() {
        let body = json!({
            "data": {"search": {
                "table": "ca_objects",
                "count": 237,
                "results": [{"result": [
                    {"id": 1, "table": "ca_objects", "idno": "A.1", "bundles": []},
                    {"id": 2, "table": "ca_objects", "idno": "A.2", "bundles": []}
                ]}]
            }}
        });

        let response = parse_search(body).unwrap();
        assert_eq!(response.count, 237);
        assert_eq!(response.table.as_deref(), Some("ca_objects"));
        assert_eq!(response.results.as_ref().unwrap().len(), 2);
        assert!(response.errors.is_none());
    }

    #[test]
    fn test_parse_search_string_count() {
        let body = json!({"data": {"search": {"count": "12", "results": []}}});
        let response = parse_search(body).unwrap();
        assert_eq!(response.count, 12);
        assert!(response.results.is_none());
    }

    #[test]
    fn test_parse_search_missing_count_is_protocol_error() {
        let body = json!({"data": {"search": {"table": "ca_objects"}}});
        assert!(matches!(parse_search(body), Err(CafetchError::Protocol(_))));
    }

    #[test]
    fn test_parse_search_zero_count_is_not_an_error() {
        let body = json!({"data": {"search": {"count": 0, "results": [{"result": []}]}}});
        let response = parse_search(body).unwrap();
        assert_eq!(response.count, 0);
        assert_eq!(response.results, Some(vec![]));
    }

    #[test]
    fn test_parse_search_graphql_errors() {
        let body = json!({
            "data": null,
            "errors": [{"message": "Invalid bundle ca_objects.nope"}]
        });
        let err = parse_search(body).unwrap_err();
        assert!(matches!(err, CafetchError::Protocol(_)));
        assert!(err.to_string().contains("Invalid bundle"));
    }

    #[test]
    fn test_parse_search_ignores_unexpected_bundle_field_types() {
        let body = json!({
            "data": {"search": {
                "count": 2,
                "results": [{"result": [
                    {"id": 1, "idno": "A.1", "bundles": [{
                        "code": "ca_objects.access",
                        "dataType": 6,
                        "values": [{"value": "1", "locale": {"code": "en_US"}}]
                    }]},
                    {"id": 2, "idno": "A.2", "bundles": []}
                ]}]
            }}
        });

        let response = parse_search(body).unwrap();
        let records = response.results.unwrap();
        assert_eq!(records.len(), 2);
        let bundles = records[0].bundles.as_ref().unwrap();
        assert_eq!(bundles[0].data_type, Some(json!(6)));
        assert_eq!(bundles[0].values.as_ref().unwrap()[0].non_empty(), Some(&json!("1")));
    }

    #[test]
    fn test_parse_search_wrong_shape() {
        let body = json!({"data": {"search": {"count": 3, "results": "nope"}}});
        assert!(matches!(parse_search(body), Err(CafetchError::Protocol(_))));
    }
}
