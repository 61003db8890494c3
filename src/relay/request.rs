//! Inbound request model.

use serde::{Deserialize, Serialize};

use crate::relay::error::{RelayError, RelayResult};

/// A normalized relay call: where to forward plus optional parameters.
///
/// Wire names are camelCase; the snake_case spellings are accepted as well.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest {
    /// Backend path, relative or already rooted under the API prefix.
    #[serde(default)]
    pub path: Option<String>,

    #[serde(default, alias = "query_date", skip_serializing_if = "Option::is_none")]
    pub query_date: Option<String>,

    #[serde(default, alias = "start_date", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(default, alias = "end_date", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    /// Business sequence number.
    #[serde(default, alias = "biz_seq", skip_serializing_if = "Option::is_none")]
    pub biz_seq: Option<String>,
}

impl RelayRequest {
    /// Request targeting `path` with no optional parameters.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// The trimmed target path, or a validation error when it is missing or blank.
    pub fn validated_path(&self) -> RelayResult<&str> {
        self.path
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or(RelayError::MissingPath)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_and_snake_case_are_accepted() {
        let camel: RelayRequest =
            serde_json::from_str(r#"{"path":"stats","queryDate":"2025-11-05","bizSeq":"7"}"#).unwrap();
        let snake: RelayRequest =
            serde_json::from_str(r#"{"path":"stats","query_date":"2025-11-05","biz_seq":"7"}"#).unwrap();

        assert_eq!(camel, snake);
        assert_eq!(camel.query_date.as_deref(), Some("2025-11-05"));
        assert_eq!(camel.biz_seq.as_deref(), Some("7"));
        assert!(camel.start_date.is_none());
    }

    #[test]
    fn missing_or_blank_path_is_rejected() {
        let empty: RelayRequest = serde_json::from_str("{}").unwrap();
        assert!(matches!(empty.validated_path(), Err(RelayError::MissingPath)));

        for path in ["", "   ", "\t\n"] {
            let request = RelayRequest::new(path);
            assert!(matches!(request.validated_path(), Err(RelayError::MissingPath)));
        }
    }

    #[test]
    fn path_is_trimmed() {
        let request = RelayRequest::new("  template-query/stats ");
        assert_eq!(request.validated_path().unwrap(), "template-query/stats");
    }

    #[test]
    fn null_fields_deserialize_as_absent() {
        let request: RelayRequest =
            serde_json::from_str(r#"{"path":null,"startDate":null}"#).unwrap();
        assert!(request.path.is_none());
        assert!(request.start_date.is_none());
    }
}
