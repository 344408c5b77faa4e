//! `/convert-code` request and response bodies.

use serde::{Deserialize, Serialize};

/// Body of a `POST /convert-code` request.
///
/// `source_code` carries the full text of the file; the selected region is
/// identified by the 1-based `start_line`/`end_line` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub source_code: String,
    pub target_language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<u32>,
    /// Directory holding previously generated value objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vo_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_instructions: Option<String>,
}

impl ConversionRequest {
    /// Create a request for the whole of `source_code`.
    pub fn new(source_code: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            source_code: source_code.into(),
            target_language: target_language.into(),
            source_language: None,
            file_path: None,
            start_line: None,
            end_line: None,
            vo_path: None,
            additional_instructions: None,
        }
    }

    /// Restrict the conversion to an inclusive 1-based line range.
    #[must_use]
    pub fn with_range(mut self, start_line: u32, end_line: u32) -> Self {
        self.start_line = Some(start_line);
        self.end_line = Some(end_line);
        self
    }

    #[must_use]
    pub fn with_file_path(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }

    #[must_use]
    pub fn with_source_language(mut self, language: Option<String>) -> Self {
        self.source_language = language;
        self
    }

    #[must_use]
    pub fn with_vo_path(mut self, vo_path: Option<String>) -> Self {
        self.vo_path = vo_path;
        self
    }
}

/// Body of a `/convert-code` response, decoded verbatim.
///
/// `success` and `message` are produced by the backend and are not
/// validated locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResponse {
    pub converted_code: String,
    pub source_language: String,
    pub target_language: String,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub start_line: Option<u32>,
    #[serde(default)]
    pub end_line: Option<u32>,
    /// Seconds spent by the backend.
    pub processing_time: f64,
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_omits_unset_optionals() {
        let request = ConversionRequest::new("int a;", "#");
        let json = serde_json::to_value(&request).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["source_code"], "int a;");
        assert_eq!(obj["target_language"], "#");
    }

    #[test]
    fn test_request_with_range_and_path() {
        let request = ConversionRequest::new("a\nb\nc", "#")
            .with_range(2, 3)
            .with_file_path("/src/Dao.java")
            .with_vo_path(Some("/out/vo".to_string()));
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["start_line"], 2);
        assert_eq!(json["end_line"], 3);
        assert_eq!(json["file_path"], "/src/Dao.java");
        assert_eq!(json["vo_path"], "/out/vo");
        assert!(json.get("source_language").is_none());
    }

    #[test]
    fn test_response_tolerates_missing_echo_fields() {
        let body = serde_json::json!({
            "converted_code": "###",
            "source_language": "java",
            "target_language": "#",
            "processing_time": 0.52,
            "success": true,
            "message": "Successfully converted from java to #"
        });
        let response: ConversionResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.converted_code, "###");
        assert!(response.success);
        assert_eq!(response.file_path, None);
        assert_eq!(response.start_line, None);
    }
}
