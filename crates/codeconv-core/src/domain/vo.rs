//! `/make-vo` request and response bodies.

use serde::{Deserialize, Serialize};

/// Body of a `POST /make-vo` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakeVoRequest {
    pub project_path: String,
    /// Output directory the generated value objects are destined for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vo_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_instructions: Option<String>,
}

impl MakeVoRequest {
    pub fn new(project_path: impl Into<String>, vo_path: Option<String>) -> Self {
        Self {
            project_path: project_path.into(),
            vo_path,
            additional_instructions: None,
        }
    }
}

/// Body of a `/make-vo` response, decoded verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MakeVoResponse {
    pub vo_code: String,
    pub file_count: u64,
    pub processing_time: f64,
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_vo_request_serialization() {
        let request = MakeVoRequest::new("/work/shop", Some("/work/shop/generated".into()));
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"project_path\":\"/work/shop\""));
        assert!(json.contains("\"vo_path\":\"/work/shop/generated\""));
        assert!(!json.contains("additional_instructions"));
    }

    #[test]
    fn test_make_vo_response_requires_success_flag() {
        let body = r#"{"vo_code": "class X {}", "file_count": 3, "processing_time": 1.23, "message": ""}"#;
        assert!(serde_json::from_str::<MakeVoResponse>(body).is_err());
    }
}
