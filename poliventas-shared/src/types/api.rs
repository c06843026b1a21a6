use serde::{Deserialize, Serialize};

/// Success envelope: `{ "msg": ..., ...payload }`.
///
/// The payload must serialize to a JSON object (or unit) so its fields can be
/// flattened next to `msg`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub msg: String,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(msg: impl Into<String>, data: T) -> Self {
        Self {
            msg: msg.into(),
            data,
        }
    }
}

impl ApiResponse<Empty> {
    pub fn message(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            data: Empty {},
        }
    }
}

/// Payload for message-only responses.
#[derive(Debug, Serialize)]
pub struct Empty {}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub msg: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiErrorResponse {
    pub fn new(code: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            code: code.into(),
            error: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub service: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<HealthCheck>>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthResponse {
    pub fn healthy(service: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Healthy,
            service: service.into(),
            version: version.into(),
            checks: None,
        }
    }

    pub fn with_checks(mut self, checks: Vec<HealthCheck>) -> Self {
        self.status = if checks.iter().any(|c| c.status == HealthStatus::Unhealthy) {
            HealthStatus::Unhealthy
        } else {
            HealthStatus::Healthy
        };
        self.checks = Some(checks);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Listing {
        quejas: Vec<u32>,
    }

    #[test]
    fn payload_is_flattened_next_to_msg() {
        let resp = ApiResponse::ok("ok", Listing { quejas: vec![1, 2] });
        let value = serde_json::to_value(&resp).unwrap();

        assert_eq!(value["msg"], "ok");
        assert_eq!(value["quejas"], serde_json::json!([1, 2]));
    }

    #[test]
    fn message_only_response_has_single_field() {
        let value = serde_json::to_value(ApiResponse::message("hecho")).unwrap();
        assert_eq!(value, serde_json::json!({ "msg": "hecho" }));
    }

    #[test]
    fn one_unhealthy_check_fails_health() {
        let resp = HealthResponse::healthy("poliventas-api", "0.1.0").with_checks(vec![HealthCheck {
            name: "database".into(),
            status: HealthStatus::Unhealthy,
            message: Some("connection refused".into()),
        }]);
        assert_eq!(resp.status, HealthStatus::Unhealthy);
    }
}
