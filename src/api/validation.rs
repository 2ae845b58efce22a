use actix_web::{web, HttpResponse};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub fields: serde_json::Value,
}

impl ErrorResponse {
    pub fn message(error: &str, message: impl Into<String>) -> Self {
        ErrorResponse {
            error: error.to_string(),
            fields: serde_json::json!({ "message": message.into() }),
        }
    }
}

fn bad_request(response: ErrorResponse) -> actix_web::Error {
    actix_web::error::InternalError::from_response("", HttpResponse::BadRequest().json(response))
        .into()
}

/// JSON body config: validation and parse failures become 400s
pub fn json_config() -> actix_web_validator::JsonConfig {
    actix_web_validator::JsonConfig::default().error_handler(|err, _req| match err {
        actix_web_validator::Error::Validate(validation_errors) => {
            let mut fields = serde_json::Map::new();
            for (field, errors) in validation_errors.field_errors() {
                let messages: Vec<String> = errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("Validation error in field: {}", field))
                    })
                    .collect();
                fields.insert(field.to_string(), serde_json::json!({ "errors": messages }));
            }

            bad_request(ErrorResponse {
                error: "Validation failed".to_string(),
                fields: serde_json::Value::Object(fields),
            })
        }
        actix_web_validator::Error::Deserialize(de_err) => {
            let err_string = de_err.to_string();

            let message = if err_string.contains("EOF while parsing") {
                "Request body is empty. Expected JSON payload".to_string()
            } else if err_string.contains("unknown field")
                || err_string.contains("missing field")
                || err_string.contains("equity must be")
                || err_string.contains("invalid type")
            {
                err_string
            } else {
                "Invalid JSON format".to_string()
            };

            bad_request(ErrorResponse::message("Request validation failed", message))
        }
        _ => bad_request(ErrorResponse::message("Validation failed", "Validation error")),
    })
}

/// Query string config
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        bad_request(ErrorResponse::message(
            "Invalid query string",
            err.to_string(),
        ))
    })
}

/// Path parameter config, e.g. a non-numeric job id
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        bad_request(ErrorResponse::message("Invalid path", err.to_string()))
    })
}
