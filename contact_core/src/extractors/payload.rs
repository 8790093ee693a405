//! Request body extractor for contact form submissions

use axum::{
    async_trait,
    body::Bytes,
    extract::{Form, FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
};
use serde_json::{Map, Value};

use crate::error::AppError;

/// Decoded submission body: a JSON document, or a form post (urlencoded or
/// multipart) folded into a JSON object of strings. Validation happens later,
/// against the schema.
#[derive(Debug, Clone)]
pub struct ContactPayload(pub Value);

enum BodyKind {
    Json,
    Form,
    Multipart,
    Missing,
    Unsupported(String),
}

fn body_kind(req: &Request) -> BodyKind {
    let Some(header) = req.headers().get(CONTENT_TYPE) else {
        return BodyKind::Missing;
    };

    let raw = header.to_str().unwrap_or_default().to_string();
    let Ok(parsed) = raw.parse::<mime::Mime>() else {
        return BodyKind::Unsupported(raw);
    };

    if parsed.type_() == mime::APPLICATION
        && (parsed.subtype() == mime::JSON || parsed.suffix() == Some(mime::JSON))
    {
        BodyKind::Json
    } else if parsed.essence_str() == mime::APPLICATION_WWW_FORM_URLENCODED.essence_str() {
        BodyKind::Form
    } else if parsed.essence_str() == mime::MULTIPART_FORM_DATA.essence_str() {
        BodyKind::Multipart
    } else {
        BodyKind::Unsupported(raw)
    }
}

#[async_trait]
impl<S> FromRequest<S> for ContactPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match body_kind(&req) {
            BodyKind::Json => {
                let bytes = Bytes::from_request(req, state)
                    .await
                    .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

                let value = serde_json::from_slice::<Value>(&bytes)
                    .map_err(|e| AppError::BadRequest(format!("JSON parse error - {}", e)))?;

                Ok(ContactPayload(value))
            }
            BodyKind::Form => {
                let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                    .await
                    .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

                // Repeated keys: the last value wins.
                let fields: Map<String, Value> = pairs
                    .into_iter()
                    .map(|(key, value)| (key, Value::String(value)))
                    .collect();

                Ok(ContactPayload(Value::Object(fields)))
            }
            BodyKind::Multipart => {
                let mut multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

                let mut fields = Map::new();
                while let Some(field) = multipart.next_field().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read multipart field: {}", e))
                })? {
                    // File parts carry no contact fields.
                    if field.file_name().is_some() {
                        continue;
                    }
                    let Some(name) = field.name().map(str::to_string) else {
                        continue;
                    };
                    let value = field.text().await.map_err(|e| {
                        AppError::BadRequest(format!("Failed to read multipart field: {}", e))
                    })?;
                    fields.insert(name, Value::String(value));
                }

                Ok(ContactPayload(Value::Object(fields)))
            }
            // No media type means no parsed data; the body is not inspected.
            BodyKind::Missing => Ok(ContactPayload(Value::Object(Map::new()))),
            BodyKind::Unsupported(content_type) => Err(AppError::UnsupportedMediaType(format!(
                "Unsupported media type \"{}\" in request.",
                content_type
            ))),
        }
    }
}
