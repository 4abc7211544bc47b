use crate::config::Config;
use crate::models::prompt::Prompt;
use crate::services::{ChatProxyService, ForwardError};
use actix_web::http::{header, Method, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use log::error;
use serde_json::json;

/// Resolves the `Access-Control-Allow-Origin` value for a request: echo the
/// caller's origin when the allow-list admits it, otherwise fall back to the
/// first configured entry.
fn allowed_origin(req: &HttpRequest, config: &Config) -> String {
    let origin = req
        .headers()
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok());

    match origin {
        Some(origin)
            if config
                .allowed_origins
                .iter()
                .any(|allowed| allowed == "*" || allowed == origin) =>
        {
            origin.to_string()
        }
        _ => config
            .allowed_origins
            .first()
            .cloned()
            .unwrap_or_else(|| "*".to_string()),
    }
}

fn preflight_response(req: &HttpRequest, config: &Config) -> HttpResponse {
    HttpResponse::NoContent()
        .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, allowed_origin(req, config)))
        .insert_header((header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"))
        .insert_header((
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            "Content-Type, Authorization, X-Requested-With",
        ))
        .insert_header((header::ACCESS_CONTROL_MAX_AGE, "86400"))
        .finish()
}

/// Bearer-token gate for POST requests. Returns the 401 response to send
/// when the key does not match.
fn validate_api_key(req: &HttpRequest, config: &Config) -> Option<HttpResponse> {
    let provided = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.strip_prefix("Bearer ").unwrap_or(value))
        .unwrap_or("");

    if provided == config.client_api_key {
        return None;
    }

    Some(
        HttpResponse::Unauthorized()
            .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
            .json(json!({
                "error": "Invalid API key",
                "message": "Please provide a valid API key in the Authorization header"
            })),
    )
}

pub async fn welcome_handler(req: HttpRequest, config: web::Data<Config>) -> impl Responder {
    HttpResponse::Ok()
        .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, allowed_origin(&req, &config)))
        .json(json!({
            "message": "Welcome to the ARK DS API",
            "status": "running",
            "documentation": "This API accepts POST requests with an Authorization header containing a Bearer token.",
            "example": {
                "method": "POST",
                "headers": {
                    "Content-Type": "application/json",
                    "Authorization": "Bearer <your-api-key>"
                },
                "body": {
                    "messages": [
                        { "role": "user", "content": "Hello!" }
                    ],
                    "temperature": 0.7,
                    "max_tokens": 2000
                }
            }
        }))
}

/// Catch-all for routes outside the documented surface. OPTIONS gets the
/// CORS preflight response on any path; everything else is a 404.
pub async fn fallback_handler(req: HttpRequest, config: web::Data<Config>) -> impl Responder {
    if req.method() == Method::OPTIONS {
        return preflight_response(&req, &config);
    }

    HttpResponse::NotFound()
        .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, allowed_origin(&req, &config)))
        .json(json!({
            "error": "Not Found",
            "message": "This endpoint only accepts POST requests"
        }))
}

pub async fn chat_handler(
    req: HttpRequest,
    body: web::Bytes,
    config: web::Data<Config>,
    service: web::Data<ChatProxyService>,
) -> impl Responder {
    let origin = allowed_origin(&req, &config);

    if let Some(denied) = validate_api_key(&req, &config) {
        return denied;
    }

    // Body parsing happens after the gate so malformed JSON from an
    // unauthenticated caller still yields 401.
    let mut prompt: Prompt = match serde_json::from_slice(&body) {
        Ok(prompt) => prompt,
        Err(e) => {
            error!("Failed to parse request body: {}", e);
            return HttpResponse::InternalServerError()
                .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, origin))
                .json(json!({
                    "error": "Proxy error",
                    "message": format!("Failed to parse request body: {}", e)
                }));
        }
    };

    prompt.ensure_system_prompt(&config.system_prompt);
    let temperature = prompt.temperature();
    let max_tokens = prompt.max_tokens();

    match service.forward(prompt.messages, temperature, max_tokens).await {
        Ok(content) => HttpResponse::Ok()
            .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, origin))
            .json(json!({
                "choices": [{
                    "message": {
                        "content": content
                    }
                }]
            })),
        Err(ForwardError::Upstream {
            status,
            url,
            details,
        }) => {
            error!("Upstream API error {} from {}", status, url);
            let relayed =
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            HttpResponse::build(relayed)
                .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, origin))
                .json(json!({
                    "error": "API error",
                    "details": details,
                    "message": "Failed to get response from API",
                    "status": status,
                    "url": url
                }))
        }
        Err(ForwardError::Transport(message)) => {
            error!("Proxy error: {}", message);
            HttpResponse::InternalServerError()
                .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, origin))
                .json(json!({
                    "error": "Proxy error",
                    "message": message
                }))
        }
    }
}
