//! CORS layer configuration.

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

use portal_core::config::CorsConfig;

/// Builds a CORS tower layer from configuration.
///
/// Credentials (the session cookie) are only allowed when both origins and
/// headers are listed explicitly, since browsers refuse credentialed
/// wildcard responses.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new();

    let wildcard_origin = config.allowed_origins.iter().any(|o| o == "*");
    let wildcard_headers = config.allowed_headers.iter().any(|h| h == "*");

    // Origins
    if wildcard_origin {
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer = layer.allow_origin(origins);
    }

    // Methods
    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    layer = layer.allow_methods(methods);

    // Headers
    if wildcard_headers {
        layer = layer.allow_headers(Any);
    } else {
        let headers: Vec<HeaderName> = config
            .allowed_headers
            .iter()
            .filter_map(|h| h.parse().ok())
            .collect();
        layer = layer.allow_headers(headers);
    }

    if !wildcard_origin && !wildcard_headers {
        layer = layer.allow_credentials(true);
    }

    layer.max_age(std::time::Duration::from_secs(config.max_age_seconds))
}
