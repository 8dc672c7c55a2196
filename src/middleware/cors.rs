use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Whether `origin` is listed; an entry containing `*` matches any origin
/// starting with the text before the `*`.
pub fn origin_allowed(allowed: &[String], origin: &str) -> bool {
    allowed.iter().any(|entry| match entry.split_once('*') {
        Some((prefix, _)) => origin.starts_with(prefix),
        None => entry == origin,
    })
}

pub fn cors_layer(allowed: Vec<String>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts| {
                origin
                    .to_str()
                    .map(|origin| origin_allowed(&allowed, origin))
                    .unwrap_or(false)
            },
        ))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<String> {
        vec![
            "https://lawatch.vercel.app".to_string(),
            "https://lawatch-*.vercel.app".to_string(),
        ]
    }

    #[test]
    fn exact_origins_match() {
        assert!(origin_allowed(&allowed(), "https://lawatch.vercel.app"));
        assert!(!origin_allowed(&allowed(), "https://lawatch.vercel.app.evil.com"));
    }

    #[test]
    fn wildcard_matches_prefix() {
        assert!(origin_allowed(&allowed(), "https://lawatch-git-feature.vercel.app"));
        assert!(!origin_allowed(&allowed(), "https://other.vercel.app"));
    }
}
