//! Security headers middleware

use axum::{
    extract::Request,
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};

/// Swagger UI ships inline scripts and styles; everything else gets the strict policy.
const STRICT_CSP: &str = "default-src 'none'; frame-ancestors 'none'";
const DOCS_CSP: &str =
    "default-src 'self'; script-src 'self' 'unsafe-inline'; style-src 'self' 'unsafe-inline'; img-src 'self' data:; frame-ancestors 'none'";

fn is_docs_path(path: &str) -> bool {
    path.starts_with("/swagger") || path.starts_with("/api-docs")
}

/// Middleware for adding security headers
///
/// Responses carrying account data or tokens are marked `no-store`.
pub async fn security_headers(request: Request, next: Next) -> Response {
    let docs = is_docs_path(request.uri().path());
    let mut response = next.run(request).await;
    apply_security_headers(response.headers_mut(), docs);
    response
}

fn apply_security_headers(headers: &mut HeaderMap, docs: bool) {
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("no-referrer"),
    );

    if docs {
        headers.insert(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(DOCS_CSP),
        );
    } else {
        headers.insert(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(STRICT_CSP),
        );
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    }
}

/// Middleware for adding HSTS header (use only in production with HTTPS)
pub async fn hsts_header(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    response.headers_mut().insert(
        header::STRICT_TRANSPORT_SECURITY,
        HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_responses_are_not_cached() {
        let mut headers = HeaderMap::new();
        apply_security_headers(&mut headers, false);

        assert_eq!(headers[header::CACHE_CONTROL], "no-store");
        assert_eq!(headers[header::CONTENT_SECURITY_POLICY], STRICT_CSP);
        assert_eq!(headers[header::X_FRAME_OPTIONS], "DENY");
    }

    #[test]
    fn test_docs_get_relaxed_policy() {
        assert!(is_docs_path("/swagger/index.html"));
        assert!(is_docs_path("/api-docs/openapi.json"));
        assert!(!is_docs_path("/accounts"));

        let mut headers = HeaderMap::new();
        apply_security_headers(&mut headers, true);
        assert_eq!(headers[header::CONTENT_SECURITY_POLICY], DOCS_CSP);
        assert!(headers.get(header::CACHE_CONTROL).is_none());
    }
}
