// HTTP response utilities for SVG bodies with optional Brotli encoding
use async_compression::tokio::bufread::BrotliEncoder;
use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, Response, StatusCode},
};
use tokio::io::AsyncReadExt;

pub const SVG_CONTENT_TYPE: &str = "image/svg+xml; charset=utf-8";

/// Check if client accepts Brotli compression
pub fn accepts_brotli(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.contains("br"))
        .unwrap_or(false)
}

async fn brotli(bytes: Vec<u8>) -> std::io::Result<Vec<u8>> {
    let cursor = std::io::Cursor::new(bytes);
    let mut encoder = BrotliEncoder::new(cursor);
    let mut compressed = Vec::new();
    encoder.read_to_end(&mut compressed).await?;
    Ok(compressed)
}

/// Build an SVG response, Brotli-compressed when requested
pub async fn svg_response(svg: String, compress: bool) -> Result<Response<Body>, StatusCode> {
    let raw = svg.into_bytes();

    let (body_bytes, content_encoding) = if compress {
        let raw_len = raw.len();
        let compressed = brotli(raw).await.map_err(|e| {
            tracing::error!("Brotli compression error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        tracing::debug!("Compressed SVG: {} -> {} bytes", raw_len, compressed.len());
        (compressed, Some("br"))
    } else {
        (raw, None)
    };

    let content_length = HeaderValue::from_str(&body_bytes.len().to_string()).map_err(|e| {
        tracing::error!("Invalid content length header: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let mut response_builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, SVG_CONTENT_TYPE)
        .header(header::CACHE_CONTROL, "no-store")
        .header(header::CONTENT_LENGTH, content_length);

    if let Some(encoding) = content_encoding {
        response_builder = response_builder
            .header(header::CONTENT_ENCODING, encoding)
            .header(header::VARY, "accept-encoding");
    }

    response_builder.body(Body::from(body_bytes)).map_err(|e| {
        tracing::error!("Response build error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_brotli() {
        let mut headers = HeaderMap::new();
        assert!(!accepts_brotli(&headers));

        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate, br"));
        assert!(accepts_brotli(&headers));
    }

    #[tokio::test]
    async fn test_plain_svg_response() {
        let response = svg_response("<svg/>".to_string(), false).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], SVG_CONTENT_TYPE);
        assert_eq!(response.headers()[header::CONTENT_LENGTH], "6");
        assert!(response.headers().get(header::CONTENT_ENCODING).is_none());
    }

    #[tokio::test]
    async fn test_compressed_svg_response() {
        let svg = "<svg>".to_string() + &"<g/>".repeat(500) + "</svg>";
        let response = svg_response(svg.clone(), true).await.unwrap();

        assert_eq!(response.headers()[header::CONTENT_ENCODING], "br");
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.len() < svg.len());
    }
}
