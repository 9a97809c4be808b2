//! HTTP API.
//! `GET /diagram?fen=...&rev=1&inline=1&size=800` returns the position as PNG.
//! Query validation happens here, before the renderer is involved; the
//! rasterization itself runs on the blocking pool.

use crate::diagram::{DiagramRequest, Render};
use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub renderer: Arc<dyn Render>,
    pub default_size: u32,
    pub max_size: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct DiagramQuery {
    pub fen: Option<String>,
    pub rev: Option<String>,
    pub inline: Option<String>,
    pub size: Option<String>,
}

#[derive(Debug)]
pub enum DiagramError {
    InvalidFen,
    InvalidSize,
    Render(anyhow::Error),
}

impl IntoResponse for DiagramError {
    fn into_response(self) -> Response {
        match self {
            DiagramError::InvalidFen => (StatusCode::BAD_REQUEST, "Invalid FEN").into_response(),
            DiagramError::InvalidSize => {
                (StatusCode::BAD_REQUEST, "Size should be a positive integer").into_response()
            }
            DiagramError::Render(e) => {
                tracing::error!(error = %format!("{e:#}"), "diagram render failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render diagram").into_response()
            }
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/diagram", get(diagram))
        .with_state(state)
}

async fn diagram(
    State(state): State<AppState>,
    Query(query): Query<DiagramQuery>,
) -> Result<Response, DiagramError> {
    let request = match to_request(&query, state.default_size, state.max_size) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(?query, error = ?e, "rejected diagram request");
            return Err(e);
        }
    };
    let inline = query.inline.as_deref() == Some("1");

    tracing::debug!(fen = %request.fen, size = request.size, reversed = request.reversed, "diagram request");

    let renderer = Arc::clone(&state.renderer);
    let png = tokio::task::spawn_blocking(move || renderer.render(&request))
        .await
        .map_err(|e| DiagramError::Render(anyhow::anyhow!("Render task failed: {}", e)))?
        .map_err(DiagramError::Render)?;

    let disposition = if inline {
        "inline".to_string()
    } else {
        format!("attachment; filename=\"{}.png\"", chrono::Utc::now().timestamp_millis())
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "image/png")
        .header(header::CONTENT_LENGTH, png.len())
        .header(header::CONTENT_DISPOSITION, disposition)
        .body(Body::from(png))
        .map_err(|e| DiagramError::Render(e.into()))
}

/// Validates the query into a render request.
pub fn to_request(query: &DiagramQuery, default_size: u32, max_size: u32) -> Result<DiagramRequest, DiagramError> {
    let fen = match query.fen.as_deref() {
        Some(fen) if !fen.is_empty() => fen.to_string(),
        _ => return Err(DiagramError::InvalidFen),
    };

    let size = match query.size.as_deref() {
        None => i64::from(default_size),
        Some(raw) => parse_leading_int(raw).ok_or(DiagramError::InvalidSize)?,
    };
    // 0 is refused too: a 0x0 image has no PNG encoding.
    if size <= 0 || size > i64::from(max_size) {
        return Err(DiagramError::InvalidSize);
    }

    Ok(DiagramRequest {
        fen,
        reversed: query.rev.as_deref() == Some("1"),
        size: size as u32,
    })
}

/// Reads an optionally signed integer prefix, ignoring leading whitespace and
/// anything after the digits (`"640px"` is 640). A `0x`/`0X` prefix switches
/// to hexadecimal (`"0x100"` is 256). `None` when there are no digits.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (radix, rest) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let digits: String = rest.chars().take_while(|c| c.is_digit(radix)).collect();
    if digits.is_empty() {
        return None;
    }
    // Anything too long for i64 is out of range for a board anyway.
    let value = i64::from_str_radix(&digits, radix).unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(fen: Option<&str>, size: Option<&str>) -> DiagramQuery {
        DiagramQuery {
            fen: fen.map(str::to_string),
            size: size.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("800"), Some(800));
        assert_eq!(parse_leading_int("  640px"), Some(640));
        assert_eq!(parse_leading_int("12.5"), Some(12));
        assert_eq!(parse_leading_int("-1"), Some(-1));
        assert_eq!(parse_leading_int("+7"), Some(7));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
    }

    #[test]
    fn test_parse_leading_int_hex_prefix() {
        assert_eq!(parse_leading_int("0x100"), Some(256));
        assert_eq!(parse_leading_int("0X1f4"), Some(500));
        assert_eq!(parse_leading_int("-0x10"), Some(-16));
        assert_eq!(parse_leading_int("0x"), None);
        assert_eq!(parse_leading_int("0xzz"), None);
        assert_eq!(parse_leading_int("010"), Some(10));
    }

    #[test]
    fn test_missing_or_empty_fen() {
        assert!(matches!(to_request(&query(None, None), 800, 2000), Err(DiagramError::InvalidFen)));
        assert!(matches!(to_request(&query(Some(""), None), 800, 2000), Err(DiagramError::InvalidFen)));
    }

    #[test]
    fn test_size_bounds() {
        let fen = Some("8/8/8/8/8/8/8/8");
        for bad in ["abc", "-1", "0", "2001", "99999999999999999999"] {
            assert!(
                matches!(to_request(&query(fen, Some(bad)), 800, 2000), Err(DiagramError::InvalidSize)),
                "size {bad} should be rejected"
            );
        }
        assert_eq!(to_request(&query(fen, Some("2000")), 800, 2000).unwrap().size, 2000);
        assert_eq!(to_request(&query(fen, Some("1")), 800, 2000).unwrap().size, 1);
        assert_eq!(to_request(&query(fen, Some("0x100")), 800, 2000).unwrap().size, 256);
    }

    #[test]
    fn test_defaults_and_flags() {
        let request = to_request(&query(Some("8/8/8/8/8/8/8/8 w - - 0 1"), None), 800, 2000).unwrap();
        assert_eq!(request.size, 800);
        assert!(!request.reversed);

        let mut q = query(Some("8/8/8/8/8/8/8/8"), None);
        q.rev = Some("1".into());
        assert!(to_request(&q, 800, 2000).unwrap().reversed);

        q.rev = Some("true".into());
        assert!(!to_request(&q, 800, 2000).unwrap().reversed);
    }
}
