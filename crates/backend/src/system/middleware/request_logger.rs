use axum::body::to_bytes;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;

use crate::shared::format::format_number;

/// Middleware для логирования HTTP запросов
///
/// Одна строка на запрос: время (MSK), длительность, размер ответа,
/// статус, метод и путь. Статические файлы фронтенда не логируются.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    if !is_logged_path(&path) {
        return response;
    }

    let (parts, body) = response.into_parts();
    let timestamp = (Utc::now() + chrono::Duration::hours(3)).format("%H:%M:%S");

    // Читаем тело ответа, чтобы узнать реальный размер
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(_) => {
            println!(
                "\x1b[33m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
                timestamp,
                start.elapsed().as_millis(),
                "error",
                parts.status.as_u16(),
                method,
                path
            );
            return Response::from_parts(parts, Body::default());
        }
    };

    println!(
        "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
        status_color(parts.status),
        timestamp,
        start.elapsed().as_millis(),
        format_number(bytes.len()),
        parts.status.as_u16(),
        method,
        path
    );

    Response::from_parts(parts, Body::from(bytes))
}

fn is_logged_path(path: &str) -> bool {
    path.starts_with("/api") || path == "/health"
}

/// Голубой для 2xx, коричневый для 4xx, красный для 5xx
fn status_color(status: StatusCode) -> &'static str {
    if status.is_server_error() {
        "31"
    } else if status.is_success() {
        "36"
    } else {
        "33"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_api_requests_logged() {
        assert!(is_logged_path("/api/dashboard"));
        assert!(is_logged_path("/health"));
        assert!(!is_logged_path("/index.html"));
        assert!(!is_logged_path("/frontend_bg.wasm"));
    }

    #[test]
    fn test_status_color() {
        assert_eq!(status_color(StatusCode::OK), "36");
        assert_eq!(status_color(StatusCode::BAD_REQUEST), "33");
        assert_eq!(status_color(StatusCode::BAD_GATEWAY), "31");
    }
}
