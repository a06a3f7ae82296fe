//! The echo handler.
//!
//! # Response body
//! ```text
//! Content-Type: application/json      ← one line per header value
//! X-A: 1
//! X-A: 2
//! {"a":1}                             ← transformed body, no trailing newline
//! ```
//!
//! Malformed input never produces an error status: an unreadable body is
//! treated as empty and unparsable JSON is echoed as `null`.

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderMap, Request},
    response::{IntoResponse, Response},
};

use crate::http::server::EchoState;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Handler registered for every method and path.
pub async fn echo_handler(State(state): State<EchoState>, request: Request<Body>) -> Response {
    let delay = state.transform.delay();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let (parts, body) = request.into_parts();

    let mut out = Vec::new();
    write_headers(&parts.headers, &mut out);

    let body = read_body(body, state.max_body_bytes).await;
    out.extend_from_slice(&state.transform.apply(&body));

    ([(header::CONTENT_TYPE, TEXT_PLAIN)], out).into_response()
}

/// Append one `Name: value` line per header value.
///
/// Names appear in the order they were first received; repeated values of a
/// name keep their received order.
pub fn write_headers(headers: &HeaderMap, out: &mut Vec<u8>) {
    for name in headers.keys() {
        let canonical = canonical_header_name(name.as_str());
        for value in headers.get_all(name) {
            out.extend_from_slice(canonical.as_bytes());
            out.extend_from_slice(b": ");
            out.extend_from_slice(String::from_utf8_lossy(value.as_bytes()).as_bytes());
            out.push(b'\n');
        }
    }
}

/// Render a header name in canonical MIME form (`x-request-id` → `X-Request-Id`).
pub fn canonical_header_name(name: &str) -> String {
    let mut upper = true;
    name.chars()
        .map(|c| {
            let mapped = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            mapped
        })
        .collect()
}

/// Read the whole body, treating any read failure as an empty body.
///
/// A body over `limit` counts as a failure. The client still gets a 200, so
/// the dropped body is logged at `warn`.
pub async fn read_body(body: Body, limit: usize) -> Bytes {
    match axum::body::to_bytes(body, limit).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, limit, "Failed to read request body, treating as empty");
            Bytes::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use std::sync::{Arc, Mutex};

    #[test]
    fn canonical_names() {
        assert_eq!(canonical_header_name("x-a"), "X-A");
        assert_eq!(canonical_header_name("content-type"), "Content-Type");
        assert_eq!(canonical_header_name("x-request-id"), "X-Request-Id");
        assert_eq!(canonical_header_name("host"), "Host");
        assert_eq!(canonical_header_name("www-authenticate"), "Www-Authenticate");
    }

    #[test]
    fn multi_valued_headers_repeat_in_order() {
        let mut headers = HeaderMap::new();
        headers.append("x-a", HeaderValue::from_static("1"));
        headers.append("x-b", HeaderValue::from_static("3"));
        headers.append("x-a", HeaderValue::from_static("2"));

        let mut out = Vec::new();
        write_headers(&headers, &mut out);

        assert_eq!(String::from_utf8(out).unwrap(), "X-A: 1\nX-A: 2\nX-B: 3\n");
    }

    #[test]
    fn no_headers_no_lines() {
        let mut out = Vec::new();
        write_headers(&HeaderMap::new(), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn non_utf8_value_rendered_lossily() {
        let mut headers = HeaderMap::new();
        headers.insert("x-bin", HeaderValue::from_bytes(b"a\xffb").unwrap());

        let mut out = Vec::new();
        write_headers(&headers, &mut out);

        assert_eq!(String::from_utf8(out).unwrap(), "X-Bin: a\u{fffd}b\n");
    }

    #[tokio::test]
    async fn read_body_collects_everything() {
        let body = read_body(Body::from("hello"), 1024).await;
        assert_eq!(&body[..], b"hello");
    }

    #[tokio::test]
    async fn oversized_body_reads_as_empty_and_warns() {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let sink = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || LogSink(sink.clone()))
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let body = read_body(Body::from(vec![b'x'; 64]), 16).await;

        assert!(body.is_empty());
        let logs = String::from_utf8(captured.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("WARN"), "unexpected logs: {logs}");
        assert!(logs.contains("limit=16"), "unexpected logs: {logs}");
    }

    struct LogSink(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for LogSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }
}
