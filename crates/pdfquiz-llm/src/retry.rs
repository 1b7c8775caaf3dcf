//! Retry with exponential backoff for provider HTTP calls

use crate::LlmError;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Send a request until it succeeds or `max_retries` attempts are used up.
///
/// A 404 is final and maps to [`LlmError::ModelNotAvailable`]; any other
/// client error except 429 is final too. Transport errors, 429 and 5xx are
/// retried with delays of `base_delay`, `2 * base_delay`, `4 * base_delay`, ...
pub(crate) async fn send_with_retry<F, Fut>(
    model: &str,
    max_retries: u32,
    base_delay: Duration,
    mut send: F,
) -> Result<reqwest::Response, LlmError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    let mut attempts = 0;
    let mut last_error = None;

    while attempts < max_retries {
        match send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    return Ok(response);
                } else if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(LlmError::ModelNotAvailable(model.to_string()));
                } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    last_error = Some(LlmError::RateLimitExceeded);
                } else {
                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    let error =
                        LlmError::Communication(format!("HTTP {}: {}", status, error_text));
                    if status.is_client_error() {
                        return Err(error);
                    }
                    last_error = Some(error);
                }
            }
            Err(e) => {
                last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
            }
        }

        attempts += 1;
        if attempts < max_retries {
            let delay = base_delay.saturating_mul(2u32.saturating_pow(attempts - 1));
            debug!("Attempt {} failed, retrying in {:?}", attempts, delay);
            tokio::time::sleep(delay).await;
        }
    }

    Err(last_error
        .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
}

/// Build the HTTP client shared by the providers.
///
/// Idle connections are not pooled: each blocking call drives the client
/// from a short-lived runtime, and pooled connections would outlive it.
pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(0)
        .build()
        .map_err(|e| LlmError::Config(format!("Failed to build HTTP client: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Serve `status_line` to every connection, counting requests
    fn serve(status_line: &'static str) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf) {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                counter.fetch_add(1, Ordering::SeqCst);
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Length: 3\r\nConnection: close\r\n\r\nbad",
                    status_line
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        (url, hits)
    }

    async fn send_to(url: &str, max_retries: u32) -> Result<reqwest::Response, LlmError> {
        let client = http_client(Duration::from_secs(5)).unwrap();
        send_with_retry("m", max_retries, Duration::from_millis(1), || {
            client.get(url).send()
        })
        .await
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let (url, hits) = serve("401 Unauthorized");

        let result = send_to(&url, 3).await;

        assert!(matches!(result, Err(LlmError::Communication(ref m)) if m.contains("401")));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_not_found_maps_to_model_not_available() {
        let (url, hits) = serve("404 Not Found");

        let result = send_to(&url, 3).await;

        assert!(matches!(result, Err(LlmError::ModelNotAvailable(ref m)) if m == "m"));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_server_error_is_retried() {
        let (url, hits) = serve("503 Service Unavailable");

        let result = send_to(&url, 3).await;

        assert!(matches!(result, Err(LlmError::Communication(ref m)) if m.contains("503")));
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_rate_limit_is_retried() {
        let (url, hits) = serve("429 Too Many Requests");

        let result = send_to(&url, 2).await;

        assert!(matches!(result, Err(LlmError::RateLimitExceeded)));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
