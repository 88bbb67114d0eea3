use crate::config::AppConfig;
use crate::model::ScraperError;
use crate::scraper::traits::Scraper;

use rand::Rng;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::thread::sleep;
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct ScraperImpl {
    client: Client,
    max_retries: u32,
    retry_base_delay: Duration,
}

impl ScraperImpl {
    pub fn new(config: &AppConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ScraperError::Client(e.to_string()))?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
            retry_base_delay: Duration::from_millis(config.retry_base_delay_ms),
        })
    }

    fn fetch_once(&self, url: &str) -> Result<String, ScraperError> {
        let response = self.client.get(url).send().map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::Status(status.as_u16()));
        }

        response.text().map_err(map_reqwest_error)
    }

    /// Exponential delay for the given 0-based attempt, plus up to 50% jitter.
    fn backoff(&self, attempt: u32) -> Duration {
        let base = self.retry_base_delay.saturating_mul(1u32 << attempt.min(16));
        let jitter_ms = (base.as_millis() / 2) as u64;
        let jitter = rand::rng().random_range(0..=jitter_ms);
        base + Duration::from_millis(jitter)
    }
}

impl Scraper for ScraperImpl {
    fn fetch(&self, url: &str) -> Result<String, ScraperError> {
        let mut attempt = 0;
        loop {
            debug!("GET {} (attempt {})", url, attempt + 1);
            match self.fetch_once(url) {
                Ok(body) => {
                    info!("Fetched {} bytes from {}", body.len(), url);
                    return Ok(body);
                }
                Err(e) if attempt < self.max_retries && is_retryable(&e) => {
                    let delay = self.backoff(attempt);
                    warn!("Fetch attempt {} failed: {}; retrying in {:?}", attempt + 1, e, delay);
                    sleep(delay);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

fn map_reqwest_error(e: reqwest::Error) -> ScraperError {
    if e.is_timeout() {
        ScraperError::Timeout
    } else {
        ScraperError::Http(e.to_string())
    }
}

fn is_retryable(err: &ScraperError) -> bool {
    match err {
        ScraperError::Http(_) | ScraperError::Timeout => true,
        ScraperError::Status(code) => {
            *code == StatusCode::TOO_MANY_REQUESTS.as_u16() || (500..600).contains(code)
        }
        ScraperError::Client(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    /// Serves one canned response per entry, in order, then stops.
    fn serve(responses: Vec<(u16, &'static str)>) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/miniloto/data/list1/", listener.local_addr().unwrap());
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        thread::spawn(move || {
            for (status, body) in responses {
                let Ok((mut stream, _)) = listener.accept() else { return };
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                counter.fetch_add(1, Ordering::SeqCst);
                let reply = format!(
                    "HTTP/1.1 {} X\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(reply.as_bytes());
            }
        });

        (url, hits)
    }

    fn scraper(max_retries: u32) -> ScraperImpl {
        let config = AppConfig {
            max_retries,
            retry_base_delay_ms: 0,
            timeout_seconds: 5,
            ..AppConfig::default()
        };
        ScraperImpl::new(&config).unwrap()
    }

    #[test]
    fn returns_body_on_success() {
        let (url, hits) = serve(vec![(200, "<table><tr><td>1</td></tr></table>")]);
        let body = scraper(0).fetch(&url).unwrap();
        assert_eq!(body, "<table><tr><td>1</td></tr></table>");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn non_success_status_is_an_error() {
        let (url, _) = serve(vec![(404, "missing")]);
        let err = scraper(0).fetch(&url).unwrap_err();
        assert!(matches!(err, ScraperError::Status(404)));
    }

    #[test]
    fn client_errors_are_not_retried() {
        let (url, hits) = serve(vec![(404, "missing"), (200, "ok")]);
        let err = scraper(3).fetch(&url).unwrap_err();
        assert!(matches!(err, ScraperError::Status(404)));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn server_errors_are_retried() {
        let (url, hits) = serve(vec![(503, "busy"), (500, "oops"), (200, "ok")]);
        let body = scraper(2).fetch(&url).unwrap();
        assert_eq!(body, "ok");
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn gives_up_after_max_retries() {
        let (url, hits) = serve(vec![(503, "busy"), (503, "busy")]);
        let err = scraper(1).fetch(&url).unwrap_err();
        assert!(matches!(err, ScraperError::Status(503)));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn unreachable_host_is_an_http_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        drop(listener);
        let err = scraper(0).fetch(&url).unwrap_err();
        assert!(matches!(err, ScraperError::Http(_) | ScraperError::Timeout));
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        let config = AppConfig {
            retry_base_delay_ms: 100,
            ..AppConfig::default()
        };
        let s = ScraperImpl::new(&config).unwrap();
        let first = s.backoff(0);
        let third = s.backoff(2);
        assert!(first >= Duration::from_millis(100) && first <= Duration::from_millis(150));
        assert!(third >= Duration::from_millis(400) && third <= Duration::from_millis(600));
    }
}
