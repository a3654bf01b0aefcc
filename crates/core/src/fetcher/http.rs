//! Retrying HTTP fetcher implementation.

use std::time::Duration;

use async_trait::async_trait;
use chardetng::EncodingDetector;
use rand::seq::SliceRandom;
use reqwest::Client;
use tracing::{info, warn};

use super::{FetchError, FetcherConfig, PageFetcher};

/// HTTP fetcher with user-agent rotation, optional proxy, bounded retry with
/// exponential backoff, and charset-sniffing body decoding.
pub struct HttpFetcher {
    client: Client,
    config: FetcherConfig,
}

impl HttpFetcher {
    /// Build a fetcher from config.
    pub fn new(config: FetcherConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            // The site this targets serves stale certificates; the original
            // disables verification outright.
            .danger_accept_invalid_certs(true);

        if let Some(proxy_url) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| FetchError::Client(format!("invalid proxy {}: {}", proxy_url, e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Build a fetcher with default configuration.
    pub fn with_defaults() -> Result<Self, FetchError> {
        Self::new(FetcherConfig::default())
    }

    fn pick_user_agent(&self) -> &str {
        self.config
            .user_agents
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
            .unwrap_or("Mozilla/5.0")
    }

    /// Sleep duration before retrying after the 0-indexed `attempt`.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        Duration::from_secs_f64(self.config.backoff_factor * 2f64.powi(attempt as i32))
    }

    async fn fetch_once(&self, url: &str) -> Result<String, reqwest::Error> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", self.pick_user_agent())
            .send()
            .await?
            .error_for_status()?;

        let bytes = response.bytes().await?;
        Ok(decode_body(&bytes))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let attempts = self.config.max_retries.max(1);
        let mut last_error = String::new();

        for attempt in 0..attempts {
            match self.fetch_once(url).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    warn!(
                        "Attempt {}/{} failed for {}: {}",
                        attempt + 1,
                        attempts,
                        url,
                        e
                    );
                    last_error = e.to_string();
                    if attempt + 1 < attempts {
                        let delay = self.backoff_delay(attempt);
                        info!("Retrying {} in {:.1}s", url, delay.as_secs_f64());
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        Err(FetchError::Exhausted {
            url: url.to_string(),
            attempts,
            reason: last_error,
        })
    }
}

/// Decode a response body: sniffed encoding first, then GBK, then lossy
/// UTF-8. Never fails.
fn decode_body(bytes: &[u8]) -> String {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);

    let (text, _, had_errors) = encoding.decode(bytes);
    if !had_errors {
        return text.into_owned();
    }

    let (text, _, had_errors) = encoding_rs::GBK.decode(bytes);
    if !had_errors {
        return text.into_owned();
    }

    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_schedule_doubles_per_attempt() {
        let fetcher = HttpFetcher::new(FetcherConfig {
            backoff_factor: 1.0,
            ..FetcherConfig::default()
        })
        .unwrap();

        assert_eq!(fetcher.backoff_delay(0), Duration::from_secs(1));
        assert_eq!(fetcher.backoff_delay(1), Duration::from_secs(2));
        assert_eq!(fetcher.backoff_delay(2), Duration::from_secs(4));
    }

    #[test]
    fn total_backoff_for_n_attempts() {
        // For N attempts there are N-1 sleeps: backoff * (2^0 + ... + 2^(N-2)).
        let n = 5u32;
        let backoff = 0.5f64;
        let fetcher = HttpFetcher::new(FetcherConfig {
            max_retries: n,
            backoff_factor: backoff,
            ..FetcherConfig::default()
        })
        .unwrap();

        let total: f64 = (0..n - 1)
            .map(|attempt| fetcher.backoff_delay(attempt).as_secs_f64())
            .sum();
        let expected: f64 = backoff * (0..n - 1).map(|i| 2f64.powi(i as i32)).sum::<f64>();
        assert!((total - expected).abs() < 1e-9);
        assert!((expected - 7.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn exhausted_retries_propagate_the_failure() {
        let fetcher = HttpFetcher::new(FetcherConfig {
            max_retries: 2,
            backoff_factor: 0.0,
            timeout_secs: 1,
            ..FetcherConfig::default()
        })
        .unwrap();

        // Port 1 is never listening; every attempt fails fast.
        let result = fetcher.fetch("http://127.0.0.1:1/").await;
        match result {
            Err(FetchError::Exhausted { attempts, .. }) => assert_eq!(attempts, 2),
            other => panic!("expected Exhausted, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn decode_utf8_passthrough() {
        assert_eq!(decode_body("电影天堂 movie heaven".as_bytes()), "电影天堂 movie heaven");
    }

    #[test]
    fn decode_gbk_body() {
        let original = "最新电影下载 2023年科幻片《流浪地球2》迅雷下载";
        let (encoded, _, _) = encoding_rs::GBK.encode(original);
        assert_eq!(decode_body(&encoded), original);
    }

    #[test]
    fn decode_garbage_never_panics() {
        let garbage = [0xff, 0xfe, 0x00, 0x81, 0x40, 0xff];
        let _ = decode_body(&garbage);
    }

    #[test]
    fn invalid_proxy_is_rejected() {
        let result = HttpFetcher::new(FetcherConfig {
            proxy: Some("::not a proxy::".to_string()),
            ..FetcherConfig::default()
        });
        assert!(matches!(result, Err(FetchError::Client(_))));
    }
}
