//! HTTP tests for `CoingeckoHttp` against a local responder.
//!
//! Each accepted connection is answered with the next canned response, so
//! the number of recorded requests is the number of attempts.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use merge_coingecko::action::{LogLevel, MemoryContext};
use merge_coingecko::domain::asset::AssetItem;
use merge_coingecko::domain::market::{filter_recognized, MarketLookup};
use merge_coingecko::error::HttpError;
use merge_coingecko::http::{CoingeckoHttp, RetryConfig};
use merge_coingecko::shared::HistorySlug;

#[derive(Clone)]
struct Canned {
    status: u16,
    body: &'static str,
    delay: Duration,
}

fn reply(status: u16, body: &'static str) -> Canned {
    Canned {
        status,
        body,
        delay: Duration::ZERO,
    }
}

struct Responder {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl Responder {
    async fn start(responses: Vec<Canned>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let queue = Arc::new(Mutex::new(VecDeque::from(responses)));

        let seen = requests.clone();
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let canned = queue
                    .lock()
                    .unwrap()
                    .pop_front()
                    .unwrap_or_else(|| reply(500, "exhausted"));
                tokio::spawn(answer(socket, canned, seen.clone()));
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn client(&self, retry: RetryConfig) -> CoingeckoHttp {
        CoingeckoHttp::new(&self.base_url, "test-key")
            .unwrap()
            .with_timeout(Duration::from_secs(5))
            .with_retry(retry)
    }
}

async fn answer(mut socket: TcpStream, canned: Canned, seen: Arc<Mutex<Vec<String>>>) {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
    seen.lock().unwrap().push(String::from_utf8_lossy(&head).into_owned());

    tokio::time::sleep(canned.delay).await;
    let response = format!(
        "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        canned.status,
        canned.body.len(),
        canned.body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

fn fast_retry(max_attempts: u32) -> RetryConfig {
    RetryConfig {
        max_attempts,
        initial_delay: Duration::from_millis(5),
        max_delay: Duration::from_millis(20),
        ..RetryConfig::default()
    }
}

fn ids(slugs: &[&str]) -> Vec<HistorySlug> {
    slugs.iter().map(|s| HistorySlug::from(*s)).collect()
}

#[tokio::test]
async fn test_recognized_ids_and_request_shape() {
    let server = Responder::start(vec![reply(
        200,
        r#"[{"id":"polkadot","symbol":"dot"},{"id":"kusama","symbol":"ksm"}]"#,
    )])
    .await;
    let http = server.client(fast_retry(3));

    let known = http
        .recognized_ids(&ids(&["polkadot", "kusama", "acala"]))
        .await
        .unwrap();

    assert_eq!(known.len(), 2);
    assert!(known.contains("polkadot") && known.contains("kusama"));

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let head = requests[0].to_lowercase();
    assert!(
        head.starts_with("get /coins/markets?vs_currency=usd&ids=polkadot,kusama,acala "),
        "{head}"
    );
    assert!(head.contains("x-cg-pro-api-key: test-key"), "{head}");
}

#[tokio::test]
async fn test_server_error_is_retried() {
    let server = Responder::start(vec![
        reply(500, r#"{"error":"internal"}"#),
        reply(200, r#"[{"id":"polkadot"}]"#),
    ])
    .await;

    let known = server
        .client(fast_retry(3))
        .recognized_ids(&ids(&["polkadot"]))
        .await
        .unwrap();

    assert!(known.contains("polkadot"));
    assert_eq!(server.requests().len(), 2);
}

#[tokio::test]
async fn test_client_error_status_is_retried() {
    let server = Responder::start(vec![
        reply(429, r#"{"status":{"error_code":429}}"#),
        reply(401, r#"{"status":{"error_code":10002}}"#),
        reply(200, "[]"),
    ])
    .await;

    let known = server
        .client(fast_retry(3))
        .recognized_ids(&ids(&["polkadot"]))
        .await
        .unwrap();

    assert!(known.is_empty());
    assert_eq!(server.requests().len(), 3);
}

#[tokio::test]
async fn test_gives_up_after_max_attempts() {
    let server = Responder::start(vec![
        reply(503, "down"),
        reply(503, "down"),
        reply(503, "down"),
        reply(200, r#"[{"id":"polkadot"}]"#),
    ])
    .await;

    let err = server
        .client(fast_retry(3))
        .recognized_ids(&ids(&["polkadot"]))
        .await
        .unwrap_err();

    match err {
        HttpError::MaxRetriesExceeded {
            attempts,
            last_error,
        } => {
            assert_eq!(attempts, 3);
            assert!(last_error.contains("503"), "{last_error}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(server.requests().len(), 3);
}

#[tokio::test]
async fn test_malformed_body_is_not_retried() {
    let server = Responder::start(vec![reply(200, r#"{"not":"an array"}"#), reply(200, "[]")]).await;

    let err = server
        .client(fast_retry(3))
        .recognized_ids(&ids(&["polkadot"]))
        .await
        .unwrap_err();

    assert!(matches!(err, HttpError::Reqwest(ref e) if e.is_decode()), "{err:?}");
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn test_attempt_timeout() {
    let server = Responder::start(vec![Canned {
        status: 200,
        body: "[]",
        delay: Duration::from_secs(2),
    }])
    .await;

    let err = server
        .client(fast_retry(1))
        .with_timeout(Duration::from_millis(100))
        .recognized_ids(&ids(&["polkadot"]))
        .await
        .unwrap_err();

    match err {
        HttpError::MaxRetriesExceeded { last_error, .. } => {
            assert_eq!(last_error, "Request timeout after 100ms");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_timeout_ends_only_that_attempt() {
    let server = Responder::start(vec![
        Canned {
            status: 200,
            body: "[]",
            delay: Duration::from_secs(2),
        },
        reply(200, r#"[{"id":"polkadot"}]"#),
    ])
    .await;

    let known = server
        .client(fast_retry(2))
        .with_timeout(Duration::from_millis(200))
        .recognized_ids(&ids(&["polkadot"]))
        .await
        .unwrap();

    assert!(known.contains("polkadot"));
    assert_eq!(server.requests().len(), 2);
}

#[tokio::test]
async fn test_filter_degrades_when_api_is_down() {
    let server = Responder::start(vec![reply(502, ""), reply(502, ""), reply(502, "")]).await;
    let http = server.client(fast_retry(3));
    let ctx = MemoryContext::new();
    let items = vec![
        AssetItem::new("DOT", "polkadot", vec!["0:polkadot".to_string()]),
        AssetItem::new("KSM", "kusama", vec![]),
    ];

    let kept = filter_recognized(items.clone(), &http, &ctx).await;

    assert_eq!(kept, items);
    assert_eq!(server.requests().len(), 3);
    assert_eq!(
        ctx.messages(LogLevel::Warning),
        vec!["Returning original data without filtering due to fetch error"]
    );
}
