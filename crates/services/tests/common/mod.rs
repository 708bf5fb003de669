#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use quiz_core::model::Question;
use reqwest::StatusCode;
use services::{
    DiagnosticsRecorder, FixtureQuestionProvider, ProviderError, QuestionProvider, QuizSession,
    RecordingPresenter, SessionOptions,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const FIXTURE: &str = include_str!("../../fixtures/questions.json");

pub fn fixture_questions() -> Vec<Question> {
    serde_json::from_str(FIXTURE).expect("fixture parses")
}

/// Counts fetches and either serves questions or fails with a fixed status.
pub struct CountingProvider {
    questions: Vec<Question>,
    fail_with: Option<StatusCode>,
    fetches: AtomicUsize,
}

impl CountingProvider {
    pub fn serving(questions: Vec<Question>) -> Self {
        Self {
            questions,
            fail_with: None,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn failing(status: StatusCode) -> Self {
        Self {
            questions: Vec::new(),
            fail_with: Some(status),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuestionProvider for CountingProvider {
    async fn fetch_questions(&self) -> Result<Vec<Question>, ProviderError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match self.fail_with {
            Some(status) => Err(ProviderError::HttpStatus(status)),
            None => Ok(self.questions.clone()),
        }
    }
}

pub struct Harness {
    pub session: QuizSession,
    pub presenter: Arc<RecordingPresenter>,
    pub diagnostics: Arc<DiagnosticsRecorder>,
}

pub fn harness(provider: Arc<dyn QuestionProvider>) -> Harness {
    let presenter = Arc::new(RecordingPresenter::new());
    let diagnostics = Arc::new(DiagnosticsRecorder::new());
    let session = QuizSession::new(provider, presenter.clone())
        .with_options(SessionOptions {
            clock: quiz_core::time::fixed_clock(),
            ..SessionOptions::default()
        })
        .with_diagnostics(diagnostics.clone());
    Harness {
        session,
        presenter,
        diagnostics,
    }
}

pub fn fixture_harness() -> Harness {
    harness(Arc::new(FixtureQuestionProvider::bundled().expect("bundled fixture")))
}

/// Serves exactly one HTTP response and yields the request line it received.
pub async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("accept");
        let mut request = Vec::new();
        let mut buf = [0_u8; 1024];
        loop {
            let n = stream.read(&mut buf).await.expect("read request");
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            if request.windows(4).any(|window| window == b"\r\n\r\n") {
                break;
            }
        }
        stream
            .write_all(response.as_bytes())
            .await
            .expect("write response");
        let _ = stream.shutdown().await;
        String::from_utf8_lossy(&request)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    });

    (format!("http://{addr}"), handle)
}

pub fn direct_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("client")
}
