//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use consolekit::host::{HostBridge, LocalFrame, MessageKind, TabDescriptor};
use consolekit::net::{ApiRequest, RawResponse, Transport, TransportFailure};
use consolekit::ConsoleError;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Replays canned outcomes and records every request it receives.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Result<RawResponse, TransportFailure>>>,
    requests: Mutex<Vec<ApiRequest>>,
    delay: Option<Duration>,
}

impl MockTransport {
    pub fn replying(replies: Vec<Result<RawResponse, TransportFailure>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Self::default()
        }
    }

    pub fn json(status: u16, body: &str) -> Self {
        Self::replying(vec![Ok(RawResponse::new(status, body))])
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::json(200, r#"{"code":0,"data":null}"#)
        }
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, TransportFailure> {
        self.requests.lock().unwrap().push(request);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportFailure("no reply queued".to_string())))
    }
}

/// One observed host interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shown {
    Toast(MessageKind, String),
    Alert { title: String, message: String },
    Back,
    Tab(String),
}

/// Bridge that records calls, or refuses all of them when `reachable` is false.
pub struct RecordingBridge {
    reachable: bool,
    shown: Mutex<Vec<Shown>>,
}

impl RecordingBridge {
    pub fn reachable() -> Self {
        Self {
            reachable: true,
            shown: Mutex::new(Vec::new()),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            reachable: false,
            shown: Mutex::new(Vec::new()),
        }
    }

    pub fn shown(&self) -> Vec<Shown> {
        self.shown.lock().unwrap().clone()
    }

    fn record(&self, shown: Shown) -> Result<(), ConsoleError> {
        if !self.reachable {
            return Err(ConsoleError::HostUnreachable("cross-origin parent".to_string()));
        }
        self.shown.lock().unwrap().push(shown);
        Ok(())
    }
}

#[async_trait]
impl HostBridge for RecordingBridge {
    fn notify(&self, message: &str, kind: MessageKind) -> Result<(), ConsoleError> {
        self.record(Shown::Toast(kind, message.to_string()))
    }

    fn alert(&self, message: &str, title: &str) -> Result<(), ConsoleError> {
        self.record(Shown::Alert {
            title: title.to_string(),
            message: message.to_string(),
        })
    }

    async fn confirm(&self, message: &str, title: &str) -> Result<bool, ConsoleError> {
        self.alert(message, title).map(|()| true)
    }

    async fn prompt(&self, message: &str, title: &str) -> Result<Option<String>, ConsoleError> {
        self.alert(message, title).map(|()| Some("from shell".to_string()))
    }

    fn navigate_back(&self) -> Result<(), ConsoleError> {
        self.record(Shown::Back)
    }

    fn open_tab(&self, tab: &TabDescriptor) -> Result<(), ConsoleError> {
        self.record(Shown::Tab(tab.url.clone()))
    }

    fn close_modal(&self) -> Result<(), ConsoleError> {
        self.record(Shown::Back)
    }

    fn reload_tab(&self) -> Result<(), ConsoleError> {
        self.record(Shown::Back)
    }

    fn close_tab(&self) -> Result<(), ConsoleError> {
        self.record(Shown::Back)
    }
}

/// Local frame that records which fallbacks ran.
#[derive(Default)]
pub struct RecordingFrame {
    calls: Mutex<Vec<String>>,
}

impl RecordingFrame {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

impl LocalFrame for RecordingFrame {
    fn alert(&self, message: &str) {
        self.record(format!("alert:{message}"));
    }

    fn confirm(&self, message: &str) -> bool {
        self.record(format!("confirm:{message}"));
        false
    }

    fn prompt(&self, message: &str) -> Option<String> {
        self.record(format!("prompt:{message}"));
        None
    }

    fn history_back(&self) {
        self.record("history_back");
    }

    fn open_window(&self, url: &str, target: &str) {
        self.record(format!("open:{url}:{target}"));
    }

    fn reload(&self) {
        self.record("reload");
    }

    fn close_modal(&self) {
        self.record("close_modal");
    }
}
