#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeDelta, TimeZone, Utc};

use pdf_summarizer::application::ports::{
    Clock, FileLoader, FileLoaderError, LlmClient, LlmClientError, LoadedDocument,
};
use pdf_summarizer::domain::{ChatMessage, Document, ProviderId};

/// Page separator understood by [`MockFileLoader`].
pub const PAGE_BREAK: char = '\u{c}';

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
}

pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, by: TimeDelta) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    RateLimited,
    Failed,
}

/// Provider that answers from a script, then repeats `then` forever.
pub struct ScriptedLlmClient {
    provider_id: ProviderId,
    script: Mutex<VecDeque<Reply>>,
    then: Reply,
    calls: AtomicUsize,
    last_messages: Mutex<Vec<ChatMessage>>,
}

impl ScriptedLlmClient {
    pub fn always(name: &str, reply: Reply) -> Arc<Self> {
        Self::scripted(name, Vec::new(), reply)
    }

    pub fn scripted(name: &str, replies: Vec<Reply>, then: Reply) -> Arc<Self> {
        Arc::new(Self {
            provider_id: ProviderId::new(name),
            script: Mutex::new(replies.into()),
            then,
            calls: AtomicUsize::new(0),
            last_messages: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_messages(&self) -> Vec<ChatMessage> {
        self.last_messages.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LlmClient for ScriptedLlmClient {
    fn provider_id(&self) -> &ProviderId {
        &self.provider_id
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_messages.lock().unwrap() = messages.to_vec();

        let reply = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.then.clone());

        match reply {
            Reply::Text(text) => Ok(text),
            Reply::RateLimited => Err(LlmClientError::RateLimited("HTTP 429".to_string())),
            Reply::Failed => Err(LlmClientError::ApiRequestFailed(
                "HTTP 401: invalid api key".to_string(),
            )),
        }
    }
}

pub fn as_providers(clients: &[&Arc<ScriptedLlmClient>]) -> Vec<Arc<dyn LlmClient>> {
    clients
        .iter()
        .map(|c| Arc::clone(c) as Arc<dyn LlmClient>)
        .collect()
}

/// Treats uploads as UTF-8 text with pages separated by form feeds.
#[derive(Default)]
pub struct MockFileLoader {
    extract_calls: AtomicUsize,
}

impl MockFileLoader {
    pub fn extract_calls(&self) -> usize {
        self.extract_calls.load(Ordering::SeqCst)
    }

    fn decode(data: &[u8]) -> Result<&str, FileLoaderError> {
        std::str::from_utf8(data).map_err(|e| FileLoaderError::ExtractionFailed(e.to_string()))
    }
}

#[async_trait::async_trait]
impl FileLoader for MockFileLoader {
    async fn load(
        &self,
        data: &[u8],
        _doc: &Document,
        max_pages: usize,
    ) -> Result<LoadedDocument, FileLoaderError> {
        let pages: Vec<&str> = Self::decode(data)?.split(PAGE_BREAK).collect();
        if pages.len() > max_pages {
            return Ok(LoadedDocument::OverPageLimit {
                page_count: pages.len(),
            });
        }

        self.extract_calls.fetch_add(1, Ordering::SeqCst);
        Ok(LoadedDocument::Extracted {
            page_count: pages.len(),
            text: pages.join("\n"),
        })
    }
}

pub fn pages(texts: &[&str]) -> Vec<u8> {
    texts.join(&PAGE_BREAK.to_string()).into_bytes()
}
