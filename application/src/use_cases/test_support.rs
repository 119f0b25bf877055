//! Scripted gateway for use case tests.

use crate::ports::llm_gateway::{ChatRequest, ChatResponse, GatewayError, LlmGateway};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

/// Scripted behavior for one model.
#[derive(Clone)]
pub enum Script {
    Reply(String),
    Fail(GatewayError),
    /// Never answers within any test timeout
    Hang,
}

/// Gateway answering per model from a script; unknown models fail with 500.
#[derive(Default)]
pub struct MockGateway {
    scripts: HashMap<String, Script>,
    missing_credentials: HashSet<String>,
    calls: Mutex<Vec<String>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(mut self, model: &str, script: Script) -> Self {
        self.scripts.insert(model.to_string(), script);
        self
    }

    pub fn without_credentials(mut self, model: &str) -> Self {
        self.missing_credentials.insert(model.to_string());
        self
    }

    /// Models called, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmGateway for MockGateway {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, GatewayError> {
        self.calls.lock().unwrap().push(request.model.clone());
        self.requests.lock().unwrap().push(request.clone());

        match self.scripts.get(&request.model).cloned() {
            Some(Script::Reply(content)) => Ok(ChatResponse {
                id: Some(format!("cmpl-{}", request.model)),
                content,
            }),
            Some(Script::Fail(e)) => Err(e),
            Some(Script::Hang) => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Err(GatewayError::Timeout)
            }
            None => Err(GatewayError::Http {
                status: 500,
                message: format!("no script for {}", request.model),
            }),
        }
    }

    fn check_credentials(&self, model: &str) -> Result<(), GatewayError> {
        if self.missing_credentials.contains(model) {
            Err(GatewayError::MissingCredentials(model.to_string()))
        } else {
            Ok(())
        }
    }
}
