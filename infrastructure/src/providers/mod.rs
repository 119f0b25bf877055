pub mod openai;
pub mod routing;

use async_trait::async_trait;
use swarm_application::{ChatRequest, ChatResponse, GatewayError};

/// One chat-completions backend behind the [`routing::RoutingGateway`].
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Provider name as used in `[providers.routing]`.
    fn name(&self) -> &str;
    fn has_credentials(&self) -> bool;
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, GatewayError>;
}
