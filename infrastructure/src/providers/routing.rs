use super::ProviderAdapter;
use super::openai::OpenAiCompatibleProvider;
use crate::config::FileProvidersConfig;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use swarm_application::{ChatRequest, ChatResponse, GatewayError, LlmGateway};
use tracing::warn;

/// [`LlmGateway`] that sends each request to the provider owning its model.
pub struct RoutingGateway {
    providers: Vec<Arc<dyn ProviderAdapter>>,
    /// Model name to provider index, from `[providers.routing]`.
    explicit_model_routing: HashMap<String, usize>,
    default_provider: String,
}

impl RoutingGateway {
    pub fn new(
        providers: Vec<Arc<dyn ProviderAdapter>>,
        routing: &HashMap<String, String>,
        default_provider: impl Into<String>,
    ) -> Self {
        let mut explicit_model_routing = HashMap::new();

        for (model_name, provider_name) in routing {
            match providers.iter().position(|p| p.name() == provider_name) {
                Some(idx) => {
                    explicit_model_routing.insert(model_name.clone(), idx);
                }
                None => warn!(
                    model = %model_name,
                    provider = %provider_name,
                    "Ignoring route to unknown provider"
                ),
            }
        }

        Self {
            providers,
            explicit_model_routing,
            default_provider: default_provider.into(),
        }
    }

    /// Build the OpenRouter and OpenAI endpoints from config.
    pub fn from_config(config: &FileProvidersConfig) -> Self {
        let providers = config
            .endpoints()
            .into_iter()
            .map(|(name, endpoint)| {
                Arc::new(OpenAiCompatibleProvider::from_config(name, &endpoint))
                    as Arc<dyn ProviderAdapter>
            })
            .collect();
        Self::new(providers, &config.routing, config.default.clone())
    }

    /// Routing priority:
    ///  1. `explicit_model_routing` entry for the model
    ///  2. the provider named by `default_provider`
    ///  3. the first registered provider
    fn resolve_provider(&self, model: &str) -> Result<&dyn ProviderAdapter, GatewayError> {
        if let Some(&idx) = self.explicit_model_routing.get(model) {
            return Ok(self.providers[idx].as_ref());
        }

        if let Some(p) = self
            .providers
            .iter()
            .find(|p| p.name() == self.default_provider)
        {
            return Ok(p.as_ref());
        }

        self.providers
            .first()
            .map(|p| p.as_ref())
            .ok_or_else(|| GatewayError::RequestFailed("No providers available".to_string()))
    }

    /// Name of the provider that would serve `model`.
    pub fn provider_for(&self, model: &str) -> Option<&str> {
        self.resolve_provider(model).ok().map(|p| p.name())
    }
}

#[async_trait]
impl LlmGateway for RoutingGateway {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, GatewayError> {
        self.resolve_provider(&request.model)?.complete(request).await
    }

    fn check_credentials(&self, model: &str) -> Result<(), GatewayError> {
        let provider = self.resolve_provider(model)?;
        if provider.has_credentials() {
            Ok(())
        } else {
            Err(GatewayError::MissingCredentials(format!(
                "{model} (provider '{}' has no API key)",
                provider.name()
            )))
        }
    }
}
