//! Explanation generation via a chat completion model.

use crate::config::{ComplexityLevel, OpenAISettings, Prompts};
use crate::error::{ExplainError, Result};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, error, info, instrument};

/// Produces a difficulty-leveled explanation of some content.
#[async_trait]
pub trait Explainer: Send + Sync {
    async fn explain(&self, content: &str, level: ComplexityLevel) -> Result<String>;
}

/// Explainer backed by the OpenAI chat completion API.
pub struct OpenAIExplainer {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    settings: OpenAISettings,
    prompts: Prompts,
}

impl OpenAIExplainer {
    pub fn new(settings: OpenAISettings) -> Result<Self> {
        Ok(Self {
            client: create_client()?,
            settings,
            prompts: Prompts::default(),
        })
    }

    /// Set custom prompts.
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Build the two-message completion request.
    #[allow(deprecated)]
    fn build_request(
        &self,
        content: &str,
        level: ComplexityLevel,
    ) -> Result<CreateChatCompletionRequest> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.prompts.system.clone())
                .build()
                .map_err(|e| ExplainError::OpenAI(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(self.prompts.render_user_message(level, content))
                .build()
                .map_err(|e| ExplainError::OpenAI(e.to_string()))?
                .into(),
        ];

        CreateChatCompletionRequestArgs::default()
            .model(&self.settings.model)
            .messages(messages)
            .max_tokens(self.settings.max_tokens)
            .temperature(self.settings.temperature)
            .build()
            .map_err(|e| ExplainError::OpenAI(e.to_string()))
    }
}

#[async_trait]
impl Explainer for OpenAIExplainer {
    #[instrument(skip(self, content), fields(model = %self.settings.model, chars = content.len()))]
    async fn explain(&self, content: &str, level: ComplexityLevel) -> Result<String> {
        info!(
            "Generating explanation with {} for complexity level: {}",
            self.settings.model, level
        );

        let request = self.build_request(content, level)?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            error!("Error generating explanation: {}", e);
            ExplainError::OpenAI(e.to_string())
        })?;

        let explanation = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| ExplainError::OpenAI("Empty response from model".to_string()))?
            .clone();

        debug!("Generated explanation of {} characters", explanation.len());
        Ok(explanation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn explainer() -> OpenAIExplainer {
        OpenAIExplainer::new(OpenAISettings {
            model: "gpt-4o-mini".to_string(),
            max_tokens: 321,
            temperature: 0.3,
        })
        .unwrap()
    }

    #[test]
    fn test_request_shape() {
        let request = explainer()
            .build_request("Mitochondria make ATP.", ComplexityLevel::Child)
            .unwrap();

        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.temperature, Some(0.3));

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["max_tokens"], 321);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");

        let user = json["messages"][1]["content"].as_str().unwrap();
        assert!(user.starts_with(&Prompts::default().child));
        assert!(user.ends_with("\n\nMitochondria make ATP."));
    }

    #[test]
    fn test_custom_prompts_are_used() {
        let prompts = Prompts {
            system: "You are a patient tutor.".to_string(),
            ..Prompts::default()
        };
        let request = explainer()
            .with_prompts(prompts)
            .build_request("x", ComplexityLevel::Expert)
            .unwrap();

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["content"], "You are a patient tutor.");
    }
}
