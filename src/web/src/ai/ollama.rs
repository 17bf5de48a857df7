use league_core::schedule::{AssistantError, ScheduleAssistant};
use log::debug;
use ollama_rs::generation::completion::request::GenerationRequest;
use ollama_rs::Ollama;

pub struct OllamaAssistant {
    client: Ollama,
    model: String,
}

impl OllamaAssistant {
    pub fn new(host: &str, port: u16, model: &str) -> Self {
        OllamaAssistant {
            client: Ollama::new(host.to_string(), port),
            model: model.to_string(),
        }
    }
}

impl ScheduleAssistant for OllamaAssistant {
    async fn complete(&self, prompt: String) -> Result<String, AssistantError> {
        debug!("ollama: {} prompt of {} chars", self.model, prompt.len());

        let request = GenerationRequest::new(self.model.clone(), prompt);

        self.client
            .generate(request)
            .await
            .map(|response| response.response)
            .map_err(|e| AssistantError::Unavailable(e.to_string()))
    }
}
