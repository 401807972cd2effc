//! Google Gemini REST client.
//!
//! One `gemini_rust::Gemini` client is created lazily per model name and
//! reused. Each `generate` performs exactly one upstream call.
//!
//! # Example
//!
//! ```no_run
//! use msight_models::GeminiClient;
//! use msight_core::{GenerateRequest, Message};
//! use msight_interface::GenerationDriver;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new()?;
//!
//! let request = GenerateRequest::builder()
//!     .messages(vec![
//!         Message::system("You are a Researcher."),
//!         Message::user("Analyze the scraped data and extract key insights."),
//!     ])
//!     .model(Some("gemini-2.5-flash".to_string()))
//!     .build()?;
//! let response = client.generate(&request).await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::env;
use std::sync::{Arc, Mutex};
use tracing::{debug, instrument, warn};

use gemini_rust::{Gemini, client::Model};

use msight_core::{GenerateRequest, GenerateResponse, Role};
use msight_error::{ConfigError, GeminiError, GeminiErrorKind, MsightError, MsightResult};
use msight_interface::GenerationDriver;

use super::GeminiResult;

/// Default model when neither the request nor the constructor names one.
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Gemini text-generation driver.
pub struct GeminiClient {
    /// Model-specific REST clients, created on first use
    clients: Arc<Mutex<HashMap<String, Gemini>>>,
    /// API key for creating new clients
    api_key: String,
    /// Default model name when req.model is None
    model_name: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let client_count = self.clients.lock().map(|c| c.len()).unwrap_or_default();
        f.debug_struct("GeminiClient")
            .field("model_name", &self.model_name)
            .field("cached_clients", &client_count)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Convert a model name string to a gemini-rust Model enum variant.
    ///
    /// - "gemini-2.5-flash" → Model::Gemini25Flash
    /// - "gemini-2.0-flash" → Model::Custom("models/gemini-2.0-flash")
    /// - "models/gemini-2.0-flash" → Model::Custom("models/gemini-2.0-flash")
    fn model_name_to_enum(name: &str) -> Model {
        match name {
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-flash-lite" => Model::Gemini25FlashLite,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            other if other.starts_with("models/") => Model::Custom(other.to_string()),
            other => Model::Custom(format!("models/{}", other)),
        }
    }

    /// Create a client for the default model.
    ///
    /// Reads the API key from the `GEMINI_API_KEY` environment variable.
    #[instrument(name = "gemini_client_new")]
    pub fn new() -> MsightResult<Self> {
        Self::with_model(DEFAULT_MODEL)
    }

    /// Create a client whose default model is `model_name`.
    ///
    /// Reads the API key from the `GEMINI_API_KEY` environment variable.
    #[instrument(name = "gemini_client_with_model")]
    pub fn with_model(model_name: &str) -> MsightResult<Self> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| MsightError::from(GeminiError::new(GeminiErrorKind::MissingApiKey)))?;

        Self::with_api_key(api_key, model_name)
    }

    /// Create a client from an explicit API key.
    pub fn with_api_key(api_key: impl Into<String>, model_name: &str) -> MsightResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GeminiError::new(GeminiErrorKind::MissingApiKey).into());
        }

        Ok(Self {
            clients: Arc::new(Mutex::new(HashMap::new())),
            api_key,
            model_name: model_name.to_string(),
        })
    }

    /// Get or create the REST client for a model.
    fn client_for(&self, model_name: &str) -> GeminiResult<Gemini> {
        let mut clients = self.clients.lock().map_err(|e| {
            GeminiError::new(GeminiErrorKind::ClientCreation(format!(
                "client cache poisoned: {}",
                e
            )))
        })?;

        if let Some(client) = clients.get(model_name) {
            return Ok(client.clone());
        }

        debug!(model = model_name, "Creating Gemini client");
        let client = Gemini::with_model(&self.api_key, Self::model_name_to_enum(model_name))
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))?;
        clients.insert(model_name.to_string(), client.clone());
        Ok(client)
    }

    /// Gemini takes the output token limit as an `i32`.
    fn max_output_tokens(max_tokens: u32) -> Result<i32, ConfigError> {
        i32::try_from(max_tokens).map_err(|_| {
            ConfigError::new(format!(
                "max_tokens {} exceeds the Gemini limit of {}",
                max_tokens,
                i32::MAX
            ))
        })
    }

    /// Build and send one request. Upstream failures surface as `GeminiError`.
    async fn generate_internal(&self, req: &GenerateRequest) -> MsightResult<GenerateResponse> {
        let model_name = req.model().as_ref().unwrap_or(&self.model_name);
        let client = self.client_for(model_name)?;

        let mut builder = client.generate_content();
        let mut system_prompt: Option<&str> = None;

        for msg in req.messages() {
            match msg.role {
                // Gemini takes a separate system instruction
                Role::System => system_prompt = Some(&msg.content),
                Role::User => builder = builder.with_user_message(&msg.content),
                Role::Assistant => builder = builder.with_model_message(&msg.content),
            }
        }

        if let Some(prompt) = system_prompt {
            builder = builder.with_system_prompt(prompt);
        }

        if let Some(temp) = req.temperature() {
            builder = builder.with_temperature(*temp);
        }

        if let Some(max_tok) = req.max_tokens() {
            builder = builder.with_max_output_tokens(Self::max_output_tokens(*max_tok)?);
        }

        let response = builder.execute().await.map_err(|e| {
            let err = Self::parse_gemini_error(e);
            warn!(model = %model_name, error = %err, "Gemini request failed");
            err
        })?;

        Ok(GenerateResponse::new(response.text()))
    }

    /// Parse gemini-rust errors to extract HTTP status codes.
    fn parse_gemini_error(err: impl std::fmt::Display) -> GeminiError {
        let err_msg = err.to_string();

        // Example: "bad response from server; code 503; description: ..."
        if let Some(status_code) = Self::extract_status_code(&err_msg) {
            GeminiError::new(GeminiErrorKind::HttpError {
                status_code,
                message: err_msg,
            })
        } else {
            GeminiError::new(GeminiErrorKind::ApiRequest(err_msg))
        }
    }

    /// Extract HTTP status code from error message string.
    fn extract_status_code(error_msg: &str) -> Option<u16> {
        let code_start = error_msg.find("code ")?;
        let code_str = &error_msg[code_start + 5..];
        let end = code_str
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(code_str.len());
        code_str[..end].parse().ok()
    }
}

#[async_trait]
impl GenerationDriver for GeminiClient {
    #[instrument(
        skip(self, req),
        fields(
            model = req.model().as_deref().unwrap_or(&self.model_name),
            messages = req.messages().len()
        )
    )]
    async fn generate(&self, req: &GenerateRequest) -> MsightResult<GenerateResponse> {
        self.generate_internal(req).await
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    /// Returns the default model name used when `GenerateRequest.model` is None.
    fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_name_mapping() {
        assert!(matches!(
            GeminiClient::model_name_to_enum("gemini-2.5-flash"),
            Model::Gemini25Flash
        ));
        match GeminiClient::model_name_to_enum("gemini-2.0-flash") {
            Model::Custom(name) => assert_eq!(name, "models/gemini-2.0-flash"),
            _ => panic!("expected a custom model"),
        }
        match GeminiClient::model_name_to_enum("models/gemini-2.0-flash") {
            Model::Custom(name) => assert_eq!(name, "models/gemini-2.0-flash"),
            _ => panic!("expected a custom model"),
        }
    }

    #[test]
    fn test_status_code_extraction() {
        assert_eq!(
            GeminiClient::extract_status_code("bad response from server; code 503; description: x"),
            Some(503)
        );
        assert_eq!(GeminiClient::extract_status_code("code 429"), Some(429));
        assert_eq!(GeminiClient::extract_status_code("connection reset"), None);
    }

    #[test]
    fn test_parse_error_kinds() {
        let err = GeminiClient::parse_gemini_error("bad response from server; code 429; quota");
        assert!(matches!(
            err.kind,
            GeminiErrorKind::HttpError { status_code: 429, .. }
        ));

        let err = GeminiClient::parse_gemini_error("dns failure");
        assert!(matches!(err.kind, GeminiErrorKind::ApiRequest(_)));
    }

    #[test]
    fn test_max_tokens_beyond_i32_rejected() {
        assert_eq!(GeminiClient::max_output_tokens(1024).unwrap(), 1024);
        assert_eq!(
            GeminiClient::max_output_tokens(i32::MAX as u32).unwrap(),
            i32::MAX
        );

        let err = GeminiClient::max_output_tokens(u32::MAX).unwrap_err();
        assert!(err.message.contains("4294967295"));
    }

    #[test]
    fn test_blank_api_key_rejected() {
        assert!(GeminiClient::with_api_key("  ", DEFAULT_MODEL).is_err());
        let client = GeminiClient::with_api_key("test-key", "gemini-2.5-pro").unwrap();
        assert_eq!(client.model_name(), "gemini-2.5-pro");
        assert_eq!(client.provider_name(), "gemini");
    }
}
