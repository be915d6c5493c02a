use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use gifting_core::config::{AppConfig, ConfigError, LoadOptions};
use gifting_core::{EngineSettings, GiftCatalog, RecommendationEngine};
use thiserror::Error;
use tracing::info;

use crate::{api, health};

pub struct Application {
    pub config: AppConfig,
    pub engine: Arc<RecommendationEngine>,
}

impl Application {
    pub fn router(&self) -> Router {
        let state = api::ApiState::new(self.engine.clone(), self.config.engine.max_recommendations);
        Router::new().merge(health::router()).merge(api::router(state))
    }
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("llm client setup failed: {0}")]
    Generator(#[source] anyhow::Error),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let settings = EngineSettings {
        max_attempts: config.engine.max_attempts,
        generation_timeout: Duration::from_secs(config.llm.timeout_secs),
    };
    let mut engine =
        RecommendationEngine::new(Arc::new(GiftCatalog::builtin().clone())).with_settings(settings);

    match gifting_agent::generator_from_config(&config.llm).map_err(BootstrapError::Generator)? {
        Some(generator) => {
            info!(
                event_name = "system.bootstrap.generator_enabled",
                correlation_id = "bootstrap",
                provider = config.llm.provider.as_str(),
                model = %config.llm.model,
                "llm gift generator enabled"
            );
            engine = engine.with_generator(generator);
        }
        None => {
            info!(
                event_name = "system.bootstrap.generator_disabled",
                correlation_id = "bootstrap",
                provider = config.llm.provider.as_str(),
                "no llm credentials configured, serving catalog picks only"
            );
        }
    }

    Ok(Application { config, engine: Arc::new(engine) })
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use gifting_core::config::{ConfigOverrides, LlmProvider, LoadOptions};
    use tower::ServiceExt;

    use crate::bootstrap::bootstrap;

    #[tokio::test]
    async fn bootstrap_without_credentials_runs_catalog_only() {
        let app = bootstrap(LoadOptions {
            overrides: ConfigOverrides {
                llm_provider: Some(LlmProvider::Anthropic),
                max_recommendations: Some(6),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .await
        .expect("bootstrap should succeed without credentials");

        assert!(!app.engine.has_generator());
        assert_eq!(app.config.engine.max_recommendations, 6);

        let response = app
            .router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).expect("request"))
            .await
            .expect("router should respond");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn bootstrap_with_api_key_enables_generator() {
        let app = bootstrap(LoadOptions {
            overrides: ConfigOverrides {
                llm_provider: Some(LlmProvider::OpenAi),
                llm_api_key: Some("sk-test".to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .await
        .expect("bootstrap should succeed");

        assert!(app.engine.has_generator());
    }

    #[tokio::test]
    async fn invalid_config_fails_fast() {
        let result = bootstrap(LoadOptions {
            overrides: ConfigOverrides { max_recommendations: Some(0), ..ConfigOverrides::default() },
            ..LoadOptions::default()
        })
        .await;

        let message = result.err().map(|error| error.to_string()).unwrap_or_default();
        assert!(message.contains("engine.max_recommendations"));
    }
}
