use std::sync::Arc;
use std::time::Duration;

use gifting_core::config::{AppConfig, LoadOptions, MAX_RECOMMENDATIONS_LIMIT};
use gifting_core::{
    EngineSettings, GiftCatalog, GiftType, RecommendationEngine, RecommendationRequest,
    RecommendationResponse,
};

use super::{to_json, CommandResult};
use crate::RecommendArgs;

const COMMAND: &str = "recommend";

pub fn run(args: &RecommendArgs) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(COMMAND, "config_validation", error.to_string(), 2)
        }
    };

    let request = match build_request(args, config.engine.max_recommendations) {
        Ok(request) => request,
        Err(message) => return CommandResult::failure(COMMAND, "invalid_request", message, 3),
    };

    let engine = match build_engine(&config, args.rules_only) {
        Ok(engine) => engine,
        Err(error) => {
            return CommandResult::failure(COMMAND, "generator_setup", error.to_string(), 4)
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                COMMAND,
                "runtime",
                format!("failed to initialize async runtime: {error}"),
                1,
            )
        }
    };

    match runtime.block_on(engine.recommend(&request)) {
        Ok(response) if args.json => CommandResult::ok(to_json(COMMAND, &response)),
        Ok(response) => CommandResult::ok(render_human(&response)),
        Err(error) => CommandResult::failure(COMMAND, "invalid_request", error.to_string(), 3),
    }
}

fn build_request(
    args: &RecommendArgs,
    default_count: usize,
) -> Result<RecommendationRequest, String> {
    let gift_types = args
        .gift_types
        .iter()
        .map(|value| value.parse::<GiftType>())
        .collect::<Result<Vec<_>, _>>()?;

    let count = args.count.unwrap_or(default_count);
    if count > MAX_RECOMMENDATIONS_LIMIT {
        return Err(format!("count {count} exceeds the limit of {MAX_RECOMMENDATIONS_LIMIT}"));
    }

    Ok(RecommendationRequest::new(args.relationship.trim(), args.occasion.trim(), args.budget)
        .with_age_group(args.age_group.trim())
        .with_vibe(args.vibe.trim())
        .with_gender(args.gender.trim())
        .with_notes(args.notes.trim())
        .with_gift_types(gift_types)
        .with_max_recommendations(count))
}

fn build_engine(config: &AppConfig, rules_only: bool) -> anyhow::Result<RecommendationEngine> {
    let settings = EngineSettings {
        max_attempts: config.engine.max_attempts,
        generation_timeout: Duration::from_secs(config.llm.timeout_secs),
    };
    let engine =
        RecommendationEngine::new(Arc::new(GiftCatalog::builtin().clone())).with_settings(settings);

    if rules_only {
        return Ok(engine);
    }

    Ok(match gifting_agent::generator_from_config(&config.llm)? {
        Some(generator) => engine.with_generator(generator),
        None => engine,
    })
}

fn render_human(response: &RecommendationResponse) -> String {
    let source = if response.ai_powered { "llm" } else { "catalog" };
    let mut lines = vec![format!(
        "{} recommendation(s) (source: {source})",
        response.recommendations.len()
    )];
    lines.push(response.thinking_trace.clone());

    for recommendation in &response.recommendations {
        lines.push(format!(
            "{:>2}. {} {} [{}] {}",
            recommendation.id,
            recommendation.icon,
            recommendation.title,
            recommendation.gift_type,
            recommendation.approx_price_inr
        ));
        lines.push(format!("    {}", recommendation.why_applicable));
    }

    lines.push(format!("tip: {}", response.pro_tip));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> RecommendArgs {
        RecommendArgs {
            relationship: " Mother ".to_string(),
            occasion: "Diwali".to_string(),
            budget: 3000,
            age_group: "Adult".to_string(),
            vibe: "Traditional".to_string(),
            gender: String::new(),
            notes: String::new(),
            gift_types: Vec::new(),
            count: None,
            rules_only: true,
            json: false,
        }
    }

    #[test]
    fn request_uses_config_count_when_none_given() {
        let request = build_request(&args(), 7).expect("request should build");
        assert_eq!(request.relationship, "Mother");
        assert_eq!(request.max_recommendations, 7);
        assert!(!request.filters_types());
    }

    #[test]
    fn request_rejects_unknown_gift_type() {
        let mut args = args();
        args.gift_types = vec!["shiny".to_string()];
        let error = build_request(&args, 10).expect_err("unknown type should fail");
        assert!(error.contains("unsupported gift type"));
    }

    #[test]
    fn request_rejects_count_over_limit() {
        let mut args = args();
        args.count = Some(MAX_RECOMMENDATIONS_LIMIT + 1);
        assert!(build_request(&args, 10).is_err());
    }

    #[test]
    fn human_rendering_lists_every_recommendation() {
        let engine = RecommendationEngine::default();
        let request = build_request(&args(), 3).expect("request should build");
        let response = engine.recommend_rules(&request).expect("rules path should succeed");

        let rendered = render_human(&response);
        assert!(rendered.starts_with("3 recommendation(s) (source: catalog)"));
        for title in response.titles() {
            assert!(rendered.contains(title));
        }
        assert!(rendered.contains("tip: "));
    }
}
