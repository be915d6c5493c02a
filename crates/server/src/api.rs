use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use gifting_core::{
    classifier::{OccasionProfile, RelationshipProfile, OCCASIONS, RELATIONSHIPS},
    recommendations::{DEFAULT_AGE_GROUP, DEFAULT_VIBE},
    ApplicationError, DomainError, GiftType, InterfaceError, RecommendationEngine,
    RecommendationRequest, RecommendationResponse,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct ApiState {
    engine: Arc<RecommendationEngine>,
    max_recommendations: usize,
}

impl ApiState {
    pub fn new(engine: Arc<RecommendationEngine>, max_recommendations: usize) -> Self {
        Self { engine, max_recommendations }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecommendBody {
    pub relationship: String,
    pub occasion: String,
    #[serde(default = "default_age_group")]
    pub age_group: String,
    #[serde(default = "default_vibe")]
    pub vibe: String,
    pub budget: i64,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub gift_types: Vec<String>,
}

fn default_age_group() -> String {
    DEFAULT_AGE_GROUP.to_string()
}

fn default_vibe() -> String {
    DEFAULT_VIBE.to_string()
}

impl RecommendBody {
    fn into_request(self, max_recommendations: usize) -> Result<RecommendationRequest, DomainError> {
        let gift_types = self
            .gift_types
            .iter()
            .map(|raw| raw.parse::<GiftType>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|message| DomainError::InvalidField { field: "gift_types", message })?;

        Ok(RecommendationRequest::new(self.relationship.trim(), self.occasion.trim(), self.budget)
            .with_age_group(self.age_group.trim())
            .with_vibe(self.vibe.trim())
            .with_gender(self.gender.trim())
            .with_notes(self.notes.trim())
            .with_gift_types(gift_types)
            .with_max_recommendations(max_recommendations))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ApiError {
    pub error: String,
    pub detail: String,
    pub correlation_id: String,
}

impl From<InterfaceError> for ApiError {
    fn from(error: InterfaceError) -> Self {
        Self {
            error: error.user_message().to_string(),
            detail: error.message().to_string(),
            correlation_id: error.correlation_id().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OccasionList {
    pub occasions: &'static [OccasionProfile],
}

#[derive(Debug, Serialize)]
pub struct RelationshipList {
    pub relationships: &'static [RelationshipProfile],
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

pub fn router(state: ApiState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/recommend", post(recommend))
        .route("/api/v1/recommend", post(recommend))
        .route("/api/v1/occasions", get(list_occasions))
        .route("/api/v1/relationships", get(list_relationships))
        .with_state(state)
        .layer(cors)
}

pub async fn recommend(
    State(state): State<ApiState>,
    payload: Result<Json<RecommendBody>, JsonRejection>,
) -> ApiResult<RecommendationResponse> {
    let correlation_id = Uuid::new_v4().to_string();

    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            return Err(reject(
                ApplicationError::Domain(DomainError::InvalidField {
                    field: "body",
                    message: rejection.body_text(),
                }),
                &correlation_id,
            ));
        }
    };

    let request = body
        .into_request(state.max_recommendations)
        .map_err(|error| reject(error.into(), &correlation_id))?;

    info!(
        event_name = "recommend.request.accepted",
        correlation_id = %correlation_id,
        relationship = %request.relationship,
        occasion = %request.occasion,
        budget = request.budget,
        "recommendation request accepted"
    );

    let response = state
        .engine
        .recommend(&request)
        .await
        .map_err(|error| reject(error.into(), &correlation_id))?;

    info!(
        event_name = "recommend.request.completed",
        correlation_id = %correlation_id,
        count = response.recommendations.len(),
        ai_powered = response.ai_powered,
        "recommendation request completed"
    );

    Ok(Json(response))
}

fn reject(error: ApplicationError, correlation_id: &str) -> (StatusCode, Json<ApiError>) {
    let interface = error.into_interface(correlation_id);
    let status = match interface {
        InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        InterfaceError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        InterfaceError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };

    warn!(
        event_name = "recommend.request.rejected",
        correlation_id = %correlation_id,
        status = status.as_u16(),
        detail = %interface.message(),
        "recommendation request rejected"
    );

    (status, Json(ApiError::from(interface)))
}

pub async fn list_occasions() -> Json<OccasionList> {
    Json(OccasionList { occasions: OCCASIONS })
}

pub async fn list_relationships() -> Json<RelationshipList> {
    Json(RelationshipList { relationships: RELATIONSHIPS })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use gifting_core::{
        GeneratedGift, GenerationError, GenerationRequest, GiftIdeaGenerator,
        RecommendationEngine,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::{router, ApiState};

    struct BrokenGenerator;

    #[async_trait]
    impl GiftIdeaGenerator for BrokenGenerator {
        async fn generate(
            &self,
            _request: &GenerationRequest,
        ) -> Result<Vec<GeneratedGift>, GenerationError> {
            Err(GenerationError::Malformed("not json".to_string()))
        }
    }

    fn app() -> Router {
        router(ApiState::new(Arc::new(RecommendationEngine::default()), 10))
    }

    async fn post_json(app: Router, uri: &str, body: String) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .expect("request should build"),
            )
            .await
            .expect("router should respond");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body should read");
        let value = serde_json::from_slice(&bytes).expect("body should be json");
        (status, value)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request should build"))
            .await
            .expect("router should respond");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body should read");
        (status, serde_json::from_slice(&bytes).expect("body should be json"))
    }

    #[tokio::test]
    async fn recommend_returns_full_response_shape() {
        let body = json!({
            "relationship": "Mother",
            "occasion": "Diwali",
            "age_group": "Senior",
            "vibe": "Traditional",
            "budget": 3000
        });

        let (status, value) = post_json(app(), "/api/v1/recommend", body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["ai_powered"], json!(false));
        assert!(value["pro_tip"].as_str().is_some_and(|tip| tip.contains("Diwali")));
        let recommendations = value["recommendations"].as_array().expect("array");
        assert_eq!(recommendations.len(), 10);
        let first = &recommendations[0];
        assert_eq!(first["id"], json!(1));
        assert!(first["approx_price_inr"].as_str().is_some_and(|price| price.starts_with("Rs.")));
        assert!(first["purchase_links"]["amazon"]
            .as_str()
            .is_some_and(|link| link.starts_with("https://www.amazon.in/s?k=")));
        assert!(first.get("price").is_none());
        assert!(first.get("category").is_none());
    }

    #[tokio::test]
    async fn legacy_path_and_defaults_are_served() {
        let body = json!({ "relationship": "Xyzzy", "occasion": "Unknown", "budget": 500 });
        let (status, value) = post_json(app(), "/recommend", body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert!(value["thinking_trace"]
            .as_str()
            .is_some_and(|trace| trace.contains("Adult age group")
                && trace.contains("Traditional style preference")));
    }

    #[tokio::test]
    async fn padded_fields_match_their_trimmed_form() {
        let padded = json!({
            "relationship": "  Mother ",
            "occasion": "Diwali\t",
            "vibe": " Traditional",
            "budget": 3000
        });
        let trimmed = json!({
            "relationship": "Mother",
            "occasion": "Diwali",
            "vibe": "Traditional",
            "budget": 3000
        });

        let (status, padded) = post_json(app(), "/api/v1/recommend", padded.to_string()).await;
        let (_, trimmed) = post_json(app(), "/api/v1/recommend", trimmed.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(padded, trimmed);
        assert!(padded["thinking_trace"]
            .as_str()
            .is_some_and(|trace| trace.starts_with("Analyzing gift for Mother on Diwali.")));
    }

    #[tokio::test]
    async fn gift_type_filter_is_applied() {
        let body = json!({
            "relationship": "Friend",
            "occasion": "Birthday",
            "budget": 2000,
            "gift_types": ["luxury"]
        });
        let (status, value) = post_json(app(), "/api/v1/recommend", body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        let recommendations = value["recommendations"].as_array().expect("array");
        assert!(!recommendations.is_empty());
        assert!(recommendations.iter().all(|item| item["gift_type"] == json!("Luxury")));
    }

    #[tokio::test]
    async fn malformed_requests_get_bad_request_with_correlation_id() {
        let cases = vec![
            "{not json".to_string(),
            json!({ "occasion": "Diwali", "budget": 3000 }).to_string(),
            json!({ "relationship": "Mother", "occasion": "Diwali", "budget": 50 }).to_string(),
            json!({ "relationship": " ", "occasion": "Diwali", "budget": 3000 }).to_string(),
            json!({ "relationship": "Mother", "occasion": "Diwali", "budget": 3000, "gift_types": ["quirky"] })
                .to_string(),
        ];

        for body in cases {
            let (status, value) = post_json(app(), "/api/v1/recommend", body.clone()).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
            assert!(value["error"].as_str().is_some());
            assert!(value["detail"].as_str().is_some_and(|detail| !detail.is_empty()));
            assert!(value["correlation_id"].as_str().is_some_and(|id| id.len() == 36));
        }
    }

    #[tokio::test]
    async fn broken_generator_still_answers_from_catalog() {
        let engine = RecommendationEngine::default().with_generator(Arc::new(BrokenGenerator));
        let app = router(ApiState::new(Arc::new(engine), 5));
        let body = json!({ "relationship": "Boss", "occasion": "Promotion", "budget": 5000 });

        let (status, value) = post_json(app, "/api/v1/recommend", body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["ai_powered"], json!(false));
        assert_eq!(value["recommendations"].as_array().map(Vec::len), Some(5));
    }

    #[tokio::test]
    async fn listings_expose_tables_with_tags() {
        let (status, occasions) = get_json(app(), "/api/v1/occasions").await;
        assert_eq!(status, StatusCode::OK);
        assert!(occasions["occasions"]
            .as_array()
            .is_some_and(|list| list.iter().any(|o| o["key"] == json!("diwali")
                && o["tag"] == json!("festival"))));

        let (status, relationships) = get_json(app(), "/api/v1/relationships").await;
        assert_eq!(status, StatusCode::OK);
        assert!(relationships["relationships"]
            .as_array()
            .is_some_and(|list| list.iter().any(|r| r["key"] == json!("boss")
                && r["tag"] == json!("professional"))));
    }

    #[tokio::test]
    async fn cors_preflight_is_allowed() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/v1/recommend")
                    .header(header::ORIGIN, "https://example.org")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .expect("request should build"),
            )
            .await
            .expect("router should respond");

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).map(|v| v.as_bytes()),
            Some(&b"*"[..])
        );
    }
}
