use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{StableMatchRequest, StableMatchResponse, HealthResponse, ErrorResponse};
use crate::core::Matcher;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/stable", web::post().to(stable_matches));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

fn validation_failed(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message,
        status_code: 400,
    })
}

/// Stable matching endpoint
///
/// POST /api/v1/matches/stable
///
/// Request body:
/// ```json
/// {
///   "scores": [[0, 9], [4, 0]],
///   "identities": ["Male", "Female"],
///   "preferences": ["Women", "Men"],
///   "partition": { "strategy": "random", "seed": 7 }
/// }
/// ```
async fn stable_matches(
    state: web::Data<AppState>,
    req: web::Json<StableMatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for stable match request: field_errors={:?}", errors);
        return validation_failed(errors.to_string());
    }

    let input = match req.to_input() {
        Ok(input) => input,
        Err(e) => {
            tracing::info!("Rejected stable match request: {}", e);
            return validation_failed(e.to_string());
        }
    };

    let run_id = uuid::Uuid::new_v4().to_string();
    let strategy = req.partition.as_ref().unwrap_or_else(|| state.matcher.strategy());

    tracing::info!(
        "Running stable matching {} for {} participants ({:?})",
        run_id,
        input.len(),
        strategy
    );

    let outcome = match state.matcher.run_with(&input, strategy) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::info!("Stable matching {} rejected: {}", run_id, e);
            return validation_failed(e.to_string());
        }
    };

    HttpResponse::Ok().json(StableMatchResponse {
        run_id,
        matches: outcome.matches,
        unmatched: outcome.unmatched,
        total_participants: input.len(),
        proposals: outcome.proposals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use crate::models::{Match, PartitionStrategy};
    use serde_json::json;

    fn app_state() -> AppState {
        AppState {
            matcher: Matcher::new(PartitionStrategy::Alternating),
        }
    }

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(
            App::new().service(web::scope("/api/v1").configure(configure)),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/health").to_request();
        let resp: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp.status, "healthy");
    }

    #[actix_web::test]
    async fn test_stable_matches_scenario() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state()))
                .service(web::scope("/api/v1").configure(configure)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/matches/stable")
            .set_json(json!({
                "scores": [[0, 9, 0, 1], [9, 0, 2, 0], [0, 7, 0, 5], [4, 0, 6, 0]],
                "identities": ["Male", "Female", "Male", "Female"],
                "preferences": ["Women", "Men", "Women", "Men"]
            }))
            .to_request();
        let resp: StableMatchResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(
            resp.matches,
            vec![
                Match { proposer_id: 0, receiver_id: 1 },
                Match { proposer_id: 2, receiver_id: 3 },
            ]
        );
        assert!(resp.unmatched.is_empty());
        assert_eq!(resp.total_participants, 4);
    }

    #[actix_web::test]
    async fn test_stable_matches_rejects_unknown_label() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state()))
                .service(web::scope("/api/v1").configure(configure)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/matches/stable")
            .set_json(json!({
                "scores": [[0, 1], [1, 0]],
                "identities": ["Male", "Martian"],
                "preferences": ["Women", "Men"]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert!(body.message.contains("Martian"));
    }

    #[actix_web::test]
    async fn test_stable_matches_rejects_bad_partition() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state()))
                .service(web::scope("/api/v1").configure(configure)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/matches/stable")
            .set_json(json!({
                "scores": [[0, 1], [1, 0]],
                "identities": ["Male", "Female"],
                "preferences": ["Women", "Men"],
                "partition": { "strategy": "explicit", "proposers": [5] }
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
