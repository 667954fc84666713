use axum::Router;
use combined_events::services::CombinedEventService;

use crate::features::{competitions, entries, event_types, scoring};

pub fn configure(service: CombinedEventService) -> Router {
    let api = Router::new()
        .nest("/event-types", event_types::routes::routes())
        .nest("/scoring", scoring::routes::routes())
        .nest("/entries", entries::routes::routes())
        .nest("/competitions", competitions::routes::routes());

    Router::new().nest("/api", api).with_state(service)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use combined_events::{
        cache::MemoryCache,
        repository::{AllowAllReferences, MemoryCombinedEventStore},
        services::RankingCache,
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;

    fn app() -> Router {
        let service = CombinedEventService::new(
            Arc::new(MemoryCombinedEventStore::new()),
            Arc::new(AllowAllReferences),
            RankingCache::new(Arc::new(MemoryCache::new()), RankingCache::DEFAULT_TTL),
        );
        configure(service)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_event_type_catalog() {
        let app = app();

        let (status, body) = send(&app, "GET", "/api/event-types", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 11);

        let (status, body) = send(&app, "GET", "/api/event-types/DECATHLON/disciplines", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 10);
        assert_eq!(body[0]["discipline"], "100M");
        assert_eq!(body[9]["discipline"], "1500M");
    }

    #[tokio::test]
    async fn test_gender_keyed_programme_needs_gender() {
        let app = app();
        let uri = "/api/event-types/PENTATHLON_OUTDOOR_MASTERS/disciplines";

        let (status, _) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&app, "GET", &format!("{uri}?gender=F"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["discipline"], "100MH");

        let (status, _) = send(&app, "GET", "/api/event-types/OCTATHLON/disciplines", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_scoring_preview() {
        let app = app();

        let (status, body) = send(
            &app,
            "POST",
            "/api/scoring/preview",
            Some(json!({ "discipline": "100M", "performance": "10.85", "gender": "MALE" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["points"], 895);
        assert_eq!(body["plausible"], true);
        assert_eq!(body["kind"], "track");

        let (status, _) = send(
            &app,
            "POST",
            "/api/scoring/preview",
            Some(json!({ "discipline": "100M", "performance": "", "gender": "MALE" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_entry_lifecycle_over_http() {
        let app = app();
        let competition_id = Uuid::new_v4();

        let (status, created) = send(
            &app,
            "POST",
            "/api/entries",
            Some(json!({
                "event_type": "HEPTATHLON",
                "gender": "F",
                "athlete_id": Uuid::new_v4(),
                "competition_id": competition_id,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["results"].as_array().unwrap().len(), 7);
        let id = created["combined_event_id"].as_str().unwrap().to_string();

        let (status, result) = send(
            &app,
            "PUT",
            &format!("/api/entries/{id}/results/200M"),
            Some(json!({ "performance": "23.80", "wind": "0.4" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(result["points"], 1000);
        assert_eq!(result["is_valid"], true);

        let (status, _) = send(
            &app,
            "PUT",
            &format!("/api/entries/{id}/results/PV"),
            Some(json!({ "performance": "4.00" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = send(
            &app,
            "PUT",
            &format!("/api/entries/{id}/results/200M"),
            Some(json!({ "performance": "12.00" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, entry) = send(&app, "GET", &format!("/api/entries/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(entry["total_points"], 1000);
        assert_eq!(entry["is_complete"], false);

        let (status, entry) =
            send(&app, "POST", &format!("/api/entries/{id}/recalculate"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(entry["total_points"], 1000);

        let (status, ranking) = send(
            &app,
            "GET",
            &format!("/api/competitions/{competition_id}/rankings/HEPTATHLON"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ranking[0]["rank"], 1);
        assert_eq!(ranking[0]["combined_event_id"], id.as_str());

        let (status, stats) = send(
            &app,
            "GET",
            &format!("/api/competitions/{competition_id}/statistics"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stats["total_entries"], 1);
        assert_eq!(stats["completed_entries"], 0);

        let (status, entries) = send(
            &app,
            "GET",
            &format!("/api/competitions/{competition_id}/entries?event_type=DECATHLON"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(entries.as_array().unwrap().is_empty());

        let (status, _) = send(&app, "DELETE", &format!("/api/entries/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, "GET", &format!("/api/entries/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_requests() {
        let app = app();

        let (status, _) = send(&app, "GET", "/api/entries/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "POST",
            "/api/entries",
            Some(json!({
                "event_type": "OCTATHLON",
                "gender": "M",
                "athlete_id": Uuid::new_v4(),
                "competition_id": Uuid::new_v4(),
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "PUT",
            &format!("/api/entries/{}/results/XYZ", Uuid::new_v4()),
            Some(json!({ "performance": "10.85" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "PUT",
            &format!("/api/entries/{}/results/100M", Uuid::new_v4()),
            Some(json!({ "performance": "10.85" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
