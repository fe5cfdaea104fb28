//! Axum route definitions for the DecayViz API.

use crate::api::handlers::{self, DecayApiState};
use axum::routing::{get, post};
use axum::Router;
use server::health_handler;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create all API routes under `prefix`.
///
/// An empty prefix (or `/`) mounts the routes at the root.
///
/// # Routes
///
/// - `POST {prefix}/decay-chain` - Decay-chain diagram for one isotope
/// - `POST {prefix}/evolution` - Inventory evolution chart
/// - `GET {prefix}/units` - Accepted time and y-axis units
/// - `GET {prefix}/health` - Liveness
pub fn create_router(state: Arc<DecayApiState>, prefix: &str) -> Router {
    let api = Router::new()
        .route("/decay-chain", post(handlers::decay_chain))
        .route("/evolution", post(handlers::evolution))
        .route("/units", get(handlers::units))
        .route("/health", get(health_handler))
        .with_state(state);

    let prefix = prefix.trim_end_matches('/');
    let router = if prefix.is_empty() {
        api
    } else {
        Router::new().nest(prefix, api)
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{EvolutionDefaults, RenderSettings};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use base64::{engine::general_purpose, Engine as _};
    use decay::Dataset;
    use render::FigureSize;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn router(prefix: &str) -> Router {
        let state = DecayApiState::new(
            Dataset::embedded(),
            RenderSettings {
                dpi: 50,
                chain_figure: FigureSize::new(8.0, 5.0),
                evolution_figure: FigureSize::new(8.0, 4.0),
            },
            EvolutionDefaults {
                samples: 30,
                ..EvolutionDefaults::default()
            },
        );
        create_router(Arc::new(state), prefix)
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn decode_png(value: &Value) -> Vec<u8> {
        general_purpose::STANDARD
            .decode(value.as_str().unwrap())
            .unwrap()
    }

    #[tokio::test]
    async fn test_decay_chain_known_isotope() {
        let (status, body) = send(
            router("/api"),
            post_json("/api/decay-chain", json!({"isotope": "Tc-99m"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(&decode_png(&body["image"])[..8], &PNG_SIGNATURE);
        assert!(body["metadata"]["width"].as_u64().unwrap() > 0);
        assert!(body["metadata"]["height"].as_u64().unwrap() > 0);
        assert_eq!(body["metadata"]["dpi"], 50);

        let node = &body["nodes"]["Tc-99m"];
        assert_eq!(node["data"]["label"], "Tc-99m");
        assert_eq!(node["data"]["atomic_number"], 43);
        assert!(node["position"]["x"].as_f64().unwrap() > 0.0);
        assert!(body["nodes"]["Tc-99"].is_object());
    }

    #[tokio::test]
    async fn test_decay_chain_unknown_isotope() {
        let (status, body) = send(
            router("/api"),
            post_json("/api/decay-chain", json!({"isotope": "Xx-999"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .starts_with("Failed to generate decay chain: "));
    }

    #[tokio::test]
    async fn test_decay_chain_blank_and_malformed() {
        let (status, body) = send(
            router("/api"),
            post_json("/api/decay-chain", json!({"isotope": "  "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "isotope must not be empty");

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/decay-chain")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(router("/api"), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn test_evolution_fraction_values() {
        let (status, body) = send(
            router("/api"),
            post_json(
                "/api/evolution",
                json!({
                    "nuclides": [{"isotope": "Bi-212", "quantity": 1.0, "unit": "kBq"}],
                    "time_period": 2,
                    "time_unit": "h",
                    "y_unit": "activity_frac"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(&decode_png(&body["image"])[..8], &PNG_SIGNATURE);
        assert_eq!(body["metadata"]["time_unit"], "h");
        assert_eq!(body["metadata"]["y_unit"], "activity_frac");
        assert_eq!(body["plot_data"]["time"].as_array().unwrap().len(), 30);

        let decay = body["plot_data"]["decay"].as_object().unwrap();
        assert!(decay.contains_key("Tl-208"));
        for series in decay.values() {
            for value in series.as_array().unwrap() {
                let v = value.as_f64().unwrap();
                assert!((0.0..=1.0).contains(&v), "{} outside [0, 1]", v);
            }
        }
    }

    #[tokio::test]
    async fn test_evolution_defaults_and_invalid_entries() {
        let (status, body) = send(
            router("/api"),
            post_json(
                "/api/evolution",
                json!({"nuclides": [{"isotope": "I-131", "quantity": 5.0}]}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["metadata"]["time_unit"], "d");
        assert_eq!(body["metadata"]["y_unit"], "Bq");
        assert_eq!(body["metadata"]["nuclides"], json!(["I-131", "Xe-131m", "Xe-131"]));

        for nuclides in [json!([]), json!([{"isotope": ""}, {"quantity": 3.0}])] {
            let (status, body) = send(
                router("/api"),
                post_json("/api/evolution", json!({ "nuclides": nuclides })),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(
                body["detail"],
                "Failed to generate evolution plot: no valid nuclides provided"
            );
        }
    }

    #[tokio::test]
    async fn test_evolution_unknown_unit() {
        let (status, body) = send(
            router("/api"),
            post_json(
                "/api/evolution",
                json!({
                    "nuclides": [{"isotope": "Co-60", "quantity": 1.0}],
                    "y_unit": "furlongs"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().contains("furlongs"));
    }

    #[tokio::test]
    async fn test_units_catalog() {
        let (status, body) = send(router("/api"), get("/api/units")).await;
        assert_eq!(status, StatusCode::OK);

        let categories = body["y_units"].as_object().unwrap();
        let mut keys: Vec<&str> = categories.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["activity", "amount", "fraction", "mass"]);
        assert_eq!(
            body["y_units"]["fraction"],
            json!(["activity_frac", "mass_frac", "mol_frac"])
        );
        assert_eq!(body["time_units"], json!(["s", "m", "h", "d", "y"]));
    }

    #[tokio::test]
    async fn test_health_and_prefixes() {
        let (status, body) = send(router("/api"), get("/api/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));

        let (status, body) = send(router(""), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));

        let response = router("/api").oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_headers() {
        let request = Request::builder()
            .uri("/api/health")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let response = router("/api").oneshot(request).await.unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }
}
