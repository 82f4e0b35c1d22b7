//! OTP adapter against a mock planner (wiremock-based)

use std::time::Duration;

use application::{ApplicationError, PlannerRequest, RoutePlannerPort, TripSchedule};
use domain::{Coordinate, TravelMode};
use infrastructure::{OtpPlannerAdapter, RetryConfig};
use integration_otp::OtpConfig;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PLAN_PATH: &str = "/otp/routers/default/plan";
const ROUTER_PATH: &str = "/otp/routers/default";

fn plan_body() -> serde_json::Value {
    serde_json::json!({
        "plan": {
            "itineraries": [{
                "duration": 18000,
                "startTime": 1_700_000_000_000_i64,
                "endTime": 1_700_018_000_000_i64,
                "walkDistance": 1200.0,
                "transitDistance": 45000.0,
                "legs": [{
                    "mode": "CAR",
                    "from": {"name": "Origin", "lat": 12.9716, "lon": 77.5946},
                    "to": {"lat": 13.0827, "lon": 80.2707},
                    "distance": 46200.0,
                    "duration": 18000.0,
                    "steps": [{"relativeDirection": "DEPART"}]
                }]
            }]
        }
    })
}

fn full_request() -> PlannerRequest {
    PlannerRequest {
        from: Coordinate::new(12.9716, 77.5946),
        to: Coordinate::new(13.0827, 80.2707),
        mode: TravelMode::Car,
        schedule: Some(TripSchedule {
            date: "2026-10-19".to_string(),
            time: "08:00:00".to_string(),
            arrive_by: false,
        }),
        timeout: Duration::from_secs(2),
    }
}

fn adapter_for(server: &MockServer) -> OtpPlannerAdapter {
    OtpPlannerAdapter::from_config(&OtpConfig::for_testing(server.uri())).unwrap()
}

#[tokio::test]
async fn returns_first_itinerary() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PLAN_PATH))
        .and(query_param("date", "2026-10-19"))
        .respond_with(ResponseTemplate::new(200).set_body_json(plan_body()))
        .expect(1)
        .mount(&server)
        .await;

    let itinerary = adapter_for(&server)
        .first_itinerary(&full_request())
        .await
        .unwrap()
        .unwrap();

    assert!((itinerary.duration_secs - 18_000.0).abs() < f64::EPSILON);
    assert_eq!(itinerary.transit_distance_m, Some(45_000.0));
    let leg = &itinerary.legs[0];
    assert_eq!(leg.mode, "CAR");
    assert_eq!(leg.from.name.as_deref(), Some("Origin"));
    assert!(leg.to.name.is_none());
    assert_eq!(leg.steps.as_ref().map(Vec::len), Some(1));
}

#[tokio::test]
async fn empty_or_missing_plan_is_none() {
    for body in [
        serde_json::json!({"plan": {"itineraries": []}}),
        serde_json::json!({"error": {"id": 404, "msg": "No trip found.", "message": "PATH_NOT_FOUND"}}),
    ] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(PLAN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let result = adapter_for(&server)
            .first_itinerary(&full_request())
            .await
            .unwrap();
        assert!(result.is_none());
    }
}

#[tokio::test]
async fn upstream_404_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PLAN_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = adapter_for(&server)
        .first_itinerary(&full_request())
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::UpstreamNotFound));
}

#[tokio::test]
async fn refused_connection_maps_to_unavailable() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let adapter =
        OtpPlannerAdapter::from_config(&OtpConfig::for_testing(format!("http://127.0.0.1:{port}")))
            .unwrap();

    let err = adapter.first_itinerary(&full_request()).await.unwrap_err();
    assert!(matches!(err, ApplicationError::UpstreamUnavailable(_)), "got {err:?}");

    let err = adapter.probe(Duration::from_secs(1)).await.unwrap_err();
    assert!(matches!(err, ApplicationError::UpstreamUnavailable(_)), "got {err:?}");
}

#[tokio::test]
async fn server_error_carries_upstream_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PLAN_PATH))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({"message": "Graph not loaded"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = adapter_for(&server)
        .first_itinerary(&full_request())
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::ExternalService(ref m) if m == "Graph not loaded"));
}

#[tokio::test]
async fn retries_when_configured() {
    let server = MockServer::start().await;

    // Mounted first, so it answers until exhausted
    Mock::given(method("GET"))
        .and(path(PLAN_PATH))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(PLAN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(plan_body()))
        .mount(&server)
        .await;

    let retry = RetryConfig {
        initial_delay_ms: 5,
        ..RetryConfig::with_max_retries(1)
    }
    .without_jitter();
    let adapter = adapter_for(&server).with_retry(retry);

    let itinerary = adapter.first_itinerary(&full_request()).await.unwrap();
    assert!(itinerary.is_some());
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn probe_succeeds_on_2xx() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ROUTER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"routerId": "default"})))
        .mount(&server)
        .await;

    assert!(adapter_for(&server).probe(Duration::from_secs(1)).await.is_ok());
}

#[tokio::test]
async fn probe_fails_on_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ROUTER_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let err = adapter_for(&server)
        .probe(Duration::from_secs(1))
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::ExternalService(_)));
}
