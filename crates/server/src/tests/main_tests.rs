use super::*;
use std::time::Duration;

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
};
use shared::{
    domain::{LaunchRecord, TargetId},
    error::{ApiError, ErrorCode},
    figure::Figure,
    protocol::CallbackResponse,
};
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tower::ServiceExt;

fn test_app() -> Router {
    let record = |site: &str, payload: f64, class: u8, category: &str| LaunchRecord {
        launch_site: site.to_string(),
        payload_mass_kg: payload,
        class,
        booster_version_category: category.to_string(),
    };
    let dataset = Dataset::from_records(
        "router",
        vec![
            record("CCAFS LC-40", 500.0, 0, "v1.0"),
            record("CCAFS LC-40", 1500.0, 1, "v1.1"),
            record("CCAFS LC-40", 3000.0, 1, "FT"),
            record("KSC LC-39A", 2500.0, 1, "FT"),
            record("KSC LC-39A", 5300.0, 0, "FT"),
        ],
    )
    .expect("dataset");
    let state = AppState::new(DashboardContext::new(Arc::new(dataset)).expect("context"));
    build_router(Arc::new(state), 4 * 1024)
}

async fn get_json<T: serde::de::DeserializeOwned>(app: Router, uri: &str) -> (StatusCode, T) {
    let request = Request::get(uri).body(Body::empty()).expect("request");
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, serde_json::from_slice(&body).expect("json"))
}

#[tokio::test]
async fn healthz_reports_ok() {
    let request = Request::get("/healthz")
        .body(Body::empty())
        .expect("request");
    let response = test_app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(body.as_ref(), b"ok");
}

#[tokio::test]
async fn index_serves_dashboard_page() {
    let request = Request::get("/").body(Body::empty()).expect("request");
    let response = test_app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let html = String::from_utf8(body.to_vec()).expect("utf8");
    assert!(html.contains("SpaceX Launch Records Dashboard"));
    assert!(html.contains(r#"id="payload-slider""#));
}

#[tokio::test]
async fn layout_route_exposes_initial_state() {
    let (status, layout): (_, serde_json::Value) = get_json(test_app(), "/api/layout").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(layout["initial_state"]["site"], "ALL");
    assert_eq!(
        layout["initial_state"]["payload_range"],
        serde_json::json!([500.0, 5300.0])
    );
}

#[tokio::test]
async fn dataset_route_reports_summary() {
    let (status, summary): (_, dataset::DatasetSummary) =
        get_json(test_app(), "/api/dataset").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary.record_count, 5);
    assert_eq!(summary.success_count, 3);
}

#[tokio::test]
async fn pie_route_defaults_to_all_sites() {
    let (status, figure): (_, Figure) = get_json(test_app(), "/api/figures/pie").await;
    assert_eq!(status, StatusCode::OK);
    let pie = figure.pie_trace().expect("pie");
    assert_eq!(pie.labels, vec!["CCAFS LC-40", "KSC LC-39A"]);
    assert_eq!(pie.values, vec![2, 1]);
}

#[tokio::test]
async fn pie_route_for_site_splits_outcomes() {
    let (status, figure): (_, Figure) =
        get_json(test_app(), "/api/figures/pie?site=KSC%20LC-39A").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(figure.pie_trace().expect("pie").values, vec![1, 1]);
    assert_eq!(figure.layout.title.text, "Launch Success for KSC LC-39A");
}

#[tokio::test]
async fn scatter_route_filters_site_by_range() {
    let (status, figure): (_, Figure) = get_json(
        test_app(),
        "/api/figures/scatter?site=CCAFS%20LC-40&low=1000&high=3000",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(figure.point_count(), 2);
}

#[tokio::test]
async fn scatter_route_rejects_inverted_range() {
    let (status, error): (_, ApiError) =
        get_json(test_app(), "/api/figures/scatter?low=3000&high=1000").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error.code, ErrorCode::Validation);
}

#[tokio::test]
async fn callbacks_route_reruns_dependent_charts() {
    let request = Request::post("/api/callbacks")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::json!({
                "state": { "site": "CCAFS LC-40", "payload_range": [1000, 2000] },
                "changed": ["payload-slider"]
            })
            .to_string(),
        ))
        .expect("request");
    let response = test_app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let response: CallbackResponse = serde_json::from_slice(&body).expect("json");
    assert_eq!(response.updates.len(), 1);
    assert_eq!(
        response.updates[0].target,
        TargetId::SuccessPayloadScatterChart
    );
    assert_eq!(response.updates[0].figure.point_count(), 1);
}

#[tokio::test]
async fn callbacks_route_maps_bad_body_to_api_error() {
    let request = Request::post("/api/callbacks")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::json!({
                "state": { "site": "ALL", "payload_range": [2000, 1000] }
            })
            .to_string(),
        ))
        .expect("request");
    let response = test_app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let error: ApiError = serde_json::from_slice(&body).expect("json");
    assert_eq!(error.code, ErrorCode::Validation);
}

#[tokio::test]
async fn oversized_callback_body_is_refused() {
    let padding = "x".repeat(8 * 1024);
    let request = Request::post("/api/callbacks")
        .header("content-type", "application/json")
        .body(Body::from(format!(r#"{{"padding":"{padding}"}}"#)))
        .expect("request");
    let response = test_app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

async fn next_server_event<S>(socket: &mut S) -> ServerEvent
where
    S: futures::Stream<
            Item = Result<WsMessage, tokio_tungstenite::tungstenite::Error>,
        > + Unpin,
{
    let message = tokio::time::timeout(Duration::from_secs(5), socket.next())
        .await
        .expect("frame before timeout")
        .expect("socket open")
        .expect("frame");
    match message {
        WsMessage::Text(text) => serde_json::from_str(&text).expect("server event"),
        other => panic!("unexpected frame {other:?}"),
    }
}

fn updated_target(event: &ServerEvent) -> TargetId {
    match event {
        ServerEvent::FigureUpdated { target, .. } => *target,
        ServerEvent::Error(error) => panic!("unexpected error event {error:?}"),
    }
}

#[tokio::test]
async fn websocket_session_renders_on_connect_and_on_change() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, test_app()).await });

    let (mut socket, _) = tokio_tungstenite::connect_async(format!("ws://{addr}/ws"))
        .await
        .expect("connect");

    let first = next_server_event(&mut socket).await;
    let second = next_server_event(&mut socket).await;
    assert_eq!(updated_target(&first), TargetId::SuccessPieChart);
    assert_eq!(updated_target(&second), TargetId::SuccessPayloadScatterChart);
    let ServerEvent::FigureUpdated { figure, .. } = &second else {
        unreachable!();
    };
    assert_eq!(figure.point_count(), 5);

    socket
        .send(WsMessage::Text(
            r#"{"type":"control_changed","payload":{"control":"site-dropdown","value":"KSC LC-39A"}}"#
                .to_string(),
        ))
        .await
        .expect("send site change");
    let pie = next_server_event(&mut socket).await;
    let scatter = next_server_event(&mut socket).await;
    let ServerEvent::FigureUpdated { target, figure } = &pie else {
        panic!("expected pie update");
    };
    assert_eq!(*target, TargetId::SuccessPieChart);
    assert_eq!(figure.pie_trace().expect("pie").values, vec![1, 1]);
    let ServerEvent::FigureUpdated { target, figure } = &scatter else {
        panic!("expected scatter update");
    };
    assert_eq!(*target, TargetId::SuccessPayloadScatterChart);
    assert_eq!(figure.point_count(), 2);

    socket
        .send(WsMessage::Text(
            r#"{"type":"control_changed","payload":{"control":"payload-slider","value":[3000,500]}}"#
                .to_string(),
        ))
        .await
        .expect("send inverted range");
    let ServerEvent::Error(error) = next_server_event(&mut socket).await else {
        panic!("expected error event");
    };
    assert_eq!(error.code, ErrorCode::Validation);

    socket
        .send(WsMessage::Text(
            r#"{"type":"control_changed","payload":{"control":"payload-slider","value":[2000,3000]}}"#
                .to_string(),
        ))
        .await
        .expect("send range");
    let ServerEvent::FigureUpdated { target, figure } = next_server_event(&mut socket).await else {
        panic!("expected scatter update");
    };
    assert_eq!(target, TargetId::SuccessPayloadScatterChart);
    assert_eq!(figure.point_count(), 1);
}
