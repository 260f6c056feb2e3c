use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::{Html, IntoResponse},
    routing::{get, post},
    Router,
};
use dashboard::{session::Session, DashboardContext};
use dataset::Dataset;
use futures::{stream::SplitSink, SinkExt, StreamExt};
use shared::protocol::ServerEvent;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

mod api;
mod app_state;
mod config;
mod page;

use api::{
    handle_client_message, http_dataset_summary, http_layout, http_pie_figure, http_run_callbacks,
    http_scatter_figure,
};
use app_state::AppState;
use config::{load_settings, prepare_data_path};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = load_settings();
    let data_path = prepare_data_path(&settings.data_path)?;
    let dataset = Dataset::from_csv_path(&data_path).map_err(|error| {
        error!(
            data_path = %data_path.display(),
            %error,
            "failed to load launch dataset; verify the CSV has a header row with the required columns"
        );
        error
    })?;

    let state = AppState::new(DashboardContext::new(Arc::new(dataset))?);
    let app = build_router(Arc::new(state), settings.max_body_bytes);

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "dashboard listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/api/layout", get(http_layout))
        .route("/api/dataset", get(http_dataset_summary))
        .route("/api/figures/pie", get(http_pie_figure))
        .route("/api/figures/scatter", get(http_scatter_figure))
        .route("/api/callbacks", post(http_run_callbacks))
        .route("/ws", get(ws_handler))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.page.to_string())
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| ws_connection(state, socket))
}

async fn ws_connection(state: Arc<AppState>, socket: WebSocket) {
    let session_id = Uuid::new_v4();
    let mut session = Session::new(state.dashboard.clone());
    let (mut sender, mut receiver) = socket.split();
    info!(%session_id, "dashboard session opened");

    let initial: Vec<ServerEvent> = session
        .initial_render()
        .into_iter()
        .map(ServerEvent::from)
        .collect();
    if !send_events(&mut sender, initial).await {
        info!(%session_id, "dashboard session closed before first render");
        return;
    }

    // One frame at a time: a session's charts are never rendered concurrently.
    while let Some(Ok(message)) = receiver.next().await {
        let events = match message {
            Message::Text(text) => handle_client_message(&mut session, &text),
            Message::Close(_) => break,
            _ => continue,
        };
        if !send_events(&mut sender, events).await {
            break;
        }
    }

    info!(%session_id, "dashboard session closed");
}

async fn send_events(
    sender: &mut SplitSink<WebSocket, Message>,
    events: Vec<ServerEvent>,
) -> bool {
    for event in events {
        let text = match serde_json::to_string(&event) {
            Ok(v) => v,
            Err(error) => {
                warn!(%error, "failed to encode server event");
                continue;
            }
        };
        if sender.send(Message::Text(text)).await.is_err() {
            return false;
        }
    }
    true
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
