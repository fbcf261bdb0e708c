//! End-to-end tests
//!
//! Serves the real application on an ephemeral port and consumes it with
//! the typed fetch client.

use std::net::SocketAddr;

use tokio::net::TcpListener;

use minbar::config::{ApiConfig, Settings};
use minbar::server::{build_app, AppState};
use minbar::services::{ApiClient, Catalog, Filters};

async fn spawn_server() -> SocketAddr {
    let settings = Settings::default();
    let state = AppState::new(&settings, Catalog::seed()).unwrap();
    let app = build_app(state, &settings.server);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

fn api_client(addr: SocketAddr) -> ApiClient {
    ApiClient::new(&ApiConfig {
        base_url: format!("http://{}", addr),
        timeout_seconds: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn test_fetch_audio_library_from_server() {
    let addr = spawn_server().await;
    let client = api_client(addr);

    let fetcher = client
        .audio_library(Filters::from([("reciter", "abdulbasit")]))
        .unwrap();
    assert!(fetcher.mount().await);

    let state = fetcher.state();
    assert!(state.error.is_none());
    let library = state.data.unwrap();
    assert_eq!(library.tracks.len(), 4);
    assert!(library.tracks.iter().all(|t| t.reciter_id == "abdulbasit"));

    fetcher
        .set_filters(Filters::from([("reciter", "abdulbasit"), ("surah", "1")]))
        .await;
    let narrowed = fetcher.state().data.unwrap();
    assert_eq!(narrowed.tracks.len(), 1);
    assert_eq!(narrowed.tracks[0].id, "abdulbasit-001");
}

#[tokio::test]
async fn test_fetch_video_library_from_server() {
    let addr = spawn_server().await;
    let client = api_client(addr);

    let fetcher = client
        .video_library(Filters::from([("category", "lectures")]))
        .unwrap();
    fetcher.mount().await;

    let library = fetcher.state().data.unwrap();
    assert_eq!(library.metadata.total, 1);
    assert_eq!(library.videos[0].category, "lectures");
}

#[tokio::test]
async fn test_unreachable_server_reports_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let fetcher = api_client(addr).audio_library(Filters::new()).unwrap();
    fetcher.mount().await;

    let state = fetcher.state();
    assert!(!state.loading);
    assert!(state.data.is_none());
    assert!(state.error.is_some());
}
