//! WebSocket event stream tests against a live listener.

mod common;

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use common::{CHAT_REPO, FakeHub, TestApp, chat_repo_files};

const WAIT: Duration = Duration::from_secs(5);

/// Poll until the bus has `expected` subscribers.
async fn wait_for_subscribers(app: &TestApp, expected: usize) {
    tokio::time::timeout(WAIT, async {
        while app.state.events.subscriber_count() != expected {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap_or_else(|_| panic!("subscriber count never reached {expected}"));
}

async fn serve(app: &TestApp) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app.router();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("ws://{addr}/ws/events")
}

#[tokio::test]
async fn download_events_stream_in_order_and_unsubscribe_on_close() {
    let app = TestApp::new(FakeHub::default().with_repo(CHAT_REPO, chat_repo_files())).await;
    let url = serve(&app).await;

    let (mut socket, _) = connect_async(url.as_str()).await.unwrap();
    wait_for_subscribers(&app, 1).await;

    let (status, _) = app
        .post(
            "/models/download",
            json!({"model_id": "chat.qwen3-next-80b-a3b", "variant_id": "Q2_K"}),
        )
        .await;
    assert!(status.is_success());

    let mut frames: Vec<Value> = Vec::new();
    while frames.len() < 3 {
        let message = tokio::time::timeout(WAIT, socket.next())
            .await
            .unwrap()
            .unwrap()
            .unwrap();
        if let Message::Text(text) = message {
            frames.push(serde_json::from_str(text.as_str()).unwrap());
        }
    }

    assert_eq!(frames[0]["type"], "download_progress");
    assert_eq!(frames[0]["status"], "starting");
    assert_eq!(frames[0]["file"], "Qwen3-Next-80B-A3B-Instruct-Q2_K.gguf");
    assert_eq!(frames[1]["type"], "download_progress");
    assert_eq!(frames[1]["status"], "completed");
    assert_eq!(frames[2]["type"], "download_complete");
    assert_eq!(frames[2]["repo_id"], CHAT_REPO);
    assert_eq!(frames[2]["total_bytes"], 20);

    socket.close(None).await.unwrap();
    wait_for_subscribers(&app, 0).await;
}

#[tokio::test]
async fn each_connection_gets_its_own_subscription() {
    let app = TestApp::new(FakeHub::default().with_repo(CHAT_REPO, chat_repo_files())).await;
    let url = serve(&app).await;

    let (mut first, _) = connect_async(url.as_str()).await.unwrap();
    let (second, _) = connect_async(url.as_str()).await.unwrap();
    wait_for_subscribers(&app, 2).await;

    // Dropping the connection without a close frame also unsubscribes
    drop(second);
    wait_for_subscribers(&app, 1).await;

    app.post(
        "/models/download",
        json!({"model_id": "chat.qwen3-next-80b-a3b", "variant_id": "Q2_K"}),
    )
    .await;

    let message = tokio::time::timeout(WAIT, first.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    let frame: Value = serde_json::from_str(message.to_text().unwrap()).unwrap();
    assert_eq!(frame["status"], "starting");

    first.close(None).await.unwrap();
    wait_for_subscribers(&app, 0).await;
}
