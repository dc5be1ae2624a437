//! End-to-end: hub and inbox served on ephemeral ports, driven by HubClient.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use filehub_server::client::{inbox::NOTIFY_PATH, HubClient, NotificationInbox};
use filehub_server::interest::SubscriberEndpoint;
use filehub_server::notify::Notification;
use filehub_server::{routes, AppState, Config};

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

struct Harness {
    client: HubClient,
    subscriber: SubscriberEndpoint,
    inbox: NotificationInbox,
}

async fn harness() -> Harness {
    let state = AppState::new(Config::default()).unwrap();
    let hub_addr = serve(routes::app(state)).await;

    let (inbox, inbox_router) = NotificationInbox::new();
    let inbox_addr = serve(inbox_router).await;

    Harness {
        client: HubClient::new(format!("http://{}", hub_addr)),
        subscriber: SubscriberEndpoint::new(format!("http://{}{}", inbox_addr, NOTIFY_PATH)),
        inbox,
    }
}

async fn expect_notification(inbox: &mut NotificationInbox) -> Notification {
    tokio::time::timeout(Duration::from_secs(5), inbox.recv())
        .await
        .expect("timed out waiting for notification")
        .expect("inbox closed")
}

async fn expect_silence(inbox: &mut NotificationInbox) {
    let result = tokio::time::timeout(Duration::from_millis(300), inbox.recv()).await;
    assert!(result.is_err(), "unexpected notification: {:?}", result);
}

#[tokio::test]
async fn upload_list_download_and_notify() {
    let Harness {
        client,
        subscriber,
        mut inbox,
    } = harness().await;

    client.upload("a.txt", "hi").await.unwrap();

    let files = client.list().await.unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].name, "a.txt");
    assert_eq!(client.download("a.txt").await.unwrap().as_deref(), Some(&b"hi"[..]));

    client.register_interest(&subscriber, "a.txt", 5).await.unwrap();
    let notification = expect_notification(&mut inbox).await;
    assert_eq!(notification.filename, "a.txt");
    assert!(notification.message.contains("a.txt"));

    client.register_interest(&subscriber, "a.txt", 5).await.unwrap();
    expect_notification(&mut inbox).await;

    client.upload("a.txt", "bye").await.unwrap();
    expect_silence(&mut inbox).await;
    assert_eq!(client.download("a.txt").await.unwrap().as_deref(), Some(&b"bye"[..]));
}

#[tokio::test]
async fn interest_fires_on_later_upload() {
    let Harness {
        client,
        subscriber,
        mut inbox,
    } = harness().await;

    client.register_interest(&subscriber, "later.txt", 30).await.unwrap();
    expect_silence(&mut inbox).await;

    client.upload("later.txt", "content").await.unwrap();
    let notification = expect_notification(&mut inbox).await;
    assert_eq!(notification.filename, "later.txt");
}

#[tokio::test]
async fn cancelled_interest_stays_silent() {
    let Harness {
        client,
        subscriber,
        mut inbox,
    } = harness().await;

    client.register_interest(&subscriber, "c.txt", 30).await.unwrap();
    assert!(client.cancel_interest(&subscriber, "c.txt").await.unwrap());
    assert!(!client.cancel_interest(&subscriber, "c.txt").await.unwrap());

    client.upload("c.txt", "x").await.unwrap();
    expect_silence(&mut inbox).await;
}

#[tokio::test]
async fn expired_interest_stays_silent() {
    let Harness {
        client,
        subscriber,
        mut inbox,
    } = harness().await;

    client.register_interest(&subscriber, "b.txt", 1).await.unwrap();
    tokio::time::sleep(Duration::from_millis(1200)).await;

    client.upload("b.txt", "x").await.unwrap();
    expect_silence(&mut inbox).await;
}

#[tokio::test]
async fn missing_file_and_bad_validity() {
    let Harness {
        client, subscriber, ..
    } = harness().await;

    assert_eq!(client.download("never.txt").await.unwrap(), None);
    assert!(client.register_interest(&subscriber, "a.txt", 0).await.is_err());
    assert!(client.register_interest(&subscriber, "a.txt", -1).await.is_err());
}

#[tokio::test]
async fn unreachable_subscriber_does_not_affect_upload() {
    let Harness { client, .. } = harness().await;
    let dead = SubscriberEndpoint::new("http://127.0.0.1:9/notify");

    client.register_interest(&dead, "d.txt", 30).await.unwrap();
    client.upload("d.txt", "still stored").await.unwrap();

    assert_eq!(
        client.download("d.txt").await.unwrap().as_deref(),
        Some(&b"still stored"[..])
    );
    // The interest was consumed even though delivery failed.
    assert!(!client.cancel_interest(&dead, "d.txt").await.unwrap());
}
