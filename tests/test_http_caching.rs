//! End-to-end caching over real HTTP: CachingFetchClient -> AsyncBackendImpl -> mockito.

use call_analysis_cache::client::{AsyncBackend, AsyncBackendImpl};
use call_analysis_cache::{BackendClient, CachingFetchClient, ItemInclude, ResourceCaches};
use mockito::{Matcher, Server};
use std::sync::Arc;

fn client_for(url: String) -> CachingFetchClient {
    let backend = AsyncBackendImpl::new(BackendClient::with_base_url(url));
    CachingFetchClient::with_caches(
        Arc::new(backend) as Arc<dyn AsyncBackend>,
        ResourceCaches::new(),
    )
}

#[tokio::test(flavor = "multi_thread")]
async fn test_repeat_listing_hits_network_once() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/listings")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "1".into()),
            Matcher::UrlEncoded("limit".into(), "20".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "recordings": []}"#)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(server.url());
    let first = client.get_listings(1, 20, None, false).await.unwrap();
    let second = client.get_listings(1, 20, None, false).await.unwrap();

    mock.assert_async().await;
    assert_eq!(first, second);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_force_refresh_hits_network_again() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/items/rec-1")
        .match_query(Matcher::UrlEncoded("include".into(), "transcription".into()))
        .with_status(200)
        .with_body(r#"{"success": true, "transcript": "hello"}"#)
        .expect(2)
        .create_async()
        .await;

    let client = client_for(server.url());
    client
        .get_item("rec-1", ItemInclude::Transcription, false)
        .await
        .unwrap();
    client
        .get_item("rec-1", ItemInclude::Transcription, true)
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(client
        .caches()
        .items
        .contains_key("item_rec-1_transcription"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failure_body_refetched_every_time() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/aggregates")
        .with_status(200)
        .with_body(r#"{"success": false, "error": "Database unavailable"}"#)
        .expect(2)
        .create_async()
        .await;

    let client = client_for(server.url());
    let body = client.get_aggregates(false, false).await.unwrap();
    client.get_aggregates(false, false).await.unwrap();

    mock.assert_async().await;
    assert_eq!(body["success"], false);
    assert!(client.caches().aggregates.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_http_error_leaves_cache_empty() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/aggregates")
        .match_query(Matcher::UrlEncoded("includeActivity".into(), "true".into()))
        .with_status(503)
        .with_body("Service Unavailable")
        .create_async()
        .await;

    let client = client_for(server.url());
    let result = client.get_aggregates(true, false).await;

    mock.assert_async().await;
    assert!(result.is_err());
    assert!(client.caches().aggregates.is_empty());
}
