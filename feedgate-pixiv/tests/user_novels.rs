use feedgate_cache::CacheGate;
use feedgate_core::FeedError;
use feedgate_pixiv::{PixivClient, PixivConfig, MAX_LISTING_PAGES};
use serde_json::json;
use wiremock::matchers::{any, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> PixivClient {
    let config = PixivConfig::default()
        .with_api_url(server.uri())
        .with_access_token("test-token");
    PixivClient::with_config(config).unwrap()
}

fn user() -> serde_json::Value {
    json!({
        "id": 42,
        "name": "carol",
        "account": "carol_writes",
        "profile_image_urls": { "medium": "https://i.pximg.net/user/42.png" }
    })
}

fn novel(id: u64, title: &str, x_restrict: u8) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "caption": "A <b>short</b> caption",
        "x_restrict": x_restrict,
        "image_urls": { "medium": format!("https://i.pximg.net/novel/{}.jpg", id) },
        "create_date": "2024-05-06T07:08:09+09:00",
        "tags": [{ "name": "fantasy", "translated_name": null }],
        "text_length": 1200,
        "user": user(),
        "series": {}
    })
}

async fn mount_text(server: &MockServer, id: u64, body: &str) {
    Mock::given(method("GET"))
        .and(path("/v1/novel/text"))
        .and(query_param("novel_id", id.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "novel_text": body })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_user_novels_feed_maps_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/user/novels"))
        .and(query_param("user_id", "42"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": user(),
            "novels": [novel(1, "First", 0), novel(2, "Second", 1)],
            "next_url": null
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_text(&server, 1, "Hello\n[chapter:Start]world").await;
    mount_text(&server, 2, "a & b").await;

    let feed = client_for(&server)
        .user_novels_feed(&CacheGate::default(), "42", None)
        .await
        .unwrap();

    assert_eq!(feed.title, "carol's novels - pixiv");
    assert_eq!(feed.link, "https://www.pixiv.net/users/42/novels");
    assert_eq!(feed.image.as_deref(), Some("https://i.pximg.net/user/42.png"));
    assert_eq!(feed.item.len(), 2);

    let first = &feed.item[0];
    assert_eq!(first.title, "First");
    assert_eq!(first.link, "https://www.pixiv.net/novel/show.php?id=1");
    assert_eq!(first.author.as_deref(), Some("carol"));
    assert_eq!(first.pub_date.unwrap().to_rfc3339(), "2024-05-06T07:08:09+09:00");
    assert_eq!(first.category, vec!["fantasy"]);
    assert!(first.description.contains("Hello<br><h2>Start</h2>world"));
    assert!(first.description.contains("1200 characters"));

    let second = &feed.item[1];
    assert_eq!(second.category, vec!["fantasy", "R-18"]);
    assert!(second.description.contains("a &amp; b"));
}

#[tokio::test]
async fn test_listing_follows_next_url_until_limit() {
    let server = MockServer::start().await;
    let next = format!("{}/v1/user/novels?user_id=42&filter=for_ios&offset=1", server.uri());

    Mock::given(path("/v1/user/novels"))
        .and(query_param("offset", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": user(),
            "novels": [novel(2, "Second", 0), novel(3, "Third", 0)],
            "next_url": format!("{}/v1/user/novels?user_id=42&filter=for_ios&offset=3", server.uri())
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/v1/user/novels"))
        .and(query_param("offset", "3"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    // Registered last so the offset mocks above take precedence.
    Mock::given(path("/v1/user/novels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": user(),
            "novels": [novel(1, "First", 0)],
            "next_url": next
        })))
        .mount(&server)
        .await;
    for id in 1..=3 {
        mount_text(&server, id, "text").await;
    }

    let feed = client_for(&server)
        .user_novels_feed(&CacheGate::default(), "42", Some(2))
        .await
        .unwrap();

    let titles: Vec<&str> = feed.item.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second"]);
}

#[tokio::test]
async fn test_next_url_on_another_host_is_not_followed() {
    let server = MockServer::start().await;
    let elsewhere = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&elsewhere)
        .await;
    Mock::given(path("/v1/user/novels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": user(),
            "novels": [novel(1, "First", 0)],
            "next_url": format!("{}/v1/user/novels?user_id=42&offset=1", elsewhere.uri())
        })))
        .expect(1)
        .mount(&server)
        .await;

    let listing = client_for(&server).user_novels("42", 10).await.unwrap();

    assert_eq!(listing.novels.len(), 1);
}

#[tokio::test]
async fn test_repeating_next_url_stops_at_page_cap() {
    let server = MockServer::start().await;
    let again = format!("{}/v1/user/novels?user_id=42&filter=for_ios", server.uri());
    Mock::given(path("/v1/user/novels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": user(),
            "novels": [novel(1, "First", 0)],
            "next_url": again
        })))
        .expect(MAX_LISTING_PAGES as u64)
        .mount(&server)
        .await;

    let listing = client_for(&server).user_novels("42", 100).await.unwrap();

    assert_eq!(listing.novels.len(), MAX_LISTING_PAGES);
}

#[tokio::test]
async fn test_empty_page_ends_listing() {
    let server = MockServer::start().await;
    let again = format!("{}/v1/user/novels?user_id=42&filter=for_ios", server.uri());
    Mock::given(path("/v1/user/novels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": user(),
            "novels": [],
            "next_url": again
        })))
        .expect(1)
        .mount(&server)
        .await;

    let listing = client_for(&server).user_novels("42", 10).await.unwrap();

    assert!(listing.novels.is_empty());
    assert_eq!(listing.user.name, "carol");
}

#[tokio::test]
async fn test_missing_token_fails_before_network() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client =
        PixivClient::with_config(PixivConfig::default().with_api_url(server.uri())).unwrap();
    let err = client
        .user_novels_feed(&CacheGate::default(), "42", None)
        .await
        .unwrap_err();

    assert!(matches!(err, FeedError::Config(_)));
}

#[tokio::test]
async fn test_non_numeric_id_fails_before_network() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .user_novels_feed(&CacheGate::default(), "carol", None)
        .await
        .unwrap_err();

    assert!(matches!(err, FeedError::InvalidParameter { ref name, .. } if name == "id"));
}

#[tokio::test]
async fn test_one_failed_text_fails_the_feed() {
    let server = MockServer::start().await;
    Mock::given(path("/v1/user/novels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": user(),
            "novels": [novel(1, "First", 0), novel(2, "Second", 0)],
            "next_url": null
        })))
        .mount(&server)
        .await;
    mount_text(&server, 1, "fine").await;
    Mock::given(path("/v1/novel/text"))
        .and(query_param("novel_id", "2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .user_novels_feed(&CacheGate::default(), "42", None)
        .await
        .unwrap_err();

    assert!(err.is_upstream_error());
    assert!(err.to_string().contains("novel 2"));
}

#[tokio::test]
async fn test_novel_text_is_cached_across_requests() {
    let server = MockServer::start().await;
    Mock::given(path("/v1/user/novels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": user(),
            "novels": [novel(1, "First", 0)],
            "next_url": null
        })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(path("/v1/novel/text"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "novel_text": "once" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let gate = CacheGate::default();

    let first = client.user_novels_feed(&gate, "42", None).await.unwrap();
    let second = client.user_novels_feed(&gate, "42", None).await.unwrap();

    assert_eq!(first, second);
    assert!(gate.store().get(&client.novel_text_url(1)).await.unwrap().is_some());
}
