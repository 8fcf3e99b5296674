use feedgate_cache::CacheGate;
use feedgate_core::FeedError;
use feedgate_syosetu::{SearchOptions, SearchSite, SyosetuClient, SyosetuConfig};
use proptest::prelude::*;
use serde_json::json;
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> SyosetuClient {
    let config = SyosetuConfig::default().with_endpoints(
        format!("{}/novelapi/api/", server.uri()),
        format!("{}/novel18api/api/", server.uri()),
    );
    SyosetuClient::with_config(config).unwrap()
}

fn search_body(title: &str) -> serde_json::Value {
    json!([
        { "allcount": 1 },
        {
            "title": title,
            "ncode": "N1234AB",
            "writer": "alice",
            "story": "Once upon a time.",
            "genre": 201,
            "keyword": "dragon／magic R15",
            "general_firstup": "2024-03-04 05:06:07",
            "general_lastup": "2024-04-05 06:07:08",
            "novel_type": 1,
            "end": 1,
            "general_all_no": 3,
            "length": 9000
        }
    ])
}

#[tokio::test]
async fn test_search_feed_maps_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/novelapi/api/"))
        .and(query_param("word", "foo"))
        .and(query_param("notword", "bar"))
        .and(query_param("out", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body("Dragon Tale")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let gate = CacheGate::default();

    let feed = client
        .search_feed(&gate, "yomou", "word=foo&notword=bar", None)
        .await
        .unwrap();

    assert_eq!(feed.title, "Syosetu Search: foo -bar");
    assert_eq!(
        feed.link,
        "https://yomou.syosetu.com/search/search/search.php?word=foo&notword=bar"
    );
    assert_eq!(feed.item.len(), 1);

    let item = &feed.item[0];
    assert_eq!(item.title, "Dragon Tale");
    assert_eq!(item.link, "https://ncode.syosetu.com/n1234ab/");
    assert_eq!(item.author.as_deref(), Some("alice"));
    assert_eq!(item.pub_date.unwrap().to_rfc3339(), "2024-03-04T05:06:07+09:00");
    assert_eq!(item.category, vec!["dragon", "magic", "R15"]);
    assert!(item.description.contains("Once upon a time."));
}

#[tokio::test]
async fn test_adult_site_uses_r18_api() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/novel18api/api/"))
        .and(query_param("nocgenre", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body("Night")))
        .expect(1)
        .mount(&server)
        .await;

    let feed = client_for(&server)
        .search_feed(&CacheGate::default(), "noc", "word=x", None)
        .await
        .unwrap();

    assert_eq!(feed.item[0].link, "https://novel18.syosetu.com/n1234ab/");
    assert!(feed.link.starts_with("https://noc.syosetu.com/"));
}

#[tokio::test]
async fn test_repeated_search_is_served_from_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body("Cached")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let gate = CacheGate::default();

    let first = client.search_feed(&gate, "yomou", "word=foo", None).await.unwrap();
    let second = client.search_feed(&gate, "yomou", "word=foo", None).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_distinct_searches_do_not_share_results() {
    let server = MockServer::start().await;
    Mock::given(query_param("word", "a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body("Result A")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(query_param("word", "b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body("Result B")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let gate = CacheGate::default();

    let a = client.search_feed(&gate, "yomou", "word=a", None).await.unwrap();
    let b = client.search_feed(&gate, "yomou", "word=b", None).await.unwrap();

    assert_eq!(a.item[0].title, "Result A");
    assert_eq!(b.item[0].title, "Result B");
}

#[tokio::test]
async fn test_unset_filters_never_reach_upstream() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body("x")))
        .mount(&server)
        .await;

    client_for(&server)
        .search_feed(&CacheGate::disabled(), "yomou", "word=foo&isr15=0&isbl=&order=", None)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let keys: Vec<String> = requests[0].url.query_pairs().map(|(k, _)| k.into_owned()).collect();
    assert_eq!(keys, vec!["out", "lim", "of", "word"]);
}

#[tokio::test]
async fn test_unknown_site_fails_before_network() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .search_feed(&CacheGate::default(), "kakuyomu", "word=foo", None)
        .await
        .unwrap_err();

    assert!(matches!(err, FeedError::InvalidParameter { ref name, .. } if name == "sub"));
}

#[tokio::test]
async fn test_invalid_option_fails_before_network() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .search_feed(&CacheGate::default(), "yomou", "order=sideways", None)
        .await
        .unwrap_err();

    assert!(err.is_client_error());
}

#[tokio::test]
async fn test_upstream_failure_is_not_cached() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let gate = CacheGate::default();

    for _ in 0..2 {
        let err = client.search_feed(&gate, "yomou", "word=foo", None).await.unwrap_err();
        assert!(err.is_upstream_error());
    }
}

proptest! {
    #[test]
    fn prop_distinct_words_yield_distinct_cache_keys(a in "\\PC{1,12}", b in "\\PC{1,12}") {
        let a = a.trim().to_string();
        let b = b.trim().to_string();
        prop_assume!(!a.is_empty() && !b.is_empty() && a != b);

        let client = SyosetuClient::new().unwrap();
        let opts_a = SearchOptions { word: Some(a), ..Default::default() };
        let opts_b = SearchOptions { word: Some(b), ..Default::default() };

        let key_a = client.search_url(SearchSite::General, &opts_a, None).unwrap();
        let key_b = client.search_url(SearchSite::General, &opts_b, None).unwrap();
        prop_assert_ne!(key_a, key_b);
    }
}
