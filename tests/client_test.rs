/// HTTP client tests against a mock search service
mod common;

use std::time::Duration;

use ellinet_search::models::Query;
use ellinet_search::{SearchClient, SearchError, build_query};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{HitBuilder, mount_search, mount_status, search_body};

fn client_for(server: &MockServer) -> SearchClient {
    SearchClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

fn cat_query() -> Query {
    build_query("cat", 0, 10).unwrap()
}

#[tokio::test]
async fn test_fetch_indices_lists_names_sorted() {
    let server = MockServer::start().await;
    mount_status(&server, &["frl", "edoweb", "ellinet"]).await;

    let names = client_for(&server).fetch_indices().await.unwrap();

    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    assert_eq!(names, vec!["edoweb", "ellinet", "frl"]);
}

#[tokio::test]
async fn test_fetch_indices_without_indices_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/_status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    let names = client_for(&server).fetch_indices().await.unwrap();
    assert!(names.is_empty());
}

#[tokio::test]
async fn test_search_posts_query_to_joined_indices() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search/edoweb,ellinet/_search"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "from": 0,
            "size": 10,
            "query": { "query_string": { "query": "*cat*", "analyze_wildcard": true } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(
            1,
            &[HitBuilder::new("edoweb:1").title("Cats").creator("Smith")],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server).search(["edoweb", "ellinet"], &cat_query()).await.unwrap();

    assert_eq!(page.total_hits, 1);
    assert_eq!(page.items[0].title.as_deref(), Some("Cats"));
    assert_eq!(page.items[0].creator.as_deref(), Some("Smith"));
}

#[tokio::test]
async fn test_match_all_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search/edoweb/_search"))
        .and(body_json(json!({ "from": 20, "size": 10, "query": { "match_all": {} } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(0, &[])))
        .expect(1)
        .mount(&server)
        .await;

    let query = build_query("*", 20, 10).unwrap();
    let page = client_for(&server).search(["edoweb"], &query).await.unwrap();
    assert!(page.is_empty());
}

#[tokio::test]
async fn test_empty_selection_searches_without_index_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search/_search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(0, &[])))
        .expect(1)
        .mount(&server)
        .await;

    let no_indices: [&str; 0] = [];
    let page = client_for(&server).search(no_indices, &cat_query()).await.unwrap();
    assert_eq!(page.total_hits, 0);
}

#[tokio::test]
async fn test_total_as_object() {
    let server = MockServer::start().await;
    let body = json!({ "hits": { "total": { "value": 42, "relation": "eq" }, "hits": [] } });
    mount_search(&server, "/search/edoweb/_search", body).await;

    let page = client_for(&server).search(["edoweb"], &cat_query()).await.unwrap();
    assert_eq!(page.total_hits, 42);
}

#[tokio::test]
async fn test_undecodable_hit_is_skipped() {
    let server = MockServer::start().await;
    let body = json!({
        "hits": {
            "total": 2,
            "hits": [
                { "_source": { "pid": "edoweb:1", "title": { "nested": true } } },
                { "_source": { "pid": "edoweb:2", "title": "Kept" } }
            ]
        }
    });
    mount_search(&server, "/search/edoweb/_search", body).await;

    let page = client_for(&server).search(["edoweb"], &cat_query()).await.unwrap();
    assert_eq!(page.total_hits, 2);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].title.as_deref(), Some("Kept"));
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search/edoweb/_search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("index unavailable"))
        .mount(&server)
        .await;

    let err = client_for(&server).search(["edoweb"], &cat_query()).await.unwrap_err();
    match err {
        SearchError::Status { status, body, .. } => {
            assert_eq!(status, 500);
            assert!(body.contains("index unavailable"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/_status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_indices().await.unwrap_err();
    assert!(matches!(err, SearchError::Decode { .. }));
    assert!(!err.is_transport());
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    // Bind then drop a server to get a port nobody listens on
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };
    let client = SearchClient::new(&uri, Duration::from_secs(2)).unwrap();

    let err = client.fetch_indices().await.unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_index_names_are_percent_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search/my%20index/_search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(0, &[])))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).search(["my index"], &cat_query()).await.unwrap();
}
