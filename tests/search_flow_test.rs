/// End-to-end tests for the search widget flow
///
/// These tests drive the controller through discovery, search and paging
/// against a mock service and check the rendered fragments.
mod common;

use std::num::NonZeroUsize;
use std::time::Duration;

use ellinet_search::{SearchClient, SearchController, SearchSession};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{HitBuilder, mount_search, mount_status, numbered_hits, search_body};

async fn setup(server: &MockServer, defaults: &[&str]) -> (SearchClient, SearchController) {
    let client = SearchClient::new(&server.uri(), Duration::from_secs(5)).unwrap();
    let session = SearchSession::new(client.host(), NonZeroUsize::new(10).unwrap());
    let defaults = defaults.iter().map(|s| s.to_string()).collect();
    let mut controller = SearchController::new(session, defaults);
    controller.apply_indices(client.fetch_indices().await);
    (client, controller)
}

/// Mount one page of a 25 hit result set answering requests with `from`
async fn mount_page(server: &MockServer, from: usize) {
    let count = 10.min(25 - from);
    Mock::given(method("POST"))
        .and(path("/search/edoweb/_search"))
        .and(body_partial_json(json!({ "from": from })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(search_body(25, &numbered_hits(from, count))),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_discovery_renders_checklist_with_defaults() {
    let server = MockServer::start().await;
    mount_status(&server, &["edoweb", "ellinet", "frl", "regal"]).await;

    let (_client, controller) = setup(&server, &["ellinet"]).await;
    let html = controller.index_selection_html();

    assert!(html.contains(r#"id="ellinet" value="ellinet" checked"#));
    assert!(!html.contains(r#"value="edoweb" checked"#));
    // Fourth checkbox starts a new row
    assert_eq!(html.matches("<br/>").count(), 2);
}

#[tokio::test]
async fn test_search_renders_hits_and_output() {
    let server = MockServer::start().await;
    mount_status(&server, &["edoweb"]).await;
    let hit = HitBuilder::new("edoweb:7")
        .title("A <Cat> & dog")
        .creator("Smith")
        .year("1999")
        .api_url("http://api.example/edoweb:7");
    mount_search(&server, "/search/edoweb/_search", search_body(1, &[hit])).await;

    let (client, mut controller) = setup(&server, &["edoweb"]).await;
    let request = controller.search("cat").unwrap();
    let result = client.search(&request.indices, &request.query).await;
    controller.apply_response(request.id, result);

    let view = controller.view();
    assert!(view.query_div.contains("<h3>Query</h3>"));
    assert!(view.hits_div.contains("<b>Treffer: </b>1"));
    assert!(view.output_div.contains(r#"<ol id="resultList" start="0">"#));
    assert!(view.output_div.contains(r#"href="http://api.example/edoweb:7""#));
    assert!(view.output_div.contains(r#"A &lt;<span class="highlight">Cat</span>&gt; &amp; dog"#));
    assert!(view.output_div.contains("Smith : 1999"));
}

#[tokio::test]
async fn test_paging_through_results() {
    let server = MockServer::start().await;
    mount_status(&server, &["edoweb"]).await;
    for from in [0, 10, 20] {
        mount_page(&server, from).await;
    }

    let (client, mut controller) = setup(&server, &["edoweb"]).await;

    let request = controller.search("cat").unwrap();
    let result = client.search(&request.indices, &request.query).await;
    controller.apply_response(request.id, result);
    let controls = controller.controls();
    assert!(!controls.prev);
    assert!(controls.next);
    assert_eq!(controls.jump.unwrap().options, vec![0, 10, 20]);

    let request = controller.next().unwrap();
    assert_eq!(request.query.from, 10);
    let result = client.search(&request.indices, &request.query).await;
    controller.apply_response(request.id, result);
    assert!(controller.view().hits_div.contains("<div>10 - 20</div>"));

    let request = controller.jump(20).unwrap();
    let result = client.search(&request.indices, &request.query).await;
    controller.apply_response(request.id, result);
    assert_eq!(controller.page().unwrap().items.len(), 5);
    assert!(!controller.controls().next);
    assert!(controller.next().is_none());

    let request = controller.prev().unwrap();
    assert_eq!(request.query.from, 10);
}

#[tokio::test]
async fn test_failed_search_keeps_previous_view() {
    let server = MockServer::start().await;
    mount_status(&server, &["edoweb"]).await;
    mount_page(&server, 0).await;
    Mock::given(method("POST"))
        .and(path("/search/edoweb/_search"))
        .and(body_partial_json(json!({ "from": 10 })))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (client, mut controller) = setup(&server, &["edoweb"]).await;
    let request = controller.search("cat").unwrap();
    let result = client.search(&request.indices, &request.query).await;
    controller.apply_response(request.id, result);
    let before = controller.view().output_div.clone();

    let request = controller.next().unwrap();
    let result = client.search(&request.indices, &request.query).await;
    assert!(result.is_err());
    controller.apply_response(request.id, result);

    assert_eq!(controller.view().output_div, before);
}

#[tokio::test]
async fn test_discovery_failure_leaves_empty_checklist() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/_status"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (_client, controller) = setup(&server, &["edoweb"]).await;
    assert!(controller.session().indices.available().is_empty());
    assert_eq!(controller.index_selection_html(), "");
}

#[tokio::test]
async fn test_short_term_sends_nothing() {
    let server = MockServer::start().await;
    mount_status(&server, &["edoweb"]).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(0, &[])))
        .expect(0)
        .mount(&server)
        .await;

    let (_client, mut controller) = setup(&server, &["edoweb"]).await;
    assert!(controller.search("c").is_none());
    assert!(controller.search("*c*").is_none());
    assert!(controller.query().is_none());
}

#[tokio::test]
async fn test_unchecked_defaults_search_without_index_list() {
    let server = MockServer::start().await;
    mount_status(&server, &["edoweb"]).await;
    mount_search(&server, "/search/_search", search_body(3, &numbered_hits(0, 3))).await;

    // Default index is not offered by the service, so nothing is ticked
    let (client, mut controller) = setup(&server, &["missing"]).await;
    let request = controller.search("*").unwrap();
    assert!(request.indices.is_empty());

    let result = client.search(&request.indices, &request.query).await;
    controller.apply_response(request.id, result);
    assert_eq!(controller.page().unwrap().total_hits, 3);
    // Match-all highlights nothing
    assert!(!controller.view().output_div.contains("highlight"));
}
