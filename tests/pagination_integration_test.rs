use ismon_client::{pages_into_items, Credentials, ErrorKind, IsMonClient, IsMonError, MetricFilter};
use reqwest::Method;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create a test client with an established session
async fn create_logged_in_client(server: &MockServer) -> IsMonClient {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"data": {"email": "a@b.com", "sessionid": "XYZ"}}),
        ))
        .mount(server)
        .await;

    let client = IsMonClient::with_base_url(server.uri(), Credentials::new("user", "pass", "key"))
        .expect("Failed to create client");
    client.login().await.expect("Failed to log in");
    client
}

fn page_body(page: u64, count_total: u64) -> Value {
    json!({
        "meta": {"status": 200, "countTotal": count_total, "pageSize": 100},
        "data": [{"page": page}]
    })
}

async fn mount_page(server: &MockServer, endpoint: &str, page: u64, response: ResponseTemplate, expected: u64) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .and(query_param("__page", page.to_string()))
        .and(query_param("__pageSize", "100"))
        .respond_with(response)
        .expect(expected)
        .mount(server)
        .await;
}

/// Page numbers requested against `endpoint`, in order
async fn requested_pages(server: &MockServer, endpoint: &str) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == endpoint)
        .map(|r| {
            r.url
                .query_pairs()
                .find(|(k, _)| k == "__page")
                .map(|(_, v)| v.into_owned())
                .unwrap_or_default()
        })
        .collect()
}

/// Test that 250 items at 100 per page are fetched in exactly three requests
#[tokio::test]
async fn test_walks_all_pages() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;
    let client = create_logged_in_client(&server).await;
    for page in 1..=3 {
        mount_page(&server, "/metric/listing", page,
            ResponseTemplate::new(200).set_body_json(page_body(page, 250)), 1).await;
    }

    let pages = client.metrics().list(&MetricFilter::default()).await
        .expect("Listing should succeed");

    assert_eq!(pages.len(), 3);
    for (index, page) in pages.iter().enumerate() {
        let expected = index as u64 + 1;
        assert_eq!(page.data, json!([{"page": expected}]));
        assert_eq!(page.meta.count_total, Some(250));
    }
    assert_eq!(requested_pages(&server, "/metric/listing").await, vec!["1", "2", "3"]);

    let items = pages_into_items(&pages);
    assert_eq!(items.len(), 3);
}

/// Test that an exact multiple of the page size stops on the last full page
#[tokio::test]
async fn test_exact_multiple_of_page_size() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;
    let client = create_logged_in_client(&server).await;
    for page in 1..=2 {
        mount_page(&server, "/metric/listing", page,
            ResponseTemplate::new(200).set_body_json(page_body(page, 200)), 1).await;
    }
    mount_page(&server, "/metric/listing", 3,
        ResponseTemplate::new(200).set_body_json(page_body(3, 200)), 0).await;

    let pages = client.metrics().list(&MetricFilter::default()).await.unwrap();
    assert_eq!(pages.len(), 2);
}

/// Test that an empty result is still one page
#[tokio::test]
async fn test_empty_result_is_single_request() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;
    let client = create_logged_in_client(&server).await;
    mount_page(&server, "/metric/listing", 1,
        ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"status": 200, "countTotal": 0, "pageSize": 100},
            "data": []
        })), 1).await;

    let pages = client.metrics().list(&MetricFilter::default()).await.unwrap();
    assert_eq!(pages.len(), 1);
    assert!(pages_into_items(&pages).is_empty());
}

/// Test that a response without pagination counts is treated as one page
#[tokio::test]
async fn test_missing_counts_is_single_page() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;
    let client = create_logged_in_client(&server).await;
    Mock::given(method("GET"))
        .and(path("/core/availableSystemwidefilter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"status": 200},
            "data": {"filters": ["region"]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let pages = client.system().systemwide_filters().await.unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].data["filters"], json!(["region"]));
}

/// Test that an error list on a later page discards the pages already read
#[tokio::test]
async fn test_error_mid_pagination_discards_results() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;
    let client = create_logged_in_client(&server).await;
    mount_page(&server, "/metric/listing", 1,
        ResponseTemplate::new(200).set_body_json(page_body(1, 250)), 1).await;
    mount_page(&server, "/metric/listing", 2,
        ResponseTemplate::new(200).set_body_json(json!({"errors": [{"message": "Invalid ID"}]})), 1).await;
    mount_page(&server, "/metric/listing", 3,
        ResponseTemplate::new(200).set_body_json(page_body(3, 250)), 0).await;

    let err = client.metrics().list(&MetricFilter::default()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ApiError);
    match err {
        IsMonError::ApiErrors(messages) => assert_eq!(messages, vec!["Invalid ID".to_string()]),
        other => panic!("unexpected error: {:?}", other),
    }
}

/// Test that an HTTP failure on a later page fails the whole call
#[tokio::test]
async fn test_http_failure_mid_pagination() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;
    let client = create_logged_in_client(&server).await;
    mount_page(&server, "/metric/listing", 1,
        ResponseTemplate::new(200).set_body_json(page_body(1, 250)), 1).await;
    mount_page(&server, "/metric/listing", 2,
        ResponseTemplate::new(500).set_body_string("Internal Server Error"), 1).await;

    let err = client.metrics().list(&MetricFilter::default()).await.unwrap_err();
    assert!(matches!(err, IsMonError::Status { status: 500, .. }));
}

/// Test that a page whose meta status is not 200 is rejected
#[tokio::test]
async fn test_meta_status_must_be_ok() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;
    let client = create_logged_in_client(&server).await;
    mount_page(&server, "/metric/listing", 1,
        ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"status": 206, "countTotal": 1, "pageSize": 100},
            "data": []
        })), 1).await;

    let err = client.metrics().list(&MetricFilter::default()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnrecognizedResponse);
}

/// Test that a statusCode payload is surfaced as an API error
#[tokio::test]
async fn test_status_code_payload() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;
    let client = create_logged_in_client(&server).await;
    mount_page(&server, "/metric/listing", 1,
        ResponseTemplate::new(200).set_body_json(json!({"statusCode": 404, "message": "Resource not found"})), 1).await;

    let err = client.metrics().list(&MetricFilter::default()).await.unwrap_err();
    match err {
        IsMonError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Resource not found");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

/// Test that a non-JSON body is an unrecognized response
#[tokio::test]
async fn test_non_json_body() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;
    let client = create_logged_in_client(&server).await;
    mount_page(&server, "/metric/listing", 1,
        ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"), 1).await;

    let err = client.metrics().list(&MetricFilter::default()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnrecognizedResponse);
}

/// Test that a write call sends its body with every page request
#[tokio::test]
async fn test_dispatch_with_body() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;
    let client = create_logged_in_client(&server).await;
    let body = json!({"ElementIDs": [1, 2]});
    for page in 1..=2 {
        Mock::given(method("POST"))
            .and(path("/monitoring/query"))
            .and(query_param("__page", page.to_string()))
            .and(query_param("ElementType", "terminal"))
            .and(body_json(&body))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(page, 150)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let pages = client
        .dispatch(Method::POST, "monitoring/query", Some(&body), Some(&[("ElementType", "terminal")]))
        .await
        .expect("Dispatch should succeed");
    assert_eq!(pages.len(), 2);
}
