use anyhow::Result;
use httpmock::prelude::*;
use serde_json::json;
use swapi_explorer::app::client::{render_error, render_table, ApiClient};
use swapi_explorer::utils::logger::LogHandle;
use swapi_explorer::{ClientConfig, EntityKind, PageQuery, SortOrder, SwapiError};

fn client(base_url: String) -> Result<ApiClient> {
    Ok(ApiClient::new(ClientConfig::new(base_url), LogHandle::new("test"))?)
}

#[tokio::test]
async fn test_list_forwards_query_parameters() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/people/")
            .query_param("page", "2")
            .query_param("page_size", "5")
            .query_param("search", "sky")
            .query_param("order", "desc");
        then.status(200).json_body(json!({
            "count": 6,
            "page": 2,
            "results_count": 1,
            "results": [{"name": "Luke Skywalker", "height": 172, "mass": 77.0}]
        }));
    });

    let query = PageQuery {
        page: 2,
        page_size: 5,
        search: Some("sky".to_string()),
        sort_by: None,
        order: SortOrder::Desc,
    };
    let envelope = client(server.base_url())?
        .list(EntityKind::Person, &query)
        .await?;

    api_mock.assert();
    assert_eq!(envelope.count, 6);
    assert_eq!(envelope.results_count, 1);
    assert_eq!(envelope.results[0]["name"], "Luke Skywalker");

    let rendered = render_table(
        EntityKind::Person.title(),
        &envelope.results,
        EntityKind::Person.columns(),
    );
    assert!(rendered.contains("Luke Skywalker"));
    assert!(rendered.contains("---"));

    Ok(())
}

#[tokio::test]
async fn test_error_status_carries_body() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/planets/");
        then.status(400)
            .json_body(json!({"detail": "Cannot sort by 'residents'"}));
    });

    let query = PageQuery {
        sort_by: Some("residents".to_string()),
        ..PageQuery::default()
    };
    let err = client(server.base_url())?
        .list(EntityKind::Planet, &query)
        .await
        .unwrap_err();

    match &err {
        SwapiError::ApiStatus { status, body } => {
            assert_eq!(*status, 400);
            assert!(body.contains("Cannot sort by 'residents'"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.exit_code(), 2);

    let message = err.user_friendly_message();
    assert!(message.starts_with("API error: 400"));
    assert!(render_error(&message).contains("API error: 400"));

    Ok(())
}

#[tokio::test]
async fn test_unreachable_api_is_connection_error() -> Result<()> {
    let err = client("http://127.0.0.1:1".to_string())?
        .list(EntityKind::Person, &PageQuery::default())
        .await
        .unwrap_err();

    assert!(matches!(err, SwapiError::Connection { .. }));
    assert_eq!(err.exit_code(), 1);
    assert!(err.user_friendly_message().starts_with("Connection error"));

    Ok(())
}
