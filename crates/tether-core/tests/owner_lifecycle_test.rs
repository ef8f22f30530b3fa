//! Owning objects, the shared service and their teardown

mod common;

use common::{MockClient, named_query};
use futures::StreamExt;
use tether_core::{
    Config, OwnerKind, QueryOwner, QueryService, TetherError, observable_channel,
};

#[tokio::test]
async fn test_component_unsubscribes_on_destroy() {
    let client = MockClient::new();
    let service = QueryService::new(client.clone());
    let mut component = QueryOwner::init(OwnerKind::Component, "character-list", &service);

    let apollo = component.apollo().unwrap();
    service
        .managed_watch_query(apollo, named_query("FakeQuery"))
        .await
        .unwrap();
    service
        .managed_watch_query(apollo, named_query("FakeQuery"))
        .await
        .unwrap();

    assert_eq!(component.teardown(), 2);
    assert_eq!(client.stopped().len(), 2);
    assert!(component.is_destroyed());

    assert_eq!(component.teardown(), 0);
    assert_eq!(client.stopped().len(), 2);
}

#[tokio::test]
async fn test_route_model_watch() {
    let client = MockClient::new();
    let service = QueryService::new(client.clone());
    let mut route = QueryOwner::init(OwnerKind::Route, "characters", &service);

    let request = named_query("Characters").variable("kind", "human");
    let mut model = route.apollo().unwrap().watch_query(request).await.unwrap();
    let first = model.next().await.unwrap().unwrap();
    assert_eq!(first.result_key("operation"), "Characters");

    route.teardown();
    assert_eq!(client.stopped(), vec!["Characters".to_string()]);
}

#[tokio::test]
async fn test_each_owner_gets_its_own_manager() {
    let client = MockClient::new();
    let service = QueryService::new(client.clone());
    let mut first = QueryOwner::init(OwnerKind::Service, "session", &service);
    let mut second = QueryOwner::init(OwnerKind::Component, "profile", &service);

    first.apollo().unwrap().watch_query(named_query("A")).await.unwrap();
    second.apollo().unwrap().watch_query(named_query("B")).await.unwrap();

    first.teardown();
    assert_eq!(client.stopped(), vec!["A".to_string()]);
    second.teardown();
    assert_eq!(client.stopped(), vec!["A".to_string(), "B".to_string()]);
}

#[test]
fn test_uninjected_owner_fails_at_first_use() {
    let owner = QueryOwner::new(OwnerKind::Route, "characters");
    assert!(matches!(
        owner.apollo(),
        Err(TetherError::MissingQueryManager { .. })
    ));
}

#[tokio::test]
async fn test_reinjection_releases_previous_manager() {
    let client = MockClient::new();
    let service = QueryService::new(client.clone());
    let mut owner = QueryOwner::init(OwnerKind::Component, "list", &service);
    owner.apollo().unwrap().watch_query(named_query("Old")).await.unwrap();

    let previous = owner.inject(service.create_query_manager());
    drop(previous);

    assert_eq!(client.stopped(), vec!["Old".to_string()]);
    assert_eq!(owner.apollo().unwrap().tracked_count(), 0);
}

#[test]
fn test_service_rejects_invalid_config() {
    let config = Config {
        endpoint: "localhost".to_string(),
        ..Default::default()
    };
    assert!(matches!(
        QueryService::from_config(MockClient::new(), config),
        Err(TetherError::Configuration(_))
    ));
}

#[tokio::test]
async fn test_teardown_stops_channel_producer() {
    let service = QueryService::new(MockClient::new());
    let mut component = QueryOwner::init(OwnerKind::Component, "ticker", &service);

    let (sender, observable) = observable_channel(8);
    let (mut stream, subscription) = observable.into_parts();
    component.apollo().unwrap().track_subscription(subscription);

    sender
        .send(Ok(tether_core::QueryResponse::default()))
        .await
        .unwrap();
    assert!(stream.next().await.is_some());

    component.teardown();
    assert!(sender.is_closed());
    assert!(stream.next().await.is_none());
}
