//! ListController behavior against a scripted catalog.

use std::sync::Arc;

use shared::fakes::{sample_item, FakeCatalog};
use shared::{Error, FoodItem, ListController, ListState};

fn names(items: &[FoodItem]) -> Vec<&str> {
    items.iter().map(|i| i.name.as_str()).collect()
}

#[tokio::test]
async fn test_items_sorted_by_id_regardless_of_service_order() {
    let body = r#"[
        {"id":2,"name":"Soup","price":5,"rating":4.2,"veg":"Yes","calories":120,"image_url":"u"},
        {"id":1,"name":"Cake","price":3,"rating":4.8,"veg":"Yes","calories":350,"image_url":"v"}
    ]"#;
    let items: Vec<FoodItem> = serde_json::from_str(body).unwrap();

    let catalog = Arc::new(FakeCatalog::new());
    catalog.push_ok(items);
    let controller = ListController::new(catalog);

    let state = controller.load().await;

    assert!(matches!(state, ListState::Ready { .. }));
    assert_eq!(names(&controller.items()), vec!["Cake", "Soup"]);
    assert_eq!(controller.items()[0].id, 1);
}

#[tokio::test]
async fn test_success_clears_previous_error() {
    let catalog = Arc::new(FakeCatalog::new());
    catalog.push_err(Error::service(503, "unavailable"));
    catalog.push_ok(vec![sample_item(1, "A")]);
    catalog.push_err(Error::Internal("boom".into()));
    catalog.push_ok(vec![sample_item(1, "A")]);
    let controller = ListController::new(catalog);

    controller.load().await;
    assert!(controller.error().is_some());
    controller.refresh().await;
    assert!(controller.error().is_none());

    controller.refresh().await;
    assert!(controller.error().is_some());
    controller.load().await;
    assert!(controller.error().is_none());
}

#[tokio::test]
async fn test_failure_keeps_displayed_items() {
    let catalog = Arc::new(FakeCatalog::new());
    catalog.push_ok(vec![sample_item(1, "A"), sample_item(2, "B")]);
    catalog.push_err(Error::service(500, "timeout"));
    catalog.push_err(Error::service(500, "timeout"));
    let controller = ListController::new(catalog);

    controller.load().await;
    let after_refresh = controller.refresh().await;
    assert_eq!(names(&after_refresh.items()), vec!["A", "B"]);
    assert_eq!(after_refresh.error(), Some("Service error (500): timeout"));

    let after_load = controller.load().await;
    assert_eq!(names(&after_load.items()), vec!["A", "B"]);
    assert!(after_load.error().is_some());
}

#[tokio::test]
async fn test_success_replaces_whole_list() {
    let catalog = Arc::new(FakeCatalog::new());
    catalog.push_ok(vec![sample_item(1, "A"), sample_item(2, "B")]);
    catalog.push_ok(vec![sample_item(3, "C")]);
    let controller = ListController::new(catalog);

    controller.load().await;
    controller.refresh().await;

    assert_eq!(names(&controller.items()), vec!["C"]);
}

#[tokio::test]
async fn test_error_cleared_when_fetch_starts() {
    let catalog = Arc::new(FakeCatalog::new());
    catalog.push_err(Error::service(500, "down"));
    catalog.push_ok(vec![sample_item(1, "A")]);
    let controller = Arc::new(ListController::new(catalog.clone()));

    controller.load().await;
    assert!(controller.error().is_some());

    let gate = catalog.gate();
    let mut rx = controller.subscribe();
    let task = tokio::spawn({
        let controller = Arc::clone(&controller);
        async move { controller.load().await }
    });

    rx.changed().await.unwrap();
    {
        let state = rx.borrow_and_update();
        assert!(state.is_loading());
        assert!(state.error().is_none());
    }

    gate.release();
    task.await.unwrap();
    assert!(!controller.is_loading());
    assert!(!controller.is_refreshing());
    assert_eq!(catalog.calls(), 2);
}

#[tokio::test]
async fn test_list_stays_visible_during_refresh() {
    let catalog = Arc::new(FakeCatalog::new());
    catalog.push_ok(vec![sample_item(1, "A")]);
    catalog.push_ok(vec![sample_item(1, "A"), sample_item(2, "B")]);
    let controller = Arc::new(ListController::new(catalog.clone()));
    controller.load().await;

    let gate = catalog.gate();
    let mut rx = controller.subscribe();
    let task = tokio::spawn({
        let controller = Arc::clone(&controller);
        async move { controller.refresh().await }
    });

    rx.changed().await.unwrap();
    assert!(controller.is_refreshing());
    assert_eq!(names(&controller.items()), vec!["A"]);

    gate.release();
    let state = task.await.unwrap();
    assert_eq!(names(&state.items()), vec!["A", "B"]);
}

#[tokio::test]
async fn test_overlapping_fetches_settle_to_ready() {
    let catalog = Arc::new(FakeCatalog::new());
    catalog.push_ok(vec![sample_item(1, "first")]);
    catalog.push_ok(vec![sample_item(1, "second")]);
    let gate = catalog.gate();
    let controller = Arc::new(ListController::new(catalog.clone()));

    let first = tokio::spawn({
        let controller = Arc::clone(&controller);
        async move { controller.load().await }
    });
    while catalog.calls() < 1 {
        tokio::task::yield_now().await;
    }
    let second = tokio::spawn({
        let controller = Arc::clone(&controller);
        async move { controller.refresh().await }
    });
    while catalog.calls() < 2 {
        tokio::task::yield_now().await;
    }

    gate.release();
    gate.release();
    first.await.unwrap();
    second.await.unwrap();

    let state = controller.state();
    assert!(matches!(state, ListState::Ready { .. }));
    assert_eq!(state.items().len(), 1);
}
