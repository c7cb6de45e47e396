mod support;

use chrono::{NaiveDate, NaiveDateTime};
use pickup_console::cli::{Command, PickupCommand};
use pickup_console::controllers;
use pickup_console::models::status::{RequestStatus, StatusCategory};
use pickup_console::services::pickup_service::{PickupListScope, PickupService};
use pickup_console::state::AppState;
use pickup_console::utils::errors::{AppError, FormField};
use support::{login_as, seeded_service, valid_form, FakeApi};

fn at(date: &str, time: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%Y-%m-%d %H:%M").unwrap()
}

#[tokio::test]
async fn test_create_round_trip_through_refetched_list() {
    let api = FakeApi::start().await;
    let dir = tempfile::tempdir().unwrap();
    let state = api.state(&dir);
    login_as(&state, "admin", "admin123").await;

    let service = PickupService::new(&state);
    let outcome = service.create(&valid_form(), PickupListScope::Recent).await.unwrap();
    let saved = outcome.saved.clone().unwrap();

    assert_eq!(outcome.list.scope, PickupListScope::Recent);
    assert_eq!(outcome.list.items, vec![saved.clone()]);
    assert_eq!(saved.customer_name, "Asha Rao");
    assert_eq!(saved.customer_phone_number, "9876543210");
    assert_eq!(saved.customer_email.as_deref(), Some("asha@example.com"));
    assert_eq!(saved.vehicle_number, "KA01AB1234");
    assert_eq!(saved.vehicle_model.as_deref(), Some("Octavia"));
    assert_eq!(saved.vehicle_brand, "Skoda");
    assert_eq!(saved.service_location, "12 MG Road, Bengaluru 560001");
    assert_eq!(saved.pickup_time, at("2099-06-15", "10:30"));
    assert_eq!(saved.status, RequestStatus::Pending);
    assert_eq!(saved.created_by.as_deref(), Some("admin"));
    assert_eq!(saved.created_by_name.as_deref(), Some("Front Desk"));

    assert_eq!(service.cached().await.unwrap(), Some(outcome.list));
    assert_eq!(api.calls(), vec!["login", "create_service", "recent_services"]);
}

#[tokio::test]
async fn test_requests_carry_employee_and_request_id_headers() {
    let api = FakeApi::start().await;
    let dir = tempfile::tempdir().unwrap();
    let state = api.state(&dir);
    login_as(&state, "admin", "admin123").await;

    PickupService::new(&state).list(PickupListScope::Recent).await.unwrap();

    assert_eq!(api.last_employee_header().as_deref(), Some("Front Desk"));
    let request_id = api.last_request_id().unwrap();
    assert!(uuid::Uuid::parse_str(&request_id).is_ok());
}

#[tokio::test]
async fn test_invalid_form_never_reaches_the_server() {
    let api = FakeApi::start().await;
    let dir = tempfile::tempdir().unwrap();
    let state = api.state(&dir);
    login_as(&state, "admin", "admin123").await;

    let mut form = valid_form();
    form.customer_name = "Al".to_string();
    form.pickup_time = Some("2020-01-01T10:00".to_string());

    let err = PickupService::new(&state)
        .create(&form, PickupListScope::Recent)
        .await
        .unwrap_err();
    match err {
        AppError::Validation(fields) => {
            assert!(fields.contains(FormField::CustomerName));
            assert!(fields.contains(FormField::PickupTime));
            assert!(!fields.contains(FormField::CustomerPhoneNumber));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(api.calls(), vec!["login"]);
}

#[tokio::test]
async fn test_create_without_session_is_rejected() {
    let api = FakeApi::start().await;
    let dir = tempfile::tempdir().unwrap();
    let state = api.state(&dir);

    let err = PickupService::new(&state)
        .create(&valid_form(), PickupListScope::Recent)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotAuthenticated));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_sc_ops_edits_only_pending_requests() {
    let api = FakeApi::start().await;
    let pending = api.seed_service(seeded_service("PENDING", "2099-01-15T10:00:00"));
    let assigned = api.seed_service(seeded_service("DRIVER_ASSIGNED", "2099-01-15T11:00:00"));

    let dir = tempfile::tempdir().unwrap();
    let state = api.state(&dir);
    login_as(&state, "ops", "ops123").await;
    let service = PickupService::new(&state);
    service.list(PickupListScope::Recent).await.unwrap();

    let mut form = service.get(pending, PickupListScope::Recent).await.unwrap().to_form();
    form.customer_name = "Ravi K".to_string();
    form.pickup_time = Some("2099-01-16T09:00".to_string());
    service.edit(pending, &form, PickupListScope::Recent).await.unwrap();

    let stored = api.service(pending).unwrap();
    assert_eq!(stored["customerName"], "Ravi K");
    assert_eq!(stored["status"], "PENDING");
    assert_eq!(stored["createdByName"], "Other Desk");

    let form = service.get(assigned, PickupListScope::Recent).await.unwrap().to_form();
    let err = service
        .edit(assigned, &form, PickupListScope::Recent)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    assert_eq!(api.call_count("update_service"), 1);
}

#[tokio::test]
async fn test_user_without_known_role_cannot_edit() {
    let api = FakeApi::start().await;
    let id = api.seed_service(seeded_service("PENDING", "2099-01-15T10:00:00"));

    let dir = tempfile::tempdir().unwrap();
    let state = api.state(&dir);
    login_as(&state, "viewer", "viewer123").await;
    let service = PickupService::new(&state);

    let form = service.get(id, PickupListScope::Recent).await.unwrap().to_form();
    let err = service.edit(id, &form, PickupListScope::Recent).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    assert_eq!(api.call_count("update_service"), 0);
}

#[tokio::test]
async fn test_driver_status_requires_a_driver() {
    let api = FakeApi::start().await;
    let id = api.seed_service(seeded_service("PENDING", "2099-01-15T10:00:00"));
    let driver = api.seed_driver("Suresh");

    let dir = tempfile::tempdir().unwrap();
    let state = api.state(&dir);
    login_as(&state, "admin", "admin123").await;
    let service = PickupService::new(&state);
    service.list(PickupListScope::Recent).await.unwrap();

    let err = service
        .change_status(id, RequestStatus::DriverAssigned, None, PickupListScope::Recent)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DriverRequired(RequestStatus::DriverAssigned)));
    assert_eq!(api.call_count("update_status"), 0);

    let outcome = service
        .change_status(id, RequestStatus::DriverAssigned, Some(driver), PickupListScope::Recent)
        .await
        .unwrap();
    let updated = outcome.list.find(id).unwrap();
    assert_eq!(updated.status, RequestStatus::DriverAssigned);
    assert_eq!(updated.driver_id(), Some(driver));
    assert_eq!(updated.category(), StatusCategory::InProgress);
}

#[tokio::test]
async fn test_non_driver_status_needs_no_driver() {
    let api = FakeApi::start().await;
    let id = api.seed_service(seeded_service("PENDING", "2099-01-15T10:00:00"));

    let dir = tempfile::tempdir().unwrap();
    let state = api.state(&dir);
    login_as(&state, "admin", "admin123").await;

    let outcome = PickupService::new(&state)
        .change_status(id, RequestStatus::AdminCancelled, None, PickupListScope::Recent)
        .await
        .unwrap();
    assert_eq!(outcome.list.find(id).unwrap().category(), StatusCategory::Cancelled);
}

#[tokio::test]
async fn test_sc_ops_cannot_change_status() {
    let api = FakeApi::start().await;
    let id = api.seed_service(seeded_service("PENDING", "2099-01-15T10:00:00"));

    let dir = tempfile::tempdir().unwrap();
    let state = api.state(&dir);
    login_as(&state, "ops", "ops123").await;

    let err = PickupService::new(&state)
        .change_status(id, RequestStatus::AdminAccepted, None, PickupListScope::Recent)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    assert_eq!(api.call_count("update_status"), 0);
}

#[tokio::test]
async fn test_strict_mode_rejects_skipped_transitions() {
    let api = FakeApi::start().await;
    let id = api.seed_service(seeded_service("PENDING", "2099-01-15T10:00:00"));
    let driver = api.seed_driver("Suresh");

    let dir = tempfile::tempdir().unwrap();
    let state = api.strict_state(&dir);
    login_as(&state, "admin", "admin123").await;

    let err = PickupService::new(&state)
        .change_status(id, RequestStatus::Completed, Some(driver), PickupListScope::Recent)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::TransitionNotAllowed { from: RequestStatus::Pending, to: RequestStatus::Completed }
    ));
    assert_eq!(api.call_count("update_status"), 0);
}

#[tokio::test]
async fn test_failed_refresh_leaves_cache_untouched() {
    let api = FakeApi::start().await;
    api.seed_service(seeded_service("PENDING", "2099-01-15T10:00:00"));

    let dir = tempfile::tempdir().unwrap();
    let state = api.state(&dir);
    login_as(&state, "admin", "admin123").await;
    let service = PickupService::new(&state);
    let before = service.list(PickupListScope::Recent).await.unwrap();

    api.seed_service(seeded_service("PENDING", "2099-01-16T10:00:00"));
    api.set_fail_lists(true);

    let err = service.list(PickupListScope::Recent).await.unwrap_err();
    assert!(matches!(err, AppError::ExternalApi { status: 500, .. }));
    assert_eq!(service.cached().await.unwrap(), Some(before));
}

#[tokio::test]
async fn test_cache_miss_refetches_once() {
    let api = FakeApi::start().await;
    let dir = tempfile::tempdir().unwrap();
    let state = api.state(&dir);
    login_as(&state, "admin", "admin123").await;
    let service = PickupService::new(&state);
    service.list(PickupListScope::Recent).await.unwrap();

    let id = api.seed_service(seeded_service("PENDING", "2099-01-15T10:00:00"));
    service
        .change_status(id, RequestStatus::AdminAccepted, None, PickupListScope::Recent)
        .await
        .unwrap();
    assert_eq!(api.call_count("recent_services"), 3);

    let err = service
        .change_status(999, RequestStatus::AdminAccepted, None, PickupListScope::Recent)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(api.call_count("recent_services"), 4);
}

#[tokio::test]
async fn test_select_date_persists_and_filters() {
    let api = FakeApi::start().await;
    api.seed_service(seeded_service("PENDING", "2099-01-15T10:00:00"));
    api.seed_service(seeded_service("PENDING", "2099-01-16T10:00:00"));

    let dir = tempfile::tempdir().unwrap();
    let state = api.state(&dir);
    login_as(&state, "admin", "admin123").await;

    let date = NaiveDate::from_ymd_opt(2099, 1, 15).unwrap();
    let list = PickupService::new(&state).select_date(date).await.unwrap();
    assert_eq!(list.scope, PickupListScope::ByDate(date));
    assert_eq!(list.items.len(), 1);
    assert_eq!(list.items[0].pickup_time, at("2099-01-15", "10:00"));

    let reopened = AppState::bootstrap(api.config(&dir)).await.unwrap();
    let service = PickupService::new(&reopened);
    assert_eq!(service.selected_date().await.unwrap(), Some(date));
    assert_eq!(service.cached().await.unwrap().map(|l| l.scope), Some(PickupListScope::ByDate(date)));
}

#[tokio::test]
async fn test_board_loads_pickups_and_drivers() {
    let api = FakeApi::start().await;
    api.seed_service(seeded_service("PENDING", "2099-01-15T10:00:00"));
    api.seed_service(seeded_service("COMPLETED", "2099-01-15T11:00:00"));
    api.seed_driver("Suresh");

    let dir = tempfile::tempdir().unwrap();
    let state = api.state(&dir);
    login_as(&state, "admin", "admin123").await;

    let board = PickupService::new(&state).board(PickupListScope::Recent).await.unwrap();
    assert_eq!(board.list.items.len(), 2);
    assert_eq!(board.drivers.len(), 1);
    assert_eq!(board.counts.get(StatusCategory::Pending), 1);
    assert_eq!(board.counts.get(StatusCategory::Completed), 1);
    assert_eq!(board.counts.total(), 2);
}

#[tokio::test]
async fn test_delete_refreshes_list() {
    let api = FakeApi::start().await;
    let dir = tempfile::tempdir().unwrap();
    let state = api.state(&dir);
    login_as(&state, "admin", "admin123").await;
    let service = PickupService::new(&state);

    let created = service.create(&valid_form(), PickupListScope::Recent).await.unwrap();
    let id = created.saved.unwrap().id;

    let outcome = service.delete(id, PickupListScope::Recent).await.unwrap();
    assert!(outcome.list.items.is_empty());
    assert!(api.service(id).is_none());
    assert_eq!(service.cached().await.unwrap().unwrap().items.len(), 0);
}

#[tokio::test]
async fn test_rejected_token_clears_session() {
    let api = FakeApi::start().await;
    let dir = tempfile::tempdir().unwrap();
    let state = api.state(&dir);
    login_as(&state, "admin", "admin123").await;

    api.revoke_tokens();
    let err = controllers::dispatch(&state, Command::Pickups(PickupCommand::Recent))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Unauthorized(_)));
    assert!(err.requires_login());
    assert!(!state.session.is_authenticated().await);
}

#[tokio::test]
async fn test_rejected_token_survives_unwritable_store() {
    let api = FakeApi::start().await;
    let dir = tempfile::tempdir().unwrap();
    let state = api.state(&dir);
    login_as(&state, "admin", "admin123").await;

    let store_path = dir.path().join("store.json");
    std::fs::remove_file(&store_path).unwrap();
    std::fs::create_dir(&store_path).unwrap();

    api.revoke_tokens();
    let err = controllers::dispatch(&state, Command::Pickups(PickupCommand::Recent))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Unauthorized(_)));
    assert!(err.requires_login());
}
