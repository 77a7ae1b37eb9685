//! End-to-end tests of the HTTP client and session store against the fake backend.

mod common;

use clinic_console::app::AppEvent;
use clinic_console::core::{AppError, ApiService};
use clinic_console::services::api::RequestOptions;
use clinic_console::services::session;
use clinic_console::services::{FileTokenStorage, MemoryTokenStorage, TokenStorage};
use common::{FakeBackend, PASSWORD, TOKEN};
use shared::PatientCreate;
use std::sync::Arc;

fn new_patient(phone: &str) -> PatientCreate {
    PatientCreate {
        first_name: "Тарас".to_string(),
        last_name: "Шевченко".to_string(),
        middle_name: None,
        birth_date: chrono::NaiveDate::from_ymd_opt(1980, 3, 9).unwrap(),
        gender: None,
        phone: phone.to_string(),
        email: None,
        address: None,
        insurance_number: None,
        blood_type: Some("A+".to_string()),
        allergies: None,
        chronic_diseases: None,
        emergency_contact: None,
        emergency_phone: None,
    }
}

#[tokio::test]
async fn test_login_persists_token_and_loads_profile() {
    let backend = FakeBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(FileTokenStorage::new(dir.path().join("session.json")));
    let (client, _rx) = backend.client(storage.clone());

    let user = session::login(&client, "admin", PASSWORD).await.unwrap();

    assert_eq!(user.map(|u| u.username).as_deref(), Some("admin"));
    assert_eq!(storage.load().unwrap().as_deref(), Some(TOKEN));
    assert_eq!(client.session().token().as_deref(), Some(TOKEN));

    // Authenticated calls carry the bearer token
    let patients = client.list_patients().await.unwrap();
    assert_eq!(patients.len(), 2);
}

#[tokio::test]
async fn test_login_without_token_is_rejected() {
    let backend = FakeBackend::start().await;
    backend.store.lock().issue_token = false;
    let storage = Arc::new(MemoryTokenStorage::new());
    let (client, _rx) = backend.client(storage.clone());

    let result = session::login(&client, "admin", PASSWORD).await;

    assert!(matches!(result, Err(AppError::InvalidLoginResponse)));
    assert!(!client.session().is_authenticated());
    assert_eq!(storage.load().unwrap(), None);
}

#[tokio::test]
async fn test_login_with_blank_credentials_sends_nothing() {
    let backend = FakeBackend::start().await;
    let (client, _rx) = backend.client(Arc::new(MemoryTokenStorage::new()));

    let result = session::login(&client, "  ", PASSWORD).await;

    assert!(matches!(result, Err(AppError::InvalidInput(_))));
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_unauthorized_tears_down_session() {
    let backend = FakeBackend::start().await;
    let storage = Arc::new(MemoryTokenStorage::new());
    let (client, rx) = backend.client(storage.clone());
    session::login(&client, "admin", PASSWORD).await.unwrap();

    backend.expire_tokens();
    let result = client.list_appointments().await;

    assert!(matches!(result, Err(AppError::Unauthorized)));
    assert!(!client.session().is_authenticated());
    assert!(client.session().user().is_none());
    assert_eq!(storage.load().unwrap(), None);
    assert_eq!(rx.try_recv().unwrap(), AppEvent::SessionExpired);
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let backend = FakeBackend::start().await;
    let (client, _rx) = backend.client(Arc::new(MemoryTokenStorage::new()));

    let result = session::login(&client, "admin", "wrong").await;

    assert!(matches!(result, Err(AppError::Unauthorized)));
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn test_no_content_delete_and_ack_delete() {
    let backend = FakeBackend::start().await;
    let (client, _rx) = backend.client(Arc::new(MemoryTokenStorage::new()));
    session::login(&client, "admin", PASSWORD).await.unwrap();

    client.delete_patient(2).await.unwrap();
    client.delete_department(1).await.unwrap();

    let ids: Vec<i64> = client.list_patients().await.unwrap().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1]);
    assert!(client.list_departments().await.unwrap().is_empty());

    let raw = client
        .request::<serde_json::Value>("/patients/1", RequestOptions::delete())
        .await
        .unwrap();
    assert_eq!(raw, None);
}

#[tokio::test]
async fn test_error_detail_becomes_request_failed() {
    let backend = FakeBackend::start().await;
    let (client, _rx) = backend.client(Arc::new(MemoryTokenStorage::new()));
    session::login(&client, "admin", PASSWORD).await.unwrap();

    match client.create_patient(&new_patient("+380501112233")).await {
        Err(AppError::RequestFailed(message)) => {
            assert_eq!(message, "Patient with this phone already exists")
        }
        other => panic!("expected RequestFailed, got {:?}", other),
    }

    match client.get_patient(999).await {
        Err(AppError::RequestFailed(message)) => assert_eq!(message, "Patient not found"),
        other => panic!("expected RequestFailed, got {:?}", other),
    }

    match client.request::<serde_json::Value>("/broken", RequestOptions::get()).await {
        Err(AppError::RequestFailed(message)) => assert_eq!(message, "Server error: 500"),
        other => panic!("expected RequestFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_then_list_includes_new_record() {
    let backend = FakeBackend::start().await;
    let (client, _rx) = backend.client(Arc::new(MemoryTokenStorage::new()));
    session::login(&client, "admin", PASSWORD).await.unwrap();

    let created = client.create_patient(&new_patient("+380991234567")).await.unwrap();
    assert_eq!(created.blood_type.as_deref(), Some("A+"));

    let patients = client.list_patients().await.unwrap();
    assert!(patients.iter().any(|p| p.id == created.id && p.last_name == "Шевченко"));
}

#[tokio::test]
async fn test_restore_with_valid_token() {
    let backend = FakeBackend::start().await;
    let storage = Arc::new(MemoryTokenStorage::with_token(TOKEN));
    let (client, _rx) = backend.client(storage);

    assert!(session::restore(&client).await.unwrap());
    assert_eq!(
        client.session().user().map(|u| u.full_name).as_deref(),
        Some("Адмін Системи")
    );
}

#[tokio::test]
async fn test_restore_with_stale_token_clears_it() {
    let backend = FakeBackend::start().await;
    let storage = Arc::new(MemoryTokenStorage::with_token("stale"));
    let (client, rx) = backend.client(storage.clone());

    let result = session::restore(&client).await;

    assert!(matches!(result, Err(AppError::Unauthorized)));
    assert!(!client.session().is_authenticated());
    assert_eq!(storage.load().unwrap(), None);
    assert_eq!(rx.try_recv().unwrap(), AppEvent::SessionExpired);
}

#[tokio::test]
async fn test_restore_without_token_makes_no_request() {
    let backend = FakeBackend::start().await;
    let (client, _rx) = backend.client(Arc::new(MemoryTokenStorage::new()));

    assert!(!session::restore(&client).await.unwrap());
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_null_body_is_a_value_but_no_content_is_none() {
    let backend = FakeBackend::start().await;
    let (client, _rx) = backend.client(Arc::new(MemoryTokenStorage::new()));

    let null = client
        .request::<serde_json::Value>("/null", RequestOptions::get())
        .await
        .unwrap();
    let empty = client
        .request::<serde_json::Value>("/empty", RequestOptions::get())
        .await
        .unwrap();

    assert_eq!(null, Some(serde_json::Value::Null));
    assert_eq!(empty, None);
}
