use user_api::model::{NewUser, UserPatch};
use user_api::{ApiError, Store, UserService};

async fn store() -> Store {
    Store::open_in_memory().await.unwrap()
}

fn input(first: &str, last: &str, email: &str) -> NewUser {
    NewUser {
        first_name: Some(first.into()),
        last_name: Some(last.into()),
        email: Some(email.into()),
        ..Default::default()
    }
}

#[tokio::test]
async fn create_then_read_back() {
    let store = store().await;

    let created = UserService::create(&store, &input("John", "Doe", "john@example.com"))
        .await
        .unwrap();
    assert!(created.id > 0);
    assert_eq!(created.first_name, "John");
    assert_eq!(created.last_name, "Doe");
    assert_eq!(created.email, "john@example.com");
    assert_eq!(created.phone, None);
    assert_eq!(created.country, None);

    let loaded = UserService::find_by_id(&store, created.id).await.unwrap();
    assert_eq!(loaded, created);
}

#[tokio::test]
async fn create_lowercases_email() {
    let store = store().await;
    let created = UserService::create(&store, &input("John", "Doe", "JOHN@EX.com"))
        .await
        .unwrap();
    assert_eq!(created.email, "john@ex.com");
}

#[tokio::test]
async fn duplicate_email_is_case_insensitive() {
    let store = store().await;
    UserService::create(&store, &input("John", "Doe", "JOHN@EX.com"))
        .await
        .unwrap();

    let err = UserService::create(&store, &input("Jane", "Doe", "john@ex.com"))
        .await
        .unwrap_err();
    match err {
        ApiError::Duplicate(_) => {}
        other => panic!("expected Duplicate, got {:?}", other),
    }
}

#[tokio::test]
async fn short_first_name_rejected_and_no_row_inserted() {
    let store = store().await;

    let err = UserService::create(&store, &input("A", "Doe", "a@example.com"))
        .await
        .unwrap_err();
    match err {
        ApiError::Validation { details, .. } => {
            let details = details.expect("details map");
            assert!(details.contains_key("first_name"));
        }
        other => panic!("expected Validation, got {:?}", other),
    }

    let (users, meta) = UserService::find_all(&store, Default::default())
        .await
        .unwrap();
    assert!(users.is_empty());
    assert_eq!(meta.total_count, 0);
}

#[tokio::test]
async fn missing_required_fields_collects_per_field_errors() {
    let store = store().await;

    let err = UserService::create(&store, &NewUser::default())
        .await
        .unwrap_err();
    match err {
        ApiError::Validation { details, .. } => {
            let details = details.expect("details map");
            assert!(details.contains_key("first_name"));
            assert!(details.contains_key("last_name"));
            assert!(details.contains_key("email"));
        }
        other => panic!("expected Validation, got {:?}", other),
    }
}

#[tokio::test]
async fn phone_format_is_loosely_validated() {
    let store = store().await;

    let mut bad = input("John", "Doe", "john@example.com");
    bad.phone = Some("not-a-phone".into());
    let err = UserService::create(&store, &bad).await.unwrap_err();
    match err {
        ApiError::Validation { details, .. } => {
            assert!(details.expect("details map").contains_key("phone"));
        }
        other => panic!("expected Validation, got {:?}", other),
    }

    let mut good = input("John", "Doe", "john@example.com");
    good.phone = Some("+1 (555) 123-4567".into());
    let created = UserService::create(&store, &good).await.unwrap();
    assert_eq!(created.phone.as_deref(), Some("+1 (555) 123-4567"));
}

#[tokio::test]
async fn free_text_fields_are_sanitized() {
    let store = store().await;
    let created = UserService::create(&store, &input("  <John>  ", "Doe", "john@example.com"))
        .await
        .unwrap();
    assert_eq!(created.first_name, "John");
}

#[tokio::test]
async fn update_touches_only_supplied_fields() {
    let store = store().await;
    let mut new = input("John", "Doe", "john@example.com");
    new.country = Some("France".into());
    let created = UserService::create(&store, &new).await.unwrap();

    let patch = UserPatch {
        first_name: Some("Johnny".into()),
        ..Default::default()
    };
    let updated = UserService::update(&store, created.id, &patch).await.unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.first_name, "Johnny");
    assert_eq!(updated.last_name, created.last_name);
    assert_eq!(updated.email, created.email);
    assert_eq!(updated.country.as_deref(), Some("France"));
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn update_with_no_fields_is_rejected() {
    let store = store().await;
    let created = UserService::create(&store, &input("John", "Doe", "john@example.com"))
        .await
        .unwrap();

    let err = UserService::update(&store, created.id, &UserPatch::default())
        .await
        .unwrap_err();
    match err {
        ApiError::Validation { message, .. } => {
            assert_eq!(message, "No valid fields to update");
        }
        other => panic!("expected Validation, got {:?}", other),
    }
}

#[tokio::test]
async fn update_empty_optional_field_clears_it() {
    let store = store().await;
    let mut new = input("John", "Doe", "john@example.com");
    new.country = Some("France".into());
    let created = UserService::create(&store, &new).await.unwrap();

    let patch = UserPatch {
        country: Some(Some(String::new())),
        ..Default::default()
    };
    let updated = UserService::update(&store, created.id, &patch).await.unwrap();
    assert_eq!(updated.country, None);
}

#[tokio::test]
async fn update_null_optional_field_clears_it() {
    let store = store().await;
    let mut new = input("John", "Doe", "john@example.com");
    new.phone = Some("+15551234567".into());
    let created = UserService::create(&store, &new).await.unwrap();

    let patch = UserPatch {
        phone: Some(None),
        ..Default::default()
    };
    let updated = UserService::update(&store, created.id, &patch).await.unwrap();
    assert_eq!(updated.phone, None);
}

#[tokio::test]
async fn update_missing_user_is_not_found() {
    let store = store().await;
    let patch = UserPatch {
        first_name: Some("Johnny".into()),
        ..Default::default()
    };
    let err = UserService::update(&store, 42, &patch).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn update_to_existing_email_is_duplicate() {
    let store = store().await;
    UserService::create(&store, &input("John", "Doe", "john@example.com"))
        .await
        .unwrap();
    let jane = UserService::create(&store, &input("Jane", "Doe", "jane@example.com"))
        .await
        .unwrap();

    let patch = UserPatch {
        email: Some("JOHN@example.com".into()),
        ..Default::default()
    };
    let err = UserService::update(&store, jane.id, &patch).await.unwrap_err();
    assert!(matches!(err, ApiError::Duplicate(_)));
}

#[tokio::test]
async fn delete_returns_snapshot_and_is_not_idempotent() {
    let store = store().await;
    let created = UserService::create(&store, &input("John", "Doe", "john@example.com"))
        .await
        .unwrap();

    let deleted = UserService::delete(&store, created.id).await.unwrap();
    assert!(deleted.deleted);
    assert_eq!(deleted.user, created);

    let err = UserService::delete(&store, created.id).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn find_by_id_rejects_non_positive_ids() {
    let store = store().await;
    for id in [0, -5] {
        let err = UserService::find_by_id(&store, id).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));
    }
}
