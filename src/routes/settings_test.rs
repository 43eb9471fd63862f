use uuid::Uuid;

use super::*;
use crate::services::session::SessionUser;
use crate::settings::SETTINGS_KEY;
use crate::state::test_helpers;

fn auth_user(id: Uuid) -> AuthUser {
    AuthUser { user: SessionUser { id, email: format!("{id}@settings.test") } }
}

#[tokio::test]
async fn get_without_storage_returns_defaults() {
    let state = test_helpers::test_app_state();
    let Json(settings) = get_settings(State(state), auth_user(Uuid::new_v4())).await.unwrap();
    assert_eq!(settings, Settings::default());
}

#[tokio::test]
async fn put_without_storage_echoes_merge_but_does_not_persist() {
    let state = test_helpers::test_app_state();
    let user = Uuid::new_v4();

    let Json(updated) = put_settings(
        State(state.clone()),
        auth_user(user),
        Json(serde_json::json!({ "promptToSave": false })),
    )
    .await
    .unwrap();
    assert!(!updated.prompt_to_save);

    let Json(reloaded) = get_settings(State(state), auth_user(user)).await.unwrap();
    assert_eq!(reloaded, Settings::default());
}

#[tokio::test]
async fn put_then_get_round_trips_through_files() {
    let tmp = tempfile::tempdir().unwrap();
    let state = test_helpers::test_app_state_with_settings_dir(tmp.path());
    let user = Uuid::new_v4();

    let Json(saved) = put_settings(
        State(state.clone()),
        auth_user(user),
        Json(serde_json::json!({ "promptToSave": false })),
    )
    .await
    .unwrap();
    assert!(!saved.prompt_to_save);

    let Json(settings) = get_settings(State(state), auth_user(user)).await.unwrap();
    assert_eq!(settings, Settings { prompt_to_save: false });
    assert!(tmp.path().join(user.to_string()).join(format!("{SETTINGS_KEY}.json")).is_file());
}

#[tokio::test]
async fn put_empty_patch_keeps_current_value() {
    let tmp = tempfile::tempdir().unwrap();
    let state = test_helpers::test_app_state_with_settings_dir(tmp.path());
    let user = Uuid::new_v4();
    state.settings.store_for(user).save(&Settings { prompt_to_save: false });

    let Json(settings) = put_settings(State(state), auth_user(user), Json(serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(settings, Settings { prompt_to_save: false });
}

#[tokio::test]
async fn put_rejects_invalid_patch() {
    let tmp = tempfile::tempdir().unwrap();
    let state = test_helpers::test_app_state_with_settings_dir(tmp.path());

    for patch in [serde_json::json!([]), serde_json::json!({ "promptToSave": 1 })] {
        let result = put_settings(State(state.clone()), auth_user(Uuid::new_v4()), Json(patch)).await;
        assert_eq!(result.unwrap_err(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn corrupt_file_reads_as_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let state = test_helpers::test_app_state_with_settings_dir(tmp.path());
    let user = Uuid::new_v4();
    let dir = tmp.path().join(user.to_string());
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(format!("{SETTINGS_KEY}.json")), "not json").unwrap();

    let Json(settings) = get_settings(State(state), auth_user(user)).await.unwrap();
    assert_eq!(settings, Settings::default());
}

#[tokio::test]
async fn reset_rewrites_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let state = test_helpers::test_app_state_with_settings_dir(tmp.path());
    let user = Uuid::new_v4();
    state.settings.store_for(user).save(&Settings { prompt_to_save: false });

    let Json(settings) = reset_settings(State(state.clone()), auth_user(user)).await.unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(state.settings.store_for(user).load(), Settings::default());
}
