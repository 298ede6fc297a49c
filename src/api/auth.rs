use crate::api::{ApiClient, ApiError};
use crate::models::{LoginRequest, LoginResponse};
use crate::state::{SessionError, SessionStore};

pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
    let request = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };

    client.post("/api/auth/login", &request).await
}

/// Record a login reply in the session, then hand its token to the client.
///
/// The client keeps no token if the session could not be persisted.
pub fn establish_session(
    client: &ApiClient,
    session: &mut SessionStore,
    response: LoginResponse,
) -> Result<(), SessionError> {
    session.login(response)?;
    client.set_token(Some(session.state().token.clone()));
    Ok(())
}

pub fn logout(client: &ApiClient) {
    client.set_token(None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::tests::spawn_server;
    use crate::models::UserRole;
    use crate::state::{KeyValueStorage, MemoryStorage, StorageError, TOKEN_KEY};
    use axum::{http::StatusCode, response::IntoResponse, routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::sync::Arc;

    async fn fake_login(Json(body): Json<Value>) -> impl IntoResponse {
        if body["email"] == "ada@example.com" && body["password"] == "hunter22" {
            (
                StatusCode::OK,
                Json(json!({
                    "token": "\"jwt-abc\"",
                    "user": {
                        "_id": "u1",
                        "name": "Ada",
                        "role": "business",
                        "profileImage": { "url": "https://res.cloudinary.com/ada.png", "public_id": "ada" },
                        "createdAt": "2024-03-01"
                    }
                })),
            )
                .into_response()
        } else {
            (StatusCode::UNAUTHORIZED, "invalid credentials").into_response()
        }
    }

    fn login_router() -> Router {
        Router::new().route("/api/auth/login", post(fake_login))
    }

    /// Storage that accepts reads but no writes.
    struct FullStorage;

    impl KeyValueStorage for FullStorage {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("quota exceeded".to_string()))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_login_then_session_is_authenticated() {
        let base = spawn_server(login_router()).await;
        let storage = Arc::new(MemoryStorage::new());
        let client = ApiClient::new(&base, storage.clone()).unwrap();
        let mut session = SessionStore::initialize(storage.clone());

        let response = login(&client, "ada@example.com", "hunter22").await.unwrap();
        establish_session(&client, &mut session, response).unwrap();

        assert!(session.is_authenticated());
        assert_eq!(session.state().token, "jwt-abc");
        let user = session.current_user().unwrap();
        assert_eq!(user.role, UserRole::Business);
        assert!(user.profile_image.is_some());
        assert!(user.created_at.is_some());
        assert_eq!(client.bearer_token().as_deref(), Some("jwt-abc"));
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("jwt-abc"));
    }

    #[tokio::test]
    async fn test_login_reply_alone_does_not_arm_the_client() {
        let base = spawn_server(login_router()).await;
        let client = ApiClient::new(&base, Arc::new(MemoryStorage::new())).unwrap();

        login(&client, "ada@example.com", "hunter22").await.unwrap();
        assert_eq!(client.bearer_token(), None);
    }

    #[tokio::test]
    async fn test_unsaved_session_leaves_client_without_token() {
        let base = spawn_server(login_router()).await;
        let storage = Arc::new(FullStorage);
        let client = ApiClient::new(&base, storage.clone()).unwrap();
        let mut session = SessionStore::initialize(storage);

        let response = login(&client, "ada@example.com", "hunter22").await.unwrap();
        let result = establish_session(&client, &mut session, response);

        assert!(matches!(result, Err(SessionError::Storage(_))));
        assert!(!session.is_authenticated());
        assert_eq!(client.bearer_token(), None);
    }

    #[tokio::test]
    async fn test_bad_credentials_leave_session_untouched() {
        let base = spawn_server(login_router()).await;
        let storage = Arc::new(MemoryStorage::new());
        let client = ApiClient::new(&base, storage.clone()).unwrap();
        let session = SessionStore::initialize(storage);

        let err = login(&client, "ada@example.com", "wrong").await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
        assert!(!session.is_authenticated());
        assert_eq!(client.bearer_token(), None);
    }

    #[test]
    fn test_logout_forgets_in_memory_token() {
        let client = ApiClient::new("http://localhost:3000", Arc::new(MemoryStorage::new())).unwrap();
        client.set_token(Some("abc".to_string()));
        logout(&client);
        assert_eq!(client.bearer_token(), None);
    }
}
