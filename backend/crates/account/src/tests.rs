//! Unit tests for the account crate

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use crate::application::{
        AccountConfig, GetUserUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
    };
    use crate::domain::value_object::user_role::UserRole;
    use crate::error::AccountError;
    use crate::infra::InMemoryUserRepository;

    fn config() -> Arc<AccountConfig> {
        Arc::new(AccountConfig::with_fast_hashing())
    }

    fn input(email: &str, role: UserRole, zone: Option<&str>) -> RegisterInput {
        RegisterInput {
            email: email.to_string(),
            password: "secret123".to_string(),
            name: "Asha".to_string(),
            role,
            address: None,
            zone: zone.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_register_citizen_gets_signup_bonus() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let user = RegisterUseCase::new(repo.clone(), config())
            .execute(input("asha@example.com", UserRole::Citizen, Some("Ward 15")))
            .await
            .unwrap();

        assert_eq!(user.green_points, 25);
        assert_eq!(user.zone.as_deref(), Some("Ward 15"));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_register_verifier_and_admin_start_at_zero() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let use_case = RegisterUseCase::new(repo, config());

        let verifier = use_case
            .execute(input("champ@example.com", UserRole::Verifier, None))
            .await
            .unwrap();
        let admin = use_case
            .execute(input("admin@example.com", UserRole::Admin, None))
            .await
            .unwrap();

        assert_eq!(verifier.green_points, 0);
        assert_eq!(admin.green_points, 0);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_creates_nothing() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let use_case = RegisterUseCase::new(repo.clone(), config());

        use_case
            .execute(input("a@b.co", UserRole::Citizen, None))
            .await
            .unwrap();
        let err = use_case
            .execute(input("a@b.co", UserRole::Verifier, None))
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::EmailTaken));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_register_email_uniqueness_is_case_sensitive() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let use_case = RegisterUseCase::new(repo.clone(), config());

        use_case
            .execute(input("a@b.co", UserRole::Citizen, None))
            .await
            .unwrap();
        use_case
            .execute(input("A@b.co", UserRole::Citizen, None))
            .await
            .unwrap();

        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_fields() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let use_case = RegisterUseCase::new(repo.clone(), config());

        let mut bad_email = input("not-an-email", UserRole::Citizen, None);
        assert!(matches!(
            use_case.execute(bad_email).await,
            Err(AccountError::InvalidData(_))
        ));

        bad_email = input("a@b.co", UserRole::Citizen, None);
        bad_email.name = "   ".to_string();
        assert!(matches!(
            use_case.execute(bad_email).await,
            Err(AccountError::InvalidData(_))
        ));

        let mut bad_password = input("a@b.co", UserRole::Citizen, None);
        bad_password.password = String::new();
        assert!(matches!(
            use_case.execute(bad_password).await,
            Err(AccountError::InvalidData(_))
        ));

        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_password_is_stored_hashed() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let user = RegisterUseCase::new(repo, config())
            .execute(input("a@b.co", UserRole::Citizen, None))
            .await
            .unwrap();

        assert!(user.password.as_phc_string().starts_with("$argon2id$"));
        assert!(!user.password.as_phc_string().contains("secret123"));
    }

    #[tokio::test]
    async fn test_login_success_and_failures() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let registered = RegisterUseCase::new(repo.clone(), config())
            .execute(input("a@b.co", UserRole::Citizen, None))
            .await
            .unwrap();

        let login = LoginUseCase::new(repo, config());

        let user = login
            .execute(LoginInput {
                email: "a@b.co".to_string(),
                password: "secret123".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(user.id, registered.id);

        let wrong_password = login
            .execute(LoginInput {
                email: "a@b.co".to_string(),
                password: "nope".to_string(),
            })
            .await;
        assert!(matches!(wrong_password, Err(AccountError::InvalidCredentials)));

        let unknown = login
            .execute(LoginInput {
                email: "ghost@b.co".to_string(),
                password: "secret123".to_string(),
            })
            .await;
        assert!(matches!(unknown, Err(AccountError::InvalidCredentials)));

        let malformed = login
            .execute(LoginInput {
                email: "a-at-b".to_string(),
                password: "secret123".to_string(),
            })
            .await;
        assert!(matches!(malformed, Err(AccountError::InvalidData(_))));

        let empty = login
            .execute(LoginInput {
                email: "a@b.co".to_string(),
                password: String::new(),
            })
            .await;
        assert!(matches!(empty, Err(AccountError::InvalidData(_))));
    }

    #[tokio::test]
    async fn test_login_with_pepper() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let peppered = Arc::new(AccountConfig {
            password_pepper: Some(b"pepper".to_vec()),
            ..AccountConfig::with_fast_hashing()
        });

        RegisterUseCase::new(repo.clone(), peppered.clone())
            .execute(input("a@b.co", UserRole::Citizen, None))
            .await
            .unwrap();

        let credentials = || LoginInput {
            email: "a@b.co".to_string(),
            password: "secret123".to_string(),
        };

        assert!(
            LoginUseCase::new(repo.clone(), peppered)
                .execute(credentials())
                .await
                .is_ok()
        );
        assert!(
            LoginUseCase::new(repo, config())
                .execute(credentials())
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_get_user() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let registered = RegisterUseCase::new(repo.clone(), config())
            .execute(input("a@b.co", UserRole::Citizen, None))
            .await
            .unwrap();

        let get = GetUserUseCase::new(repo);
        let found = get.execute(&registered.id.to_string()).await.unwrap();
        assert_eq!(found.email.as_str(), "a@b.co");

        let missing = get.execute(&uuid::Uuid::new_v4().to_string()).await;
        assert!(matches!(missing, Err(AccountError::UserNotFound)));

        let malformed = get.execute("42").await;
        assert!(matches!(malformed, Err(AccountError::UserNotFound)));
    }
}

#[cfg(test)]
mod repository_tests {
    use std::sync::Arc;

    use kernel::id::UserId;
    use platform::password::HashCost;

    use crate::domain::entity::{Debit, User};
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::{
        display_name::DisplayName,
        email::Email,
        user_password::{RawPassword, UserPassword},
        user_role::UserRole,
    };
    use crate::infra::InMemoryUserRepository;

    fn user(email: &str, role: UserRole, zone: Option<&str>) -> User {
        let raw = RawPassword::new("pw".to_string()).unwrap();
        User::new(
            Email::new(email).unwrap(),
            UserPassword::from_raw(&raw, None, HashCost::FAST).unwrap(),
            DisplayName::new("Test").unwrap(),
            role,
            None,
            zone.map(str::to_string),
        )
    }

    #[tokio::test]
    async fn test_empty_zone_is_stored_as_none() {
        let u = user("a@b.co", UserRole::Citizen, Some(""));
        assert!(u.zone.is_none());
    }

    #[tokio::test]
    async fn test_find_ids_by_zone_exact_match() {
        let repo = InMemoryUserRepository::new();
        let in_zone = user("a@b.co", UserRole::Citizen, Some("Ward 15"));
        let other = user("b@b.co", UserRole::Citizen, Some("ward 15"));
        let none = user("c@b.co", UserRole::Citizen, None);
        for u in [&in_zone, &other, &none] {
            repo.create(u).await.unwrap();
        }

        let ids = repo.find_ids_by_zone("Ward 15").await.unwrap();
        assert_eq!(ids, vec![in_zone.id]);
    }

    #[tokio::test]
    async fn test_adjust_points() {
        let repo = InMemoryUserRepository::new();
        let u = user("a@b.co", UserRole::Citizen, None);
        repo.create(&u).await.unwrap();

        assert_eq!(repo.adjust_points(&u.id, 10).await.unwrap(), Some(35));
        assert_eq!(repo.adjust_points(&UserId::new(), 10).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_debit_if_sufficient() {
        let repo = InMemoryUserRepository::new();
        let u = user("a@b.co", UserRole::Citizen, None);
        repo.create(&u).await.unwrap();

        assert_eq!(
            repo.debit_if_sufficient(&u.id, 26).await.unwrap(),
            Debit::InsufficientBalance { balance: 25 }
        );
        assert_eq!(
            repo.debit_if_sufficient(&u.id, 25).await.unwrap(),
            Debit::Applied { balance: 0 }
        );
        assert_eq!(
            repo.debit_if_sufficient(&UserId::new(), 1).await.unwrap(),
            Debit::UserNotFound
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_debits_never_overdraw() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let u = user("a@b.co", UserRole::Citizen, None);
        repo.create(&u).await.unwrap();

        // 25 points, ten attempts at 10 each: exactly two succeed
        let mut handles = Vec::new();
        for _ in 0..10 {
            let repo = repo.clone();
            let id = u.id;
            handles.push(tokio::spawn(async move {
                repo.debit_if_sufficient(&id, 10).await.unwrap()
            }));
        }

        let mut applied = 0;
        for handle in handles {
            if handle.await.unwrap().is_applied() {
                applied += 1;
            }
        }

        assert_eq!(applied, 2);
        let stored = repo.find_by_id(&u.id).await.unwrap().unwrap();
        assert_eq!(stored.green_points, 5);
    }
}

#[cfg(test)]
mod http_tests {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::AccountConfig;
    use crate::infra::InMemoryUserRepository;
    use crate::presentation::router::account_router_generic;

    fn app() -> Router {
        Router::new().nest(
            "/api",
            account_router_generic(
                InMemoryUserRepository::new(),
                AccountConfig::with_fast_hashing(),
            ),
        )
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn register_body(email: &str) -> Value {
        json!({
            "email": email,
            "password": "secret123",
            "name": "Asha",
            "userType": "citizen",
            "zone": "Ward 15"
        })
    }

    #[tokio::test]
    async fn test_register_returns_user_without_password() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/register",
            Some(register_body("a@b.co")),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let user = &body["user"];
        assert_eq!(user["email"], "a@b.co");
        assert_eq!(user["role"], "citizen");
        assert_eq!(user["greenPoints"], 25);
        assert_eq!(user["zone"], "Ward 15");
        assert!(user.get("password").is_none());
        assert!(user.get("passwordHash").is_none());
    }

    #[tokio::test]
    async fn test_register_duplicate_is_400() {
        let app = app();
        send(&app, Method::POST, "/api/auth/register", Some(register_body("a@b.co"))).await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/register",
            Some(register_body("a@b.co")),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "User already exists");
    }

    #[tokio::test]
    async fn test_register_schema_violation_is_invalid_data() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/register",
            Some(json!({"email": "a@b.co", "password": "x", "name": "A", "role": "mayor"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "invalid data");
    }

    #[tokio::test]
    async fn test_register_malformed_email_is_invalid_data() {
        let app = app();
        for email in ["john doe@example.com", "(x)@example.com", "user@example..com"] {
            let (status, body) = send(
                &app,
                Method::POST,
                "/api/auth/register",
                Some(register_body(email)),
            )
            .await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{email}");
            assert_eq!(body["detail"], "invalid data");
        }
    }

    #[tokio::test]
    async fn test_login_and_get_user() {
        let app = app();
        let (_, registered) = send(
            &app,
            Method::POST,
            "/api/auth/register",
            Some(register_body("a@b.co")),
        )
        .await;
        let id = registered["user"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            Some(json!({"email": "a@b.co", "password": "secret123"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["id"], id.as_str());

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            Some(json!({"email": "a@b.co", "password": "wrong"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "Invalid credentials");

        let (status, body) = send(&app, Method::GET, &format!("/api/users/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Asha");
        assert!(body.get("password").is_none());

        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/api/users/{}", uuid::Uuid::new_v4()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "User not found");
    }
}
