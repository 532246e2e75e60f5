//! Unit tests for the ledger crate

#[cfg(test)]
mod fixtures {
    use std::sync::Arc;

    use account::application::{AccountConfig, RegisterInput, RegisterUseCase};
    use account::models::user_role::UserRole;
    use account::{InMemoryUserRepository, User};
    use kernel::id::RewardId;

    use crate::domain::entities::Reward;
    use crate::domain::repository::RewardRepository;
    use crate::domain::value_objects::RewardKind;
    use crate::infra::InMemoryLedgerRepository;

    pub struct World {
        pub users: Arc<InMemoryUserRepository>,
        pub ledger: Arc<InMemoryLedgerRepository>,
    }

    pub async fn world(rewards: &[Reward]) -> World {
        let ledger = Arc::new(InMemoryLedgerRepository::new());
        ledger.seed(rewards).await.unwrap();
        World {
            users: Arc::new(InMemoryUserRepository::new()),
            ledger,
        }
    }

    pub async fn register(world: &World, email: &str, role: UserRole, zone: Option<&str>) -> User {
        RegisterUseCase::new(
            world.users.clone(),
            Arc::new(AccountConfig::with_fast_hashing()),
        )
        .execute(RegisterInput {
            email: email.to_string(),
            password: "secret123".to_string(),
            name: "Test".to_string(),
            role,
            address: None,
            zone: zone.map(str::to_string),
        })
        .await
        .unwrap()
    }

    pub fn reward(cost: i32) -> Reward {
        Reward::new(
            RewardId::new(),
            format!("{cost} point reward"),
            "Test reward",
            cost,
            RewardKind::Voucher,
        )
    }
}

#[cfg(test)]
mod domain_tests {
    use kernel::id::UserId;

    use crate::domain::entities::Report;
    use crate::domain::value_objects::*;

    fn report(category: ReportCategory) -> Report {
        Report::new(
            UserId::new(),
            category,
            Location::new("MG Road").unwrap(),
            None,
        )
    }

    #[test]
    fn test_new_report_is_pending() {
        let r = report(ReportCategory::Dumping);
        assert_eq!(r.status, ReportStatus::Pending);
        assert_eq!(r.points, 0);
        assert!(r.verified_by.is_none());
    }

    #[test]
    fn test_review_verified_stamps_points() {
        let mut r = report(ReportCategory::Segregation);
        let verifier = UserId::new();

        assert_eq!(r.review(ReportStatus::Verified, Some(verifier)), Some(15));
        assert_eq!(r.points, 15);
        assert_eq!(r.verified_by, Some(verifier));
    }

    #[test]
    fn test_review_rejected_keeps_stamped_points() {
        let mut r = report(ReportCategory::Composting);
        r.review(ReportStatus::Verified, None);

        assert_eq!(r.review(ReportStatus::Rejected, None), None);
        assert_eq!(r.status, ReportStatus::Rejected);
        assert_eq!(r.points, 20);
    }
}

#[cfg(test)]
mod use_case_tests {
    use account::UserRepository;
    use account::models::user_role::UserRole;
    use kernel::id::UserId;

    use super::fixtures::*;
    use crate::application::*;
    use crate::domain::value_objects::{ReportCategory, ReportStatus};
    use crate::error::LedgerError;

    fn submit_input(user_id: UserId, category: ReportCategory) -> SubmitReportInput {
        SubmitReportInput {
            user_id,
            category,
            location: "Near bus stand".to_string(),
            description: Some("Garbage pile".to_string()),
        }
    }

    #[tokio::test]
    async fn test_submit_report_starts_pending() {
        let w = world(&[]).await;
        let citizen = register(&w, "c@x.in", UserRole::Citizen, None).await;

        let report = SubmitReportUseCase::new(w.ledger.clone(), w.users.clone())
            .execute(submit_input(citizen.id, ReportCategory::Dumping))
            .await
            .unwrap();

        assert_eq!(report.status, ReportStatus::Pending);
        assert_eq!(report.points, 0);
        assert_eq!(report.user_id, citizen.id);
        assert!(report.verified_by.is_none());
    }

    #[tokio::test]
    async fn test_submit_report_validation() {
        let w = world(&[]).await;
        let citizen = register(&w, "c@x.in", UserRole::Citizen, None).await;
        let use_case = SubmitReportUseCase::new(w.ledger.clone(), w.users.clone());

        let unknown_owner = use_case
            .execute(submit_input(UserId::new(), ReportCategory::Dumping))
            .await;
        assert!(matches!(unknown_owner, Err(LedgerError::UserNotFound)));

        let mut blank = submit_input(citizen.id, ReportCategory::Dumping);
        blank.location = "   ".to_string();
        assert!(matches!(
            use_case.execute(blank).await,
            Err(LedgerError::InvalidData(_))
        ));

        let all = ListReportsUseCase::new(w.ledger.clone(), w.users.clone())
            .execute(ReportScope::All)
            .await
            .unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn test_verify_composting_then_reject() {
        let w = world(&[]).await;
        let citizen = register(&w, "c@x.in", UserRole::Citizen, None).await;
        let verifier = register(&w, "v@x.in", UserRole::Verifier, None).await;

        let report = SubmitReportUseCase::new(w.ledger.clone(), w.users.clone())
            .execute(submit_input(citizen.id, ReportCategory::Composting))
            .await
            .unwrap();

        let verify = VerifyReportUseCase::new(w.ledger.clone(), w.users.clone());

        let verified = verify
            .execute(VerifyReportInput {
                report_id: report.id.to_string(),
                status: ReportStatus::Verified,
                verified_by: Some(verifier.id),
            })
            .await
            .unwrap();
        assert_eq!(verified.status, ReportStatus::Verified);
        assert_eq!(verified.points, 20);
        assert_eq!(verified.verified_by, Some(verifier.id));

        let balance = w.users.find_by_id(&citizen.id).await.unwrap().unwrap().green_points;
        assert_eq!(balance, 45);

        // A second decision overwrites status; the credited points stay put
        let rejected = verify
            .execute(VerifyReportInput {
                report_id: report.id.to_string(),
                status: ReportStatus::Rejected,
                verified_by: Some(verifier.id),
            })
            .await
            .unwrap();
        assert_eq!(rejected.status, ReportStatus::Rejected);
        assert_eq!(rejected.points, 20);

        let balance = w.users.find_by_id(&citizen.id).await.unwrap().unwrap().green_points;
        assert_eq!(balance, 45);
    }

    #[tokio::test]
    async fn test_reverification_credits_again() {
        let w = world(&[]).await;
        let citizen = register(&w, "c@x.in", UserRole::Citizen, None).await;

        let report = SubmitReportUseCase::new(w.ledger.clone(), w.users.clone())
            .execute(submit_input(citizen.id, ReportCategory::Dumping))
            .await
            .unwrap();

        let verify = VerifyReportUseCase::new(w.ledger.clone(), w.users.clone());
        for _ in 0..2 {
            verify
                .execute(VerifyReportInput {
                    report_id: report.id.to_string(),
                    status: ReportStatus::Verified,
                    verified_by: None,
                })
                .await
                .unwrap();
        }

        let balance = w.users.find_by_id(&citizen.id).await.unwrap().unwrap().green_points;
        assert_eq!(balance, 45);
    }

    #[tokio::test]
    async fn test_verify_unknown_report() {
        let w = world(&[]).await;
        let verify = VerifyReportUseCase::new(w.ledger.clone(), w.users.clone());

        for report_id in [kernel::id::ReportId::new().to_string(), "nope".to_string()] {
            let result = verify
                .execute(VerifyReportInput {
                    report_id,
                    status: ReportStatus::Verified,
                    verified_by: None,
                })
                .await;
            assert!(matches!(result, Err(LedgerError::ReportNotFound)));
        }
    }

    #[tokio::test]
    async fn test_list_by_zone_exact_owner_zone() {
        let w = world(&[]).await;
        let ward15 = register(&w, "a@x.in", UserRole::Citizen, Some("Ward 15")).await;
        let ward16 = register(&w, "b@x.in", UserRole::Citizen, Some("Ward 16")).await;
        let nowhere = register(&w, "c@x.in", UserRole::Citizen, None).await;

        let submit = SubmitReportUseCase::new(w.ledger.clone(), w.users.clone());
        for owner in [&ward15, &ward16, &nowhere, &ward15] {
            submit
                .execute(submit_input(owner.id, ReportCategory::Segregation))
                .await
                .unwrap();
        }

        let list = ListReportsUseCase::new(w.ledger.clone(), w.users.clone());

        let zone = list
            .execute(ReportScope::Zone("Ward 15".to_string()))
            .await
            .unwrap();
        assert_eq!(zone.len(), 2);
        assert!(zone.iter().all(|r| r.user_id == ward15.id));

        let empty = list
            .execute(ReportScope::Zone("Ward 99".to_string()))
            .await
            .unwrap();
        assert!(empty.is_empty());

        let all = list.execute(ReportScope::All).await.unwrap();
        assert_eq!(all.len(), 4);
        assert!(all.windows(2).all(|pair| pair[0].created_at <= pair[1].created_at));
    }

    #[tokio::test]
    async fn test_list_by_user() {
        let w = world(&[]).await;
        let a = register(&w, "a@x.in", UserRole::Citizen, None).await;
        let b = register(&w, "b@x.in", UserRole::Citizen, None).await;

        let submit = SubmitReportUseCase::new(w.ledger.clone(), w.users.clone());
        submit
            .execute(submit_input(a.id, ReportCategory::Dumping))
            .await
            .unwrap();
        submit
            .execute(submit_input(b.id, ReportCategory::Dumping))
            .await
            .unwrap();

        let list = ListReportsUseCase::new(w.ledger.clone(), w.users.clone());
        let mine = list.execute(ReportScope::User(a.id.to_string())).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].user_id, a.id);

        let malformed = list
            .execute(ReportScope::User("not-a-uuid".to_string()))
            .await
            .unwrap();
        assert!(malformed.is_empty());
    }

    #[tokio::test]
    async fn test_redeem_more_than_balance_fails() {
        let expensive = reward(100);
        let w = world(std::slice::from_ref(&expensive)).await;
        let citizen = register(&w, "c@x.in", UserRole::Citizen, None).await;

        let result = RedeemRewardUseCase::new(w.ledger.clone(), w.users.clone())
            .execute(RedeemRewardInput {
                user_id: citizen.id.to_string(),
                reward_id: expensive.id.to_string(),
            })
            .await;
        assert!(matches!(result, Err(LedgerError::RedeemFailed)));

        let balance = w.users.find_by_id(&citizen.id).await.unwrap().unwrap().green_points;
        assert_eq!(balance, 25);
    }

    #[tokio::test]
    async fn test_redeem_exact_balance_leaves_zero() {
        let exact = reward(25);
        let w = world(std::slice::from_ref(&exact)).await;
        let citizen = register(&w, "c@x.in", UserRole::Citizen, None).await;

        let balance = RedeemRewardUseCase::new(w.ledger.clone(), w.users.clone())
            .execute(RedeemRewardInput {
                user_id: citizen.id.to_string(),
                reward_id: exact.id.to_string(),
            })
            .await
            .unwrap();
        assert_eq!(balance, 0);

        let stored = w.users.find_by_id(&citizen.id).await.unwrap().unwrap();
        assert_eq!(stored.green_points, 0);
    }

    #[tokio::test]
    async fn test_redeem_unknown_ids_fail_uniformly() {
        let cheap = reward(1);
        let w = world(std::slice::from_ref(&cheap)).await;
        let citizen = register(&w, "c@x.in", UserRole::Citizen, None).await;
        let redeem = RedeemRewardUseCase::new(w.ledger.clone(), w.users.clone());

        let cases = [
            (UserId::new().to_string(), cheap.id.to_string()),
            (citizen.id.to_string(), kernel::id::RewardId::new().to_string()),
            ("garbage".to_string(), cheap.id.to_string()),
        ];
        for (user_id, reward_id) in cases {
            let result = redeem.execute(RedeemRewardInput { user_id, reward_id }).await;
            assert!(matches!(result, Err(LedgerError::RedeemFailed)));
        }
    }

    #[tokio::test]
    async fn test_list_rewards_default_catalog() {
        let w = world(&crate::default_catalog()).await;
        let rewards = ListRewardsUseCase::new(w.ledger.clone()).execute().await.unwrap();

        assert_eq!(rewards.len(), 4);
        assert_eq!(rewards[0].name, "₹50 Electricity Bill Discount");
        assert_eq!(rewards[0].cost, 50);
    }
}

#[cfg(test)]
mod repository_tests {
    use crate::domain::repository::RewardRepository;
    use crate::infra::InMemoryLedgerRepository;

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let repo = InMemoryLedgerRepository::new();
        let catalog = crate::default_catalog();

        assert_eq!(repo.seed(&catalog).await.unwrap(), 4);
        assert_eq!(repo.seed(&catalog).await.unwrap(), 0);
        assert_eq!(repo.list_rewards().await.unwrap().len(), 4);
    }
}

#[cfg(test)]
mod http_tests {
    use std::sync::Arc;

    use account::InMemoryUserRepository;
    use account::models::user_role::UserRole;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::fixtures::{World, register, reward};
    use crate::domain::repository::RewardRepository;
    use crate::infra::InMemoryLedgerRepository;
    use crate::presentation::router::ledger_router_generic;

    async fn setup() -> (Router, World) {
        let ledger = Arc::new(InMemoryLedgerRepository::new());
        ledger.seed(&crate::default_catalog()).await.unwrap();
        let world = World {
            users: Arc::new(InMemoryUserRepository::new()),
            ledger,
        };

        let app = Router::new().nest(
            "/api",
            ledger_router_generic(
                (*world.ledger).clone(),
                (*world.users).clone(),
            ),
        );
        (app, world)
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

    #[tokio::test]
    async fn test_submit_and_list_reports() {
        let (app, world) = setup().await;
        let citizen = register(&world, "c@x.in", UserRole::Citizen, Some("Ward 15")).await;

        let (status, report) = send(
            &app,
            Method::POST,
            "/api/reports",
            Some(json!({
                "userId": citizen.id.to_string(),
                "type": "dumping",
                "location": "Lake road",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["status"], "pending");
        assert_eq!(report["points"], 0);
        assert_eq!(report["category"], "dumping");
        assert!(report["verifiedBy"].is_null());

        let (_, by_user) = send(
            &app,
            Method::GET,
            &format!("/api/reports/user/{}", citizen.id),
            None,
        )
        .await;
        assert_eq!(by_user.as_array().unwrap().len(), 1);

        let (_, by_zone) = send(&app, Method::GET, "/api/reports/zone/Ward%2015", None).await;
        assert_eq!(by_zone.as_array().unwrap().len(), 1);

        let (_, all) = send(&app, Method::GET, "/api/reports", None).await;
        assert_eq!(all.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_report_errors() {
        let (app, _) = setup().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/reports",
            Some(json!({"userId": "x", "category": "dumping", "location": "here"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "invalid data");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/reports",
            Some(json!({
                "userId": uuid::Uuid::new_v4().to_string(),
                "category": "littering",
                "location": "here"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "invalid data");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/reports",
            Some(json!({
                "userId": uuid::Uuid::new_v4().to_string(),
                "category": "dumping",
                "location": "here"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "User not found");
    }

    #[tokio::test]
    async fn test_verify_route() {
        let (app, world) = setup().await;
        let citizen = register(&world, "c@x.in", UserRole::Citizen, None).await;

        let (_, report) = send(
            &app,
            Method::POST,
            "/api/reports",
            Some(json!({
                "userId": citizen.id.to_string(),
                "category": "segregation",
                "location": "Block C",
            })),
        )
        .await;
        let id = report["id"].as_str().unwrap().to_string();

        let (status, verified) = send(
            &app,
            Method::PATCH,
            &format!("/api/reports/{id}/verify"),
            Some(json!({"status": "verified"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(verified["points"], 15);

        let (status, body) = send(
            &app,
            Method::PATCH,
            &format!("/api/reports/{id}/verify"),
            Some(json!({"status": "approved"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "invalid data");

        let (status, body) = send(
            &app,
            Method::PATCH,
            &format!("/api/reports/{}/verify", uuid::Uuid::new_v4()),
            Some(json!({"status": "rejected"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Report not found");
    }

    #[tokio::test]
    async fn test_rewards_and_redeem_routes() {
        let (app, world) = setup().await;
        let citizen = register(&world, "c@x.in", UserRole::Citizen, None).await;

        let (status, rewards) = send(&app, Method::GET, "/api/rewards", None).await;
        assert_eq!(status, StatusCode::OK);
        let rewards = rewards.as_array().unwrap().clone();
        assert_eq!(rewards.len(), 4);
        assert_eq!(rewards[0]["type"], "electricity");
        assert_eq!(rewards[0]["cost"], 50);

        // 25 points cannot cover the cheapest catalog item
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/rewards/redeem",
            Some(json!({"userId": citizen.id.to_string(), "rewardId": rewards[0]["id"]})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Unable to redeem reward");

        let cheap = reward(20);
        world.ledger.seed(std::slice::from_ref(&cheap)).await.unwrap();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/rewards/redeem",
            Some(json!({"userId": citizen.id.to_string(), "rewardId": cheap.id.to_string()})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::*;
    use account::AccountError;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(LedgerError, StatusCode)> = vec![
            (LedgerError::InvalidData("x".into()), StatusCode::BAD_REQUEST),
            (LedgerError::RedeemFailed, StatusCode::BAD_REQUEST),
            (LedgerError::UserNotFound, StatusCode::NOT_FOUND),
            (LedgerError::ReportNotFound, StatusCode::NOT_FOUND),
            (
                LedgerError::Account(AccountError::Internal("x".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                LedgerError::Internal("test".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            let response = error.into_response();
            assert_eq!(response.status(), expected_status);
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            LedgerError::RedeemFailed.to_app_error().message(),
            "Unable to redeem reward"
        );
        assert_eq!(
            LedgerError::ReportNotFound.to_app_error().message(),
            "Report not found"
        );
        assert_eq!(
            LedgerError::Internal("secret detail".into())
                .to_app_error()
                .message(),
            "Server error"
        );
    }
}
