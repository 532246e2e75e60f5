//! Typed HTTP client for the `/api` routes

use kernel::id::{ReportId, RewardId, UserId};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::error::{ClientError, ClientResult};
use crate::models::*;

/// Thin wrapper over `reqwest::Client`; one method per endpoint
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    /// `base_url` is the server origin, e.g. `http://127.0.0.1:31113`
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> ClientResult<Self> {
        let base = Url::parse(base_url).map_err(|e| ClientError::InvalidBaseUrl(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self { http, base })
    }

    /// Build `<base>/api/<segments..>`, percent-encoding each segment
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.http.request(method, self.endpoint(segments))
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ClientError::from_response(status.as_u16(), &body);
        tracing::debug!(status = status.as_u16(), error = %err, "request failed");
        Err(err)
    }

    pub async fn health(&self) -> ClientResult<()> {
        let _: serde_json::Value = Self::send(self.request(Method::GET, &["health"])).await?;
        Ok(())
    }

    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<User> {
        let response: AuthResponse =
            Self::send(self.request(Method::POST, &["auth", "register"]).json(request)).await?;
        Ok(response.user)
    }

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<User> {
        let body = LoginRequest { email, password };
        let response: AuthResponse =
            Self::send(self.request(Method::POST, &["auth", "login"]).json(&body)).await?;
        Ok(response.user)
    }

    pub async fn get_user(&self, id: UserId) -> ClientResult<User> {
        Self::send(self.request(Method::GET, &["users", &id.to_string()])).await
    }

    pub async fn submit_report(&self, user_id: UserId, report: &NewReport) -> ClientResult<Report> {
        let body = SubmitReportRequest {
            user_id,
            category: report.category,
            location: &report.location,
            description: report.description.as_deref(),
        };
        Self::send(self.request(Method::POST, &["reports"]).json(&body)).await
    }

    pub async fn list_user_reports(&self, user_id: UserId) -> ClientResult<Vec<Report>> {
        Self::send(self.request(Method::GET, &["reports", "user", &user_id.to_string()])).await
    }

    pub async fn list_zone_reports(&self, zone: &str) -> ClientResult<Vec<Report>> {
        Self::send(self.request(Method::GET, &["reports", "zone", zone])).await
    }

    pub async fn list_all_reports(&self) -> ClientResult<Vec<Report>> {
        Self::send(self.request(Method::GET, &["reports"])).await
    }

    pub async fn verify_report(
        &self,
        report_id: ReportId,
        status: ReportStatus,
        verified_by: Option<UserId>,
    ) -> ClientResult<Report> {
        let body = VerifyReportRequest {
            status,
            verified_by,
        };
        Self::send(
            self.request(Method::PATCH, &["reports", &report_id.to_string(), "verify"])
                .json(&body),
        )
        .await
    }

    pub async fn list_rewards(&self) -> ClientResult<Vec<Reward>> {
        Self::send(self.request(Method::GET, &["rewards"])).await
    }

    /// Redeem a reward; the server answers 400 when it refuses
    pub async fn redeem(&self, user_id: UserId, reward_id: RewardId) -> ClientResult<bool> {
        let body = RedeemRequest { user_id, reward_id };
        let response: RedeemResponse =
            Self::send(self.request(Method::POST, &["rewards", "redeem"]).json(&body)).await?;
        Ok(response.success)
    }
}
