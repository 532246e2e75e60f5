//! GreenMitra client
//!
//! - `session` - signed-in user with change subscriptions
//! - `query` - keyed JSON cache with stale time and prefix invalidation
//! - `api` - typed HTTP calls, one per route
//!
//! [`GreenMitraClient`] ties them together: auth calls update the session,
//! mutations invalidate the report queries they affect, and point changes
//! from redemption and training are applied to the session optimistically.

pub mod api;
pub mod error;
pub mod models;
pub mod query;
pub mod session;

use std::time::Duration;

use kernel::id::ReportId;

pub use api::ApiClient;
pub use error::{ClientError, ClientResult};
pub use models::{
    NewReport, RegisterRequest, Report, ReportCategory, ReportStatus, Reward, RewardKind, Role,
    User,
};
pub use query::{QueryCache, QueryKey};
pub use session::{Session, SessionStore, Subscription};

/// Points added to the session when a training module is started
pub const TRAINING_BONUS: i32 = 5;

pub const REPORTS_KEY: &str = "/api/reports";
pub const USER_REPORTS_KEY: &str = "/api/reports/user";
pub const ZONE_REPORTS_KEY: &str = "/api/reports/zone";
pub const REWARDS_KEY: &str = "/api/rewards";

/// Session-aware client
#[derive(Clone)]
pub struct GreenMitraClient {
    api: ApiClient,
    session: SessionStore,
    queries: QueryCache,
}

impl GreenMitraClient {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Ok(Self::from_parts(
            ApiClient::new(base_url)?,
            SessionStore::new(),
            QueryCache::default(),
        ))
    }

    pub fn with_stale_time(base_url: &str, stale_time: Duration) -> ClientResult<Self> {
        Ok(Self::from_parts(
            ApiClient::new(base_url)?,
            SessionStore::new(),
            QueryCache::new(stale_time),
        ))
    }

    pub fn from_parts(api: ApiClient, session: SessionStore, queries: QueryCache) -> Self {
        Self {
            api,
            session,
            queries,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn queries(&self) -> &QueryCache {
        &self.queries
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.user()
    }

    fn require_user(&self) -> ClientResult<User> {
        self.session.user().ok_or(ClientError::NotAuthenticated)
    }

    // ------------------------------------------------------------------
    // Auth
    // ------------------------------------------------------------------

    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<User> {
        let user = self.api.register(request).await?;
        self.session.sign_in(user.clone());
        tracing::info!(user_id = %user.id, "registered and signed in");
        Ok(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<User> {
        let user = self.api.login(email, password).await?;
        self.session.sign_in(user.clone());
        tracing::info!(user_id = %user.id, "signed in");
        Ok(user)
    }

    /// Clear the session and every cached query
    pub fn logout(&self) {
        self.session.logout();
        self.queries.clear();
    }

    /// Replace the session user with the server's copy
    pub async fn refresh_user(&self) -> ClientResult<User> {
        let current = self.require_user()?;
        let user = self.api.get_user(current.id).await?;
        self.session.sign_in(user.clone());
        Ok(user)
    }

    // ------------------------------------------------------------------
    // Reports
    // ------------------------------------------------------------------

    pub async fn my_reports(&self) -> ClientResult<Vec<Report>> {
        let user = self.require_user()?;
        let key = QueryKey::new(USER_REPORTS_KEY).with(user.id);
        self.queries
            .fetch(&key, || self.api.list_user_reports(user.id))
            .await
    }

    /// Reports from the signed-in user's zone; empty when the user has none
    pub async fn my_zone_reports(&self) -> ClientResult<Vec<Report>> {
        let user = self.require_user()?;
        match user.zone.as_deref() {
            Some(zone) => self.zone_reports(zone).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn zone_reports(&self, zone: &str) -> ClientResult<Vec<Report>> {
        let key = QueryKey::new(ZONE_REPORTS_KEY).with(zone);
        self.queries
            .fetch(&key, || self.api.list_zone_reports(zone))
            .await
    }

    pub async fn all_reports(&self) -> ClientResult<Vec<Report>> {
        self.queries
            .fetch(&QueryKey::new(REPORTS_KEY), || self.api.list_all_reports())
            .await
    }

    /// File a report as the signed-in user
    pub async fn submit_report(&self, report: &NewReport) -> ClientResult<Report> {
        let user = self.require_user()?;
        let created = self.api.submit_report(user.id, report).await?;
        self.invalidate_reports(&created);
        Ok(created)
    }

    /// Review a report, recording the signed-in user as verifier
    pub async fn verify_report(
        &self,
        report_id: ReportId,
        status: ReportStatus,
    ) -> ClientResult<Report> {
        let verifier = self.require_user()?;
        let report = self
            .api
            .verify_report(report_id, status, Some(verifier.id))
            .await?;
        self.invalidate_reports(&report);
        Ok(report)
    }

    fn invalidate_reports(&self, report: &Report) {
        self.queries.invalidate(&QueryKey::new(REPORTS_KEY));
        self.queries
            .invalidate(&QueryKey::new(USER_REPORTS_KEY).with(report.user_id));
        // The owner's zone is not on the report, so every zone list goes
        self.queries.invalidate(&QueryKey::new(ZONE_REPORTS_KEY));
    }

    // ------------------------------------------------------------------
    // Rewards
    // ------------------------------------------------------------------

    pub async fn rewards(&self) -> ClientResult<Vec<Reward>> {
        self.queries
            .fetch(&QueryKey::new(REWARDS_KEY), || self.api.list_rewards())
            .await
    }

    /// Redeem a reward and debit the session balance without refetching
    ///
    /// Fails locally with [`ClientError::InsufficientPoints`] when the
    /// session balance is below the cost.
    pub async fn redeem(&self, reward: &Reward) -> ClientResult<User> {
        let user = self.require_user()?;
        if user.green_points < reward.cost {
            return Err(ClientError::InsufficientPoints {
                balance: user.green_points,
                cost: reward.cost,
            });
        }

        if !self.api.redeem(user.id, reward.id).await? {
            return Err(ClientError::BadRequest("Unable to redeem reward".to_string()));
        }

        tracing::info!(user_id = %user.id, reward = %reward.name, "reward redeemed");
        Ok(self.debit_session(&user, reward.cost))
    }

    /// Debit `user` in the session if they are still signed in; otherwise
    /// only report the balance the server now holds
    fn debit_session(&self, user: &User, cost: i32) -> User {
        self.session
            .patch_user_if(user.id, |u| u.green_points -= cost)
            .unwrap_or_else(|| User {
                green_points: user.green_points - cost,
                ..user.clone()
            })
    }

    /// Start a training module; the bonus exists only in the session
    pub fn complete_training(&self) -> ClientResult<User> {
        self.session
            .patch_user(|u| u.green_points += TRAINING_BONUS)
            .ok_or(ClientError::NotAuthenticated)
    }
}
