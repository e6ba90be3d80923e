/// Job Sphere API client: the single point of entry for every HTTP call the
/// client makes. Page controllers only see the `JobSphereApi` trait.
///
/// No request is ever retried: a failure is reported to the user, who resubmits.
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::RequestError;
use crate::models::JobListing;

#[cfg(test)]
pub mod fake;
pub mod types;

use types::{
    Ack, ApiStats, Envelope, ForgotPasswordReply, ForgotPasswordRequest, LoginRequest,
    ProfileUpdate, RecommendedJobsReply, ResetPasswordRequest, SearchReply, SearchRequest,
    SessionStatus, SettingsUpdate, SignupRequest,
};

/// Every endpoint the client talks to. Enveloped calls return `Ok` only when the
/// server reported `success: true`; `success: false` becomes `RequestError::Rejected`.
#[async_trait]
pub trait JobSphereApi: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<Ack, RequestError>;

    async fn signup(&self, username: &str, email: &str, password: &str)
        -> Result<Ack, RequestError>;

    async fn check_session(&self) -> Result<SessionStatus, RequestError>;

    async fn logout(&self) -> Result<(), RequestError>;

    async fn forgot_password(&self, email: &str) -> Result<ForgotPasswordReply, RequestError>;

    async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<Ack, RequestError>;

    async fn stats(&self) -> Result<ApiStats, RequestError>;

    async fn recommended_jobs(&self) -> Result<Vec<JobListing>, RequestError>;

    async fn search(&self, request: &SearchRequest) -> Result<SearchReply, RequestError>;

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<Ack, RequestError>;

    async fn update_settings(&self, update: &SettingsUpdate) -> Result<Ack, RequestError>;
}

/// `JobSphereApi` over HTTP. Holds a cookie store so the server's
/// `session_token` cookie rides along on every call after login.
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    config: Config,
}

impl HttpApi {
    pub fn new(config: &Config) -> Result<Self, RequestError> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, RequestError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned + Envelope,
    {
        let url = self.config.endpoint(path);
        debug!("POST {url}");
        let response = self.client.post(&url).json(body).send().await?;
        let (status, reply) = read_json::<T>(response).await?;
        into_outcome(path, status, reply)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, RequestError> {
        let url = self.config.endpoint(path);
        debug!("GET {url}");
        let response = self.client.get(&url).send().await?;
        let (_, reply) = read_json::<T>(response).await?;
        Ok(reply)
    }
}

/// Failures still carry a JSON body (often with a 4xx status), so the body is
/// parsed regardless of status.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<(u16, T), RequestError> {
    let status = response.status().as_u16();
    let body = response.text().await?;
    let reply = serde_json::from_str(&body)?;
    Ok((status, reply))
}

fn into_outcome<T: Envelope>(path: &str, status: u16, mut reply: T) -> Result<T, RequestError> {
    if reply.success() {
        Ok(reply)
    } else {
        let message = reply.take_message();
        warn!("{path} rejected (status {status}): {message:?}");
        Err(RequestError::rejected(status, message))
    }
}

#[async_trait]
impl JobSphereApi for HttpApi {
    async fn login(&self, username: &str, password: &str) -> Result<Ack, RequestError> {
        self.post("/api/login", &LoginRequest { username, password })
            .await
    }

    async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Ack, RequestError> {
        self.post(
            "/api/signup",
            &SignupRequest {
                username,
                email,
                password,
            },
        )
        .await
    }

    async fn check_session(&self) -> Result<SessionStatus, RequestError> {
        self.get("/api/check-session").await
    }

    async fn logout(&self) -> Result<(), RequestError> {
        let url = self.config.endpoint("/api/logout");
        debug!("POST {url}");
        self.client.post(&url).send().await?;
        Ok(())
    }

    async fn forgot_password(&self, email: &str) -> Result<ForgotPasswordReply, RequestError> {
        self.post("/api/forgot-password", &ForgotPasswordRequest { email })
            .await
    }

    async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<Ack, RequestError> {
        self.post(
            "/api/reset-password",
            &ResetPasswordRequest {
                email,
                code,
                new_password,
            },
        )
        .await
    }

    async fn stats(&self) -> Result<ApiStats, RequestError> {
        self.get("/api/stats").await
    }

    async fn recommended_jobs(&self) -> Result<Vec<JobListing>, RequestError> {
        let url = self.config.endpoint("/api/recommended-jobs");
        debug!("GET {url}");
        let response = self.client.get(&url).send().await?;
        let (status, reply) = read_json::<RecommendedJobsReply>(response).await?;
        let reply = into_outcome("/api/recommended-jobs", status, reply)?;
        Ok(reply.jobs.unwrap_or_default())
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchReply, RequestError> {
        self.post("/api/search", request).await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<Ack, RequestError> {
        self.post("/api/profile/update", update).await
    }

    async fn update_settings(&self, update: &SettingsUpdate) -> Result<Ack, RequestError> {
        self.post("/api/settings/update", update).await
    }
}
