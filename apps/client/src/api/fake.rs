//! In-memory `JobSphereApi` for controller tests. Records every call and
//! replays queued replies; an empty queue answers with a plain success.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::types::{
    Ack, ApiStats, ForgotPasswordReply, ProfileUpdate, SearchReply, SearchRequest, SessionStatus,
    SettingsUpdate,
};
use crate::api::JobSphereApi;
use crate::errors::RequestError;
use crate::models::{JobListing, UserSession};

#[derive(Default)]
pub struct FakeApi {
    pub calls: Mutex<Vec<&'static str>>,
    pub user: Mutex<Option<UserSession>>,
    pub session_unreachable: Mutex<bool>,
    pub stats: Mutex<ApiStats>,
    pub acks: Mutex<VecDeque<Result<Ack, RequestError>>>,
    pub forgot_replies: Mutex<VecDeque<Result<ForgotPasswordReply, RequestError>>>,
    pub search_replies: Mutex<VecDeque<Result<SearchReply, RequestError>>>,
    pub recommended: Mutex<VecDeque<Result<Vec<JobListing>, RequestError>>>,
    pub logout_fails: Mutex<bool>,
    pub searches: Mutex<Vec<SearchRequest>>,
    pub profile_updates: Mutex<Vec<ProfileUpdate>>,
    pub settings_updates: Mutex<Vec<SettingsUpdate>>,
    pub resets: Mutex<Vec<(String, String, String)>>,
}

impl FakeApi {
    pub fn signed_in(user: UserSession) -> Self {
        let api = Self::default();
        *api.user.lock().unwrap() = Some(user);
        api
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls().iter().filter(|c| **c == name).count()
    }

    pub fn push_ack(&self, reply: Result<Ack, RequestError>) {
        self.acks.lock().unwrap().push_back(reply);
    }

    pub fn push_search(&self, reply: Result<SearchReply, RequestError>) {
        self.search_replies.lock().unwrap().push_back(reply);
    }

    pub fn push_recommended(&self, reply: Result<Vec<JobListing>, RequestError>) {
        self.recommended.lock().unwrap().push_back(reply);
    }

    pub fn push_forgot(&self, reply: Result<ForgotPasswordReply, RequestError>) {
        self.forgot_replies.lock().unwrap().push_back(reply);
    }

    fn record(&self, name: &'static str) {
        self.calls.lock().unwrap().push(name);
    }

    fn next_ack(&self) -> Result<Ack, RequestError> {
        self.acks.lock().unwrap().pop_front().unwrap_or_else(|| Ok(Ack::ok()))
    }
}

#[async_trait]
impl JobSphereApi for FakeApi {
    async fn login(&self, _username: &str, _password: &str) -> Result<Ack, RequestError> {
        self.record("login");
        self.next_ack()
    }

    async fn signup(
        &self,
        _username: &str,
        _email: &str,
        _password: &str,
    ) -> Result<Ack, RequestError> {
        self.record("signup");
        self.next_ack()
    }

    async fn check_session(&self) -> Result<SessionStatus, RequestError> {
        self.record("check_session");
        if *self.session_unreachable.lock().unwrap() {
            return Err(RequestError::transport("connection refused"));
        }
        let user = self.user.lock().unwrap().clone();
        Ok(SessionStatus {
            authenticated: user.is_some(),
            user,
        })
    }

    async fn logout(&self) -> Result<(), RequestError> {
        self.record("logout");
        if *self.logout_fails.lock().unwrap() {
            Err(RequestError::transport("connection reset"))
        } else {
            Ok(())
        }
    }

    async fn forgot_password(&self, _email: &str) -> Result<ForgotPasswordReply, RequestError> {
        self.record("forgot_password");
        self.forgot_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(ForgotPasswordReply {
                    success: true,
                    dev_code: Some("123456".to_string()),
                    message: None,
                })
            })
    }

    async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<Ack, RequestError> {
        self.record("reset_password");
        self.resets.lock().unwrap().push((
            email.to_string(),
            code.to_string(),
            new_password.to_string(),
        ));
        self.next_ack()
    }

    async fn stats(&self) -> Result<ApiStats, RequestError> {
        self.record("stats");
        Ok(*self.stats.lock().unwrap())
    }

    async fn recommended_jobs(&self) -> Result<Vec<JobListing>, RequestError> {
        self.record("recommended_jobs");
        self.recommended
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchReply, RequestError> {
        self.record("search");
        self.searches.lock().unwrap().push(request.clone());
        self.search_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(SearchReply {
                    success: true,
                    ..SearchReply::default()
                })
            })
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<Ack, RequestError> {
        self.record("update_profile");
        self.profile_updates.lock().unwrap().push(update.clone());
        self.next_ack()
    }

    async fn update_settings(&self, update: &SettingsUpdate) -> Result<Ack, RequestError> {
        self.record("update_settings");
        self.settings_updates.lock().unwrap().push(*update);
        self.next_ack()
    }
}
