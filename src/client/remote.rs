//! HTTP backend over the remote workshop API using reqwest.
//!
//! One request per operation; no caching and no retries. The session
//! slot is held in memory for the life of the process.

use std::sync::Mutex;

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::error::{ErrorKind, Result};
use crate::interface::{SessionApi, WorkshopApi};
use crate::model::dtos::{
    Credentials, EnrollmentRequest, LoginReply, NewAccount, RegistrationReceipt, ServerMessage,
    WorkshopDraft, WorkshopUpdate,
};
use crate::model::structs::{User, Workshop};

pub struct RemoteClient {
    client: Client,
    base_url: String,
    session: Mutex<Option<User>>,
}

impl RemoteClient {
    pub fn new(base_url: impl Into<String>) -> Result<RemoteClient> {
        let client = Client::builder().build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(RemoteClient {
            client,
            base_url,
            session: Mutex::new(None),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Pull the `message` field out of an error response. Falls back to
    /// the HTTP status line when the body is not the conventional shape.
    async fn server_message(resp: reqwest::Response) -> String {
        let status = resp.status();
        match resp.json::<ServerMessage>().await {
            Ok(body) => body.message,
            Err(_) => status.to_string(),
        }
    }
}

impl SessionApi for RemoteClient {
    async fn register_account(&self, account: &NewAccount) -> Result<()> {
        debug!(email = %account.email, "register account");
        let resp = self
            .client
            .post(self.url("/users"))
            .json(account)
            .send()
            .await?;

        if !resp.status().is_success() {
            // The backend's rejection message travels to the user verbatim.
            return Err(ErrorKind::ServerError(Self::server_message(resp).await).into());
        }
        Ok(())
    }

    async fn login(&self, credentials: &Credentials) -> Result<User> {
        debug!(email = %credentials.email, "login");
        let resp = self
            .client
            .post(self.url("/login"))
            .json(credentials)
            .send()
            .await?;

        match resp.status() {
            StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND => {
                Err(ErrorKind::InvalidCredentials.into())
            }
            status if !status.is_success() => {
                Err(ErrorKind::ServerError(Self::server_message(resp).await).into())
            }
            _ => {
                let reply = resp.json::<LoginReply>().await?;
                *self.session.lock().unwrap() = Some(reply.user.clone());
                Ok(reply.user)
            }
        }
    }

    fn current_session(&self) -> Result<Option<User>> {
        Ok(self.session.lock().unwrap().clone())
    }

    fn logout(&self) -> Result<()> {
        self.session.lock().unwrap().take();
        Ok(())
    }
}

impl WorkshopApi for RemoteClient {
    async fn fetch_workshops(&self) -> Result<Vec<Workshop>> {
        let resp = self.client.get(self.url("/workshops")).send().await?;
        if !resp.status().is_success() {
            warn!(status = %resp.status(), "workshop list fetch failed");
            return Err(ErrorKind::ServerError(Self::server_message(resp).await).into());
        }
        Ok(resp.json().await?)
    }

    async fn create_workshop(&self, draft: &WorkshopDraft) -> Result<Workshop> {
        debug!(title = %draft.title, "create workshop");
        let resp = self
            .client
            .post(self.url("/workshops"))
            .json(draft)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ErrorKind::ServerError(Self::server_message(resp).await).into());
        }
        Ok(resp.json().await?)
    }

    async fn update_workshop(&self, id: u32, update: &WorkshopUpdate) -> Result<Workshop> {
        debug!(id, "update workshop");
        let resp = self
            .client
            .put(self.url(&format!("/workshops/{id}")))
            .json(update)
            .send()
            .await?;

        match resp.status() {
            StatusCode::NOT_FOUND => Err(ErrorKind::WorkshopNotFound(id).into()),
            status if !status.is_success() => {
                Err(ErrorKind::ServerError(Self::server_message(resp).await).into())
            }
            _ => Ok(resp.json().await?),
        }
    }

    async fn delete_workshop(&self, id: u32) -> Result<()> {
        debug!(id, "delete workshop");
        let resp = self
            .client
            .delete(self.url(&format!("/workshops/{id}")))
            .send()
            .await?;

        match resp.status() {
            StatusCode::NOT_FOUND => Err(ErrorKind::WorkshopNotFound(id).into()),
            status if !status.is_success() => {
                Err(ErrorKind::ServerError(Self::server_message(resp).await).into())
            }
            _ => Ok(()),
        }
    }

    async fn register_student(
        &self,
        id: u32,
        request: &EnrollmentRequest,
    ) -> Result<RegistrationReceipt> {
        debug!(id, student = %request.student_email, "register student");
        let resp = self
            .client
            .post(self.url(&format!("/workshops/{id}/register")))
            .json(request)
            .send()
            .await?;

        match resp.status() {
            StatusCode::NOT_FOUND => Err(ErrorKind::WorkshopNotFound(id).into()),
            status if !status.is_success() => {
                Err(ErrorKind::ServerError(Self::server_message(resp).await).into())
            }
            _ => Ok(resp.json().await?),
        }
    }
}
