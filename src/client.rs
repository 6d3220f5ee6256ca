//! Client side of project creation.
//!
//! A [`ProjectClient`] keeps a cookie store, so once it has logged in every
//! later request carries the session cookie the server handed out.

use log::debug;
use reqwest::StatusCode;

pub const LOGIN_ENDPOINT: &str = "/api/auth/login";
pub const PROJECTS_ENDPOINT: &str = "/api/dev/projects";
/// Where a successful submission navigates to.
pub const PROJECTS_PAGE: &str = "/dev/projects";

/// What the user typed into the new-project form.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
}

impl ProjectDraft {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> ProjectDraft {
        ProjectDraft {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Client-side router.
pub trait Navigator {
    fn push(&self, path: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Navigated,
    /// The server answered with a non-2xx status; nothing else happened.
    Rejected(StatusCode),
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid server url {base:?}: {reason}")]
    Url { base: String, reason: String },
}

pub struct ProjectClient {
    http: reqwest::Client,
    base: String,
}

impl ProjectClient {
    /// `base` is the server origin, e.g. `http://127.0.0.1:7878`.
    pub fn new(base: impl Into<String>) -> Result<ProjectClient, ClientError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        ProjectClient::with_client(http, base)
    }

    pub fn with_client(
        http: reqwest::Client,
        base: impl Into<String>,
    ) -> Result<ProjectClient, ClientError> {
        let base = base.into();
        let url = reqwest::Url::parse(&base).map_err(|err| ClientError::Url {
            base: base.clone(),
            reason: err.to_string(),
        })?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::Url {
                base,
                reason: "not an http(s) origin".to_string(),
            });
        }

        let base = base.trim_end_matches('/').to_string();
        Ok(ProjectClient { http, base })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Log in, storing the session cookie on success.
    pub async fn login(&self, email: &str, password: &str) -> Result<bool, ClientError> {
        let response = self
            .http
            .post(self.url(LOGIN_ENDPOINT))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        debug!("Login answered {}", response.status());
        Ok(response.status().is_success())
    }

    /// Post the draft once. Navigates to the project list on a 2xx answer.
    ///
    /// The draft is consumed either way.
    pub async fn submit<N>(
        &self,
        draft: ProjectDraft,
        navigator: &N,
    ) -> Result<Submission, ClientError>
    where
        N: Navigator + ?Sized,
    {
        let response = self
            .http
            .post(self.url(PROJECTS_ENDPOINT))
            .json(&draft)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!("Project submission rejected with {}", status);
            return Ok(Submission::Rejected(status));
        }

        navigator.push(PROJECTS_PAGE);
        Ok(Submission::Navigated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_serializes_as_form_fields() {
        let draft = ProjectDraft::new("Loom", "weaves \"threads\"");
        let json = serde_json::to_value(&draft).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "name": "Loom", "description": "weaves \"threads\"" })
        );
    }

    #[test]
    fn trims_base_url() {
        let client =
            ProjectClient::with_client(reqwest::Client::new(), "http://localhost:7878/").unwrap();
        assert_eq!(
            client.url(PROJECTS_ENDPOINT),
            "http://localhost:7878/api/dev/projects"
        );
    }

    #[test]
    fn rejects_bad_base_url() {
        for base in ["not a url", "", "mailto:ada@example.com", "ftp://localhost"] {
            assert!(
                matches!(ProjectClient::new(base), Err(ClientError::Url { .. })),
                "base: {}",
                base
            );
        }
    }
}
