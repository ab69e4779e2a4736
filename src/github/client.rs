use std::time::Duration;

use log::debug;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, LINK};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::{HostingApi, TagPage};
use crate::error::AutotagError;

const PER_PAGE: u32 = 100;
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// GitHub REST v3 client scoped to a single repository.
pub struct GitHubClient {
    http: Client,
    api_url: String,
    owner: String,
    repo: String,
}

#[derive(Deserialize)]
struct RefEntry {
    #[serde(rename = "ref")]
    ref_name: String,
}

#[derive(Deserialize)]
struct Comparison {
    #[serde(default)]
    files: Vec<ChangedFile>,
}

#[derive(Deserialize)]
struct ChangedFile {
    filename: String,
}

/// Body for `POST git/refs`. A lightweight tag ref points straight at the
/// commit `sha`; the endpoint takes no object type, so none is sent.
#[derive(Serialize)]
struct NewRef<'a> {
    #[serde(rename = "ref")]
    ref_name: &'a str,
    sha: &'a str,
}

#[derive(Serialize)]
struct NewComment<'a> {
    body: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// True when a `Link` header advertises a `rel="next"` page.
pub fn has_next_page(link: Option<&str>) -> bool {
    link.is_some_and(|link| link.contains("rel=\"next\""))
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

fn check_status(resp: Response) -> Result<Response, AutotagError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    Err(AutotagError::api(status.as_u16(), error_message(&body)))
}

impl GitHubClient {
    pub fn new(
        api_url: &str,
        token: &str,
        owner: &str,
        repo: &str,
        timeout: Duration,
    ) -> Result<Self, AutotagError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| AutotagError::Config("GITHUB_TOKEN contains invalid characters".into()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_url, self.owner, self.repo, path
        )
    }
}

impl HostingApi for GitHubClient {
    fn list_tag_refs(&self, page: u32) -> Result<TagPage, AutotagError> {
        let url = self.repo_url("git/matching-refs/tags");
        debug!("GET {} (page {})", url, page);

        let resp = self
            .http
            .get(&url)
            .query(&[("page", page), ("per_page", PER_PAGE)])
            .send()?;
        let resp = check_status(resp)?;

        let has_next = has_next_page(resp.headers().get(LINK).and_then(|v| v.to_str().ok()));
        let entries: Vec<RefEntry> = resp.json()?;

        Ok(TagPage {
            names: entries.into_iter().map(|e| e.ref_name).collect(),
            has_next,
        })
    }

    fn compare_files(&self, base: &str, head: &str) -> Result<Vec<String>, AutotagError> {
        let url = self.repo_url(&format!("compare/{}...{}", base, head));
        debug!("GET {}", url);

        let resp = check_status(self.http.get(&url).send()?)?;
        let comparison: Comparison = resp.json()?;

        Ok(comparison.files.into_iter().map(|f| f.filename).collect())
    }

    fn create_tag_ref(&self, ref_name: &str, sha: &str) -> Result<(), AutotagError> {
        let url = self.repo_url("git/refs");
        debug!("POST {} ({} -> {})", url, ref_name, sha);

        let resp = self
            .http
            .post(&url)
            .json(&NewRef { ref_name, sha })
            .send()?;

        match check_status(resp) {
            Err(AutotagError::Api { status, message })
                if status == StatusCode::UNPROCESSABLE_ENTITY.as_u16()
                    && message.contains("already exists") =>
            {
                Err(AutotagError::TagExists(ref_name.to_string()))
            }
            result => result.map(|_| ()),
        }
    }

    fn create_comment(&self, number: u64, body: &str) -> Result<(), AutotagError> {
        let url = self.repo_url(&format!("issues/{}/comments", number));
        debug!("POST {}", url);

        let resp = self.http.post(&url).json(&NewComment { body }).send()?;
        check_status(resp)?;
        Ok(())
    }
}
