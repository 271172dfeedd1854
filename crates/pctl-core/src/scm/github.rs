//! GitHub REST API client for opening pull requests.

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use url::Url;

use super::{PullRequest, PullRequestClient, PullRequestInput, ScmError};

const PUBLIC_API: &str = "https://api.github.com/";
const USER_AGENT: &str = concat!("pctl/", env!("CARGO_PKG_VERSION"));

/// Resolve the REST API root for an optional server URL.
///
/// `github.com` maps to the public API; any other host is treated as
/// GitHub Enterprise, whose API lives under `/api/v3/`.
pub(super) fn api_base(server: Option<&str>) -> Result<Url, ScmError> {
    let server = server.unwrap_or(PUBLIC_API);
    let invalid = |source| ScmError::InvalidServer {
        server: server.to_string(),
        source,
    };
    let mut url = Url::parse(server).map_err(invalid)?;
    let host = url.host_str().unwrap_or_default().to_string();
    match host.as_str() {
        "github.com" => return Url::parse(PUBLIC_API).map_err(invalid),
        "api.github.com" => {
            url.set_path("/");
            return Ok(url);
        }
        _ => {}
    }

    let path = url.path().trim_end_matches('/');
    let path = if path.ends_with("/api/v3") {
        format!("{path}/")
    } else {
        format!("{path}/api/v3/")
    };
    url.set_path(&path);
    Ok(url)
}

#[derive(Debug, Deserialize)]
struct GitHubPullRequest {
    number: u64,
    html_url: String,
}

/// Opens pull requests through the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_base: Url,
    token: String,
}

impl GitHubClient {
    pub fn new(api_base: Url, token: impl Into<String>) -> Result<Self, ScmError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(ScmError::ClientInit)?;
        Ok(Self {
            http,
            api_base,
            token: token.into(),
        })
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    fn pulls_url(&self, repo: &str) -> Result<Url, ScmError> {
        let invalid = || ScmError::InvalidRepository {
            repo: repo.to_string(),
        };
        let (owner, name) = repo.split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|()| invalid())?
            .pop_if_empty()
            .extend(["repos", owner, name, "pulls"]);
        Ok(url)
    }
}

impl PullRequestClient for GitHubClient {
    fn create_pull_request(
        &self,
        repo: &str,
        input: &PullRequestInput,
    ) -> Result<PullRequest, ScmError> {
        let url = self.pulls_url(repo)?;
        tracing::info!(repo, head = %input.head, base = %input.base, "creating pull request");

        let response = self
            .http
            .post(url.clone())
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/vnd.github+json")
            .json(input)
            .send()
            .map_err(|source| ScmError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|err| format!("<response body could not be read: {err}>"));
            return Err(ScmError::Api {
                url: url.to_string(),
                status,
                body,
            });
        }

        let created: GitHubPullRequest =
            response.json().map_err(|source| ScmError::InvalidResponse {
                url: url.to_string(),
                source,
            })?;
        Ok(PullRequest {
            number: created.number,
            link: created.html_url,
        })
    }
}
