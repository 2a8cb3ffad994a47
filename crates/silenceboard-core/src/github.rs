use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, LINK, USER_AGENT};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::config::{GithubConfig, normalize_base_url, parse_http_endpoint};
use crate::error::{Operation, Result, SilenceBoardError};
use crate::http::ensure_success;
use crate::models::{Discussion, DiscussionUpdate, NewDiscussion, Team};

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const PAGE_SIZE: u32 = 100;
const MAX_PAGES: usize = 100;

#[derive(Clone)]
pub struct GithubClient {
    api_url: Url,
    http: Client,
}

impl std::fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubClient")
            .field("api_url", &self.api_url.as_str())
            .finish_non_exhaustive()
    }
}

impl GithubClient {
    pub fn new(config: &GithubConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("silenceboard/", env!("CARGO_PKG_VERSION"))),
        );
        if let Some(token) = config.token.as_deref().filter(|token| !token.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                SilenceBoardError::Config(format!("invalid github token: {e}"))
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.timeout_ms))
            .danger_accept_invalid_certs(config.insecure_skip_tls_verify)
            .build()?;

        let api_url = parse_http_endpoint(&normalize_base_url(&config.api_url), "github api url")
            .map_err(SilenceBoardError::Config)?;
        if api_url.cannot_be_a_base() {
            return Err(SilenceBoardError::Config(format!(
                "github api url cannot carry a path: {api_url}"
            )));
        }

        Ok(Self { api_url, http })
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// API url with each segment appended verbatim; `/`, `?` and `#` inside a
    /// segment are percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn first_page(&self, segments: &[&str]) -> Url {
        let mut url = self.endpoint(segments);
        url.query_pairs_mut()
            .append_pair("per_page", &PAGE_SIZE.to_string());
        url
    }

    /// Collects every page of a list endpoint by following `Link: rel="next"`.
    fn get_all_pages<T: DeserializeOwned>(&self, first: Url, operation: Operation) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut next = Some(first);
        let mut pages = 0usize;
        while let Some(url) = next.take() {
            if pages == MAX_PAGES {
                tracing::warn!(%operation, pages, "page limit reached, remaining pages skipped");
                break;
            }
            pages += 1;
            tracing::debug!(%url, %operation, page = pages, "fetching page");
            let resp = self
                .http
                .get(url)
                .send()
                .map_err(SilenceBoardError::transport(operation))?;
            let resp = ensure_success(resp, operation)?;
            next = next_page_url(resp.headers());
            let page = resp
                .json::<Vec<T>>()
                .map_err(SilenceBoardError::transport(operation))?;
            items.extend(page);
        }
        Ok(items)
    }

    pub fn list_teams(&self, org: &str) -> Result<Vec<Team>> {
        let url = self.first_page(&["orgs", org, "teams"]);
        self.get_all_pages(url, Operation::ResolveTeam)
            .map_err(|err| match err {
                SilenceBoardError::Upstream { status, .. } if status == StatusCode::NOT_FOUND => {
                    SilenceBoardError::OrgNotFound {
                        org: org.to_string(),
                    }
                }
                other => other,
            })
    }

    /// Team whose slug equals `slug`.
    pub fn find_team(&self, org: &str, slug: &str) -> Result<Team> {
        let teams = self.list_teams(org)?;
        let available = teams.iter().map(|team| team.slug.clone()).collect::<Vec<_>>();
        teams
            .into_iter()
            .find(|team| team.slug == slug)
            .ok_or_else(|| SilenceBoardError::TeamNotFound {
                org: org.to_string(),
                team: slug.to_string(),
                available,
            })
    }

    pub fn list_discussions(&self, org: &str, team_slug: &str) -> Result<Vec<Discussion>> {
        let url = self.first_page(&["orgs", org, "teams", team_slug, "discussions"]);
        self.get_all_pages(url, Operation::ListDiscussions)
    }

    pub fn create_discussion(
        &self,
        org: &str,
        team_slug: &str,
        discussion: &NewDiscussion,
    ) -> Result<Discussion> {
        let url = self.endpoint(&["orgs", org, "teams", team_slug, "discussions"]);
        let resp = self
            .http
            .post(url)
            .json(discussion)
            .send()
            .map_err(SilenceBoardError::transport(Operation::CreateDiscussion))?;
        ensure_success(resp, Operation::CreateDiscussion)?
            .json::<Discussion>()
            .map_err(SilenceBoardError::transport(Operation::CreateDiscussion))
    }

    pub fn update_discussion(
        &self,
        org: &str,
        team_slug: &str,
        number: u64,
        update: &DiscussionUpdate,
    ) -> Result<Discussion> {
        let number = number.to_string();
        let url = self.endpoint(&["orgs", org, "teams", team_slug, "discussions", &number]);
        let resp = self
            .http
            .patch(url)
            .json(update)
            .send()
            .map_err(SilenceBoardError::transport(Operation::UpdateDiscussion))?;
        ensure_success(resp, Operation::UpdateDiscussion)?
            .json::<Discussion>()
            .map_err(SilenceBoardError::transport(Operation::UpdateDiscussion))
    }
}

/// Target of the `rel="next"` entry in a `Link` header, if any.
fn next_page_url(headers: &HeaderMap) -> Option<Url> {
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .find_map(|entry| {
            let (target, params) = entry.split_once(';')?;
            let is_next = params.split(';').any(|param| {
                param
                    .trim()
                    .strip_prefix("rel=")
                    .is_some_and(|rel| rel.trim_matches('"').split_whitespace().any(|r| r == "next"))
            });
            if !is_next {
                return None;
            }
            let target = target.trim().strip_prefix('<')?.strip_suffix('>')?;
            Url::parse(target).ok()
        })
}
