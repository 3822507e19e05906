use crate::error::{Result, SocialsError};
use crate::types::{User, UsersPage};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::Url;
use std::collections::HashSet;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.intercom.io";

/// Longest slice of an error response body kept in [`SocialsError::Status`].
const BODY_EXCERPT_CHARS: usize = 200;

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub api_url: String,
    pub token: String,
    pub per_page: Option<u32>,
    pub timeout: Duration,
}

impl ClientOptions {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: token.into(),
            per_page: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Blocking client for the Intercom users listing.
pub struct IntercomClient {
    http: Client,
    token: String,
    first_page: Url,
}

impl IntercomClient {
    pub fn new(opts: ClientOptions) -> Result<Self> {
        if opts.token.trim().is_empty() {
            return Err(SocialsError::MissingToken);
        }
        let first_page = first_page_url(&opts.api_url, opts.per_page)?;
        let http = Client::builder()
            .timeout(opts.timeout)
            .user_agent(concat!("intercom-socials/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            token: opts.token,
            first_page,
        })
    }

    pub fn first_page_url(&self) -> &Url {
        &self.first_page
    }

    /// Fetch and decode a single page.
    pub fn fetch_page(&self, url: &Url) -> Result<UsersPage> {
        let response = self
            .http
            .get(url.clone())
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|source| SocialsError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response.text().map_err(|source| SocialsError::Request {
            url: url.to_string(),
            source,
        })?;

        if !status.is_success() {
            return Err(SocialsError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                body: excerpt(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| SocialsError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// Iterate over every page, following `pages.next` from the first page.
    pub fn pages(&self) -> PageIter<'_> {
        PageIter {
            client: self,
            next: Some(self.first_page.clone()),
            seen: HashSet::new(),
        }
    }

    /// All users across all pages, in page order.
    pub fn fetch_all_users(&self) -> Result<Vec<User>> {
        let mut users = Vec::new();
        for page in self.pages() {
            users.extend(page?.users);
        }
        Ok(users)
    }
}

/// Sequential page iterator. Yields at most one error, then stops.
pub struct PageIter<'a> {
    client: &'a IntercomClient,
    next: Option<Url>,
    seen: HashSet<Url>,
}

impl PageIter<'_> {
    fn advance(&mut self, url: Url) -> Result<UsersPage> {
        if !self.seen.insert(url.clone()) {
            return Err(SocialsError::PaginationLoop(url.to_string()));
        }

        let page = self.client.fetch_page(&url)?;
        match page.pages.total_pages {
            Some(total) => tracing::debug!(
                users = page.users.len(),
                "page n° {} of {} fetched",
                page.pages.page,
                total
            ),
            None => tracing::debug!(users = page.users.len(), "page n° {} fetched", page.pages.page),
        }

        if let Some(next) = page.pages.next.as_deref().map(str::trim) {
            if !next.is_empty() {
                let resolved = url.join(next).map_err(|e| SocialsError::InvalidUrl {
                    url: next.to_string(),
                    reason: e.to_string(),
                })?;
                self.next = Some(resolved);
            }
        }
        Ok(page)
    }
}

impl Iterator for PageIter<'_> {
    type Item = Result<UsersPage>;

    fn next(&mut self) -> Option<Self::Item> {
        let url = self.next.take()?;
        Some(self.advance(url))
    }
}

/// Build `{api_url}/users?page=1[&per_page=N]`, keeping any path prefix on
/// `api_url`.
pub fn first_page_url(api_url: &str, per_page: Option<u32>) -> Result<Url> {
    let invalid = |reason: String| SocialsError::InvalidUrl {
        url: api_url.to_string(),
        reason,
    };

    let mut base = Url::parse(api_url.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", base.scheme())));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    let mut url = base.join("users").map_err(|e| invalid(e.to_string()))?;
    url.set_query(None);
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("page", "1");
        if let Some(n) = per_page {
            query.append_pair("per_page", &n.to_string());
        }
    }
    Ok(url)
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(BODY_EXCERPT_CHARS) {
        Some((idx, _)) => format!("{}…", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::Server) -> IntercomClient {
        let mut opts = ClientOptions::new("secret-token");
        opts.api_url = server.url();
        IntercomClient::new(opts).unwrap()
    }

    fn page_body(page: u32, next: Option<String>, emails: &[&str]) -> String {
        let users: Vec<serde_json::Value> = emails
            .iter()
            .map(|e| {
                serde_json::json!({
                    "type": "user",
                    "email": e,
                    "social_profiles": {
                        "type": "social_profile.list",
                        "social_profiles": [{"name": "twitter", "url": format!("https://twitter.com/{e}")}]
                    }
                })
            })
            .collect();
        serde_json::json!({
            "type": "user.list",
            "pages": {"type": "pages", "page": page, "next": next},
            "users": users,
        })
        .to_string()
    }

    #[test]
    fn first_page_url_defaults() {
        let url = first_page_url(DEFAULT_API_URL, None).unwrap();
        assert_eq!(url.as_str(), "https://api.intercom.io/users?page=1");
    }

    #[test]
    fn first_page_url_keeps_prefix_and_per_page() {
        let url = first_page_url("http://proxy.local/intercom", Some(60)).unwrap();
        assert_eq!(
            url.as_str(),
            "http://proxy.local/intercom/users?page=1&per_page=60"
        );
    }

    #[test]
    fn first_page_url_rejects_bad_input() {
        assert!(matches!(
            first_page_url("not a url", None),
            Err(SocialsError::InvalidUrl { .. })
        ));
        assert!(matches!(
            first_page_url("ftp://example.com", None),
            Err(SocialsError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn empty_token_is_rejected() {
        let result = IntercomClient::new(ClientOptions::new("  "));
        assert!(matches!(result, Err(SocialsError::MissingToken)));
    }

    #[test]
    fn fetch_page_sends_auth_headers() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", Matcher::Regex("^/users".to_string()))
            .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
            .match_header("authorization", "Bearer secret-token")
            .match_header("accept", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(page_body(1, None, &["ada@example.com"]))
            .create();

        let client = client_for(&server);
        let page = client.fetch_page(client.first_page_url()).unwrap();
        assert_eq!(page.users.len(), 1);
        assert!(page.is_last());
        mock.assert();
    }

    #[test]
    fn fetch_all_users_includes_last_page() {
        let mut server = mockito::Server::new();
        let page2 = format!("{}/users?page=2", server.url());
        let first = server
            .mock("GET", Matcher::Regex("^/users".to_string()))
            .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
            .with_status(200)
            .with_body(page_body(1, Some(page2), &["a@example.com", "b@example.com"]))
            .create();
        let last = server
            .mock("GET", Matcher::Regex("^/users".to_string()))
            .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
            .with_status(200)
            .with_body(page_body(2, None, &["c@example.com"]))
            .create();

        let client = client_for(&server);
        let users = client.fetch_all_users().unwrap();
        let emails: Vec<&str> = users.iter().map(|u| u.email()).collect();
        assert_eq!(emails, ["a@example.com", "b@example.com", "c@example.com"]);
        first.assert();
        last.assert();
    }

    #[test]
    fn relative_next_is_resolved() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", Matcher::Regex("^/users".to_string()))
            .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
            .with_status(200)
            .with_body(page_body(1, Some("/users?page=2".to_string()), &["a@example.com"]))
            .create();
        let second = server
            .mock("GET", Matcher::Regex("^/users".to_string()))
            .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
            .with_status(200)
            .with_body(page_body(2, None, &[]))
            .create();

        let client = client_for(&server);
        let pages: Vec<UsersPage> = client.pages().collect::<Result<_>>().unwrap();
        assert_eq!(pages.len(), 2);
        second.assert();
    }

    #[test]
    fn non_success_status_is_an_error() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", Matcher::Regex("^/users".to_string()))
            .with_status(401)
            .with_body(r#"{"type":"error.list","errors":[{"code":"unauthorized"}]}"#)
            .create();

        let client = client_for(&server);
        let err = client.fetch_all_users().unwrap_err();
        match err {
            SocialsError::Status { status, body, .. } => {
                assert_eq!(status, 401);
                assert!(body.contains("unauthorized"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn undecodable_body_is_an_error() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", Matcher::Regex("^/users".to_string()))
            .with_status(200)
            .with_body("<html>gateway</html>")
            .create();

        let client = client_for(&server);
        let err = client.fetch_all_users().unwrap_err();
        assert!(matches!(err, SocialsError::Decode { .. }));
    }

    #[test]
    fn iterator_stops_after_first_error() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", Matcher::Regex("^/users".to_string()))
            .with_status(500)
            .create();

        let client = client_for(&server);
        let mut pages = client.pages();
        assert!(pages.next().unwrap().is_err());
        assert!(pages.next().is_none());
    }

    #[test]
    fn repeated_next_url_is_a_loop() {
        let mut server = mockito::Server::new();
        let self_link = format!("{}/users?page=1", server.url());
        server
            .mock("GET", Matcher::Regex("^/users".to_string()))
            .with_status(200)
            .with_body(page_body(1, Some(self_link), &["a@example.com"]))
            .create();

        let client = client_for(&server);
        let err = client.fetch_all_users().unwrap_err();
        assert!(matches!(err, SocialsError::PaginationLoop(_)));
    }

    #[test]
    fn excerpt_truncates_long_bodies() {
        let long = "x".repeat(500);
        let short = excerpt(&long);
        assert!(short.ends_with('…'));
        assert_eq!(short.chars().count(), BODY_EXCERPT_CHARS + 1);
        assert_eq!(excerpt("  ok \n"), "ok");
    }
}
