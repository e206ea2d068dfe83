use crate::source::{ContactPages, FeedPage, PageSource};
use crate::{Result, SyncError};
use std::fmt;

/// Username and password for the contacts service.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct FeedOptions {
    pub feed_url: String,
    pub user_agent: Option<String>,
    pub page_size: Option<u32>,
}

impl FeedClient {
    /// Lists all contacts, starting from the first page again unless the
    /// page fetched by [`FeedClient::login`] has not been consumed yet.
    pub fn list_contacts(&mut self) -> Result<ContactPages<'_, FeedClient>> {
        match self.take_first_page() {
            Some(first) => Ok(ContactPages::with_first_page(&*self, first)),
            None => ContactPages::start(&*self),
        }
    }
}

#[cfg(feature = "remote-feed")]
mod imp {
    use super::{Credentials, FeedOptions, FeedPage, PageSource, Result, SyncError};
    use crate::atom::parse_feed;
    use reqwest::blocking::Client;
    use reqwest::StatusCode;
    use std::time::Duration;
    use tracing::debug;
    use url::Url;

    const GDATA_VERSION: &str = "3.0";

    #[derive(Debug)]
    pub struct FeedClient {
        client: Client,
        feed_url: Url,
        credentials: Credentials,
        page_size: Option<u32>,
        first_page: Option<FeedPage>,
    }

    impl FeedClient {
        /// Connects with `credentials` and fetches the first page.
        ///
        /// Rejected credentials surface as [`SyncError::InvalidCredentials`]
        /// before any contact is returned.
        pub fn login(options: FeedOptions, credentials: Credentials) -> Result<Self> {
            let feed_url = Url::parse(&options.feed_url)?;
            if !matches!(feed_url.scheme(), "http" | "https") {
                return Err(SyncError::Parse(
                    "contacts feed url must use http or https".to_string(),
                ));
            }
            let client = Client::builder()
                .user_agent(options.user_agent.as_deref().unwrap_or("leakscan"))
                // Blocking clients otherwise abort requests after 30 seconds.
                .timeout(None::<Duration>)
                .build()?;

            let mut feed = Self {
                client,
                feed_url,
                credentials,
                page_size: options.page_size,
                first_page: None,
            };
            let first = feed.fetch_page(None)?;
            feed.first_page = Some(first);
            Ok(feed)
        }

        pub(super) fn take_first_page(&mut self) -> Option<FeedPage> {
            self.first_page.take()
        }

        fn page_url(&self, next: Option<&str>) -> Result<Url> {
            match next {
                Some(link) => Ok(self.feed_url.join(link)?),
                None => {
                    let mut url = self.feed_url.clone();
                    if let Some(size) = self.page_size {
                        url.query_pairs_mut()
                            .append_pair("max-results", &size.to_string());
                    }
                    Ok(url)
                }
            }
        }
    }

    impl PageSource for FeedClient {
        fn source_name(&self) -> &'static str {
            "contacts-feed"
        }

        fn fetch_page(&self, next: Option<&str>) -> Result<FeedPage> {
            let url = self.page_url(next)?;
            debug!(url = %url, "requesting contacts page");
            let response = self
                .client
                .get(url.clone())
                .basic_auth(&self.credentials.username, Some(&self.credentials.password))
                .header("GData-Version", GDATA_VERSION)
                .header("Accept", "application/atom+xml")
                .send()?;

            let status = response.status();
            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                return Err(SyncError::InvalidCredentials);
            }
            if !status.is_success() {
                return Err(SyncError::Status {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }

            let body = response.text()?;
            parse_feed(&body)
        }
    }
}

#[cfg(not(feature = "remote-feed"))]
mod imp {
    use super::{Credentials, FeedOptions, FeedPage, PageSource, Result, SyncError};

    #[derive(Debug)]
    pub struct FeedClient {
        _options: FeedOptions,
        _credentials: Credentials,
    }

    impl FeedClient {
        pub fn login(_options: FeedOptions, _credentials: Credentials) -> Result<Self> {
            Err(SyncError::Unavailable(
                "contacts feed requires the remote-feed feature".to_string(),
            ))
        }

        pub(super) fn take_first_page(&mut self) -> Option<FeedPage> {
            None
        }
    }

    impl PageSource for FeedClient {
        fn source_name(&self) -> &'static str {
            "contacts-feed"
        }

        fn fetch_page(&self, _next: Option<&str>) -> Result<FeedPage> {
            Err(SyncError::Unavailable(
                "contacts feed requires the remote-feed feature".to_string(),
            ))
        }
    }
}

pub use imp::FeedClient;
