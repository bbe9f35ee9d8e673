// src/core/net.rs
// Blocking HTTP for the catalog pages. GET and form POST, nothing else.

use std::thread;

use reqwest::blocking::{Client, Response};
use reqwest::header::USER_AGENT;
use tracing::{debug, warn};
use url::Url;

use crate::config::options::ClientOptions;
use crate::error::Result;

/// A fetched page: final URL (after redirects) plus body text.
/// Relative links in `body` resolve against `url`.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: Url,
    pub body: String,
}

impl Page {
    /// Resolve an href found on this page, `urljoin` style.
    pub fn join(&self, href: &str) -> Result<Url> {
        Ok(self.url.join(href.trim())?)
    }
}

pub struct Http {
    client: Client,
    opts: ClientOptions,
}

impl Http {
    pub fn new(opts: ClientOptions) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(opts.timeout)
            .connect_timeout(opts.connect_timeout);
        if !opts.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;
        Ok(Self { client, opts })
    }

    pub fn options(&self) -> &ClientOptions {
        &self.opts
    }

    pub fn get(&self, url: &str) -> Result<Page> {
        debug!(%url, "GET");
        self.with_retries(|| {
            self.client
                .get(url)
                .header(USER_AGENT, &self.opts.user_agent)
                .send()
        })
    }

    /// POST `application/x-www-form-urlencoded`. Repeated keys are sent as given.
    pub fn post_form(&self, url: &str, form: &[(String, String)]) -> Result<Page> {
        debug!(%url, fields = form.len(), "POST");
        self.with_retries(|| {
            self.client
                .post(url)
                .header(USER_AGENT, &self.opts.user_agent)
                .form(form)
                .send()
        })
    }

    fn with_retries<F>(&self, send: F) -> Result<Page>
    where
        F: Fn() -> reqwest::Result<Response>,
    {
        let mut attempt = 0u32;
        loop {
            match send().and_then(Response::error_for_status).and_then(into_page) {
                Ok(page) => return Ok(page),
                Err(e) if attempt < self.opts.retries && !is_client_error(&e) => {
                    attempt += 1;
                    warn!(attempt, retries = self.opts.retries, error = %e, "request failed, retrying");
                    thread::sleep(self.opts.retry_pause);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// 4xx: the request itself is wrong, sending it again won't help.
pub(crate) fn is_client_error(e: &reqwest::Error) -> bool {
    e.status().is_some_and(|s| s.is_client_error())
}

fn into_page(resp: Response) -> reqwest::Result<Page> {
    let url = resp.url().clone();
    let body = resp.text()?;
    Ok(Page { url, body })
}
