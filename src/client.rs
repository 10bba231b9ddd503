use derive_builder::Builder;
use headers::{Authorization, HeaderMap, HeaderMapExt, HeaderValue};
use reqwest::header;
use url::Url;

use crate::{
    error::{ErrorKind, Result},
    types::{Overview, QueueSnapshot, Scheme},
};

/// Path of the management API resource summarizing queue statistics
pub const OVERVIEW_PATH: &str = "/api/overview";
pub const DEFAULT_PORT: u16 = 15672;
pub const DEFAULT_USER_AGENT: &str =
    concat!("check-rabbitmq-overview/", env!("CARGO_PKG_VERSION"));

const DEFAULT_CREDENTIAL: &str = "guest";

/// Fetches queue totals from the management API of a single host at a time.
#[derive(Debug, Clone)]
pub struct Client {
    reqwest_client: reqwest::Client,
    scheme: Scheme,
    port: u16,
}

/// Builder for [`Client`].
///
/// Every setting is optional; unset values fall back to what the management
/// plugin ships with (`guest:guest` on port 15672 over plain HTTP).
#[derive(Builder, Debug)]
#[builder(build_fn(skip))]
#[builder(setter(into))]
#[builder(name = "ClientBuilder")]
pub struct ClientBuilderInternal {
    port: u16,
    username: String,
    password: String,
    secure: bool,
    allow_insecure: bool,
    user_agent: String,
}

impl ClientBuilder {
    pub fn build(&mut self) -> Result<Client> {
        let mut headers = HeaderMap::new();

        let user_agent = self
            .user_agent
            .clone()
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_str(&user_agent).map_err(|_| {
                ErrorKind::InvalidHeader(header::USER_AGENT.to_string(), user_agent.clone())
            })?,
        );

        let username = self.username.as_deref().unwrap_or(DEFAULT_CREDENTIAL);
        let password = self.password.as_deref().unwrap_or(DEFAULT_CREDENTIAL);
        headers.typed_insert(Authorization::basic(username, password));

        let reqwest_client = reqwest::ClientBuilder::new()
            .gzip(true)
            .default_headers(headers)
            .danger_accept_invalid_certs(self.allow_insecure.unwrap_or(false))
            .build()
            .map_err(ErrorKind::ClientSetup)?;

        Ok(Client {
            reqwest_client,
            scheme: Scheme::from_secure(self.secure.unwrap_or(false)),
            port: self.port.unwrap_or(DEFAULT_PORT),
        })
    }
}

impl Client {
    /// `<scheme>://<host>:<port>/api/overview`
    pub fn overview_url(&self, host: &str) -> Result<Url> {
        let raw = format!("{}://{}:{}{}", self.scheme, host, self.port, OVERVIEW_PATH);
        Url::parse(&raw).map_err(|e| ErrorKind::InvalidUrl(raw, e))
    }

    /// Request the overview of `host` once and extract its queue totals.
    ///
    /// The body is always read to the end before the status code is looked
    /// at, so the connection is released on every path.
    pub async fn fetch(&self, host: &str) -> Result<QueueSnapshot> {
        let url = self.overview_url(host)?;
        debug!("Requesting {}", url);

        let response = self
            .reqwest_client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ErrorKind::TransportError(url.clone(), e))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ErrorKind::TransportError(url.clone(), e))?;

        if !status.is_success() {
            debug!("{} answered with {} ({} bytes)", url, status, body.len());
            return Err(ErrorKind::UnexpectedStatus(url, status));
        }

        let overview: Overview =
            serde_json::from_slice(&body).map_err(|e| ErrorKind::DecodeError(url.clone(), e))?;
        let snapshot = QueueSnapshot::from(overview);
        debug!("{}: {:?}", url, snapshot);
        Ok(snapshot)
    }
}
