use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, CONTENT_TYPE, USER_AGENT};

use crate::decode::decode_body;

// Fixed request identity presented to every endpoint under test.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";
const DEFAULT_ACCEPT_LANGUAGE: &str = "zh-CN,zh;q=0.9,en;q=0.8";

#[derive(Debug, Clone)]
pub struct ProbeSettings {
    pub request_timeout: Duration,
    /// Static proxy applied to endpoints whose config requests one.
    pub proxy_address: Option<String>,
    pub user_agent: String,
    pub accept_language: String,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(15),
            proxy_address: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
        }
    }
}

/// One HTTP exchange with an endpoint. Any status is a response here;
/// interpreting non-200 codes is the retry loop's business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
    pub body: String,
    pub encoding: String,
}

/// Failure to reach the endpoint at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("timed out: {0}")]
    Timeout(String),
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("network error: {0}")]
    Network(String),
}

/// Client construction failure; fatal at startup, never mid-run.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid proxy address '{address}': {message}")]
    InvalidProxy { address: String, message: String },
    #[error("failed to build http client: {0}")]
    Build(String),
}

/// Single timed GET against a resolved URL. No retries at this layer.
#[async_trait::async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, url: &str, use_proxy: bool) -> Result<ProbeResponse, TransportError>;
}

/// Reqwest-backed prober holding one direct client and, when a proxy is
/// configured, one proxied client. Both are built once per run.
#[derive(Debug, Clone)]
pub struct ReqwestProber {
    direct: reqwest::Client,
    proxied: Option<reqwest::Client>,
}

impl ReqwestProber {
    pub fn new(settings: &ProbeSettings) -> Result<Self, ClientError> {
        let headers = fixed_headers(settings)?;

        let direct = client_builder(headers.clone(), settings.request_timeout)
            .build()
            .map_err(|err| ClientError::Build(err.to_string()))?;

        let proxied = match &settings.proxy_address {
            Some(address) => {
                let proxy =
                    reqwest::Proxy::all(address).map_err(|err| ClientError::InvalidProxy {
                        address: address.clone(),
                        message: err.to_string(),
                    })?;
                Some(
                    client_builder(headers, settings.request_timeout)
                        .proxy(proxy)
                        .build()
                        .map_err(|err| ClientError::Build(err.to_string()))?,
                )
            }
            None => None,
        };

        Ok(Self { direct, proxied })
    }

    fn client_for(&self, use_proxy: bool) -> &reqwest::Client {
        // An endpoint may ask for a proxy while the run has none
        // configured; it is then probed directly.
        if use_proxy {
            self.proxied.as_ref().unwrap_or(&self.direct)
        } else {
            &self.direct
        }
    }
}

#[async_trait::async_trait]
impl Prober for ReqwestProber {
    async fn probe(&self, url: &str, use_proxy: bool) -> Result<ProbeResponse, TransportError> {
        let parsed =
            reqwest::Url::parse(url).map_err(|err| TransportError::InvalidUrl(err.to_string()))?;

        let response = self
            .client_for(use_proxy)
            .get(parsed)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        let decoded = decode_body(&bytes, content_type.as_deref());

        Ok(ProbeResponse {
            status,
            body: decoded.text,
            encoding: decoded.encoding_label,
        })
    }
}

fn fixed_headers(settings: &ProbeSettings) -> Result<HeaderMap, ClientError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&settings.user_agent)
            .map_err(|err| ClientError::Build(err.to_string()))?,
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_str(&settings.accept_language)
            .map_err(|err| ClientError::Build(err.to_string()))?,
    );
    Ok(headers)
}

fn client_builder(headers: HeaderMap, timeout: Duration) -> reqwest::ClientBuilder {
    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(timeout)
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::Timeout(err.to_string());
    }
    if err.is_connect() {
        return TransportError::Connect(err.to_string());
    }
    TransportError::Network(err.to_string())
}
