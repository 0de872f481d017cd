use reqwest::StatusCode;
use reqwest::Url;
use reqwest::blocking::Client as HttpClient;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use tracing::debug;

use crate::config::{ClientConfig, load_config};
use crate::endpoint::Operation;
use crate::error::{Error, Result, decode_error};
use crate::options::{QueryParams, RequestOption};
use crate::util::parse_base_url;

/// Root of the eBird API 2.0.
pub const DEFAULT_BASE_URL: &str = "https://api.ebird.org/v2/";

/// Header carrying the API token on every request.
pub const API_KEY_HEADER: &str = "X-eBirdApiToken";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const CLIENT_USER_AGENT: &str = concat!("ebird-api-rs/", env!("CARGO_PKG_VERSION"));

/// Blocking eBird API client.
///
/// Configuration happens while building the value; afterwards the client is
/// immutable and can be shared between threads. Every call issues exactly one
/// GET request.
#[derive(Clone)]
pub struct Client {
    key: String,
    base_url: Url,
    accept_language: Option<String>,
    timeout: Duration,

    http: HttpClient,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("accept_language", &self.accept_language)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a client for the public eBird API.
    ///
    /// Fails with [`Error::Config`] if `key` is empty.
    pub fn new(key: &str) -> Result<Self> {
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::Config("eBird API key is missing".to_string()));
        }
        if HeaderValue::from_str(key).is_err() {
            return Err(Error::Config(
                "eBird API key contains characters not allowed in an HTTP header".to_string(),
            ));
        }

        let http = HttpClient::builder()
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            key: key.to_string(),
            base_url: parse_base_url(DEFAULT_BASE_URL)?,
            accept_language: None,
            timeout: DEFAULT_TIMEOUT,
            http,
        })
    }

    /// Creates a client from the environment and/or an `.ebirdrc` file.
    ///
    /// Lookup order for each setting:
    /// - `EBIRD_API_KEY` / `EBIRD_API_URL` environment variables
    /// - the file named by `EBIRD_RC`, otherwise `./.ebirdrc`, then `~/.ebirdrc`
    ///
    /// The rc file understands `key:`, `url:` and `locale:` lines.
    pub fn from_env() -> Result<Self> {
        Self::from_config(load_config(None, None)?)
    }

    pub fn from_config(cfg: ClientConfig) -> Result<Self> {
        let mut client = Self::new(&cfg.key)?;
        if let Some(url) = cfg.url.as_deref() {
            client = client.with_base_url(url)?;
        }
        if let Some(locale) = cfg.locale.as_deref() {
            client = client.with_accept_language(locale);
        }
        Ok(client)
    }

    /// Points the client at another API root, e.g. a test server.
    pub fn with_base_url(mut self, url: &str) -> Result<Self> {
        self.base_url = parse_base_url(url)?;
        Ok(self)
    }

    /// Default per-request timeout. A request exceeding it fails with
    /// [`Error::Transport`] and [`Error::is_timeout`] returns `true`.
    ///
    /// A single call can override it with [`RequestOption::timeout`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sends `Accept-Language` so names come back localized.
    pub fn with_accept_language(mut self, lang: &str) -> Self {
        let lang = lang.trim();
        self.accept_language = (!lang.is_empty()).then(|| lang.to_string());
        self
    }

    /// Replaces the underlying HTTP client (proxies, TLS settings, pools).
    ///
    /// The API key, `User-Agent` and `Accept` headers are still added to
    /// every request.
    pub fn with_http_client(mut self, http: HttpClient) -> Self {
        self.http = http;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the full request URL for `operation`.
    ///
    /// All local checks happen here: the path parameter count, blank values
    /// and, for the nearby lookups, the presence of both `lat` and `lng`.
    pub fn request_url(
        &self,
        operation: Operation,
        path_params: &[&str],
        options: &[RequestOption],
    ) -> Result<Url> {
        self.prepare(operation, path_params, options).map(|(url, _)| url)
    }

    /// Resolves the URL and the timeout that applies to this call.
    fn prepare(
        &self,
        operation: Operation,
        path_params: &[&str],
        options: &[RequestOption],
    ) -> Result<(Url, Duration)> {
        let path = operation.resolve(path_params)?;
        let params = QueryParams::from_options(options);

        if operation.requires_coordinates() && !(params.contains("lat") && params.contains("lng"))
        {
            return Err(Error::MissingCoordinates { operation });
        }

        let mut url = self
            .base_url
            .join(&path)
            .map_err(|e| Error::Config(format!("invalid endpoint path `{path}`: {e}")))?;
        {
            let mut query = url.query_pairs_mut();
            query.extend_pairs(params.iter());
            // Only JSON responses are decoded.
            query.append_pair("fmt", "json");
        }
        Ok((url, params.timeout().unwrap_or(self.timeout)))
    }

    pub(crate) fn get<T>(
        &self,
        operation: Operation,
        path_params: &[&str],
        options: &[RequestOption],
    ) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let (url, timeout) = self.prepare(operation, path_params, options)?;
        debug!(%operation, url = %url, ?timeout, "sending eBird request");

        let mut req = self
            .http
            .get(url)
            .header(API_KEY_HEADER, &self.key)
            .header(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT))
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .timeout(timeout);
        if let Some(lang) = &self.accept_language {
            req = req.header(ACCEPT_LANGUAGE, lang);
        }

        let resp = req
            .send()
            .map_err(|source| Error::Transport { operation, source })?;
        let status = resp.status();
        let body = resp
            .bytes()
            .map_err(|source| Error::Transport { operation, source })?;
        debug!(%operation, status = status.as_u16(), bytes = body.len(), "eBird response");

        match status {
            StatusCode::OK => serde_json::from_slice(&body)
                .map_err(|source| Error::Decode { operation, source }),
            StatusCode::NO_CONTENT => Ok(T::default()),
            _ => Err(decode_error(operation, status, &body)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Client {
        Client::new("k1").unwrap()
    }

    #[test]
    fn empty_key_is_rejected() {
        assert!(matches!(Client::new(""), Err(Error::Config(_))));
        assert!(matches!(Client::new("   "), Err(Error::Config(_))));
        assert!(matches!(Client::new("abc\ndef"), Err(Error::Config(_))));
    }

    #[test]
    fn defaults() {
        let c = client();
        assert_eq!(c.base_url().as_str(), DEFAULT_BASE_URL);
        assert_eq!(c.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn bad_base_url_fails_at_construction() {
        let err = client().with_base_url("::nope::").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn debug_output_hides_the_key() {
        let c = Client::new("super-secret-token").unwrap();
        assert!(!format!("{c:?}").contains("super-secret-token"));
    }

    #[test]
    fn request_url_always_asks_for_json() {
        let url = client()
            .request_url(Operation::AdjacentRegions, &["US"], &[])
            .unwrap();
        assert_eq!(url.as_str(), "https://api.ebird.org/v2/ref/adjacent/US?fmt=json");
    }

    #[test]
    fn request_url_encodes_options_after_path() {
        let c = client().with_base_url("http://localhost:9999/api").unwrap();
        let url = c
            .request_url(
                Operation::RecentObservationsInRegion,
                &["US-NY"],
                &[
                    RequestOption::max_results(5).unwrap(),
                    RequestOption::back(3).unwrap(),
                    RequestOption::spp_locale("zh_SIM").unwrap(),
                ],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:9999/api/data/obs/US-NY/recent?back=3&maxResults=5&sppLocale=zh_SIM&fmt=json"
        );
    }

    #[test]
    fn nearby_lookups_need_both_coordinates() {
        let c = client();
        let lat = RequestOption::lat(42.0).unwrap();
        let lng = RequestOption::lng(-76.0).unwrap();

        for op in [Operation::NearbyHotspots, Operation::RecentNearbyObservations] {
            for options in [vec![], vec![lat.clone()], vec![lng.clone()]] {
                let err = c.request_url(op, &[], &options).unwrap_err();
                assert!(matches!(err, Error::MissingCoordinates { operation } if operation == op));
            }
            let url = c.request_url(op, &[], &[lat.clone(), lng.clone()]).unwrap();
            let query = url.query().unwrap();
            assert!(query.contains("lat=42.00"));
            assert!(query.contains("lng=-76.00"));
        }
    }

    #[test]
    fn surplus_path_parameters_are_an_error() {
        let err = client()
            .request_url(Operation::AdjacentRegions, &["US", "extra"], &[])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::UnexpectedParameters {
                operation: Operation::AdjacentRegions,
                expected: 1,
                got: 2,
            }
        ));

        let err = client()
            .request_url(Operation::Top100, &["US", "2024"], &[])
            .unwrap_err();
        assert!(matches!(err, Error::MissingParameter { parameter: "m", .. }));
    }

    #[test]
    fn call_timeout_overrides_client_default_and_is_not_sent() {
        let c = client().with_timeout(Duration::from_secs(30));
        let (url, timeout) = c
            .prepare(
                Operation::TaxonomyVersions,
                &[],
                &[RequestOption::timeout(Duration::from_millis(750)).unwrap()],
            )
            .unwrap();
        assert_eq!(timeout, Duration::from_millis(750));
        assert_eq!(url.query(), Some("fmt=json"));

        let (_, timeout) = c.prepare(Operation::TaxonomyVersions, &[], &[]).unwrap();
        assert_eq!(timeout, Duration::from_secs(30));
    }

    #[test]
    fn other_geo_lookups_do_not_check_coordinates() {
        assert!(
            client()
                .request_url(Operation::RecentNearbyNotableObservations, &[], &[])
                .is_ok()
        );
    }

    #[test]
    fn from_config_applies_overrides() {
        let c = Client::from_config(ClientConfig {
            key: "k".into(),
            url: Some("http://127.0.0.1:1234".into()),
            locale: Some("es".into()),
        })
        .unwrap();
        assert_eq!(c.base_url().as_str(), "http://127.0.0.1:1234/");
        assert_eq!(c.accept_language.as_deref(), Some("es"));
    }
}
