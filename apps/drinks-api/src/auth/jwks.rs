//! JWKS client for fetching and caching the identity provider's RSA keys.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use jsonwebtoken::DecodingKey;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::auth::AuthError;

/// A cached set of decoding keys fetched from the provider's well-known
/// JWKS endpoint.
#[derive(Clone)]
pub struct JwksClient {
    origin: String,
    http: reqwest::Client,
    cache: Arc<RwLock<KeySetCache>>,
}

struct KeySetCache {
    keys: HashMap<String, DecodingKey>,
    fetched_at: Option<Instant>,
}

/// How long to cache the key set before re-fetching (1 hour).
const CACHE_TTL: Duration = Duration::from_secs(3600);

/// Upper bound on a single key-set fetch. An unreachable provider fails the
/// request instead of stalling it.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct JwksResponse {
    keys: Vec<JwkEntry>,
}

#[derive(Debug, Deserialize)]
struct JwkEntry {
    kid: Option<String>,
    kty: String,
    #[serde(rename = "use")]
    usage: Option<String>,
    n: Option<String>,
    e: Option<String>,
}

impl JwksClient {
    /// `origin` is the provider origin, e.g. `https://example.us.auth0.com`.
    pub fn new(origin: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .expect("failed to build JWKS HTTP client");

        Self {
            origin: origin.trim_end_matches('/').to_string(),
            http,
            cache: Arc::new(RwLock::new(KeySetCache {
                keys: HashMap::new(),
                fetched_at: None,
            })),
        }
    }

    /// For tests: create a client pre-loaded with a known key.
    pub fn with_static_key(kid: &str, decoding_key: DecodingKey) -> Self {
        let mut keys = HashMap::new();
        keys.insert(kid.to_string(), decoding_key);
        Self {
            origin: String::new(),
            http: reqwest::Client::new(),
            cache: Arc::new(RwLock::new(KeySetCache {
                keys,
                // Set fetched_at far in the future so it never expires in tests.
                fetched_at: Some(Instant::now() + Duration::from_secs(86400)),
            })),
        }
    }

    /// Get the decoding key for a given `kid`, re-fetching the key set when
    /// the cache has gone stale. A kid absent from a fresh key set is not
    /// retried against the provider.
    pub async fn get_key(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        {
            let cache = self.cache.read().await;
            if cache_is_fresh(&cache) {
                return cache.keys.get(kid).cloned().ok_or(AuthError::KeyNotFound);
            }
        }

        // Stale or never fetched — refresh, then look up.
        self.refresh().await?;

        let cache = self.cache.read().await;
        cache.keys.get(kid).cloned().ok_or(AuthError::KeyNotFound)
    }

    async fn refresh(&self) -> Result<(), AuthError> {
        let url = format!("{}/.well-known/jwks.json", self.origin);
        tracing::info!(%url, "fetching identity provider JWKS");

        let resp: JwksResponse = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(?e, "JWKS fetch failed");
                AuthError::KeySetUnavailable
            })?
            .json()
            .await
            .map_err(|e| {
                tracing::error!(?e, "JWKS parse failed");
                AuthError::KeySetUnavailable
            })?;

        let mut keys = HashMap::new();
        for entry in resp.keys {
            if entry.kty != "RSA" {
                continue;
            }
            // Skip keys published for encryption rather than signing.
            if matches!(entry.usage.as_deref(), Some(u) if u != "sig") {
                continue;
            }
            let (Some(kid), Some(n), Some(e)) = (entry.kid, entry.n, entry.e) else {
                continue;
            };

            let decoding = DecodingKey::from_rsa_components(&n, &e).map_err(|err| {
                tracing::error!(?err, %kid, "bad JWKS modulus/exponent");
                AuthError::KeySetUnavailable
            })?;
            keys.insert(kid, decoding);
        }

        let mut cache = self.cache.write().await;
        cache.keys = keys;
        cache.fetched_at = Some(Instant::now());

        Ok(())
    }
}

fn cache_is_fresh(cache: &KeySetCache) -> bool {
    match cache.fetched_at {
        Some(t) => Instant::now().saturating_duration_since(t) < CACHE_TTL,
        None => false,
    }
}
