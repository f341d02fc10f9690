use std::future::Future;
use std::pin::Pin;

use chrono::Duration;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::Result;
use crate::utils::time::now;

pub type TokenFuture<'a> = Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;

/// Source of short-lived bearer tokens for authenticated requests.
pub trait CredentialSource: Send + Sync {
    fn bearer_token(&self) -> TokenFuture<'_>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
    pub role: Option<String>,
}

/// A token issued elsewhere and used as-is.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl CredentialSource for StaticToken {
    fn bearer_token(&self) -> TokenFuture<'_> {
        let token = self.0.clone();
        Box::pin(async move { Ok(token) })
    }
}

struct CachedToken {
    token: String,
    expires_at: i64,
}

/// Mints HS256 tokens and reuses them until they are about to expire.
pub struct SigningTokenSource {
    subject: String,
    role: Option<String>,
    key: EncodingKey,
    ttl: Duration,
    cached: Mutex<Option<CachedToken>>,
}

const REFRESH_SKEW_SECS: i64 = 30;

impl SigningTokenSource {
    pub fn new(subject: impl Into<String>, secret: &[u8], ttl: Duration) -> Self {
        Self {
            subject: subject.into(),
            role: None,
            key: EncodingKey::from_secret(secret),
            ttl,
            cached: Mutex::new(None),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    async fn token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;
        let now = now().timestamp();

        if let Some(existing) = cached.as_ref() {
            if existing.expires_at - REFRESH_SKEW_SECS > now {
                return Ok(existing.token.clone());
            }
            tracing::debug!(subject = %self.subject, "Bearer token expired, refreshing");
        }

        let expires_at = now + self.ttl.num_seconds();
        let claims = Claims {
            sub: self.subject.clone(),
            exp: expires_at.max(0) as usize,
            iat: now.max(0) as usize,
            role: self.role.clone(),
        };
        let token = encode(&Header::default(), &claims, &self.key)?;
        *cached = Some(CachedToken {
            token: token.clone(),
            expires_at,
        });
        Ok(token)
    }
}

impl CredentialSource for SigningTokenSource {
    fn bearer_token(&self) -> TokenFuture<'_> {
        Box::pin(self.token())
    }
}
