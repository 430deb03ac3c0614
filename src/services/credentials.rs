use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::constants::vertex::CLOUD_PLATFORM_SCOPE;
use crate::errors::SearchError;
use crate::services::request_context::RequestContext;

/// Value placed verbatim in the outbound `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn caller_supplied(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn bearer(access_token: &str) -> Self {
        Self(format!("Bearer {}", access_token))
    }

    pub fn as_header_value(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Ambient identity used when the caller did not supply a credential.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn access_token(&self, scopes: &[&str]) -> Result<String, SearchError>;
}

/// Application Default Credentials via `gcp_auth`. The provider is looked up on
/// every call so nothing credential-related outlives one invocation.
#[derive(Debug, Default, Clone, Copy)]
pub struct AdcTokenSource;

#[async_trait]
impl TokenSource for AdcTokenSource {
    async fn access_token(&self, scopes: &[&str]) -> Result<String, SearchError> {
        let provider = gcp_auth::provider()
            .await
            .map_err(|err| SearchError::credential("Failed to find default credentials", err))?;
        let token = provider
            .token(scopes)
            .await
            .map_err(|err| SearchError::credential("Failed to acquire access token", err))?;
        Ok(token.as_str().to_string())
    }
}

#[derive(Clone)]
pub struct CredentialResolver {
    source: Arc<dyn TokenSource>,
}

impl CredentialResolver {
    pub fn new(source: Arc<dyn TokenSource>) -> Self {
        Self { source }
    }

    pub fn with_default_credentials() -> Self {
        Self::new(Arc::new(AdcTokenSource))
    }

    /// Caller-supplied `Authorization` wins; otherwise mint an ambient token.
    pub async fn resolve(&self, ctx: &RequestContext) -> Result<Credential, SearchError> {
        if let Some(raw) = ctx.authorization() {
            return Ok(Credential::caller_supplied(raw));
        }
        let token = self.source.access_token(&[CLOUD_PLATFORM_SCOPE]).await?;
        Ok(Credential::bearer(&token))
    }
}
