//! API-key authentication primitives.
//!
//! The raw credential is held in [`ApiKey`], which zeroizes its buffer on
//! drop and never prints its value. Logs refer to a key through
//! [`ApiKey::fingerprint`].

use std::fmt;

use serde::Serialize;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::domain::{Error, ErrorDetail, Failure};

const FINGERPRINT_BYTES: usize = 6;

/// Raw API key extracted from a request.
///
/// ## Invariants
/// - The value is non-blank. Blank input yields `None` from
///   [`ApiKey::from_header_value`].
///
/// # Examples
/// ```
/// use company_api::domain::ApiKey;
///
/// assert!(ApiKey::from_header_value("   ").is_none());
/// let key = ApiKey::from_header_value("abc123").expect("non-blank key");
/// assert_eq!(key.expose(), "abc123");
/// assert_eq!(format!("{key:?}"), format!("ApiKey({})", key.fingerprint()));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(Zeroizing<String>);

impl ApiKey {
    /// Accept a header value when it is not blank. The value is kept as sent.
    pub fn from_header_value(value: &str) -> Option<Self> {
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(Zeroizing::new(value.to_owned())))
        }
    }

    /// Secret value, for the key-store lookup only.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Short hex digest safe to log.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        hex::encode(&digest[..FINGERPRINT_BYTES])
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self.fingerprint())
    }
}

/// Key-store row matched by an API key: the key id and its owning company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKeyRecord {
    pub id: i64,
    pub company_slug: String,
    pub company_email: Option<String>,
}

/// Identity attached to a request after successful authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedPrincipal {
    subject_id: i64,
    company_slug: String,
    email: String,
    authenticated: bool,
}

impl AuthenticatedPrincipal {
    /// Principal for a matched key record.
    pub fn from_record(record: ApiKeyRecord) -> Self {
        Self {
            subject_id: record.id,
            company_slug: record.company_slug,
            email: record.company_email.unwrap_or_default(),
            authenticated: true,
        }
    }

    pub fn subject_id(&self) -> i64 {
        self.subject_id
    }

    pub fn company_slug(&self) -> &str {
        self.company_slug.as_str()
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}

/// Rejections produced by the API-key validator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    /// No usable credential on the request.
    #[error("api-key is not defined on request")]
    Unauthenticated,
    /// The credential matched no key-store record.
    #[error("invalid api-key")]
    InvalidCredential,
    /// The key store could not be queried.
    #[error("api-key lookup failed: {message}")]
    KeyStore { message: String },
}

impl AuthenticationError {
    /// Classifier reported as the error detail name.
    pub fn classifier(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::InvalidCredential => "INVALID_CREDENTIAL",
            Self::KeyStore { .. } => "KEY_STORE_UNAVAILABLE",
        }
    }
}

impl From<AuthenticationError> for Failure {
    fn from(error: AuthenticationError) -> Self {
        match error {
            AuthenticationError::KeyStore { message } => Failure::unclassified(message),
            rejection => {
                let message = rejection.to_string();
                Failure::Domain(
                    Error::unauthorized(message.clone())
                        .with_cause(rejection.classifier())
                        .with_error(ErrorDetail::new(message).with_name(rejection.classifier())),
                )
            }
        }
    }
}
