//! HNAP login and session state.
//!
//! Login is a two-step challenge/response:
//!
//! 1. `Login` with `Action: request` returns a challenge, the device public
//!    key and a `uid` cookie value.
//! 2. The client derives `signing_key = HMAC(public_key + password, challenge)`
//!    and answers with `LoginPassword = HMAC(signing_key, challenge)`, signed
//!    with the new key and carrying `uid` and `PrivateKey` cookies.
//!
//! The resulting key and cookies form one immutable [`Session`]. The
//! [`AuthSession`] swaps whole sessions under a write lock; readers take an
//! `Arc` snapshot and never see a key paired with another login's cookies.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_derive::Deserialize;
use serde_json::{json, Value};
use tokio::sync::RwLock;

use crate::error::{HnapError, ProtocolError, TransportError};
use crate::hnap::actions::{action_uri, LOGIN};
use crate::hnap::digest::{digest, sign_request};
use crate::hnap::transport::{HnapRequest, Transport};

pub const UID_COOKIE: &str = "uid";
pub const PRIVATE_KEY_COOKIE: &str = "PrivateKey";

const OPERATION: &str = "login";
const LOGIN_FAILED: &str = "FAILED";

/// Username and password used for every login.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
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
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The per-login secret ("private key") that signs every request.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey(String);

impl SigningKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}

/// Signing material of one successful login.
#[derive(Debug)]
pub struct Session {
    generation: u64,
    signing_key: SigningKey,
    uid: String,
}

impl Session {
    /// Monotonic login counter, starting at 1.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Builds a request for `action` signed by this session.
    pub fn signed_request(&self, action: &str, body: Value, now: DateTime<Utc>) -> HnapRequest {
        signed_request(action, body, &self.signing_key, &self.uid, now)
    }
}

/// Signs `action` with `key` and attaches the matching session cookies.
fn signed_request(
    action: &str,
    body: Value,
    key: &SigningKey,
    uid: &str,
    now: DateTime<Utc>,
) -> HnapRequest {
    let uri = action_uri(action);
    let signature = sign_request(&uri, key.as_bytes(), now);
    HnapRequest::new(format!("\"{uri}\""), body)
        .signed(&signature)
        .cookie(UID_COOKIE, uid)
        .cookie(PRIVATE_KEY_COOKIE, key.as_str())
}

#[derive(Default)]
struct SessionSlot {
    generation: u64,
    current: Option<Arc<Session>>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct LoginEnvelope {
    #[serde(rename = "LoginResponse")]
    response: LoginReply,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct LoginReply {
    #[serde(rename = "Challenge")]
    challenge: Option<String>,
    #[serde(rename = "PublicKey")]
    public_key: Option<String>,
    #[serde(rename = "Cookie")]
    cookie: Option<String>,
    #[serde(rename = "LoginResult")]
    result: Option<String>,
}

/// A login challenge; consumed by a single login attempt.
struct Challenge {
    challenge: String,
    public_key: String,
    uid: String,
}

impl Challenge {
    fn from_body(body: &str) -> Result<Self, ProtocolError> {
        let envelope: LoginEnvelope = serde_json::from_str(body)
            .map_err(|e| ProtocolError::malformed(format!("challenge is not JSON: {e}")))?;
        let reply = envelope.response;

        fn required(value: Option<String>, field: &str) -> Result<String, ProtocolError> {
            value
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ProtocolError::malformed(format!("LoginResponse.{field} missing")))
        }

        Ok(Self {
            challenge: required(reply.challenge, "Challenge")?,
            public_key: required(reply.public_key, "PublicKey")?,
            uid: required(reply.cookie, "Cookie")?,
        })
    }
}

/// Owns the current session and performs logins.
pub struct AuthSession {
    credentials: Credentials,
    transport: Arc<dyn Transport>,
    slot: RwLock<SessionSlot>,
}

impl AuthSession {
    pub fn new(credentials: Credentials, transport: Arc<dyn Transport>) -> Self {
        Self {
            credentials,
            transport,
            slot: RwLock::new(SessionSlot::default()),
        }
    }

    /// Current session, if a login has succeeded and not been invalidated.
    ///
    /// The read lock is held only while the `Arc` is cloned.
    pub async fn snapshot(&self) -> Option<Arc<Session>> {
        self.slot.read().await.current.clone()
    }

    /// Performs the full challenge/response handshake.
    ///
    /// Network I/O happens without holding the lock; on success the new
    /// session replaces the old one in a single swap. On failure the previous
    /// session is left untouched.
    pub async fn login(&self) -> Result<Arc<Session>, HnapError> {
        let challenge = self.request_challenge().await?;
        tracing::debug!(uid = %challenge.uid, "computing challenge response");

        let signing_key = SigningKey(digest(
            &challenge.challenge,
            format!("{}{}", challenge.public_key, self.credentials.password).as_bytes(),
        ));
        let pass_key = digest(&challenge.challenge, signing_key.as_bytes());

        let body = json!({
            LOGIN: {
                "Action": "login",
                "Username": self.credentials.username,
                "LoginPassword": pass_key,
            }
        });
        let request = signed_request(LOGIN, body, &signing_key, &challenge.uid, Utc::now());

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| HnapError::transport(OPERATION, LOGIN, e))?;

        tracing::debug!(action = LOGIN, status = response.status, "challenge response sent");
        if !response.is_success() {
            return Err(HnapError::auth_rejected(OPERATION, LOGIN, response.status));
        }
        if let Ok(envelope) = serde_json::from_str::<LoginEnvelope>(&response.body) {
            if envelope.response.result.as_deref() == Some(LOGIN_FAILED) {
                return Err(HnapError::auth_rejected(OPERATION, LOGIN, response.status));
            }
        }

        let session = self.commit(signing_key, challenge.uid).await;
        tracing::info!(generation = session.generation(), "logged in to modem");
        Ok(session)
    }

    /// Drops the session if it is still the one issued at `generation`.
    ///
    /// A newer login that raced ahead of the rejected request is kept.
    pub async fn invalidate(&self, generation: u64) -> bool {
        let mut slot = self.slot.write().await;
        match &slot.current {
            Some(session) if session.generation == generation => {
                slot.current = None;
                tracing::warn!(generation, "session invalidated by device");
                true
            }
            _ => false,
        }
    }

    async fn request_challenge(&self) -> Result<Challenge, HnapError> {
        let body = json!({
            LOGIN: {
                "Action": "request",
                "Username": self.credentials.username,
            }
        });
        let request = HnapRequest::new(action_uri(LOGIN), body);

        tracing::debug!("requesting login challenge");
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| HnapError::transport(OPERATION, LOGIN, e))?;
        if !response.is_success() {
            return Err(HnapError::transport(
                OPERATION,
                LOGIN,
                TransportError::Status {
                    status: response.status,
                    body: response.body,
                },
            ));
        }

        Challenge::from_body(&response.body).map_err(|e| HnapError::protocol(OPERATION, LOGIN, e))
    }

    async fn commit(&self, signing_key: SigningKey, uid: String) -> Arc<Session> {
        let mut slot = self.slot.write().await;
        slot.generation += 1;
        let session = Arc::new(Session {
            generation: slot.generation,
            signing_key,
            uid,
        });
        slot.current = Some(Arc::clone(&session));
        session
    }
}
