//! In-process session store.

use jiff::{SignedDuration, Timestamp};
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;

use crate::auth::{
    AuthServiceError, IssuedSession, OperatorClaims, ParsedSessionToken, SessionId,
    SessionSecret, SessionTokenVersion, format_session_token,
};

/// Session lifetime used when none is configured.
pub const DEFAULT_SESSION_TTL: SignedDuration = SignedDuration::from_hours(8);

#[derive(Debug)]
struct SessionRecord {
    secret: SessionSecret,
    claims: OperatorClaims,
}

/// Live operator sessions, keyed by session id.
#[derive(Debug)]
pub struct SessionStore {
    ttl: SignedDuration,
    sessions: RwLock<FxHashMap<SessionId, SessionRecord>>,
}

impl SessionStore {
    #[must_use]
    pub fn new(ttl: SignedDuration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(FxHashMap::default()),
        }
    }

    /// Start a session for `operator` and return its one-time bearer token.
    ///
    /// Sessions that have expired by `now` are dropped and listed in
    /// [`IssuedSession::evicted`].
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::ExpiryOutOfRange`] when `now + ttl` is not representable.
    pub async fn issue(
        &self,
        operator: &str,
        now: Timestamp,
    ) -> Result<IssuedSession, AuthServiceError> {
        let expires_at = now
            .checked_add(self.ttl)
            .map_err(AuthServiceError::ExpiryOutOfRange)?;

        let session = SessionId::new();
        let secret = SessionSecret::generate();
        let token = format_session_token(session, SessionTokenVersion::V1, &secret);

        let claims = OperatorClaims {
            session,
            operator: operator.to_string(),
            issued_at: now,
            expires_at,
        };

        let mut sessions = self.sessions.write().await;
        let evicted = evict_expired(&mut sessions, now);

        sessions.insert(
            session,
            SessionRecord {
                secret,
                claims: claims.clone(),
            },
        );

        Ok(IssuedSession {
            token,
            claims,
            evicted,
        })
    }

    /// Look up the session a parsed token points at.
    ///
    /// Expired sessions stay held until the next [`SessionStore::issue`] evicts them.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::NotFound`] for unknown sessions or mismatched secrets and
    /// [`AuthServiceError::Expired`] once the session's lifetime has passed.
    pub async fn resolve(
        &self,
        token: &ParsedSessionToken,
        now: Timestamp,
    ) -> Result<OperatorClaims, AuthServiceError> {
        let sessions = self.sessions.read().await;

        let record = sessions
            .get(&token.session)
            .ok_or(AuthServiceError::NotFound)?;

        if !record.secret.matches(&token.secret) {
            return Err(AuthServiceError::NotFound);
        }

        if record.claims.expires_at <= now {
            return Err(AuthServiceError::Expired);
        }

        Ok(record.claims.clone())
    }

    /// End a session. Returns `true` when it was live.
    pub async fn revoke(&self, session: SessionId) -> bool {
        self.sessions.write().await.remove(&session).is_some()
    }

    /// Number of sessions held, expired or not.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether no sessions are held.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

fn evict_expired(
    sessions: &mut FxHashMap<SessionId, SessionRecord>,
    now: Timestamp,
) -> Vec<SessionId> {
    let mut expired = Vec::new();

    sessions.retain(|session, record| {
        let live = record.claims.expires_at > now;

        if !live {
            expired.push(*session);
        }

        live
    });

    expired
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL)
    }
}
