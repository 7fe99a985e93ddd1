use chrono::{DateTime, Utc};

/// How long a login challenge stays valid, in seconds.
///
/// Shared by both challenge variants. Deliberately a constant rather than
/// configuration: every relayed code message and client-facing countdown
/// assumes this value.
pub(crate) const LOGIN_CHALLENGE_TTL_SECS: i64 = 300;

/// Pending bot-code login: a one-time code sent to a chat.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CodeChallenge {
    pub(crate) chat_id: i64,
    pub(crate) code: String,
    pub(crate) expires_at: DateTime<Utc>,
}

/// Pending phone login: the resumable state of an external protocol client.
///
/// `client_session` is an opaque blob owned by the protocol client. It is
/// stored and handed back verbatim, never interpreted here.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PhoneChallenge {
    pub(crate) phone: String,
    pub(crate) client_session: String,
    pub(crate) phone_code_hash: String,
    pub(crate) expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Challenge {
    Code(CodeChallenge),
    Phone(PhoneChallenge),
}

impl Challenge {
    pub(crate) fn expires_at(&self) -> DateTime<Utc> {
        match self {
            Challenge::Code(c) => c.expires_at,
            Challenge::Phone(c) => c.expires_at,
        }
    }
}
