mod store;
mod types;

pub(crate) use store::LOGIN_CHALLENGES;
pub(crate) use types::{Challenge, CodeChallenge, LOGIN_CHALLENGE_TTL_SECS, PhoneChallenge};
