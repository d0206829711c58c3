//! Domain identifiers with strong typing.
//!
//! Both ids come from outside the system: users from the transport layer,
//! films from the upstream metadata service. The newtypes keep the two from
//! being swapped at call sites such as `upsert_stat(user, film, ..)`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Transport-supplied user identifier.
///
/// There is no local user table; the value is stored verbatim alongside
/// history and stats rows.
///
/// # Examples
///
/// ```rust
/// use cinebot::domain::UserId;
///
/// let id = UserId::new(42);
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self::new(id)
    }
}

impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

/// Upstream film identifier (Kinopoisk `filmId` / `kinopoiskId`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FilmId(i64);

impl FilmId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for FilmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for FilmId {
    fn from(id: i64) -> Self {
        Self::new(id)
    }
}

impl From<FilmId> for i64 {
    fn from(id: FilmId) -> Self {
        id.0
    }
}

impl std::str::FromStr for FilmId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}
