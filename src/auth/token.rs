//! Defines the session token stored in the auth cookie and how to serialize/deserialize it.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::auth::{User, UserID};

mod datetime_format {
    //! Specifies how to serialize a [time::OffsetDateTime] in a custom format that
    //! avoids serialisations with datetimes containing midnight.
    //!
    //! The default serializer for [time::OffsetDateTime] will serialize
    //! "00:00:00.000000" as "0:00:00.0" and the deserializer would error out
    //! because it expects the hours to be two digits, not one.
    use serde::{Deserialize, Deserializer, Serializer};
    use time::{
        OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description,
    };

    /// Date time format for the token expiry, e.g. "2021-01-01 00:00:00.000000 +00:00:00".
    const DATE_TIME_FORMAT: &[BorrowedFormatItem] = format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond] [offset_hour \
             sign:mandatory]:[offset_minute]:[offset_second]"
    );

    pub fn serialize<S>(dt: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = dt
            .format(DATE_TIME_FORMAT)
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        OffsetDateTime::parse(&s, DATE_TIME_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// A token for authorization and authentication.
///
/// The expiry is fixed when the token is issued at log-in and is never pushed back.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Token {
    pub user_id: UserID,

    pub username: String,

    /// The server-side session this token belongs to.
    pub session_id: String,

    #[serde(
        serialize_with = "datetime_format::serialize",
        deserialize_with = "datetime_format::deserialize"
    )]
    pub expires_at: OffsetDateTime,
}

impl Token {
    /// Issue a token for `user` in session `session_id` that expires at `expires_at`.
    pub fn new(user: &User, session_id: String, expires_at: OffsetDateTime) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            session_id,
            expires_at,
        }
    }

    /// Whether the token is no longer valid at `now`.
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        self.expires_at <= now
    }
}
