//! Session auth for the admin surface: a single credential pair, an encrypted session cookie
//! and a guard for mutating routes.

mod cookie;
mod log_in;
mod log_out;
mod middleware;
mod password;
mod session;
mod status;
mod token;
mod user;

pub use cookie::SESSION_DURATION;
pub use log_in::post_log_in;
pub use log_out::post_log_out;
pub use middleware::auth_guard;
pub use password::PasswordHash;
pub(crate) use session::create_session_table;
pub use session::delete_user_sessions;
pub use status::get_auth_status;
pub(crate) use token::Token;
pub use user::{User, UserID, create_user_table, get_user_by_username, update_password};
pub(crate) use user::{count_users, create_user};

#[cfg(test)]
pub(crate) use cookie::COOKIE_TOKEN;
