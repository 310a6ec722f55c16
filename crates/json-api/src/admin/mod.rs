//! Admin Console
//!
//! Every route in here sits behind [`crate::auth::middleware::require_admin`].

pub(crate) mod stats;
pub(crate) mod users;
