//! Session token helpers
//!
//! Token issuance lives in the org platform; this crate only verifies the
//! Bearer tokens it is handed. `create_token` exists for tests and local
//! tooling.

pub mod sessions;

pub use sessions::{create_token, verify_token, Claims};
