//! Data transfer objects.
//!
//! Wire and cache encodings live here so the domain types stay free of
//! format concerns.

pub mod http;
pub mod membership;
