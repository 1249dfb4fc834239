//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no domain vocabulary:
//! - Cryptographic utilities (avatar seed digests, HMAC-SHA256 signing)
//! - Password hashing (Argon2id, NIST SP 800-63B style policy)
//! - Cookie management

pub mod cookie;
pub mod crypto;
pub mod password;
