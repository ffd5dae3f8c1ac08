//! Shared types and platform-independent logic for the key generator console.
//!
//! Nothing in this crate touches the browser: the frontend feeds it form
//! values and a [`usecases::u601_generate_keys::KeyTransport`] implementation.

pub mod system;
pub mod usecases;
