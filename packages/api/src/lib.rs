//! # API crate: remote access for the LearnLoop client
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`], the `reqwest` REST client for the LearnLoop backend |
//! | [`backend`] | [`Backend`], which picks the REST client or the in-memory remote from config |
//!
//! Both implement [`store::Remote`], so the controllers in the `store` crate
//! run unchanged against either.

pub mod backend;
pub mod client;

pub use backend::Backend;
pub use client::ApiClient;
