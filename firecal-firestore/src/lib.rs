//! Firestore collaborator for firecal.
//!
//! Talks to the Firestore REST API: loads a service-account key, exchanges
//! it for a bearer token, runs a single structured query, and decodes the
//! returned documents into `firecal-core` types.

pub mod auth;
pub mod client;
pub mod credentials;
pub mod document;
pub mod query;

pub use client::FirestoreClient;
pub use credentials::ServiceAccountKey;
pub use query::{FilterOp, TypeFilter};
