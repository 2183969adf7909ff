//! Client core for Lumio: typed rows, query building, auth/session state,
//! realtime subscription bookkeeping, cart and contact-form logic. Everything
//! here is transport-free — the `frontend` crate supplies the actual HTTP,
//! WebSocket, and browser-storage plumbing.

pub mod cart;
pub mod contact;
pub mod errors;
pub mod local;
pub mod models;
pub mod object_store;
pub mod query;
pub mod realtime;
pub mod session;
pub mod view;

pub use errors::ClientError;
pub use session::{AuthChange, SessionState};
