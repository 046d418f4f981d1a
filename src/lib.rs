//! # pingdom-sync
//!
//! Reconciles locally declared monitoring intent ("this URL is watched at
//! this interval and alerts these people") against the checks and
//! notification contacts held by the Pingdom API.
//!
//! The service exposes checks and contacts as independent resources; this
//! crate performs the ordered lookup and create-or-update calls that make
//! them agree with the desired state, idempotently.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────────────┐   ┌────────────┐
//! │ CLI (pdsync) │──▶│      PingdomGateway      │──▶│ Requester  │
//! │ or any caller│   │ contacts · checks · alert│   │ HTTP/script│
//! └──────────────┘   └────────────┬─────────────┘   └────────────┘
//!                                 │
//!                            ┌────▼────┐
//!                            │   url   │
//!                            └─────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pingdom_sync::gateway::PingdomGateway;
//! use pingdom_sync::scripted::ScriptedRequester;
//! use pingdom_sync::transport::Method;
//! use serde_json::json;
//!
//! let requester = ScriptedRequester::new().expect(
//!     Method::Get,
//!     "notification_contacts",
//!     json!({ "contacts": [] }),
//! );
//! let gateway = PingdomGateway::new(requester);
//! assert!(gateway.notification_contacts().unwrap().is_empty());
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`url`] | Split check URLs into host, path and encryption |
//! | [`models`] | Contacts, checks and wire envelopes |
//! | [`transport`] | `Requester` trait and the HTTP implementation |
//! | [`scripted`] | Recording `Requester` for tests |
//! | [`gateway`] | The gateway handle and last-error slot |
//! | [`contacts`] | Contact lookup, create-or-update, removal |
//! | [`checks`] | Check listing and lookup by URL |
//! | [`alert`] | Alert reconciliation |
//! | [`config`] | TOML configuration |
//! | [`error`] | Error type |

pub mod alert;
pub mod checks;
pub mod config;
pub mod contacts;
pub mod error;
pub mod gateway;
pub mod models;
pub mod scripted;
pub mod transport;
pub mod url;
