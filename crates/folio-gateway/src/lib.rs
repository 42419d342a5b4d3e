//! folio-gateway: the HTTP chat gateway
//!
//! A stateless per-request handler: it attaches the persona preamble,
//! forwards the conversation to an upstream completion provider with
//! streaming enabled, and passes the reply bytes through unchanged.
//! Every failure degrades to a synthetic error stream in the same wire
//! shape, so the consumer never needs a special case.

pub mod config;
pub mod persona;
pub mod routes;
pub mod server;
pub mod service;

pub use config::GatewayConfig;
pub use persona::{PersonaError, PersonaSet};
pub use server::{GatewayState, router, serve};
pub use service::ChatService;
