//! Inter-agent messaging protocol
//!
//! Fixed-shape request/response records with a structured-text block form
//! and a JSON form, plus an append-only log of both.

pub mod handler;
pub mod message;
pub mod templates;
