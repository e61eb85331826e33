// src/lib.rs
//! halnav — navigate HAL hypermedia APIs through lazily-resolved links.
//!
//! A fetched document exposes its `_links`; each [`Link`] knows how to
//! produce its resolved URL (expanding a URI template if needed), issue any
//! HTTP verb as an eagerly-started [`Deferred`] operation, and lazily
//! resolve into the [`Resource`] it points to. The [`HypermediaNode`] trait
//! lets traversal code ask a Link for members of its target without
//! dereferencing explicitly — resolution happens on demand and is memoized.
//!
//! ```no_run
//! use halnav::{EntryPoint, HypermediaNode};
//! use serde_json::json;
//! use std::collections::HashMap;
//!
//! # async fn run() -> Result<(), halnav::HalError> {
//! let api = EntryPoint::new("https://api.example.org/")?;
//! let root = api.root().resource().await?;
//!
//! let post = root
//!     .link("post")
//!     .expect("rel missing")
//!     .expand(HashMap::from([("id".to_string(), json!(5))]));
//! println!("{}", post.url()?);
//!
//! // Member access forwards to the resolved resource.
//! let title = post.member("title").await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod deferred;
mod entry_point;
mod error;
mod link;
mod resource;
mod transport;
mod uri_template;

// --- Error Handling ---
pub use crate::error::{HalError, Result};

// --- Configuration ---
pub use crate::config::EntryPointConfig;

// --- Traversal Core ---
pub use crate::entry_point::EntryPoint;
pub use crate::link::{Link, LinkDescriptor};
pub use crate::resource::{HypermediaNode, Member, Resource};

// --- Concurrency ---
pub use crate::deferred::Deferred;

// --- Transport ---
pub use crate::transport::{ReqwestTransport, Transport, TransportResponse};
