// src/entry_point.rs
//! Shared root context for a traversal session.
//!
//! An [`EntryPoint`] supplies the transport every Link derived from it uses
//! to issue requests. It is shared, read-only, behind an `Arc` for the
//! lifetime of a traversal; many Links hold the same entry point.

use std::fmt;
use std::sync::Arc;

use crate::config::EntryPointConfig;
use crate::error::HalError;
use crate::link::{Link, LinkDescriptor};
use crate::transport::{ReqwestTransport, Transport};

/// The root context of a hypermedia API.
pub struct EntryPoint {
    root_href: String,
    transport: Arc<dyn Transport>,
}

impl EntryPoint {
    /// Creates an entry point for the given API root URL with the bundled
    /// reqwest transport and default configuration.
    pub fn new(base_url: &str) -> Result<Arc<Self>, HalError> {
        Self::with_config(EntryPointConfig::new(base_url)?)
    }

    /// Creates an entry point from an explicit configuration.
    pub fn with_config(config: EntryPointConfig) -> Result<Arc<Self>, HalError> {
        let root_href = config.base_url.to_string();
        let transport = ReqwestTransport::new(config)?;
        Ok(Arc::new(Self {
            root_href,
            transport: Arc::new(transport),
        }))
    }

    /// Creates an entry point over a custom transport.
    ///
    /// This is the seam for stubbing HTTP in tests or plugging in an
    /// instrumented client.
    pub fn with_transport(root_url: impl Into<String>, transport: Arc<dyn Transport>) -> Arc<Self> {
        Arc::new(Self {
            root_href: root_url.into(),
            transport,
        })
    }

    /// The transport used by every Link derived from this entry point.
    pub fn transport(&self) -> Arc<dyn Transport> {
        self.transport.clone()
    }

    /// Returns a non-templated Link to the API root, the starting point of
    /// a traversal.
    pub fn root(self: &Arc<Self>) -> Link {
        Link::new(
            LinkDescriptor {
                href: self.root_href.clone(),
                templated: false,
            },
            self.clone(),
        )
    }
}

impl fmt::Debug for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryPoint")
            .field("root_href", &self.root_href)
            .finish_non_exhaustive()
    }
}
