// src/link.rs
//! Hypermedia links: lazy, chainable references to other resources.
//!
//! A [`Link`] is an immutable value built from a link descriptor and the
//! shared entry point. Nothing is validated at construction; templated-ness
//! and variable presence are checked only when the URL or the resource is
//! actually needed, so Links can be built speculatively from any document.
//!
//! Two derived values are memoized, write-once, never invalidated: the
//! expanded URL and the resolved [`Resource`]. Verb operations are never
//! memoized; each call spawns a fresh [`Deferred`] request.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::OnceCell as AsyncOnceCell;

use crate::deferred::Deferred;
use crate::entry_point::EntryPoint;
use crate::error::HalError;
use crate::resource::{HypermediaNode, Member, Resource};
use crate::transport::{Transport, TransportResponse};
use crate::uri_template;

/// The raw link descriptor as it appears in a document's `_links` section.
///
/// Only `href` and `templated` are read; other descriptor fields are
/// ignored. `templated` defaults to false when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDescriptor {
    pub href: String,
    #[serde(default)]
    pub templated: bool,
}

/// A single, possibly-templated, hypermedia reference.
///
/// Cloning a Link shares its memoization, so a Link handed out twice from
/// the same document resolves at most once. [`Link::expand`] deliberately
/// starts over with fresh caches.
#[derive(Clone)]
pub struct Link {
    descriptor: LinkDescriptor,
    entry_point: Arc<EntryPoint>,
    uri_variables: Option<HashMap<String, Value>>,
    resolved_url: Arc<OnceCell<String>>,
    resolved_resource: Arc<AsyncOnceCell<Resource>>,
}

impl Link {
    /// Creates a Link over a descriptor, with no URI variables.
    pub fn new(descriptor: LinkDescriptor, entry_point: Arc<EntryPoint>) -> Self {
        Self::with_variables(descriptor, entry_point, None)
    }

    /// Creates a Link with an optional variable map for template expansion.
    pub fn with_variables(
        descriptor: LinkDescriptor,
        entry_point: Arc<EntryPoint>,
        uri_variables: Option<HashMap<String, Value>>,
    ) -> Self {
        Self {
            descriptor,
            entry_point,
            uri_variables,
            resolved_url: Arc::new(OnceCell::new()),
            resolved_resource: Arc::new(AsyncOnceCell::new()),
        }
    }

    /// Whether the href is a URI template rather than a plain URI.
    pub fn templated(&self) -> bool {
        self.descriptor.templated
    }

    /// The raw descriptor this Link was built from.
    pub fn descriptor(&self) -> &LinkDescriptor {
        &self.descriptor
    }

    /// Returns a new Link over the same descriptor and entry point with the
    /// given variables. The receiver is untouched, so one templated Link
    /// definition can be expanded many times with different variables.
    ///
    /// Variable completeness is not validated here; the expansion engine
    /// decides what a missing variable means.
    pub fn expand(&self, uri_variables: HashMap<String, Value>) -> Link {
        Link::with_variables(
            self.descriptor.clone(),
            self.entry_point.clone(),
            Some(uri_variables),
        )
    }

    /// The resolved URL of this Link.
    ///
    /// A non-templated Link returns its literal href; the template engine is
    /// never consulted. A templated Link without variables fails with
    /// [`HalError::MissingUriTemplateVariables`] before any network or
    /// expansion work; with variables, the expansion is computed once and
    /// memoized.
    pub fn url(&self) -> Result<String, HalError> {
        if !self.templated() {
            return Ok(self.descriptor.href.clone());
        }
        let variables = self
            .uri_variables
            .as_ref()
            .ok_or(HalError::MissingUriTemplateVariables)?;
        let expanded = self
            .resolved_url
            .get_or_init(|| uri_template::expand(&self.descriptor.href, variables));
        Ok(expanded.clone())
    }

    /// The Resource this Link points to, fetched with a GET on first use and
    /// memoized. There is no invalidation path; repeated calls and member
    /// forwarding reuse the same Resource without re-fetching.
    pub async fn resource(&self) -> Result<Resource, HalError> {
        let resource = self
            .resolved_resource
            .get_or_try_init(|| async {
                let response = self.get().value().await?;
                Resource::from_body(&response.body, self.entry_point.clone())
            })
            .await?;
        Ok(resource.clone())
    }

    fn transport(&self) -> Arc<dyn Transport> {
        self.entry_point.transport()
    }

    /// Issues a GET against the resolved URL.
    ///
    /// Like every verb operation, this spawns the request immediately and
    /// can be awaited later; a missing-variables failure surfaces when the
    /// deferred result is forced, without a network attempt.
    pub fn get(&self) -> Deferred<TransportResponse> {
        let link = self.clone();
        Deferred::spawn(async move { link.transport().get(&link.url()?).await })
    }

    /// Issues an OPTIONS against the resolved URL.
    ///
    /// OPTIONS has no transport convenience method; it goes through the
    /// generic verb dispatch with no body and no headers.
    pub fn options(&self) -> Deferred<TransportResponse> {
        let link = self.clone();
        Deferred::spawn(async move {
            link.transport()
                .run_request(Method::OPTIONS, &link.url()?, None, None)
                .await
        })
    }

    /// Issues a HEAD against the resolved URL.
    pub fn head(&self) -> Deferred<TransportResponse> {
        let link = self.clone();
        Deferred::spawn(async move { link.transport().head(&link.url()?).await })
    }

    /// Issues a DELETE against the resolved URL.
    pub fn delete(&self) -> Deferred<TransportResponse> {
        let link = self.clone();
        Deferred::spawn(async move { link.transport().delete(&link.url()?).await })
    }

    /// Issues a POST with `params` as the JSON body.
    pub fn post(&self, params: Value) -> Deferred<TransportResponse> {
        let link = self.clone();
        Deferred::spawn(async move { link.transport().post(&link.url()?, params).await })
    }

    /// Issues a PUT with `params` as the JSON body.
    pub fn put(&self, params: Value) -> Deferred<TransportResponse> {
        let link = self.clone();
        Deferred::spawn(async move { link.transport().put(&link.url()?, params).await })
    }

    /// Issues a PATCH with `params` as the JSON body.
    pub fn patch(&self, params: Value) -> Deferred<TransportResponse> {
        let link = self.clone();
        Deferred::spawn(async move { link.transport().patch(&link.url()?, params).await })
    }
}

/// Member access on a Link resolves it and asks the Resource, so a Link and
/// its target give identical answers.
#[async_trait::async_trait]
impl HypermediaNode for Link {
    async fn member(&self, name: &str) -> Result<Option<Member>, HalError> {
        Ok(self.resource().await?.lookup(name))
    }
}

/// Diagnostic only: names the concrete type and the raw descriptor.
impl fmt::Debug for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Link")
            .field("href", &self.descriptor.href)
            .field("templated", &self.descriptor.templated)
            .field(
                "uri_variables",
                &match &self.uri_variables {
                    Some(vars) => Cow::Owned(format!("{} set", vars.len())),
                    None => Cow::Borrowed("none"),
                },
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn entry_point() -> Arc<EntryPoint> {
        EntryPoint::new("https://api.example.org/").unwrap()
    }

    fn descriptor(href: &str, templated: bool) -> LinkDescriptor {
        LinkDescriptor {
            href: href.to_string(),
            templated,
        }
    }

    fn variables(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn descriptor_deserializes_with_defaults() {
        let parsed: LinkDescriptor =
            serde_json::from_value(json!({ "href": "/posts", "title": "ignored" })).unwrap();
        assert_eq!(parsed, descriptor("/posts", false));

        let parsed: LinkDescriptor =
            serde_json::from_value(json!({ "href": "/posts/{id}", "templated": true })).unwrap();
        assert!(parsed.templated);
    }

    #[test]
    fn templated_reflects_the_descriptor() {
        let entry = entry_point();
        assert!(!Link::new(descriptor("/posts", false), entry.clone()).templated());
        assert!(Link::new(descriptor("/posts/{id}", true), entry).templated());
    }

    #[test]
    fn plain_link_url_is_the_literal_href() {
        // Even with variables supplied: templated=false never expands.
        let link = Link::with_variables(
            descriptor("/posts/{id}", false),
            entry_point(),
            Some(variables(&[("id", json!(5))])),
        );
        assert_eq!(link.url().unwrap(), "/posts/{id}");
    }

    #[test]
    fn templated_link_without_variables_fails() {
        let link = Link::new(descriptor("/posts/{id}", true), entry_point());
        assert!(matches!(
            link.url(),
            Err(HalError::MissingUriTemplateVariables)
        ));
        // Failing once does not poison anything; it fails the same way again.
        assert!(link.url().is_err());
    }

    #[test]
    fn templated_link_with_variables_expands() {
        let link = Link::new(descriptor("/posts/{id}", true), entry_point())
            .expand(variables(&[("id", json!(5))]));
        assert_eq!(link.url().unwrap(), "/posts/5");
        assert_eq!(link.url().unwrap(), "/posts/5");
    }

    #[test]
    fn expand_does_not_mutate_the_receiver() {
        let original = Link::new(descriptor("/posts/{id}", true), entry_point());
        let expanded = original.expand(variables(&[("id", json!(7))]));

        assert_eq!(expanded.url().unwrap(), "/posts/7");
        assert!(matches!(
            original.url(),
            Err(HalError::MissingUriTemplateVariables)
        ));

        // One definition, many concrete expansions.
        let other = original.expand(variables(&[("id", json!(8))]));
        assert_eq!(other.url().unwrap(), "/posts/8");
        assert_eq!(expanded.url().unwrap(), "/posts/7");
    }

    #[test]
    fn debug_names_the_type_and_descriptor() {
        let link = Link::new(descriptor("/posts/{id}", true), entry_point());
        let rendered = format!("{:?}", link);
        assert!(rendered.starts_with("Link"));
        assert!(rendered.contains("/posts/{id}"));
        assert!(rendered.contains("templated: true"));
    }
}
