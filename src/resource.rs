// src/resource.rs
//! Parsed hypermedia documents.
//!
//! A [`Resource`] is the parsed representation of a fetched document: its
//! plain attributes, its `_links` (materialized as [`Link`]s bound to the
//! same entry point), and its `_embedded` resources. The [`HypermediaNode`]
//! trait is the polymorphic seam that lets a Link be treated as if it were
//! the Resource it points to: both sides answer the same member and
//! capability-probe questions, and resolving a Link to answer them is the
//! Link implementation's business.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::entry_point::EntryPoint;
use crate::error::HalError;
use crate::link::{Link, LinkDescriptor};

const LINKS_KEY: &str = "_links";
const EMBEDDED_KEY: &str = "_embedded";

/// A named member of a hypermedia node.
#[derive(Debug, Clone)]
pub enum Member {
    /// A plain document attribute.
    Value(Value),
    /// A link relation, resolvable to another resource.
    Link(Link),
    /// A resource embedded inline in the document.
    Resource(Resource),
}

impl Member {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Member::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_link(&self) -> Option<&Link> {
        match self {
            Member::Link(link) => Some(link),
            _ => None,
        }
    }

    pub fn as_resource(&self) -> Option<&Resource> {
        match self {
            Member::Resource(resource) => Some(resource),
            _ => None,
        }
    }
}

/// Uniform member access over Links and Resources.
///
/// Asking a Link for a member resolves it (fetching over the network if not
/// already memoized) and forwards the question to the resolved Resource, so
/// generic traversal code sees the same answers either way. A missing member
/// is `Ok(None)` from both implementations.
#[async_trait]
pub trait HypermediaNode {
    /// Looks up a named member.
    async fn member(&self, name: &str) -> Result<Option<Member>, HalError>;

    /// Capability probe: does this node expose `name`?
    async fn has(&self, name: &str) -> Result<bool, HalError> {
        Ok(self.member(name).await?.is_some())
    }
}

/// The parsed representation of a fetched hypermedia document.
#[derive(Debug, Clone)]
pub struct Resource {
    attributes: Map<String, Value>,
    links: HashMap<String, Vec<Link>>,
    embedded: HashMap<String, Vec<Resource>>,
    raw: Value,
}

impl Resource {
    /// Parses a raw response body into a Resource bound to `entry_point`.
    pub fn from_body(body: &str, entry_point: Arc<EntryPoint>) -> Result<Self, HalError> {
        let raw: Value = serde_json::from_str(body)?;
        Self::from_value(raw, entry_point)
    }

    /// Builds a Resource from an already-parsed JSON document.
    pub fn from_value(raw: Value, entry_point: Arc<EntryPoint>) -> Result<Self, HalError> {
        let object = raw.as_object().cloned().ok_or_else(|| {
            HalError::MalformedResource("expected a JSON object document".to_string())
        })?;

        let links = parse_links(object.get(LINKS_KEY), &entry_point);
        let embedded = parse_embedded(object.get(EMBEDDED_KEY), &entry_point);
        let attributes = object
            .into_iter()
            .filter(|(key, _)| key != LINKS_KEY && key != EMBEDDED_KEY)
            .collect();

        Ok(Self {
            attributes,
            links,
            embedded,
            raw,
        })
    }

    /// The first Link for a relation, if present.
    pub fn link(&self, rel: &str) -> Option<&Link> {
        self.links.get(rel).and_then(|links| links.first())
    }

    /// All Links for a relation. Empty when the relation is absent.
    pub fn links(&self, rel: &str) -> &[Link] {
        self.links.get(rel).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The first embedded resource for a relation, if present.
    pub fn embedded(&self, rel: &str) -> Option<&Resource> {
        self.embedded.get(rel).and_then(|resources| resources.first())
    }

    /// All embedded resources for a relation. Empty when absent.
    pub fn embedded_all(&self, rel: &str) -> &[Resource] {
        self.embedded.get(rel).map(Vec::as_slice).unwrap_or(&[])
    }

    /// A plain document attribute.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// The full document as parsed, reserved sections included.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Synchronous member lookup: attributes first, then links, then
    /// embedded resources.
    pub(crate) fn lookup(&self, name: &str) -> Option<Member> {
        if let Some(value) = self.attributes.get(name) {
            return Some(Member::Value(value.clone()));
        }
        if let Some(link) = self.link(name) {
            return Some(Member::Link(link.clone()));
        }
        self.embedded(name)
            .map(|resource| Member::Resource(resource.clone()))
    }
}

#[async_trait]
impl HypermediaNode for Resource {
    async fn member(&self, name: &str) -> Result<Option<Member>, HalError> {
        Ok(self.lookup(name))
    }
}

/// Materializes the `_links` section. Each relation maps to one descriptor
/// or an array of them; descriptors without an href are skipped.
fn parse_links(section: Option<&Value>, entry_point: &Arc<EntryPoint>) -> HashMap<String, Vec<Link>> {
    collect_section(section, |value| {
        match serde_json::from_value::<LinkDescriptor>(value.clone()) {
            Ok(descriptor) => Some(Link::new(descriptor, entry_point.clone())),
            Err(err) => {
                log::debug!("skipping malformed link descriptor: {}", err);
                None
            }
        }
    })
}

fn parse_embedded(
    section: Option<&Value>,
    entry_point: &Arc<EntryPoint>,
) -> HashMap<String, Vec<Resource>> {
    collect_section(section, |value| {
        match Resource::from_value(value.clone(), entry_point.clone()) {
            Ok(resource) => Some(resource),
            Err(err) => {
                log::debug!("skipping malformed embedded resource: {}", err);
                None
            }
        }
    })
}

/// Walks a reserved section, accepting a single object or an array per
/// relation.
fn collect_section<T>(
    section: Option<&Value>,
    mut materialize: impl FnMut(&Value) -> Option<T>,
) -> HashMap<String, Vec<T>> {
    let mut out = HashMap::new();
    let Some(Value::Object(section)) = section else {
        return out;
    };

    for (rel, entry) in section {
        let items: Vec<T> = match entry {
            Value::Array(values) => values.iter().filter_map(&mut materialize).collect(),
            single => materialize(single).into_iter().collect(),
        };
        if !items.is_empty() {
            out.insert(rel.clone(), items);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn entry_point() -> Arc<EntryPoint> {
        EntryPoint::new("https://api.example.org/").unwrap()
    }

    fn post_document() -> String {
        json!({
            "title": "Exploring hypermedia",
            "published": true,
            "_links": {
                "self": { "href": "/posts/1" },
                "author": { "href": "/authors/{id}", "templated": true },
                "tags": [
                    { "href": "/tags/rust" },
                    { "href": "/tags/http" }
                ],
                "broken": { "title": "no href here" }
            },
            "_embedded": {
                "comments": [
                    { "body": "first!", "_links": { "self": { "href": "/comments/9" } } }
                ]
            }
        })
        .to_string()
    }

    #[test]
    fn splits_attributes_links_and_embedded() {
        let resource = Resource::from_body(&post_document(), entry_point()).unwrap();

        assert_eq!(
            resource.attribute("title"),
            Some(&json!("Exploring hypermedia"))
        );
        assert!(resource.attribute("_links").is_none());

        let author = resource.link("author").unwrap();
        assert!(author.templated());

        assert_eq!(resource.links("tags").len(), 2);
        assert_eq!(resource.links("tags")[0].url().unwrap(), "/tags/rust");

        let comment = resource.embedded("comments").unwrap();
        assert_eq!(comment.attribute("body"), Some(&json!("first!")));
        assert_eq!(comment.link("self").unwrap().url().unwrap(), "/comments/9");
    }

    #[test]
    fn malformed_link_descriptors_are_skipped() {
        let resource = Resource::from_body(&post_document(), entry_point()).unwrap();
        assert!(resource.link("broken").is_none());
    }

    #[test]
    fn non_object_bodies_are_rejected() {
        let result = Resource::from_body("[1, 2, 3]", entry_point());
        assert!(matches!(result, Err(HalError::MalformedResource(_))));
    }

    #[test]
    fn raw_preserves_the_whole_document() {
        let resource = Resource::from_body(&post_document(), entry_point()).unwrap();
        assert_eq!(resource.raw()["_links"]["self"]["href"], "/posts/1");
    }

    #[tokio::test]
    async fn member_lookup_order_is_attributes_links_embedded() {
        let resource = Resource::from_body(&post_document(), entry_point()).unwrap();

        let title = resource.member("title").await.unwrap().unwrap();
        assert_eq!(title.as_value(), Some(&json!("Exploring hypermedia")));

        let author = resource.member("author").await.unwrap().unwrap();
        assert!(author.as_link().is_some());

        let comments = resource.member("comments").await.unwrap().unwrap();
        assert!(comments.as_resource().is_some());

        assert!(resource.member("missing").await.unwrap().is_none());
        assert!(!resource.has("missing").await.unwrap());
        assert!(resource.has("published").await.unwrap());
    }
}
