//! Child-resource bookkeeping shared by clients and resource nodes.
//!
//! Both [`RestClient`](crate::RestClient) and [`Resource`] keep a [`Registry`]
//! of named children and delegate `register` to it. A name is bound to one
//! URL template forever: registering it again with the same template hands
//! back the existing node, a different template is a conflict.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::clients::HttpClient;
use crate::rest::resource::ResourceNode;
use crate::rest::{RegisterError, Resource};

/// Names that cannot be used for resources because they are node methods.
pub const RESERVED_NAMES: &[&str] = &["read", "create", "update", "remove", "register", "request"];

/// Returns `true` if `name` is one of [`RESERVED_NAMES`].
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES.contains(&name)
}

/// The named children of one node.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    children: RwLock<HashMap<String, Resource>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Looks up `name`, creating a child bound to `url_template` if absent.
    ///
    /// `parent` is `None` for children of the client itself.
    pub(crate) fn register(
        &self,
        owner: &Arc<HttpClient>,
        parent: Option<&Arc<ResourceNode>>,
        url_template: &str,
        name: &str,
    ) -> Result<Resource, RegisterError> {
        if name.is_empty() {
            return Err(RegisterError::EmptyName);
        }
        if name.contains('.') {
            return Err(RegisterError::DottedName {
                name: name.to_string(),
            });
        }
        if is_reserved(name) {
            return Err(RegisterError::ReservedName {
                name: name.to_string(),
            });
        }

        let mut children = self.children.write();

        if let Some(existing) = children.get(name) {
            if existing.url_template() != url_template {
                return Err(RegisterError::AlreadyRegistered {
                    name: name.to_string(),
                    existing: existing.url_template().to_string(),
                    requested: url_template.to_string(),
                });
            }
            tracing::debug!(
                "Resource {} already registered with {}",
                existing.qualified_name(),
                url_template
            );
            return Ok(existing.clone());
        }

        let qualified_name = parent.map_or_else(
            || name.to_string(),
            |parent| format!("{}.{name}", parent.qualified_name),
        );
        tracing::debug!("Registering resource {} at {}", qualified_name, url_template);

        let resource = Resource::from_node(ResourceNode {
            name: name.to_string(),
            qualified_name,
            url_template: url_template.to_string(),
            owner: Arc::clone(owner),
            parent: parent.map(Arc::downgrade).unwrap_or_else(Weak::new),
            children: Self::new(),
        });
        children.insert(name.to_string(), resource.clone());

        Ok(resource)
    }

    pub(crate) fn get(&self, name: &str) -> Option<Resource> {
        self.children.read().get(name).cloned()
    }

    /// Child names in sorted order.
    pub(crate) fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.children.read().keys().cloned().collect();
        names.sort();
        names
    }
}
