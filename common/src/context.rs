//! Request context and the per-context client registry.
//!
//! A [`RequestContext`] carries the caller's credentials and service catalog
//! and owns one client per plugin. Clients are created on first access
//! through [`RequestContext::client`] and live as long as the context.

use crate::{
    error::{PlatformError, PlatformResult},
    plugin::ClientPlugin,
};
use secrecy::{ExposeSecret, SecretString};
use std::{any::Any, collections::HashMap, fmt, str::FromStr, sync::Arc};
use tokio::sync::RwLock;
use tracing::debug;

/// Caller credentials attached to a request.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Keystone token, never printed
    pub auth_token: SecretString,
    /// Project (tenant) the request is scoped to
    pub project_id: String,
    /// Requesting user
    pub user_id: String,
    /// Region used for endpoint selection
    pub region_name: Option<String>,
    /// Identity service URL
    pub auth_url: Option<String>,
}

impl AuthContext {
    /// Create credentials for a project-scoped token.
    #[must_use]
    pub fn new(
        auth_token: impl Into<String>,
        project_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            auth_token: SecretString::from(auth_token.into()),
            project_id: project_id.into(),
            user_id: user_id.into(),
            region_name: None,
            auth_url: None,
        }
    }

    /// Set the region name.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region_name = Some(region.into());
        self
    }

    /// Set the identity service URL.
    #[must_use]
    pub fn with_auth_url(mut self, auth_url: impl Into<String>) -> Self {
        self.auth_url = Some(auth_url.into());
        self
    }

    /// Expose the token for use in a request header.
    #[must_use]
    pub fn token(&self) -> &str {
        self.auth_token.expose_secret()
    }
}

type Entry = Box<dyn Any + Send + Sync>;

/// Clients owned by a single request context, keyed by plugin name.
#[derive(Default)]
pub struct ClientRegistry {
    entries: RwLock<HashMap<&'static str, Entry>>,
}

impl fmt::Debug for ClientRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&'static str> = self
            .entries
            .try_read()
            .map(|entries| entries.keys().copied().collect())
            .unwrap_or_default();
        f.debug_struct("ClientRegistry").field("clients", &names).finish()
    }
}

impl ClientRegistry {
    /// Look up the client registered for plugin `P`.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Internal`] if the entry under `P::NAME` holds
    /// a different client type.
    pub async fn get<P: ClientPlugin>(&self) -> PlatformResult<Option<Arc<P::Client>>> {
        let entries = self.entries.read().await;
        entries.get(P::NAME).map(downcast::<P>).transpose()
    }

    /// Register `client` for plugin `P`, replacing any existing entry.
    pub async fn install<P: ClientPlugin>(&self, client: Arc<P::Client>) {
        debug!(plugin = P::NAME, "Installing client");
        self.entries.write().await.insert(P::NAME, Box::new(client));
    }

    /// Register `client` unless another task got there first, and return the
    /// entry that ends up registered.
    async fn get_or_insert<P: ClientPlugin>(
        &self,
        client: Arc<P::Client>,
    ) -> PlatformResult<Arc<P::Client>> {
        let mut entries = self.entries.write().await;
        let entry = entries.entry(P::NAME).or_insert_with(|| Box::new(client));
        downcast::<P>(entry)
    }

    /// Whether a client is registered under `name`.
    pub async fn contains(&self, name: &str) -> bool {
        self.entries.read().await.contains_key(name)
    }

    /// Number of registered clients.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether no client has been created yet.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

fn downcast<P: ClientPlugin>(entry: &Entry) -> PlatformResult<Arc<P::Client>> {
    entry
        .downcast_ref::<Arc<P::Client>>()
        .cloned()
        .ok_or_else(|| {
            PlatformError::internal(format!(
                "client registered under '{}' has an unexpected type",
                P::NAME
            ))
        })
}

/// Catalog endpoint interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Interface {
    /// Endpoint reachable by tenants
    #[default]
    Public,
    /// Endpoint on the internal network
    Internal,
    /// Operator endpoint
    Admin,
}

impl Interface {
    /// Catalog name of the interface.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Internal => "internal",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interface {
    type Err = PlatformError;

    /// Accepts both `public` and the legacy `publicURL` spellings.
    fn from_str(s: &str) -> PlatformResult<Self> {
        match s.strip_suffix("URL").unwrap_or(s) {
            "public" => Ok(Self::Public),
            "internal" => Ok(Self::Internal),
            "admin" => Ok(Self::Admin),
            _ => Err(PlatformError::invalid_input(format!(
                "unknown endpoint interface '{s}'"
            ))),
        }
    }
}

/// Per-request state handed to client plugins and constraints.
#[derive(Debug)]
pub struct RequestContext {
    auth: AuthContext,
    catalog: HashMap<(String, Interface), String>,
    clients: ClientRegistry,
}

impl RequestContext {
    /// Create a context with an empty service catalog.
    #[must_use]
    pub fn new(auth: AuthContext) -> Self {
        Self {
            auth,
            catalog: HashMap::new(),
            clients: ClientRegistry::default(),
        }
    }

    /// Add a public service catalog entry.
    #[must_use]
    pub fn with_endpoint(self, service_type: impl Into<String>, url: impl Into<String>) -> Self {
        self.with_interface_endpoint(service_type, Interface::Public, url)
    }

    /// Add a service catalog entry for a specific interface.
    #[must_use]
    pub fn with_interface_endpoint(
        mut self,
        service_type: impl Into<String>,
        interface: Interface,
        url: impl Into<String>,
    ) -> Self {
        self.catalog.insert((service_type.into(), interface), url.into());
        self
    }

    /// Caller credentials.
    #[must_use]
    pub const fn auth(&self) -> &AuthContext {
        &self.auth
    }

    /// Resolve the public endpoint URL for a service type.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NotFound`] when the catalog has no entry.
    pub fn url_for(&self, service_type: &str) -> PlatformResult<&str> {
        self.url_for_interface(service_type, Interface::Public)
    }

    /// Resolve the endpoint URL for a service type on `interface`.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NotFound`] when the catalog has no entry.
    pub fn url_for_interface(&self, service_type: &str, interface: Interface) -> PlatformResult<&str> {
        self.catalog
            .get(&(service_type.to_string(), interface))
            .map(String::as_str)
            .ok_or_else(|| {
                PlatformError::NotFound(format!(
                    "{interface} endpoint for service type '{service_type}'"
                ))
            })
    }

    /// Clients created for this context so far.
    #[must_use]
    pub const fn clients(&self) -> &ClientRegistry {
        &self.clients
    }

    /// Get the client for `plugin`, creating it on first use.
    ///
    /// # Errors
    ///
    /// Propagates the plugin's construction error unchanged.
    pub async fn client<P: ClientPlugin>(&self, plugin: &P) -> Result<Arc<P::Client>, P::Error> {
        if let Some(client) = self.clients.get::<P>().await? {
            return Ok(client);
        }

        debug!(plugin = P::NAME, "Creating client for context");
        let created = plugin.create(self).await?;
        Ok(self.clients.get_or_insert::<P>(created).await?)
    }
}
