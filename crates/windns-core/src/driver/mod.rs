//! Host-side lifecycle driver
//!
//! The provider only knows Create, Read and Delete. Deciding which of them to
//! call, and remembering the result, is the host's job. [`Driver`] is a small
//! host for the command line: it keeps resource data in a [`StateStore`] and
//! plans each apply the way a declarative host does.
//!
//! ## Apply Flow
//!
//! ```text
//!                       desired data
//!                            │
//!                 ┌──────────▼──────────┐
//!                 │  tracked in state?  │── no ──▶ Create
//!                 └──────────┬──────────┘
//!                            │ yes
//!                 ┌──────────▼──────────┐
//!                 │ force-new changed?  │── yes ─▶ Delete prior, Create desired
//!                 └──────────┬──────────┘
//!                            │ no
//!                 ┌──────────▼──────────┐
//!                 │  Read: still there? │── no ──▶ Create
//!                 └──────────┬──────────┘
//!                            │ yes
//!                        Unchanged
//! ```

use crate::error::{Error, Result};
use crate::resource::{ResourceData, WinDnsClient};
use crate::schema;
use crate::traits::StateStore;
use tracing::{info, warn};

/// What an apply did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Resource was not tracked and has been created
    Created {
        /// New resource id
        id: String,
    },

    /// A force-new field changed; the old record was deleted and the new one created
    Replaced {
        /// New resource id
        id: String,
        /// Fields that forced the replacement
        fields: Vec<&'static str>,
    },

    /// Resource was tracked but gone from the server; it has been created again
    Recreated {
        /// New resource id
        id: String,
    },

    /// Resource is tracked and still present
    Unchanged {
        /// Current resource id
        id: String,
    },
}

impl ApplyOutcome {
    /// The resource id after the apply
    pub fn id(&self) -> &str {
        match self {
            ApplyOutcome::Created { id }
            | ApplyOutcome::Replaced { id, .. }
            | ApplyOutcome::Recreated { id }
            | ApplyOutcome::Unchanged { id } => id,
        }
    }
}

/// State-backed host for `windns` resources
pub struct Driver {
    client: WinDnsClient,
    store: Box<dyn StateStore>,
}

impl Driver {
    /// Create a driver
    pub fn new(client: WinDnsClient, store: Box<dyn StateStore>) -> Self {
        Self { client, store }
    }

    /// The provider client used for lifecycle calls
    pub fn client(&self) -> &WinDnsClient {
        &self.client
    }

    /// Bring the resource at `address` in line with `desired`
    pub async fn apply(&self, address: &str, desired: &ResourceData) -> Result<ApplyOutcome> {
        schema::validate_required(desired)?;

        let Some(prior) = self.store.get_resource(address).await? else {
            let id = self.create(address, desired).await?;
            return Ok(ApplyOutcome::Created { id });
        };

        let fields = schema::replacement_fields(&prior.data, desired);
        if !fields.is_empty() {
            info!(address, fields = ?fields, "Replacing resource");

            let mut old = prior.data;
            self.client.delete_record(&mut old).await?;
            self.store.delete_resource(address).await?;

            let id = self.create(address, desired).await?;
            return Ok(ApplyOutcome::Replaced { id, fields });
        }

        let mut current = prior.data;
        self.client.read_record(&mut current).await?;

        match current.id() {
            Some(id) => {
                let id = id.to_string();
                self.store.set_resource(address, &current).await?;
                self.store.flush().await?;
                Ok(ApplyOutcome::Unchanged { id })
            }
            None => {
                warn!(address, "Record disappeared from the server, creating it again");
                let id = self.create(address, desired).await?;
                Ok(ApplyOutcome::Recreated { id })
            }
        }
    }

    /// Re-read a tracked resource and store the result.
    ///
    /// Returns the refreshed data, or `None` if the record is gone (it is
    /// then dropped from state).
    pub async fn refresh(&self, address: &str) -> Result<Option<ResourceData>> {
        let prior = self.tracked(address).await?;

        let mut current = prior.data;
        self.client.read_record(&mut current).await?;

        if current.id().is_some() {
            self.store.set_resource(address, &current).await?;
            self.store.flush().await?;
            Ok(Some(current))
        } else {
            info!(address, "Resource no longer exists, removing from state");
            self.store.delete_resource(address).await?;
            self.store.flush().await?;
            Ok(None)
        }
    }

    /// Delete a tracked resource and forget it
    pub async fn destroy(&self, address: &str) -> Result<()> {
        let prior = self.tracked(address).await?;

        let mut data = prior.data;
        self.client.delete_record(&mut data).await?;
        self.store.delete_resource(address).await?;
        self.store.flush().await?;
        Ok(())
    }

    /// List the addresses of all tracked resources
    pub async fn list(&self) -> Result<Vec<String>> {
        let mut addresses = self.store.list_resources().await?;
        addresses.sort();
        Ok(addresses)
    }

    async fn create(&self, address: &str, desired: &ResourceData) -> Result<String> {
        let mut data = desired.clone();
        data.clear_id();
        self.client.create_record(&mut data).await?;

        let id = data.id().map(str::to_string).unwrap_or_default();
        self.store.set_resource(address, &data).await?;
        self.store.flush().await?;
        Ok(id)
    }

    async fn tracked(&self, address: &str) -> Result<crate::traits::StateRecord> {
        self.store
            .get_resource(address)
            .await?
            .ok_or_else(|| Error::state_store(format!("Resource '{}' is not tracked", address)))
    }
}
