//! Client service
//!
//! Business logic for client records: creation with the duplicate-name
//! check, lookups, contact edits and cascading deletion.

use tracing::{debug, info};

use crate::audit::EntityType;
use crate::error::{SalonError, SalonResult};
use crate::models::{Client, ClientId};
use crate::storage::Storage;

/// Input for a new client
#[derive(Debug, Clone, Default)]
pub struct NewClient {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub notes: String,
}

impl NewClient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Changes to a client's contact data
///
/// `name`, `phone` and `email` only replace the stored value when the new
/// value is non-empty. `notes` replaces whenever it is present, so it can be
/// cleared.
#[derive(Debug, Clone, Default)]
pub struct ClientUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
}

impl ClientUpdate {
    fn apply(&self, client: &mut Client) {
        fn replace_if_given(field: &mut String, value: &Option<String>) {
            if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                *field = v.to_string();
            }
        }

        replace_if_given(&mut client.name, &self.name);
        replace_if_given(&mut client.phone, &self.phone);
        replace_if_given(&mut client.email, &self.email);
        if let Some(notes) = &self.notes {
            client.notes = notes.trim().to_string();
        }
    }
}

/// Service for client management
pub struct ClientService<'a> {
    storage: &'a Storage,
}

impl<'a> ClientService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a client with empty service and payment history
    pub fn create(&self, input: NewClient) -> SalonResult<Client> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(SalonError::Validation("Client name cannot be empty".into()));
        }

        if self.storage.clients.get_by_name(name)?.is_some() {
            return Err(SalonError::Duplicate {
                entity_type: "Client",
                identifier: name.to_string(),
            });
        }

        let id = ClientId::generate(self.storage.clients.ids()?);
        let client = Client::new(id, name)
            .with_phone(input.phone.trim())
            .with_email(input.email.trim())
            .with_notes(input.notes.trim());

        client
            .validate()
            .map_err(|e| SalonError::Validation(e.to_string()))?;

        self.storage.clients.upsert(client.clone())?;
        self.storage.clients.save()?;

        self.storage.log_create(
            EntityType::Client,
            client.id.to_string(),
            Some(client.name.clone()),
            &client,
        )?;

        info!(client_id = %client.id, name = %client.name, "Created client");
        Ok(client)
    }

    /// Get a client by id
    pub fn get(&self, id: ClientId) -> SalonResult<Option<Client>> {
        self.storage.clients.get(id)
    }

    /// Get a client by id or fail with a not-found error
    pub fn require(&self, id: ClientId) -> SalonResult<Client> {
        self.get(id)?
            .ok_or_else(|| SalonError::client_not_found(id.to_string()))
    }

    /// Find a client by numeric id or by name (case-insensitive, exact)
    pub fn find(&self, identifier: &str) -> SalonResult<Option<Client>> {
        if let Ok(id) = identifier.parse::<ClientId>() {
            if let Some(client) = self.storage.clients.get(id)? {
                return Ok(Some(client));
            }
        }

        let found = self.storage.clients.get_by_name(identifier)?;
        debug!(identifier, found = found.is_some(), "Client lookup");
        Ok(found)
    }

    /// Like [`ClientService::find`] but fails when nothing matches
    pub fn resolve(&self, identifier: &str) -> SalonResult<Client> {
        self.find(identifier)?
            .ok_or_else(|| SalonError::client_not_found(identifier))
    }

    /// All clients in stored order
    pub fn list(&self) -> SalonResult<Vec<Client>> {
        self.storage.clients.get_all()
    }

    pub fn count(&self) -> SalonResult<usize> {
        self.storage.clients.count()
    }

    /// Edit contact data; renames are not checked for duplicates
    pub fn update(&self, id: ClientId, update: ClientUpdate) -> SalonResult<Client> {
        let mut client = self.require(id)?;
        let before = client.clone();

        update.apply(&mut client);

        self.storage.clients.upsert(client.clone())?;
        self.storage.clients.save()?;

        self.storage.log_update(
            EntityType::Client,
            client.id.to_string(),
            Some(client.name.clone()),
            &before,
            &client,
        )?;

        info!(client_id = %client.id, "Updated client");
        Ok(client)
    }

    /// Delete a client together with its services and payments
    pub fn delete(&self, id: ClientId) -> SalonResult<Client> {
        let client = self
            .storage
            .clients
            .delete(id)?
            .ok_or_else(|| SalonError::client_not_found(id.to_string()))?;

        self.storage.clients.save()?;

        self.storage.log_delete(
            EntityType::Client,
            client.id.to_string(),
            Some(client.name.clone()),
            &client,
        )?;

        info!(
            client_id = %client.id,
            services = client.services.len(),
            payments = client.payments.len(),
            "Deleted client"
        );
        Ok(client)
    }

    /// Replace every client, as done by import and restore
    ///
    /// Ids must be unique within `clients`.
    pub fn replace_all(&self, clients: Vec<Client>, source: &str) -> SalonResult<usize> {
        let mut seen = std::collections::HashSet::new();
        if let Some(dup) = clients.iter().find(|c| !seen.insert(c.id)) {
            tracing::warn!(client_id = %dup.id, source, "Duplicate client id");
            return Err(SalonError::Import(format!(
                "Duplicate client id {} ({})",
                dup.id, dup.name
            )));
        }

        let before = self.storage.clients.count()?;
        let after = clients.len();

        self.storage.clients.replace_all(clients)?;
        self.storage.clients.save()?;
        self.storage.log_replace(source, before, after)?;

        info!(source, before, after, "Replaced client list");
        Ok(after)
    }
}
