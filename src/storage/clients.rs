//! Client repository for JSON storage
//!
//! The whole client list lives in `clients.json` as one JSON array, in
//! insertion order. It is read completely on load and rewritten completely
//! on save.

use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::SalonError;
use crate::models::{Client, ClientId};

use super::file_io::{read_json, write_json_atomic};

/// Repository for client persistence
pub struct ClientRepository {
    path: PathBuf,
    data: RwLock<Vec<Client>>,
}

impl ClientRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Client>>, SalonError> {
        self.data
            .read()
            .map_err(|e| SalonError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Client>>, SalonError> {
        self.data
            .write()
            .map_err(|e| SalonError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load clients from disk; a missing file is an empty list
    pub fn load(&self) -> Result<(), SalonError> {
        let clients: Vec<Client> = read_json(&self.path)?;
        tracing::debug!(count = clients.len(), path = %self.path.display(), "Loaded clients");
        *self.write()? = clients;
        Ok(())
    }

    /// Save clients to disk
    pub fn save(&self) -> Result<(), SalonError> {
        let data = self.read()?;
        write_json_atomic(&self.path, &*data)
    }

    /// Get a client by id
    pub fn get(&self, id: ClientId) -> Result<Option<Client>, SalonError> {
        Ok(self.read()?.iter().find(|c| c.id == id).cloned())
    }

    /// Get all clients in stored order
    pub fn get_all(&self) -> Result<Vec<Client>, SalonError> {
        Ok(self.read()?.clone())
    }

    /// Get the first client with this name (case-insensitive, exact)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Client>, SalonError> {
        Ok(self.read()?.iter().find(|c| c.matches_name(name)).cloned())
    }

    /// All ids currently stored
    pub fn ids(&self) -> Result<Vec<ClientId>, SalonError> {
        Ok(self.read()?.iter().map(|c| c.id).collect())
    }

    /// Replace the client with the same id in place, or append it
    pub fn upsert(&self, client: Client) -> Result<(), SalonError> {
        let mut data = self.write()?;
        match data.iter_mut().find(|c| c.id == client.id) {
            Some(existing) => *existing = client,
            None => data.push(client),
        }
        Ok(())
    }

    /// Remove a client, returning it if it existed
    pub fn delete(&self, id: ClientId) -> Result<Option<Client>, SalonError> {
        let mut data = self.write()?;
        Ok(data
            .iter()
            .position(|c| c.id == id)
            .map(|index| data.remove(index)))
    }

    /// Replace the whole list
    pub fn replace_all(&self, clients: Vec<Client>) -> Result<(), SalonError> {
        *self.write()? = clients;
        Ok(())
    }

    pub fn count(&self) -> Result<usize, SalonError> {
        Ok(self.read()?.len())
    }
}
