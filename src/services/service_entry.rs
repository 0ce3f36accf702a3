//! Service entries of a client
//!
//! Services are addressed by their 0-based position in the client's stored
//! sequence. Positions are resolved against the current list on every call;
//! removing an entry shifts the later ones down by one.

use chrono::NaiveDate;
use tracing::info;

use super::client::ClientService;
use crate::audit::EntityType;
use crate::error::{SalonError, SalonResult};
use crate::models::{ClientId, Money, Service};
use crate::storage::Storage;

/// Input for adding or replacing a service
#[derive(Debug, Clone)]
pub struct NewService {
    pub service_type: String,
    pub date: NaiveDate,
    pub price: Money,
    pub notes: String,
}

impl NewService {
    fn into_service(self) -> SalonResult<Service> {
        let service = Service::new(self.service_type.trim(), self.date, self.price)
            .with_notes(self.notes.trim());
        service
            .validate()
            .map_err(|e| SalonError::Validation(e.to_string()))?;
        Ok(service)
    }
}

/// Audit id of the entry at `position`, numbered from 1
pub(crate) fn entry_id(client_id: ClientId, position: usize) -> String {
    format!("{}#{}", client_id, position + 1)
}

/// Service for a client's service history
pub struct ServiceEntryService<'a> {
    storage: &'a Storage,
}

impl<'a> ServiceEntryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Append a service; returns its position
    pub fn add(&self, client_id: ClientId, input: NewService) -> SalonResult<usize> {
        let service = input.into_service()?;
        let mut client = ClientService::new(self.storage).require(client_id)?;

        client.services.push(service.clone());
        let position = client.services.len() - 1;
        let name = client.name.clone();

        self.storage.clients.upsert(client)?;
        self.storage.clients.save()?;
        self.storage.log_create(
            EntityType::Service,
            entry_id(client_id, position),
            Some(name),
            &service,
        )?;

        info!(client_id = %client_id, position, service_type = %service.service_type, "Added service");
        Ok(position)
    }

    /// Replace the service at `position`
    pub fn update(
        &self,
        client_id: ClientId,
        position: usize,
        input: NewService,
    ) -> SalonResult<Service> {
        let service = input.into_service()?;
        let mut client = ClientService::new(self.storage).require(client_id)?;

        let slot = client
            .services
            .get_mut(position)
            .ok_or_else(|| SalonError::service_not_found(entry_id(client_id, position)))?;
        let before = std::mem::replace(slot, service.clone());
        let name = client.name.clone();

        self.storage.clients.upsert(client)?;
        self.storage.clients.save()?;
        self.storage.log_update(
            EntityType::Service,
            entry_id(client_id, position),
            Some(name),
            &before,
            &service,
        )?;

        info!(client_id = %client_id, position, "Updated service");
        Ok(service)
    }

    /// Remove the service at `position`
    pub fn remove(&self, client_id: ClientId, position: usize) -> SalonResult<Service> {
        let mut client = ClientService::new(self.storage).require(client_id)?;

        if position >= client.services.len() {
            return Err(SalonError::service_not_found(entry_id(client_id, position)));
        }
        let removed = client.services.remove(position);
        let name = client.name.clone();

        self.storage.clients.upsert(client)?;
        self.storage.clients.save()?;
        self.storage.log_delete(
            EntityType::Service,
            entry_id(client_id, position),
            Some(name),
            &removed,
        )?;

        info!(client_id = %client_id, position, "Removed service");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SalonPaths;
    use crate::services::client::NewClient;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage, ClientId) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SalonPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        let id = ClientService::new(&storage)
            .create(NewClient::new("Anna"))
            .unwrap()
            .id;
        (temp_dir, storage, id)
    }

    fn cut(day: u32, price: i64) -> NewService {
        NewService {
            service_type: "Cut".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            price: Money::from_units(price),
            notes: String::new(),
        }
    }

    fn prices(storage: &Storage, id: ClientId) -> Vec<i64> {
        storage
            .clients
            .get(id)
            .unwrap()
            .unwrap()
            .services
            .iter()
            .map(|s| s.price.units())
            .collect()
    }

    #[test]
    fn test_add_appends() {
        let (_temp, storage, id) = setup();
        let service = ServiceEntryService::new(&storage);

        assert_eq!(service.add(id, cut(1, 100)).unwrap(), 0);
        assert_eq!(service.add(id, cut(2, 50)).unwrap(), 1);
        assert_eq!(prices(&storage, id), vec![100, 50]);
    }

    #[test]
    fn test_validation() {
        let (_temp, storage, id) = setup();
        let service = ServiceEntryService::new(&storage);

        let mut input = cut(1, 100);
        input.service_type = "  ".into();
        assert!(service.add(id, input).unwrap_err().is_validation());

        let mut input = cut(1, 0);
        input.price = Money::from_units(-5);
        assert!(service.add(id, input).unwrap_err().is_validation());

        assert!(service.add(ClientId::from_raw(1), cut(1, 10)).unwrap_err().is_not_found());
    }

    #[test]
    fn test_update_by_position() {
        let (_temp, storage, id) = setup();
        let service = ServiceEntryService::new(&storage);
        service.add(id, cut(1, 100)).unwrap();
        service.add(id, cut(2, 50)).unwrap();

        service.update(id, 1, cut(2, 70)).unwrap();
        assert_eq!(prices(&storage, id), vec![100, 70]);

        let err = service.update(id, 2, cut(3, 10)).unwrap_err();
        assert_eq!(err.to_string(), format!("Service not found: {}#3", id));
    }

    #[test]
    fn test_remove_shifts_later_positions() {
        let (_temp, storage, id) = setup();
        let service = ServiceEntryService::new(&storage);
        for (day, price) in [(1, 10), (2, 20), (3, 30)] {
            service.add(id, cut(day, price)).unwrap();
        }

        let removed = service.remove(id, 0).unwrap();
        assert_eq!(removed.price, Money::from_units(10));
        assert_eq!(prices(&storage, id), vec![20, 30]);

        // position 2 no longer exists after the shift
        assert!(service.remove(id, 2).unwrap_err().is_not_found());
        service.remove(id, 1).unwrap();
        assert_eq!(prices(&storage, id), vec![20]);
    }
}
