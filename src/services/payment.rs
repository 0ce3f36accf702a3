//! Payments of a client
//!
//! Same positional addressing as services: 0-based, resolved against the
//! current list, later entries shift down on removal.

use chrono::NaiveDate;
use tracing::info;

use super::client::ClientService;
use super::service_entry::entry_id;
use crate::audit::EntityType;
use crate::error::{SalonError, SalonResult};
use crate::models::{ClientId, Money, Payment};
use crate::storage::Storage;

/// Input for recording or replacing a payment
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub amount: Money,
    pub date: NaiveDate,
    pub method: String,
}

impl NewPayment {
    fn into_payment(self) -> SalonResult<Payment> {
        let payment = Payment::new(self.amount, self.date, self.method.trim());
        payment
            .validate()
            .map_err(|e| SalonError::Validation(e.to_string()))?;
        Ok(payment)
    }
}

/// Service for a client's payments
pub struct PaymentService<'a> {
    storage: &'a Storage,
}

impl<'a> PaymentService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a payment; returns its position
    pub fn add(&self, client_id: ClientId, input: NewPayment) -> SalonResult<usize> {
        let payment = input.into_payment()?;
        let mut client = ClientService::new(self.storage).require(client_id)?;

        client.payments.push(payment.clone());
        let position = client.payments.len() - 1;
        let name = client.name.clone();

        self.storage.clients.upsert(client)?;
        self.storage.clients.save()?;
        self.storage.log_create(
            EntityType::Payment,
            entry_id(client_id, position),
            Some(name),
            &payment,
        )?;

        info!(client_id = %client_id, position, amount = %payment.amount, "Recorded payment");
        Ok(position)
    }

    /// Replace the payment at `position`
    pub fn update(
        &self,
        client_id: ClientId,
        position: usize,
        input: NewPayment,
    ) -> SalonResult<Payment> {
        let payment = input.into_payment()?;
        let mut client = ClientService::new(self.storage).require(client_id)?;

        let slot = client
            .payments
            .get_mut(position)
            .ok_or_else(|| SalonError::payment_not_found(entry_id(client_id, position)))?;
        let before = std::mem::replace(slot, payment.clone());
        let name = client.name.clone();

        self.storage.clients.upsert(client)?;
        self.storage.clients.save()?;
        self.storage.log_update(
            EntityType::Payment,
            entry_id(client_id, position),
            Some(name),
            &before,
            &payment,
        )?;

        info!(client_id = %client_id, position, "Updated payment");
        Ok(payment)
    }

    /// Remove the payment at `position`
    pub fn remove(&self, client_id: ClientId, position: usize) -> SalonResult<Payment> {
        let mut client = ClientService::new(self.storage).require(client_id)?;

        if position >= client.payments.len() {
            return Err(SalonError::payment_not_found(entry_id(client_id, position)));
        }
        let removed = client.payments.remove(position);
        let name = client.name.clone();

        self.storage.clients.upsert(client)?;
        self.storage.clients.save()?;
        self.storage.log_delete(
            EntityType::Payment,
            entry_id(client_id, position),
            Some(name),
            &removed,
        )?;

        info!(client_id = %client_id, position, "Removed payment");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounting::compute_client_financials;
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

    fn cash(amount: i64) -> NewPayment {
        NewPayment {
            amount: Money::from_units(amount),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            method: "cash".into(),
        }
    }

    #[test]
    fn test_payments_reduce_due() {
        let (_temp, storage, id) = setup();
        let payments = PaymentService::new(&storage);

        let mut client = storage.clients.get(id).unwrap().unwrap();
        client.services.push(crate::models::Service::new(
            "Color",
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            Money::from_units(200),
        ));
        storage.clients.upsert(client).unwrap();

        payments.add(id, cash(150)).unwrap();
        let client = storage.clients.get(id).unwrap().unwrap();
        assert_eq!(compute_client_financials(&client).due, Money::from_units(50));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let (_temp, storage, id) = setup();
        let err = PaymentService::new(&storage).add(id, cash(-1)).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_update_and_remove() {
        let (_temp, storage, id) = setup();
        let payments = PaymentService::new(&storage);
        payments.add(id, cash(10)).unwrap();
        payments.add(id, cash(20)).unwrap();

        payments.update(id, 0, cash(15)).unwrap();
        payments.remove(id, 1).unwrap();

        let client = storage.clients.get(id).unwrap().unwrap();
        let amounts: Vec<i64> = client.payments.iter().map(|p| p.amount.units()).collect();
        assert_eq!(amounts, vec![15]);

        assert!(payments.remove(id, 1).unwrap_err().is_not_found());
        assert!(payments.update(id, 5, cash(1)).unwrap_err().is_not_found());
    }
}
