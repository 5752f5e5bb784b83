//! In-memory customer store and repository.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::domain::customer::{Customer, CustomerStats};
use crate::domain::foundation::{CustomerId, DomainError, IdSequence, MembershipTier};

/// Process-wide customer storage: one mutex, one id counter.
#[derive(Debug, Default)]
pub struct CustomerStore {
    inner: Mutex<CustomerStoreInner>,
}

#[derive(Debug, Default)]
struct CustomerStoreInner {
    customers: Vec<Customer>,
    ids: IdSequence,
}

impl CustomerStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Thread-safe CRUD and queries over a shared [`CustomerStore`].
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    store: Arc<CustomerStore>,
}

impl CustomerRepository {
    /// Creates a repository over the given shared store.
    pub fn new(store: Arc<CustomerStore>) -> Self {
        Self { store }
    }

    /// Returns the customer with the given id.
    pub fn get(&self, id: CustomerId) -> Result<Customer, DomainError> {
        let inner = self.lock();
        inner
            .customers
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(DomainError::CustomerNotFound(id))
    }

    /// Returns every customer in insertion order.
    pub fn get_all(&self) -> Vec<Customer> {
        self.lock().customers.clone()
    }

    /// Adds a customer, assigning a fresh id. Any caller-supplied id is
    /// ignored.
    pub fn add(&self, customer: Customer) -> Result<Customer, DomainError> {
        if customer.name.trim().is_empty() {
            return Err(DomainError::MissingArgument("name"));
        }
        customer.validate()?;

        let mut inner = self.lock();
        let mut customer = customer;
        customer.id = CustomerId::new(inner.ids.next_value());
        inner.customers.push(customer.clone());
        tracing::debug!(customer_id = customer.id.value(), "customer added");
        Ok(customer)
    }

    /// Replaces the stored customer with the same id.
    pub fn update(&self, customer: Customer) -> Result<Customer, DomainError> {
        if customer.name.trim().is_empty() {
            return Err(DomainError::MissingArgument("name"));
        }
        customer.validate()?;

        let mut inner = self.lock();
        match inner.customers.iter_mut().find(|c| c.id == customer.id) {
            Some(slot) => {
                *slot = customer.clone();
                Ok(customer)
            }
            None => Err(DomainError::CustomerNotFound(customer.id)),
        }
    }

    /// Removes the customer with the given id.
    pub fn remove(&self, id: CustomerId) -> Result<(), DomainError> {
        let mut inner = self.lock();
        let before = inner.customers.len();
        inner.customers.retain(|c| c.id != id);
        if inner.customers.len() == before {
            return Err(DomainError::CustomerNotFound(id));
        }
        tracing::debug!(customer_id = id.value(), "customer removed");
        Ok(())
    }

    /// Case-insensitive substring search on name or email, optionally
    /// narrowed to an exact membership tier. Results are ordered by name.
    pub fn search(&self, query: &str, membership: Option<MembershipTier>) -> Vec<Customer> {
        let needle = query.trim().to_lowercase();
        let mut results: Vec<Customer> = {
            let inner = self.lock();
            inner
                .customers
                .iter()
                .filter(|c| {
                    needle.is_empty()
                        || c.name.to_lowercase().contains(&needle)
                        || c.email
                            .as_ref()
                            .map_or(false, |e| e.to_lowercase().contains(&needle))
                })
                .filter(|c| membership.map_or(true, |tier| c.membership == tier))
                .cloned()
                .collect()
        };
        results.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        results
    }

    /// Computes customer-base statistics in one pass under the lock.
    pub fn stats(&self) -> CustomerStats {
        let inner = self.lock();
        let mut by_tier: BTreeMap<MembershipTier, usize> = MembershipTier::ALL
            .iter()
            .map(|tier| (*tier, 0))
            .collect();
        for customer in &inner.customers {
            *by_tier.entry(customer.membership).or_insert(0) += 1;
        }
        CustomerStats {
            total_customers: inner.customers.len(),
            by_tier,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CustomerStoreInner> {
        self.store
            .inner
            .lock()
            .expect("customer store lock poisoned")
    }
}
