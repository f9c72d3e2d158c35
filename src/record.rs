use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::form::{ContactsPowerForm, EyeSidePrescription};

/// A submitted contact-lens power prescription.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrescriptionRecord {
    /// Generated when the record is first submitted
    pub id: Uuid,

    /// Customer the prescription belongs to
    pub customer: String,

    pub right: EyeSidePrescription,
    pub left: EyeSidePrescription,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PrescriptionRecord {
    /// Open the record for editing. Stored values are shown as saved;
    /// near sphere is not recomputed from distance.
    pub fn to_form(&self) -> ContactsPowerForm {
        ContactsPowerForm {
            right: self.right.clone(),
            left: self.left.clone(),
        }
    }
}

/// In-memory prescription list, keyed by record id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrescriptionStore {
    records: BTreeMap<Uuid, PrescriptionRecord>,
}

impl PrescriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a submitted form.
    ///
    /// With no `existing` id a new record is created. Otherwise the record is
    /// amended in place, keeping its id and creation time.
    pub fn submit(
        &mut self,
        customer: &str,
        form: &ContactsPowerForm,
        existing: Option<Uuid>,
    ) -> Result<&PrescriptionRecord> {
        let now = Utc::now();
        let id = match existing {
            Some(id) => {
                let record = self.records.get_mut(&id).ok_or(Error::NotFound(id))?;
                record.customer = customer.to_string();
                record.right = form.right.clone();
                record.left = form.left.clone();
                record.updated_at = now;
                info!("amended prescription {} for {}", id, customer);
                id
            }
            None => {
                let id = Uuid::new_v4();
                self.records.insert(
                    id,
                    PrescriptionRecord {
                        id,
                        customer: customer.to_string(),
                        right: form.right.clone(),
                        left: form.left.clone(),
                        created_at: now,
                        updated_at: now,
                    },
                );
                info!("created prescription {} for {}", id, customer);
                id
            }
        };
        self.records.get(&id).ok_or(Error::NotFound(id))
    }

    pub fn get(&self, id: Uuid) -> Option<&PrescriptionRecord> {
        self.records.get(&id)
    }

    pub fn delete(&mut self, id: Uuid) -> Result<PrescriptionRecord> {
        let removed = self.records.remove(&id).ok_or(Error::NotFound(id))?;
        info!("deleted prescription {}", id);
        Ok(removed)
    }

    /// Records oldest first.
    pub fn list(&self) -> Vec<&PrescriptionRecord> {
        let mut records: Vec<_> = self.records.values().collect();
        records.sort_by_key(|r| (r.created_at, r.id));
        records
    }

    /// Find a record by full id or unambiguous id prefix.
    pub fn find(&self, needle: &str) -> Option<&PrescriptionRecord> {
        if let Ok(id) = Uuid::parse_str(needle) {
            return self.get(id);
        }
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        let mut matches = self
            .records
            .values()
            .filter(|r| r.id.to_string().starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some(record), None) => Some(record),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
