//! # Property Store
//!
//! Authoritative collection of property records. `PropertyStore` is the seam
//! handlers program against; `InMemoryPropertyStore` is the only backend.

use chrono::Utc;

use super::errors::StoreResult;
use super::model::{ListFilter, NewProperty, Property, PropertyId, PropertyList, PropertyUpdate};

/// Storage for property records.
///
/// Lookups that miss return `Ok(None)`; `Err` is reserved for backend failure.
pub trait PropertyStore: Send + std::fmt::Debug {
    /// List properties matching `filter`, in insertion order
    fn list(&self, filter: &ListFilter) -> StoreResult<PropertyList>;

    /// Find a property by ID
    fn get_by_id(&self, id: PropertyId) -> StoreResult<Option<Property>>;

    /// Store a new property under the next ID
    fn create(&mut self, data: NewProperty) -> StoreResult<Property>;

    /// Overwrite the fields present in `data`
    fn update(&mut self, id: PropertyId, data: PropertyUpdate) -> StoreResult<Option<Property>>;

    /// Remove a property, returning it
    fn delete(&mut self, id: PropertyId) -> StoreResult<Option<Property>>;

    /// Number of stored properties
    fn count(&self) -> StoreResult<usize>;

    fn exists(&self, id: PropertyId) -> StoreResult<bool> {
        Ok(self.get_by_id(id)?.is_some())
    }
}

/// Vec-backed store with linear lookups.
///
/// IDs start at 1 and are never reused, even after deletion.
#[derive(Debug)]
pub struct InMemoryPropertyStore {
    properties: Vec<Property>,
    next_id: PropertyId,
}

impl InMemoryPropertyStore {
    pub fn new() -> Self {
        Self {
            properties: Vec::new(),
            next_id: PropertyId::FIRST,
        }
    }

    fn position(&self, id: PropertyId) -> Option<usize> {
        self.properties.iter().position(|p| p.id == id)
    }

    fn allocate_id(&mut self) -> PropertyId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }
}

impl Default for InMemoryPropertyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyStore for InMemoryPropertyStore {
    fn list(&self, filter: &ListFilter) -> StoreResult<PropertyList> {
        let matching: Vec<&Property> = self
            .properties
            .iter()
            .filter(|p| filter.status.map_or(true, |s| p.status == s))
            .collect();

        let window: &[&Property] = match (filter.limit, filter.offset) {
            (Some(limit), offset) if limit > 0 => {
                let start = offset.unwrap_or(0).min(matching.len());
                let end = start.saturating_add(limit).min(matching.len());
                &matching[start..end]
            }
            (_, Some(offset)) if offset > 0 => &matching[offset.min(matching.len())..],
            _ => &matching,
        };

        let properties: Vec<Property> = window.iter().map(|p| (*p).clone()).collect();
        Ok(PropertyList {
            filtered: properties.len(),
            total: self.properties.len(),
            properties,
        })
    }

    fn get_by_id(&self, id: PropertyId) -> StoreResult<Option<Property>> {
        Ok(self.properties.iter().find(|p| p.id == id).cloned())
    }

    fn create(&mut self, data: NewProperty) -> StoreResult<Property> {
        let now = Utc::now();
        let property = Property {
            id: self.allocate_id(),
            title: data.title,
            description: data.description,
            address: data.address,
            price: data.price,
            status: data.status,
            created_at: now,
            updated_at: now,
        };

        self.properties.push(property.clone());
        Ok(property)
    }

    fn update(&mut self, id: PropertyId, data: PropertyUpdate) -> StoreResult<Option<Property>> {
        let Some(idx) = self.position(id) else {
            return Ok(None);
        };

        let property = &mut self.properties[idx];
        data.apply_to(property);
        // Wall clock may step back; updatedAt must not.
        property.updated_at = Utc::now().max(property.updated_at);

        Ok(Some(property.clone()))
    }

    fn delete(&mut self, id: PropertyId) -> StoreResult<Option<Property>> {
        Ok(self.position(id).map(|idx| self.properties.remove(idx)))
    }

    fn count(&self) -> StoreResult<usize> {
        Ok(self.properties.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::model::PropertyStatus;

    fn id(n: u64) -> PropertyId {
        PropertyId::new(n).unwrap()
    }

    fn new_property(title: &str, status: PropertyStatus) -> NewProperty {
        NewProperty {
            title: title.to_string(),
            description: None,
            address: "1 Main St".to_string(),
            price: 1200.0,
            status,
        }
    }

    fn seeded(n: usize) -> InMemoryPropertyStore {
        let mut store = InMemoryPropertyStore::new();
        for i in 0..n {
            store
                .create(new_property(&format!("Flat {}", i), PropertyStatus::Available))
                .unwrap();
        }
        store
    }

    fn titles(list: &PropertyList) -> Vec<&str> {
        list.properties.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn test_ids_increase_and_are_not_reused() {
        let mut store = seeded(2);
        store.delete(id(2)).unwrap();

        let created = store
            .create(new_property("Flat X", PropertyStatus::Available))
            .unwrap();
        assert_eq!(created.id, id(3));
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_create_then_get_returns_same_record() {
        let mut store = InMemoryPropertyStore::new();
        let created = store
            .create(new_property("Flat A", PropertyStatus::Rented))
            .unwrap();

        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(store.get_by_id(created.id).unwrap(), Some(created));
    }

    #[test]
    fn test_get_missing_returns_none() {
        let store = seeded(1);
        assert_eq!(store.get_by_id(id(42)).unwrap(), None);
        assert!(!store.exists(id(42)).unwrap());
        assert!(store.exists(id(1)).unwrap());
    }

    #[test]
    fn test_update_changes_only_given_fields() {
        let mut store = seeded(1);
        let before = store.get_by_id(id(1)).unwrap().unwrap();

        let update = PropertyUpdate {
            price: Some(999.5),
            ..Default::default()
        };
        let after = store.update(id(1), update).unwrap().unwrap();

        assert_eq!(after.price, 999.5);
        assert_eq!(after.title, before.title);
        assert_eq!(after.address, before.address);
        assert_eq!(after.status, before.status);
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at >= before.updated_at);
        assert_eq!(store.get_by_id(id(1)).unwrap(), Some(after));
    }

    #[test]
    fn test_update_missing_returns_none() {
        let mut store = seeded(1);
        let update = PropertyUpdate {
            title: Some("Nope".to_string()),
            ..Default::default()
        };
        assert_eq!(store.update(id(9), update).unwrap(), None);
    }

    #[test]
    fn test_delete_removes_permanently() {
        let mut store = seeded(3);
        let deleted = store.delete(id(2)).unwrap().unwrap();

        assert_eq!(deleted.title, "Flat 1");
        assert_eq!(store.get_by_id(id(2)).unwrap(), None);
        assert!(!store.exists(id(2)).unwrap());
        assert_eq!(store.delete(id(2)).unwrap(), None);
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_list_without_filter_returns_everything() {
        let store = seeded(3);
        let list = store.list(&ListFilter::default()).unwrap();
        assert_eq!(titles(&list), vec!["Flat 0", "Flat 1", "Flat 2"]);
        assert_eq!(list.total, 3);
        assert_eq!(list.filtered, 3);
    }

    #[test]
    fn test_list_by_status_keeps_insertion_order() {
        let mut store = InMemoryPropertyStore::new();
        store.create(new_property("A", PropertyStatus::Available)).unwrap();
        store.create(new_property("B", PropertyStatus::Rented)).unwrap();
        store.create(new_property("C", PropertyStatus::Available)).unwrap();
        store.create(new_property("D", PropertyStatus::Maintenance)).unwrap();

        let filter = ListFilter {
            status: Some(PropertyStatus::Available),
            ..Default::default()
        };
        let list = store.list(&filter).unwrap();
        assert_eq!(titles(&list), vec!["A", "C"]);
        assert_eq!(list.total, 4);
        assert_eq!(list.filtered, 2);
    }

    #[test]
    fn test_list_limit_and_offset() {
        let store = seeded(5);
        let filter = ListFilter {
            limit: Some(2),
            offset: Some(1),
            ..Default::default()
        };
        let list = store.list(&filter).unwrap();
        assert_eq!(titles(&list), vec!["Flat 1", "Flat 2"]);
        assert_eq!(list.total, 5);
        assert_eq!(list.filtered, 2);
    }

    #[test]
    fn test_list_offset_only() {
        let store = seeded(5);
        let filter = ListFilter {
            offset: Some(3),
            ..Default::default()
        };
        let list = store.list(&filter).unwrap();
        assert_eq!(titles(&list), vec!["Flat 3", "Flat 4"]);
    }

    #[test]
    fn test_list_limit_without_offset_starts_at_zero() {
        let store = seeded(5);
        let filter = ListFilter {
            limit: Some(3),
            ..Default::default()
        };
        assert_eq!(titles(&store.list(&filter).unwrap()), vec!["Flat 0", "Flat 1", "Flat 2"]);
    }

    #[test]
    fn test_list_offset_past_end_is_empty() {
        let store = seeded(2);
        let paged = ListFilter {
            limit: Some(10),
            offset: Some(5),
            ..Default::default()
        };
        let skipped = ListFilter {
            offset: Some(5),
            ..Default::default()
        };

        let list = store.list(&paged).unwrap();
        assert!(list.properties.is_empty());
        assert_eq!(list.total, 2);
        assert_eq!(list.filtered, 0);
        assert!(store.list(&skipped).unwrap().properties.is_empty());
    }

    #[test]
    fn test_list_paginates_after_status_filter() {
        let mut store = InMemoryPropertyStore::new();
        for (title, status) in [
            ("A", PropertyStatus::Rented),
            ("B", PropertyStatus::Available),
            ("C", PropertyStatus::Rented),
            ("D", PropertyStatus::Rented),
        ] {
            store.create(new_property(title, status)).unwrap();
        }

        let filter = ListFilter {
            status: Some(PropertyStatus::Rented),
            limit: Some(1),
            offset: Some(1),
        };
        let list = store.list(&filter).unwrap();
        assert_eq!(titles(&list), vec!["C"]);
        assert_eq!(list.total, 4);
    }
}
