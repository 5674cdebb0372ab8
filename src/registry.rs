// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Point-of-sale registry with id, name and code indices
//!
//! The registry is the single source of truth for point identity. All three
//! indices live behind one [`Stamped`] cell so a reader always sees them
//! agree with each other.

use crate::error::{Error, Result};
use crate::sync::Stamped;
use crate::types::PointOfSale;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Indices {
    by_id: HashMap<String, PointOfSale>,
    id_by_code: HashMap<u32, String>,
    id_by_name: HashMap<String, String>,
}

impl Indices {
    fn point_for(&self, id: Option<&String>) -> Option<PointOfSale> {
        id.and_then(|id| self.by_id.get(id)).cloned()
    }

    fn install(&mut self, point: PointOfSale) {
        self.id_by_code.insert(point.code, point.id.clone());
        self.id_by_name.insert(point.name.clone(), point.id.clone());
        self.by_id.insert(point.id.clone(), point);
    }

    /// Drop `name -> id` only while it still points at `id`
    fn release_name(&mut self, name: &str, id: &str) {
        if self.id_by_name.get(name).is_some_and(|owner| owner == id) {
            self.id_by_name.remove(name);
        }
    }
}

/// Concurrent registry of points of sale
#[derive(Debug)]
pub struct Registry {
    indices: Stamped<Indices>,
    next_code: AtomicU32,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create an empty registry whose automatic codes start at 1
    #[must_use]
    pub fn new() -> Self {
        Self::with_first_code(1)
    }

    /// Create an empty registry whose automatic codes start at `first_code`
    #[must_use]
    pub fn with_first_code(first_code: u32) -> Self {
        Self {
            indices: Stamped::new(Indices::default()),
            next_code: AtomicU32::new(first_code.max(1)),
        }
    }

    /// Register a new point, allocating a code when none is given
    pub fn create(&self, name: &str, code: Option<u32>) -> Result<PointOfSale> {
        self.insert(Uuid::new_v4().to_string(), name, code)
    }

    /// Register a new point under a caller-supplied UUID
    pub fn create_with_id(&self, id: &str, name: &str, code: Option<u32>) -> Result<PointOfSale> {
        let id = id.trim();
        if id.is_empty() {
            return Err(Error::BlankId);
        }
        let id = Uuid::parse_str(id)
            .map_err(|_| Error::InvalidIdOrCode(id.to_string()))?
            .hyphenated()
            .to_string();
        self.insert(id, name, code)
    }

    fn insert(&self, id: String, name: &str, code: Option<u32>) -> Result<PointOfSale> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::BlankName);
        }
        if code == Some(0) {
            return Err(Error::InvalidCode(0));
        }

        let point = self.indices.write(|idx| {
            if idx.by_id.contains_key(&id) {
                return Err(Error::IdInUse(id));
            }
            let code = match code {
                Some(code) => {
                    if idx.id_by_code.contains_key(&code) {
                        return Err(Error::CodeInUse(code));
                    }
                    code
                }
                None => self.next_free_code(&idx.id_by_code),
            };
            let point = PointOfSale {
                id,
                name: name.to_string(),
                code,
            };
            idx.install(point.clone());
            Ok(point)
        })?;

        debug!(id = %point.id, code = point.code, name = %point.name, "point created");
        Ok(point)
    }

    /// Probe the counter until it yields a code nobody owns
    fn next_free_code(&self, id_by_code: &HashMap<u32, String>) -> u32 {
        loop {
            let candidate = self.next_code.fetch_add(1, Ordering::Relaxed);
            if candidate != 0 && !id_by_code.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    /// Rename a point; its code is preserved
    pub fn update(&self, id: &str, name: &str) -> Result<PointOfSale> {
        let id = id.trim();
        if id.is_empty() {
            return Err(Error::BlankId);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::BlankName);
        }

        let updated = self.indices.write(|idx| {
            let existing = idx
                .by_id
                .get(id)
                .ok_or_else(|| Error::PointNotFound(id.to_string()))?;
            let updated = PointOfSale {
                id: existing.id.clone(),
                name: name.to_string(),
                code: existing.code,
            };
            let old_name = existing.name.clone();
            idx.release_name(&old_name, id);
            idx.install(updated.clone());
            Ok(updated)
        })?;

        debug!(id = %updated.id, name = %updated.name, "point renamed");
        Ok(updated)
    }

    /// Remove a point together with its code and name entries
    pub fn delete(&self, id: &str) -> Result<()> {
        let id = id.trim();
        let removed = self.indices.write(|idx| {
            let removed = idx
                .by_id
                .remove(id)
                .ok_or_else(|| Error::PointNotFound(id.to_string()))?;
            idx.id_by_code.remove(&removed.code);
            idx.release_name(&removed.name, id);
            Ok(removed)
        })?;

        debug!(id = %removed.id, code = removed.code, "point deleted");
        Ok(())
    }

    /// Look up a point by id
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<PointOfSale> {
        self.indices.read(|idx| idx.by_id.get(id).cloned())
    }

    /// Look up a point by id, failing with `NotFound` on a miss
    pub fn get(&self, id: &str) -> Result<PointOfSale> {
        self.find_by_id(id)
            .ok_or_else(|| Error::PointNotFound(id.to_string()))
    }

    /// Whether a point with this id is live
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.indices.read(|idx| idx.by_id.contains_key(id))
    }

    /// Look up the point last registered (or renamed) under `name`
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<PointOfSale> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        self.indices.read(|idx| idx.point_for(idx.id_by_name.get(name)))
    }

    /// Look up a point by code
    #[must_use]
    pub fn find_by_code(&self, code: u32) -> Option<PointOfSale> {
        self.indices.read(|idx| idx.point_for(idx.id_by_code.get(&code)))
    }

    /// Normalize a UUID or a decimal code to the canonical point id
    pub fn resolve_id(&self, id_or_code: &str) -> Result<String> {
        let input = id_or_code.trim();
        if input.is_empty() {
            return Err(Error::BlankId);
        }

        if let Ok(uuid) = Uuid::parse_str(input) {
            let id = uuid.hyphenated().to_string();
            return if self.contains(&id) {
                Ok(id)
            } else {
                Err(Error::PointNotFound(input.to_string()))
            };
        }

        let code: u32 = input
            .parse()
            .map_err(|_| Error::InvalidIdOrCode(input.to_string()))?;
        self.indices
            .read(|idx| idx.id_by_code.get(&code).cloned())
            .ok_or(Error::CodeNotFound(code))
    }

    /// All live points, ordered by name (case-insensitive) then id
    #[must_use]
    pub fn find_all(&self) -> Vec<PointOfSale> {
        let mut points: Vec<PointOfSale> =
            self.indices.read(|idx| idx.by_id.values().cloned().collect());
        points.sort_by_cached_key(|p| (p.name.to_lowercase(), p.id.clone()));
        points
    }

    /// Number of live points
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.read(|idx| idx.by_id.len())
    }

    /// Whether no points are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write version of the registry; changes whenever a mutation commits
    #[must_use]
    pub fn stamp(&self) -> u64 {
        self.indices.stamp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_create_allocates_sequential_codes() {
        let registry = Registry::new();
        let a = registry.create("alpha", None).unwrap();
        let b = registry.create("beta", None).unwrap();

        assert_eq!(a.code, 1);
        assert_eq!(b.code, 2);
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn test_create_skips_codes_in_use() {
        let registry = Registry::new();
        registry.create("explicit", Some(1)).unwrap();
        registry.create("explicit-2", Some(2)).unwrap();

        let auto = registry.create("auto", None).unwrap();
        assert_eq!(auto.code, 3);
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let registry = Registry::new();
        let err = registry.create("   ", None).unwrap_err();
        assert_eq!(err, Error::BlankName);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_create_rejects_code_zero() {
        let registry = Registry::new();
        let err = registry.create("zero", Some(0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_create_conflicting_code() {
        let registry = Registry::new();
        registry.create("first", Some(7)).unwrap();

        let err = registry.create("second", Some(7)).unwrap_err();
        assert_eq!(err, Error::CodeInUse(7));
        assert_eq!(registry.len(), 1);
        assert!(registry.find_by_name("second").is_none());
    }

    #[test]
    fn test_create_with_id() {
        let registry = Registry::new();
        let id = Uuid::new_v4().to_string();
        let point = registry.create_with_id(&id, "fixed", Some(9)).unwrap();
        assert_eq!(point.id, id);

        let dup = registry.create_with_id(&id, "again", None).unwrap_err();
        assert_eq!(dup.kind(), ErrorKind::Conflict);

        let bad = registry.create_with_id("not-a-uuid", "x", None).unwrap_err();
        assert_eq!(bad.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_name_is_trimmed() {
        let registry = Registry::new();
        let point = registry.create("  Santa Fe ", None).unwrap();
        assert_eq!(point.name, "Santa Fe");
        assert_eq!(registry.find_by_name("Santa Fe ").unwrap().id, point.id);
    }

    #[test]
    fn test_update_repoints_name_index() {
        let registry = Registry::new();
        let point = registry.create("old", Some(5)).unwrap();

        let updated = registry.update(&point.id, "new").unwrap();
        assert_eq!(updated.code, 5);
        assert_eq!(updated.id, point.id);
        assert!(registry.find_by_name("old").is_none());
        assert_eq!(registry.find_by_name("new").unwrap().id, point.id);
        assert_eq!(registry.find_by_code(5).unwrap().name, "new");
    }

    #[test]
    fn test_update_keeps_name_owned_by_other_point() {
        let registry = Registry::new();
        let a = registry.create("shared", None).unwrap();
        let b = registry.create("shared", None).unwrap();

        // b is the last writer for "shared"; renaming a must not drop it
        registry.update(&a.id, "other").unwrap();
        assert_eq!(registry.find_by_name("shared").unwrap().id, b.id);
    }

    #[test]
    fn test_update_errors() {
        let registry = Registry::new();
        assert_eq!(registry.update("", "x").unwrap_err(), Error::BlankId);
        let point = registry.create("p", None).unwrap();
        assert_eq!(registry.update(&point.id, " ").unwrap_err(), Error::BlankName);
        assert_eq!(
            registry.update("missing", "x").unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_padded_id_accepted_like_resolve() {
        let registry = Registry::new();
        let point = registry.create("padded", None).unwrap();
        let padded = format!("  {}\t", point.id);
        assert_eq!(registry.resolve_id(&padded).unwrap(), point.id);

        let renamed = registry.update(&padded, "trimmed").unwrap();
        assert_eq!(renamed.id, point.id);
        assert_eq!(registry.find_by_name("trimmed").unwrap().id, point.id);

        registry.delete(&padded).unwrap();
        assert!(!registry.contains(&point.id));
    }

    #[test]
    fn test_delete_releases_indices() {
        let registry = Registry::new();
        let point = registry.create("gone", Some(4)).unwrap();

        registry.delete(&point.id).unwrap();
        assert!(registry.find_by_id(&point.id).is_none());
        assert!(registry.find_by_code(4).is_none());
        assert!(registry.find_by_name("gone").is_none());

        // The code is free again
        registry.create("reuse", Some(4)).unwrap();

        let err = registry.delete(&point.id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_delete_keeps_name_owned_by_other_point() {
        let registry = Registry::new();
        let a = registry.create("dup", None).unwrap();
        let b = registry.create("dup", None).unwrap();

        registry.delete(&a.id).unwrap();
        assert_eq!(registry.find_by_name("dup").unwrap().id, b.id);
    }

    #[test]
    fn test_resolve_id() {
        let registry = Registry::new();
        let point = registry.create("x", Some(12)).unwrap();

        assert_eq!(registry.resolve_id(&point.id).unwrap(), point.id);
        assert_eq!(registry.resolve_id("12").unwrap(), point.id);
        assert_eq!(registry.resolve_id(" 12 ").unwrap(), point.id);
        assert_eq!(
            registry.resolve_id(&point.id.to_uppercase()).unwrap(),
            point.id
        );

        assert_eq!(registry.resolve_id("").unwrap_err(), Error::BlankId);
        assert_eq!(
            registry.resolve_id("abc").unwrap_err(),
            Error::InvalidIdOrCode("abc".into())
        );
        assert_eq!(
            registry.resolve_id("-1").unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(registry.resolve_id("13").unwrap_err(), Error::CodeNotFound(13));

        let unknown = Uuid::new_v4().to_string();
        assert_eq!(
            registry.resolve_id(&unknown).unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_find_all_is_ordered() {
        let registry = Registry::new();
        registry.create("beta", None).unwrap();
        registry.create("Alpha", None).unwrap();
        registry.create("gamma", None).unwrap();
        registry.create("alpha", None).unwrap();

        let names: Vec<String> = registry.find_all().into_iter().map(|p| p.name).collect();
        assert_eq!(names[2], "beta");
        assert_eq!(names[3], "gamma");
        assert!(names[..2].iter().all(|n| n.eq_ignore_ascii_case("alpha")));

        // Stable across calls
        assert_eq!(registry.find_all(), registry.find_all());
    }

    #[test]
    fn test_first_code_setting() {
        let registry = Registry::with_first_code(100);
        assert_eq!(registry.create("p", None).unwrap().code, 100);
    }

    #[test]
    fn test_stamp_tracks_mutations() {
        let registry = Registry::new();
        let before = registry.stamp();
        let point = registry.create("p", None).unwrap();
        let _ = registry.create("q", Some(point.code));
        assert_eq!(registry.stamp(), before + 1);
    }
}
