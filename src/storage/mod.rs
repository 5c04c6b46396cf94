//! Storage Layer - Write-back of entity tables
//!
//! After a successful mutation the affected table is written out in full,
//! replacing whatever the backing source held before:
//! - breweries.json, beers.json, users.json, reviews.json
//!
//! What happens when that write fails is decided by [`DurabilityPolicy`].

pub mod schema;
pub mod json;
pub mod memory;

pub use schema::{BeerRecord, BreweryRecord, ReviewRecord, Snapshot, UserRecord};
pub use json::JsonFilePersister;
pub use memory::MemoryPersister;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::EntityKind;
use crate::store::EntityStore;
use crate::{Error, Result};

/// Sink for full-table snapshots
pub trait Persister: Send + Sync {
    /// Replace the stored contents of `snapshot.kind()` with `snapshot`
    fn write_table(&self, snapshot: &Snapshot) -> Result<()>;
}

/// What a mutation does when its table cannot be written back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DurabilityPolicy {
    /// Log the failure and keep the in-memory change
    #[default]
    BestEffort,
    /// Undo the in-memory change and report `PersistenceFailure`
    Strict,
}

impl DurabilityPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DurabilityPolicy::BestEffort => "best-effort",
            DurabilityPolicy::Strict => "strict",
        }
    }

    /// Write `snapshot` through `persister`, applying this policy to failures
    pub fn commit(&self, persister: &dyn Persister, snapshot: &Snapshot) -> Result<()> {
        let kind = snapshot.kind();
        match persister.write_table(snapshot) {
            Ok(()) => {
                tracing::debug!(table = kind.table_name(), rows = snapshot.len(), "Table persisted");
                Ok(())
            }
            Err(e) => match self {
                DurabilityPolicy::BestEffort => {
                    tracing::error!(
                        table = kind.table_name(),
                        error = %e,
                        "Failed to persist table, keeping in-memory change"
                    );
                    Ok(())
                }
                DurabilityPolicy::Strict => {
                    tracing::warn!(table = kind.table_name(), error = %e, "Failed to persist table, rolling back");
                    Err(Error::PersistenceFailure {
                        kind,
                        reason: e.to_string(),
                    })
                }
            },
        }
    }
}

impl FromStr for DurabilityPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "best-effort" => Ok(DurabilityPolicy::BestEffort),
            "strict" => Ok(DurabilityPolicy::Strict),
            _ => Err(Error::InvalidArgument(format!("Unknown durability policy: {}", s))),
        }
    }
}

impl std::fmt::Display for DurabilityPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Take a snapshot of one table of the store
pub fn snapshot_of(store: &EntityStore, kind: EntityKind) -> Snapshot {
    match kind {
        EntityKind::Brewery => Snapshot::Breweries(store.list_breweries().iter().map(BreweryRecord::from).collect()),
        EntityKind::Beer => Snapshot::Beers(store.list_beers().iter().map(BeerRecord::from).collect()),
        EntityKind::User => Snapshot::Users(store.list_users().iter().map(UserRecord::from).collect()),
        EntityKind::Review => Snapshot::Reviews(store.list_reviews().iter().map(ReviewRecord::from).collect()),
    }
}

/// Write every table of the store, in load order
pub fn export_all(store: &EntityStore, persister: &dyn Persister) -> Result<()> {
    for kind in EntityKind::all() {
        persister.write_table(&snapshot_of(store, *kind))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::User;

    #[test]
    fn test_best_effort_swallows_failure() {
        let persister = MemoryPersister::failing();
        let snapshot = Snapshot::Users(vec![]);

        assert!(DurabilityPolicy::BestEffort.commit(&persister, &snapshot).is_ok());
    }

    #[test]
    fn test_strict_reports_failure() {
        let persister = MemoryPersister::failing();
        let snapshot = Snapshot::Users(vec![]);

        let err = DurabilityPolicy::Strict.commit(&persister, &snapshot).unwrap_err();
        assert!(matches!(err, Error::PersistenceFailure { kind: EntityKind::User, .. }));
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("strict".parse::<DurabilityPolicy>().unwrap(), DurabilityPolicy::Strict);
        assert_eq!("best-effort".parse::<DurabilityPolicy>().unwrap(), DurabilityPolicy::BestEffort);
        assert_eq!("STRICT".parse::<DurabilityPolicy>().unwrap(), DurabilityPolicy::Strict);
        assert!("sometimes".parse::<DurabilityPolicy>().is_err());
        assert!("log".parse::<DurabilityPolicy>().is_err());
        assert!("rollback".parse::<DurabilityPolicy>().is_err());
        assert_eq!(DurabilityPolicy::default(), DurabilityPolicy::BestEffort);
    }

    #[test]
    fn test_export_all_writes_every_table() {
        let store = EntityStore::new();
        store.insert_user(User::new("u1", "Ann", "ann@x.io")).unwrap();
        let persister = MemoryPersister::new();

        export_all(&store, &persister).unwrap();

        assert_eq!(
            persister.writes(),
            vec![EntityKind::Brewery, EntityKind::Beer, EntityKind::User, EntityKind::Review]
        );
        assert_eq!(persister.snapshot(EntityKind::User).unwrap().len(), 1);
    }
}
