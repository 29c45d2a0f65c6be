//! JSON-file persistence for floor-plan documents, plus the per-key locks
//! that keep two recomputations of one plan from interleaving.

use crate::error::ApiError;
use room_topology::FloorPlan;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::debug;

const MAX_KEY_LEN: usize = 128;

type LockMap = Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>;

#[derive(Debug, Clone)]
pub struct PlanStore {
    root: PathBuf,
    locks: LockMap,
}

impl PlanStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn path(&self, key: &str) -> Result<PathBuf, ApiError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.json", key)))
    }

    /// Hold this guard for the whole load/derive/save sequence of a plan.
    pub async fn lock(&self, key: &str) -> PlanLock {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };

        PlanLock {
            guard: Some(lock.lock_owned().await),
            key: key.to_string(),
            locks: self.locks.clone(),
        }
    }

    pub async fn load(&self, key: &str) -> Result<FloorPlan, ApiError> {
        let path = self.path(key)?;

        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ApiError::NotFound(key.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        debug!("Loaded plan {} ({} bytes)", key, raw.len());
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write through a temporary file so a crash never leaves half a document.
    pub async fn save(&self, key: &str, plan: &FloorPlan) -> Result<(), ApiError> {
        let path = self.path(key)?;
        let tmp = path.with_extension("json.tmp");
        let body = serde_json::to_vec_pretty(plan)?;

        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(&tmp, &body).await?;
        tokio::fs::rename(&tmp, &path).await?;

        debug!("Saved plan {} ({} bytes)", key, body.len());
        Ok(())
    }
}

/// Exclusive access to one plan key. The key's map entry is dropped with the
/// last holder, so the map only tracks keys that are in use.
pub struct PlanLock {
    guard: Option<OwnedMutexGuard<()>>,
    key: String,
    locks: LockMap,
}

impl Drop for PlanLock {
    fn drop(&mut self) {
        drop(self.guard.take());

        // Waiters clone the entry under the map lock, so a count of one
        // means nobody else holds or awaits it.
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        if locks
            .get(&self.key)
            .is_some_and(|entry| Arc::strong_count(entry) == 1)
        {
            locks.remove(&self.key);
        }
    }
}

/// Keys become file names, so only `[A-Za-z0-9_-]` is accepted.
fn validate_key(key: &str) -> Result<(), ApiError> {
    let valid = !key.is_empty()
        && key.len() <= MAX_KEY_LEN
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(ApiError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use room_topology::{PlanCoord, Point, Wall};

    fn temp_store() -> PlanStore {
        PlanStore::new(std::env::temp_dir().join(format!("plan-store-{}", uuid::Uuid::new_v4())))
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("floorPlan").is_ok());
        assert!(validate_key("flat-2_b").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("a/b").is_err());
        assert!(validate_key(&"x".repeat(MAX_KEY_LEN + 1)).is_err());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let store = temp_store();
        let mut plan = FloorPlan::default();
        plan.points.push(Point::new(0.0, 0.0));
        plan.points.push(Point::new(1.0, 0.0));
        plan.walls
            .push(Wall::new(PlanCoord::new(0.0, 0.0), PlanCoord::new(1.0, 0.0)));

        store.save("home", &plan).await.unwrap();
        let loaded = store.load("home").await.unwrap();

        assert_eq!(loaded.points.len(), 2);
        assert_eq!(loaded.points[0].id, plan.points[0].id);
        assert_eq!(loaded.walls.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_plan_is_not_found() {
        let store = temp_store();

        assert!(matches!(
            store.load("nothing").await,
            Err(ApiError::NotFound(_))
        ));
    }

    fn tracked_keys(store: &PlanStore) -> usize {
        store.locks.lock().unwrap().len()
    }

    #[tokio::test]
    async fn test_released_lock_leaves_no_entry() {
        let store = temp_store();

        for i in 0..50 {
            let _guard = store.lock(&format!("plan-{}", i)).await;
            assert_eq!(tracked_keys(&store), 1);
        }

        assert_eq!(tracked_keys(&store), 0);
    }

    #[tokio::test]
    async fn test_waiting_holder_keeps_the_entry() {
        let store = temp_store();
        let first = store.lock("shared").await;

        let waiter = {
            let store = store.clone();
            tokio::spawn(async move {
                let _guard = store.lock("shared").await;
            })
        };
        while Arc::strong_count(&store.locks.lock().unwrap()["shared"]) < 3 {
            tokio::task::yield_now().await;
        }

        drop(first);
        assert_eq!(tracked_keys(&store), 1);

        waiter.await.unwrap();
        assert_eq!(tracked_keys(&store), 0);
    }
}
