use jiff::Timestamp;
use parking_lot::RwLock;
use pinhole_core::error::{Result, StorageError};
use pinhole_core::{NewRecord, ReadRepository, Repository, ShortCode, UrlRecord};
use std::collections::HashMap;

/// In-memory implementation of the Repository trait.
///
/// A single reader/writer lock guards the whole map: lookups share the
/// lock, while creation and click updates take it exclusively. Nothing
/// but map access happens while the lock is held.
///
/// Expired records are kept. Expiry is judged by whoever reads them.
#[derive(Debug)]
pub struct InMemoryRepository {
    storage: RwLock<HashMap<String, UrlRecord>>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: RwLock::new(HashMap::with_capacity(capacity)),
        }
    }

    /// Number of stored records, expired ones included.
    pub fn len(&self) -> usize {
        self.storage.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.read().is_empty()
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadRepository for InMemoryRepository {
    fn get(&self, code: &ShortCode) -> Result<Option<UrlRecord>> {
        Ok(self.storage.read().get(code.as_str()).cloned())
    }

    fn exists(&self, code: &ShortCode) -> Result<bool> {
        Ok(self.storage.read().contains_key(code.as_str()))
    }
}

impl Repository for InMemoryRepository {
    fn create(&self, code: &ShortCode, record: NewRecord) -> Result<()> {
        if code.as_str().is_empty() {
            return Err(StorageError::InvalidRecord(
                "short code cannot be empty".to_string(),
            ));
        }
        if record.original_url.is_empty() {
            return Err(StorageError::InvalidRecord(
                "original url cannot be empty".to_string(),
            ));
        }

        let entry = UrlRecord {
            original_url: record.original_url,
            created_at: Timestamp::now(),
            expire_at: record.expire_at,
            clicks: 0,
        };

        // Check-and-insert under one write guard.
        let mut storage = self.storage.write();
        if !record.overwrite && storage.contains_key(code.as_str()) {
            return Err(StorageError::Conflict(code.to_string()));
        }
        storage.insert(code.as_str().to_owned(), entry);
        Ok(())
    }

    fn increment_click(&self, code: &ShortCode) -> Result<()> {
        if let Some(entry) = self.storage.write().get_mut(code.as_str()) {
            entry.clicks = entry.clicks.saturating_add(1);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::SignedDuration;
    use std::thread;

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    fn record(url: &str) -> NewRecord {
        NewRecord::builder().original_url(url).build()
    }

    #[test]
    fn create_and_get() {
        let repo = InMemoryRepository::new();
        let before = Timestamp::now();

        repo.create(&code("abc123"), record("https://example.com"))
            .unwrap();

        let result = repo.get(&code("abc123")).unwrap().unwrap();
        assert_eq!(result.original_url, "https://example.com");
        assert_eq!(result.expire_at, None);
        assert_eq!(result.clicks, 0);
        assert!(result.created_at >= before);
    }

    #[test]
    fn with_capacity_starts_empty() {
        let repo = InMemoryRepository::with_capacity(64);
        assert!(repo.is_empty());

        repo.create(&code("abc123"), record("https://example.com"))
            .unwrap();
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn get_nonexistent() {
        let repo = InMemoryRepository::new();

        assert!(repo.get(&code("nope")).unwrap().is_none());
    }

    #[test]
    fn create_conflict_keeps_first_record() {
        let repo = InMemoryRepository::new();

        repo.create(&code("abc123"), record("https://example.com"))
            .unwrap();
        repo.increment_click(&code("abc123")).unwrap();
        let first = repo.get(&code("abc123")).unwrap().unwrap();

        let err = repo
            .create(&code("abc123"), record("https://other.com"))
            .unwrap_err();
        assert_eq!(err, StorageError::Conflict("abc123".to_string()));

        let after = repo.get(&code("abc123")).unwrap().unwrap();
        assert_eq!(after, first);
    }

    #[test]
    fn overwrite_replaces_record_and_resets_clicks() {
        let repo = InMemoryRepository::new();

        repo.create(&code("abc123"), record("https://old.com"))
            .unwrap();
        repo.increment_click(&code("abc123")).unwrap();
        repo.increment_click(&code("abc123")).unwrap();

        let replacement = NewRecord::builder()
            .original_url("https://new.com")
            .overwrite(true)
            .build();
        repo.create(&code("abc123"), replacement).unwrap();

        let result = repo.get(&code("abc123")).unwrap().unwrap();
        assert_eq!(result.original_url, "https://new.com");
        assert_eq!(result.clicks, 0);
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn overwrite_on_missing_code_inserts() {
        let repo = InMemoryRepository::new();
        let new = NewRecord::builder()
            .original_url("https://example.com")
            .overwrite(true)
            .build();

        repo.create(&code("fresh1"), new).unwrap();
        assert!(repo.exists(&code("fresh1")).unwrap());
    }

    #[test]
    fn empty_inputs_are_rejected() {
        let repo = InMemoryRepository::new();

        let err = repo.create(&code(""), record("https://example.com"));
        assert!(matches!(err, Err(StorageError::InvalidRecord(_))));

        let err = repo.create(&code("abc123"), record(""));
        assert!(matches!(err, Err(StorageError::InvalidRecord(_))));

        assert!(repo.is_empty());
    }

    #[test]
    fn expired_record_is_still_returned() {
        let repo = InMemoryRepository::new();
        let expired = Timestamp::now() - SignedDuration::from_secs(1);
        let new = NewRecord::builder()
            .original_url("https://example.com")
            .expire_at(Some(expired))
            .build();

        repo.create(&code("abc123"), new).unwrap();

        let result = repo.get(&code("abc123")).unwrap().unwrap();
        assert_eq!(result.expire_at, Some(expired));
        assert!(result.is_expired());
        assert!(repo.exists(&code("abc123")).unwrap());
    }

    #[test]
    fn increment_missing_code_is_noop() {
        let repo = InMemoryRepository::new();

        repo.increment_click(&code("ghost1")).unwrap();

        assert!(repo.get(&code("ghost1")).unwrap().is_none());
        assert!(repo.is_empty());
    }

    #[test]
    fn snapshot_is_not_affected_by_later_clicks() {
        let repo = InMemoryRepository::new();
        repo.create(&code("abc123"), record("https://example.com"))
            .unwrap();

        let snapshot = repo.get(&code("abc123")).unwrap().unwrap();
        repo.increment_click(&code("abc123")).unwrap();

        assert_eq!(snapshot.clicks, 0);
        assert_eq!(repo.get(&code("abc123")).unwrap().unwrap().clicks, 1);
    }

    #[test]
    fn concurrent_increments_are_not_lost() {
        const THREADS: u64 = 8;
        const PER_THREAD: u64 = 500;

        let repo = InMemoryRepository::new();
        repo.create(&code("hot"), record("https://example.com"))
            .unwrap();

        thread::scope(|s| {
            for _ in 0..THREADS {
                s.spawn(|| {
                    for _ in 0..PER_THREAD {
                        repo.increment_click(&code("hot")).unwrap();
                    }
                });
            }
        });

        let result = repo.get(&code("hot")).unwrap().unwrap();
        assert_eq!(result.clicks, THREADS * PER_THREAD);
    }

    #[test]
    fn concurrent_readers_see_consistent_records() {
        const CLICKS: u64 = 2_000;

        let repo = InMemoryRepository::new();
        repo.create(&code("hot"), record("https://example.com"))
            .unwrap();

        thread::scope(|s| {
            s.spawn(|| {
                for _ in 0..CLICKS {
                    repo.increment_click(&code("hot")).unwrap();
                }
            });

            for _ in 0..4 {
                s.spawn(|| {
                    let mut last = 0;
                    for _ in 0..CLICKS {
                        let rec = repo.get(&code("hot")).unwrap().unwrap();
                        assert_eq!(rec.original_url, "https://example.com");
                        assert!(rec.clicks >= last && rec.clicks <= CLICKS);
                        last = rec.clicks;
                    }
                });
            }
        });

        assert_eq!(repo.get(&code("hot")).unwrap().unwrap().clicks, CLICKS);
    }

    #[test]
    fn concurrent_creates_of_same_code_have_one_winner() {
        let repo = InMemoryRepository::new();

        let wins: usize = thread::scope(|s| {
            let handles: Vec<_> = (0..16)
                .map(|i| {
                    let repo = &repo;
                    s.spawn(move || {
                        repo.create(&code("race"), record(&format!("https://example{i}.com")))
                            .is_ok()
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|won| *won)
                .count()
        });

        assert_eq!(wins, 1);
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn concurrent_access_to_distinct_codes() {
        let repo = InMemoryRepository::new();

        thread::scope(|s| {
            for i in 0..10u64 {
                let repo = &repo;
                s.spawn(move || {
                    let c = ShortCode::new_unchecked(format!("code-{:03}", i));
                    repo.create(&c, record(&format!("https://example{}.com", i)))
                        .unwrap();
                    let _ = repo.get(&c);
                });
            }
        });

        for i in 0..10u64 {
            let c = ShortCode::new_unchecked(format!("code-{:03}", i));
            let result = repo.get(&c).unwrap().unwrap();
            assert_eq!(result.original_url, format!("https://example{}.com", i));
        }
    }
}
