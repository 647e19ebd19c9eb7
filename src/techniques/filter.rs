use std::sync::Arc;
use futures::stream::{self, StreamExt};
use crate::errors::PwnError;
use crate::models::{CandidateSet, CommandRecord};
use super::loader::RecordStore;
use super::resolver::BinaryResolver;
use tracing::{debug, info};

/// Which binaries to consider and which functions they must all support.
#[derive(Debug, Clone, Default)]
pub struct CandidateRequest {
    /// `None` means the whole knowledge base. An explicit list is used as
    /// given: caller order, duplicates kept, empty list yields nothing.
    pub names: Option<Vec<String>>,
    /// Every tag listed here must be documented for a binary to survive.
    pub required_tags: Vec<String>,
}

impl CandidateRequest {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_names(mut self, names: Vec<String>) -> Self {
        self.names = Some(names);
        self
    }

    pub fn with_required_tags(mut self, tags: Vec<String>) -> Self {
        self.required_tags = tags;
        self
    }
}

/// Builds candidate sets: knowledge-base records narrowed by tag, then by
/// presence on this host.
pub struct FilterEngine {
    store: RecordStore,
    resolver: Arc<dyn BinaryResolver>,
    concurrency: usize,
}

impl FilterEngine {
    pub fn new(store: RecordStore, resolver: Arc<dyn BinaryResolver>) -> Self {
        Self {
            store,
            resolver,
            concurrency: 1,
        }
    }

    /// Number of lookups allowed in flight at once. Result order does not
    /// depend on it.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub async fn build_candidate_set(&self, request: &CandidateRequest) -> Result<CandidateSet, PwnError> {
        self.build_candidate_set_observed(request, |_, _| {}).await
    }

    /// Like [`build_candidate_set`](Self::build_candidate_set), calling
    /// `on_resolved(done, total)` after each environment lookup completes.
    pub async fn build_candidate_set_observed<F>(
        &self,
        request: &CandidateRequest,
        on_resolved: F,
    ) -> Result<CandidateSet, PwnError>
    where
        F: Fn(usize, usize),
    {
        let names = match &request.names {
            Some(names) => names.clone(),
            None => self.store.list_all_names()?,
        };

        let records = names
            .iter()
            .map(|name| self.store.load_record(name))
            .collect::<Result<Vec<CommandRecord>, _>>()?;
        let loaded = records.len();

        // Tag filtering is in-memory; do it before spawning any lookups.
        let records: Vec<CommandRecord> = if request.required_tags.is_empty() {
            records
        } else {
            records
                .into_iter()
                .filter(|record| record.supports_all(&request.required_tags))
                .collect()
        };

        let total = records.len();
        let resolver = self.resolver.as_ref();

        // `buffered` yields in submission order regardless of completion order.
        let mut lookups = stream::iter(records.into_iter().map(|record| async move {
            let resolution = resolver.resolve(&record.name).await;
            (record, resolution)
        }))
        .buffered(self.concurrency);

        let mut candidates = Vec::with_capacity(total);
        let mut done = 0;
        while let Some((mut record, resolution)) = lookups.next().await {
            done += 1;
            on_resolved(done, total);

            let resolution = resolution?;
            if resolution.exists() {
                record.set_resolution(resolution);
                candidates.push(record);
            } else {
                debug!(command = %record.name, "Skipping, not installed");
            }
        }

        info!(
            loaded,
            after_tag_filter = total,
            installed = candidates.len(),
            "Candidate set built"
        );
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use async_trait::async_trait;
    use tempfile::TempDir;
    use crate::models::ResolvedBinary;
    use crate::techniques::resolver::StaticResolver;

    /// `tags` is space separated.
    fn entry(tags: &str) -> String {
        let mut body = String::from("---\nfunctions:\n");
        if tags.is_empty() {
            body = String::from("---\nfunctions: {}\n");
        }
        for tag in tags.split_whitespace() {
            body.push_str(&format!("  {}:\n    - code: run {}\n", tag, tag));
        }
        body.push_str("---\n");
        body
    }

    fn make_store(entries: &[(&str, &str)]) -> (TempDir, RecordStore) {
        let dir = TempDir::new().unwrap();
        let entries_dir = dir.path().join("_gtfobins");
        fs::create_dir_all(&entries_dir).unwrap();
        for (name, tags) in entries {
            fs::write(entries_dir.join(format!("{}.md", name)), entry(tags)).unwrap();
        }
        let store = RecordStore::new(&entries_dir, dir.path().join("functions.yml"));
        (dir, store)
    }

    fn names(set: &CandidateSet) -> Vec<&str> {
        set.iter().map(|r| r.name.as_str()).collect()
    }

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    /// Counts lookups so tests can see what reached the resolution step.
    struct CountingResolver {
        inner: StaticResolver,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl BinaryResolver for CountingResolver {
        async fn resolve(&self, name: &str) -> Result<ResolvedBinary, PwnError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.resolve(name).await
        }
    }

    /// Finishes later lookups first to shake out ordering bugs.
    struct ReverseDelayResolver;

    #[async_trait]
    impl BinaryResolver for ReverseDelayResolver {
        async fn resolve(&self, name: &str) -> Result<ResolvedBinary, PwnError> {
            let delay = match name {
                "a" => 60,
                "b" => 30,
                _ => 1,
            };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(ResolvedBinary::found(format!("/bin/{}", name)))
        }
    }

    struct BrokenResolver;

    #[async_trait]
    impl BinaryResolver for BrokenResolver {
        async fn resolve(&self, name: &str) -> Result<ResolvedBinary, PwnError> {
            Err(PwnError::resolution_unavailable(name, "which is not installed"))
        }
    }

    #[tokio::test]
    async fn test_superset_filter() {
        let (_dir, store) = make_store(&[("both", "shell file-read")]);
        let resolver = Arc::new(StaticResolver::new().with_binary("both", "/bin/both"));
        let engine = FilterEngine::new(store, resolver);

        for (required, expected) in [
            (vec!["shell"], 1),
            (vec!["shell", "file-read"], 1),
            (vec!["shell", "network"], 0),
        ] {
            let request = CandidateRequest::all().with_required_tags(tags(&required));
            let set = engine.build_candidate_set(&request).await.unwrap();
            assert_eq!(set.len(), expected, "required tags {:?}", required);
        }
    }

    #[tokio::test]
    async fn test_end_to_end_missing_binary_dropped() {
        let (_dir, store) = make_store(&[("foo", "shell"), ("bar", "shell file-read")]);
        let resolver = Arc::new(StaticResolver::new().with_binary("foo", "/usr/bin/foo"));
        let engine = FilterEngine::new(store, resolver);

        let request = CandidateRequest::all().with_required_tags(tags(&["shell"]));
        let set = engine.build_candidate_set(&request).await.unwrap();
        assert_eq!(names(&set), vec!["foo"]);
        assert_eq!(set[0].resolved_path(), Some(Path::new("/usr/bin/foo")));
        assert!(set.iter().all(CommandRecord::exists));
    }

    #[tokio::test]
    async fn test_enumeration_is_sorted() {
        let (_dir, store) = make_store(&[("zip", "shell"), ("awk", "shell"), ("nc", "")]);
        let resolver = Arc::new(
            StaticResolver::new()
                .with_binary("zip", "/usr/bin/zip")
                .with_binary("awk", "/usr/bin/awk")
                .with_binary("nc", "/usr/bin/nc"),
        );
        let engine = FilterEngine::new(store, resolver);
        let set = engine.build_candidate_set(&CandidateRequest::all()).await.unwrap();
        assert_eq!(names(&set), vec!["awk", "nc", "zip"]);
    }

    #[tokio::test]
    async fn test_explicit_names_keep_caller_order_and_duplicates() {
        let (_dir, store) = make_store(&[("awk", "shell"), ("vim", "shell"), ("less", "shell")]);
        let resolver = Arc::new(
            StaticResolver::new()
                .with_binary("awk", "/usr/bin/awk")
                .with_binary("vim", "/usr/bin/vim"),
        );
        let engine = FilterEngine::new(store, resolver);

        let request = CandidateRequest::all().with_names(tags(&["vim", "less", "awk", "vim"]));
        let set = engine.build_candidate_set(&request).await.unwrap();
        assert_eq!(names(&set), vec!["vim", "awk", "vim"]);
    }

    #[tokio::test]
    async fn test_explicit_unknown_name_is_fatal() {
        let (_dir, store) = make_store(&[("vim", "shell")]);
        let engine = FilterEngine::new(store, Arc::new(StaticResolver::new()));
        let request = CandidateRequest::all().with_names(tags(&["vim", "nosuch"]));
        let err = engine.build_candidate_set(&request).await.unwrap_err();
        assert!(matches!(err, PwnError::EntryNotFound(name) if name == "nosuch"));
    }

    #[tokio::test]
    async fn test_empty_explicit_names_yields_empty_set() {
        let (_dir, store) = make_store(&[("vim", "shell")]);
        let resolver = Arc::new(StaticResolver::new().with_binary("vim", "/usr/bin/vim"));
        let engine = FilterEngine::new(store, resolver);
        let request = CandidateRequest::all().with_names(Vec::new());
        assert!(engine.build_candidate_set(&request).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_tag_filter_runs_before_resolution() {
        let (_dir, store) = make_store(&[("a", "shell"), ("b", "sudo"), ("c", "shell sudo")]);
        let resolver = Arc::new(CountingResolver {
            inner: StaticResolver::new(),
            calls: AtomicUsize::new(0),
        });
        let engine = FilterEngine::new(store, resolver.clone());
        let request = CandidateRequest::all().with_required_tags(tags(&["sudo"]));
        engine.build_candidate_set(&request).await.unwrap();
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_unknown_required_tag_is_accepted() {
        let (_dir, store) = make_store(&[("vim", "shell")]);
        let resolver = Arc::new(StaticResolver::new().with_binary("vim", "/usr/bin/vim"));
        let engine = FilterEngine::new(store, resolver);
        let request = CandidateRequest::all().with_required_tags(tags(&["not-in-catalog"]));
        assert!(engine.build_candidate_set(&request).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_parallel_resolution_keeps_order() {
        let (_dir, store) = make_store(&[("a", "shell"), ("b", "shell"), ("c", "shell")]);
        let engine = FilterEngine::new(store, Arc::new(ReverseDelayResolver)).with_concurrency(3);
        let set = engine.build_candidate_set(&CandidateRequest::all()).await.unwrap();
        assert_eq!(names(&set), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_resolution_unavailable_propagates() {
        let (_dir, store) = make_store(&[("vim", "shell")]);
        let engine = FilterEngine::new(store, Arc::new(BrokenResolver));
        let err = engine.build_candidate_set(&CandidateRequest::all()).await.unwrap_err();
        assert!(matches!(err, PwnError::ResolutionUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_observer_sees_every_lookup() {
        let (_dir, store) = make_store(&[("a", "shell"), ("b", "shell")]);
        let engine = FilterEngine::new(store, Arc::new(StaticResolver::new()));
        let seen = std::sync::Mutex::new(Vec::new());
        engine
            .build_candidate_set_observed(&CandidateRequest::all(), |done, total| {
                seen.lock().unwrap().push((done, total));
            })
            .await
            .unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![(1, 2), (2, 2)]);
    }
}
