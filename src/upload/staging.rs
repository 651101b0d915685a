use super::service::ShareService;
use super::types::{FileKey, ShareResult, StagedFile};
use crate::error::ShareError;
use std::collections::HashSet;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagingPhase {
    Empty,
    Staging,
    Submitting,
    Success(ShareResult),
}

/// Ordered list of files waiting to be sent, de-duplicated by name and size.
#[derive(Debug, Default)]
pub struct StagingArea {
    files: Vec<StagedFile>,
    submitting: bool,
    result: Option<ShareResult>,
}

impl StagingArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[StagedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }

    pub fn phase(&self) -> StagingPhase {
        if let Some(result) = &self.result {
            StagingPhase::Success(result.clone())
        } else if self.submitting {
            StagingPhase::Submitting
        } else if self.files.is_empty() {
            StagingPhase::Empty
        } else {
            StagingPhase::Staging
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.submitting || self.result.is_some()
    }

    pub fn can_submit(&self) -> bool {
        !self.is_frozen() && !self.files.is_empty()
    }

    pub fn result(&self) -> Option<&ShareResult> {
        self.result.as_ref()
    }

    /// Returns how many files were added.
    pub fn add_files(&mut self, incoming: impl IntoIterator<Item = StagedFile>) -> usize {
        if self.is_frozen() {
            debug!("Staging list is frozen, ignoring incoming files");
            return 0;
        }

        let mut seen: HashSet<FileKey> = self.files.iter().map(StagedFile::key).collect();
        let before = self.files.len();

        for file in incoming {
            if seen.insert(file.key()) {
                debug!("Staged {} ({} bytes)", file.name, file.size);
                self.files.push(file);
            } else {
                debug!("Skipping duplicate {} ({} bytes)", file.name, file.size);
            }
        }

        self.files.len() - before
    }

    pub fn remove_file(&mut self, index: usize) -> Option<StagedFile> {
        if self.is_frozen() {
            debug!("Staging list is frozen, ignoring removal of #{}", index);
            return None;
        }
        if index >= self.files.len() {
            warn!(
                "Cannot remove #{}: only {} files staged",
                index,
                self.files.len()
            );
            return None;
        }

        let removed = self.files.remove(index);
        debug!("Removed {} from staging", removed.name);
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn begin_submit(&mut self) -> Result<Vec<StagedFile>, ShareError> {
        if self.submitting {
            return Err(ShareError::SubmitInProgress);
        }
        if self.files.is_empty() {
            return Err(ShareError::EmptyStaging);
        }

        info!(
            "Submitting {} files ({} bytes)",
            self.files.len(),
            self.total_size()
        );
        self.submitting = true;
        Ok(self.files.clone())
    }

    /// On failure the files are kept for a retry.
    pub fn finish_submit(
        &mut self,
        outcome: Result<ShareResult, ShareError>,
    ) -> Result<ShareResult, ShareError> {
        self.submitting = false;
        match outcome {
            Ok(result) => {
                info!("Upload succeeded with share code {}", result.share_code);
                self.clear();
                self.result = Some(result.clone());
                Ok(result)
            }
            Err(e) => {
                warn!("Upload failed, keeping {} staged files: {}", self.files.len(), e);
                Err(e)
            }
        }
    }

    pub async fn submit<S>(&mut self, service: &S) -> Result<ShareResult, ShareError>
    where
        S: ShareService + ?Sized,
    {
        let files = self.begin_submit()?;
        let outcome = service.upload(&files).await;
        self.finish_submit(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn file(name: &str, size: usize) -> StagedFile {
        StagedFile::from_bytes(name, vec![0u8; size])
    }

    fn names(area: &StagingArea) -> Vec<&str> {
        area.files().iter().map(|f| f.name.as_str()).collect()
    }

    struct FakeService {
        outcome: Mutex<Option<Result<ShareResult, ShareError>>>,
        seen: Mutex<Vec<String>>,
    }

    impl FakeService {
        fn answering(outcome: Result<ShareResult, ShareError>) -> Self {
            Self {
                outcome: Mutex::new(Some(outcome)),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ShareService for FakeService {
        async fn upload(&self, files: &[StagedFile]) -> Result<ShareResult, ShareError> {
            self.seen
                .lock()
                .unwrap()
                .extend(files.iter().map(|f| f.name.clone()));
            self.outcome
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(ShareError::Network("no answer".into())))
        }
    }

    #[test]
    fn same_file_twice_in_one_batch_is_staged_once() {
        let mut area = StagingArea::new();
        let added = area.add_files([file("a.txt", 10), file("a.txt", 10)]);
        assert_eq!(added, 1);
        assert_eq!(area.len(), 1);
    }

    #[test]
    fn duplicates_across_batches_keep_first_seen_order() {
        let mut area = StagingArea::new();
        area.add_files([file("a.txt", 10), file("b.txt", 20)]);
        area.add_files([file("c.txt", 5), file("a.txt", 10), file("b.txt", 21)]);

        assert_eq!(names(&area), vec!["a.txt", "b.txt", "c.txt", "b.txt"]);
        let keys: HashSet<FileKey> = area.files().iter().map(StagedFile::key).collect();
        assert_eq!(keys.len(), area.len());
    }

    #[test]
    fn random_batches_never_stage_a_key_twice() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let pool = ["a.txt", "b.txt", "c.png", "d"];
        for seed in 0..50u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut area = StagingArea::new();
            let mut expected: Vec<FileKey> = Vec::new();

            for _ in 0..rng.gen_range(1..8) {
                let batch: Vec<StagedFile> = (0..rng.gen_range(0..6))
                    .map(|_| file(pool[rng.gen_range(0..pool.len())], rng.gen_range(0..3)))
                    .collect();
                let before = expected.len();
                for f in &batch {
                    if !expected.contains(&f.key()) {
                        expected.push(f.key());
                    }
                }

                let added = area.add_files(batch);
                assert_eq!(added, expected.len() - before, "seed {}", seed);
            }

            let staged: Vec<FileKey> = area.files().iter().map(StagedFile::key).collect();
            assert_eq!(staged, expected, "seed {}", seed);
        }
    }

    #[test]
    fn remove_takes_entry_at_index() {
        let mut area = StagingArea::new();
        area.add_files([file("a", 1), file("b", 2), file("c", 3)]);

        let removed = area.remove_file(1).unwrap();
        assert_eq!(removed.name, "b");
        assert_eq!(names(&area), vec!["a", "c"]);

        // index is resolved against the list as it is now
        let removed = area.remove_file(1).unwrap();
        assert_eq!(removed.name, "c");
        assert_eq!(area.len(), 1);
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let mut area = StagingArea::new();
        area.add_files([file("a", 1)]);
        assert!(area.remove_file(3).is_none());
        assert_eq!(area.len(), 1);
    }

    #[test]
    fn removed_file_can_be_staged_again() {
        let mut area = StagingArea::new();
        area.add_files([file("a", 1)]);
        area.remove_file(0);
        assert_eq!(area.phase(), StagingPhase::Empty);
        assert_eq!(area.add_files([file("a", 1)]), 1);
    }

    #[test]
    fn phases_follow_the_list() {
        let mut area = StagingArea::new();
        assert_eq!(area.phase(), StagingPhase::Empty);
        assert!(!area.can_submit());

        area.add_files([file("a", 1)]);
        assert_eq!(area.phase(), StagingPhase::Staging);
        assert!(area.can_submit());

        area.begin_submit().unwrap();
        assert_eq!(area.phase(), StagingPhase::Submitting);
        assert!(!area.can_submit());
    }

    #[test]
    fn list_is_frozen_while_submitting() {
        let mut area = StagingArea::new();
        area.add_files([file("a", 1)]);
        area.begin_submit().unwrap();

        assert_eq!(area.add_files([file("b", 2)]), 0);
        assert!(area.remove_file(0).is_none());
        assert!(matches!(
            area.begin_submit(),
            Err(ShareError::SubmitInProgress)
        ));
        assert_eq!(area.len(), 1);
    }

    #[tokio::test]
    async fn submit_with_nothing_staged_fails() {
        let mut area = StagingArea::new();
        let service = FakeService::answering(Ok(ShareResult::new("123456", "https://x/d/123456")));

        assert!(!area.can_submit());
        let err = area.submit(&service).await.unwrap_err();
        assert!(matches!(err, ShareError::EmptyStaging));
        assert!(area.is_empty());
        assert_eq!(area.phase(), StagingPhase::Empty);
        assert!(service.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn successful_submit_clears_and_ends_in_success() {
        let mut area = StagingArea::new();
        area.add_files([file("a.txt", 10), file("b.txt", 20)]);
        let service = FakeService::answering(Ok(ShareResult::new("123456", "https://x/d/123456")));

        let result = area.submit(&service).await.unwrap();

        assert_eq!(*service.seen.lock().unwrap(), vec!["a.txt", "b.txt"]);
        assert_eq!(result.code_slots().iter().collect::<String>(), "123456");
        assert_eq!(result.display_url(), "x/d/123456");
        assert!(area.is_empty());
        assert_eq!(area.phase(), StagingPhase::Success(result));

        // no way back to staging
        assert_eq!(area.add_files([file("c.txt", 1)]), 0);
        assert!(!area.can_submit());
    }

    #[tokio::test]
    async fn failed_submit_keeps_files_for_retry() {
        let mut area = StagingArea::new();
        area.add_files([file("a.txt", 10)]);
        let service = FakeService::answering(Err(ShareError::Network("503".into())));

        let err = area.submit(&service).await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(area.phase(), StagingPhase::Staging);
        assert_eq!(names(&area), vec!["a.txt"]);
        assert!(area.can_submit());

        let service = FakeService::answering(Ok(ShareResult::new("654321", "http://h/d/654321")));
        assert!(area.submit(&service).await.is_ok());
    }
}
