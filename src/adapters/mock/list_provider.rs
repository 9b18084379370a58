//! Mock list provider for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::lock;
use crate::error::RemoteError;
use crate::models::{ItemMode, ListEntity};
use crate::traits::ListProvider;

/// Mock list provider.
///
/// Serves a configurable list entity and records complaints.
#[derive(Debug)]
pub struct MockListProvider {
    list: Mutex<ListEntity>,
    /// Errors returned by the next lookups, in order
    lookup_failures: Mutex<VecDeque<RemoteError>>,
    /// Whether report should fail
    report_should_fail: Mutex<bool>,
    lookups: Mutex<usize>,
    reports: Mutex<Vec<(String, String)>>,
}

impl MockListProvider {
    pub fn new(list: ListEntity) -> Self {
        Self {
            list: Mutex::new(list),
            lookup_failures: Mutex::new(VecDeque::new()),
            report_should_fail: Mutex::new(false),
            lookups: Mutex::new(0),
            reports: Mutex::new(Vec::new()),
        }
    }

    /// Replace the entity returned by later lookups.
    pub fn set_list(&self, list: ListEntity) {
        *lock(&self.list) = list;
    }

    pub fn fail_next_lookups(&self, count: usize, error: RemoteError) {
        let mut failures = lock(&self.lookup_failures);
        for _ in 0..count {
            failures.push_back(error.clone());
        }
    }

    /// Configure whether report should fail.
    pub fn set_report_should_fail(&self, should_fail: bool) {
        *lock(&self.report_should_fail) = should_fail;
    }

    /// Number of lookups made, failed ones included.
    pub fn lookup_count(&self) -> usize {
        *lock(&self.lookups)
    }

    /// Recorded (list id, complaint) pairs.
    pub fn reports(&self) -> Vec<(String, String)> {
        lock(&self.reports).clone()
    }
}

#[async_trait]
impl ListProvider for MockListProvider {
    async fn get_list_by_id(
        &self,
        list_id: &str,
        _mode: ItemMode,
    ) -> Result<ListEntity, RemoteError> {
        *lock(&self.lookups) += 1;
        if let Some(error) = lock(&self.lookup_failures).pop_front() {
            return Err(error);
        }

        let list = lock(&self.list).clone();
        if list.id != list_id {
            return Err(RemoteError::HttpStatus {
                status: 404,
                message: format!("list {} not found", list_id),
            });
        }
        Ok(list)
    }

    async fn report_list(&self, list: &ListEntity, complaint: &str) -> Result<(), RemoteError> {
        if *lock(&self.report_should_fail) {
            return Err(RemoteError::HttpStatus {
                status: 500,
                message: "Mock report failure".to_string(),
            });
        }
        lock(&self.reports).push((list.id.clone(), complaint.to_string()));
        Ok(())
    }
}
