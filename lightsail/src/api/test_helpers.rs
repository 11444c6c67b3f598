//! Test helpers for the Lightsail API

#![allow(clippy::disallowed_methods)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{ApiError, ContainerService, LightsailApi, Operation, RelationalDatabase};

/// Scripted responses, one per call; the last successful answer repeats
/// once the script runs out.
struct Script<T> {
    queue: Mutex<VecDeque<Result<T, ApiError>>>,
    last: Mutex<Option<T>>,
}

impl<T: Clone> Script<T> {
    fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            last: Mutex::new(None),
        }
    }

    fn push(&self, answer: Result<T, ApiError>) {
        self.queue.lock().unwrap().push_back(answer);
    }

    fn next(&self) -> Result<T, ApiError> {
        let answer = self.queue.lock().unwrap().pop_front();
        match answer {
            Some(Ok(value)) => {
                *self.last.lock().unwrap() = Some(value.clone());
                Ok(value)
            }
            Some(Err(err)) => Err(err),
            None => Ok(self
                .last
                .lock()
                .unwrap()
                .clone()
                .expect("mock script exhausted")),
        }
    }
}

pub(crate) struct MockApi {
    operations: Script<Operation>,
    databases: Script<RelationalDatabase>,
    services: Script<ContainerService>,
    calls: AtomicUsize,
}

impl MockApi {
    pub(crate) fn new() -> Self {
        Self {
            operations: Script::new(),
            databases: Script::new(),
            services: Script::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_operation_statuses(self, statuses: &[&str]) -> Self {
        for status in statuses {
            self.operations.push(Ok(operation("op-1", Some(status))));
        }
        self
    }

    pub(crate) fn with_operation(self, answer: Result<Operation, ApiError>) -> Self {
        self.operations.push(answer);
        self
    }

    pub(crate) fn with_database_states(self, states: &[&str]) -> Self {
        for state in states {
            self.databases.push(Ok(database("db-1", Some(state), Some(false))));
        }
        self
    }

    pub(crate) fn with_backup_retention(self, flags: &[bool]) -> Self {
        for flag in flags {
            self.databases.push(Ok(database("db-1", Some("available"), Some(*flag))));
        }
        self
    }

    pub(crate) fn with_database(self, answer: Result<RelationalDatabase, ApiError>) -> Self {
        self.databases.push(answer);
        self
    }

    pub(crate) fn with_service_states(self, states: &[&str]) -> Self {
        for state in states {
            self.services.push(Ok(ContainerService {
                name: "svc-1".to_string(),
                state: Some(state.to_string()),
                url: None,
            }));
        }
        self
    }

    pub(crate) fn with_service(self, answer: Result<ContainerService, ApiError>) -> Self {
        self.services.push(answer);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub(crate) fn operation(id: &str, status: Option<&str>) -> Operation {
    Operation {
        id: id.to_string(),
        status: status.map(str::to_string),
        operation_type: Some("CreateInstance".to_string()),
        resource_name: Some("web-1".to_string()),
        resource_type: Some("Instance".to_string()),
        error_code: None,
        error_details: None,
    }
}

pub(crate) fn database(
    name: &str,
    state: Option<&str>,
    retention: Option<bool>,
) -> RelationalDatabase {
    RelationalDatabase {
        name: name.to_string(),
        state: state.map(str::to_string),
        backup_retention_enabled: retention,
        engine: Some("mysql".to_string()),
    }
}

#[async_trait]
impl LightsailApi for MockApi {
    async fn get_operation(&self, _operation_id: &str) -> Result<Operation, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.operations.next()
    }

    async fn get_relational_database(&self, _name: &str) -> Result<RelationalDatabase, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.databases.next()
    }

    async fn get_container_service(&self, _name: &str) -> Result<ContainerService, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.services.next()
    }
}
