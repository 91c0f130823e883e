//! Mock collaborators for reconciler testing
//!
//! These are test utilities - not every knob is used by every test but
//! they are available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use clu::advisory::{Advisory, AdvisoryChecker, AdvisoryStatus};
use clu::composer::PackageManager;
use clu::error::{Error, Result};
use clu::git::Vcs;
use clu::provider::GitProvider;
use clu::types::{CreatedPr, PrOptions, PrState, Provider, RepoRef};
use std::collections::{BTreeMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Call record for `create_pull_request`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePrCall {
    pub source_branch: String,
    pub title: String,
    pub description: Option<String>,
}

/// Scriptable mock provider with call tracking and error injection
pub struct MockProvider {
    repo: RepoRef,
    next_pr_number: AtomicU64,
    /// Open PRs, id -> source branch; served by list queries
    open_prs: Mutex<BTreeMap<u64, String>>,
    /// When non-empty, each list call pops the front response instead of
    /// reading `open_prs`
    list_script: Mutex<VecDeque<BTreeMap<u64, String>>>,
    clone_calls: Mutex<Vec<PathBuf>>,
    create_calls: Mutex<Vec<CreatePrCall>>,
    close_calls: Mutex<Vec<u64>>,
    reject_create: Mutex<bool>,
    reject_close: Mutex<bool>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            repo: RepoRef {
                provider: Provider::GitHub,
                host: None,
                owner: "acme".to_string(),
                project: "example".to_string(),
            },
            next_pr_number: AtomicU64::new(1),
            open_prs: Mutex::new(BTreeMap::new()),
            list_script: Mutex::new(VecDeque::new()),
            clone_calls: Mutex::new(Vec::new()),
            create_calls: Mutex::new(Vec::new()),
            close_calls: Mutex::new(Vec::new()),
            reject_create: Mutex::new(false),
            reject_close: Mutex::new(false),
        }
    }

    /// Seed an open PR served by list queries.
    pub fn with_open_pr(self, id: u64, source_branch: &str) -> Self {
        self.open_prs
            .lock()
            .unwrap()
            .insert(id, source_branch.to_string());
        self
    }

    /// Script successive list responses (first call pops the front).
    pub fn with_list_script(self, responses: Vec<BTreeMap<u64, String>>) -> Self {
        *self.list_script.lock().unwrap() = responses.into();
        self
    }

    /// Make `create_pull_request` report an ordinary API rejection.
    pub fn reject_create(self) -> Self {
        *self.reject_create.lock().unwrap() = true;
        self
    }

    /// Make `close_pull_request` report an ordinary API rejection.
    pub fn reject_close(self) -> Self {
        *self.reject_close.lock().unwrap() = true;
        self
    }

    pub fn clone_calls(&self) -> Vec<PathBuf> {
        self.clone_calls.lock().unwrap().clone()
    }

    pub fn create_calls(&self) -> Vec<CreatePrCall> {
        self.create_calls.lock().unwrap().clone()
    }

    pub fn close_calls(&self) -> Vec<u64> {
        self.close_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GitProvider for MockProvider {
    async fn clone_repository(&self, destination: &Path) -> Result<()> {
        self.clone_calls
            .lock()
            .unwrap()
            .push(destination.to_path_buf());
        Ok(())
    }

    async fn create_pull_request(
        &self,
        source_branch: &str,
        title: &str,
        options: &PrOptions,
    ) -> Result<Option<CreatedPr>> {
        self.create_calls.lock().unwrap().push(CreatePrCall {
            source_branch: source_branch.to_string(),
            title: title.to_string(),
            description: options.description.clone(),
        });

        if *self.reject_create.lock().unwrap() {
            return Ok(None);
        }

        let id = self.next_pr_number.fetch_add(1, Ordering::SeqCst);
        self.open_prs
            .lock()
            .unwrap()
            .insert(id, source_branch.to_string());
        Ok(Some(CreatedPr {
            id,
            title: title.to_string(),
            url: format!("https://example.com/acme/example/pull/{id}"),
        }))
    }

    async fn close_pull_request(&self, id: u64) -> Result<bool> {
        self.close_calls.lock().unwrap().push(id);
        if *self.reject_close.lock().unwrap() {
            return Ok(false);
        }
        self.open_prs.lock().unwrap().remove(&id);
        Ok(true)
    }

    async fn list_pull_request_branches(&self, state: PrState) -> Result<BTreeMap<u64, String>> {
        if let Some(scripted) = self.list_script.lock().unwrap().pop_front() {
            return Ok(scripted);
        }
        match state {
            PrState::Open | PrState::All => Ok(self.open_prs.lock().unwrap().clone()),
            PrState::Closed => Ok(BTreeMap::new()),
        }
    }

    fn repo(&self) -> &RepoRef {
        &self.repo
    }
}

/// Recording mock VCS with scripted `status_short` responses
pub struct MockVcs {
    current_branch: String,
    /// Successive `status_short` responses; empty string once exhausted
    status_script: Mutex<VecDeque<String>>,
    ops: Mutex<Vec<String>>,
}

impl MockVcs {
    pub fn new() -> Self {
        Self {
            current_branch: "master".to_string(),
            status_script: Mutex::new(VecDeque::new()),
            ops: Mutex::new(Vec::new()),
        }
    }

    /// Script successive lock-file status responses. An empty string means
    /// "no drift"; anything else means the lock file changed.
    pub fn with_status_script(self, responses: &[&str]) -> Self {
        *self.status_script.lock().unwrap() =
            responses.iter().map(ToString::to_string).collect();
        self
    }

    /// Recorded operations, in order, e.g. `"push origin clu-..."`.
    pub fn ops(&self) -> Vec<String> {
        self.ops.lock().unwrap().clone()
    }

    pub fn ops_matching(&self, needle: &str) -> Vec<String> {
        self.ops()
            .into_iter()
            .filter(|op| op.contains(needle))
            .collect()
    }

    fn record(&self, op: String) {
        self.ops.lock().unwrap().push(op);
    }
}

#[async_trait]
impl Vcs for MockVcs {
    async fn fetch(&self, _dir: &Path) -> Result<()> {
        self.record("fetch".to_string());
        Ok(())
    }

    async fn checkout(&self, _dir: &Path, branch: &str, force: bool) -> Result<()> {
        if force {
            self.record(format!("checkout -f {branch}"));
        } else {
            self.record(format!("checkout {branch}"));
        }
        Ok(())
    }

    async fn create_branch(&self, _dir: &Path, name: &str) -> Result<()> {
        self.record(format!("checkout -b {name}"));
        Ok(())
    }

    async fn current_branch(&self, _dir: &Path) -> Result<String> {
        Ok(self.current_branch.clone())
    }

    async fn status_short(&self, _dir: &Path, pathspec: &str) -> Result<String> {
        self.record(format!("status -s {pathspec}"));
        Ok(self
            .status_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default())
    }

    async fn commit_all(&self, _dir: &Path, message: &str) -> Result<()> {
        let first_line = message.lines().next().unwrap_or_default().to_string();
        self.record(format!("commit -am {first_line}"));
        Ok(())
    }

    async fn push(&self, _dir: &Path, remote: &str, branch: &str) -> Result<()> {
        self.record(format!("push {remote} {branch}"));
        Ok(())
    }

    async fn push_delete(&self, _dir: &Path, remote: &str, branch: &str) -> Result<()> {
        self.record(format!("push {remote} --delete {branch}"));
        Ok(())
    }

    async fn delete_local_branch(&self, _dir: &Path, name: &str, force: bool) -> Result<()> {
        let flag = if force { "-D" } else { "-d" };
        self.record(format!("branch {flag} {name}"));
        Ok(())
    }
}

/// Recording mock package manager
pub struct MockComposer {
    update_lines: Vec<String>,
    install_calls: AtomicU64,
    update_calls: AtomicU64,
}

impl MockComposer {
    pub fn new() -> Self {
        Self {
            update_lines: vec![
                "Loading composer repositories with package information".to_string(),
                "Updating dependencies".to_string(),
                "  - Updating acme/widget (1.0.0 => 1.0.1)".to_string(),
            ],
            install_calls: AtomicU64::new(0),
            update_calls: AtomicU64::new(0),
        }
    }

    pub fn install_calls(&self) -> u64 {
        self.install_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> u64 {
        self.update_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PackageManager for MockComposer {
    async fn install(&self, _dir: &Path) -> Result<()> {
        self.install_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn update(&self, _dir: &Path) -> Result<Vec<String>> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.update_lines.clone())
    }
}

/// Mock advisory checker returning a fixed result
pub struct MockAdvisory {
    advisory: Advisory,
}

impl MockAdvisory {
    pub fn with_status(status: AdvisoryStatus) -> Self {
        let message = match status {
            AdvisoryStatus::Unknown => String::new(),
            AdvisoryStatus::Clean => "\n\nNo known vulnerabilities found.".to_string(),
            AdvisoryStatus::Vulnerable => {
                "\n\n1 package has known vulnerabilities: acme/widget (CVE-2026-0001)".to_string()
            }
        };
        Self {
            advisory: Advisory { message, status },
        }
    }
}

#[async_trait]
impl AdvisoryChecker for MockAdvisory {
    async fn check(&self, _lock_file: &Path) -> Advisory {
        self.advisory.clone()
    }
}

/// Convenience: a VCS error for injection tests
pub fn vcs_error(msg: &str) -> Error {
    Error::Git(msg.to_string())
}
