//! Shared test doubles for task flow tests
//!
//! `InMemoryRemote` models the hosting service's per-file contents API:
//! directories are implicit in file paths, listing an empty repository's
//! root answers not-found, and stale hashes are rejected. Call counters
//! and injectable delete failures let tests assert on worker behavior.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use gitpane_core::domain::errors::OperationError;
use gitpane_core::domain::remote_entry::{join_path, ContentHash, RemoteEntry};
use gitpane_core::domain::task::TaskId;
use gitpane_core::domain::transfer::BatchResolution;
use gitpane_core::events::{EventQueue, TaskEvent};
use gitpane_core::ports::conflict_prompt::IConflictPrompt;
use gitpane_core::ports::remote_repository::{FileContent, IRemoteRepository, RepositoryInfo};

#[derive(Debug, Clone)]
struct FileRecord {
    data: Vec<u8>,
    hash: String,
}

#[derive(Debug, Default, Clone)]
pub struct CallLog {
    pub list_directory: u32,
    pub get_path_metadata: u32,
    pub create_file: u32,
    pub update_file: u32,
    pub delete_file: u32,
}

#[derive(Default)]
struct State {
    repos: HashSet<String>,
    files: HashMap<(String, String), FileRecord>,
    hash_counter: u64,
    fail_delete: HashSet<String>,
    calls: CallLog,
}

impl State {
    fn next_hash(&mut self) -> String {
        self.hash_counter += 1;
        format!("hash-{}", self.hash_counter)
    }
}

/// In-memory `IRemoteRepository` double
#[derive(Default)]
pub struct InMemoryRemote {
    state: Mutex<State>,
}

impl InMemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_repo(&self, repo: &str) {
        self.state.lock().unwrap().repos.insert(repo.to_string());
    }

    /// Seeds a file, creating the repository implicitly
    pub fn add_file(&self, repo: &str, path: &str, data: &[u8]) -> ContentHash {
        let mut state = self.state.lock().unwrap();
        state.repos.insert(repo.to_string());
        let hash = state.next_hash();
        state.files.insert(
            (repo.to_string(), path.to_string()),
            FileRecord {
                data: data.to_vec(),
                hash: hash.clone(),
            },
        );
        ContentHash::new(hash).unwrap()
    }

    /// Makes every delete of this path fail
    pub fn fail_delete_of(&self, path: &str) {
        self.state.lock().unwrap().fail_delete.insert(path.to_string());
    }

    pub fn calls(&self) -> CallLog {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn file_data(&self, repo: &str, path: &str) -> Option<Vec<u8>> {
        self.state
            .lock()
            .unwrap()
            .files
            .get(&(repo.to_string(), path.to_string()))
            .map(|r| r.data.clone())
    }

    pub fn file_count(&self, repo: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .files
            .keys()
            .filter(|(r, _)| r == repo)
            .count()
    }
}

fn immediate_children(
    files: &HashMap<(String, String), FileRecord>,
    repo: &str,
    dir: &str,
) -> Vec<RemoteEntry> {
    let prefix = if dir.is_empty() {
        String::new()
    } else {
        format!("{}/", dir)
    };
    let mut dirs_seen = HashSet::new();
    let mut entries = Vec::new();
    for ((r, path), record) in files {
        if r != repo || !path.starts_with(&prefix) {
            continue;
        }
        let rest = &path[prefix.len()..];
        match rest.split_once('/') {
            None => {
                entries.push(RemoteEntry::file(
                    repo,
                    path.clone(),
                    Some(ContentHash::new(record.hash.clone()).unwrap()),
                    Some(record.data.len() as u64),
                ));
            }
            Some((child_dir, _)) => {
                if dirs_seen.insert(child_dir.to_string()) {
                    entries.push(RemoteEntry::dir(repo, join_path(dir, child_dir)));
                }
            }
        }
    }
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    entries
}

#[async_trait]
impl IRemoteRepository for InMemoryRemote {
    async fn list_repositories(&self) -> Result<Vec<RepositoryInfo>, OperationError> {
        let state = self.state.lock().unwrap();
        Ok(state.repos.iter().map(|name| repo_info(name)).collect())
    }

    async fn list_directory(
        &self,
        repo: &str,
        path: &str,
    ) -> Result<Vec<RemoteEntry>, OperationError> {
        let mut state = self.state.lock().unwrap();
        state.calls.list_directory += 1;
        if !state.repos.contains(repo) {
            return Err(OperationError::NotFound(repo.to_string()));
        }
        let dir = path.trim_matches('/');
        let entries = immediate_children(&state.files, repo, dir);
        if entries.is_empty() {
            // empty repo root and missing directories both answer 404
            return Err(OperationError::NotFound(format!("{}/{}", repo, dir)));
        }
        Ok(entries)
    }

    async fn read_file(&self, repo: &str, path: &str) -> Result<FileContent, OperationError> {
        let state = self.state.lock().unwrap();
        match state.files.get(&(repo.to_string(), path.to_string())) {
            Some(record) => Ok(FileContent {
                data: record.data.clone(),
                hash: ContentHash::new(record.hash.clone()).unwrap(),
            }),
            None => Err(OperationError::NotFound(path.to_string())),
        }
    }

    async fn create_file(
        &self,
        repo: &str,
        path: &str,
        data: &[u8],
        _message: &str,
    ) -> Result<(), OperationError> {
        let mut state = self.state.lock().unwrap();
        state.calls.create_file += 1;
        let key = (repo.to_string(), path.to_string());
        if state.files.contains_key(&key) {
            return Err(OperationError::VersionConflict(format!(
                "{} already exists",
                path
            )));
        }
        state.repos.insert(repo.to_string());
        let hash = state.next_hash();
        state.files.insert(
            key,
            FileRecord {
                data: data.to_vec(),
                hash,
            },
        );
        Ok(())
    }

    async fn update_file(
        &self,
        repo: &str,
        path: &str,
        data: &[u8],
        expected_hash: &ContentHash,
        _message: &str,
    ) -> Result<(), OperationError> {
        let mut state = self.state.lock().unwrap();
        state.calls.update_file += 1;
        let hash = state.next_hash();
        let key = (repo.to_string(), path.to_string());
        match state.files.get_mut(&key) {
            Some(record) if record.hash == expected_hash.as_str() => {
                record.data = data.to_vec();
                record.hash = hash;
                Ok(())
            }
            Some(_) => Err(OperationError::VersionConflict(path.to_string())),
            None => Err(OperationError::NotFound(path.to_string())),
        }
    }

    async fn delete_file(
        &self,
        repo: &str,
        path: &str,
        expected_hash: &ContentHash,
        _message: &str,
    ) -> Result<(), OperationError> {
        let mut state = self.state.lock().unwrap();
        state.calls.delete_file += 1;
        if state.fail_delete.contains(path) {
            return Err(OperationError::Generic(format!(
                "injected delete failure for {}",
                path
            )));
        }
        let key = (repo.to_string(), path.to_string());
        match state.files.get(&key) {
            Some(record) if record.hash == expected_hash.as_str() => {
                state.files.remove(&key);
                Ok(())
            }
            Some(_) => Err(OperationError::VersionConflict(path.to_string())),
            None => Err(OperationError::NotFound(path.to_string())),
        }
    }

    async fn delete_repository(&self, repo: &str) -> Result<(), OperationError> {
        let mut state = self.state.lock().unwrap();
        if !state.repos.remove(repo) {
            return Err(OperationError::NotFound(repo.to_string()));
        }
        state.files.retain(|(r, _), _| r != repo);
        Ok(())
    }

    async fn rename_repository(
        &self,
        repo: &str,
        new_name: &str,
    ) -> Result<String, OperationError> {
        let mut state = self.state.lock().unwrap();
        if !state.repos.remove(repo) {
            return Err(OperationError::NotFound(repo.to_string()));
        }
        state.repos.insert(new_name.to_string());
        let moved: Vec<_> = state
            .files
            .keys()
            .filter(|(r, _)| r == repo)
            .cloned()
            .collect();
        for key in moved {
            if let Some(record) = state.files.remove(&key) {
                state.files.insert((new_name.to_string(), key.1), record);
            }
        }
        Ok(new_name.to_string())
    }

    async fn get_repository_metadata(
        &self,
        repo: &str,
    ) -> Result<RepositoryInfo, OperationError> {
        let state = self.state.lock().unwrap();
        if !state.repos.contains(repo) {
            return Err(OperationError::NotFound(repo.to_string()));
        }
        Ok(repo_info(repo))
    }

    async fn get_path_metadata(
        &self,
        repo: &str,
        path: &str,
    ) -> Result<RemoteEntry, OperationError> {
        let mut state = self.state.lock().unwrap();
        state.calls.get_path_metadata += 1;
        let trimmed = path.trim_matches('/');
        if let Some(record) = state.files.get(&(repo.to_string(), trimmed.to_string())) {
            return Ok(RemoteEntry::file(
                repo,
                trimmed,
                Some(ContentHash::new(record.hash.clone()).unwrap()),
                Some(record.data.len() as u64),
            ));
        }
        let dir_prefix = format!("{}/", trimmed);
        let is_dir = state
            .files
            .keys()
            .any(|(r, p)| r == repo && p.starts_with(&dir_prefix));
        if is_dir {
            Ok(RemoteEntry::dir(repo, trimmed))
        } else {
            Err(OperationError::NotFound(trimmed.to_string()))
        }
    }
}

fn repo_info(name: &str) -> RepositoryInfo {
    RepositoryInfo {
        name: name.to_string(),
        description: Some("test repository".to_string()),
        language: Some("Rust".to_string()),
        default_branch: "main".to_string(),
        private: false,
        stars: 0,
        forks: 0,
        html_url: format!("https://github.com/octo/{}", name),
        clone_url: format!("https://github.com/octo/{}.git", name),
        ssh_url: format!("git@github.com:octo/{}.git", name),
        created_at: None,
        updated_at: None,
    }
}

/// Prompt that always answers a scripted decision
pub struct ScriptedPrompt(pub BatchResolution);

impl IConflictPrompt for ScriptedPrompt {
    fn decide(&self, _destination: &str, _conflicts: &[String]) -> BatchResolution {
        self.0
    }
}

/// Collects a task's events until its final event arrives
pub async fn wait_for_final(queue: &mut EventQueue, id: TaskId) -> Vec<TaskEvent> {
    let mut events = Vec::new();
    while let Some(event) = queue.recv().await {
        let mine = event.task_id == Some(id);
        let done = mine && event.is_final;
        if mine {
            events.push(event);
        }
        if done {
            return events;
        }
    }
    panic!("queue closed before task {} finished", id);
}
