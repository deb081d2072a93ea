//! In-process stand-in for the Kit engine, served with axum on a random port.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

pub const PREFIX: &str = "workspaces";

type Shared = Arc<Mutex<Engine>>;
type Failure = (StatusCode, Json<Value>);
type EngineResult = Result<Json<Value>, Failure>;

#[derive(Default)]
pub struct Engine {
    calls: Vec<String>,
    repos: HashMap<String, Repo>,
}

struct Commit {
    hash: String,
    message: String,
    tree: Value,
}

struct Repo {
    branches: Vec<String>,
    current: String,
    heads: HashMap<String, Value>,
    commits: Vec<Commit>,
    staged: Vec<String>,
    worktree: Value,
}

impl Repo {
    fn new(user: &str) -> Self {
        let seed = json!({
            "name": user,
            "type": "folder",
            "path": user,
            "children": [{
                "name": "README.md",
                "type": "file",
                "content": "# seeded by engine",
                "path": format!("{}/README.md", user),
                "children": null,
            }],
        });
        Self {
            branches: vec!["main".to_string()],
            current: "main".to_string(),
            heads: HashMap::from([("main".to_string(), seed.clone())]),
            commits: Vec::new(),
            staged: Vec::new(),
            worktree: seed,
        }
    }

    fn head(&self) -> Value {
        self.heads
            .get(&self.current)
            .cloned()
            .unwrap_or_else(|| self.worktree.clone())
    }
}

pub struct MockEngine {
    pub api_url: String,
    state: Shared,
    shutdown: Option<tokio::sync::oneshot::Sender<()>>,
    thread: Option<thread::JoinHandle<()>>,
}

impl MockEngine {
    /// Endpoints hit so far, e.g. `["init", "add"]`.
    pub fn calls(&self) -> Vec<String> {
        lock(&self.state).calls.clone()
    }
}

impl Drop for MockEngine {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

pub fn spawn_engine() -> Result<MockEngine> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").context("bind mock engine")?;
    listener
        .set_nonblocking(true)
        .context("set listener non-blocking")?;
    let addr = listener.local_addr().context("mock engine addr")?;

    let state: Shared = Arc::default();
    let app = router(state.clone());
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let handle = thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("build tokio runtime");
        rt.block_on(async move {
            let listener =
                tokio::net::TcpListener::from_std(listener).expect("adopt std listener");
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = rx.await;
                })
                .await
                .expect("serve mock engine");
        });
    });

    let base_url = format!("http://{}", addr);
    wait_for_healthz(&base_url)?;

    Ok(MockEngine {
        api_url: format!("{}/api", base_url),
        state,
        shutdown: Some(tx),
        thread: Some(handle),
    })
}

pub fn wait_for_healthz(base_url: &str) -> Result<()> {
    let client = reqwest::blocking::Client::new();
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("mock engine did not become healthy at {}/healthz", base_url);
        }
        match client.get(format!("{}/healthz", base_url)).send() {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => thread::sleep(Duration::from_millis(20)),
        }
    }
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route("/api/init", post(init))
        .route("/api/add", post(add))
        .route("/api/commit", post(commit))
        .route("/api/status", post(status))
        .route("/api/log", post(log))
        .route("/api/branch", post(branch))
        .route("/api/branches", get(branches))
        .route("/api/checkout", post(checkout))
        .route("/api/restore", post(restore))
        .route("/api/reset", post(reset))
        .with_state(state)
}

fn lock(state: &Shared) -> MutexGuard<'_, Engine> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

fn fail(status: StatusCode, msg: impl Into<String>) -> Failure {
    (status, Json(json!({ "error": msg.into() })))
}

fn str_field(body: &Value, key: &str) -> Result<String, Failure> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| fail(StatusCode::BAD_REQUEST, format!("{} is required", key)))
}

fn str_list(body: &Value, key: &str) -> Vec<String> {
    body.get(key)
        .and_then(Value::as_array)
        .map(|xs| {
            xs.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

impl Engine {
    fn repo(&mut self, op: &str, body: &Value) -> Result<(String, &mut Repo), Failure> {
        self.calls.push(op.to_string());
        let user = str_field(body, "username")?;
        match self.repos.get_mut(&user) {
            Some(repo) => Ok((user, repo)),
            None => Err(fail(StatusCode::BAD_REQUEST, "not a kit repository")),
        }
    }
}

fn has_path(node: &Value, path: &str) -> bool {
    if node.get("path").and_then(Value::as_str) == Some(path) {
        return true;
    }
    node.get("children")
        .and_then(Value::as_array)
        .is_some_and(|cs| cs.iter().any(|c| has_path(c, path)))
}

fn prefixed(node: &Value, prefix: &str) -> Value {
    let mut out = node.clone();
    if let Some(path) = node.get("path").and_then(Value::as_str) {
        out["path"] = Value::String(format!("{}{}", prefix, path));
    }
    if let Some(children) = node.get("children").and_then(Value::as_array) {
        out["children"] = Value::Array(children.iter().map(|c| prefixed(c, prefix)).collect());
    }
    out
}

/// The engine's on-disk layout: a `<prefix>/<user>` folder wrapping the workspace.
fn engine_layout(tree: &Value, user: &str) -> Value {
    json!({
        "name": user,
        "type": "folder",
        "path": format!("{}/{}", PREFIX, user),
        "children": [prefixed(tree, &format!("{}/{}/", PREFIX, user))],
    })
}

async fn init(State(state): State<Shared>, Json(body): Json<Value>) -> EngineResult {
    let mut engine = lock(&state);
    engine.calls.push("init".to_string());
    let user = str_field(&body, "username")?;
    if engine.repos.contains_key(&user) {
        return Err(fail(StatusCode::BAD_REQUEST, "repository already exists"));
    }
    engine.repos.insert(user.clone(), Repo::new(&user));
    Ok(Json(json!({ "message": "Initialized empty Kit repository" })))
}

async fn add(State(state): State<Shared>, Json(body): Json<Value>) -> EngineResult {
    let mut engine = lock(&state);
    let (user, repo) = engine.repo("add", &body)?;
    let tree = body.get("rootFolder").cloned().unwrap_or(Value::Null);
    let files = str_list(&body, "files");
    for f in &files {
        if !has_path(&tree, &format!("{}/{}", user, f)) {
            return Err(fail(
                StatusCode::BAD_REQUEST,
                format!("pathspec '{}' did not match any files", f),
            ));
        }
    }
    for f in files {
        if !repo.staged.contains(&f) {
            repo.staged.push(f);
        }
    }
    repo.worktree = tree;
    Ok(Json(json!({})))
}

async fn commit(State(state): State<Shared>, Json(body): Json<Value>) -> EngineResult {
    let mut engine = lock(&state);
    let (_, repo) = engine.repo("commit", &body)?;
    let message = str_field(&body, "message")?;
    if repo.staged.is_empty() {
        return Err(fail(StatusCode::BAD_REQUEST, "nothing to commit"));
    }
    let hash = format!("{:07x}", 0xa11ce00 + repo.commits.len());
    repo.commits.push(Commit {
        hash: hash.clone(),
        message: format!("{}\n", message),
        tree: repo.worktree.clone(),
    });
    repo.heads.insert(repo.current.clone(), repo.worktree.clone());
    repo.staged.clear();
    Ok(Json(json!({ "hash": hash })))
}

async fn status(State(state): State<Shared>, Json(body): Json<Value>) -> EngineResult {
    let mut engine = lock(&state);
    let (_, repo) = engine.repo("status", &body)?;
    if repo.staged.is_empty() {
        return Ok(Json(Value::Null));
    }
    Ok(Json(json!({
        "branch": repo.current,
        "deleted": null,
        "staged": repo.staged,
        "modified": null,
        "untracked": null,
    })))
}

async fn log(State(state): State<Shared>, Json(body): Json<Value>) -> EngineResult {
    let mut engine = lock(&state);
    let (user, repo) = engine.repo("log", &body)?;
    let logs: Vec<Value> = repo
        .commits
        .iter()
        .rev()
        .map(|c| {
            json!({
                "Hash": c.hash,
                "Message": c.message,
                "Author": user,
                "Date": "2025-03-04T05:06:07Z",
            })
        })
        .collect();
    if logs.is_empty() {
        return Ok(Json(json!({ "data": { "logs": null } })));
    }
    Ok(Json(json!({ "data": { "logs": logs } })))
}

async fn branch(State(state): State<Shared>, Json(body): Json<Value>) -> EngineResult {
    let mut engine = lock(&state);
    let (_, repo) = engine.repo("branch", &body)?;
    let name = str_field(&body, "branch")?;
    if repo.branches.contains(&name) {
        return Err(fail(
            StatusCode::BAD_REQUEST,
            format!("a branch named '{}' already exists", name),
        ));
    }
    let head = repo.head();
    repo.heads.insert(name.clone(), head);
    repo.branches.push(name);
    Ok(Json(json!({})))
}

async fn branches(
    State(state): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> EngineResult {
    let body = json!({ "username": query.get("username") });
    let mut engine = lock(&state);
    let (_, repo) = engine.repo("branches", &body)?;
    let mut names = repo.branches.clone();
    names.sort();
    Ok(Json(json!({ "data": { "branches": names } })))
}

async fn checkout(State(state): State<Shared>, Json(body): Json<Value>) -> EngineResult {
    let mut engine = lock(&state);
    let (user, repo) = engine.repo("checkout", &body)?;
    let name = str_field(&body, "branch")?;
    if !repo.branches.contains(&name) {
        return Err(fail(
            StatusCode::NOT_FOUND,
            format!("branch '{}' not found", name),
        ));
    }
    repo.current = name;
    repo.worktree = repo.head();
    Ok(Json(json!({ "data": { "data": engine_layout(&repo.worktree, &user) } })))
}

async fn restore(State(state): State<Shared>, Json(body): Json<Value>) -> EngineResult {
    let mut engine = lock(&state);
    let (user, repo) = engine.repo("restore", &body)?;
    let head = repo.head();
    let files: Vec<Value> = str_list(&body, "files")
        .into_iter()
        .map(|f| {
            let restored = has_path(&head, &format!("{}/{}", user, f));
            json!({ "path": f, "restored": restored })
        })
        .collect();
    repo.worktree = head;
    Ok(Json(json!({
        "data": {
            "files": files,
            "fileSystem": engine_layout(&repo.worktree, &user),
        }
    })))
}

async fn reset(State(state): State<Shared>, Json(body): Json<Value>) -> EngineResult {
    let mut engine = lock(&state);
    let (user, repo) = engine.repo("reset", &body)?;
    let hash = str_field(&body, "hash")?;
    let Some(commit) = repo.commits.iter().find(|c| c.hash.starts_with(&hash)) else {
        return Err(fail(
            StatusCode::BAD_REQUEST,
            format!("unknown revision '{}'", hash),
        ));
    };
    let tree = commit.tree.clone();
    repo.heads.insert(repo.current.clone(), tree.clone());
    repo.worktree = tree;
    Ok(Json(json!({ "data": engine_layout(&repo.worktree, &user) })))
}
