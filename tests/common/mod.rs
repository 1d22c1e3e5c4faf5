#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;
use tempfile::TempDir;
use tiny_http::{Header, Response, Server};

pub const API_KEY: &str = "abc123";
pub const PROJECTS_PATH: &str = "/api/v1/project";

#[derive(Clone)]
pub enum Reply {
    Json(String),
    Status(u16),
    Garbage,
}

/// Dependency-Track stand-in that records every request path.
///
/// Metrics replies are served in order; the last one repeats.
pub struct MockServer {
    pub url: String,
    server: Arc<Server>,
    hits: Arc<Mutex<Vec<String>>>,
}

impl MockServer {
    pub fn start(projects: Reply, metrics: Vec<Reply>) -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").expect("bind mock server"));
        let url = format!("http://{}", server.server_addr());
        let hits = Arc::new(Mutex::new(Vec::new()));

        let srv = Arc::clone(&server);
        let seen = Arc::clone(&hits);
        thread::spawn(move || {
            let mut metrics = metrics;
            for request in srv.incoming_requests() {
                let path = request.url().to_string();
                seen.lock().expect("hits lock").push(path.clone());

                let authorized = request
                    .headers()
                    .iter()
                    .any(|h| h.field.equiv("X-Api-Key") && h.value.as_str() == API_KEY);
                let reply = if !authorized {
                    Reply::Status(401)
                } else if path == PROJECTS_PATH {
                    projects.clone()
                } else if path.starts_with("/api/v1/metrics/project/") && path.ends_with("/current")
                {
                    if metrics.len() > 1 {
                        metrics.remove(0)
                    } else {
                        metrics.first().cloned().unwrap_or(Reply::Status(404))
                    }
                } else {
                    Reply::Status(404)
                };

                let _ = match reply {
                    Reply::Json(body) => request.respond(
                        Response::from_string(body).with_header(
                            Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                                .expect("header"),
                        ),
                    ),
                    Reply::Status(code) => request.respond(Response::empty(code)),
                    Reply::Garbage => request.respond(Response::from_string("{\"critical\": [")),
                };
            }
        });

        Self { url, server, hits }
    }

    pub fn project_hits(&self) -> usize {
        self.hits
            .lock()
            .expect("hits lock")
            .iter()
            .filter(|p| p.as_str() == PROJECTS_PATH)
            .count()
    }

    pub fn metrics_hits(&self) -> usize {
        self.hits
            .lock()
            .expect("hits lock")
            .iter()
            .filter(|p| p.starts_with("/api/v1/metrics/project/"))
            .count()
    }

    pub fn metrics_paths(&self) -> Vec<String> {
        self.hits
            .lock()
            .expect("hits lock")
            .iter()
            .filter(|p| p.starts_with("/api/v1/metrics/project/"))
            .cloned()
            .collect()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.server.unblock();
    }
}

pub fn fixture(rel: &str) -> String {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    fs::read_to_string(root.join("tests/fixtures").join(rel)).expect("read fixture")
}

pub fn all_projects() -> Reply {
    Reply::Json(fixture("api/v1/project/get-all-projects.json"))
}

pub fn project_metrics() -> Reply {
    Reply::Json(fixture("api/v1/metrics/project/project-metrics.json"))
}

/// Isolated working directory so no stray `dtrack-gate.toml` or env leaks in.
pub struct TestEnv {
    _tmp: TempDir,
    pub cwd: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let cwd = tmp.path().to_path_buf();
        Self { _tmp: tmp, cwd }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("dtrack-gate");
        cmd.current_dir(&self.cwd)
            .env_remove("DTRACK_URL")
            .env_remove("DTRACK_API_KEY");
        cmd
    }

    /// `dtrack-gate --url <mock> --api-key abc123 <args>`
    pub fn gate(&self, server: &MockServer) -> Command {
        let mut cmd = self.cmd();
        cmd.args(["--url", server.url.as_str(), "--api-key", API_KEY]);
        cmd
    }

    pub fn write_config(&self, body: &str) -> PathBuf {
        let path = self.cwd.join("dtrack-gate.toml");
        fs::write(&path, body).expect("write config");
        path
    }
}

pub fn stdout_json(out: &std::process::Output) -> Value {
    serde_json::from_slice(&out.stdout).expect("valid json output")
}
