use crate::config::Config;
use crate::errors::GenerationError;
use crate::wire::GenerationRequest;
use fs_err as fs;
use serde_json::{json, to_string_pretty};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Install the stderr subscriber. `RUST_LOG` wins over the `--debug` default.
pub fn init(debug: bool) {
    let fallback = if debug { "stitch_promptgen=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Writes each request/response pair of a session under `{dir}/{session}/`.
pub struct ExchangeLog {
    dir: PathBuf,
    seq: AtomicUsize,
}

pub struct SavedPaths {
    pub request: PathBuf,
    pub response: PathBuf,
}

fn tx_dir(root: &Path, session: Uuid) -> PathBuf {
    root.join(session.to_string())
}

impl ExchangeLog {
    pub fn new(root: &Path, session: Uuid) -> Self {
        Self { dir: tx_dir(root, session), seq: AtomicUsize::new(0) }
    }

    pub fn from_config(cfg: &Config, session: Uuid) -> Option<Self> {
        cfg.save_exchanges
            .then(|| Self::new(Path::new(&cfg.exchange_dir), session))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save(
        &self,
        stage: &str,
        req: &GenerationRequest,
        outcome: &Result<String, GenerationError>,
    ) -> anyhow::Result<SavedPaths> {
        fs::create_dir_all(&self.dir)?;
        let n = self.seq.fetch_add(1, Ordering::Relaxed) + 1;

        let request = self.dir.join(format!("{n:03}.{stage}.request.json"));
        fs::write(&request, to_string_pretty(req)?)?;

        let body = match outcome {
            Ok(text) => json!({ "ok": true, "text": text }),
            Err(e) => json!({ "ok": false, "kind": e.kind(), "error": e.to_string() }),
        };
        let response = self.dir.join(format!("{n:03}.{stage}.response.json"));
        fs::write(&response, to_string_pretty(&body)?)?;

        Ok(SavedPaths { request, response })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_writes_numbered_pair() {
        let root = tempfile::tempdir().unwrap();
        let session = Uuid::new_v4();
        let log = ExchangeLog::new(root.path(), session);
        let req = GenerationRequest {
            model: "m".into(),
            prompt: "p".into(),
            response_schema: None,
        };

        let first = log.save("refine", &req, &Ok("done".into())).unwrap();
        let second = log
            .save("ideas", &req, &Err(GenerationError::Transport("offline".into())))
            .unwrap();

        assert!(first.request.ends_with("001.refine.request.json"));
        assert!(second.response.ends_with("002.ideas.response.json"));
        assert!(log.dir().ends_with(session.to_string()));

        let body: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&second.response).unwrap()).unwrap();
        assert_eq!(body["kind"], "transport");
    }

    #[test]
    fn disabled_in_config_means_no_log() {
        assert!(ExchangeLog::from_config(&Config::default(), Uuid::new_v4()).is_none());
    }
}
