use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub cases_dir: PathBuf,
    pub listen_addr: String,
    pub time_limit_ms: u64,
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            cases_dir: PathBuf::from("cases"),
            listen_addr: "0.0.0.0:8000".to_string(),
            time_limit_ms: gumshoe_core::config::MAX_EXECUTION_TIME.as_millis() as u64,
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(v) = env::var("GUMSHOE_CASES_DIR") {
            cfg.cases_dir = PathBuf::from(v);
        }
        if let Ok(v) = env::var("GUMSHOE_LISTEN_ADDR") {
            cfg.listen_addr = v;
        }
        if let Ok(v) = env::var("GUMSHOE_TIME_LIMIT_MS") {
            if let Ok(n) = v.parse() {
                cfg.time_limit_ms = n;
            }
        }
        if let Ok(v) = env::var("GUMSHOE_LOG") {
            cfg.log_level = v;
        }
        cfg
    }

    pub fn time_limit(&self) -> Duration {
        Duration::from_millis(self.time_limit_ms)
    }
}
