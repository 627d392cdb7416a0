use anyhow::{Context, Result};
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    File,
    Firestore,
}

/// How new document ids are chosen.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// `<prefix><max + 1>` from a scan of the collection.
    #[default]
    Sequence,
    /// Let the store pick the id.
    StoreAssigned,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    #[serde(default = "default_data_file")]
    pub data_file: String,
    #[serde(default)]
    pub id_strategy: IdStrategy,
    #[serde(default)]
    pub firestore: FirestoreConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            data_file: default_data_file(),
            id_strategy: IdStrategy::default(),
            firestore: FirestoreConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FirestoreConfig {
    #[serde(default)]
    pub project_id: String,
    #[serde(default = "default_firestore_base_url")]
    pub base_url: String,
    #[serde(default = "default_firestore_database")]
    pub database: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            base_url: default_firestore_base_url(),
            database: default_firestore_database(),
            token: None,
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

fn default_data_file() -> String { "data/store.json".into() }
fn default_firestore_base_url() -> String { "https://firestore.googleapis.com/v1".into() }
fn default_firestore_database() -> String { "(default)".into() }
fn default_page_size() -> u32 { 300 }

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

/// Defaults only when the file does not exist; unreadable or malformed files are errors.
pub fn load_or_default(path: &str) -> Result<AppConfig> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse(&content).with_context(|| format!("invalid config file {path}")),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(e).with_context(|| format!("cannot read config file {path}")),
    }
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config file if present, otherwise defaults; then env overrides and validation.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_or_default(&config_path())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize_from_env();
        self.server.normalize()?;
        self.store.normalize_from_env();
        self.store.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            if !host.trim().is_empty() { self.host = host; }
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.port = port;
        }
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }
}

impl StoreConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(b) = std::env::var("STORE_BACKEND") {
            match b.trim().to_ascii_lowercase().as_str() {
                "memory" => self.backend = StoreBackend::Memory,
                "file" => self.backend = StoreBackend::File,
                "firestore" => self.backend = StoreBackend::Firestore,
                _ => {}
            }
        }
        if let Ok(path) = std::env::var("STORE_DATA_FILE") {
            if !path.trim().is_empty() { self.data_file = path; }
        }
        if self.firestore.project_id.trim().is_empty() {
            if let Ok(p) = std::env::var("FIRESTORE_PROJECT_ID") {
                self.firestore.project_id = p;
            }
        }
        if let Ok(host) = std::env::var("FIRESTORE_EMULATOR_HOST") {
            if !host.trim().is_empty() {
                self.firestore.base_url = format!("http://{}/v1", host.trim());
            }
        }
        if self.firestore.token.is_none() {
            self.firestore.token = std::env::var("FIRESTORE_TOKEN").ok().filter(|t| !t.is_empty());
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self.backend {
            StoreBackend::Memory => Ok(()),
            StoreBackend::File => {
                if self.data_file.trim().is_empty() {
                    return Err(anyhow!("store.data_file is empty; required for the file backend"));
                }
                Ok(())
            }
            StoreBackend::Firestore => {
                if self.firestore.project_id.trim().is_empty() {
                    return Err(anyhow!("store.firestore.project_id is empty; set it in config.toml or FIRESTORE_PROJECT_ID"));
                }
                let lower = self.firestore.base_url.to_lowercase();
                if !(lower.starts_with("http://") || lower.starts_with("https://")) {
                    return Err(anyhow!("store.firestore.base_url must start with http:// or https://"));
                }
                if self.firestore.page_size == 0 {
                    return Err(anyhow!("store.firestore.page_size must be positive"));
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("project_board_{}_{}", std::process::id(), name))
    }

    #[test]
    fn absent_config_file_falls_back_to_defaults() {
        let path = temp_path("absent.toml");
        let cfg = load_or_default(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.store.backend, StoreBackend::Memory);
    }

    #[test]
    fn malformed_config_file_is_an_error() {
        let path = temp_path("malformed.toml");
        std::fs::write(&path, "[store]\nbackend = \"firestore\n").unwrap();
        let res = load_or_default(path.to_str().unwrap());
        std::fs::remove_file(&path).ok();
        let err = res.unwrap_err();
        assert!(err.to_string().contains("invalid config file"));
    }

    #[test]
    fn mistyped_config_file_is_an_error() {
        let path = temp_path("mistyped.toml");
        std::fs::write(&path, "[server]\nport = \"eighty\"\n").unwrap();
        let res = load_or_default(path.to_str().unwrap());
        std::fs::remove_file(&path).ok();
        assert!(res.is_err());
    }

    #[test]
    fn empty_file_gives_memory_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.store.backend, StoreBackend::Memory);
        assert_eq!(cfg.store.id_strategy, IdStrategy::Sequence);
        assert_eq!(cfg.logging.format, LogFormat::Compact);
    }

    #[test]
    fn parses_full_store_section() {
        let cfg = parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [store]
            backend = "firestore"
            id_strategy = "store_assigned"

            [store.firestore]
            project_id = "demo"
            base_url = "http://localhost:8081/v1"

            [logging]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.store.backend, StoreBackend::Firestore);
        assert_eq!(cfg.store.id_strategy, IdStrategy::StoreAssigned);
        assert_eq!(cfg.store.firestore.project_id, "demo");
        assert_eq!(cfg.store.firestore.database, "(default)");
        assert_eq!(cfg.logging.format, LogFormat::Json);
        assert!(cfg.store.validate().is_ok());
    }

    #[test]
    fn firestore_without_project_is_rejected() {
        let store = StoreConfig { backend: StoreBackend::Firestore, ..StoreConfig::default() };
        assert!(store.validate().is_err());
    }

    #[test]
    fn port_zero_is_rejected() {
        let mut server = ServerConfig { port: 0, ..ServerConfig::default() };
        assert!(server.normalize().is_err());
    }

    #[test]
    fn missing_worker_threads_defaults_to_four() {
        let mut server = ServerConfig { worker_threads: None, ..ServerConfig::default() };
        server.normalize().unwrap();
        assert_eq!(server.worker_threads, Some(4));
    }
}
