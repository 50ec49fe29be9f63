use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_API_BASE_URL: &str = "https://picsum.photos";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub trace_spans: bool,
    pub data_path: PathBuf,
}

#[derive(Default)]
pub struct AppConfigOverrides {
    pub log_level: Option<String>,
    pub api_base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub trace_spans: bool,
    pub data_path: Option<PathBuf>,
}

fn default_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".picsum-gallery")
}

impl AppConfig {
    pub fn load_from(path: Option<PathBuf>) -> Self {
        let mut builder = config::Config::builder();
        let path = path.unwrap_or_else(|| default_dir().join("config"));
        builder = builder.add_source(
            config::File::from(path)
                .format(config::FileFormat::Toml)
                .required(false),
        );
        let cfg = builder.build().unwrap_or_default();

        let log_level = cfg
            .get_string("log_level")
            .unwrap_or_else(|_| "info".to_string());
        let api_base_url = cfg
            .get_string("api_base_url")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let request_timeout_secs = cfg
            .get_int("request_timeout_secs")
            .ok()
            .filter(|v| *v > 0)
            .unwrap_or(10) as u64;
        let trace_spans = cfg.get_bool("trace_spans").unwrap_or(false);
        let data_path = cfg
            .get_string("data_path")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_dir());

        Self {
            log_level,
            api_base_url,
            request_timeout_secs,
            trace_spans,
            data_path,
        }
    }

    pub fn apply_overrides(mut self, ov: &AppConfigOverrides) -> Self {
        if let Some(l) = &ov.log_level {
            self.log_level = l.clone();
        }
        if let Some(u) = &ov.api_base_url {
            self.api_base_url = u.clone();
        }
        if let Some(t) = ov.request_timeout_secs.filter(|t| *t > 0) {
            self.request_timeout_secs = t;
        }
        if ov.trace_spans {
            self.trace_spans = true;
        }
        if let Some(p) = &ov.data_path {
            self.data_path = p.clone();
        }
        self
    }

    pub fn save_to(&self, path: Option<PathBuf>) -> std::io::Result<()> {
        let path = path.unwrap_or_else(|| default_dir().join("config"));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = toml::to_string(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, data)
    }
}
