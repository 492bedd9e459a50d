use serde::Deserialize;
use std::path::{Path, PathBuf};

use contracts::shared::totals::DEFAULT_TAX_RATE;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub erp: ErpConfig,
    #[serde(default)]
    pub pos: PosConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Каталог собранного фронтенда (trunk dist)
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ErpConfig {
    #[serde(default = "default_erp_url")]
    pub url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_secret: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Организация по умолчанию для новых документов
    #[serde(default)]
    pub company: Option<String>,
    /// Счёт налога; без него строка налога в счёт не добавляется
    #[serde(default)]
    pub tax_account: Option<String>,
}

impl Default for ErpConfig {
    fn default() -> Self {
        Self {
            url: default_erp_url(),
            api_key: None,
            api_secret: None,
            timeout_secs: default_timeout_secs(),
            company: None,
            tax_account: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PosConfig {
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
    #[serde(default)]
    pub default_warehouse: Option<String>,
    #[serde(default)]
    pub default_customer: Option<String>,
    #[serde(default)]
    pub pos_profile: Option<String>,
}

impl Default for PosConfig {
    fn default() -> Self {
        Self {
            tax_rate: default_tax_rate(),
            default_warehouse: None,
            default_customer: None,
            pos_profile: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    /// Предел строк одного запроса списка к ERP
    #[serde(default = "default_list_limit")]
    pub list_limit: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            list_limit: default_list_limit(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> String {
    "dist".to_string()
}

fn default_erp_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_tax_rate() -> f64 {
    DEFAULT_TAX_RATE
}

fn default_list_limit() -> u32 {
    1000
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000
static_dir = "dist"

[erp]
url = "http://localhost:8000"
timeout_secs = 30

[pos]
tax_rate = 0.15

[dashboard]
list_limit = 1000
"#;

impl Config {
    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Переменные окружения ERP_URL, ERP_API_KEY, ERP_API_SECRET, SERVER_PORT
    pub fn apply_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("ERP_URL") {
            self.erp.url = url;
        }
        if let Some(key) = lookup("ERP_API_KEY") {
            self.erp.api_key = Some(key);
        }
        if let Some(secret) = lookup("ERP_API_SECRET") {
            self.erp.api_secret = Some(secret);
        }
        if let Some(port) = lookup("SERVER_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("Некорректный SERVER_PORT '{}': {}", port, e))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.erp.url.trim().is_empty() {
            anyhow::bail!("Не задан адрес ERP ([erp] url)");
        }
        if !(0.0..=1.0).contains(&self.pos.tax_rate) {
            anyhow::bail!(
                "Ставка налога должна быть от 0 до 1, получено {}",
                self.pos.tax_rate
            );
        }
        if self.dashboard.list_limit == 0 {
            anyhow::bail!("[dashboard] list_limit должен быть больше нуля");
        }
        Ok(())
    }

    /// Ключ и секрет заданы оба
    pub fn has_credentials(&self) -> bool {
        matches!(
            (self.erp.api_key.as_deref(), self.erp.api_secret.as_deref()),
            (Some(k), Some(s)) if !k.is_empty() && !s.is_empty()
        )
    }

    /// Счёт налога, если задан
    pub fn tax_account(&self) -> Option<&str> {
        self.erp
            .tax_account
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
    }

    /// Ставка, которую ERP применит к счёту: без счёта налога строка
    /// налога не отправляется, поэтому и итоги считаются без налога
    pub fn effective_tax_rate(&self) -> f64 {
        match self.tax_account() {
            Some(_) => self.pos.tax_rate,
            None => 0.0,
        }
    }
}

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Current directory
/// 3. Falls back to embedded default config
///
/// Environment overrides are applied on top, then the result is validated.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = match find_config_file() {
        Some(path) => {
            tracing::info!("Loading config from: {}", path.display());
            let contents = std::fs::read_to_string(&path)?;
            Config::parse(&contents)?
        }
        None => {
            tracing::info!("Using default embedded configuration");
            Config::parse(DEFAULT_CONFIG)?
        }
    };

    config.apply_overrides(|key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

fn find_config_file() -> Option<PathBuf> {
    let mut candidates = Vec::new();
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.push(exe_dir.join("config.toml"));
        }
    }
    candidates.push(Path::new("config.toml").to_path_buf());

    for path in candidates {
        if path.exists() {
            return Some(path);
        }
        tracing::warn!("config.toml not found at: {}", path.display());
    }
    None
}

/// Resolves relative paths relative to the executable directory
pub fn resolve_static_dir(config: &Config) -> PathBuf {
    let dir = Path::new(&config.server.static_dir);
    if dir.is_absolute() {
        return dir.to_path_buf();
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let resolved = exe_dir.join(dir);
            if resolved.exists() {
                return resolved;
            }
        }
    }
    dir.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_loads() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.erp.url, "http://localhost:8000");
        assert_eq!(config.erp.timeout_secs, 30);
        assert_eq!(config.pos.tax_rate, 0.15);
        assert_eq!(config.dashboard.list_limit, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = Config::parse("[erp]\nurl = \"https://erp.example.com\"\n").unwrap();
        assert_eq!(config.erp.url, "https://erp.example.com");
        assert_eq!(config.server.static_dir, "dist");
        assert_eq!(config.pos.tax_rate, DEFAULT_TAX_RATE);
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("ERP_URL", "https://erp.local"),
            ("ERP_API_KEY", "key"),
            ("ERP_API_SECRET", "secret"),
            ("SERVER_PORT", "8080"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::parse(DEFAULT_CONFIG).unwrap();
        config
            .apply_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.erp.url, "https://erp.local");
        assert_eq!(config.server.port, 8080);
        assert!(config.has_credentials());
    }

    #[test]
    fn test_bad_port_override_rejected() {
        let mut config = Config::default();
        let result = config.apply_overrides(|k| (k == "SERVER_PORT").then(|| "http".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_validation() {
        let mut config = Config::parse("[pos]\ntax_rate = 1.5\n").unwrap();
        assert!(config.validate().is_err());

        config.pos.tax_rate = 0.2;
        config.erp.url = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tax_rate_requires_tax_account() {
        let mut config = Config::default();
        assert_eq!(config.tax_account(), None);
        assert_eq!(config.effective_tax_rate(), 0.0);

        config.erp.tax_account = Some("   ".into());
        assert_eq!(config.effective_tax_rate(), 0.0);

        config.erp.tax_account = Some("VAT - C".into());
        assert_eq!(config.tax_account(), Some("VAT - C"));
        assert_eq!(config.effective_tax_rate(), 0.15);
    }
}
