use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use ipnet::IpNet;

pub const DEFAULT_SHEETS_API_BASE: &str = "https://sheets.googleapis.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub max_body_size: usize,
    pub trusted_proxies: Vec<IpNet>,
    pub cors_origins: Vec<String>,
    pub static_dir: String,
    pub redirect_url: Option<String>,
    pub honeypot_field: Option<String>,
    pub rate_limit: u32,
    pub rate_limit_window_secs: u64,
    pub adapter_timeout: Duration,
    pub sheets: SheetsConfig,
    pub owner: OwnerConfig,
}

/// Destination and credential material for the lead spreadsheet.
/// Either value missing turns the appender into a reporting no-op.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub credentials: Option<String>,
    pub spreadsheet_id: Option<String>,
    pub sheet_name: String,
    pub api_base: String,
    pub init_headers: bool,
}

#[derive(Debug, Clone, Default)]
pub struct OwnerConfig {
    pub email: Option<String>,
    pub webhook_url: Option<String>,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub from: String,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            spreadsheet_id: None,
            sheet_name: "Sheet1".to_string(),
            api_base: DEFAULT_SHEETS_API_BASE.to_string(),
            init_headers: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            log_level: "info".to_string(),
            max_body_size: 64 * 1024,
            trusted_proxies: Vec::new(),
            cors_origins: Vec::new(),
            static_dir: "static".to_string(),
            redirect_url: None,
            honeypot_field: None,
            rate_limit: 5,
            rate_limit_window_secs: 60,
            adapter_timeout: Duration::from_secs(10),
            sheets: SheetsConfig::default(),
            owner: OwnerConfig::default(),
        }
    }
}

impl SheetsConfig {
    pub fn is_configured(&self) -> bool {
        self.credentials.is_some() && self.spreadsheet_id.is_some()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let get_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let host: IpAddr = get_or("TUTORATLAS_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid TUTORATLAS_HOST: {e}"))?;

        let port: u16 = get_or("TUTORATLAS_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid TUTORATLAS_PORT: {e}"))?;

        let log_level = get_or("TUTORATLAS_LOG_LEVEL", "info");

        let max_body_size: usize = get_or("TUTORATLAS_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid TUTORATLAS_MAX_BODY_SIZE: {e}"))?;

        let trusted_proxies: Vec<IpNet> = split_list(&get_or("TUTORATLAS_TRUSTED_PROXIES", ""))
            .into_iter()
            .map(|s| {
                s.parse()
                    .map_err(|e| format!("Invalid TUTORATLAS_TRUSTED_PROXIES entry '{s}': {e}"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let cors_origins = split_list(&get_or("TUTORATLAS_CORS_ORIGINS", ""));
        let static_dir = get_or("TUTORATLAS_STATIC_DIR", "static");
        let redirect_url = get("TUTORATLAS_REDIRECT_URL");
        let honeypot_field = get("TUTORATLAS_HONEYPOT_FIELD");

        let rate_limit: u32 = get_or("TUTORATLAS_RATE_LIMIT", "5")
            .parse()
            .map_err(|e| format!("Invalid TUTORATLAS_RATE_LIMIT: {e}"))?;

        let rate_limit_window_secs: u64 = get_or("TUTORATLAS_RATE_LIMIT_WINDOW_SECS", "60")
            .parse()
            .map_err(|e| format!("Invalid TUTORATLAS_RATE_LIMIT_WINDOW_SECS: {e}"))?;

        let adapter_timeout_secs: u64 = get_or("TUTORATLAS_ADAPTER_TIMEOUT_SECS", "10")
            .parse()
            .map_err(|e| format!("Invalid TUTORATLAS_ADAPTER_TIMEOUT_SECS: {e}"))?;

        let init_headers = match get_or("GOOGLE_SHEETS_INIT_HEADERS", "true").as_str() {
            "true" | "1" | "yes" => true,
            "false" | "0" | "no" => false,
            other => return Err(format!("Invalid GOOGLE_SHEETS_INIT_HEADERS: {other}")),
        };

        let sheets = SheetsConfig {
            credentials: get("GOOGLE_SHEETS_CREDENTIALS"),
            spreadsheet_id: get("GOOGLE_SHEET_ID"),
            sheet_name: get_or("GOOGLE_SHEET_NAME", "Sheet1"),
            api_base: get_or("GOOGLE_SHEETS_API_BASE", DEFAULT_SHEETS_API_BASE),
            init_headers,
        };

        let smtp = match (
            get("TUTORATLAS_SMTP_HOST"),
            get("TUTORATLAS_SMTP_PORT"),
            get("TUTORATLAS_SMTP_USER"),
            get("TUTORATLAS_SMTP_PASS"),
            get("TUTORATLAS_SMTP_FROM"),
        ) {
            (Some(host), Some(port), Some(user), Some(pass), Some(from)) => Some(SmtpConfig {
                host,
                port: port
                    .parse()
                    .map_err(|e| format!("Invalid TUTORATLAS_SMTP_PORT: {e}"))?,
                user,
                pass,
                from,
            }),
            _ => None,
        };

        let owner = OwnerConfig {
            email: get("OWNER_NOTIFY_EMAIL"),
            webhook_url: get("OWNER_NOTIFY_WEBHOOK_URL"),
            smtp,
        };

        Ok(Config {
            host,
            port,
            log_level,
            max_body_size,
            trusted_proxies,
            cors_origins,
            static_dir,
            redirect_url,
            honeypot_field,
            rate_limit,
            rate_limit_window_secs,
            adapter_timeout: Duration::from_secs(adapter_timeout_secs),
            sheets,
            owner,
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
