use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// 設定読み込みのエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// デプロイモード
///
/// `Local` はファイル保存 + HTTP サーバ、`Serverless` はメモリ保存 + Lambda ランタイム。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeploymentMode {
    #[default]
    Local,
    Serverless,
}

impl DeploymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentMode::Local => "local",
            DeploymentMode::Serverless => "serverless",
        }
    }
}

impl FromStr for DeploymentMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(DeploymentMode::Local),
            "serverless" => Ok(DeploymentMode::Serverless),
            _ => Err(ConfigError::InvalidValue {
                key: "DEPLOYMENT_MODE",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: DeploymentMode,
    pub host: IpAddr,
    pub port: u16,
    pub data_file: PathBuf,
    pub public_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: DeploymentMode::Local,
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            data_file: PathBuf::from("todos.json"),
            public_dir: PathBuf::from("public"),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意のキー参照関数から設定を組み立てる
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        // DEPLOYMENT_MODE が優先、未設定なら VERCEL=1 をサーバーレスとみなす
        let mode = match lookup("DEPLOYMENT_MODE") {
            Some(value) => value.parse()?,
            None if lookup("VERCEL").as_deref() == Some("1") => DeploymentMode::Serverless,
            None => defaults.mode,
        };

        Ok(Config {
            mode,
            host: parse_or(&lookup, "HOST", defaults.host)?,
            port: parse_or(&lookup, "PORT", defaults.port)?,
            data_file: lookup("DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
            public_dir: lookup("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.public_dir),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(default),
    }
}
