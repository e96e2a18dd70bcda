// src/config.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
};

/// Optional YAML overlay, every key may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub data_dir: Option<PathBuf>,
    pub trade_csv: Option<String>,
    pub soil_csv: Option<String>,
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    pub mapbox_access_token: Option<String>,
    pub log_level: Option<String>,
}

/// Resolved startup settings: defaults, then the YAML file named by
/// `DASHBOARD_CONFIG`, then individual environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub trade_csv: String,
    pub soil_csv: String,
    pub host: IpAddr,
    pub port: u16,
    pub mapbox_access_token: Option<String>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            trade_csv: "dffood.csv".into(),
            soil_csv: "dfsoil_subUSCN_prod.csv".into(),
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8080,
            mapbox_access_token: None,
            log_level: "info".into(),
        }
    }
}

impl Config {
    /// Read the process environment (and the YAML file it may point at).
    pub fn from_env() -> Result<Self> {
        let file = match env::var("DASHBOARD_CONFIG") {
            Ok(path) if !path.trim().is_empty() => Some(FileConfig::load(path.trim())?),
            _ => None,
        };
        Self::resolve(file, |key| env::var(key).ok())
    }

    /// Merge layers. `lookup` stands in for `std::env::var`.
    pub fn resolve<F>(file: Option<FileConfig>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Config::default();

        if let Some(f) = file {
            if let Some(v) = f.data_dir {
                cfg.data_dir = v;
            }
            if let Some(v) = f.trade_csv {
                cfg.trade_csv = v;
            }
            if let Some(v) = f.soil_csv {
                cfg.soil_csv = v;
            }
            if let Some(v) = f.host {
                cfg.host = v;
            }
            if let Some(v) = f.port {
                cfg.port = v;
            }
            if f.mapbox_access_token.is_some() {
                cfg.mapbox_access_token = f.mapbox_access_token;
            }
            if let Some(v) = f.log_level {
                cfg.log_level = v;
            }
        }

        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = var("DATA_DIR") {
            cfg.data_dir = PathBuf::from(v);
        }
        if let Some(v) = var("TRADE_CSV") {
            cfg.trade_csv = v;
        }
        if let Some(v) = var("SOIL_CSV") {
            cfg.soil_csv = v;
        }
        if let Some(v) = var("HOST") {
            cfg.host = v
                .trim()
                .parse()
                .with_context(|| format!("HOST `{}` is not an IP address", v))?;
        }
        if let Some(v) = var("PORT") {
            cfg.port = v
                .trim()
                .parse()
                .with_context(|| format!("PORT `{}` is not a valid port", v))?;
        }
        if let Some(v) = var("MAPBOX_ACCESS_TOKEN") {
            cfg.mapbox_access_token = Some(v);
        }
        if let Some(v) = var("LOG_LEVEL") {
            cfg.log_level = v;
        }

        Ok(cfg)
    }

    pub fn trade_path(&self) -> PathBuf {
        self.data_dir.join(&self.trade_csv)
    }

    pub fn soil_path(&self) -> PathBuf {
        self.data_dir.join(&self.soil_csv)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl FileConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(&path)
            .with_context(|| format!("reading config file {:?}", path.as_ref()))?;
        serde_yaml::from_str(&text)
            .with_context(|| format!("parsing config file {:?}", path.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_point_at_data_dir() -> Result<()> {
        let cfg = Config::resolve(None, env_of(&[]))?;
        assert_eq!(cfg.trade_path(), PathBuf::from("data/dffood.csv"));
        assert_eq!(cfg.soil_path(), PathBuf::from("data/dfsoil_subUSCN_prod.csv"));
        assert_eq!(cfg.addr().port(), 8080);
        assert_eq!(cfg.mapbox_access_token, None);
        Ok(())
    }

    #[test]
    fn env_overrides_file_overrides_defaults() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        writeln!(tmp, "data_dir: /srv/soil\nport: 9000\nmapbox_access_token: pk.file")?;
        let file = FileConfig::load(tmp.path())?;

        let cfg = Config::resolve(
            Some(file),
            env_of(&[("PORT", "9100"), ("SOIL_CSV", "soil.csv"), ("LOG_LEVEL", "")]),
        )?;
        assert_eq!(cfg.data_dir, PathBuf::from("/srv/soil"));
        assert_eq!(cfg.port, 9100);
        assert_eq!(cfg.soil_path(), PathBuf::from("/srv/soil/soil.csv"));
        assert_eq!(cfg.mapbox_access_token.as_deref(), Some("pk.file"));
        assert_eq!(cfg.log_level, "info");
        Ok(())
    }

    #[test]
    fn bad_port_is_an_error() {
        let err = Config::resolve(None, env_of(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn unknown_yaml_key_is_an_error() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        writeln!(tmp, "prot: 9000")?;
        assert!(FileConfig::load(tmp.path()).is_err());
        Ok(())
    }
}
