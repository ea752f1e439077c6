//! Extension pour intégrer Sveriges Radio dans pmoconfig
//!
//! Ce module fournit le trait `SverigesRadioConfigExt` qui ajoute à
//! `pmoconfig::Config` les réglages du client Sveriges Radio :
//!
//! - URL de base de l'API, timeout, taille de page
//! - TTL du cache de mémoïsation
//! - Commande du lecteur audio externe
//!
//! # Exemple
//!
//! ```no_run
//! use pmoconfig::Config;
//! use pmosverigesradio::{SverigesRadioClient, SverigesRadioConfigExt};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::load_config("")?;
//! println!("API: {}", config.get_sverigesradio_base_url()?);
//! let client = SverigesRadioClient::from_config(&config)?;
//! # Ok(())
//! # }
//! ```

use crate::cache::DEFAULT_CACHE_TTL_SECS;
use crate::client::{
    ClientBuilder, SverigesRadioClient, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};
use anyhow::Result;
use pmoconfig::Config;
use serde_yaml::{Number, Value};
use std::time::Duration;

const API_BASE_URL: &[&str] = &["sources", "sverigesradio", "api", "base_url"];
const API_TIMEOUT_SECS: &[&str] = &["sources", "sverigesradio", "api", "timeout_secs"];
const API_PAGE_SIZE: &[&str] = &["sources", "sverigesradio", "api", "page_size"];
const CACHE_TTL_SECS: &[&str] = &["sources", "sverigesradio", "cache", "ttl_secs"];
const PLAYER_COMMAND: &[&str] = &["player", "command"];

/// Trait d'extension pour gérer la configuration Sveriges Radio dans pmoconfig
///
/// # Auto-persist des valeurs par défaut
///
/// Les getters persistent automatiquement les valeurs par défaut dans la
/// configuration si elles n'existent pas encore ou sont invalides.
pub trait SverigesRadioConfigExt {
    /// URL de base de l'API (défaut: `https://api.sr.se`)
    fn get_sverigesradio_base_url(&self) -> Result<String>;

    /// Définit l'URL de base de l'API
    fn set_sverigesradio_base_url(&self, url: &str) -> Result<()>;

    /// Timeout des requêtes HTTP en secondes (défaut: 30)
    fn get_sverigesradio_timeout_secs(&self) -> Result<u64>;

    /// Définit le timeout des requêtes HTTP
    fn set_sverigesradio_timeout_secs(&self, secs: u64) -> Result<()>;

    /// Nombre d'entrées demandées par page de programme (défaut: 100)
    fn get_sverigesradio_page_size(&self) -> Result<u32>;

    /// Définit la taille de page
    fn set_sverigesradio_page_size(&self, size: u32) -> Result<()>;

    /// TTL du cache de mémoïsation en secondes (défaut: 600)
    fn get_sverigesradio_cache_ttl(&self) -> Result<u64>;

    /// Définit le TTL du cache
    fn set_sverigesradio_cache_ttl(&self, ttl_secs: u64) -> Result<()>;

    /// Commande du lecteur externe, `None` si aucune n'est configurée
    fn get_player_command(&self) -> Result<Option<String>>;

    /// Définit la commande du lecteur externe (chaîne vide pour désactiver)
    fn set_player_command(&self, command: &str) -> Result<()>;
}

/// Reads a strictly positive integer, persisting `default` when the value is
/// missing or unusable
fn get_u64_or_default(config: &Config, path: &[&str], default: u64) -> Result<u64> {
    let parsed = match config.get_value(path) {
        Ok(Value::Number(n)) => n.as_u64(),
        Ok(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    match parsed {
        Some(value) if value > 0 => Ok(value),
        _ => {
            config.set_value(path, Value::Number(Number::from(default)))?;
            Ok(default)
        }
    }
}

impl SverigesRadioConfigExt for Config {
    fn get_sverigesradio_base_url(&self) -> Result<String> {
        match self.get_value(API_BASE_URL) {
            Ok(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
            _ => {
                self.set_sverigesradio_base_url(DEFAULT_BASE_URL)?;
                Ok(DEFAULT_BASE_URL.to_string())
            }
        }
    }

    fn set_sverigesradio_base_url(&self, url: &str) -> Result<()> {
        self.set_value(API_BASE_URL, Value::String(url.to_string()))
    }

    fn get_sverigesradio_timeout_secs(&self) -> Result<u64> {
        get_u64_or_default(self, API_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    fn set_sverigesradio_timeout_secs(&self, secs: u64) -> Result<()> {
        self.set_value(API_TIMEOUT_SECS, Value::Number(Number::from(secs)))
    }

    fn get_sverigesradio_page_size(&self) -> Result<u32> {
        let size = get_u64_or_default(self, API_PAGE_SIZE, DEFAULT_PAGE_SIZE as u64)?;
        Ok(u32::try_from(size).unwrap_or(DEFAULT_PAGE_SIZE))
    }

    fn set_sverigesradio_page_size(&self, size: u32) -> Result<()> {
        self.set_value(API_PAGE_SIZE, Value::Number(Number::from(size)))
    }

    fn get_sverigesradio_cache_ttl(&self) -> Result<u64> {
        get_u64_or_default(self, CACHE_TTL_SECS, DEFAULT_CACHE_TTL_SECS)
    }

    fn set_sverigesradio_cache_ttl(&self, ttl_secs: u64) -> Result<()> {
        self.set_value(CACHE_TTL_SECS, Value::Number(Number::from(ttl_secs)))
    }

    fn get_player_command(&self) -> Result<Option<String>> {
        match self.get_value(PLAYER_COMMAND) {
            Ok(Value::String(s)) if !s.trim().is_empty() => Ok(Some(s.trim().to_string())),
            Ok(_) => Ok(None),
            Err(_) => {
                self.set_player_command("")?;
                Ok(None)
            }
        }
    }

    fn set_player_command(&self, command: &str) -> Result<()> {
        self.set_value(PLAYER_COMMAND, Value::String(command.to_string()))
    }
}

impl SverigesRadioClient {
    /// Build a client from the `sources.sverigesradio.api` configuration
    pub fn from_config(config: &Config) -> crate::error::Result<Self> {
        Self::builder_from_config(config)?.build()
    }

    /// Pre-filled builder from configuration, for further tweaking
    pub fn builder_from_config(config: &Config) -> crate::error::Result<ClientBuilder> {
        Ok(Self::builder()
            .base_url(config.get_sverigesradio_base_url()?)
            .timeout(Duration::from_secs(config.get_sverigesradio_timeout_secs()?))
            .page_size(config.get_sverigesradio_page_size()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(dir: &tempfile::TempDir) -> Config {
        Config::load_config(dir.path().to_str().unwrap()).unwrap()
    }

    #[test]
    fn test_embedded_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(&dir);

        assert_eq!(config.get_sverigesradio_base_url().unwrap(), DEFAULT_BASE_URL);
        assert_eq!(config.get_sverigesradio_timeout_secs().unwrap(), 30);
        assert_eq!(config.get_sverigesradio_page_size().unwrap(), 100);
        assert_eq!(config.get_sverigesradio_cache_ttl().unwrap(), 600);
        assert_eq!(config.get_player_command().unwrap(), None);
    }

    #[test]
    fn test_invalid_values_fall_back_and_persist() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(&dir);

        config
            .set_value(CACHE_TTL_SECS, Value::String("soon".into()))
            .unwrap();
        assert_eq!(
            config.get_sverigesradio_cache_ttl().unwrap(),
            DEFAULT_CACHE_TTL_SECS
        );
        assert_eq!(
            config.get_value(CACHE_TTL_SECS).unwrap(),
            Value::Number(Number::from(DEFAULT_CACHE_TTL_SECS))
        );

        config
            .set_value(API_PAGE_SIZE, Value::Number(Number::from(0)))
            .unwrap();
        assert_eq!(config.get_sverigesradio_page_size().unwrap(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_string_numbers_are_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(&dir);

        config
            .set_value(API_TIMEOUT_SECS, Value::String(" 5 ".into()))
            .unwrap();
        assert_eq!(config.get_sverigesradio_timeout_secs().unwrap(), 5);
    }

    #[test]
    fn test_player_command() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(&dir);

        config.set_player_command("mpv --no-video").unwrap();
        assert_eq!(
            config.get_player_command().unwrap().as_deref(),
            Some("mpv --no-video")
        );

        config.set_player_command("").unwrap();
        assert_eq!(config.get_player_command().unwrap(), None);
    }

    #[test]
    fn test_client_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(&dir);
        config.set_sverigesradio_base_url("http://127.0.0.1:9").unwrap();
        config.set_sverigesradio_page_size(25).unwrap();

        let client = SverigesRadioClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:9");
        assert_eq!(client.page_size(), 25);
    }
}
