use anyhow::{anyhow, Result};
use std::{env, fs, io::ErrorKind, path::Path, time::Duration};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "geotrack.toml";

const ENV_NAME_MAPBOX_ACCESS_TOKEN: &str = "MAPBOX_ACCESS_TOKEN";

#[derive(Debug)]
pub struct Config {
    pub ip_lookup: IpLookup,
    pub geocoding: Geocoding,
    pub http: Http,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::debug!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::debug!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(token) = env::var(ENV_NAME_MAPBOX_ACCESS_TOKEN) {
            cfg.geocoding.access_token = token;
        }
        if cfg.geocoding.access_token.is_empty() {
            log::warn!("No Mapbox access token found");
        }
        Ok(cfg)
    }
}

#[derive(Debug)]
pub struct IpLookup {
    pub base_url: String,
}

#[derive(Debug)]
pub struct Geocoding {
    pub base_url: String,
    pub access_token: String,
    /// ISO 3166 alpha-2 code that restricts the results.
    pub country: String,
    pub limit: u32,
}

#[derive(Debug)]
pub struct Http {
    pub timeout: Duration,
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            ip_lookup,
            geocoding,
            http,
        } = from;

        let raw::IpLookup { base_url } = ip_lookup.unwrap_or_default();
        let base_url = base_url
            .or_else(|| raw::IpLookup::default().base_url)
            .ok_or_else(|| anyhow!("Missing IP lookup base URL"))?;
        let ip_lookup = IpLookup { base_url };

        let defaults = raw::Geocoding::default();
        let raw::Geocoding {
            base_url,
            access_token,
            country,
            limit,
        } = geocoding.unwrap_or_default();
        let base_url = base_url
            .or(defaults.base_url)
            .ok_or_else(|| anyhow!("Missing geocoding base URL"))?;
        let access_token = access_token.or(defaults.access_token).unwrap_or_default();
        let country = country
            .or(defaults.country)
            .ok_or_else(|| anyhow!("Missing geocoding country"))?;
        let limit = limit
            .or(defaults.limit)
            .ok_or_else(|| anyhow!("Missing geocoding limit"))?;
        if limit == 0 {
            return Err(anyhow!("The geocoding limit must be at least 1"));
        }
        let geocoding = Geocoding {
            base_url,
            access_token,
            country,
            limit,
        };

        let raw::Http { timeout } = http.unwrap_or_default();
        let timeout = timeout
            .or_else(|| raw::Http::default().timeout)
            .ok_or_else(|| anyhow!("Missing HTTP timeout"))?;
        let http = Http { timeout };

        Ok(Self {
            ip_lookup,
            geocoding,
            http,
        })
    }
}
