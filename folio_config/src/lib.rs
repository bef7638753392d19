use std::{fmt::Display, net::IpAddr, path::Path};

use anyhow::Context;
use config::{Environment, File, FileFormat};
use folio_models::{email_address::EmailAddress, Sensitive};
use serde::{de::Error as _, Deserialize, Deserializer};
use url::Url;

pub use crate::duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Colon separated list of config files, read in order.
pub const CONFIG_PATH_VAR: &str = "FOLIO_CONFIG";

const ENV_PREFIX: &str = "FOLIO";

/// Variables understood for compatibility with older deployments, and the
/// `FOLIO_*` variable each one stands in for.
const LEGACY_ENV: &[(&str, &str)] = &[
    ("RESEND_API_KEY", "FOLIO_EMAIL__API_KEY"),
    ("CONTACT_EMAIL", "FOLIO_FORMS__OWNER_EMAIL"),
];

/// Config file paths from `FOLIO_CONFIG`, falling back to the `config.toml`
/// next to the workspace root.
pub fn paths() -> Vec<String> {
    match std::env::var(CONFIG_PATH_VAR) {
        Ok(paths) if !paths.trim().is_empty() => paths.split(':').map(Into::into).collect(),
        _ => vec![DEFAULT_CONFIG_PATH.into()],
    }
}

/// Load the config files at `paths` and apply overrides from the environment.
pub fn load(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    load_with_env(paths, std::env::vars())
}

fn load_with_env(
    paths: &[impl AsRef<Path>],
    env: impl IntoIterator<Item = (String, String)>,
) -> anyhow::Result<Config> {
    let mut env = env.into_iter().collect::<config::Map<_, _>>();
    for (legacy, var) in LEGACY_ENV {
        let Some(value) = env.get(*legacy).filter(|x| !x.is_empty()).cloned() else {
            continue;
        };
        if env.get(*var).map_or(true, |x| x.is_empty()) {
            env.insert((*var).into(), value);
        }
    }

    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("http.allowed_origins")
                .try_parsing(true)
                .ignore_empty(true)
                .source(Some(env)),
        )
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub forms: FormsConfig,
    pub sentry: Option<SentryConfig>,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Origins allowed to submit forms from a browser. CORS is disabled if
    /// empty.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub endpoint_override: Option<Url>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub api_key: Option<Sensitive<String>>,
    pub sender: EmailAddress,
    pub timeout: Duration,
}

#[derive(Debug, Deserialize)]
pub struct FormsConfig {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub owner_email: Option<EmailAddress>,
    pub owner_name: String,
    pub contact_sender_name: String,
    pub quote_sender_name: String,
}

#[derive(Debug, Deserialize)]
pub struct SentryConfig {
    pub dsn: Url,
}

/// Treats an empty or whitespace-only string like an absent value.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<String>,
    T::Error: Display,
{
    Option::<String>::deserialize(deserializer)?
        .filter(|x| !x.trim().is_empty())
        .map(T::try_from)
        .transpose()
        .map_err(D::Error::custom)
}
