use std::fmt;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::ConfigError;

pub const CLIENT_ID_KEY: &str = "TRANSLATOR_CLIENT_ID";
pub const CLIENT_SECRET_KEY: &str = "TRANSLATOR_CLIENT_SECRET";

/// Client credentials for the OAuth2 client-credentials grant.
///
/// Read once from a dotenv-format file at startup, never mutated.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Loads credentials from a `KEY=value` file without touching the
    /// process environment.
    ///
    /// A missing file is the documented fatal startup condition; its error
    /// Display carries the instructional message.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();

        let entries = match dotenvy::from_path_iter(path) {
            Ok(entries) => entries,
            Err(dotenvy::Error::Io(source)) if source.kind() == ErrorKind::NotFound => {
                return Err(ConfigError::MissingCredentialsFile { path: display });
            }
            Err(source) => {
                return Err(ConfigError::Unreadable {
                    path: display,
                    source,
                });
            }
        };

        let mut client_id = None;
        let mut client_secret = None;

        for entry in entries {
            let (key, value) = entry.map_err(|source| ConfigError::Unreadable {
                path: display.clone(),
                source,
            })?;

            match key.as_str() {
                CLIENT_ID_KEY => client_id = Some(value),
                CLIENT_SECRET_KEY => client_secret = Some(value),
                _ => {}
            }
        }

        Ok(Self {
            client_id: require(client_id, CLIENT_ID_KEY, &display)?,
            client_secret: require(client_secret, CLIENT_SECRET_KEY, &display)?,
        })
    }
}

fn require(
    value: Option<String>,
    key: &'static str,
    path: &str,
) -> Result<String, ConfigError> {
    match value {
        None => Err(ConfigError::MissingKey {
            path: path.to_string(),
            key,
        }),
        Some(value) if value.trim().is_empty() => Err(ConfigError::EmptyKey {
            path: path.to_string(),
            key,
        }),
        Some(value) => Ok(value),
    }
}

// Keep the secret out of log output.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}
