use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::settings::Settings;

const ENV_PREFIX: &str = "NGUONC_";
const ENV_SEPARATOR: &str = "__";

/// `config.toml` in the platform's configuration directory, if the platform
/// has one.
pub fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "nguonc", "nguonc-catalog").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Loads and validates [`Settings`].
///
/// An explicit `path` must exist. Without one, the [`default_path`] is used
/// when a file is present there and skipped otherwise.
#[instrument]
pub fn load(path: Option<&Path>) -> Result<Settings> {
    let file = match path {
        Some(path) if !path.is_file() => exn::bail!(ErrorKind::NotFound(path.to_path_buf())),
        Some(path) => Some(path.to_path_buf()),
        None => default_path().filter(|p| p.is_file()),
    };
    let mut figment = Figment::from(Serialized::defaults(Settings::default()));
    if let Some(file) = &file {
        tracing::debug!(path = %file.display(), "Reading configuration file");
        figment = merge_file(figment, file)?;
    }
    let settings = from_figment(figment.merge(Env::prefixed(ENV_PREFIX).split(ENV_SEPARATOR)))?;
    tracing::info!(
        base_url = %settings.api.base_url,
        preferred_stream_type = %settings.preferred_stream_type,
        debug_log = settings.debug_log,
        "Configuration loaded"
    );
    Ok(settings)
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    let extension = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
    Ok(match extension.as_deref() {
        Some("toml") => figment.merge(Toml::file_exact(path)),
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
        Some("json") => figment.merge(Json::file_exact(path)),
        _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
    })
}

fn from_figment(figment: Figment) -> Result<Settings> {
    let settings: Settings = figment.extract().or_raise(|| ErrorKind::Load)?;
    settings.validate()?;
    Ok(settings)
}
