use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use radial::menu::DEFAULT_ITEMS;
use radial::{MenuError, MenuModel, MenuStyle, RadialMenu};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub items: Vec<String>,
    pub style: MenuStyle,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            items: DEFAULT_ITEMS.iter().map(ToString::to_string).collect(),
            style: MenuStyle::default(),
        }
    }
}

impl AppConfig {
    pub fn to_model(&self) -> Result<MenuModel, MenuError> {
        MenuModel::new(self.items.iter().cloned())
    }

    pub fn build_menu(&self) -> Result<RadialMenu, MenuError> {
        RadialMenu::new(self.to_model()?, self.style.clone())
    }
}

/// Command line values that win over whatever the config file says.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub items: Option<Vec<String>>,
    pub step: Option<u32>,
}

impl Overrides {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(items) = &self.items {
            config.items = items.clone();
        }
        if let Some(step) = self.step {
            config.style.step = step;
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("Invalid menu: {0}")]
    Menu(#[from] MenuError),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "radial", "radial").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<AppConfig, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(
            config::Environment::with_prefix("RADIAL")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("items")
                .try_parsing(true),
        )
        .build()?;

    let config: AppConfig = s.try_deserialize()?;
    // reject what the menu would refuse before anyone relies on it
    config.to_model()?;
    config.style.validate()?;
    Ok(config)
}

pub fn load_or_default() -> AppConfig {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Falling back to the default menu: {}", e);
            AppConfig::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Whether a filesystem event touched the config file itself.
fn is_config_change(event: &notify::Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

/// Watches the config directory and sends one [`AppEvent::ConfigReload`] per
/// burst of changes to the config file. Returns when the GUI side hangs up.
pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent().map(Path::to_path_buf) else {
        return;
    };
    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();
    let watcher = RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    )
    .and_then(|mut w| {
        w.watch(&config_dir, RecursiveMode::NonRecursive)?;
        Ok(w)
    });
    // dropping the watcher stops the events
    let _watcher = match watcher {
        Ok(w) => w,
        Err(e) => {
            log::error!("{}", ConfigError::from(e));
            return;
        }
    };
    log::debug!("Watching {}", config_dir.display());

    while let Ok(res) = bridge_rx.recv().await {
        let event = match res {
            Ok(event) => event,
            Err(e) => {
                log::error!("Watch error: {}", e);
                continue;
            }
        };
        if !is_config_change(&event, &config_path) {
            continue;
        }

        // editors tend to write in several steps
        while bridge_rx.try_recv().is_ok() {}

        if tx.send(AppEvent::ConfigReload).await.is_err() {
            break;
        }
    }
}
