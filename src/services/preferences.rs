//! Theme preference persistence

use std::{
    fs,
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex,
    },
};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::{
    error::{ControllerError, Result},
    state::Theme,
};

/// Key the theme is stored under
pub const THEME_KEY: &str = "fixierun-theme";

/// Key-value store holding the theme preference
pub trait ThemeStore: Send + Sync {
    /// Stored theme, `None` on first run
    fn load(&self) -> Result<Option<Theme>>;
    fn save(&self, theme: Theme) -> Result<()>;
}

/// JSON object on disk, shared with any other preference keys.
///
/// Reads and writes are blocking; async callers should run them on the
/// blocking pool.
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config_dir>/fixierun/preferences.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("fixierun").join("preferences.json"))
    }

    fn read_entries(&self) -> Result<Map<String, Value>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(Map::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(ControllerError::Store(e)),
        }
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> Result<Option<Theme>> {
        let entries = self.read_entries()?;
        match entries.get(THEME_KEY) {
            Some(Value::String(raw)) => match raw.parse::<Theme>() {
                Ok(theme) => Ok(Some(theme)),
                Err(e) => {
                    warn!("Ignoring stored theme: {}", e);
                    Ok(None)
                }
            },
            Some(other) => {
                warn!("Ignoring stored theme of unexpected type: {}", other);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn save(&self, theme: Theme) -> Result<()> {
        // A file that is not a JSON object is replaced rather than blocking the write
        let mut entries = self.read_entries().unwrap_or_else(|e| {
            warn!("Replacing unreadable preferences file: {}", e);
            Map::new()
        });
        entries.insert(THEME_KEY.to_string(), Value::String(theme.as_str().to_string()));

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        debug!("Saved theme {} to {}", theme, self.path.display());
        Ok(())
    }
}

/// In-memory store; writes can be made to fail
#[derive(Debug, Default)]
pub struct MemoryThemeStore {
    value: Mutex<Option<Theme>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryThemeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_theme(theme: Theme) -> Self {
        Self {
            value: Mutex::new(Some(theme)),
            ..Self::default()
        }
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn stored(&self) -> Option<Theme> {
        self.value.lock().ok().and_then(|v| *v)
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Result<Option<Theme>> {
        self.value
            .lock()
            .map(|v| *v)
            .map_err(|_| ControllerError::LockPoisoned("theme store"))
    }

    fn save(&self, theme: Theme) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ControllerError::Store(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "storage unavailable",
            )));
        }
        let mut value = self
            .value
            .lock()
            .map_err(|_| ControllerError::LockPoisoned("theme store"))?;
        *value = Some(theme);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Derive the system colour scheme from an explicit setting or `COLORFGBG`
pub fn theme_from_env(scheme: Option<&str>, colorfgbg: Option<&str>) -> Theme {
    if let Some(theme) = scheme.and_then(|s| s.parse::<Theme>().ok()) {
        return theme;
    }

    // COLORFGBG is "fg;bg" (sometimes "fg;default;bg"); low ANSI backgrounds are dark
    let background = colorfgbg
        .and_then(|value| value.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());
    match background {
        Some(bg) if bg <= 6 || bg == 8 => Theme::Dark,
        _ => Theme::Light,
    }
}

/// Query the host colour-scheme preference
pub fn system_theme() -> Theme {
    let scheme = std::env::var("FIXIERUN_COLOR_SCHEME").ok();
    let colorfgbg = std::env::var("COLORFGBG").ok();
    theme_from_env(scheme.as_deref(), colorfgbg.as_deref())
}

/// Stored theme, falling back to the system preference
pub fn resolve_theme(store: &dyn ThemeStore, system: Theme) -> Theme {
    match store.load() {
        Ok(Some(theme)) => theme,
        Ok(None) => {
            debug!("No stored theme, using system preference {}", system);
            system
        }
        Err(e) => {
            warn!("Cannot read theme preference: {}", e);
            system
        }
    }
}
