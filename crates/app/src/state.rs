//! Application state management

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use classgrid_core::storage::DATABASE_FILE;
use classgrid_core::{AppConfig, Database, Error, GridWindow, Result, ShareLink};
use directories::ProjectDirs;
use tracing::{info, warn};

use crate::builder::ScheduleBuilder;
use crate::groups::GroupGenerator;
use crate::notify::Notifier;

/// Main application state
pub struct AppState {
    pub db: Arc<Mutex<Database>>,
    pub config: AppConfig,
    pub notifier: Notifier,
    data_dir: PathBuf,
}

impl AppState {
    /// Open state in the platform data directory
    pub fn new() -> Result<Self> {
        Self::with_data_dir(Self::data_path()?)
    }

    /// Open state rooted at `data_dir`, creating it if needed
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;

        let db = Database::open(data_dir.join(DATABASE_FILE))?;
        let config = AppConfig::load(&AppConfig::path_in(&data_dir)).unwrap_or_else(|e| {
            warn!(error = %e, "Config unreadable, using defaults");
            AppConfig::default()
        });
        info!(data_dir = %data_dir.display(), "Application state ready");

        Ok(Self {
            db: Arc::new(Mutex::new(db)),
            config,
            notifier: Notifier::new(),
            data_dir,
        })
    }

    fn data_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("app", "classgrid", "classgrid").ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine data directory",
            ))
        })?;

        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn grid_window(&self) -> GridWindow {
        self.config.grid_window()
    }

    /// Schedule session over the stored schedule
    pub fn schedule_builder(&self) -> ScheduleBuilder {
        ScheduleBuilder::new(
            self.db.clone(),
            ShareLink::new(self.config.share.base_url.as_str()),
            self.notifier.clone(),
        )
    }

    /// Group session over the stored pair history
    pub fn group_generator(&self) -> GroupGenerator {
        GroupGenerator::new(
            self.db.clone(),
            &self.config.groups,
            self.notifier.clone(),
        )
    }
}
