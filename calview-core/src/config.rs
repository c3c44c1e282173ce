//! Display configuration for the calendar.

use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::classify::UnparseableDates;
use crate::dnd::{DropOptions, MoveTiming};
use crate::error::{CalViewError, CalViewResult};
use crate::event::ViewKind;
use crate::time::{MINUTES_PER_DAY, TimeFormat, parse_clock};

/// Calendar configuration, read from ~/.config/calview/config.toml
///
/// Keys are snake_case in the file. The camelCase names an embedding
/// application passes as props (`hourHeight`, `disableModes`, ...) are
/// accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Hour the hour grid opens at when today is not on screen
    #[serde(alias = "scrollToHour")]
    pub scroll_to_hour: u32,

    #[serde(alias = "disableModes")]
    pub disable_modes: Vec<ViewKind>,

    #[serde(alias = "defaultMode")]
    pub default_mode: ViewKind,

    /// Height in pixels of the full-day lane above the hour grid
    #[serde(alias = "redundantCellHeight")]
    pub redundant_cell_height: f32,

    /// Height in pixels of one hour row
    #[serde(alias = "hourHeight")]
    pub hour_height: f32,

    /// Show the event's `type` tag next to its title
    #[serde(alias = "showIcon")]
    pub show_icon: bool,

    #[serde(alias = "timeFormat")]
    pub time_format: TimeFormat,

    /// Draw the grid without cell borders
    #[serde(alias = "noBorder")]
    pub no_border: bool,

    #[serde(alias = "moveTiming")]
    pub move_timing: MoveTiming,

    #[serde(alias = "unparseableDates")]
    pub unparseable_dates: UnparseableDates,

    /// Start of the window given to month events dropped on an hour grid
    #[serde(alias = "defaultEventStart")]
    pub default_event_start: String,

    #[serde(alias = "defaultEventMinutes")]
    pub default_event_minutes: i64,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        CalendarConfig {
            scroll_to_hour: 15,
            disable_modes: Vec::new(),
            default_mode: ViewKind::Month,
            redundant_cell_height: 50.0,
            hour_height: 50.0,
            show_icon: true,
            time_format: TimeFormat::TwelveHour,
            no_border: false,
            move_timing: MoveTiming::KeepEnd,
            unparseable_dates: UnparseableDates::Drop,
            default_event_start: "09:00".to_string(),
            default_event_minutes: 60,
        }
    }
}

impl CalendarConfig {
    pub fn config_path() -> CalViewResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalViewError::Config("Could not determine config directory".into()))?
            .join("calview");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user's config, creating a commented default file first if
    /// there is none.
    pub fn load() -> CalViewResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from a specific file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> CalViewResult<Self> {
        let config: CalendarConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| CalViewError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalViewError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> CalViewResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| CalViewError::Serialization(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| CalViewError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalViewResult<()> {
        let contents = "\
# calview configuration

# View shown on startup: \"month\", \"week\" or \"day\"
# default_mode = \"month\"

# Views to hide from the mode switcher
# disable_modes = []

# Hour labels: \"12h\" or \"24h\"
# time_format = \"12h\"

# Hour the week and day grids open at when today is not shown
# scroll_to_hour = 15

# Show event type tags, and draw the grid with or without borders
# show_icon = true
# no_border = false

# Pixel heights of one hour row and of the full-day lane
# hour_height = 50
# redundant_cell_height = 50

# What a plain move does to the end time: \"keepEnd\" or \"preserveDuration\"
# move_timing = \"keepEnd\"

# Events with unparseable dates: \"drop\" (report and skip) or \"fail\"
# unparseable_dates = \"drop\"

# Window given to month events dropped onto the week or day view
# default_event_start = \"09:00\"
# default_event_minutes = 60
";

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalViewError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalViewError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Reject values the views can't work with.
    pub fn validate(&self) -> CalViewResult<()> {
        if ViewKind::ALL.iter().all(|m| self.disable_modes.contains(m)) {
            return Err(CalViewError::NoEnabledModes);
        }
        if self.hour_height <= 0.0 {
            return Err(CalViewError::Config("hour_height must be positive".into()));
        }
        if self.redundant_cell_height < 0.0 {
            return Err(CalViewError::Config(
                "redundant_cell_height must not be negative".into(),
            ));
        }
        if self.scroll_to_hour > 23 {
            return Err(CalViewError::Config("scroll_to_hour must be 0-23".into()));
        }
        if !(1..MINUTES_PER_DAY).contains(&self.default_event_minutes) {
            return Err(CalViewError::Config(format!(
                "default_event_minutes must be between 1 and {}",
                MINUTES_PER_DAY - 1
            )));
        }
        self.default_event_start()?;
        Ok(())
    }

    pub fn minute_height(&self) -> f32 {
        self.hour_height / 60.0
    }

    pub fn default_event_start(&self) -> CalViewResult<NaiveTime> {
        parse_clock(&self.default_event_start)
            .ok_or_else(|| CalViewError::InvalidTime(self.default_event_start.clone()))
    }

    pub fn drop_options(&self) -> CalViewResult<DropOptions> {
        Ok(DropOptions {
            move_timing: self.move_timing,
            default_start: self.default_event_start()?,
            default_minutes: self.default_event_minutes,
        })
    }
}
