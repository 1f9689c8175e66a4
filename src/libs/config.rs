//! Configuration for the presence tracker.
//!
//! The configuration is stored as pretty-printed JSON in the application data
//! directory (see [`DataStorage`]). Every section is optional; a missing file
//! or a missing section falls back to the defaults below, which reproduce the
//! standard shift policy:
//!
//! | setting                      | default |
//! |------------------------------|---------|
//! | work prompt interval         | 30 min  |
//! | idle timeout                 | 600 s   |
//! | idle caution delay           | 10 s    |
//! | break / lunch allowance      | 15 / 30 min |
//! | exceedance response timeout  | 300 s   |
//! | exceedance log interval      | 600 s   |
//! | exceedance reminder buffer   | 30 min  |
//! | off-work limit               | 8 h     |
//!
//! ```rust,no_run
//! use shiftwatch::libs::config::Config;
//!
//! let config = Config::read()?;
//! let presence = config.presence.unwrap_or_default();
//! assert!(presence.prompt_interval_secs() > 0);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_print};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Work prompt intervals offered at login, in minutes.
pub const ALLOWED_INTERVALS: [u64; 3] = [15, 30, 60];

const DAY_SECS: u64 = 24 * 60 * 60;
const DAY_MINS: u64 = 24 * 60;
const DAY_HOURS: u64 = 24;

#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// Timing policy for the presence state machine.
///
/// Durations carry their unit in the field name. All values must be positive
/// and at most a day;
/// [`PresenceConfig::validate`] enforces that before the tracker starts.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PresenceConfig {
    /// Cadence of the "what are you working on" prompt. One of [`ALLOWED_INTERVALS`].
    pub prompt_interval_mins: u64,
    pub idle_timeout_secs: u64,
    /// Window between the two input samples that confirm inactivity.
    pub idle_caution_delay_secs: u64,
    pub idle_poll_secs: u64,
    pub break_duration_mins: u64,
    pub lunch_duration_mins: u64,
    /// Unanswered exceedance prompts are force-resolved after this long.
    pub response_timeout_secs: u64,
    /// Minimum gap between two exceedance prompts, even if input keeps arriving.
    pub reprompt_secs: u64,
    pub exceed_log_interval_secs: u64,
    /// Delay after an exceedance before the "please update your status" reminder.
    pub exceed_reminder_buffer_mins: u64,
    pub timed_poll_secs: u64,
    pub tick_secs: u64,
    pub off_work_limit_hours: u64,
    /// Console prompts left unanswered this long count as dismissed.
    pub prompt_timeout_secs: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
    /// Base URL; rows are posted to `<api_url>/activity`.
    pub api_url: String,
    pub auth_token: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence: Option<PresenceConfig>,

    /// Optional mirror of the activity log on a remote server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        PresenceConfig {
            prompt_interval_mins: 30,
            idle_timeout_secs: 600,
            idle_caution_delay_secs: 10,
            idle_poll_secs: 5,
            break_duration_mins: 15,
            lunch_duration_mins: 30,
            response_timeout_secs: 300,
            reprompt_secs: 15,
            exceed_log_interval_secs: 600,
            exceed_reminder_buffer_mins: 30,
            timed_poll_secs: 10,
            tick_secs: 1,
            off_work_limit_hours: 8,
            prompt_timeout_secs: 120,
        }
    }
}

impl PresenceConfig {
    pub fn prompt_interval_secs(&self) -> i64 {
        (self.prompt_interval_mins * 60) as i64
    }

    pub fn idle_timeout_secs(&self) -> i64 {
        self.idle_timeout_secs as i64
    }

    pub fn idle_caution_delay_secs(&self) -> i64 {
        self.idle_caution_delay_secs as i64
    }

    pub fn response_timeout_secs(&self) -> i64 {
        self.response_timeout_secs as i64
    }

    pub fn reprompt_secs(&self) -> i64 {
        self.reprompt_secs as i64
    }

    pub fn exceed_log_interval_secs(&self) -> i64 {
        self.exceed_log_interval_secs as i64
    }

    pub fn exceed_reminder_buffer_secs(&self) -> i64 {
        (self.exceed_reminder_buffer_mins * 60) as i64
    }

    pub fn off_work_limit_secs(&self) -> i64 {
        (self.off_work_limit_hours * 3600) as i64
    }

    /// Rejects durations that are zero or longer than a day, and prompt
    /// intervals outside [`ALLOWED_INTERVALS`].
    pub fn validate(&self) -> Result<()> {
        if !ALLOWED_INTERVALS.contains(&self.prompt_interval_mins) {
            msg_bail_anyhow!(Message::InvalidPromptInterval(self.prompt_interval_mins));
        }
        let durations = [
            ("idle_timeout_secs", self.idle_timeout_secs, DAY_SECS),
            ("idle_caution_delay_secs", self.idle_caution_delay_secs, DAY_SECS),
            ("idle_poll_secs", self.idle_poll_secs, DAY_SECS),
            ("break_duration_mins", self.break_duration_mins, DAY_MINS),
            ("lunch_duration_mins", self.lunch_duration_mins, DAY_MINS),
            ("response_timeout_secs", self.response_timeout_secs, DAY_SECS),
            ("reprompt_secs", self.reprompt_secs, DAY_SECS),
            ("exceed_log_interval_secs", self.exceed_log_interval_secs, DAY_SECS),
            ("exceed_reminder_buffer_mins", self.exceed_reminder_buffer_mins, DAY_MINS),
            ("timed_poll_secs", self.timed_poll_secs, DAY_SECS),
            ("tick_secs", self.tick_secs, DAY_SECS),
            ("off_work_limit_hours", self.off_work_limit_hours, DAY_HOURS),
            ("prompt_timeout_secs", self.prompt_timeout_secs, DAY_SECS),
        ];
        for (name, value, max) in durations {
            // reprompt_secs and exceed_reminder_buffer_mins may be zero
            if value == 0 && !matches!(name, "reprompt_secs" | "exceed_reminder_buffer_mins") {
                msg_bail_anyhow!(Message::ConfigValueMustBePositive(name.to_string()));
            }
            if value > max {
                msg_bail_anyhow!(Message::ConfigValueTooLarge(name.to_string(), max));
            }
        }
        Ok(())
    }
}

impl Config {
    /// Loads the configuration, returning defaults when no file exists yet.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file. Returns `false` if there was none.
    pub fn delete() -> Result<bool> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(false);
        }
        fs::remove_file(config_file_path)?;
        Ok(true)
    }

    /// Interactive setup wizard. Existing values are offered as defaults.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = [
            ConfigModule {
                key: "employee".to_string(),
                name: "Employee".to_string(),
            },
            ConfigModule {
                key: "presence".to_string(),
                name: "Presence policy".to_string(),
            },
            ConfigModule {
                key: "server".to_string(),
                name: "Remote activity log".to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "employee" => {
                    msg_print!(Message::ConfigModuleEmployee);
                    let employee_id: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptEmployeeId.to_string())
                        .with_initial_text(config.employee_id.clone().unwrap_or_default())
                        .validate_with(|input: &String| -> Result<(), String> {
                            if input.trim().is_empty() {
                                Err(Message::EmployeeIdRequired.to_string())
                            } else {
                                Ok(())
                            }
                        })
                        .interact_text()?;
                    config.employee_id = Some(employee_id.trim().to_string());
                }
                "presence" => {
                    let default = config.presence.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModulePresence);
                    let interval_idx = ALLOWED_INTERVALS.iter().position(|&m| m == default.prompt_interval_mins).unwrap_or(1);
                    let interval_idx = Select::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptWorkInterval.to_string())
                        .items(&ALLOWED_INTERVALS.iter().map(|m| format!("{} minutes", m)).collect::<Vec<_>>())
                        .default(interval_idx)
                        .interact()?;
                    config.presence = Some(PresenceConfig {
                        prompt_interval_mins: ALLOWED_INTERVALS[interval_idx],
                        idle_timeout_secs: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptIdleTimeout.to_string())
                            .default(default.idle_timeout_secs)
                            .interact_text()?,
                        break_duration_mins: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptBreakDuration.to_string())
                            .default(default.break_duration_mins)
                            .interact_text()?,
                        lunch_duration_mins: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptLunchDuration.to_string())
                            .default(default.lunch_duration_mins)
                            .interact_text()?,
                        response_timeout_secs: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptResponseTimeout.to_string())
                            .default(default.response_timeout_secs)
                            .interact_text()?,
                        off_work_limit_hours: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptOffWorkLimit.to_string())
                            .default(default.off_work_limit_hours)
                            .interact_text()?,
                        ..default
                    });
                }
                "server" => {
                    let default = config.server.clone().unwrap_or(ServerConfig {
                        api_url: String::new(),
                        auth_token: String::new(),
                    });
                    msg_print!(Message::ConfigModuleServer);
                    config.server = Some(ServerConfig {
                        api_url: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptServerApiUrl.to_string())
                            .with_initial_text(default.api_url)
                            .interact_text()?,
                        auth_token: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptServerAuthToken.to_string())
                            .with_initial_text(default.auth_token)
                            .interact_text()?,
                    });
                }
                _ => {}
            }
        }

        if let Some(presence) = &config.presence {
            presence.validate()?;
        }

        Ok(config)
    }
}
