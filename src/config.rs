/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::io;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone)]
pub struct Config {
    pub elevator: ElevatorConfig,
    pub shaft: ShaftConfig,
    pub animation: AnimationConfig,
}

#[derive(Deserialize, Clone)]
pub struct ElevatorConfig {
    pub n_floors: u8,
    pub auto_close_ms: u64,
}

#[derive(Deserialize, Clone)]
pub struct ShaftConfig {
    pub floor_height: i32,
    pub car_width: i32,
    pub shaft_width: i32,
}

#[derive(Deserialize, Clone)]
pub struct AnimationConfig {
    pub travel_tick_ms: u64,
    pub door_tick_ms: u64,
}

#[derive(Debug)]
pub enum ConfigError {
    Read(io::Error),
    Parse(toml::de::Error),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Read(e) => write!(f, "failed to read configuration file: {}", e),
            ConfigError::Parse(e) => write!(f, "failed to parse configuration file: {}", e),
            ConfigError::Invalid(reason) => write!(f, "invalid configuration: {}", reason),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> ConfigError {
        ConfigError::Read(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> ConfigError {
        ConfigError::Parse(e)
    }
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn load_config(path: &str) -> Result<Config, ConfigError> {
    let config_str = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&config_str)?;

    if config.elevator.n_floors == 0 {
        return Err(ConfigError::Invalid("n_floors must be at least 1"));
    }
    if config.elevator.auto_close_ms == 0 {
        return Err(ConfigError::Invalid("auto_close_ms must be nonzero"));
    }
    if config.shaft.floor_height <= 0 || config.shaft.car_width <= 0 || config.shaft.shaft_width <= 0 {
        return Err(ConfigError::Invalid("shaft dimensions must be positive"));
    }
    if config.animation.travel_tick_ms == 0 || config.animation.door_tick_ms == 0 {
        return Err(ConfigError::Invalid("tick intervals must be nonzero"));
    }

    Ok(config)
}
