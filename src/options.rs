use anyhow::{Error, Result};
use check_rabbitmq_overview::{DEFAULT_PORT, DEFAULT_USER_AGENT};
use lazy_static::lazy_static;
use serde::Deserialize;
use std::{fs, io::ErrorKind};
use structopt::StructOpt;

pub(crate) const CONFIG_FILE: &str = "./check_rabbitmq_overview.toml";
const HOST: &str = "localhost";
const USERNAME: &str = "guest";
const PASSWORD: &str = "guest";
const WARNING: &str = "10000,10000";
const CRITICAL: &str = "50000,50000";

// structopt wants `&str` defaults, serde wants functions
lazy_static! {
    static ref PORT_STR: String = DEFAULT_PORT.to_string();
}

// Macro for generating default functions to be used by serde
macro_rules! default_function {
    ( $( $name:ident : $T:ty = $e:expr; )* ) => {
        $(
            fn $name() -> $T {
                $e
            }
        )*
    };
}

default_function! {
    host: String = HOST.to_string();
    port: u16 = DEFAULT_PORT;
    username: String = USERNAME.to_string();
    password: String = PASSWORD.to_string();
    warning: String = WARNING.to_string();
    critical: String = CRITICAL.to_string();
    user_agent: String = DEFAULT_USER_AGENT.to_string();
}

// Macro for merging configuration values
macro_rules! fold_in {
    ( $cli:ident , $toml:ident ; $( $key:ident : $default:expr; )* ) => {
        $(
            if $cli.$key == $default && $toml.$key != $default {
                $cli.$key = $toml.$key;
            }
        )*
    };
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "check-rabbitmq-overview",
    about = "Check the queue totals of the RabbitMQ management overview against warning and critical thresholds."
)]
pub(crate) struct CheckOptions {
    /// Configuration file to use
    #[structopt(long = "config", default_value = CONFIG_FILE)]
    pub config_file: String,

    #[structopt(flatten)]
    pub config: Config,
}

#[derive(Debug, Deserialize, StructOpt)]
pub(crate) struct Config {
    /// The host of the RabbitMQ server being monitored.
    /// For clusters use all the hostnames in a comma separated list.
    #[structopt(short = "h", long, default_value = HOST)]
    #[serde(default = "host")]
    pub host: String,

    /// The port on which the management API can be accessed
    #[structopt(short = "P", long, default_value = &PORT_STR)]
    #[serde(default = "port")]
    pub port: u16,

    /// The username used for accessing the management API
    #[structopt(short, long, default_value = USERNAME, env = "RABBITMQ_USERNAME")]
    #[serde(default = "username")]
    pub username: String,

    /// The password for the account used to access the management API
    #[structopt(
        short,
        long,
        default_value = PASSWORD,
        env = "RABBITMQ_PASSWORD",
        hide_env_values = true,
        hide_default_value = true
    )]
    #[serde(default = "password")]
    pub password: String,

    /// Thresholds for warnings, as `ready,unacknowledged`
    #[structopt(short, long, default_value = WARNING)]
    #[serde(default = "warning")]
    pub warning: String,

    /// Thresholds for critical, as `ready,unacknowledged`
    #[structopt(short, long, default_value = CRITICAL)]
    #[serde(default = "critical")]
    pub critical: String,

    /// Use https instead of http when accessing the management API
    #[structopt(short, long)]
    #[serde(default)]
    pub secure: bool,

    /// Proceed for server connections considered insecure (invalid TLS)
    #[structopt(long)]
    #[serde(default)]
    pub insecure: bool,

    /// User agent
    #[structopt(long, default_value = DEFAULT_USER_AGENT)]
    #[serde(default = "user_agent")]
    pub user_agent: String,

    /// Verbose program output
    #[structopt(short, long)]
    #[serde(default)]
    pub verbose: bool,
}

impl Config {
    /// Load configuration from a file
    pub(crate) fn load_from_file(path: &str) -> Result<Option<Config>> {
        // Read configuration file
        let result = fs::read(path);

        // Ignore a file not found error
        let contents = match result {
            Ok(c) => c,
            Err(e) => {
                return match e.kind() {
                    ErrorKind::NotFound => Ok(None),
                    _ => Err(Error::from(e)),
                }
            }
        };

        Ok(Some(toml::from_slice(&contents)?))
    }

    /// Merge the configuration from TOML into the CLI configuration
    pub(crate) fn merge(&mut self, toml: Config) {
        fold_in! {
            // Destination and source configs
            self, toml;

            // Keys with defaults to assign
            host: HOST;
            port: DEFAULT_PORT;
            username: USERNAME;
            password: PASSWORD;
            warning: WARNING;
            critical: CRITICAL;
            secure: false;
            insecure: false;
            user_agent: DEFAULT_USER_AGENT;
            verbose: false;
        }
    }
}
