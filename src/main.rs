//! `check-rabbitmq-overview` is a monitoring check for RabbitMQ.
//!
//! It requests `/api/overview` from the management API of every given host
//! and prints one status line per queue counter:
//!
//! ```sh
//! $ check-rabbitmq-overview --host rabbit-1,rabbit-2 -w 10000,10000 -c 50000,50000
//! OK 5000 messages ready
//! OK 3000 messages unacknowledged
//! WARNING 12000 messages ready
//! OK 3000 messages unacknowledged
//! ```
//!
//! The first host that cannot be checked aborts the run.
#[macro_use]
extern crate log;

use anyhow::Result;
use check_rabbitmq_overview::{Check, ClientBuilder};
use env_logger::{Builder, Env};
use log::LevelFilter;
use std::io::{self, Write};
use structopt::StructOpt;

mod options;

use options::{Config, CheckOptions};

/// A C-like enum that can be cast to `i32` and used as process exit code.
enum ExitCode {
    Success = 0,
    // NOTE: exit code 1 is used for any `Result::Err` bubbled up to `main()` using the `?` operator,
    // e.g. an unreadable config file. Invalid arguments exit with 1 as well.
    #[allow(unused)]
    UnexpectedFailure = 1,
    // Nagios UNKNOWN: no status could be determined for at least one host
    CheckAborted = 3,
}

fn main() -> Result<()> {
    let mut opts = CheckOptions::from_args();

    // Load a potentially existing config file and merge it into the config from the CLI
    if let Some(c) = Config::load_from_file(&opts.config_file)? {
        opts.config.merge(c)
    }
    let cfg = &opts.config;
    init_logging(cfg.verbose);

    // Hosts are checked strictly one after another
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let exit_code = runtime.block_on(run(cfg));
    // Drop the runtime before exiting, `process::exit` skips destructors
    drop(runtime);
    std::process::exit(exit_code as i32);
}

async fn run(cfg: &Config) -> ExitCode {
    let client = ClientBuilder::default()
        .port(cfg.port)
        .username(cfg.username.clone())
        .password(cfg.password.clone())
        .secure(cfg.secure)
        .allow_insecure(cfg.insecure)
        .user_agent(cfg.user_agent.clone())
        .build();
    let check = client.and_then(|c| Check::new(c, &cfg.host, &cfg.warning, &cfg.critical));

    let check = match check {
        Ok(check) => check,
        Err(e) => {
            error!("{}", e);
            return ExitCode::CheckAborted;
        }
    };
    debug!(
        "Checking {} host(s) against {:?}",
        check.hosts().len(),
        check.thresholds()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match check.run(&mut out).await {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            error!("{}", e);
            ExitCode::CheckAborted
        }
    }
}

/// Initialize the logging system. Logs go to stderr, stdout is reserved for
/// status lines.
fn init_logging(verbose: bool) {
    let env = Env::default().filter_or("RUST_LOG", "warn");

    let mut builder = Builder::from_env(env);

    if std::env::var("RUST_LOG").is_err() && verbose {
        builder.filter_module("check_rabbitmq_overview", LevelFilter::Debug);
    }

    builder.format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()));
    builder.init();
}
