use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use smt::api::{Client, ClientIdentity, Host, HttpsTransport, OdrPolling, Requester};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    #[clap(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch 15-minute interval reads and print the daily summary.
    #[clap(name = "interval-reads")]
    IntervalReads(ReadArgs),

    /// Fetch daily reads and print the raw response.
    #[clap(name = "daily-reads")]
    DailyReads(ReadArgs),

    /// Request an on-demand meter read.
    #[clap(name = "odr")]
    Odr(OdrArgs),
}

#[derive(Parser)]
pub struct ConnectionArgs {
    /// Use the user acceptance testing environment.
    #[clap(long, env = "SMT_TEST")]
    pub test: bool,

    #[clap(long, env = "SMT_USERNAME")]
    pub username: String,

    #[clap(long, env = "SMT_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Electric Service Identifier of the meter.
    #[clap(long, env = "SMT_ESIID")]
    pub esiid: String,

    /// PEM-encoded client certificate.
    #[clap(long = "certificate-path", env = "SMT_CERTIFICATE_PATH")]
    pub certificate_path: PathBuf,

    /// PEM-encoded private key of the client certificate.
    #[clap(long = "key-path", env = "SMT_KEY_PATH")]
    pub key_path: PathBuf,

    /// Connect and read timeout, for example: `30s`.
    #[clap(long, env = "SMT_TIMEOUT", default_value = "30s")]
    pub timeout: humantime::Duration,
}

impl ConnectionArgs {
    pub fn new_client(&self) -> anyhow::Result<Client<HttpsTransport>> {
        let identity = ClientIdentity::from_pem_files(&self.certificate_path, &self.key_path)
            .context("failed to load the client identity")?;
        let transport = HttpsTransport::builder()
            .username(&self.username)
            .password(&self.password)
            .identity(identity)
            .timeout(self.timeout.into())
            .build();
        let requester = Requester::builder().username(&self.username).esiid(&self.esiid).build();
        Ok(Client::builder()
            .transport(transport)
            .host(Host::new(self.test))
            .requester(requester)
            .build())
    }
}

#[derive(Parser)]
pub struct ReadArgs {
    /// First date, `YYYY-MM-DD`.
    #[clap(long)]
    pub start_date: NaiveDate,

    /// Last date, `YYYY-MM-DD`.
    #[clap(long)]
    pub end_date: NaiveDate,
}

#[derive(Parser)]
pub struct OdrArgs {
    #[clap(flatten)]
    pub dates: ReadArgs,

    /// Wait for the meter read to complete.
    #[clap(long)]
    pub wait: bool,

    #[clap(long, default_value = "10", env = "SMT_ODR_MAX_ATTEMPTS")]
    pub max_attempts: u32,

    /// Pause between the status checks.
    #[clap(long, default_value = "30s", env = "SMT_ODR_INTERVAL")]
    pub interval: humantime::Duration,
}

impl OdrArgs {
    pub fn polling(&self) -> OdrPolling {
        OdrPolling::builder()
            .max_attempts(self.max_attempts)
            .interval(Duration::from(self.interval))
            .build()
    }
}
