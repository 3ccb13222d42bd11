#![allow(clippy::doc_markdown)]

mod cli;
mod tables;

use anyhow::Context;
use clap::{Parser, crate_version};
use serde_json::Value;
use smt::api::{Client, HttpsTransport, Params, ReadOptions};
use tracing::{info, instrument};

use crate::{
    cli::{Args, Command, OdrArgs},
    tables::build_interval_reads_table,
};

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    let mut client = args.connection.new_client()?;
    info!(host = %client.host(), "connected");

    match args.command {
        Command::IntervalReads(args) => {
            let reads = client
                .min_interval_reads(args.start_date, args.end_date, &ReadOptions::default())
                .context("failed to fetch the interval reads")?;
            println!("{}", build_interval_reads_table(&reads));
        }
        Command::DailyReads(args) => {
            let body = client
                .daily_reads(args.start_date, args.end_date, &ReadOptions::default())
                .context("failed to fetch the daily reads")?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Command::Odr(args) => {
            let body = odr(&mut client, &args)?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }

    info!("done!");
    Ok(())
}

#[instrument(skip_all, fields(wait = args.wait))]
fn odr(client: &mut Client<HttpsTransport>, args: &OdrArgs) -> anyhow::Result<Value> {
    let (start_date, end_date) = (args.dates.start_date, args.dates.end_date);
    if args.wait {
        client
            .odr_and_wait(start_date, end_date, &Params::new(), args.polling())
            .context("on-demand read did not complete")
    } else {
        client.odr(start_date, end_date, &Params::new()).context("failed to request an on-demand read")
    }
}
