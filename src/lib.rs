//! Smart Meter Texas API client.
//!
//! Authenticates with a client certificate plus basic credentials and fetches
//! 15-minute interval reads, daily reads, and on-demand reads:
//!
//! ```no_run
//! use std::path::Path;
//!
//! use chrono::NaiveDate;
//! use smt::api::{Client, ClientIdentity, Host, HttpsTransport, ReadOptions, Requester};
//!
//! # fn main() -> smt::Result {
//! let identity = ClientIdentity::from_pem_files(Path::new("smt.cert"), Path::new("smt.key"))?;
//! let transport =
//!     HttpsTransport::builder().username("jdoe").password("secret").identity(identity).build();
//! let mut client = Client::builder()
//!     .transport(transport)
//!     .host(Host::Test)
//!     .requester(Requester::builder().username("jdoe").esiid("10443720000000001").build())
//!     .build();
//! let start_date = NaiveDate::from_ymd_opt(2021, 1, 18).unwrap();
//! let end_date = NaiveDate::from_ymd_opt(2021, 1, 19).unwrap();
//! for day in client.min_interval_reads(start_date, end_date, &ReadOptions::default())? {
//!     println!("{}: {:?}", day.date, day.readings);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
mod error;
mod prelude;

pub use self::{error::Error, prelude::Result};
