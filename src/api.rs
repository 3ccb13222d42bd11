mod client;
mod envelope;
mod host;
mod https;
mod interval_reads;
mod odr;
mod options;
mod service_error;
mod transport;

pub use self::{
    client::Client,
    envelope::{Requester, format_date},
    host::{Host, build_url},
    https::{ClientIdentity, DEFAULT_TIMEOUT, HttpsTransport},
    interval_reads::{DayReadings, IntervalReads, IntervalReadsResponse, ReadingError},
    odr::{OdrPolling, OdrStatus},
    options::{Params, ReadOptions, ReadingType, Version},
    service_error::{ServiceError, ServiceErrorKind, UNKNOWN_CODE},
    transport::{Response, Transport},
};
