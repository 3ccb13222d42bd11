use std::thread::sleep;

use bon::Builder;
use chrono::{Local, NaiveDate};
use serde_json::Value;

use crate::{
    api::{
        envelope::{Requester, date_range_params, read_params},
        host::{Host, build_url},
        interval_reads::{IntervalReads, IntervalReadsResponse},
        odr::{OdrPolling, OdrStatus, status_params},
        options::{Params, ReadOptions},
        service_error::ServiceError,
        transport::Transport,
    },
    prelude::*,
};

/// Smart Meter Texas API client.
///
/// The transaction ID is owned by the instance and advances after every successful call,
/// hence the read methods take `&mut self`. Use one client per thread.
#[derive(Builder)]
pub struct Client<T> {
    transport: T,

    #[builder(default)]
    host: Host,

    requester: Requester,

    #[builder(skip)]
    transaction_id: u64,
}

impl<T: Transport> Client<T> {
    #[must_use]
    pub const fn host(&self) -> Host {
        self.host
    }

    /// Transaction ID of the next request.
    #[must_use]
    pub const fn transaction_id(&self) -> u64 {
        self.transaction_id
    }

    /// Fetch 15-minute interval reads.
    ///
    /// The service does not serve the current day, so neither date may be today.
    #[instrument(skip_all, fields(start_date = %start_date, end_date = %end_date))]
    pub fn min_interval_reads(
        &mut self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        options: &ReadOptions,
    ) -> Result<IntervalReads> {
        let today = Local::now().date_naive();
        for date in [start_date, end_date] {
            if date == today {
                return Err(Error::SameDayRead { date });
            }
        }
        info!("fetching…");
        let response: IntervalReadsResponse = serde_json::from_value(
            self.request("15minintervalreads", read_params(start_date, end_date, options))?,
        )?;
        let reads = IntervalReads::try_from(response)?;
        info!(n_days = reads.len(), "fetched");
        Ok(reads)
    }

    /// Fetch daily reads and return the response body as is.
    #[instrument(skip_all, fields(start_date = %start_date, end_date = %end_date))]
    pub fn daily_reads(
        &mut self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        options: &ReadOptions,
    ) -> Result<Value> {
        info!("fetching…");
        self.request("dailyreads", read_params(start_date, end_date, options))
    }

    /// Submit an on-demand read, which triggers a poll of the physical meter.
    ///
    /// Returns the acknowledgement: the reading itself arrives later,
    /// see [`Self::odr_status`] and [`Self::odr_and_wait`].
    #[instrument(skip_all, fields(start_date = %start_date, end_date = %end_date))]
    pub fn odr(&mut self, start_date: NaiveDate, end_date: NaiveDate, extra: &Params) -> Result<Value> {
        info!("requesting…");
        self.request("odr", date_range_params(start_date, end_date, extra))
    }

    #[instrument(skip_all)]
    pub fn odr_status(&mut self, params: Params) -> Result<Value> {
        self.request("odrstatus", params)
    }

    /// Submit an on-demand read and poll its status until it completes.
    ///
    /// Returns the final status body, which carries the reading.
    #[instrument(skip_all, fields(start_date = %start_date, end_date = %end_date, max_attempts = polling.max_attempts))]
    pub fn odr_and_wait(
        &mut self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        extra: &Params,
        polling: OdrPolling,
    ) -> Result<Value> {
        let acknowledgement = self.odr(start_date, end_date, extra)?;
        let params = status_params(&acknowledgement);
        for attempt in 1..=polling.max_attempts {
            sleep(polling.interval);
            let body = self.odr_status(params.clone())?;
            match OdrStatus::from_body(&body) {
                OdrStatus::Completed => {
                    info!(attempt, "completed");
                    return Ok(body);
                }
                OdrStatus::Failed(status) => {
                    warn!(attempt, %status, "failed");
                    return Err(Error::OdrFailed { status, body });
                }
                OdrStatus::Pending(status) => {
                    debug!(attempt, %status, "pending…");
                }
            }
        }
        Err(Error::OdrTimeout { n_attempts: polling.max_attempts })
    }

    #[instrument(skip_all, level = Level::DEBUG, fields(endpoint = endpoint, transaction_id = self.transaction_id))]
    fn request(&mut self, endpoint: &str, params: Params) -> Result<Value> {
        let envelope = Value::Object(self.requester.envelope(self.transaction_id, params));
        let url = build_url(self.host.base_url(), endpoint);
        let response = self.transport.post(&url, &envelope)?;
        if response.is_error() {
            let error = ServiceError::from(response);
            warn!(status = error.response.status, kind = %error.kind, code = %error.code, "rejected");
            return Err(error.into());
        }
        let body = response.json()?;
        self.transaction_id += 1;
        Ok(body)
    }
}
