use bon::Builder;
use chrono::NaiveDate;
use serde_json::Value;

use crate::api::options::{Params, ReadOptions};

/// Fixed acknowledgement of the service terms, required on every request.
const TERMS_AND_CONDITIONS_ACCEPTED: &str = "Y";

/// Who is asking: the identity fields sent with every request.
#[derive(Clone, Debug, Builder)]
pub struct Requester {
    #[builder(into)]
    pub username: String,

    /// Electric Service Identifier of the meter.
    #[builder(into)]
    pub esiid: String,

    #[builder(into, default = "RES".to_owned())]
    pub requester_type: String,

    #[builder(into, default = "XML".to_owned())]
    pub delivery_mode: String,
}

impl Requester {
    /// Build the flat request envelope: identity fields first, then the method parameters on top.
    #[must_use]
    pub fn envelope(&self, transaction_id: u64, params: Params) -> Params {
        let mut envelope = Params::from_iter([
            ("trans_id".to_owned(), Value::from(transaction_id.to_string())),
            ("requestorID".to_owned(), Value::from(self.username.as_str())),
            ("requesterType".to_owned(), Value::from(self.requester_type.as_str())),
            ("deliveryMode".to_owned(), Value::from(self.delivery_mode.as_str())),
            ("esiid".to_owned(), Value::from(self.esiid.as_str())),
            ("SMTTermsandConditions".to_owned(), Value::from(TERMS_AND_CONDITIONS_ACCEPTED)),
        ]);
        envelope.extend(params);
        envelope
    }
}

/// Service date format: `mm/dd/yyyy`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

/// Required date range fields, overlaid by the caller's extras.
#[must_use]
pub fn date_range_params(start_date: NaiveDate, end_date: NaiveDate, extra: &Params) -> Params {
    let mut params = Params::from_iter([
        ("startDate".to_owned(), Value::from(format_date(start_date))),
        ("endDate".to_owned(), Value::from(format_date(end_date))),
    ]);
    params.extend(extra.clone());
    params
}

/// Required read fields (dates, version, and reading type), overlaid by the caller's extras.
#[must_use]
pub fn read_params(start_date: NaiveDate, end_date: NaiveDate, options: &ReadOptions) -> Params {
    let mut params = Params::from_iter([
        ("version".to_owned(), serde_json::json!(options.version)),
        ("readingType".to_owned(), serde_json::json!(options.reading_type)),
    ]);
    params.extend(date_range_params(start_date, end_date, &options.extra));
    params
}
