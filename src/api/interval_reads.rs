//! 15-minute interval reads.

use std::num::ParseFloatError;

use serde::Deserialize;

use crate::prelude::*;

/// Readings of a single day.
#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct DayReadings {
    /// Date as returned by the service, `mm/dd/yyyy`.
    pub date: String,

    /// Kilowatt-hours per 15-minute interval, in the service order.
    pub readings: Vec<f64>,
}

impl DayReadings {
    #[must_use]
    pub fn total(&self) -> f64 {
        self.readings.iter().sum()
    }
}

/// Interval reads keyed by date, in the service return order.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq, derive_more::Index, derive_more::IntoIterator)]
pub struct IntervalReads(#[into_iterator(owned, ref)] pub Vec<DayReadings>);

impl IntervalReads {
    #[must_use]
    pub fn get(&self, date: &str) -> Option<&[f64]> {
        self.0.iter().find(|day| day.date == date).map(|day| day.readings.as_slice())
    }

    #[must_use]
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|day| day.date.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<IntervalReadsResponse> for IntervalReads {
    type Error = Error;

    fn try_from(response: IntervalReadsResponse) -> Result<Self> {
        response
            .energy_data
            .into_iter()
            .map(|day| {
                let readings: Vec<f64> = day
                    .readings
                    .split(',')
                    .map(parse_reading)
                    .collect::<Result<_, _>>()
                    .map_err(|(token, source)| Error::DataQuality {
                        date: day.date.clone(),
                        token,
                        source,
                    })?;
                Ok(DayReadings { date: day.date, readings })
            })
            .collect::<Result<_>>()
            .map(Self)
    }
}

/// Why a reading token was rejected.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReadingError {
    #[error(transparent)]
    Parse(#[from] ParseFloatError),

    #[error("not a finite number")]
    NonFinite,
}

/// Parse a reading token, like `0.125` or `0.125-A`.
///
/// The service may suffix a reading with its quality flag (`A` for actual, `E` for estimated),
/// which is dropped.
fn parse_reading(token: &str) -> Result<f64, (String, ReadingError)> {
    let trimmed = token.trim();
    let value = match trimmed.rsplit_once('-') {
        Some((value, flag))
            if !value.is_empty() && !flag.is_empty() && flag.chars().all(|c| c.is_ascii_alphabetic()) =>
        {
            value
        }
        _ => trimmed,
    };
    match value.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err((token.to_owned(), ReadingError::NonFinite)),
        Err(error) => Err((token.to_owned(), error.into())),
    }
}

#[derive(Deserialize)]
pub struct IntervalReadsResponse {
    #[serde(rename = "energyData", default)]
    energy_data: Vec<RawDayReadings>,
}

#[derive(Deserialize)]
struct RawDayReadings {
    #[serde(rename = "DT")]
    date: String,

    /// Comma-separated readings. Every token is a reading, so an empty string is one empty token.
    #[serde(rename = "RD")]
    readings: String,
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn parse(body: &str) -> Result<IntervalReads> {
        IntervalReads::try_from(serde_json::from_str::<IntervalReadsResponse>(body)?)
    }

    #[test]
    fn parse_ok() -> Result {
        // language=JSON
        const BODY: &str = r#"
            {
                "trans_id": "0",
                "esiid": "10443720000000001",
                "energyData": [
                    {"DT": "01/18/2021", "RevTS": "01/19/2021 03:21:15", "RT": "C", "RD": "0.125,0.250-A,1.5-E,0"},
                    {"DT": "01/19/2021", "RevTS": "01/20/2021 03:20:41", "RT": "C", "RD": "2"}
                ]
            }
        "#;
        let reads = parse(BODY)?;
        assert_eq!(reads.dates().collect::<Vec<_>>(), ["01/18/2021", "01/19/2021"]);
        assert_eq!(reads.get("01/18/2021"), Some([0.125, 0.25, 1.5, 0.0].as_slice()));
        assert_eq!(reads[1].readings, [2.0]);
        assert_abs_diff_eq!(reads[0].total(), 1.875);
        assert_eq!(reads.get("01/20/2021"), None);
        Ok(())
    }

    #[test]
    fn full_day_ok() -> Result {
        let readings = vec!["0.1-A"; 96].join(",");
        let body = serde_json::json!({"energyData": [{"DT": "01/18/2021", "RD": readings}]});
        let reads = parse(&body.to_string())?;
        assert_eq!(reads[0].readings.len(), 96);
        assert_abs_diff_eq!(reads[0].total(), 9.6, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn missing_energy_data_ok() -> Result {
        assert!(parse(r#"{"trans_id": "0"}"#)?.is_empty());
        Ok(())
    }

    #[test]
    fn non_numeric_reading_fails() {
        let result = parse(r#"{"energyData": [{"DT": "01/18/2021", "RD": "0.1,n/a,0.3"}]}"#);
        match result {
            Err(Error::DataQuality { date, token, .. }) => {
                assert_eq!(date, "01/18/2021");
                assert_eq!(token, "n/a");
            }
            _ => panic!("expected a data quality error"),
        }
    }

    #[test]
    fn empty_token_fails() {
        let result = parse(r#"{"energyData": [{"DT": "01/18/2021", "RD": "0.1,,0.3"}]}"#);
        assert!(matches!(result, Err(Error::DataQuality { .. })));
    }

    #[test]
    fn empty_readings_fail() {
        let result = parse(r#"{"energyData": [{"DT": "01/18/2021", "RD": ""}]}"#);
        match result {
            Err(Error::DataQuality { date, token, .. }) => {
                assert_eq!(date, "01/18/2021");
                assert_eq!(token, "");
            }
            _ => panic!("expected a data quality error"),
        }
    }

    #[test]
    fn non_finite_readings_fail() {
        for token in ["NaN-A", "inf", "infinity-E", "-INF"] {
            let body = serde_json::json!({"energyData": [{"DT": "01/18/2021", "RD": format!("0.1,{token}")}]});
            let result = parse(&body.to_string());
            assert!(
                matches!(&result, Err(Error::DataQuality { token: rejected, source: ReadingError::NonFinite, .. }) if rejected == token),
                "`{token}` must be rejected",
            );
        }
    }

    #[test]
    fn parse_reading_ok() {
        assert_eq!(parse_reading(" 0.5 "), Ok(0.5));
        assert_eq!(parse_reading("-0.5"), Ok(-0.5));
        assert_eq!(parse_reading("1e-3"), Ok(0.001));
        assert_eq!(parse_reading("0.75-E"), Ok(0.75));
        assert!(parse_reading("-A").is_err());
        assert!(parse_reading("A").is_err());
        assert_eq!(parse_reading("nan"), Err(("nan".to_owned(), ReadingError::NonFinite)));
    }
}
