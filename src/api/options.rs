use bon::Builder;
use serde::Serialize;
use serde_json::{Map, Value};

/// Extra request fields; they override the required ones on key collision.
pub type Params = Map<String, Value>;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub enum Version {
    /// Latest version of each read.
    #[default]
    #[serde(rename = "L")]
    Latest,

    /// All versions, including the superseded ones.
    #[serde(rename = "A")]
    All,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub enum ReadingType {
    #[default]
    #[serde(rename = "C")]
    Consumption,

    #[serde(rename = "G")]
    Generation,

    #[serde(rename = "A")]
    All,
}

/// Options shared by the interval and daily reads.
#[must_use]
#[derive(Clone, Debug, Default, Builder)]
pub struct ReadOptions {
    #[builder(default)]
    pub version: Version,

    #[builder(default)]
    pub reading_type: ReadingType,

    #[builder(default)]
    pub extra: Params,
}
