mod errors;
mod source_result;
mod transaction;

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use errors::{CoordinatorError, FetchError};
pub use source_result::SourceResult;
pub use transaction::Transaction;

/// The bank feeds the aggregator knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Bko,
    Kibk,
    Rbk,
    Kd
}

impl Source {
    pub const ALL: [Source; 4] = [Source::Bko, Source::Kibk, Source::Rbk, Source::Kd];

    pub fn code(&self) -> &'static str {
        match self {
            Source::Bko => "BKO",
            Source::Kibk => "KIBK",
            Source::Rbk => "RBK",
            Source::Kd => "KD"
        }
    }

    /// Name of the JSON document each bank publishes its transactions under.
    pub fn file_name(&self) -> &'static str {
        match self {
            Source::Bko => "BKO.json",
            Source::Kibk => "KIBK.json",
            Source::Rbk => "RBK.json",
            Source::Kd => "KD.json"
        }
    }
}

impl Display for Source {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.code())
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Source::ALL.into_iter()
            .find(|source| source.code().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| format!("Unknown source '{value}', expected one of: bko, kibk, rbk, kd"))
    }
}
