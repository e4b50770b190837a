use std::fmt;
use std::str::FromStr;

use crate::error::SeasonError;

/// A regular season, written `2019-2020` by users and `20192020` by the stats API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Season {
    pub start_year: u16,
    pub end_year: u16,
}

impl Season {
    pub fn api_id(&self) -> String {
        format!("{:04}{:04}", self.start_year, self.end_year)
    }
}

impl FromStr for Season {
    type Err = SeasonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 9 || s.find('-') != Some(4) {
            return Err(SeasonError::Format(s.to_string()));
        }

        let (start, end) = (&s[..4], &s[5..]);
        let parse_year = |part: &str| -> Result<u16, SeasonError> {
            if !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(SeasonError::NotNumeric(s.to_string()));
            }
            part.parse().map_err(|_| SeasonError::NotNumeric(s.to_string()))
        };

        Ok(Season {
            start_year: parse_year(start)?,
            end_year: parse_year(end)?,
        })
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:04}", self.start_year, self.end_year)
    }
}
