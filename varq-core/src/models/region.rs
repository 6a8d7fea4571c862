use std::fmt::{self, Display};
use std::str::FromStr;

use crate::errors::{QueryError, Result};

/// End coordinate used when a region has no upper bound (`chr` or `chr:start`).
pub const UNBOUNDED_END: u32 = 2_147_483_647;

/// Start coordinate used when a region has no lower bound (`chr`).
pub const UNBOUNDED_START: u32 = 0;

///
/// Region struct, a genomic window given as `chr`, `chr:start` or `chr:start-end`
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct Region {
    pub chr: String,
    pub start: u32,
    pub end: u32,
}

impl Region {
    pub fn new(chr: &str, start: u32, end: u32) -> Self {
        Region {
            chr: chr.to_string(),
            start,
            end,
        }
    }

    ///
    /// Whole chromosome, i.e. neither start nor end were given
    ///
    pub fn is_whole_chromosome(&self) -> bool {
        self.start == UNBOUNDED_START && self.end == UNBOUNDED_END
    }

    ///
    /// Only the start was given
    ///
    pub fn is_open_ended(&self) -> bool {
        self.end == UNBOUNDED_END
    }
}

fn parse_coordinate(value: &str, region: &str) -> Result<u32> {
    value
        .trim()
        .replace('_', "")
        .parse::<u32>()
        .map_err(|_| QueryError::RegionParseError(region.to_string()))
}

impl FromStr for Region {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (chr, position) = match s.split_once(':') {
            Some((chr, position)) => (chr, Some(position)),
            None => (s, None),
        };

        let (start, end) = match position {
            None => (UNBOUNDED_START, UNBOUNDED_END),
            Some(position) => match position.split_once('-') {
                Some((start, end)) => (parse_coordinate(start, s)?, parse_coordinate(end, s)?),
                None => (parse_coordinate(position, s)?, UNBOUNDED_END),
            },
        };

        if start > end {
            return Err(QueryError::RegionParseError(s.to_string()));
        }

        Ok(Region {
            chr: chr.to_string(),
            start,
            end,
        })
    }
}

///
/// Parse a list of regions separated by `,` or `;`. Empty tokens are skipped.
///
pub fn parse_regions(value: &str) -> Result<Vec<Region>> {
    value
        .split([',', ';'])
        .filter(|token| !token.trim().is_empty())
        .map(Region::from_str)
        .collect()
}

impl Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_whole_chromosome() {
            write!(f, "{}", self.chr)
        } else if self.is_open_ended() {
            write!(f, "{}:{}", self.chr, self.start)
        } else {
            write!(f, "{}:{}-{}", self.chr, self.start, self.end)
        }
    }
}
