use std::ops::{Range, RangeInclusive};

use http::StatusCode;

/// The status codes a call accepts.
///
/// Defaults to `200..500`: every success, redirection and client error.
/// A call receiving another status fails with
/// [`ApiClientError::UnexpectedStatusCode`](crate::ApiClientError::UnexpectedStatusCode).
///
/// ```rust
/// use http::StatusCode;
/// use snipdocs_core::ExpectedStatusCodes;
///
/// let codes = ExpectedStatusCodes::from_status_code(StatusCode::OK)
///     .add_status_code(StatusCode::CONFLICT);
/// assert!(codes.contains(409));
/// assert!(!codes.contains(201));
/// ```
#[derive(Debug, Clone)]
pub struct ExpectedStatusCodes {
    ranges: Vec<StatusCodeRange>,
}

#[derive(Debug, Clone)]
enum StatusCodeRange {
    Single(u16),
    Inclusive(RangeInclusive<u16>),
    Exclusive(Range<u16>),
}

impl ExpectedStatusCodes {
    /// Accepts `200..500`.
    pub fn new() -> Self {
        Self {
            ranges: vec![StatusCodeRange::Exclusive(200..500)],
        }
    }

    /// Accepts a single status.
    ///
    /// # Panics
    ///
    /// Panics if `status` is not between 100 and 599.
    pub fn from_single(status: u16) -> Self {
        assert!(
            (100..=599).contains(&status),
            "HTTP status code must be between 100 and 599, got {status}"
        );
        Self {
            ranges: vec![StatusCodeRange::Single(status)],
        }
    }

    /// Accepts an inclusive range of statuses.
    ///
    /// # Panics
    ///
    /// Panics if the range is empty or outside 100..=599.
    pub fn from_inclusive_range(range: RangeInclusive<u16>) -> Self {
        assert!(
            *range.start() >= 100 && *range.end() <= 599 && range.start() <= range.end(),
            "HTTP status code range must be within 100..=599, got {range:?}"
        );
        Self {
            ranges: vec![StatusCodeRange::Inclusive(range)],
        }
    }

    /// Accepts an exclusive range of statuses.
    ///
    /// # Panics
    ///
    /// Panics if the range is empty or outside 100..600.
    pub fn from_exclusive_range(range: Range<u16>) -> Self {
        assert!(
            range.start >= 100 && range.end <= 600 && range.start < range.end,
            "HTTP status code range must be within 100..600, got {range:?}"
        );
        Self {
            ranges: vec![StatusCodeRange::Exclusive(range)],
        }
    }

    /// Accepts a single status.
    pub fn from_status_code(status: StatusCode) -> Self {
        Self {
            ranges: vec![StatusCodeRange::Single(status.as_u16())],
        }
    }

    /// Accepts any of the given statuses.
    pub fn from_status_codes(statuses: impl IntoIterator<Item = StatusCode>) -> Self {
        Self {
            ranges: statuses
                .into_iter()
                .map(|status| StatusCodeRange::Single(status.as_u16()))
                .collect(),
        }
    }

    /// Also accepts `status`.
    ///
    /// # Panics
    ///
    /// Panics if `status` is not between 100 and 599.
    pub fn add_single(mut self, status: u16) -> Self {
        assert!(
            (100..=599).contains(&status),
            "HTTP status code must be between 100 and 599, got {status}"
        );
        self.ranges.push(StatusCodeRange::Single(status));
        self
    }

    /// Also accepts `status`.
    pub fn add_status_code(mut self, status: StatusCode) -> Self {
        self.ranges.push(StatusCodeRange::Single(status.as_u16()));
        self
    }

    /// Also accepts an inclusive range of statuses.
    pub fn add_inclusive_range(mut self, range: RangeInclusive<u16>) -> Self {
        self.ranges.push(StatusCodeRange::Inclusive(range));
        self
    }

    /// Also accepts an exclusive range of statuses.
    pub fn add_exclusive_range(mut self, range: Range<u16>) -> Self {
        self.ranges.push(StatusCodeRange::Exclusive(range));
        self
    }

    /// Whether `status` is accepted.
    pub fn contains(&self, status: u16) -> bool {
        self.ranges.iter().any(|range| match range {
            StatusCodeRange::Single(single) => *single == status,
            StatusCodeRange::Inclusive(range) => range.contains(&status),
            StatusCodeRange::Exclusive(range) => range.contains(&status),
        })
    }

    /// Whether `status` is accepted.
    pub fn contains_status_code(&self, status: StatusCode) -> bool {
        self.contains(status.as_u16())
    }
}

impl Default for ExpectedStatusCodes {
    fn default() -> Self {
        Self::new()
    }
}
