//! Request tokenization and validation.
//!
//! Validation is two-stage to match who knows what:
//!
//! 1. [`RawRequest::parse`] - line shape: a command token plus an airport
//!    identifier in the third position. Both node kinds run this.
//! 2. [`Request::parse`] - full argument and range validation against a
//!    concrete gate count (airport node), or [`Request::probe`] - argument
//!    shape plus the expected response line count, no range checks
//!    (controller).
//!
//! Checks short-circuit in a fixed order so that a request with several
//! problems always reports the same error the original network did.

use tarmac_core::{PlaneId, HORIZON_SLOTS};

/// A tokenized request line whose command and airport id are known, but
/// whose command-specific arguments have not been validated yet.
#[derive(Debug, Clone)]
pub struct RawRequest<'a> {
    /// The command token, not yet matched against known commands.
    pub command: &'a str,
    /// The embedded airport identifier, as sent. Kept signed so that error
    /// responses can echo out-of-range values verbatim.
    pub airport: i64,
    tokens: Vec<&'a str>,
}

impl<'a> RawRequest<'a> {
    /// Tokenizes a request line.
    ///
    /// # Errors
    /// Returns [`RequestError::Invalid`] if the line carries fewer than
    /// three tokens or the airport token is not an integer.
    pub fn parse(line: &'a str) -> Result<Self, RequestError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 3 {
            return Err(RequestError::Invalid);
        }
        let airport: i64 = tokens[2].parse().map_err(|_| RequestError::Invalid)?;
        Ok(Self {
            command: tokens[0],
            airport,
            tokens,
        })
    }

    /// Returns token `idx` parsed as a signed integer, if present.
    fn int_arg(&self, idx: usize) -> Result<i64, RequestError> {
        self.tokens
            .get(idx)
            .and_then(|token| token.parse().ok())
            .ok_or(RequestError::Invalid)
    }

    /// Returns token `idx` parsed as a plane identifier. Plane ids are
    /// unsigned; a negative token is an argument parse failure.
    fn plane_arg(&self, idx: usize) -> Result<PlaneId, RequestError> {
        self.tokens
            .get(idx)
            .and_then(|token| token.parse::<u64>().ok())
            .map(PlaneId::new)
            .ok_or(RequestError::Invalid)
    }
}

/// A fully validated request, ready to run against the airport store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Reserve a landing window.
    Schedule {
        /// The plane requesting the window.
        plane: PlaneId,
        /// Earliest acceptable start slot.
        earliest: u32,
        /// Additional slots beyond the first; `duration + 1` slots are
        /// actually reserved (the window is inclusive on both ends).
        duration: u32,
        /// Maximum delay, in slots, the plane can wait past `earliest`.
        fuel: u32,
    },
    /// Look up where a plane is scheduled.
    PlaneStatus {
        /// The plane to locate.
        plane: PlaneId,
    },
    /// Report per-slot occupancy for one gate.
    TimeStatus {
        /// Gate index to inspect.
        gate: u32,
        /// First slot of the window.
        start: u32,
        /// Additional slots beyond the first; `duration + 1` lines are
        /// emitted.
        duration: u32,
    },
}

impl Request {
    /// Validates command-specific arguments and ranges for an airport node
    /// with `num_gates` gates.
    ///
    /// The caller must already have verified the airport identifier; range
    /// checks here run field by field in the original order, so e.g. a bad
    /// `earliest` masks a bad `duration`.
    ///
    /// # Errors
    /// [`RequestError::Invalid`] for unknown commands or unparseable
    /// arguments; a field-specific variant for the first out-of-range value.
    pub fn parse(raw: &RawRequest<'_>, num_gates: u32) -> Result<Self, RequestError> {
        match raw.command {
            "SCHEDULE" => {
                let plane = raw.plane_arg(1)?;
                let earliest = raw.int_arg(3)?;
                let duration = raw.int_arg(4)?;
                let fuel = raw.int_arg(5)?;

                if earliest < 0 || earliest >= i64::from(HORIZON_SLOTS) {
                    return Err(RequestError::BadEarliest(earliest));
                }
                if duration < 0 || !within_horizon(earliest, duration) {
                    return Err(RequestError::BadDuration(duration));
                }
                if fuel < 0 || !within_horizon(earliest, fuel) {
                    return Err(RequestError::BadFuel(fuel));
                }

                Ok(Self::Schedule {
                    plane,
                    earliest: cast_slot(earliest),
                    duration: cast_slot(duration),
                    fuel: cast_slot(fuel),
                })
            }
            "PLANE_STATUS" => {
                let plane = raw.plane_arg(1)?;
                Ok(Self::PlaneStatus { plane })
            }
            "TIME_STATUS" => {
                let gate = raw.int_arg(1)?;
                let start = raw.int_arg(3)?;
                let duration = raw.int_arg(4)?;

                if gate < 0 || gate >= i64::from(num_gates) {
                    return Err(RequestError::BadGate(gate));
                }
                if start < 0 || start >= i64::from(HORIZON_SLOTS) {
                    return Err(RequestError::BadStart(start));
                }
                if duration < 0 || !within_horizon(start, duration) {
                    return Err(RequestError::BadDuration(duration));
                }

                Ok(Self::TimeStatus {
                    gate: cast_slot(gate),
                    start: cast_slot(start),
                    duration: cast_slot(duration),
                })
            }
            _ => Err(RequestError::Invalid),
        }
    }

    /// Controller-side shape check: command recognized and arguments parse
    /// as integers. Returns the exact number of response lines a non-error
    /// answer to this request will carry.
    ///
    /// No range validation happens here - the airport owns those semantics.
    /// A `TIME_STATUS` with a negative duration still probes successfully;
    /// the airport's single error line satisfies the minimum of one.
    ///
    /// # Errors
    /// [`RequestError::Invalid`] if the command is unknown or any argument
    /// is missing or non-numeric.
    pub fn probe(raw: &RawRequest<'_>) -> Result<u64, RequestError> {
        match raw.command {
            "SCHEDULE" => {
                raw.int_arg(1)?;
                raw.int_arg(3)?;
                raw.int_arg(4)?;
                raw.int_arg(5)?;
                Ok(1)
            }
            "PLANE_STATUS" => {
                raw.int_arg(1)?;
                Ok(1)
            }
            "TIME_STATUS" => {
                raw.int_arg(1)?;
                raw.int_arg(3)?;
                let duration = raw.int_arg(4)?;
                let expected = duration.saturating_add(1).max(1);
                Ok(u64::try_from(expected).unwrap_or(1))
            }
            _ => Err(RequestError::Invalid),
        }
    }
}

/// True if `base + extent` stays strictly below the horizon. Both values
/// come straight off the wire, so the sum must not be allowed to overflow.
fn within_horizon(base: i64, extent: i64) -> bool {
    base.checked_add(extent)
        .is_some_and(|end| end < i64::from(HORIZON_SLOTS))
}

/// Narrows a range-checked slot value. Callers have already established
/// `0 <= value < HORIZON_SLOTS`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const fn cast_slot(value: i64) -> u32 {
    value as u32
}

/// A request that cannot be served, mapped one-to-one onto the protocol's
/// single-line error responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestError {
    /// Malformed line, unknown command, or unparseable argument.
    Invalid,
    /// `earliest` outside `[0, HORIZON_SLOTS)`.
    BadEarliest(i64),
    /// Negative duration, or a window crossing the horizon.
    BadDuration(i64),
    /// Negative fuel, or a fuel window crossing the horizon.
    BadFuel(i64),
    /// Gate index outside this airport's gate array.
    BadGate(i64),
    /// `start` outside `[0, HORIZON_SLOTS)`.
    BadStart(i64),
}

impl RequestError {
    /// Renders the single `Error:` response line for this failure.
    #[must_use]
    pub fn to_line(&self) -> String {
        match self {
            Self::Invalid => crate::response::invalid_request(),
            Self::BadEarliest(v) => format!("Error: Invalid 'earliest' time ({v})"),
            Self::BadDuration(v) => format!("Error: Invalid 'duration' value ({v})"),
            Self::BadFuel(v) => format!("Error: Invalid 'fuel' value ({v})"),
            Self::BadGate(v) => format!("Error: Invalid 'gate' value ({v})"),
            Self::BadStart(v) => format!("Error: Invalid 'start' time ({v})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(line: &str) -> RawRequest<'_> {
        RawRequest::parse(line).expect("line should tokenize")
    }

    #[test]
    fn test_raw_parse_extracts_airport() {
        let r = raw("SCHEDULE 42 3 10 30 5");
        assert_eq!(r.command, "SCHEDULE");
        assert_eq!(r.airport, 3);
    }

    #[test]
    fn test_raw_parse_rejects_short_lines() {
        assert!(RawRequest::parse("").is_err());
        assert!(RawRequest::parse("SCHEDULE").is_err());
        assert!(RawRequest::parse("SCHEDULE 42").is_err());
    }

    #[test]
    fn test_raw_parse_rejects_non_numeric_airport() {
        assert!(RawRequest::parse("SCHEDULE 42 xyz 10 30 5").is_err());
    }

    #[test]
    fn test_raw_parse_keeps_negative_airport() {
        // Negative airport ids tokenize; the node rejects them by value so
        // the error line can echo what the client sent.
        let r = raw("PLANE_STATUS 42 -3");
        assert_eq!(r.airport, -3);
    }

    #[test]
    fn test_parse_schedule() {
        let request = Request::parse(&raw("SCHEDULE 42 0 10 30 5"), 1).unwrap();
        assert_eq!(
            request,
            Request::Schedule {
                plane: PlaneId::new(42),
                earliest: 10,
                duration: 30,
                fuel: 5,
            }
        );
    }

    #[test]
    fn test_parse_schedule_missing_args() {
        let err = Request::parse(&raw("SCHEDULE 42 0 10"), 1).unwrap_err();
        assert_eq!(err, RequestError::Invalid);
    }

    #[test]
    fn test_parse_schedule_range_checks_in_order() {
        // Bad earliest masks the (also bad) duration.
        let err = Request::parse(&raw("SCHEDULE 1 0 100 200 0"), 1).unwrap_err();
        assert_eq!(err, RequestError::BadEarliest(100));

        let err = Request::parse(&raw("SCHEDULE 1 0 0 -1 0"), 1).unwrap_err();
        assert_eq!(err, RequestError::BadDuration(-1));

        // Window [90, 90+10] crosses the horizon.
        let err = Request::parse(&raw("SCHEDULE 1 0 90 10 0"), 1).unwrap_err();
        assert_eq!(err, RequestError::BadDuration(10));

        let err = Request::parse(&raw("SCHEDULE 1 0 90 5 10"), 1).unwrap_err();
        assert_eq!(err, RequestError::BadFuel(10));
    }

    #[test]
    fn test_parse_schedule_boundary_windows() {
        // earliest + duration == 95 is the last legal inclusive window.
        assert!(Request::parse(&raw("SCHEDULE 1 0 90 5 5"), 1).is_ok());
        assert_eq!(
            Request::parse(&raw("SCHEDULE 1 0 90 6 5"), 1).unwrap_err(),
            RequestError::BadDuration(6)
        );
        assert_eq!(
            Request::parse(&raw("SCHEDULE 1 0 90 5 6"), 1).unwrap_err(),
            RequestError::BadFuel(6)
        );
    }

    #[test]
    fn test_parse_rejects_extreme_windows_without_wrapping() {
        // i64::MAX as a duration or fuel must report the field's error, not
        // wrap the window sum back under the horizon.
        let err =
            Request::parse(&raw("SCHEDULE 1 0 50 9223372036854775807 0"), 1).unwrap_err();
        assert_eq!(err, RequestError::BadDuration(i64::MAX));

        let err =
            Request::parse(&raw("SCHEDULE 1 0 50 5 9223372036854775807"), 1).unwrap_err();
        assert_eq!(err, RequestError::BadFuel(i64::MAX));

        let err =
            Request::parse(&raw("TIME_STATUS 0 0 50 9223372036854775807"), 1).unwrap_err();
        assert_eq!(err, RequestError::BadDuration(i64::MAX));

        // i64::MIN is caught by the sign checks before any arithmetic.
        let err =
            Request::parse(&raw("SCHEDULE 1 0 50 -9223372036854775808 0"), 1).unwrap_err();
        assert_eq!(err, RequestError::BadDuration(i64::MIN));
    }

    #[test]
    fn test_parse_negative_plane_is_invalid() {
        let err = Request::parse(&raw("SCHEDULE -1 0 10 30 5"), 1).unwrap_err();
        assert_eq!(err, RequestError::Invalid);
    }

    #[test]
    fn test_parse_plane_status() {
        let request = Request::parse(&raw("PLANE_STATUS 42 0"), 1).unwrap();
        assert_eq!(
            request,
            Request::PlaneStatus {
                plane: PlaneId::new(42)
            }
        );
    }

    #[test]
    fn test_parse_time_status_checks_gate_first() {
        // Gate check precedes start/duration checks.
        let err = Request::parse(&raw("TIME_STATUS 5 0 999 -1"), 4).unwrap_err();
        assert_eq!(err, RequestError::BadGate(5));

        let err = Request::parse(&raw("TIME_STATUS 3 0 999 -1"), 4).unwrap_err();
        assert_eq!(err, RequestError::BadStart(999));

        let err = Request::parse(&raw("TIME_STATUS 3 0 10 -1"), 4).unwrap_err();
        assert_eq!(err, RequestError::BadDuration(-1));

        assert!(Request::parse(&raw("TIME_STATUS 3 0 10 85"), 4).is_ok());
        assert_eq!(
            Request::parse(&raw("TIME_STATUS 3 0 10 86"), 4).unwrap_err(),
            RequestError::BadDuration(86)
        );
    }

    #[test]
    fn test_parse_unknown_command() {
        let err = Request::parse(&raw("LAND 42 0"), 1).unwrap_err();
        assert_eq!(err, RequestError::Invalid);
    }

    #[test]
    fn test_probe_expected_lines() {
        assert_eq!(Request::probe(&raw("SCHEDULE 42 0 10 30 5")).unwrap(), 1);
        assert_eq!(Request::probe(&raw("PLANE_STATUS 42 0")).unwrap(), 1);
        assert_eq!(Request::probe(&raw("TIME_STATUS 0 0 10 3")).unwrap(), 4);
        assert_eq!(Request::probe(&raw("TIME_STATUS 0 0 10 0")).unwrap(), 1);
    }

    #[test]
    fn test_probe_is_shape_only() {
        // Out-of-range fields pass the probe; the airport owns range checks.
        assert!(Request::probe(&raw("SCHEDULE 42 0 999 -5 7")).is_ok());
        // A negative duration clamps to one expected line; the airport's
        // error response is always a single line.
        assert_eq!(Request::probe(&raw("TIME_STATUS 0 0 10 -4")).unwrap(), 1);
    }

    #[test]
    fn test_probe_rejects_malformed_shapes() {
        assert!(Request::probe(&raw("SCHEDULE 42 0 10 30")).is_err());
        assert!(Request::probe(&raw("TIME_STATUS 0 0 ten 3")).is_err());
        assert!(Request::probe(&raw("LAND 42 0")).is_err());
    }

    #[test]
    fn test_error_lines() {
        assert_eq!(
            RequestError::Invalid.to_line(),
            "Error: Invalid request provided"
        );
        assert_eq!(
            RequestError::BadEarliest(-2).to_line(),
            "Error: Invalid 'earliest' time (-2)"
        );
        assert_eq!(
            RequestError::BadGate(9).to_line(),
            "Error: Invalid 'gate' value (9)"
        );
    }
}
