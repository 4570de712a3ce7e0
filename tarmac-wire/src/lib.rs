//! Tarmac Wire - the newline-delimited text protocol.
//!
//! One request per line, one or more response lines per request. This crate
//! is pure: tokenization, validation, and line rendering only. The airport
//! node uses [`RawRequest::parse`] + [`Request::parse`] for full validation;
//! the controller uses [`RawRequest::parse`] + [`Request::probe`] to learn,
//! without owning the semantics, exactly how many response lines a request
//! guarantees.
//!
//! # Wire Format
//!
//! ```text
//! SCHEDULE <plane> <airport> <earliest> <duration> <fuel>
//! PLANE_STATUS <plane> <airport>
//! TIME_STATUS <gate> <airport> <start> <duration>
//! ```
//!
//! The airport identifier is always the third whitespace-separated token.
//! Every error response is a single line beginning with the literal
//! [`ERROR_PREFIX`] marker; the controller depends on that prefix to stop
//! reading further lines.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod request;
mod response;

pub use request::{RawRequest, Request, RequestError};
pub use response::{
    cannot_connect, cannot_schedule, incomplete_response, invalid_request, is_error_line,
    no_response, plane_not_scheduled, plane_scheduled, scheduled, time_status_line,
    unknown_airport, ERROR_PREFIX,
};
