//! The airport node's request dispatch.
//!
//! Pure request-line-in, response-lines-out. All I/O stays in the airport
//! node's connection loop, which keeps every protocol behavior testable
//! without sockets.

use tarmac_schedule::Airport;
use tarmac_wire::{RawRequest, Request};

/// Serves one request line against `airport`, producing the full ordered
/// response. Always yields at least one line; errors are single lines.
#[must_use]
pub fn dispatch(airport: &Airport, line: &str) -> Vec<String> {
    let raw = match RawRequest::parse(line) {
        Ok(raw) => raw,
        Err(err) => return vec![err.to_line()],
    };

    // The embedded airport id must name this node. Checked before argument
    // validation so a misrouted request never leaks this node's gate count
    // into its error responses.
    let addressed_here =
        u64::try_from(raw.airport).is_ok_and(|id| id == airport.id().get());
    if !addressed_here {
        return vec![tarmac_wire::unknown_airport(raw.airport)];
    }

    let request = match Request::parse(&raw, airport.num_gates()) {
        Ok(request) => request,
        Err(err) => return vec![err.to_line()],
    };

    match request {
        Request::Schedule {
            plane,
            earliest,
            duration,
            fuel,
        } => match airport.schedule(plane, earliest, duration, fuel) {
            Some(r) => vec![tarmac_wire::scheduled(plane, r.gate, r.start, r.end)],
            None => vec![tarmac_wire::cannot_schedule(plane)],
        },
        Request::PlaneStatus { plane } => match airport.locate(plane) {
            Some(r) => vec![tarmac_wire::plane_scheduled(plane, r.gate, r.start, r.end)],
            None => vec![tarmac_wire::plane_not_scheduled(plane, airport.id())],
        },
        Request::TimeStatus {
            gate,
            start,
            duration,
        } => airport.read_window(gate, start, duration).map_or_else(
            // Unreachable after validation; answer as a bad gate anyway.
            || vec![tarmac_wire::RequestError::BadGate(i64::from(gate)).to_line()],
            |window| {
                window
                    .iter()
                    .map(|s| tarmac_wire::time_status_line(airport.id(), gate, s.slot, s.plane))
                    .collect()
            },
        ),
    }
}
