//! Response line rendering.
//!
//! Every renderer returns one line without its trailing newline; the
//! transport layer appends it. All error lines start with [`ERROR_PREFIX`],
//! which is the protocol-level signal the controller uses to stop reading
//! after a single line.

use tarmac_core::{AirportId, PlaneId, SlotClock};

/// Literal marker beginning every error response line.
pub const ERROR_PREFIX: &str = "Error:";

/// Returns true if a response line is an error response.
///
/// Error responses are always exactly one line, regardless of command.
#[must_use]
pub fn is_error_line(line: &str) -> bool {
    line.starts_with(ERROR_PREFIX)
}

/// `SCHEDULED <plane> at GATE <g>: HH:MM-HH:MM`
#[must_use]
pub fn scheduled(plane: PlaneId, gate: u32, start: u32, end: u32) -> String {
    format!(
        "SCHEDULED {plane} at GATE {gate}: {}-{}",
        SlotClock::from_slot(start),
        SlotClock::from_slot(end)
    )
}

/// `PLANE <plane> scheduled at GATE <g>: HH:MM-HH:MM`
#[must_use]
pub fn plane_scheduled(plane: PlaneId, gate: u32, start: u32, end: u32) -> String {
    format!(
        "PLANE {plane} scheduled at GATE {gate}: {}-{}",
        SlotClock::from_slot(start),
        SlotClock::from_slot(end)
    )
}

/// `PLANE <plane> not scheduled at airport <id>`
///
/// Deliberately not an error line: a lookup miss is a valid outcome and the
/// controller must relay it as a normal single-line response.
#[must_use]
pub fn plane_not_scheduled(plane: PlaneId, airport: AirportId) -> String {
    format!("PLANE {plane} not scheduled at airport {airport}")
}

/// `AIRPORT <id> GATE <g> HH:MM: <A|F> - <plane-or-0>`
#[must_use]
pub fn time_status_line(airport: AirportId, gate: u32, slot: u32, plane: Option<PlaneId>) -> String {
    let clock = SlotClock::from_slot(slot);
    match plane {
        Some(plane) => format!("AIRPORT {airport} GATE {gate} {clock}: A - {plane}"),
        None => format!("AIRPORT {airport} GATE {gate} {clock}: F - 0"),
    }
}

/// `Error: Invalid request provided`
#[must_use]
pub fn invalid_request() -> String {
    format!("{ERROR_PREFIX} Invalid request provided")
}

/// `Error: Airport <id> does not exist`
#[must_use]
pub fn unknown_airport(airport: i64) -> String {
    format!("{ERROR_PREFIX} Airport {airport} does not exist")
}

/// `Error: Cannot schedule <plane>`
#[must_use]
pub fn cannot_schedule(plane: PlaneId) -> String {
    format!("{ERROR_PREFIX} Cannot schedule {plane}")
}

/// `Error: Cannot connect to airport <id>`
#[must_use]
pub fn cannot_connect(airport: i64) -> String {
    format!("{ERROR_PREFIX} Cannot connect to airport {airport}")
}

/// `Error: No response from airport <id>`
#[must_use]
pub fn no_response(airport: i64) -> String {
    format!("{ERROR_PREFIX} No response from airport {airport}")
}

/// `Error: Incomplete response from airport <id>`
#[must_use]
pub fn incomplete_response(airport: i64) -> String {
    format!("{ERROR_PREFIX} Incomplete response from airport {airport}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduled_line() {
        let line = scheduled(PlaneId::new(42), 0, 10, 40);
        assert_eq!(line, "SCHEDULED 42 at GATE 0: 02:30-10:00");
        assert!(!is_error_line(&line));
    }

    #[test]
    fn test_plane_status_lines() {
        assert_eq!(
            plane_scheduled(PlaneId::new(42), 1, 10, 40),
            "PLANE 42 scheduled at GATE 1: 02:30-10:00"
        );

        let miss = plane_not_scheduled(PlaneId::new(7), AirportId::new(2));
        assert_eq!(miss, "PLANE 7 not scheduled at airport 2");
        // Load-bearing: a miss must not look like an error to the controller.
        assert!(!is_error_line(&miss));
    }

    #[test]
    fn test_time_status_lines() {
        assert_eq!(
            time_status_line(AirportId::new(0), 2, 4, None),
            "AIRPORT 0 GATE 2 01:00: F - 0"
        );
        assert_eq!(
            time_status_line(AirportId::new(0), 2, 4, Some(PlaneId::new(9))),
            "AIRPORT 0 GATE 2 01:00: A - 9"
        );
    }

    #[test]
    fn test_every_error_line_carries_the_marker() {
        let lines = [
            invalid_request(),
            unknown_airport(-3),
            cannot_schedule(PlaneId::new(1)),
            cannot_connect(0),
            no_response(0),
            incomplete_response(0),
        ];
        for line in lines {
            assert!(is_error_line(&line), "not an error line: {line}");
        }
    }

    #[test]
    fn test_unknown_airport_echoes_value() {
        assert_eq!(unknown_airport(99), "Error: Airport 99 does not exist");
        assert_eq!(unknown_airport(-1), "Error: Airport -1 does not exist");
    }
}
