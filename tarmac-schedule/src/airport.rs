//! The airport store: a fixed gate array with one lock per gate.
//!
//! The store composes [`GateSchedule`] across gates. Scheduling and lookup
//! iterate gates strictly in ascending index order and stop on the first
//! success, which makes placement deterministic: given identical existing
//! reservations, the same request always lands on the same gate and offset.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tarmac_core::{AirportId, PlaneId};

use crate::gate::GateSchedule;

/// The outcome of scheduling or locating a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reservation {
    /// The plane holding the reservation.
    pub plane: PlaneId,
    /// Gate index the plane is assigned to.
    pub gate: u32,
    /// First occupied slot (inclusive).
    pub start: u32,
    /// Last occupied slot (inclusive).
    pub end: u32,
}

/// Snapshot of one slot's occupancy, taken under the gate lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotStatus {
    /// The slot index.
    pub slot: u32,
    /// The occupying plane, or `None` if the slot is free.
    pub plane: Option<PlaneId>,
}

/// One gate: its schedule behind its own exclusive-access lock.
#[derive(Debug)]
struct Gate {
    schedule: Mutex<GateSchedule>,
}

/// An airport's full gate array. Shape is fixed at construction; only slot
/// contents mutate, always under the owning gate's lock.
#[derive(Debug)]
pub struct Airport {
    id: AirportId,
    gates: Vec<Gate>,
}

impl Airport {
    /// Creates an airport with `num_gates` empty gates.
    #[must_use]
    pub fn new(id: AirportId, num_gates: u32) -> Self {
        let gates = (0..num_gates)
            .map(|_| Gate {
                schedule: Mutex::new(GateSchedule::new()),
            })
            .collect();
        Self { id, gates }
    }

    /// This airport's identifier.
    #[must_use]
    pub const fn id(&self) -> AirportId {
        self.id
    }

    /// Number of gates at this airport.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn num_gates(&self) -> u32 {
        self.gates.len() as u32
    }

    /// Schedules `plane` on the lowest-indexed gate that can host it,
    /// preferring the smallest feasible delay within that gate.
    ///
    /// Locks one gate at a time: the gate is unlocked before the next one is
    /// tried, so contention is bounded to a single gate and requests against
    /// different gates proceed in parallel.
    pub fn schedule(
        &self,
        plane: PlaneId,
        earliest: u32,
        duration: u32,
        fuel: u32,
    ) -> Option<Reservation> {
        for (gate_idx, gate) in (0_u32..).zip(self.gates.iter()) {
            let mut schedule = lock(&gate.schedule);
            if let Some(start) = schedule.assign(plane, earliest, duration, fuel) {
                return Some(Reservation {
                    plane,
                    gate: gate_idx,
                    start,
                    end: start + duration,
                });
            }
        }
        None
    }

    /// Finds the gate and window where `plane` is scheduled, if any.
    ///
    /// Same per-gate locking pattern as [`Airport::schedule`].
    #[must_use]
    pub fn locate(&self, plane: PlaneId) -> Option<Reservation> {
        for (gate_idx, gate) in (0_u32..).zip(self.gates.iter()) {
            let schedule = lock(&gate.schedule);
            if let Some(run) = schedule.search(plane) {
                return Some(Reservation {
                    plane,
                    gate: gate_idx,
                    start: run.start,
                    end: run.end,
                });
            }
        }
        None
    }

    /// Takes a consistent snapshot of slots `[start, start + duration]` on
    /// one gate, or `None` if the gate index is out of range.
    ///
    /// The whole window is read under the gate's lock so a concurrent
    /// assignment can never appear half-applied in the snapshot.
    #[must_use]
    pub fn read_window(&self, gate: u32, start: u32, duration: u32) -> Option<Vec<SlotStatus>> {
        let gate = self.gates.get(gate as usize)?;
        let schedule = lock(&gate.schedule);
        let snapshot = (start..=start + duration)
            .map(|idx| SlotStatus {
                slot: idx,
                plane: schedule.slot(idx).and_then(super::TimeSlot::plane),
            })
            .collect();
        Some(snapshot)
    }
}

/// Acquires a gate lock, recovering from poisoning.
///
/// A gate's slots are only written after the whole window is verified free,
/// so a thread that panicked while holding the lock cannot have left a torn
/// reservation behind.
fn lock(mutex: &Mutex<GateSchedule>) -> MutexGuard<'_, GateSchedule> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_prefers_lowest_gate() {
        let airport = Airport::new(AirportId::new(0), 3);

        let first = airport.schedule(PlaneId::new(1), 0, 10, 0).unwrap();
        assert_eq!(first.gate, 0);

        // Gate 0 is now blocked for this window; the next plane with zero
        // fuel must fall through to gate 1.
        let second = airport.schedule(PlaneId::new(2), 0, 10, 0).unwrap();
        assert_eq!(second.gate, 1);

        // With fuel available, gate 0 still wins via a delayed offset.
        let third = airport.schedule(PlaneId::new(3), 0, 1, 20).unwrap();
        assert_eq!(third.gate, 0);
        assert_eq!(third.start, 11);
    }

    #[test]
    fn test_schedule_reports_inclusive_window() {
        let airport = Airport::new(AirportId::new(0), 1);
        let reservation = airport.schedule(PlaneId::new(42), 10, 30, 5).unwrap();

        assert_eq!(reservation.gate, 0);
        assert_eq!(reservation.start, 10);
        assert_eq!(reservation.end, 40);
    }

    #[test]
    fn test_schedule_exhausted_returns_none() {
        let airport = Airport::new(AirportId::new(0), 2);
        assert!(airport.schedule(PlaneId::new(1), 0, 95, 0).is_some());
        assert!(airport.schedule(PlaneId::new(2), 0, 95, 0).is_some());
        assert!(airport.schedule(PlaneId::new(3), 0, 95, 0).is_none());
    }

    #[test]
    fn test_locate_matches_schedule() {
        let airport = Airport::new(AirportId::new(0), 2);
        let scheduled = airport.schedule(PlaneId::new(7), 5, 3, 0).unwrap();

        let located = airport.locate(PlaneId::new(7)).unwrap();
        assert_eq!(located, scheduled);
        assert!(airport.locate(PlaneId::new(8)).is_none());
    }

    #[test]
    fn test_read_window_snapshot() {
        let airport = Airport::new(AirportId::new(0), 1);
        airport.schedule(PlaneId::new(9), 2, 1, 0).unwrap();

        let window = airport.read_window(0, 0, 4).unwrap();
        assert_eq!(window.len(), 5);
        assert_eq!(window[0].plane, None);
        assert_eq!(window[2].plane, Some(PlaneId::new(9)));
        assert_eq!(window[3].plane, Some(PlaneId::new(9)));
        assert_eq!(window[4].plane, None);
    }

    #[test]
    fn test_read_window_bad_gate() {
        let airport = Airport::new(AirportId::new(0), 1);
        assert!(airport.read_window(1, 0, 4).is_none());
    }

    #[test]
    fn test_concurrent_disjoint_requests_all_land() {
        // N threads schedule non-overlapping windows into a single gate with
        // zero fuel; all must succeed with exactly the window they asked for.
        let airport = Airport::new(AirportId::new(0), 1);

        std::thread::scope(|scope| {
            for i in 0..8_u32 {
                let airport = &airport;
                scope.spawn(move || {
                    let reservation = airport
                        .schedule(PlaneId::new(u64::from(i)), i * 10, 9, 0)
                        .expect("disjoint request must land");
                    assert_eq!(reservation.start, i * 10);
                    assert_eq!(reservation.end, i * 10 + 9);
                });
            }
        });

        // Occupancy must reflect all eight runs with no overlap.
        let window = airport.read_window(0, 0, 79).unwrap();
        for status in window {
            let expected = PlaneId::new(u64::from(status.slot / 10));
            assert_eq!(status.plane, Some(expected), "slot {}", status.slot);
        }
    }

    #[test]
    fn test_concurrent_contending_requests_never_double_book() {
        // All threads contend for the same earliest slot with ample fuel;
        // first-fit serializes them onto disjoint windows.
        let airport = Airport::new(AirportId::new(0), 1);

        std::thread::scope(|scope| {
            for i in 0..8_u64 {
                let airport = &airport;
                scope.spawn(move || {
                    airport
                        .schedule(PlaneId::new(i), 0, 9, 86)
                        .expect("horizon has room for all eight");
                });
            }
        });

        let mut seen = std::collections::HashSet::new();
        for i in 0..8_u64 {
            let reservation = airport.locate(PlaneId::new(i)).unwrap();
            for slot in reservation.start..=reservation.end {
                assert!(seen.insert(slot), "slot {slot} double-booked");
            }
        }
        assert_eq!(seen.len(), 80);
    }
}
