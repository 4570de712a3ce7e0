//! Per-gate occupancy state and the slot assignment algorithm.
//!
//! A gate's schedule is a fixed array of `HORIZON_SLOTS` time slots. An
//! occupied slot stores the whole [`Run`] it belongs to, so a lookup can
//! jump from any slot of a reservation directly to the slot after its end
//! instead of scanning slot-by-slot. Lookup cost is therefore proportional
//! to the number of runs, not the number of slots.

use tarmac_core::{PlaneId, HORIZON_SLOTS};

/// A maximal contiguous block of slots occupied by one plane.
///
/// Every slot inside one reservation stores an identical `Run`, which is
/// what makes the O(1) skip-to-end during [`GateSchedule::search`] possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    /// The plane occupying the run.
    pub plane: PlaneId,
    /// First slot of the run (inclusive).
    pub start: u32,
    /// Last slot of the run (inclusive).
    pub end: u32,
}

/// One discrete slot of the scheduling horizon.
///
/// A slot is either free (no plane association at all) or occupied by
/// exactly one contiguous run; runs never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeSlot {
    occupancy: Option<Run>,
}

impl TimeSlot {
    /// Returns true if the slot is occupied.
    #[must_use]
    pub const fn is_occupied(&self) -> bool {
        self.occupancy.is_some()
    }

    /// Returns the run occupying this slot, if any.
    #[must_use]
    pub const fn run(&self) -> Option<Run> {
        self.occupancy
    }

    /// Returns the occupying plane, if any.
    #[must_use]
    pub fn plane(&self) -> Option<PlaneId> {
        self.occupancy.map(|run| run.plane)
    }
}

/// Occupancy state of one gate over the whole scheduling horizon.
#[derive(Debug, Clone)]
pub struct GateSchedule {
    /// Exactly `HORIZON_SLOTS` entries; the length never changes.
    slots: Vec<TimeSlot>,
}

impl GateSchedule {
    /// Creates an empty schedule with every slot free.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: vec![TimeSlot::default(); HORIZON_SLOTS as usize],
        }
    }

    /// Returns the slot at `idx`, or `None` outside the horizon.
    #[must_use]
    pub fn slot(&self, idx: u32) -> Option<&TimeSlot> {
        self.slots.get(idx as usize)
    }

    /// Finds the run occupied by `plane`, if it is scheduled on this gate.
    ///
    /// Scans from slot 0; free slots advance by one, foreign runs are
    /// skipped in one step to the slot after their end.
    #[must_use]
    pub fn search(&self, plane: PlaneId) -> Option<Run> {
        let mut idx = 0;
        while idx < HORIZON_SLOTS {
            match self.slots[idx as usize].occupancy {
                None => idx += 1,
                Some(run) if run.plane == plane => return Some(run),
                Some(run) => idx = run.end + 1,
            }
        }
        None
    }

    /// Returns true if every slot in the inclusive range `[start, end]` is
    /// free.
    ///
    /// The caller must apply any resulting mutation within the same critical
    /// section that performed this check.
    #[must_use]
    pub fn window_free(&self, start: u32, end: u32) -> bool {
        debug_assert!(start <= end, "empty window");
        debug_assert!(end < HORIZON_SLOTS, "window beyond horizon");
        (start..=end).all(|idx| !self.slots[idx as usize].is_occupied())
    }

    /// Assigns `plane` to the first free window of `duration + 1` slots,
    /// trying start offsets `earliest, earliest+1, ..., earliest+fuel` in
    /// order, and returns the chosen start offset.
    ///
    /// The occupied window for a candidate offset `idx` is the inclusive
    /// range `[idx, idx + duration]` - one slot more than `duration`.
    /// Candidates whose window would reach the horizon are not tried.
    /// Nothing is written unless a whole window is confirmed free, so a
    /// failed assignment leaves the schedule untouched.
    ///
    /// Preconditions (validated at the protocol boundary):
    /// `earliest < HORIZON_SLOTS`, `earliest + duration < HORIZON_SLOTS`,
    /// `earliest + fuel < HORIZON_SLOTS`.
    pub fn assign(
        &mut self,
        plane: PlaneId,
        earliest: u32,
        duration: u32,
        fuel: u32,
    ) -> Option<u32> {
        debug_assert!(earliest < HORIZON_SLOTS, "earliest beyond horizon");
        debug_assert!(earliest + duration < HORIZON_SLOTS, "window beyond horizon");
        debug_assert!(earliest + fuel < HORIZON_SLOTS, "fuel window beyond horizon");

        let mut start = earliest;
        let mut end = earliest + duration;
        while start <= earliest + fuel && end < HORIZON_SLOTS {
            if self.window_free(start, end) {
                let run = Run { plane, start, end };
                for idx in start..=end {
                    self.slots[idx as usize].occupancy = Some(run);
                }
                return Some(start);
            }
            start += 1;
            end += 1;
        }
        None
    }
}

impl Default for GateSchedule {
    fn default() -> Self {
        Self::new()
    }
}
