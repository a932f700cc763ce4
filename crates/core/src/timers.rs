//! Timer queue - cancellable repeating timers with generation-checked handles
//!
//! Timers live in an arena of slots. A [`TimerHandle`] names a slot plus the
//! generation it was issued for; cancelling bumps the slot generation, so a
//! handle that outlived its timer never reports as due again, even if the
//! slot is reused by a newer timer.
//!
//! The queue never calls back into the engine. The engine polls the handles
//! it owns with [`TimerQueue::fire_if_due`] and performs the work itself.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    slot: u32,
    generation: u32,
}

#[derive(Debug, Clone, Copy)]
struct Armed {
    period_ms: u64,
    next_due_ms: u64,
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    armed: Option<Armed>,
}

#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a timer that first fires `period_ms` after `now_ms`
    pub fn schedule_every(&mut self, period_ms: u64, now_ms: u64) -> TimerHandle {
        let period_ms = period_ms.max(1);
        let armed = Armed {
            period_ms,
            next_due_ms: now_ms.saturating_add(period_ms),
        };

        let slot = match self.free.pop() {
            Some(slot) => slot,
            None => {
                self.slots.push(Slot::default());
                (self.slots.len() - 1) as u32
            }
        };

        let entry = &mut self.slots[slot as usize];
        entry.armed = Some(armed);
        TimerHandle {
            slot,
            generation: entry.generation,
        }
    }

    /// Cancel a timer. Returns false if the handle was already stale.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let Some(entry) = self.live_slot_mut(handle) else {
            return false;
        };
        entry.armed = None;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(handle.slot);
        true
    }

    /// Cancel every armed timer
    pub fn cancel_all(&mut self) {
        for (idx, entry) in self.slots.iter_mut().enumerate() {
            if entry.armed.take().is_some() {
                entry.generation = entry.generation.wrapping_add(1);
                self.free.push(idx as u32);
            }
        }
    }

    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.slots
            .get(handle.slot as usize)
            .is_some_and(|e| e.generation == handle.generation && e.armed.is_some())
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|e| e.armed.is_some()).count()
    }

    /// Report whether the timer is due at `now_ms` and, if so, schedule its
    /// next deadline. Missed periods collapse into a single firing.
    pub fn fire_if_due(&mut self, handle: TimerHandle, now_ms: u64) -> bool {
        let Some(entry) = self.live_slot_mut(handle) else {
            return false;
        };
        let Some(armed) = entry.armed.as_mut() else {
            return false;
        };
        if now_ms < armed.next_due_ms {
            return false;
        }
        let periods = (now_ms - armed.next_due_ms) / armed.period_ms + 1;
        armed.next_due_ms = armed
            .next_due_ms
            .saturating_add(periods.saturating_mul(armed.period_ms));
        true
    }

    /// Push the next deadline to one full period after `now_ms`
    pub fn rearm(&mut self, handle: TimerHandle, now_ms: u64) -> bool {
        let Some(armed) = self.live_slot_mut(handle).and_then(|e| e.armed.as_mut()) else {
            return false;
        };
        armed.next_due_ms = now_ms.saturating_add(armed.period_ms);
        true
    }

    fn live_slot_mut(&mut self, handle: TimerHandle) -> Option<&mut Slot> {
        self.slots
            .get_mut(handle.slot as usize)
            .filter(|e| e.generation == handle.generation && e.armed.is_some())
    }
}
