//! Out-of-schedule check-in hygiene.
//!
//! Earlier revisions of the check-in path wrote entries on days the cycle
//! never scheduled (a weekday outside the set, or a date outside the cycle
//! window). These operations locate and purge such entries. They run only
//! when explicitly invoked: editing a cycle's weekday set does not touch
//! existing check-ins.

use crate::habit::{CheckIn, HabitCycle};

/// Check-ins of `cycle` that fall on a day the cycle does not schedule.
pub fn find_out_of_schedule<'a>(cycle: &HabitCycle, check_ins: &'a [CheckIn]) -> Vec<&'a CheckIn> {
    check_ins
        .iter()
        .filter(|ci| ci.cycle_id == cycle.id && !cycle.is_scheduled_on(ci.date))
        .collect()
}

/// Remove out-of-schedule check-ins of `cycle` in place.
///
/// Returns how many entries were purged. Check-ins belonging to other
/// cycles are left untouched.
pub fn remove_out_of_schedule(cycle: &HabitCycle, check_ins: &mut Vec<CheckIn>) -> usize {
    let before = check_ins.len();
    check_ins.retain(|ci| ci.cycle_id != cycle.id || cycle.is_scheduled_on(ci.date));
    before - check_ins.len()
}
