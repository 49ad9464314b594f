use super::slots::Slot;

/// Horizontal shift per sibling when neighbouring hours are busy.
pub const OVERLAP_STEP_PX: u32 = 15;

/// Pixel offset of the `index`-th item in a slot.
///
/// Only slots holding several items get shifted, and only when the hour
/// before or after also has visits. Purely visual, recomputed on render.
pub fn overlap_offset(
    slot: &Slot,
    items_in_slot: usize,
    index: usize,
    occupied: &[bool; 24],
) -> u32 {
    if items_in_slot < 2 {
        return 0;
    }

    let h = slot.hour() as usize;
    let prev_busy = h > 0 && occupied[h - 1];
    let next_busy = h < 23 && occupied[h + 1];

    if prev_busy || next_busy {
        index as u32 * OVERLAP_STEP_PX
    } else {
        0
    }
}
