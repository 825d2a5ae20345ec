// Time-grid math
// Pure conversions between wall-clock timestamps and the day-relative
// minute/pixel axis, with increment snapping.

use chrono::{Duration, NaiveDateTime, Timelike};

/// Default rendered height of one increment slot, in pixels
pub const SLOT_HEIGHT: f32 = 30.0;

/// Direction to move a timestamp that is off the increment grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    Up,
    Down,
}

/// Snap a timestamp onto the increment grid, anchored at midnight.
///
/// A timestamp already on the grid is returned with seconds zeroed and
/// is otherwise unchanged. An upward snap that would cross midnight is
/// capped at the following midnight, which is itself on the grid.
/// Snapping is idempotent for every positive increment: applying it
/// twice yields the same result as once.
pub fn snap_to_increment(
    t: NaiveDateTime,
    increment_minutes: u32,
    rounding: Rounding,
) -> NaiveDateTime {
    let increment = i64::from(increment_minutes);
    let truncated = t
        .date()
        .and_hms_opt(t.hour(), t.minute(), 0)
        .expect("hour and minute taken from an existing timestamp");

    let minutes_into_day = i64::from(t.hour()) * 60 + i64::from(t.minute());
    let off_grid = minutes_into_day % increment;
    if off_grid == 0 {
        return truncated;
    }

    match rounding {
        Rounding::Up => {
            let snapped = truncated + Duration::minutes(increment - off_grid);
            if snapped.date() > t.date() {
                // A boundary on the next day may be off-grid there;
                // midnight never is
                return t
                    .date()
                    .succ_opt()
                    .expect("date within chrono's range")
                    .and_hms_opt(0, 0, 0)
                    .expect("midnight is valid on every day");
            }
            snapped
        }
        Rounding::Down => truncated - Duration::minutes(off_grid),
    }
}

/// Signed minute offset from the start of the visible window on the same
/// calendar day. Used only for vertical pixel placement, never for
/// interval comparisons.
pub fn minutes_since_visible_start(t: NaiveDateTime, visible_start_hour: u32) -> i64 {
    i64::from(t.hour()) * 60 + i64::from(t.minute()) - i64::from(visible_start_hour) * 60
}

/// Shift a timestamp by a signed number of minutes. No timezone
/// reinterpretation; the date advances or recedes naturally.
pub fn add_minutes(t: NaiveDateTime, delta: i64) -> NaiveDateTime {
    t + Duration::minutes(delta)
}

/// Whole minutes from `b` to `a` (positive when `a` is later)
pub fn diff_minutes(a: NaiveDateTime, b: NaiveDateTime) -> i64 {
    (a - b).num_minutes()
}

/// Continuous pixel axis of a day column: one increment slot per
/// `slot_height_px` pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub slot_height_px: f32,
    pub increment_minutes: u32,
}

impl GridGeometry {
    pub fn new(slot_height_px: f32, increment_minutes: u32) -> Self {
        Self {
            slot_height_px,
            increment_minutes,
        }
    }

    pub fn pixels_per_increment(&self) -> f32 {
        self.slot_height_px
    }

    pub fn pixels_per_minute(&self) -> f32 {
        self.slot_height_px / self.increment_minutes as f32
    }

    /// Vertical pixel offset of a timestamp within the day column
    pub fn y_offset_for(&self, t: NaiveDateTime, visible_start_hour: u32) -> f32 {
        minutes_since_visible_start(t, visible_start_hour) as f32 * self.pixels_per_minute()
    }

    /// Number of whole increments crossed by a pixel delta, rounded to
    /// the nearest increment boundary
    pub fn increments_for_delta(&self, delta_pixels: f32) -> i64 {
        (delta_pixels / self.pixels_per_increment()).round() as i64
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self::new(SLOT_HEIGHT, 30)
    }
}
