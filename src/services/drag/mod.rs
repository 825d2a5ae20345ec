// Drag/resize controller
// Translates pointer movement into discrete increment-sized schedule
// edits on a single event, with cancel-on-escape rollback.

use chrono::NaiveDateTime;

use crate::models::event::Event;
use crate::services::timegrid::{add_minutes, GridGeometry};

/// What the active gesture is doing to the event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Shift start and end together, preserving duration
    Move,
    /// Shift only the end; the start stays fixed
    ResizeEnd,
}

/// Direction of a keyboard nudge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NudgeDirection {
    Earlier,
    Later,
}

/// State of the one active gesture. Owned by the controller; at most one
/// instance exists, so "only one active drag" is an invariant of the
/// type rather than a convention.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub event_id: String,
    pub pointer_id: u64,
    pub mode: DragMode,
    pub origin_y: f32,
    pub original_start: NaiveDateTime,
    pub original_end: NaiveDateTime,
    last_applied_increments: i64,
    last_committed: Option<(NaiveDateTime, NaiveDateTime)>,
}

/// Single-slot drag state machine.
///
/// Commits go out through a caller-supplied callback once per distinct
/// increment crossing; sub-increment movement issues none. New start/end
/// values are always computed from the original times plus the current
/// delta, never by compounding successive deltas.
#[derive(Debug)]
pub struct DragController {
    geometry: GridGeometry,
    state: Option<DragState>,
}

impl DragController {
    pub fn new(geometry: GridGeometry) -> Self {
        Self {
            geometry,
            state: None,
        }
    }

    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// Identity of the event being manipulated, if a drag is active
    pub fn active_event_id(&self) -> Option<&str> {
        self.state.as_ref().map(|s| s.event_id.as_str())
    }

    /// Begin a gesture on pointer-down over an event surface or its
    /// resize handle. A second pointer-down while a gesture is active is
    /// ignored; the first gesture keeps the slot.
    pub fn pointer_down(&mut self, event: &Event, pointer_id: u64, origin_y: f32, mode: DragMode) {
        if let Some(active) = &self.state {
            log::warn!(
                "ignoring pointer-down for event {}: a drag of event {} is already active",
                event.id,
                active.event_id
            );
            return;
        }

        self.state = Some(DragState {
            event_id: event.id.clone(),
            pointer_id,
            mode,
            origin_y,
            original_start: event.start,
            original_end: event.end,
            last_applied_increments: 0,
            last_committed: None,
        });
    }

    /// Apply a pointer-move. Issues at most one commit, and only when the
    /// pointer has crossed onto a different increment than last applied.
    /// Moves from a pointer id other than the active gesture's are
    /// ignored (multi-touch safety).
    pub fn pointer_move<F>(&mut self, pointer_id: u64, current_y: f32, commit: &mut F)
    where
        F: FnMut(&str, NaiveDateTime, NaiveDateTime),
    {
        let geometry = self.geometry;
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if state.pointer_id != pointer_id {
            return;
        }

        let delta_pixels = current_y - state.origin_y;
        let increments = geometry.increments_for_delta(delta_pixels);
        if increments == state.last_applied_increments {
            return;
        }
        state.last_applied_increments = increments;

        let delta_minutes = increments * i64::from(geometry.increment_minutes);
        let (new_start, new_end) = match state.mode {
            DragMode::Move => (
                add_minutes(state.original_start, delta_minutes),
                add_minutes(state.original_end, delta_minutes),
            ),
            DragMode::ResizeEnd => {
                let min_end =
                    add_minutes(state.original_start, i64::from(geometry.increment_minutes));
                let mut end = add_minutes(state.original_end, delta_minutes);
                if end < min_end {
                    log::warn!(
                        "resize of event {} clamped to minimum duration",
                        state.event_id
                    );
                    end = min_end;
                }
                (state.original_start, end)
            }
        };

        // Clamping can map distinct increments onto the same interval;
        // an unchanged interval is not re-sent
        if state.last_committed == Some((new_start, new_end)) {
            return;
        }
        state.last_committed = Some((new_start, new_end));

        commit(&state.event_id, new_start, new_end);
    }

    /// End the gesture on pointer-up; the last commit stands. Returns the
    /// finished state, or `None` when the pointer id did not match.
    pub fn pointer_up(&mut self, pointer_id: u64) -> Option<DragState> {
        match &self.state {
            Some(state) if state.pointer_id == pointer_id => self.state.take(),
            _ => None,
        }
    }

    /// Escape pressed: roll back by reissuing the original start/end,
    /// discarding the in-progress change.
    pub fn cancel<F>(&mut self, commit: &mut F)
    where
        F: FnMut(&str, NaiveDateTime, NaiveDateTime),
    {
        if let Some(state) = self.state.take() {
            commit(&state.event_id, state.original_start, state.original_end);
        }
    }

    /// Clear a stuck gesture without committing anything. For hosts that
    /// lose the pointer-up (e.g. on focus loss).
    pub fn abandon(&mut self) -> Option<DragState> {
        self.state.take()
    }

    /// Keyboard nudge on a focused event: shift start and end together by
    /// exactly one increment through the same commit path. Ignored while
    /// a drag is in progress.
    pub fn nudge<F>(&self, event: &Event, direction: NudgeDirection, commit: &mut F)
    where
        F: FnMut(&str, NaiveDateTime, NaiveDateTime),
    {
        if self.state.is_some() {
            log::warn!("ignoring nudge of event {}: a drag is active", event.id);
            return;
        }

        let delta_minutes = match direction {
            NudgeDirection::Earlier => -i64::from(self.geometry.increment_minutes),
            NudgeDirection::Later => i64::from(self.geometry.increment_minutes),
        };
        commit(
            &event.id,
            add_minutes(event.start, delta_minutes),
            add_minutes(event.end, delta_minutes),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    type Commit = (String, NaiveDateTime, NaiveDateTime);

    fn event() -> Event {
        let date = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        Event::new(
            "Museum",
            "day-1",
            date.and_hms_opt(10, 0, 0).unwrap(),
            date.and_hms_opt(11, 0, 0).unwrap(),
        )
        .unwrap()
    }

    fn controller() -> DragController {
        // 30 px per 30-minute increment
        DragController::new(GridGeometry::new(30.0, 30))
    }

    fn recorder(log: &mut Vec<Commit>) -> impl FnMut(&str, NaiveDateTime, NaiveDateTime) + '_ {
        move |id, start, end| log.push((id.to_string(), start, end))
    }

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 10)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_move_commits_once_per_increment_crossing() {
        let mut controller = controller();
        let mut commits: Vec<Commit> = Vec::new();
        let event = event();

        controller.pointer_down(&event, 1, 100.0, DragMode::Move);
        {
            let mut commit = recorder(&mut commits);
            // Sub-increment wiggle: no commits
            controller.pointer_move(1, 105.0, &mut commit);
            controller.pointer_move(1, 110.0, &mut commit);
            // Crosses one increment down
            controller.pointer_move(1, 131.0, &mut commit);
            // Still the same increment
            controller.pointer_move(1, 134.0, &mut commit);
        }

        assert_eq!(commits.len(), 1);
        let (ref id, start, end) = commits[0];
        assert_eq!(id, &event.id);
        assert_eq!(start, at(10, 30));
        assert_eq!(end, at(11, 30));
    }

    #[test]
    fn test_deltas_never_compound() {
        let mut controller = controller();
        let mut commits: Vec<Commit> = Vec::new();
        let event = event();

        controller.pointer_down(&event, 1, 100.0, DragMode::Move);
        {
            let mut commit = recorder(&mut commits);
            controller.pointer_move(1, 160.0, &mut commit); // +2 increments
            controller.pointer_move(1, 130.0, &mut commit); // back to +1
            controller.pointer_move(1, 40.0, &mut commit); // -2 increments
        }

        assert_eq!(commits.len(), 3);
        // Each commit is original plus the current delta, not cumulative
        assert_eq!(commits[0].1, at(11, 0));
        assert_eq!(commits[1].1, at(10, 30));
        assert_eq!(commits[2].1, at(9, 0));
        assert_eq!(commits[2].2, at(10, 0));
    }

    #[test]
    fn test_replay_is_deterministic() {
        let moves = [103.0, 131.0, 127.0, 158.0, 161.0, 90.0];
        let run = || {
            let mut controller = controller();
            let mut commits: Vec<Commit> = Vec::new();
            let event = event();
            controller.pointer_down(&event, 1, 100.0, DragMode::Move);
            {
                let mut commit = recorder(&mut commits);
                for y in moves {
                    controller.pointer_move(1, y, &mut commit);
                }
            }
            commits
                .into_iter()
                .map(|(_, start, end)| (start, end))
                .collect::<Vec<_>>()
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn test_resize_end_keeps_start_fixed() {
        let mut controller = controller();
        let mut commits: Vec<Commit> = Vec::new();
        let event = event();

        controller.pointer_down(&event, 1, 100.0, DragMode::ResizeEnd);
        controller.pointer_move(1, 160.0, &mut recorder(&mut commits));

        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].1, at(10, 0));
        assert_eq!(commits[0].2, at(12, 0));
    }

    #[test]
    fn test_resize_end_clamps_to_minimum_duration() {
        let mut controller = controller();
        let mut commits: Vec<Commit> = Vec::new();
        let event = event();

        controller.pointer_down(&event, 1, 100.0, DragMode::ResizeEnd);
        // -4 increments would put the end two hours before the start
        controller.pointer_move(1, -20.0, &mut recorder(&mut commits));

        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].1, at(10, 0));
        assert_eq!(commits[0].2, at(10, 30));
    }

    #[test]
    fn test_clamped_resize_commits_only_once() {
        let mut controller = controller();
        let mut commits: Vec<Commit> = Vec::new();
        let event = event();

        controller.pointer_down(&event, 1, 100.0, DragMode::ResizeEnd);
        {
            let mut commit = recorder(&mut commits);
            // Both crossings clamp to the same minimum interval; only
            // the first is committed
            controller.pointer_move(1, 40.0, &mut commit);
            controller.pointer_move(1, 10.0, &mut commit);
        }

        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].1, at(10, 0));
        assert_eq!(commits[0].2, at(10, 30));
    }

    #[test]
    fn test_escape_rolls_back_to_original_times() {
        let mut controller = controller();
        let mut commits: Vec<Commit> = Vec::new();
        let event = event();

        controller.pointer_down(&event, 1, 100.0, DragMode::Move);
        {
            let mut commit = recorder(&mut commits);
            controller.pointer_move(1, 190.0, &mut commit);
            controller.cancel(&mut commit);
        }

        let (_, final_start, final_end) = commits.last().unwrap().clone();
        assert_eq!(final_start, event.start);
        assert_eq!(final_end, event.end);
        assert!(!controller.is_active());
    }

    #[test]
    fn test_escape_with_no_net_movement_still_reissues_original() {
        let mut controller = controller();
        let mut commits: Vec<Commit> = Vec::new();
        let event = event();

        controller.pointer_down(&event, 1, 100.0, DragMode::Move);
        controller.cancel(&mut recorder(&mut commits));

        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].1, event.start);
    }

    #[test]
    fn test_stray_pointer_ids_are_ignored() {
        let mut controller = controller();
        let mut commits: Vec<Commit> = Vec::new();
        let event = event();

        controller.pointer_down(&event, 1, 100.0, DragMode::Move);
        {
            let mut commit = recorder(&mut commits);
            controller.pointer_move(7, 200.0, &mut commit);
        }
        assert!(commits.is_empty());

        assert!(controller.pointer_up(7).is_none());
        assert!(controller.is_active());

        let finished = controller.pointer_up(1).unwrap();
        assert_eq!(finished.event_id, event.id);
        assert!(!controller.is_active());
    }

    #[test]
    fn test_second_pointer_down_is_ignored() {
        let mut controller = controller();
        let first = event();
        let second = event().with_fresh_id();

        controller.pointer_down(&first, 1, 100.0, DragMode::Move);
        controller.pointer_down(&second, 2, 300.0, DragMode::Move);

        assert_eq!(controller.active_event_id(), Some(first.id.as_str()));
    }

    #[test]
    fn test_pointer_up_keeps_last_commit_standing() {
        let mut controller = controller();
        let mut commits: Vec<Commit> = Vec::new();
        let event = event();

        controller.pointer_down(&event, 1, 100.0, DragMode::Move);
        controller.pointer_move(1, 130.0, &mut recorder(&mut commits));
        controller.pointer_up(1);

        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].1, at(10, 30));
    }

    #[test]
    fn test_nudge_shifts_by_one_increment() {
        let controller = controller();
        let mut commits: Vec<Commit> = Vec::new();
        let event = event();

        {
            let mut commit = recorder(&mut commits);
            controller.nudge(&event, NudgeDirection::Later, &mut commit);
            controller.nudge(&event, NudgeDirection::Earlier, &mut commit);
        }

        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].1, at(10, 30));
        assert_eq!(commits[0].2, at(11, 30));
        assert_eq!(commits[1].1, at(9, 30));
        assert_eq!(commits[1].2, at(10, 30));
    }

    #[test]
    fn test_nudge_is_ignored_while_dragging() {
        let mut controller = controller();
        let mut commits: Vec<Commit> = Vec::new();
        let event = event();

        controller.pointer_down(&event, 1, 100.0, DragMode::Move);
        controller.nudge(&event, NudgeDirection::Later, &mut recorder(&mut commits));

        assert!(commits.is_empty());
    }

    #[test]
    fn test_abandon_clears_without_committing() {
        let mut controller = controller();
        let event = event();

        controller.pointer_down(&event, 1, 100.0, DragMode::Move);
        let stuck = controller.abandon();

        assert!(stuck.is_some());
        assert!(!controller.is_active());
    }
}
