//! Transition choreography between slides, as an explicit state machine:
//! `Idle → Exiting → Entering → Idle`, driven by `tick`.
//!
//! A started phase always runs to completion; there is no cancellation. The
//! orchestrator being non-idle is the sole guard against overlapping
//! transitions, so a burst of next-presses advances one slide per completed
//! transition.

use std::time::Instant;

/// Outgoing slide fade/translate time, seconds.
pub const EXIT_DURATION: f32 = 0.35;
/// Delay between consecutive entrance slots.
pub const SLOT_STAGGER: f32 = 0.12;
/// Fade time of a single entrance slot.
pub const SLOT_FADE: f32 = 0.30;
/// Cap on the stagger delay so long lists do not stretch the cascade forever.
pub const MAX_SLOT_DELAY: f32 = 0.60;
/// Entrance phase length: the last slot's delay plus its fade.
pub const ENTRANCE_DURATION: f32 = MAX_SLOT_DELAY + SLOT_FADE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// The reveal cascade positions shared by every slide layout, so all slide
/// types feel uniform regardless of content shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Container,
    Kicker,
    Headline,
    Body,
    /// Supporting list/grid entries, in display order.
    Item(usize),
}

impl Slot {
    fn ordinal(self) -> usize {
        match self {
            Slot::Container => 0,
            Slot::Kicker => 1,
            Slot::Headline => 2,
            Slot::Body => 3,
            Slot::Item(n) => 4 + n,
        }
    }

    fn delay(self) -> f32 {
        (self.ordinal() as f32 * SLOT_STAGGER).min(MAX_SLOT_DELAY)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Phase {
    Idle,
    Exiting {
        from: usize,
        to: usize,
        direction: Direction,
        started: Instant,
    },
    Entering {
        index: usize,
        started: Instant,
    },
}

#[derive(Debug)]
pub struct Orchestrator {
    phase: Phase,
    instant: bool,
}

impl Orchestrator {
    /// Start with an entrance cascade for the initial slide, so the first
    /// slide reveals the same way every later one does.
    pub fn new(initial: usize, now: Instant) -> Self {
        Self {
            phase: Phase::Entering {
                index: initial,
                started: now,
            },
            instant: false,
        }
    }

    /// No choreography at all: the machine stays in `Idle` and slides switch
    /// the moment navigation lands. Backs `defaults.transition = none`.
    pub fn instant() -> Self {
        Self {
            phase: Phase::Idle,
            instant: true,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_transitioning(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    /// Begin a slide change. Refused while a transition is already in
    /// flight; the caller must drop the navigation request in that case.
    pub fn begin(&mut self, from: usize, to: usize, now: Instant) -> bool {
        if self.is_transitioning() {
            return false;
        }
        if self.instant {
            return true;
        }
        let direction = if to > from {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.phase = Phase::Exiting {
            from,
            to,
            direction,
            started: now,
        };
        true
    }

    /// Advance the machine. Exiting hands over to Entering after the exit
    /// window; Entering settles to Idle once the cascade completes.
    pub fn tick(&mut self, now: Instant) {
        match self.phase {
            Phase::Idle => {}
            Phase::Exiting { to, started, .. } => {
                if elapsed(started, now) >= EXIT_DURATION {
                    self.phase = Phase::Entering { index: to, started: now };
                }
            }
            Phase::Entering { started, .. } => {
                if elapsed(started, now) >= ENTRANCE_DURATION {
                    self.phase = Phase::Idle;
                }
            }
        }
    }

    /// Eased progress of the exit animation, when in the exit phase.
    pub fn exit_progress(&self, now: Instant) -> Option<f32> {
        match self.phase {
            Phase::Exiting { started, .. } => {
                Some(ease_in_out((elapsed(started, now) / EXIT_DURATION).clamp(0.0, 1.0)))
            }
            _ => None,
        }
    }

    /// Per-slot opacity for the entrance cascade. Outside the entering phase
    /// every slot is fully visible. The cascade is a pure function of
    /// elapsed time, so it is deterministic and replays identically on every
    /// visit to a slide.
    pub fn slot_opacity(&self, slot: Slot, now: Instant) -> f32 {
        match self.phase {
            Phase::Entering { started, .. } => {
                let t = elapsed(started, now) - slot.delay();
                (t / SLOT_FADE).clamp(0.0, 1.0)
            }
            _ => 1.0,
        }
    }
}

fn elapsed(started: Instant, now: Instant) -> f32 {
    now.saturating_duration_since(started).as_secs_f32()
}

pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn secs(s: f32) -> Duration {
        Duration::from_secs_f32(s)
    }

    #[test]
    fn initial_mount_plays_an_entrance() {
        let t0 = Instant::now();
        let orch = Orchestrator::new(0, t0);
        assert!(orch.is_transitioning());
        assert!(matches!(orch.phase(), Phase::Entering { index: 0, .. }));
    }

    #[test]
    fn full_phase_sequence() {
        let t0 = Instant::now();
        let mut orch = Orchestrator::new(0, t0);
        orch.tick(t0 + secs(ENTRANCE_DURATION + 0.01));
        assert!(!orch.is_transitioning());

        let t1 = t0 + secs(2.0);
        assert!(orch.begin(0, 1, t1));
        assert!(matches!(
            orch.phase(),
            Phase::Exiting {
                from: 0,
                to: 1,
                direction: Direction::Forward,
                ..
            }
        ));

        orch.tick(t1 + secs(EXIT_DURATION + 0.01));
        assert!(matches!(orch.phase(), Phase::Entering { index: 1, .. }));

        orch.tick(t1 + secs(EXIT_DURATION + ENTRANCE_DURATION + 0.02));
        assert!(matches!(orch.phase(), Phase::Idle));
    }

    #[test]
    fn begin_is_refused_while_in_flight() {
        let t0 = Instant::now();
        let mut orch = Orchestrator::new(0, t0);
        orch.tick(t0 + secs(ENTRANCE_DURATION + 0.01));
        assert!(orch.begin(0, 1, t0 + secs(2.0)));
        // Still exiting: a second request is dropped, not queued.
        assert!(!orch.begin(1, 2, t0 + secs(2.1)));
        assert!(matches!(orch.phase(), Phase::Exiting { to: 1, .. }));
    }

    #[test]
    fn backward_moves_are_marked_backward() {
        let t0 = Instant::now();
        let mut orch = Orchestrator::new(3, t0);
        orch.tick(t0 + secs(ENTRANCE_DURATION + 0.01));
        assert!(orch.begin(3, 2, t0 + secs(2.0)));
        assert!(matches!(
            orch.phase(),
            Phase::Exiting {
                direction: Direction::Backward,
                ..
            }
        ));
    }

    #[test]
    fn cascade_reveals_slots_in_order() {
        let t0 = Instant::now();
        let orch = Orchestrator::new(0, t0);

        // Right after the phase starts, only the container has begun fading in.
        let early = t0 + secs(0.05);
        assert!(orch.slot_opacity(Slot::Container, early) > 0.0);
        assert_eq!(orch.slot_opacity(Slot::Headline, early), 0.0);
        assert_eq!(orch.slot_opacity(Slot::Item(0), early), 0.0);

        // Midway, earlier slots are further along than later ones.
        let mid = t0 + secs(0.4);
        let kicker = orch.slot_opacity(Slot::Kicker, mid);
        let body = orch.slot_opacity(Slot::Body, mid);
        assert!(kicker >= body);

        // After the full window everything is opaque.
        let done = t0 + secs(ENTRANCE_DURATION);
        assert_eq!(orch.slot_opacity(Slot::Item(7), done), 1.0);
    }

    #[test]
    fn deep_items_share_the_capped_delay() {
        assert_eq!(Slot::Item(10).delay(), MAX_SLOT_DELAY);
        assert_eq!(Slot::Item(50).delay(), MAX_SLOT_DELAY);
    }

    #[test]
    fn slots_are_fully_visible_when_idle() {
        let t0 = Instant::now();
        let mut orch = Orchestrator::new(0, t0);
        orch.tick(t0 + secs(ENTRANCE_DURATION + 0.01));
        assert_eq!(orch.slot_opacity(Slot::Body, t0 + secs(5.0)), 1.0);
    }

    #[test]
    fn instant_orchestrator_never_leaves_idle() {
        let t0 = Instant::now();
        let mut orch = Orchestrator::instant();
        assert!(!orch.is_transitioning());

        assert!(orch.begin(0, 1, t0));
        assert!(matches!(orch.phase(), Phase::Idle));
        assert!(!orch.is_transitioning());

        // Every slot is opaque from the first frame onward.
        assert_eq!(orch.slot_opacity(Slot::Headline, t0), 1.0);
        assert_eq!(orch.slot_opacity(Slot::Item(5), t0), 1.0);
        assert_eq!(orch.exit_progress(t0), None);
    }

    #[test]
    fn exit_progress_is_eased_and_clamped() {
        let t0 = Instant::now();
        let mut orch = Orchestrator::new(0, t0);
        orch.tick(t0 + secs(ENTRANCE_DURATION + 0.01));
        orch.begin(0, 1, t0 + secs(2.0));
        let halfway = orch.exit_progress(t0 + secs(2.0) + secs(EXIT_DURATION / 2.0)).unwrap();
        assert!((halfway - 0.5).abs() < 0.01);
        let over = orch.exit_progress(t0 + secs(10.0)).unwrap();
        assert_eq!(over, 1.0);
    }
}
