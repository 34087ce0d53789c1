//! The presentation shell state machine: `Loading → {Error | Expired | Ready}`.
//!
//! `Error` and `Expired` are terminal display states with a single recovery
//! affordance. `Ready` never returns to `Loading`; the only transition out of
//! it is `Ready → Expired`, since expiry is re-evaluated on every poll rather
//! than cached at load time.

use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Instant;

use chrono::{DateTime, Utc};
use log::{debug, warn};

use crate::engine::analytics::ViewLatch;
use crate::engine::navigator::{Move, Navigator};
use crate::engine::transition::Orchestrator;
use crate::loader::LoadOutcome;
use crate::proposal::{self, Proposal};

/// User-facing copy for the fail-closed error screen. Not-found and transport
/// failures deliberately share it; the log line names the real cause.
pub const ERROR_MESSAGE: &str = "Förslaget kunde inte hittas.";
pub const EMPTY_MESSAGE: &str = "Förslaget innehåller inga sidor.";

/// A live, navigable presentation.
pub struct Deck {
    pub proposal: Proposal,
    pub nav: Navigator,
    pub orchestrator: Orchestrator,
}

impl Deck {
    fn new(proposal: Proposal, start_slide: usize, now: Instant, animate: bool) -> Self {
        let nav = Navigator::new(proposal.slides.len(), start_slide);
        let orchestrator = if animate {
            Orchestrator::new(nav.current(), now)
        } else {
            Orchestrator::instant()
        };
        Self {
            proposal,
            nav,
            orchestrator,
        }
    }

    /// Navigation requests are dropped, not queued, while a transition is in
    /// flight.
    pub fn request_next(&mut self, now: Instant) {
        if self.orchestrator.is_transitioning() {
            debug!("dropping next: transition in flight");
            return;
        }
        if let Some(mv) = self.nav.next() {
            self.begin_move(mv, now);
        }
    }

    pub fn request_previous(&mut self, now: Instant) {
        if self.orchestrator.is_transitioning() {
            debug!("dropping previous: transition in flight");
            return;
        }
        if let Some(mv) = self.nav.previous() {
            self.begin_move(mv, now);
        }
    }

    pub fn request_go_to(&mut self, index: usize, now: Instant) {
        if self.orchestrator.is_transitioning() {
            debug!("dropping go_to({index}): transition in flight");
            return;
        }
        if let Some(mv) = self.nav.go_to(index) {
            self.begin_move(mv, now);
        }
    }

    fn begin_move(&mut self, mv: Move, now: Instant) {
        let word = if mv.is_forward() { "forward" } else { "back" };
        debug!("moving {word} to slide {}", mv.to + 1);
        self.orchestrator.begin(mv.from, mv.to, now);
    }

    pub fn tick(&mut self, now: Instant) {
        self.orchestrator.tick(now);
    }
}

pub enum State {
    Loading(Receiver<LoadOutcome>),
    Error { message: &'static str },
    Expired {
        client_name: String,
        valid_until: Option<DateTime<Utc>>,
    },
    Ready(Deck),
}

pub struct Shell {
    state: State,
    latch: ViewLatch,
    start_slide: usize,
    animate: bool,
}

impl Shell {
    pub fn new(
        rx: Receiver<LoadOutcome>,
        latch: ViewLatch,
        start_slide: usize,
        animate: bool,
    ) -> Self {
        Self {
            state: State::Loading(rx),
            latch,
            start_slide,
            animate,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    /// Drive the machine one step. Called once per frame by the app.
    pub fn poll(&mut self, now: Instant, today: DateTime<Utc>) {
        match &mut self.state {
            State::Loading(rx) => {
                let outcome = match rx.try_recv() {
                    Ok(outcome) => outcome,
                    Err(TryRecvError::Empty) => return,
                    Err(TryRecvError::Disconnected) => {
                        warn!("proposal load worker disappeared before delivering an outcome");
                        self.state = State::Error {
                            message: ERROR_MESSAGE,
                        };
                        return;
                    }
                };
                self.state = match outcome {
                    LoadOutcome::Loaded(doc) => self.admit(*doc, now, today),
                    LoadOutcome::NotFound => {
                        debug!("proposal not found");
                        State::Error {
                            message: ERROR_MESSAGE,
                        }
                    }
                    LoadOutcome::Transport(cause) => {
                        warn!("proposal load failed: {cause}");
                        State::Error {
                            message: ERROR_MESSAGE,
                        }
                    }
                };
            }
            State::Ready(deck) => {
                if deck.proposal.is_expired(today) {
                    debug!("proposal {} expired mid-session", deck.proposal.slug);
                    self.state = State::Expired {
                        client_name: deck.proposal.client_name.clone(),
                        valid_until: deck.proposal.valid_until,
                    };
                } else {
                    deck.tick(now);
                }
            }
            State::Error { .. } | State::Expired { .. } => {}
        }
    }

    fn admit(
        &mut self,
        doc: crate::proposal::ProposalDoc,
        now: Instant,
        today: DateTime<Utc>,
    ) -> State {
        let proposal = proposal::resolve(doc);
        for issue in &proposal.issues {
            warn!("{}: {issue}", proposal.slug);
        }
        for (i, slide) in proposal.slides.iter().enumerate() {
            debug!(
                "slide {}: [{}] {}",
                i + 1,
                slide.content.kind().as_tag(),
                slide.content.headline()
            );
        }
        if proposal.is_expired(today) {
            return State::Expired {
                client_name: proposal.client_name,
                valid_until: proposal.valid_until,
            };
        }
        if proposal.slides.is_empty() {
            warn!("proposal {} has no renderable slides", proposal.slug);
            return State::Error {
                message: EMPTY_MESSAGE,
            };
        }
        // First successful render of a resolved, non-expired proposal: the
        // one and only view emission for this session.
        self.latch.fire(&proposal.id);
        State::Ready(Deck::new(proposal, self.start_slide, now, self.animate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::analytics::ViewRecorder;
    use crate::engine::transition::{ENTRANCE_DURATION, EXIT_DURATION};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;
    use std::sync::Arc;
    use std::time::Duration;

    struct CountingRecorder(Arc<AtomicUsize>);

    impl ViewRecorder for CountingRecorder {
        fn record_view(&self, _proposal_id: &str) -> anyhow::Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn shell_with_counter(start_slide: usize) -> (Shell, mpsc::Sender<LoadOutcome>, Arc<AtomicUsize>) {
        let (tx, rx) = mpsc::channel();
        let calls = Arc::new(AtomicUsize::new(0));
        let latch = ViewLatch::new(Box::new(CountingRecorder(calls.clone())));
        (Shell::new(rx, latch, start_slide, true), tx, calls)
    }

    fn acme_doc() -> crate::proposal::ProposalDoc {
        serde_json::from_str(include_str!("../../../../sample-proposals/acme-q3.json"))
            .expect("sample should parse")
    }

    fn today() -> DateTime<Utc> {
        // Well before the sample proposal's valid_until.
        "2026-01-15T09:00:00Z".parse().unwrap()
    }

    /// Run the orchestrator to completion after a navigation request.
    fn settle(deck: &mut Deck, now: &mut Instant) {
        *now += Duration::from_secs_f32(EXIT_DURATION + 0.05);
        deck.tick(*now);
        *now += Duration::from_secs_f32(ENTRANCE_DURATION + 0.05);
        deck.tick(*now);
    }

    #[test]
    fn loading_stays_until_outcome_arrives() {
        let (mut shell, _tx, calls) = shell_with_counter(0);
        shell.poll(Instant::now(), today());
        assert!(matches!(shell.state(), State::Loading(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn resolved_proposal_becomes_ready_and_records_one_view() {
        let (mut shell, tx, calls) = shell_with_counter(0);
        tx.send(LoadOutcome::Loaded(Box::new(acme_doc()))).unwrap();

        let now = Instant::now();
        // Re-renders after resolution must never duplicate the emission.
        for _ in 0..10 {
            shell.poll(now, today());
        }
        assert!(matches!(shell.state(), State::Ready(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unknown_slug_shows_error_and_never_records_a_view() {
        let (mut shell, tx, calls) = shell_with_counter(0);
        tx.send(LoadOutcome::NotFound).unwrap();
        shell.poll(Instant::now(), today());
        assert!(matches!(
            shell.state(),
            State::Error {
                message: ERROR_MESSAGE
            }
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn transport_failure_fails_closed_to_the_same_error() {
        let (mut shell, tx, _calls) = shell_with_counter(0);
        tx.send(LoadOutcome::Transport("connection refused".into()))
            .unwrap();
        shell.poll(Instant::now(), today());
        assert!(matches!(
            shell.state(),
            State::Error {
                message: ERROR_MESSAGE
            }
        ));
    }

    #[test]
    fn expired_proposal_is_gated_and_records_nothing() {
        let (mut shell, tx, calls) = shell_with_counter(0);
        tx.send(LoadOutcome::Loaded(Box::new(acme_doc()))).unwrap();
        // One second past the sample's valid_until.
        let late: DateTime<Utc> = "2026-09-30T23:59:01Z".parse().unwrap();
        shell.poll(Instant::now(), late);
        assert!(matches!(shell.state(), State::Expired { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn ready_flips_to_expired_mid_session() {
        let (mut shell, tx, _calls) = shell_with_counter(0);
        tx.send(LoadOutcome::Loaded(Box::new(acme_doc()))).unwrap();
        shell.poll(Instant::now(), today());
        assert!(matches!(shell.state(), State::Ready(_)));

        let late: DateTime<Utc> = "2026-10-01T00:00:01Z".parse().unwrap();
        shell.poll(Instant::now(), late);
        assert!(matches!(shell.state(), State::Expired { .. }));
    }

    #[test]
    fn six_slide_walkthrough_clamps_at_the_end() {
        let (mut shell, tx, _calls) = shell_with_counter(0);
        tx.send(LoadOutcome::Loaded(Box::new(acme_doc()))).unwrap();
        let mut now = Instant::now();
        shell.poll(now, today());

        let State::Ready(deck) = shell.state_mut() else {
            panic!("expected ready state");
        };
        assert_eq!(deck.nav.total(), 6);
        settle(deck, &mut now);

        for expected in 1..6 {
            deck.request_next(now);
            assert_eq!(deck.nav.current(), expected);
            settle(deck, &mut now);
        }
        // A sixth press stays on the last slide.
        deck.request_next(now);
        assert_eq!(deck.nav.current(), 5);
    }

    #[test]
    fn transitions_disabled_switch_slides_within_a_frame() {
        let (tx, rx) = mpsc::channel();
        let latch = ViewLatch::new(Box::new(CountingRecorder(Arc::new(AtomicUsize::new(0)))));
        let mut shell = Shell::new(rx, latch, 0, false);
        tx.send(LoadOutcome::Loaded(Box::new(acme_doc()))).unwrap();

        // Frames arrive at display cadence; nothing may still be animating
        // by the next one.
        let frame = Duration::from_millis(32);
        let mut now = Instant::now();
        shell.poll(now, today());

        let State::Ready(deck) = shell.state_mut() else {
            panic!("expected ready state");
        };
        assert!(!deck.orchestrator.is_transitioning());

        for expected in 1..4 {
            now += frame;
            deck.request_next(now);
            deck.tick(now);
            assert_eq!(deck.nav.current(), expected);
            assert!(!deck.orchestrator.is_transitioning());
        }
    }

    #[test]
    fn navigation_during_transition_is_dropped() {
        let (mut shell, tx, _calls) = shell_with_counter(0);
        tx.send(LoadOutcome::Loaded(Box::new(acme_doc()))).unwrap();
        let mut now = Instant::now();
        shell.poll(now, today());
        let State::Ready(deck) = shell.state_mut() else {
            panic!("expected ready state");
        };
        settle(deck, &mut now);

        deck.request_next(now);
        assert_eq!(deck.nav.current(), 1);
        // Rapid presses while the transition runs: all dropped.
        deck.request_next(now + Duration::from_millis(10));
        deck.request_next(now + Duration::from_millis(20));
        deck.request_go_to(5, now + Duration::from_millis(30));
        assert_eq!(deck.nav.current(), 1);

        settle(deck, &mut now);
        deck.request_next(now);
        assert_eq!(deck.nav.current(), 2);
    }

    #[test]
    fn bogus_slide_shrinks_the_navigable_sequence() {
        let mut doc = acme_doc();
        doc.slides[2].kind = "bogus".to_string();
        let (mut shell, tx, _calls) = shell_with_counter(0);
        tx.send(LoadOutcome::Loaded(Box::new(doc))).unwrap();
        shell.poll(Instant::now(), today());

        let State::Ready(deck) = shell.state() else {
            panic!("bad slide must not take down the presentation");
        };
        assert_eq!(deck.nav.total(), 5);
        assert_eq!(deck.proposal.issues.len(), 1);
    }

    #[test]
    fn start_slide_is_clamped_into_range() {
        let (mut shell, tx, _calls) = shell_with_counter(99);
        tx.send(LoadOutcome::Loaded(Box::new(acme_doc()))).unwrap();
        shell.poll(Instant::now(), today());
        let State::Ready(deck) = shell.state() else {
            panic!("expected ready state");
        };
        assert_eq!(deck.nav.current(), 5);
    }

    #[test]
    fn dead_loader_fails_closed() {
        let (mut shell, tx, _calls) = shell_with_counter(0);
        drop(tx);
        shell.poll(Instant::now(), today());
        assert!(matches!(shell.state(), State::Error { .. }));
    }
}
