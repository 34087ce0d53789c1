//! Owns the current slide index for one presentation session.
//!
//! The navigator never errors: boundary calls are no-ops and arbitrary
//! `go_to` requests are clamped, so a bad deep link can never crash a
//! presentation the client is already viewing.

/// A movement the caller should animate. `from` and `to` are always distinct
/// and in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: usize,
    pub to: usize,
}

impl Move {
    pub fn is_forward(&self) -> bool {
        self.to > self.from
    }
}

#[derive(Debug, Clone)]
pub struct Navigator {
    current: usize,
    total: usize,
}

impl Navigator {
    /// `start` is clamped into range. A zero-slide deck pins the index at 0.
    pub fn new(total: usize, start: usize) -> Self {
        Self {
            current: start.min(total.saturating_sub(1)),
            total,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Advance by one. Clamped at the last slide, no wraparound.
    pub fn next(&mut self) -> Option<Move> {
        if self.current + 1 >= self.total {
            return None;
        }
        let mv = Move {
            from: self.current,
            to: self.current + 1,
        };
        self.current = mv.to;
        Some(mv)
    }

    /// Step back by one. Clamped at slide 0.
    pub fn previous(&mut self) -> Option<Move> {
        if self.current == 0 {
            return None;
        }
        let mv = Move {
            from: self.current,
            to: self.current - 1,
        };
        self.current = mv.to;
        Some(mv)
    }

    /// Jump to an index. Out-of-range requests are silently clamped to the
    /// nearest valid bound; a jump to the current slide is a no-op.
    pub fn go_to(&mut self, index: usize) -> Option<Move> {
        let target = index.min(self.total.saturating_sub(1));
        if target == self.current || self.total == 0 {
            return None;
        }
        let mv = Move {
            from: self.current,
            to: target,
        };
        self.current = target;
        Some(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_advances_until_last_slide() {
        let mut nav = Navigator::new(6, 0);
        for expected in 1..6 {
            let mv = nav.next().expect("should advance");
            assert_eq!(mv.to, expected);
        }
        assert_eq!(nav.current(), 5);
        // 6th call stays put.
        assert_eq!(nav.next(), None);
        assert_eq!(nav.current(), 5);
    }

    #[test]
    fn previous_is_noop_at_first_slide() {
        let mut nav = Navigator::new(4, 0);
        assert_eq!(nav.previous(), None);
        assert_eq!(nav.current(), 0);
    }

    #[test]
    fn go_to_clamps_out_of_range_requests() {
        let mut nav = Navigator::new(5, 0);
        let mv = nav.go_to(99).expect("should clamp and move");
        assert_eq!(mv.to, 4);
        assert_eq!(nav.current(), 4);

        // Already at the clamped bound: nothing to do.
        assert_eq!(nav.go_to(1000), None);
    }

    #[test]
    fn go_to_current_is_noop() {
        let mut nav = Navigator::new(5, 2);
        assert_eq!(nav.go_to(2), None);
    }

    #[test]
    fn moves_report_direction() {
        let mut nav = Navigator::new(5, 2);
        assert!(nav.next().unwrap().is_forward());
        assert!(!nav.previous().unwrap().is_forward());
    }

    #[test]
    fn start_index_is_clamped() {
        let nav = Navigator::new(6, 99);
        assert_eq!(nav.current(), 5);
        let empty = Navigator::new(0, 3);
        assert_eq!(empty.current(), 0);
    }
}
