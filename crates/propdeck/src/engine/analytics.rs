//! One-shot "proposal was opened" analytics.
//!
//! Recording a view is best-effort: a failure is logged and swallowed, never
//! surfaced to the client and never retried within the session.

use log::{debug, warn};

pub trait ViewRecorder: Send {
    fn record_view(&self, proposal_id: &str) -> anyhow::Result<()>;
}

/// Guarantees at-most-one emission per presentation session, no matter how
/// many times the shell is polled after the proposal resolves.
pub struct ViewLatch {
    recorder: Box<dyn ViewRecorder>,
    fired: bool,
}

impl ViewLatch {
    pub fn new(recorder: Box<dyn ViewRecorder>) -> Self {
        Self {
            recorder,
            fired: false,
        }
    }

    pub fn fire(&mut self, proposal_id: &str) {
        if self.fired {
            return;
        }
        self.fired = true;
        if let Err(err) = self.recorder.record_view(proposal_id) {
            warn!("failed to record proposal view for {proposal_id}: {err:#}");
        }
    }

    #[cfg(test)]
    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

/// Posts the view to the back office, fire-and-forget on a background thread
/// so it can never block or delay rendering.
pub struct HttpViewRecorder {
    base_url: String,
}

impl HttpViewRecorder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl ViewRecorder for HttpViewRecorder {
    fn record_view(&self, proposal_id: &str) -> anyhow::Result<()> {
        let url = format!(
            "{}/proposals/{}/views",
            self.base_url.trim_end_matches('/'),
            proposal_id
        );
        std::thread::spawn(move || {
            match ureq::post(&url).send_json(serde_json::json!({})) {
                Ok(_) => debug!("recorded proposal view at {url}"),
                Err(err) => warn!("view recording request to {url} failed: {err}"),
            }
        });
        Ok(())
    }
}

/// Used for proposals opened from a local file, where there is no backend to
/// notify. The latch still arms so behavior stays uniform.
pub struct NoopViewRecorder;

impl ViewRecorder for NoopViewRecorder {
    fn record_view(&self, proposal_id: &str) -> anyhow::Result<()> {
        debug!("local proposal {proposal_id}: view not recorded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    pub struct CountingRecorder {
        pub calls: Arc<AtomicUsize>,
        pub fail: bool,
    }

    impl ViewRecorder for CountingRecorder {
        fn record_view(&self, _proposal_id: &str) -> anyhow::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("backend unavailable");
            }
            Ok(())
        }
    }

    #[test]
    fn latch_fires_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut latch = ViewLatch::new(Box::new(CountingRecorder {
            calls: calls.clone(),
            fail: false,
        }));
        for _ in 0..10 {
            latch.fire("p1");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(latch.has_fired());
    }

    #[test]
    fn recorder_failure_is_swallowed_and_not_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut latch = ViewLatch::new(Box::new(CountingRecorder {
            calls: calls.clone(),
            fail: true,
        }));
        latch.fire("p1");
        latch.fire("p1");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
