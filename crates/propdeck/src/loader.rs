//! One-shot proposal resolution, off the UI thread.
//!
//! The shell polls the returned channel; dropping the receiver abandons the
//! request, which is all the cancellation an unmount needs.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};

use log::debug;

use crate::proposal::ProposalDoc;

pub enum ProposalSource {
    File(PathBuf),
    Slug { base_url: String, slug: String },
}

pub enum LoadOutcome {
    Loaded(Box<ProposalDoc>),
    NotFound,
    Transport(String),
}

pub fn spawn_load(source: ProposalSource) -> Receiver<LoadOutcome> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let outcome = load(source);
        // The receiver may already be gone; nothing to do then.
        let _ = tx.send(outcome);
    });
    rx
}

fn load(source: ProposalSource) -> LoadOutcome {
    match source {
        ProposalSource::File(path) => {
            debug!("loading proposal from {}", path.display());
            let contents = match std::fs::read_to_string(&path) {
                Ok(contents) => contents,
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                    return LoadOutcome::NotFound;
                }
                Err(err) => {
                    return LoadOutcome::Transport(format!(
                        "could not read {}: {err}",
                        path.display()
                    ));
                }
            };
            match serde_json::from_str::<ProposalDoc>(&contents) {
                Ok(doc) => LoadOutcome::Loaded(Box::new(doc)),
                Err(err) => LoadOutcome::Transport(format!("invalid proposal document: {err}")),
            }
        }
        ProposalSource::Slug { base_url, slug } => {
            let url = format!(
                "{}/proposals/{}.json",
                base_url.trim_end_matches('/'),
                slug
            );
            debug!("resolving proposal slug {slug:?} via {url}");
            match ureq::get(&url).call() {
                Ok(mut response) => match response.body_mut().read_json::<ProposalDoc>() {
                    Ok(doc) => LoadOutcome::Loaded(Box::new(doc)),
                    Err(err) => {
                        LoadOutcome::Transport(format!("invalid proposal document: {err}"))
                    }
                },
                Err(ureq::Error::StatusCode(404)) => LoadOutcome::NotFound,
                Err(err) => LoadOutcome::Transport(err.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn recv(rx: Receiver<LoadOutcome>) -> LoadOutcome {
        rx.recv_timeout(Duration::from_secs(5))
            .expect("loader should deliver an outcome")
    }

    #[test]
    fn sample_file_loads() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../sample-proposals/acme-q3.json");
        match recv(spawn_load(ProposalSource::File(path))) {
            LoadOutcome::Loaded(doc) => assert_eq!(doc.slug, "acme-q3"),
            _ => panic!("expected Loaded"),
        }
    }

    #[test]
    fn missing_file_is_not_found() {
        let path = PathBuf::from("does-not-exist/nope.json");
        assert!(matches!(
            recv(spawn_load(ProposalSource::File(path))),
            LoadOutcome::NotFound
        ));
    }

    #[test]
    fn unparseable_file_is_a_transport_error() {
        let path = std::env::temp_dir().join("propdeck-loader-test-garbage.json");
        std::fs::write(&path, "not json at all").unwrap();
        assert!(matches!(
            recv(spawn_load(ProposalSource::File(path))),
            LoadOutcome::Transport(_)
        ));
    }
}
