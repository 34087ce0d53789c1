pub mod registry;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

use registry::SlideContent;

/// A resolved, presentable proposal. Produced once by [`resolve`] and treated
/// as immutable for the rest of the session.
#[derive(Debug, Clone)]
pub struct Proposal {
    pub id: String,
    pub slug: String,
    pub client_name: String,
    pub project_title: String,
    pub valid_until: Option<DateTime<Utc>>,
    pub slides: Vec<Slide>,
    pub consultants: Vec<Consultant>,
    /// Non-fatal per-slide problems found while resolving. Slides listed here
    /// are not part of `slides`.
    pub issues: Vec<SlideIssue>,
}

#[derive(Debug, Clone)]
pub struct Slide {
    pub sort_order: i64,
    pub content: SlideContent,
}

#[derive(Debug, Clone)]
pub struct Consultant {
    pub name: String,
    pub role: String,
    pub photo: Option<String>,
    pub bio: Option<String>,
    pub expertise: Vec<String>,
    pub availability: Option<String>,
}

/// A slide that could not be resolved into a renderable type.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideIssue {
    pub sort_order: i64,
    pub kind: String,
    pub cause: IssueCause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueCause {
    UnknownType,
    MalformedContent,
}

impl std::fmt::Display for SlideIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.cause {
            IssueCause::UnknownType => write!(
                f,
                "slide at sort_order {} has unknown type {:?}",
                self.sort_order, self.kind
            ),
            IssueCause::MalformedContent => write!(
                f,
                "slide at sort_order {} ({:?}) has non-object content",
                self.sort_order, self.kind
            ),
        }
    }
}

impl Proposal {
    /// Expiry is derived, never stored: evaluated against `now` at the moment
    /// of asking so long-lived sessions stay correct.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.valid_until.is_some_and(|until| now > until)
    }
}

/// The wire shape of a proposal document as produced by the back office.
/// Slide content is an open mapping; [`registry`] turns it into typed,
/// fully-defaulted content.
#[derive(Debug, Clone, Deserialize)]
pub struct ProposalDoc {
    pub id: String,
    pub slug: String,
    pub client_name: String,
    pub project_title: String,
    #[serde(default)]
    pub valid_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub slides: Vec<SlideDoc>,
    #[serde(default)]
    pub consultants: Vec<ConsultantDoc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlideDoc {
    /// Missing tags deserialize to an empty string, which [`resolve`] then
    /// reports as an unknown type for that slide alone.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub sort_order: i64,
    /// Kept loose on the wire: a non-object shape here must sink this one
    /// slide, not the whole document.
    #[serde(default)]
    pub content: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConsultantDoc {
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub expertise: Vec<String>,
    #[serde(default)]
    pub availability: Option<String>,
}

/// Resolve a raw document into a presentable [`Proposal`].
///
/// Slides are ordered by `sort_order` with ties broken by insertion order
/// (stable sort). A slide with an unrecognized type or non-object content is
/// dropped from the navigable sequence and reported in `issues`; it never
/// aborts resolution.
/// A proposal with zero consultants gets exactly one illustrative
/// placeholder so the consultants slide never renders an empty state.
pub fn resolve(doc: ProposalDoc) -> Proposal {
    let mut raw_slides = doc.slides;
    raw_slides.sort_by_key(|s| s.sort_order);

    let mut slides = Vec::with_capacity(raw_slides.len());
    let mut issues = Vec::new();
    for raw in raw_slides {
        let content = match raw.content {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            _ => {
                issues.push(SlideIssue {
                    sort_order: raw.sort_order,
                    kind: raw.kind,
                    cause: IssueCause::MalformedContent,
                });
                continue;
            }
        };
        match registry::resolve_content(&raw.kind, &content) {
            Some(content) => slides.push(Slide {
                sort_order: raw.sort_order,
                content,
            }),
            None => issues.push(SlideIssue {
                sort_order: raw.sort_order,
                kind: raw.kind,
                cause: IssueCause::UnknownType,
            }),
        }
    }

    let mut consultants: Vec<Consultant> = doc
        .consultants
        .into_iter()
        .map(|c| Consultant {
            name: c.name,
            role: c.role.unwrap_or_else(|| "Konsult".to_string()),
            photo: c.photo,
            bio: c.bio,
            expertise: c.expertise,
            availability: c.availability,
        })
        .collect();
    if consultants.is_empty() {
        consultants.push(placeholder_consultant());
    }

    Proposal {
        id: doc.id,
        slug: doc.slug,
        client_name: doc.client_name,
        project_title: doc.project_title,
        valid_until: doc.valid_until,
        slides,
        consultants,
        issues,
    }
}

/// Shown when a proposal has no consultants associated yet.
fn placeholder_consultant() -> Consultant {
    Consultant {
        name: "Alex Andersson".to_string(),
        role: "Senior konsult".to_string(),
        photo: None,
        bio: Some("Erfaren konsult med bred bakgrund inom branschen.".to_string()),
        expertise: vec![
            "Ledarskap".to_string(),
            "Projektledning".to_string(),
            "Förändringsarbete".to_string(),
        ],
        availability: Some("Tillgänglig inom 2 veckor".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use registry::SlideKind;

    fn doc_from_json(json: &str) -> ProposalDoc {
        serde_json::from_str(json).expect("fixture should parse")
    }

    #[test]
    fn sample_proposal_resolves() {
        let doc = doc_from_json(include_str!("../../../../sample-proposals/acme-q3.json"));
        let proposal = resolve(doc);
        assert_eq!(proposal.slug, "acme-q3");
        assert_eq!(proposal.slides.len(), 6);
        assert!(proposal.issues.is_empty());
        assert_eq!(proposal.slides[0].content.kind(), SlideKind::Title);
        assert_eq!(
            proposal.slides.last().unwrap().content.kind(),
            SlideKind::Cta
        );
    }

    #[test]
    fn slides_sorted_by_sort_order() {
        let doc = doc_from_json(
            r#"{
                "id": "p1", "slug": "s", "client_name": "C", "project_title": "T",
                "slides": [
                    {"type": "cta", "sort_order": 3},
                    {"type": "title", "sort_order": 1},
                    {"type": "challenge", "sort_order": 2}
                ]
            }"#,
        );
        let proposal = resolve(doc);
        let kinds: Vec<SlideKind> = proposal.slides.iter().map(|s| s.content.kind()).collect();
        assert_eq!(
            kinds,
            vec![SlideKind::Title, SlideKind::Challenge, SlideKind::Cta]
        );
    }

    #[test]
    fn ties_keep_insertion_order() {
        let doc = doc_from_json(
            r#"{
                "id": "p1", "slug": "s", "client_name": "C", "project_title": "T",
                "slides": [
                    {"type": "solution", "sort_order": 2},
                    {"type": "challenge", "sort_order": 2},
                    {"type": "title", "sort_order": 1}
                ]
            }"#,
        );
        let proposal = resolve(doc);
        let kinds: Vec<SlideKind> = proposal.slides.iter().map(|s| s.content.kind()).collect();
        assert_eq!(
            kinds,
            vec![SlideKind::Title, SlideKind::Solution, SlideKind::Challenge]
        );
    }

    #[test]
    fn unknown_type_is_skipped_and_reported() {
        let doc = doc_from_json(
            r#"{
                "id": "p1", "slug": "s", "client_name": "C", "project_title": "T",
                "slides": [
                    {"type": "title", "sort_order": 1},
                    {"type": "bogus", "sort_order": 2},
                    {"type": "cta", "sort_order": 3}
                ]
            }"#,
        );
        let proposal = resolve(doc);
        assert_eq!(proposal.slides.len(), 2);
        assert_eq!(
            proposal.issues,
            vec![SlideIssue {
                sort_order: 2,
                kind: "bogus".to_string(),
                cause: IssueCause::UnknownType,
            }]
        );
    }

    #[test]
    fn non_object_content_drops_only_that_slide() {
        let doc = doc_from_json(
            r#"{
                "id": "p1", "slug": "s", "client_name": "C", "project_title": "T",
                "slides": [
                    {"type": "title", "sort_order": 1, "content": {"headline": "Hej"}},
                    {"type": "challenge", "sort_order": 2, "content": 42},
                    {"type": "cta", "sort_order": 3}
                ]
            }"#,
        );
        let proposal = resolve(doc);
        assert_eq!(proposal.slides.len(), 2);
        assert_eq!(
            proposal.issues,
            vec![SlideIssue {
                sort_order: 2,
                kind: "challenge".to_string(),
                cause: IssueCause::MalformedContent,
            }]
        );
    }

    #[test]
    fn null_content_resolves_with_full_defaults() {
        let doc = doc_from_json(
            r#"{
                "id": "p1", "slug": "s", "client_name": "C", "project_title": "T",
                "slides": [{"type": "title", "sort_order": 1, "content": null}]
            }"#,
        );
        let proposal = resolve(doc);
        assert_eq!(proposal.slides.len(), 1);
        assert!(proposal.issues.is_empty());
    }

    #[test]
    fn missing_type_tag_is_reported_not_fatal() {
        let doc = doc_from_json(
            r#"{
                "id": "p1", "slug": "s", "client_name": "C", "project_title": "T",
                "slides": [
                    {"sort_order": 1},
                    {"type": "cta", "sort_order": 2}
                ]
            }"#,
        );
        let proposal = resolve(doc);
        assert_eq!(proposal.slides.len(), 1);
        assert_eq!(proposal.issues.len(), 1);
        assert_eq!(proposal.issues[0].cause, IssueCause::UnknownType);
        assert_eq!(proposal.issues[0].kind, "");
    }

    #[test]
    fn zero_consultants_yields_one_placeholder() {
        let doc = doc_from_json(
            r#"{"id": "p1", "slug": "s", "client_name": "C", "project_title": "T"}"#,
        );
        let proposal = resolve(doc);
        assert_eq!(proposal.consultants.len(), 1);
        assert_eq!(proposal.consultants[0].name, "Alex Andersson");
    }

    #[test]
    fn provided_consultants_are_kept_in_order() {
        let doc = doc_from_json(
            r#"{
                "id": "p1", "slug": "s", "client_name": "C", "project_title": "T",
                "consultants": [
                    {"name": "Maria Lund", "role": "Interimschef"},
                    {"name": "Johan Berg"}
                ]
            }"#,
        );
        let proposal = resolve(doc);
        assert_eq!(proposal.consultants.len(), 2);
        assert_eq!(proposal.consultants[0].name, "Maria Lund");
        assert_eq!(proposal.consultants[1].role, "Konsult");
    }

    #[test]
    fn expiry_is_derived_from_now() {
        let doc = doc_from_json(
            r#"{
                "id": "p1", "slug": "s", "client_name": "C", "project_title": "T",
                "valid_until": "2026-06-01T12:00:00Z"
            }"#,
        );
        let proposal = resolve(doc);
        let before = Utc.with_ymd_and_hms(2026, 5, 31, 12, 0, 0).unwrap();
        let one_second_after = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 1).unwrap();
        assert!(!proposal.is_expired(before));
        assert!(proposal.is_expired(one_second_after));
    }

    #[test]
    fn no_valid_until_never_expires() {
        let doc = doc_from_json(
            r#"{"id": "p1", "slug": "s", "client_name": "C", "project_title": "T"}"#,
        );
        let proposal = resolve(doc);
        assert!(!proposal.is_expired(Utc::now()));
    }
}
