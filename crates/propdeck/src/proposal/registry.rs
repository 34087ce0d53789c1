//! Turns a slide's open `content` mapping into a typed, fully-defaulted
//! content struct.
//!
//! Every declared field has a fixed default (the Swedish placeholder copy
//! used by the reference deployment). A field that is absent or of the wrong
//! shape gets its default; a provided-but-empty array falls back to the
//! type's default set; a non-empty array is used verbatim, preserving order.

use serde_json::{Map, Value};

/// The closed set of slide types a proposal may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideKind {
    Title,
    Challenge,
    Solution,
    About,
    Consultants,
    Delivery,
    Investment,
    Cta,
}

impl SlideKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "title" => Some(Self::Title),
            "challenge" => Some(Self::Challenge),
            "solution" => Some(Self::Solution),
            "about" => Some(Self::About),
            "consultants" => Some(Self::Consultants),
            "delivery" => Some(Self::Delivery),
            "investment" => Some(Self::Investment),
            "cta" => Some(Self::Cta),
            _ => None,
        }
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Challenge => "challenge",
            Self::Solution => "solution",
            Self::About => "about",
            Self::Consultants => "consultants",
            Self::Delivery => "delivery",
            Self::Investment => "investment",
            Self::Cta => "cta",
        }
    }
}

#[derive(Debug, Clone)]
pub enum SlideContent {
    Title(TitleContent),
    Challenge(ChallengeContent),
    Solution(SolutionContent),
    About(AboutContent),
    Consultants(ConsultantsContent),
    Delivery(DeliveryContent),
    Investment(InvestmentContent),
    Cta(CtaContent),
}

impl SlideContent {
    pub fn kind(&self) -> SlideKind {
        match self {
            Self::Title(_) => SlideKind::Title,
            Self::Challenge(_) => SlideKind::Challenge,
            Self::Solution(_) => SlideKind::Solution,
            Self::About(_) => SlideKind::About,
            Self::Consultants(_) => SlideKind::Consultants,
            Self::Delivery(_) => SlideKind::Delivery,
            Self::Investment(_) => SlideKind::Investment,
            Self::Cta(_) => SlideKind::Cta,
        }
    }

    /// Headline text, used for logging and the HUD.
    pub fn headline(&self) -> &str {
        match self {
            Self::Title(c) => &c.headline,
            Self::Challenge(c) => &c.headline,
            Self::Solution(c) => &c.headline,
            Self::About(c) => &c.headline,
            Self::Consultants(c) => &c.headline,
            Self::Delivery(c) => &c.headline,
            Self::Investment(c) => &c.headline,
            Self::Cta(c) => &c.headline,
        }
    }
}

/// Opening slide.
/// Defaults: kicker "Förslag", headline "Rätt kompetens, i rätt tid",
/// subtitle "Ett skräddarsytt konsultupplägg för er verksamhet",
/// presented_by "Konsultteamet".
#[derive(Debug, Clone)]
pub struct TitleContent {
    pub kicker: String,
    pub headline: String,
    pub subtitle: String,
    pub presented_by: String,
}

/// The client's problem statement.
/// Defaults: kicker "Utmaningen", headline "Var står ni idag?", a one-line
/// body, and three placeholder pain points.
#[derive(Debug, Clone)]
pub struct ChallengeContent {
    pub kicker: String,
    pub headline: String,
    pub body: String,
    pub pain_points: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SolutionContent {
    pub kicker: String,
    pub headline: String,
    pub body: String,
    pub pillars: Vec<Pillar>,
}

#[derive(Debug, Clone)]
pub struct Pillar {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct AboutContent {
    pub kicker: String,
    pub headline: String,
    pub body: String,
    pub stats: Vec<Stat>,
}

#[derive(Debug, Clone)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

/// The consultant cards themselves come from the proposal's consultant list,
/// not from slide content.
#[derive(Debug, Clone)]
pub struct ConsultantsContent {
    pub kicker: String,
    pub headline: String,
    pub intro: String,
}

#[derive(Debug, Clone)]
pub struct DeliveryContent {
    pub kicker: String,
    pub headline: String,
    pub phases: Vec<Phase>,
}

#[derive(Debug, Clone)]
pub struct Phase {
    pub name: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct InvestmentContent {
    pub kicker: String,
    pub headline: String,
    pub price_line: String,
    pub price_note: String,
    pub includes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CtaContent {
    pub kicker: String,
    pub headline: String,
    pub body: String,
    pub next_steps: Vec<String>,
    pub contact_name: String,
    pub contact_email: String,
}

/// Resolve a raw type tag and content mapping. Returns `None` for an unknown
/// tag; the caller records the slide as a [`super::SlideIssue`] and drops it
/// from the navigable sequence.
pub fn resolve_content(tag: &str, content: &Map<String, Value>) -> Option<SlideContent> {
    let kind = SlideKind::from_tag(tag)?;
    Some(match kind {
        SlideKind::Title => SlideContent::Title(TitleContent {
            kicker: text(content, "kicker", "Förslag"),
            headline: text(content, "headline", "Rätt kompetens, i rätt tid"),
            subtitle: text(
                content,
                "subtitle",
                "Ett skräddarsytt konsultupplägg för er verksamhet",
            ),
            presented_by: text(content, "presented_by", "Konsultteamet"),
        }),
        SlideKind::Challenge => SlideContent::Challenge(ChallengeContent {
            kicker: text(content, "kicker", "Utmaningen"),
            headline: text(content, "headline", "Var står ni idag?"),
            body: text(
                content,
                "body",
                "Vi har lyssnat på er organisation och ser tre återkommande hinder.",
            ),
            pain_points: string_list(
                content,
                "pain_points",
                &[
                    "Svårt att hitta rätt kompetens i tid",
                    "Pågående initiativ saknar senior ledning",
                    "Interna teamet räcker inte till",
                ],
            ),
        }),
        SlideKind::Solution => SlideContent::Solution(SolutionContent {
            kicker: text(content, "kicker", "Vår lösning"),
            headline: text(content, "headline", "Så tar vi er framåt"),
            body: text(
                content,
                "body",
                "Ett sammansvetsat konsultteam som kliver in där ni behöver det mest.",
            ),
            pillars: pillars(content),
        }),
        SlideKind::About => SlideContent::About(AboutContent {
            kicker: text(content, "kicker", "Om oss"),
            headline: text(content, "headline", "En partner, inte en leverantör"),
            body: text(
                content,
                "body",
                "Vi bemannar och leder konsultuppdrag åt organisationer i hela Norden.",
            ),
            stats: stats(content),
        }),
        SlideKind::Consultants => SlideContent::Consultants(ConsultantsContent {
            kicker: text(content, "kicker", "Föreslagna konsulter"),
            headline: text(content, "headline", "Teamet vi föreslår"),
            intro: text(
                content,
                "intro",
                "Konsulterna nedan är tillgängliga för uppdraget.",
            ),
        }),
        SlideKind::Delivery => SlideContent::Delivery(DeliveryContent {
            kicker: text(content, "kicker", "Genomförande"),
            headline: text(content, "headline", "Från uppstart till leverans"),
            phases: phases(content),
        }),
        SlideKind::Investment => SlideContent::Investment(InvestmentContent {
            kicker: text(content, "kicker", "Investering"),
            headline: text(content, "headline", "Vad kostar det?"),
            price_line: text(content, "price_line", "Offereras efter behovsanalys"),
            price_note: text(content, "price_note", "Alla priser exklusive moms"),
            includes: string_list(
                content,
                "includes",
                &[
                    "Dedikerad konsultchef",
                    "Månadsvis uppföljning",
                    "Ersättningsgaranti",
                ],
            ),
        }),
        SlideKind::Cta => SlideContent::Cta(CtaContent {
            kicker: text(content, "kicker", "Nästa steg"),
            headline: text(content, "headline", "Ska vi sätta igång?"),
            body: text(
                content,
                "body",
                "Hör av er så bokar vi ett uppstartsmöte.",
            ),
            next_steps: string_list(
                content,
                "next_steps",
                &[
                    "Signera avtalet",
                    "Uppstartsmöte med teamet",
                    "Konsulterna på plats",
                ],
            ),
            contact_name: text(content, "contact_name", "Er kontaktperson"),
            contact_email: text(content, "contact_email", "hej@example.se"),
        }),
    })
}

/// String field lookup: non-empty string wins, anything else gets the default.
fn text(content: &Map<String, Value>, key: &str, default: &str) -> String {
    match content.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        _ => default.to_string(),
    }
}

/// Array-of-strings lookup. Missing, wrong-shaped, or empty arrays fall back
/// to the default set; non-string entries within a provided array are skipped.
fn string_list(content: &Map<String, Value>, key: &str, defaults: &[&str]) -> Vec<String> {
    let provided: Vec<String> = match content.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };
    if provided.is_empty() {
        defaults.iter().map(|s| s.to_string()).collect()
    } else {
        provided
    }
}

fn object_list<'a>(content: &'a Map<String, Value>, key: &str) -> Vec<&'a Map<String, Value>> {
    match content.get(key) {
        Some(Value::Array(items)) => items.iter().filter_map(|v| v.as_object()).collect(),
        _ => Vec::new(),
    }
}

fn pillars(content: &Map<String, Value>) -> Vec<Pillar> {
    let provided: Vec<Pillar> = object_list(content, "pillars")
        .into_iter()
        .map(|obj| Pillar {
            title: text(obj, "title", "Fokusområde"),
            description: text(obj, "description", "Beskrivning saknas."),
        })
        .collect();
    if provided.is_empty() {
        vec![
            Pillar {
                title: "Rätt människor".to_string(),
                description: "Handplockade konsulter med dokumenterad erfarenhet.".to_string(),
            },
            Pillar {
                title: "Snabb start".to_string(),
                description: "Bemanning på plats inom två veckor.".to_string(),
            },
            Pillar {
                title: "Flexibel skala".to_string(),
                description: "Väx eller minska teamet efter behov.".to_string(),
            },
        ]
    } else {
        provided
    }
}

fn stats(content: &Map<String, Value>) -> Vec<Stat> {
    let provided: Vec<Stat> = object_list(content, "stats")
        .into_iter()
        .map(|obj| Stat {
            value: text(obj, "value", "–"),
            label: text(obj, "label", ""),
        })
        .collect();
    if provided.is_empty() {
        vec![
            Stat {
                value: "150+".to_string(),
                label: "genomförda uppdrag".to_string(),
            },
            Stat {
                value: "40".to_string(),
                label: "konsulter i nätverket".to_string(),
            },
            Stat {
                value: "98%".to_string(),
                label: "nöjda kunder".to_string(),
            },
        ]
    } else {
        provided
    }
}

fn phases(content: &Map<String, Value>) -> Vec<Phase> {
    let provided: Vec<Phase> = object_list(content, "phases")
        .into_iter()
        .map(|obj| Phase {
            name: text(obj, "name", "Fas"),
            duration: text(obj, "duration", ""),
            description: text(obj, "description", ""),
        })
        .collect();
    if provided.is_empty() {
        vec![
            Phase {
                name: "Uppstart".to_string(),
                duration: "Vecka 1".to_string(),
                description: "Behovsanalys och onboarding.".to_string(),
            },
            Phase {
                name: "Genomförande".to_string(),
                duration: "Vecka 2–10".to_string(),
                description: "Leverans i nära samarbete med ert team.".to_string(),
            },
            Phase {
                name: "Överlämning".to_string(),
                duration: "Vecka 11–12".to_string(),
                description: "Dokumentation och kunskapsöverföring.".to_string(),
            },
        ]
    } else {
        provided
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: serde_json::Value) -> Map<String, Value> {
        value.as_object().expect("fixture must be an object").clone()
    }

    #[test]
    fn every_kind_resolves_from_empty_content() {
        for tag in [
            "title",
            "challenge",
            "solution",
            "about",
            "consultants",
            "delivery",
            "investment",
            "cta",
        ] {
            let content = resolve_content(tag, &Map::new());
            assert!(content.is_some(), "{tag} should resolve");
            assert_eq!(content.unwrap().kind().as_tag(), tag);
        }
    }

    #[test]
    fn unknown_tag_resolves_to_none() {
        assert!(resolve_content("bogus", &Map::new()).is_none());
        assert!(resolve_content("", &Map::new()).is_none());
        assert!(resolve_content("Title", &Map::new()).is_none());
    }

    #[test]
    fn missing_field_gets_documented_default() {
        let Some(SlideContent::Title(title)) =
            resolve_content("title", &map(json!({"headline": "Eget förslag"})))
        else {
            panic!("expected title content");
        };
        assert_eq!(title.headline, "Eget förslag");
        assert_eq!(title.kicker, "Förslag");
        assert_eq!(title.presented_by, "Konsultteamet");
    }

    #[test]
    fn wrong_shape_falls_back_to_default() {
        let Some(SlideContent::Title(title)) =
            resolve_content("title", &map(json!({"headline": 42, "subtitle": null})))
        else {
            panic!("expected title content");
        };
        assert_eq!(title.headline, "Rätt kompetens, i rätt tid");
        assert_eq!(
            title.subtitle,
            "Ett skräddarsytt konsultupplägg för er verksamhet"
        );
    }

    #[test]
    fn empty_array_uses_default_set() {
        let Some(SlideContent::Challenge(c)) =
            resolve_content("challenge", &map(json!({"pain_points": []})))
        else {
            panic!("expected challenge content");
        };
        assert_eq!(c.pain_points.len(), 3);
        assert_eq!(c.pain_points[0], "Svårt att hitta rätt kompetens i tid");
    }

    #[test]
    fn non_empty_array_is_used_verbatim_in_order() {
        let Some(SlideContent::Cta(c)) = resolve_content(
            "cta",
            &map(json!({"next_steps": ["Ett", "Två", "Tre", "Fyra"]})),
        ) else {
            panic!("expected cta content");
        };
        assert_eq!(c.next_steps, vec!["Ett", "Två", "Tre", "Fyra"]);
    }

    #[test]
    fn structured_arrays_default_per_entry_field() {
        let Some(SlideContent::Delivery(d)) = resolve_content(
            "delivery",
            &map(json!({"phases": [{"name": "Pilot"}]})),
        ) else {
            panic!("expected delivery content");
        };
        assert_eq!(d.phases.len(), 1);
        assert_eq!(d.phases[0].name, "Pilot");
        assert_eq!(d.phases[0].duration, "");
    }

    #[test]
    fn default_pillars_and_stats_have_three_entries() {
        let Some(SlideContent::Solution(s)) = resolve_content("solution", &Map::new()) else {
            panic!("expected solution content");
        };
        assert_eq!(s.pillars.len(), 3);

        let Some(SlideContent::About(a)) = resolve_content("about", &Map::new()) else {
            panic!("expected about content");
        };
        assert_eq!(a.stats.len(), 3);
    }
}
