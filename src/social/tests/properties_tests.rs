//! Whole-pipeline properties: ordering, idempotence, round trips

use crate::social::tokenizer;
use crate::social::{Categories, Category, PatternSet, SocialText, StyledBuffer, StyledText};
use pretty_assertions::assert_eq;

const SAMPLES: &[&str] = &[
    "",
    "plain text only",
    "Hello #World and @jane_doe visit http://x.co",
    "#a#b@c@d",
    "mail me@example.com or see https://example.com/path?q=1#frag",
    "＃全角 #über @ünder #123 #_",
    "#1a @9b ftp://files.example.org:21/pub",
];

#[test]
fn test_mixed_sentence_payloads() {
    let view = SocialText::new(StyledBuffer::new("Hello #World and @jane_doe visit http://x.co")).unwrap();

    assert_eq!(view.hashtags(), vec!["World"]);
    assert_eq!(view.mentions(), vec!["jane_doe"]);
    assert_eq!(view.hyperlinks(), vec!["http://x.co"]);
    assert_eq!(view.surface().annotations().len(), 3);
}

#[test]
fn test_tokens_sorted_and_disjoint_per_category() {
    let patterns = PatternSet::new();
    for text in SAMPLES {
        let tokens = tokenizer::scan(&patterns, text, Categories::all());
        assert!(tokens.windows(2).all(|w| w[0].start <= w[1].start), "unsorted: {text}");

        for category in Category::ALL {
            let own: Vec<_> = tokens.iter().filter(|t| t.category == category).collect();
            assert!(own.windows(2).all(|w| w[0].end <= w[1].start), "overlap in {category}: {text}");
        }
    }
}

#[test]
fn test_payload_round_trips_through_matched_text() {
    let patterns = PatternSet::new();
    for text in SAMPLES {
        for token in tokenizer::scan(&patterns, text, Categories::all()) {
            let matched = token.matched(text).unwrap();
            assert!(!token.is_empty());
            assert!(matched.ends_with(&token.payload), "{matched} / {}", token.payload);
            if token.category == Category::Hyperlink {
                assert_eq!(matched, token.payload);
            }
        }
    }
}

#[test]
fn test_recompute_is_idempotent() {
    for text in SAMPLES {
        let mut view = SocialText::new(StyledBuffer::new(*text)).unwrap();
        let first = view.surface().annotations().to_vec();
        view.recompute().unwrap();
        view.recompute().unwrap();
        assert_eq!(view.surface().annotations(), first.as_slice());
    }
}

#[test]
fn test_annotations_match_tokens() {
    for text in SAMPLES {
        let view = SocialText::new(StyledBuffer::new(*text)).unwrap();
        let mut painted: Vec<_> = view
            .surface()
            .annotations()
            .iter()
            .map(|a| (a.range.start, a.category))
            .collect();
        let mut scanned: Vec<_> = view.tokens().iter().map(|t| (t.start, t.category)).collect();
        painted.sort();
        scanned.sort();
        assert_eq!(painted, scanned);
    }
}

#[test]
fn test_all_disabled_paints_nothing() {
    let mut view = SocialText::new(StyledBuffer::new(SAMPLES[2])).unwrap();
    view.set_enabled_categories(Categories::empty()).unwrap();

    assert!(view.surface().annotations().is_empty());
    assert!(view.tokens().is_empty());
    for category in Category::ALL {
        assert!(view.extract(category).is_empty());
    }
}

#[test]
fn test_numeric_only_tags_are_not_tokens() {
    let view = SocialText::new(StyledBuffer::new("#123 @456 #12a")).unwrap();
    assert_eq!(view.hashtags(), vec!["12a"]);
    assert!(view.mentions().is_empty());
}
