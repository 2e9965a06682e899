//! Tests for per-instance isolation of patterns, flags, and colors

use crate::social::{Category, Color, PatternSet, SocialConfig, SocialText, StyledBuffer, StyledText};
use pretty_assertions::assert_eq;

const TEXT: &str = "#tag $CASH @who";

#[test]
fn test_custom_pattern_does_not_leak_between_instances() {
    let mut custom = SocialText::new(StyledBuffer::new(TEXT)).unwrap();
    let stock = SocialText::new(StyledBuffer::new(TEXT)).unwrap();

    custom.set_pattern(Category::Hashtag, r"\$([A-Z]+)").unwrap();

    assert_eq!(custom.hashtags(), vec!["CASH"]);
    assert_eq!(stock.hashtags(), vec!["tag"]);
    assert!(stock.patterns().is_default(Category::Hashtag));
    assert_eq!(
        stock.patterns().pattern(Category::Hashtag).as_str(),
        PatternSet::default_pattern(Category::Hashtag).as_str()
    );
}

#[test]
fn test_config_pattern_is_instance_local() {
    let config = SocialConfig {
        mention_pattern: Some(r"~(\w+)".to_string()),
        ..SocialConfig::default()
    };
    let custom = SocialText::with_config(StyledBuffer::new("~ann @bob"), &config).unwrap();
    let stock = SocialText::new(StyledBuffer::new("~ann @bob")).unwrap();

    assert_eq!(custom.mentions(), vec!["ann"]);
    assert_eq!(stock.mentions(), vec!["bob"]);
}

#[test]
fn test_flags_and_colors_are_instance_local() {
    let mut a = SocialText::new(StyledBuffer::new(TEXT)).unwrap();
    let b = SocialText::new(StyledBuffer::new(TEXT)).unwrap();

    a.set_enabled(Category::Mention, false).unwrap();
    a.set_color(Category::Hashtag, Color(0xFF11_2233)).unwrap();

    assert!(b.is_enabled(Category::Mention));
    assert_eq!(b.mentions(), vec!["who"]);
    assert_eq!(b.color(Category::Hashtag), Color::ACCENT);
    assert_eq!(a.surface().annotations().len(), 1);
    assert_eq!(b.surface().annotations().len(), 2);
}

#[test]
fn test_pattern_set_clone_is_independent() {
    let mut first = PatternSet::new();
    let second = first.clone();
    first.set_pattern(Category::Hyperlink, r"www\.\w+").unwrap();

    assert!(!first.is_default(Category::Hyperlink));
    assert!(second.is_default(Category::Hyperlink));
}
