//! Suggestion filtering fed by live partial tokens

use crate::social::{Avatar, Category, Hashtag, Mention, SocialListener, SocialText, StyledBuffer, SuggestionFilter};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

fn people() -> Vec<Mention> {
    vec![
        Mention::new("jane_doe").with_display_name("Jane Doe"),
        Mention::new("janet").with_avatar(Avatar::Resource(3)),
        Mention::new("bob").with_avatar(Avatar::Remote("https://img.example/bob.png".to_string())),
    ]
}

#[test]
fn test_partial_mention_drives_filter() {
    let people = people();
    let query = Rc::new(RefCell::new(String::new()));
    let sink = query.clone();
    let listener: SocialListener = Rc::new(move |_: Category, partial: &str| *sink.borrow_mut() = partial.to_string());

    let mut view = SocialText::new(StyledBuffer::new("")).unwrap();
    view.set_partial_listener(Category::Mention, Some(listener));
    for c in "@JAN".chars() {
        let end = view.text().len();
        view.edit(end, 0, &c.to_string()).unwrap();
    }

    let names: Vec<_> = SuggestionFilter::filter(&people, &query.borrow())
        .into_iter()
        .map(|m| m.username.clone())
        .collect();
    assert_eq!(names, vec!["jane_doe", "janet"]);
}

#[test]
fn test_hashtag_list_from_json() {
    let tags: Vec<Hashtag> =
        serde_json::from_str(r#"[{"hashtag": "rust", "count": 12}, {"hashtag": "rustacean"}, {"hashtag": "go"}]"#)
            .unwrap();
    let hits = SuggestionFilter::filter(&tags, "rust");

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].count, Some(12));
    assert_eq!(hits[1].count, None);
}

#[test]
fn test_mention_list_with_mixed_avatars() {
    let mentions: Vec<Mention> = serde_json::from_str(
        r#"[{"username": "a", "avatar": null}, {"username": "b", "avatar": 5}, {"username": "c", "avatar": "u"}]"#,
    )
    .unwrap();

    let avatars: Vec<_> = mentions.into_iter().map(|m| m.avatar).collect();
    assert_eq!(
        avatars,
        vec![Avatar::Placeholder, Avatar::Resource(5), Avatar::Remote("u".to_string())]
    );
}

#[test]
fn test_mention_list_rejects_bad_avatar() {
    let result: Result<Vec<Mention>, _> = serde_json::from_str(r#"[{"username": "a", "avatar": [1, 2]}]"#);
    assert!(result.is_err());
}
