//! Posting rendering tests.

use postle_core::{
    posting::{forum_link, Posting, PostingFields},
    view::{render_posting, MarkupSurface, Region, Surface},
};

fn posting() -> Posting {
    Posting {
        author:       "alice".into(),
        status:       "<b>Stammposterin</b>".into(),
        published_at: "3. Mai 2024, 09:41:07".into(),
        upvotes:      Some(27),
        downvotes:    Some(4),
        title:        "Fish & Chips".into(),
        body:         "Erste Zeile\r\nZweite <Zeile>\nDritte".into(),
        permalink:    Some(forum_link("3000000215", "1046")),
    }
}

#[test]
fn upvotes_only_renders_zero_downvotes() {
    let mut surface = MarkupSurface::new();
    let fields = PostingFields { upvotes: Some(3), ..Default::default() };
    render_posting(&mut surface, &fields);

    assert_eq!(surface.region(Region::Rating), Some("0 🟥 🟩 3"));
    assert_eq!(surface.region(Region::Title), None);
    assert_eq!(surface.region(Region::Username), None);
}

#[test]
fn full_posting_fills_every_region() {
    let mut surface = MarkupSurface::new();
    render_posting(&mut surface, &PostingFields::from(&posting()));

    assert_eq!(surface.region(Region::Username), Some("alice"));
    assert_eq!(surface.region(Region::Rating), Some("4 🟥 🟩 27"));
    assert_eq!(surface.region(Region::Published), Some("3. Mai 2024, 09:41:07"));
    assert_eq!(
        surface.region(Region::Link),
        Some("https://www.derstandard.at/story/3000000215#posting-1046")
    );
}

#[test]
fn title_and_body_are_escaped_but_status_is_trusted() {
    let mut surface = MarkupSurface::new();
    render_posting(&mut surface, &PostingFields::from(&posting()));

    assert_eq!(surface.region(Region::Title), Some("Fish &amp; Chips"));
    assert_eq!(
        surface.region(Region::Message),
        Some("Erste Zeile<br>Zweite &lt;Zeile&gt;<br>Dritte")
    );
    assert_eq!(surface.region(Region::Status), Some("<b>Stammposterin</b>"));
}

#[test]
fn rendering_replaces_previous_posting() {
    let mut surface = MarkupSurface::new();
    render_posting(&mut surface, &PostingFields::from(&posting()));
    render_posting(&mut surface, &PostingFields { title: Some("Neu".into()), ..Default::default() });

    assert_eq!(surface.region(Region::Title), Some("Neu"));
    assert_eq!(surface.region(Region::Username), None);
    assert_eq!(surface.region(Region::Rating), None);
    assert_eq!(surface.region(Region::Link), None);
}

#[test]
fn redacted_posting_never_shows_the_author() {
    let mut surface = MarkupSurface::new();
    surface.guess_slots(6);
    render_posting(&mut surface, &posting().redacted());

    assert_eq!(surface.region(Region::Username), None);
    assert_eq!(surface.region(Region::Link), None);
    assert!(!surface.to_html().contains("alice"));
    assert!(surface.to_html().contains("Fish &amp; Chips"));
}
