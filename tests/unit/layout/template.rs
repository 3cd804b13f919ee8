use super::*;

#[test]
fn ids_round_trip_through_strings() {
    for id in TemplateId::ALL {
        assert_eq!(id.as_str().parse::<TemplateId>().unwrap(), id);
        assert_eq!(id.to_string(), id.as_str());
        assert_eq!(id.template().id, id);
    }
    assert_eq!(" MEMO ".parse::<TemplateId>().unwrap(), TemplateId::Memo);
    assert!("magazine".parse::<TemplateId>().is_err());
}

#[test]
fn serde_uses_lowercase_ids() {
    let s = serde_json::to_string(&TemplateId::Poster).unwrap();
    assert_eq!(s, "\"poster\"");
    let id: TemplateId = serde_json::from_str("\"ins\"").unwrap();
    assert_eq!(id, TemplateId::Ins);
}

#[test]
fn first_page_kinds() {
    assert_eq!(TemplateId::Article.template().first_page, FirstPage::Mixed);
    assert_eq!(TemplateId::Memo.template().first_page, FirstPage::Mixed);
    assert_eq!(TemplateId::Book.template().first_page, FirstPage::Cover);
    assert_eq!(TemplateId::Notes.template().first_page, FirstPage::Cover);
    assert_eq!(TemplateId::Ins.template().first_page, FirstPage::QuoteCover);
    assert_eq!(
        TemplateId::Poster.template().first_page,
        FirstPage::SingleCover
    );
}

#[test]
fn only_memo_reserves_header_and_draws_blocks() {
    for id in TemplateId::ALL {
        let t = id.template();
        let is_memo = id == TemplateId::Memo;
        assert_eq!(t.header_reservation > 0.0, is_memo);
        assert_eq!(t.highlight_style == HighlightStyle::InvertedBlock, is_memo);
        assert_eq!(t.decoration == Decoration::MemoHeader, is_memo);
    }
}

#[test]
fn swipe_hint_only_on_title_covers() {
    assert!(TemplateId::Book.template().swipe_hint());
    assert!(TemplateId::Poster.template().swipe_hint());
    assert!(!TemplateId::Ins.template().swipe_hint());
    assert!(!TemplateId::Article.template().swipe_hint());
}

#[test]
fn presets_match_catalog() {
    assert_eq!(
        TemplateId::Book.template().preset.background,
        Rgba8::hex(0xF9F7F1)
    );
    assert_eq!(
        TemplateId::Memo.template().preset.highlight,
        Rgba8::hex(0xFDE047)
    );
}
