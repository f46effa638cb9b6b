//! Rendered screens, checked with inline snapshots.

mod common;

use common::{area_with, screen, type_str};
use opentui_textarea::{
    CellBuffer, ClipRect, EditCommand, Rgba, Style, TextAreaConfig, WrapMode,
};

fn lines(n: usize) -> String {
    (0..n)
        .map(|i| format!("line {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn word_wrapped_paragraph() {
    let mut area = area_with(
        "The quick brown fox jumps over the lazy dog",
        TextAreaConfig::default(),
        12,
        5,
    );
    insta::assert_snapshot!(screen(&mut area, 12, 5), @r"
    The quick
    brown fox
    jumps over
    the lazy dog
    ");
    eprintln!("[TEST] PASS: Word wrapped paragraph");
}

#[test]
fn char_wrapped_cjk() {
    let config = TextAreaConfig::default().with_wrap(WrapMode::Char);
    let mut area = area_with("日本語のテキスト", config, 6, 3);
    insta::assert_snapshot!(screen(&mut area, 6, 3), @r"
    日本語
    のテキ
    スト
    ");
    eprintln!("[TEST] PASS: Char wrapped cjk");
}

#[test]
fn scrolled_to_end() {
    let mut area = area_with(&lines(30), TextAreaConfig::default(), 10, 3);
    area.apply(EditCommand::DocumentEnd { extend: false });
    eprintln!("[TEST] Offset after DocumentEnd: {:?}", area.offset());
    insta::assert_snapshot!(screen(&mut area, 10, 3), @r"
    line 27
    line 28
    line 29
    ");
    assert_eq!(area.cursor_screen_position(), Some((7, 2)));
    eprintln!("[TEST] PASS: Scrolled to end");
}

#[test]
fn no_wrap_scrolls_horizontally() {
    let config = TextAreaConfig::default().with_wrap(WrapMode::None);
    let mut area = area_with(
        "first line is long enough\na much longer second line",
        config,
        10,
        2,
    );
    area.apply(EditCommand::Down { extend: false });
    area.apply(EditCommand::End { extend: false });
    assert_eq!(area.offset(), (0, 19));
    insta::assert_snapshot!(screen(&mut area, 10, 2), @r"
    enough
    d line
    ");
    eprintln!("[TEST] PASS: No wrap scrolls horizontally");
}

#[test]
fn typed_text_matches_screen() {
    let mut area = area_with("", TextAreaConfig::default(), 8, 3);
    type_str(&mut area, "hello");
    area.apply(EditCommand::Newline);
    type_str(&mut area, "wide 中文!");
    insta::assert_snapshot!(screen(&mut area, 8, 3), @r"
    hello
    wide 中
    文!
    ");
    eprintln!("[TEST] PASS: Typed text matches screen");
}

#[test]
fn placeholder_when_empty() {
    let config = TextAreaConfig::default().with_placeholder("Write something nice here");
    let mut area = area_with("", config, 11, 4);
    insta::assert_snapshot!(screen(&mut area, 11, 4), @r"
    Write
    something
    nice here
    ");
    type_str(&mut area, "x");
    insta::assert_snapshot!(screen(&mut area, 11, 4), @"x");
    eprintln!("[TEST] PASS: Placeholder when empty");
}

#[test]
fn draw_offsets_into_area() {
    let mut area = area_with("ab\ncd", TextAreaConfig::default(), 4, 2);
    let mut buffer = CellBuffer::new(6, 4);
    area.draw(&mut buffer, ClipRect::new(2, 1, 4, 2));
    assert_eq!(buffer.row_text(0), "");
    assert_eq!(buffer.row_text(1), "  ab");
    assert_eq!(buffer.row_text(2), "  cd");
    assert_eq!(buffer.row_text(3), "");
    assert_eq!(area.cursor_screen_position(), Some((2, 1)));
    eprintln!("[TEST] PASS: Draw offsets into area");
}

#[test]
fn styles_are_applied() {
    let text_style = Style::fg(Rgba::WHITE).with_bg(Rgba::BLACK);
    let selected_style = Style::builder().bg(Rgba::BLUE).bold().build();
    let config = TextAreaConfig::default()
        .with_text_style(text_style)
        .with_selected_style(selected_style);
    let mut area = area_with("select me", config, 12, 1);
    area.select(7, 9);
    let mut buffer = CellBuffer::new(12, 1);
    area.draw(&mut buffer, ClipRect::new(0, 0, 12, 1));
    let styles: Vec<Style> = (0..12).map(|x| buffer.get(x, 0).unwrap().style).collect();
    assert!(styles[..7].iter().all(|s| *s == text_style));
    assert!(styles[7..9].iter().all(|s| *s == selected_style));
    assert!(styles[9..].iter().all(|s| *s == text_style));
    eprintln!("[TEST] PASS: Styles are applied");
}

#[test]
fn combining_marks_share_a_cell() {
    let mut area = area_with("e\u{301}\tx", TextAreaConfig::default(), 8, 1);
    let mut buffer = CellBuffer::new(8, 1);
    area.draw(&mut buffer, ClipRect::new(0, 0, 8, 1));
    assert_eq!(buffer.get(0, 0).unwrap().symbol(), "e\u{301}");
    assert_eq!(buffer.row_text(0), "e\u{301}    x");
    eprintln!("[TEST] PASS: Combining marks share a cell");
}
