//! Text area performance benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use opentui_textarea::{CellBuffer, ClipRect, EditCommand, TextArea, TextAreaConfig, WrapMode};
use std::hint::black_box;

fn paragraph(lines: usize) -> String {
    (0..lines)
        .map(|i| format!("line {i}: the quick brown fox jumps over the lazy dog 日本語"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn area(text: &str, wrap: WrapMode) -> TextArea {
    let config = TextAreaConfig::default().with_wrap(wrap);
    let mut area = TextArea::new(text, config).unwrap_or_default();
    area.set_size(40, 20);
    area
}

fn creation(c: &mut Criterion) {
    let text = paragraph(1_000);

    c.bench_function("textarea_new_1k_lines", |b| {
        b.iter(|| TextArea::with_text(black_box(&text)));
    });

    c.bench_function("textarea_text_1k_lines", |b| {
        let area = area(&text, WrapMode::Word);
        b.iter(|| black_box(&area).text());
    });
}

fn typing(c: &mut Criterion) {
    c.bench_function("textarea_type_1k_chars", |b| {
        b.iter_batched(
            || area("", WrapMode::Word),
            |mut area| {
                for i in 0..1_000 {
                    let ch = if i % 7 == 0 { " " } else { "x" };
                    area.apply(EditCommand::Insert(ch.to_string()));
                }
                area
            },
            BatchSize::SmallInput,
        );
    });

    let text = paragraph(1_000);
    c.bench_function("textarea_type_middle_of_1k_lines", |b| {
        b.iter_batched(
            || {
                let mut area = area(&text, WrapMode::Word);
                area.select(text.len() / 2, text.len() / 2);
                area
            },
            |mut area| {
                for _ in 0..100 {
                    area.apply(EditCommand::Insert("y".to_string()));
                }
                area
            },
            BatchSize::SmallInput,
        );
    });
}

fn layout(c: &mut Criterion) {
    let text = paragraph(1_000);

    for (name, wrap) in [
        ("textarea_layout_none", WrapMode::None),
        ("textarea_layout_char", WrapMode::Char),
        ("textarea_layout_word", WrapMode::Word),
    ] {
        c.bench_function(name, |b| {
            b.iter_batched(
                || area(&text, wrap),
                |mut area| {
                    area.apply(EditCommand::DocumentEnd { extend: false });
                    black_box(area.cursor_position())
                },
                BatchSize::SmallInput,
            );
        });
    }
}

fn motion(c: &mut Criterion) {
    let text = paragraph(200);
    let mut area = area(&text, WrapMode::Word);

    c.bench_function("textarea_cursor_down_up", |b| {
        b.iter(|| {
            area.apply(EditCommand::Down { extend: false });
            area.apply(EditCommand::Up { extend: false });
        });
    });

    c.bench_function("textarea_word_right_left", |b| {
        b.iter(|| {
            area.apply(EditCommand::Right {
                extend: false,
                word: true,
            });
            area.apply(EditCommand::Left {
                extend: false,
                word: true,
            });
        });
    });

    c.bench_function("textarea_page_down_up", |b| {
        b.iter(|| {
            area.apply(EditCommand::PageDown { extend: false });
            area.apply(EditCommand::PageUp { extend: false });
        });
    });
}

fn drawing(c: &mut Criterion) {
    let text = paragraph(200);
    let mut area = area(&text, WrapMode::Word);
    let mut buffer = CellBuffer::new(40, 20);

    c.bench_function("textarea_draw_40x20", |b| {
        b.iter(|| area.draw(black_box(&mut buffer), ClipRect::new(0, 0, 40, 20)));
    });

    area.apply(EditCommand::SelectAll);
    c.bench_function("textarea_draw_selected_40x20", |b| {
        b.iter(|| area.draw(black_box(&mut buffer), ClipRect::new(0, 0, 40, 20)));
    });
}

fn history(c: &mut Criterion) {
    c.bench_function("textarea_undo_redo_100_edits", |b| {
        b.iter_batched(
            || {
                let mut area = area(&paragraph(50), WrapMode::Word);
                for i in 0..100 {
                    area.replace_range(i * 3, i * 3 + 1, "ab");
                }
                area
            },
            |mut area| {
                while area.can_undo() {
                    area.apply(EditCommand::Undo);
                }
                while area.can_redo() {
                    area.apply(EditCommand::Redo);
                }
                area
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, creation, typing, layout, motion, drawing, history);
criterion_main!(benches);
