//! Fuzz target for text area command sequences.
//!
//! Drives the editor with arbitrary commands and checks that the cached
//! length matches the chain and that drawing never panics.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use opentui_textarea::{CellBuffer, ClipRect, EditCommand, TextArea, TextAreaConfig, WrapMode};

#[derive(Arbitrary, Debug)]
struct Session {
    text: String,
    wrap: u8,
    width: u8,
    height: u8,
    commands: Vec<Command>,
}

#[derive(Arbitrary, Debug)]
enum Command {
    Insert(String),
    Paste(String),
    Newline,
    Tab,
    Backspace,
    Delete,
    DeleteWordBack,
    KillToLineEnd,
    KillLine,
    Left { extend: bool, word: bool },
    Right { extend: bool, word: bool },
    Up { extend: bool },
    Down { extend: bool },
    Home { extend: bool },
    End { extend: bool },
    PageUp { extend: bool },
    PageDown { extend: bool },
    DocumentStart { extend: bool },
    DocumentEnd { extend: bool },
    SelectAll,
    Copy,
    Cut,
    PasteClipboard,
    Undo,
    Redo,
    Click { x: u8, y: u8, extend: bool },
    Drag { x: u8, y: u8 },
    SelectWord { x: u8, y: u8 },
    Scroll(u8),
    Replace { start: u16, end: u16, text: String },
}

impl Command {
    fn into_edit(self) -> Option<EditCommand> {
        Some(match self {
            Self::Insert(s) => EditCommand::Insert(s),
            Self::Paste(s) => EditCommand::PasteText(s),
            Self::Newline => EditCommand::Newline,
            Self::Tab => EditCommand::Tab,
            Self::Backspace => EditCommand::Backspace,
            Self::Delete => EditCommand::Delete,
            Self::DeleteWordBack => EditCommand::DeleteWordBack,
            Self::KillToLineEnd => EditCommand::KillToLineEnd,
            Self::KillLine => EditCommand::KillLine,
            Self::Left { extend, word } => EditCommand::Left { extend, word },
            Self::Right { extend, word } => EditCommand::Right { extend, word },
            Self::Up { extend } => EditCommand::Up { extend },
            Self::Down { extend } => EditCommand::Down { extend },
            Self::Home { extend } => EditCommand::Home { extend },
            Self::End { extend } => EditCommand::End { extend },
            Self::PageUp { extend } => EditCommand::PageUp { extend },
            Self::PageDown { extend } => EditCommand::PageDown { extend },
            Self::DocumentStart { extend } => EditCommand::DocumentStart { extend },
            Self::DocumentEnd { extend } => EditCommand::DocumentEnd { extend },
            Self::SelectAll => EditCommand::SelectAll,
            Self::Copy => EditCommand::Copy,
            Self::Cut => EditCommand::Cut,
            Self::PasteClipboard => EditCommand::Paste,
            Self::Undo => EditCommand::Undo,
            Self::Redo => EditCommand::Redo,
            Self::Click { x, y, extend } => EditCommand::Click {
                x: u32::from(x),
                y: u32::from(y),
                extend,
            },
            Self::Drag { x, y } => EditCommand::Drag {
                x: u32::from(x),
                y: u32::from(y),
            },
            Self::SelectWord { x, y } => EditCommand::SelectWord {
                x: u32::from(x),
                y: u32::from(y),
            },
            Self::Scroll(dir) => match dir % 4 {
                0 => EditCommand::ScrollUp,
                1 => EditCommand::ScrollDown,
                2 => EditCommand::ScrollLeft,
                _ => EditCommand::ScrollRight,
            },
            Self::Replace { .. } => return None,
        })
    }
}

fuzz_target!(|session: Session| {
    let wrap = match session.wrap % 3 {
        0 => WrapMode::None,
        1 => WrapMode::Char,
        _ => WrapMode::Word,
    };
    let width = u32::from(session.width % 40) + 1;
    let height = u32::from(session.height % 12) + 1;
    let Ok(mut area) = TextArea::new(&session.text, TextAreaConfig::default().with_wrap(wrap))
    else {
        return;
    };
    area.set_size(width as usize, height as usize);

    for command in session.commands.into_iter().take(256) {
        match command {
            Command::Replace { start, end, text } => {
                area.replace_range(usize::from(start), usize::from(end), &text);
            }
            other => {
                if let Some(cmd) = other.into_edit() {
                    area.apply(cmd);
                }
            }
        }
        assert_eq!(area.chain().checked_length(), area.len());
    }

    let mut buffer = CellBuffer::new(width + 2, height + 2);
    area.draw(&mut buffer, ClipRect::new(1, 1, width, height));
    let _ = area.visual_lines();
    let _ = area.selection_range();
});
