#![allow(clippy::nursery)] // Test infra prioritizes clarity over pedantry
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry
#![allow(dead_code)] // Each test binary uses a subset

use std::sync::Once;

use opentui_textarea::{
    CellBuffer, ClipRect, EditCommand, LogLevel, TextArea, TextAreaConfig, WrapMode,
    set_log_callback,
};
use tracing::Level;

/// Route the engine's log sink into `tracing`, printed per test.
pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_test_writer()
            .try_init();
        set_log_callback(|level, message| match level {
            LogLevel::Debug => tracing::debug!(target: "opentui_textarea", "{message}"),
            LogLevel::Info => tracing::info!(target: "opentui_textarea", "{message}"),
            LogLevel::Warn => tracing::warn!(target: "opentui_textarea", "{message}"),
            LogLevel::Error => tracing::error!(target: "opentui_textarea", "{message}"),
        });
    });
}

/// Text area of the given viewport size.
pub fn area_with(text: &str, config: TextAreaConfig, width: usize, height: usize) -> TextArea {
    init_logging();
    let mut area = TextArea::new(text, config).expect("valid config");
    area.set_size(width, height);
    area
}

pub fn wrapped(text: &str, wrap: WrapMode, width: usize) -> TextArea {
    area_with(text, TextAreaConfig::default().with_wrap(wrap), width, 10)
}

/// Type text one char at a time, the way a terminal delivers keys.
pub fn type_str(area: &mut TextArea, text: &str) {
    for c in text.chars() {
        area.apply(EditCommand::Insert(c.to_string()));
    }
}

pub fn repeat(area: &mut TextArea, cmd: EditCommand, times: usize) {
    for _ in 0..times {
        area.apply(cmd.clone());
    }
}

pub const LEFT: EditCommand = EditCommand::Left {
    extend: false,
    word: false,
};
pub const RIGHT: EditCommand = EditCommand::Right {
    extend: false,
    word: false,
};

/// Draw into a fresh buffer and return its text, without trailing blank rows.
pub fn screen(area: &mut TextArea, width: u32, height: u32) -> String {
    let mut buffer = CellBuffer::new(width, height);
    area.draw(&mut buffer, ClipRect::new(0, 0, width, height));
    buffer.to_text().trim_end_matches('\n').to_string()
}
