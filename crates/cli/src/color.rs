// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::builder::styling::{Ansi256Color, Color, Style, Styles};
use jw_core::{JobStatus, LogLevel};
use std::io::IsTerminal;

pub mod codes {
    /// Section headers: steel blue
    pub const HEADER: u8 = 74;
    /// Commands and literals: light grey
    pub const LITERAL: u8 = 250;
    /// Secondary text: darker grey
    pub const MUTED: u8 = 240;
    pub const GOOD: u8 = 114;
    pub const WARN: u8 = 179;
    pub const BAD: u8 = 167;
}

/// Determine if color output should be enabled.
///
/// Priority: `NO_COLOR=1` disables → `COLOR=1` forces → TTY check.
pub fn should_colorize() -> bool {
    if std::env::var("NO_COLOR").is_ok_and(|v| v == "1") {
        return false;
    }
    if std::env::var("COLOR").is_ok_and(|v| v == "1") {
        return true;
    }
    std::io::stdout().is_terminal()
}

/// Build clap `Styles` using the project palette.
pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    Styles::styled()
        .header(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::HEADER)))))
        .literal(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::LITERAL)))))
        .placeholder(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::MUTED)))))
}

const RESET: &str = "\x1b[0m";

fn paint(code: u8, text: &str) -> String {
    if should_colorize() {
        format!("\x1b[38;5;{code}m{text}{RESET}")
    } else {
        text.to_string()
    }
}

pub fn header(text: &str) -> String {
    paint(codes::HEADER, text)
}

pub fn muted(text: &str) -> String {
    paint(codes::MUTED, text)
}

/// Color a log level tag.
pub fn level(level: LogLevel) -> String {
    let text = format!("{:<7}", level.to_string());
    match level {
        LogLevel::Debug => muted(&text),
        LogLevel::Info => paint(codes::LITERAL, &text),
        LogLevel::Success => paint(codes::GOOD, &text),
        LogLevel::Warning => paint(codes::WARN, &text),
        LogLevel::Error => paint(codes::BAD, &text),
    }
}

pub fn status(status: JobStatus) -> String {
    let text = status.to_string();
    match status {
        JobStatus::Queued => muted(&text),
        JobStatus::Running => header(&text),
        JobStatus::Completed => paint(codes::GOOD, &text),
        JobStatus::Failed => paint(codes::BAD, &text),
        JobStatus::Cancelled => paint(codes::WARN, &text),
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
