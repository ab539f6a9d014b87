//! Styled message lines, written to any sink so the shell can be scripted

use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;
use std::io::{self, Write};

pub fn banner(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{} {}", Icons::BOOK, title.style(theme().title.clone()))
}

pub fn section(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "━{}━", title.style(theme().title.clone()))
}

pub fn success(out: &mut impl Write, label: &str) -> io::Result<()> {
    writeln!(out, "{} {}", Icons::CHECK, label.style(theme().done.clone()))
}

pub fn error(out: &mut impl Write, label: &str) -> io::Result<()> {
    writeln!(out, "{} {}", Icons::CROSS, label.style(theme().failure.clone()))
}

pub fn warn(out: &mut impl Write, label: &str) -> io::Result<()> {
    writeln!(out, "{} {}", Icons::WARN, label.style(theme().caution.clone()))
}

/// An expected, non-error outcome such as "already associated"
pub fn notice(out: &mut impl Write, label: &str) -> io::Result<()> {
    writeln!(out, "{} {}", Icons::INFO.style(theme().outcome.clone()), label)
}

pub fn info(out: &mut impl Write, label: &str, value: &str) -> io::Result<()> {
    writeln!(
        out,
        "{} {}: {}",
        Icons::INFO.style(theme().outcome.clone()),
        label.style(theme().label.clone()),
        value
    )
}
