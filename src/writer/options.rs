/*
** This file is a part of Iksemel (XML parser for Jabber/XMPP)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksemel is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::convert::Infallible;
use std::str::FromStr;

pub const DEFAULT_ENCODING: &str = "ISO-8859-1";
pub const DEFAULT_VERSION: &str = "1.0";
pub const DEFAULT_INDENT_CHAR: &str = "\t";
pub const DEFAULT_NEW_LINE: &str = "\n";

/// Output layout of a flushed document.
#[derive(Debug, Default, Eq, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String"))]
pub enum Formatting {
    /// One element per line, nested elements indented.
    #[default]
    Indented,
    /// Everything on a single line.
    None,
}

/// Parsing never fails, anything but `indented` (in any letter case)
/// means no formatting.
impl FromStr for Formatting {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Formatting::from(s))
    }
}

impl From<&str> for Formatting {
    fn from(s: &str) -> Self {
        if s.eq_ignore_ascii_case("indented") {
            Formatting::Indented
        } else {
            Formatting::None
        }
    }
}

impl From<String> for Formatting {
    fn from(s: String) -> Self {
        Formatting::from(s.as_str())
    }
}

#[derive(Debug, Eq, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct WriterOptions {
    /// Encoding name put into the XML declaration. Output is always a
    /// Rust string, no transcoding happens.
    pub encoding: String,
    pub version: String,
    pub formatting: Formatting,
    pub indent_char: String,
    /// Number of `indent_char` repeats per nesting level.
    pub indentation: usize,
    pub new_line: String,
}

impl Default for WriterOptions {
    fn default() -> Self {
        WriterOptions {
            encoding: DEFAULT_ENCODING.to_string(),
            version: DEFAULT_VERSION.to_string(),
            formatting: Formatting::Indented,
            indent_char: DEFAULT_INDENT_CHAR.to_string(),
            indentation: 1,
            new_line: DEFAULT_NEW_LINE.to_string(),
        }
    }
}

impl WriterOptions {
    pub fn encoding(mut self, encoding: &str) -> Self {
        self.encoding = encoding.to_string();
        self
    }

    pub fn version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }
}
