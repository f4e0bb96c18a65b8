/*
** This file is a part of Iksemel (XML parser for Jabber/XMPP)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksemel is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

pub mod predefined {
    pub const LT: &str = "&lt;";
    pub const GT: &str = "&gt;";
    pub const AMP: &str = "&amp;";
    pub const QUOT: &str = "&quot;";
}

pub mod whitespace {
    pub const TAB: &str = "&#9;";
    pub const LF: &str = "&#10;";
    pub const CR: &str = "&#13;";
}

const CDATA_START: &str = "<![CDATA[";
const CDATA_END: &str = "]]>";
const CDATA_SPLIT: &str = "]]]]><![CDATA[>";

fn text_entity(c: char) -> Option<&'static str> {
    match c {
        '<' => Some(predefined::LT),
        '>' => Some(predefined::GT),
        '&' => Some(predefined::AMP),
        '"' => Some(predefined::QUOT),
        _ => None,
    }
}

fn attribute_entity(c: char) -> Option<&'static str> {
    match c {
        '\t' => Some(whitespace::TAB),
        '\n' => Some(whitespace::LF),
        '\r' => Some(whitespace::CR),
        _ => text_entity(c),
    }
}

fn size_with(s: &str, entity: fn(char) -> Option<&'static str>) -> usize {
    s.chars()
        .map(|c| match entity(c) {
            Some(reference) => reference.len(),
            None => c.len_utf8(),
        })
        .sum()
}

fn escape_with(s: &str, buf: &mut String, entity: fn(char) -> Option<&'static str>) {
    let mut start = 0;
    for (i, c) in s.char_indices() {
        if let Some(reference) = entity(c) {
            buf.push_str(&s[start..i]);
            buf.push_str(reference);
            start = i + c.len_utf8();
        }
    }
    buf.push_str(&s[start..]);
}

/// Size in bytes of `s` after [`escape_text`].
pub fn escaped_text_size(s: &str) -> usize {
    size_with(s, text_entity)
}

/// Size in bytes of `s` after [`escape_attribute`].
pub fn escaped_attribute_size(s: &str) -> usize {
    size_with(s, attribute_entity)
}

pub fn escape_text_into(s: &str, buf: &mut String) {
    escape_with(s, buf, text_entity);
}

pub fn escape_attribute_into(s: &str, buf: &mut String) {
    escape_with(s, buf, attribute_entity);
}

/// Escapes the markup characters `&`, `<`, `>` and `"` of character data.
pub fn escape_text(s: &str) -> String {
    let mut buf = String::with_capacity(escaped_text_size(s));
    escape_text_into(s, &mut buf);
    buf
}

/// Escapes an attribute value.
///
/// On top of the character data escapes, tab, newline and carriage return
/// are written as numeric character references. A parser normalizes
/// literal whitespace in attribute values to spaces, references survive
/// that normalization.
pub fn escape_attribute(s: &str) -> String {
    let mut buf = String::with_capacity(escaped_attribute_size(s));
    escape_attribute_into(s, &mut buf);
    buf
}

/// Wraps `text` into a CDATA section.
///
/// Any `]]>` inside the text is split across two adjacent sections so it
/// cannot terminate the section early.
pub fn cdata_section(text: &str) -> String {
    let body = text.replace(CDATA_END, CDATA_SPLIT);
    let mut buf = String::with_capacity(CDATA_START.len() + body.len() + CDATA_END.len());
    buf.push_str(CDATA_START);
    buf.push_str(&body);
    buf.push_str(CDATA_END);
    buf
}

pub fn comment(text: &str) -> String {
    format!("<!-- {} -->", text)
}
