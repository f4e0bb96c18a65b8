/*
** This file is a part of Iksemel (XML parser for Jabber/XMPP)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksemel is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use super::ChildNode;
use super::Node;

/// Renders a node and its subtree into output fragments.
///
/// Each fragment is one output line when the document is indented. The
/// caller joins them with its line separator, or with nothing when the
/// document is not indented, in which case the indentation strings are
/// empty as well.
pub struct Formatter<'a> {
    chr: &'a str,
}

impl<'a> Formatter<'a> {
    /// `chr` is the indentation added for every nesting level.
    pub fn new(chr: &'a str) -> Self {
        Formatter { chr }
    }

    pub fn format(&self, node: &Node, indent: &str, buffer: &mut Vec<String>) {
        let mut xml = String::with_capacity(indent.len() + start_tag_size(node) + 3);
        xml.push_str(indent);
        xml.push('<');
        xml.push_str(&node.name);
        for (name, value) in &node.attributes {
            xml.push(' ');
            xml.push_str(name);
            xml.push_str("=\"");
            xml.push_str(value);
            xml.push('"');
        }

        if node.children.is_empty() {
            xml.push_str(" />");
            buffer.push(xml);
            return;
        }
        xml.push('>');

        // A lone text child stays on the line of its element
        if let [ChildNode::Text(text)] = node.children.as_slice() {
            xml.push_str(text);
            push_end_tag(&mut xml, node);
            buffer.push(xml);
            return;
        }
        buffer.push(xml);

        let child_indent = format!("{}{}", indent, self.chr);
        for child in &node.children {
            match child {
                ChildNode::Text(text) => buffer.push(format!("{}{}", child_indent, text)),
                ChildNode::Element(element) => self.format(element, &child_indent, buffer),
            }
        }

        let mut end = String::with_capacity(indent.len() + node.name.len() + 3);
        end.push_str(indent);
        push_end_tag(&mut end, node);
        buffer.push(end);
    }
}

fn start_tag_size(node: &Node) -> usize {
    let mut size = 1 + node.name.len();
    for (name, value) in &node.attributes {
        size += 1; // space
        size += name.len();
        size += 2; // =" characters
        size += value.len();
        size += 1; // " character
    }
    size
}

fn push_end_tag(buf: &mut String, node: &Node) {
    buf.push_str("</");
    buf.push_str(&node.name);
    buf.push('>');
}
