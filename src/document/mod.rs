/*
** This file is a part of Iksemel (XML parser for Jabber/XMPP)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksemel is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod cursor;
mod error;
mod format;
mod iterators;

use std::fmt::Display;

pub use cursor::Cursor;
pub(crate) use error::description;
pub use error::DocumentError;
pub use format::Formatter;
pub use iterators::Attributes;
pub use iterators::DescendantOrSelf;
pub use iterators::Elements;

/// A child of an element, in document order.
///
/// Text is stored in its final form. It has been escaped (or was given as
/// raw markup) when it was written and is never escaped again.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ChildNode {
    Text(String),
    Element(Node),
}

/// One XML element with its attributes and children.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Node {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<ChildNode>,
}

impl Node {
    pub fn new(name: &str) -> Node {
        Node {
            name: name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates a node named `namespace:name`. Only the prefix is
    /// attached, no namespace binding takes place.
    pub fn qualified(name: &str, namespace: Option<&str>) -> Node {
        match namespace {
            Some(prefix) => Node::new(&format!("{}:{}", prefix, name)),
            None => Node::new(name),
        }
    }

    //
    // Edit methods
    //

    /// Stores an already escaped attribute value. An existing attribute
    /// keeps its position and gets the new value.
    pub fn set_attribute(&mut self, name: &str, value: String) {
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, old)) => *old = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    pub fn append_text(&mut self, text: String) {
        self.children.push(ChildNode::Text(text));
    }

    /// Appends an element child and returns its index in the children.
    pub fn append_element(&mut self, node: Node) -> usize {
        self.children.push(ChildNode::Element(node));
        self.children.len() - 1
    }

    /// Removes the last child if it is an element.
    pub fn remove_last_element(&mut self) -> Option<Node> {
        if !matches!(self.children.last(), Some(ChildNode::Element(_))) {
            return None;
        }
        match self.children.pop() {
            Some(ChildNode::Element(node)) => Some(node),
            _ => None,
        }
    }

    pub(crate) fn child_element_mut(&mut self, index: usize) -> Option<&mut Node> {
        match self.children.get_mut(index) {
            Some(ChildNode::Element(node)) => Some(node),
            _ => None,
        }
    }

    pub(crate) fn child_element(&self, index: usize) -> Option<&Node> {
        match self.children.get(index) {
            Some(ChildNode::Element(node)) => Some(node),
            _ => None,
        }
    }

    //
    // Node property methods
    //

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn children(&self) -> &[ChildNode] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    //
    // Iterator methods
    //

    pub fn attributes(&self) -> Attributes<'_> {
        Attributes::new(self)
    }

    pub fn elements(&self) -> Elements<'_> {
        Elements::new(self)
    }

    pub fn descendant_or_self(&self) -> DescendantOrSelf<'_> {
        DescendantOrSelf::new(self)
    }
}

/// Renders the subtree without indentation or line breaks.
impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut fragments = Vec::new();
        Formatter::new("").format(self, "", &mut fragments);
        for fragment in &fragments {
            f.write_str(fragment)?;
        }
        Ok(())
    }
}


mod nocompile;
