/*
** This file is a part of Iksemel (XML parser for Jabber/XMPP)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksemel is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::slice::Iter;

use super::ChildNode;
use super::Node;

pub struct Attributes<'a> {
    inner: Iter<'a, (String, String)>,
}

impl<'a> Attributes<'a> {
    pub(super) fn new(node: &'a Node) -> Self {
        Attributes {
            inner: node.attributes.iter(),
        }
    }
}

impl<'a> Iterator for Attributes<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Element children of a node, text children are skipped.
pub struct Elements<'a> {
    inner: Iter<'a, ChildNode>,
}

impl<'a> Elements<'a> {
    pub(super) fn new(node: &'a Node) -> Self {
        Elements {
            inner: node.children.iter(),
        }
    }
}

impl<'a> Iterator for Elements<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        for child in self.inner.by_ref() {
            if let ChildNode::Element(node) = child {
                return Some(node);
            }
        }
        None
    }
}

/// Depth first, pre-order walk over a node and all of its element
/// descendants. Yields each node with its depth relative to the start.
pub struct DescendantOrSelf<'a> {
    pending: Vec<(&'a Node, usize)>,
}

impl<'a> DescendantOrSelf<'a> {
    pub(super) fn new(node: &'a Node) -> Self {
        DescendantOrSelf {
            pending: vec![(node, 0)],
        }
    }
}

impl<'a> Iterator for DescendantOrSelf<'a> {
    type Item = (&'a Node, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, level) = self.pending.pop()?;
        let start = self.pending.len();
        self.pending
            .extend(node.elements().map(|child| (child, level + 1)));
        // First child must be popped first
        self.pending[start..].reverse();
        Some((node, level))
    }
}
