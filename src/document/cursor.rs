/*
** This file is a part of Iksemel (XML parser for Jabber/XMPP)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksemel is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use super::DocumentError;
use super::Node;
use super::description;

/// Write position inside a tree that is being built.
///
/// The cursor owns the tree. The active node is addressed by the child
/// indices leading to it from the root, one index per open ancestor, so
/// the path length is the depth of the active node. There is an active
/// node exactly when there is a root.
#[derive(Debug, Default)]
pub struct Cursor {
    root: Option<Node>,
    path: Vec<usize>,
}

impl Cursor {
    pub fn new() -> Self {
        Cursor::default()
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub fn active(&self) -> Option<&Node> {
        let mut node = self.root.as_ref()?;
        for &index in &self.path {
            node = node.child_element(index)?;
        }
        Some(node)
    }

    pub fn active_mut(&mut self) -> Option<&mut Node> {
        let mut node = self.root.as_mut()?;
        for &index in &self.path {
            node = node.child_element_mut(index)?;
        }
        Some(node)
    }

    /// Adds `node` as the last child of the active node and makes it
    /// active. Without an active node it becomes the root.
    pub fn start_element(&mut self, node: Node) {
        match self.active_mut() {
            Some(active) => {
                let index = active.append_element(node);
                self.path.push(index);
            }
            None => {
                self.root = Some(node);
                self.path.clear();
            }
        }
    }

    /// Moves to the parent of the active node. Stays on the root.
    pub fn end_element(&mut self) {
        self.path.pop();
    }

    /// Moves back to the root.
    pub fn end_document(&mut self) {
        self.path.clear();
    }

    /// Removes the element most recently closed under the active node.
    ///
    /// Fails without touching the tree when there is no active node, or
    /// when the last child of the active node is not an element.
    pub fn delete_last_element(&mut self) -> Result<Node, DocumentError> {
        let active = self.active_mut().ok_or(DocumentError::PreconditionViolation(
            description::NO_ACTIVE_ELEMENT,
        ))?;
        active
            .remove_last_element()
            .ok_or(DocumentError::PreconditionViolation(
                description::NO_CHILD_ELEMENT,
            ))
    }

    /// Drops the position and hands out the tree, leaving an empty cursor.
    pub fn take(&mut self) -> Option<Node> {
        self.path.clear();
        self.root.take()
    }
}
