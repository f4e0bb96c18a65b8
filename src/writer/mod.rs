/*
** This file is a part of Iksemel (XML parser for Jabber/XMPP)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksemel is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod loader;
mod options;

use tracing::debug;
use tracing::trace;
use tracing::warn;

use crate::document::Cursor;
use crate::document::DocumentError;
use crate::document::Formatter;
use crate::document::Node;
use crate::entities::cdata_section;
use crate::entities::comment;
use crate::entities::escape_attribute;
use crate::entities::escape_text;
pub use loader::DocumentLoader;
pub use options::Formatting;
pub use options::WriterOptions;

/// Builds an XML document through a sequence of write calls and
/// serializes it on [`flush`](XmlWriter::flush).
///
/// Writes go to the active element, which is the most recently started
/// element that has not been ended yet. Writes that need an element are
/// ignored while there is none.
///
/// ```
/// use iks_writer::{Formatting, XmlWriter};
///
/// let mut writer = XmlWriter::new();
/// writer.formatting = Formatting::None;
/// writer.write_start_element("message", None);
/// writer.write_attribute_string("to", "juliet@example.com");
/// writer.write_element_string("body", "Art thou not Romeo?", None);
/// writer.write_end_element();
/// assert_eq!(
///     writer.flush(),
///     concat!(
///         "<?xml version=\"1.0\" encoding=\"ISO-8859-1\" ?>",
///         "<message to=\"juliet@example.com\"><body>Art thou not Romeo?</body></message>",
///     )
/// );
/// ```
#[derive(Debug)]
pub struct XmlWriter {
    pub formatting: Formatting,
    pub indent_char: String,
    /// Number of `indent_char` repeats per nesting level.
    pub indentation: usize,
    /// Line separator of indented output.
    pub new_line: String,
    encoding: String,
    version: String,
    cursor: Cursor,
    standalone: Option<bool>,
    doctype: Option<String>,
}

impl XmlWriter {
    pub fn new() -> Self {
        XmlWriter::with_options(WriterOptions::default())
    }

    pub fn with_options(options: WriterOptions) -> Self {
        XmlWriter {
            formatting: options.formatting,
            indent_char: options.indent_char,
            indentation: options.indentation,
            new_line: options.new_line,
            encoding: options.encoding,
            version: options.version,
            cursor: Cursor::new(),
            standalone: None,
            doctype: None,
        }
    }

    //
    // Document lifecycle
    //

    /// Starts a new document, dropping whatever was written before.
    pub fn write_start_document(&mut self, standalone: Option<bool>) {
        self.close();
        self.standalone = standalone;
        debug!(?standalone, "document started");
    }

    /// Moves back to the root element, the tree is kept.
    pub fn write_end_document(&mut self) {
        self.cursor.end_document();
    }

    /// Sets the DOCTYPE body, emitted verbatim after the root name.
    pub fn write_doc_type(&mut self, doctype: &str) {
        self.doctype = Some(doctype.to_string());
    }

    /// Drops the tree. The writer can be reused after this, the doctype
    /// and the formatting settings are kept.
    pub fn close(&mut self) {
        if self.cursor.take().is_some() {
            debug!("document closed");
        }
    }

    //
    // Element methods
    //

    pub fn write_start_element(&mut self, name: &str, namespace: Option<&str>) {
        let node = Node::qualified(name, namespace);
        trace!(element = node.name(), depth = self.cursor.depth(), "start element");
        self.cursor.start_element(node);
    }

    /// Moves to the parent element. At the root this does nothing.
    pub fn write_end_element(&mut self) {
        self.cursor.end_element();
    }

    /// Undoes the last closed element of the active element.
    ///
    /// The call must follow a matching start and end pair, i.e.
    /// `start("x"); end(); delete()` leaves the tree as it was before
    /// the start. When there is nothing to undo the tree is left alone
    /// and an error is returned.
    pub fn delete_end_element(&mut self) -> Result<(), DocumentError> {
        match self.cursor.delete_last_element() {
            Ok(node) => {
                trace!(element = node.name(), "deleted element");
                Ok(())
            }
            Err(err) => {
                warn!(%err, "delete end element");
                Err(err)
            }
        }
    }

    /// Writes an element containing only the given text.
    pub fn write_element_string(&mut self, name: &str, text: &str, namespace: Option<&str>) {
        self.write_start_element(name, namespace);
        self.write_string(text);
        self.write_end_element();
    }

    //
    // Content methods
    //

    pub fn write_attribute_string(&mut self, name: &str, value: &str) {
        self.write_attribute(name, escape_attribute(value));
    }

    /// Writes an attribute value which is already escaped.
    pub fn write_raw_attribute_string(&mut self, name: &str, value: &str) {
        self.write_attribute(name, value.to_string());
    }

    pub fn write_string(&mut self, text: &str) {
        self.write_text(escape_text(text));
    }

    /// Writes markup as is, without escaping.
    pub fn write_xml(&mut self, xml: &str) {
        self.write_text(xml.to_string());
    }

    pub fn write_cdata(&mut self, text: &str) {
        self.write_text(cdata_section(text));
    }

    pub fn write_comment(&mut self, text: &str) {
        self.write_text(comment(text));
    }

    fn write_attribute(&mut self, name: &str, value: String) {
        match self.cursor.active_mut() {
            Some(active) => active.set_attribute(name, value),
            None => debug!(attribute = name, "attribute ignored, no active element"),
        }
    }

    fn write_text(&mut self, text: String) {
        match self.cursor.active_mut() {
            Some(active) => active.append_text(text),
            None => debug!("text ignored, no active element"),
        }
    }

    //
    // Output
    //

    /// Serializes the document.
    ///
    /// Open elements are closed implicitly, which only moves the write
    /// position back to the root. Without any element the result is just
    /// the XML declaration.
    pub fn flush(&mut self) -> String {
        if self.cursor.depth() > 0 {
            self.write_end_document();
        }

        let indented = self.formatting == Formatting::Indented;
        let chr = if indented {
            self.indent_char.repeat(self.indentation)
        } else {
            String::new()
        };

        let mut buffer = vec![self.declaration()];
        if let (Some(doctype), Some(root)) = (&self.doctype, self.cursor.root()) {
            buffer.push(format!("<!DOCTYPE {} {}>", root.name(), doctype));
        }
        if let Some(root) = self.cursor.root() {
            Formatter::new(&chr).format(root, "", &mut buffer);
        }

        let xml = buffer.join(if indented { self.new_line.as_str() } else { "" });
        debug!(bytes = xml.len(), "document flushed");
        xml
    }

    /// Flushes the document and hands the text to `loader`.
    pub fn get_document<L: DocumentLoader>(
        &mut self,
        loader: &L,
    ) -> Result<L::Document, L::Error> {
        let xml = self.flush();
        loader.load(&xml)
    }

    fn declaration(&self) -> String {
        let mut decl = format!(
            "<?xml version=\"{}\" encoding=\"{}\"",
            self.version, self.encoding
        );
        if let Some(standalone) = self.standalone {
            decl.push_str(if standalone {
                " standalone=\"yes\""
            } else {
                " standalone=\"no\""
            });
        }
        decl.push_str(" ?>");
        decl
    }

    //
    // Property methods
    //

    pub fn root(&self) -> Option<&Node> {
        self.cursor.root()
    }

    /// Nesting depth of the active element, zero at the root.
    pub fn depth(&self) -> usize {
        self.cursor.depth()
    }

    pub fn standalone(&self) -> Option<bool> {
        self.standalone
    }

    pub fn doctype(&self) -> Option<&str> {
        self.doctype.as_deref()
    }

    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
