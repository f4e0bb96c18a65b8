/*
** This file is a part of Iksemel (XML parser for Jabber/XMPP)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksemel is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod document;
mod entities;
mod writer;

pub use entities::cdata_section;
pub use entities::comment;
pub use entities::escape_attribute;
pub use entities::escape_attribute_into;
pub use entities::escape_text;
pub use entities::escape_text_into;
pub use entities::escaped_attribute_size;
pub use entities::escaped_text_size;

pub use document::Attributes;
pub use document::ChildNode;
pub use document::Cursor;
pub use document::DescendantOrSelf;
pub use document::DocumentError;
pub use document::Elements;
pub use document::Formatter;
pub use document::Node;

pub use writer::DocumentLoader;
pub use writer::Formatting;
pub use writer::WriterOptions;
pub use writer::XmlWriter;
