/*
** This file is a part of Iksemel (XML parser for Jabber/XMPP)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksemel is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

/// Turns serialized XML into a document object of some XML library.
///
/// The writer only guarantees a string that a conforming parser accepts.
/// Implement this for the parser of your choice and pass it to
/// [`XmlWriter::get_document`](crate::XmlWriter::get_document).
pub trait DocumentLoader {
    type Document;
    type Error;

    fn load(&self, xml: &str) -> Result<Self::Document, Self::Error>;
}

impl<F, D, E> DocumentLoader for F
where
    F: Fn(&str) -> Result<D, E>,
{
    type Document = D;
    type Error = E;

    fn load(&self, xml: &str) -> Result<D, E> {
        self(xml)
    }
}
