/*
** This file is a part of Iksemel (XML parser for Jabber/XMPP)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksemel is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

/// # Must not compile tests
///
/// Root reference cannot be held across a write:
/// ```compile_fail
/// use iks_writer::XmlWriter;
/// let mut writer = XmlWriter::new();
/// writer.write_start_element("a", None);
/// let root = writer.root();
/// writer.write_string("text");
/// println!("{:?}", root);
/// ```
///
/// Root reference cannot outlive a close:
/// ```compile_fail
/// use iks_writer::XmlWriter;
/// let mut writer = XmlWriter::new();
/// writer.write_start_element("a", None);
/// let root = writer.root();
/// writer.close();
/// println!("{:?}", root);
/// ```
///
/// Node references cannot outlive the writer:
/// ```compile_fail
/// use iks_writer::Node;
/// use iks_writer::XmlWriter;
/// let node: &Node;
/// {
///     let mut writer = XmlWriter::new();
///     writer.write_element_string("a", "b", None);
///     node = writer.root().unwrap();
/// }
/// println!("{}", node);
/// ```
///
#[cfg(doctest)]
struct MustNotCompileTests;
