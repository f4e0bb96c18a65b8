/*
** This file is a part of Iksemel (XML parser for Jabber/XMPP)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksemel is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use quick_xml::Reader;
use quick_xml::events::Event;

use super::*;

const DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"ISO-8859-1\" ?>";

fn compact() -> XmlWriter {
    let mut writer = XmlWriter::new();
    writer.formatting = Formatting::None;
    writer
}

/// Element names in document order, fails on malformed XML.
fn parse_names(xml: &str) -> Result<Vec<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().check_end_names = true;
    let mut names = Vec::new();
    let mut depth = 0usize;
    loop {
        match reader.read_event()? {
            Event::Start(tag) => {
                depth += 1;
                names.push(String::from_utf8_lossy(tag.name().as_ref()).into_owned());
            }
            Event::Empty(tag) => {
                names.push(String::from_utf8_lossy(tag.name().as_ref()).into_owned());
            }
            Event::End(_) => depth -= 1,
            Event::Eof => break,
            _ => {}
        }
    }
    assert_eq!(depth, 0);
    Ok(names)
}

/// Concatenated character data of the whole document.
fn parse_text(xml: &str) -> String {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    loop {
        match reader.read_event().unwrap() {
            Event::Text(t) => text.push_str(&t.unescape().unwrap()),
            Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c)),
            Event::Eof => break,
            _ => {}
        }
    }
    text
}

#[test]
fn escaped_compact_document() {
    let mut writer = compact();
    writer.write_start_element("root", None);
    writer.write_attribute_string("a", "1&2");
    writer.write_start_element("child", None);
    writer.write_string("hi<>");
    writer.write_end_element();
    writer.write_end_element();
    assert_eq!(
        writer.flush(),
        format!(
            "{}<root a=\"1&amp;2\"><child>hi&lt;&gt;</child></root>",
            DECLARATION
        )
    );
}

#[test]
fn indented_document() {
    let mut writer = XmlWriter::new();
    writer.write_start_element("root", None);
    writer.write_attribute_string("a", "1&2");
    writer.write_start_element("child", None);
    writer.write_string("hi<>");
    writer.write_end_element();
    writer.write_start_element("empty", None);
    writer.write_end_element();
    writer.write_end_element();
    assert_eq!(
        writer.flush(),
        [
            DECLARATION,
            "<root a=\"1&amp;2\">",
            "\t<child>hi&lt;&gt;</child>",
            "\t<empty />",
            "</root>",
        ]
        .join("\n")
    );
}

#[test]
fn indentation_settings() {
    let mut writer = XmlWriter::new();
    writer.indent_char = " ".to_string();
    writer.indentation = 3;
    writer.new_line = "\r\n".to_string();
    writer.write_start_element("a", None);
    writer.write_string("text");
    writer.write_start_element("b", None);
    writer.write_element_string("c", "deep", None);
    assert_eq!(
        writer.flush(),
        [
            DECLARATION,
            "<a>",
            "   text",
            "   <b>",
            "      <c>deep</c>",
            "   </b>",
            "</a>",
        ]
        .join("\r\n")
    );
}

#[test]
fn unknown_formatting_is_compact() {
    let mut writer = XmlWriter::new();
    writer.formatting = "pretty".parse().unwrap();
    writer.write_start_element("a", None);
    writer.write_element_string("b", "c", None);
    assert_eq!(writer.flush(), format!("{}<a><b>c</b></a>", DECLARATION));

    assert_eq!(Formatting::from("INDENTED"), Formatting::Indented);
    assert_eq!(Formatting::from("Indented"), Formatting::Indented);
    assert_eq!(Formatting::from(""), Formatting::None);
}

#[test]
fn element_string_shortcut() {
    let mut shortcut = XmlWriter::new();
    shortcut.write_start_element("r", None);
    shortcut.write_element_string("n", "t", None);
    shortcut.write_element_string("m", "u", Some("ns"));

    let mut longhand = XmlWriter::new();
    longhand.write_start_element("r", None);
    longhand.write_start_element("n", None);
    longhand.write_string("t");
    longhand.write_end_element();
    longhand.write_start_element("m", Some("ns"));
    longhand.write_string("u");
    longhand.write_end_element();

    assert_eq!(shortcut.root(), longhand.root());
    assert_eq!(shortcut.depth(), longhand.depth());
    assert_eq!(shortcut.flush(), longhand.flush());
}

#[test]
fn empty_document() {
    let mut writer = XmlWriter::new();
    assert_eq!(writer.flush(), DECLARATION);

    writer.write_doc_type("SYSTEM \"x.dtd\"");
    writer.write_string("ignored");
    writer.write_attribute_string("ignored", "1");
    writer.write_end_element();
    assert_eq!(writer.flush(), DECLARATION);
    assert!(writer.root().is_none());
}

#[test]
fn standalone_declaration() {
    let mut writer = XmlWriter::new();
    writer.write_start_document(Some(true));
    writer.write_start_element("a", None);
    assert_eq!(
        writer.flush(),
        "<?xml version=\"1.0\" encoding=\"ISO-8859-1\" standalone=\"yes\" ?>\n<a />"
    );

    writer.write_start_document(Some(false));
    assert_eq!(
        writer.flush(),
        "<?xml version=\"1.0\" encoding=\"ISO-8859-1\" standalone=\"no\" ?>"
    );

    writer.write_start_document(None);
    assert_eq!(writer.standalone(), None);
    assert_eq!(writer.flush(), DECLARATION);
}

#[test]
fn options() {
    let options = WriterOptions::default().encoding("UTF-8").version("1.1");
    let mut writer = XmlWriter::with_options(options);
    assert_eq!(writer.encoding(), "UTF-8");
    assert_eq!(writer.version(), "1.1");
    assert_eq!(writer.flush(), "<?xml version=\"1.1\" encoding=\"UTF-8\" ?>");

    let defaults = WriterOptions::default();
    assert_eq!(defaults.encoding, "ISO-8859-1");
    assert_eq!(defaults.version, "1.0");
    assert_eq!(defaults.formatting, Formatting::Indented);
    assert_eq!(defaults.indent_char, "\t");
    assert_eq!(defaults.indentation, 1);
    assert_eq!(defaults.new_line, "\n");
}

#[test]
fn doctype() {
    let mut writer = XmlWriter::new();
    writer.write_doc_type("PUBLIC \"-//W3C//DTD XHTML 1.0 Strict//EN\" \"xhtml1-strict.dtd\"");
    writer.write_start_element("html", None);
    assert_eq!(
        writer.flush(),
        [
            DECLARATION,
            "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Strict//EN\" \"xhtml1-strict.dtd\">",
            "<html />",
        ]
        .join("\n")
    );

    // Doctype survives a new document
    writer.write_start_document(None);
    writer.write_start_element("body", None);
    assert_eq!(writer.doctype().map(|d| d.starts_with("PUBLIC")), Some(true));
    assert!(writer.flush().contains("<!DOCTYPE body PUBLIC"));
}

#[test]
fn namespaces() {
    let mut writer = compact();
    writer.write_start_element("stream", Some("stream"));
    writer.write_attribute_string("xmlns:stream", "http://etherx.jabber.org/streams");
    writer.write_element_string("features", "", Some("stream"));
    assert_eq!(
        writer.flush(),
        format!(
            "{}<stream:stream xmlns:stream=\"http://etherx.jabber.org/streams\"><stream:features></stream:features></stream:stream>",
            DECLARATION
        )
    );
}

#[test]
fn attributes() {
    let mut writer = compact();
    writer.write_start_element("a", None);
    writer.write_attribute_string("x", "line\none\ttab");
    writer.write_raw_attribute_string("y", "&amp;already");
    writer.write_attribute_string("z", "1");
    writer.write_attribute_string("x", "second");
    assert_eq!(
        writer.flush(),
        format!("{}<a x=\"second\" y=\"&amp;already\" z=\"1\" />", DECLARATION)
    );

    let mut writer = compact();
    writer.write_start_element("a", None);
    writer.write_attribute_string("v", "\t<\"x\">\r\n&");
    let xml = writer.flush();
    let mut reader = Reader::from_str(&xml);
    loop {
        match reader.read_event().unwrap() {
            Event::Empty(tag) => {
                let attr = tag.try_get_attribute("v").unwrap().unwrap();
                assert_eq!(attr.unescape_value().unwrap(), "\t<\"x\">\r\n&");
                break;
            }
            Event::Eof => panic!("element not found"),
            _ => {}
        }
    }
}

#[test]
fn raw_and_escaped_text() {
    let mut writer = compact();
    writer.write_start_element("p", None);
    writer.write_string("a & b ");
    writer.write_xml("<b>bold</b>");
    writer.write_comment("note");
    assert_eq!(
        writer.flush(),
        format!("{}<p>a &amp; b <b>bold</b><!-- note --></p>", DECLARATION)
    );
}

#[test]
fn mixed_content_indented() {
    let mut writer = XmlWriter::new();
    writer.write_start_element("p", None);
    writer.write_string("one");
    writer.write_element_string("b", "two", None);
    writer.write_string("three");
    assert_eq!(
        writer.flush(),
        [DECLARATION, "<p>", "\tone", "\t<b>two</b>", "\tthree", "</p>"].join("\n")
    );
}

#[test]
fn cdata() {
    let mut writer = compact();
    writer.write_start_element("code", None);
    writer.write_cdata("if (a < b && c) x = \"]]>\";");
    let xml = writer.flush();
    assert!(xml.contains("<![CDATA[if (a < b && c) x = \"]]]]><![CDATA[>\";]]>"));
    assert_eq!(parse_text(&xml), "if (a < b && c) x = \"]]>\";");

    let mut writer = compact();
    writer.write_start_element("c", None);
    writer.write_cdata("a]]>b");
    assert_eq!(parse_text(&writer.flush()), "a]]>b");
}

#[test]
fn end_element_stays_at_root() {
    let mut writer = compact();
    writer.write_start_element("root", None);
    writer.write_end_element();
    writer.write_end_element();
    writer.write_end_element();
    assert_eq!(writer.depth(), 0);
    writer.write_element_string("child", "x", None);
    assert_eq!(
        writer.flush(),
        format!("{}<root><child>x</child></root>", DECLARATION)
    );
}

#[test]
fn flush_closes_open_elements() {
    let mut writer = compact();
    writer.write_start_element("a", None);
    writer.write_start_element("b", None);
    writer.write_start_element("c", None);
    assert_eq!(writer.depth(), 2);
    let xml = writer.flush();
    assert_eq!(xml, format!("{}<a><b><c /></b></a>", DECLARATION));
    assert_eq!(writer.depth(), 0);

    // Writing continues at the root
    writer.write_element_string("d", "", None);
    assert_eq!(
        writer.flush(),
        format!("{}<a><b><c /></b><d></d></a>", DECLARATION)
    );
}

#[test]
fn delete_end_element() {
    let mut writer = compact();
    writer.write_start_element("r", None);
    writer.write_element_string("keep", "1", None);
    let before = writer.flush();
    let depth = writer.depth();

    writer.write_start_element("x", None);
    writer.write_end_element();
    writer.delete_end_element().unwrap();
    assert_eq!(writer.flush(), before);
    assert_eq!(writer.depth(), depth);

    writer.write_start_element("y", None);
    writer.write_attribute_string("k", "v");
    writer.write_element_string("z", "deep", None);
    writer.write_end_element();
    writer.delete_end_element().unwrap();
    assert_eq!(writer.flush(), before);
}

#[test]
fn delete_end_element_precondition() {
    let mut writer = compact();
    assert!(matches!(
        writer.delete_end_element(),
        Err(DocumentError::PreconditionViolation(_))
    ));

    writer.write_start_element("r", None);
    writer.write_string("text");
    let before = writer.flush();
    assert!(writer.delete_end_element().is_err());
    assert_eq!(writer.flush(), before);

    // Still open element has nothing to undo
    writer.write_start_element("open", None);
    assert!(writer.delete_end_element().is_err());
    assert_eq!(writer.depth(), 1);
}

#[test]
fn close_and_reuse() {
    let mut writer = compact();
    writer.write_start_element("first", None);
    writer.write_string("x");
    writer.close();
    assert!(writer.root().is_none());
    assert_eq!(writer.depth(), 0);
    writer.write_string("ignored");
    assert_eq!(writer.flush(), DECLARATION);

    writer.write_start_document(None);
    writer.write_element_string("second", "y", None);
    assert_eq!(writer.flush(), format!("{}<second>y</second>", DECLARATION));

    // Start document drops the old tree too
    writer.write_start_document(None);
    assert_eq!(writer.flush(), DECLARATION);
}

#[test]
fn well_formed_output() {
    for formatting in [Formatting::Indented, Formatting::None] {
        let mut writer = XmlWriter::new();
        writer.formatting = formatting;
        writer.write_start_document(Some(true));
        writer.write_start_element("library", Some("lib"));
        for i in 0..3 {
            writer.write_start_element("book", None);
            writer.write_attribute_string("id", &i.to_string());
            writer.write_element_string("title", "Tom & \"Jerry\" <3", None);
            writer.write_start_element("authors", None);
            writer.write_element_string("author", "A", None);
            writer.write_start_element("author", None);
            writer.write_end_element();
            writer.write_end_element();
            writer.write_comment("end of book");
            writer.write_end_element();
        }
        let xml = writer.flush();
        let names = parse_names(&xml).unwrap();
        assert_eq!(names.len(), 1 + 3 * 5);
        assert_eq!(names[0], "lib:library");
        assert_eq!(&names[1..6], ["book", "title", "authors", "author", "author"]);

        let root = writer.root().unwrap();
        assert_eq!(root.descendant_or_self().count(), names.len());
    }
}

#[test]
fn get_document() {
    let mut writer = XmlWriter::new();
    writer.write_start_element("a", None);
    writer.write_element_string("b", "1", None);
    writer.write_element_string("c", "2", None);

    let names = writer.get_document(&|xml: &str| parse_names(xml)).unwrap();
    assert_eq!(names, ["a", "b", "c"]);

    let failing = |_: &str| -> Result<(), &'static str> { Err("no parser") };
    assert_eq!(writer.get_document(&failing), Err("no parser"));
}

#[cfg(feature = "serde")]
#[test]
fn options_from_toml() {
    let options: WriterOptions = toml::from_str(
        r#"
            encoding = "UTF-8"
            formatting = "none"
            indent-char = " "
            indentation = 2
        "#,
    )
    .unwrap();
    assert_eq!(options.encoding, "UTF-8");
    assert_eq!(options.version, "1.0");
    assert_eq!(options.formatting, Formatting::None);
    assert_eq!(options.indent_char, " ");
    assert_eq!(options.indentation, 2);
    assert_eq!(options.new_line, "\n");

    let options: WriterOptions = toml::from_str("formatting = \"Indented\"").unwrap();
    assert_eq!(options, WriterOptions::default());
}
