/*
** This file is a part of Iksemel (XML parser for Jabber/XMPP)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksemel is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::env;
use std::fs::File;
use std::io::Read;
use std::io::stdin;
use std::process::ExitCode;

use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use iks_writer::DocumentError;
use iks_writer::Formatting;
use iks_writer::WriterOptions;
use iks_writer::XmlWriter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_version() {
    println!("ikswrite (iksemel) v{}", VERSION);
}

fn print_usage() {
    println!(concat!(
        "Usage: ikswrite [OPTIONS]\n",
        "This tool builds an XML document from a script of writer commands.\n",
        "Commands, one per line:\n",
        "  start-document [yes|no]  end-document  doctype TEXT\n",
        "  start NAME [PREFIX]      end           delete\n",
        "  attr NAME VALUE          raw-attr NAME VALUE\n",
        "  text TEXT  xml TEXT  element NAME TEXT  cdata TEXT  comment TEXT\n",
        "Options:\n",
        "  -f, --file <FILE>      Read the script from a file instead of stdin\n",
        "  -c, --compact          Write the document on a single line\n",
        "  -e, --encoding <NAME>  Encoding name for the XML declaration\n",
        "  -i, --indent <N>       Tabs per nesting level (default: 1)\n",
        "  -s, --stat             Print element statistics to stderr\n",
        "  -h, --help             Display this help message and exit\n",
        "  -v, --version          Display the version and exit\n",
        "Report issues at https://github.com/meduketto/iksemel-rust/issues"
    ));
}

#[derive(Debug, Error)]
enum IkswriteError {
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Error: line {line}: {message}")]
    Script { line: usize, message: &'static str },
    #[error("Error: line {line}: {err}")]
    DocumentError { line: usize, err: DocumentError },
}

#[derive(Debug, Eq, PartialEq)]
enum Command {
    StartDocument(Option<bool>),
    EndDocument,
    DocType(String),
    Start(String, Option<String>),
    End,
    Delete,
    Attribute(String, String),
    RawAttribute(String, String),
    Text(String),
    Xml(String),
    Element(String, String),
    CData(String),
    Comment(String),
}

/// Expands `\n`, `\t`, `\r` and `\\` so scripts can carry control
/// characters.
fn unescape_arg(arg: &str) -> String {
    let mut out = String::with_capacity(arg.len());
    let mut chars = arg.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Splits off the first word, the remainder keeps its inner spaces.
fn next_word(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    match s.split_once(' ') {
        Some((word, rest)) => Some((word, rest.trim_start())),
        None => Some((s, "")),
    }
}

fn required_word(s: &str) -> Result<(&str, &str), &'static str> {
    next_word(s).ok_or("missing argument")
}

fn parse_line(line: &str) -> Result<Option<Command>, &'static str> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() || line.trim_start().starts_with('#') {
        return Ok(None);
    }
    let Some((keyword, rest)) = next_word(line) else {
        return Ok(None);
    };

    let command = match keyword {
        "start-document" => match rest.trim() {
            "" => Command::StartDocument(None),
            "yes" => Command::StartDocument(Some(true)),
            "no" => Command::StartDocument(Some(false)),
            _ => return Err("standalone must be yes or no"),
        },
        "end-document" => Command::EndDocument,
        "doctype" => Command::DocType(unescape_arg(rest)),
        "start" => {
            let (name, rest) = required_word(rest)?;
            let prefix = next_word(rest).map(|(prefix, _)| prefix.to_string());
            Command::Start(name.to_string(), prefix)
        }
        "end" => Command::End,
        "delete" => Command::Delete,
        "attr" => {
            let (name, value) = required_word(rest)?;
            Command::Attribute(name.to_string(), unescape_arg(value))
        }
        "raw-attr" => {
            let (name, value) = required_word(rest)?;
            Command::RawAttribute(name.to_string(), unescape_arg(value))
        }
        "text" => Command::Text(unescape_arg(rest)),
        "xml" => Command::Xml(unescape_arg(rest)),
        "element" => {
            let (name, text) = required_word(rest)?;
            Command::Element(name.to_string(), unescape_arg(text))
        }
        "cdata" => Command::CData(unescape_arg(rest)),
        "comment" => Command::Comment(unescape_arg(rest)),
        _ => return Err("unknown command"),
    };
    Ok(Some(command))
}

fn apply(writer: &mut XmlWriter, command: Command) -> Result<(), DocumentError> {
    debug!(?command, "apply");
    match command {
        Command::StartDocument(standalone) => writer.write_start_document(standalone),
        Command::EndDocument => writer.write_end_document(),
        Command::DocType(text) => writer.write_doc_type(&text),
        Command::Start(name, prefix) => writer.write_start_element(&name, prefix.as_deref()),
        Command::End => writer.write_end_element(),
        Command::Delete => writer.delete_end_element()?,
        Command::Attribute(name, value) => writer.write_attribute_string(&name, &value),
        Command::RawAttribute(name, value) => writer.write_raw_attribute_string(&name, &value),
        Command::Text(text) => writer.write_string(&text),
        Command::Xml(xml) => writer.write_xml(&xml),
        Command::Element(name, text) => writer.write_element_string(&name, &text, None),
        Command::CData(text) => writer.write_cdata(&text),
        Command::Comment(text) => writer.write_comment(&text),
    }
    Ok(())
}

fn run_script(writer: &mut XmlWriter, script: &str) -> Result<(), IkswriteError> {
    for (i, line) in script.lines().enumerate() {
        let line_nr = i + 1;
        let command = parse_line(line).map_err(|message| IkswriteError::Script {
            line: line_nr,
            message,
        })?;
        if let Some(command) = command {
            apply(writer, command).map_err(|err| IkswriteError::DocumentError {
                line: line_nr,
                err,
            })?;
        }
    }
    Ok(())
}

fn print_stats(writer: &XmlWriter) {
    let Some(root) = writer.root() else {
        eprintln!("Elements: 0");
        return;
    };
    let mut nr_elements = 0;
    let mut nr_empty = 0;
    let mut max_depth = 0;
    for (node, level) in root.descendant_or_self() {
        nr_elements += 1;
        if node.is_empty() {
            nr_empty += 1;
        }
        max_depth = max_depth.max(level);
    }
    eprintln!("Elements: {}", nr_elements);
    eprintln!("Empty elements: {}", nr_empty);
    eprintln!("Max depth: {}", max_depth);
}

fn load_script(file: Option<String>) -> Result<String, IkswriteError> {
    let mut script = String::new();
    match file {
        Some(name) => {
            File::open(name)?.read_to_string(&mut script)?;
        }
        None => {
            stdin().read_to_string(&mut script)?;
        }
    }
    Ok(script)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "ikswrite=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args();

    let mut file: Option<String> = None;
    let mut options = WriterOptions::default();
    let mut do_stats = false;

    // Skip the first argument (program name)
    args.next();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-f" | "--file" => {
                if let Some(value) = args.next() {
                    file = Some(value);
                } else {
                    eprintln!("Error: file name expected after -f/--file");
                    return ExitCode::FAILURE;
                }
            }
            "-c" | "--compact" => {
                options.formatting = Formatting::None;
            }
            "-e" | "--encoding" => {
                if let Some(value) = args.next() {
                    options.encoding = value;
                } else {
                    eprintln!("Error: encoding name expected after -e/--encoding");
                    return ExitCode::FAILURE;
                }
            }
            "-i" | "--indent" => match args.next().map(|value| value.parse::<usize>()) {
                Some(Ok(count)) => options.indentation = count,
                _ => {
                    eprintln!("Error: number expected after -i/--indent");
                    return ExitCode::FAILURE;
                }
            },
            "-s" | "--stat" => {
                do_stats = true;
            }
            "-h" | "--help" => {
                print_usage();
                return ExitCode::SUCCESS;
            }
            "-v" | "--version" => {
                print_version();
                return ExitCode::SUCCESS;
            }
            _ => {
                eprintln!("Error: unknown option '{}'", arg);
                return ExitCode::FAILURE;
            }
        }
    }

    let mut writer = XmlWriter::with_options(options);
    let result = load_script(file).and_then(|script| run_script(&mut writer, &script));
    if let Err(err) = result {
        eprintln!("{}", err);
        return ExitCode::FAILURE;
    }

    println!("{}", writer.flush());
    if do_stats {
        print_stats(&writer);
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands() {
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(parse_line("   # a comment"), Ok(None));
        assert_eq!(parse_line("end"), Ok(Some(Command::End)));
        assert_eq!(
            parse_line("start-document yes"),
            Ok(Some(Command::StartDocument(Some(true))))
        );
        assert_eq!(
            parse_line("start item ns"),
            Ok(Some(Command::Start("item".to_string(), Some("ns".to_string()))))
        );
        assert_eq!(
            parse_line("attr title Two  spaces\\tand tab"),
            Ok(Some(Command::Attribute(
                "title".to_string(),
                "Two  spaces\tand tab".to_string()
            )))
        );
        assert_eq!(
            parse_line("element b  bold text"),
            Ok(Some(Command::Element("b".to_string(), "bold text".to_string())))
        );
        assert_eq!(parse_line("attr"), Err("missing argument"));
        assert_eq!(parse_line("start-document maybe"), Err("standalone must be yes or no"));
        assert_eq!(parse_line("bogus"), Err("unknown command"));
    }

    #[test]
    fn script() {
        let mut writer = XmlWriter::new();
        writer.formatting = Formatting::None;
        run_script(
            &mut writer,
            "start-document no\nstart root\nattr a 1&2\nstart child\ntext hi<>\nend\n\
             start gone\nend\ndelete\ncdata a]]>b\nend\n",
        )
        .unwrap();
        assert_eq!(
            writer.flush(),
            concat!(
                "<?xml version=\"1.0\" encoding=\"ISO-8859-1\" standalone=\"no\" ?>",
                "<root a=\"1&amp;2\"><child>hi&lt;&gt;</child><![CDATA[a]]]]><![CDATA[>b]]></root>"
            )
        );
    }

    #[test]
    fn script_errors() {
        let mut writer = XmlWriter::new();
        let err = run_script(&mut writer, "start a\n\nfrob\n").unwrap_err();
        assert!(matches!(err, IkswriteError::Script { line: 3, .. }));

        let err = run_script(&mut writer, "delete\n").unwrap_err();
        assert!(matches!(err, IkswriteError::DocumentError { line: 1, .. }));
    }
}
