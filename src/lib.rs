#![allow(clippy::module_inception)]

use std::{path::Path, rc::Rc};

use crate::{
    ast::definitions::FuncDef,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::type_checker::type_check,
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;

extern crate regex;

/// A byte offset into a named source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }
}

/// Runs the whole front end over `source`: tokenize, parse, then check.
///
/// Returns the accepted program tree, or the first error of whichever phase failed.
pub fn check_source(source: &str, file: &str) -> Result<FuncDef, Error> {
    let tokens = tokenize(source.to_string(), Some(file.to_string()))?;
    let program = parse(tokens, Rc::new(file.to_string()))?;
    type_check(&program)?;
    Ok(program)
}

/// Finds the line holding byte `position` of `content`.
///
/// Returns the 1-based line number, the line text and the offset within that line.
pub fn get_line_at_position(content: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > content.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    // Position sits at the very end of the file (e.g. an EOF token)
    let last = content.split_inclusive('\n').last().unwrap_or("");
    Some((line_number.saturating_sub(1).max(1), last.to_string(), last.len()))
}


/// Renders `error` against the source it was found in, on stderr.
pub fn display_error(error: &Error, file: &Path, source: &str) {
    /*
        Error: name (tip)
        -> hello.alan
           |
        20 | y = 'a';
           | ----^
    */

    if let ErrorTip::None = error.get_tip() {
        eprintln!("Error: {}", error.get_error_name());
    } else {
        eprintln!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    eprintln!("-> {}", file.as_os_str().to_string_lossy());

    let Some((line, line_text, line_pos)) = get_line_at_position(source, error.get_position().0)
    else {
        return;
    };

    let line_str = line.to_string();
    let padding = line_str.len() + 2;

    eprintln!("{:>padding$}", "|");

    let (line_text_removed, _) = remove_starting_whitespace(&line_text);
    eprintln!("{} | {}", line_str, line_text_removed.trim_end());

    let arrows = caret_offset(&line_text, line_pos) + 1;

    eprintln!("{:>padding$} {:->arrows$}", "|", "^");
}

/// Columns between the first non-blank character of `line` and the byte offset `pos`.
fn caret_offset(line: &str, pos: usize) -> usize {
    let (_, removed_whitespace) = remove_starting_whitespace(line);
    line.get(removed_whitespace..pos)
        .map_or(0, |text| text.chars().count())
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let start = string.len() - string.trim_start_matches([' ', '\t']).len();
    (&string[start..], start)
}
