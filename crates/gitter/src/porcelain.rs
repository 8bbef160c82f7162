// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Short-format status decoding
//!
//! Two wire forms of `git status --porcelain` are understood:
//!
//! - [`parse_status_z`]: the `-z` form. Records are NUL-terminated, paths are
//!   never quoted, and a rename or copy is followed by a second record holding
//!   the origin path (`XY to\0from\0`).
//! - [`parse_status_porcelain`]: the line form. Paths containing special
//!   characters are C-quoted and renames are written `XY from -> to`.
//!
//! Neither decoder fails. Input that does not match the grammar still yields
//! entries built from whatever codes and paths were scanned.
//!
//! # Example
//!
//! ```
//! use gitter::porcelain::parse_status_z;
//! use gitter::StatusCode;
//!
//! let status = parse_status_z("R  new.md\0old.md\0?? notes/\0");
//! let renamed = status.file("new.md").unwrap();
//! assert_eq!(renamed.staging, StatusCode::Renamed);
//! assert_eq!(renamed.extra.as_deref(), Some("old.md"));
//! assert!(status.file("notes/").unwrap().is_untracked());
//! ```

use crate::status::{FileStatus, Status, StatusCode};
use std::iter::Peekable;
use std::str::Chars;

/// Decode `git status --porcelain -z` output
#[must_use]
pub fn parse_status_z(stdout: &str) -> Status {
    let mut status = Status::new();
    let mut records = stdout.split('\0');

    while let Some(record) = records.next() {
        if record.is_empty() {
            continue;
        }

        let (staging, worktree, path) = split_record(record);
        let mut file = FileStatus::new(staging, worktree);

        // The destination comes first in -z output; the origin is the next record.
        if file.is_rename_or_copy() {
            file.extra = records.next().map(str::to_string);
        }

        status.insert(path, file);
    }

    status
}

/// Decode line-oriented `git status --porcelain` output
///
/// Records are split on LF or NUL. Untracked paths are taken verbatim; all
/// other path fields go through [`parse_name_extra`].
#[must_use]
pub fn parse_status_porcelain(stdout: &str) -> Status {
    stdout
        .split(['\n', '\0'])
        .filter(|record| !record.is_empty())
        .map(|record| {
            let (staging, worktree, field) = split_record(record);
            let mut file = FileStatus::new(staging, worktree);

            let path = if staging == StatusCode::Untracked {
                field.to_string()
            } else {
                let (name, extra) = parse_name_extra(field);
                file.extra = extra;
                name
            };

            (path, file)
        })
        .collect()
}

/// Split the path portion of a short-format line into `(path, origin)`
///
/// Handles both `PATH` and `ORIG_PATH -> PATH`. Either field may be wrapped
/// in double quotes with backslash escapes; quotes are removed and escapes
/// decoded. The first unquoted space ends a field, and a `-> ` following it
/// is consumed.
#[must_use]
pub fn parse_name_extra(field: &str) -> (String, Option<String>) {
    let mut buffer: Vec<u8> = Vec::with_capacity(field.len());
    let mut extra = None;
    let mut in_quote = false;
    let mut chars = field.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => in_quote = !in_quote,
            '\\' if in_quote => unescape(&mut chars, &mut buffer),
            ' ' if !in_quote => {
                extra = Some(String::from_utf8_lossy(&buffer).into_owned());
                buffer.clear();

                let mut lookahead = chars.clone();
                if lookahead.next() == Some('-')
                    && lookahead.next() == Some('>')
                    && lookahead.next() == Some(' ')
                {
                    chars = lookahead;
                }
            }
            c => push_char(&mut buffer, c),
        }
    }

    (String::from_utf8_lossy(&buffer).into_owned(), extra)
}

/// Read the two status columns and the path that follows the separator
fn split_record(record: &str) -> (StatusCode, StatusCode, &str) {
    let mut chars = record.char_indices();
    let mut code = || {
        chars
            .next()
            .map_or(StatusCode::Unmodified, |(_, c)| StatusCode::from(c))
    };
    let staging = code();
    let worktree = code();

    let path = match chars.next() {
        Some((idx, separator)) => &record[idx + separator.len_utf8()..],
        None => "",
    };

    (staging, worktree, path)
}

/// Decode one C-style escape sequence; the backslash has been consumed
fn unescape(chars: &mut Peekable<Chars<'_>>, buffer: &mut Vec<u8>) {
    let Some(c) = chars.next() else {
        buffer.push(b'\\');
        return;
    };

    match c {
        '"' => buffer.push(b'"'),
        '\\' => buffer.push(b'\\'),
        'a' => buffer.push(0x07),
        'b' => buffer.push(0x08),
        'f' => buffer.push(0x0c),
        'n' => buffer.push(b'\n'),
        'r' => buffer.push(b'\r'),
        't' => buffer.push(b'\t'),
        'v' => buffer.push(0x0b),
        '0'..='7' => {
            // git escapes each byte of a non-ASCII name as three octal digits
            let mut value = c.to_digit(8).unwrap_or(0);
            for _ in 0..2 {
                match chars.peek().and_then(|d| d.to_digit(8)) {
                    Some(digit) => {
                        value = value * 8 + digit;
                        chars.next();
                    }
                    None => break,
                }
            }
            buffer.push((value & 0xff) as u8);
        }
        other => {
            buffer.push(b'\\');
            push_char(buffer, other);
        }
    }
}

fn push_char(buffer: &mut Vec<u8>, c: char) {
    let mut utf8 = [0u8; 4];
    buffer.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
}
