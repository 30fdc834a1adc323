//! JSON rendering of sequences.
//!
//! The encoding depends on the representation:
//!
//! | Representation          | JSON                                         |
//! |-------------------------|----------------------------------------------|
//! | byte buffer, range      | array of the element integers                |
//! | byte string             | string holding the `b'...'` rendering        |
//! | string                  | string                                       |
//! | list, tuple             | array of structurally encoded elements       |
//!
//! Output uses the spaced layout (`", "` between items, `": "` after keys)
//! and escapes every non-ASCII character as `\uXXXX`.
//!
//! # Examples
//!
//! ```rust
//! use seqwise::{to_json, Sequence};
//!
//! assert_eq!(to_json(&Sequence::bytearray(vec![1u8, 0, 0, 1])).unwrap(), "[1, 0, 0, 1]");
//! assert_eq!(to_json(&Sequence::range(0, 3)).unwrap(), "[0, 1, 2]");
//! assert_eq!(to_json(&Sequence::bytes(b"Hi!")).unwrap(), r#""b'Hi!'""#);
//! assert_eq!(to_json(&Sequence::from("Hi!")).unwrap(), r#""Hi!""#);
//! ```

use std::io;

use serde::ser::{Error as _, Serialize, Serializer};
use serde_json::ser::Formatter;

use crate::error::Result;
use crate::sequence::Sequence;
use crate::value::Value;

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::None => serializer.serialize_unit(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::Str(text) => serializer.serialize_str(text),
            Self::Bytes(_) => serializer.serialize_str(&self.to_string()),
            Self::List(items) | Self::Tuple(items) => serializer.collect_seq(items),
            Self::Set(items) => serializer.collect_seq(items),
            Self::Map(entries) => serializer.collect_map(entries),
        }
    }
}

impl Serialize for Sequence {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::MutableBytes(bytes) => serializer.collect_seq(bytes),
            Self::Range(range) => serializer.collect_seq(range.iter()),
            Self::ImmutableBytes(_) => serializer.serialize_str(&self.to_string()),
            Self::Str(text) => serializer.serialize_str(text),
            Self::List(items) => serializer.collect_seq(items),
            Self::Tuple(items) => serializer.collect_seq(items.iter()),
        }
    }
}

/// Renders `sequence` as JSON text.
///
/// # Errors
///
/// Returns [`SeqError::Json`](crate::SeqError::Json) if encoding fails.
pub fn to_json(sequence: &Sequence) -> Result<String> {
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, SpacedFormatter);
    sequence.serialize(&mut serializer)?;
    String::from_utf8(buffer).map_err(|error| serde_json::Error::custom(error).into())
}

/// Compact JSON with a space after every separator and ASCII-only strings.
#[derive(Debug, Clone, Copy, Default)]
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if fragment.is_ascii() {
            return writer.write_all(fragment.as_bytes());
        }
        let mut units = [0u16; 2];
        for character in fragment.chars() {
            if character.is_ascii() {
                writer.write_all(&[character as u8])?;
            } else {
                for unit in character.encode_utf16(&mut units) {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
        }
        Ok(())
    }
}
