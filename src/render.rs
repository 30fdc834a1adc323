//! Textual rendering of values and sequences.
//!
//! The rendering produced here is the *rendering key* used by
//! [`KeyPolicy::Rendering`](crate::KeyPolicy::Rendering), the text joined by
//! `join_into_str`, and the payload of byte strings in JSON output.
//!
//! Top-level strings render raw; strings nested inside containers render
//! quoted.
//!
//! ```rust
//! use seqwise::Value;
//!
//! assert_eq!(Value::from(1.0).to_string(), "1.0");
//! assert_eq!(Value::from(b"Hi!").to_string(), "b'Hi!'");
//! assert_eq!(
//!     Value::List(vec![Value::from(1), Value::from("a")]).to_string(),
//!     "[1, 'a']"
//! );
//! assert_eq!(Value::Tuple(vec![Value::from(1)]).to_string(), "(1,)");
//! ```

use std::fmt::{self, Write};

use crate::value::Value;

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(text) => formatter.write_str(text),
            other => write_repr(formatter, other),
        }
    }
}

/// Writes the quoted, nested form of a value.
pub(crate) fn write_repr<W: Write>(out: &mut W, value: &Value) -> fmt::Result {
    match value {
        Value::None => out.write_str("None"),
        Value::Bool(true) => out.write_str("True"),
        Value::Bool(false) => out.write_str("False"),
        Value::Int(number) => write!(out, "{number}"),
        Value::Float(number) => write_float(out, *number),
        Value::Str(text) => write_quoted_str(out, text),
        Value::Bytes(bytes) => write_bytes_literal(out, bytes),
        Value::List(items) => {
            out.write_char('[')?;
            write_items(out, items)?;
            out.write_char(']')
        }
        Value::Tuple(items) => {
            out.write_char('(')?;
            write_items(out, items)?;
            if items.len() == 1 {
                out.write_char(',')?;
            }
            out.write_char(')')
        }
        Value::Set(items) if items.is_empty() => out.write_str("set()"),
        Value::Set(items) => {
            out.write_char('{')?;
            write_items(out, items)?;
            out.write_char('}')
        }
        Value::Map(entries) => {
            out.write_char('{')?;
            for (position, (key, item)) in entries.iter().enumerate() {
                if position > 0 {
                    out.write_str(", ")?;
                }
                write_quoted_str(out, key)?;
                out.write_str(": ")?;
                write_repr(out, item)?;
            }
            out.write_char('}')
        }
    }
}

pub(crate) fn write_items<'a, W, I>(out: &mut W, items: I) -> fmt::Result
where
    W: Write,
    I: IntoIterator<Item = &'a Value>,
{
    for (position, item) in items.into_iter().enumerate() {
        if position > 0 {
            out.write_str(", ")?;
        }
        write_repr(out, item)?;
    }
    Ok(())
}

/// Shortest round-trip float text that always carries a decimal point or
/// an exponent.
pub(crate) fn write_float<W: Write>(out: &mut W, number: f64) -> fmt::Result {
    if number.is_nan() {
        return out.write_str("nan");
    }
    if number.is_infinite() {
        return out.write_str(if number > 0.0 { "inf" } else { "-inf" });
    }
    let magnitude = number.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let scientific = format!("{number:e}");
        let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
        let (sign, digits) = exponent
            .strip_prefix('-')
            .map_or(("+", exponent), |digits| ("-", digits));
        return write!(out, "{mantissa}e{sign}{digits:0>2}");
    }
    let plain = number.to_string();
    out.write_str(&plain)?;
    if !plain.contains('.') {
        out.write_str(".0")?;
    }
    Ok(())
}

fn write_quoted_str<W: Write>(out: &mut W, text: &str) -> fmt::Result {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };
    out.write_char(quote)?;
    for character in text.chars() {
        match character {
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            other if other == quote => {
                out.write_char('\\')?;
                out.write_char(other)?;
            }
            other if other.is_control() => write!(out, "\\x{:02x}", u32::from(other))?,
            other => out.write_char(other)?,
        }
    }
    out.write_char(quote)
}

/// Writes a byte string as a `b'...'` literal.
pub(crate) fn write_bytes_literal<W: Write>(out: &mut W, bytes: &[u8]) -> fmt::Result {
    let quote = if bytes.contains(&b'\'') && !bytes.contains(&b'"') {
        b'"'
    } else {
        b'\''
    };
    out.write_char('b')?;
    out.write_char(char::from(quote))?;
    for &byte in bytes {
        match byte {
            b'\\' => out.write_str("\\\\")?,
            b'\n' => out.write_str("\\n")?,
            b'\r' => out.write_str("\\r")?,
            b'\t' => out.write_str("\\t")?,
            other if other == quote => {
                out.write_char('\\')?;
                out.write_char(char::from(other))?;
            }
            0x20..=0x7e => out.write_char(char::from(byte))?,
            other => write!(out, "\\x{other:02x}")?,
        }
    }
    out.write_char(char::from(quote))
}

/// Renders a value the way it appears inside a container.
pub fn repr(value: &Value) -> String {
    let mut out = String::new();
    // Writing into a `String` cannot fail.
    let _ = write_repr(&mut out, value);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::{BTreeMap, BTreeSet};

    #[rstest]
    #[case(1.0, "1.0")]
    #[case(0.5, "0.5")]
    #[case(-2.0, "-2.0")]
    #[case(1e16, "1e+16")]
    #[case(1.5e-5, "1.5e-05")]
    #[case(1e15, "1000000000000000.0")]
    #[case(0.0, "0.0")]
    fn test_float_rendering(#[case] number: f64, #[case] expected: &str) {
        assert_eq!(Value::Float(number).to_string(), expected);
    }

    #[test]
    fn test_top_level_string_is_raw_nested_is_quoted() {
        assert_eq!(Value::from("it's").to_string(), "it's");
        assert_eq!(repr(&Value::from("it's")), "\"it's\"");
        assert_eq!(repr(&Value::from("a\nb")), "'a\\nb'");
    }

    #[test]
    fn test_bytes_literal_escapes() {
        assert_eq!(Value::from(&[0u8, b'a', 0xff][..]).to_string(), "b'\\x00a\\xff'");
        assert_eq!(Value::from(b"'").to_string(), "b\"'\"");
    }

    #[test]
    fn test_container_rendering() {
        assert_eq!(Value::Tuple(vec![]).to_string(), "()");
        assert_eq!(
            Value::Tuple(vec![Value::Int(1), Value::Int(2)]).to_string(),
            "(1, 2)"
        );
        assert_eq!(Value::Set(BTreeSet::new()).to_string(), "set()");
        let entries = BTreeMap::from([("foo".to_owned(), Value::from("bar"))]);
        assert_eq!(Value::Map(entries).to_string(), "{'foo': 'bar'}");
        assert_eq!(Value::None.to_string(), "None");
        assert_eq!(Value::Bool(true).to_string(), "True");
    }
}
