//! PDF object serialization.
//!
//! Serializes PDF objects to their byte representation according to
//! ISO 32000-1:2008. All output goes into an in-memory
//! buffer, so serialization itself cannot fail.

use crate::object::{Dict, Object, ObjectRef};

/// Serializer for PDF objects.
#[derive(Debug, Clone, Default)]
pub struct ObjectSerializer {
    /// Whether to use compact formatting (minimal whitespace)
    compact: bool,
}

impl ObjectSerializer {
    /// Create a new object serializer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a compact serializer (minimal whitespace).
    pub fn compact() -> Self {
        Self { compact: true }
    }

    /// Serialize an object to bytes.
    pub fn serialize(&self, obj: &Object) -> Vec<u8> {
        let mut buf = Vec::new();
        self.write_object(&mut buf, obj);
        buf
    }

    /// Serialize an object to a string (for debugging).
    pub fn serialize_to_string(&self, obj: &Object) -> String {
        String::from_utf8_lossy(&self.serialize(obj)).to_string()
    }

    /// Serialize an indirect object definition.
    ///
    /// Format: `{id} {gen} obj\n{object}\nendobj\n`
    pub fn serialize_indirect(&self, id: u32, gen: u16, obj: &Object) -> Vec<u8> {
        let mut buf = format!("{} {} obj\n", id, gen).into_bytes();
        self.write_object(&mut buf, obj);
        buf.extend_from_slice(b"\nendobj\n");
        buf
    }

    fn write_object(&self, buf: &mut Vec<u8>, obj: &Object) {
        match obj {
            Object::Null => buf.extend_from_slice(b"null"),
            Object::Boolean(b) => buf.extend_from_slice(if *b { b"true" } else { b"false" }),
            Object::Integer(i) => buf.extend_from_slice(i.to_string().as_bytes()),
            Object::Real(r) => buf.extend_from_slice(format_real(*r).as_bytes()),
            Object::String(s) => self.write_string(buf, s),
            Object::Name(n) => self.write_name(buf, n),
            Object::Array(arr) => self.write_array(buf, arr),
            Object::Dictionary(dict) => self.write_dictionary(buf, dict),
            Object::Stream { dict, data } => self.write_stream(buf, dict, data),
            Object::Reference(r) => buf.extend_from_slice(r.to_string().as_bytes()),
        }
    }

    /// Literal `(...)` syntax for printable ASCII, hex `<...>` otherwise.
    fn write_string(&self, buf: &mut Vec<u8>, data: &[u8]) {
        let is_printable = data
            .iter()
            .all(|&b| b == b'\n' || b == b'\r' || b == b'\t' || (0x20..=0x7E).contains(&b));

        if is_printable {
            buf.push(b'(');
            for &byte in data {
                match byte {
                    b'(' => buf.extend_from_slice(b"\\("),
                    b')' => buf.extend_from_slice(b"\\)"),
                    b'\\' => buf.extend_from_slice(b"\\\\"),
                    b'\n' => buf.extend_from_slice(b"\\n"),
                    b'\r' => buf.extend_from_slice(b"\\r"),
                    b'\t' => buf.extend_from_slice(b"\\t"),
                    _ => buf.push(byte),
                }
            }
            buf.push(b')');
        } else {
            buf.push(b'<');
            for byte in data {
                buf.extend_from_slice(format!("{:02X}", byte).as_bytes());
            }
            buf.push(b'>');
        }
    }

    /// Names start with `/`; delimiters, `#`, whitespace and non-ASCII
    /// bytes are written as `#xx`.
    fn write_name(&self, buf: &mut Vec<u8>, name: &str) {
        buf.push(b'/');
        for byte in name.bytes() {
            match byte {
                b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%' | b'#' => {
                    buf.extend_from_slice(format!("#{:02X}", byte).as_bytes())
                },
                0x21..=0x7E => buf.push(byte),
                _ => buf.extend_from_slice(format!("#{:02X}", byte).as_bytes()),
            }
        }
    }

    fn write_array(&self, buf: &mut Vec<u8>, arr: &[Object]) {
        buf.push(b'[');
        for (i, obj) in arr.iter().enumerate() {
            if i > 0 {
                buf.push(b' ');
            }
            self.write_object(buf, obj);
        }
        buf.push(b']');
    }

    fn write_dictionary(&self, buf: &mut Vec<u8>, dict: &Dict) {
        buf.extend_from_slice(b"<<");
        for (key, value) in dict {
            if !self.compact {
                buf.extend_from_slice(b"\n  ");
            }
            self.write_name(buf, key);
            buf.push(b' ');
            self.write_object(buf, value);
        }
        if !self.compact && !dict.is_empty() {
            buf.push(b'\n');
        }
        buf.extend_from_slice(b">>");
    }

    fn write_stream(&self, buf: &mut Vec<u8>, dict: &Dict, data: &[u8]) {
        let mut dict_with_length = dict.clone();
        dict_with_length.insert("Length".to_string(), Object::Integer(data.len() as i64));

        self.write_dictionary(buf, &dict_with_length);
        buf.extend_from_slice(b"\nstream\n");
        buf.extend_from_slice(data);
        buf.extend_from_slice(b"\nendstream");
    }
}

/// Format a real number with at most five decimals and no trailing zeros.
pub(crate) fn format_real(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        let formatted = format!("{:.5}", value);
        let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
        if trimmed == "-0" {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }
}

/// Helper functions for building PDF objects.
impl ObjectSerializer {
    /// Create a Name object.
    pub fn name(s: &str) -> Object {
        Object::Name(s.to_string())
    }

    /// Create a String object from a Rust string.
    pub fn string(s: &str) -> Object {
        Object::String(s.as_bytes().to_vec())
    }

    /// Create an Integer object.
    pub fn integer(i: i64) -> Object {
        Object::Integer(i)
    }

    /// Create an Array object.
    pub fn array(items: Vec<Object>) -> Object {
        Object::Array(items)
    }

    /// Create a Dictionary object.
    pub fn dict(entries: Vec<(&str, Object)>) -> Object {
        Object::Dictionary(Self::dict_map(entries))
    }

    /// Create the map backing a dictionary or stream.
    pub fn dict_map(entries: Vec<(&str, Object)>) -> Dict {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    /// Create a Reference object.
    pub fn reference(r: ObjectRef) -> Object {
        Object::Reference(r)
    }

    /// Create a rectangle array [x, y, width, height] -> [llx, lly, urx, ury].
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Object {
        Object::Array(vec![
            Object::Real(x),
            Object::Real(y),
            Object::Real(x + width),
            Object::Real(y + height),
        ])
    }
}
