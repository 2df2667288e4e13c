use std::io::{self, Write};

use flate2::write::ZlibEncoder;
use flate2::Compression;

/// Indirect object number. Generation is always 0: documents are
/// written once and never updated incrementally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjId(pub u32);

/// The subset of PDF object types the backend emits.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfObject {
    Integer(i64),
    Real(f64),
    /// Name object, stored without the leading `/`.
    Name(String),
    /// Literal string bytes, stored without the enclosing parens.
    String(Vec<u8>),
    Array(Vec<PdfObject>),
    /// Key-value pairs. A Vec keeps output order deterministic.
    Dictionary(Vec<(String, PdfObject)>),
    Stream {
        dict: Vec<(String, PdfObject)>,
        data: Vec<u8>,
    },
    Reference(ObjId),
}

impl PdfObject {
    pub fn name(s: &str) -> Self {
        PdfObject::Name(s.to_string())
    }

    pub fn string(s: &str) -> Self {
        PdfObject::String(crate::fonts::encode_win_ansi(s))
    }

    pub fn dict(entries: Vec<(&str, PdfObject)>) -> Self {
        PdfObject::Dictionary(own_keys(entries))
    }

    pub fn stream(entries: Vec<(&str, PdfObject)>, data: Vec<u8>) -> Self {
        PdfObject::Stream {
            dict: own_keys(entries),
            data,
        }
    }

    /// A stream whose data is zlib-compressed and tagged /FlateDecode.
    pub fn flate_stream(
        mut entries: Vec<(&str, PdfObject)>,
        data: &[u8],
    ) -> io::Result<Self> {
        entries.push(("Filter", PdfObject::name("FlateDecode")));
        Ok(PdfObject::stream(entries, deflate(data)?))
    }

    /// A rectangle array `[x1 y1 x2 y2]`.
    pub fn rect(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        PdfObject::Array(vec![
            PdfObject::Real(x1),
            PdfObject::Real(y1),
            PdfObject::Real(x2),
            PdfObject::Real(y2),
        ])
    }
}

fn own_keys(entries: Vec<(&str, PdfObject)>) -> Vec<(String, PdfObject)> {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// Zlib-compress `data` (the FlateDecode filter format).
pub fn deflate(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::ZlibDecoder;
    use std::io::Read;

    #[test]
    fn flate_stream_round_trips_and_tags_filter() {
        let data = b"0 0 m 100 100 l S\n".repeat(20);
        let obj = PdfObject::flate_stream(vec![], &data).unwrap();
        match obj {
            PdfObject::Stream { dict, data: packed } => {
                assert_eq!(dict[0].0, "Filter");
                assert!(packed.len() < data.len());
                let mut out = Vec::new();
                ZlibDecoder::new(packed.as_slice())
                    .read_to_end(&mut out)
                    .unwrap();
                assert_eq!(out, data);
            }
            _ => panic!("expected Stream"),
        }
    }

    #[test]
    fn string_is_win_ansi_encoded() {
        assert_eq!(
            PdfObject::string("a\u{2022}"),
            PdfObject::String(vec![b'a', 0x95])
        );
    }
}
