use std::io::{self, Write};

use super::object::{ObjId, PdfObject};

/// Serializes PDF objects to any `Write` target, tracking byte offsets
/// for the cross-reference table.
pub struct PdfWriter<W: Write> {
    inner: W,
    offset: usize,
    /// Byte offset of each object, indexed by object number.
    offsets: Vec<Option<usize>>,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(inner: W) -> Self {
        PdfWriter {
            inner,
            offset: 0,
            // Object 0 is the head of the free list.
            offsets: vec![None],
        }
    }

    /// Reserve the next object number without writing anything yet.
    pub fn alloc(&mut self) -> ObjId {
        self.offsets.push(None);
        ObjId(self.offsets.len() as u32 - 1)
    }

    fn write_bytes(&mut self, data: &[u8]) -> io::Result<()> {
        self.inner.write_all(data)?;
        self.offset += data.len();
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.write_bytes(s.as_bytes())
    }

    /// PDF 1.7 header followed by a binary marker comment.
    pub fn write_header(&mut self) -> io::Result<()> {
        self.write_str("%PDF-1.7\n")?;
        self.write_bytes(b"%\xe2\xe3\xcf\xd3\n")
    }

    /// Write an indirect object previously reserved with `alloc`.
    pub fn write_object(&mut self, id: ObjId, obj: &PdfObject) -> io::Result<()> {
        let slot = self
            .offsets
            .get_mut(id.0 as usize)
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("object {} was never allocated", id.0),
                )
            })?;
        *slot = Some(self.offset);
        self.write_str(&format!("{} 0 obj\n", id.0))?;
        self.write_value(obj)?;
        self.write_str("\nendobj\n")
    }

    fn write_entries(&mut self, entries: &[(String, PdfObject)]) -> io::Result<()> {
        for (key, val) in entries {
            self.write_str(" /")?;
            self.write_str(key)?;
            self.write_str(" ")?;
            self.write_value(val)?;
        }
        Ok(())
    }

    fn write_value(&mut self, obj: &PdfObject) -> io::Result<()> {
        match obj {
            PdfObject::Integer(n) => self.write_str(&n.to_string()),
            PdfObject::Real(f) => self.write_str(&format_real(*f)),
            PdfObject::Name(name) => {
                self.write_str("/")?;
                self.write_str(name)
            }
            PdfObject::String(bytes) => {
                self.write_str("(")?;
                self.write_bytes(&escape_string(bytes))?;
                self.write_str(")")
            }
            PdfObject::Array(items) => {
                self.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.write_str(" ")?;
                    }
                    self.write_value(item)?;
                }
                self.write_str("]")
            }
            PdfObject::Dictionary(entries) => {
                self.write_str("<<")?;
                self.write_entries(entries)?;
                self.write_str(" >>")
            }
            PdfObject::Stream { dict, data } => {
                self.write_str("<<")?;
                self.write_entries(dict)?;
                self.write_str(&format!(" /Length {} >>\nstream\n", data.len()))?;
                self.write_bytes(data)?;
                self.write_str("\nendstream")
            }
            PdfObject::Reference(id) => self.write_str(&format!("{} 0 R", id.0)),
        }
    }

    /// Write the xref table, trailer, startxref, and %%EOF.
    pub fn finish(mut self, root: ObjId, info: Option<ObjId>) -> io::Result<W> {
        let xref_offset = self.offset;
        let size = self.offsets.len();

        let mut table = format!("xref\n0 {}\n", size).into_bytes();
        // Each entry is exactly 20 bytes.
        table.extend_from_slice(b"0000000000 65535 f\r\n");
        for entry in &self.offsets[1..] {
            match entry {
                Some(off) => table.extend_from_slice(format!("{:010} 00000 n\r\n", off).as_bytes()),
                None => table.extend_from_slice(b"0000000000 00000 f\r\n"),
            }
        }
        self.write_bytes(&table)?;

        let mut trailer = format!("trailer\n<< /Size {} /Root {} 0 R", size, root.0);
        if let Some(info) = info {
            trailer.push_str(&format!(" /Info {} 0 R", info.0));
        }
        trailer.push_str(&format!(" >>\nstartxref\n{}\n%%EOF\n", xref_offset));
        self.write_str(&trailer)?;

        self.inner.flush()?;
        Ok(self.inner)
    }
}

/// Escape `\`, `(` and `)` in literal string bytes.
pub fn escape_string(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    for &b in bytes {
        if matches!(b, b'\\' | b'(' | b')') {
            out.push(b'\\');
        }
        out.push(b);
    }
    out
}

/// Format a number for PDF output: no exponent, trailing zeros trimmed.
pub fn format_real(v: f64) -> String {
    if v == v.trunc() && v.abs() < 1e15 {
        return format!("{}", v as i64);
    }
    let s = format!("{:.4}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
