use std::io::{self, Write};

use crate::fonts::BuiltinFont;
use crate::images::{ImageData, ImageFormat};

use super::content::ContentStream;
use super::object::{ObjId, PdfObject};
use super::writer::PdfWriter;

/// An image XObject already written to the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHandle {
    /// Resource name used by `ContentStream::image`.
    pub name: String,
    id: ObjId,
}

/// Low-level PDF document writer.
///
/// Generic over `Write` so it works with files (`BufWriter<File>`) or
/// in-memory buffers (`Vec<u8>`). Pages and images are written as soon
/// as they are added, so memory use does not grow with page count.
pub struct PdfDocument<W: Write> {
    writer: PdfWriter<W>,
    catalog: ObjId,
    pages_root: ObjId,
    fonts: Vec<(BuiltinFont, ObjId)>,
    page_ids: Vec<ObjId>,
    image_count: usize,
    info: Vec<(String, String)>,
    compress: bool,
}

impl<W: Write> PdfDocument<W> {
    /// Start a document. Writes the header and the shared font objects
    /// immediately.
    pub fn new(inner: W) -> io::Result<Self> {
        let mut writer = PdfWriter::new(inner);
        writer.write_header()?;
        let catalog = writer.alloc();
        let pages_root = writer.alloc();

        let mut fonts = Vec::with_capacity(BuiltinFont::ALL.len());
        for font in BuiltinFont::ALL {
            let id = writer.alloc();
            let dict = PdfObject::dict(vec![
                ("Type", PdfObject::name("Font")),
                ("Subtype", PdfObject::name("Type1")),
                ("BaseFont", PdfObject::name(font.base_name())),
                ("Encoding", PdfObject::name("WinAnsiEncoding")),
            ]);
            writer.write_object(id, &dict)?;
            fonts.push((font, id));
        }

        Ok(PdfDocument {
            writer,
            catalog,
            pages_root,
            fonts,
            page_ids: Vec::new(),
            image_count: 0,
            info: Vec::new(),
            compress: true,
        })
    }

    /// Toggle Flate compression of content streams and raw image samples.
    pub fn set_compression(&mut self, on: bool) -> &mut Self {
        self.compress = on;
        self
    }

    /// Set a document info entry (e.g. "Title", "Producer").
    pub fn set_info(&mut self, key: &str, value: &str) -> &mut Self {
        self.info.push((key.to_string(), value.to_string()));
        self
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn stream(&self, entries: Vec<(&str, PdfObject)>, data: Vec<u8>) -> io::Result<PdfObject> {
        if self.compress {
            PdfObject::flate_stream(entries, &data)
        } else {
            Ok(PdfObject::stream(entries, data))
        }
    }

    /// Write an image XObject (plus its soft mask) and return a handle
    /// pages can reference.
    pub fn add_image(&mut self, image: &ImageData) -> io::Result<ImageHandle> {
        let smask = match &image.alpha {
            Some(alpha) => {
                let id = self.writer.alloc();
                let obj = self.stream(image_entries(image, "DeviceGray"), alpha.clone())?;
                self.writer.write_object(id, &obj)?;
                Some(id)
            }
            None => None,
        };

        let mut entries = image_entries(image, image.color_space.pdf_name());
        if let Some(id) = smask {
            entries.push(("SMask", PdfObject::Reference(id)));
        }
        let obj = match image.format {
            ImageFormat::Jpeg => {
                entries.push(("Filter", PdfObject::name("DCTDecode")));
                PdfObject::stream(entries, image.data.clone())
            }
            ImageFormat::Png => self.stream(entries, image.data.clone())?,
        };
        let id = self.writer.alloc();
        self.writer.write_object(id, &obj)?;

        self.image_count += 1;
        Ok(ImageHandle {
            name: format!("Im{}", self.image_count),
            id,
        })
    }

    /// Write one finished page.
    pub fn add_page(
        &mut self,
        width: f64,
        height: f64,
        content: ContentStream,
        images: &[ImageHandle],
    ) -> io::Result<()> {
        let content_id = self.writer.alloc();
        let stream = self.stream(vec![], content.into_bytes())?;
        self.writer.write_object(content_id, &stream)?;

        let font_dict = PdfObject::Dictionary(
            self.fonts
                .iter()
                .map(|(font, id)| (font.resource_name().to_string(), PdfObject::Reference(*id)))
                .collect(),
        );
        let mut resources = vec![("Font", font_dict)];
        if !images.is_empty() {
            resources.push((
                "XObject",
                PdfObject::Dictionary(
                    images
                        .iter()
                        .map(|h| (h.name.clone(), PdfObject::Reference(h.id)))
                        .collect(),
                ),
            ));
        }

        let page_id = self.writer.alloc();
        let page = PdfObject::dict(vec![
            ("Type", PdfObject::name("Page")),
            ("Parent", PdfObject::Reference(self.pages_root)),
            ("MediaBox", PdfObject::rect(0.0, 0.0, width, height)),
            ("Contents", PdfObject::Reference(content_id)),
            ("Resources", PdfObject::dict(resources)),
        ]);
        self.writer.write_object(page_id, &page)?;
        self.page_ids.push(page_id);
        Ok(())
    }

    /// Write the page tree, catalog, info dictionary and trailer.
    /// Consumes the document and returns the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        let info = if self.info.is_empty() {
            None
        } else {
            let id = self.writer.alloc();
            let entries = self
                .info
                .iter()
                .map(|(k, v)| (k.as_str(), PdfObject::string(v)))
                .collect();
            self.writer.write_object(id, &PdfObject::dict(entries))?;
            Some(id)
        };

        let kids = self
            .page_ids
            .iter()
            .map(|id| PdfObject::Reference(*id))
            .collect();
        let pages = PdfObject::dict(vec![
            ("Type", PdfObject::name("Pages")),
            ("Kids", PdfObject::Array(kids)),
            ("Count", PdfObject::Integer(self.page_ids.len() as i64)),
        ]);
        self.writer.write_object(self.pages_root, &pages)?;

        let catalog = PdfObject::dict(vec![
            ("Type", PdfObject::name("Catalog")),
            ("Pages", PdfObject::Reference(self.pages_root)),
        ]);
        self.writer.write_object(self.catalog, &catalog)?;

        self.writer.finish(self.catalog, info)
    }
}

fn image_entries(image: &ImageData, color_space: &str) -> Vec<(&'static str, PdfObject)> {
    vec![
        ("Type", PdfObject::name("XObject")),
        ("Subtype", PdfObject::name("Image")),
        ("Width", PdfObject::Integer(image.width as i64)),
        ("Height", PdfObject::Integer(image.height as i64)),
        ("ColorSpace", PdfObject::name(color_space)),
        ("BitsPerComponent", PdfObject::Integer(8)),
    ]
}
