use crate::error::ImageError;

/// Supported encoded image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

/// PDF color space for image samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    DeviceRGB,
    DeviceGray,
}

impl ColorSpace {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceRGB => "DeviceRGB",
            ColorSpace::DeviceGray => "DeviceGray",
        }
    }
}

/// Image decoded far enough to embed: JPEG bytes are kept as-is
/// (DCTDecode), PNG is expanded to raw 8-bit samples.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    pub color_space: ColorSpace,
    /// Raw samples (PNG) or the original JPEG stream.
    pub data: Vec<u8>,
    /// Separate 8-bit alpha channel, if the source had one.
    pub alpha: Option<Vec<u8>>,
}

impl ImageData {
    /// Height divided by width.
    pub fn aspect(&self) -> f64 {
        self.height as f64 / self.width as f64
    }
}

/// Detect the image format from magic bytes.
pub fn detect_format(data: &[u8]) -> Result<ImageFormat, ImageError> {
    match data {
        [0xFF, 0xD8, ..] => Ok(ImageFormat::Jpeg),
        [0x89, b'P', b'N', b'G', ..] => Ok(ImageFormat::Png),
        _ => Err(ImageError::Unsupported(
            "expected JPEG or PNG data".to_string(),
        )),
    }
}

/// Decode image bytes into embeddable data.
pub fn load_image(data: Vec<u8>) -> Result<ImageData, ImageError> {
    let image = match detect_format(&data)? {
        ImageFormat::Jpeg => parse_jpeg(data)?,
        ImageFormat::Png => parse_png(&data)?,
    };
    if image.width == 0 || image.height == 0 {
        return Err(ImageError::Unsupported("image has zero size".to_string()));
    }
    Ok(image)
}

fn parse_jpeg(data: Vec<u8>) -> Result<ImageData, ImageError> {
    let (width, height, components) = jpeg_dimensions(&data)?;
    let color_space = match components {
        1 => ColorSpace::DeviceGray,
        3 => ColorSpace::DeviceRGB,
        n => {
            return Err(ImageError::Unsupported(format!(
                "JPEG with {} components",
                n
            )))
        }
    };
    Ok(ImageData {
        width,
        height,
        format: ImageFormat::Jpeg,
        color_space,
        data,
        alpha: None,
    })
}

/// Walk the JPEG marker segments up to the first SOF0..SOF3 frame header.
fn jpeg_dimensions(data: &[u8]) -> Result<(u32, u32, u8), ImageError> {
    let mut i = 2;
    while i + 3 < data.len() {
        if data[i] != 0xFF {
            i += 1;
            continue;
        }
        let marker = data[i + 1];
        match marker {
            0xC0..=0xC3 => {
                let sof = data.get(i + 5..i + 10).ok_or_else(|| {
                    ImageError::Unsupported("truncated JPEG frame header".to_string())
                })?;
                let height = u16::from_be_bytes([sof[0], sof[1]]) as u32;
                let width = u16::from_be_bytes([sof[2], sof[3]]) as u32;
                return Ok((width, height, sof[4]));
            }
            0xFF | 0x00 => i += 1,
            0xD0..=0xD9 => i += 2,
            _ => {
                let len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
                i += 2 + len;
            }
        }
    }
    Err(ImageError::Unsupported(
        "no frame header in JPEG data".to_string(),
    ))
}

fn parse_png(data: &[u8]) -> Result<ImageData, ImageError> {
    let mut decoder = png::Decoder::new(data);
    // Expand palettes and low bit depths, strip 16-bit to 8-bit.
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info()?;
    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());

    let (color_space, channels) = match info.color_type {
        png::ColorType::Rgb => (ColorSpace::DeviceRGB, 3),
        png::ColorType::Rgba => (ColorSpace::DeviceRGB, 4),
        png::ColorType::Grayscale => (ColorSpace::DeviceGray, 1),
        png::ColorType::GrayscaleAlpha => (ColorSpace::DeviceGray, 2),
        other => {
            return Err(ImageError::Unsupported(format!(
                "PNG color type {:?}",
                other
            )))
        }
    };

    let (samples, alpha) = if channels == 2 || channels == 4 {
        split_alpha(&buf, channels)
    } else {
        (buf, None)
    };

    Ok(ImageData {
        width: info.width,
        height: info.height,
        format: ImageFormat::Png,
        color_space,
        data: samples,
        alpha,
    })
}

/// Separate interleaved color+alpha samples into two planes.
fn split_alpha(buf: &[u8], channels: usize) -> (Vec<u8>, Option<Vec<u8>>) {
    let pixels = buf.len() / channels;
    let mut color = Vec::with_capacity(pixels * (channels - 1));
    let mut alpha = Vec::with_capacity(pixels);
    for px in buf.chunks_exact(channels) {
        color.extend_from_slice(&px[..channels - 1]);
        alpha.push(px[channels - 1]);
    }
    (color, Some(alpha))
}
