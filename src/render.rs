//! Rasterising symbols for display and sharing.
//!
//! Images are 8-bit grayscale, black modules on white, with a quiet zone of
//! `border` modules. All scaling is nearest-neighbour so module edges stay
//! sharp at any size.

use image::imageops::{self, FilterType};
use image::{GrayImage, ImageBuffer, Luma};

use crate::qrcode::QrCode;

/// Quiet zone width, in modules, recommended by the QR standard.
pub const DEFAULT_BORDER: u32 = 4;

/// Smallest side, in pixels, of an image prepared for sharing.
pub const SHARE_MIN_SIDE: u32 = 512;

const DARK: Luma<u8> = Luma([0u8]);
const LIGHT: Luma<u8> = Luma([255u8]);

/// Renders one `scale` x `scale` pixel block per module.
///
/// A `scale` of zero is treated as one.
///
/// # Example
///
/// ```
/// use qrlive::{encode, render, QrCodeEcc};
///
/// let qr = encode("Hello, world!", QrCodeEcc::Low).unwrap();
/// let img = render::to_image(&qr, 4, 1);
/// assert_eq!(img.dimensions(), (29, 29));
/// ```
pub fn to_image(qr: &QrCode, border: u32, scale: u32) -> GrayImage {
    let scale = scale.max(1);
    let side = (qr.size() as u32 + 2 * border) * scale;
    let border = border as i32;
    ImageBuffer::from_fn(side, side, |x, y| {
        let qr_x = (x / scale) as i32 - border;
        let qr_y = (y / scale) as i32 - border;
        if qr.get_module(qr_x, qr_y) {
            DARK
        } else {
            LIGHT
        }
    })
}

/// Renders the symbol to exactly `side` x `side` pixels.
///
/// The symbol is drawn at one pixel per module and then resized with
/// nearest-neighbour sampling, so modules may differ by a pixel in width
/// when `side` is not a multiple of the module count.
pub fn to_image_sized(qr: &QrCode, border: u32, side: u32) -> GrayImage {
    let base = to_image(qr, border, 1);
    imageops::resize(&base, side, side, FilterType::Nearest)
}

/// Redraws `img` onto a square canvas at least `min_side` pixels wide.
///
/// The canvas side is the larger of the image width and `min_side`.
pub fn shareable_image(img: &GrayImage, min_side: u32) -> GrayImage {
    let side = img.width().max(min_side);
    imageops::resize(img, side, side, FilterType::Nearest)
}

/// Returns an SVG document with one unit per module.
///
/// The string always uses Unix newlines (\n), regardless of the platform.
pub fn to_svg_string(qr: &QrCode, border: u32) -> String {
    let dimension = qr.size() as u32 + border * 2;
    let mut path = Vec::new();
    for (y, row) in qr.rows().enumerate() {
        for (x, &dark) in row.iter().enumerate() {
            if dark {
                path.push(format!("M{},{}h1v1h-1z", x as u32 + border, y as u32 + border));
            }
        }
    }

    let mut result = String::new();
    result += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
    result += "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n";
    result += &format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" viewBox=\"0 0 {0} {0}\" stroke=\"none\" shape-rendering=\"crispEdges\">\n",
        dimension
    );
    result += "\t<rect width=\"100%\" height=\"100%\" fill=\"#FFFFFF\"/>\n";
    result += &format!("\t<path d=\"{}\" fill=\"#000000\"/>\n", path.join(" "));
    result += "</svg>\n";
    result
}

/// Two characters per module so the symbol looks square in a terminal.
pub fn to_terminal_string(qr: &QrCode, border: u32) -> String {
    let grid = qr.module_grid(border);
    let mut result = String::with_capacity(grid.len() * (grid.len() * 6 + 1));
    for row in &grid {
        for &dark in row {
            result.push_str(if dark { "██" } else { "  " });
        }
        result.push('\n');
    }
    result
}
