use super::BarcodeRecognizer;
use crate::error::Result;
use crate::models::{DetectedItem, ItemId, Point, QuadBounds, Symbology, SymbologyKind};
use image::DynamicImage;

/// QR recognizer backed by `rqrr`
///
/// Grids that are located but fail to decode are skipped. Item ids are
/// assigned in detection order, starting at zero for every image.
#[derive(Debug, Default, Clone, Copy)]
pub struct QrRecognizer;

impl QrRecognizer {
    /// Create a recognizer
    pub fn new() -> Self {
        Self
    }
}

impl BarcodeRecognizer for QrRecognizer {
    fn recognize(&self, image: &DynamicImage) -> Result<Vec<DetectedItem>> {
        let gray = image.to_luma8();
        let (width, height) = (gray.width() as usize, gray.height() as usize);
        if width == 0 || height == 0 {
            return Ok(Vec::new());
        }

        let raw = gray.as_raw();
        let mut prepared =
            rqrr::PreparedImage::prepare_from_greyscale(width, height, |x, y| raw[y * width + x]);
        let grids = prepared.detect_grids();

        let (sx, sy) = (1.0 / width as f32, 1.0 / height as f32);
        let mut items = Vec::with_capacity(grids.len());
        for grid in grids {
            // rqrr lists corners clockwise from the code's own top-left.
            let corners = grid
                .bounds
                .map(|p| Point::new(p.x as f32 * sx, p.y as f32 * sy));
            match grid.decode() {
                Ok((_meta, content)) => {
                    items.push(DetectedItem::barcode(
                        ItemId(items.len() as u64),
                        QuadBounds::from_corners_clockwise(corners),
                        Symbology::Known(SymbologyKind::Qr),
                        Some(content),
                    ));
                }
                Err(err) => {
                    tracing::debug!(error = ?err, "skipping undecodable QR grid");
                }
            }
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};
    use qrcode::{Color, QrCode};

    /// Render `data` as a QR code with a 4-module quiet zone, `scale` px per module.
    fn render_qr(data: &str, scale: u32) -> GrayImage {
        let code = QrCode::new(data.as_bytes()).expect("encodable payload");
        let modules = code.width() as u32;
        let colors = code.to_colors();
        let quiet = 4;
        let side = (modules + 2 * quiet) * scale;
        let mut img = GrayImage::from_pixel(side, side, Luma([255]));
        for (i, color) in colors.iter().enumerate() {
            if *color != Color::Dark {
                continue;
            }
            let mx = i as u32 % modules + quiet;
            let my = i as u32 / modules + quiet;
            for dy in 0..scale {
                for dx in 0..scale {
                    img.put_pixel(mx * scale + dx, my * scale + dy, Luma([0]));
                }
            }
        }
        img
    }

    #[test]
    fn test_blank_image_has_no_codes() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(64, 64, Luma([255])));
        assert!(QrRecognizer.recognize(&img).unwrap().is_empty());
    }

    #[test]
    fn test_empty_image() {
        let img = DynamicImage::ImageLuma8(GrayImage::new(0, 0));
        assert!(QrRecognizer.recognize(&img).unwrap().is_empty());
    }

    #[test]
    fn test_decodes_rendered_code() {
        let img = DynamicImage::ImageLuma8(render_qr("https://example.com/center", 6));
        let items = QrRecognizer.recognize(&img).unwrap();
        assert_eq!(items.len(), 1);

        let item = &items[0];
        assert_eq!(item.id, ItemId(0));
        match &item.kind {
            crate::models::ItemKind::Barcode { symbology, payload } => {
                assert_eq!(*symbology, Symbology::Known(SymbologyKind::Qr));
                assert_eq!(payload.as_deref(), Some("https://example.com/center"));
            }
            other => panic!("unexpected kind {other:?}"),
        }

        // Normalized bounds sit inside the unit square around the image center.
        let b = item.bounds.normalized().to_box();
        assert!(b.x > 0.0 && b.y > 0.0);
        assert!(b.max_x() < 1.0 && b.max_y() < 1.0);
        let c = b.center();
        assert!((c.x - 0.5).abs() < 0.1 && (c.y - 0.5).abs() < 0.1);
    }
}
