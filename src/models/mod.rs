/// Detections and reported results
pub mod barcode;
/// Points and sizes
pub mod point;
/// Quadrilaterals and boxes
pub mod quad;

pub use barcode::{
    Barcode, CaptureSource, DetectedItem, ItemId, ItemKind, Provenance, Symbology, SymbologyKind,
};
pub use point::{Point, Size};
pub use quad::{AxisAlignedBox, QuadBounds, Rotation};
