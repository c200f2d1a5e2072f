use super::QuadBounds;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a tracked detection
///
/// A newer detection with the same id supersedes the older one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Barcode encoding standards the platform recognizers report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbologyKind {
    /// Aztec 2D code
    Aztec,
    /// Codabar
    Codabar,
    /// Code 39
    Code39,
    /// Code 93
    Code93,
    /// Code 128
    Code128,
    /// Data Matrix
    DataMatrix,
    /// EAN-8
    Ean8,
    /// EAN-13
    Ean13,
    /// GS1 DataBar
    Gs1DataBar,
    /// Interleaved 2 of 5
    I2of5,
    /// ITF-14
    Itf14,
    /// MicroPDF417
    MicroPdf417,
    /// Micro QR
    MicroQr,
    /// PDF417
    Pdf417,
    /// QR code
    Qr,
    /// UPC-E
    Upce,
}

impl SymbologyKind {
    /// Every supported symbology
    pub const ALL: [Self; 16] = [
        SymbologyKind::Aztec,
        SymbologyKind::Codabar,
        SymbologyKind::Code39,
        SymbologyKind::Code93,
        SymbologyKind::Code128,
        SymbologyKind::DataMatrix,
        SymbologyKind::Ean8,
        SymbologyKind::Ean13,
        SymbologyKind::Gs1DataBar,
        SymbologyKind::I2of5,
        SymbologyKind::Itf14,
        SymbologyKind::MicroPdf417,
        SymbologyKind::MicroQr,
        SymbologyKind::Pdf417,
        SymbologyKind::Qr,
        SymbologyKind::Upce,
    ];

    /// Stable lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            SymbologyKind::Aztec => "aztec",
            SymbologyKind::Codabar => "codabar",
            SymbologyKind::Code39 => "code39",
            SymbologyKind::Code93 => "code93",
            SymbologyKind::Code128 => "code128",
            SymbologyKind::DataMatrix => "datamatrix",
            SymbologyKind::Ean8 => "ean8",
            SymbologyKind::Ean13 => "ean13",
            SymbologyKind::Gs1DataBar => "gs1databar",
            SymbologyKind::I2of5 => "i2of5",
            SymbologyKind::Itf14 => "itf14",
            SymbologyKind::MicroPdf417 => "micropdf417",
            SymbologyKind::MicroQr => "microqr",
            SymbologyKind::Pdf417 => "pdf417",
            SymbologyKind::Qr => "qr",
            SymbologyKind::Upce => "upce",
        }
    }
}

impl fmt::Display for SymbologyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SymbologyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| format!("unknown symbology: {s}"))
    }
}

/// Symbology attached to a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Symbology {
    /// Recognizer reported a known symbology
    Known(SymbologyKind),
    /// No symbology (text items, or one we do not model)
    #[default]
    Unknown,
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbology::Known(kind) => kind.fmt(f),
            Symbology::Unknown => f.write_str("unknown"),
        }
    }
}

/// What a detection contains
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    /// A machine-readable code with its decoded payload, if any
    Barcode {
        /// Encoding standard
        symbology: Symbology,
        /// Decoded payload string
        payload: Option<String>,
    },
    /// Recognized plain text
    Text {
        /// Text transcript
        transcript: String,
    },
}

/// A single detection from the camera pipeline or a still-image recognizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedItem {
    /// Tracking identifier
    pub id: ItemId,
    /// Reported corners, in whatever rotation the source used
    pub bounds: QuadBounds,
    /// Contents
    pub kind: ItemKind,
}

impl DetectedItem {
    /// Create a barcode detection
    pub fn barcode(
        id: ItemId,
        bounds: QuadBounds,
        symbology: Symbology,
        payload: Option<String>,
    ) -> Self {
        Self {
            id,
            bounds,
            kind: ItemKind::Barcode { symbology, payload },
        }
    }

    /// Create a text detection
    pub fn text(id: ItemId, bounds: QuadBounds, transcript: impl Into<String>) -> Self {
        Self {
            id,
            bounds,
            kind: ItemKind::Text {
                transcript: transcript.into(),
            },
        }
    }
}

/// Where a result came from, as attached to each [`Barcode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provenance {
    /// Live camera; `centered` is set when the item covers the crosshair
    Camera {
        /// Whether the item overlaps the center target
        centered: bool,
    },
    /// Still image or document
    File,
}

/// Source tag passed alongside a batch of results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureSource {
    /// Live camera
    Camera,
    /// Still image or document
    File,
}

impl From<Provenance> for CaptureSource {
    fn from(p: Provenance) -> Self {
        match p {
            Provenance::Camera { .. } => CaptureSource::Camera,
            Provenance::File => CaptureSource::File,
        }
    }
}

/// Caller-facing scan result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barcode {
    id: ItemId,
    payload: Option<String>,
    symbology: Symbology,
    provenance: Provenance,
}

impl Barcode {
    /// Build a result from a detection. Text detections carry their transcript
    /// as the payload and an unknown symbology.
    pub fn from_item(item: &DetectedItem, provenance: Provenance) -> Self {
        let (payload, symbology) = match &item.kind {
            ItemKind::Barcode { symbology, payload } => (payload.clone(), *symbology),
            ItemKind::Text { transcript } => (Some(transcript.clone()), Symbology::Unknown),
        };
        Self {
            id: item.id,
            payload,
            symbology,
            provenance,
        }
    }

    /// Identifier of the detection this came from
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Decoded payload
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    /// Encoding standard
    pub fn symbology(&self) -> Symbology {
        self.symbology
    }

    /// Where this came from
    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// True for camera results that covered the center target
    pub fn is_centered(&self) -> bool {
        matches!(self.provenance, Provenance::Camera { centered: true })
    }
}
