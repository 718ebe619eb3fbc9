//! Type definitions for the surveillance pipeline

use centroidtrack::Rect;
use serde::{Deserialize, Serialize};

/// Detector classes of the MobileNet-SSD model used by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectClass {
    Background,
    Aeroplane,
    Bicycle,
    Bird,
    Boat,
    Bottle,
    Bus,
    Car,
    Cat,
    Chair,
    Cow,
    DiningTable,
    Dog,
    Horse,
    Motorbike,
    Person,
    PottedPlant,
    Sheep,
    Sofa,
    Train,
    TvMonitor,
}

impl ObjectClass {
    const ALL: [ObjectClass; 21] = [
        Self::Background,
        Self::Aeroplane,
        Self::Bicycle,
        Self::Bird,
        Self::Boat,
        Self::Bottle,
        Self::Bus,
        Self::Car,
        Self::Cat,
        Self::Chair,
        Self::Cow,
        Self::DiningTable,
        Self::Dog,
        Self::Horse,
        Self::Motorbike,
        Self::Person,
        Self::PottedPlant,
        Self::Sheep,
        Self::Sofa,
        Self::Train,
        Self::TvMonitor,
    ];

    /// Create from the raw detector class index
    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Raw detector class index
    pub fn id(&self) -> u32 {
        Self::ALL.iter().position(|c| c == self).unwrap() as u32
    }

    /// Class name as reported by the detector
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Aeroplane => "aeroplane",
            Self::Bicycle => "bicycle",
            Self::Bird => "bird",
            Self::Boat => "boat",
            Self::Bottle => "bottle",
            Self::Bus => "bus",
            Self::Car => "car",
            Self::Cat => "cat",
            Self::Chair => "chair",
            Self::Cow => "cow",
            Self::DiningTable => "diningtable",
            Self::Dog => "dog",
            Self::Horse => "horse",
            Self::Motorbike => "motorbike",
            Self::Person => "person",
            Self::PottedPlant => "pottedplant",
            Self::Sheep => "sheep",
            Self::Sofa => "sofa",
            Self::Train => "train",
            Self::TvMonitor => "tvmonitor",
        }
    }

    /// Classes the pipeline tracks
    pub fn is_target(&self) -> bool {
        matches!(
            self,
            Self::Person | Self::Bicycle | Self::Car | Self::Bus | Self::Train | Self::Motorbike
        )
    }

    /// Classes expected to carry a license plate
    pub fn bears_plate(&self) -> bool {
        matches!(self, Self::Car | Self::Motorbike)
    }

    /// Fixed overlay color (RGB) for target classes; white otherwise
    pub fn color(&self) -> [u8; 3] {
        match self {
            Self::Person => [0, 255, 0],
            Self::Bicycle => [255, 0, 0],
            Self::Car => [0, 0, 255],
            Self::Bus => [0, 255, 255],
            Self::Train => [255, 0, 255],
            Self::Motorbike => [255, 255, 0],
            _ => [255, 255, 255],
        }
    }
}

impl std::fmt::Display for ObjectClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Bounding box in pixel coordinates, corners inclusive-exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl BoundingBox {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    /// Convert to the tracker's rectangle type
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x1, self.y1, self.x2, self.y2)
    }
}

/// Single detection produced by the object detector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub bbox: BoundingBox,
    pub class: ObjectClass,
    /// Detection confidence score (0-1)
    pub confidence: f32,
}

impl Detection {
    pub fn new(bbox: BoundingBox, class: ObjectClass, confidence: f32) -> Self {
        Self {
            bbox,
            class,
            confidence,
        }
    }
}

/// Pixel format of raw frame data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    RGB,
    BGR,
    RGBA,
    BGRA,
    Grayscale,
}

/// Raw frame data handed to the detector and plate recognizer
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Raw pixel data
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Pixel format
    pub format: ImageFormat,
}

impl ImageData {
    pub fn new(data: Vec<u8>, width: u32, height: u32, format: ImageFormat) -> Self {
        Self {
            data,
            width,
            height,
            format,
        }
    }

    /// Load a frame from a file path (decoded to RGB)
    pub fn from_file(path: &str) -> crate::Result<Self> {
        use image::GenericImageView;

        let img = image::open(path)?;
        let (width, height) = img.dimensions();
        let data = img.to_rgb8().into_raw();

        Ok(Self {
            data,
            width,
            height,
            format: ImageFormat::RGB,
        })
    }

    /// Decode a frame from encoded bytes (decoded to RGB)
    pub fn from_bytes(bytes: &[u8]) -> crate::Result<Self> {
        use image::GenericImageView;

        let img = image::load_from_memory(bytes)?;
        let (width, height) = img.dimensions();
        let data = img.to_rgb8().into_raw();

        Ok(Self {
            data,
            width,
            height,
            format: ImageFormat::RGB,
        })
    }

    /// Number of channels for the pixel format
    pub fn channels(&self) -> u32 {
        match self.format {
            ImageFormat::RGB | ImageFormat::BGR => 3,
            ImageFormat::RGBA | ImageFormat::BGRA => 4,
            ImageFormat::Grayscale => 1,
        }
    }

    /// Validate data length against dimensions
    pub fn validate(&self) -> bool {
        let expected = (self.width * self.height * self.channels()) as usize;
        self.data.len() == expected
    }

    /// Extract the region of interest covered by `bbox`, clamped to the
    /// frame. Returns `None` when the clamped region is empty.
    pub fn crop(&self, bbox: &BoundingBox) -> Option<ImageData> {
        let channels = self.channels() as usize;
        let x1 = bbox.x1.clamp(0, self.width as i32) as usize;
        let y1 = bbox.y1.clamp(0, self.height as i32) as usize;
        let x2 = bbox.x2.clamp(0, self.width as i32) as usize;
        let y2 = bbox.y2.clamp(0, self.height as i32) as usize;

        if x2 <= x1 || y2 <= y1 {
            return None;
        }

        let mut data = Vec::with_capacity((x2 - x1) * (y2 - y1) * channels);
        for row in y1..y2 {
            let start = (row * self.width as usize + x1) * channels;
            let end = start + (x2 - x1) * channels;
            data.extend_from_slice(&self.data[start..end]);
        }

        Some(ImageData::new(
            data,
            (x2 - x1) as u32,
            (y2 - y1) as u32,
            self.format,
        ))
    }
}
