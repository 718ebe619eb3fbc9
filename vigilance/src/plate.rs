//! License-plate recognition interface
//!
//! The localizer/OCR stack is an external collaborator; the pipeline hands
//! it the cropped region of a plate-bearing track and expects zero or one
//! recognized string back.

use crate::error::Result;
use crate::types::ImageData;
use std::collections::VecDeque;

/// Common interface for plate recognizers
pub trait PlateRecognizer: Send {
    /// Recognize a plate in the region of interest, if any
    fn recognize(&mut self, region: &ImageData) -> Result<Option<String>>;

    /// Recognizer name (for logging/debugging)
    fn name(&self) -> &str;
}

/// Strip spaces from raw recognizer output
pub fn normalize_plate(raw: &str) -> String {
    raw.replace(' ', "")
}

/// Scripted recognizer that replays pre-canned responses.
/// Used in tests and examples in place of a real OCR stack.
pub struct ScriptedRecognizer {
    responses: VecDeque<Option<String>>,
}

impl ScriptedRecognizer {
    pub fn new<I>(responses: I) -> Self
    where
        I: IntoIterator<Item = Option<String>>,
    {
        Self {
            responses: responses.into_iter().collect(),
        }
    }
}

impl PlateRecognizer for ScriptedRecognizer {
    fn recognize(&mut self, _region: &ImageData) -> Result<Option<String>> {
        Ok(self.responses.pop_front().flatten())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
