//! Sample and wire types for the fine-tuning dataset API

use serde::{Deserialize, Serialize};

/// Dataset partition label assigned to a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Validation,
    Test,
}

impl Split {
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Validation => "validation",
            Split::Test => "test",
        }
    }
}

impl std::fmt::Display for Split {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Split {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "train" => Ok(Split::Train),
            "validation" => Ok(Split::Validation),
            "test" => Ok(Split::Test),
            other => Err(crate::Error::InvalidInput(format!(
                "Unknown split: {other}"
            ))),
        }
    }
}

/// One audio+transcription+metadata record in the fine-tuning dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    /// Backend-assigned identifier (file path stem)
    pub id: String,
    /// Current saved transcription text
    pub transcription: String,
    /// Dataset partition
    pub split: Split,
    /// Audio duration in seconds (missing for unanalyzed recordings)
    pub duration: Option<f64>,
    pub audio_path: String,
    pub text_path: String,
    pub json_path: String,
    /// Recording time, epoch seconds
    pub timestamp: Option<i64>,
    /// STT engine that produced the recording (e.g. "whisper", "vosk")
    pub engine: String,
}

/// Response body for `GET /api/finetune/samples`
#[derive(Debug, Clone, Deserialize)]
pub struct SamplesResponse {
    pub success: bool,
    #[serde(default)]
    pub samples: Vec<Sample>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One pending transcription update within a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionUpdate {
    pub text_path: String,
    pub json_path: String,
    pub transcription: String,
}

/// Request body for `POST /api/finetune/batch_update`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchUpdateRequest {
    pub updates: Vec<TranscriptionUpdate>,
}

/// One split reassignment within a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitUpdate {
    pub audio_path: String,
    pub text_path: String,
    pub json_path: String,
    pub split: Split,
}

/// Request body for `POST /api/finetune/batch_change_split`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchChangeSplitRequest {
    pub updates: Vec<SplitUpdate>,
}

/// File paths identifying one sample for deletion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleFiles {
    pub audio_path: String,
    pub text_path: String,
    pub json_path: String,
}

/// Request body for `POST /api/finetune/batch_delete`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchDeleteRequest {
    pub samples: Vec<SampleFiles>,
}

/// Generic backend response for the batch endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}
