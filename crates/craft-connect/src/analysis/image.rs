use serde::{Deserialize, Serialize};

use super::domain::ImageRef;
use super::tagging::{category_names, TaggingResult};

/// Labels at or above this score may contribute categories.
pub const LABEL_MERGE_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageLabel {
    pub label: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassificationError {
    #[error("image could not be read: {0}")]
    Unreadable(String),
    #[error("image classifier unavailable: {0}")]
    Unavailable(String),
}

/// External pretrained model that labels product photos.
pub trait ImageClassifier: Send + Sync {
    fn classify(&self, image: &ImageRef) -> Result<Vec<ImageLabel>, ClassificationError>;
}

/// Merges tag categories named by confident labels, using the label score as
/// the category confidence. Returns the categories that were added.
pub fn merge_labels(tags: &mut TaggingResult, labels: &[ImageLabel]) -> Vec<String> {
    let mut added = Vec::new();

    for label in labels
        .iter()
        .filter(|label| label.score.is_finite() && label.score >= LABEL_MERGE_THRESHOLD)
    {
        let text = label.label.to_lowercase();
        for category in category_names() {
            let spoken = category.replace('_', " ");
            if (text.contains(category) || text.contains(&spoken)) && tags.merge_category(category, label.score)
            {
                added.push(category.to_string());
            }
        }
    }

    added
}
