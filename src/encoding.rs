use crate::{Error, Result};
use tracing::debug;

/// Maps crop names to the integer codes the models were trained on.
///
/// Classes are kept sorted and de-duplicated, so a crop's code is its rank in
/// lexicographic order regardless of how the crop list was configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropEncoder {
    classes: Vec<String>,
}

impl CropEncoder {
    pub fn fit<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut classes: Vec<String> = labels.into_iter().map(Into::into).collect();
        classes.sort();
        classes.dedup();

        debug!("Fitted crop encoder over {} classes", classes.len());
        Self { classes }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn encode(&self, label: &str) -> Result<usize> {
        self.classes
            .binary_search_by(|class| class.as_str().cmp(label))
            .map_err(|_| Error::UnknownLabel {
                label: label.to_string(),
            })
    }

    pub fn decode(&self, code: usize) -> Option<&str> {
        self.classes.get(code).map(String::as_str)
    }
}
