// Mention Detector - drug names inside document titles
//
// Plain case-insensitive substring matching, the same test as
// `Drug::is_name_mentioned`, with drug names lower-cased once up front.
// No tokenization: "ethanol" is found inside "methanol".

use rayon::prelude::*;

use crate::domain::{Drug, EntityId};

pub struct MentionDetector {
    /// (drug id, lower-cased name), in drug creation order
    drugs: Vec<(EntityId, String)>,
    parallel: bool,
}

impl MentionDetector {
    /// Index the given drugs; an empty name matches every title
    pub fn new<'a>(drugs: impl IntoIterator<Item = &'a Drug>, parallel: bool) -> Self {
        let drugs = drugs
            .into_iter()
            .map(|drug| (drug.id, drug.name.to_lowercase()))
            .collect();
        Self { drugs, parallel }
    }

    pub fn len(&self) -> usize {
        self.drugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drugs.is_empty()
    }

    /// Ids of the drugs named in `title`, in drug creation order
    ///
    /// The parallel scan collects in the same order as the sequential one.
    pub fn mentioned_in(&self, title: &str) -> Vec<EntityId> {
        let title = title.to_lowercase();
        if self.parallel {
            self.drugs
                .par_iter()
                .filter(|(_, name)| title.contains(name.as_str()))
                .map(|(id, _)| *id)
                .collect()
        } else {
            self.drugs
                .iter()
                .filter(|(_, name)| title.contains(name.as_str()))
                .map(|(id, _)| *id)
                .collect()
        }
    }
}
