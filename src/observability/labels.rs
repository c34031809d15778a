use metrics::{IntoLabels, Label, SharedString};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key-value tags attached to every metric a component emits.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Labels(BTreeMap<String, String>);

impl Labels {
    pub fn empty() -> Self {
        Labels::default()
    }

    pub fn new(labels: &[(impl ToString, impl ToString)]) -> Self {
        Labels(
            labels
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        )
    }

    /// Clones the labels and adds (or overrides) the given ones.
    pub fn clone_with_labels(&self, additional: Labels) -> Labels {
        let mut tags = self.0.clone();
        tags.extend(additional.0);
        Labels(tags)
    }
}

impl IntoLabels for Labels {
    fn into_labels(self) -> Vec<Label> {
        self.0
            .into_iter()
            .map(|(key, value)| Label::new(SharedString::from(key), SharedString::from(value)))
            .collect()
    }
}

impl IntoLabels for &Labels {
    fn into_labels(self) -> Vec<Label> {
        self.clone().into_labels()
    }
}
