// Cluster shape labels and the phoneme cluster table

use std::fmt;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Syllable-cluster shapes, in extraction priority order.
///
/// `C` stands for one or more consonants, `V` for a single vowel and `Vv`
/// for a diphthong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClusterShape {
    #[serde(rename = "(C)V")]
    ConsonantsVowel,
    #[serde(rename = "(C)Vv")]
    ConsonantsDiphthong,
    #[serde(rename = "(C)V(C)")]
    ConsonantsVowelConsonants,
    #[serde(rename = "(C)Vv(C)")]
    ConsonantsDiphthongConsonants,
    #[serde(rename = "V(C)")]
    VowelConsonants,
    #[serde(rename = "Vv(C)")]
    DiphthongConsonants,
    #[serde(rename = "VV")]
    VowelVowel,
    #[serde(rename = "VvV")]
    VowelDiphthong,
    #[serde(rename = "VVv")]
    DiphthongVowel,
}

impl ClusterShape {
    /// All shapes in the order extraction tries them.
    pub const PRIORITY: [ClusterShape; 9] = [
        ClusterShape::ConsonantsVowel,
        ClusterShape::ConsonantsDiphthong,
        ClusterShape::ConsonantsVowelConsonants,
        ClusterShape::ConsonantsDiphthongConsonants,
        ClusterShape::VowelConsonants,
        ClusterShape::DiphthongConsonants,
        ClusterShape::VowelVowel,
        ClusterShape::VowelDiphthong,
        ClusterShape::DiphthongVowel,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ClusterShape::ConsonantsVowel => "(C)V",
            ClusterShape::ConsonantsDiphthong => "(C)Vv",
            ClusterShape::ConsonantsVowelConsonants => "(C)V(C)",
            ClusterShape::ConsonantsDiphthongConsonants => "(C)Vv(C)",
            ClusterShape::VowelConsonants => "V(C)",
            ClusterShape::DiphthongConsonants => "Vv(C)",
            ClusterShape::VowelVowel => "VV",
            ClusterShape::VowelDiphthong => "VvV",
            ClusterShape::DiphthongVowel => "VVv",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::PRIORITY.into_iter().find(|s| s.label() == label)
    }
}

impl fmt::Display for ClusterShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mapping from cluster text to the shape it was first found as.
///
/// Insertion is first-write-wins: a cluster keeps the label it was given the
/// first time it was seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterTable {
    clusters: HashMap<String, ClusterShape>,
}

impl ClusterTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a cluster unless it is already present.
    ///
    /// Returns `true` if the cluster was new.
    pub fn insert(&mut self, cluster: &str, shape: ClusterShape) -> bool {
        if self.clusters.contains_key(cluster) {
            return false;
        }
        self.clusters.insert(cluster.to_string(), shape);
        true
    }

    pub fn get(&self, cluster: &str) -> Option<ClusterShape> {
        self.clusters.get(cluster).copied()
    }

    pub fn contains(&self, cluster: &str) -> bool {
        self.clusters.contains_key(cluster)
    }

    pub fn clear(&mut self) {
        self.clusters.clear();
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ClusterShape)> {
        self.clusters.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Clusters sorted by shape priority, then by text.
    pub fn sorted(&self) -> Vec<(&str, ClusterShape)> {
        let mut all: Vec<_> = self.iter().collect();
        all.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        all
    }
}
