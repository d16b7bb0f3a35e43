// Sortvis Algorithm Identity
//
// The closed set of sorts the visualizer knows how to animate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ConfigError;

/// Key selecting one of the animated sorting algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlgorithmKey {
    QuickSort,
    ShellSort,
    InsertionSort,
    SelectionSort,
    BubbleSort,
}

impl AlgorithmKey {
    /// Every algorithm, in the order the board lays them out
    pub const ALL: [AlgorithmKey; 5] = [
        AlgorithmKey::QuickSort,
        AlgorithmKey::ShellSort,
        AlgorithmKey::InsertionSort,
        AlgorithmKey::SelectionSort,
        AlgorithmKey::BubbleSort,
    ];

    /// The camelCase key, e.g. `quickSort`
    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmKey::QuickSort => "quickSort",
            AlgorithmKey::ShellSort => "shellSort",
            AlgorithmKey::InsertionSort => "insertionSort",
            AlgorithmKey::SelectionSort => "selectionSort",
            AlgorithmKey::BubbleSort => "bubbleSort",
        }
    }

    /// Human readable title, e.g. `Quick Sort`
    pub fn display_name(&self) -> String {
        format_algo_name(self.as_str())
    }
}

impl fmt::Display for AlgorithmKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmKey {
    type Err = ConfigError;

    /// Parse a key, ignoring case (`quicksort`, `QuickSort` and `quickSort` all match)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        AlgorithmKey::ALL
            .into_iter()
            .find(|key| key.as_str().to_lowercase() == wanted)
            .ok_or_else(|| ConfigError::UnknownAlgorithm(s.to_string()))
    }
}

/// Split a camelCase key into words and capitalise the first letter.
///
/// A space is inserted wherever a lowercase letter is directly followed by an
/// uppercase one, so `quickSort` becomes `Quick Sort`.
pub fn format_algo_name(key: &str) -> String {
    let mut pretty = String::with_capacity(key.len() + 4);
    let mut previous: Option<char> = None;

    for c in key.chars() {
        if let Some(p) = previous {
            if p.is_ascii_lowercase() && c.is_ascii_uppercase() {
                pretty.push(' ');
            }
        }
        pretty.push(c);
        previous = Some(c);
    }

    let mut chars = pretty.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
