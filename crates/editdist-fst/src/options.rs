// Generation options shared by the resolver and the builder.

use crate::EditDistError;
use crate::symbols::DEFAULT_EPSILON;

/// Largest accepted distance; the final chain state must leave room for one
/// more state number.
pub const MAX_DISTANCE: u32 = u32::MAX - 1;

/// Options controlling the shape of the generated transducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDistanceOptions {
    /// ATT spelling of the empty symbol.
    pub epsilon: String,
    /// Maximum number of edits; must be in `1..=MAX_DISTANCE`.
    pub distance: u32,
    /// Whether adjacent-symbol transpositions are generated.
    pub swaps: bool,
}

impl Default for EditDistanceOptions {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON.to_string(),
            distance: 1,
            swaps: false,
        }
    }
}

impl EditDistanceOptions {
    pub fn validate(&self) -> Result<(), EditDistError> {
        if self.distance == 0 {
            return Err(EditDistError::InvalidOption(
                "distance must be at least 1".to_string(),
            ));
        }
        if self.distance > MAX_DISTANCE {
            return Err(EditDistError::InvalidOption(format!(
                "distance {} exceeds the maximum of {MAX_DISTANCE}",
                self.distance
            )));
        }
        if self.epsilon.is_empty() {
            return Err(EditDistError::InvalidOption(
                "epsilon symbol must not be empty".to_string(),
            ));
        }
        if self.epsilon.contains(['\t', '\n']) {
            return Err(EditDistError::InvalidOption(format!(
                "epsilon symbol {:?} contains a field separator",
                self.epsilon
            )));
        }
        Ok(())
    }
}
