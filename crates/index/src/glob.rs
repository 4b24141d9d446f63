use serde::{Deserialize, Serialize};

use bag::Bag;

use crate::Column;

/// The shared bags that index table rows point into.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Glob {
    #[serde(default)]
    pub pointers: Bag,
    #[serde(default)]
    pub frames: Bag,
}

impl Glob {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty bags, each with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pointers: Bag::with_capacity(capacity),
            frames: Bag::with_capacity(capacity),
        }
    }

    #[must_use]
    pub fn bag(&self, column: Column) -> &Bag {
        match column {
            Column::Pointers => &self.pointers,
            Column::Frames => &self.frames,
        }
    }

    pub fn bag_mut(&mut self, column: Column) -> &mut Bag {
        match column {
            Column::Pointers => &mut self.pointers,
            Column::Frames => &mut self.frames,
        }
    }
}
