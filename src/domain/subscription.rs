use serde::{Deserialize, Serialize};

/// A user-named pointer to a feed of interest.
///
/// The persisted mapping is name -> URL, so names are unique by construction
/// and re-adding an existing name replaces that name's URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subscription {
    pub name: String,
    pub url: String,
}

impl Subscription {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}
