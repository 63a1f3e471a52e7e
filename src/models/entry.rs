use serde::{Serialize, Serializer};

use crate::models::date::DateKey;

/// A diary entry: the text stored for one calendar day.
///
/// Entries are immutable value snapshots; the only mutation path is
/// full replacement of the content for a given key. An empty content
/// string means "no entry yet": the file-backed store does not
/// distinguish "never written" from "written empty", a known
/// limitation inherited from the storage layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiaryEntry {
    /// The day this entry belongs to, presented in hyphenated form.
    #[serde(serialize_with = "hyphenated")]
    pub date: DateKey,
    /// The entry body, exactly as stored.
    pub content: String,
}

fn hyphenated<S: Serializer>(
    date: &DateKey,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&date.hyphenated())
}
