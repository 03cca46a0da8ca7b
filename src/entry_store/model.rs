use serde::Deserialize;

/// One recurring calendar rule as stored in the JSON data file. `month_day`
/// carries the `"Mon-DD"` form with the localized month abbreviation;
/// `kind` is the raw type token, decoded only at projection time.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecurrenceEntry {
    pub name: String,
    pub month_day: String,
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecurrenceList {
    pub list: Vec<RecurrenceEntry>,
}
