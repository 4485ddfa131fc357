/// The first candidate that is not blank, in order.
///
/// Used for image selection: the preferred sprite wins, later entries are
/// only consulted when everything before them is empty.
pub fn first_available<S: AsRef<str>>(candidates: &[S]) -> Option<&str> {
    candidates
        .iter()
        .map(AsRef::as_ref)
        .find(|c| !c.trim().is_empty())
}

/// `value`, or `"Unknown"` when absent.
pub fn or_unknown(value: Option<String>) -> String {
    value.unwrap_or_else(|| "Unknown".to_string())
}
