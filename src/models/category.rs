/// Find a configured category by name (case-insensitive), returning its
/// canonical spelling.
pub(crate) fn find_by_name<'a>(categories: &'a [String], name: &str) -> Option<&'a str> {
    let lower = name.trim().to_lowercase();
    if lower.is_empty() {
        return None;
    }
    categories
        .iter()
        .find(|c| c.to_lowercase() == lower)
        .map(String::as_str)
}
