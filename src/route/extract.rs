/// Extract the value for `label` from a line of tab-separated `label:value`
/// fields.
///
/// Returns the value of the first field whose label matches exactly, or
/// `None` when no field matches. Fields without a colon are skipped, so
/// malformed input never fails extraction.
pub fn extract_value<'a>(record: &'a str, label: &str) -> Option<&'a str> {
    record.split('\t').find_map(|field| {
        let (name, value) = field.split_once(':')?;
        (name == label).then_some(value)
    })
}
