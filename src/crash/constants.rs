/// File name reported for frames without a usable source location.
pub const UNKNOWN_FILE_NAME: &str = "<unknown>";

/// Label of the separator frame emitted before a single inner exception.
pub const INNER_EXCEPTION_LABEL: &str = "(Inner Exception)";

/// Label of the separator frame emitted before the `index`-th aggregated exception.
pub fn aggregated_inner_exception_label(index: usize) -> String {
    format!("(Inner Exception #{index})")
}
