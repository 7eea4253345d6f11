/// Converts a 1-based line and column, as reported by `serde_json`, into a byte offset in
/// the source text. Positions past the end are clamped to the end of the text.
pub fn offset_of_line_and_column(source: &str, line: usize, column: usize) -> usize {
    let mut offset = 0;
    for (i, text) in source.split_inclusive('\n').enumerate() {
        if i + 1 == line {
            return (offset + column.saturating_sub(1)).min(source.len());
        }
        offset += text.len();
    }
    source.len()
}
