//! Sequential track numbering across a batch.

/// Padded track numbers are never narrower than this.
const MIN_PADDED_WIDTH: usize = 2;

/// Per-file `(track, track_total)` strings, aligned 1:1 with the file order.
///
/// With `padding`, track numbers are zero-filled to the digit count of the
/// total, with a floor of two digits. A single file still gets `("01", "1")`.
///
/// Computed once up front from the frozen order, so the writer never has to
/// look a file's position up mid-batch.
pub fn allocate(file_count: usize, padding: bool) -> Vec<(String, String)> {
    let total = file_count.to_string();
    let width = total.len().max(MIN_PADDED_WIDTH);

    (1..=file_count)
        .map(|i| {
            let track = if padding {
                format!("{i:0width$}")
            } else {
                i.to_string()
            };
            (track, total.clone())
        })
        .collect()
}

/// What the track/track_total columns preview: `"01;02;03"` and `"3"`.
/// An empty set previews as `("", "")`.
pub fn preview(file_count: usize, padding: bool) -> (String, String) {
    if file_count == 0 {
        return (String::new(), String::new());
    }
    let numbers = allocate(file_count, padding);
    let track = numbers
        .iter()
        .map(|(t, _)| t.as_str())
        .collect::<Vec<_>>()
        .join(";");
    (track, file_count.to_string())
}
