use super::*;

#[test]
fn test_line_lookup() {
    let source = "a\nbc\n\nd";
    let table = LineOffsetTable::build(source);

    assert_eq!(table.line_count(), 4);
    assert_eq!(table.offset_to_line_col(source, 0), (1, 1));
    assert_eq!(table.offset_to_line_col(source, 3), (2, 2));
    assert_eq!(table.offset_to_line_col(source, 5), (3, 1));
    assert_eq!(table.offset_to_line_col(source, 6), (4, 1));
}

#[test]
fn test_offset_past_end_clamps() {
    let source = "ab";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.offset_to_line_col(source, 10), (1, 3));
}

#[test]
fn test_columns_count_chars() {
    let source = "é x";
    let table = LineOffsetTable::build(source);
    // 'x' is at byte 3 but char 3.
    assert_eq!(table.offset_to_line_col(source, 3), (1, 3));
}

#[test]
fn test_line_text() {
    let source = "first\r\nsecond\n";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.line_text(source, 1), Some("first"));
    assert_eq!(table.line_text(source, 2), Some("second"));
    assert_eq!(table.line_text(source, 3), Some(""));
    assert_eq!(table.line_text(source, 4), None);
    assert_eq!(table.line_text(source, 0), None);
}
