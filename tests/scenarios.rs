use led_buffer::{PieceTable, Position};

#[test]
fn two_line_document_addresses_consistently() {
    let mut table = PieceTable::new("abc\ndef");
    assert_eq!(table.line_count(), 2);
    assert_eq!(table.get_line_content(1), "abc");
    assert_eq!(table.get_line_content(2), "def");
    assert_eq!(table.get_offset_at(Position::new(2, 1)), 4);
    assert_eq!(table.get_position_at(4), Position::new(2, 1));
}

#[test]
fn sequential_appends_into_empty_table_stay_single_line() {
    let mut table = PieceTable::new("");
    table.insert("hello", 0).unwrap();
    table.insert(" world", 5).unwrap();
    assert_eq!(table.get_lines_content(), "hello world");
    assert_eq!(table.line_count(), 1);
}

#[test]
fn deleting_a_middle_line_merges_its_neighbors() {
    let mut table = PieceTable::new("abc\ndef\nghi");
    table.delete(4, 4); // "def\n"
    assert_eq!(table.get_lines_content(), "abc\nghi");
    assert_eq!(table.line_count(), 2);
    assert_eq!(table.get_line_content(2), "ghi");
}

#[test]
fn inserting_before_a_line_feed_extends_that_line() {
    let mut table = PieceTable::new("line1\nline2");
    table.insert("X", 5).unwrap();
    assert_eq!(table.get_line_content(1), "line1X");
    assert_eq!(table.line_count(), 2);
}

#[test]
fn inserting_a_line_feed_mid_piece_splits_without_empty_pieces() {
    let mut table = PieceTable::new("ab");
    table.insert("\n", 1).unwrap();
    assert_eq!(table.line_count(), 2);
    assert_eq!(table.get_line_content(1), "a");
    assert_eq!(table.get_line_content(2), "b");
    // No zero-length pieces survive: every byte of the document must be
    // accounted for by substr over the full range without panicking.
    assert_eq!(table.substr(0, table.len()), "a\nb");
}
