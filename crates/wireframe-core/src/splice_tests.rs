use super::*;
use regex::Regex;

fn strip_labels(row: &str) -> String {
    Regex::new(r"\[\d+\]").unwrap().replace_all(row, "").into_owned()
}

fn label(col: i64, id: u32) -> PendingLabel {
    PendingLabel {
        col,
        ref_id: RefId(id),
    }
}

#[test]
fn test_insert_grows_row() {
    let mut row = RowBuffer::from("  HOME");
    let at = row.insert_label(2, "[1]");
    assert_eq!(at, 2);
    assert_eq!(row.to_string(), "  [1]HOME");
    assert_eq!(row.len(), 9);
}

#[test]
fn test_column_is_clamped() {
    let mut row = RowBuffer::from("abc");
    row.insert_label(-5, "[1]");
    row.insert_label(100, "[2]");
    assert_eq!(row.to_string(), "[1]abc[2]");
}

#[test]
fn test_insert_into_empty_row() {
    let mut row = RowBuffer::default();
    assert!(row.is_empty());
    row.insert_label(3, "[4]");
    assert_eq!(row.to_string(), "[4]");
}

#[test]
fn test_labels_never_bisect_a_bracket_span() {
    let mut row = RowBuffer::from("ab[7]cd");
    let at = row.insert_label(3, "[1]");
    assert_eq!(at, 2);
    assert_eq!(row.to_string(), "ab[1][7]cd");
}

#[test]
fn test_closing_bracket_position_shifts() {
    let mut row = RowBuffer::from("ab[7]cd");
    row.insert_label(4, "[1]");
    assert_eq!(row.to_string(), "ab[1][7]cd");
}

#[test]
fn test_after_bracket_span_no_shift() {
    let mut row = RowBuffer::from("ab[7]cd");
    row.insert_label(5, "[1]");
    assert_eq!(row.to_string(), "ab[7][1]cd");
}

#[test]
fn test_unclosed_bracket_does_not_shift() {
    let mut row = RowBuffer::from("a[bc");
    row.insert_label(3, "[1]");
    assert_eq!(row.to_string(), "a[b[1]c");
}

#[test]
fn test_splice_preserves_original_text() {
    let original = "  HOME   ABOUT  CONTACT   +-----+";
    let mut row = RowBuffer::from(original);
    let mut labels = vec![label(2, 1), label(9, 2), label(16, 3), label(26, 4)];
    row.splice(&mut labels);
    let spliced = row.to_string();
    assert_eq!(spliced, "  [1]HOME   [2]ABOUT  [3]CONTACT   [4]+-----+");
    assert_eq!(strip_labels(&spliced), original);
}

#[test]
fn test_splice_order_does_not_depend_on_input_order() {
    let mut a = RowBuffer::from("x  y  z");
    let mut b = a.clone();
    a.splice(&mut [label(0, 1), label(3, 2), label(6, 3)]);
    b.splice(&mut [label(6, 3), label(0, 1), label(3, 2)]);
    assert_eq!(a, b);
    assert_eq!(a.to_string(), "[1]x  [2]y  [3]z");
}

#[test]
fn test_collision_keeps_first_span_intact() {
    let mut row = RowBuffer::from("    LOGIN");
    row.splice(&mut [label(4, 1), label(4, 2)]);
    let spliced = row.to_string();
    assert_eq!(spliced, "    [1][2]LOGIN");
    assert!(spliced.contains("[2]"));
    assert_eq!(strip_labels(&spliced), "    LOGIN");
}

#[test]
fn test_splice_labels_clamps_rows_into_grid() {
    let mut grid = Grid::new(10, 3);
    grid.write(0, 1, "HOME");
    grid.write(2, 0, "+--+");
    let anchors = BTreeMap::from([
        (RefId(1), GridPoint::new(0, 1)),
        (RefId(2), GridPoint::new(2, 0)),
        (RefId(3), GridPoint::new(7, 0)),
        (RefId(4), GridPoint::new(-1, 0)),
    ]);
    let rows = splice_labels(grid, &anchors);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].to_string().trim_end(), "[4] [1]HOME");
    assert_eq!(rows[1].to_string().trim_end(), "");
    assert_eq!(rows[2].to_string().trim_end(), "[2][3]+--+");
}

#[test]
fn test_splice_labels_on_empty_grid() {
    let anchors = BTreeMap::from([(RefId(1), GridPoint::new(0, 0))]);
    assert!(splice_labels(Grid::new(0, 0), &anchors).is_empty());
}
