//! Integration tests for selection over segmented documents.
//!
//! Fixture: two segments of two lines each, measured with 8 px cells:
//!
//! ```text
//! 0   this is the first line\r\n
//! 24  this is the second line\r\n   <- separator at 47..49
//! 49  this is the third line\r\n
//! 73  this is the 4th line          <- ends at 93
//! ```

use insta::assert_json_snapshot;
use segtext::{
    Error, MonospaceShaper, Movement, OffsetRange, Point, Rect, SegmentId, Selectable,
    SelectableSegmentedText, SelectionChange, SelectionOptions, SelectionRange, SelectionSource,
};
use serde::Serialize;
use std::sync::{Arc, Mutex, Once};
use tracing::{debug, info};

fn setup_test_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

const CW: i32 = 8;
const LH: i32 = 13;

fn two_segments() -> (SelectableSegmentedText, SegmentId, SegmentId) {
    let mut doc = SelectableSegmentedText::with_shaper(Arc::new(MonospaceShaper::new(CW, LH)));
    let first = {
        let mut editor = doc.add_segment();
        editor
            .append_line("this is the first line")
            .append("this is the second line");
        editor.id()
    };
    let second = {
        let mut editor = doc.add_segment();
        editor
            .append_line("this is the third line")
            .append("this is the 4th line");
        editor.id()
    };
    (doc, first, second)
}

type Recorded = Arc<Mutex<Vec<SelectionChange>>>;

fn record_document(doc: &mut SelectableSegmentedText, sink: &Recorded) {
    let sink = Arc::clone(sink);
    doc.add_selection_listener(Box::new(move |change: &SelectionChange| {
        sink.lock().unwrap().push(*change);
    }));
}

fn record_segment(doc: &mut SelectableSegmentedText, id: SegmentId, sink: &Recorded) {
    let sink = Arc::clone(sink);
    doc.add_segment_selection_listener(
        id,
        Box::new(move |change: &SelectionChange| {
            sink.lock().unwrap().push(*change);
        }),
    )
    .unwrap();
}

fn bounds_only(changes: &[SelectionChange]) -> Vec<(Option<Rect>, Option<Rect>)> {
    changes
        .iter()
        .map(|c| (c.new_bounds, c.old_bounds))
        .collect()
}

// ============================================================================
// Caret Movement
// ============================================================================

mod movement {
    use super::*;

    fn next(doc: &SelectableSegmentedText, movement: Movement, cases: &[(usize, usize)]) {
        for &(from, to) in cases {
            assert_eq!(
                doc.next_offset(from, movement).unwrap(),
                to,
                "next {movement:?} from {from}"
            );
        }
    }

    fn previous(doc: &SelectableSegmentedText, movement: Movement, cases: &[(usize, usize)]) {
        for &(from, to) in cases {
            assert_eq!(
                doc.previous_offset(from, movement).unwrap(),
                to,
                "previous {movement:?} from {from}"
            );
        }
    }

    #[test]
    fn test_next_word_end() {
        setup_test_logging();
        let (doc, _, _) = two_segments();
        info!(len = doc.len_chars(), "movement fixture");
        next(
            &doc,
            Movement::WordEnd,
            &[
                (1, 4),
                (4, 7),
                (10, 11),
                (22, 22),
                (23, 28),
                (33, 35),
                (44, 47),
                (47, 47),
                (48, 53),
                (49, 53),
                (68, 71),
                (90, 93),
                (93, 93),
            ],
        );
    }

    #[test]
    fn test_next_word_and_word_start() {
        let (doc, _, _) = two_segments();
        let cases = [
            (2, 5),
            (5, 8),
            (13, 18),
            (20, 22),
            (23, 24),
            (44, 47),
            (48, 49),
            (49, 54),
            (90, 93),
        ];
        next(&doc, Movement::Word, &cases);
        next(&doc, Movement::WordStart, &cases);
    }

    #[test]
    fn test_next_char_and_cluster() {
        let (doc, _, _) = two_segments();
        next(
            &doc,
            Movement::Char,
            &[
                (0, 1),
                (4, 5),
                (22, 23),
                (23, 24),
                (47, 48),
                (48, 49),
                (49, 50),
                (92, 93),
                (93, 93),
            ],
        );
        // Clusters never stop inside a line terminator or separator.
        next(
            &doc,
            Movement::Cluster,
            &[
                (0, 1),
                (4, 5),
                (22, 22),
                (23, 24),
                (47, 47),
                (48, 49),
                (49, 50),
                (92, 93),
                (93, 93),
            ],
        );
        assert!(matches!(
            doc.next_offset(94, Movement::Cluster),
            Err(Error::OffsetOutOfRange { offset: 94, len: 93 })
        ));
    }

    #[test]
    fn test_previous_word_and_word_start() {
        let (doc, _, _) = two_segments();
        let cases = [
            (0, 0),
            (2, 0),
            (4, 0),
            (5, 0),
            (6, 5),
            (10, 8),
            (22, 18),
            (23, 22),
            (24, 22),
            (25, 24),
            (47, 43),
            (48, 43),
            (49, 47),
            (50, 49),
            (55, 54),
            (71, 67),
            (72, 71),
            (73, 71),
            (93, 89),
        ];
        previous(&doc, Movement::Word, &cases);
        previous(&doc, Movement::WordStart, &cases);
    }

    #[test]
    fn test_previous_word_end() {
        let (doc, _, _) = two_segments();
        previous(
            &doc,
            Movement::WordEnd,
            &[
                (0, 0),
                (3, 0),
                (6, 4),
                (22, 17),
                (23, 22),
                (24, 22),
                (25, 22),
                (29, 28),
                (47, 42),
                (48, 42),
                (49, 47),
                (50, 47),
                (93, 88),
            ],
        );
    }

    #[test]
    fn test_previous_char_and_cluster() {
        let (doc, _, _) = two_segments();
        previous(
            &doc,
            Movement::Char,
            &[
                (0, 0),
                (1, 0),
                (5, 4),
                (22, 21),
                (23, 22),
                (24, 23),
                (47, 46),
                (48, 47),
                (49, 48),
                (50, 49),
                (72, 71),
                (93, 92),
            ],
        );
        previous(
            &doc,
            Movement::Cluster,
            &[
                (0, 0),
                (1, 0),
                (5, 4),
                (22, 21),
                (23, 22),
                (24, 22),
                (25, 24),
                (47, 46),
                (48, 47),
                (49, 47),
                (50, 49),
                (93, 92),
            ],
        );
        assert!(doc.previous_offset(94, Movement::Cluster).is_err());
    }
}

// ============================================================================
// Lines and Geometry
// ============================================================================

mod lines {
    use super::*;

    #[test]
    fn test_line_ranges() {
        let mut doc = SelectableSegmentedText::new();
        doc.add_segment()
            .append_line("0123456789")
            .append_line("0123456789");
        doc.add_segment().append("0123456789");
        doc.add_segment().append("0123456789");

        let ranges: Vec<OffsetRange> = (0..doc.line_count())
            .map(|i| doc.line_range(i).unwrap())
            .collect();
        assert_eq!(
            ranges,
            vec![
                OffsetRange::new(0, 12),
                OffsetRange::new(12, 24),
                OffsetRange::new(24, 26),
                OffsetRange::new(26, 38),
                OffsetRange::new(38, 48),
            ]
        );
    }

    #[test]
    fn test_lines() {
        let mut doc = SelectableSegmentedText::new();
        doc.add_segment()
            .append_line("0123456789")
            .append_line("abcdefghij");
        doc.add_segment().append("0123456789");
        assert_eq!(doc.line(0).unwrap(), "0123456789\r\n");
        assert_eq!(doc.line(1).unwrap(), "abcdefghij\r\n");
        assert_eq!(doc.line(2).unwrap(), "\r\n");
        assert_eq!(doc.line(3).unwrap(), "0123456789");
    }

    #[test]
    fn test_location_with_default_shaper() {
        let mut doc = SelectableSegmentedText::new();
        let first = {
            let mut editor = doc.add_segment();
            editor.append("012345").append_line("").append("89");
            editor.id()
        };
        let cases = [
            (0, (0, 0)),
            (3, (18, 0)),
            (6, (36, 0)),
            (7, (36, 0)),
            (8, (0, 13)),
            (9, (6, 13)),
        ];
        for (offset, (x, y)) in cases {
            assert_eq!(doc.location(offset, false).unwrap(), Point::new(x, y));
        }

        doc.add_segment().append("01");
        // Separator offsets sit at the end of the segment before them.
        assert_eq!(doc.location(10, false).unwrap(), Point::new(12, 13));
        assert_eq!(doc.location(11, false).unwrap(), Point::new(12, 13));
        assert_eq!(doc.location(12, false).unwrap(), Point::new(0, 26));
        assert_eq!(doc.location(13, false).unwrap(), Point::new(6, 26));
        assert_eq!(doc.segment_index(first), Some(0));
    }
}

// ============================================================================
// Selection
// ============================================================================

mod selection {
    use super::*;

    #[test]
    fn test_empty_document_rejects_selection() {
        let mut doc = SelectableSegmentedText::new();
        assert!(!doc.has_selection());
        assert_eq!(doc.selection_range(), None);
        assert_eq!(doc.selected_text(), None);
        doc.clear_selection();
        assert!(!doc.has_selection());
        assert!(matches!(
            doc.set_selection_range(Some(SelectionRange::ltr(0, 1))),
            Err(Error::InvalidSelection { .. })
        ));
    }

    #[test]
    fn test_selection_within_one_segment() {
        setup_test_logging();
        let (mut doc, first, second) = two_segments();

        doc.set_selection_range(Some(SelectionRange::ltr(0, 1)))
            .unwrap();
        assert_eq!(doc.selected_text().as_deref(), Some("t"));
        assert_eq!(doc.segment_selected_text(first).unwrap().as_deref(), Some("t"));
        assert!(!doc.segment_has_selection(second).unwrap());

        doc.set_selection_range(Some(SelectionRange::rtl(5, 10)))
            .unwrap();
        assert_eq!(doc.selected_text().as_deref(), Some("is th"));
        assert_eq!(
            doc.segment_selection(first).unwrap(),
            Some(SelectionRange::rtl(5, 10))
        );

        doc.set_selection_range(Some(SelectionRange::rtl(54, 60)))
            .unwrap();
        assert_eq!(doc.selected_text().as_deref(), Some("is the"));
        assert!(!doc.segment_has_selection(first).unwrap());
        assert_eq!(
            doc.segment_selection(second).unwrap(),
            Some(SelectionRange::rtl(5, 11))
        );
        assert_eq!(
            doc.segment_selected_text(second).unwrap().as_deref(),
            Some("is the")
        );

        doc.set_selection_range(Some(SelectionRange::rtl(21, 25)))
            .unwrap();
        assert_eq!(doc.selected_text().as_deref(), Some("e\r\nt"));
        assert!(!doc.segment_has_selection(second).unwrap());
    }

    #[test]
    fn test_selection_across_separator() {
        let (mut doc, first, second) = two_segments();
        doc.set_selection_range(Some(SelectionRange::rtl(46, 50)))
            .unwrap();
        debug!(selection = ?doc.selection_range(), "across separator");
        assert_eq!(doc.selected_text().as_deref(), Some("e\r\nt"));
        assert_eq!(
            doc.segment_selected_text(first).unwrap().as_deref(),
            Some("e\r\n")
        );
        assert_eq!(
            doc.segment_selected_text(second).unwrap().as_deref(),
            Some("t")
        );
        assert_eq!(doc.selection_range(), Some(SelectionRange::rtl(46, 50)));
    }

    #[test]
    fn test_invalid_range_keeps_selection() {
        let (mut doc, _, _) = two_segments();
        doc.set_selection_range(Some(SelectionRange::rtl(0, 10)))
            .unwrap();
        assert!(doc.set_selection_range(Some(SelectionRange::rtl(0, 100))).is_err());
        assert_eq!(doc.selection_range(), Some(SelectionRange::rtl(0, 10)));
    }

    #[test]
    fn test_clear_reaches_every_segment() {
        let (mut doc, first, second) = two_segments();
        doc.set_selection_range(Some(SelectionRange::ltr(40, 60)))
            .unwrap();
        assert!(doc.segment_has_selection(first).unwrap());
        assert!(doc.segment_has_selection(second).unwrap());

        doc.clear_selection();
        assert!(!doc.has_selection());
        for id in [first, second] {
            assert!(!doc.segment_has_selection(id).unwrap());
        }

        doc.set_selection_range(Some(SelectionRange::rtl(0, 10)))
            .unwrap();
        doc.set_selection_range(None).unwrap();
        assert_eq!(doc.selected_text(), None);
        assert!(!doc.segment_has_selection(first).unwrap());
    }

    #[test]
    fn test_caret_position() {
        let (mut doc, first, second) = two_segments();
        assert_eq!(doc.caret_position(), 0);

        doc.set_selection_range(Some(SelectionRange::ltr(2, 8)))
            .unwrap();
        assert_eq!(doc.caret_position(), 8);
        doc.set_caret_position(5).unwrap();
        assert_eq!(doc.caret_position(), 5);
        assert!(!doc.has_selection());

        doc.set_selection_range(Some(SelectionRange::rtl(2, 8)))
            .unwrap();
        assert_eq!(doc.caret_position(), 2);
        doc.clear_selection();
        assert_eq!(doc.caret_position(), 2);

        let len = doc.len_chars();
        doc.set_caret_position(len).unwrap();
        assert_eq!(doc.caret_position(), len);
        assert!(doc.set_caret_position(len + 1).is_err());

        doc.set_selection_range(Some(SelectionRange::ltr(46, 50)))
            .unwrap();
        assert_eq!(doc.caret_position(), 50);
        assert_eq!(doc.segment_caret_position(second).unwrap(), Some(1));
        assert_eq!(doc.segment_caret_position(first).unwrap(), None);
        doc.set_selection_range(Some(SelectionRange::rtl(46, 50)))
            .unwrap();
        assert_eq!(doc.caret_position(), 46);
        assert_eq!(doc.segment_caret_position(first).unwrap(), Some(46));
    }

    #[test]
    fn test_selection_bounds() {
        let (mut doc, first, second) = two_segments();
        assert_eq!(doc.selection_bounds(), None);

        doc.set_selection_range(Some(SelectionRange::ltr(0, 1)))
            .unwrap();
        assert_eq!(doc.selection_bounds(), Some(Rect::new(0, 0, CW, LH)));

        doc.set_selection_range(Some(SelectionRange::rtl(2, 6)))
            .unwrap();
        assert_eq!(
            doc.selection_bounds(),
            Some(Rect::new(2 * CW, 0, 4 * CW, LH))
        );

        let len = doc.len_chars();
        doc.set_selection_range(Some(SelectionRange::ltr(0, len)))
            .unwrap();
        assert_eq!(doc.selection_bounds(), Some(doc.bounds()));

        doc.set_selection_range(Some(SelectionRange::ltr(46, 50)))
            .unwrap();
        assert_eq!(
            doc.selection_bounds(),
            Some(Rect::new(0, LH, 23 * CW, 2 * LH))
        );

        doc.set_selection_range(Some(SelectionRange::ltr(46, 56)))
            .unwrap();
        assert_eq!(
            doc.segment_selection_bounds(first).unwrap(),
            Some(Rect::new(22 * CW, LH, CW, LH))
        );
        assert_eq!(
            doc.segment_selection_bounds(second).unwrap(),
            Some(Rect::new(0, 0, 7 * CW, LH))
        );
    }
}

// ============================================================================
// Change Notification
// ============================================================================

mod notification {
    use super::*;

    #[test]
    fn test_segments_notified_only_when_touched() {
        setup_test_logging();
        let (doc, first, second) = two_segments();
        let mut doc = doc.with_options(SelectionOptions::changes_only());
        let document = Recorded::default();
        let seg0 = Recorded::default();
        let seg1 = Recorded::default();
        record_document(&mut doc, &document);
        record_segment(&mut doc, first, &seg0);
        record_segment(&mut doc, second, &seg1);

        doc.set_selection_range(Some(SelectionRange::ltr(0, 1)))
            .unwrap();
        doc.set_selection_range(Some(SelectionRange::ltr(0, 1)))
            .unwrap();
        doc.set_selection_range(Some(SelectionRange::ltr(0, 6)))
            .unwrap();
        doc.clear_selection();
        doc.clear_selection();
        doc.set_selection_range(Some(SelectionRange::ltr(49, 55)))
            .unwrap();
        doc.set_selection_range(Some(SelectionRange::ltr(46, 56)))
            .unwrap();

        let one = Rect::new(0, 0, CW, LH);
        let six = Rect::new(0, 0, 6 * CW, LH);
        assert_eq!(
            bounds_only(&document.lock().unwrap()),
            vec![
                (Some(one), None),
                (Some(six), Some(one)),
                (None, Some(six)),
                (Some(Rect::new(0, 2 * LH, 6 * CW, LH)), None),
                (
                    Some(Rect::new(0, LH, 23 * CW, 2 * LH)),
                    Some(Rect::new(0, 2 * LH, 6 * CW, LH))
                ),
            ]
        );
        assert_eq!(
            bounds_only(&seg0.lock().unwrap()),
            vec![
                (Some(one), None),
                (Some(six), Some(one)),
                (None, Some(six)),
                (Some(Rect::new(22 * CW, LH, CW, LH)), None),
            ]
        );
        assert_eq!(
            bounds_only(&seg1.lock().unwrap()),
            vec![
                (Some(six), None),
                (Some(Rect::new(0, 0, 7 * CW, LH)), Some(six)),
            ]
        );
        assert!(
            seg1.lock()
                .unwrap()
                .iter()
                .all(|c| c.source == SelectionSource::Segment(second))
        );
    }

    #[test]
    fn test_repeated_set_notifies_by_default() {
        let (mut doc, first, second) = two_segments();
        let document = Recorded::default();
        let seg0 = Recorded::default();
        let seg1 = Recorded::default();
        record_document(&mut doc, &document);
        record_segment(&mut doc, first, &seg0);
        record_segment(&mut doc, second, &seg1);

        let range = Some(SelectionRange::ltr(0, 1));
        doc.set_selection_range(range).unwrap();
        doc.set_selection_range(range).unwrap();
        doc.clear_selection();
        doc.clear_selection();

        assert_eq!(document.lock().unwrap().len(), 4);
        // Segments only hear about actual changes to their part.
        assert_eq!(seg0.lock().unwrap().len(), 2);
        assert!(seg1.lock().unwrap().is_empty());
    }

    #[test]
    fn test_caret_move_notifies_like_empty_range() {
        let (mut doc, first, _) = two_segments();
        let document = Recorded::default();
        let seg0 = Recorded::default();
        record_document(&mut doc, &document);
        record_segment(&mut doc, first, &seg0);

        doc.set_caret_position(3).unwrap();
        doc.set_selection_range(Some(SelectionRange::ltr(3, 3)))
            .unwrap();
        doc.set_selection_range(Some(SelectionRange::ltr(3, 9)))
            .unwrap();
        doc.set_caret_position(4).unwrap();

        let changes = document.lock().unwrap();
        assert_eq!(changes.len(), 4);
        assert_eq!(changes[0], changes[1]);
        assert_eq!(changes[0].range, None);
        assert_eq!(changes[3].range, None);
        // The segment only hears about the selection appearing and going.
        assert_eq!(seg0.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_caret_move_without_selection_is_quiet_for_changes_only() {
        let (doc, _, _) = two_segments();
        let mut doc = doc.with_options(SelectionOptions::changes_only());
        let document = Recorded::default();
        record_document(&mut doc, &document);

        doc.set_caret_position(3).unwrap();
        assert!(document.lock().unwrap().is_empty());
        doc.set_selection_range(Some(SelectionRange::ltr(3, 9)))
            .unwrap();
        doc.set_caret_position(4).unwrap();
        let changes = document.lock().unwrap();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[1].range, None);
    }

    #[test]
    fn test_removed_listeners_stay_silent() {
        let (mut doc, first, _) = two_segments();
        let seen = Recorded::default();
        let sink = Arc::clone(&seen);
        let id = doc
            .add_segment_selection_listener(
                first,
                Box::new(move |change: &SelectionChange| sink.lock().unwrap().push(*change)),
            )
            .unwrap();
        assert!(doc.remove_segment_selection_listener(first, id));
        assert!(!doc.remove_segment_selection_listener(first, id));
        doc.set_selection_range(Some(SelectionRange::ltr(0, 3)))
            .unwrap();
        assert!(seen.lock().unwrap().is_empty());
    }

    /// Readable form of a change for snapshots.
    #[derive(Serialize)]
    struct ChangeRecord {
        source: String,
        range: Option<String>,
        new_bounds: Option<String>,
        old_bounds: Option<String>,
    }

    #[test]
    fn snapshot_change_order() {
        let (doc, first, second) = two_segments();
        let mut doc = doc.with_options(SelectionOptions::changes_only());
        let all = Recorded::default();
        record_segment(&mut doc, first, &all);
        record_segment(&mut doc, second, &all);
        record_document(&mut doc, &all);

        doc.set_selection_range(Some(SelectionRange::ltr(49, 55)))
            .unwrap();
        doc.set_selection_range(Some(SelectionRange::ltr(46, 56)))
            .unwrap();

        let records: Vec<ChangeRecord> = all
            .lock()
            .unwrap()
            .iter()
            .map(|c| ChangeRecord {
                source: match c.source {
                    SelectionSource::Document => "document".to_string(),
                    SelectionSource::Segment(id) => {
                        format!("segment {}", doc.segment_index(id).unwrap())
                    }
                },
                range: c.range.map(|r| r.to_string()),
                new_bounds: c.new_bounds.map(|r| r.to_string()),
                old_bounds: c.old_bounds.map(|r| r.to_string()),
            })
            .collect();
        assert_json_snapshot!(records, @r#"
        [
          {
            "source": "segment 1",
            "range": "[0, 6) ->",
            "new_bounds": "48x13 at (0, 0)",
            "old_bounds": null
          },
          {
            "source": "document",
            "range": "[49, 55) ->",
            "new_bounds": "48x13 at (0, 26)",
            "old_bounds": null
          },
          {
            "source": "segment 0",
            "range": "[46, 49) ->",
            "new_bounds": "8x13 at (176, 13)",
            "old_bounds": null
          },
          {
            "source": "segment 1",
            "range": "[0, 7) ->",
            "new_bounds": "56x13 at (0, 0)",
            "old_bounds": "48x13 at (0, 0)"
          },
          {
            "source": "document",
            "range": "[46, 56) ->",
            "new_bounds": "184x26 at (0, 13)",
            "old_bounds": "48x13 at (0, 26)"
          }
        ]
        "#);
    }
}

// ============================================================================
// Editing Under a Selection
// ============================================================================

mod editing {
    use super::*;

    #[test]
    fn test_segment_edit_drops_stale_selection() {
        let (mut doc, _, second) = two_segments();
        let len = doc.len_chars();
        doc.set_selection_range(Some(SelectionRange::ltr(80, len)))
            .unwrap();
        doc.edit_segment(second, |segment| {
            segment.delete_line(1);
        })
        .unwrap();
        assert!(!doc.has_selection());
        assert_eq!(doc.caret_position(), doc.len_chars());
    }

    #[test]
    fn test_edit_inside_selection_keeps_offsets() {
        let (mut doc, first, _) = two_segments();
        doc.set_selection_range(Some(SelectionRange::ltr(0, 4)))
            .unwrap();
        doc.edit_segment(first, |segment| {
            segment.insert(0, 0, ">");
        })
        .unwrap();
        assert_eq!(doc.selected_text().as_deref(), Some(">thi"));
    }

    #[test]
    fn test_delete_segment_forgets_listeners() {
        let (mut doc, first, _) = two_segments();
        let seen = Recorded::default();
        record_segment(&mut doc, first, &seen);
        doc.set_selection_range(Some(SelectionRange::ltr(60, 70)))
            .unwrap();

        let removed = doc.delete_segment(0).unwrap();
        assert_eq!(removed.id(), first);
        assert_eq!(doc.len_chars(), 44);
        assert!(!doc.has_selection());
        assert!(matches!(
            doc.add_segment_selection_listener(first, Box::new(|_| {})),
            Err(Error::UnknownSegment(id)) if id == first
        ));
        assert!(matches!(
            doc.segment_selection(first),
            Err(Error::UnknownSegment(_))
        ));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_editor_by_index() {
        let (mut doc, _, second) = two_segments();
        {
            let mut editor = doc.segment_editor_at(1).unwrap();
            assert_eq!(editor.index(), 1);
            assert_eq!(editor.id(), second);
            editor.append("!");
        }
        assert!(doc.text().ends_with("4th line!"));
        assert!(doc.segment_editor_at(2).is_err());

        doc.insert_segment(0).append("intro");
        assert_eq!(doc.segment_index(second), Some(2));
        assert!(doc.text().starts_with("intro\r\nthis is the first line"));
    }
}
