//! Detectors must tolerate arbitrary event streams: stale positions, reordered
//! timestamps and edits that do not match the document.

use nudge_patterns::{EditKind, EditingEvent, PatternContext, PatternsConfig};
use nudge_primitives::{Position, Range, Rope, Selection};
use proptest::prelude::*;

fn position() -> impl Strategy<Value = Position> {
	(0usize..6, 0usize..30).prop_map(|(line, character)| Position::new(line, character))
}

fn range() -> impl Strategy<Value = Range> {
	(position(), position()).prop_map(|(a, b)| if a <= b { Range::new(a, b) } else { Range::new(b, a) })
}

fn edit_kind() -> impl Strategy<Value = EditKind> {
	prop_oneof![
		(range(), "[a-z \n]{0,12}").prop_map(|(range, text)| EditKind::Insert { range, text }),
		(range(), 0usize..20, proptest::option::of("[a-z \n]{0,12}")).prop_map(|(range, range_length, removed_text)| {
			EditKind::Delete {
				range,
				range_length,
				removed_text,
			}
		}),
		(range(), 1usize..20, "[a-z]{1,6}").prop_map(|(range, range_length, text)| EditKind::Replace {
			range,
			range_length,
			text,
			removed_text: None,
		}),
		(position(), position()).prop_map(|(anchor, active)| EditKind::Selection {
			selection: Selection::new(anchor, active),
		}),
	]
}

proptest! {
	#[test]
	fn arbitrary_streams_never_panic(
		events in proptest::collection::vec((edit_kind(), 0u64..400), 1..80),
	) {
		let doc = Rope::from_str("fn main() {\n    let value = 42;\n\n    println!(\"{value}\");\n}\n");
		let mut patterns = PatternsConfig::default().build();
		let mut now = 10_000u64;

		for (kind, jitter) in &events {
			// Mostly forward, occasionally backwards in time.
			now = (now + jitter).saturating_sub(if jitter % 7 == 0 { 300 } else { 0 });
			let event = EditingEvent::new(kind, now, &doc);
			let cx = PatternContext::detached(now);
			for pattern in patterns.iter_mut() {
				if let Some(found) = pattern.process(&event, &cx) {
					prop_assert_eq!(found.pattern_id, pattern.id());
					prop_assert!(!found.suggested_command.is_empty());
					prop_assert!(!found.message.is_empty());
				}
			}
		}
	}
}
