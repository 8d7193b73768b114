//! Host command identifiers and the groups detectors consult.

use std::collections::BTreeSet;

use crate::id::PatternId;

pub const DELETE_LEFT: &str = "deleteLeft";
pub const DELETE_RIGHT: &str = "deleteRight";
pub const DELETE_WORD_LEFT: &str = "deleteWordLeft";
pub const DELETE_WORD_RIGHT: &str = "deleteWordRight";
pub const TYPE: &str = "type";
pub const PASTE: &str = "paste";
pub const CUT: &str = "cut";
pub const TAB: &str = "tab";
pub const OUTDENT: &str = "outdent";
pub const INSERT_LINE_AFTER: &str = "editor.action.insertLineAfter";
pub const INSERT_LINE_BEFORE: &str = "editor.action.insertLineBefore";

pub const DELETE_LINES: &str = "editor.action.deleteLines";
pub const MOVE_LINES_UP: &str = "editor.action.moveLinesUpAction";
pub const MOVE_LINES_DOWN: &str = "editor.action.moveLinesDownAction";
pub const COPY_LINES_UP: &str = "editor.action.copyLinesUpAction";
pub const COPY_LINES_DOWN: &str = "editor.action.copyLinesDownAction";
pub const ADD_SELECTION_TO_NEXT_FIND_MATCH: &str = "editor.action.addSelectionToNextFindMatch";

pub const CURSOR_HOME: &str = "cursorHome";
pub const CURSOR_END: &str = "cursorEnd";
pub const CURSOR_TOP: &str = "cursorTop";
pub const CURSOR_BOTTOM: &str = "cursorBottom";
pub const CURSOR_PAGE_UP: &str = "cursorPageUp";
pub const CURSOR_PAGE_DOWN: &str = "cursorPageDown";
pub const CURSOR_WORD_LEFT: &str = "cursorWordLeft";
pub const CURSOR_WORD_RIGHT: &str = "cursorWordRight";

pub const CURSOR_HOME_SELECT: &str = "cursorHomeSelect";
pub const CURSOR_END_SELECT: &str = "cursorEndSelect";
pub const CURSOR_WORD_LEFT_SELECT: &str = "cursorWordLeftSelect";
pub const CURSOR_WORD_RIGHT_SELECT: &str = "cursorWordRightSelect";
pub const CURSOR_WORD_START_LEFT_SELECT: &str = "cursorWordStartLeftSelect";
pub const CURSOR_WORD_END_RIGHT_SELECT: &str = "cursorWordEndRightSelect";
pub const EXPAND_LINE_SELECTION: &str = "expandLineSelection";
pub const SELECT_ALL: &str = "editor.action.selectAll";
pub const SMART_SELECT_EXPAND: &str = "editor.action.smartSelect.expand";


/// Commands that edit text and move the cursor as a side effect.
pub const EDIT_COMMANDS: &[&str] = &[
	DELETE_LEFT,
	DELETE_RIGHT,
	DELETE_WORD_LEFT,
	DELETE_WORD_RIGHT,
	TYPE,
	PASTE,
	CUT,
	TAB,
	OUTDENT,
	INSERT_LINE_AFTER,
	INSERT_LINE_BEFORE,
];

/// Edit commands whose cursor movement must not reach detectors as a selection change.
pub const SELECTION_SIDE_EFFECT_COMMANDS: &[&str] = &[
	DELETE_LEFT,
	DELETE_RIGHT,
	DELETE_WORD_LEFT,
	DELETE_WORD_RIGHT,
	TYPE,
	PASTE,
	CUT,
	TAB,
	OUTDENT,
];

pub const WORD_SELECTION_COMMANDS: &[&str] = &[
	CURSOR_WORD_LEFT_SELECT,
	CURSOR_WORD_RIGHT_SELECT,
	CURSOR_WORD_START_LEFT_SELECT,
	CURSOR_WORD_END_RIGHT_SELECT,
];

pub const INSTANT_NAVIGATION_COMMANDS: &[&str] =
	&[CURSOR_HOME, CURSOR_END, CURSOR_TOP, CURSOR_BOTTOM, CURSOR_PAGE_UP, CURSOR_PAGE_DOWN];

pub const INSTANT_SELECTION_COMMANDS: &[&str] =
	&[CURSOR_HOME_SELECT, CURSOR_END_SELECT, EXPAND_LINE_SELECTION, SELECT_ALL, SMART_SELECT_EXPAND];

pub const WORD_JUMP_COMMANDS: &[&str] = &[CURSOR_WORD_LEFT, CURSOR_WORD_RIGHT];
pub const WORD_DELETE_COMMANDS: &[&str] = &[DELETE_WORD_LEFT, DELETE_WORD_RIGHT];
pub const MOVE_LINE_COMMANDS: &[&str] = &[MOVE_LINES_UP, MOVE_LINES_DOWN];
pub const COPY_LINE_COMMANDS: &[&str] = &[COPY_LINES_UP, COPY_LINES_DOWN];

/// Returns the detectors whose state `command` invalidates.
pub fn patterns_reset_by(command: &str) -> &'static [PatternId] {
	match command {
		MOVE_LINES_UP | MOVE_LINES_DOWN => &[PatternId::LineMovementManual],
		COPY_LINES_UP | COPY_LINES_DOWN => &[PatternId::LineDuplicationManual],
		DELETE_LINES => &[PatternId::LineDeleteBackspace],
		DELETE_WORD_LEFT | DELETE_WORD_RIGHT => &[PatternId::WordDeleteBackspace],
		_ => &[],
	}
}

/// Every command any detector suggests or consults, sorted and deduplicated.
///
/// Hosts use this to know which keybindings to resolve ahead of time.
pub fn all_used() -> Vec<&'static str> {
	let suggested = [
		DELETE_LINES,
		DELETE_WORD_LEFT,
		DELETE_WORD_RIGHT,
		MOVE_LINES_UP,
		MOVE_LINES_DOWN,
		COPY_LINES_UP,
		COPY_LINES_DOWN,
		ADD_SELECTION_TO_NEXT_FIND_MATCH,
		CURSOR_WORD_LEFT,
		CURSOR_WORD_RIGHT,
		CURSOR_WORD_LEFT_SELECT,
		CURSOR_WORD_RIGHT_SELECT,
	];
	let groups = [
		EDIT_COMMANDS,
		WORD_SELECTION_COMMANDS,
		INSTANT_NAVIGATION_COMMANDS,
		INSTANT_SELECTION_COMMANDS,
	];
	suggested
		.into_iter()
		.chain(groups.into_iter().flatten().copied())
		.collect::<BTreeSet<_>>()
		.into_iter()
		.collect()
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case(MOVE_LINES_DOWN, &[PatternId::LineMovementManual])]
	#[case(COPY_LINES_UP, &[PatternId::LineDuplicationManual])]
	#[case(DELETE_LINES, &[PatternId::LineDeleteBackspace])]
	#[case(DELETE_WORD_RIGHT, &[PatternId::WordDeleteBackspace])]
	#[case(CURSOR_HOME, &[])]
	fn reset_table(#[case] command: &str, #[case] expected: &[PatternId]) {
		assert_eq!(patterns_reset_by(command), expected);
	}

	#[test]
	fn reset_table_agrees_with_ids() {
		for id in PatternId::ALL {
			for command in id.reset_commands() {
				assert!(patterns_reset_by(command).contains(&id), "{command} should reset {id}");
			}
		}
	}

	#[test]
	fn all_used_is_sorted_and_unique() {
		let used = all_used();
		let mut sorted = used.clone();
		sorted.sort_unstable();
		sorted.dedup();
		assert_eq!(used, sorted);
		assert!(used.contains(&CURSOR_PAGE_DOWN));
		assert!(used.contains(&DELETE_LINES));
	}
}
