//! Range checks that serde cannot express.

use nudge_keymap::KeybindingEntry;
use nudge_patterns::{PatternsConfig, SequenceConfig};
use nudge_tracker::TrackerConfig;

use crate::error::{ConfigError, Result};

fn require(ok: bool, field: &str, reason: &str) -> Result<()> {
	if ok {
		Ok(())
	} else {
		Err(ConfigError::Invalid {
			field: field.to_owned(),
			reason: reason.to_owned(),
		})
	}
}

fn positive(value: u64, field: &str) -> Result<()> {
	require(value > 0, field, "must be greater than zero")
}

fn at_least(value: usize, min: usize, field: &str) -> Result<()> {
	require(value >= min, field, &format!("must be at least {min}"))
}

fn sequence(config: &SequenceConfig, prefix: &str) -> Result<()> {
	at_least(config.max_length, 1, &format!("{prefix}.sequence.max_length"))?;
	positive(config.timeout_ms, &format!("{prefix}.sequence.timeout_ms"))?;
	require(
		config.min_length <= config.max_length,
		&format!("{prefix}.sequence.min_length"),
		"must not exceed max_length",
	)
}

pub(crate) fn tracker(config: &TrackerConfig) -> Result<()> {
	positive(config.command_window_ms, "tracker.command_window_ms")?;
	at_least(config.max_tracked_executions, 1, "tracker.max_tracked_executions")?;
	at_least(config.state_log_capacity, 1, "tracker.state_log_capacity")
}

pub(crate) fn patterns(config: &PatternsConfig) -> Result<()> {
	let line_delete = &config.line_delete;
	sequence(&line_delete.sequence, "patterns.line_delete")?;
	at_least(line_delete.min_char_deletions, 1, "patterns.line_delete.min_char_deletions")?;
	at_least(line_delete.min_word_deletions, 1, "patterns.line_delete.min_word_deletions")?;

	let word_delete = &config.word_delete;
	sequence(&word_delete.sequence, "patterns.word_delete")?;
	at_least(word_delete.min_segment_length, 1, "patterns.word_delete.min_segment_length")?;
	require(
		word_delete.min_total_deletions >= word_delete.min_segment_length,
		"patterns.word_delete.min_total_deletions",
		"must be at least min_segment_length",
	)?;

	let line_movement = &config.line_movement;
	positive(line_movement.timeout_ms, "patterns.line_movement.timeout_ms")?;
	require(
		line_movement.min_move_duration_ms < line_movement.max_move_duration_ms,
		"patterns.line_movement.min_move_duration_ms",
		"must be less than max_move_duration_ms",
	)?;

	let line_duplication = &config.line_duplication;
	sequence(&line_duplication.sequence, "patterns.line_duplication")?;
	at_least(line_duplication.min_duplications, 2, "patterns.line_duplication.min_duplications")?;

	let word_selection = &config.word_selection;
	at_least(word_selection.min_repeats, 2, "patterns.word_selection.min_repeats")?;
	positive(word_selection.timeout_ms, "patterns.word_selection.timeout_ms")?;

	let arrow = &config.arrow_navigation;
	sequence(&arrow.sequence, "patterns.arrow_navigation")?;
	positive(arrow.max_move_interval_ms, "patterns.arrow_navigation.max_move_interval_ms")?;
	at_least(arrow.required_edge_bounces, 1, "patterns.arrow_navigation.required_edge_bounces")?;
	require(
		arrow.min_vertical_moves <= arrow.file_jump_vertical_moves,
		"patterns.arrow_navigation.min_vertical_moves",
		"must not exceed file_jump_vertical_moves",
	)?;

	let selection = &config.text_selection;
	sequence(&selection.sequence, "patterns.text_selection")?;
	positive(selection.max_step_interval_ms, "patterns.text_selection.max_step_interval_ms")?;
	require(
		selection.min_char_steps_for_word <= selection.min_char_steps_for_line,
		"patterns.text_selection.min_char_steps_for_word",
		"must not exceed min_char_steps_for_line",
	)
}

pub(crate) fn keybindings(entries: &[KeybindingEntry]) -> Result<()> {
	for (idx, entry) in entries.iter().enumerate() {
		require(!entry.key.trim().is_empty(), &format!("keybindings[{idx}].key"), "must not be empty")?;
		let command = entry.command.trim_start_matches('-');
		require(!command.trim().is_empty(), &format!("keybindings[{idx}].command"), "must not be empty")?;
	}
	Ok(())
}
