//! Display formatting for chords.


/// Hint text used when a command has no binding.
pub const FALLBACK_HINT: &str = "the keyboard shortcut";

/// Formats a chord such as `ctrl+shift+k` as `Ctrl+Shift+K`.
///
/// Multi-step chords separated by whitespace (`ctrl+k ctrl+c`) are formatted
/// step by step. `None` or a blank chord yields [`FALLBACK_HINT`].
pub fn format_chord(chord: Option<&str>) -> String {
	let Some(chord) = chord.map(str::trim).filter(|c| !c.is_empty()) else {
		return FALLBACK_HINT.to_owned();
	};

	chord.split_whitespace().map(format_step).collect::<Vec<_>>().join(" ")
}

/// Formats the first chord of `chords`, or [`FALLBACK_HINT`] when empty.
pub fn format_first(chords: &[String]) -> String {
	format_chord(chords.first().map(String::as_str))
}

/// Formats every chord in `chords`.
pub fn format_all(chords: &[String]) -> Vec<String> {
	chords.iter().map(|chord| format_chord(Some(chord))).collect()
}

fn format_step(step: &str) -> String {
	step.split('+').map(format_key).collect::<Vec<_>>().join("+")
}

fn format_key(key: &str) -> String {
	let key = key.trim();
	let name = match key.to_ascii_lowercase().as_str() {
		"ctrl" => "Ctrl",
		"shift" => "Shift",
		"alt" => "Alt",
		"meta" | "cmd" => "Cmd",
		"enter" => "Enter",
		"escape" => "Esc",
		"backspace" => "Backspace",
		"delete" => "Delete",
		"tab" => "Tab",
		"space" => "Space",
		"pageup" => "PageUp",
		"pagedown" => "PageDown",
		"home" => "Home",
		"end" => "End",
		"insert" => "Insert",
		"up" => "↑",
		"down" => "↓",
		"left" => "←",
		"right" => "→",
		"f1" => "F1",
		"f2" => "F2",
		"f3" => "F3",
		"f4" => "F4",
		"f5" => "F5",
		"f6" => "F6",
		"f7" => "F7",
		"f8" => "F8",
		"f9" => "F9",
		"f10" => "F10",
		"f11" => "F11",
		"f12" => "F12",
		_ => return key.to_uppercase(),
	};
	name.to_owned()
}
