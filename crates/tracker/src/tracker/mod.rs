//! The orchestrator: host events in, pattern matches out.

#[cfg(test)]
mod tests;

use nudge_keymap::{KeybindingLookup, KeybindingTable};
use nudge_patterns::commands::{self, patterns_reset_by};
use nudge_patterns::{CommandHistory, EditKind, EditingEvent, Pattern, PatternContext, PatternsConfig};
use nudge_primitives::{ChangeReason, Clock, Document, DocumentId, Selection, SystemClock, Timestamp, UriScheme};
use tracing::{debug, info, trace, warn};

use crate::config::TrackerConfig;
use crate::event::{ActiveEditor, HostEvent, TextChange};
use crate::ledger::CommandLedger;
use crate::mouse::MouseState;
use crate::notifier::Notifier;
use crate::state::EditorStateManager;

/// Whether the tracker accepts editor events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
	#[default]
	Stopped,
	Running,
	/// Stopped by a focus loss; the next focus gain resumes.
	Paused,
}

/// Routes host events to the registered detectors.
///
/// Events are handled one at a time on the caller's thread and each handler
/// takes `&mut self`, so detectors never see concurrent or re-entrant calls.
/// Time comes from `C`; every accepted event is stamped with the clock
/// reading at the moment it is handled.
pub struct EditorActionTracker<N, K = KeybindingTable, C = SystemClock> {
	config: TrackerConfig,
	patterns: Vec<Box<dyn Pattern>>,
	state: EditorStateManager,
	ledger: CommandLedger,
	mouse: MouseState,
	notifier: N,
	keybindings: K,
	clock: C,
	run_state: RunState,
	active_editor: Option<ActiveEditor>,
}

impl<N: Notifier, K: KeybindingLookup, C: Clock> EditorActionTracker<N, K, C> {
	/// Creates a stopped tracker with no detectors.
	pub fn new(config: TrackerConfig, notifier: N, keybindings: K, clock: C) -> Self {
		Self {
			config,
			patterns: Vec::new(),
			state: EditorStateManager::new(config.state_log_capacity),
			ledger: CommandLedger::new(config.command_window_ms, config.max_tracked_executions),
			mouse: MouseState::default(),
			notifier,
			keybindings,
			clock,
			run_state: RunState::Stopped,
			active_editor: None,
		}
	}

	/// Creates a stopped tracker with the built-in detectors registered.
	pub fn with_default_patterns(config: TrackerConfig, patterns: &PatternsConfig, notifier: N, keybindings: K, clock: C) -> Self {
		let mut tracker = Self::new(config, notifier, keybindings, clock);
		for pattern in patterns.build() {
			tracker.register_pattern(pattern);
		}
		tracker
	}

	pub fn register_pattern(&mut self, pattern: Box<dyn Pattern>) {
		debug!(pattern = %pattern.id(), enabled = pattern.is_enabled(), "tracker.register_pattern");
		self.patterns.push(pattern);
	}

	pub fn patterns(&self) -> &[Box<dyn Pattern>] {
		&self.patterns
	}

	pub fn config(&self) -> &TrackerConfig {
		&self.config
	}

	pub fn state(&self) -> &EditorStateManager {
		&self.state
	}

	pub fn ledger(&self) -> &CommandLedger {
		&self.ledger
	}

	pub fn mouse(&self) -> MouseState {
		self.mouse
	}

	pub fn notifier(&self) -> &N {
		&self.notifier
	}

	pub fn notifier_mut(&mut self) -> &mut N {
		&mut self.notifier
	}

	pub fn into_notifier(self) -> N {
		self.notifier
	}

	pub fn run_state(&self) -> RunState {
		self.run_state
	}

	pub fn is_active(&self) -> bool {
		self.run_state == RunState::Running
	}

	pub fn active_editor(&self) -> Option<&ActiveEditor> {
		self.active_editor.as_ref()
	}

	pub fn start(&mut self) {
		if self.is_active() {
			warn!("tracker.start.already_running");
			return;
		}
		self.run_state = RunState::Running;
		info!(patterns = self.patterns.len(), "tracker.start");
	}

	/// Stops intake and clears every detector's in-flight state.
	pub fn stop(&mut self) {
		self.halt(RunState::Stopped);
	}

	/// Like [`stop`](Self::stop), but a later [`resume`](Self::resume) restarts.
	pub fn pause(&mut self) {
		self.halt(RunState::Paused);
	}

	/// Restarts intake after a [`pause`](Self::pause). Missed events are not replayed.
	pub fn resume(&mut self) {
		if self.run_state == RunState::Paused {
			self.start();
		}
	}

	/// Stops and forgets every recorded command execution.
	pub fn dispose(&mut self) {
		self.stop();
		self.ledger.clear();
		debug!("tracker.dispose");
	}

	fn halt(&mut self, next: RunState) {
		if !self.is_active() {
			if self.run_state == RunState::Paused && next == RunState::Stopped {
				self.run_state = next;
			}
			return;
		}
		self.run_state = next;
		self.reset_patterns();
		info!(state = ?next, "tracker.stop");
	}

	fn reset_patterns(&mut self) {
		for pattern in &mut self.patterns {
			pattern.reset();
		}
	}

	/// Records a completed command and resets the detectors it supersedes.
	///
	/// Accepted in every run state so corroboration is accurate after a resume.
	pub fn notify_command_executed(&mut self, command: &str) {
		let now = self.clock.now();
		let count = self.ledger.record(command, now);
		debug!(command, count, "tracker.command");

		let affected = patterns_reset_by(command);
		if affected.is_empty() {
			return;
		}
		for pattern in self.patterns.iter_mut().filter(|p| affected.contains(&p.id())) {
			debug!(pattern = %pattern.id(), command, "tracker.command.reset_pattern");
			pattern.reset();
		}
	}

	pub fn notify_mouse_pressed(&mut self) {
		self.mouse.press(self.clock.now());
		trace!("tracker.mouse.pressed");
	}

	pub fn notify_mouse_released(&mut self) {
		self.mouse.release(self.clock.now());
		trace!("tracker.mouse.released");
	}

	/// Returns true if a selection change now is probably a mouse drag.
	pub fn is_mouse_selection_likely(&self) -> bool {
		self.mouse.is_selection_likely(self.clock.now(), self.config.mouse_grace_ms)
	}

	/// Returns true if `command` last ran less than `within_ms` ago.
	///
	/// `None` uses the ledger window.
	pub fn was_command_recently_executed(&self, command: &str, within_ms: Option<u64>) -> bool {
		let within = within_ms.unwrap_or(self.config.command_window_ms);
		self.ledger.was_recently_executed(command, self.clock.now(), within)
	}

	pub fn last_command_execution_time(&self, command: &str) -> Option<Timestamp> {
		self.ledger.last_execution(command)
	}

	pub fn keybindings_for(&self, command: &str) -> Vec<String> {
		self.keybindings.keybindings_for(command)
	}

	/// Handles a focus change. Only file editors reset state.
	pub fn active_editor_changed(&mut self, editor: Option<ActiveEditor>) {
		let reset = self.is_active() && editor.as_ref().is_some_and(|editor| editor.scheme.is_file());
		if reset {
			self.state.reset();
			self.reset_patterns();
		}
		debug!(document = ?editor.as_ref().map(|e| e.document), reset, "tracker.active_editor");
		self.active_editor = editor;
	}

	pub fn window_focus_changed(&mut self, focused: bool) {
		debug!(focused, "tracker.window_focus");
		if focused { self.resume() } else { self.pause() }
	}

	fn is_active_document(&self, document: DocumentId, scheme: &UriScheme) -> bool {
		scheme.is_file() && self.active_editor.as_ref().is_some_and(|active| active.document == document)
	}

	/// Handles the content changes of one document edit and returns how
	/// many matches were forwarded.
	///
	/// `document` is the post-change text. Undo and redo are ignored.
	pub fn handle_text_change(
		&mut self,
		id: DocumentId,
		scheme: &UriScheme,
		document: &dyn Document,
		changes: Vec<TextChange>,
		reason: Option<ChangeReason>,
	) -> usize {
		if !self.is_active() || !self.is_active_document(id, scheme) {
			return 0;
		}
		if let Some(reason) = reason {
			debug!(?reason, "tracker.text.history_ignored");
			return 0;
		}

		let mut matched = 0;
		for change in changes {
			let kind = EditKind::from_change(change.range, change.range_length, change.text, change.removed_text);
			debug!(
				kind = kind.label(),
				range = ?change.range,
				range_length = change.range_length,
				"tracker.text.change"
			);
			matched += self.process(&kind, document);
		}
		matched
	}

	/// Handles a selection change of the primary selection and returns how
	/// many matches were forwarded.
	pub fn handle_selection_change(&mut self, id: DocumentId, scheme: &UriScheme, document: &dyn Document, selections: &[Selection]) -> usize {
		if !self.is_active() || !self.is_active_document(id, scheme) {
			return 0;
		}
		let Some(&selection) = selections.first() else {
			return 0;
		};

		let now = self.clock.now();
		let within = self.config.edit_suppression_ms;
		if let Some(command) = commands::SELECTION_SIDE_EFFECT_COMMANDS
			.iter()
			.find(|command| self.ledger.was_recently_executed(command, now, within))
		{
			debug!(command, "tracker.selection.edit_side_effect");
			return 0;
		}
		if self.mouse.is_selection_likely(now, self.config.mouse_grace_ms) {
			debug!(pressed = self.mouse.is_pressed(), "tracker.selection.mouse");
			return 0;
		}

		self.process(&EditKind::Selection { selection }, document)
	}

	fn process(&mut self, kind: &EditKind, document: &dyn Document) -> usize {
		let now = self.clock.now();
		let event = EditingEvent::new(kind, now, document);
		self.state.record(event.record());

		let cx = PatternContext::new(now, &self.ledger, &self.keybindings);
		let mut matched = 0;
		for pattern in self.patterns.iter_mut().filter(|p| p.is_enabled()) {
			let Some(found) = pattern.process(&event, &cx) else {
				continue;
			};
			info!(
				pattern = %found.pattern_id,
				sub = ?found.sub_pattern_id,
				command = %found.suggested_command,
				"tracker.match"
			);
			self.notifier.notify(found);
			matched += 1;
		}
		matched
	}

	/// Handles one host event and returns how many matches it produced.
	pub fn dispatch<D: Document>(&mut self, event: HostEvent<D>) -> usize {
		trace!(event = event.label(), "tracker.dispatch");
		match event {
			HostEvent::TextChanged {
				document,
				scheme,
				snapshot,
				changes,
				reason,
			} => self.handle_text_change(document, &scheme, &snapshot, changes, reason),
			HostEvent::SelectionChanged {
				document,
				scheme,
				snapshot,
				selections,
			} => self.handle_selection_change(document, &scheme, &snapshot, &selections),
			HostEvent::ActiveEditorChanged(editor) => {
				self.active_editor_changed(editor);
				0
			}
			HostEvent::WindowFocusChanged { focused } => {
				self.window_focus_changed(focused);
				0
			}
			HostEvent::CommandExecuted { command } => {
				self.notify_command_executed(&command);
				0
			}
			HostEvent::MousePressed => {
				self.notify_mouse_pressed();
				0
			}
			HostEvent::MouseReleased => {
				self.notify_mouse_released();
				0
			}
		}
	}

	/// Handles events until the source is exhausted, e.g. the receiving end
	/// of a channel whose senders were dropped. Returns the total match count.
	pub fn drive<D: Document>(&mut self, events: impl IntoIterator<Item = HostEvent<D>>) -> usize {
		events.into_iter().map(|event| self.dispatch(event)).sum()
	}
}
