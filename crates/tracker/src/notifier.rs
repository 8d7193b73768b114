use nudge_patterns::PatternMatch;

/// Receives every match the tracker produces.
///
/// Throttling and rendering are the notifier's business.
pub trait Notifier {
	fn notify(&mut self, found: PatternMatch);
}

/// Collects matches in arrival order.
impl Notifier for Vec<PatternMatch> {
	fn notify(&mut self, found: PatternMatch) {
		self.push(found);
	}
}

/// Adapts a closure into a [`Notifier`].
#[derive(Debug, Clone, Copy)]
pub struct NotifyFn<F>(pub F);

impl<F: FnMut(PatternMatch)> Notifier for NotifyFn<F> {
	fn notify(&mut self, found: PatternMatch) {
		(self.0)(found);
	}
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
	fn notify(&mut self, found: PatternMatch) {
		(**self).notify(found);
	}
}

#[cfg(test)]
mod tests {
	use nudge_patterns::PatternId;

	use super::*;

	#[test]
	fn closures_and_boxes_forward() {
		let mut seen = Vec::new();
		{
			let mut notifier = NotifyFn(|found: PatternMatch| seen.push(found.pattern_id));
			notifier.notify(PatternMatch::new(PatternId::LineDeleteBackspace, "x", "y"));
		}
		assert_eq!(seen, vec![PatternId::LineDeleteBackspace]);

		let mut boxed: Box<dyn Notifier> = Box::new(Vec::<PatternMatch>::new());
		boxed.notify(PatternMatch::new(PatternId::WordSelectionRepeated, "x", "y"));
	}
}
