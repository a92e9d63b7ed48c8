use crate::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    Undo,
    Redo,
}

impl HistoryAction {
    pub const fn applied_message(self) -> &'static str {
        match self {
            Self::Undo => "undo applied",
            Self::Redo => "redo applied",
        }
    }

    pub const fn empty_message(self) -> &'static str {
        match self {
            Self::Undo => "undo stack empty",
            Self::Redo => "redo stack empty",
        }
    }
}

/// Which history actions currently have something to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryAvailability {
    pub undo: bool,
    pub redo: bool,
}

/// Linear undo/redo history of whole-canvas snapshots.
///
/// Each stack owns its surfaces outright; restoring moves the snapshot into
/// the live slot and moves the replaced canvas onto the opposite stack, so
/// a snapshot with different dimensions swaps in atomically.
#[derive(Debug, Default)]
pub struct BackupManager {
    undo_stack: Vec<Surface>,
    redo_stack: Vec<Surface>,
    max_depth: Option<usize>,
}

impl BackupManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(max_depth: Option<usize>) -> Self {
        Self {
            max_depth: max_depth.map(|depth| depth.max(1)),
            ..Self::default()
        }
    }

    /// Records the state of `main` before an edit. Any redo branch is dropped.
    pub fn snapshot(&mut self, main: &Surface) -> HistoryAvailability {
        push_bounded(&mut self.undo_stack, main.duplicate(), self.max_depth);
        self.redo_stack.clear();
        tracing::debug!(
            undo_depth = self.undo_stack.len(),
            width = main.width(),
            height = main.height(),
            "history snapshot saved"
        );
        self.availability()
    }

    pub fn undo(&mut self, main: &mut Surface) -> bool {
        self.apply(HistoryAction::Undo, main)
    }

    pub fn redo(&mut self, main: &mut Surface) -> bool {
        self.apply(HistoryAction::Redo, main)
    }

    /// Pops the source stack into `main` and pushes the replaced canvas onto
    /// the other stack. Returns `false` when there was nothing to restore.
    pub fn apply(&mut self, action: HistoryAction, main: &mut Surface) -> bool {
        let (source, target) = match action {
            HistoryAction::Undo => (&mut self.undo_stack, &mut self.redo_stack),
            HistoryAction::Redo => (&mut self.redo_stack, &mut self.undo_stack),
        };
        let Some(snapshot) = source.pop() else {
            tracing::debug!(?action, "{}", action.empty_message());
            return false;
        };
        let resized = snapshot.size() != main.size();
        let previous = std::mem::replace(main, snapshot);
        push_bounded(target, previous, self.max_depth);
        main.mark_dirty();
        tracing::info!(
            ?action,
            resized,
            undo_depth = self.undo_stack.len(),
            redo_depth = self.redo_stack.len(),
            "{}",
            action.applied_message()
        );
        true
    }

    pub fn availability(&self) -> HistoryAvailability {
        HistoryAvailability {
            undo: !self.undo_stack.is_empty(),
            redo: !self.redo_stack.is_empty(),
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
}

fn push_bounded(stack: &mut Vec<Surface>, surface: Surface, max_depth: Option<usize>) {
    stack.push(surface);
    if let Some(max_depth) = max_depth {
        let overflow = stack.len().saturating_sub(max_depth);
        if overflow > 0 {
            stack.drain(..overflow);
        }
    }
}
