#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutKey {
    Character(char),
    Enter,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShortcutModifiers {
    pub ctrl: bool,
    pub shift: bool,
}

impl ShortcutModifiers {
    pub const fn new(ctrl: bool, shift: bool) -> Self {
        Self { ctrl, shift }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputContext {
    /// A modal dialog (resize, file chooser) owns the keyboard.
    pub dialog_open: bool,
    /// A pointer gesture is in progress on the canvas.
    pub gesture_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    DialogConfirm,
    DialogCancel,
    NewFile,
    OpenFile,
    SaveFile,
    Quit,
    Cut,
    Copy,
    Paste,
    SelectAll,
    Undo,
    Redo,
    ZoomIn,
    ZoomOut,
    ZoomReset,
}

impl ShortcutAction {
    /// Whether the canvas session can carry the action out by itself; the
    /// rest need the surrounding application (dialogs, process exit).
    pub const fn is_canvas_action(self) -> bool {
        !matches!(
            self,
            Self::DialogConfirm | Self::DialogCancel | Self::OpenFile | Self::SaveFile | Self::Quit
        )
    }
}

fn resolve_dialog_shortcut(key: ShortcutKey) -> Option<ShortcutAction> {
    match key {
        ShortcutKey::Enter => Some(ShortcutAction::DialogConfirm),
        ShortcutKey::Escape => Some(ShortcutAction::DialogCancel),
        _ => None,
    }
}

fn resolve_file_shortcut(key: ShortcutKey) -> Option<ShortcutAction> {
    match key {
        ShortcutKey::Character('n') => Some(ShortcutAction::NewFile),
        ShortcutKey::Character('o') => Some(ShortcutAction::OpenFile),
        ShortcutKey::Character('s') => Some(ShortcutAction::SaveFile),
        ShortcutKey::Character('q') => Some(ShortcutAction::Quit),
        _ => None,
    }
}

fn resolve_edit_shortcut(key: ShortcutKey) -> Option<ShortcutAction> {
    match key {
        ShortcutKey::Character('x') => Some(ShortcutAction::Cut),
        ShortcutKey::Character('c') => Some(ShortcutAction::Copy),
        ShortcutKey::Character('v') => Some(ShortcutAction::Paste),
        ShortcutKey::Character('a') => Some(ShortcutAction::SelectAll),
        ShortcutKey::Character('z') => Some(ShortcutAction::Undo),
        ShortcutKey::Character('y') => Some(ShortcutAction::Redo),
        _ => None,
    }
}

fn resolve_view_shortcut(key: ShortcutKey) -> Option<ShortcutAction> {
    match key {
        ShortcutKey::Character('+') | ShortcutKey::Character('=') => Some(ShortcutAction::ZoomIn),
        ShortcutKey::Character('-') => Some(ShortcutAction::ZoomOut),
        ShortcutKey::Character('0') => Some(ShortcutAction::ZoomReset),
        _ => None,
    }
}

pub fn resolve_shortcut(
    key: ShortcutKey,
    modifiers: ShortcutModifiers,
    context: InputContext,
) -> Option<ShortcutAction> {
    if context.dialog_open {
        return resolve_dialog_shortcut(key);
    }

    if !modifiers.ctrl {
        return None;
    }

    let key = match key {
        ShortcutKey::Character(ch) => ShortcutKey::Character(ch.to_ascii_lowercase()),
        other => other,
    };

    if let Some(action) = resolve_view_shortcut(key) {
        return Some(action);
    }

    // Editing mid-gesture would race the preview flatten on release.
    if context.gesture_active {
        return None;
    }

    resolve_file_shortcut(key).or_else(|| resolve_edit_shortcut(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CTRL: ShortcutModifiers = ShortcutModifiers::new(true, false);

    fn editor() -> InputContext {
        InputContext::default()
    }

    #[test]
    fn resolve_shortcut_prioritizes_dialog_context() {
        let context = InputContext {
            dialog_open: true,
            ..Default::default()
        };
        assert_eq!(
            resolve_shortcut(ShortcutKey::Enter, ShortcutModifiers::default(), context),
            Some(ShortcutAction::DialogConfirm)
        );
        assert_eq!(
            resolve_shortcut(ShortcutKey::Escape, ShortcutModifiers::default(), context),
            Some(ShortcutAction::DialogCancel)
        );
        assert_eq!(
            resolve_shortcut(ShortcutKey::Character('z'), CTRL, context),
            None
        );
    }

    #[test]
    fn resolve_shortcut_maps_file_and_edit_shortcuts() {
        let cases = [
            ('n', ShortcutAction::NewFile),
            ('o', ShortcutAction::OpenFile),
            ('s', ShortcutAction::SaveFile),
            ('q', ShortcutAction::Quit),
            ('x', ShortcutAction::Cut),
            ('c', ShortcutAction::Copy),
            ('v', ShortcutAction::Paste),
            ('a', ShortcutAction::SelectAll),
            ('z', ShortcutAction::Undo),
            ('y', ShortcutAction::Redo),
        ];
        for (ch, action) in cases {
            assert_eq!(
                resolve_shortcut(ShortcutKey::Character(ch), CTRL, editor()),
                Some(action),
                "ctrl+{ch}"
            );
        }
    }

    #[test]
    fn resolve_shortcut_maps_zoom_keys_including_equal_alias() {
        for (ch, action) in [
            ('+', ShortcutAction::ZoomIn),
            ('=', ShortcutAction::ZoomIn),
            ('-', ShortcutAction::ZoomOut),
            ('0', ShortcutAction::ZoomReset),
        ] {
            assert_eq!(
                resolve_shortcut(ShortcutKey::Character(ch), CTRL, editor()),
                Some(action)
            );
        }
    }

    #[test]
    fn resolve_shortcut_requires_ctrl_and_ignores_case() {
        assert_eq!(
            resolve_shortcut(
                ShortcutKey::Character('z'),
                ShortcutModifiers::default(),
                editor()
            ),
            None
        );
        assert_eq!(
            resolve_shortcut(
                ShortcutKey::Character('Z'),
                ShortcutModifiers::new(true, true),
                editor()
            ),
            Some(ShortcutAction::Undo)
        );
    }

    #[test]
    fn resolve_shortcut_keeps_zoom_but_blocks_edits_mid_gesture() {
        let context = InputContext {
            gesture_active: true,
            ..Default::default()
        };
        assert_eq!(
            resolve_shortcut(ShortcutKey::Character('z'), CTRL, context),
            None
        );
        assert_eq!(
            resolve_shortcut(ShortcutKey::Character('-'), CTRL, context),
            Some(ShortcutAction::ZoomOut)
        );
    }

    #[test]
    fn canvas_actions_exclude_application_level_ones() {
        assert!(ShortcutAction::Undo.is_canvas_action());
        assert!(ShortcutAction::NewFile.is_canvas_action());
        assert!(!ShortcutAction::SaveFile.is_canvas_action());
        assert!(!ShortcutAction::Quit.is_canvas_action());
    }
}
