/// Keyboard shortcuts understood by the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    TogglePlay,
    ToggleMenu,
    ToggleHud,
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    match key {
        " " | "k" | "K" => Some(KeyAction::TogglePlay),
        "m" | "M" | "Escape" => Some(KeyAction::ToggleMenu),
        "h" | "H" => Some(KeyAction::ToggleHud),
        _ => None,
    }
}
