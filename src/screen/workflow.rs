use serde::Serialize;

/// Where the user is in one search-and-select cycle.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    #[default]
    Idle,
    Typing,
    ShowingSuggestions,
    Selected,
    MarkerPlaced,
}

impl WorkflowState {
    pub fn on_text(text: &str) -> Self {
        if text.is_empty() {
            WorkflowState::Idle
        } else {
            WorkflowState::Typing
        }
    }

    /// Suggestions only count as shown while the user is typing.
    pub fn with_suggestions_visible(self, visible: bool) -> Self {
        match self {
            WorkflowState::Typing if visible => WorkflowState::ShowingSuggestions,
            WorkflowState::ShowingSuggestions if !visible => WorkflowState::Typing,
            other => other,
        }
    }
}
