use journal_finder_core::{FilterState, LlmModel};

/// One focusable row in the filter sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarItem {
    Model(LlmModel),
    ImpactFactor,
    DecisionTime,
    PublisherSearch,
    /// A selected publisher chip (removable).
    Publisher(String),
    FindJournals,
}

impl SidebarItem {
    /// Rows in display order for the given filter state.
    pub fn all(filters: &FilterState) -> Vec<SidebarItem> {
        let mut items: Vec<SidebarItem> = LlmModel::sidebar()
            .iter()
            .map(|&m| SidebarItem::Model(m))
            .collect();
        items.push(SidebarItem::ImpactFactor);
        items.push(SidebarItem::DecisionTime);
        items.push(SidebarItem::PublisherSearch);
        items.extend(
            filters
                .publishers()
                .iter()
                .map(|p| SidebarItem::Publisher(p.clone())),
        );
        items.push(SidebarItem::FindJournals);
        items
    }
}

/// Cursor state for the sidebar.
#[derive(Debug, Clone, Default)]
pub struct SidebarState {
    pub cursor: usize,
    /// Highlighted suggestion while typing in the publisher search box.
    pub suggestion_cursor: usize,
}

impl SidebarState {
    /// The item under the cursor, clamping the cursor if the list shrank.
    pub fn current(&mut self, filters: &FilterState) -> SidebarItem {
        let items = SidebarItem::all(filters);
        self.cursor = self.cursor.min(items.len().saturating_sub(1));
        items[self.cursor].clone()
    }

    pub fn move_down(&mut self, filters: &FilterState) {
        let len = SidebarItem::all(filters).len();
        self.cursor = (self.cursor + 1).min(len.saturating_sub(1));
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }
}
