use egui_extras::{Column, TableBuilder};

pub const NO_MATCH_LABEL: &str = "(no matching design document)";

/// A row of the match list. `NoMatch` is shown when a snippet matched
/// nothing and can never be opened, whatever a document is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEntry {
    Document(String),
    NoMatch,
}

impl ListEntry {
    pub fn label(&self) -> &str {
        match self {
            ListEntry::Document(name) => name,
            ListEntry::NoMatch => NO_MATCH_LABEL,
        }
    }
}

#[derive(Default)]
pub struct MatchListState {
    entries: Vec<ListEntry>,
    selected_index: usize,
}

impl MatchListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole list with the documents of the latest match cycle.
    pub fn update_list(&mut self, docs: Vec<String>) {
        self.entries = if docs.is_empty() {
            vec![ListEntry::NoMatch]
        } else {
            docs.into_iter().map(ListEntry::Document).collect()
        };
        self.selected_index = 0;
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Document name to open for the entry at `index`, if it is one.
    pub fn activate(&self, index: usize) -> Option<String> {
        match self.entries.get(index)? {
            ListEntry::Document(name) => Some(name.clone()),
            ListEntry::NoMatch => None,
        }
    }

    pub fn select_previous(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected_index + 1 < self.entries.len() {
            self.selected_index += 1;
        }
    }

    /// Draws the list and returns the name of a document the user asked
    /// to open this frame.
    pub fn show(&mut self, ui: &mut egui::Ui, keyboard_focus: bool) -> Option<String> {
        let mut opened = None;

        if self.entries.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.weak("Waiting for a new snippet...");
            });
            return None;
        }

        let table = TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .sense(egui::Sense::click())
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(32.0))
            .column(Column::remainder())
            .min_scrolled_height(300.0);

        table
            .header(20.0, |mut header| {
                header.col(|ui| { ui.strong("#"); });
                header.col(|ui| { ui.strong("Design document"); });
            })
            .body(|body| {
                body.rows(25.0, self.entries.len(), |mut row| {
                    let index = row.index();
                    let Some(entry) = self.entries.get(index) else {
                        return;
                    };

                    row.set_selected(index == self.selected_index);

                    row.col(|ui| {
                        if matches!(entry, ListEntry::Document(_)) {
                            ui.label((index + 1).to_string());
                        }
                    });
                    row.col(|ui| match entry {
                        ListEntry::Document(name) => {
                            ui.label(name.as_str());
                        }
                        ListEntry::NoMatch => {
                            ui.label(egui::RichText::new(NO_MATCH_LABEL).italics().weak());
                        }
                    });

                    let response = row.response();
                    if response.clicked() {
                        self.selected_index = index;
                    }
                    if response.double_clicked() {
                        opened = self.activate(index);
                    }
                });
            });

        if keyboard_focus {
            let (up, down, enter) = ui.ctx().input(|i| {
                (
                    i.key_pressed(egui::Key::ArrowUp),
                    i.key_pressed(egui::Key::ArrowDown),
                    i.key_pressed(egui::Key::Enter),
                )
            });
            if up {
                self.select_previous();
            }
            if down {
                self.select_next();
            }
            if enter {
                opened = self.activate(self.selected_index);
            }
        }

        opened
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_shows_placeholder() {
        let mut list = MatchListState::new();
        list.update_list(Vec::new());

        assert_eq!(list.entries(), &[ListEntry::NoMatch]);
        assert_eq!(list.entries()[0].label(), NO_MATCH_LABEL);
        assert_eq!(list.activate(0), None);
    }

    #[test]
    fn document_named_like_placeholder_still_opens() {
        let mut list = MatchListState::new();
        list.update_list(vec![NO_MATCH_LABEL.to_string()]);

        assert_eq!(list.activate(0), Some(NO_MATCH_LABEL.to_string()));
    }

    #[test]
    fn update_replaces_previous_entries() {
        let mut list = MatchListState::new();
        list.update_list(vec!["a.md".into(), "b.md".into(), "a.md".into()]);
        list.select_next();
        assert_eq!(list.selected_index(), 1);

        list.update_list(vec!["c.md".into()]);
        assert_eq!(list.entries(), &[ListEntry::Document("c.md".into())]);
        assert_eq!(list.selected_index(), 0);
        assert_eq!(list.activate(0), Some("c.md".into()));
        assert_eq!(list.activate(1), None);
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut list = MatchListState::new();
        list.update_list(vec!["a.md".into(), "b.md".into()]);

        list.select_previous();
        assert_eq!(list.selected_index(), 0);
        list.select_next();
        list.select_next();
        assert_eq!(list.selected_index(), 1);
    }

    #[test]
    fn renders_headless() {
        let ctx = egui::Context::default();
        let mut list = MatchListState::new();
        list.update_list(vec!["a.md".into()]);

        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                assert_eq!(list.show(ui, true), None);
            });
        });
    }
}
