pub struct DocumentView {
    id: u64,
    pub title: String,
    pub content: String,
    open: bool,
}

impl DocumentView {
    pub fn id(&self) -> u64 {
        self.id
    }

    fn show(&mut self, ctx: &egui::Context) {
        let mut open = self.open;
        egui::Window::new(self.title.as_str())
            .id(egui::Id::new(("design-doc", self.id)))
            .open(&mut open)
            .default_size([520.0, 420.0])
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        let mut text = self.content.as_str();
                        ui.add(
                            egui::TextEdit::multiline(&mut text)
                                .desired_width(f32::INFINITY),
                        );
                    });
            });
        self.open = open;
    }
}

/// Open design document views. Each view is its own window and closes
/// independently; the same document may be open more than once.
#[derive(Default)]
pub struct DocumentWindows {
    views: Vec<DocumentView>,
    next_id: u64,
}

impl DocumentWindows {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, title: impl Into<String>, content: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.views.push(DocumentView {
            id,
            title: title.into(),
            content: content.into(),
            open: true,
        });
        id
    }

    pub fn views(&self) -> &[DocumentView] {
        &self.views
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        for view in &mut self.views {
            view.show(ctx);
        }
        self.views.retain(|view| view.open);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_frame(windows: &mut DocumentWindows) {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| windows.show(ctx));
    }

    #[test]
    fn closing_one_view_leaves_the_others() {
        let mut windows = DocumentWindows::new();
        let first = windows.open("a_design.md", "A");
        let second = windows.open("a_design.md", "A");
        let third = windows.open("b_design.md", "B");
        assert_ne!(first, second);

        // As if the close button of the second window was clicked.
        windows.views[1].open = false;
        run_frame(&mut windows);

        let ids: Vec<u64> = windows.views().iter().map(DocumentView::id).collect();
        assert_eq!(ids, vec![first, third]);
    }

    #[test]
    fn ids_are_not_reused_after_close() {
        let mut windows = DocumentWindows::new();
        let first = windows.open("a.md", "");
        windows.views[0].open = false;
        run_frame(&mut windows);
        assert!(windows.is_empty());

        assert_ne!(windows.open("a.md", ""), first);
    }

    #[test]
    fn showing_keeps_open_views() {
        let mut windows = DocumentWindows::new();
        windows.open("a.md", "# A");
        windows.open("b.md", "# B");

        run_frame(&mut windows);
        assert_eq!(windows.len(), 2);
    }
}
