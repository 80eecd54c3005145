pub mod engine;
pub mod shell;

pub use engine::EguiEngine;
pub use shell::{slot_regions, SplitViewShell};

/// Adds the split-view shell to a `Ui`.
pub trait UiSplitViewExt {
    fn split_view(&mut self, shell: &mut SplitViewShell) -> egui::Response;
}

impl UiSplitViewExt for egui::Ui {
    fn split_view(&mut self, shell: &mut SplitViewShell) -> egui::Response {
        shell.show(self)
    }
}
