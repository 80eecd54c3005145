use egui::{Rect, Response, Sense, Stroke, Ui};

use crate::{
    coordinator::SplitViewCoordinator,
    core::{
        config::CoordinatorConfig,
        slot::{MountSlot, SlotLayout},
    },
    mount::{MountRegistry, MountTable},
    ui::engine::EguiEngine,
};

const DIVIDER_WIDTH: f32 = 2.0;

/// Splits `rect` into the regions `layout` shows, primary first.
pub fn slot_regions(rect: Rect, layout: SlotLayout) -> Vec<(MountSlot, Rect)> {
    match layout {
        SlotLayout::FullWidth => vec![(MountSlot::Primary, rect)],
        SlotLayout::SideBySide => {
            let mid = rect.center().x;
            let half_gap = DIVIDER_WIDTH / 2.0;
            let left = Rect::from_min_max(rect.min, egui::pos2(mid - half_gap, rect.max.y));
            let right = Rect::from_min_max(egui::pos2(mid + half_gap, rect.min.y), rect.max);
            vec![(MountSlot::Primary, left), (MountSlot::Secondary, right)]
        }
    }
}

/// The user-facing shell: the split and overlay toggles above one or two
/// map regions.
///
/// ```no_run
/// # fn show(ui: &mut egui::Ui, shell: &mut twinmap::SplitViewShell) {
/// shell.show(ui);
/// # }
/// ```
pub struct SplitViewShell {
    coordinator: SplitViewCoordinator<EguiEngine>,
    mounts: MountTable,
}

impl Default for SplitViewShell {
    fn default() -> Self {
        Self::new(CoordinatorConfig::default())
    }
}

impl SplitViewShell {
    pub fn new(config: CoordinatorConfig) -> Self {
        let mut mounts = MountTable::new();
        mounts.set_default_mounted(MountSlot::Primary, true);

        Self {
            coordinator: SplitViewCoordinator::new(EguiEngine::new(), config),
            mounts,
        }
    }

    pub fn coordinator(&self) -> &SplitViewCoordinator<EguiEngine> {
        &self.coordinator
    }

    /// Toggles split view with the secondary region already laid out for
    /// the new state, so the pass can mount into it right away.
    pub fn toggle_split_view(&mut self) {
        let will_split = !self.coordinator.state().split_view;
        self.mounts.set_default_mounted(MountSlot::Secondary, will_split);
        self.coordinator.toggle_split_view(&self.mounts);
    }

    pub fn toggle_overlay(&mut self) {
        self.coordinator.toggle_overlay(&self.mounts);
    }

    pub fn show(&mut self, ui: &mut Ui) -> Response {
        let controls = self.coordinator.controls();
        let mut split_clicked = false;
        let mut overlay_clicked = false;

        ui.horizontal(|ui| {
            split_clicked = ui.button(controls.split_label).clicked();
            if let Some(label) = controls.overlay_label {
                overlay_clicked = ui.button(label).clicked();
            }
        });

        if split_clicked {
            self.toggle_split_view();
        } else if overlay_clicked {
            self.toggle_overlay();
        }

        let rect = ui.available_rect_before_wrap();
        let response = ui.allocate_rect(rect, Sense::hover());

        self.coordinator.engine_mut().clear_regions();
        for (slot, region) in slot_regions(rect, self.coordinator.layout()) {
            if let Some(mount) = self.mounts.mount_point(slot) {
                self.coordinator.engine_mut().set_region(&mount, region);
            }
        }
        self.coordinator.commit(&self.mounts);

        if let Some(pos) = response.hover_pos() {
            if ui.input(|i| i.pointer.is_moving())
                && self.coordinator.engine().pointer_moved(pos) > 0
            {
                ui.ctx().request_repaint();
            }
        }

        let painter = ui.painter_at(rect);
        self.coordinator.engine().paint(&painter);
        if self.coordinator.layout() == SlotLayout::SideBySide {
            painter.vline(
                rect.center().x,
                rect.y_range(),
                Stroke::new(DIVIDER_WIDTH, ui.visuals().window_stroke.color),
            );
        }

        response
    }
}
