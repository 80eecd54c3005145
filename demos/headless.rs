use twinmap::prelude::*;

/// Walks through a split-view session without any UI, printing what the
/// coordinator does at each step.
fn main() -> twinmap::Result<()> {
    twinmap::init_debug_logging();

    let config = match std::env::args().nth(1) {
        Some(path) => CoordinatorConfig::from_json_file(path)?,
        None => CoordinatorProfile::Standard.resolve(),
    };
    println!("Config:\n{}", config.to_json_string()?);

    let mounts = MountTable::with_defaults();
    let mut coordinator = SplitViewCoordinator::new(HeadlessEngine::new(), config);

    let report = coordinator.commit(&mounts).unwrap_or_default();
    print_step("initial", &coordinator, &report);

    let report = coordinator.toggle_split_view(&mounts);
    print_step("split", &coordinator, &report);

    let report = coordinator.toggle_overlay(&mounts);
    print_step("overlay on", &coordinator, &report);

    if let Some(secondary) = coordinator.manager().map_handle(MountSlot::Secondary) {
        coordinator
            .engine()
            .dispatch_pointer_move(secondary, Point::new(12.3, 45.6));
    }
    for slot in MountSlot::ALL {
        let p = coordinator.feature(slot).coordinate();
        println!("  {} spotlight at ({:.1}, {:.1})", slot, p.x, p.y);
    }

    let report = coordinator.toggle_split_view(&mounts);
    print_step("merge", &coordinator, &report);

    coordinator.unmount();
    println!(
        "unmounted: {} maps, {} interactions live",
        coordinator.engine().live_map_count(),
        coordinator.engine().live_interaction_count()
    );
    Ok(())
}

fn print_step(
    name: &str,
    coordinator: &SplitViewCoordinator<HeadlessEngine>,
    report: &ReconcileReport,
) {
    let state = coordinator.state();
    let controls = coordinator.controls();
    println!(
        "{:<11} split={} overlay={} maps={} [{}] disposed={:?} created={:?}",
        name,
        state.split_view,
        state.overlay_visible,
        coordinator.engine().live_map_count(),
        controls.split_label,
        report.disposed,
        report.created
    );
}
