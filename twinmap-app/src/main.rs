use anyhow::Context as _;
use twinmap::{
    ui::{SplitViewShell, UiSplitViewExt},
    CoordinatorConfig, CoordinatorProfile,
};

/// Environment variable naming an optional JSON configuration file
const CONFIG_ENV: &str = "TWINMAP_CONFIG";

/// Standalone split-view viewer
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = load_config()?;
    log::info!(
        "starting viewer: overlay strategy {:?}, spotlight radius {}",
        config.overlay_strategy,
        config.overlay.radius
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("TwinMap - Split View"),
        ..Default::default()
    };

    eframe::run_native(
        "twinmap-app",
        options,
        Box::new(move |_cc| Box::new(TwinMapApp::new(config))),
    )
    .map_err(|e| anyhow::anyhow!("viewer exited with error: {e}"))?;

    Ok(())
}

fn load_config() -> anyhow::Result<CoordinatorConfig> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => CoordinatorConfig::from_json_file(&path)
            .with_context(|| format!("loading {} from {:?}", CONFIG_ENV, path)),
        None => Ok(CoordinatorProfile::Standard.resolve()),
    }
}

struct TwinMapApp {
    shell: SplitViewShell,
}

impl TwinMapApp {
    fn new(config: CoordinatorConfig) -> Self {
        Self {
            shell: SplitViewShell::new(config),
        }
    }
}

impl eframe::App for TwinMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.split_view(&mut self.shell);
        });
    }
}
