// src/lib.rs
pub mod config;
pub mod db;
pub mod debounce;
pub mod diagnostics;
pub mod error;
pub mod logger;
pub mod normalize;
pub mod playground;
pub mod preview;
pub mod projects;
pub mod store;
pub mod theme;
pub mod types;
pub mod workspace;

#[cfg(feature = "desktop")]
mod commands;

pub use error::{ErrorKind, PlaygroundError, Result};
pub use normalize::normalize;
pub use playground::{Playground, RestoreSource};
pub use preview::assemble;
pub use types::Project;

#[cfg(feature = "desktop")]
pub fn run() {
    use commands::{PlaygroundState, WebviewSink};
    use config::PlaygroundConfig;
    use debounce::DebouncedTrigger;
    use std::sync::Mutex;
    use store::SqliteStore;
    use tauri::Manager; // Needed for app.manage()

    let config = match PlaygroundConfig::load(PlaygroundConfig::default_file().as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Falling back to default configuration: {}", e);
            PlaygroundConfig::default()
        }
    };
    logger::init_logger(config.log_filter.as_deref());

    let context = tauri::generate_context!();

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_opener::init())
        .setup(move |app| {
            let app_handle = app.handle().clone();

            let db_path = db::get_db_path(&config.database_file)?;
            let conn = db::open_database(&db_path)?;

            let playground = Playground::from_config(
                SqliteStore::new(conn),
                WebviewSink::new(app_handle.clone()),
                &config,
            )
            .with_workspace(commands::desktop_workspace(&app_handle));
            let log_handle = app_handle.clone();
            playground
                .diagnostics()
                .set_listener(move |diagnostic| commands::emit_diagnostic(&log_handle, diagnostic));

            let resize_handle = app_handle.clone();
            let resize = DebouncedTrigger::spawn(config.resize_debounce(), move || {
                commands::resize_editors(&resize_handle)
            });

            app.manage(PlaygroundState {
                playground: Mutex::new(playground),
                resize,
                theme_resize_delay: config.theme_resize_delay(),
            });
            Ok(())
        })
        .on_window_event(|window, event| {
            if let tauri::WindowEvent::Resized(_) = event {
                if let Some(state) = window.try_state::<PlaygroundState>() {
                    state.resize.trigger();
                }
            }
        })
        .invoke_handler(tauri::generate_handler![
            commands::restore_project_cmd,
            commands::edit_pane_cmd,
            commands::set_field_cmd,
            commands::show_pane_cmd,
            commands::run_preview_cmd,
            commands::save_project_cmd,
            commands::load_project_text_cmd,
            commands::import_project_cmd,
            commands::export_project_cmd,
            commands::open_preview_cmd,
            commands::get_theme_cmd,
            commands::toggle_theme_cmd,
            commands::list_diagnostics_cmd,
            commands::clear_diagnostics_cmd
        ])
        .run(context)
        .expect("error while running tauri application");
}
