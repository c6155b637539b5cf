//! Terminal front end: reads commands from stdin and drives a polyseg session.

/// Native entry point.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::io::{BufRead, Write};

    use polyseg::command::{Command, HELP, parse_line};
    use polyseg::config::AppConfig;
    use polyseg::{Notice, Session};

    let config = AppConfig::load_from_default_path().unwrap_or_default();
    env_logger::Builder::new()
        .filter_level(config.preferences.log_level.to_level_filter())
        .format_timestamp(None)
        .init();

    let mut session = Session::new(&config);
    let mut prompt = dialog::DialogPrompt;

    println!("polyseg: type 'help' for commands");
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        if let Err(e) = std::io::stdout().flush() {
            log::error!("Failed to flush stdout: {}", e);
        }

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                log::error!("Failed to read input: {}", e);
                break;
            }
            None => break,
        };

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match command {
            Command::Message(message) => {
                let response = session.update(message, &mut prompt);
                for change in &response.scene {
                    log::debug!("scene: {:?}", change);
                }
                match response.notice {
                    Some(Notice::Info(text)) => println!("{text}"),
                    Some(Notice::Warning(text)) => println!("warning: {text}"),
                    None => {}
                }
            }
            Command::Status => print_status(&session),
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn print_status(session: &polyseg::Session) {
    let editor = session.editor();
    match editor.image() {
        Some(image) => println!(
            "image: {} ({}x{})",
            image.path.display(),
            image.width,
            image.height
        ),
        None => println!("image: none"),
    }
    println!("class: {}", editor.active_class());
    println!(
        "open chain: {} points",
        editor.open_chain().map_or(0, <[_]>::len)
    );
    println!("annotations: {}", editor.annotations().len());
    for ann in editor.annotations() {
        println!(
            "  #{} class {} ({} vertices)",
            ann.id(),
            ann.class_id(),
            ann.polygon().vertex_count()
        );
    }
    let t = session.transform();
    println!("view: zoom {:.2}x, pan ({:.0}, {:.0})", t.zoom, t.pan_x, t.pan_y);
}

#[cfg(not(target_arch = "wasm32"))]
mod dialog {
    use std::path::{Path, PathBuf};

    use polyseg::FilePrompt;

    /// Native file dialogs.
    pub struct DialogPrompt;

    impl FilePrompt for DialogPrompt {
        fn pick_image(&mut self, start_dir: &Path) -> Option<PathBuf> {
            log::info!("📂 Opening image dialog...");
            rfd::FileDialog::new()
                .set_title("Open image")
                .set_directory(start_dir)
                .add_filter(
                    "Images",
                    &["png", "jpg", "jpeg", "bmp", "tif", "tiff", "webp", "gif"],
                )
                .add_filter("All files", &["*"])
                .pick_file()
        }

        fn pick_save_path(&mut self, title: &str, suggested: &Path) -> Option<PathBuf> {
            let mut dialog = rfd::FileDialog::new().set_title(format!("Save {title}"));
            if let Some(dir) = suggested.parent() {
                dialog = dialog.set_directory(dir);
            }
            if let Some(name) = suggested.file_name().and_then(|n| n.to_str()) {
                dialog = dialog.set_file_name(name);
            }
            dialog.save_file()
        }
    }
}

// The terminal front end is native only.
#[cfg(target_arch = "wasm32")]
fn main() {}
