// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Application actions setup
//!
//! Creates GTK actions for menu items and the header bar (quit, refresh,
//! export).

use gtk4::{gio, prelude::*, Application, ApplicationWindow, FileDialog};
use std::rc::Rc;
use tracing::{debug, info, warn};

use crate::ui::builders::show_alert;
use crate::ui::Controller;

/// Default file name offered by the export dialog
const EXPORT_FILE_NAME: &str = "theorio-catalog.json";

/// Sets up the quit action (app.quit, Ctrl+Q)
pub fn setup_quit_action(app: &Application) {
    let quit_action = gio::SimpleAction::new("quit", None);
    let app_for_quit = app.clone();

    quit_action.connect_activate(move |_, _| {
        app_for_quit.quit();
    });

    app.add_action(&quit_action);
    app.set_accels_for_action("app.quit", &["<Control>q"]);
}

/// Sets up the refresh action (app.refresh, F5)
///
/// Queues reloads of subjects, exams and feedback. The views update when
/// the results arrive.
pub fn setup_refresh_action(app: &Application, controller: Rc<Controller>) {
    let refresh_action = gio::SimpleAction::new("refresh", None);

    refresh_action.connect_activate(move |_, _| {
        controller.refresh();
    });

    app.add_action(&refresh_action);
    app.set_accels_for_action("app.refresh", &["F5", "<Control>r"]);
}

/// Sets up the export action
///
/// Opens a file save dialog and writes the loaded catalog and feedback as a
/// JSON snapshot to the chosen file.
pub fn setup_export_action(app: &Application, window: &ApplicationWindow, controller: Rc<Controller>) {
    let export_action = gio::SimpleAction::new("export", None);
    let window_for_export = window.clone();

    export_action.connect_activate(move |_, _| {
        let file_dialog = FileDialog::builder()
            .title("Export Catalog")
            .initial_name(EXPORT_FILE_NAME)
            .build();

        let controller_clone = controller.clone();
        let window_clone = window_for_export.clone();

        file_dialog.save(
            Some(&window_for_export),
            None::<&gio::Cancellable>,
            move |result| {
                let file = match result {
                    Ok(file) => file,
                    Err(_) => {
                        debug!("Export cancelled");
                        return;
                    }
                };

                let Some(path) = file.path() else {
                    show_alert(
                        &window_clone,
                        "Export Failed",
                        "The chosen location is not a local file.",
                    );
                    return;
                };

                match controller_clone.export(&path) {
                    Ok(count) => info!(path = %path.display(), count, "Export finished"),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Export failed");
                        show_alert(&window_clone, "Export Failed", &e.to_string());
                    }
                }
            },
        );
    });

    app.add_action(&export_action);
}
