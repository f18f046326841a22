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

//! GTK4 Application wrapper
//!
//! Sets up the GTK4 application lifecycle and creates the main window.
//!
//! # Architecture
//!
//! ```text
//! App (GTK4 Application)
//!   ├─ Creates Controller (which starts the request worker)
//!   ├─ Builds main window from builders::*
//!   ├─ Polls the controller every 50ms
//!   └─ Queues the initial load
//! ```

use gtk4::prelude::*;
use gtk4::{gdk, Application, ApplicationWindow, CssProvider};
use std::rc::Rc;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::ui::actions::{setup_export_action, setup_quit_action, setup_refresh_action};
use crate::ui::builders::{build_header_bar, build_main_layout, start_event_pump, wire_up_handlers};
use crate::ui::Controller;

pub const APPLICATION_ID: &str = "nl.theorio.Admin";

/// GTK4 Application for question and feedback management
pub struct App {
    /// GTK4 Application instance
    app: Application,
    /// MVC Controller
    controller: Rc<Controller>,
}

impl App {
    /// Creates a new App talking to the API through `client`
    ///
    /// # Returns
    ///
    /// * `Ok(App)` - Worker started, nothing loaded yet
    /// * `Err(String)` - The worker thread could not be started
    ///
    /// # Example
    ///
    /// ```no_run
    /// use theorio_admin::api::ApiClient;
    /// use theorio_admin::ui::App;
    /// use std::time::Duration;
    ///
    /// let client = ApiClient::new("http://127.0.0.1:5001", "key", Duration::from_secs(30))
    ///     .map_err(|e| e.to_string())?;
    /// let app = App::new(client)?;
    /// app.run();
    /// # Ok::<(), String>(())
    /// ```
    pub fn new(client: ApiClient) -> Result<Self, String> {
        let app = Application::builder()
            .application_id(APPLICATION_ID)
            .build();

        let controller = Controller::new(client)
            .map_err(|e| format!("Failed to start request worker: {}", e))?;

        Ok(Self {
            app,
            controller: Rc::new(controller),
        })
    }

    /// Runs the GTK4 main loop; blocks until the application exits
    pub fn run(self) -> glib::ExitCode {
        let controller = self.controller.clone();

        self.app.connect_activate(move |app| {
            Self::build_ui(app, controller.clone());
        });

        // Command-line arguments belong to clap, not GTK
        self.app.run_with_args::<&str>(&[])
    }

    /// Applies `style.css` to the default display
    fn load_css() {
        let Some(display) = gdk::Display::default() else {
            warn!("No display available, skipping custom CSS");
            return;
        };

        let provider = CssProvider::new();
        provider.load_from_string(include_str!("style.css"));

        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }

    /// Builds the main window UI when the application activates
    fn build_ui(app: &Application, controller: Rc<Controller>) {
        Self::load_css();

        let window = ApplicationWindow::builder()
            .application(app)
            .title("Theorio Admin")
            .default_width(1100)
            .default_height(800)
            .build();

        let layout = build_main_layout(controller.clone());
        window.set_titlebar(Some(&build_header_bar(&layout.stack)));
        window.set_child(Some(&layout.root));

        wire_up_handlers(&window, controller.clone(), &layout);
        setup_quit_action(app);
        setup_refresh_action(app, controller.clone());
        setup_export_action(app, &window, controller.clone());

        start_event_pump(&window, controller.clone(), &layout);

        info!("Main window ready, loading data");
        controller.refresh();
        layout.status_banner.set_pending(controller.pending());

        window.present();
    }
}
