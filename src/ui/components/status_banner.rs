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

//! Status banner component
//!
//! A strip under the header bar that slides in while requests are in flight
//! and after the most recent request failed. The failure itself is also
//! shown as a modal; the banner keeps the last error visible until it is
//! dismissed or the next load succeeds.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │ (spinner) Loading... 3 requests pending             │
//! └─────────────────────────────────────────────────────┘
//! ```

use gtk4::prelude::*;
use gtk4::{Box as GtkBox, Button, Label, Orientation, Revealer, Spinner};
use std::cell::RefCell;

/// Loading/error banner
pub struct StatusBanner {
    /// Root widget (Revealer for smooth show/hide animation)
    widget: Revealer,
    container: GtkBox,
    spinner: Spinner,
    message_label: Label,
    dismiss_button: Button,
    /// Last error message, if not yet dismissed
    error: RefCell<Option<String>>,
}

impl StatusBanner {
    /// Creates a hidden banner
    pub fn new() -> Self {
        let revealer = Revealer::builder()
            .transition_type(gtk4::RevealerTransitionType::SlideDown)
            .transition_duration(200)
            .reveal_child(false)
            .build();

        let container = GtkBox::builder()
            .orientation(Orientation::Horizontal)
            .spacing(10)
            .margin_start(10)
            .margin_end(10)
            .margin_top(5)
            .margin_bottom(5)
            .hexpand(true)
            .build();

        let spinner = Spinner::new();

        let message_label = Label::builder()
            .xalign(0.0)
            .margin_top(5)
            .margin_bottom(5)
            .hexpand(true)
            .build();

        let dismiss_button = Button::builder().label("Dismiss").visible(false).build();

        container.append(&spinner);
        container.append(&message_label);
        container.append(&dismiss_button);
        revealer.set_child(Some(&container));

        Self {
            widget: revealer,
            container,
            spinner,
            message_label,
            dismiss_button,
            error: RefCell::new(None),
        }
    }

    /// Shows progress for `pending` in-flight requests, or hides when 0
    ///
    /// An undismissed error stays on screen once loading finishes.
    pub fn set_pending(&self, pending: usize) {
        if pending > 0 {
            let message = if pending == 1 {
                "Loading... 1 request pending".to_string()
            } else {
                format!("Loading... {} requests pending", pending)
            };
            self.show(&message, false);
            return;
        }

        let error = self.error.borrow().clone();
        match error {
            Some(message) => self.show(&message, true),
            None => {
                self.spinner.stop();
                self.widget.set_reveal_child(false);
            }
        }
    }

    /// Shows `message` as an error until dismissed
    pub fn show_error(&self, message: &str) {
        *self.error.borrow_mut() = Some(message.to_string());
        self.show(message, true);
    }

    /// Forgets the last error and hides the banner
    pub fn clear_error(&self) {
        self.error.borrow_mut().take();
        self.set_pending(0);
    }

    fn show(&self, message: &str, is_error: bool) {
        self.message_label.set_label(message);
        self.spinner.set_spinning(!is_error);
        self.spinner.set_visible(!is_error);
        self.dismiss_button.set_visible(is_error);

        if is_error {
            self.container.remove_css_class("info-banner");
            self.container.add_css_class("error-banner");
        } else {
            self.container.remove_css_class("error-banner");
            self.container.add_css_class("info-banner");
        }

        self.widget.set_reveal_child(true);
    }

    /// Connects the dismiss button
    pub fn connect_dismiss<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.dismiss_button.connect_clicked(move |_| callback());
    }

    /// Returns the root widget for adding to parent container
    pub fn widget(&self) -> &Revealer {
        &self.widget
    }
}

impl Default for StatusBanner {
    fn default() -> Self {
        Self::new()
    }
}
