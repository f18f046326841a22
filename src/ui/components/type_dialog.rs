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

//! Question type picker
//!
//! First step of "Add Question": a small modal with one button per
//! [`QuestionType`]. Clicks are recorded in a [`TypeChoice`] and
//! [`TypeDialog::show_and_wait`] returns its result.

use gtk4::prelude::*;
use gtk4::{Box as GtkBox, Button, Label, Orientation, Window};
use std::rc::Rc;
use tracing::debug;

use crate::core::QuestionType;
use crate::ui::type_choice::TypeChoice;

/// Modal window listing the question types
pub struct TypeDialog {
    dialog_window: Window,
    choice: Rc<TypeChoice>,
}

impl TypeDialog {
    pub fn new(parent: &impl IsA<Window>) -> Self {
        let dialog_window = Window::builder()
            .title("New Question")
            .modal(true)
            .transient_for(parent)
            .default_width(320)
            .resizable(false)
            .build();

        let vbox = GtkBox::builder()
            .orientation(Orientation::Vertical)
            .spacing(10)
            .margin_start(20)
            .margin_end(20)
            .margin_top(20)
            .margin_bottom(20)
            .build();

        let prompt = Label::builder()
            .label("Choose the question type")
            .xalign(0.0)
            .build();
        prompt.add_css_class("field-header");
        vbox.append(&prompt);

        let choice = Rc::new(TypeChoice::new());

        for kind in QuestionType::ALL {
            let button = Button::builder().label(kind.label()).build();
            let choice = choice.clone();
            let window = dialog_window.clone();
            button.connect_clicked(move |_| {
                choice.select_type(kind);
                window.close();
            });
            vbox.append(&button);
        }

        let cancel_button = Button::builder().label("Cancel").margin_top(10).build();
        {
            let choice = choice.clone();
            let window = dialog_window.clone();
            cancel_button.connect_clicked(move |_| {
                choice.cancel();
                window.close();
            });
        }
        vbox.append(&cancel_button);

        // Window X counts as Cancel
        {
            let choice = choice.clone();
            dialog_window.connect_close_request(move |_| {
                if !choice.is_closed() {
                    choice.cancel();
                }
                glib::Propagation::Proceed
            });
        }

        dialog_window.set_child(Some(&vbox));

        Self {
            dialog_window,
            choice,
        }
    }

    /// Presents the picker and blocks in a nested main loop until closed
    pub fn show_and_wait(self) -> Option<QuestionType> {
        self.dialog_window.present();

        let main_context = glib::MainContext::default();
        while !self.choice.is_closed() && self.dialog_window.is_visible() {
            main_context.iteration(true);
        }

        let result = self.choice.result();
        debug!(?result, "Type picker closed");
        result
    }
}
