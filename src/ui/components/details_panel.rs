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

//! Details panel for the selected question.
//!
//! Shows the parent section followed by the rows from
//! [`question_detail_lines`], which vary with the question type, plus the
//! Edit and Delete buttons.

use gtk4::{
    pango::WrapMode::WordChar, prelude::*, Align, Box as GtkBox, Button, Frame, Grid, Label,
    Orientation, ScrolledWindow, Separator,
};
use std::{cell::RefCell, rc::Rc};

use crate::core::{format::question_detail_lines, Question, QuestionParent};

/// A panel that displays the selected question.
///
/// The panel width is enforced by the parent Paned widget in layout.rs
pub struct DetailsPanel {
    /// Root widget (Frame)
    widget: Frame,
    /// Header/value rows, rebuilt for every selection
    grid: Grid,
    /// Edit button
    edit_button: Button,
    /// Delete button
    delete_button: Button,
    /// Currently displayed question (for edit/delete)
    current_question: Rc<RefCell<Option<(QuestionParent, Question)>>>,
}

impl DetailsPanel {
    /// Helper to create a label row (header + value) for the details grid
    fn create_label_row(header_text: &str, value_text: &str) -> (Label, Label) {
        let header = Label::builder()
            .label(format!("{}:", header_text))
            .halign(Align::End)
            .valign(Align::Start)
            .xalign(1.0)
            .build();
        header.add_css_class("field-header");

        let value = Label::builder()
            .label(value_text)
            .halign(Align::Start)
            .xalign(0.0)
            .wrap(true)
            .wrap_mode(WordChar)
            .max_width_chars(40)
            .selectable(true)
            .build();

        (header, value)
    }

    /// Create a new, empty details panel.
    pub fn new() -> Self {
        let frame = Frame::builder()
            .label("Selected Question")
            .margin_start(10)
            .margin_end(10)
            .margin_top(10)
            .margin_bottom(10)
            .width_request(340)
            .build();

        let vbox = GtkBox::new(Orientation::Vertical, 10);
        vbox.set_margin_start(15);
        vbox.set_margin_end(15);
        vbox.set_margin_top(15);
        vbox.set_margin_bottom(15);

        let grid = Grid::builder().row_spacing(10).column_spacing(15).build();
        let scrolled = ScrolledWindow::builder()
            .vexpand(true)
            .hscrollbar_policy(gtk4::PolicyType::Never)
            .child(&grid)
            .build();
        vbox.append(&scrolled);

        let separator = Separator::new(Orientation::Horizontal);
        separator.set_margin_top(10);
        separator.set_margin_bottom(10);
        vbox.append(&separator);

        let edit_button = Button::builder()
            .label("Edit Question")
            .sensitive(false)
            .build();
        vbox.append(&edit_button);

        let delete_button = Button::builder()
            .label("Delete Question")
            .sensitive(false)
            .build();
        delete_button.add_css_class("destructive-action");
        vbox.append(&delete_button);

        frame.set_child(Some(&vbox));

        let panel = Self {
            widget: frame,
            grid,
            edit_button,
            delete_button,
            current_question: Rc::new(RefCell::new(None)),
        };
        panel.update_question(None);
        panel
    }

    /// Displays `selection`, or a placeholder when `None`
    pub fn update_question(&self, selection: Option<(&QuestionParent, &Question)>) {
        *self.current_question.borrow_mut() =
            selection.map(|(parent, question)| (parent.clone(), question.clone()));

        self.edit_button.set_sensitive(selection.is_some());
        self.delete_button.set_sensitive(selection.is_some());

        while let Some(child) = self.grid.first_child() {
            self.grid.remove(&child);
        }

        let Some((parent, question)) = selection else {
            let placeholder = Label::builder()
                .label("Select a question")
                .halign(Align::Start)
                .build();
            placeholder.add_css_class("dim-label");
            self.grid.attach(&placeholder, 0, 0, 2, 1);
            return;
        };

        let mut rows = vec![("Section", parent.to_string())];
        if let Some(id) = &question.id {
            rows.push(("Id", id.clone()));
        }
        rows.extend(question_detail_lines(question));

        for (row, (header_text, value_text)) in rows.iter().enumerate() {
            let (header, value) = Self::create_label_row(header_text, value_text);
            self.grid.attach(&header, 0, row as i32, 1, 1);
            self.grid.attach(&value, 1, row as i32, 1, 1);
        }
    }

    /// Id of the displayed question
    pub fn current_id(&self) -> Option<String> {
        self.current_question
            .borrow()
            .as_ref()
            .and_then(|(_, q)| q.id.clone())
    }

    /// Connects the delete button to a callback
    pub fn connect_delete<F>(&self, callback: F)
    where
        F: Fn(&Question) + 'static,
    {
        let current_question = self.current_question.clone();

        self.delete_button.connect_clicked(move |_button| {
            // Clone out first: the callback may refresh this panel
            let selected = current_question.borrow().as_ref().map(|(_, q)| q.clone());
            if let Some(question) = selected {
                callback(&question);
            }
        });
    }

    /// Connects a callback to the edit button
    pub fn connect_edit<F>(&self, callback: F)
    where
        F: Fn(&QuestionParent, &Question) + 'static,
    {
        let current_question = self.current_question.clone();

        self.edit_button.connect_clicked(move |_button| {
            let selected = current_question.borrow().clone();
            if let Some((parent, question)) = selected {
                callback(&parent, &question);
            }
        });
    }

    /// Returns the root widget (Frame) for adding to the UI
    pub fn widget(&self) -> &Frame {
        &self.widget
    }
}

impl Default for DetailsPanel {
    fn default() -> Self {
        Self::new()
    }
}
