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

//! Feedback page
//!
//! Student feedback with a status filter, a list, and a details area whose
//! buttons move the selected item to another moderation status.
//!
//! ```text
//! ┌ Status: [All      v]                       12 items ┐
//! │ subject / date / status  │ Subject: ...             │
//! │ ...                      │ Date: ...                │
//! │                          │ [Open] [In progress] ... │
//! └──────────────────────────┴──────────────────────────┘
//! ```

use gtk4::{
    pango::WrapMode::WordChar, prelude::*, Align, Box as GtkBox, Button, DropDown, Frame, Grid,
    Label, ListBox, Orientation, Paned, ScrolledWindow, SelectionMode,
};
use std::{cell::RefCell, rc::Rc};

use crate::core::{
    format::{format_timestamp, truncate_preview},
    Feedback, FeedbackStatus,
};

const PREVIEW_CHARS: usize = 60;

/// Filter choices, index-aligned with the drop-down
fn filter_choices() -> Vec<Option<FeedbackStatus>> {
    std::iter::once(None)
        .chain(FeedbackStatus::KNOWN.iter().cloned().map(Some))
        .collect()
}

fn date_text(feedback: &Feedback) -> String {
    feedback
        .date
        .as_ref()
        .map(format_timestamp)
        .unwrap_or_default()
}

/// The Feedback page
pub struct FeedbackPanel {
    widget: GtkBox,
    filter_dropdown: DropDown,
    count_label: Label,
    list_box: ListBox,
    subject_label: Label,
    date_label: Label,
    status_label: Label,
    question_label: Label,
    user_label: Label,
    body_label: Label,
    status_buttons: Vec<(FeedbackStatus, Button)>,
    /// Displayed items, indexed like the rows
    current_items: RefCell<Vec<Feedback>>,
    /// Item shown in the details area
    current_feedback: Rc<RefCell<Option<Feedback>>>,
}

impl FeedbackPanel {
    fn create_label_row(grid: &Grid, row: i32, header_text: &str) -> Label {
        let header = Label::builder()
            .label(header_text)
            .halign(Align::End)
            .valign(Align::Start)
            .xalign(1.0)
            .build();
        header.add_css_class("field-header");

        let value = Label::builder()
            .halign(Align::Start)
            .xalign(0.0)
            .wrap(true)
            .wrap_mode(WordChar)
            .selectable(true)
            .build();

        grid.attach(&header, 0, row, 1, 1);
        grid.attach(&value, 1, row, 1, 1);
        value
    }

    pub fn new() -> Self {
        let widget = GtkBox::new(Orientation::Vertical, 6);

        // Filter row
        let filter_row = GtkBox::builder()
            .orientation(Orientation::Horizontal)
            .spacing(10)
            .margin_start(10)
            .margin_end(10)
            .margin_top(10)
            .build();
        let labels: Vec<String> = filter_choices()
            .iter()
            .map(|choice| {
                choice
                    .as_ref()
                    .map(|s| s.label().to_string())
                    .unwrap_or_else(|| "All".to_string())
            })
            .collect();
        let label_refs: Vec<&str> = labels.iter().map(String::as_str).collect();
        let filter_dropdown = DropDown::from_strings(&label_refs);
        let count_label = Label::builder().hexpand(true).xalign(1.0).build();
        count_label.add_css_class("dim-label");

        filter_row.append(&Label::new(Some("Status:")));
        filter_row.append(&filter_dropdown);
        filter_row.append(&count_label);
        widget.append(&filter_row);

        // List
        let list_box = ListBox::builder()
            .selection_mode(SelectionMode::Single)
            .build();
        let list_scroll = ScrolledWindow::builder()
            .hexpand(true)
            .vexpand(true)
            .child(&list_box)
            .build();

        // Details
        let details = GtkBox::new(Orientation::Vertical, 10);
        details.set_margin_start(15);
        details.set_margin_end(15);
        details.set_margin_top(15);
        details.set_margin_bottom(15);

        let grid = Grid::builder().row_spacing(10).column_spacing(15).build();
        let subject_label = Self::create_label_row(&grid, 0, "Subject:");
        let date_label = Self::create_label_row(&grid, 1, "Date:");
        let status_label = Self::create_label_row(&grid, 2, "Status:");
        let question_label = Self::create_label_row(&grid, 3, "Question:");
        let user_label = Self::create_label_row(&grid, 4, "User:");
        details.append(&grid);

        let body_label = Label::builder()
            .xalign(0.0)
            .yalign(0.0)
            .wrap(true)
            .wrap_mode(WordChar)
            .selectable(true)
            .vexpand(true)
            .build();
        let body_scroll = ScrolledWindow::builder()
            .vexpand(true)
            .child(&body_label)
            .build();
        details.append(&body_scroll);

        let button_row = GtkBox::new(Orientation::Horizontal, 8);
        let status_buttons: Vec<(FeedbackStatus, Button)> = FeedbackStatus::KNOWN
            .iter()
            .map(|status| {
                let button = Button::builder()
                    .label(status.label())
                    .sensitive(false)
                    .build();
                button_row.append(&button);
                (status.clone(), button)
            })
            .collect();
        details.append(&button_row);

        let details_frame = Frame::builder()
            .label("Selected Feedback")
            .margin_start(10)
            .margin_end(10)
            .margin_top(4)
            .margin_bottom(10)
            .width_request(360)
            .child(&details)
            .build();

        let paned = Paned::builder()
            .orientation(Orientation::Horizontal)
            .start_child(&list_scroll)
            .end_child(&details_frame)
            .resize_start_child(true)
            .resize_end_child(false)
            .shrink_end_child(false)
            .vexpand(true)
            .build();
        widget.append(&paned);

        let panel = Self {
            widget,
            filter_dropdown,
            count_label,
            list_box,
            subject_label,
            date_label,
            status_label,
            question_label,
            user_label,
            body_label,
            status_buttons,
            current_items: RefCell::new(Vec::new()),
            current_feedback: Rc::new(RefCell::new(None)),
        };
        panel.show_feedback(None);
        panel
    }

    /// Replaces the list with `items`
    pub fn update_with_feedback(&self, items: Vec<Feedback>) {
        while let Some(child) = self.list_box.first_child() {
            self.list_box.remove(&child);
        }

        for (index, item) in items.iter().enumerate() {
            self.list_box.append(&Self::create_row(item, index));
        }

        self.count_label.set_label(&match items.len() {
            1 => "1 item".to_string(),
            n => format!("{} items", n),
        });
        *self.current_items.borrow_mut() = items;
    }

    fn create_row(item: &Feedback, index: usize) -> GtkBox {
        let row = GtkBox::builder()
            .orientation(Orientation::Vertical)
            .spacing(2)
            .margin_start(10)
            .margin_end(10)
            .margin_top(5)
            .margin_bottom(5)
            .build();
        row.add_css_class(if index % 2 == 0 { "even-row" } else { "odd-row" });

        let top = GtkBox::new(Orientation::Horizontal, 12);
        let subject = Label::builder()
            .label(if item.subject.is_empty() {
                "(no subject)"
            } else {
                item.subject.as_str()
            })
            .xalign(0.0)
            .hexpand(true)
            .build();
        subject.add_css_class("field-header");
        let date = Label::new(Some(date_text(item).as_str()));
        date.add_css_class("dim-label");
        let status = Label::new(Some(item.status.label()));
        status.add_css_class(&format!("status-{}", item.status.as_str().replace('_', "-")));
        top.append(&subject);
        top.append(&date);
        top.append(&status);

        let preview = Label::builder()
            .label(truncate_preview(&item.body, PREVIEW_CHARS))
            .xalign(0.0)
            .build();

        row.append(&top);
        row.append(&preview);
        row
    }

    /// Shows `feedback` in the details area, or clears it
    pub fn show_feedback(&self, feedback: Option<&Feedback>) {
        *self.current_feedback.borrow_mut() = feedback.cloned();

        for (status, button) in &self.status_buttons {
            button.set_sensitive(feedback.is_some_and(|f| &f.status != status));
        }

        match feedback {
            Some(f) => {
                self.subject_label.set_label(&f.subject);
                self.date_label.set_label(&date_text(f));
                self.status_label.set_label(f.status.label());
                self.question_label
                    .set_label(f.question_id.as_deref().unwrap_or("-"));
                self.user_label.set_label(f.user_id.as_deref().unwrap_or("-"));
                self.body_label.set_label(&f.body);
            }
            None => {
                self.subject_label.set_label("Select feedback");
                for label in [
                    &self.date_label,
                    &self.status_label,
                    &self.question_label,
                    &self.user_label,
                    &self.body_label,
                ] {
                    label.set_label("");
                }
            }
        }
    }

    /// Item displayed at row `index`
    pub fn feedback_at_index(&self, index: usize) -> Option<Feedback> {
        self.current_items.borrow().get(index).cloned()
    }

    /// Id of the item in the details area
    pub fn current_id(&self) -> Option<String> {
        self.current_feedback.borrow().as_ref().map(|f| f.id.clone())
    }

    /// Selects the row for feedback `id`, if displayed
    pub fn select_feedback(&self, id: &str) {
        let position = self.current_items.borrow().iter().position(|f| f.id == id);
        if let Some(row) = position.and_then(|i| self.list_box.row_at_index(i as i32)) {
            self.list_box.select_row(Some(&row));
        }
    }

    /// Connects the status filter drop-down
    pub fn connect_filter<F>(&self, callback: F)
    where
        F: Fn(Option<FeedbackStatus>) + 'static,
    {
        let choices = filter_choices();
        self.filter_dropdown
            .connect_selected_notify(move |dropdown| {
                let choice = choices
                    .get(dropdown.selected() as usize)
                    .cloned()
                    .flatten();
                callback(choice);
            });
    }

    /// Connects the status buttons; the callback gets the item and the
    /// status that was clicked
    pub fn connect_status<F>(&self, callback: F)
    where
        F: Fn(&Feedback, FeedbackStatus) + 'static,
    {
        let callback = Rc::new(callback);
        for (status, button) in &self.status_buttons {
            let callback = callback.clone();
            let status = status.clone();
            let current_feedback = self.current_feedback.clone();
            button.connect_clicked(move |_| {
                let selected = current_feedback.borrow().clone();
                if let Some(feedback) = selected {
                    callback(&feedback, status.clone());
                }
            });
        }
    }

    /// Internal ListBox, for connecting signals
    pub fn list_box(&self) -> &ListBox {
        &self.list_box
    }

    /// Returns the root widget for adding to the stack
    pub fn widget(&self) -> &GtkBox {
        &self.widget
    }
}

impl Default for FeedbackPanel {
    fn default() -> Self {
        Self::new()
    }
}
