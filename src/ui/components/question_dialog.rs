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

//! Question editor dialog
//!
//! A modal form over [`QuestionForm`]. The shared fields (text, explanation,
//! image, context, terms) are always shown; below them comes the block for
//! the question's type. When creating, a drop-down picks the subject or exam
//! section the question goes into.
//!
//! Save does not close the window until the input converts into a valid
//! question; otherwise the problem is shown in an alert and the form stays
//! open for correction.

use gtk4::prelude::*;
use gtk4::{
    AlertDialog, Box as GtkBox, Button, DropDown, Entry, Frame, Grid, Label, Orientation,
    PolicyType, ScrolledWindow, TextView, Window, WrapMode,
};
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, warn};

use crate::core::{Question, QuestionForm, QuestionParent, QuestionType};

#[derive(Clone, Debug, Copy, PartialEq)]
enum DialogResponse {
    Save,
    Cancel,
}

/// Multi-line text field
fn text_area(text: &str, lines: i32) -> TextView {
    let view = TextView::builder()
        .wrap_mode(WrapMode::WordChar)
        .accepts_tab(false)
        .hexpand(true)
        .height_request(lines * 22)
        .top_margin(4)
        .bottom_margin(4)
        .left_margin(4)
        .right_margin(4)
        .build();
    view.buffer().set_text(text);
    view.add_css_class("form-text-area");
    view
}

fn text_of(view: &TextView) -> String {
    let buffer = view.buffer();
    buffer
        .text(&buffer.start_iter(), &buffer.end_iter(), false)
        .to_string()
}

fn entry(text: &str, placeholder: &str) -> Entry {
    Entry::builder()
        .text(text)
        .placeholder_text(placeholder)
        .hexpand(true)
        .build()
}

fn attach_row(grid: &Grid, row: i32, label: &str, widget: &impl IsA<gtk4::Widget>) {
    let header = Label::builder()
        .label(label)
        .halign(gtk4::Align::End)
        .valign(gtk4::Align::Start)
        .margin_top(4)
        .build();
    grid.attach(&header, 0, row, 1, 1);
    grid.attach(widget, 1, row, 1, 1);
}

fn form_grid() -> Grid {
    Grid::builder()
        .row_spacing(10)
        .column_spacing(12)
        .margin_start(12)
        .margin_end(12)
        .margin_top(12)
        .margin_bottom(12)
        .build()
}

/// Type-specific inputs
enum TypeFields {
    MultipleChoice { options: TextView, correct: Entry },
    Open { answer: Entry, unit: Entry },
    ImageSelection { images: TextView, correct_image: Entry },
    DragAndDrop { positions: TextView },
}

impl TypeFields {
    fn build(kind: QuestionType, form: &QuestionForm, grid: &Grid) -> Self {
        match kind {
            QuestionType::MultipleChoice => {
                let options = text_area(&form.options, 4);
                let correct = entry(&form.correct, "Letter (A, B, ...) or the option text");
                attach_row(grid, 0, "Options (one per line):", &options);
                attach_row(grid, 1, "Correct answer:", &correct);
                TypeFields::MultipleChoice { options, correct }
            }
            QuestionType::Open => {
                let answer = entry(&form.answer, "e.g. 50");
                let unit = entry(&form.unit, "Optional, e.g. km/u");
                attach_row(grid, 0, "Answer:", &answer);
                attach_row(grid, 1, "Unit:", &unit);
                TypeFields::Open { answer, unit }
            }
            QuestionType::ImageSelection => {
                let images = text_area(&form.image_options, 4);
                let correct_image = entry(&form.correct_image, "Image number, starting at 1");
                attach_row(grid, 0, "Image URLs (one per line):", &images);
                attach_row(grid, 1, "Correct image:", &correct_image);
                TypeFields::ImageSelection {
                    images,
                    correct_image,
                }
            }
            QuestionType::DragAndDrop => {
                let positions = text_area(&form.correct_positions, 4);
                attach_row(grid, 0, "Correct positions (x,y per line):", &positions);
                TypeFields::DragAndDrop { positions }
            }
        }
    }

    fn read_into(&self, form: &mut QuestionForm) {
        match self {
            TypeFields::MultipleChoice { options, correct } => {
                form.options = text_of(options);
                form.correct = correct.text().to_string();
            }
            TypeFields::Open { answer, unit } => {
                form.answer = answer.text().to_string();
                form.unit = unit.text().to_string();
            }
            TypeFields::ImageSelection {
                images,
                correct_image,
            } => {
                form.image_options = text_of(images);
                form.correct_image = correct_image.text().to_string();
            }
            TypeFields::DragAndDrop { positions } => {
                form.correct_positions = text_of(positions);
            }
        }
    }
}

/// Modal editor for a single question
pub struct QuestionDialog {
    dialog_window: Window,
    kind: QuestionType,
    /// Question being edited; `None` when creating
    base: Option<Question>,
    /// Parent choices when creating
    parents: Vec<QuestionParent>,
    parent_dropdown: Option<DropDown>,
    text_view: TextView,
    explanation_view: TextView,
    image_entry: Entry,
    context_entry: Entry,
    terms_entry: Entry,
    type_fields: TypeFields,
    response: Rc<Cell<Option<DialogResponse>>>,
}

impl QuestionDialog {
    /// Editor for a new question of `kind`
    ///
    /// `preselect` is chosen in the section drop-down when present.
    pub fn for_create(
        parent: &impl IsA<Window>,
        kind: QuestionType,
        parents: Vec<QuestionParent>,
        preselect: Option<&QuestionParent>,
    ) -> Self {
        let title = format!("New {} Question", kind.label());
        Self::build(parent, &title, kind, None, parents, preselect)
    }

    /// Editor pre-filled with `question`
    pub fn for_edit(parent: &impl IsA<Window>, question: &Question) -> Self {
        let title = format!("Edit {} Question", question.kind.label());
        Self::build(
            parent,
            &title,
            question.kind,
            Some(question.clone()),
            Vec::new(),
            None,
        )
    }

    fn build(
        parent: &impl IsA<Window>,
        title: &str,
        kind: QuestionType,
        base: Option<Question>,
        parents: Vec<QuestionParent>,
        preselect: Option<&QuestionParent>,
    ) -> Self {
        let dialog_window = Window::builder()
            .title(title)
            .modal(true)
            .transient_for(parent)
            .default_width(620)
            .default_height(640)
            .build();

        let form = base
            .as_ref()
            .map(QuestionForm::from_question)
            .unwrap_or_default();

        let content = GtkBox::new(Orientation::Vertical, 12);
        content.set_margin_start(20);
        content.set_margin_end(20);
        content.set_margin_top(20);
        content.set_margin_bottom(10);

        // Section picker (create only)
        let parent_dropdown = if base.is_none() {
            let labels: Vec<String> = parents.iter().map(ToString::to_string).collect();
            let label_refs: Vec<&str> = labels.iter().map(String::as_str).collect();
            let dropdown = DropDown::from_strings(&label_refs);
            dropdown.set_hexpand(true);
            if let Some(index) = preselect.and_then(|p| parents.iter().position(|c| c == p)) {
                dropdown.set_selected(index as u32);
            }

            let grid = form_grid();
            attach_row(&grid, 0, "Section:", &dropdown);
            content.append(&grid);
            Some(dropdown)
        } else {
            None
        };

        // Shared fields
        let shared = form_grid();
        let text_view = text_area(&form.text, 3);
        let explanation_view = text_area(&form.explanation, 3);
        let image_entry = entry(&form.image, "Optional image URL");
        let context_entry = entry(&form.context, "Optional context");
        let terms_entry = entry(&form.terms, "Comma separated");
        attach_row(&shared, 0, "Question:", &text_view);
        attach_row(&shared, 1, "Explanation:", &explanation_view);
        attach_row(&shared, 2, "Image:", &image_entry);
        attach_row(&shared, 3, "Context:", &context_entry);
        attach_row(&shared, 4, "Terms:", &terms_entry);
        content.append(&shared);

        // Type-specific block
        let type_grid = form_grid();
        let type_fields = TypeFields::build(kind, &form, &type_grid);
        let type_frame = Frame::builder()
            .label(kind.label())
            .child(&type_grid)
            .build();
        content.append(&type_frame);

        let scrolled = ScrolledWindow::builder()
            .hscrollbar_policy(PolicyType::Never)
            .vexpand(true)
            .child(&content)
            .build();

        let button_box = GtkBox::builder()
            .orientation(Orientation::Horizontal)
            .spacing(12)
            .halign(gtk4::Align::End)
            .margin_start(20)
            .margin_end(20)
            .margin_top(10)
            .margin_bottom(20)
            .build();

        let cancel_button = Button::builder().label("Cancel").build();
        let save_button = Button::builder().label("Save").build();
        save_button.add_css_class("suggested-action");
        button_box.append(&cancel_button);
        button_box.append(&save_button);

        let main_box = GtkBox::new(Orientation::Vertical, 0);
        main_box.append(&scrolled);
        main_box.append(&button_box);
        dialog_window.set_child(Some(&main_box));

        let response: Rc<Cell<Option<DialogResponse>>> = Rc::new(Cell::new(None));

        {
            let response = response.clone();
            cancel_button.connect_clicked(move |_| response.set(Some(DialogResponse::Cancel)));
        }
        {
            let response = response.clone();
            save_button.connect_clicked(move |_| response.set(Some(DialogResponse::Save)));
        }
        // Window X counts as Cancel
        {
            let response = response.clone();
            dialog_window.connect_close_request(move |_| {
                if response.get().is_none() {
                    response.set(Some(DialogResponse::Cancel));
                }
                glib::Propagation::Proceed
            });
        }

        Self {
            dialog_window,
            kind,
            base,
            parents,
            parent_dropdown,
            text_view,
            explanation_view,
            image_entry,
            context_entry,
            terms_entry,
            type_fields,
            response,
        }
    }

    fn read_form(&self) -> QuestionForm {
        let mut form = QuestionForm {
            text: text_of(&self.text_view),
            explanation: text_of(&self.explanation_view),
            image: self.image_entry.text().to_string(),
            context: self.context_entry.text().to_string(),
            terms: self.terms_entry.text().to_string(),
            ..QuestionForm::default()
        };
        self.type_fields.read_into(&mut form);
        form
    }

    fn selected_parent(&self) -> Option<QuestionParent> {
        let dropdown = self.parent_dropdown.as_ref()?;
        self.parents.get(dropdown.selected() as usize).cloned()
    }

    /// Converts the current input, or explains why it cannot
    fn parse(&self) -> Result<(Question, Option<QuestionParent>), String> {
        let question = self
            .read_form()
            .to_question(self.kind, self.base.as_ref())
            .map_err(|e| e.to_string())?;

        if self.parent_dropdown.is_some() {
            let parent = self
                .selected_parent()
                .ok_or_else(|| "Choose a subject or exam section".to_string())?;
            return Ok((question, Some(parent)));
        }

        Ok((question, None))
    }

    /// Presents the editor and waits until it is saved with valid input or
    /// cancelled
    ///
    /// Returns the question and, when creating, the chosen section.
    pub fn show_and_wait(self) -> Option<(Question, Option<QuestionParent>)> {
        self.dialog_window.present();
        let main_context = glib::MainContext::default();

        loop {
            self.response.set(None);
            while self.response.get().is_none() && self.dialog_window.is_visible() {
                main_context.iteration(true);
            }

            match self.response.get() {
                Some(DialogResponse::Save) => match self.parse() {
                    Ok(result) => {
                        self.dialog_window.close();
                        return Some(result);
                    }
                    Err(message) => {
                        warn!(%message, "Question form rejected");
                        self.show_error(&message);
                    }
                },
                Some(DialogResponse::Cancel) | None => {
                    debug!("Question editor cancelled");
                    self.dialog_window.close();
                    return None;
                }
            }
        }
    }

    fn show_error(&self, message: &str) {
        let alert = AlertDialog::builder()
            .modal(true)
            .message("Invalid question")
            .detail(message)
            .build();
        alert.show(Some(&self.dialog_window));
    }
}
