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

//! Catalog list component
//!
//! Displays the flattened subjects/exams tree in a scrollable list. Group
//! and section rows are headers and cannot be selected; question rows show
//! their title, type and a preview of the question text.

use gtk4::{
    prelude::*, Box as GtkBox, Label, ListBox, ListBoxRow, Orientation, ScrolledWindow,
    SelectionMode,
};
use std::{cell::RefCell, rc::Rc};

use crate::core::{format::summarize, format::truncate_preview, CatalogNode};
use crate::ui::Controller;

const PREVIEW_CHARS: usize = 70;

/// Scrollable list of catalog rows
pub struct CatalogList {
    /// Root widget (scrollable container)
    widget: ScrolledWindow,
    /// List box containing rows
    list_box: ListBox,
    /// Controller reference for data access
    controller: Rc<Controller>,
    /// Cache of currently displayed nodes, indexed like the rows
    current_nodes: RefCell<Vec<CatalogNode>>,
}

impl CatalogList {
    /// Creates an empty catalog list
    ///
    /// # Example
    /// ```no_run
    /// use theorio_admin::api::ApiClient;
    /// use theorio_admin::ui::components::CatalogList;
    /// use theorio_admin::ui::Controller;
    /// use std::rc::Rc;
    /// use std::time::Duration;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = ApiClient::new("http://127.0.0.1:5001", "key", Duration::from_secs(30))?;
    /// let controller = Rc::new(Controller::new(client)?);
    /// let list = CatalogList::new(controller);
    /// list.refresh();
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(controller: Rc<Controller>) -> Self {
        let scrolled_window = ScrolledWindow::builder()
            .hexpand(true)
            .vexpand(true)
            .build();

        let list_box = ListBox::builder()
            .selection_mode(SelectionMode::Single)
            .build();
        list_box.add_css_class("catalog-list");

        scrolled_window.set_child(Some(&list_box));

        Self {
            widget: scrolled_window,
            list_box,
            controller,
            current_nodes: RefCell::new(Vec::new()),
        }
    }

    /// Rebuilds the list from the controller's filtered catalog
    pub fn refresh(&self) {
        let nodes = self.controller.current_nodes();
        self.update_with_nodes(nodes);
    }

    /// Replaces all rows with `nodes`
    pub fn update_with_nodes(&self, nodes: Vec<CatalogNode>) {
        while let Some(child) = self.list_box.first_child() {
            self.list_box.remove(&child);
        }

        let mut question_rows = 0;
        for node in &nodes {
            let row = match node {
                CatalogNode::Group { .. } => Self::create_header_row(node, "group-header"),
                CatalogNode::Section { .. } => Self::create_header_row(node, "section-header"),
                CatalogNode::Question { .. } => {
                    question_rows += 1;
                    Self::create_question_row(node, question_rows)
                }
            };
            self.list_box.append(&row);
        }

        *self.current_nodes.borrow_mut() = nodes;
    }

    fn create_header_row(node: &CatalogNode, css_class: &str) -> ListBoxRow {
        let label = Label::builder()
            .label(node.label())
            .xalign(0.0)
            .margin_start(10 + 12 * i32::from(node.depth()))
            .margin_top(6)
            .margin_bottom(4)
            .build();
        label.add_css_class(css_class);

        ListBoxRow::builder()
            .child(&label)
            .selectable(false)
            .activatable(false)
            .build()
    }

    fn create_question_row(node: &CatalogNode, ordinal: usize) -> ListBoxRow {
        let row = GtkBox::builder()
            .orientation(Orientation::Horizontal)
            .spacing(16)
            .margin_start(34)
            .margin_end(10)
            .margin_top(4)
            .margin_bottom(4)
            .build();

        if ordinal % 2 == 0 {
            row.add_css_class("even-row");
        } else {
            row.add_css_class("odd-row");
        }

        if let CatalogNode::Question {
            index, question, ..
        } = node
        {
            let summary = summarize(*index, question);

            let title_label = Label::builder()
                .label(summary.title.as_str())
                .width_chars(12)
                .xalign(0.0)
                .build();

            let kind_label = Label::builder()
                .label(summary.kind_label())
                .width_chars(16)
                .xalign(0.0)
                .build();
            kind_label.add_css_class("dim-label");

            let text_label = Label::builder()
                .label(truncate_preview(&summary.text, PREVIEW_CHARS))
                .xalign(0.0)
                .hexpand(true)
                .build();
            if summary.text.chars().count() > PREVIEW_CHARS {
                text_label.set_tooltip_text(Some(&summary.text));
            }

            row.append(&title_label);
            row.append(&kind_label);
            row.append(&text_label);
        }

        ListBoxRow::builder().child(&row).build()
    }

    /// Returns the root widget for adding to parent container
    pub fn widget(&self) -> &ScrolledWindow {
        &self.widget
    }

    /// Node displayed at row `index`, accounting for the active filter
    pub fn node_at_index(&self, index: usize) -> Option<CatalogNode> {
        self.current_nodes.borrow().get(index).cloned()
    }

    /// Index of the first selectable row at or after `start`, moving by `step`
    ///
    /// Used for keyboard navigation so the cursor skips header rows.
    pub fn next_question_index(&self, start: i32, step: i32) -> Option<i32> {
        let nodes = self.current_nodes.borrow();
        let mut index = start;
        while index >= 0 && (index as usize) < nodes.len() {
            if nodes[index as usize].question().is_some() {
                return Some(index);
            }
            index += step;
        }
        None
    }

    /// Selects the row showing question `id`, if displayed
    pub fn select_question(&self, id: &str) {
        if let Some(row) = self
            .question_position(id)
            .and_then(|i| self.list_box.row_at_index(i as i32))
        {
            self.list_box.select_row(Some(&row));
            row.grab_focus();
        }
    }

    /// Whether the question is shown under the current filter
    pub fn contains_question(&self, id: &str) -> bool {
        self.question_position(id).is_some()
    }

    fn question_position(&self, id: &str) -> Option<usize> {
        self.current_nodes
            .borrow()
            .iter()
            .position(|node| node.question().and_then(|q| q.id.as_deref()) == Some(id))
    }

    /// Id of the selected question, if any
    pub fn selected_question_id(&self) -> Option<String> {
        let row = self.list_box.selected_row()?;
        let index = usize::try_from(row.index()).ok()?;
        self.node_at_index(index)?.question()?.id.clone()
    }

    /// Internal ListBox, for connecting signals
    pub fn list_box(&self) -> &ListBox {
        &self.list_box
    }

    /// Count of displayed rows, headers included
    pub fn count(&self) -> usize {
        self.current_nodes.borrow().len()
    }
}
