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

//! Layout builder
//!
//! Creates the main application layout structure.

use crate::ui::{
    components::{CatalogList, DetailsPanel, FeedbackPanel, SearchBar, StatusBanner},
    Controller,
};
use gtk4::{prelude::*, Box as GtkBox, Button, Orientation, Paned, Stack, StackTransitionType};
use std::rc::Rc;

/// Stack page names
pub const QUESTIONS_PAGE: &str = "questions";
pub const FEEDBACK_PAGE: &str = "feedback";

/// Widgets the handlers need to reach
pub struct MainLayout {
    pub root: GtkBox,
    pub stack: Stack,
    pub status_banner: Rc<StatusBanner>,
    pub search_bar: Rc<SearchBar>,
    pub add_button: Button,
    pub catalog_list: Rc<CatalogList>,
    pub details_panel: Rc<DetailsPanel>,
    pub feedback_panel: Rc<FeedbackPanel>,
}

/// Builds the main application layout
///
/// Creates a vertical box containing:
/// - Status banner at top
/// - Stack with two pages:
///   - Questions: Paned with search bar, add button and catalog list on the
///     left and the details panel (fixed 340px) on the right
///   - Feedback: the feedback panel
pub fn build_main_layout(controller: Rc<Controller>) -> MainLayout {
    let root = GtkBox::new(Orientation::Vertical, 0);

    let status_banner = Rc::new(StatusBanner::new());
    root.append(status_banner.widget());

    let stack = Stack::builder()
        .transition_type(StackTransitionType::Crossfade)
        .vexpand(true)
        .build();

    // === Questions page ===
    let paned = Paned::new(Orientation::Horizontal);

    let left_vbox = GtkBox::new(Orientation::Vertical, 10);
    left_vbox.set_margin_start(10);
    left_vbox.set_margin_end(10);
    left_vbox.set_margin_top(10);
    left_vbox.set_margin_bottom(10);

    let toolbar = GtkBox::new(Orientation::Horizontal, 10);
    let search_bar = Rc::new(SearchBar::new());
    toolbar.append(search_bar.widget());

    let add_button = Button::builder().label("Add Question").build();
    add_button.add_css_class("suggested-action");
    toolbar.append(&add_button);
    left_vbox.append(&toolbar);

    let catalog_list = Rc::new(CatalogList::new(controller));
    left_vbox.append(catalog_list.widget());

    let details_panel = Rc::new(DetailsPanel::new());

    // Right side keeps its width while the window resizes
    paned.set_start_child(Some(&left_vbox));
    paned.set_resize_start_child(true);
    paned.set_shrink_start_child(true);

    paned.set_end_child(Some(details_panel.widget()));
    paned.set_resize_end_child(false);
    paned.set_shrink_end_child(false);

    paned.set_position(740);

    stack.add_titled(&paned, Some(QUESTIONS_PAGE), "Questions");

    // === Feedback page ===
    let feedback_panel = Rc::new(FeedbackPanel::new());
    stack.add_titled(feedback_panel.widget(), Some(FEEDBACK_PAGE), "Feedback");

    root.append(&stack);

    MainLayout {
        root,
        stack,
        status_banner,
        search_bar,
        add_button,
        catalog_list,
        details_panel,
        feedback_panel,
    }
}
