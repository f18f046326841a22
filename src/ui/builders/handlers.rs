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

//! Event handler wiring
//!
//! Connects widget signals to the controller, and pumps controller events
//! back into the views. Edits are only queued here; the views change once
//! the matching completion arrives through [`start_event_pump`].

use gtk4::{gdk, gio, prelude::*, ApplicationWindow, EventControllerKey, Window};
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::core::QuestionParent;
use crate::ui::builders::MainLayout;
use crate::ui::components::{QuestionDialog, TypeDialog};
use crate::ui::controller::ControllerEvent;
use crate::ui::Controller;

/// How often finished requests are drained
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Shows a modal message with a single OK button
pub fn show_alert(window: &impl IsA<Window>, message: &str, detail: &str) {
    let dialog = gtk4::AlertDialog::builder()
        .modal(true)
        .message(message)
        .detail(detail)
        .buttons(vec!["OK"])
        .build();
    dialog.show(Some(window));
}

/// Wires up all event handlers for the main UI
///
/// Sets up:
/// - Row selection in the catalog and feedback lists
/// - Keyboard navigation (Up/Down) that skips header rows
/// - Search, Add, Edit and Delete on the Questions page
/// - Status filter and status buttons on the Feedback page
/// - Dismissing the status banner
pub fn wire_up_handlers(
    window: &ApplicationWindow,
    controller: Rc<Controller>,
    layout: &MainLayout,
) {
    // ============================================================================
    // Catalog row selection
    // ============================================================================
    let details_panel_clone = layout.details_panel.clone();
    let catalog_list_clone = layout.catalog_list.clone();

    layout
        .catalog_list
        .list_box()
        .connect_row_selected(move |_list_box, row| {
            let node = row
                .and_then(|r| usize::try_from(r.index()).ok())
                .and_then(|index| catalog_list_clone.node_at_index(index));

            match node.as_ref().and_then(|n| Some((n.parent()?, n.question()?))) {
                Some((parent, question)) => {
                    debug!(id = ?question.id, %parent, "Question selected");
                    details_panel_clone.update_question(Some((parent, question)));
                }
                None => details_panel_clone.update_question(None),
            }
        });

    // ============================================================================
    // Keyboard navigation
    // ============================================================================
    let key_controller = EventControllerKey::new();
    let catalog_list_for_keys = layout.catalog_list.clone();

    key_controller.connect_key_pressed(move |_controller, key, _code, _modifier| {
        let list_box = catalog_list_for_keys.list_box();
        let current = list_box.selected_row().map(|r| r.index());

        let target = match key {
            gdk::Key::Up => match current {
                Some(index) => catalog_list_for_keys.next_question_index(index - 1, -1),
                None => None,
            },
            gdk::Key::Down => match current {
                Some(index) => catalog_list_for_keys.next_question_index(index + 1, 1),
                None => catalog_list_for_keys.next_question_index(0, 1),
            },
            _ => return glib::Propagation::Proceed,
        };

        if let Some(row) = target.and_then(|i| list_box.row_at_index(i)) {
            list_box.select_row(Some(&row));
            row.grab_focus();
        }
        glib::Propagation::Stop
    });

    layout.catalog_list.list_box().add_controller(key_controller);
    layout.catalog_list.list_box().set_can_focus(true);

    // ============================================================================
    // Search
    // ============================================================================
    let controller_for_search = controller.clone();
    let catalog_list_for_search = layout.catalog_list.clone();

    layout.search_bar.connect_query_changed(move |query| {
        debug!(%query, "Search changed");

        // The controller holds the query so reloads keep the filter
        controller_for_search.set_query(query);
        catalog_list_for_search.refresh();
    });

    // ============================================================================
    // Delete button handler
    // ============================================================================
    let window_for_delete = window.clone();
    let controller_for_delete = controller.clone();

    layout.details_panel.connect_delete(move |question| {
        let Some(id) = question.id.clone() else {
            return;
        };
        info!(%id, "Delete requested");

        let controller_clone = controller_for_delete.clone();
        let window_clone = window_for_delete.clone();

        let dialog = gtk4::AlertDialog::builder()
            .modal(true)
            .message("Delete Question?")
            .detail(format!(
                "Are you sure you want to delete this question?\n\n{}",
                question.text
            ))
            .buttons(vec!["Cancel", "Delete"])
            .cancel_button(0)
            .default_button(0)
            .build();

        let window_for_inner = window_clone.clone();

        dialog.choose(
            Some(&window_clone),
            None::<&gio::Cancellable>,
            move |response| match response {
                Ok(1) => {
                    if let Err(e) = controller_clone.delete_question(&id) {
                        warn!(%id, error = %e, "Delete rejected");
                        show_alert(&window_for_inner, "Delete Failed", &e.to_string());
                    }
                }
                Ok(_) => debug!("Delete cancelled"),
                Err(e) => warn!(error = %e, "Delete dialog failed"),
            },
        );
    });

    // ============================================================================
    // Edit button handler
    // ============================================================================
    let window_for_edit = window.clone();
    let controller_for_edit = controller.clone();

    layout.details_panel.connect_edit(move |_parent, question| {
        let dialog = QuestionDialog::for_edit(&window_for_edit, question);

        let Some((updated, _)) = dialog.show_and_wait() else {
            debug!("Edit cancelled");
            return;
        };

        if let Err(e) = controller_for_edit.update_question(updated) {
            warn!(error = %e, "Update rejected");
            show_alert(&window_for_edit, "Edit Failed", &e.to_string());
        }
    });

    // ============================================================================
    // Add button handler
    // ============================================================================
    let window_for_add = window.clone();
    let controller_for_add = controller.clone();
    let catalog_list_for_add = layout.catalog_list.clone();

    layout.add_button.connect_clicked(move |_| {
        let parents = controller_for_add.parents();
        if parents.is_empty() {
            show_alert(
                &window_for_add,
                "Nothing to add to",
                "No subjects or exams are loaded yet. Refresh and try again.",
            );
            return;
        }

        let Some(kind) = TypeDialog::new(&window_for_add).show_and_wait() else {
            debug!("Add cancelled at type choice");
            return;
        };

        // Default to the section of the selected row
        let preselect: Option<QuestionParent> = catalog_list_for_add
            .list_box()
            .selected_row()
            .and_then(|r| usize::try_from(r.index()).ok())
            .and_then(|index| catalog_list_for_add.node_at_index(index))
            .and_then(|node| node.parent().cloned());

        let dialog =
            QuestionDialog::for_create(&window_for_add, kind, parents, preselect.as_ref());

        let Some((question, Some(parent))) = dialog.show_and_wait() else {
            debug!("Add cancelled");
            return;
        };

        if let Err(e) = controller_for_add.create_question(question, parent) {
            warn!(error = %e, "Create rejected");
            show_alert(&window_for_add, "Add Failed", &e.to_string());
        }
    });

    // ============================================================================
    // Feedback page
    // ============================================================================
    let feedback_panel_for_rows = layout.feedback_panel.clone();
    layout
        .feedback_panel
        .list_box()
        .connect_row_selected(move |_list_box, row| {
            let item = row
                .and_then(|r| usize::try_from(r.index()).ok())
                .and_then(|index| feedback_panel_for_rows.feedback_at_index(index));
            feedback_panel_for_rows.show_feedback(item.as_ref());
        });

    let controller_for_filter = controller.clone();
    let feedback_panel_for_filter = layout.feedback_panel.clone();
    layout.feedback_panel.connect_filter(move |status| {
        debug!(status = ?status, "Feedback filter changed");
        controller_for_filter.set_feedback_filter(status);
        feedback_panel_for_filter.update_with_feedback(controller_for_filter.current_feedback());
        feedback_panel_for_filter.show_feedback(None);
    });

    let window_for_status = window.clone();
    let controller_for_status = controller.clone();
    layout.feedback_panel.connect_status(move |feedback, status| {
        info!(id = %feedback.id, %status, "Status change requested");
        if let Err(e) = controller_for_status.set_feedback_status(&feedback.id, status) {
            show_alert(&window_for_status, "Status Change Failed", &e.to_string());
        }
    });

    // ============================================================================
    // Status banner
    // ============================================================================
    let status_banner_for_dismiss = layout.status_banner.clone();
    layout
        .status_banner
        .connect_dismiss(move || status_banner_for_dismiss.clear_error());
}

/// Starts draining controller events into the views every [`POLL_INTERVAL`]
///
/// Runs for the lifetime of the main loop.
pub fn start_event_pump(
    window: &ApplicationWindow,
    controller: Rc<Controller>,
    layout: &MainLayout,
) -> glib::SourceId {
    let window = window.clone();
    let catalog_list = layout.catalog_list.clone();
    let details_panel = layout.details_panel.clone();
    let feedback_panel = layout.feedback_panel.clone();
    let status_banner = layout.status_banner.clone();
    let search_bar = layout.search_bar.clone();

    glib::timeout_add_local(POLL_INTERVAL, move || {
        for event in controller.poll() {
            match event {
                ControllerEvent::CatalogChanged => {
                    let selected = details_panel.current_id();
                    catalog_list.refresh();
                    if let Some(id) = selected {
                        catalog_list.select_question(&id);
                    }
                    status_banner.clear_error();
                }
                ControllerEvent::FeedbackChanged => {
                    let selected = feedback_panel.current_id();
                    feedback_panel.update_with_feedback(controller.current_feedback());
                    if let Some(id) = selected {
                        feedback_panel.select_feedback(&id);
                    }
                    status_banner.clear_error();
                }
                ControllerEvent::QuestionCreated { id, .. } => {
                    catalog_list.refresh();
                    if let Some(id) = id {
                        // An active filter may hide the new question
                        if !catalog_list.contains_question(&id) && !search_bar.text().is_empty() {
                            search_bar.clear();
                        }
                        catalog_list.select_question(&id);
                    }
                }
                ControllerEvent::QuestionUpdated(id) => {
                    catalog_list.refresh();
                    catalog_list.select_question(&id);
                }
                ControllerEvent::QuestionDeleted(id) => {
                    let selected = details_panel.current_id().filter(|current| *current != id);
                    catalog_list.refresh();
                    match selected {
                        Some(other) => catalog_list.select_question(&other),
                        None => details_panel.update_question(None),
                    }
                }
                ControllerEvent::FeedbackStatusChanged { id, .. } => {
                    feedback_panel.update_with_feedback(controller.current_feedback());
                    feedback_panel.select_feedback(&id);
                }
                ControllerEvent::Failed { action, error } => {
                    let message = format!("{} failed", action.action());
                    status_banner.show_error(&format!("{}: {}", message, error));
                    show_alert(&window, &message, &error.to_string());
                }
            }
        }

        status_banner.set_pending(controller.pending());
        glib::ControlFlow::Continue
    })
}
