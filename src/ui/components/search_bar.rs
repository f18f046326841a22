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

//! Search bar component
//!
//! Filters the question catalog as the user types. Escape clears the query.

use gtk4::{prelude::*, SearchEntry};

/// Search bar for filtering questions
pub struct SearchBar {
    widget: SearchEntry,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchBar {
    /// Creates a new search bar
    ///
    /// Matches question text, explanation, terms and type.
    pub fn new() -> Self {
        let widget = SearchEntry::builder()
            .placeholder_text("Search questions, explanations, terms...")
            .hexpand(true)
            .build();

        // Escape empties the entry, which fires search-changed again
        widget.connect_stop_search(|entry| entry.set_text(""));

        Self { widget }
    }

    /// Returns the root widget for adding to parent container
    pub fn widget(&self) -> &SearchEntry {
        &self.widget
    }

    /// Current query, trimmed
    pub fn text(&self) -> String {
        self.widget.text().trim().to_string()
    }

    /// Calls `f` with the trimmed query whenever it changes
    ///
    /// `search-changed` is already debounced by GTK, so `f` runs at most
    /// once per typing pause.
    pub fn connect_query_changed<F>(&self, f: F)
    where
        F: Fn(&str) + 'static,
    {
        self.widget.connect_search_changed(move |entry| {
            f(entry.text().trim());
        });
    }

    /// Clears the search query and resets the list
    pub fn clear(&self) {
        self.widget.set_text("");
    }
}
