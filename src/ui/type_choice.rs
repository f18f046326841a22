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

//! Selection state of the question type picker
//!
//! The GTK dialog only forwards button clicks here, so what the dialog
//! returns can be tested without a display.

use std::cell::Cell;

use crate::core::QuestionType;

/// Result holder for the type picker
#[derive(Debug, Default)]
pub struct TypeChoice {
    selected: Cell<Option<QuestionType>>,
    closed: Cell<bool>,
}

impl TypeChoice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a type button click and closes the picker
    pub fn select_type(&self, kind: QuestionType) {
        self.selected.set(Some(kind));
        self.closed.set(true);
    }

    /// Closes without a choice (Cancel, Escape or the window close button)
    pub fn cancel(&self) {
        self.selected.set(None);
        self.closed.set(true);
    }

    /// Whether the picker has been closed either way
    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }

    /// The chosen type, `None` while open or after a cancel
    pub fn result(&self) -> Option<QuestionType> {
        if self.closed.get() {
            self.selected.get()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_picker_has_no_result() {
        let choice = TypeChoice::new();
        assert!(!choice.is_closed());
        assert_eq!(choice.result(), None);
    }

    #[test]
    fn test_select_type_records_result() {
        let choice = TypeChoice::new();
        choice.select_type(QuestionType::DragAndDrop);

        assert!(choice.is_closed());
        assert_eq!(choice.result(), Some(QuestionType::DragAndDrop));
    }

    #[test]
    fn test_cancel_clears_result() {
        let choice = TypeChoice::new();
        choice.select_type(QuestionType::Open);
        choice.cancel();

        assert!(choice.is_closed());
        assert_eq!(choice.result(), None);
    }

    #[test]
    fn test_every_type_can_be_selected() {
        for kind in QuestionType::ALL {
            let choice = TypeChoice::new();
            choice.select_type(kind);
            assert_eq!(choice.result(), Some(kind));
        }
    }
}
