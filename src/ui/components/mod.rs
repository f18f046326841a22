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

//! Reusable UI widgets

mod catalog_list;
mod details_panel;
mod feedback_panel;
mod question_dialog;
mod search_bar;
mod status_banner;
mod type_dialog;

pub use catalog_list::CatalogList;
pub use details_panel::DetailsPanel;
pub use feedback_panel::FeedbackPanel;
pub use question_dialog::QuestionDialog;
pub use search_bar::SearchBar;
pub use status_banner::StatusBanner;
pub use type_dialog::TypeDialog;
