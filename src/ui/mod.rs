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

//! User interface with MVC architecture
//!
//! # Architecture
//!
//! - **Model**: `Catalog` and the feedback list (in `core`)
//! - **Controller**: owns the model and the request worker, turns finished
//!   requests into [`ControllerEvent`]s (in `controller.rs`)
//! - **View**: GTK4 components (in `components/`), behind the `gui` feature
//!
//! The controller and the type picker state do not touch GTK, so they build
//! and test without a display.
//!
//! # Module Structure
//!
//! ```text
//! ui/
//! ├── mod.rs          // This file - exports
//! ├── app.rs          // GTK4 Application setup
//! ├── controller.rs   // MVC Controller
//! ├── type_choice.rs  // Type picker result state
//! ├── actions.rs      // GTK actions (quit, refresh, export)
//! ├── builders/       // Header, layout, handler wiring
//! └── components/     // Reusable widgets and dialogs
//! ```

#[cfg(feature = "gui")]
mod actions;
#[cfg(feature = "gui")]
pub mod app;
#[cfg(feature = "gui")]
mod builders;
#[cfg(feature = "gui")]
pub mod components;
pub mod controller;
pub mod type_choice;

#[cfg(feature = "gui")]
pub use app::App;
pub use controller::{Controller, ControllerError, ControllerEvent};
pub use type_choice::TypeChoice;

#[cfg(test)]
mod tests;
