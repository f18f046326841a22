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

//! Header bar builder
//!
//! Creates the application header bar with page switcher and menu

use gtk4::{gio::Menu, prelude::*, Button, HeaderBar, MenuButton, Stack, StackSwitcher};

/// Builds the application header bar
///
/// - Title: switcher for the pages in `stack` ("Questions" / "Feedback")
/// - Left: refresh button (app.refresh action)
/// - Right: menu with Export... (app.export) and Quit (app.quit)
pub fn build_header_bar(stack: &Stack) -> HeaderBar {
    let header_bar = HeaderBar::new();

    let switcher = StackSwitcher::builder().stack(stack).build();
    header_bar.set_title_widget(Some(&switcher));

    // Menu options
    let menu = Menu::new();
    menu.append(Some("Export..."), Some("app.export"));
    menu.append(Some("Quit"), Some("app.quit"));

    let menu_button = MenuButton::new();
    menu_button.set_icon_name("open-menu-symbolic");
    menu_button.set_menu_model(Some(&menu));

    let refresh_button = Button::builder()
        .icon_name("view-refresh-symbolic")
        .action_name("app.refresh")
        .tooltip_text("Reload subjects, exams and feedback")
        .build();

    header_bar.pack_start(&refresh_button);
    header_bar.pack_end(&menu_button);

    header_bar
}
