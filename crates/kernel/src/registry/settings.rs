//! The settings module.
//!
//! Settings is not declared by a module crate: the composer builds it from
//! the four built-in pages plus every page other modules contribute, so that
//! all settings render inside one shared `/settings` layout.

use tally_sdk::prelude::*;

/// Path of the shared settings layout route.
pub const SETTINGS_PATH: &str = "/settings";

/// Built-in settings pages: (key, order, label key, view id).
const BUILT_IN_PAGES: [(&str, i32, &str, &str); 4] = [
    ("general", 10, "settings.general.title", "settings/GeneralSettings"),
    ("profile", 20, "settings.profile.title", "settings/ProfileSettings"),
    ("invoice", 30, "settings.invoice.title", "settings/InvoiceSettings"),
    ("email", 40, "settings.email.title", "settings/EmailSettings"),
];

/// The built-in settings pages in their fixed order.
pub fn built_in_pages() -> Vec<SettingsPage> {
    BUILT_IN_PAGES
        .iter()
        .map(|&(key, order, label_key, view)| {
            SettingsPage::new(key, label_key, ViewRef::lazy(view), order, ModuleId::SETTINGS)
        })
        .collect()
}

/// Build the settings descriptor and the full ordered page list.
///
/// `contributed` must be in registration order; the sort is stable so pages
/// with equal `order` keep that order.
pub(crate) fn compose_settings(mut contributed: Vec<SettingsPage>) -> (ModuleDescriptor, Vec<SettingsPage>) {
    contributed.sort_by_key(|p| p.order);

    let mut pages = built_in_pages();
    pages.extend(contributed);

    let mut nav = NavItem::new("settings", "nav.settings", IconRef::new("SettingOutlined"));
    let mut layout = RouteRecord::page(
        SETTINGS_PATH,
        ViewRef::lazy("settings/SettingsLayout"),
        ModuleId::SETTINGS,
    )
    .child(RouteRecord::redirect("", format!("{SETTINGS_PATH}/general")));

    for page in &pages {
        nav = nav.child(
            NavChild::new(format!("settings/{}", page.key), page.label_key.clone())
                .module(page.module_id.clone()),
        );

        let mut child = RouteRecord::new(page.key.clone()).view(page.view.clone());
        if page.module_id != ModuleId::SETTINGS {
            child = child.module(page.module_id.clone());
        }
        layout = layout.child(child);
    }

    let module = ModuleDescriptor::new(ModuleId::SETTINGS)
        .nav(nav)
        .route(layout);

    (module, pages)
}
