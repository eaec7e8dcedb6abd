//! Finance module for Tally.
//!
//! Bank accounts, transactions, statement import, categories and cash-flow
//! reports. This is the one module users may switch off, so every route it
//! declares carries the `finance` module id.

use tally_sdk::prelude::*;

/// Sections rendered inside the finance layout: (route segment, view id, label key).
const SECTIONS: &[(&str, &str, &str)] = &[
    ("overview", "finance/Overview", "finance.nav.overview"),
    ("accounts", "finance/Accounts", "finance.nav.accounts"),
    ("transactions", "finance/Transactions", "finance.nav.transactions"),
    ("import", "finance/Import", "finance.nav.import"),
    ("categories", "finance/Categories", "finance.nav.categories"),
    ("reports", "finance/Reports", "finance.nav.reports"),
];

pub fn descriptor() -> ModuleDescriptor {
    let mut nav = NavItem::new("finance", "nav.finance", IconRef::new("Wallet"));
    let mut layout = RouteRecord::page(
        "/finance",
        ViewRef::eager("finance/FinanceLayout"),
        ModuleId::FINANCE,
    )
    .child(RouteRecord::redirect("", "/finance/overview"));

    for &(segment, view, label_key) in SECTIONS {
        nav = nav.child(NavChild::new(format!("finance/{segment}"), label_key).module(ModuleId::FINANCE));
        layout = layout.child(RouteRecord::new(segment).view(ViewRef::eager(view)));
    }

    ModuleDescriptor::new(ModuleId::FINANCE)
        .toggleable(true)
        .enabled_by_default(true)
        .nav(nav)
        .route(layout)
        .settings_page(SettingsPage::new(
            "finance",
            "settings.finance.title",
            ViewRef::eager("settings/FinanceSettings"),
            50,
            ModuleId::FINANCE,
        ))
        .messages("en-US", english())
        .messages("zh-CN", chinese())
}

fn english() -> MessageDict {
    MessageDict::new()
        .with("nav.finance", "Finance")
        .with("finance.nav.overview", "Overview")
        .with("finance.nav.accounts", "Accounts")
        .with("finance.nav.transactions", "Transactions")
        .with("finance.nav.import", "Import")
        .with("finance.nav.categories", "Categories")
        .with("finance.nav.reports", "Reports")
        .with("finance.import.done", "Imported {{count}} transactions into {{ account }}")
        .with("finance.accounts.balance", "Balance: {{- amount}}")
        .with("settings.finance.title", "Finance")
}

fn chinese() -> MessageDict {
    MessageDict::new()
        .with("nav.finance", "财务")
        .with("finance.nav.overview", "概览")
        .with("finance.nav.accounts", "账户")
        .with("finance.nav.transactions", "交易")
        .with("finance.nav.import", "导入")
        .with("finance.nav.categories", "分类")
        .with("finance.nav.reports", "报表")
        .with("finance.import.done", "已导入 {{count}} 笔交易到 {{ account }}")
        .with("finance.accounts.balance", "余额：{{- amount}}")
        .with("settings.finance.title", "财务")
}
