//! Core modules for Tally.
//!
//! The day-to-day freelance workflow: dashboard, clients, projects,
//! timesheet, invoices and reports. None of these can be switched off.

use tally_sdk::prelude::*;

/// Descriptors for every core module, in registration order.
pub fn descriptors() -> Vec<ModuleDescriptor> {
    vec![
        dashboard(),
        clients(),
        projects(),
        timesheet(),
        invoices(),
        reports(),
    ]
}

pub fn dashboard() -> ModuleDescriptor {
    ModuleDescriptor::new(ModuleId::DASHBOARD)
        .nav(NavItem::new(
            "dashboard",
            "nav.dashboard",
            IconRef::new("DashboardOutlined"),
        ))
        .route(RouteRecord::page(
            "/dashboard",
            ViewRef::eager("Dashboard"),
            ModuleId::DASHBOARD,
        ))
}

pub fn clients() -> ModuleDescriptor {
    ModuleDescriptor::new(ModuleId::CLIENTS)
        .nav(NavItem::new(
            "clients",
            "nav.clients",
            IconRef::new("UserOutlined"),
        ))
        .route(RouteRecord::page(
            "/clients",
            ViewRef::lazy("Clients"),
            ModuleId::CLIENTS,
        ))
}

pub fn projects() -> ModuleDescriptor {
    ModuleDescriptor::new(ModuleId::PROJECTS)
        .nav(NavItem::new(
            "projects",
            "nav.projects",
            IconRef::new("ProjectOutlined"),
        ))
        .route(RouteRecord::page(
            "/projects",
            ViewRef::lazy("Projects"),
            ModuleId::PROJECTS,
        ))
        .route(RouteRecord::page(
            "/projects/:id",
            ViewRef::lazy("ProjectDetail"),
            ModuleId::PROJECTS,
        ))
}

pub fn timesheet() -> ModuleDescriptor {
    ModuleDescriptor::new(ModuleId::TIMESHEET)
        .nav(NavItem::new(
            "timesheet",
            "nav.timesheet",
            IconRef::new("ClockCircleOutlined"),
        ))
        .route(RouteRecord::page(
            "/timesheet",
            ViewRef::lazy("Timesheet"),
            ModuleId::TIMESHEET,
        ))
}

pub fn invoices() -> ModuleDescriptor {
    ModuleDescriptor::new(ModuleId::INVOICES)
        .nav(NavItem::new(
            "invoices",
            "nav.invoices",
            IconRef::new("FileTextOutlined"),
        ))
        .route(RouteRecord::page(
            "/invoices",
            ViewRef::lazy("Invoices"),
            ModuleId::INVOICES,
        ))
}

pub fn reports() -> ModuleDescriptor {
    ModuleDescriptor::new(ModuleId::REPORTS)
        .nav(NavItem::new(
            "reports",
            "nav.reports",
            IconRef::new("BarChartOutlined"),
        ))
        .route(RouteRecord::page(
            "/reports",
            ViewRef::lazy("Reports"),
            ModuleId::REPORTS,
        ))
}
