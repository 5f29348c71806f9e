//! Text rendering for command output.

use biogate_core::{DeviceId, UserId};
use biogate_service::{ClearedData, StatisticsSummary};
use biogate_storage::{DeviceRecord, LogEntry, LogFilter, Page, UserRecord};
use std::fmt::Write;

/// Users shown before the detail list is truncated.
const DETAIL_LIMIT: usize = 5;

pub fn users(users: &[(&UserId, &UserRecord)]) -> String {
    if users.is_empty() {
        return "No users enrolled yet. Use `biogate enroll` to add one.".to_string();
    }

    let mut out = String::from("=== ENROLLED USERS ===\n");
    for (id, user) in users {
        let _ = writeln!(out, "{id}: {} - {}", user.name, user.modality);
    }
    out
}

pub fn search_results(term: &str, users: &[(&UserId, &UserRecord)]) -> String {
    if users.is_empty() {
        return format!("No users found matching '{}'", term.trim());
    }

    let mut out = format!("Found {} user(s) matching '{}':\n", users.len(), term.trim());
    for (id, user) in users {
        let _ = writeln!(
            out,
            "{id}: {} - {} (enrolled {}, {} attempts)",
            user.name,
            user.modality,
            user.enrollment_date.format("%Y-%m-%d"),
            user.access_attempts
        );
    }
    out
}

pub fn devices(devices: &[(&DeviceId, &DeviceRecord)]) -> String {
    if devices.is_empty() {
        return "No devices available. Enroll a user to create devices.".to_string();
    }

    let mut out = String::from("=== IOT DEVICES ===\n");
    for (id, device) in devices {
        let _ = writeln!(out, "{id}: {} - Status: {}", device.name, device.status);
    }
    out
}

pub fn logs(page: &Page<&LogEntry>, filter: &LogFilter) -> String {
    let mut out = String::from("=== SECURITY LOGS ===\n");
    if page.total_items == 0 {
        out.push_str("No matching log entries.\n");
        return out;
    }

    let _ = writeln!(
        out,
        "Page {} of {} (Total: {} logs)",
        page.page, page.total_pages, page.total_items
    );

    let mut filters = Vec::new();
    if let Some(user) = &filter.user {
        filters.push(format!("User: {user}"));
    }
    if let Some(device) = &filter.device {
        filters.push(format!("Device: {device}"));
    }
    if let Some(result) = filter.result {
        filters.push(format!("Result: {result}"));
    }
    if !filters.is_empty() {
        let _ = writeln!(out, "Filters: {}", filters.join(", "));
    }

    for entry in &page.items {
        let _ = writeln!(
            out,
            "[{}] User: {}, Device: {}, Result: {} - {}",
            entry.formatted_time(),
            entry.user,
            entry.device,
            entry.result,
            entry.notes
        );
    }

    if page.page < page.total_pages {
        let _ = writeln!(out, "Next page: --page {}", page.page + 1);
    }
    out
}

pub fn statistics(
    summary: &StatisticsSummary,
    users: &[(&UserId, &UserRecord)],
    devices: &[(&DeviceId, &DeviceRecord)],
) -> String {
    let mut out = String::from("=== SYSTEM STATISTICS ===\n");

    let _ = writeln!(out, "\nUsers: {}", summary.users);
    for (modality, count) in &summary.users_by_modality {
        let _ = writeln!(out, "   {modality}: {count}");
    }
    for (id, user) in users.iter().take(DETAIL_LIMIT) {
        let _ = writeln!(out, "   {id}: {} ({})", user.name, user.modality);
    }
    if users.len() > DETAIL_LIMIT {
        let _ = writeln!(out, "   ... and {} more users", users.len() - DETAIL_LIMIT);
    }

    let _ = writeln!(
        out,
        "\nDevices: {} total, {} active",
        summary.devices, summary.active_devices
    );
    for (id, device) in devices.iter().take(DETAIL_LIMIT) {
        let _ = writeln!(out, "   {id}: {} ({})", device.name, device.status);
    }
    if devices.len() > DETAIL_LIMIT {
        let _ = writeln!(out, "   ... and {} more devices", devices.len() - DETAIL_LIMIT);
    }

    let _ = writeln!(
        out,
        "\nAuthentications: {} total",
        summary.total_authentications()
    );
    if let Some(rate) = summary.success_percentage() {
        let _ = writeln!(
            out,
            "   Successful: {} ({rate:.1}%)",
            summary.successful_authentications
        );
        let _ = writeln!(
            out,
            "   Failed: {} ({:.1}%)",
            summary.failed_authentications,
            100.0 - rate
        );
    }
    let _ = writeln!(
        out,
        "   Malformed requests: {}",
        summary.malformed_authentications
    );

    let _ = writeln!(out, "\nAttacks: {} total", summary.total_attacks());
    if let Some(rate) = summary.block_percentage() {
        let _ = writeln!(out, "   Blocked: {} ({rate:.1}%)", summary.attacks_blocked);
        let _ = writeln!(
            out,
            "   Succeeded: {} ({:.1}%)",
            summary.attacks_succeeded,
            100.0 - rate
        );
    }

    let _ = writeln!(out, "\nEnrollments: {} total", summary.enrollments);
    let _ = writeln!(out, "Logs: {} total entries", summary.log_entries);

    let settings = &summary.settings;
    let _ = writeln!(out, "\nCurrent Settings:");
    let _ = writeln!(
        out,
        "   Authentication Success Rate: {:.0}%",
        settings.auth_success_rate * 100.0
    );
    let _ = writeln!(
        out,
        "   Attack Detection Rate: {:.0}%",
        settings.attack_detection_rate * 100.0
    );
    let _ = writeln!(
        out,
        "   Biometric Match Threshold: {:.0}%",
        settings.biometric_threshold * 100.0
    );
    out
}

pub fn cleared(cleared: &ClearedData) -> String {
    format!(
        "All data cleared: {} users, {} devices, {} log entries removed.",
        cleared.users, cleared.devices, cleared.log_entries
    )
}
