//! Human-readable rendering of activity log entries.

use api_client::ActivityLogEntry;

/// Title and optional detail line for one activity entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedActivity {
    pub title: String,
    pub detail: Option<String>,
}

fn data_str<'a>(entry: &'a ActivityLogEntry, field: &str) -> Option<&'a str> {
    entry.data.get(field).and_then(|v| v.as_str())
}

/// Render an entry according to its event-kind tag.
///
/// The set of known tags is closed; anything else keeps the raw tag as the
/// title so new server-side events degrade readably instead of breaking the
/// feed. Missing payload fields drop the detail line, never the entry.
pub fn format_activity(entry: &ActivityLogEntry) -> FormattedActivity {
    match entry.name.as_str() {
        "created_session" => FormattedActivity {
            title: "Zalogowano do konta".to_string(),
            detail: data_str(entry, "ip").map(|ip| format!("Z adresu {ip}")),
        },
        "ip_changed" => FormattedActivity {
            title: "Zmieniono adres IP".to_string(),
            detail: match (data_str(entry, "oldIp"), data_str(entry, "newIp")) {
                (Some(old), Some(new)) => Some(format!("Z {old} na {new}")),
                _ => None,
            },
        },
        "user_agent_changed" => FormattedActivity {
            title: "Zmieniono przeglądarkę".to_string(),
            detail: data_str(entry, "newUserAgent").map(|ua| format!("Na {ua}")),
        },
        other => FormattedActivity {
            title: other.to_string(),
            detail: None,
        },
    }
}
