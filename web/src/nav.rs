//! Sidebar menu configuration and active-link matching.
//!
//! Pure data and functions, compiled for both the server and the WASM
//! client so the highlighted entry is identical before and after
//! hydration.

/// Heading shown at the top of the sidebar.
pub const TITLE: &str = "Third Eye";
pub const SUBTITLE: &str = "Admin Console";

/// One sidebar link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    /// Path prefix the entry links to and matches against.
    pub href: &'static str,
    pub label: &'static str,
}

/// Sidebar entries in display order.
pub const MENU: &[MenuEntry] = &[
    MenuEntry { href: "/dashboard", label: "Dashboard" },
    MenuEntry { href: "/environments", label: "Environments" },
    MenuEntry { href: "/cameras", label: "Cameras" },
    MenuEntry { href: "/users", label: "Users & Admins" },
    MenuEntry { href: "/settings", label: "Settings" },
];

const LINK_BASE: &str = "block rounded-md px-3 py-2 text-sm";
const LINK_ACTIVE: &str = "bg-gray-100 font-medium";
const LINK_IDLE: &str = "hover:bg-gray-50";

/// A menu entry resolved against the current path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Plain prefix test.  Each entry is judged on its own, so two entries
/// with overlapping prefixes (`/cam`, `/cameras`) can both be active.
pub fn is_active(path: &str, href: &str) -> bool {
    path.starts_with(href)
}

/// Resolve every entry against `path`, preserving order.
pub fn menu_links(entries: &[MenuEntry], path: &str) -> Vec<NavLink> {
    entries
        .iter()
        .map(|e| NavLink {
            href: e.href,
            label: e.label,
            active: is_active(path, e.href),
        })
        .collect()
}

/// CSS classes for a link in the given state.
pub fn link_class(active: bool) -> String {
    let state = if active { LINK_ACTIVE } else { LINK_IDLE };
    format!("{LINK_BASE} {state}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAIR: &[MenuEntry] = &[
        MenuEntry { href: "/dashboard", label: "Dashboard" },
        MenuEntry { href: "/cameras", label: "Cameras" },
    ];

    fn active_labels(entries: &[MenuEntry], path: &str) -> Vec<&'static str> {
        menu_links(entries, path)
            .into_iter()
            .filter(|l| l.active)
            .map(|l| l.label)
            .collect()
    }

    #[test]
    fn test_one_link_per_entry_in_order() {
        let links = menu_links(MENU, "/dashboard");
        assert_eq!(links.len(), MENU.len());
        let hrefs: Vec<_> = links.iter().map(|l| l.href).collect();
        assert_eq!(
            hrefs,
            ["/dashboard", "/environments", "/cameras", "/users", "/settings"]
        );
        assert_eq!(links[3].label, "Users & Admins");
    }

    #[test]
    fn test_exact_match_is_active() {
        for entry in MENU {
            assert_eq!(active_labels(MENU, entry.href), vec![entry.label]);
        }
    }

    #[test]
    fn test_extension_is_active() {
        assert_eq!(active_labels(MENU, "/cameras/123"), vec!["Cameras"]);
        assert_eq!(active_labels(MENU, "/settings?tab=general"), vec!["Settings"]);
    }

    #[test]
    fn test_unrelated_path_has_no_active_entry() {
        assert!(active_labels(MENU, "/login").is_empty());
        assert!(active_labels(MENU, "").is_empty());
    }

    #[test]
    fn test_root_has_no_active_entry() {
        assert!(active_labels(MENU, "/").is_empty());
    }

    #[test]
    fn test_cameras_scenario() {
        let links = menu_links(PAIR, "/cameras/5");
        assert_eq!(
            links,
            vec![
                NavLink { href: "/dashboard", label: "Dashboard", active: false },
                NavLink { href: "/cameras", label: "Cameras", active: true },
            ]
        );
    }

    #[test]
    fn test_overlapping_prefixes_both_active() {
        let entries = [
            MenuEntry { href: "/cam", label: "Cam" },
            MenuEntry { href: "/cameras", label: "Cameras" },
        ];
        assert_eq!(active_labels(&entries, "/cameras/1"), vec!["Cam", "Cameras"]);
    }

    #[test]
    fn test_prefix_is_not_segment_aware() {
        // `/users` is a byte prefix of `/usersettings`.
        assert_eq!(active_labels(MENU, "/usersettings"), vec!["Users & Admins"]);
    }

    #[test]
    fn test_link_class() {
        assert_eq!(link_class(true), "block rounded-md px-3 py-2 text-sm bg-gray-100 font-medium");
        assert_eq!(link_class(false), "block rounded-md px-3 py-2 text-sm hover:bg-gray-50");
    }
}
