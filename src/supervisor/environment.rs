//! Desktop session environment for the client.
//!
//! A GUI client started from a system service needs a display, a runtime
//! directory and a session bus. Values already present in the parent
//! environment always win.

/// Variables to add on top of the inherited environment.
///
/// `lookup` reads the parent environment; only variables it does not know are
/// returned. The bus address is derived from the effective runtime directory,
/// which may come from the parent.
pub fn desktop_overrides<F>(lookup: F, uid: u32) -> Vec<(String, String)>
where
    F: Fn(&str) -> Option<String>,
{
    let mut overrides = Vec::new();

    if lookup("DISPLAY").is_none() {
        overrides.push(("DISPLAY".to_string(), ":0".to_string()));
    }

    let runtime_dir = match lookup("XDG_RUNTIME_DIR") {
        Some(dir) => dir,
        None => {
            let dir = format!("/run/user/{}", uid);
            overrides.push(("XDG_RUNTIME_DIR".to_string(), dir.clone()));
            dir
        }
    };

    if lookup("DBUS_SESSION_BUS_ADDRESS").is_none() {
        overrides.push((
            "DBUS_SESSION_BUS_ADDRESS".to_string(),
            format!("unix:path={}/bus", runtime_dir),
        ));
    }

    overrides
}

/// Overrides computed against this process's environment and real uid.
pub fn process_desktop_overrides() -> Vec<(String, String)> {
    desktop_overrides(
        |key| std::env::var_os(key).map(|v| v.to_string_lossy().into_owned()),
        current_uid(),
    )
}

#[cfg(unix)]
pub fn current_uid() -> u32 {
    nix::unistd::getuid().as_raw()
}

#[cfg(not(unix))]
pub fn current_uid() -> u32 {
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_defaults_when_parent_is_bare() {
        let parent = env(&[]);
        let overrides = desktop_overrides(|k| parent.get(k).cloned(), 1000);

        assert_eq!(
            overrides,
            vec![
                ("DISPLAY".to_string(), ":0".to_string()),
                ("XDG_RUNTIME_DIR".to_string(), "/run/user/1000".to_string()),
                (
                    "DBUS_SESSION_BUS_ADDRESS".to_string(),
                    "unix:path=/run/user/1000/bus".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_parent_values_win() {
        let parent = env(&[
            ("DISPLAY", ":1"),
            ("XDG_RUNTIME_DIR", "/tmp/xdg"),
            ("DBUS_SESSION_BUS_ADDRESS", "unix:path=/tmp/other"),
        ]);
        let overrides = desktop_overrides(|k| parent.get(k).cloned(), 1000);
        assert!(overrides.is_empty());
    }

    #[test]
    fn test_bus_derived_from_parent_runtime_dir() {
        let parent = env(&[("XDG_RUNTIME_DIR", "/tmp/xdg")]);
        let overrides = desktop_overrides(|k| parent.get(k).cloned(), 1000);

        assert!(overrides.contains(&(
            "DBUS_SESSION_BUS_ADDRESS".to_string(),
            "unix:path=/tmp/xdg/bus".to_string()
        )));
        assert!(!overrides.iter().any(|(k, _)| k == "XDG_RUNTIME_DIR"));
    }
}
