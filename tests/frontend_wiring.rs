// The frontend and the desktop shell agree on command and event names.

const APP_JS: &str = include_str!("../ui/app.js");
const LIB_RS: &str = include_str!("../src/lib.rs");
const COMMANDS_RS: &str = include_str!("../src/commands.rs");

/// Every `'name'` that directly follows `prefix` in the frontend script.
fn quoted_after<'a>(source: &'a str, prefix: &str) -> Vec<&'a str> {
    source
        .split(prefix)
        .skip(1)
        .filter_map(|rest| rest.split('\'').next())
        .collect()
}

fn registered_commands() -> Vec<&'static str> {
    let start = LIB_RS.find("generate_handler![").expect("handler list") + "generate_handler![".len();
    let end = start + LIB_RS[start..].find(']').expect("handler list end");
    LIB_RS[start..end]
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| entry.trim_start_matches("commands::"))
        .collect()
}

#[test]
fn every_invoked_command_is_registered() {
    let registered = registered_commands();
    let invoked = quoted_after(APP_JS, "invoke('");
    assert!(!invoked.is_empty());
    for name in invoked {
        assert!(registered.contains(&name), "{} is invoked but not registered", name);
        assert!(
            COMMANDS_RS.contains(&format!("pub fn {}(", name)) || COMMANDS_RS.contains(&format!("pub async fn {}(", name)),
            "{} has no command function",
            name
        );
    }
}

#[test]
fn theme_is_read_through_get_theme() {
    let registered = registered_commands();
    assert!(registered.contains(&"get_theme_cmd"));
    assert!(!registered.contains(&"init_theme_cmd"));
}

#[test]
fn tab_switches_go_through_the_backend() {
    assert!(registered_commands().contains(&"show_pane_cmd"));
    assert!(APP_JS.contains("invoke('show_pane_cmd'"));
}

#[test]
fn every_listened_event_is_emitted() {
    let listened = quoted_after(APP_JS, "listen('");
    assert!(listened.contains(&"editor-resize"));
    assert!(listened.contains(&"editor-focus"));
    for name in listened {
        assert!(COMMANDS_RS.contains(&format!("\"{}\"", name)), "{} is never emitted", name);
    }
}
