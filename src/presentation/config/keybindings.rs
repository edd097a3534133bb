use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use derive_deref::{Deref, DerefMut};
use serde::{de::Deserializer, Deserialize, Serialize};
use strum::{Display, EnumString};

/// User intents a key sequence can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum Action {
    Quit,
    Suspend,
    ScrollUp,
    ScrollDown,
    ScrollToTop,
    ScrollToBottom,
    Open,
    Back,
    LoadMore,
    Refresh,
    Retry,
}

/// Flat mapping from key sequences to actions
#[derive(Clone, Debug, Default, Deref, DerefMut)]
pub struct KeyBindings(pub HashMap<Vec<KeyEvent>, Action>);

impl<'de> Deserialize<'de> for KeyBindings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = HashMap::<String, Action>::deserialize(deserializer)?;
        let bindings = raw
            .into_iter()
            .map(|(keys, action)| {
                parse_key_sequence(&keys)
                    .map(|sequence| (sequence, action))
                    .map_err(serde::de::Error::custom)
            })
            .collect::<Result<HashMap<_, _>, _>>()?;
        Ok(KeyBindings(bindings))
    }
}

impl KeyBindings {
    /// Look up the action bound to a single key press
    pub fn action_for(&self, key: KeyEvent) -> Option<Action> {
        self.get(&vec![normalize(key)]).copied()
    }

    /// Add every default binding the user did not override
    pub fn merge_defaults(&mut self, defaults: &KeyBindings) {
        for (sequence, action) in defaults.iter() {
            self.entry(sequence.clone()).or_insert(*action);
        }
    }
}

// Terminals report upper-case letters with SHIFT on some platforms and
// without on others.
fn normalize(key: KeyEvent) -> KeyEvent {
    match key.code {
        KeyCode::Char(c) if c.is_ascii_uppercase() => {
            KeyEvent::new(key.code, key.modifiers.difference(KeyModifiers::SHIFT))
        }
        _ => KeyEvent::new(key.code, key.modifiers),
    }
}

/// Parse `"<ctrl-c>"`, `"<q><q>"` or a bare `"j"` into key events
pub fn parse_key_sequence(raw: &str) -> Result<Vec<KeyEvent>, String> {
    if raw.chars().filter(|c| *c == '>').count() != raw.chars().filter(|c| *c == '<').count() {
        return Err(format!("Unable to parse `{raw}`"));
    }
    let trimmed = raw.strip_prefix('<').unwrap_or(raw);
    let trimmed = trimmed.strip_suffix('>').unwrap_or(trimmed);
    trimmed
        .split("><")
        .map(|chunk| parse_key_event(chunk).map(normalize))
        .collect()
}

/// Parse a single key such as `ctrl-c`, `enter` or `G`
pub fn parse_key_event(raw: &str) -> Result<KeyEvent, String> {
    let (modifiers, rest) = extract_modifiers(raw);
    parse_key_code_with_modifiers(rest, modifiers)
}

fn extract_modifiers(raw: &str) -> (KeyModifiers, &str) {
    let mut modifiers = KeyModifiers::empty();
    let mut current = raw;

    loop {
        let lower = current.to_ascii_lowercase();
        if lower.starts_with("ctrl-") {
            modifiers.insert(KeyModifiers::CONTROL);
            current = &current[5..];
        } else if lower.starts_with("alt-") {
            modifiers.insert(KeyModifiers::ALT);
            current = &current[4..];
        } else if lower.starts_with("shift-") {
            modifiers.insert(KeyModifiers::SHIFT);
            current = &current[6..];
        } else {
            break;
        }
    }

    (modifiers, current)
}

fn parse_key_code_with_modifiers(
    raw: &str,
    mut modifiers: KeyModifiers,
) -> Result<KeyEvent, String> {
    let code = match raw.to_ascii_lowercase().as_str() {
        "esc" => KeyCode::Esc,
        "enter" => KeyCode::Enter,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "backtab" => {
            modifiers.insert(KeyModifiers::SHIFT);
            KeyCode::BackTab
        }
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "tab" => KeyCode::Tab,
        "space" => KeyCode::Char(' '),
        "hyphen" | "minus" => KeyCode::Char('-'),
        _ => {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    let c = if modifiers.contains(KeyModifiers::SHIFT) {
                        c.to_ascii_uppercase()
                    } else {
                        c
                    };
                    KeyCode::Char(c)
                }
                _ => return Err(format!("Unable to parse `{raw}`")),
            }
        }
    };
    Ok(KeyEvent::new(code, modifiers))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("<q>", KeyCode::Char('q'), KeyModifiers::NONE)]
    #[case("<ctrl-c>", KeyCode::Char('c'), KeyModifiers::CONTROL)]
    #[case("<Ctrl-z>", KeyCode::Char('z'), KeyModifiers::CONTROL)]
    #[case("<enter>", KeyCode::Enter, KeyModifiers::NONE)]
    #[case("<Down>", KeyCode::Down, KeyModifiers::NONE)]
    #[case("<G>", KeyCode::Char('G'), KeyModifiers::NONE)]
    #[case("<shift-g>", KeyCode::Char('G'), KeyModifiers::NONE)]
    #[case("j", KeyCode::Char('j'), KeyModifiers::NONE)]
    fn test_parse_single_key(
        #[case] raw: &str,
        #[case] code: KeyCode,
        #[case] modifiers: KeyModifiers,
    ) {
        assert_eq!(
            parse_key_sequence(raw),
            Ok(vec![KeyEvent::new(code, modifiers)])
        );
    }

    #[test]
    fn test_parse_sequence() {
        assert_eq!(
            parse_key_sequence("<g><g>"),
            Ok(vec![
                KeyEvent::new(KeyCode::Char('g'), KeyModifiers::NONE),
                KeyEvent::new(KeyCode::Char('g'), KeyModifiers::NONE),
            ])
        );
    }

    #[rstest]
    #[case("<unknown>")]
    #[case("<q")]
    fn test_parse_invalid(#[case] raw: &str) {
        assert!(parse_key_sequence(raw).is_err());
    }

    #[test]
    fn test_deserialize_and_lookup() {
        let bindings: KeyBindings =
            json5::from_str(r#"{ "<q>": "Quit", "<j>": "ScrollDown", "<R>": "Refresh" }"#)
                .expect("bindings should parse");

        assert_eq!(
            bindings.action_for(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(Action::Quit)
        );
        assert_eq!(
            bindings.action_for(KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT)),
            Some(Action::Refresh)
        );
        assert_eq!(
            bindings.action_for(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)),
            None
        );
    }

    #[test]
    fn test_deserialize_rejects_bad_key() {
        let result: Result<KeyBindings, _> = json5::from_str(r#"{ "<nope>": "Quit" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_defaults_keeps_user_overrides() {
        let q = vec![KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)];
        let j = vec![KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE)];
        let mut user = KeyBindings(HashMap::from([(q.clone(), Action::Back)]));
        let defaults = KeyBindings(HashMap::from([
            (q.clone(), Action::Quit),
            (j.clone(), Action::ScrollDown),
        ]));

        user.merge_defaults(&defaults);

        assert_eq!(user.get(&q), Some(&Action::Back));
        assert_eq!(user.get(&j), Some(&Action::ScrollDown));
    }
}
