//! Minimal writer for the JavaScript object-literal syntax the player's menu
//! file uses. Objects keep insertion order; every entry and array element is
//! followed by a trailing comma, two spaces per nesting level.

use crate::model::{Action, Item, Menu, Screen};

const INDENT: &str = "  ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsValue {
    Str(String),
    Array(Vec<JsValue>),
    Object(JsObject),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsObject {
    entries: Vec<(String, JsValue)>,
}

impl JsObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<JsValue>) -> &mut Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    /// Push only when there is something to say: `None` and `""` are skipped.
    pub fn push_opt(&mut self, key: impl Into<String>, value: Option<&str>) -> &mut Self {
        match value {
            Some(v) if !v.is_empty() => self.push(key, v),
            _ => self,
        }
    }

    /// Render the entries without surrounding braces, as if nested `depth`
    /// levels deep inside an enclosing literal.
    pub fn render_entries(&self, depth: usize) -> String {
        let mut out = String::new();
        write_entries(&mut out, &self.entries, depth);
        out
    }
}

impl From<&str> for JsValue {
    fn from(v: &str) -> Self {
        JsValue::Str(v.to_string())
    }
}

impl From<String> for JsValue {
    fn from(v: String) -> Self {
        JsValue::Str(v)
    }
}

impl From<JsObject> for JsValue {
    fn from(v: JsObject) -> Self {
        JsValue::Object(v)
    }
}

impl From<Vec<JsValue>> for JsValue {
    fn from(v: Vec<JsValue>) -> Self {
        JsValue::Array(v)
    }
}

fn write_entries(out: &mut String, entries: &[(String, JsValue)], depth: usize) {
    for (key, value) in entries {
        push_indent(out, depth);
        write_key(out, key);
        out.push_str(": ");
        write_value(out, value, depth);
        out.push_str(",\n");
    }
}

fn write_value(out: &mut String, value: &JsValue, depth: usize) {
    match value {
        JsValue::Str(s) => write_str(out, s),
        JsValue::Object(obj) => {
            out.push_str("{\n");
            write_entries(out, &obj.entries, depth + 1);
            push_indent(out, depth);
            out.push('}');
        }
        JsValue::Array(items) => {
            out.push_str("[\n");
            for item in items {
                push_indent(out, depth + 1);
                write_value(out, item, depth + 1);
                out.push_str(",\n");
            }
            push_indent(out, depth);
            out.push(']');
        }
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn write_key(out: &mut String, key: &str) {
    if is_identifier(key) {
        out.push_str(key);
    } else {
        write_str(out, key);
    }
}

fn write_str(out: &mut String, s: &str) {
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('\'');
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

fn item_object(item: &Item) -> JsObject {
    let mut obj = JsObject::new();
    obj.push("label", item.label.as_str())
        .push("action", item.action.name());
    match &item.action {
        Action::Navigate { target } => {
            obj.push_opt("target", Some(target.as_str()));
        }
        Action::Play {
            video,
            audio,
            subtitles,
        } => {
            obj.push_opt("video", Some(video.as_str()))
                .push_opt("audio", audio.as_deref())
                .push_opt("subtitles", subtitles.as_deref());
        }
    }
    obj
}

fn screen_object(screen: &Screen) -> JsObject {
    let items = screen
        .items
        .iter()
        .map(|item| JsValue::Object(item_object(item)))
        .collect::<Vec<_>>();
    let mut obj = JsObject::new();
    obj.push("header", screen.header.as_str()).push("items", items);
    obj
}

pub fn menu_to_object(menu: &Menu) -> JsObject {
    let mut obj = JsObject::new();
    for screen in &menu.screens {
        obj.push(screen.key.as_str(), screen_object(screen));
    }
    obj
}

/// The text that goes between the channel markers of the host file.
pub fn render_menu(menu: &Menu) -> String {
    menu_to_object(menu).render_entries(1)
}
