//! Declarative markup: text to widget trees.
//!
//! The format is line-oriented. A bare name instantiates a widget type from
//! the registry; `key: value` lines set properties on the most recently
//! created widget. Nesting is by two-space indentation:
//!
//! ```text
//! Window
//!   title: Inventory
//!   width: 320
//!   height: 240
//!   Button
//!     id: ok
//!     text: OK
//! ```
//!
//! Parsing degrades instead of failing: an unknown type skips its whole
//! block, a malformed value skips that one property, both with a warning.
//! Only an unreadable file is reported as an error.

use std::collections::HashMap;

use cinder_ui_core::logging::targets;
use cinder_ui_core::{Color, Edges, MarkupError, Result};
use tracing::warn;

use crate::backend::ResourceLoader;
use crate::layout::LayoutMode;
use crate::widget::tree::WidgetTree;
use crate::widget::{Widget, WidgetId, WidgetKind};

/// Factory table mapping type names to widget constructors.
///
/// The markup loader instantiates by string name through this table; hosts
/// can register their own composite types next to the built-ins.
pub struct WidgetRegistry {
    factories: HashMap<String, Box<dyn Fn() -> Widget>>,
}

impl std::fmt::Debug for WidgetRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("WidgetRegistry").field("types", &names).finish()
    }
}

impl WidgetRegistry {
    /// Empty registry with no types.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registry pre-populated with every built-in widget type.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("Panel", || Widget::panel());
        registry.register("Label", || Widget::label(""));
        registry.register("Button", || Widget::button(""));
        registry.register("TextInput", Widget::text_input);
        registry.register("ProgressBar", Widget::progress_bar);
        registry.register("ScrollBar", Widget::scroll_bar);
        registry.register("ScrollablePanel", Widget::scroll_panel);
        registry.register("ComboBox", Widget::combo_box);
        registry.register("Window", || Widget::window(""));
        registry
    }

    /// Register (or replace) a widget type factory.
    pub fn register(&mut self, name: impl Into<String>, factory: impl Fn() -> Widget + 'static) {
        self.factories.insert(name.into(), Box::new(factory));
    }

    /// Instantiate a registered type by name.
    pub fn create(&self, name: &str) -> Option<Widget> {
        self.factories.get(name).map(|factory| factory())
    }

    /// Whether a type name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Parse markup text and attach the widgets it describes under `parent`.
/// Returns the top-level widgets created.
pub fn load_markup(
    tree: &mut WidgetTree,
    parent: WidgetId,
    registry: &WidgetRegistry,
    source: &str,
) -> Vec<WidgetId> {
    // Stack of (depth, widget) for the current nesting path
    let mut stack: Vec<(usize, WidgetId)> = Vec::new();
    let mut top_level = Vec::new();
    // Depth at which an unknown type started; deeper lines are discarded
    let mut skip_below: Option<usize> = None;

    for (number, raw) in source.lines().enumerate() {
        let line_no = number + 1;
        let line = raw.trim_end();
        if line.trim().is_empty() {
            continue;
        }

        let spaces = line.len() - line.trim_start().len();
        if spaces % 2 != 0 {
            warn!(target: targets::MARKUP, line = line_no, "odd indentation, line skipped");
            continue;
        }
        let depth = spaces / 2;
        let content = line.trim_start();

        if let Some(skip) = skip_below {
            if depth > skip {
                continue;
            }
            skip_below = None;
        }

        match content.split_once(':') {
            Some((key, value)) => {
                // Property for the widget one level up
                stack.truncate(depth.min(stack.len()));
                match stack.last() {
                    Some(&(_, id)) => {
                        apply_property(tree, id, key.trim(), value.trim(), line_no);
                    }
                    None => {
                        warn!(target: targets::MARKUP, line = line_no, "property without a widget");
                    }
                }
            }
            None => {
                stack.truncate(depth);
                let attach_to = stack.last().map(|&(_, id)| id).unwrap_or(parent);
                match registry.create(content) {
                    Some(widget) => {
                        let id = tree.spawn(attach_to, widget);
                        if depth == 0 {
                            top_level.push(id);
                        }
                        stack.push((depth + 1, id));
                    }
                    None => {
                        warn!(
                            target: targets::MARKUP,
                            line = line_no,
                            widget_type = content,
                            "unknown widget type, block skipped"
                        );
                        skip_below = Some(depth);
                    }
                }
            }
        }
    }

    tree.update_geometry(parent);
    top_level
}

/// Load markup from a file through the host's resource loader.
pub fn load_markup_file(
    tree: &mut WidgetTree,
    parent: WidgetId,
    registry: &WidgetRegistry,
    loader: &mut dyn ResourceLoader,
    path: &str,
) -> Result<Vec<WidgetId>> {
    let source = loader.read_text_file(path).ok_or_else(|| {
        MarkupError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "unreadable markup file"),
        )
    })?;
    Ok(load_markup(tree, parent, registry, &source))
}

fn parse_i32(value: &str, key: &str, line: usize) -> Option<i32> {
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(target: targets::MARKUP, line, key, value, "malformed integer, property skipped");
            None
        }
    }
}

fn parse_f32(value: &str, key: &str, line: usize) -> Option<f32> {
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(target: targets::MARKUP, line, key, value, "malformed number, property skipped");
            None
        }
    }
}

fn parse_bool(value: &str, key: &str, line: usize) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => {
            warn!(target: targets::MARKUP, line, key, value, "malformed boolean, property skipped");
            None
        }
    }
}

fn parse_color(value: &str, key: &str, line: usize) -> Option<Color> {
    match Color::from_hex(value) {
        Some(color) => Some(color),
        None => {
            warn!(target: targets::MARKUP, line, key, value, "malformed color, property skipped");
            None
        }
    }
}

/// One-or-four integer edge shorthand: `4` or `1 2 3 4` (top right bottom
/// left).
fn parse_edges(value: &str, key: &str, line: usize) -> Option<Edges> {
    let Ok(parts) = value
        .split_whitespace()
        .map(str::parse)
        .collect::<std::result::Result<Vec<i32>, _>>()
    else {
        warn!(target: targets::MARKUP, line, key, value, "malformed edges, property skipped");
        return None;
    };
    match parts.as_slice() {
        [all] => Some(Edges::uniform(*all)),
        [top, right, bottom, left] => Some(Edges::new(*left, *top, *right, *bottom)),
        _ => {
            warn!(target: targets::MARKUP, line, key, value, "malformed edges, property skipped");
            None
        }
    }
}

fn apply_property(tree: &mut WidgetTree, id: WidgetId, key: &str, value: &str, line: usize) {
    let Some(widget) = tree.get_mut(id) else {
        return;
    };

    // Generic properties shared by every widget kind
    match key {
        "id" => {
            widget.name = value.to_owned();
            return;
        }
        "visible" => {
            if let Some(parsed) = parse_bool(value, key, line) {
                widget.visible = parsed;
            }
            return;
        }
        "enabled" => {
            if let Some(parsed) = parse_bool(value, key, line) {
                widget.enabled = parsed;
            }
            return;
        }
        "x" => {
            if let Some(parsed) = parse_i32(value, key, line) {
                widget.rect.origin.x = parsed;
            }
            return;
        }
        "y" => {
            if let Some(parsed) = parse_i32(value, key, line) {
                widget.rect.origin.y = parsed;
            }
            return;
        }
        "width" => {
            if let Some(parsed) = parse_i32(value, key, line) {
                widget.rect.size.width = parsed;
            }
            return;
        }
        "height" => {
            if let Some(parsed) = parse_i32(value, key, line) {
                widget.rect.size.height = parsed;
            }
            return;
        }
        "background-color" => {
            if let Some(parsed) = parse_color(value, key, line) {
                widget.background = parsed;
            }
            return;
        }
        "border-color" => {
            if let Some(parsed) = parse_color(value, key, line) {
                widget.border_color = parsed;
            }
            return;
        }
        "border-width" => {
            if let Some(parsed) = parse_i32(value, key, line) {
                widget.border_width = parsed;
            }
            return;
        }
        "border-radius" => {
            if let Some(parsed) = parse_i32(value, key, line) {
                widget.border_radius = parsed;
            }
            return;
        }
        "opacity" => {
            if let Some(parsed) = parse_f32(value, key, line) {
                widget.opacity = parsed.clamp(0.0, 1.0);
            }
            return;
        }
        "margin" => {
            if let Some(parsed) = parse_edges(value, key, line) {
                widget.margin = parsed;
            }
            return;
        }
        "padding" => {
            if let Some(parsed) = parse_edges(value, key, line) {
                widget.padding = parsed;
            }
            return;
        }
        "layout" => {
            match LayoutMode::from_name(value) {
                Some(mode) => widget.layout = mode,
                None => {
                    warn!(target: targets::MARKUP, line, key, value, "unknown layout mode, property skipped");
                }
            }
            return;
        }
        _ => {}
    }

    // Kind-specific properties
    match &mut widget.kind {
        WidgetKind::Label(state) => match key {
            "text" => state.text = value.to_owned(),
            "text-color" => {
                if let Some(parsed) = parse_color(value, key, line) {
                    state.color = parsed;
                }
            }
            "font-size" => {
                if let Some(parsed) = parse_i32(value, key, line) {
                    state.font_size = parsed;
                }
            }
            _ => unknown_property(key, value, line),
        },
        WidgetKind::Button(state) => match key {
            "text" => state.text = value.to_owned(),
            "text-color" => {
                if let Some(parsed) = parse_color(value, key, line) {
                    state.text_color = parsed;
                }
            }
            _ => unknown_property(key, value, line),
        },
        WidgetKind::TextInput(state) => match key {
            "text" => state.set_text(value),
            "password" => {
                if let Some(parsed) = parse_bool(value, key, line) {
                    state.password = parsed;
                }
            }
            "max-length" => {
                if let Some(parsed) = parse_i32(value, key, line) {
                    state.max_length = usize::try_from(parsed).ok();
                }
            }
            _ => unknown_property(key, value, line),
        },
        WidgetKind::ProgressBar(state) => match key {
            "minimum" => {
                if let Some(parsed) = parse_i32(value, key, line) {
                    state.set_range(parsed, state.maximum);
                }
            }
            "maximum" => {
                if let Some(parsed) = parse_i32(value, key, line) {
                    state.set_range(state.minimum, parsed);
                }
            }
            "value" => {
                if let Some(parsed) = parse_i32(value, key, line) {
                    state.set_value(parsed);
                }
            }
            _ => unknown_property(key, value, line),
        },
        WidgetKind::ScrollBar(state) => match key {
            "minimum" => {
                if let Some(parsed) = parse_i32(value, key, line) {
                    state.set_range(parsed, state.maximum);
                }
            }
            "maximum" => {
                if let Some(parsed) = parse_i32(value, key, line) {
                    state.set_range(state.minimum, parsed);
                }
            }
            "value" => {
                if let Some(parsed) = parse_i32(value, key, line) {
                    state.set_value(parsed);
                }
            }
            "page-step" => {
                if let Some(parsed) = parse_i32(value, key, line) {
                    state.page_step = parsed;
                }
            }
            "orientation" => match value {
                "vertical" => state.orientation = crate::widgets::Orientation::Vertical,
                "horizontal" => state.orientation = crate::widgets::Orientation::Horizontal,
                _ => {
                    warn!(target: targets::MARKUP, line, key, value, "unknown orientation, property skipped");
                }
            },
            _ => unknown_property(key, value, line),
        },
        WidgetKind::ComboBox(state) => match key {
            // Comma-separated option list
            "options" => {
                for option in value.split(',') {
                    state.add_option(option.trim());
                }
            }
            "current-index" => {
                if let Some(parsed) = parse_i32(value, key, line) {
                    state.set_current_index(parsed);
                }
            }
            _ => unknown_property(key, value, line),
        },
        WidgetKind::Window(state) => match key {
            "title" => state.title = value.to_owned(),
            "draggable" => {
                if let Some(parsed) = parse_bool(value, key, line) {
                    state.draggable = parsed;
                }
            }
            "resizable" => {
                if let Some(parsed) = parse_bool(value, key, line) {
                    state.resizable = parsed;
                }
            }
            "closeable" => {
                if let Some(parsed) = parse_bool(value, key, line) {
                    state.closeable = parsed;
                }
            }
            "min-width" => {
                if let Some(parsed) = parse_i32(value, key, line) {
                    state.min_size.width = parsed;
                }
            }
            "min-height" => {
                if let Some(parsed) = parse_i32(value, key, line) {
                    state.min_size.height = parsed;
                }
            }
            "max-width" => {
                if let Some(parsed) = parse_i32(value, key, line) {
                    state.max_size.width = parsed;
                }
            }
            "max-height" => {
                if let Some(parsed) = parse_i32(value, key, line) {
                    state.max_size.height = parsed;
                }
            }
            _ => unknown_property(key, value, line),
        },
        _ => unknown_property(key, value, line),
    }
}

fn unknown_property(key: &str, value: &str, line: usize) {
    warn!(target: targets::MARKUP, line, key, value, "unknown property, skipped");
}
