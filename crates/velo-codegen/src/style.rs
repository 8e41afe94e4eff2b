//! Color, corner-radius and typography resolution.
//!
//! Each value resolves either to a design-token reference (when the node uses
//! a shared style or variable) or to a literal.

use crate::layout::Spacing;
use crate::snapshot::ResolvedNode;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use velo_core::PaintKind;

/// The "no color" literal.
pub const CLEAR: &str = ".clear";

static STYLE_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\-]").unwrap());
static PARENTHESES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[()]").unwrap());
static WORD_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\-\s]+(.)?").unwrap());
static NUMBER_PAIR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((\d+),(\d+)\)").unwrap());
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((\d+)\)").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Format a shared style name as a token reference under `prefix`.
///
/// `"Surface/Primary 100"` with prefix `Color` becomes
/// `Color.token.surface.primary.100`.
pub fn format_style_token(style_name: &str, prefix: &str) -> String {
    let lowered = style_name.to_lowercase();
    let dotted = STYLE_SEPARATORS.replace_all(&lowered, ".");
    let stripped = PARENTHESES.replace_all(&dotted, "");
    format!("{}.token.{}", prefix, stripped.replace('/', "."))
}

/// Resolve the fill color of a node.
pub fn color(node: &ResolvedNode) -> String {
    let Some(paint) = node.node.fills.first() else {
        return CLEAR.to_string();
    };
    if paint.kind != PaintKind::Solid {
        return CLEAR.to_string();
    }
    if let Some(style) = &node.fill_style {
        return format_style_token(style, "Color");
    }
    match paint.color {
        Some(rgb) => format!("Color(hex: \"{}\")", rgb.to_hex()),
        None => CLEAR.to_string(),
    }
}

/// Resolve the corner-radius modifier of a node, if it has one.
///
/// The document root never gets one; neither do nodes without a radius.
pub fn corner_radius(node: &ResolvedNode, parent: Option<&ResolvedNode>) -> Option<String> {
    let radius = node.node.layout.corner_radius.filter(|r| *r != 0.0)?;
    parent?;

    let value = match &node.corner_style {
        Some(style) => format_style_token(style, "CornerRadius"),
        None => Spacing::quantize(radius).to_string(),
    };
    Some(format!(".cornerRadius({})", value))
}

/// Format a text style name as a font identifier.
///
/// `"Text/Regular SemiBold"` becomes `textRegularSemiBold`.
pub fn format_typography_name(name: &str) -> String {
    name.split('/')
        .enumerate()
        .map(|(index, segment)| {
            let compact = WHITESPACE.replace_all(segment, "");
            if index == 0 {
                compact.to_lowercase()
            } else {
                capitalize(&compact)
            }
        })
        .collect()
}

/// Resolve the font identifier of a text node; empty without a text style.
pub fn typography(node: &ResolvedNode) -> String {
    node.text_style
        .as_deref()
        .map(format_typography_name)
        .unwrap_or_default()
}

/// Format a variable name as a color token identifier.
///
/// Only the last path segment is kept: `"Colors/Text/Neutral (0,5)"` becomes
/// `neutral05`.
pub fn format_variable_token(name: &str) -> String {
    let last = name.rsplit('/').next().unwrap_or(name);
    let joined = WORD_BREAK.replace_all(last, |caps: &Captures| {
        caps.get(1)
            .map(|m| m.as_str().to_uppercase())
            .unwrap_or_default()
    });
    let paired = NUMBER_PAIR.replace_all(&joined, "$1$2");
    let single = NUMBER.replace_all(&paired, "$1");
    decapitalize(&single)
}

/// Resolve the color token a text node's fill is bound to; empty when the
/// fill is unbound or the variable is unknown.
pub fn bound_color_token(node: &ResolvedNode) -> String {
    node.fill_variable
        .as_deref()
        .map(format_variable_token)
        .unwrap_or_default()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_alphanumeric() || first == '_' => {
            first.to_lowercase().chain(chars).collect()
        }
        Some(first) => std::iter::once(first).chain(chars).collect(),
        None => String::new(),
    }
}
