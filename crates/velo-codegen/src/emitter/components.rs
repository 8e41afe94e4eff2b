//! Fragments for classified component instances.

use super::INDENT;
use crate::error::{CodegenError, Result};
use crate::layout::is_fill_width;
use crate::naming::{indent, swift_string, to_camel_case};
use crate::snapshot::ResolvedNode;
use crate::style;
use crate::view_state::ViewState;
use velo_core::{Node, PropertyKind};

/// Instance name that stands for the brand logo rather than a button.
const LOGO_NAME: &str = "Logo";

/// Text slots of a list row, with their row view-model argument names.
const LIST_ROW_SLOTS: [(&str, &str); 4] = [
    ("Overline", "overline"),
    ("Headline", "headline"),
    ("Supporting Text", "supportingText"),
    ("Meta Data", "metaData"),
];

/// `Name(\n    arg,\n    arg\n)`
fn call(name: &str, args: &[String]) -> String {
    format!("{}(\n{}\n)", name, indent(&args.join(",\n"), INDENT))
}

fn slot(node: &ResolvedNode, name: &str) -> String {
    node.node.slot_text(name).unwrap_or_default().to_string()
}

fn asset(name: &str) -> String {
    format!("Image(veloAsset: .{})", to_camel_case(name))
}

fn is_toggled_on(node: &Node, fragment: &str) -> bool {
    node.property_containing(fragment)
        .and_then(|(_, prop)| prop.value.as_bool())
        .unwrap_or(false)
}

/// Value of an icon property of a text field: an asset reference when the
/// property enables or swaps in an icon that resolves, `nil` otherwise.
fn icon_argument(instance: &ResolvedNode, prefix: &str) -> String {
    let Some((key, prop)) = instance.node.property_starting_with(prefix) else {
        return "nil".to_string();
    };
    let swapped = match prop.kind {
        PropertyKind::Boolean if prop.value.as_bool() == Some(true) => {
            instance.swap_starting_with(prefix)
        }
        PropertyKind::InstanceSwap => instance.swaps.get(key).map(String::as_str),
        _ => None,
    };
    swapped.map(asset).unwrap_or_else(|| "nil".to_string())
}

pub(super) fn list_row(instance: &ResolvedNode) -> Result<String> {
    let mut args: Vec<String> = LIST_ROW_SLOTS
        .iter()
        .filter_map(|(slot_name, arg)| {
            let text = slot(instance, slot_name);
            (!text.is_empty()).then(|| format!("{}: {}", arg, swift_string(&text)))
        })
        .collect();

    if let Some(item) = instance.node.find_descendant(&|n: &Node| n.name == "Leading Item") {
        let name = leading_item_name(item)?;
        args.push(format!("leadingItem: .icon(imageName: .{})", to_camel_case(&name)));
    }
    args.push("divider: true".to_string());

    Ok(format!("ListRow(itemViewModel: {})", call("RowViewModel", &args)))
}

pub(super) fn button(instance: &ResolvedNode, parent: Option<&ResolvedNode>) -> String {
    if instance.name() == LOGO_NAME {
        return "Image(veloAsset: .arrowRightLong)".to_string();
    }

    let node = instance.node;
    let max_width = if is_fill_width(node, parent.map(|p| p.node)) {
        ".infinity"
    } else {
        ".none"
    };
    let button_style = node
        .component_properties
        .get("Style")
        .map(|prop| to_camel_case(&prop.value.to_string()))
        .unwrap_or_else(|| "filledA".to_string());

    let mut args = Vec::new();
    let label = slot(instance, "Button");
    if !label.is_empty() {
        args.push(swift_string(&label));
    }
    args.push(format!("background: {}", style::color(instance)));
    args.push(format!("style: .{}", button_style));
    if is_toggled_on(node, "Content Left") {
        if let Some(icon) = instance.swap_containing("Icon-Left") {
            args.push(format!("iconLeft: .{}", to_camel_case(icon)));
        }
    }
    if is_toggled_on(node, "Icon Right") {
        if let Some(icon) = instance.swap_containing("Icon-Right") {
            args.push(format!("iconRight: .{}", to_camel_case(icon)));
        }
    }
    args.push("isDisabled: false".to_string());
    args.push(format!("maxWidth: {}", max_width));
    args.push("action: {}".to_string());

    format!(
        "{}\n.frame(maxWidth: {}, alignment: .leading)",
        call("VeloButton", &args),
        max_width
    )
}

pub(super) fn badge(instance: &ResolvedNode) -> String {
    format!(
        "BadgeView(text: {}, backgroundColor: .infoFocus)",
        swift_string(&slot(instance, "Badge label"))
    )
}

pub(super) fn segmented_control(instance: &ResolvedNode) -> String {
    let picker = call(
        "SegmentedPicker",
        &[
            "viewModel.segmentData".to_string(),
            "selectedItem: $viewModel.selectedSegment".to_string(),
            format!("backgroundColor: {}", style::color(instance)),
        ],
    );
    let item = [
        "Text(item)",
        "    .font(.textRegularSemiBold)",
        "    .frame(maxWidth: .infinity, alignment: .center)",
        "    .foregroundColor(viewModel.selectedSegment == item ? .textNeutral05 : .textNeutral9)",
        "    .padding(.vertical, 10)",
    ]
    .join("\n");

    format!(
        "{} {{ item in\n{}\n}}\n.onChange(of: viewModel.selectedSegment) {{ _, _ in }}",
        picker,
        indent(&item, INDENT)
    )
}

pub(super) fn input_field(instance: &ResolvedNode, state: &mut ViewState) -> String {
    let text = slot(instance, "Text");
    let binding = match to_camel_case(&text) {
        name if name.is_empty() => fallback_binding(state),
        name => name,
    };
    state.register_binding(binding.clone());

    let icon_left = if is_toggled_on(instance.node, "Icon Left") {
        icon_argument(instance, "Icon Left")
    } else {
        "nil".to_string()
    };

    call(
        "CustomTextField",
        &[
            format!("text: $viewModel.{}", binding),
            format!("label: {}", swift_string(&text)),
            format!("placeholder: {}", swift_string(&text)),
            "isEmail: false".to_string(),
            format!("iconRight: {}", icon_argument(instance, "Icon Right")),
            format!("iconLeft: {}", icon_left),
        ],
    )
}

/// `field{n}` for the first `n` past the binding count that is still free.
fn fallback_binding(state: &ViewState) -> String {
    (state.bindings.len() + 1..)
        .map(|n| format!("field{}", n))
        .find(|name| !state.bindings.contains(name))
        .unwrap_or_default()
}

pub(super) fn checkbox(instance: &ResolvedNode) -> String {
    format!(
        "CheckboxView(isChecked: $viewModel.isChecked, text: {})",
        swift_string(&slot(instance, "Label"))
    )
}

pub(super) fn icon(instance: &ResolvedNode) -> Result<String> {
    let glyph = instance
        .node
        .children
        .first()
        .ok_or_else(|| missing_child(instance.node, "0"))?;
    Ok(format!("Icon(imageName: .{})", to_camel_case(&glyph.name)))
}

pub(super) fn image(instance: &ResolvedNode) -> String {
    asset(instance.name())
}

pub(super) fn divider() -> String {
    "Separator().padding(.vertical, .xs)".to_string()
}

pub(super) fn item_icon(instance: &ResolvedNode) -> Result<String> {
    let name = leading_item_name(instance.node)?;
    Ok(format!("Icon(imageName: .{})", to_camel_case(&name)))
}

pub(super) fn container(instance: &ResolvedNode) -> String {
    format!("Text({})", swift_string(instance.name()))
}

/// Display name of what a leading or trailing list item holds, chosen by its
/// `Type` property.
fn leading_item_name(item: &Node) -> Result<String> {
    let kind = item
        .component_properties
        .get("Type")
        .ok_or_else(|| CodegenError::MissingProperty {
            component: item.name.clone(),
            property: "Type".to_string(),
        })?;

    let name = match kind.value.to_string().as_str() {
        "Button" => item
            .children
            .first()
            .and_then(|button| button.children.first())
            .ok_or_else(|| missing_child(item, "0/0"))?
            .name
            .clone(),
        "Icon" => item
            .children
            .first()
            .ok_or_else(|| missing_child(item, "0"))?
            .name
            .clone(),
        "171:3678" => "Radio".to_string(),
        "171:3680" => "Checkbox".to_string(),
        "171:3682" => "Switch".to_string(),
        "171:3684" => "Avatar".to_string(),
        "181:2602" => "Progress Circle".to_string(),
        "171:3686" => "Image".to_string(),
        "171:3688" => "Video".to_string(),
        _ => "Unknown Component".to_string(),
    };
    Ok(name)
}

fn missing_child(node: &Node, path: &str) -> CodegenError {
    CodegenError::MissingChild {
        component: node.name.clone(),
        path: path.to_string(),
    }
}
