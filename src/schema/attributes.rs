use super::values::ValueKind;

/// An attribute accepted by one or more tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub value_kind: ValueKind,
}

const fn attr(name: &'static str, description: &'static str, value_kind: ValueKind) -> AttributeSpec {
    AttributeSpec { name, description, value_kind }
}

use ValueKind::{Alignment, Boolean, Color, Dimension, Dimensions, FontName, Number, PageSize, String};

/// Attributes accepted by every tag, appended after the tag's own list.
pub static COMMON_ATTRIBUTES: &[AttributeSpec] = &[
    attr("id", "Unique identifier", String),
    attr("style", "Style reference", String),
];

static TAG_ATTRIBUTES: &[(&str, &[AttributeSpec])] = &[
    ("document", &[
        attr("filename", "Output PDF filename", String),
        attr("pageSize", "Page size (A4, letter, etc.)", PageSize),
        attr("pageMargin", "Page margins", Dimension),
    ]),
    ("pageTemplate", &[
        attr("showBoundary", "Show frame boundaries", Boolean),
    ]),
    ("frame", &[
        attr("x1", "Left position", Dimension),
        attr("y1", "Bottom position", Dimension),
        attr("width", "Frame width", Dimension),
        attr("height", "Frame height", Dimension),
        attr("leftPadding", "Left padding", Dimension),
        attr("rightPadding", "Right padding", Dimension),
        attr("topPadding", "Top padding", Dimension),
        attr("bottomPadding", "Bottom padding", Dimension),
    ]),
    ("place", &[
        attr("x", "X position", Dimension),
        attr("y", "Y position", Dimension),
        attr("width", "Placement width", Dimension),
        attr("height", "Placement height", Dimension),
    ]),
    ("para", &[
        attr("fontName", "Font name", FontName),
        attr("fontSize", "Font size", Number),
        attr("textColor", "Text color", Color),
        attr("alignment", "Text alignment", Alignment),
        attr("leading", "Line spacing", Number),
    ]),
    ("spacer", &[
        attr("length", "Spacer length", Dimension),
    ]),
    ("image", &[
        attr("file", "Image file path", String),
        attr("width", "Image width", Dimension),
        attr("height", "Image height", Dimension),
    ]),
    ("blockTable", &[
        attr("colWidths", "Column widths", Dimensions),
        attr("rowHeights", "Row heights", Dimensions),
        attr("repeatRows", "Repeat header rows", Number),
    ]),
    ("paraStyle", &[
        attr("name", "Style name", String),
        attr("fontName", "Font name", FontName),
        attr("fontSize", "Font size", Number),
        attr("textColor", "Text color", Color),
        attr("alignment", "Text alignment", Alignment),
        attr("leading", "Line spacing", Number),
        attr("spaceBefore", "Space before paragraph", Dimension),
        attr("spaceAfter", "Space after paragraph", Dimension),
        attr("leftIndent", "Left indent", Dimension),
        attr("rightIndent", "Right indent", Dimension),
    ]),
    ("fill", &[
        attr("color", "Fill color", Color),
    ]),
    ("setFont", &[
        attr("name", "Font name", FontName),
        attr("size", "Font size", Number),
    ]),
    ("drawString", &[
        attr("x", "X position", Dimension),
        attr("y", "Y position", Dimension),
    ]),
    ("circle", &[
        attr("x", "Center X position", Dimension),
        attr("y", "Center Y position", Dimension),
        attr("radius", "Circle radius", Dimension),
    ]),
    ("rect", &[
        attr("x", "Left position", Dimension),
        attr("y", "Bottom position", Dimension),
        attr("width", "Rectangle width", Dimension),
        attr("height", "Rectangle height", Dimension),
    ]),
    ("line", &[
        attr("x1", "Start X position", Dimension),
        attr("y1", "Start Y position", Dimension),
        attr("x2", "End X position", Dimension),
        attr("y2", "End Y position", Dimension),
    ]),
    ("registerFont", &[
        attr("fontName", "Name to register the font under", String),
        attr("fontFile", "Font file path", String),
    ]),
    ("registerTTFont", &[
        attr("faceName", "Face name to register", String),
        attr("fileName", "TrueType font file path", String),
    ]),
    ("registerCIDFont", &[
        attr("faceName", "CID face name", String),
    ]),
    ("font", &[
        attr("face", "Font face", FontName),
        attr("size", "Font size", Number),
        attr("color", "Text color", Color),
    ]),
    ("condPageBreak", &[
        attr("height", "Minimum remaining height", Dimension),
    ]),
    ("setNextTemplate", &[
        attr("name", "Page template name", String),
    ]),
];

fn declared_for(tag_name: &str) -> Option<&'static [AttributeSpec]> {
    TAG_ATTRIBUTES
        .iter()
        .find(|(name, _)| *name == tag_name)
        .map(|(_, attributes)| *attributes)
}

/// Resolves the attributes offered inside `tag_name`.
///
/// The tag's own attributes come first, followed by the common set. A common
/// attribute the tag already declares is not repeated. Unknown tags resolve
/// to the common set alone.
pub fn attributes_for(tag_name: &str) -> Vec<AttributeSpec> {
    let declared = declared_for(tag_name).unwrap_or(&[]);

    let mut resolved = Vec::with_capacity(declared.len() + COMMON_ATTRIBUTES.len());
    resolved.extend_from_slice(declared);
    resolved.extend(
        COMMON_ATTRIBUTES
            .iter()
            .filter(|common| !declared.iter().any(|own| own.name == common.name))
            .copied(),
    );
    resolved
}

/// Looks up the value kind of an attribute.
///
/// Resolution order:
/// 1. the attribute as declared on `tag_name`, when given
/// 2. the common attribute table
/// 3. the first tag, in declaration order, that declares the attribute
pub fn value_kind_of(attribute_name: &str, tag_name: Option<&str>) -> Option<ValueKind> {
    let find = |attributes: &[AttributeSpec]| {
        attributes
            .iter()
            .find(|spec| spec.name == attribute_name)
            .map(|spec| spec.value_kind)
    };

    tag_name
        .and_then(declared_for)
        .and_then(find)
        .or_else(|| find(COMMON_ATTRIBUTES))
        .or_else(|| TAG_ATTRIBUTES.iter().find_map(|(_, attributes)| find(attributes)))
}
