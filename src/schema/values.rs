use std::fmt;

/// Category of an attribute's value, used to select candidate literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Number,
    Dimension,
    /// Comma separated list of dimensions, e.g. `colWidths`.
    Dimensions,
    FontName,
    Color,
    Alignment,
    PageSize,
    Boolean,
}

impl ValueKind {
    pub const ALL: [ValueKind; 9] = [
        ValueKind::String,
        ValueKind::Number,
        ValueKind::Dimension,
        ValueKind::Dimensions,
        ValueKind::FontName,
        ValueKind::Color,
        ValueKind::Alignment,
        ValueKind::PageSize,
        ValueKind::Boolean,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Dimension => "dimension",
            ValueKind::Dimensions => "dimensions",
            ValueKind::FontName => "font-name",
            ValueKind::Color => "color",
            ValueKind::Alignment => "alignment",
            ValueKind::PageSize => "page-size",
            ValueKind::Boolean => "boolean",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A literal an attribute value may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueCandidate {
    pub literal: &'static str,
    pub description: &'static str,
}

const fn value(literal: &'static str, description: &'static str) -> ValueCandidate {
    ValueCandidate { literal, description }
}

static FONT_NAMES: &[ValueCandidate] = &[
    value("Helvetica", "Helvetica font"),
    value("Helvetica-Bold", "Helvetica bold"),
    value("Helvetica-Oblique", "Helvetica italic"),
    value("Times-Roman", "Times Roman font"),
    value("Times-Bold", "Times bold"),
    value("Times-Italic", "Times italic"),
    value("Courier", "Courier monospace font"),
    value("Courier-Bold", "Courier bold"),
    value("HeiseiMin-W3", "Japanese Mincho font"),
    value("HeiseiKakuGo-W5", "Japanese Gothic font"),
];

static COLORS: &[ValueCandidate] = &[
    value("black", "Black color"),
    value("white", "White color"),
    value("red", "Red color"),
    value("green", "Green color"),
    value("blue", "Blue color"),
    value("yellow", "Yellow color"),
    value("gray", "Gray color"),
];

static ALIGNMENTS: &[ValueCandidate] = &[
    value("left", "Left alignment"),
    value("right", "Right alignment"),
    value("center", "Center alignment"),
    value("justify", "Justified alignment"),
];

static PAGE_SIZES: &[ValueCandidate] = &[
    value("A4", "A4 paper size (210×297mm)"),
    value("letter", "US Letter size (8.5×11\")"),
    value("legal", "US Legal size (8.5×14\")"),
    value("A3", "A3 paper size (297×420mm)"),
    value("A5", "A5 paper size (148×210mm)"),
];

static BOOLEANS: &[ValueCandidate] = &[
    value("true", "Enabled"),
    value("false", "Disabled"),
    value("1", "Enabled"),
    value("0", "Disabled"),
];

/// Candidate literals for a value kind. Free-form kinds have none.
pub fn values_for(kind: ValueKind) -> &'static [ValueCandidate] {
    match kind {
        ValueKind::FontName => FONT_NAMES,
        ValueKind::Color => COLORS,
        ValueKind::Alignment => ALIGNMENTS,
        ValueKind::PageSize => PAGE_SIZES,
        ValueKind::Boolean => BOOLEANS,
        ValueKind::String | ValueKind::Number | ValueKind::Dimension | ValueKind::Dimensions => &[],
    }
}

/// Like [`values_for`], keyed by the kind's string name. Unknown names yield
/// an empty slice.
pub fn values_for_name(kind: &str) -> &'static [ValueCandidate] {
    ValueKind::from_name(kind).map(values_for).unwrap_or(&[])
}
