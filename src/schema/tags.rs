/// A known RML tag and the snippet inserted when it is completed.
///
/// `insert_template` uses LSP snippet syntax and omits the leading `<`, which
/// the user has already typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub insert_template: &'static str,
}

const fn tag(name: &'static str, description: &'static str, insert_template: &'static str) -> TagSpec {
    TagSpec { name, description, insert_template }
}

static TAGS: &[TagSpec] = &[
    // Document structure
    tag("document", "Root document element", "document filename=\"$1\">\n\t$0\n</document>"),
    tag("template", "Template section for page layout", "template>\n\t$0\n</template>"),
    tag("pageTemplate", "Page template definition", "pageTemplate id=\"$1\">\n\t$0\n</pageTemplate>"),
    tag("stylesheet", "Stylesheet section for styles", "stylesheet>\n\t$0\n</stylesheet>"),
    tag("story", "Story section for flowable content", "story>\n\t$0\n</story>"),

    // Layout
    tag("frame", "Content frame definition", "frame id=\"$1\" x1=\"$2\" y1=\"$3\" width=\"$4\" height=\"$5\" />"),
    tag("pageGraphics", "Page graphics container", "pageGraphics>\n\t$0\n</pageGraphics>"),
    tag("place", "Place element at specific position", "place x=\"$1\" y=\"$2\" width=\"$3\" height=\"$4\">\n\t$0\n</place>"),

    // Flowables
    tag("para", "Paragraph element", "para${1: style=\"$2\"}>$0</para>"),
    tag("spacer", "Vertical spacer", "spacer length=\"$1\" />"),
    tag("image", "Image element", "image file=\"$1\" width=\"$2\" height=\"$3\" />"),

    // Tables
    tag("blockTable", "Block table element", "blockTable${1: style=\"$2\"}>\n\t<tr>\n\t\t<td>$0</td>\n\t</tr>\n</blockTable>"),
    tag("tr", "Table row", "tr>\n\t<td>$0</td>\n</tr>"),
    tag("td", "Table cell", "td${1: style=\"$2\"}>$0</td>"),
    tag("th", "Table header cell", "th${1: style=\"$2\"}>$0</th>"),

    // Styles
    tag("paraStyle", "Paragraph style definition", "paraStyle name=\"$1\" fontName=\"$2\" fontSize=\"$3\" />"),
    tag("blockTableStyle", "Block table style definition", "blockTableStyle id=\"$1\">\n\t$0\n</blockTableStyle>"),
    tag("tableStyle", "Table style definition", "tableStyle id=\"$1\">\n\t$0\n</tableStyle>"),

    // Graphics
    tag("fill", "Fill color", "fill color=\"$1\" />"),
    tag("setFont", "Set font", "setFont name=\"$1\" size=\"$2\" />"),
    tag("drawString", "Draw text string", "drawString x=\"$1\" y=\"$2\">$0</drawString>"),
    tag("circle", "Circle shape", "circle x=\"$1\" y=\"$2\" radius=\"$3\" />"),
    tag("rect", "Rectangle shape", "rect x=\"$1\" y=\"$2\" width=\"$3\" height=\"$4\" />"),
    tag("line", "Line shape", "line x1=\"$1\" y1=\"$2\" x2=\"$3\" y2=\"$4\" />"),

    // Font registration
    tag("docinit", "Document initialization", "docinit>\n\t$0\n</docinit>"),
    tag("registerFont", "Register font", "registerFont fontName=\"$1\" fontFile=\"$2\" />"),
    tag("registerTTFont", "Register TrueType font", "registerTTFont faceName=\"$1\" fileName=\"$2\" />"),
    tag("registerCIDFont", "Register CID font", "registerCIDFont faceName=\"$1\" />"),

    // Inline formatting
    tag("b", "Bold text", "b>$0</b>"),
    tag("i", "Italic text", "i>$0</i>"),
    tag("u", "Underlined text", "u>$0</u>"),
    tag("sup", "Superscript text", "sup>$0</sup>"),
    tag("sub", "Subscript text", "sub>$0</sub>"),
    tag("font", "Font element", "font face=\"$1\" size=\"$2\">$0</font>"),
    tag("span", "Span element", "span${1: style=\"$2\"}>$0</span>"),
    tag("br", "Line break", "br />"),

    // Flow control
    tag("keepInFrame", "Keep content in frame", "keepInFrame>\n\t$0\n</keepInFrame>"),
    tag("condPageBreak", "Conditional page break", "condPageBreak height=\"$1\" />"),
    tag("nextFrame", "Next frame", "nextFrame />"),
    tag("nextPage", "Next page", "nextPage />"),
    tag("setNextTemplate", "Set next template", "setNextTemplate name=\"$1\" />"),
];

/// All known tags, in declaration order.
pub fn tag_list() -> &'static [TagSpec] {
    TAGS
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tag_names_are_unique() {
        let mut seen = HashSet::new();
        for spec in tag_list() {
            assert!(seen.insert(spec.name), "duplicate tag '{}'", spec.name);
        }
        assert_eq!(seen.len(), 41);
    }

    #[test]
    fn test_declaration_order_is_stable() {
        let names: Vec<_> = tag_list().iter().take(3).map(|spec| spec.name).collect();
        assert_eq!(names, vec!["document", "template", "pageTemplate"]);
        assert_eq!(tag_list().last().map(|spec| spec.name), Some("setNextTemplate"));
    }

    #[test]
    fn test_container_templates_close_their_tag() {
        for spec in tag_list() {
            let self_closing = spec.insert_template.ends_with("/>");
            let closed = spec.insert_template.ends_with(&format!("</{}>", spec.name));
            assert!(
                self_closing || closed,
                "template for '{}' neither self-closes nor closes the tag: {:?}",
                spec.name,
                spec.insert_template
            );
        }
    }
}
