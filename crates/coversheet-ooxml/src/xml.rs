//! Namespaces and escaping shared by the part generators

/// WordprocessingML main namespace
pub const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
/// Office document relationships namespace
pub const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
/// Drawing placement namespace
pub const NS_WP: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
/// DrawingML main namespace
pub const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
/// DrawingML picture namespace
pub const NS_PIC: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";

/// XML declaration written at the top of every generated part
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Escape special XML characters in text and attribute values
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
