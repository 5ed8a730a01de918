//! Embedded images
//!
//! Images in WordprocessingML are placed with a `<w:drawing>` element that
//! references a media part through a relationship id:
//!
//! ```xml
//! <w:drawing>
//!   <wp:inline>
//!     <wp:extent cx="..." cy="..."/>               <!-- EMUs -->
//!     <wp:docPr id="..." name="..." descr="..."/>
//!     <a:graphic>
//!       <a:graphicData uri="...picture">
//!         <pic:pic>
//!           <pic:blipFill><a:blip r:embed="rIdNN"/></pic:blipFill>
//!         </pic:pic>
//!       </a:graphicData>
//!     </a:graphic>
//!   </wp:inline>
//! </w:drawing>
//! ```
//!
//! OOXML measures drawings in EMUs: 914400 per inch, 9525 per pixel at 96 DPI.

use crate::xml::escape_xml;

/// EMUs per inch (914400)
pub const EMU_PER_INCH: i64 = 914400;

/// EMUs per pixel at 96 DPI (9525)
pub const EMU_PER_PIXEL: i64 = 9525;

/// Edge length of the logo square, in pixels
pub const LOGO_SIZE_PX: i64 = 100;

/// Convert pixels to EMUs at 96 DPI
pub fn pixels_to_emu(pixels: i64) -> i64 {
    pixels * EMU_PER_PIXEL
}

/// Get the MIME content type for an image extension
pub fn content_type_for_extension(ext: &str) -> &'static str {
    match ext.to_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

/// An image placed inline in a paragraph run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    /// Drawing id, unique within the document
    pub id: u32,
    /// Relationship id of the media part
    pub rel_id: String,
    pub name: String,
    /// Alt text
    pub descr: String,
    pub width_emu: i64,
    pub height_emu: i64,
}

impl InlineImage {
    /// A square image of `size_px` pixels; the picture is stretched to fill it
    pub fn square(id: u32, rel_id: impl Into<String>, size_px: i64) -> Self {
        let emu = pixels_to_emu(size_px);
        Self {
            id,
            rel_id: rel_id.into(),
            name: format!("Picture {}", id),
            descr: String::new(),
            width_emu: emu,
            height_emu: emu,
        }
    }

    /// Set alt text
    pub fn with_descr(mut self, descr: impl Into<String>) -> Self {
        self.descr = descr.into();
        self
    }

    /// The `<w:drawing>` element
    pub fn to_xml(&self) -> String {
        let name = escape_xml(&self.name);
        format!(
            concat!(
                "<w:drawing>",
                r#"<wp:inline distT="0" distB="0" distL="0" distR="0">"#,
                r#"<wp:extent cx="{cx}" cy="{cy}"/>"#,
                r#"<wp:effectExtent l="0" t="0" r="0" b="0"/>"#,
                r#"<wp:docPr id="{id}" name="{name}" descr="{descr}"/>"#,
                r#"<wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect="1"/></wp:cNvGraphicFramePr>"#,
                "<a:graphic>",
                r#"<a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
                "<pic:pic>",
                r#"<pic:nvPicPr><pic:cNvPr id="{id}" name="{name}"/><pic:cNvPicPr/></pic:nvPicPr>"#,
                r#"<pic:blipFill><a:blip r:embed="{rel}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
                "<pic:spPr>",
                r#"<a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
                r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#,
                "</pic:spPr>",
                "</pic:pic>",
                "</a:graphicData>",
                "</a:graphic>",
                "</wp:inline>",
                "</w:drawing>"
            ),
            cx = self.width_emu,
            cy = self.height_emu,
            id = self.id,
            name = name,
            descr = escape_xml(&self.descr),
            rel = escape_xml(&self.rel_id),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixels_to_emu() {
        assert_eq!(pixels_to_emu(96), EMU_PER_INCH);
        assert_eq!(pixels_to_emu(LOGO_SIZE_PX), 952500);
    }

    #[test]
    fn test_content_type_for_extension() {
        assert_eq!(content_type_for_extension("png"), "image/png");
        assert_eq!(content_type_for_extension("JPEG"), "image/jpeg");
        assert_eq!(content_type_for_extension("gif"), "image/gif");
        assert_eq!(content_type_for_extension("bin"), "application/octet-stream");
    }

    #[test]
    fn test_square_drawing() {
        let xml = InlineImage::square(1, "rId5", LOGO_SIZE_PX)
            .with_descr("University Logo")
            .to_xml();

        assert!(xml.starts_with("<w:drawing>"));
        assert!(xml.ends_with("</w:drawing>"));
        assert_eq!(xml.matches(r#"cx="952500" cy="952500""#).count(), 2);
        assert!(xml.contains(r#"r:embed="rId5""#));
        assert!(xml.contains(r#"descr="University Logo""#));
        assert!(xml.contains("<a:stretch><a:fillRect/></a:stretch>"));
    }
}
