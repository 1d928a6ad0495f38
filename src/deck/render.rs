//! Slide part XML.

use std::borrow::Cow;
use std::fmt::Write as FmtWrite;

use quick_xml::escape::escape;

use super::{Frame, Layout, Placeholder, RenderedSlide, Shape, TextBlock, TextStyle};
use crate::Error;

pub(super) const XML_DECLARATION: &str =
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
pub(super) const NS_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships";
pub(super) const REL_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
pub(super) const REL_IMAGE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

const SLIDE_OPEN: &str = concat!(
    r#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">"#,
);
const GROUP_PROPERTIES: &str = concat!(
    r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
    r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/>"#,
    r#"<a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#,
);

/// Relationship id of the `n`th (0-based) picture on a slide. `rId1` is the layout.
pub(super) fn picture_rel_id(n: usize) -> String {
    format!("rId{}", n + 2)
}

/// Drop characters XML 1.0 cannot represent, then escape markup.
fn text(s: &str) -> Cow<'_, str> {
    let valid = |c: char| {
        matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}')
    };
    if s.chars().all(valid) {
        escape(s)
    } else {
        Cow::Owned(escape(&s.chars().filter(|c| valid(*c)).collect::<String>()).into_owned())
    }
}

/// Generate `ppt/slides/slideN.xml` for one slide.
pub(super) fn slide_xml(slide: &RenderedSlide) -> Result<String, Error> {
    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECLARATION);
    xml.push_str(SLIDE_OPEN);
    xml.push_str("<p:cSld><p:spTree>");
    xml.push_str(GROUP_PROPERTIES);

    let mut pictures = 0;
    for (index, shape) in slide.shapes.iter().enumerate() {
        let id = index + 2;
        match shape {
            Shape::Text(block) => text_shape_xml(&mut xml, id, block)?,
            Shape::Picture {
                frame, description, ..
            } => {
                picture_xml(&mut xml, id, frame, description, &picture_rel_id(pictures))?;
                pictures += 1;
            }
        }
    }

    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sld>");
    Ok(xml)
}

/// Generate `ppt/slides/_rels/slideN.xml.rels`. `media` holds the part
/// names under `ppt/media/` of the slide's pictures, in shape order.
pub(super) fn slide_rels_xml(layout: Layout, media: &[String]) -> Result<String, Error> {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECLARATION);
    write!(xml, r#"<Relationships xmlns="{NS_RELATIONSHIPS}">"#)?;
    write!(
        xml,
        r#"<Relationship Id="rId1" Type="{REL_SLIDE_LAYOUT}" Target="../slideLayouts/slideLayout{}.xml"/>"#,
        layout.number()
    )?;
    for (n, name) in media.iter().enumerate() {
        write!(
            xml,
            r#"<Relationship Id="{}" Type="{REL_IMAGE}" Target="../media/{}"/>"#,
            picture_rel_id(n),
            text(name)
        )?;
    }
    xml.push_str("</Relationships>");
    Ok(xml)
}

fn xfrm_xml(xml: &mut String, frame: &Frame) -> Result<(), Error> {
    write!(
        xml,
        r#"<a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm>"#,
        frame.x, frame.y, frame.cx, frame.cy
    )?;
    Ok(())
}

fn placeholder_xml(placeholder: Placeholder) -> &'static str {
    match placeholder {
        Placeholder::CenteredTitle => r#"<p:ph type="ctrTitle"/>"#,
        Placeholder::Subtitle => r#"<p:ph type="subTitle" idx="1"/>"#,
        Placeholder::Title => r#"<p:ph type="title"/>"#,
        Placeholder::Body => r#"<p:ph idx="1"/>"#,
    }
}

fn text_shape_xml(xml: &mut String, id: usize, block: &TextBlock) -> Result<(), Error> {
    xml.push_str("<p:sp><p:nvSpPr>");
    match block.placeholder {
        Some(placeholder) => {
            let name = match placeholder {
                Placeholder::CenteredTitle | Placeholder::Title => "Title",
                Placeholder::Subtitle => "Subtitle",
                Placeholder::Body => "Content Placeholder",
            };
            write!(xml, r#"<p:cNvPr id="{id}" name="{name} {}"/>"#, id - 1)?;
            xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
            write!(xml, "<p:nvPr>{}</p:nvPr>", placeholder_xml(placeholder))?;
        }
        None => {
            write!(xml, r#"<p:cNvPr id="{id}" name="TextBox {}"/>"#, id - 1)?;
            xml.push_str(r#"<p:cNvSpPr txBox="1"/><p:nvPr/>"#);
        }
    }
    xml.push_str("</p:nvSpPr><p:spPr>");
    xfrm_xml(xml, &block.frame)?;
    if block.placeholder.is_none() {
        xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/>"#);
    }
    xml.push_str("</p:spPr><p:txBody>");
    if block.placeholder.is_none() {
        xml.push_str(r#"<a:bodyPr wrap="square" rtlCol="0"><a:normAutofit/></a:bodyPr>"#);
    } else {
        xml.push_str("<a:bodyPr><a:normAutofit/></a:bodyPr>");
    }
    xml.push_str("<a:lstStyle/>");

    // Body lines already carry their own bullet glyphs.
    let paragraph_properties = match block.placeholder {
        Some(Placeholder::Body) => r#"<a:pPr marL="0" indent="0"><a:buNone/></a:pPr>"#,
        _ => "",
    };

    if block.paragraphs.is_empty() {
        write!(xml, "<a:p>{paragraph_properties}")?;
        run_properties_xml(xml, "a:endParaRPr", &block.style)?;
        xml.push_str("</a:p>");
    }
    for paragraph in &block.paragraphs {
        write!(xml, "<a:p>{paragraph_properties}")?;
        if paragraph.is_empty() {
            run_properties_xml(xml, "a:endParaRPr", &block.style)?;
        } else {
            xml.push_str("<a:r>");
            run_properties_xml(xml, "a:rPr", &block.style)?;
            write!(xml, "<a:t>{}</a:t></a:r>", text(paragraph))?;
        }
        xml.push_str("</a:p>");
    }

    xml.push_str("</p:txBody></p:sp>");
    Ok(())
}

fn run_properties_xml(xml: &mut String, element: &str, style: &TextStyle) -> Result<(), Error> {
    write!(xml, r#"<{element} lang="en-US" sz="{}""#, style.size_pt * 100)?;
    if style.bold {
        xml.push_str(r#" b="1""#);
    }
    xml.push_str(r#" dirty="0""#);
    match style.color {
        Some(color) => write!(
            xml,
            r#"><a:solidFill><a:srgbClr val="{color}"/></a:solidFill></{element}>"#
        )?,
        None => xml.push_str("/>"),
    }
    Ok(())
}

fn picture_xml(
    xml: &mut String,
    id: usize,
    frame: &Frame,
    description: &str,
    rel_id: &str,
) -> Result<(), Error> {
    xml.push_str("<p:pic><p:nvPicPr>");
    write!(
        xml,
        r#"<p:cNvPr id="{id}" name="Picture {}" descr="{}"/>"#,
        id - 1,
        text(description)
    )?;
    xml.push_str(r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/>"#);
    xml.push_str("</p:nvPicPr><p:blipFill>");
    write!(xml, r#"<a:blip r:embed="{rel_id}"/>"#)?;
    xml.push_str("<a:stretch><a:fillRect/></a:stretch></p:blipFill><p:spPr>");
    xfrm_xml(xml, frame)?;
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr></p:pic>"#);
    Ok(())
}
