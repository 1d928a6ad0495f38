//! Zip packaging of a deck into a `.pptx` file.

use std::fmt::Write as FmtWrite;
use std::io::{Seek, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::render::{
    slide_rels_xml, slide_xml, NS_RELATIONSHIPS, REL_SLIDE_LAYOUT, XML_DECLARATION,
};
use super::{Deck, Layout, Shape, SLIDE_HEIGHT, SLIDE_WIDTH};
use crate::images::PictureFormat;
use crate::Error;

const SLIDE_MASTER_XML: &str = include_str!("../../resources/slideMaster1.xml");
const SLIDE_LAYOUT_XML: [&str; 3] = [
    include_str!("../../resources/slideLayout1.xml"),
    include_str!("../../resources/slideLayout2.xml"),
    include_str!("../../resources/slideLayout3.xml"),
];
const THEME_XML: &str = include_str!("../../resources/theme1.xml");
const PRES_PROPS_XML: &str = include_str!("../../resources/presProps.xml");
const VIEW_PROPS_XML: &str = include_str!("../../resources/viewProps.xml");
const TABLE_STYLES_XML: &str = include_str!("../../resources/tableStyles.xml");

const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const CT_BASE: &str = "application/vnd.openxmlformats-officedocument";

/// `presentation.xml.rels` ids before the first slide.
const FIRST_SLIDE_REL: usize = 6;
/// Slide ids in `presentation.xml` start at 256.
const FIRST_SLIDE_ID: usize = 256;

#[derive(Clone, Copy)]
enum Compression {
    Deflate,
    /// Image payloads are already compressed.
    Store,
}

const XML: Compression = Compression::Deflate;

/// One embedded image part.
struct MediaPart<'a> {
    name: String,
    data: &'a [u8],
}

pub(super) fn write_package<W: Write + Seek>(deck: &Deck, writer: W) -> Result<W, Error> {
    let mut zip = ZipWriter::new(writer);

    let mut media = Vec::new();
    let mut slide_media = Vec::with_capacity(deck.len());
    for slide in deck.slides() {
        let mut names = Vec::new();
        for shape in &slide.shapes {
            if let Shape::Picture { picture, .. } = shape {
                let name = format!("image{}.{}", media.len() + 1, picture.format.extension());
                names.push(name.clone());
                media.push(MediaPart {
                    name,
                    data: &picture.data,
                });
            }
        }
        slide_media.push(names);
    }

    let mut put = |name: &str, body: &[u8], compression: Compression| -> Result<(), Error> {
        let method = match compression {
            Compression::Deflate => CompressionMethod::Deflated,
            Compression::Store => CompressionMethod::Stored,
        };
        zip.start_file(name, SimpleFileOptions::default().compression_method(method))?;
        zip.write_all(body)?;
        Ok(())
    };

    put("[Content_Types].xml", content_types_xml(deck.len())?.as_bytes(), XML)?;
    put("_rels/.rels", ROOT_RELS_XML.as_bytes(), XML)?;
    put("docProps/core.xml", CORE_PROPS_XML.as_bytes(), XML)?;
    put("docProps/app.xml", app_props_xml(deck.len())?.as_bytes(), XML)?;

    put("ppt/presentation.xml", presentation_xml(deck.len())?.as_bytes(), XML)?;
    put(
        "ppt/_rels/presentation.xml.rels",
        presentation_rels_xml(deck.len())?.as_bytes(),
        XML,
    )?;
    put("ppt/presProps.xml", PRES_PROPS_XML.as_bytes(), XML)?;
    put("ppt/viewProps.xml", VIEW_PROPS_XML.as_bytes(), XML)?;
    put("ppt/tableStyles.xml", TABLE_STYLES_XML.as_bytes(), XML)?;
    put("ppt/theme/theme1.xml", THEME_XML.as_bytes(), XML)?;

    put("ppt/slideMasters/slideMaster1.xml", SLIDE_MASTER_XML.as_bytes(), XML)?;
    put(
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        master_rels_xml()?.as_bytes(),
        XML,
    )?;
    for (layout, body) in Layout::ALL.iter().zip(SLIDE_LAYOUT_XML) {
        let n = layout.number();
        put(&format!("ppt/slideLayouts/slideLayout{n}.xml"), body.as_bytes(), XML)?;
        put(
            &format!("ppt/slideLayouts/_rels/slideLayout{n}.xml.rels"),
            LAYOUT_RELS_XML.as_bytes(),
            XML,
        )?;
    }

    for (index, (slide, names)) in deck.slides().iter().zip(&slide_media).enumerate() {
        let n = index + 1;
        put(&format!("ppt/slides/slide{n}.xml"), slide_xml(slide)?.as_bytes(), XML)?;
        put(
            &format!("ppt/slides/_rels/slide{n}.xml.rels"),
            slide_rels_xml(slide.layout, names)?.as_bytes(),
            XML,
        )?;
    }

    for part in &media {
        put(&format!("ppt/media/{}", part.name), part.data, Compression::Store)?;
    }

    Ok(zip.finish()?)
}

const ROOT_RELS_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>"#,
    r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#,
    r#"<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>"#,
    r#"</Relationships>"#,
);

const LAYOUT_RELS_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/>"#,
    r#"</Relationships>"#,
);

const CORE_PROPS_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
    r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
    r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
    r#"<dc:title>Presentation</dc:title><dc:creator>deckwright</dc:creator>"#,
    r#"</cp:coreProperties>"#,
);

fn content_types_xml(slides: usize) -> Result<String, Error> {
    let mut xml = String::with_capacity(2048);
    xml.push_str(XML_DECLARATION);
    xml.push_str(
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    );
    xml.push_str(
        r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    );
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
    for format in [PictureFormat::Png, PictureFormat::Jpeg, PictureFormat::Gif] {
        write!(
            xml,
            r#"<Default Extension="{}" ContentType="{}"/>"#,
            format.extension(),
            format.content_type()
        )?;
    }

    let mut overrides = vec![
        (
            "/ppt/presentation.xml".to_string(),
            "presentationml.presentation.main+xml",
        ),
        (
            "/ppt/slideMasters/slideMaster1.xml".to_string(),
            "presentationml.slideMaster+xml",
        ),
        ("/ppt/theme/theme1.xml".to_string(), "theme+xml"),
        ("/ppt/presProps.xml".to_string(), "presentationml.presProps+xml"),
        ("/ppt/viewProps.xml".to_string(), "presentationml.viewProps+xml"),
        ("/ppt/tableStyles.xml".to_string(), "presentationml.tableStyles+xml"),
        ("/docProps/app.xml".to_string(), "extended-properties+xml"),
    ];
    for layout in Layout::ALL {
        overrides.push((
            format!("/ppt/slideLayouts/slideLayout{}.xml", layout.number()),
            "presentationml.slideLayout+xml",
        ));
    }
    for n in 1..=slides {
        overrides.push((format!("/ppt/slides/slide{n}.xml"), "presentationml.slide+xml"));
    }

    for (part, content_type) in &overrides {
        write!(
            xml,
            r#"<Override PartName="{part}" ContentType="{CT_BASE}.{content_type}"/>"#
        )?;
    }
    xml.push_str(
        r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#,
    );
    xml.push_str("</Types>");
    Ok(xml)
}

fn presentation_xml(slides: usize) -> Result<String, Error> {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="{REL_BASE}" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" saveSubsetFonts="1">"#
    )?;
    xml.push_str(r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#);
    if slides > 0 {
        xml.push_str("<p:sldIdLst>");
        for index in 0..slides {
            write!(
                xml,
                r#"<p:sldId id="{}" r:id="rId{}"/>"#,
                FIRST_SLIDE_ID + index,
                FIRST_SLIDE_REL + index
            )?;
        }
        xml.push_str("</p:sldIdLst>");
    }
    write!(
        xml,
        r#"<p:sldSz cx="{SLIDE_WIDTH}" cy="{SLIDE_HEIGHT}" type="screen4x3"/>"#
    )?;
    xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
    xml.push_str("</p:presentation>");
    Ok(xml)
}

fn presentation_rels_xml(slides: usize) -> Result<String, Error> {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECLARATION);
    write!(xml, r#"<Relationships xmlns="{NS_RELATIONSHIPS}">"#)?;
    for (id, kind, target) in [
        (1, "slideMaster", "slideMasters/slideMaster1.xml"),
        (2, "theme", "theme/theme1.xml"),
        (3, "presProps", "presProps.xml"),
        (4, "viewProps", "viewProps.xml"),
        (5, "tableStyles", "tableStyles.xml"),
    ] {
        write!(
            xml,
            r#"<Relationship Id="rId{id}" Type="{REL_BASE}/{kind}" Target="{target}"/>"#
        )?;
    }
    for index in 0..slides {
        write!(
            xml,
            r#"<Relationship Id="rId{}" Type="{REL_BASE}/slide" Target="slides/slide{}.xml"/>"#,
            FIRST_SLIDE_REL + index,
            index + 1
        )?;
    }
    xml.push_str("</Relationships>");
    Ok(xml)
}

fn master_rels_xml() -> Result<String, Error> {
    let mut xml = String::with_capacity(768);
    xml.push_str(XML_DECLARATION);
    write!(xml, r#"<Relationships xmlns="{NS_RELATIONSHIPS}">"#)?;
    for layout in Layout::ALL {
        write!(
            xml,
            r#"<Relationship Id="rId{n}" Type="{REL_SLIDE_LAYOUT}" Target="../slideLayouts/slideLayout{n}.xml"/>"#,
            n = layout.number()
        )?;
    }
    write!(
        xml,
        r#"<Relationship Id="rId{}" Type="{REL_BASE}/theme" Target="../theme/theme1.xml"/>"#,
        Layout::ALL.len() + 1
    )?;
    xml.push_str("</Relationships>");
    Ok(xml)
}

fn app_props_xml(slides: usize) -> Result<String, Error> {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECLARATION);
    xml.push_str(
        r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties">"#,
    );
    xml.push_str("<Application>deckwright</Application>");
    write!(xml, "<Slides>{slides}</Slides>")?;
    xml.push_str("<PresentationFormat>On-screen Show (4:3)</PresentationFormat>");
    xml.push_str("</Properties>");
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{SlideImage, SlideTemplate};
    use crate::images::Picture;
    use crate::types::{SlideSpec, SlideType};
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    fn read_part(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
        let mut body = String::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_string(&mut body)
            .unwrap();
        body
    }

    fn sample_deck() -> Deck {
        let mut deck = Deck::new();
        let title = SlideSpec::new("Introduction to Rust", SlideType::Title);
        deck.push(SlideTemplate::Title.render(&title, None));

        let png = {
            let img = image::RgbImage::from_pixel(4, 3, image::Rgb([1, 2, 3]));
            let mut bytes = Vec::new();
            img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
                .unwrap();
            bytes
        };
        let history = SlideSpec::new("History", SlideType::History)
            .with_content("• 2010\n• 2015")
            .with_image(Some("old press"));
        let image = SlideImage {
            picture: Picture::from_bytes(png).unwrap(),
            description: "old press".to_string(),
        };
        deck.push(SlideTemplate::Content.render(&history, Some(image)));

        let pros = SlideSpec::new("Advantages", SlideType::Advantages).with_content("• Safe");
        deck.push(SlideTemplate::Comparison.render(&pros, None));
        deck
    }

    #[test]
    fn test_package_parts() {
        let bytes = sample_deck().write_to(Cursor::new(Vec::new())).unwrap().into_inner();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        for name in [
            "[Content_Types].xml",
            "_rels/.rels",
            "ppt/presentation.xml",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout3.xml",
            "ppt/theme/theme1.xml",
            "ppt/slides/slide3.xml",
            "ppt/media/image1.png",
        ] {
            assert!(archive.by_name(name).is_ok(), "missing {name}");
        }
        assert!(archive.by_name("ppt/slides/slide4.xml").is_err());

        let presentation = read_part(&mut archive, "ppt/presentation.xml");
        assert_eq!(presentation.matches("<p:sldId ").count(), 3);
        assert!(presentation.contains(r#"cx="9144000" cy="6858000""#));

        let types = read_part(&mut archive, "[Content_Types].xml");
        assert!(types.contains("/ppt/slides/slide3.xml"));

        let rels = read_part(&mut archive, "ppt/slides/_rels/slide2.xml.rels");
        assert!(rels.contains("../media/image1.png"));
        let rels = read_part(&mut archive, "ppt/slides/_rels/slide3.xml.rels");
        assert!(rels.contains("slideLayout2.xml"));
        assert!(!rels.contains("media"));
    }

    #[test]
    fn test_save_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.pptx");
        sample_deck().save(&path).unwrap();

        let archive = ZipArchive::new(std::fs::File::open(&path).unwrap()).unwrap();
        assert!(archive.len() > 10);
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("deck.pptx");
        let result = sample_deck().save(&path);
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
