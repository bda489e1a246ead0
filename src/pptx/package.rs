//! OPC package assembly: content types, relationships and the zip container.

use std::collections::BTreeSet;
use std::fmt::Write as FmtWrite;
use std::io::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use zip::write::{SimpleFileOptions, ZipWriter};

use super::slide::{slide_xml, SlideRelationships};
use super::template;
use super::xml::{escape_text, NS_A, NS_P, NS_R, XML_DECLARATION};
use super::{ImageKind, Presentation, SlideLayout};
use crate::utils::error::{ReportError, Result};

const CT_PRESENTATION: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
const CT_SLIDE_MASTER: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
const CT_SLIDE_LAYOUT: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
const CT_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
const CT_PRES_PROPS: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presProps+xml";
const CT_VIEW_PROPS: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.viewProps+xml";
const CT_TABLE_STYLES: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.tableStyles+xml";
const CT_CHART: &str = "application/vnd.openxmlformats-officedocument.drawingml.chart+xml";
const CT_CORE_PROPS: &str = "application/vnd.openxmlformats-package.core-properties+xml";
const CT_APP_PROPS: &str = "application/vnd.openxmlformats-officedocument.extended-properties+xml";

/// Relationship ids `rId1..rId5` of presentation.xml are taken by the fixed parts.
const FIRST_SLIDE_REL: usize = 6;
const FIRST_SLIDE_ID: usize = 256;

/// A named part waiting to be written into the archive.
struct Part {
    name: String,
    content_type: Option<&'static str>,
    data: Vec<u8>,
}

impl Part {
    fn xml(name: impl Into<String>, content_type: &'static str, xml: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content_type: Some(content_type),
            data: xml.into().into_bytes(),
        }
    }

    /// Relationship parts and media are covered by `<Default>` entries.
    fn untyped(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: None,
            data,
        }
    }
}

fn fmt_err(e: std::fmt::Error) -> ReportError {
    ReportError::PackageError {
        message: format!("failed to format XML: {}", e),
    }
}

/// Serialize a presentation into `.pptx` bytes.
///
/// `created` is stamped into the core properties as both creation and modification time.
pub fn write_package(pres: &Presentation, created: DateTime<Utc>) -> Result<Vec<u8>> {
    let parts = collect_parts(pres, created)?;

    tracing::debug!("Creating PPTX package with {} parts", parts.len() + 1);

    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(content_types_xml(&parts).map_err(fmt_err)?.as_bytes())?;

    for part in &parts {
        zip.start_file(part.name.as_str(), options)?;
        zip.write_all(&part.data)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

fn collect_parts(pres: &Presentation, created: DateTime<Utc>) -> Result<Vec<Part>> {
    let mut parts = Vec::new();

    parts.push(Part::untyped("_rels/.rels", package_rels_xml().into_bytes()));
    parts.push(Part::xml(
        "docProps/core.xml",
        CT_CORE_PROPS,
        core_props_xml(pres.document_title(), created),
    ));
    parts.push(Part::xml(
        "docProps/app.xml",
        CT_APP_PROPS,
        app_props_xml(pres.slide_count()),
    ));

    parts.push(Part::xml(
        "ppt/presentation.xml",
        CT_PRESENTATION,
        presentation_xml(pres).map_err(fmt_err)?,
    ));
    parts.push(Part::untyped(
        "ppt/_rels/presentation.xml.rels",
        presentation_rels_xml(pres.slide_count())
            .map_err(fmt_err)?
            .into_bytes(),
    ));
    parts.push(Part::xml("ppt/presProps.xml", CT_PRES_PROPS, template::pres_props_xml()));
    parts.push(Part::xml("ppt/viewProps.xml", CT_VIEW_PROPS, template::view_props_xml()));
    parts.push(Part::xml("ppt/tableStyles.xml", CT_TABLE_STYLES, template::table_styles_xml()));
    parts.push(Part::xml("ppt/theme/theme1.xml", CT_THEME, template::theme_xml()));
    parts.push(Part::xml(
        "ppt/slideMasters/slideMaster1.xml",
        CT_SLIDE_MASTER,
        template::slide_master_xml(),
    ));
    parts.push(Part::untyped(
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        template::slide_master_rels_xml().as_bytes().to_vec(),
    ));

    for layout in SlideLayout::ALL {
        let n = layout.part_number();
        parts.push(Part::xml(
            format!("ppt/slideLayouts/slideLayout{}.xml", n),
            CT_SLIDE_LAYOUT,
            template::slide_layout_xml(layout),
        ));
        parts.push(Part::untyped(
            format!("ppt/slideLayouts/_rels/slideLayout{}.xml.rels", n),
            template::slide_layout_rels_xml().as_bytes().to_vec(),
        ));
    }

    // Media and charts are numbered across the whole deck, in slide order.
    let mut image_count = 0;
    let mut chart_count = 0;

    for (index, slide) in pres.slides().iter().enumerate() {
        let slide_number = index + 1;
        let mut rels = SlideRelationships {
            layout: format!("../slideLayouts/slideLayout{}.xml", slide.layout.part_number()),
            ..Default::default()
        };

        for image in slide.pictures() {
            image_count += 1;
            let name = format!("image{}.{}", image_count, image.kind.extension());
            rels.images.push(format!("../media/{}", name));
            parts.push(Part::untyped(format!("ppt/media/{}", name), image.data.clone()));
        }

        for chart in slide.charts() {
            chart_count += 1;
            rels.charts.push(format!("../charts/chart{}.xml", chart_count));
            parts.push(Part::xml(
                format!("ppt/charts/chart{}.xml", chart_count),
                CT_CHART,
                chart.to_xml().map_err(fmt_err)?,
            ));
        }

        let xml = slide_xml(slide, &rels).map_err(|_| ReportError::PackageError {
            message: format!("slide {} refers to media without a relationship", slide_number),
        })?;
        parts.push(Part::xml(
            format!("ppt/slides/slide{}.xml", slide_number),
            CT_SLIDE,
            xml,
        ));
        parts.push(Part::untyped(
            format!("ppt/slides/_rels/slide{}.xml.rels", slide_number),
            rels.to_xml(slide).map_err(fmt_err)?.into_bytes(),
        ));
    }

    Ok(parts)
}

fn content_types_xml(parts: &[Part]) -> std::result::Result<String, std::fmt::Error> {
    let mut xml = String::with_capacity(2048);
    xml.push_str(XML_DECLARATION);
    xml.push_str(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
    xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);

    let media: BTreeSet<(&str, &str)> = parts
        .iter()
        .filter(|part| part.name.starts_with("ppt/media/"))
        .filter_map(|part| part.name.rsplit_once('.').map(|(_, ext)| ext))
        .filter_map(image_kind_for_extension)
        .map(|kind| (kind.extension(), kind.content_type()))
        .collect();
    for (extension, content_type) in media {
        write!(
            xml,
            r#"<Default Extension="{}" ContentType="{}"/>"#,
            extension, content_type
        )?;
    }

    for part in parts {
        if let Some(content_type) = part.content_type {
            write!(
                xml,
                r#"<Override PartName="/{}" ContentType="{}"/>"#,
                part.name, content_type
            )?;
        }
    }

    xml.push_str("</Types>");
    Ok(xml)
}

fn image_kind_for_extension(extension: &str) -> Option<ImageKind> {
    [
        ImageKind::Png,
        ImageKind::Jpeg,
        ImageKind::Gif,
        ImageKind::Bmp,
        ImageKind::Tiff,
    ]
    .into_iter()
    .find(|kind| kind.extension() == extension)
}

fn package_rels_xml() -> String {
    let mut xml = String::from(XML_DECLARATION);
    xml.push_str(r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#);
    xml.push_str(r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>"#);
    xml.push_str(r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#);
    xml.push_str(r#"<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>"#);
    xml.push_str("</Relationships>");
    xml
}

fn presentation_xml(pres: &Presentation) -> std::result::Result<String, std::fmt::Error> {
    let mut xml = String::with_capacity(1024);

    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" saveSubsetFonts="1">"#,
        NS_A, NS_R, NS_P
    )?;
    xml.push_str(r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#);

    if pres.slide_count() > 0 {
        xml.push_str("<p:sldIdLst>");
        for index in 0..pres.slide_count() {
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
        r#"<p:sldSz cx="{}" cy="{}" type="screen4x3"/>"#,
        pres.slide_width(),
        pres.slide_height()
    )?;
    xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
    xml.push_str("</p:presentation>");

    Ok(xml)
}

fn presentation_rels_xml(slide_count: usize) -> std::result::Result<String, std::fmt::Error> {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECLARATION);
    xml.push_str(r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#);

    let fixed = [
        ("slideMaster", "slideMasters/slideMaster1.xml"),
        ("presProps", "presProps.xml"),
        ("viewProps", "viewProps.xml"),
        ("theme", "theme/theme1.xml"),
        ("tableStyles", "tableStyles.xml"),
    ];
    for (i, (kind, target)) in fixed.iter().enumerate() {
        write!(
            xml,
            r#"<Relationship Id="rId{}" Type="{}/{}" Target="{}"/>"#,
            i + 1,
            NS_R,
            kind,
            target
        )?;
    }

    for index in 0..slide_count {
        write!(
            xml,
            r#"<Relationship Id="rId{}" Type="{}/slide" Target="slides/slide{}.xml"/>"#,
            FIRST_SLIDE_REL + index,
            NS_R,
            index + 1
        )?;
    }

    xml.push_str("</Relationships>");
    Ok(xml)
}

fn core_props_xml(title: Option<&str>, created: DateTime<Utc>) -> String {
    let timestamp = created.to_rfc3339_opts(SecondsFormat::Secs, true);
    let mut xml = String::from(XML_DECLARATION);
    xml.push_str(concat!(
        r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
        r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
        r#"xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#
    ));
    if let Some(title) = title {
        xml.push_str("<dc:title>");
        xml.push_str(&escape_text(title));
        xml.push_str("</dc:title>");
    }
    xml.push_str("<dc:creator>deckgen</dc:creator>");
    xml.push_str(r#"<dcterms:created xsi:type="dcterms:W3CDTF">"#);
    xml.push_str(&timestamp);
    xml.push_str("</dcterms:created>");
    xml.push_str(r#"<dcterms:modified xsi:type="dcterms:W3CDTF">"#);
    xml.push_str(&timestamp);
    xml.push_str("</dcterms:modified>");
    xml.push_str("</cp:coreProperties>");
    xml
}

fn app_props_xml(slide_count: usize) -> String {
    format!(
        concat!(
            "{}",
            r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" "#,
            r#"xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#,
            "<Application>deckgen</Application><Slides>{}</Slides>",
            "</Properties>"
        ),
        XML_DECLARATION, slide_count
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pptx::units::inches;
    use crate::pptx::{EmbeddedImage, Paragraph, Rect, Shape, XyChart};
    use chrono::TimeZone;
    use std::io::Read;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
    }

    fn read_part(archive: &mut zip::ZipArchive<std::io::Cursor<Vec<u8>>>, name: &str) -> String {
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    fn sample_presentation() -> Presentation {
        let mut pres = Presentation::new();
        pres.add_slide(SlideLayout::TitleSlide, "Report")
            .add_shape(Shape::Subtitle(Paragraph::lines("Subtitle")));
        pres.add_slide(SlideLayout::TitleOnly, "Picture").add_shape(Shape::Picture {
            frame: Rect::new(inches(1), inches(2), inches(8), inches(3)),
            image: EmbeddedImage {
                data: vec![0x89, b'P', b'N', b'G'],
                kind: ImageKind::Png,
                name: "a.png".to_string(),
            },
        });
        pres.add_slide(SlideLayout::TitleOnly, "Plot").add_shape(Shape::Chart {
            frame: Rect::new(inches(1), inches(2), inches(6), inches(4)),
            chart: XyChart::new(vec![(1.0, 2.0)], "x", "y"),
        });
        pres
    }

    #[test]
    fn test_package_contains_all_parts() {
        let bytes = write_package(&sample_presentation(), fixed_time()).unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();

        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();

        assert_eq!(names[0], "[Content_Types].xml");
        for expected in [
            "_rels/.rels",
            "ppt/presentation.xml",
            "ppt/slides/slide1.xml",
            "ppt/slides/slide3.xml",
            "ppt/slides/_rels/slide2.xml.rels",
            "ppt/media/image1.png",
            "ppt/charts/chart1.xml",
            "ppt/slideLayouts/slideLayout3.xml",
            "ppt/theme/theme1.xml",
        ] {
            assert!(names.iter().any(|n| n == expected), "missing {}", expected);
        }
    }

    #[test]
    fn test_noncharacters_never_reach_the_package() {
        let mut pres = Presentation::new();
        pres.add_slide(SlideLayout::TitleOnly, "bad\u{FFFF}title");

        let bytes = write_package(&pres, fixed_time()).unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();

        let slide = read_part(&mut archive, "ppt/slides/slide1.xml");
        assert!(!slide.contains('\u{FFFF}'));
        assert!(slide.contains("<a:t>badtitle</a:t>"));
        assert!(!read_part(&mut archive, "docProps/core.xml").contains('\u{FFFF}'));
    }

    #[test]
    fn test_content_types_register_media_and_charts() {
        let bytes = write_package(&sample_presentation(), fixed_time()).unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        let content_types = read_part(&mut archive, "[Content_Types].xml");

        assert!(content_types.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));
        assert!(!content_types.contains(r#"Extension="jpeg""#));
        assert!(content_types.contains(r#"<Override PartName="/ppt/charts/chart1.xml""#));
        assert_eq!(content_types.matches(CT_SLIDE).count(), 3);
    }

    #[test]
    fn test_presentation_lists_slides_in_order() {
        let bytes = write_package(&sample_presentation(), fixed_time()).unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();

        let presentation = read_part(&mut archive, "ppt/presentation.xml");
        assert!(presentation.contains(r#"<p:sldId id="256" r:id="rId6"/><p:sldId id="257" r:id="rId7"/><p:sldId id="258" r:id="rId8"/>"#));
        assert!(presentation.contains(r#"<p:sldSz cx="9144000" cy="6858000""#));

        let rels = read_part(&mut archive, "ppt/_rels/presentation.xml.rels");
        assert!(rels.contains(r#"Id="rId8" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide3.xml""#));
    }

    #[test]
    fn test_core_properties() {
        let bytes = write_package(&sample_presentation(), fixed_time()).unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        let core = read_part(&mut archive, "docProps/core.xml");

        assert!(core.contains("<dc:title>Report</dc:title>"));
        assert!(core.contains(">2024-05-01T12:30:00Z</dcterms:created>"));
    }

    #[test]
    fn test_empty_presentation_is_still_a_package() {
        let bytes = write_package(&Presentation::new(), fixed_time()).unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();

        let presentation = read_part(&mut archive, "ppt/presentation.xml");
        assert!(!presentation.contains("<p:sldIdLst>"));
        assert!(archive.by_name("ppt/slides/slide1.xml").is_err());
    }
}
