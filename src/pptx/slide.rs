//! Slide part (`ppt/slides/slideN.xml`) and its relationships.

use std::fmt::Write;

use super::xml::{escape_text, write_paragraphs, NS_A, NS_C, NS_P, NS_R, XML_DECLARATION};
use super::{Paragraph, Rect, Shape, Slide};

/// Relationship targets of one slide, in the order the slide XML refers to them.
///
/// `rId1` is always the slide layout; pictures and charts follow in shape order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideRelationships {
    pub layout: String,
    pub images: Vec<String>,
    pub charts: Vec<String>,
}

impl SlideRelationships {
    /// `(relationship id, relationship kind, target)` for each picture and chart, in shape order.
    fn entries<'a>(&'a self, slide: &Slide) -> Vec<(String, &'static str, &'a str)> {
        let mut images = self.images.iter();
        let mut charts = self.charts.iter();
        slide
            .shapes
            .iter()
            .filter_map(|shape| match shape {
                Shape::Picture { .. } => images.next().map(|t| ("image", t.as_str())),
                Shape::Chart { .. } => charts.next().map(|t| ("chart", t.as_str())),
                _ => None,
            })
            .enumerate()
            .map(|(i, (kind, target))| (format!("rId{}", i + 2), kind, target))
            .collect()
    }

    pub fn to_xml(&self, slide: &Slide) -> Result<String, std::fmt::Error> {
        let mut xml = String::with_capacity(512);
        xml.push_str(XML_DECLARATION);
        xml.push_str(
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );
        write!(
            xml,
            r#"<Relationship Id="rId1" Type="{}/slideLayout" Target="{}"/>"#,
            NS_R, self.layout
        )?;

        for (rel_id, kind, target) in self.entries(slide) {
            write!(
                xml,
                r#"<Relationship Id="{}" Type="{}/{}" Target="{}"/>"#,
                rel_id, NS_R, kind, target
            )?;
        }

        xml.push_str("</Relationships>");
        Ok(xml)
    }
}

pub fn slide_xml(slide: &Slide, rels: &SlideRelationships) -> Result<String, std::fmt::Error> {
    let mut xml = String::with_capacity(2048);

    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
        NS_A, NS_R, NS_P
    )?;
    xml.push_str("<p:cSld><p:spTree>");
    xml.push_str(r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#);
    xml.push_str(
        r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#,
    );

    // IDs: 1=group, 2=title, 3+=other shapes
    write_placeholder(
        &mut xml,
        2,
        "Title 1",
        &format!(r#"type="{}""#, slide.layout.title_placeholder()),
        &Paragraph::lines(&slide.title),
    )?;

    let mut rel_ids = rels.entries(slide).into_iter().map(|(rel_id, _, _)| rel_id);
    for (i, shape) in slide.shapes.iter().enumerate() {
        let id = i as u32 + 3;
        match shape {
            Shape::Subtitle(paragraphs) => write_placeholder(
                &mut xml,
                id,
                &format!("Subtitle {}", id - 1),
                r#"type="subTitle" idx="1""#,
                paragraphs,
            )?,
            Shape::Body(paragraphs) => write_placeholder(
                &mut xml,
                id,
                &format!("Content Placeholder {}", id - 1),
                r#"idx="1""#,
                paragraphs,
            )?,
            Shape::TextBox { frame, paragraphs } => {
                write_text_box(&mut xml, id, frame, paragraphs)?
            }
            Shape::Picture { frame, image } => {
                let rel_id = rel_ids.next().ok_or(std::fmt::Error)?;
                write_picture(&mut xml, id, frame, &image.name, &rel_id)?
            }
            Shape::Chart { frame, .. } => {
                let rel_id = rel_ids.next().ok_or(std::fmt::Error)?;
                write_chart_frame(&mut xml, id, frame, &rel_id)?
            }
        }
    }

    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sld>");

    Ok(xml)
}

fn write_xfrm(xml: &mut String, tag: &str, frame: &Rect) -> std::fmt::Result {
    write!(
        xml,
        r#"<{tag}><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></{tag}>"#,
        frame.x,
        frame.y,
        frame.cx,
        frame.cy,
        tag = tag
    )
}

fn write_placeholder(
    xml: &mut String,
    id: u32,
    name: &str,
    ph_attrs: &str,
    paragraphs: &[Paragraph],
) -> std::fmt::Result {
    write!(
        xml,
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="{}"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph {}/></p:nvPr></p:nvSpPr>"#,
        id,
        escape_text(name),
        ph_attrs
    )?;
    xml.push_str("<p:spPr/>");
    xml.push_str("<p:txBody><a:bodyPr/><a:lstStyle/>");
    write_paragraphs(xml, paragraphs)?;
    xml.push_str("</p:txBody></p:sp>");
    Ok(())
}

fn write_text_box(
    xml: &mut String,
    id: u32,
    frame: &Rect,
    paragraphs: &[Paragraph],
) -> std::fmt::Result {
    write!(
        xml,
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="TextBox {}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>"#,
        id,
        id - 1
    )?;
    xml.push_str("<p:spPr>");
    write_xfrm(xml, "a:xfrm", frame)?;
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>"#);
    xml.push_str(r#"<p:txBody><a:bodyPr wrap="none"><a:spAutoFit/></a:bodyPr><a:lstStyle/>"#);
    write_paragraphs(xml, paragraphs)?;
    xml.push_str("</p:txBody></p:sp>");
    Ok(())
}

fn write_picture(
    xml: &mut String,
    id: u32,
    frame: &Rect,
    description: &str,
    rel_id: &str,
) -> std::fmt::Result {
    write!(
        xml,
        r#"<p:pic><p:nvPicPr><p:cNvPr id="{}" name="Picture {}" descr="{}"/><p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr>"#,
        id,
        id - 1,
        escape_text(description)
    )?;
    write!(
        xml,
        r#"<p:blipFill><a:blip r:embed="{}"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>"#,
        rel_id
    )?;
    xml.push_str("<p:spPr>");
    write_xfrm(xml, "a:xfrm", frame)?;
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr></p:pic>"#);
    Ok(())
}

fn write_chart_frame(xml: &mut String, id: u32, frame: &Rect, rel_id: &str) -> std::fmt::Result {
    write!(
        xml,
        r#"<p:graphicFrame><p:nvGraphicFramePr><p:cNvPr id="{}" name="Chart {}"/><p:cNvGraphicFramePr><a:graphicFrameLocks noGrp="1"/></p:cNvGraphicFramePr><p:nvPr/></p:nvGraphicFramePr>"#,
        id,
        id - 1
    )?;
    write_xfrm(xml, "p:xfrm", frame)?;
    write!(
        xml,
        r#"<a:graphic><a:graphicData uri="{ns}"><c:chart xmlns:c="{ns}" r:id="{}"/></a:graphicData></a:graphic>"#,
        rel_id,
        ns = NS_C
    )?;
    xml.push_str("</p:graphicFrame>");
    Ok(())
}
