//! XY scatter chart part (`ppt/charts/chartN.xml`).
//!
//! Only the chart shape the deck format needs is supported: one series drawn
//! as straight lines without markers, no legend, no chart title and a title on
//! each value axis. Series values are stored as literals, so the package needs
//! no embedded workbook.

use std::fmt::Write;

use super::units::points;
use super::xml::{escape_text, NS_A, NS_C, NS_R, XML_DECLARATION};

const X_AXIS_ID: u32 = 2_094_734_552;
const Y_AXIS_ID: u32 = 2_094_734_553;

#[derive(Debug, Clone, PartialEq)]
pub struct XyChart {
    pub series_name: String,
    pub points: Vec<(f64, f64)>,
    pub x_axis_title: String,
    pub y_axis_title: String,
}

impl XyChart {
    pub fn new(points: Vec<(f64, f64)>, x_axis_title: &str, y_axis_title: &str) -> Self {
        Self {
            series_name: String::new(),
            points,
            x_axis_title: x_axis_title.to_string(),
            y_axis_title: y_axis_title.to_string(),
        }
    }

    pub fn to_xml(&self) -> Result<String, std::fmt::Error> {
        let mut xml = String::with_capacity(2048 + self.points.len() * 96);

        xml.push_str(XML_DECLARATION);
        write!(
            xml,
            r#"<c:chartSpace xmlns:c="{}" xmlns:a="{}" xmlns:r="{}">"#,
            NS_C, NS_A, NS_R
        )?;
        xml.push_str(r#"<c:date1904 val="0"/><c:roundedCorners val="0"/>"#);
        xml.push_str("<c:chart>");
        xml.push_str(r#"<c:autoTitleDeleted val="1"/>"#);
        xml.push_str("<c:plotArea><c:layout/>");

        xml.push_str("<c:scatterChart>");
        xml.push_str(r#"<c:scatterStyle val="lineMarker"/><c:varyColors val="0"/>"#);
        self.write_series(&mut xml)?;
        write!(
            xml,
            r#"<c:axId val="{}"/><c:axId val="{}"/>"#,
            X_AXIS_ID, Y_AXIS_ID
        )?;
        xml.push_str("</c:scatterChart>");

        write_value_axis(&mut xml, X_AXIS_ID, Y_AXIS_ID, "b", &self.x_axis_title, false)?;
        write_value_axis(&mut xml, Y_AXIS_ID, X_AXIS_ID, "l", &self.y_axis_title, true)?;

        xml.push_str("</c:plotArea>");
        // No <c:legend>: the chart has a single unnamed series.
        xml.push_str(r#"<c:plotVisOnly val="1"/><c:dispBlanksAs val="gap"/>"#);
        xml.push_str("</c:chart>");
        xml.push_str("</c:chartSpace>");

        Ok(xml)
    }

    fn write_series(&self, xml: &mut String) -> std::fmt::Result {
        xml.push_str(r#"<c:ser><c:idx val="0"/><c:order val="0"/>"#);

        if !self.series_name.is_empty() {
            write!(
                xml,
                "<c:tx><c:v>{}</c:v></c:tx>",
                escape_text(&self.series_name)
            )?;
        }

        write!(
            xml,
            r#"<c:spPr><a:ln w="{}" cap="rnd"><a:solidFill><a:schemeClr val="accent1"/></a:solidFill><a:round/></a:ln></c:spPr>"#,
            points(2)
        )?;
        xml.push_str(r#"<c:marker><c:symbol val="none"/></c:marker>"#);

        write_number_literal(xml, "c:xVal", self.points.iter().map(|(x, _)| *x))?;
        write_number_literal(xml, "c:yVal", self.points.iter().map(|(_, y)| *y))?;

        xml.push_str(r#"<c:smooth val="0"/></c:ser>"#);
        Ok(())
    }
}

fn write_number_literal(
    xml: &mut String,
    tag: &str,
    values: impl ExactSizeIterator<Item = f64>,
) -> std::fmt::Result {
    write!(xml, "<{}><c:numLit>", tag)?;
    xml.push_str("<c:formatCode>General</c:formatCode>");
    write!(xml, r#"<c:ptCount val="{}"/>"#, values.len())?;
    for (i, value) in values.enumerate() {
        write!(xml, r#"<c:pt idx="{}"><c:v>{}</c:v></c:pt>"#, i, value)?;
    }
    write!(xml, "</c:numLit></{}>", tag)
}

fn write_value_axis(
    xml: &mut String,
    axis_id: u32,
    cross_axis_id: u32,
    position: &str,
    title: &str,
    gridlines: bool,
) -> std::fmt::Result {
    xml.push_str("<c:valAx>");
    write!(xml, r#"<c:axId val="{}"/>"#, axis_id)?;
    xml.push_str(r#"<c:scaling><c:orientation val="minMax"/></c:scaling>"#);
    xml.push_str(r#"<c:delete val="0"/>"#);
    write!(xml, r#"<c:axPos val="{}"/>"#, position)?;
    if gridlines {
        xml.push_str("<c:majorGridlines/>");
    }
    write_axis_title(xml, title)?;
    xml.push_str(r#"<c:numFmt formatCode="General" sourceLinked="1"/>"#);
    xml.push_str(r#"<c:majorTickMark val="out"/><c:minorTickMark val="none"/>"#);
    xml.push_str(r#"<c:tickLblPos val="nextTo"/>"#);
    write!(xml, r#"<c:crossAx val="{}"/>"#, cross_axis_id)?;
    xml.push_str(r#"<c:crosses val="autoZero"/><c:crossBetween val="midCat"/>"#);
    xml.push_str("</c:valAx>");
    Ok(())
}

fn write_axis_title(xml: &mut String, title: &str) -> std::fmt::Result {
    xml.push_str("<c:title><c:tx><c:rich><a:bodyPr/><a:lstStyle/><a:p>");
    if !title.is_empty() {
        write!(xml, "<a:r><a:rPr lang=\"en-US\"/><a:t>{}</a:t></a:r>", escape_text(title))?;
    }
    xml.push_str(r#"</a:p></c:rich></c:tx><c:overlay val="0"/></c:title>"#);
    Ok(())
}
