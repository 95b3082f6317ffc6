//! PPTX generation from an in-memory deck.
//!
//! This module serializes a [`Presentation`] into an OOXML package.

use std::io::{Cursor, Seek, Write};

use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::constants::*;
use crate::error::Result;
use crate::layout::{PlaceholderInfo, SlideLayout};
use crate::presentation::Presentation;
use crate::slide::{check_text, Frame, Shape, Slide, TextFrame};

/// PPTX package writer
pub struct PptxWriter<'a> {
    /// Deck being written
    deck: &'a Presentation,

    /// Media part names per slide, in shape order (e.g. "image3.png")
    media_names: Vec<Vec<String>>,
}

impl<'a> PptxWriter<'a> {
    /// Create a writer for a deck
    pub fn new(deck: &'a Presentation) -> Self {
        let mut counter = 0;
        let media_names = deck
            .slides()
            .iter()
            .map(|slide| {
                slide
                    .pictures()
                    .map(|(_, image)| {
                        counter += 1;
                        format!("image{}.{}", counter, image.extension())
                    })
                    .collect()
            })
            .collect();

        Self { deck, media_names }
    }

    /// Generate the PPTX as bytes
    pub fn generate(&self) -> Result<Vec<u8>> {
        let meta = self.deck.meta();
        for value in [meta.title.as_deref(), meta.author.as_deref(), Some(meta.locale.as_str())]
            .into_iter()
            .flatten()
        {
            check_text(value)?;
        }

        let cursor = Cursor::new(Vec::new());
        let mut zip = ZipWriter::new(cursor);

        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        self.write_content_types(&mut zip, options)?;
        self.write_root_rels(&mut zip, options)?;
        self.write_app_xml(&mut zip, options)?;
        self.write_core_xml(&mut zip, options)?;
        self.write_presentation_xml(&mut zip, options)?;
        self.write_presentation_rels(&mut zip, options)?;
        self.write_pres_props(&mut zip, options)?;
        self.write_theme(&mut zip, options)?;
        self.write_slide_master(&mut zip, options)?;

        for layout in SlideLayout::ALL {
            self.write_slide_layout(&mut zip, options, layout)?;
        }

        for (i, slide) in self.deck.slides().iter().enumerate() {
            self.write_slide(&mut zip, options, i, slide)?;
        }

        // Media parts, named consistently with the slide relationships
        for (slide, names) in self.deck.slides().iter().zip(&self.media_names) {
            for ((_, image), name) in slide.pictures().zip(names) {
                zip.start_file(format!("ppt/media/{}", name), options)?;
                zip.write_all(image.data())?;
            }
        }

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }

    /// Write [Content_Types].xml
    fn write_content_types<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
    ) -> Result<()> {
        zip.start_file("[Content_Types].xml", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Default Extension="png" ContentType="image/png"/>
  <Default Extension="jpeg" ContentType="image/jpeg"/>
  <Default Extension="gif" ContentType="image/gif"/>
  <Default Extension="bmp" ContentType="image/bmp"/>
  <Default Extension="tiff" ContentType="image/tiff"/>
  <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
  <Override PartName="/ppt/presProps.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presProps+xml"/>
  <Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>
  <Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>
  <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
  <Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
"#,
        );

        for layout in SlideLayout::ALL {
            content.push_str(&format!(
                "  <Override PartName=\"/ppt/slideLayouts/slideLayout{}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml\"/>\n",
                layout.index()
            ));
        }

        for i in 1..=self.deck.len() {
            content.push_str(&format!(
                "  <Override PartName=\"/ppt/slides/slide{}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slide+xml\"/>\n",
                i
            ));
        }

        content.push_str("</Types>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Write _rels/.rels
    fn write_root_rels<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
    ) -> Result<()> {
        zip.start_file("_rels/.rels", options)?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Write docProps/app.xml
    fn write_app_xml<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
    ) -> Result<()> {
        zip.start_file("docProps/app.xml", options)?;

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
  <TotalTime>0</TotalTime>
  <Application>slidegen</Application>
  <PresentationFormat>On-screen Show (4:3)</PresentationFormat>
  <Slides>{}</Slides>
  <Notes>0</Notes>
  <HiddenSlides>0</HiddenSlides>
  <ScaleCrop>false</ScaleCrop>
  <LinksUpToDate>false</LinksUpToDate>
  <SharedDoc>false</SharedDoc>
  <HyperlinksChanged>false</HyperlinksChanged>
  <AppVersion>1.0</AppVersion>
</Properties>"#,
            self.deck.len()
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Write docProps/core.xml
    fn write_core_xml<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
    ) -> Result<()> {
        zip.start_file("docProps/core.xml", options)?;

        let meta = self.deck.meta();
        let title = meta.title.as_deref().unwrap_or("Presentation");
        let author = meta.author.as_deref().unwrap_or("slidegen");
        let now = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <dc:title>{}</dc:title>
  <dc:creator>{}</dc:creator>
  <cp:lastModifiedBy>{}</cp:lastModifiedBy>
  <dc:language>{}</dc:language>
  <dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>
  <dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>
</cp:coreProperties>"#,
            escape(title),
            escape(author),
            escape(author),
            escape(meta.locale.as_str()),
            now,
            now
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Write ppt/presentation.xml
    fn write_presentation_xml<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
    ) -> Result<()> {
        zip.start_file("ppt/presentation.xml", options)?;

        let (width, height) = self.deck.slide_size();

        let mut slide_refs = String::new();
        for i in 1..=self.deck.len() {
            slide_refs.push_str(&format!(
                "    <p:sldId id=\"{}\" r:id=\"rId{}\"/>\n",
                255 + i,
                i + 3 // rId1=slideMaster, rId2=presProps, rId3=theme, rId4+=slides
            ));
        }

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" saveSubsetFonts="1">
  <p:sldMasterIdLst>
    <p:sldMasterId id="2147483648" r:id="rId1"/>
  </p:sldMasterIdLst>
  <p:sldIdLst>
{}  </p:sldIdLst>
  <p:sldSz cx="{}" cy="{}"/>
  <p:notesSz cx="{}" cy="{}"/>
</p:presentation>"#,
            NS_DRAWING,
            NS_RELATIONSHIPS,
            NS_PRESENTATION,
            slide_refs,
            width,
            height,
            height, // Notes are rotated
            width
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Write ppt/_rels/presentation.xml.rels
    fn write_presentation_rels<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
    ) -> Result<()> {
        zip.start_file("ppt/_rels/presentation.xml.rels", options)?;

        let mut rels = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/presProps" Target="presProps.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>
"#,
        );

        for i in 1..=self.deck.len() {
            rels.push_str(&format!(
                "  <Relationship Id=\"rId{}\" Type=\"{}\" Target=\"slides/slide{}.xml\"/>\n",
                i + 3,
                REL_TYPE_SLIDE,
                i
            ));
        }

        rels.push_str("</Relationships>");

        zip.write_all(rels.as_bytes())?;
        Ok(())
    }

    /// Write ppt/presProps.xml
    fn write_pres_props<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
    ) -> Result<()> {
        zip.start_file("ppt/presProps.xml", options)?;

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentationPr xmlns:a="{}" xmlns:r="{}" xmlns:p="{}"/>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Write ppt/theme/theme1.xml
    fn write_theme<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
    ) -> Result<()> {
        zip.start_file("ppt/theme/theme1.xml", options)?;

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="{}" name="slidegen">
  <a:themeElements>
    <a:clrScheme name="Office">
      <a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>
      <a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>
      <a:dk2><a:srgbClr val="44546A"/></a:dk2>
      <a:lt2><a:srgbClr val="E7E6E6"/></a:lt2>
      <a:accent1><a:srgbClr val="4472C4"/></a:accent1>
      <a:accent2><a:srgbClr val="ED7D31"/></a:accent2>
      <a:accent3><a:srgbClr val="A5A5A5"/></a:accent3>
      <a:accent4><a:srgbClr val="FFC000"/></a:accent4>
      <a:accent5><a:srgbClr val="5B9BD5"/></a:accent5>
      <a:accent6><a:srgbClr val="70AD47"/></a:accent6>
      <a:hlink><a:srgbClr val="0563C1"/></a:hlink>
      <a:folHlink><a:srgbClr val="954F72"/></a:folHlink>
    </a:clrScheme>
    <a:fontScheme name="Office">
      <a:majorFont>
        <a:latin typeface="Calibri Light"/>
        <a:ea typeface=""/>
        <a:cs typeface=""/>
      </a:majorFont>
      <a:minorFont>
        <a:latin typeface="Calibri"/>
        <a:ea typeface=""/>
        <a:cs typeface=""/>
      </a:minorFont>
    </a:fontScheme>
    <a:fmtScheme name="Office">
      <a:fillStyleLst>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
      </a:fillStyleLst>
      <a:lnStyleLst>
        <a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
        <a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
        <a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
      </a:lnStyleLst>
      <a:effectStyleLst>
        <a:effectStyle><a:effectLst/></a:effectStyle>
        <a:effectStyle><a:effectLst/></a:effectStyle>
        <a:effectStyle><a:effectLst/></a:effectStyle>
      </a:effectStyleLst>
      <a:bgFillStyleLst>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
      </a:bgFillStyleLst>
    </a:fmtScheme>
  </a:themeElements>
</a:theme>"#,
            NS_DRAWING
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Write ppt/slideMasters/slideMaster1.xml
    fn write_slide_master<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
    ) -> Result<()> {
        zip.start_file("ppt/slideMasters/slideMaster1.xml", options)?;

        let mut layout_ids = String::new();
        let mut layout_rels = String::new();
        for layout in SlideLayout::ALL {
            let index = layout.index();
            layout_ids.push_str(&format!(
                "    <p:sldLayoutId id=\"{}\" r:id=\"rId{}\"/>\n",
                2_147_483_648u64 + index as u64,
                index
            ));
            layout_rels.push_str(&format!(
                "  <Relationship Id=\"rId{}\" Type=\"{}\" Target=\"../slideLayouts/slideLayout{}.xml\"/>\n",
                index, REL_TYPE_SLIDE_LAYOUT, index
            ));
        }

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">
  <p:cSld>
    <p:bg>
      <p:bgRef idx="1001">
        <a:schemeClr val="bg1"/>
      </p:bgRef>
    </p:bg>
    <p:spTree>
      <p:nvGrpSpPr>
        <p:cNvPr id="1" name=""/>
        <p:cNvGrpSpPr/>
        <p:nvPr/>
      </p:nvGrpSpPr>
      <p:grpSpPr/>
    </p:spTree>
  </p:cSld>
  <p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>
  <p:sldLayoutIdLst>
{}  </p:sldLayoutIdLst>
</p:sldMaster>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION, layout_ids
        );

        zip.write_all(content.as_bytes())?;

        zip.start_file("ppt/slideMasters/_rels/slideMaster1.xml.rels", options)?;

        let rels = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
{}  <Relationship Id="rId{}" Type="{}" Target="../theme/theme1.xml"/>
</Relationships>"#,
            NS_PACKAGE_RELATIONSHIPS,
            layout_rels,
            SlideLayout::ALL.len() + 1,
            REL_TYPE_THEME
        );

        zip.write_all(rels.as_bytes())?;
        Ok(())
    }

    /// Write ppt/slideLayouts/slideLayoutN.xml and its relationships
    fn write_slide_layout<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
        layout: SlideLayout,
    ) -> Result<()> {
        zip.start_file(
            format!("ppt/slideLayouts/slideLayout{}.xml", layout.index()),
            options,
        )?;

        let mut shapes = String::new();
        for placeholder in layout.placeholders() {
            shapes.push_str(&placeholder_shape_xml(
                placeholder,
                Some(placeholder.position_frame()),
                &self.deck.meta().locale,
                None,
            ));
        }

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" type="{}" preserve="1">
  <p:cSld name="{}">
    <p:spTree>
      <p:nvGrpSpPr>
        <p:cNvPr id="1" name=""/>
        <p:cNvGrpSpPr/>
        <p:nvPr/>
      </p:nvGrpSpPr>
      <p:grpSpPr/>
{}    </p:spTree>
  </p:cSld>
  <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sldLayout>"#,
            NS_DRAWING,
            NS_RELATIONSHIPS,
            NS_PRESENTATION,
            layout.ooxml_type(),
            layout.name(),
            shapes
        );

        zip.write_all(content.as_bytes())?;

        zip.start_file(
            format!("ppt/slideLayouts/_rels/slideLayout{}.xml.rels", layout.index()),
            options,
        )?;
        let rels = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
  <Relationship Id="rId1" Type="{}" Target="../slideMasters/slideMaster1.xml"/>
</Relationships>"#,
            NS_PACKAGE_RELATIONSHIPS, REL_TYPE_SLIDE_MASTER
        );
        zip.write_all(rels.as_bytes())?;

        Ok(())
    }

    /// Write a single slide and its relationships
    fn write_slide<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
        position: usize,
        slide: &Slide,
    ) -> Result<()> {
        let slide_num = position + 1;
        zip.start_file(format!("ppt/slides/slide{}.xml", slide_num), options)?;

        let content = self.generate_slide_xml(slide);
        zip.write_all(content.as_bytes())?;

        zip.start_file(
            format!("ppt/slides/_rels/slide{}.xml.rels", slide_num),
            options,
        )?;

        let mut rels = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
  <Relationship Id="rId1" Type="{}" Target="../slideLayouts/slideLayout{}.xml"/>
"#,
            NS_PACKAGE_RELATIONSHIPS,
            REL_TYPE_SLIDE_LAYOUT,
            slide.layout().index()
        );

        // rId2+ are the pictures, in shape order
        for (i, name) in self.media_names[position].iter().enumerate() {
            rels.push_str(&format!(
                "  <Relationship Id=\"rId{}\" Type=\"{}\" Target=\"../media/{}\"/>\n",
                i + 2,
                REL_TYPE_IMAGE,
                name
            ));
        }

        rels.push_str("</Relationships>");

        zip.write_all(rels.as_bytes())?;
        Ok(())
    }

    /// Generate slide XML content
    fn generate_slide_xml(&self, slide: &Slide) -> String {
        let locale = &self.deck.meta().locale;
        let layout = slide.layout();
        let mut shapes = String::new();

        if let Some(title) = slide.title() {
            shapes.push_str(&placeholder_shape_xml(
                layout.title_placeholder(),
                None,
                locale,
                Some(&TextFrame::from_lines(title)),
            ));
        }

        if let (Some(body), Some(placeholder)) = (slide.body(), layout.placeholder(1)) {
            if !body.is_empty() {
                shapes.push_str(&placeholder_shape_xml(placeholder, None, locale, Some(body)));
            }
        }

        // Free shapes get ids after the two placeholder ids
        let mut shape_id = 4;
        let mut picture_rel = 2;
        for shape in slide.shapes() {
            match shape {
                Shape::TextBox { frame, text } => {
                    shapes.push_str(&textbox_xml(shape_id, frame, text, locale));
                }
                Shape::Picture { frame, .. } => {
                    shapes.push_str(&picture_xml(shape_id, frame, picture_rel));
                    picture_rel += 1;
                }
            }
            shape_id += 1;
        }

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">
  <p:cSld>
    <p:spTree>
      <p:nvGrpSpPr>
        <p:cNvPr id="1" name=""/>
        <p:cNvGrpSpPr/>
        <p:nvPr/>
      </p:nvGrpSpPr>
      <p:grpSpPr/>
{}    </p:spTree>
  </p:cSld>
  <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sld>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION, shapes
        )
    }
}

impl PlaceholderInfo {
    fn position_frame(&self) -> Frame {
        Frame::new(self.position.0, self.position.1, self.size.0, self.size.1)
    }
}

/// Placeholder `p:sp`; layouts pass an explicit frame, slides inherit it
fn placeholder_shape_xml(
    placeholder: &PlaceholderInfo,
    frame: Option<Frame>,
    locale: &str,
    text: Option<&TextFrame>,
) -> String {
    let id = placeholder.index + 2;
    let kind = placeholder.placeholder_type;

    let ph = match (kind.ooxml_type(), placeholder.index) {
        (Some(ph_type), 0) => format!("<p:ph type=\"{}\"/>", ph_type),
        (Some(ph_type), idx) => format!("<p:ph type=\"{}\" idx=\"{}\"/>", ph_type, idx),
        (None, idx) => format!("<p:ph idx=\"{}\"/>", idx),
    };

    let sp_pr = match frame {
        Some(frame) => format!("<p:spPr>\n{}        </p:spPr>", xfrm_xml(&frame)),
        None => "<p:spPr/>".to_string(),
    };

    let paragraphs = match text {
        Some(text) => paragraphs_xml(text, locale),
        None => empty_paragraph_xml(locale),
    };

    format!(
        r#"      <p:sp>
        <p:nvSpPr>
          <p:cNvPr id="{}" name="{} {}"/>
          <p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>
          <p:nvPr>{}</p:nvPr>
        </p:nvSpPr>
        {}
        <p:txBody>
          <a:bodyPr/>
          <a:lstStyle/>
{}        </p:txBody>
      </p:sp>
"#,
        id,
        kind.display_name(),
        id - 1,
        ph,
        sp_pr,
        paragraphs
    )
}

/// Free-standing text box
fn textbox_xml(id: u32, frame: &Frame, text: &TextFrame, locale: &str) -> String {
    format!(
        r#"      <p:sp>
        <p:nvSpPr>
          <p:cNvPr id="{}" name="TextBox {}"/>
          <p:cNvSpPr txBox="1"/>
          <p:nvPr/>
        </p:nvSpPr>
        <p:spPr>
{}          <a:prstGeom prst="rect"><a:avLst/></a:prstGeom>
          <a:noFill/>
        </p:spPr>
        <p:txBody>
          <a:bodyPr wrap="none"><a:spAutoFit/></a:bodyPr>
          <a:lstStyle/>
{}        </p:txBody>
      </p:sp>
"#,
        id,
        id - 1,
        xfrm_xml(frame),
        paragraphs_xml(text, locale)
    )
}

/// Picture referencing a media relationship of the slide
fn picture_xml(id: u32, frame: &Frame, rel_num: usize) -> String {
    format!(
        r#"      <p:pic>
        <p:nvPicPr>
          <p:cNvPr id="{}" name="Picture {}"/>
          <p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr>
          <p:nvPr/>
        </p:nvPicPr>
        <p:blipFill>
          <a:blip r:embed="rId{}"/>
          <a:stretch><a:fillRect/></a:stretch>
        </p:blipFill>
        <p:spPr>
{}          <a:prstGeom prst="rect"><a:avLst/></a:prstGeom>
        </p:spPr>
      </p:pic>
"#,
        id,
        id - 1,
        rel_num,
        xfrm_xml(frame)
    )
}

fn xfrm_xml(frame: &Frame) -> String {
    format!(
        "          <a:xfrm>\n            <a:off x=\"{}\" y=\"{}\"/>\n            <a:ext cx=\"{}\" cy=\"{}\"/>\n          </a:xfrm>\n",
        frame.left, frame.top, frame.width, frame.height
    )
}

/// Paragraphs of a text frame; an empty frame still needs one `a:p`
fn paragraphs_xml(text: &TextFrame, locale: &str) -> String {
    if text.is_empty() {
        return empty_paragraph_xml(locale);
    }

    let mut result = String::new();
    for paragraph in text.paragraphs() {
        let ppr = if paragraph.level > 0 {
            format!("            <a:pPr lvl=\"{}\"/>\n", paragraph.level)
        } else {
            String::new()
        };

        if paragraph.text.is_empty() {
            result.push_str(&format!(
                "          <a:p>\n{}            <a:endParaRPr lang=\"{}\"/>\n          </a:p>\n",
                ppr,
                escape(locale)
            ));
        } else {
            result.push_str(&format!(
                "          <a:p>\n{}            <a:r>\n              <a:rPr lang=\"{}\"/>\n              <a:t>{}</a:t>\n            </a:r>\n          </a:p>\n",
                ppr,
                escape(locale),
                escape(paragraph.text.as_str())
            ));
        }
    }
    result
}

fn empty_paragraph_xml(locale: &str) -> String {
    format!(
        "          <a:p><a:endParaRPr lang=\"{}\"/></a:p>\n",
        escape(locale)
    )
}
