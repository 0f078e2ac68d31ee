//! `word/styles.xml`: Normal plus the four heading levels markup can produce

/// Font size (half-points) for each heading level
const HEADING_SIZES: [(u8, u32); 4] = [(1, 32), (2, 28), (3, 26), (4, 24)];

fn heading_style(level: u8, size: u32) -> String {
    format!(
        r#"  <w:style w:type="paragraph" w:styleId="Heading{level}">
    <w:name w:val="heading {level}"/>
    <w:basedOn w:val="Normal"/>
    <w:next w:val="Normal"/>
    <w:uiPriority w:val="9"/>
    <w:qFormat/>
    <w:pPr>
      <w:keepNext/>
      <w:keepLines/>
      <w:spacing w:before="240" w:after="120"/>
    </w:pPr>
    <w:rPr>
      <w:b/>
      <w:sz w:val="{size}"/>
    </w:rPr>
  </w:style>
"#
    )
}

pub(crate) fn styles_xml() -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
    <w:qFormat/>
  </w:style>
"#,
    );
    for (level, size) in HEADING_SIZES {
        xml.push_str(&heading_style(level, size));
    }
    xml.push_str("</w:styles>");
    xml
}
