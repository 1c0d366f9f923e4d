use std::fmt;

/// Closed set of supported output formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Jpg,
    Gif,
    Png,
}

impl ImageFormat {
    /// Parse a format field. Anything outside the allow-list is rejected.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "jpg" => Some(Self::Jpg),
            "gif" => Some(Self::Gif),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    /// Channel count of the encoded output: RGBA for png, RGB otherwise.
    pub fn channels(self) -> u8 {
        match self {
            Self::Png => 4,
            Self::Jpg | Self::Gif => 3,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Jpg => "jpg",
            Self::Gif => "gif",
            Self::Png => "png",
        };
        f.write_str(s)
    }
}

/// One untyped data row as produced by the table reader.
///
/// `line` is the 1-based file line number; the header occupies line 1, so the
/// first data row is line 2. Fields are consumed positionally as
/// `(width, height, format)` and extra columns are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawRow {
    pub line: usize,
    pub fields: Vec<String>,
}

/// A row that passed every check and may enter the generation pipeline.
///
/// `width_text`/`height_text` carry the literal field text from the table;
/// the label and output filename are built from these, not from the parsed
/// values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedRow {
    pub line: usize,
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    pub width_text: String,
    pub height_text: String,
}

impl ValidatedRow {
    /// Output filename (also the rendered label text).
    pub fn file_name(&self) -> String {
        format!("{}x{}.{}", self.width_text, self.height_text, self.format)
    }
}

/// Check one raw row against the type/dimension constraints.
///
/// All three checks are evaluated independently; a row with defects reports
/// every applicable defect rather than stopping at the first one. Returns
/// either a typed row or a non-empty defect list, never both.
pub fn validate_row(raw: &RawRow) -> Result<ValidatedRow, Vec<String>> {
    let field = |i: usize| raw.fields.get(i).map(String::as_str).unwrap_or("");

    let format = ImageFormat::parse(field(2));
    let width = leading_int(field(0)).filter(|&v| v > 0 && v <= i64::from(u32::MAX));
    let height = leading_int(field(1)).filter(|&v| v > 0 && v <= i64::from(u32::MAX));

    let mut defects = Vec::new();
    if format.is_none() {
        defects.push("Invalid type".to_string());
    }
    if width.is_none() {
        defects.push("Invalid width".to_string());
    }
    if height.is_none() {
        defects.push("Invalid height".to_string());
    }
    match (format, width, height) {
        (Some(format), Some(width), Some(height)) => Ok(ValidatedRow {
            line: raw.line,
            width: width as u32,
            height: height as u32,
            format,
            width_text: field(0).to_string(),
            height_text: field(1).to_string(),
        }),
        _ => Err(defects),
    }
}

/// Parse the leading integer prefix of a field.
///
/// Trailing non-digit characters are ignored ("800px" parses as 800); a field
/// with no leading digits has no numeric value at all.
fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = rest
        .as_bytes()
        .iter()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }

    let value: i64 = rest[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
#[path = "../../tests/unit/table/row.rs"]
mod tests;
