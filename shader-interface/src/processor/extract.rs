//! Declaration extraction.
//!
//! Walks one stage's source with a cursor, cutting out every statement that
//! starts with `attribute`, `varying`, `out` or `uniform` and runs to the next
//! `;`. The first cut leaves [`MARKER`] behind; later cuts leave nothing, so
//! the stripped source has exactly one place for generated declarations.

use crate::profiling::profile_function;

/// Placeholder left where the first declaration was removed.
pub const MARKER: &str = "@@@";

const REPLACEMENT: &str = "@@@\n";

/// Declaration keyword recognised by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    Attribute,
    Varying,
    Out,
    Uniform,
}

impl Keyword {
    const ALL: [(Self, &'static str); 4] = [
        (Self::Attribute, "attribute"),
        (Self::Varying, "varying"),
        (Self::Out, "out"),
        (Self::Uniform, "uniform"),
    ];
}

/// Stripped source and the raw declaration bodies, in source order.
///
/// Bodies are the text between the keyword and the terminator, trimmed:
/// `uniform highp vec4 color;` yields `highp vec4 color`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedDeclarations {
    pub source: String,
    pub attributes: Vec<String>,
    pub varyings: Vec<String>,
    pub outputs: Vec<String>,
    pub uniforms: Vec<String>,
}

impl ExtractedDeclarations {
    /// True if the stripped source contains the rewrite marker.
    pub fn has_marker(&self) -> bool {
        self.source.contains(MARKER)
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
            && self.varyings.is_empty()
            && self.outputs.is_empty()
            && self.uniforms.is_empty()
    }
}

/// A keyword occurrence found by the scanner.
struct KeywordMatch {
    keyword: Keyword,
    /// Start of the cut, including spaces and tabs before the keyword.
    start: usize,
    /// First byte after the keyword.
    end: usize,
}

/// Extract the declarations of one shader stage.
pub fn extract(source: &str) -> ExtractedDeclarations {
    profile_function!();

    let mut result = ExtractedDeclarations::default();
    let mut src = source.to_string();
    let mut replacement = REPLACEMENT;
    let mut cursor = 0;

    while let Some(found) = find_keyword(&src, cursor) {
        let body_start = skip_blanks(&src, found.end);
        let Some(terminator) = src[body_start..].find(';').map(|i| body_start + i) else {
            // Unterminated declaration: leave the rest of the source alone.
            break;
        };
        if terminator == body_start {
            cursor = terminator + 1;
            continue;
        }

        let body = src[body_start..terminator].trim().to_string();
        let cut_end = terminator + src[terminator..].bytes().take_while(|&b| b == b';').count();

        match found.keyword {
            Keyword::Attribute => result.attributes.push(body),
            Keyword::Varying => result.varyings.push(body),
            Keyword::Out => result.outputs.push(body),
            Keyword::Uniform => result.uniforms.push(body),
        }

        src.replace_range(found.start..cut_end, replacement);
        cursor = found.start + replacement.len();
        replacement = "";
    }

    result.source = src;
    result
}

/// Find the next declaration keyword at or after `from`.
///
/// A keyword only counts at the start of a statement: at the start of the
/// source or after `;`, `{`, `}` or a newline, with blanks in between. Line and
/// block comments are skipped. `from` is always a statement start.
fn find_keyword(src: &str, from: usize) -> Option<KeywordMatch> {
    let bytes = src.as_bytes();
    let mut pos = from;
    let mut at_statement_start = true;

    while pos < bytes.len() {
        let rest = &bytes[pos..];
        if rest.starts_with(b"//") {
            pos += rest.iter().position(|&b| b == b'\n').unwrap_or(rest.len());
            continue;
        }
        if rest.starts_with(b"/*") {
            pos += rest[2..]
                .windows(2)
                .position(|pair| pair == b"*/")
                .map_or(rest.len(), |i| i + 4);
            continue;
        }

        match bytes[pos] {
            b';' | b'{' | b'}' | b'\n' => {
                at_statement_start = true;
                pos += 1;
            }
            b' ' | b'\t' | b'\r' => pos += 1,
            b if is_word_byte(b) => {
                let word_end = pos + rest.iter().take_while(|&&b| is_word_byte(b)).count();
                if at_statement_start {
                    let word = &bytes[pos..word_end];
                    let keyword = Keyword::ALL
                        .iter()
                        .find(|(_, text)| text.as_bytes() == word)
                        .map(|&(keyword, _)| keyword);
                    if let Some(keyword) = keyword {
                        let mut start = pos;
                        while start > from && matches!(bytes[start - 1], b' ' | b'\t') {
                            start -= 1;
                        }
                        return Some(KeywordMatch {
                            keyword,
                            start,
                            end: word_end,
                        });
                    }
                }
                at_statement_start = false;
                pos = word_end;
            }
            _ => {
                at_statement_start = false;
                pos += 1;
            }
        }
    }

    None
}

fn skip_blanks(src: &str, from: usize) -> usize {
    from + src[from..]
        .bytes()
        .take_while(|&b| b == b' ' || b == b'\t')
        .count()
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
