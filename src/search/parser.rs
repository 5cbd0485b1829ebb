//! Page-marked text stream parser / 分页文本流解析
//!
//! Input is one logical record per line, with sentinel lines delimiting pages:
//!
//! ```text
//! START OF PAGE 107
//! some text
//! END OF PAGE 107
//! ```
//!
//! The parser is an iterator of [`PageEvent`]s so the caller decides when and
//! where each finished page is persisted.

use std::io::BufRead;

use crate::error::{IndexError, ParseErrorKind, Result};

const START_MARKER: &str = "START OF PAGE ";
const END_MARKER: &str = "END OF PAGE ";

/// Page number in effect before the first START marker
pub const FIRST_PAGE: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// A START marker set the current page number / 识别到页码
    PageStarted(i64),
    /// A page was closed with its accumulated text / 页面结束
    PageCompleted { page: i64, content: String },
}

/// Streaming page parser / 流式分页解析器
pub struct PageParser<R> {
    reader: R,
    line_no: usize,
    current_page: i64,
    buffer: String,
    flush_trailing: bool,
    finished: bool,
    line: Vec<u8>,
}

impl<R: BufRead> PageParser<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            current_page: FIRST_PAGE,
            buffer: String::new(),
            flush_trailing: true,
            finished: false,
            line: Vec::new(),
        }
    }

    /// Emit buffered text left after the last END marker as a final page
    /// 流结束时是否输出未闭合的尾页
    pub fn flush_trailing_page(mut self, enabled: bool) -> Self {
        self.flush_trailing = enabled;
        self
    }

    /// Read the next line, decoding invalid UTF-8 lossily. `None` at EOF.
    fn read_line(&mut self) -> std::io::Result<Option<String>> {
        self.line.clear();
        if self.reader.read_until(b'\n', &mut self.line)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;

        let mut end = self.line.len();
        if end > 0 && self.line[end - 1] == b'\n' {
            end -= 1;
            if end > 0 && self.line[end - 1] == b'\r' {
                end -= 1;
            }
        }
        Ok(Some(String::from_utf8_lossy(&self.line[..end]).into_owned()))
    }

    fn take_page(&mut self) -> PageEvent {
        PageEvent::PageCompleted {
            page: self.current_page,
            content: std::mem::take(&mut self.buffer),
        }
    }

    fn next_event(&mut self) -> Result<Option<PageEvent>> {
        while let Some(line) = self.read_line()? {
            if let Some(rest) = line.strip_prefix(START_MARKER) {
                let page = parse_page_number(rest).map_err(|kind| IndexError::Parse {
                    line: self.line_no,
                    kind,
                })?;
                self.current_page = page;
                return Ok(Some(PageEvent::PageStarted(page)));
            }

            // the END number is not checked against the current page
            if line.starts_with(END_MARKER) {
                return Ok(Some(self.take_page()));
            }

            let trimmed = line.trim();
            if !trimmed.is_empty() {
                self.buffer.push_str(trimmed);
                self.buffer.push('\n');
            }
        }

        if self.flush_trailing && !self.buffer.is_empty() {
            tracing::warn!(
                "Stream ended inside page {} without END marker, flushing it",
                self.current_page
            );
            return Ok(Some(self.take_page()));
        }
        if !self.buffer.is_empty() {
            tracing::debug!(
                "Dropping unterminated text of page {} ({} bytes)",
                self.current_page,
                self.buffer.len()
            );
            self.buffer.clear();
        }
        Ok(None)
    }
}

impl<R: BufRead> Iterator for PageParser<R> {
    type Item = Result<PageEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_event() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Parse the argument of a START marker / 解析页码
fn parse_page_number(rest: &str) -> std::result::Result<i64, ParseErrorKind> {
    let token = rest
        .split_whitespace()
        .next()
        .ok_or(ParseErrorKind::MissingPageNumber)?;
    let page: i64 = token
        .parse()
        .map_err(|_| ParseErrorKind::InvalidPageNumber(token.to_string()))?;
    if page < 1 {
        return Err(ParseErrorKind::NonPositivePageNumber(page));
    }
    Ok(page)
}
