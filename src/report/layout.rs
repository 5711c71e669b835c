//! Report table layout.
//!
//! All positions are millimetres measured from the top-left corner of the page.
//! Each row's height is computed once from its wrapped text and shared by the
//! item cell and both mark cells.

use crate::answers::Answer;

use super::ReportOptions;

/// Space reserved above the bottom margin for the page footer.
pub const FOOTER_BAND_MM: f32 = 8.0;

/// Greedy word wrap at `width` characters.
///
/// Text that already fits is returned unchanged as a single line. Words longer
/// than `width` are split into `width`-sized pieces.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    if text.chars().count() <= width {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let chars: Vec<char> = word.chars().collect();
            let mut pieces: Vec<String> = chars.chunks(width).map(|c| c.iter().collect()).collect();
            current = pieces.pop().unwrap_or_default();
            current_len = current.chars().count();
            lines.extend(pieces);
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
            current_len = word_len;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// One body row of the report table.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub item: String,
    pub lines: Vec<String>,
    pub answer: Answer,
}

impl ReportRow {
    pub fn yes_mark(&self) -> bool {
        self.answer == Answer::Yes
    }

    pub fn no_mark(&self) -> bool {
        self.answer == Answer::No
    }
}

/// Title plus wrapped rows, in question order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub title: String,
    pub department: String,
    pub rows: Vec<ReportRow>,
}

impl ReportDocument {
    pub fn build(department: &str, answers: &[(String, Answer)], options: &ReportOptions) -> Self {
        let rows = answers
            .iter()
            .map(|(item, answer)| ReportRow {
                item: item.clone(),
                lines: wrap_text(item, options.wrap_width),
                answer: *answer,
            })
            .collect();

        Self {
            title: options.title_for(department),
            department: department.to_string(),
            rows,
        }
    }
}

/// Horizontal extent of a table column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub x: f32,
    pub width: f32,
}

impl Column {
    pub fn center(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// The three table columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Columns {
    pub item: Column,
    pub yes: Column,
    pub no: Column,
}

impl Columns {
    /// Column that carries the mark for `answer`.
    pub fn mark(&self, answer: Answer) -> Column {
        match answer {
            Answer::Yes => self.yes,
            Answer::No => self.no,
        }
    }
}

/// A body row, or one piece of a row taller than a page, positioned on a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedRow {
    /// Index into [`ReportDocument::rows`].
    pub index: usize,
    /// First wrapped line of the row drawn here.
    pub first_line: usize,
    pub line_count: usize,
    pub top: f32,
    pub height: f32,
}

impl PlacedRow {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Vertical centre, where the mark is drawn.
    pub fn center_y(&self) -> f32 {
        self.top + self.height / 2.0
    }

    /// Only the piece holding the first line carries the YES/NO mark.
    pub fn carries_mark(&self) -> bool {
        self.first_line == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Only the first page carries the title.
    pub title_top: Option<f32>,
    pub header_top: f32,
    pub rows: Vec<PlacedRow>,
}

/// Rows assigned to pages, with every cell position fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    pub columns: Columns,
    /// Left edge and width of the full-width title row.
    pub title: Column,
    pub line_height: f32,
    /// Lowest y any row may reach.
    pub content_bottom: f32,
    pub pages: Vec<Page>,
}

impl TableLayout {
    pub fn compute(document: &ReportDocument, options: &ReportOptions) -> Self {
        let line_height = options.line_height;
        let printable = options.page_width - 2.0 * options.margin;
        let left = options.margin + ((printable - options.table_width()) / 2.0).max(0.0);

        let item = Column {
            x: left,
            width: options.item_width,
        };
        let yes = Column {
            x: item.right(),
            width: options.mark_width,
        };
        let no = Column {
            x: yes.right(),
            width: options.mark_width,
        };

        let content_bottom = options.page_height - options.margin - FOOTER_BAND_MM;
        // Room for body rows on a continuation page, below the repeated header.
        let fresh_capacity = content_bottom - (options.margin + line_height);

        let title_top = options.margin;
        let mut page = Page {
            title_top: Some(title_top),
            header_top: title_top + 2.0 * line_height,
            rows: Vec::new(),
        };
        let mut cursor = page.header_top + line_height;
        let mut pages = Vec::new();

        let mut new_page = |page: &mut Page, cursor: &mut f32| {
            pages.push(std::mem::replace(
                page,
                Page {
                    title_top: None,
                    header_top: options.margin,
                    rows: Vec::new(),
                },
            ));
            *cursor = options.margin + line_height;
        };

        for (index, row) in document.rows.iter().enumerate() {
            let total = row.lines.len();
            let height = line_height * total as f32;

            if height <= fresh_capacity {
                if cursor + height > content_bottom {
                    tracing::debug!("Page break before row {} ({:.1}mm tall)", index + 1, height);
                    new_page(&mut page, &mut cursor);
                }
                page.rows.push(PlacedRow {
                    index,
                    first_line: 0,
                    line_count: total,
                    top: cursor,
                    height,
                });
                cursor += height;
                continue;
            }

            // Taller than a whole page: continue it in whole-line pieces.
            tracing::debug!("Row {} spans pages ({} lines)", index + 1, total);
            let mut first_line = 0;
            while first_line < total {
                let room = ((content_bottom - cursor) / line_height + 1e-4).floor().max(0.0) as usize;
                if room == 0 && !page.rows.is_empty() {
                    new_page(&mut page, &mut cursor);
                    continue;
                }
                let line_count = room.max(1).min(total - first_line);
                let piece_height = line_height * line_count as f32;
                page.rows.push(PlacedRow {
                    index,
                    first_line,
                    line_count,
                    top: cursor,
                    height: piece_height,
                });
                cursor += piece_height;
                first_line += line_count;
            }
        }
        pages.push(page);

        Self {
            columns: Columns { item, yes, no },
            title: Column {
                x: options.margin,
                width: printable,
            },
            line_height,
            content_bottom,
            pages,
        }
    }
}
