use crate::models::{Draft, FieldId, TabularKind};
use crate::parsers::{has_prize_rows, parse_prizes, parse_schedule};
use tracing::debug;

pub const DOCUMENT_TITLE: &str = "行銷企劃執行提案書";
pub const UNTITLED: &str = "未命名企劃";
pub const NOT_FILLED: &str = "（未填寫）";

pub const SCHEDULE_HEADER: [&str; 2] = ["階段/日期", "執行細節"];
pub const PRIZE_HEADER: [&str; 3] = ["品項", "數量", "備註"];

/// English Metric Units per inch, the unit drawing extents use
pub const EMU_PER_INCH: u64 = 914_400;
/// Rendered logo width: 1.2 inches
pub const LOGO_WIDTH_EMU: u64 = EMU_PER_INCH * 6 / 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStyle {
    /// Shaded header row, used for the timeline
    Shaded,
    /// Plain grid, used for prizes
    Grid,
}

/// A PNG image to place in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logo {
    pub bytes: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
}

impl Logo {
    /// Drawing extent at [`LOGO_WIDTH_EMU`] wide, keeping the aspect ratio
    pub fn extent_emu(&self) -> (u64, u64) {
        let width = LOGO_WIDTH_EMU;
        let height = if self.width_px == 0 {
            width
        } else {
            width * u64::from(self.height_px) / u64::from(self.width_px)
        };
        (width, height)
    }
}

/// Format-neutral content of the exported document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Image { logo: Logo, align: Align },
    Title(String),
    Heading { level: u8, text: String },
    Paragraph { text: String, align: Align },
    Table {
        style: TableStyle,
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

/// Lays out `draft` as document blocks in registry order
pub fn build_blocks(draft: &Draft, logo: Option<Logo>) -> Vec<Block> {
    let mut blocks = Vec::with_capacity(4 + FieldId::NARRATIVE.len() * 2);

    if let Some(logo) = logo {
        blocks.push(Block::Image {
            logo,
            align: Align::Right,
        });
    }

    blocks.push(Block::Title(DOCUMENT_TITLE.to_string()));
    blocks.push(Block::Paragraph {
        text: format!(
            "提案人：{}  |  日期：{}",
            draft.get(FieldId::Proposer),
            draft.get(FieldId::Date)
        ),
        align: Align::Center,
    });

    let name = if draft.is_empty(FieldId::Name) {
        UNTITLED
    } else {
        draft.get(FieldId::Name)
    };
    blocks.push(Block::Heading {
        level: 1,
        text: name.to_string(),
    });

    for field in FieldId::NARRATIVE {
        let descriptor = field.descriptor();
        blocks.push(Block::Heading {
            level: 2,
            text: descriptor.display_title.to_string(),
        });
        blocks.push(section_body(draft, field, descriptor.tabular));
    }

    debug!(blocks = blocks.len(), "Laid out proposal document");
    blocks
}

fn section_body(draft: &Draft, field: FieldId, tabular: Option<TabularKind>) -> Block {
    let content = draft.get(field);
    let filled = !draft.is_empty(field);

    match tabular {
        Some(TabularKind::Schedule) if filled => Block::Table {
            style: TableStyle::Shaded,
            header: header(&SCHEDULE_HEADER),
            rows: parse_schedule(content)
                .into_iter()
                .map(|row| vec![row.stage, row.detail])
                .collect(),
        },
        Some(TabularKind::PrizeList) if has_prize_rows(content) => Block::Table {
            style: TableStyle::Grid,
            header: header(&PRIZE_HEADER),
            rows: parse_prizes(content)
                .into_iter()
                .map(|row| vec![row.item, row.quantity, row.note])
                .collect(),
        },
        _ => Block::Paragraph {
            text: if filled { content } else { NOT_FILLED }.to_string(),
            align: Align::Left,
        },
    }
}

fn header(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|cell| cell.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn draft() -> Draft {
        Draft::new(NaiveDate::from_ymd_opt(2026, 1, 12).unwrap())
    }

    fn body_of(blocks: &[Block], title: &str) -> Block {
        let index = blocks
            .iter()
            .position(|b| matches!(b, Block::Heading { level: 2, text } if text == title))
            .unwrap();
        blocks[index + 1].clone()
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_empty_draft_uses_placeholders() {
        let blocks = build_blocks(&draft(), None);

        assert_eq!(blocks[0], Block::Title(DOCUMENT_TITLE.to_string()));
        assert_eq!(
            blocks[2],
            Block::Heading {
                level: 1,
                text: UNTITLED.to_string()
            }
        );
        // title, info, name, then heading + body per section
        assert_eq!(blocks.len(), 3 + 16);
        for field in FieldId::NARRATIVE {
            assert_eq!(
                body_of(&blocks, field.descriptor().display_title),
                Block::Paragraph {
                    text: NOT_FILLED.to_string(),
                    align: Align::Left
                }
            );
        }
    }

    #[test]
    fn test_name_heading_keeps_raw_value() {
        let mut d = draft();
        d.set(FieldId::Name, "  夏季促銷 ");
        assert_eq!(
            build_blocks(&d, None)[2],
            Block::Heading {
                level: 1,
                text: "  夏季促銷 ".to_string()
            }
        );

        d.set(FieldId::Name, " \n ");
        assert_eq!(
            build_blocks(&d, None)[2],
            Block::Heading {
                level: 1,
                text: UNTITLED.to_string()
            }
        );
    }

    #[test]
    fn test_sections_follow_registry_order() {
        let blocks = build_blocks(&draft(), None);
        let titles: Vec<&str> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading { level: 2, text } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        let expected: Vec<&str> = FieldId::NARRATIVE
            .iter()
            .map(|f| f.descriptor().display_title)
            .collect();
        assert_eq!(titles, expected);
    }

    #[test]
    fn test_info_line() {
        let mut d = draft();
        d.set(FieldId::Proposer, "行銷部");
        let blocks = build_blocks(&d, None);
        assert_eq!(
            blocks[1],
            Block::Paragraph {
                text: "提案人：行銷部  |  日期：2026-01-12".to_string(),
                align: Align::Center
            }
        );
    }

    #[test]
    fn test_schedule_table() {
        let mut d = draft();
        d.set(FieldId::Schedule, "01/12-01/18: 宣傳期\n01/19-02/08: 銷售期");

        let body = body_of(&build_blocks(&d, None), "三、 活動時程安排 (Timeline)");

        assert_eq!(
            body,
            Block::Table {
                style: TableStyle::Shaded,
                header: row(&SCHEDULE_HEADER),
                rows: vec![row(&["01/12-01/18", "宣傳期"]), row(&["01/19-02/08", "銷售期"])],
            }
        );
    }

    #[test]
    fn test_prize_table_skips_plain_lines() {
        let mut d = draft();
        d.set(FieldId::Prizes, "PS5 | 1 | 大獎\n加碼小禮\n現金 | 1 | 獎金");

        let body = body_of(&build_blocks(&d, None), "四、 贈品結構與預算");

        assert_eq!(
            body,
            Block::Table {
                style: TableStyle::Grid,
                header: row(&PRIZE_HEADER),
                rows: vec![row(&["PS5", "1", "大獎"]), row(&["現金", "1", "獎金"])],
            }
        );
    }

    #[test]
    fn test_prizes_without_pipe_render_as_paragraph() {
        let mut d = draft();
        d.set(FieldId::Prizes, "Sony PS5 一台");

        let body = body_of(&build_blocks(&d, None), "四、 贈品結構與預算");

        assert_eq!(
            body,
            Block::Paragraph {
                text: "Sony PS5 一台".to_string(),
                align: Align::Left
            }
        );
    }

    #[test]
    fn test_whitespace_schedule_is_not_filled() {
        let mut d = draft();
        d.set(FieldId::Schedule, "  \n ");

        let body = body_of(&build_blocks(&d, None), "三、 活動時程安排 (Timeline)");

        assert!(matches!(body, Block::Paragraph { text, .. } if text == NOT_FILLED));
    }

    #[test]
    fn test_logo_leads_the_document() {
        let logo = Logo {
            bytes: vec![1, 2, 3],
            width_px: 200,
            height_px: 100,
        };
        let blocks = build_blocks(&draft(), Some(logo.clone()));

        assert_eq!(
            blocks[0],
            Block::Image {
                logo,
                align: Align::Right
            }
        );
        assert_eq!(blocks[1], Block::Title(DOCUMENT_TITLE.to_string()));
    }

    #[test]
    fn test_logo_extent_keeps_aspect_ratio() {
        let logo = Logo {
            bytes: Vec::new(),
            width_px: 400,
            height_px: 100,
        };
        assert_eq!(logo.extent_emu(), (1_097_280, 274_320));
    }

    #[test]
    fn test_layout_does_not_mutate_draft() {
        let mut d = draft();
        d.set(FieldId::Schedule, "02/11: 開獎日");
        let before = d.clone();
        let _ = build_blocks(&d, None);
        assert_eq!(d, before);
    }
}
