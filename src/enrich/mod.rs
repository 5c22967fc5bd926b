//! Deterministic text enrichment for proposal sections.
//!
//! Each narrative field has a fixed wrapping template that embeds the
//! original text verbatim. Applying it twice wraps twice.

use crate::error::{PlannerError, Result};
use crate::models::FieldId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Shortest input (in characters, after trimming) that gets rewritten
pub const MIN_ENRICH_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Formal,
    Lively,
}

impl Style {
    pub fn as_str(self) -> &'static str {
        match self {
            Style::Formal => "formal",
            Style::Lively => "lively",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "formal" => Ok(Style::Formal),
            "lively" => Ok(Style::Lively),
            other => Err(PlannerError::InvalidArgument(format!(
                "Unsupported style: {}",
                other
            ))),
        }
    }
}

/// Rewrites one field's text.
///
/// Implementations must return `text` unchanged when it is shorter than
/// [`MIN_ENRICH_CHARS`] or when `field` is not a narrative section.
pub trait Enricher {
    fn enrich(&self, field: FieldId, text: &str, style: Style) -> String;
}

/// Fixed-template enricher
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateEnricher;

impl Enricher for TemplateEnricher {
    fn enrich(&self, field: FieldId, text: &str, style: Style) -> String {
        if text.trim().chars().count() < MIN_ENRICH_CHARS {
            return text.to_string();
        }

        let rewritten = match (field, style) {
            (FieldId::Purpose, _) => format!(
                "【活動目的】{}\n透過本次活動強化品牌聲量，同步累積會員名單與官網流量。",
                text
            ),
            (FieldId::Core, _) => format!(
                "{}\n▶ 核心亮點：以低門檻參與搭配高價值獎項，創造話題與回購動機。",
                text
            ),
            (FieldId::Schedule, _) => {
                format!("{}\n※ 建議各階段結束前 3 天進行成效檢核", text)
            }
            (FieldId::Prizes, _) => format!("{}\n※ 獎項價值需預留 10% 稅金預算", text),
            (FieldId::Sop, _) => format!(
                "【門市標準作業流程】\n{}\n※ 活動開跑前須完成門市人員教育訓練。",
                text
            ),
            (FieldId::Marketing, Style::Formal) => format!(
                "【整合行銷策略】{}\n透過線上線下多渠道曝光，建立一致的品牌訊息。",
                text
            ),
            (FieldId::Marketing, Style::Lively) => format!(
                "🔥 爆量曝光計畫：{}\n限動倒數、打卡抽獎、社群互動一次到位！",
                text
            ),
            (FieldId::Risk, _) => format!(
                "{}\n※ 風險控管：指定專人每日回報異常，重大事件即時上報。",
                text
            ),
            (FieldId::Effect, _) => format!(
                "【預估成效】{}\n並以來客數、會員增長與營收作為 KPI 追蹤指標。",
                text
            ),
            (FieldId::Name | FieldId::Proposer | FieldId::Date, _) => return text.to_string(),
        };

        debug!(field = %field, style = %style, "Enriched field text");
        rewritten
    }
}

/// Enriches with the built-in templates
pub fn enrich(field: FieldId, text: &str, style: Style) -> String {
    TemplateEnricher.enrich(field, text, style)
}
