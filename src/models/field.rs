use crate::error::{PlannerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies one proposal field.
///
/// Declaration order is registry order, so `Ord` sorts fields the way the
/// editor and the exported document present them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldId {
    Name,
    Proposer,
    Date,
    Purpose,
    Core,
    Schedule,
    Prizes,
    Sop,
    Marketing,
    Risk,
    Effect,
}

/// Fields whose content is parsed into a table on export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabularKind {
    Schedule,
    PrizeList,
}

/// Static descriptor of a proposal field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub id: FieldId,
    pub display_title: &'static str,
    pub tabular: Option<TabularKind>,
    pub hint: Option<&'static str>,
}

pub static REGISTRY: [Field; 11] = [
    Field {
        id: FieldId::Name,
        display_title: "活動名稱",
        tabular: None,
        hint: None,
    },
    Field {
        id: FieldId::Proposer,
        display_title: "提案人",
        tabular: None,
        hint: None,
    },
    Field {
        id: FieldId::Date,
        display_title: "提案日期",
        tabular: None,
        hint: Some("YYYY-MM-DD"),
    },
    Field {
        id: FieldId::Purpose,
        display_title: "一、 活動時機與目的",
        tabular: None,
        hint: None,
    },
    Field {
        id: FieldId::Core,
        display_title: "二、 活動核心內容",
        tabular: None,
        hint: None,
    },
    Field {
        id: FieldId::Schedule,
        display_title: "三、 活動時程安排 (Timeline)",
        tabular: Some(TabularKind::Schedule),
        hint: Some("格式 MM/DD: 內容"),
    },
    Field {
        id: FieldId::Prizes,
        display_title: "四、 贈品結構與預算",
        tabular: Some(TabularKind::PrizeList),
        hint: Some("格式 品項 | 數量 | 備註"),
    },
    Field {
        id: FieldId::Sop,
        display_title: "五、 門市執行流程",
        tabular: None,
        hint: None,
    },
    Field {
        id: FieldId::Marketing,
        display_title: "六、 行銷流程與策略",
        tabular: None,
        hint: None,
    },
    Field {
        id: FieldId::Risk,
        display_title: "七、 風險管理與注意事項",
        tabular: None,
        hint: None,
    },
    Field {
        id: FieldId::Effect,
        display_title: "八、 預估成效",
        tabular: None,
        hint: None,
    },
];

impl FieldId {
    pub const ALL: [FieldId; 11] = [
        FieldId::Name,
        FieldId::Proposer,
        FieldId::Date,
        FieldId::Purpose,
        FieldId::Core,
        FieldId::Schedule,
        FieldId::Prizes,
        FieldId::Sop,
        FieldId::Marketing,
        FieldId::Risk,
        FieldId::Effect,
    ];

    /// The eight narrative sections, in document order
    pub const NARRATIVE: [FieldId; 8] = [
        FieldId::Purpose,
        FieldId::Core,
        FieldId::Schedule,
        FieldId::Prizes,
        FieldId::Sop,
        FieldId::Marketing,
        FieldId::Risk,
        FieldId::Effect,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldId::Name => "name",
            FieldId::Proposer => "proposer",
            FieldId::Date => "date",
            FieldId::Purpose => "purpose",
            FieldId::Core => "core",
            FieldId::Schedule => "schedule",
            FieldId::Prizes => "prizes",
            FieldId::Sop => "sop",
            FieldId::Marketing => "marketing",
            FieldId::Risk => "risk",
            FieldId::Effect => "effect",
        }
    }

    pub fn descriptor(self) -> &'static Field {
        &REGISTRY[self.index()]
    }

    pub fn is_narrative(self) -> bool {
        !matches!(self, FieldId::Name | FieldId::Proposer | FieldId::Date)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldId {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        FieldId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == wanted)
            .ok_or_else(|| PlannerError::InvalidArgument(format!("Unknown field: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_matches_declaration_order() {
        for (i, field) in REGISTRY.iter().enumerate() {
            assert_eq!(field.id.index(), i);
            assert_eq!(FieldId::ALL[i], field.id);
        }
    }

    #[test]
    fn test_only_schedule_and_prizes_are_tabular() {
        let tabular: Vec<FieldId> = REGISTRY
            .iter()
            .filter(|f| f.tabular.is_some())
            .map(|f| f.id)
            .collect();
        assert_eq!(tabular, vec![FieldId::Schedule, FieldId::Prizes]);
    }

    #[test]
    fn test_narrative_fields() {
        let narrative: Vec<FieldId> = FieldId::ALL
            .iter()
            .copied()
            .filter(|id| id.is_narrative())
            .collect();
        assert_eq!(narrative, FieldId::NARRATIVE.to_vec());
    }

    #[test]
    fn test_parse_field_id() {
        assert_eq!("schedule".parse::<FieldId>().unwrap(), FieldId::Schedule);
        assert_eq!(" SOP ".parse::<FieldId>().unwrap(), FieldId::Sop);
        assert!(matches!(
            "budget".parse::<FieldId>(),
            Err(PlannerError::InvalidArgument(_))
        ));
    }
}
