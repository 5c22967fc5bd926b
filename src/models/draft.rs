use super::field::FieldId;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Field values keyed by id, ordered by registry order
pub type FieldValues = BTreeMap<FieldId, String>;

/// The proposal currently being edited.
///
/// Every registry field always has a value; an unset field is the empty
/// string. The date is kept as ISO text so it round-trips through `set`
/// and `get` like every other field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DraftRecord", into = "DraftRecord")]
pub struct Draft {
    values: [String; 11],
    opened_on: NaiveDate,
}

impl Draft {
    /// Creates an empty draft dated `opened_on`
    pub fn new(opened_on: NaiveDate) -> Self {
        let mut draft = Draft {
            values: Default::default(),
            opened_on,
        };
        draft.reset_date();
        draft
    }

    pub fn get(&self, field: FieldId) -> &str {
        &self.values[field.index()]
    }

    pub fn set(&mut self, field: FieldId, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    /// Parsed date field, `None` when the stored text is not a valid date
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.get(FieldId::Date).trim(), DATE_FORMAT).ok()
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.set(FieldId::Date, date.format(DATE_FORMAT).to_string());
    }

    pub fn opened_on(&self) -> NaiveDate {
        self.opened_on
    }

    /// Resets every field; the date goes back to the day the draft was opened.
    pub fn clear_all(&mut self) {
        self.values = Default::default();
        self.reset_date();
    }

    /// Applies every provided value. Fields absent from `values` keep
    /// their current content.
    pub fn load_from(&mut self, values: &FieldValues) {
        for (field, value) in values {
            self.set(*field, value.clone());
        }
    }

    /// Copies the values a template keeps: the name and the eight sections.
    pub fn snapshot(&self) -> FieldValues {
        std::iter::once(FieldId::Name)
            .chain(FieldId::NARRATIVE)
            .map(|field| (field, self.get(field).to_string()))
            .collect()
    }

    /// True when the field holds only whitespace
    pub fn is_empty(&self, field: FieldId) -> bool {
        self.get(field).trim().is_empty()
    }

    fn reset_date(&mut self) {
        let opened_on = self.opened_on;
        self.set_date(opened_on);
    }
}

/// On-disk shape of a draft. Missing keys load as empty strings.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct DraftRecord {
    name: String,
    proposer: String,
    date: String,
    purpose: String,
    core: String,
    schedule: String,
    prizes: String,
    sop: String,
    marketing: String,
    risk: String,
    effect: String,
}

impl From<DraftRecord> for Draft {
    fn from(record: DraftRecord) -> Self {
        let opened_on = NaiveDate::parse_from_str(record.date.trim(), DATE_FORMAT)
            .unwrap_or_else(|_| Local::now().date_naive());
        Draft {
            values: [
                record.name,
                record.proposer,
                record.date,
                record.purpose,
                record.core,
                record.schedule,
                record.prizes,
                record.sop,
                record.marketing,
                record.risk,
                record.effect,
            ],
            opened_on,
        }
    }
}

impl From<Draft> for DraftRecord {
    fn from(draft: Draft) -> Self {
        let [name, proposer, date, purpose, core, schedule, prizes, sop, marketing, risk, effect] =
            draft.values;
        DraftRecord {
            name,
            proposer,
            date,
            purpose,
            core,
            schedule,
            prizes,
            sop,
            marketing,
            risk,
            effect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opened() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 12).unwrap()
    }

    #[test]
    fn test_new_draft_has_every_field() {
        let draft = Draft::new(opened());
        for field in FieldId::ALL {
            if field == FieldId::Date {
                assert_eq!(draft.get(field), "2026-01-12");
            } else {
                assert_eq!(draft.get(field), "");
            }
        }
    }

    #[test]
    fn test_set_then_get() {
        let mut draft = Draft::new(opened());
        for field in FieldId::ALL {
            let value = format!("value for {}", field);
            draft.set(field, value.clone());
            assert_eq!(draft.get(field), value);
        }
    }

    #[test]
    fn test_whitespace_counts_as_empty() {
        let mut draft = Draft::new(opened());
        assert!(draft.is_empty(FieldId::Sop));
        draft.set(FieldId::Sop, " \n\t");
        assert!(draft.is_empty(FieldId::Sop));
        draft.set(FieldId::Sop, "限購3包");
        assert!(!draft.is_empty(FieldId::Sop));
    }

    #[test]
    fn test_date_accessors() {
        let mut draft = Draft::new(opened());
        assert_eq!(draft.date(), Some(opened()));

        draft.set(FieldId::Date, "soon");
        assert_eq!(draft.date(), None);

        let later = NaiveDate::from_ymd_opt(2026, 2, 11).unwrap();
        draft.set_date(later);
        assert_eq!(draft.get(FieldId::Date), "2026-02-11");
    }

    #[test]
    fn test_clear_all_resets_to_defaults() {
        let mut draft = Draft::new(opened());
        for field in FieldId::ALL {
            draft.set(field, "x");
        }

        draft.clear_all();

        assert_eq!(draft, Draft::new(opened()));
    }

    #[test]
    fn test_load_from_keeps_unprovided_fields() {
        let mut draft = Draft::new(opened());
        draft.set(FieldId::Risk, "稅務申報");
        draft.set(FieldId::Proposer, "行銷部");

        let mut values = FieldValues::new();
        values.insert(FieldId::Name, "十週年盛典".to_string());
        values.insert(FieldId::Purpose, String::new());
        draft.load_from(&values);

        assert_eq!(draft.get(FieldId::Name), "十週年盛典");
        assert_eq!(draft.get(FieldId::Purpose), "");
        assert_eq!(draft.get(FieldId::Risk), "稅務申報");
        assert_eq!(draft.get(FieldId::Proposer), "行銷部");
    }

    #[test]
    fn test_snapshot_excludes_metadata() {
        let mut draft = Draft::new(opened());
        draft.set(FieldId::Name, "新品發表企劃");
        draft.set(FieldId::Proposer, "王小明");

        let snapshot = draft.snapshot();

        assert_eq!(snapshot.len(), 9);
        assert_eq!(snapshot[&FieldId::Name], "新品發表企劃");
        assert!(!snapshot.contains_key(&FieldId::Proposer));
        assert!(!snapshot.contains_key(&FieldId::Date));
    }

    #[test]
    fn test_json_missing_keys_load_empty() {
        let draft: Draft =
            serde_json::from_str(r#"{ "name": "弱勢門市支援方案", "date": "2026-03-01" }"#).unwrap();

        assert_eq!(draft.get(FieldId::Name), "弱勢門市支援方案");
        assert_eq!(draft.get(FieldId::Effect), "");
        assert_eq!(draft.opened_on(), NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["effect"], "");
        assert_eq!(json["date"], "2026-03-01");
    }
}
