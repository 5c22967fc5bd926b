use crate::models::{FieldId, FieldValues, TemplateEntry};

fn entry(name: &str, values: &[(FieldId, &str)]) -> TemplateEntry {
    let mut map = FieldValues::new();
    map.insert(FieldId::Name, String::new());
    for field in FieldId::NARRATIVE {
        map.insert(field, String::new());
    }
    for (field, value) in values {
        map.insert(*field, (*value).to_string());
    }
    TemplateEntry::new(name, map)
}

/// Templates available in every new session, in menu order
pub fn builtin_templates() -> Vec<TemplateEntry> {
    vec![
        entry(
            "🐎 馬年慶：百倍奉還",
            &[
                (FieldId::Name, "2026 馬尼通訊「馬年慶：百倍奉還」"),
                (
                    FieldId::Purpose,
                    "迎接馬年，透過 $100 低門檻吸引新舊客，增加會員與官網流量。",
                ),
                (
                    FieldId::Core,
                    "對象：全體消費者；範圍：全台門市；產品：「百倍奉還」禮包 ($100)。",
                ),
                (
                    FieldId::Schedule,
                    "01/12-01/18: 宣傳期\n01/19-02/08: 販售期\n02/11: 開獎日",
                ),
                (
                    FieldId::Prizes,
                    "Sony PS5 | 1 名 | 吸睛大獎\n現金 $6,666 | 1 名 | 百倍奉還獎",
                ),
                (FieldId::Sop, "1.限購3包。 2.引導加入LINE。"),
                (FieldId::Marketing, "FB/IG/脆前導；區域廣告投遞。"),
                (FieldId::Risk, "稅務申報；序號防偽；滯銷調度。"),
                (FieldId::Effect, "預估 2,000+ 人次進店。"),
            ],
        ),
        entry("📱 範本：新機上市", &[(FieldId::Name, "新品發表企劃")]),
        entry("🎁 範本：品牌週年", &[(FieldId::Name, "十週年盛典")]),
        entry("🛍️ 範本：門市振興", &[(FieldId::Name, "弱勢門市支援方案")]),
    ]
}
