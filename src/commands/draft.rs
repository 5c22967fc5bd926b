use crate::enrich::Style;
use crate::error::{PlannerError, Result};
use crate::models::{FieldId, REGISTRY};
use crate::session::Session;

/// Shows the whole draft, or one field when `args` names it
///
/// Multi-line values are indented under their field label.
pub fn show(session: &Session, args: &str) -> Result<String> {
    if !args.trim().is_empty() {
        let field: FieldId = args.parse()?;
        return Ok(session.field(field).to_string());
    }

    let mut out = String::new();
    for descriptor in REGISTRY.iter() {
        let value = session.field(descriptor.id);
        out.push_str(&format!("[{}] {}\n", descriptor.id, descriptor.display_title));
        if value.is_empty() {
            out.push_str("    -\n");
        }
        for line in value.lines() {
            out.push_str(&format!("    {}\n", line));
        }
    }
    Ok(out)
}

/// Lists field ids with their titles and input hints
pub fn fields() -> String {
    REGISTRY
        .iter()
        .map(|descriptor| match descriptor.hint {
            Some(hint) => format!(
                "{:<10} {} ({})",
                descriptor.id.as_str(),
                descriptor.display_title,
                hint
            ),
            None => format!("{:<10} {}", descriptor.id.as_str(), descriptor.display_title),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Sets a field: `<field> <value>`
///
/// The value may contain `\n` escapes for multi-line sections; an absent
/// value empties the field.
pub fn set(session: &mut Session, args: &str) -> Result<String> {
    let (field, value) = split_field(args)?;
    session.set_field(field, unescape(value));
    Ok(format!("{} updated", field))
}

pub fn clear(session: &mut Session) -> String {
    session.clear();
    "Draft cleared".to_string()
}

/// Enriches a field in place: `<field> [formal|lively]`
pub fn enrich(session: &mut Session, args: &str) -> Result<String> {
    let (field, style) = split_field(args)?;
    let style = if style.trim().is_empty() {
        None
    } else {
        Some(style.parse::<Style>()?)
    };
    Ok(session.enrich_field(field, style).to_string())
}

fn split_field(args: &str) -> Result<(FieldId, &str)> {
    let args = args.trim_start();
    if args.is_empty() {
        return Err(PlannerError::InvalidArgument(
            "A field name is required".to_string(),
        ));
    }
    let (field, rest) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
    Ok((field.parse()?, rest.trim_start()))
}

/// Expands `\n` and `\\` escapes typed on a single input line
pub fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use chrono::NaiveDate;

    fn session() -> Session {
        Session::opened_on(
            Config::default(),
            NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
        )
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r"01/12: 宣傳期\n02/11: 開獎日"), "01/12: 宣傳期\n02/11: 開獎日");
        assert_eq!(unescape(r"a\\nb"), r"a\nb");
        assert_eq!(unescape(r"C:\temp\"), r"C:\temp\");
    }

    #[test]
    fn test_set_and_show_field() {
        let mut s = session();
        set(&mut s, r"schedule 01/12: 宣傳期\n02/11: 開獎日").unwrap();

        assert_eq!(show(&s, "schedule").unwrap(), "01/12: 宣傳期\n02/11: 開獎日");
    }

    #[test]
    fn test_set_without_value_empties_field() {
        let mut s = session();
        set(&mut s, "proposer").unwrap();
        assert_eq!(s.field(FieldId::Proposer), "");
    }

    #[test]
    fn test_set_unknown_field() {
        let mut s = session();
        assert!(matches!(
            set(&mut s, "budget 100"),
            Err(PlannerError::InvalidArgument(_))
        ));
        assert!(matches!(set(&mut s, "  "), Err(PlannerError::InvalidArgument(_))));
    }

    #[test]
    fn test_show_lists_every_field() {
        let s = session();
        let out = show(&s, "").unwrap();
        for descriptor in REGISTRY.iter() {
            assert!(out.contains(&format!("[{}]", descriptor.id)));
        }
    }

    #[test]
    fn test_enrich_with_style() {
        let mut s = session();
        set(&mut s, "marketing 區域廣告投遞").unwrap();

        let out = enrich(&mut s, "marketing lively").unwrap();

        assert!(out.contains("區域廣告投遞"));
        assert_eq!(s.field(FieldId::Marketing), out);
        assert!(enrich(&mut s, "marketing loud").is_err());
    }
}
