use crate::error::Result;
use crate::session::Session;
use std::path::Path;

/// Writes the proposal document
///
/// `args` optionally names the target directory; otherwise the configured
/// output directory is used.
pub fn export(session: &Session, args: &str) -> Result<String> {
    let dir = args.trim();
    let dir = (!dir.is_empty()).then(|| Path::new(dir));
    let path = session.export_to(dir)?;
    Ok(format!("Exported {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use chrono::NaiveDate;

    #[test]
    fn test_export_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            logo_path: None,
            ..Config::default()
        };
        let session =
            Session::opened_on(config, NaiveDate::from_ymd_opt(2026, 1, 12).unwrap());

        let out = export(&session, dir.path().to_str().unwrap()).unwrap();

        assert!(out.starts_with("Exported "));
        assert!(dir.path().join("MoneyMKT_未命名企劃.docx").exists());
    }
}
