/// One row of the schedule table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow {
    pub stage: String,
    pub detail: String,
}

/// Parses schedule text into rows.
///
/// Every non-blank line becomes a row. The line splits on its first `:`;
/// a line without one is a stage with an empty detail.
pub fn parse_schedule(content: &str) -> Vec<ScheduleRow> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| match line.split_once(':') {
            Some((stage, detail)) => ScheduleRow {
                stage: stage.trim().to_string(),
                detail: detail.trim().to_string(),
            },
            None => ScheduleRow {
                stage: line.trim().to_string(),
                detail: String::new(),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(stage: &str, detail: &str) -> ScheduleRow {
        ScheduleRow {
            stage: stage.to_string(),
            detail: detail.to_string(),
        }
    }

    #[test]
    fn test_two_phase_schedule() {
        let rows = parse_schedule("01/12-01/18: 宣傳期\n01/19-02/08: 銷售期");
        assert_eq!(
            rows,
            vec![row("01/12-01/18", "宣傳期"), row("01/19-02/08", "銷售期")]
        );
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let rows = parse_schedule("\n02/11: 開獎日\n   \r\n");
        assert_eq!(rows, vec![row("02/11", "開獎日")]);
    }

    #[test]
    fn test_line_without_colon_is_stage_only() {
        let rows = parse_schedule("全月檔期");
        assert_eq!(rows, vec![row("全月檔期", "")]);
    }

    #[test]
    fn test_splits_on_first_colon_only() {
        let rows = parse_schedule("02/11: 開獎 20:00 直播");
        assert_eq!(rows, vec![row("02/11", "開獎 20:00 直播")]);
    }

    #[test]
    fn test_fullwidth_colon_is_not_a_delimiter() {
        let rows = parse_schedule("02/11：開獎日");
        assert_eq!(rows, vec![row("02/11：開獎日", "")]);
    }
}
