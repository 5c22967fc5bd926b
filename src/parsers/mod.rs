mod prizes;
mod schedule;

pub use prizes::{has_prize_rows, parse_prizes, PrizeRow, PRIZE_COLUMNS};
pub use schedule::{parse_schedule, ScheduleRow};
