pub mod attendance;
pub mod cycle;

pub use attendance::{
    canonical_participant, points_for_label, AttendanceOption, CYCLE_DAYS, PARTICIPANTS,
};
pub use cycle::{Cycle, DailyRecord};
