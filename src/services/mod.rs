mod achievements;
pub mod catalog;

pub use achievements::{
    AchievementBoard, AchievementSlot, AchievementsService, BoardInputs, Winner, WinnerKind,
    assemble_board,
};
