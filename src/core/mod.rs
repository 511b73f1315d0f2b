pub mod etl;
pub mod pipeline;

pub use crate::domain::model::{
    PlayerReport, PlayerSnapshot, Playtime, PlaytimeUnit, StatsDocument,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, StatsStore};
pub use crate::utils::error::Result;
