use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("skill trait `{name}` must lie in [0, 1], got {value}")]
    InvalidSkill { name: &'static str, value: f32 },

    #[error("global setting `{name}` must lie in [0, 1], got {value}")]
    InvalidSetting { name: &'static str, value: f32 },
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
