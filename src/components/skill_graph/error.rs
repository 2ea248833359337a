use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
	#[error("duplicate category key: {0}")]
	DuplicateCategory(String),

	#[error("skill `{name}` listed twice in category `{category}`")]
	DuplicateSkill { category: String, name: String },

	#[error("canvas unavailable: {0}")]
	Canvas(&'static str),

	#[error("failed to attach `{0}` listener")]
	Listener(&'static str),

	#[error("animation frame request failed")]
	AnimationFrame,
}
